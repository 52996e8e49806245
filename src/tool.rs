use egui::{Color32, Pos2};

use crate::stroke::{Glyph, ToolSnapshot};

/// Marker colors, cycled in order
pub const PALETTE: [Color32; 10] = [
    Color32::BLACK,
    Color32::RED,
    Color32::BLUE,
    Color32::from_rgb(0, 128, 0),     // green
    Color32::YELLOW,
    Color32::from_rgb(255, 165, 0),   // orange
    Color32::from_rgb(128, 0, 128),   // purple
    Color32::from_rgb(255, 192, 203), // pink
    Color32::BROWN,
    Color32::from_rgb(128, 128, 128), // gray
];

/// Human-readable names for [`PALETTE`], same order
pub const PALETTE_NAMES: [&str; 10] = [
    "black", "red", "blue", "green", "yellow", "orange", "purple", "pink", "brown", "gray",
];

/// Sticker rotations, cycled in order
pub const ROTATIONS: [u16; 4] = [0, 90, 180, 270];

/// A tool stamp drawn under the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub tool: ToolSnapshot,
    pub position: Pos2,
}

// Starts on the last angle so the first sticker pick lands on 0 degrees
const INITIAL_ROTATION_INDEX: usize = 3;

/// The cursor's view of the current tool.
///
/// Answers "what would be drawn if the pointer were pressed right now" and
/// tracks where the pointer is. Only the session mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    glyph: Glyph,
    thickness: u32,
    color_index: usize,
    rotation_index: usize,
    glyph_scale: f32,
    pointer: Pos2,
    present: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(3, 10.0)
    }
}

impl ToolState {
    pub fn new(thickness: u32, glyph_scale: f32) -> Self {
        Self {
            glyph: Glyph::Marker,
            thickness: thickness.max(1),
            color_index: 0,
            rotation_index: INITIAL_ROTATION_INDEX,
            glyph_scale,
            pointer: Pos2::ZERO,
            present: false,
        }
    }

    /// Switch to `glyph`, or back to the marker if it is already active.
    ///
    /// Returns true when `glyph` ended up active.
    pub fn select_tool(&mut self, glyph: Glyph) -> bool {
        if self.glyph == glyph {
            self.glyph = Glyph::Marker;
            false
        } else {
            self.glyph = glyph;
            true
        }
    }

    pub fn cycle_color(&mut self) {
        self.color_index = (self.color_index + 1) % PALETTE.len();
    }

    pub fn cycle_rotation(&mut self) {
        self.rotation_index = (self.rotation_index + 1) % ROTATIONS.len();
    }

    pub fn set_thickness(&mut self, thickness: u32) {
        self.thickness = thickness.max(1);
    }

    pub fn increase_thickness(&mut self) {
        self.thickness = self.thickness.saturating_add(1);
    }

    pub fn decrease_thickness(&mut self) {
        self.set_thickness(self.thickness.saturating_sub(1));
    }

    pub fn update_position(&mut self, position: Pos2) {
        self.pointer = position;
    }

    pub fn set_present(&mut self, present: bool) {
        self.present = present;
    }

    /// The selected glyph, or `None` while the pointer is off the canvas
    pub fn active_glyph(&self) -> Option<&Glyph> {
        self.present.then_some(&self.glyph)
    }

    /// The selected glyph regardless of pointer presence
    pub fn selected_glyph(&self) -> &Glyph {
        &self.glyph
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn color(&self) -> Color32 {
        PALETTE[self.color_index]
    }

    pub fn color_name(&self) -> &'static str {
        PALETTE_NAMES[self.color_index]
    }

    pub fn rotation_index(&self) -> usize {
        self.rotation_index
    }

    pub fn rotation_degrees(&self) -> u16 {
        ROTATIONS[self.rotation_index]
    }

    pub fn pointer(&self) -> Pos2 {
        self.pointer
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Freeze the current attributes into a value a stroke can own
    pub fn snapshot(&self) -> ToolSnapshot {
        ToolSnapshot {
            glyph: self.glyph.clone(),
            thickness: self.thickness,
            color: self.color(),
            rotation_degrees: self.rotation_degrees(),
            glyph_size: self.thickness as f32 * self.glyph_scale,
        }
    }

    /// The stamp to draw under the pointer, if the pointer is on the canvas
    pub fn preview(&self) -> Option<Preview> {
        self.present.then(|| Preview {
            tool: self.snapshot(),
            position: self.pointer,
        })
    }
}
