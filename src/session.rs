//! The drawing session: everything the canvas shows, and the pointer state
//! machine that edits it.
//!
//! # Pointer lifecycle
//!
//! ```text
//!            down (tool present)
//!   ┌──────┐ ─────────────────────► ┌─────────┐
//!   │ Idle │                        │ Drawing │ ◄── move (append point)
//!   └──────┘ ◄───────────────────── └─────────┘
//!            up / leave (freeze)
//! ```
//!
//! The stroke is committed to history as soon as it starts, so every redraw
//! during a drag already includes it. Releasing the pointer only freezes it.
//!
//! Every public mutation raises a redraw request; the shell collects it once
//! per frame with [`DrawingSession::take_redraw_request`].
use egui::{Color32, Pos2, Vec2};
use image::RgbaImage;

use crate::config::SketchConfig;
use crate::history::History;
use crate::raster::RasterSurface;
use crate::renderer::{self, Surface};
use crate::stickers::StickerCatalog;
use crate::stroke::{Glyph, Stroke, StrokeRef};
use crate::tool::{Preview, ToolState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerPhase {
    #[default]
    Idle,
    Drawing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawingSession {
    tool: ToolState,
    history: History,
    stickers: StickerCatalog,
    phase: PointerPhase,
    canvas_size: Vec2,
    background: Color32,
    needs_redraw: bool,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(&SketchConfig::default())
    }
}

impl DrawingSession {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            tool: ToolState::new(config.default_thickness, config.glyph_scale),
            history: History::new(),
            stickers: StickerCatalog::new(config.stickers.iter().cloned()),
            phase: PointerPhase::Idle,
            canvas_size: Vec2::splat(config.canvas_size as f32),
            background: config.background_color(),
            needs_redraw: true,
        }
    }

    // --- pointer events -------------------------------------------------

    pub fn on_pointer_enter(&mut self, position: Pos2) {
        self.tool.set_present(true);
        self.tool.update_position(position);
        self.request_redraw();
    }

    pub fn on_pointer_leave(&mut self) {
        self.finish_stroke();
        self.tool.set_present(false);
        self.request_redraw();
    }

    /// Start a stroke at `position` if a tool is active
    pub fn on_pointer_down(&mut self, position: Pos2) {
        self.tool.update_position(position);
        // A down without a matching up leaves the old stroke dangling
        self.finish_stroke();

        if self.tool.active_glyph().is_some() {
            let mut stroke = Stroke::new(self.tool.snapshot());
            stroke.append_point(position);
            log::debug!(
                "Stroke {} started with {} at {:?}",
                stroke.id(),
                stroke.glyph().label(),
                position
            );
            self.history.commit(StrokeRef::new(stroke));
            self.phase = PointerPhase::Drawing;
        } else {
            log::debug!("Pointer down with no active tool, ignoring");
        }
        self.request_redraw();
    }

    pub fn on_pointer_move(&mut self, position: Pos2) {
        self.tool.update_position(position);
        if self.phase == PointerPhase::Drawing {
            if let Some(stroke) = self.history.last_mut() {
                stroke.append_point(position);
            }
        }
        self.request_redraw();
    }

    pub fn on_pointer_up(&mut self) {
        self.finish_stroke();
        self.request_redraw();
    }

    // Freezes the live stroke. It is already in history, so nothing is pushed.
    fn finish_stroke(&mut self) {
        if self.phase != PointerPhase::Drawing {
            return;
        }
        self.phase = PointerPhase::Idle;
        if let Some(stroke) = self.history.last_mut() {
            stroke.freeze();
            log::debug!("Stroke {} finished with {} points", stroke.id(), stroke.points().len());
        }
    }

    // --- toolbar commands -----------------------------------------------

    /// Switch to the marker and move to the next palette color
    pub fn select_marker(&mut self) {
        if self.tool.selected_glyph().is_sticker() {
            let current = self.tool.selected_glyph().clone();
            self.tool.select_tool(current);
        }
        self.tool.cycle_color();
        log::info!("Marker selected, color {}", self.tool.color_name());
        self.request_redraw();
    }

    /// Toggle a sticker; picking the active one again returns to the marker.
    ///
    /// Each time a sticker becomes active its rotation advances a quarter turn.
    pub fn select_sticker(&mut self, glyph: &str) {
        if self.select_tool(Glyph::Sticker(glyph.to_owned())) {
            self.tool.cycle_rotation();
        }
        log::info!(
            "Tool {} selected at {}°",
            self.tool.selected_glyph().label(),
            self.tool.rotation_degrees()
        );
    }

    /// Toggle `glyph` as the active tool. Returns true if it is now active.
    pub fn select_tool(&mut self, glyph: Glyph) -> bool {
        let active = self.tool.select_tool(glyph);
        self.request_redraw();
        active
    }

    /// Add text from the custom sticker prompt. `None` means cancelled.
    pub fn add_custom_sticker(&mut self, text: Option<&str>) -> bool {
        let added = self.stickers.add(text);
        if added {
            log::info!("Custom sticker added ({} total)", self.stickers.len());
            self.request_redraw();
        } else {
            log::warn!("Custom sticker rejected: {text:?}");
        }
        added
    }

    pub fn cycle_color(&mut self) {
        self.tool.cycle_color();
        self.request_redraw();
    }

    pub fn cycle_rotation(&mut self) {
        self.tool.cycle_rotation();
        self.request_redraw();
    }

    pub fn set_thickness(&mut self, thickness: u32) {
        self.tool.set_thickness(thickness);
        self.request_redraw();
    }

    pub fn increase_thickness(&mut self) {
        self.tool.increase_thickness();
        self.request_redraw();
    }

    pub fn decrease_thickness(&mut self) {
        self.tool.decrease_thickness();
        self.request_redraw();
    }

    pub fn undo(&mut self) {
        self.finish_stroke();
        if self.history.undo() {
            log::info!("Undo ({} strokes left)", self.history.committed().len());
        }
        self.request_redraw();
    }

    pub fn redo(&mut self) {
        self.finish_stroke();
        if self.history.redo() {
            log::info!("Redo ({} strokes)", self.history.committed().len());
        }
        self.request_redraw();
    }

    /// Empty the canvas and both history stacks
    pub fn clear(&mut self) {
        self.finish_stroke();
        self.history.clear();
        log::info!("Canvas cleared");
        self.request_redraw();
    }

    // --- rendering ------------------------------------------------------

    fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Returns true once after any mutation, then resets
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// The tool stamp under the pointer; hidden while drawing or off canvas
    pub fn preview(&self) -> Option<Preview> {
        match self.phase {
            PointerPhase::Drawing => None,
            PointerPhase::Idle => self.tool.preview(),
        }
    }

    /// Redraw the whole canvas, strokes first and the preview on top
    pub fn render(&self, surface: &mut dyn Surface) {
        renderer::render(
            surface,
            self.background,
            self.history.committed(),
            self.preview().as_ref(),
        );
    }

    /// Read-only copy of the committed strokes, safe to send to another thread
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            canvas_size: self.canvas_size,
            background: self.background,
            strokes: self.history.committed().to_vec(),
        }
    }

    /// Render the committed strokes at any output resolution
    pub fn render_snapshot(&self, width: u32, height: u32) -> RgbaImage {
        self.snapshot().rasterize(width, height)
    }

    // --- accessors ------------------------------------------------------

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn committed(&self) -> &[StrokeRef] {
        self.history.committed()
    }

    pub fn redo_stack(&self) -> &[StrokeRef] {
        self.history.redo_stack()
    }

    pub fn stickers(&self) -> &StickerCatalog {
        &self.stickers
    }

    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    pub fn is_drawing(&self) -> bool {
        self.phase == PointerPhase::Drawing
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }
}

/// Committed strokes frozen at one moment, independent of the live session
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSnapshot {
    pub canvas_size: Vec2,
    pub background: Color32,
    pub strokes: Vec<StrokeRef>,
}

impl CanvasSnapshot {
    /// Draw the snapshot into a new `width` x `height` image
    pub fn rasterize(&self, width: u32, height: u32) -> RgbaImage {
        let mut surface = RasterSurface::new(width, height, self.canvas_size);
        renderer::render(&mut surface, self.background, &self.strokes, None);
        surface.into_image()
    }
}
