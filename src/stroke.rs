use egui::{Color32, Pos2};
use std::sync::Arc;
use uuid::Uuid;

use crate::renderer::Surface;

/// What a stroke stamps at each of its points
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Plain round marker, drawn as a connected line
    #[default]
    Marker,
    /// Emoji or custom text stamped at every point
    Sticker(String),
}

impl Glyph {
    pub fn is_sticker(&self) -> bool {
        matches!(self, Self::Sticker(_))
    }

    /// Label shown on toolbar buttons and in logs
    pub fn label(&self) -> &str {
        match self {
            Self::Marker => "Marker",
            Self::Sticker(text) => text,
        }
    }
}

/// The tool attributes a stroke is created with.
///
/// Captured by value at pointer-down so later tool changes never leak into
/// strokes that are already on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSnapshot {
    pub glyph: Glyph,
    /// Line width in pixels, at least 1
    pub thickness: u32,
    pub color: Color32,
    /// One of 0, 90, 180, 270
    pub rotation_degrees: u16,
    /// Sticker font size in pixels
    pub glyph_size: f32,
}

impl ToolSnapshot {
    /// Draw a single stamp of this tool at `at`
    pub fn stamp(&self, surface: &mut dyn Surface, at: Pos2) {
        match &self.glyph {
            Glyph::Marker => surface.dot(at, self.thickness as f32, self.color),
            Glyph::Sticker(text) => {
                surface.glyph(text, at, self.glyph_size, self.color, self.rotation_degrees);
            }
        }
    }
}

// Define a reference-counted type alias for Stroke
pub type StrokeRef = Arc<Stroke>;

/// One continuous pointer drag (or a single click) on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: Uuid,
    points: Vec<Pos2>,
    tool: ToolSnapshot,
    frozen: bool,
}

impl Stroke {
    /// Start an empty stroke with the given tool attributes
    pub fn new(tool: ToolSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            tool,
            frozen: false,
        }
    }

    // Create a new reference-counted Stroke
    pub fn new_ref(tool: ToolSnapshot) -> StrokeRef {
        Arc::new(Self::new(tool))
    }

    /// Append a point; ignored once the stroke is frozen
    pub fn append_point(&mut self, point: Pos2) {
        if self.frozen {
            return;
        }
        self.points.push(point);
    }

    /// Stop accepting points
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn tool(&self) -> &ToolSnapshot {
        &self.tool
    }

    pub fn glyph(&self) -> &Glyph {
        &self.tool.glyph
    }

    pub fn color(&self) -> Color32 {
        self.tool.color
    }

    pub fn thickness(&self) -> u32 {
        self.tool.thickness
    }

    pub fn rotation_degrees(&self) -> u16 {
        self.tool.rotation_degrees
    }

    /// Draw this stroke onto `surface`.
    ///
    /// A marker stroke with one point is a dot; with more it is a connected
    /// line. Sticker strokes stamp their glyph at every recorded point.
    pub fn render(&self, surface: &mut dyn Surface) {
        match (&self.tool.glyph, self.points.as_slice()) {
            (_, []) => {}
            (Glyph::Marker, [point]) => self.tool.stamp(surface, *point),
            (Glyph::Marker, points) => {
                surface.polyline(points, self.tool.thickness as f32, self.tool.color);
            }
            (Glyph::Sticker(_), points) => {
                for point in points {
                    self.tool.stamp(surface, *point);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawOp, RecordingSurface};

    fn marker() -> ToolSnapshot {
        ToolSnapshot {
            glyph: Glyph::Marker,
            thickness: 3,
            color: Color32::BLACK,
            rotation_degrees: 0,
            glyph_size: 30.0,
        }
    }

    fn sticker(text: &str) -> ToolSnapshot {
        ToolSnapshot {
            glyph: Glyph::Sticker(text.to_owned()),
            rotation_degrees: 90,
            ..marker()
        }
    }

    #[test]
    fn test_frozen_stroke_ignores_points() {
        let mut stroke = Stroke::new(marker());
        stroke.append_point(Pos2::new(1.0, 1.0));
        stroke.freeze();
        stroke.append_point(Pos2::new(2.0, 2.0));
        assert_eq!(stroke.points(), &[Pos2::new(1.0, 1.0)]);
    }

    #[test]
    fn test_empty_stroke_draws_nothing() {
        let stroke = Stroke::new(marker());
        let mut surface = RecordingSurface::default();
        stroke.render(&mut surface);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_single_point_marker_is_a_dot() {
        let mut stroke = Stroke::new(marker());
        stroke.append_point(Pos2::new(5.0, 6.0));
        let mut surface = RecordingSurface::default();
        stroke.render(&mut surface);
        assert_eq!(
            surface.ops,
            vec![DrawOp::Dot {
                center: Pos2::new(5.0, 6.0),
                diameter: 3.0,
                color: Color32::BLACK,
            }]
        );
    }

    #[test]
    fn test_marker_with_points_is_a_polyline() {
        let mut stroke = Stroke::new(marker());
        stroke.append_point(Pos2::new(0.0, 0.0));
        stroke.append_point(Pos2::new(4.0, 0.0));
        stroke.append_point(Pos2::new(4.0, 4.0));
        let mut surface = RecordingSurface::default();
        stroke.render(&mut surface);
        assert_eq!(surface.ops.len(), 1);
        assert!(matches!(&surface.ops[0], DrawOp::Polyline { points, .. } if points.len() == 3));
    }

    #[test]
    fn test_sticker_stamps_every_point_with_rotation() {
        let mut stroke = Stroke::new(sticker("🌕"));
        stroke.append_point(Pos2::new(1.0, 1.0));
        stroke.append_point(Pos2::new(2.0, 2.0));
        let mut surface = RecordingSurface::default();
        stroke.render(&mut surface);
        assert_eq!(surface.ops.len(), 2);
        for op in &surface.ops {
            match op {
                DrawOp::Glyph { text, rotation_degrees, size, .. } => {
                    assert_eq!(text, "🌕");
                    assert_eq!(*rotation_degrees, 90);
                    assert_eq!(*size, 30.0);
                }
                other => panic!("unexpected op {other:?}"),
            }
        }
    }

    #[test]
    fn test_strokes_get_distinct_ids() {
        assert_ne!(Stroke::new(marker()).id(), Stroke::new(marker()).id());
    }
}
