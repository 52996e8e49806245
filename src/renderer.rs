// src/renderer.rs
use eframe::egui::{self, Color32, FontId, Pos2, Rect, Shape, Vec2, emath::Rot2};

use crate::stroke::StrokeRef;
use crate::tool::Preview;

/// Something strokes can be drawn onto.
///
/// Coordinates are canvas-local pixels; implementations map them to their
/// own space (screen position, export resolution).
pub trait Surface {
    /// Wipe the whole surface to `color`
    fn clear(&mut self, color: Color32);

    /// Filled circle
    fn dot(&mut self, center: Pos2, diameter: f32, color: Color32);

    /// Connected line through `points`
    fn polyline(&mut self, points: &[Pos2], width: f32, color: Color32);

    /// Text whose left baseline sits on `anchor`, rotated clockwise about it
    fn glyph(&mut self, text: &str, anchor: Pos2, size: f32, color: Color32, rotation_degrees: u16);
}

/// Redraw the canvas from scratch.
///
/// Clears, paints `strokes` in order (later over earlier), then the tool
/// preview. Has no side effects besides the surface, so calling it twice
/// gives the same picture.
pub fn render(
    surface: &mut dyn Surface,
    background: Color32,
    strokes: &[StrokeRef],
    preview: Option<&Preview>,
) {
    surface.clear(background);
    for stroke in strokes {
        stroke.render(surface);
    }
    if let Some(preview) = preview {
        preview.tool.stamp(surface, preview.position);
    }
}

/// Draws into an egui painter, offset to where the canvas sits on screen
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: Rect,
}

impl<'a> PainterSurface<'a> {
    /// `rect` is the screen rectangle the canvas occupies
    pub fn new(painter: &'a egui::Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, point: Pos2) -> Pos2 {
        self.rect.min + point.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.rect, 0.0, color);
    }

    fn dot(&mut self, center: Pos2, diameter: f32, color: Color32) {
        self.painter
            .circle_filled(self.to_screen(center), diameter / 2.0, color);
    }

    fn polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        let points: Vec<Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter
            .add(Shape::line(points, egui::Stroke::new(width, color)));
    }

    fn glyph(&mut self, text: &str, anchor: Pos2, size: f32, color: Color32, rotation_degrees: u16) {
        let galley = self
            .painter
            .layout_no_wrap(text.to_owned(), FontId::proportional(size), color);
        // Galleys are positioned by their top-left corner
        let baseline = galley
            .rows
            .first()
            .and_then(|row| row.glyphs.first())
            .map_or(size, |glyph| glyph.pos.y);
        let angle = f32::from(rotation_degrees).to_radians();
        let offset = Rot2::from_angle(angle) * Vec2::new(0.0, -baseline);
        let pos = self.to_screen(anchor) + offset;
        self.painter.add(Shape::Text(
            egui::epaint::TextShape::new(pos, galley, color).with_angle(angle),
        ));
    }
}

/// One recorded call on a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color32),
    Dot {
        center: Pos2,
        diameter: f32,
        color: Color32,
    },
    Polyline {
        points: Vec<Pos2>,
        width: f32,
        color: Color32,
    },
    Glyph {
        text: String,
        anchor: Pos2,
        size: f32,
        color: Color32,
        rotation_degrees: u16,
    },
}

/// Surface that keeps a list of what was drawn since the last clear
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color32) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear(color));
    }

    fn dot(&mut self, center: Pos2, diameter: f32, color: Color32) {
        self.ops.push(DrawOp::Dot {
            center,
            diameter,
            color,
        });
    }

    fn polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn glyph(&mut self, text: &str, anchor: Pos2, size: f32, color: Color32, rotation_degrees: u16) {
        self.ops.push(DrawOp::Glyph {
            text: text.to_owned(),
            anchor,
            size,
            color,
            rotation_degrees,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{Glyph, Stroke, ToolSnapshot};
    use std::sync::Arc;

    fn stroke_at(x: f32, color: Color32) -> StrokeRef {
        let mut stroke = Stroke::new(ToolSnapshot {
            glyph: Glyph::Marker,
            thickness: 2,
            color,
            rotation_degrees: 0,
            glyph_size: 20.0,
        });
        stroke.append_point(Pos2::new(x, x));
        Arc::new(stroke)
    }

    #[test]
    fn test_render_clears_then_paints_in_order() {
        let strokes = vec![stroke_at(1.0, Color32::RED), stroke_at(2.0, Color32::BLUE)];
        let mut surface = RecordingSurface::default();
        render(&mut surface, Color32::WHITE, &strokes, None);

        assert_eq!(surface.ops.len(), 3);
        assert_eq!(surface.ops[0], DrawOp::Clear(Color32::WHITE));
        assert!(matches!(surface.ops[1], DrawOp::Dot { color: Color32::RED, .. }));
        assert!(matches!(surface.ops[2], DrawOp::Dot { color: Color32::BLUE, .. }));
    }

    #[test]
    fn test_render_is_idempotent() {
        let strokes = vec![stroke_at(1.0, Color32::RED)];
        let mut surface = RecordingSurface::default();
        render(&mut surface, Color32::WHITE, &strokes, None);
        let first = surface.clone();
        render(&mut surface, Color32::WHITE, &strokes, None);
        assert_eq!(surface, first);
    }

    #[test]
    fn test_preview_is_drawn_last() {
        let strokes = vec![stroke_at(1.0, Color32::RED)];
        let preview = Preview {
            tool: ToolSnapshot {
                glyph: Glyph::Sticker("👻".to_owned()),
                thickness: 1,
                color: Color32::BLACK,
                rotation_degrees: 180,
                glyph_size: 10.0,
            },
            position: Pos2::new(9.0, 9.0),
        };
        let mut surface = RecordingSurface::default();
        render(&mut surface, Color32::WHITE, &strokes, Some(&preview));

        assert!(matches!(
            surface.ops.last(),
            Some(DrawOp::Glyph { rotation_degrees: 180, .. })
        ));
    }
}
