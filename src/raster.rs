use std::borrow::Cow;
use std::sync::OnceLock;

use ab_glyph::{Font, FontArc, GlyphId, ScaleFont, point};
use egui::{Color32, Pos2, Vec2};
use image::RgbaImage;

use crate::renderer::Surface;

/// CPU surface backed by an RGBA image.
///
/// Canvas coordinates are scaled to the image size, so a 256px canvas can be
/// rendered straight into a 1024px export without resampling.
pub struct RasterSurface {
    image: RgbaImage,
    scale: Vec2,
}

impl RasterSurface {
    /// Surface of `width` x `height` pixels showing a canvas of `canvas_size`
    pub fn new(width: u32, height: u32, canvas_size: Vec2) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            image: RgbaImage::new(width, height),
            scale: Vec2::new(
                width as f32 / canvas_size.x.max(1.0),
                height as f32 / canvas_size.y.max(1.0),
            ),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn to_pixels(&self, point: Pos2) -> Pos2 {
        Pos2::new(point.x * self.scale.x, point.y * self.scale.y)
    }

    // Lengths (widths, font sizes) scale uniformly
    fn length_scale(&self) -> f32 {
        self.scale.x.min(self.scale.y)
    }

    // Source-over with straight (unmultiplied) sRGBA
    fn blend_pixel(&mut self, x: i32, y: i32, [r, g, b, a]: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.image.width() as i32 || y >= self.image.height() as i32 {
            return;
        }
        if a == 0 {
            return;
        }
        let dst = self.image.get_pixel(x as u32, y as u32).0;
        let src_a = a as f32 / 255.0;
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        let blend = |src: u8, dst: u8| {
            let src_f = src as f32 / 255.0;
            let dst_f = dst as f32 / 255.0;
            ((src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a * 255.0)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        self.image.put_pixel(
            x as u32,
            y as u32,
            image::Rgba([
                blend(r, dst[0]),
                blend(g, dst[1]),
                blend(b, dst[2]),
                (out_a * 255.0).round() as u8,
            ]),
        );
    }

    // Takes pixel-space coordinates
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        let rgba = color.to_srgba_unmultiplied();
        let radius = radius.max(0.5);
        let radius_sq = radius * radius;
        let min_x = (center.x - radius).floor() as i32;
        let max_x = (center.x + radius).ceil() as i32;
        let min_y = (center.y - radius).floor() as i32;
        let max_y = (center.y + radius).ceil() as i32;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= radius_sq {
                    self.blend_pixel(x, y, rgba);
                }
            }
        }
    }

    // Round-capped segment: one disc per pixel step
    fn fill_segment(&mut self, start: Pos2, end: Pos2, radius: f32, color: Color32) {
        let delta = end - start;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.fill_circle(start + delta * t, radius, color);
        }
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self, color: Color32) {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        for pixel in self.image.pixels_mut() {
            *pixel = image::Rgba([r, g, b, a]);
        }
    }

    fn dot(&mut self, center: Pos2, diameter: f32, color: Color32) {
        let center = self.to_pixels(center);
        let radius = diameter * self.length_scale() / 2.0;
        self.fill_circle(center, radius, color);
    }

    fn polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        let radius = width * self.length_scale() / 2.0;
        let points: Vec<Pos2> = points.iter().map(|p| self.to_pixels(*p)).collect();
        for pair in points.windows(2) {
            self.fill_segment(pair[0], pair[1], radius, color);
        }
    }

    fn glyph(&mut self, text: &str, anchor: Pos2, size: f32, color: Color32, rotation_degrees: u16) {
        let fonts = glyph_fonts();
        if text.is_empty() || fonts.is_empty() {
            return;
        }
        let origin = self.to_pixels(anchor);
        let px_size = size * self.length_scale();
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        let mut caret = 0.0;
        for ch in text.chars() {
            // First bundled font that actually has the character
            let Some(font) = fonts.iter().find(|font| font.glyph_id(ch) != GlyphId(0)) else {
                continue;
            };
            let scaled = font.as_scaled(px_size);
            let mut glyph = scaled.scaled_glyph(ch);
            glyph.position = point(caret, 0.0);
            caret += scaled.h_advance(glyph.id);
            let Some(outlined) = scaled.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let mut coverage_pixels = Vec::new();
            outlined.draw(|x, y, coverage| {
                let local = Vec2::new(
                    bounds.min.x + x as f32 + 0.5,
                    bounds.min.y + y as f32 + 0.5,
                );
                coverage_pixels.push((rotate_quarter_turns(local, rotation_degrees), coverage));
            });
            for (offset, coverage) in coverage_pixels {
                let alpha = (a as f32 * coverage).round().clamp(0.0, 255.0) as u8;
                if alpha == 0 {
                    continue;
                }
                let target = origin + offset;
                self.blend_pixel(
                    target.x.floor() as i32,
                    target.y.floor() as i32,
                    [r, g, b, alpha],
                );
            }
        }
    }
}

// Clockwise on screen, since y points down. Angles are multiples of 90 so
// pixels map onto pixels exactly.
fn rotate_quarter_turns(v: Vec2, rotation_degrees: u16) -> Vec2 {
    match (rotation_degrees / 90) % 4 {
        1 => Vec2::new(-v.y, v.x),
        2 => Vec2::new(-v.x, -v.y),
        3 => Vec2::new(v.y, -v.x),
        _ => v,
    }
}

/// egui's bundled proportional fonts, in fallback order
fn glyph_fonts() -> &'static [FontArc] {
    static FONTS: OnceLock<Vec<FontArc>> = OnceLock::new();
    FONTS.get_or_init(|| {
        let definitions = egui::FontDefinitions::default();
        let Some(family) = definitions.families.get(&egui::FontFamily::Proportional) else {
            log::warn!("No proportional font family; stickers will not be exported");
            return Vec::new();
        };
        family
            .iter()
            .filter_map(|name| {
                let data = definitions.font_data.get(name)?;
                let font = match &data.font {
                    Cow::Borrowed(bytes) => {
                        ab_glyph::FontRef::try_from_slice_and_index(*bytes, data.index)
                            .map(FontArc::from)
                    }
                    Cow::Owned(bytes) => {
                        ab_glyph::FontVec::try_from_vec_and_index(bytes.clone(), data.index)
                            .map(FontArc::from)
                    }
                };
                font.map_err(|err| log::warn!("Skipping font {name}: {err}"))
                    .ok()
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(surface: &RasterSurface, x: u32, y: u32) -> [u8; 4] {
        surface.image().get_pixel(x, y).0
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut surface = RasterSurface::new(8, 8, Vec2::splat(8.0));
        surface.clear(Color32::WHITE);
        assert!(surface.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_polyline_scales_to_output() {
        let mut surface = RasterSurface::new(40, 40, Vec2::splat(10.0));
        surface.clear(Color32::WHITE);
        surface.polyline(&[Pos2::new(1.0, 5.0), Pos2::new(9.0, 5.0)], 1.0, Color32::BLACK);

        // 4x scale: the line runs along y = 20 from x = 4 to x = 36
        assert_eq!(pixel(&surface, 20, 20), [0, 0, 0, 255]);
        assert_eq!(pixel(&surface, 20, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn test_dot_outside_surface_is_clipped() {
        let mut surface = RasterSurface::new(4, 4, Vec2::splat(4.0));
        surface.clear(Color32::WHITE);
        surface.dot(Pos2::new(-10.0, -10.0), 2.0, Color32::RED);
        assert!(surface.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_translucent_dot_blends_unmultiplied() {
        let mut surface = RasterSurface::new(1, 1, Vec2::splat(1.0));
        surface.clear(Color32::WHITE);
        surface.dot(Pos2::new(0.5, 0.5), 2.0, Color32::from_rgba_unmultiplied(255, 0, 0, 128));

        let [r, g, b, a] = pixel(&surface, 0, 0);
        assert_eq!(r, 255);
        assert!((126..=128).contains(&g), "green was {g}");
        assert!((126..=128).contains(&b), "blue was {b}");
        assert_eq!(a, 255);
    }

    fn ink_in(surface: &RasterSurface, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> usize {
        let mut count = 0;
        for y in ys {
            for x in xs.clone() {
                if pixel(surface, x, y) != [255, 255, 255, 255] {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_glyph_sits_on_baseline_right_of_anchor() {
        let mut surface = RasterSurface::new(200, 200, Vec2::splat(200.0));
        surface.clear(Color32::WHITE);
        surface.glyph("A", Pos2::new(100.0, 100.0), 40.0, Color32::BLACK, 0);

        // Unrotated text grows right of the anchor and up from the baseline
        assert!(ink_in(&surface, 100..200, 0..100) > 0);
        assert_eq!(ink_in(&surface, 0..95, 0..200), 0);
        assert_eq!(ink_in(&surface, 0..200, 105..200), 0);
    }

    #[test]
    fn test_glyph_rotation_turns_ink_clockwise() {
        let mut surface = RasterSurface::new(200, 200, Vec2::splat(200.0));
        surface.clear(Color32::WHITE);
        surface.glyph("A", Pos2::new(100.0, 100.0), 40.0, Color32::BLACK, 90);

        // A quarter turn clockwise moves the ink from up-right to right-down
        assert!(ink_in(&surface, 100..200, 100..200) > 0);
        assert_eq!(ink_in(&surface, 0..200, 0..95), 0);
        assert_eq!(ink_in(&surface, 0..95, 0..200), 0);
    }

    #[test]
    fn test_quarter_turns() {
        let v = Vec2::new(1.0, 0.0);
        assert_eq!(rotate_quarter_turns(v, 0), v);
        assert_eq!(rotate_quarter_turns(v, 90), Vec2::new(0.0, 1.0));
        assert_eq!(rotate_quarter_turns(v, 180), Vec2::new(-1.0, 0.0));
        assert_eq!(rotate_quarter_turns(v, 270), Vec2::new(0.0, -1.0));
    }
}
