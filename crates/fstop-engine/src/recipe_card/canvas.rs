use image::RgbImage;

use super::font::{glyph, GLYPH_SIZE};
use crate::ambiance::Rgb;

/// Thin drawing layer over an RGB buffer. Coordinates are device pixels and
/// anything outside the buffer is clipped.
pub(crate) struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, image::Rgb(background.0)),
        }
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgb, alpha: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.image.width()) || y >= i64::from(self.image.height())
        {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for (channel, target) in pixel.0.iter_mut().zip(color.0) {
            let mixed = f32::from(*channel) * (1.0 - alpha) + f32::from(target) * alpha;
            *channel = mixed.round() as u8;
        }
    }

    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb, alpha: f32) {
        for py in y..y.saturating_add(height) {
            for px in x..x.saturating_add(width) {
                self.blend(i64::from(px), i64::from(py), color, alpha);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: u32, y: u32, width: u32, height: u32, thickness: u32, color: Rgb) {
        self.fill_rect(x, y, width, thickness, color, 1.0);
        self.fill_rect(x, y + height.saturating_sub(thickness), width, thickness, color, 1.0);
        self.fill_rect(x, y, thickness, height, color, 1.0);
        self.fill_rect(x + width.saturating_sub(thickness), y, thickness, height, color, 1.0);
    }

    /// Horizontal two-stop gradient.
    pub fn gradient_rect(&mut self, x: u32, y: u32, width: u32, height: u32, from: Rgb, to: Rgb) {
        let span = width.saturating_sub(1).max(1) as f32;
        for px in x..x.saturating_add(width) {
            let t = (px - x) as f32 / span;
            let mut color = [0u8; 3];
            for (idx, slot) in color.iter_mut().enumerate() {
                let value = f32::from(from.0[idx]) * (1.0 - t) + f32::from(to.0[idx]) * t;
                *slot = value.round() as u8;
            }
            self.fill_rect(px, y, 1, height, Rgb(color), 1.0);
        }
    }

    /// Soft radial glow fading linearly from `peak` at the center to nothing at `radius`.
    pub fn glow(&mut self, cx: i64, cy: i64, radius: u32, color: Rgb, peak: f32) {
        let r = i64::from(radius);
        for py in (cy - r)..=(cy + r) {
            for px in (cx - r)..=(cx + r) {
                let dx = (px - cx) as f32;
                let dy = (py - cy) as f32;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance >= radius as f32 {
                    continue;
                }
                self.blend(px, py, color, peak * (1.0 - distance / radius as f32));
            }
        }
    }

    /// Draws `text` with each font dot `dot` pixels square; returns the drawn width.
    pub fn text(&mut self, x: u32, y: u32, text: &str, dot: u32, color: Rgb) -> u32 {
        let mut cursor = x;
        for ch in text.chars() {
            let rows = glyph(ch);
            for (row_idx, row) in rows.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if (row >> col) & 1 == 0 {
                        continue;
                    }
                    self.fill_rect(
                        cursor + col * dot,
                        y + row_idx as u32 * dot,
                        dot,
                        dot,
                        color,
                        1.0,
                    );
                }
            }
            cursor += GLYPH_SIZE * dot;
        }
        text_width(text, dot)
    }

    pub fn text_right(&mut self, right: u32, y: u32, text: &str, dot: u32, color: Rgb) {
        let x = right.saturating_sub(text_width(text, dot));
        self.text(x, y, text, dot, color);
    }
}

pub(crate) fn text_width(text: &str, dot: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE * dot
}

pub(crate) fn text_height(dot: u32) -> u32 {
    GLYPH_SIZE * dot
}

/// Characters of advance that fit in `width` pixels.
pub(crate) fn columns(width: u32, dot: u32) -> usize {
    (width / (GLYPH_SIZE * dot)) as usize
}

#[cfg(test)]
mod tests {
    use super::{columns, text_width, Canvas};
    use crate::ambiance::Rgb;

    #[test]
    fn text_paints_inside_its_box() {
        let mut canvas = Canvas::new(40, 24, Rgb::new(0, 0, 0));
        let width = canvas.text(1, 1, "HI", 2, Rgb::new(255, 255, 255));
        assert_eq!(width, text_width("HI", 2));
        let image = canvas.into_image();
        let lit = image.pixels().filter(|pixel| pixel.0 == [255, 255, 255]).count();
        assert!(lit > 0);
        assert_eq!(image.get_pixel(39, 23).0, [0, 0, 0]);
    }

    #[test]
    fn blending_is_clipped_and_mixed() {
        let mut canvas = Canvas::new(4, 4, Rgb::new(0, 0, 0));
        canvas.fill_rect(2, 2, 10, 10, Rgb::new(200, 100, 0), 0.5);
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(3, 3).0, [100, 50, 0]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn columns_matches_text_width() {
        let fit = columns(100, 3);
        assert!(text_width(&"X".repeat(fit), 3) <= 100);
        assert!(text_width(&"X".repeat(fit + 1), 3) > 100);
    }
}
