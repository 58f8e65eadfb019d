//! Procedural stripe texture for the pole.

use crate::constants::pole as consts;

/// RGB raster with repeat-wrapped sampling and a scrollable UV offset.
#[derive(Debug, Clone)]
pub struct StripeTexture {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    pixels: Vec<[u8; 3]>,
    /// UV repeat (horizontal, vertical)
    pub repeat: (f32, f32),
    /// UV offset, kept within `[0, 1)` since sampling wraps anyway
    pub offset: (f32, f32),
}

impl StripeTexture {
    /// White raster with diagonal gold stripes, repeated 2x4.
    pub fn barber() -> Self {
        let size = consts::TEXTURE_SIZE;
        let mut texture = Self {
            width: size,
            height: size,
            pixels: vec![consts::BASE_COLOR; size * size],
            repeat: consts::TEXTURE_REPEAT,
            offset: (0.0, 0.0),
        };

        let stripe = consts::STRIPE_WIDTH;
        for top in (0..size).step_by(stripe * 2) {
            texture.fill_slant(top as f32, stripe as f32, consts::STRIPE_COLOR);
        }
        texture
    }

    /// Fill the parallelogram (0,top) (w,top+band) (w,top+2*band) (0,top+band).
    fn fill_slant(&mut self, top: f32, band: f32, color: [u8; 3]) {
        let w = self.width as f32;
        for y in 0..self.height {
            let cy = y as f32 + 0.5;
            for x in 0..self.width {
                let cx = x as f32 + 0.5;
                let upper = band.mul_add(cx / w, top);
                if cy >= upper && cy < upper + band {
                    self.pixels[y * self.width + x] = color;
                }
            }
        }
    }

    /// Texel at pixel coordinates (row 0 is the top of the raster)
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels
            .get(y * self.width + x)
            .copied()
            .unwrap_or(consts::BASE_COLOR)
    }

    /// Nearest-texel sample at mesh UV, after repeat and offset.
    ///
    /// V grows upwards as on the mesh, so the raster is read flipped.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample(&self, u: f32, v: f32) -> [u8; 3] {
        let tu = u.mul_add(self.repeat.0, self.offset.0).rem_euclid(1.0);
        let tv = v.mul_add(self.repeat.1, self.offset.1).rem_euclid(1.0);
        let x = ((tu * self.width as f32) as usize).min(self.width.saturating_sub(1));
        let y = (((1.0 - tv) * self.height as f32) as usize).min(self.height.saturating_sub(1));
        self.pixel(x, y)
    }

    /// Shift the vertical UV offset.
    pub fn scroll(&mut self, dv: f32) {
        self.offset.1 = (self.offset.1 + dv).rem_euclid(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripes_start_at_left_edge_and_slant_down() {
        let tex = StripeTexture::barber();
        // Left column: gold rows 0..30, white 30..60, gold again from 60.
        assert_eq!(tex.pixel(0, 0), consts::STRIPE_COLOR);
        assert_eq!(tex.pixel(0, 29), consts::STRIPE_COLOR);
        assert_eq!(tex.pixel(0, 45), consts::BASE_COLOR);
        assert_eq!(tex.pixel(0, 60), consts::STRIPE_COLOR);
        // Right edge is pushed down by one band width.
        assert_eq!(tex.pixel(255, 10), consts::BASE_COLOR);
        assert_eq!(tex.pixel(255, 40), consts::STRIPE_COLOR);
    }

    #[test]
    fn sampling_wraps_with_repeat() {
        let tex = StripeTexture::barber();
        // With 2x horizontal repeat, u and u + 0.5 land on the same texel.
        assert_eq!(tex.sample(0.1, 0.3), tex.sample(0.6, 0.3));
        // With 4x vertical repeat, v and v + 0.25 land on the same texel.
        assert_eq!(tex.sample(0.1, 0.3), tex.sample(0.1, 0.55));
    }

    #[test]
    fn scroll_keeps_offset_in_unit_range() {
        let mut tex = StripeTexture::barber();
        for _ in 0..250 {
            tex.scroll(consts::SCROLL_STEP);
        }
        assert!((0.0..1.0).contains(&tex.offset.1));
        assert!((tex.offset.1 - 0.5).abs() < 1e-3);
    }
}
