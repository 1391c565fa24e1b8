// Offscreen display surface drawn on the CPU at native game resolution
//
// The game paints a low-resolution frame here every tick; the presenter
// uploads it as a texture and scales it up to the window.

use glam::{IVec2, UVec2, Vec2};
use image::{Rgba, RgbaImage};

/// Blend `src` over `dst` using the source alpha
fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let alpha = src[3] as u32;
    if alpha == 255 {
        return src;
    }
    let inv = 255 - alpha;
    let mix = |d: u8, s: u8| ((s as u32 * alpha + d as u32 * inv) / 255) as u8;
    Rgba([
        mix(dst[0], src[0]),
        mix(dst[1], src[1]),
        mix(dst[2], src[2]),
        dst[3].max(src[3]),
    ])
}

/// Fixed-size RGBA drawing surface
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    pub fn new(size: UVec2) -> Self {
        Self {
            pixels: RgbaImage::new(size.x.max(1), size.y.max(1)),
        }
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.pixels.width(), self.pixels.height())
    }

    /// Raw RGBA8 bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        if x < 0 || y < 0 || x as u32 >= self.pixels.width() || y as u32 >= self.pixels.height() {
            return None;
        }
        Some(*self.pixels.get_pixel(x as u32, y as u32))
    }

    fn put(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return;
        }
        let dst = *self.pixels.get_pixel(x, y);
        self.pixels.put_pixel(x, y, blend(dst, color));
    }

    pub fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = color;
        }
    }

    /// Draw a sprite with its top-left at `pos`, optionally mirrored.
    /// Fully transparent pixels are skipped; anything off-canvas is clipped.
    pub fn blit(&mut self, sprite: &RgbaImage, pos: IVec2, flip_x: bool) {
        let (w, h) = sprite.dimensions();
        for sy in 0..h {
            for sx in 0..w {
                let src_x = if flip_x { w - 1 - sx } else { sx };
                let color = *sprite.get_pixel(src_x, sy);
                if color[3] == 0 {
                    continue;
                }
                self.put(pos.x + sx as i32, pos.y + sy as i32, color);
            }
        }
    }

    /// Fill an axis-aligned rectangle, blending with the colour's alpha
    pub fn fill_rect(&mut self, pos: IVec2, size: UVec2, color: Rgba<u8>) {
        let size = size.as_ivec2();
        let min = pos.max(IVec2::ZERO);
        let max = (pos + size).min(self.size().as_ivec2());
        for y in min.y..max.y {
            for x in min.x..max.x {
                self.put(x, y, color);
            }
        }
    }

    /// One-pixel rectangle outline
    pub fn stroke_rect(&mut self, pos: IVec2, size: UVec2, color: Rgba<u8>) {
        if size.x == 0 || size.y == 0 {
            return;
        }
        let far = pos + size.as_ivec2() - IVec2::ONE;
        for x in pos.x..=far.x {
            self.put(x, pos.y, color);
            self.put(x, far.y, color);
        }
        for y in (pos.y + 1)..far.y {
            self.put(pos.x, y, color);
            self.put(far.x, y, color);
        }
    }

    /// Straight line between two display-space points
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba<u8>) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as i32;
        let step = delta / steps as f32;
        let mut point = from;
        for _ in 0..=steps {
            self.put(point.x.round() as i32, point.y.round() as i32, color);
            point += step;
        }
    }

    /// Paint everything outside a circle. Used for the level transition iris.
    pub fn mask_outside_circle(&mut self, center: Vec2, radius: f32, color: Rgba<u8>) {
        let r2 = radius.max(0.0).powi(2);
        let (w, h) = self.pixels.dimensions();
        for y in 0..h {
            for x in 0..w {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                if d.length_squared() > r2 {
                    self.pixels.put_pixel(x, y, color);
                }
            }
        }
    }
}
