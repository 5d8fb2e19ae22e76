// The paint surface the effect draws through, plus a software implementation
// that composites onto the window's FrameBuffer.
// Visual: source image first, then each dust particle as a small translucent square.

use crate::types::{FrameBuffer, PaintStyle, RasterBuffer, alpha_of};

/// Everything the effect needs from a drawing backend.
pub trait Rasterizer {
    /// Fill a `w`×`h` rectangle whose top-left corner is (x,y).
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, style: PaintStyle);

    /// Composite the whole `buffer` with its top-left at (x,y), scaled by `alpha`.
    fn paint_buffer(&mut self, buffer: &RasterBuffer, x: i32, y: i32, alpha: u8);

    /// Punch a transparent hole into `buffer` (coordinates are buffer-local).
    fn erase_region(&mut self, buffer: &mut RasterBuffer, x: i32, y: i32, w: usize, h: usize) {
        buffer.erase_region(x, y, w, h);
    }

    /// Make all of `buffer` transparent.
    fn erase_all(&mut self, buffer: &mut RasterBuffer) {
        buffer.erase_all();
    }
}

/// Mix one 8-bit channel: src over dst with `alpha` in 0..=255.
/// Uses (x + 1 + (x >> 8)) >> 8 as a fast x / 255.
#[inline]
fn blend_channel(src: u32, dst: u32, alpha: u32) -> u32 {
    let mixed = src * alpha + dst * (255 - alpha);
    (mixed + 1 + (mixed >> 8)) >> 8
}

/// Blend a 0x..RRGGBB color over an opaque 0x00RRGGBB pixel.
#[inline]
fn blend_rgb(src: u32, dst: u32, alpha: u32) -> u32 {
    let r = blend_channel((src >> 16) & 0xFF, (dst >> 16) & 0xFF, alpha);
    let g = blend_channel((src >> 8) & 0xFF, (dst >> 8) & 0xFF, alpha);
    let b = blend_channel(src & 0xFF, dst & 0xFF, alpha);
    (r << 16) | (g << 8) | b
}

/// Software rasterizer over a window FrameBuffer.
pub struct Canvas<'a> {
    fb: &'a mut FrameBuffer,
}

impl<'a> Canvas<'a> {
    pub fn new(fb: &'a mut FrameBuffer) -> Self {
        Self { fb }
    }

    /// Blend a pixel if (x,y) is inside bounds.
    #[inline]
    fn blend_pixel(&mut self, x: i64, y: i64, color: u32, alpha: u32) {
        if x < 0 || y < 0 || x >= self.fb.width as i64 || y >= self.fb.height as i64 {
            return;
        }
        let idx = y as usize * self.fb.width + x as usize;
        let dst = self.fb.pixels[idx];
        self.fb.pixels[idx] = match alpha {
            0 => dst,
            255 => color & 0x00_FF_FF_FF,
            a => blend_rgb(color, dst, a),
        };
    }
}

impl Rasterizer for Canvas<'_> {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, style: PaintStyle) {
        if style.alpha == 0 || w <= 0.0 || h <= 0.0 {
            return;
        }
        // Pixel centers inside [x, x+w) x [y, y+h) get covered.
        let x0 = x.round() as i64;
        let y0 = y.round() as i64;
        let x1 = (x + w).round() as i64;
        let y1 = (y + h).round() as i64;
        let max_x = self.fb.width as i64;
        let max_y = self.fb.height as i64;
        for py in y0.max(0)..y1.min(max_y) {
            for px in x0.max(0)..x1.min(max_x) {
                self.blend_pixel(px, py, style.color, style.alpha as u32);
            }
        }
    }

    fn paint_buffer(&mut self, buffer: &RasterBuffer, x: i32, y: i32, alpha: u8) {
        if alpha == 0 {
            return;
        }
        for by in 0..buffer.height() {
            let py = y as i64 + by as i64;
            if py < 0 || py >= self.fb.height as i64 {
                continue;
            }
            for bx in 0..buffer.width() {
                let src = buffer.pixel(bx, by);
                let src_alpha = alpha_of(src) as u32;
                if src_alpha == 0 {
                    continue;
                }
                let a = if alpha == 255 { src_alpha } else { src_alpha * alpha as u32 / 255 };
                self.blend_pixel(x as i64 + bx as i64, py, src, a);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// What a rasterizer was asked to do, in order.
    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum Op {
        Fill { x: f32, y: f32, size: f32, style: PaintStyle },
        Paint { x: i32, y: i32, alpha: u8 },
        Erase { x: i32, y: i32, w: usize, h: usize },
        EraseAll,
    }

    /// Rasterizer that only records calls (and still erases the buffer).
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub ops: Vec<Op>,
    }

    impl Recorder {
        pub fn fills(&self) -> usize {
            self.ops.iter().filter(|op| matches!(op, Op::Fill { .. })).count()
        }
    }

    impl Rasterizer for Recorder {
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, _h: f32, style: PaintStyle) {
            self.ops.push(Op::Fill { x, y, size: w, style });
        }

        fn paint_buffer(&mut self, _buffer: &RasterBuffer, x: i32, y: i32, alpha: u8) {
            self.ops.push(Op::Paint { x, y, alpha });
        }

        fn erase_region(&mut self, buffer: &mut RasterBuffer, x: i32, y: i32, w: usize, h: usize) {
            self.ops.push(Op::Erase { x, y, w, h });
            buffer.erase_region(x, y, w, h);
        }

        fn erase_all(&mut self, buffer: &mut RasterBuffer) {
            self.ops.push(Op::EraseAll);
            buffer.erase_all();
        }
    }

    #[test]
    fn opaque_fill_overwrites_pixels() {
        let mut fb = FrameBuffer::new(8, 8, 0x00_00_00_00);
        let mut canvas = Canvas::new(&mut fb);
        canvas.fill_rect(2.0, 2.0, 4.0, 4.0, PaintStyle::new(0xFF_FF_00_00, 255));
        assert_eq!(fb.pixels[2 * 8 + 2], 0x00_FF_00_00);
        assert_eq!(fb.pixels[5 * 8 + 5], 0x00_FF_00_00);
        assert_eq!(fb.pixels[6 * 8 + 6], 0);
        assert_eq!(fb.pixels[8 + 1], 0);
    }

    #[test]
    fn translucent_fill_blends_and_clips() {
        let mut fb = FrameBuffer::new(4, 4, 0x00_00_00_00);
        let mut canvas = Canvas::new(&mut fb);
        canvas.fill_rect(-2.0, -2.0, 4.0, 4.0, PaintStyle::new(0x00_FF_FF_FF, 128));
        let r = (fb.pixels[0] >> 16) & 0xFF;
        assert!((126..=130).contains(&r), "half-blend red was {r}");
        assert_eq!(fb.pixels[2 * 4 + 2], 0);
    }

    #[test]
    fn transparent_source_pixels_are_skipped() {
        let mut fb = FrameBuffer::new(4, 1, 0x00_11_22_33);
        let src = RasterBuffer::new(2, 1, vec![0x00_FF_FF_FF, 0xFF_00_00_FF]).unwrap();
        Canvas::new(&mut fb).paint_buffer(&src, 1, 0, 255);
        assert_eq!(fb.pixels, vec![0x00_11_22_33, 0x00_11_22_33, 0x00_00_00_FF, 0x00_11_22_33]);
    }
}
