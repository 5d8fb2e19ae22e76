// Core pixel types shared by the sampler, the renderer and the window.

use crate::error::Error;

/// Fully transparent ARGB pixel; what erased regions of the source become.
pub const TRANSPARENT: u32 = 0x00_00_00_00;

/// Alpha channel of a packed 0xAARRGGBB color.
#[inline]
pub fn alpha_of(argb: u32) -> u8 {
    ((argb >> 24) & 0xFF) as u8
}

/// The captured source image, 0xAARRGGBB per pixel.
/// Visual: this is the "message" that dissolves; erased pixels become see-through.
/// Its dimensions are fixed at creation; only pixel values change afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl RasterBuffer {
    /// Wrap an ARGB pixel vector (row-major, `width * height` entries).
    /// Zero-area or short buffers are rejected as an invalid snapshot.
    pub fn new(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self, Error> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(Error::InvalidSnapshot { width, height });
        }
        Ok(Self { width, height, pixels })
    }

    /// A buffer where every pixel has the same color.
    pub fn filled(width: usize, height: usize, argb: u32) -> Result<Self, Error> {
        Self::new(width, height, vec![argb; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at (x,y), or None outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// In-crate lookup; callers stay in bounds.
    #[inline]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    /// Make a rectangle transparent. The rectangle is clipped to the buffer,
    /// so negative origins or oversize extents are fine.
    /// Visual: a hole opens in the source image.
    pub fn erase_region(&mut self, x: i32, y: i32, w: usize, h: usize) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x as i64 + w as i64).clamp(0, self.width as i64) as usize;
        let y1 = (y as i64 + h as i64).clamp(0, self.height as i64) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for row in y0..y1 {
            let ofs = row * self.width;
            self.pixels[ofs + x0..ofs + x1].fill(TRANSPARENT);
        }
    }

    /// Make the whole buffer transparent.
    pub fn erase_all(&mut self) {
        self.pixels.fill(TRANSPARENT);
    }

    /// True once nothing visible is left.
    pub fn is_clear(&self) -> bool {
        self.pixels.iter().all(|&p| alpha_of(p) == 0)
    }
}

/// The window surface. Each entry is 0x00RRGGBB for minifb.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, background: u32) -> Self {
        Self { width, height, pixels: vec![background; width * height] }
    }

    pub fn clear(&mut self, background: u32) {
        self.pixels.fill(background);
    }
}

/// Color + alpha used for one paint call. Built fresh for every particle,
/// so one particle's fade never leaks into the next draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintStyle {
    pub color: u32, // 0xAARRGGBB; the alpha byte is ignored in favor of `alpha`
    pub alpha: u8,
}

impl PaintStyle {
    pub const OPAQUE: u8 = 255;

    pub fn new(color: u32, alpha: u8) -> Self {
        Self { color, alpha }
    }

    /// Map an opacity in [0,1] to a 0..=255 alpha, rounding and clamping.
    pub fn from_opacity(color: u32, opacity: f32) -> Self {
        let alpha = (opacity * 255.0).round().clamp(0.0, 255.0) as u8;
        Self { color, alpha }
    }
}
