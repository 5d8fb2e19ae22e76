// Where the source image comes from: something on screen that can be captured once.
// Visual: the captured pixels are what you see dissolve.

use std::path::PathBuf;

use image::RgbaImage;

use crate::error::Error;
use crate::types::RasterBuffer;

/// A captured element: its pixels plus where it sits on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub buffer: RasterBuffer,
    pub origin: (i32, i32),
}

/// The element being dissolved.
pub trait SnapshotProvider {
    /// False when the element has no parent to draw the effect into.
    fn is_attached(&self) -> bool {
        true
    }

    /// Grab the element's pixels. Only called after layout has settled.
    fn capture(&mut self) -> Result<Snapshot, Error>;

    /// Hide the real element once its pixels are owned by the effect.
    fn hide(&mut self) {}
}

/// Pack an RGBA image as 0xAARRGGBB, keeping transparency.
pub fn argb_from_rgba(img: &RgbaImage) -> Vec<u32> {
    img.pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
        })
        .collect()
}

/// An image file standing in for the element.
pub struct ImageSnapshot {
    path: PathBuf,
    origin: (i32, i32),
    hidden: bool,
}

impl ImageSnapshot {
    pub fn new(path: impl Into<PathBuf>, origin: (i32, i32)) -> Self {
        Self { path: path.into(), origin, hidden: false }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl SnapshotProvider for ImageSnapshot {
    fn capture(&mut self) -> Result<Snapshot, Error> {
        let img = image::open(&self.path)
            .map_err(|e| Error::ImageLoad(format!("{}: {e}", self.path.display())))?
            .to_rgba8();
        let (w, h) = img.dimensions();
        let buffer = RasterBuffer::new(w as usize, h as usize, argb_from_rgba(&img))?;
        Ok(Snapshot { buffer, origin: self.origin })
    }

    fn hide(&mut self) {
        self.hidden = true;
    }
}

/// An in-memory element; handy for tests and generated content.
pub struct StaticSnapshot {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
    origin: (i32, i32),
    attached: bool,
    hidden: bool,
}

impl StaticSnapshot {
    pub fn new(width: usize, height: usize, pixels: Vec<u32>, origin: (i32, i32)) -> Self {
        Self { width, height, pixels, origin, attached: true, hidden: false }
    }

    /// Freeze an already captured snapshot so a later `capture` returns the same pixels.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let buffer = &snapshot.buffer;
        Self::new(buffer.width(), buffer.height(), buffer.pixels().to_vec(), snapshot.origin)
    }

    /// Same element, but with no parent.
    pub fn detached(mut self) -> Self {
        self.attached = false;
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl SnapshotProvider for StaticSnapshot {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn capture(&mut self) -> Result<Snapshot, Error> {
        let buffer = RasterBuffer::new(self.width, self.height, self.pixels.clone())?;
        Ok(Snapshot { buffer, origin: self.origin })
    }

    fn hide(&mut self) {
        self.hidden = true;
    }
}
