// The per-frame composite: source image, then erase-behind, then dust.
// Visual: the image is eaten away column by column from the left while the
// specks that came out of those columns float off.

use rand::Rng;

use crate::config::EffectConfig;
use crate::particle::Particle;
use crate::raster::Rasterizer;
use crate::types::{PaintStyle, RasterBuffer};

/// Rightmost absolute X already erased from the source. Only moves right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct EraseCursor(i32);

impl EraseCursor {
    pub fn value(self) -> i32 {
        self.0
    }

    /// Moved at least once since the effect started.
    pub fn has_moved(self) -> bool {
        self.0 != 0
    }

    /// True (and moved) when `x` is strictly right of the cursor.
    fn advance_to(&mut self, x: i32) -> bool {
        if x > self.0 {
            self.0 = x;
            true
        } else {
            false
        }
    }
}

/// What one frame did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    pub cursor: EraseCursor,
    /// Particles that were neither inert nor finished when visited.
    pub live: usize,
    /// Column strips erased this frame.
    pub strips: usize,
    /// The whole source was wiped this frame.
    pub full_clear: bool,
    /// Paint opacity was restored to opaque at frame end.
    pub paint_reset: bool,
}

impl FrameReport {
    pub fn all_finished(&self) -> bool {
        self.live == 0
    }
}

pub struct CompositeRenderer {
    origin: (i32, i32),
    /// Grid pitch: each particle stands for a gap×gap cell of the source.
    gap: usize,
    cleared_all: bool,
}

impl CompositeRenderer {
    /// `origin` is where the source buffer sits in absolute coordinates.
    pub fn new(origin: (i32, i32), config: EffectConfig) -> Self {
        Self {
            origin,
            gap: config.gap,
            cleared_all: false,
        }
    }

    /// Once the cursor gets this far right, the rest of the source goes at once.
    pub fn full_clear_threshold(&self, buffer: &RasterBuffer) -> i32 {
        self.origin.0 + buffer.width() as i32 - 2 * self.gap as i32
    }

    /// Render one frame and mutate the source buffer behind the particles.
    ///
    /// Particles are visited in emission order. For each live one, its column is
    /// erased (cursor permitting) *before* it is advanced and painted, so the
    /// fresh speck sits on top of the hole instead of being wiped by it.
    pub fn draw<Z, R>(
        &mut self,
        raster: &mut Z,
        buffer: &mut RasterBuffer,
        particles: &mut [Particle],
        mut cursor: EraseCursor,
        rng: &mut R,
    ) -> FrameReport
    where
        Z: Rasterizer + ?Sized,
        R: Rng + ?Sized,
    {
        // Particles paint with their own PaintStyle, so the source always goes down opaque.
        raster.paint_buffer(buffer, self.origin.0, self.origin.1, PaintStyle::OPAQUE);

        let threshold = self.full_clear_threshold(buffer);
        let mut live = 0;
        let mut strips = 0;
        let mut full_clear = false;

        for particle in particles.iter_mut() {
            if !particle.is_live() {
                continue;
            }
            live += 1;

            if particle.can_erase() {
                let (px, py) = particle.origin();
                if cursor.advance_to(px) && !self.cleared_all {
                    self.erase_strip(raster, buffer, px, py);
                    strips += 1;
                }
            }

            if !self.cleared_all && cursor.has_moved() && cursor.value() >= threshold {
                raster.erase_all(buffer);
                self.cleared_all = true;
                full_clear = true;
                log::debug!("source fully erased at cursor x={}", cursor.value());
            }

            particle.advance_frame(rng, raster);
        }

        FrameReport { cursor, live, strips, full_clear, paint_reset: live > 0 }
    }

    /// Erase the particle's gap-wide column from the particle's row down to the bottom edge.
    fn erase_strip<Z: Rasterizer + ?Sized>(
        &self,
        raster: &mut Z,
        buffer: &mut RasterBuffer,
        px: i32,
        py: i32,
    ) {
        let x = px - self.origin.0;
        let top = (py - self.origin.1).max(0) as usize;
        let height = buffer.height().saturating_sub(top);
        raster.erase_region(buffer, x, top as i32, self.gap, height);
    }
}
