// Turns the captured image into a coarse grid of dust particles.
// Visual: each grid cell becomes one speck colored like the pixel at its top-left corner.

use rand::Rng;

use crate::config::{EffectConfig, JITTER};
use crate::particle::Particle;
use crate::types::{RasterBuffer, alpha_of};

/// Grid dimensions (columns, rows) for a buffer at the given gap.
pub fn grid_size(buffer: &RasterBuffer, gap: usize) -> (usize, usize) {
    if gap == 0 {
        return (0, 0);
    }
    (buffer.width() / gap, buffer.height() / gap)
}

/// Sample one particle per grid cell, row-major.
///
/// Only the single pixel at `(x*gap, y*gap)` decides a cell's color, so thin or
/// partly transparent detail between samples can be missed. Opaque cells start
/// at `origin + (x*gap, y*gap)` and wait `x` frames-worth of delay, which makes
/// the image dissolve left to right. Transparent cells become inert placeholders.
/// The output order is the order the renderer visits particles in.
pub fn sample<R: Rng + ?Sized>(
    buffer: &RasterBuffer,
    origin: (i32, i32),
    config: EffectConfig,
    rng: &mut R,
) -> Vec<Particle> {
    let gap = config.gap;
    let (count_x, count_y) = grid_size(buffer, gap);
    let mut particles = Vec::with_capacity(count_x * count_y);

    for y in 0..count_y {
        for x in 0..count_x {
            let color = buffer.pixel(x * gap, y * gap);
            if alpha_of(color) == 0 {
                particles.push(Particle::inert());
                continue;
            }
            let px = origin.0 + (x * gap) as i32;
            let py = origin.1 + (y * gap) as i32;
            let destination = (
                px + rng.gen_range(-JITTER..=JITTER),
                py + rng.gen_range(-JITTER..=JITTER),
            );
            particles.push(Particle::new(
                color,
                (px, py),
                destination,
                config.particle_size,
                x as f32,
            ));
        }
    }

    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::ParticleState;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const HIGH: EffectConfig = EffectConfig { gap: 4, particle_size: 4 };

    #[test]
    fn opaque_cells_start_at_their_source_pixel() {
        let buffer = RasterBuffer::filled(13, 9, 0xFF_00_FF_00).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let particles = sample(&buffer, (100, 50), HIGH, &mut rng);

        assert_eq!(grid_size(&buffer, 4), (3, 2));
        assert_eq!(particles.len(), 6);
        for (i, p) in particles.iter().enumerate() {
            let (x, y) = (i % 3, i / 3);
            assert_eq!(p.origin(), (100 + 4 * x as i32, 50 + 4 * y as i32));
            assert_eq!(p.delay(), x as f32);
            assert_eq!(p.cell_size(), 4);
            let (dx, dy) = p.destination();
            assert!((dx - p.origin().0).abs() <= JITTER);
            assert!((dy - p.origin().1).abs() <= JITTER);
        }
    }

    #[test]
    fn only_the_sampled_pixel_decides_transparency() {
        // Opaque everywhere except the sampled corners of the second column.
        let mut pixels = vec![0xFF_12_34_56u32; 8 * 4];
        pixels[4] = 0x00_12_34_56;
        let buffer = RasterBuffer::new(8, 4, pixels).unwrap();
        let particles = sample(&buffer, (0, 0), HIGH, &mut StdRng::seed_from_u64(8));

        assert_eq!(particles.len(), 2);
        assert_eq!(particles[0].state(), ParticleState::Visible);
        assert_eq!(particles[0].color(), 0xFF_12_34_56);
        assert_eq!(particles[1].state(), ParticleState::Inert);
    }

    #[test]
    fn image_smaller_than_one_cell_yields_nothing() {
        let buffer = RasterBuffer::filled(3, 3, 0xFF_FF_FF_FF).unwrap();
        assert!(sample(&buffer, (0, 0), HIGH, &mut StdRng::seed_from_u64(9)).is_empty());
    }
}
