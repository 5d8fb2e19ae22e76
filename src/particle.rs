// One speck of dust: where it came from, where it is drifting to, and how faded it is.
// Visual: a small colored square that waits its turn, then floats up and away while fading.

use rand::Rng;

use crate::config::{
    DELAY_STEP, DELAYED_FADE, DRIFT_MAX, DRIFT_MIN, EASE, FINISH_OPACITY, VISIBLE_FADE,
};
use crate::raster::Rasterizer;
use crate::types::{PaintStyle, alpha_of};

/// Lifecycle stage stored on the particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Sampled from a transparent pixel. Never moves, draws or erases.
    Inert,
    Active,
    Finished,
}

/// Observable state, splitting Active on the delay countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleState {
    Inert,
    /// delay > 0: invisible, fading slowly, not moving.
    Waiting,
    /// delay <= 0: moving, fading, drawn every frame.
    Visible,
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    color: u32,
    origin_x: i32,
    origin_y: i32,
    destination_x: i32,
    destination_y: i32,
    current_x: f32,
    current_y: f32,
    opacity: f32,
    delay: f32,
    stage: Stage,
    cell_size: usize,
    /// Set by the first `advance_frame`; erasing waits for it.
    advanced: bool,
}

impl Particle {
    /// A live particle. A color with zero alpha yields an inert one instead.
    pub fn new(
        color: u32,
        origin: (i32, i32),
        destination: (i32, i32),
        cell_size: usize,
        delay: f32,
    ) -> Self {
        if alpha_of(color) == 0 {
            return Self::inert();
        }
        Self {
            color,
            origin_x: origin.0,
            origin_y: origin.1,
            destination_x: destination.0,
            destination_y: destination.1,
            current_x: origin.0 as f32,
            current_y: origin.1 as f32,
            opacity: 1.0,
            delay,
            stage: Stage::Active,
            cell_size,
            advanced: false,
        }
    }

    /// Placeholder for a transparent grid cell.
    pub fn inert() -> Self {
        Self {
            color: 0,
            origin_x: 0,
            origin_y: 0,
            destination_x: 0,
            destination_y: 0,
            current_x: 0.0,
            current_y: 0.0,
            opacity: 0.0,
            delay: 0.0,
            stage: Stage::Inert,
            cell_size: 0,
            advanced: false,
        }
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    pub fn destination(&self) -> (i32, i32) {
        (self.destination_x, self.destination_y)
    }

    pub fn position(&self) -> (f32, f32) {
        (self.current_x, self.current_y)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    pub fn state(&self) -> ParticleState {
        match self.stage {
            Stage::Inert => ParticleState::Inert,
            Stage::Finished => ParticleState::Finished,
            Stage::Active if self.delay > 0.0 => ParticleState::Waiting,
            Stage::Active => ParticleState::Visible,
        }
    }

    /// Still part of the frame loop (not inert, not finished).
    pub fn is_live(&self) -> bool {
        self.stage == Stage::Active
    }

    /// Visible and already advanced at least once, so its column may be erased.
    pub fn can_erase(&self) -> bool {
        self.advanced && self.state() == ParticleState::Visible
    }

    /// Coarse horizontal move from the ticker: straight line origin -> destination.
    /// The next `advance_frame` eases from wherever this leaves it.
    pub fn advance_tick(&mut self, progress: f32) {
        if self.stage != Stage::Active {
            return;
        }
        let span = (self.destination_x - self.origin_x) as f32;
        self.current_x = self.origin_x as f32 + span * progress;
    }

    /// One rendered frame: count down or move, fade, maybe finish, then paint.
    /// Finished and inert particles are left untouched.
    pub fn advance_frame<R, Z>(&mut self, rng: &mut R, raster: &mut Z)
    where
        R: Rng + ?Sized,
        Z: Rasterizer + ?Sized,
    {
        if self.stage != Stage::Active {
            return;
        }
        self.advanced = true;

        if self.delay > 0.0 {
            self.opacity = (self.opacity - DELAYED_FADE).max(0.0);
            self.delay -= DELAY_STEP;
            return;
        }

        self.current_x += (self.destination_x as f32 - self.current_x) * EASE;

        let drift = rng.gen_range(DRIFT_MIN..=DRIFT_MAX).abs() as f32;
        let new_y = self.current_y + (self.destination_y as f32 - self.current_y) * EASE - drift;
        // Only ever float up.
        if new_y < self.current_y {
            self.current_y = new_y;
        }

        self.opacity = (self.opacity - VISIBLE_FADE).max(0.0);
        if self.opacity <= FINISH_OPACITY {
            self.stage = Stage::Finished;
        }

        let size = self.cell_size as f32;
        let style = PaintStyle::from_opacity(self.color, self.opacity);
        raster.fill_rect(self.current_x, self.current_y, size, size, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::tests::{Op, Recorder};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const RED: u32 = 0xFF_FF_00_00;

    #[test]
    fn transparent_color_makes_inert_particle() {
        let mut p = Particle::new(0x00_FF_FF_FF, (5, 5), (10, 10), 4, 0.0);
        assert_eq!(p.state(), ParticleState::Inert);

        let mut rng = StdRng::seed_from_u64(1);
        let mut rec = Recorder::default();
        p.advance_tick(0.5);
        p.advance_frame(&mut rng, &mut rec);
        assert!(rec.ops.is_empty());
        assert_eq!(p, Particle::inert());
    }

    #[test]
    fn waiting_particle_counts_down_without_moving() {
        let mut p = Particle::new(RED, (20, 30), (60, 0), 4, 3.0);
        let mut rng = StdRng::seed_from_u64(2);
        let mut rec = Recorder::default();

        p.advance_frame(&mut rng, &mut rec);
        assert_eq!(p.state(), ParticleState::Waiting);
        assert_eq!(p.delay(), 1.0);
        assert_eq!(p.position(), (20.0, 30.0));
        assert!((p.opacity() - 0.9995).abs() < 1e-6);
        assert!(!p.can_erase());

        p.advance_frame(&mut rng, &mut rec);
        assert_eq!(p.state(), ParticleState::Visible);
        assert!(p.can_erase());
        assert!(rec.ops.is_empty(), "waiting particles never paint");
    }

    #[test]
    fn zero_delay_particle_needs_one_frame_before_erasing() {
        let mut p = Particle::new(RED, (0, 0), (0, 0), 4, 0.0);
        assert_eq!(p.state(), ParticleState::Visible);
        assert!(!p.can_erase());
        p.advance_frame(&mut StdRng::seed_from_u64(3), &mut Recorder::default());
        assert!(p.can_erase());
    }

    #[test]
    fn tick_moves_x_linearly() {
        let mut p = Particle::new(RED, (10, 10), (110, 10), 4, 5.0);
        p.advance_tick(0.25);
        assert_eq!(p.position(), (35.0, 10.0));
        p.advance_tick(1.0);
        assert_eq!(p.position(), (110.0, 10.0));
    }

    #[test]
    fn visible_frame_eases_fades_and_paints() {
        let mut p = Particle::new(RED, (0, 100), (100, 100), 4, 0.0);
        let mut rng = StdRng::seed_from_u64(4);
        let mut rec = Recorder::default();
        p.advance_frame(&mut rng, &mut rec);

        let (x, y) = p.position();
        assert!((x - 7.0).abs() < 1e-4);
        assert!((85.0..=90.0).contains(&y), "drifted to {y}");
        assert!((p.opacity() - 0.98).abs() < 1e-6);
        match &rec.ops[..] {
            [Op::Fill { x: fx, y: fy, size, style }] => {
                assert_eq!((*fx, *fy), (x, y));
                assert_eq!(*size, 4.0);
                assert_eq!(style.color, RED);
                assert_eq!(style.alpha, 250);
            }
            other => panic!("unexpected ops {other:?}"),
        }
    }

    #[test]
    fn y_never_descends_and_opacity_never_rises() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            // Destination far below: easing pulls down harder than drift pushes up.
            let mut p = Particle::new(RED, (0, 0), (0, 100 + seed as i32 * 10), 4, 4.0);
            let mut rec = Recorder::default();
            let (mut last_y, mut last_opacity) = (p.position().1, p.opacity());
            while p.is_live() {
                p.advance_frame(&mut rng, &mut rec);
                let y = p.position().1;
                assert!(y <= last_y, "seed {seed}: y went {last_y} -> {y}");
                assert!(p.opacity() <= last_opacity);
                last_y = y;
                last_opacity = p.opacity();
            }
        }
    }

    #[test]
    fn finished_particle_is_frozen() {
        let mut p = Particle::new(RED, (0, 0), (50, -50), 4, 0.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut rec = Recorder::default();
        let mut frames = 0;
        while p.is_live() {
            p.advance_frame(&mut rng, &mut rec);
            frames += 1;
        }
        assert_eq!(frames, 50);
        assert_eq!(p.stage(), Stage::Finished);

        let snapshot = p.clone();
        let painted = rec.fills();
        p.advance_frame(&mut rng, &mut rec);
        p.advance_tick(0.9);
        assert_eq!(p, snapshot);
        assert_eq!(rec.fills(), painted);
    }
}
