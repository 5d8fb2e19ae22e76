// The dissolve effect as a whole: capture once, sample into dust, then tick and draw
// until the ticker runs out.
// Visual: the element vanishes and is replaced by a copy of itself that crumbles
// left to right into specks drifting up and away.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{EFFECT_DURATION, EffectConfig, Tier};
use crate::error::Error;
use crate::particle::{Particle, Stage};
use crate::raster::Rasterizer;
use crate::renderer::{CompositeRenderer, EraseCursor, FrameReport};
use crate::sampler;
use crate::snapshot::SnapshotProvider;
use crate::ticker::Ticker;
use crate::types::RasterBuffer;

pub struct EffectController {
    tier: Tier,
    config: EffectConfig,
    origin: (i32, i32),
    buffer: RasterBuffer,
    particles: Vec<Particle>,
    cursor: EraseCursor,
    renderer: CompositeRenderer,
    rng: StdRng,
    ticker: Ticker,
    reported_finish: bool,
}

impl EffectController {
    /// Grid pitch and particle size for a tier.
    pub fn configure(tier: Tier) -> EffectConfig {
        EffectConfig::for_tier(tier)
    }

    /// Capture `host`, hide it and start dissolving its pixels.
    pub fn start<P: SnapshotProvider + ?Sized>(host: &mut P, tier: Tier) -> Result<Self, Error> {
        Self::start_with_rng(host, tier, StdRng::from_entropy())
    }

    /// Same as `start` with a fixed seed, so trajectories repeat exactly.
    pub fn start_seeded<P: SnapshotProvider + ?Sized>(
        host: &mut P,
        tier: Tier,
        seed: u64,
    ) -> Result<Self, Error> {
        Self::start_with_rng(host, tier, StdRng::seed_from_u64(seed))
    }

    fn start_with_rng<P: SnapshotProvider + ?Sized>(
        host: &mut P,
        tier: Tier,
        mut rng: StdRng,
    ) -> Result<Self, Error> {
        if !host.is_attached() {
            return Err(Error::DetachedHost);
        }
        let snapshot = host.capture()?;
        host.hide();

        let config = Self::configure(tier);
        let particles = sampler::sample(&snapshot.buffer, snapshot.origin, config, &mut rng);
        let (cols, rows) = sampler::grid_size(&snapshot.buffer, config.gap);
        log::info!(
            "dissolving {}x{} snapshot at {:?}: tier {:?}, {}x{} grid, {} live particles",
            snapshot.buffer.width(),
            snapshot.buffer.height(),
            snapshot.origin,
            tier,
            cols,
            rows,
            particles.iter().filter(|p| p.is_live()).count()
        );

        Ok(Self {
            tier,
            config,
            origin: snapshot.origin,
            renderer: CompositeRenderer::new(snapshot.origin, config),
            buffer: snapshot.buffer,
            particles,
            cursor: EraseCursor::default(),
            rng,
            ticker: Ticker::start(EFFECT_DURATION, Instant::now()),
            reported_finish: false,
        })
    }

    /// Coarse horizontal update for every active particle.
    pub fn on_tick(&mut self, progress: f32) {
        for particle in self.particles.iter_mut().filter(|p| p.stage() == Stage::Active) {
            particle.advance_tick(progress);
        }
    }

    /// Poll the ticker and apply any new progress. False once the run is over.
    pub fn advance(&mut self, now: Instant) -> bool {
        match self.ticker.poll(now) {
            Some(progress) => {
                self.on_tick(progress);
                true
            }
            None => false,
        }
    }

    /// Render one frame, erasing behind the particles as they leave.
    pub fn draw<Z: Rasterizer + ?Sized>(&mut self, raster: &mut Z) -> FrameReport {
        let report = self.renderer.draw(
            raster,
            &mut self.buffer,
            &mut self.particles,
            self.cursor,
            &mut self.rng,
        );
        self.cursor = report.cursor;
        if report.all_finished() && !self.reported_finish {
            self.reported_finish = true;
            log::debug!("all particles finished; idling until the ticker ends");
        }
        report
    }

    /// The host went away: stop ticking.
    pub fn detach(&mut self) {
        self.ticker.stop();
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Every particle is inert or finished.
    pub fn is_finished(&self) -> bool {
        self.particles.iter().all(|p| !p.is_live())
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn config(&self) -> EffectConfig {
        self.config
    }

    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    pub fn buffer(&self) -> &RasterBuffer {
        &self.buffer
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn cursor(&self) -> EraseCursor {
        self.cursor
    }
}
