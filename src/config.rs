// Tiers, grid configuration and the simulation's tuning constants.

use std::time::Duration;

/// Fraction of the remaining distance covered per frame (eased interpolation).
pub const EASE: f32 = 0.07;
/// How much a delayed particle's countdown drops per frame.
pub const DELAY_STEP: f32 = 2.0;
/// Opacity lost per frame while a particle is still waiting.
pub const DELAYED_FADE: f32 = 0.0005;
/// Opacity lost per frame once a particle is flying.
pub const VISIBLE_FADE: f32 = 0.02;
/// At or below this opacity a particle is finished.
pub const FINISH_OPACITY: f32 = 0.001;
/// Destinations land within ±JITTER px of the origin on each axis.
pub const JITTER: i32 = 100;
/// Upward drift noise per frame, drawn from this inclusive range.
pub const DRIFT_MIN: i32 = 10;
pub const DRIFT_MAX: i32 = 15;
/// Total length of the effect.
pub const EFFECT_DURATION: Duration = Duration::from_secs(10);

/// Device performance class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Low,
    Average,
    High,
}

impl Tier {
    /// Numeric levels 1/2/3. Anything else is treated as Low.
    pub fn from_level(level: i32) -> Self {
        match level {
            3 => Tier::High,
            2 => Tier::Average,
            _ => Tier::Low,
        }
    }

    /// Case-insensitive name ("low", "average", "high"); unknown names are Low.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "high" => Tier::High,
            "average" | "avg" => Tier::Average,
            _ => Tier::Low,
        }
    }

    pub fn config(self) -> EffectConfig {
        EffectConfig::for_tier(self)
    }
}

/// Grid pitch and particle size selected by a tier.
/// Visual: smaller gap = more, finer dust (and more work per frame).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectConfig {
    pub gap: usize,
    pub particle_size: usize,
}

impl EffectConfig {
    pub fn for_tier(tier: Tier) -> Self {
        let (gap, particle_size) = match tier {
            Tier::High => (4, 4),
            Tier::Average => (6, 4),
            Tier::Low => (8, 4),
        };
        Self { gap, particle_size }
    }
}
