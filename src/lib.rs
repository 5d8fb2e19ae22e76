//! Dust dissolve effect: an element's pixels are sampled into a grid of specks
//! that drift up and fade while the source image is erased behind them.
//!
//! [`effect::EffectController`] ties it together; [`raster::Rasterizer`] is the
//! drawing seam, with [`raster::Canvas`] as the software implementation.

pub mod camera;
pub mod config;
pub mod draw;
pub mod effect;
pub mod error;
pub mod particle;
pub mod raster;
pub mod renderer;
pub mod sampler;
pub mod snapshot;
pub mod ticker;
pub mod types;

pub use config::{EffectConfig, Tier};
pub use effect::EffectController;
pub use error::Error;
pub use raster::{Canvas, Rasterizer};
pub use snapshot::{Snapshot, SnapshotProvider};
