//! CPU particle spray: a fixed population of point particles stored as
//! structure-of-arrays, advanced each frame by lane-wide kernels on a fixed
//! worker pool.
//!
//! ```no_run
//! use particle_spray::{BoundsProbe, ParticleSystem, SimulationConfig};
//!
//! let mut system = ParticleSystem::new(SimulationConfig::default())?;
//! let mut probe = BoundsProbe::default();
//! for _ in 0..60 {
//!     system.update(1.0 / 60.0);
//!     system.render(&mut probe)?;
//! }
//! system.release();
//! # Ok::<(), particle_spray::SimulationError>(())
//! ```

pub mod core;
pub mod error;
pub mod systems;
pub mod utils;

pub use crate::core::{ParticleState, ParticleStore};
pub use error::{SimulationError, SimulationResult};
pub use systems::{
    BoundsProbe, FrameReport, ParticleSystem, RenderBridge, RenderSnapshot, SimulationConfig,
};
