pub mod lane;
mod particle;

pub use particle::{ParticleSliceMut, ParticleState, ParticleStore};
