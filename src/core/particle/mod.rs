mod aligned_lanes;
mod particle_data;
mod particles;

pub use particle_data::ParticleState;
pub use particles::{ParticleSliceMut, ParticleStore};
