use glam::Vec3;

/// One particle's attributes gathered from the SoA store.
///
/// Only used at the edges (setup, inspection); kernels never build these.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ParticleState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub initial_velocity: Vec3,
}

impl ParticleState {
    /// A particle sitting at `position` whose stored spawn velocity matches `velocity`.
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            initial_velocity: velocity,
        }
    }

    pub fn with_initial_velocity(mut self, initial_velocity: Vec3) -> Self {
        self.initial_velocity = initial_velocity;
        self
    }
}
