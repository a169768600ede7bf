use glam::{Mat3, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::core::{lane::LANES, ParticleSliceMut, ParticleStore};

/// Spread is drawn from `(k * 2 - SPREAD_STEPS) * 0.01` degrees, `k < SPREAD_STEPS`,
/// giving -30.00..=29.98 degrees in 0.02 steps.
const SPREAD_STEPS: i32 = 3000;
const SPREAD_SCALE: f32 = 0.01;

const MAGNITUDE_BASE: u32 = 38;
const MAGNITUDE_STEPS: u32 = 30;

/// Jitter is `(k + 1) * 0.001`, `k < JITTER_STEPS`, giving 0.001..=2.5.
const JITTER_STEPS: u32 = 2500;
const JITTER_SCALE: f32 = 0.001;

/// Produces spawn velocities in a spray cone around +Y.
///
/// The random source is injected so respawn behavior can be replayed from a
/// seed. Calls are sequential; one generator is never shared across workers.
pub struct SprayVelocityGenerator<R = StdRng> {
    rng: R,
}

impl SprayVelocityGenerator<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> SprayVelocityGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws one velocity.
    ///
    /// The unit Y vector is tilted about X by the spread angle, scaled by the
    /// speed, then tilted about Z by the same angle.
    pub fn sample(&mut self) -> Vec3 {
        let spread_step = self.rng.random_range(0..SPREAD_STEPS);
        let spread_degrees = (spread_step * 2 - SPREAD_STEPS) as f32 * SPREAD_SCALE;

        let jitter = (self.rng.random_range(0..JITTER_STEPS) + 1) as f32 * JITTER_SCALE;
        let magnitude = self.rng.random_range(0..MAGNITUDE_STEPS) + MAGNITUDE_BASE;

        let spread = spread_degrees.to_radians();
        let aim = Mat3::from_rotation_x(spread) * Vec3::Y;
        Mat3::from_rotation_z(spread) * (aim * (magnitude as f32 + jitter))
    }

    /// Writes one lane of fresh velocities starting at local index `index`
    /// into both `velocity` and `initial_velocity`. The batch is cut short at
    /// the end of `particles`.
    pub fn fill_batch(&mut self, particles: &mut ParticleSliceMut<'_>, index: usize) {
        let end = (index + LANES).min(particles.len());
        for i in index..end {
            let velocity = self.sample().to_array();
            for axis in 0..3 {
                particles.velocity[axis][i] = velocity[axis];
                particles.initial_velocity[axis][i] = velocity[axis];
            }
        }
    }

    /// Puts every particle at the origin with a freshly drawn spawn velocity.
    pub fn populate(&mut self, store: &mut ParticleStore) {
        let mut particles = store.all_mut();
        for axis in particles.position.iter_mut() {
            axis.fill(0.0);
        }
        let mut index = 0;
        while index < particles.len() {
            self.fill_batch(&mut particles, index);
            index += LANES;
        }
    }
}
