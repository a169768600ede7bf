#[cfg(test)]
use std::time::{Duration, Instant};

use crate::core::ParticleSliceMut;

use super::{
    simulation_config::SimulationConfig,
    tasks::{check_and_reset, integrate},
};

#[derive(Debug, Clone)]
#[cfg(test)]
pub struct ChunkStepTiming {
    pub death_check_time: Duration,
    pub integrate_time: Duration,
    pub total_time: Duration,
}

/// Per-frame constants plus the ordered pipeline every chunk runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTasks {
    pub dt: f32,
    pub gravity: f32,
    pub death_threshold: f32,
}

impl FrameTasks {
    pub fn new(dt: f32, gravity: f32, death_threshold: f32) -> Self {
        Self {
            dt,
            gravity,
            death_threshold,
        }
    }

    /// * `config` - source of gravity and the death plane
    /// * `dt` - step for this frame, used as given
    pub fn from_config(config: &SimulationConfig, dt: f32) -> Self {
        Self::new(dt, config.gravity, config.death_threshold)
    }

    /// Runs the chunk pipeline. Returns the number of respawned particles.
    ///
    /// Death detection must finish before integration starts on the same
    /// indices, so both run here back to back on the calling worker.
    pub fn execute(&self, chunk: &mut ParticleSliceMut<'_>) -> usize {
        // 1. Respawn particles that fell through the death plane
        let respawned = check_and_reset(chunk, self.death_threshold);

        // 2. Gravity and position step
        integrate(chunk, self.dt, self.gravity);

        respawned
    }

    #[cfg(test)]
    pub fn execute_with_timing(&self, chunk: &mut ParticleSliceMut<'_>) -> (usize, ChunkStepTiming) {
        let total_start = Instant::now();

        let death_start = Instant::now();
        let respawned = check_and_reset(chunk, self.death_threshold);
        let death_check_time = death_start.elapsed();

        let integrate_start = Instant::now();
        integrate(chunk, self.dt, self.gravity);
        let integrate_time = integrate_start.elapsed();

        (
            respawned,
            ChunkStepTiming {
                death_check_time,
                integrate_time,
                total_time: total_start.elapsed(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::core::{ParticleState, ParticleStore};

    #[test]
    fn test_dead_particle_respawns_before_integration() {
        let mut store = ParticleStore::new(8).unwrap();
        let spawn_velocity = Vec3::new(0.0, 50.0, 0.0);
        store.set_particle(
            0,
            ParticleState::new(Vec3::new(4.0, -250.0, 1.0), Vec3::new(0.0, -90.0, 0.0))
                .with_initial_velocity(spawn_velocity),
        );

        let tasks = FrameTasks::new(1.0, -10.0, -200.0);
        let respawned = tasks.execute(&mut store.all_mut());

        // reset to origin with the spawn velocity, then one full step
        assert_eq!(respawned, 1);
        let particle = store.particle(0);
        assert_eq!(particle.velocity, Vec3::new(0.0, 40.0, 0.0));
        assert_eq!(particle.position, Vec3::new(0.0, 40.0, 0.0));
    }

    #[test]
    fn test_from_config_copies_constants() {
        let config = SimulationConfig::default();
        let tasks = FrameTasks::from_config(&config, 0.25);
        assert_eq!(tasks.dt, 0.25);
        assert_eq!(tasks.gravity, config.gravity);
        assert_eq!(tasks.death_threshold, config.death_threshold);
    }

    #[test]
    fn test_chunk_timing_reported() {
        let mut store = ParticleStore::new(4096).unwrap();
        let tasks = FrameTasks::new(1.0 / 60.0, -9.82, -200.0);

        let (respawned, timing) = tasks.execute_with_timing(&mut store.all_mut());

        assert_eq!(respawned, 0);
        assert!(timing.total_time >= timing.death_check_time);
        assert!(timing.total_time >= timing.integrate_time);
        println!("chunk step timing for 4096 particles: {:?}", timing);
    }
}
