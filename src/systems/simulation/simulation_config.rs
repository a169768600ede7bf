use std::{fs, path::Path};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    core::lane::LANES,
    error::{SimulationError, SimulationResult},
};

use super::{
    tasks::{DEFAULT_DEATH_THRESHOLD, DEFAULT_GRAVITY},
    work_scheduler::DEFAULT_WORKER_COUNT,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // Population and partitioning
    pub particle_count: usize,
    pub worker_count: usize,

    // Motion
    pub gravity: f32,
    /// Particles with `position.y` at or below this value respawn
    pub death_threshold: f32,

    /// Where the spray originates in world space. Particle positions are
    /// kept emitter-local, so the render transform stays identity.
    pub emitter_position: Vec3,
    /// Fixed seed for reproducible spawn velocities; `None` seeds from the OS
    pub seed: Option<u64>,

    // Time step limits, applied only to wall-clock driven ticks
    pub max_time_step: f32,
    pub min_time_step: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 8192,
            worker_count: DEFAULT_WORKER_COUNT,

            gravity: DEFAULT_GRAVITY,
            death_threshold: DEFAULT_DEATH_THRESHOLD,

            emitter_position: Vec3::ZERO,
            seed: None,

            max_time_step: 1.0 / 20.0,
            min_time_step: 1.0 / 1000.0,
        }
    }
}

impl SimulationConfig {
    /// Small deterministic population, handy for debugging a single frame
    pub fn small_burst() -> Self {
        Self {
            particle_count: 64,
            worker_count: 2,
            seed: Some(0),
            ..Self::default()
        }
    }

    /// Million-particle population spread over more workers
    pub fn large_scale() -> Self {
        Self {
            particle_count: 1 << 20,
            worker_count: 8,
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> SimulationResult<Self> {
        toml::from_str(content).map_err(|e| SimulationError::Config(e.to_string()))
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> SimulationResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| SimulationError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> SimulationResult<String> {
        toml::to_string_pretty(self).map_err(|e| SimulationError::Config(e.to_string()))
    }

    /// Clamp time step within reasonable range
    pub fn clamp_time_step(&self, dt: f32) -> f32 {
        dt.clamp(self.min_time_step, self.max_time_step)
    }

    /// Particles handled by each worker per frame
    pub fn workload(&self) -> usize {
        self.particle_count / self.worker_count.max(1)
    }

    /// Validate configuration parameter reasonableness
    pub fn validate(&self) -> SimulationResult<()> {
        if self.particle_count == 0 {
            return Err(SimulationError::Precondition(
                "particle_count must be greater than 0".to_string(),
            ));
        }

        if self.worker_count == 0 {
            return Err(SimulationError::Precondition(
                "worker_count must be greater than 0".to_string(),
            ));
        }

        let granularity = LANES * self.worker_count;
        if self.particle_count % granularity != 0 {
            return Err(SimulationError::Precondition(format!(
                "particle_count ({}) must be a multiple of lane width x worker count ({} x {} = {})",
                self.particle_count, LANES, self.worker_count, granularity
            )));
        }

        if !self.gravity.is_finite() || !self.death_threshold.is_finite() {
            return Err(SimulationError::Config(
                "gravity and death_threshold must be finite".to_string(),
            ));
        }

        if self.min_time_step <= 0.0 || self.max_time_step <= 0.0 {
            return Err(SimulationError::Config(
                "Time step limits must be greater than 0".to_string(),
            ));
        }

        if self.min_time_step >= self.max_time_step {
            return Err(SimulationError::Config(
                "min_time_step must be less than max_time_step".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration information
    pub fn print_info(&self) {
        info!(
            particle_count = self.particle_count,
            worker_count = self.worker_count,
            workload = self.workload(),
            gravity = self.gravity,
            death_threshold = self.death_threshold,
            emitter = ?self.emitter_position,
            seed = ?self.seed,
            "simulation configuration"
        );
        info!(
            "time step limits: {:.6}s - {:.6}s",
            self.min_time_step, self.max_time_step
        );
    }
}
