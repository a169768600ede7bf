use std::time::Instant;

use glam::Vec3;
use rand::Rng;
use tracing::{debug, info};

use crate::{
    core::ParticleStore,
    error::SimulationResult,
    systems::render::{RenderBridge, RenderSnapshot},
};

use super::{
    simulation_config::SimulationConfig,
    simulation_tasks::FrameTasks,
    tasks::SprayVelocityGenerator,
    work_scheduler::{FrameReport, WorkScheduler},
};

/// A fixed population of spray particles advanced once per frame on a worker pool.
pub struct ParticleSystem {
    config: SimulationConfig,
    store: ParticleStore,
    scheduler: WorkScheduler,
    frame: u64,
    last_update: Option<Instant>,
}

impl ParticleSystem {
    /// Validates `config`, allocates the store, gives every particle a spawn
    /// velocity and starts the worker pool.
    ///
    /// Spawn velocities come from `config.seed` when set, otherwise from an
    /// OS-seeded generator.
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        match config.seed {
            Some(seed) => Self::with_generator(config, &mut SprayVelocityGenerator::from_seed(seed)),
            None => Self::with_generator(config, &mut SprayVelocityGenerator::from_os_rng()),
        }
    }

    pub fn with_generator<R: Rng>(
        config: SimulationConfig,
        generator: &mut SprayVelocityGenerator<R>,
    ) -> SimulationResult<Self> {
        config.validate()?;

        let mut store = ParticleStore::new(config.particle_count)?;
        generator.populate(&mut store);

        let scheduler = WorkScheduler::new(config.worker_count)?;

        info!(
            particle_count = config.particle_count,
            worker_count = config.worker_count,
            emitter = ?config.emitter_position,
            seed = ?config.seed,
            "particle system initialized"
        );

        Ok(Self {
            config,
            store,
            scheduler,
            frame: 0,
            last_update: None,
        })
    }

    /// Advances every particle by `dt` seconds. Returns once the whole frame
    /// has been computed, so the store is settled when this returns.
    pub fn update(&mut self, dt: f32) -> FrameReport {
        debug_assert!(dt.is_finite() && dt >= 0.0, "invalid time step {}", dt);

        let tasks = FrameTasks::from_config(&self.config, dt);
        let report = self.scheduler.run_frame(&mut self.store, &tasks);
        self.frame += 1;
        report
    }

    /// Advances by the wall-clock time since the previous tick, clamped to
    /// the configured limits. The first tick uses `max_time_step`.
    pub fn tick(&mut self) -> FrameReport {
        let now = Instant::now();
        let dt = self.last_update.map_or(self.config.max_time_step, |last| {
            self.config
                .clamp_time_step(now.duration_since(last).as_secs_f32())
        });
        self.last_update = Some(now);
        self.update(dt)
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot::new(
            self.store.position_x(),
            self.store.position_y(),
            self.store.position_z(),
        )
    }

    pub fn render(&self, bridge: &mut impl RenderBridge) -> SimulationResult<()> {
        bridge.submit(&self.snapshot())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    pub fn emitter_position(&self) -> Vec3 {
        self.config.emitter_position
    }

    /// Number of completed frames.
    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ParticleStore {
        &mut self.store
    }

    /// Stops the worker pool, then frees the particle arrays.
    pub fn release(self) {
        self.scheduler.shutdown();
        self.store.release();
        debug!(frames = self.frame, "particle system released");
    }
}
