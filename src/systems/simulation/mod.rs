mod simulation_config;
mod simulation_system;
mod simulation_tasks;
pub mod tasks;
mod work_scheduler;

pub use simulation_config::SimulationConfig;
pub use simulation_system::ParticleSystem;
pub use simulation_tasks::FrameTasks;
pub use work_scheduler::{partition, FrameReport, WorkScheduler, DEFAULT_WORKER_COUNT};
