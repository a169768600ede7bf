use thiserror::Error;

/// Errors raised while setting up or driving a particle system.
///
/// None of these are retried internally. A failed `ParticleSystem::new`
/// leaves nothing behind to clean up.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// An aligned particle buffer could not be allocated
    #[error("failed to allocate aligned buffer `{buffer}` for {count} particles")]
    Allocation { buffer: &'static str, count: usize },
    /// Particle or worker counts break the partitioning rules
    #[error("precondition violated: {0}")]
    Precondition(String),
    /// Reserved for render boundary implementations
    #[error("render device error: {0}")]
    Device(String),
    /// Configuration could not be read or parsed
    #[error("config error: {0}")]
    Config(String),
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
