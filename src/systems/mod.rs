pub mod render;
pub mod simulation;

pub use render::{BoundsProbe, RenderBridge, RenderSnapshot};
pub use simulation::{FrameReport, ParticleSystem, SimulationConfig};
