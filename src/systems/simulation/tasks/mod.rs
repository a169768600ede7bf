mod death_check;
mod integrate;
mod spray_velocity;

pub use death_check::{check_and_reset, reset_particle, DEFAULT_DEATH_THRESHOLD};
pub use integrate::{integrate, DEFAULT_GRAVITY};
pub use spray_velocity::SprayVelocityGenerator;
