mod approx_eq;
mod frame_stats;

#[cfg(test)]
pub(crate) use approx_eq::{approx_eq, approx_eq_vec3};
pub use frame_stats::FrameStats;
