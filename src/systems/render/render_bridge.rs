use glam::{Mat4, Vec3};

use crate::error::SimulationResult;

/// Read-only view of a settled frame, handed to the renderer.
///
/// Positions are three parallel arrays, one float per particle each, ready
/// to be uploaded as separate vertex streams.
#[derive(Clone, Copy, Debug)]
pub struct RenderSnapshot<'a> {
    pub position_x: &'a [f32],
    pub position_y: &'a [f32],
    pub position_z: &'a [f32],
    pub world_transform: Mat4,
}

impl<'a> RenderSnapshot<'a> {
    pub fn new(position_x: &'a [f32], position_y: &'a [f32], position_z: &'a [f32]) -> Self {
        debug_assert!(position_x.len() == position_y.len() && position_y.len() == position_z.len());
        Self {
            position_x,
            position_y,
            position_z,
            world_transform: Mat4::IDENTITY,
        }
    }

    /// Number of point primitives to draw.
    pub fn particle_count(&self) -> usize {
        self.position_x.len()
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::new(
            self.position_x[index],
            self.position_y[index],
            self.position_z[index],
        )
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.particle_count()).map(|index| self.position(index))
    }
}

/// Consumer of settled particle positions: uploads and draws them.
///
/// Implementors report device failures through `SimulationError::Device`.
pub trait RenderBridge {
    fn submit(&mut self, snapshot: &RenderSnapshot<'_>) -> SimulationResult<()>;
}

/// Bridge that only tracks the bounding box of each submitted frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BoundsProbe {
    pub min: Vec3,
    pub max: Vec3,
    pub frames: u64,
}

impl RenderBridge for BoundsProbe {
    fn submit(&mut self, snapshot: &RenderSnapshot<'_>) -> SimulationResult<()> {
        let (min, max) = snapshot.positions().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), position| (min.min(position), max.max(position)),
        );
        self.min = min;
        self.max = max;
        self.frames += 1;
        Ok(())
    }
}
