use bytemuck::{Pod, Zeroable};

use crate::{
    core::lane::{LANES, LANE_ALIGN},
    error::{SimulationError, SimulationResult},
};

#[repr(C, align(32))]
#[derive(Copy, Clone, Debug, Default, Pod, Zeroable)]
struct AlignedLane([f32; LANES]);

const _: () = assert!(std::mem::align_of::<AlignedLane>() == LANE_ALIGN);

/// A fixed-length float array whose storage starts on a lane boundary.
///
/// Backed by whole lanes, so the allocation is rounded up to a multiple of
/// `LANES`; only the first `len` floats are ever exposed.
pub(crate) struct AlignedLanes {
    lanes: Vec<AlignedLane>,
    len: usize,
}

impl AlignedLanes {
    pub fn zeroed(name: &'static str, len: usize) -> SimulationResult<Self> {
        let lane_count = len.div_ceil(LANES);
        let mut lanes = Vec::new();
        lanes
            .try_reserve_exact(lane_count)
            .map_err(|_| SimulationError::Allocation {
                buffer: name,
                count: len,
            })?;
        lanes.resize(lane_count, AlignedLane::zeroed());

        Ok(Self { lanes, len })
    }

    pub fn as_slice(&self) -> &[f32] {
        &bytemuck::cast_slice::<AlignedLane, f32>(&self.lanes)[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut bytemuck::cast_slice_mut::<AlignedLane, f32>(&mut self.lanes)[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_lanes_alignment_and_length() {
        for len in [1, 8, 13, 64, 1000] {
            let buffer = AlignedLanes::zeroed("test", len).unwrap();
            let slice = buffer.as_slice();
            assert_eq!(slice.len(), len);
            assert_eq!(slice.as_ptr() as usize % LANE_ALIGN, 0);
            assert!(slice.iter().all(|v| *v == 0.0));
        }
    }

    #[test]
    fn test_aligned_lanes_writes_visible() {
        let mut buffer = AlignedLanes::zeroed("test", 10).unwrap();
        buffer.as_mut_slice()[9] = 4.5;
        assert_eq!(buffer.as_slice()[9], 4.5);
    }

    #[test]
    fn test_aligned_lanes_huge_request_fails() {
        let result = AlignedLanes::zeroed("huge", usize::MAX / 2);
        assert!(matches!(
            result,
            Err(SimulationError::Allocation { buffer: "huge", .. })
        ));
    }
}
