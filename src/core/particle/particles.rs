use std::ops::Range;

use glam::Vec3;
use tracing::debug;

use crate::error::{SimulationError, SimulationResult};

use super::{aligned_lanes::AlignedLanes, particle_data::ParticleState};

/// Structure-of-arrays particle state: nine index-aligned, lane-aligned float
/// arrays owned by a single store.
///
/// Index `i` names the same particle in every array. The population size is
/// fixed for the lifetime of the store.
pub struct ParticleStore {
    count: usize,
    position: [AlignedLanes; 3],
    velocity: [AlignedLanes; 3],
    initial_velocity: [AlignedLanes; 3],
}

impl ParticleStore {
    pub fn new(count: usize) -> SimulationResult<Self> {
        if count == 0 {
            return Err(SimulationError::Precondition(
                "particle count must be greater than 0".to_string(),
            ));
        }

        let store = Self {
            count,
            position: [
                AlignedLanes::zeroed("position_x", count)?,
                AlignedLanes::zeroed("position_y", count)?,
                AlignedLanes::zeroed("position_z", count)?,
            ],
            velocity: [
                AlignedLanes::zeroed("velocity_x", count)?,
                AlignedLanes::zeroed("velocity_y", count)?,
                AlignedLanes::zeroed("velocity_z", count)?,
            ],
            initial_velocity: [
                AlignedLanes::zeroed("initial_velocity_x", count)?,
                AlignedLanes::zeroed("initial_velocity_y", count)?,
                AlignedLanes::zeroed("initial_velocity_z", count)?,
            ],
        };
        debug!(count, "allocated particle store");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn position_x(&self) -> &[f32] {
        self.position[0].as_slice()
    }

    pub fn position_y(&self) -> &[f32] {
        self.position[1].as_slice()
    }

    pub fn position_z(&self) -> &[f32] {
        self.position[2].as_slice()
    }

    pub fn velocity_x(&self) -> &[f32] {
        self.velocity[0].as_slice()
    }

    pub fn velocity_y(&self) -> &[f32] {
        self.velocity[1].as_slice()
    }

    pub fn velocity_z(&self) -> &[f32] {
        self.velocity[2].as_slice()
    }

    pub fn initial_velocity_x(&self) -> &[f32] {
        self.initial_velocity[0].as_slice()
    }

    pub fn initial_velocity_y(&self) -> &[f32] {
        self.initial_velocity[1].as_slice()
    }

    pub fn initial_velocity_z(&self) -> &[f32] {
        self.initial_velocity[2].as_slice()
    }

    pub fn particle(&self, index: usize) -> ParticleState {
        let gather = |arrays: &[AlignedLanes; 3]| {
            Vec3::new(
                arrays[0].as_slice()[index],
                arrays[1].as_slice()[index],
                arrays[2].as_slice()[index],
            )
        };
        ParticleState {
            position: gather(&self.position),
            velocity: gather(&self.velocity),
            initial_velocity: gather(&self.initial_velocity),
        }
    }

    pub fn set_particle(&mut self, index: usize, state: ParticleState) {
        let scatter = |arrays: &mut [AlignedLanes; 3], value: Vec3| {
            for (axis, component) in value.to_array().into_iter().enumerate() {
                arrays[axis].as_mut_slice()[index] = component;
            }
        };
        scatter(&mut self.position, state.position);
        scatter(&mut self.velocity, state.velocity);
        scatter(&mut self.initial_velocity, state.initial_velocity);
    }

    /// Borrows every attribute array over `range` at once.
    pub fn slice_mut(&mut self, range: Range<usize>) -> ParticleSliceMut<'_> {
        assert!(
            range.start <= range.end && range.end <= self.count,
            "particle range {:?} out of bounds for {} particles",
            range,
            self.count
        );
        let [px, py, pz] = &mut self.position;
        let [vx, vy, vz] = &mut self.velocity;
        let [ix, iy, iz] = &mut self.initial_velocity;
        let r = range.clone();
        ParticleSliceMut {
            offset: range.start,
            position: [
                &mut px.as_mut_slice()[r.clone()],
                &mut py.as_mut_slice()[r.clone()],
                &mut pz.as_mut_slice()[r.clone()],
            ],
            velocity: [
                &mut vx.as_mut_slice()[r.clone()],
                &mut vy.as_mut_slice()[r.clone()],
                &mut vz.as_mut_slice()[r.clone()],
            ],
            initial_velocity: [
                &mut ix.as_mut_slice()[r.clone()],
                &mut iy.as_mut_slice()[r.clone()],
                &mut iz.as_mut_slice()[r],
            ],
        }
    }

    pub fn all_mut(&mut self) -> ParticleSliceMut<'_> {
        self.slice_mut(0..self.count)
    }

    /// Splits the population into consecutive disjoint chunks of `chunk_len`
    /// particles; the last chunk is shorter if `chunk_len` does not divide the count.
    pub fn split_chunks_mut(&mut self, chunk_len: usize) -> Vec<ParticleSliceMut<'_>> {
        assert!(chunk_len > 0, "chunk length must be greater than 0");
        let mut chunks = Vec::with_capacity(self.count.div_ceil(chunk_len));
        let mut rest = self.all_mut();
        while rest.len() > chunk_len {
            let (head, tail) = rest.split_at_mut(chunk_len);
            chunks.push(head);
            rest = tail;
        }
        chunks.push(rest);
        chunks
    }

    /// Frees all nine arrays.
    pub fn release(self) {
        debug!(count = self.count, "released particle store");
    }
}

/// Mutable view of one contiguous index range across all nine arrays.
///
/// Indices passed to its methods are local to the view; `offset()` is the
/// global index of local index 0.
pub struct ParticleSliceMut<'a> {
    offset: usize,
    pub(crate) position: [&'a mut [f32]; 3],
    pub(crate) velocity: [&'a mut [f32]; 3],
    pub(crate) initial_velocity: [&'a mut [f32]; 3],
}

impl<'a> ParticleSliceMut<'a> {
    pub fn len(&self) -> usize {
        self.position[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len()
    }

    pub fn particle(&self, local: usize) -> ParticleState {
        let gather = |arrays: &[&mut [f32]; 3]| {
            Vec3::new(arrays[0][local], arrays[1][local], arrays[2][local])
        };
        ParticleState {
            position: gather(&self.position),
            velocity: gather(&self.velocity),
            initial_velocity: gather(&self.initial_velocity),
        }
    }

    pub fn split_at_mut(self, mid: usize) -> (ParticleSliceMut<'a>, ParticleSliceMut<'a>) {
        fn split<'s>(
            arrays: [&'s mut [f32]; 3],
            mid: usize,
        ) -> ([&'s mut [f32]; 3], [&'s mut [f32]; 3]) {
            let [x, y, z] = arrays;
            let (xl, xr) = x.split_at_mut(mid);
            let (yl, yr) = y.split_at_mut(mid);
            let (zl, zr) = z.split_at_mut(mid);
            ([xl, yl, zl], [xr, yr, zr])
        }

        let offset = self.offset;
        let (position_l, position_r) = split(self.position, mid);
        let (velocity_l, velocity_r) = split(self.velocity, mid);
        let (initial_l, initial_r) = split(self.initial_velocity, mid);
        (
            ParticleSliceMut {
                offset,
                position: position_l,
                velocity: velocity_l,
                initial_velocity: initial_l,
            },
            ParticleSliceMut {
                offset: offset + mid,
                position: position_r,
                velocity: velocity_r,
                initial_velocity: initial_r,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lane::LANE_ALIGN;

    #[test]
    fn test_store_zero_initialized_and_aligned() {
        let store = ParticleStore::new(64).unwrap();
        assert_eq!(store.len(), 64);
        for array in [
            store.position_x(),
            store.position_y(),
            store.position_z(),
            store.velocity_x(),
            store.velocity_y(),
            store.velocity_z(),
            store.initial_velocity_x(),
            store.initial_velocity_y(),
            store.initial_velocity_z(),
        ] {
            assert_eq!(array.len(), 64);
            assert_eq!(array.as_ptr() as usize % LANE_ALIGN, 0);
            assert!(array.iter().all(|v| *v == 0.0));
        }
    }

    #[test]
    fn test_store_rejects_empty_population() {
        assert!(matches!(
            ParticleStore::new(0),
            Err(SimulationError::Precondition(_))
        ));
    }

    #[test]
    fn test_set_and_get_particle() {
        let mut store = ParticleStore::new(16).unwrap();
        let state = ParticleState::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0))
            .with_initial_velocity(Vec3::new(7.0, 8.0, 9.0));
        store.set_particle(11, state);

        assert_eq!(store.particle(11), state);
        assert_eq!(store.position_y()[11], 2.0);
        assert_eq!(store.initial_velocity_z()[11], 9.0);
        assert_eq!(store.particle(10), ParticleState::default());
    }

    #[test]
    fn test_slice_mut_uses_local_indices() {
        let mut store = ParticleStore::new(32).unwrap();
        store.set_particle(
            20,
            ParticleState::new(Vec3::new(0.0, -5.0, 0.0), Vec3::ZERO),
        );

        let slice = store.slice_mut(16..24);
        assert_eq!(slice.len(), 8);
        assert_eq!(slice.offset(), 16);
        assert_eq!(slice.particle(4).position.y, -5.0);
    }

    #[test]
    fn test_split_chunks_are_disjoint_and_cover_population() {
        let mut store = ParticleStore::new(40).unwrap();
        let chunks = store.split_chunks_mut(16);
        let ranges: Vec<_> = chunks.iter().map(|c| c.range()).collect();
        assert_eq!(ranges, vec![0..16, 16..32, 32..40]);
    }

    #[test]
    fn test_chunk_writes_land_in_store() {
        let mut store = ParticleStore::new(16).unwrap();
        {
            let mut chunks = store.split_chunks_mut(8);
            chunks[1].position[1][0] = 42.0;
        }
        assert_eq!(store.position_y()[8], 42.0);
    }
}
