use crate::core::{
    lane::{self, LANES},
    ParticleSliceMut,
};

/// Particles at or below this height are considered dead.
pub const DEFAULT_DEATH_THRESHOLD: f32 = -200.0;

/// Respawns every particle in `particles` whose `position.y` is at or below
/// `death_threshold`. Returns the number of particles reset.
pub fn check_and_reset(particles: &mut ParticleSliceMut<'_>, death_threshold: f32) -> usize {
    let len = particles.len();
    let body = lane::lane_body(len);
    let mut respawned = 0;

    let mut base = 0;
    while base < body {
        let mut mask = lane::le_mask(&lane::load(&particles.position[1], base), death_threshold);
        while mask != 0 {
            let k = mask.trailing_zeros() as usize;
            reset_particle(particles, base + k);
            respawned += 1;
            mask &= mask - 1;
        }
        base += LANES;
    }

    for i in body..len {
        if particles.position[1][i] <= death_threshold {
            reset_particle(particles, i);
            respawned += 1;
        }
    }

    respawned
}

/// Moves a particle back to the origin and restores its spawn velocity.
pub fn reset_particle(particles: &mut ParticleSliceMut<'_>, local: usize) {
    debug_assert!(local < particles.len());
    for axis in 0..3 {
        particles.position[axis][local] = 0.0;
        particles.velocity[axis][local] = particles.initial_velocity[axis][local];
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::core::{ParticleState, ParticleStore};

    fn dead_particle(y: f32) -> ParticleState {
        ParticleState::new(Vec3::new(3.0, y, -7.0), Vec3::new(1.0, -80.0, 2.0))
            .with_initial_velocity(Vec3::new(-5.0, 45.0, 12.5))
    }

    #[test]
    fn test_dead_particles_are_reset() {
        let mut store = ParticleStore::new(16).unwrap();
        store.set_particle(2, dead_particle(-250.0));
        store.set_particle(9, dead_particle(DEFAULT_DEATH_THRESHOLD));
        store.set_particle(10, dead_particle(-199.99));

        let respawned = check_and_reset(&mut store.all_mut(), DEFAULT_DEATH_THRESHOLD);

        assert_eq!(respawned, 2);
        for index in [2, 9] {
            let particle = store.particle(index);
            assert_eq!(particle.position, Vec3::ZERO);
            assert_eq!(particle.velocity, Vec3::new(-5.0, 45.0, 12.5));
            assert_eq!(particle.initial_velocity, Vec3::new(-5.0, 45.0, 12.5));
        }
        assert_eq!(store.particle(10), dead_particle(-199.99));
    }

    #[test]
    fn test_dead_particle_in_tail_is_reset() {
        let mut store = ParticleStore::new(11).unwrap();
        store.set_particle(10, dead_particle(-300.0));

        let respawned = check_and_reset(&mut store.all_mut(), DEFAULT_DEATH_THRESHOLD);

        assert_eq!(respawned, 1);
        assert_eq!(store.particle(10).position, Vec3::ZERO);
        assert_eq!(store.particle(10).velocity, Vec3::new(-5.0, 45.0, 12.5));
    }

    #[test]
    fn test_every_lane_slot_detected() {
        let mut store = ParticleStore::new(8).unwrap();
        for i in 0..8 {
            store.set_particle(i, dead_particle(-1000.0));
        }

        let respawned = check_and_reset(&mut store.all_mut(), DEFAULT_DEATH_THRESHOLD);

        assert_eq!(respawned, 8);
        assert!(store.position_y().iter().all(|y| *y == 0.0));
    }

    #[test]
    fn test_check_respects_slice_bounds() {
        let mut store = ParticleStore::new(16).unwrap();
        store.set_particle(3, dead_particle(-300.0));
        store.set_particle(12, dead_particle(-300.0));

        let respawned = check_and_reset(&mut store.slice_mut(8..16), DEFAULT_DEATH_THRESHOLD);

        assert_eq!(respawned, 1);
        assert_eq!(store.particle(3).position.y, -300.0);
        assert_eq!(store.particle(12).position, Vec3::ZERO);
    }
}
