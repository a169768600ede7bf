use crate::core::{
    lane::{self, LANES},
    ParticleSliceMut,
};

/// Earth-like free fall acceleration along Y.
pub const DEFAULT_GRAVITY: f32 = -9.82;

/// Advances every particle in `particles` by one semi-implicit Euler step:
/// gravity updates `velocity.y` first, then positions move by the updated
/// velocity.
pub fn integrate(particles: &mut ParticleSliceMut<'_>, dt: f32, gravity: f32) {
    let [px, py, pz] = &mut particles.position;
    let [vx, vy, vz] = &mut particles.velocity;
    let len = px.len();
    let body = lane::lane_body(len);

    let dt_lane = lane::splat(dt);
    let gravity_lane = lane::splat(gravity);

    let mut base = 0;
    while base < body {
        let vy_lane = lane::mul_add(&dt_lane, &gravity_lane, &lane::load(vy, base));
        lane::store(vy, base, &vy_lane);

        let x = lane::mul_add(&dt_lane, &lane::load(vx, base), &lane::load(px, base));
        let y = lane::mul_add(&dt_lane, &vy_lane, &lane::load(py, base));
        let z = lane::mul_add(&dt_lane, &lane::load(vz, base), &lane::load(pz, base));
        lane::store(px, base, &x);
        lane::store(py, base, &y);
        lane::store(pz, base, &z);

        base += LANES;
    }

    for i in body..len {
        vy[i] = dt * gravity + vy[i];
        px[i] = dt * vx[i] + px[i];
        py[i] = dt * vy[i] + py[i];
        pz[i] = dt * vz[i] + pz[i];
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{
        core::{ParticleState, ParticleStore},
        utils::{approx_eq, approx_eq_vec3},
    };

    #[test]
    fn test_integrate_semi_implicit_step() {
        let mut store = ParticleStore::new(8).unwrap();
        let velocities = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 50.0, 0.0),
            Vec3::new(0.0, 0.0, -3.0),
            Vec3::new(2.0, -1.0, 4.0),
        ];
        for (i, velocity) in velocities.iter().enumerate() {
            store.set_particle(i, ParticleState::new(Vec3::new(1.0, 2.0, 3.0), *velocity));
        }

        let dt = 0.5;
        integrate(&mut store.all_mut(), dt, DEFAULT_GRAVITY);

        for (i, velocity) in velocities.iter().enumerate() {
            let particle = store.particle(i);
            let expected_vy = velocity.y + DEFAULT_GRAVITY * dt;
            let expected_velocity = Vec3::new(velocity.x, expected_vy, velocity.z);
            let expected_position = Vec3::new(1.0, 2.0, 3.0) + expected_velocity * dt;
            assert!(
                approx_eq_vec3(particle.velocity, expected_velocity, 1e-5),
                "velocity mismatch at {}: {:?} != {:?}",
                i,
                particle.velocity,
                expected_velocity
            );
            assert!(
                approx_eq_vec3(particle.position, expected_position, 1e-5),
                "position mismatch at {}: {:?} != {:?}",
                i,
                particle.position,
                expected_position
            );
            assert_eq!(particle.initial_velocity, *velocity);
        }
    }

    #[test]
    fn test_integrate_covers_scalar_tail() {
        let mut store = ParticleStore::new(13).unwrap();
        for i in 0..13 {
            store.set_particle(i, ParticleState::new(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0)));
        }

        integrate(&mut store.all_mut(), 1.0, -10.0);

        for i in 0..13 {
            assert!(approx_eq(store.velocity_y()[i], 0.0, 1e-6));
            assert!(approx_eq(store.position_y()[i], 0.0, 1e-6));
        }
    }

    #[test]
    fn test_integrate_only_touches_given_range() {
        let mut store = ParticleStore::new(24).unwrap();
        for i in 0..24 {
            store.set_particle(i, ParticleState::new(Vec3::ZERO, Vec3::ONE));
        }

        integrate(&mut store.slice_mut(8..16), 1.0, 0.0);

        for i in 0..24 {
            let expected = if (8..16).contains(&i) { 1.0 } else { 0.0 };
            assert_eq!(store.position_x()[i], expected, "index {}", i);
        }
    }

    #[test]
    fn test_integrate_zero_step_is_identity() {
        let mut store = ParticleStore::new(9).unwrap();
        store.set_particle(
            3,
            ParticleState::new(Vec3::new(1.0, -2.0, 3.0), Vec3::new(-4.0, 5.0, 6.0)),
        );
        let before = store.particle(3);

        integrate(&mut store.all_mut(), 0.0, DEFAULT_GRAVITY);

        assert_eq!(store.particle(3), before);
    }
}
