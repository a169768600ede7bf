#[cfg(test)]
use glam::Vec3;

#[cfg(test)]
pub(crate) fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

#[cfg(test)]
pub(crate) fn approx_eq_vec3(a: Vec3, b: Vec3, epsilon: f32) -> bool {
    (a - b).abs().max_element() < epsilon
}
