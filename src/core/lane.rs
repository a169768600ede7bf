//! Fixed-width lane helpers shared by the particle kernels.
//!
//! A lane is `LANES` consecutive floats of one attribute array. Kernels load a
//! lane into a `[f32; LANES]` value, operate on it element-wise and store it
//! back, which the compiler lowers to 256-bit vector code on targets that
//! have it. Whatever is left over after the last whole lane goes through a
//! scalar path in each kernel.

/// Number of floats processed per vector operation.
pub const LANES: usize = 8;

/// Byte alignment of every lane in particle storage.
pub const LANE_ALIGN: usize = 32;

pub type Lane = [f32; LANES];

#[inline(always)]
pub fn load(values: &[f32], base: usize) -> Lane {
    let mut lane = [0.0; LANES];
    lane.copy_from_slice(&values[base..base + LANES]);
    lane
}

#[inline(always)]
pub fn store(values: &mut [f32], base: usize, lane: &Lane) {
    values[base..base + LANES].copy_from_slice(lane);
}

#[inline(always)]
pub fn splat(value: f32) -> Lane {
    [value; LANES]
}

/// `a * b + c` element-wise.
#[inline(always)]
pub fn mul_add(a: &Lane, b: &Lane, c: &Lane) -> Lane {
    let mut out = [0.0; LANES];
    for k in 0..LANES {
        out[k] = a[k] * b[k] + c[k];
    }
    out
}

/// Bit `k` is set when `lane[k] <= threshold`.
#[inline(always)]
pub fn le_mask(lane: &Lane, threshold: f32) -> u32 {
    let mut mask = 0;
    for (k, value) in lane.iter().enumerate() {
        if *value <= threshold {
            mask |= 1 << k;
        }
    }
    mask
}

/// Number of whole lanes in `len` elements, expressed as the element count they cover.
#[inline]
pub fn lane_body(len: usize) -> usize {
    len - len % LANES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_le_mask_marks_matching_elements() {
        let lane = [0.0, -200.0, -199.9, -300.0, 5.0, -200.1, 1.0, -1000.0];
        let mask = le_mask(&lane, -200.0);
        assert_eq!(mask, 0b1010_1010);
    }

    #[test]
    fn test_load_store_offsets() {
        let mut values: Vec<f32> = (0..20).map(|i| i as f32).collect();
        let lane = load(&values, 8);
        assert_eq!(lane[0], 8.0);
        assert_eq!(lane[7], 15.0);

        store(&mut values, 0, &splat(-1.0));
        assert!(values[..8].iter().all(|v| *v == -1.0));
        assert_eq!(values[8], 8.0);
    }

    #[test]
    fn test_lane_body() {
        assert_eq!(lane_body(16), 16);
        assert_eq!(lane_body(21), 16);
        assert_eq!(lane_body(7), 0);
    }
}
