//! Geometric helpers used by the force accumulation: distances between
//! particles, wrapping of positions inside the simulation cell and periodic
//! image translations.

use crate::Vector3D;

/// Euclidean distance between the points `a` and `b`.
///
/// On `x86_64` this uses the SSE2 implementation in [`distance_sse2`], which
/// performs the same operations in the same order as [`distance_scalar`].
#[inline]
pub fn distance(a: Vector3D, b: Vector3D) -> f64 {
    #[cfg(target_arch = "x86_64")]
    {
        return distance_sse2(a, b);
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        return distance_scalar(a, b);
    }
}

/// Portable implementation of [`distance`]
#[inline]
pub fn distance_scalar(a: Vector3D, b: Vector3D) -> f64 {
    (a - b).norm()
}

/// SSE2 implementation of [`distance`]. `x` and `y` are handled together in
/// one register, `z` in a second one.
#[cfg(target_arch = "x86_64")]
#[inline]
pub fn distance_sse2(a: Vector3D, b: Vector3D) -> f64 {
    use std::arch::x86_64::{_mm_set_pd, _mm_set_sd, _mm_sub_pd, _mm_sub_sd};
    use std::arch::x86_64::{_mm_mul_pd, _mm_mul_sd, _mm_add_sd, _mm_unpackhi_pd};
    use std::arch::x86_64::{_mm_sqrt_sd, _mm_cvtsd_f64};

    // SAFETY: SSE2 is part of the baseline x86_64 instruction set, and all
    // the intrinsics below only operate on values (no memory access)
    unsafe {
        let dxy = _mm_sub_pd(_mm_set_pd(a[1], a[0]), _mm_set_pd(b[1], b[0]));
        let dz = _mm_sub_sd(_mm_set_sd(a[2]), _mm_set_sd(b[2]));

        let dxy2 = _mm_mul_pd(dxy, dxy);
        let dz2 = _mm_mul_sd(dz, dz);

        // low lane contains dx^2 + dy^2, then dx^2 + dy^2 + dz^2
        let sum = _mm_add_sd(dxy2, _mm_unpackhi_pd(dxy2, dxy2));
        let sum = _mm_add_sd(sum, dz2);

        _mm_cvtsd_f64(_mm_sqrt_sd(sum, sum))
    }
}

/// Wrap `position` inside the cell `[0, extent[0]) x [0, extent[1]) x [0,
/// extent[2])`, using `x - L floor(x / L)` on each axis. All components of
/// `extent` must be positive.
///
/// Non-finite positions produce non-finite results, it is up to the caller to
/// check for them.
pub fn wrap_into_cell(position: Vector3D, extent: Vector3D) -> Vector3D {
    let mut wrapped = position;
    for k in 0..3 {
        let length = extent[k];
        let mut value = position[k] - length * f64::floor(position[k] / length);

        // the division can round up to the next integer for values just
        // below a multiple of the length, and the subtraction can round
        // tiny negative values up to exactly `length`
        if value < 0.0 {
            value += length;
        }
        if value >= length {
            value = largest_below(length);
        }

        wrapped[k] = value;
    }
    return wrapped;
}

/// Translations of the 27 periodic images of a cell with the given `extent`,
/// i.e. all combinations of `{-L, 0, L}` along the three axes. The identity
/// translation is at index 13.
pub fn periodic_images(extent: Vector3D) -> [Vector3D; 27] {
    let mut images = [Vector3D::zero(); 27];
    let mut index = 0;
    for &dx in &[-extent[0], 0.0, extent[0]] {
        for &dy in &[-extent[1], 0.0, extent[1]] {
            for &dz in &[-extent[2], 0.0, extent[2]] {
                images[index] = Vector3D::new(dx, dy, dz);
                index += 1;
            }
        }
    }
    return images;
}

/// Largest floating point value strictly smaller than the positive `value`
fn largest_below(value: f64) -> f64 {
    debug_assert!(value > 0.0 && value.is_finite());
    f64::from_bits(value.to_bits() - 1)
}
