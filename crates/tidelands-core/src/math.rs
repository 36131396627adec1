//! Scalar and vector helpers shared by every evaluation stage.

use glam::Vec3;

/// Cubic Hermite 0 to 1 transition between `edge0` and `edge1`.
///
/// Clamped outside the edge pair; zero derivative at both ends. Returns 0 at
/// `x == edge0` and 1 at `x == edge1`. A degenerate edge pair
/// (`edge1 <= edge0`) collapses to a step at `edge0`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear blend `a * (1 - t) + b * t`.
///
/// The two-product form returns `a` and `b` exactly at t = 0 and t = 1, so a
/// saturated band weight overrides lower bands without rounding residue.
#[inline]
pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

/// Map a displaced height into [0, 1] over the vertical range
/// `[-height_range, +height_range]`. Deliberately not clamped: extreme
/// displacement may land outside the unit interval.
#[inline]
pub fn normalized_height(y: f32, height_range: f32) -> f32 {
    (y + height_range) / (2.0 * height_range)
}

/// Guarded normalize: zero-length or non-finite input falls back to the
/// up vector instead of propagating NaN into downstream math.
#[inline]
pub fn normalize_or_up(v: Vec3) -> Vec3 {
    match v.try_normalize() {
        Some(n) if n.is_finite() => n,
        _ => Vec3::Y,
    }
}
