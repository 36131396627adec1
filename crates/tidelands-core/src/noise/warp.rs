//! Domain warping: perturb the sample coordinate with vector noise before
//! fractal accumulation, breaking up axis-aligned regularity in the terrain
//! silhouette.

use glam::Vec3;

use crate::noise::kernel::NoiseSource;

/// `p + vector_noise(p * frequency) * strength`.
///
/// Applied once, before the octave loop. The centre sample and each of its
/// finite-difference neighbours are warped independently at their own
/// positions; there is no shared warp vector. Zero strength is the identity.
#[inline]
pub fn warp<N: NoiseSource>(kernel: &N, p: Vec3, strength: f32, frequency: f32) -> Vec3 {
    p + kernel.vector(p * frequency) * strength
}
