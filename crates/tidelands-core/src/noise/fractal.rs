//! Multi-octave fractal accumulation.
//!
//! The octave rule halves frequency and doubles amplitude each step, the
//! inverse of textbook fBm, so later octaves contribute broad high-amplitude
//! structure rather than diminishing fine detail. The loop counter starts at
//! 1 with an exclusive bound, giving `octave_count - 1` iterations. Both
//! quirks are load-bearing for the rendered look and are kept as-is.

use glam::Vec3;

use crate::noise::kernel::NoiseSource;

/// Sum scalar noise over the octave schedule at a (pre-warped) coordinate.
pub fn accumulate_scalar<N: NoiseSource>(
    kernel: &N,
    p: Vec3,
    base_frequency: f32,
    base_amplitude: f32,
    octave_count: u32,
) -> f32 {
    let mut frequency = base_frequency;
    let mut amplitude = base_amplitude;
    let mut total = 0.0;
    for _ in 1..octave_count {
        total += kernel.scalar(p * frequency) * amplitude;
        frequency *= 0.5;
        amplitude *= 2.0;
    }
    total
}

/// Vector-valued variant; the terrain displacement consumes the y channel.
pub fn accumulate_vector<N: NoiseSource>(
    kernel: &N,
    p: Vec3,
    base_frequency: f32,
    base_amplitude: f32,
    octave_count: u32,
) -> Vec3 {
    let mut frequency = base_frequency;
    let mut amplitude = base_amplitude;
    let mut total = Vec3::ZERO;
    for _ in 1..octave_count {
        total += kernel.vector(p * frequency) * amplitude;
        frequency *= 0.5;
        amplitude *= 2.0;
    }
    total
}
