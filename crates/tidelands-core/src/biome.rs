//! Threshold-based biome classification.
//!
//! A classifier is an ordered list of elevation bands over normalized
//! height. Each band weight is a smoothstep across the band's threshold
//! pair, and colors compose by sequential override: once a band's weight
//! saturates it fully covers everything below it, leaving smooth transition
//! edges of width `upper - lower`. The two palette variants (six-band
//! landscape, four-band mountain) are band tables fed to the same algorithm.

use glam::Vec3;

use crate::config::Config;
use crate::math::{mix, normalized_height, smoothstep};
use crate::noise::NoiseSource;

/// Coordinate multiplier for the secondary wrinkle noise sampled on the
/// horizontal plane.
const DETAIL_FREQUENCY: f32 = 10.0;

/// Wrinkle amplitude for the six-band landscape table.
pub const TERRAIN_DETAIL: f32 = 0.03;
/// Wrinkle amplitude for the four-band mountain table.
pub const MOUNTAIN_DETAIL: f32 = 0.1;

/// One elevation band. Weight = `smoothstep(lower, upper, h')` where `h'`
/// starts from normalized height and picks up the flagged adjustments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f32,
    pub upper: f32,
    pub color: Vec3,
    /// Add the detail wrinkle to this band's input.
    pub detail: bool,
    /// Subtract `slope * slope_threshold` from this band's input, pushing
    /// the band off faces according to their slope term.
    pub slope: bool,
}

/// Six-band landscape layout: water, sand, forest, grass, rock, snow.
pub fn terrain_bands(config: &Config) -> [Band; 6] {
    let p = &config.palette;
    [
        Band { lower: 0.0, upper: config.water_threshold, color: p.water, detail: false, slope: false },
        Band { lower: config.water_threshold, upper: config.sand_threshold, color: p.sand, detail: false, slope: false },
        Band { lower: config.sand_threshold, upper: config.forest_threshold, color: p.forest, detail: false, slope: false },
        Band { lower: config.forest_threshold, upper: config.grass_threshold, color: p.grass, detail: false, slope: false },
        Band { lower: config.grass_threshold, upper: config.rock_threshold, color: p.rock, detail: true, slope: false },
        Band { lower: config.rock_threshold, upper: 1.0, color: p.snow, detail: true, slope: true },
    ]
}

/// Four-band mountain layout: water, grass, rock, snow. The wrinkle moves to
/// the grass edge and the rock edge stays clean.
pub fn mountain_bands(config: &Config) -> [Band; 4] {
    let p = &config.palette;
    [
        Band { lower: 0.0, upper: config.water_threshold, color: p.water, detail: false, slope: false },
        Band { lower: config.water_threshold, upper: config.grass_threshold, color: p.grass, detail: true, slope: false },
        Band { lower: config.grass_threshold, upper: config.rock_threshold, color: p.rock, detail: false, slope: false },
        Band { lower: config.rock_threshold, upper: 1.0, color: p.snow, detail: false, slope: true },
    ]
}

/// Weight of one band given the shared per-sample terms.
#[inline]
pub fn zone_weight(
    band: &Band,
    height_normalized: f32,
    detail: f32,
    slope: f32,
    slope_threshold: f32,
) -> f32 {
    let mut h = height_normalized;
    if band.detail {
        h += detail;
    }
    if band.slope {
        h -= slope * slope_threshold;
    }
    smoothstep(band.lower, band.upper, h)
}

/// Blend the palette over a band table at a displaced sample.
///
/// `slope` is `dot(normal, up)`: 1 for a flat upward-facing surface, lower
/// on steep faces. Height is normalized over the configured vertical range
/// and left unclamped.
pub fn classify<N: NoiseSource>(
    kernel: &N,
    position: Vec3,
    normal: Vec3,
    bands: &[Band],
    detail_amplitude: f32,
    config: &Config,
) -> Vec3 {
    let slope = normal.dot(Vec3::Y);
    let h = normalized_height(position.y, config.height_range);
    let detail_point = Vec3::new(position.x, 0.0, position.z) * DETAIL_FREQUENCY;
    let detail = kernel.scalar(detail_point) * detail_amplitude;

    let mut color = config.palette.water;
    for band in bands {
        let w = zone_weight(band, h, detail, slope, config.slope_threshold);
        color = mix(color, band.color, w);
    }
    color
}
