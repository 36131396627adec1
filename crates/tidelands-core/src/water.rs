//! Water surface evaluation.
//!
//! The rendered water plane is flat, parked at the land water-threshold
//! elevation. The same warp + fractal pipeline that shapes the land drives a
//! per-sample visibility probe: only the parts of the displaced probe
//! surface that dip below the nominal water line are kept, so the plane cuts
//! off at the shoreline instead of stretching to the horizon. Water carries
//! no normal; the probe is sampled once with no neighbours.

use glam::{Vec2, Vec3};

use crate::config::Config;
use crate::math::{mix, normalized_height, smoothstep};
use crate::noise::{accumulate_vector, warp, CellularKernel, GradientKernel, NoiseSource};

/// Fixed color for [`WaterStyle::Flat`], matching the default palette water.
const FLAT_COLOR: Vec3 = Vec3::new(0.204, 0.647, 0.835);

/// Worley sample scales for the animated style, coarse to fine.
const CELL_SCALES: [f32; 3] = [0.8, 1.7, 3.9];
/// Drift of the animated pattern, units per second. The z axis drifts
/// slower so the motion reads diagonal rather than axis-locked.
const SCROLL_SPEED: f32 = 0.35;
const SCROLL_SKEW: f32 = 0.6;
/// Edge highlight window over the averaged cell distance.
const EDGE_LOW: f32 = 0.05;
const EDGE_HIGH: f32 = 0.6;

/// Presentation variant, chosen at construction. All three share the same
/// height and visibility logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterStyle {
    /// Single fixed color.
    Flat,
    /// The tunable water-surface color from the palette.
    Tinted,
    /// Animated cellular pattern: scrolled, warped Worley sampling with a
    /// white highlight at cell edges.
    Cellular,
}

/// One evaluated water sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterSample {
    /// Point on the flat water plane.
    pub position: Vec3,
    /// False above the water line; the renderer discards the sample.
    pub visible: bool,
    pub color: Vec3,
}

/// Stateless water evaluator; pure function of (position, config, elapsed).
pub struct WaterEvaluator<N: NoiseSource = GradientKernel> {
    kernel: N,
    cells: CellularKernel,
    style: WaterStyle,
}

impl WaterEvaluator {
    pub fn new(style: WaterStyle) -> Self {
        Self {
            kernel: GradientKernel::new(),
            cells: CellularKernel::new(),
            style,
        }
    }
}

impl<N: NoiseSource> WaterEvaluator<N> {
    /// Swap in a custom gradient kernel. Tests use closed-form stubs.
    pub fn with_kernel(kernel: N, style: WaterStyle) -> Self {
        Self {
            kernel,
            cells: CellularKernel::new(),
            style,
        }
    }

    pub fn style(&self) -> WaterStyle {
        self.style
    }

    /// Place the plane point, probe visibility, and color by style.
    /// `elapsed` is in seconds and only animates the cellular style.
    pub fn evaluate(&self, p: Vec3, config: &Config, elapsed: f32) -> WaterSample {
        // Visibility probe: one warped fractal evaluation at the sample's
        // own position, y channel only.
        let warped = warp(&self.kernel, p, config.warp_strength, config.warp_frequency);
        let density = accumulate_vector(
            &self.kernel,
            warped,
            config.base_frequency,
            config.base_amplitude,
            config.octave_count,
        );
        let probe_y = p.y + density.y;

        // Exclusive on the dry side: exactly at the threshold is not water.
        let visible = normalized_height(probe_y, config.height_range) < config.water_threshold;

        // The plane sits at the threshold elevation inside the vertical
        // range: water_threshold * 2 * height_range - height_range.
        let water_height = config.water_threshold * 2.0 * config.height_range - config.height_range;
        let position = Vec3::new(p.x, p.y + water_height, p.z);

        let color = match self.style {
            WaterStyle::Flat => FLAT_COLOR,
            WaterStyle::Tinted => config.palette.water_surface,
            WaterStyle::Cellular => self.cellular_color(p, config, elapsed),
        };

        WaterSample {
            position,
            visible,
            color,
        }
    }

    /// Averaged three-scale Worley distance on a scrolled, warped position,
    /// shaped into a white edge highlight over the base tint.
    fn cellular_color(&self, p: Vec3, config: &Config, elapsed: f32) -> Vec3 {
        let drift = elapsed * SCROLL_SPEED;
        let scrolled = Vec3::new(p.x + drift, 0.0, p.z + drift * SCROLL_SKEW);
        let warped = warp(&self.kernel, scrolled, config.warp_strength, config.warp_frequency);
        let q = Vec2::new(warped.x, warped.z);

        let mut sum = 0.0;
        for scale in CELL_SCALES {
            sum += self.cells.cell_distance(q * scale);
        }
        let avg = sum / CELL_SCALES.len() as f32;

        let edge = smoothstep(EDGE_LOW, EDGE_HIGH, avg);
        mix(config.palette.water_surface, Vec3::ONE, edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigHandle;
    use approx::assert_relative_eq;

    struct FlatZero;

    impl NoiseSource for FlatZero {
        fn scalar(&self, _p: Vec3) -> f32 {
            0.0
        }
        fn vector(&self, _p: Vec3) -> Vec3 {
            Vec3::ZERO
        }
    }

    /// Thresholds shifted so a zero-displacement probe (normalized height
    /// exactly 0.5) sits right on the water line.
    fn config_with_water_at(water: f32) -> Config {
        let handle = ConfigHandle::default();
        handle
            .update(|c| {
                c.water_threshold = water;
                c.sand_threshold = water + 0.1;
                c.forest_threshold = water + 0.2;
                c.grass_threshold = water + 0.3;
                c.rock_threshold = water + 0.4;
            })
            .unwrap();
        handle.snapshot()
    }

    #[test]
    fn sample_on_the_water_line_is_not_visible() {
        let eval = WaterEvaluator::with_kernel(FlatZero, WaterStyle::Flat);
        let config = config_with_water_at(0.5);
        let sample = eval.evaluate(Vec3::ZERO, &config, 0.0);
        assert!(!sample.visible, "the boundary is exclusive on the dry side");
    }

    #[test]
    fn sample_just_below_the_water_line_is_visible() {
        let eval = WaterEvaluator::with_kernel(FlatZero, WaterStyle::Flat);
        let config = config_with_water_at(0.5 + 1e-3);
        let sample = eval.evaluate(Vec3::ZERO, &config, 0.0);
        assert!(sample.visible);
    }

    #[test]
    fn plane_sits_at_the_threshold_elevation() {
        let eval = WaterEvaluator::with_kernel(FlatZero, WaterStyle::Flat);
        let config = Config::default();
        let sample = eval.evaluate(Vec3::new(3.0, 0.0, -2.0), &config, 0.0);

        let expected = config.water_threshold * 2.0 * config.height_range - config.height_range;
        assert_relative_eq!(sample.position.y, expected);
        assert_eq!(sample.position.x, 3.0);
        assert_eq!(sample.position.z, -2.0);
    }

    #[test]
    fn flat_and_tinted_styles_ignore_elapsed_time() {
        let config = Config::default();
        for style in [WaterStyle::Flat, WaterStyle::Tinted] {
            let eval = WaterEvaluator::with_kernel(FlatZero, style);
            let early = eval.evaluate(Vec3::ONE, &config, 0.0);
            let late = eval.evaluate(Vec3::ONE, &config, 120.0);
            assert_eq!(early.color, late.color, "{style:?} must not animate");
        }
    }

    #[test]
    fn tinted_style_tracks_the_palette() {
        let handle = ConfigHandle::default();
        let eval = WaterEvaluator::with_kernel(FlatZero, WaterStyle::Tinted);
        let p = Vec3::ZERO;

        let before = eval.evaluate(p, &handle.snapshot(), 0.0);
        assert_eq!(before.color, handle.snapshot().palette.water_surface);

        handle
            .update(|c| c.palette.water_surface = Vec3::new(0.1, 0.3, 0.6))
            .unwrap();
        let after = eval.evaluate(p, &handle.snapshot(), 0.0);
        assert_eq!(after.color, Vec3::new(0.1, 0.3, 0.6));
    }

    #[test]
    fn cellular_style_is_deterministic_per_time() {
        let config = Config::default();
        let a = WaterEvaluator::new(WaterStyle::Cellular);
        let b = WaterEvaluator::new(WaterStyle::Cellular);
        let p = Vec3::new(4.0, 0.0, 9.0);
        assert_eq!(a.evaluate(p, &config, 2.5), b.evaluate(p, &config, 2.5));
    }

    #[test]
    fn cellular_style_animates_over_time() {
        let config = Config::default();
        let eval = WaterEvaluator::new(WaterStyle::Cellular);
        // The drift must move the pattern for at least one probe point.
        let moved = (0..8).any(|i| {
            let p = Vec3::new(i as f32 * 3.1, 0.0, i as f32 * -2.3);
            let t0 = eval.evaluate(p, &config, 0.0).color;
            let t1 = eval.evaluate(p, &config, 7.0).color;
            t0 != t1
        });
        assert!(moved, "elapsed time never changed the cellular pattern");
    }

    #[test]
    fn cellular_color_stays_between_tint_and_white() {
        let config = Config::default();
        let eval = WaterEvaluator::new(WaterStyle::Cellular);
        let tint = config.palette.water_surface;
        for i in 0..32 {
            let p = Vec3::new(i as f32 * 1.3, 0.0, i as f32 * 0.7);
            let c = eval.evaluate(p, &config, 1.0).color;
            for (channel, base) in [(c.x, tint.x), (c.y, tint.y), (c.z, tint.z)] {
                assert!(
                    channel >= base - 1e-6 && channel <= 1.0 + 1e-6,
                    "channel {channel} escapes [{base}, 1] at {p}"
                );
            }
        }
    }

    #[test]
    fn visibility_follows_the_probe_not_the_style() {
        let config = config_with_water_at(0.6);
        for style in [WaterStyle::Flat, WaterStyle::Tinted, WaterStyle::Cellular] {
            let eval = WaterEvaluator::with_kernel(FlatZero, style);
            let sample = eval.evaluate(Vec3::ZERO, &config, 0.0);
            assert!(sample.visible, "{style:?} shares the same visibility test");
        }
    }
}
