//! Regular sample grid and whole-frame evaluation passes.
//!
//! Sample evaluations are independent and side-effect-free given a config
//! snapshot, so a pass is a straight map over the grid positions: serial by
//! default, a rayon par-iter with the `threading` feature. Each pass takes
//! exactly one snapshot up front, so concurrent tuning edits can never tear
//! parameter values across samples within a frame.

use glam::Vec3;

#[cfg(feature = "threading")]
use rayon::prelude::*;

use crate::config::ConfigHandle;
use crate::noise::NoiseSource;
use crate::terrain::{TerrainEvaluator, TerrainSample};
use crate::water::{WaterEvaluator, WaterSample};

/// Side length of the sampled surface patch.
pub const DEFAULT_EXTENT: f32 = 100.0;

/// Regular grid of XZ sample positions centred at the origin, y = 0.
///
/// Resolution only controls how many positions are fed to the evaluators;
/// it never affects the evaluation of any individual position.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    extent: f32,
    resolution: usize,
}

impl SampleGrid {
    /// `resolution` is the cell count per side; the grid produces
    /// `(resolution + 1)^2` vertex positions. Zero is clamped to one cell.
    pub fn new(extent: f32, resolution: usize) -> Self {
        Self {
            extent,
            resolution: resolution.max(1),
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Change the mesh resolution. Idempotent: setting the same value twice
    /// leaves the produced positions (and therefore all sample output)
    /// unchanged.
    pub fn set_resolution(&mut self, resolution: usize) {
        self.resolution = resolution.max(1);
    }

    /// Row-major vertex positions, `(resolution + 1)^2` of them.
    pub fn positions(&self) -> Vec<Vec3> {
        let n = self.resolution;
        let step = self.extent / n as f32;
        let half = self.extent * 0.5;
        let mut out = Vec::with_capacity((n + 1) * (n + 1));
        for row in 0..=n {
            for col in 0..=n {
                out.push(Vec3::new(
                    col as f32 * step - half,
                    0.0,
                    row as f32 * step - half,
                ));
            }
        }
        out
    }
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENT, 500)
    }
}

/// Evaluate the landscape for every grid position against one config
/// snapshot taken at pass start.
pub fn terrain_pass<N>(
    grid: &SampleGrid,
    handle: &ConfigHandle,
    evaluator: &TerrainEvaluator<N>,
) -> Vec<TerrainSample>
where
    N: NoiseSource + Sync,
{
    let config = handle.snapshot();
    let positions = grid.positions();

    #[cfg(feature = "threading")]
    {
        positions
            .par_iter()
            .map(|&p| evaluator.evaluate(p, &config))
            .collect()
    }
    #[cfg(not(feature = "threading"))]
    {
        positions
            .iter()
            .map(|&p| evaluator.evaluate(p, &config))
            .collect()
    }
}

/// Evaluate the water surface for every grid position against one config
/// snapshot. `elapsed` animates the cellular style only.
pub fn water_pass<N>(
    grid: &SampleGrid,
    handle: &ConfigHandle,
    evaluator: &WaterEvaluator<N>,
    elapsed: f32,
) -> Vec<WaterSample>
where
    N: NoiseSource + Sync,
{
    let config = handle.snapshot();
    let positions = grid.positions();

    #[cfg(feature = "threading")]
    {
        positions
            .par_iter()
            .map(|&p| evaluator.evaluate(p, &config, elapsed))
            .collect()
    }
    #[cfg(not(feature = "threading"))]
    {
        positions
            .iter()
            .map(|&p| evaluator.evaluate(p, &config, elapsed))
            .collect()
    }
}
