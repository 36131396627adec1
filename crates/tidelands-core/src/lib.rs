//! Procedural landscape and water surface evaluation.
//!
//! For any 2D sample position the pipeline derives a height, a surface
//! normal, and a blended biome color: domain warping, multi-octave fractal
//! accumulation, finite-difference normal estimation, then threshold-based
//! biome classification. A sibling pipeline places and colors the water
//! surface, discarding samples above the water line so the plane cuts off
//! at the shoreline.
//!
//! Everything is a pure function of (position, config snapshot, elapsed
//! time). The renderer feeding grid positions in and the tuning panel
//! writing parameters are external collaborators: the former consumes
//! [`TerrainSample`]/[`WaterSample`] values, the latter edits a shared
//! [`ConfigHandle`] whose updates are validated and fail closed.

pub mod biome;
pub mod config;
pub mod grid;
pub mod math;
pub mod noise;
pub mod terrain;
pub mod water;

pub use config::{Config, ConfigError, ConfigHandle, Palette};
pub use grid::{terrain_pass, water_pass, SampleGrid, DEFAULT_EXTENT};
pub use terrain::{TerrainEvaluator, TerrainSample};
pub use water::{WaterEvaluator, WaterSample, WaterStyle};
