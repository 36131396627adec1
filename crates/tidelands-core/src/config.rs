//! Tunable parameter set shared by every evaluation stage.
//!
//! A `Config` is constructed once at startup with hard-coded defaults,
//! edited in place by an external tuning surface through
//! [`ConfigHandle::update`], and read by evaluation passes through per-frame
//! [`ConfigHandle::snapshot`] copies. Invalid edits are rejected at update
//! time with the previously committed values retained, so a bad slider edit
//! can never corrupt a frame.

use std::sync::{Arc, PoisonError, RwLock};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Palette ───────────────────────────────────────────────────────────────────

/// Named biome colors, RGB channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub water: Vec3,
    pub sand: Vec3,
    pub forest: Vec3,
    pub grass: Vec3,
    pub rock: Vec3,
    pub snow: Vec3,
    /// Tint used by the tunable-flat water surface style.
    pub water_surface: Vec3,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            water: Vec3::new(0.204, 0.647, 0.835),         // #34a5d5
            sand: Vec3::new(0.871, 0.812, 0.612),          // #decf9c
            forest: Vec3::new(0.133, 0.388, 0.173),        // #22632c
            grass: Vec3::new(0.522, 0.835, 0.204),         // #85d534
            rock: Vec3::new(0.749, 0.741, 0.553),          // #bfbd8d
            snow: Vec3::new(0.8, 0.8, 0.8),                // #cccccc
            water_surface: Vec3::new(0.302, 0.698, 0.878), // #4db2e0
        }
    }
}

impl Palette {
    fn entries(&self) -> [(&'static str, Vec3); 7] {
        [
            ("water", self.water),
            ("sand", self.sand),
            ("forest", self.forest),
            ("grass", self.grass),
            ("rock", self.rock),
            ("snow", self.snow),
            ("water_surface", self.water_surface),
        ]
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

/// Every tunable read by the evaluation pipeline.
///
/// The threshold quintet partitions normalized height [0, 1] into the biome
/// bands and must stay strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Starting octave frequency. (0, 10].
    pub base_frequency: f32,
    /// Starting octave amplitude. (0, 1].
    pub base_amplitude: f32,
    /// Number of fractal octaves. 1..=15; 1 means a flat surface.
    pub octave_count: u32,
    /// Half-extent of the vertical range. (0, 32].
    pub height_range: f32,
    /// Land band thresholds over normalized height, strictly increasing.
    pub water_threshold: f32,
    pub sand_threshold: f32,
    pub forest_threshold: f32,
    pub grass_threshold: f32,
    pub rock_threshold: f32,
    /// Snow recession factor against the surface slope term. [0, 1].
    pub slope_threshold: f32,
    /// Domain warp displacement scale.
    pub warp_strength: f32,
    /// Coordinate scale fed to the warp noise.
    pub warp_frequency: f32,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_frequency: 4.03,
            base_amplitude: 0.25,
            octave_count: 9,
            height_range: 16.0,
            water_threshold: 0.1,
            sand_threshold: 0.2,
            forest_threshold: 0.3,
            grass_threshold: 0.4,
            rock_threshold: 0.8,
            slope_threshold: 0.2,
            warp_strength: 1.0,
            warp_frequency: 0.05,
            palette: Palette::default(),
        }
    }
}

/// Rejection classes for a config edit. Every variant is raised at mutation
/// time; evaluation never sees an invalid config.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("{name} must be in ({min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{name} must be in [0, 1], got {value}")]
    UnitInterval { name: &'static str, value: f32 },

    #[error("octave_count must be in 1..=15, got {0}")]
    BadOctaveCount(u32),

    #[error(
        "thresholds must be strictly increasing within [0, 1]: \
         water {water} < sand {sand} < forest {forest} < grass {grass} < rock {rock}"
    )]
    ThresholdOrder {
        water: f32,
        sand: f32,
        forest: f32,
        grass: f32,
        rock: f32,
    },

    #[error("palette color {name} has a channel outside [0, 1]: ({r}, {g}, {b})")]
    PaletteChannel {
        name: &'static str,
        r: f32,
        g: f32,
        b: f32,
    },
}

impl Config {
    /// Check every invariant the evaluation pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_fields = [
            ("base_frequency", self.base_frequency),
            ("base_amplitude", self.base_amplitude),
            ("height_range", self.height_range),
            ("water_threshold", self.water_threshold),
            ("sand_threshold", self.sand_threshold),
            ("forest_threshold", self.forest_threshold),
            ("grass_threshold", self.grass_threshold),
            ("rock_threshold", self.rock_threshold),
            ("slope_threshold", self.slope_threshold),
            ("warp_strength", self.warp_strength),
            ("warp_frequency", self.warp_frequency),
        ];
        for (name, value) in finite_fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        check_range("base_frequency", self.base_frequency, 0.0, 10.0)?;
        check_range("base_amplitude", self.base_amplitude, 0.0, 1.0)?;
        check_range("height_range", self.height_range, 0.0, 32.0)?;

        if !(1..=15).contains(&self.octave_count) {
            return Err(ConfigError::BadOctaveCount(self.octave_count));
        }

        let t = [
            self.water_threshold,
            self.sand_threshold,
            self.forest_threshold,
            self.grass_threshold,
            self.rock_threshold,
        ];
        let ordered = t.windows(2).all(|w| w[0] < w[1]);
        let in_unit = t.iter().all(|&v| (0.0..=1.0).contains(&v));
        if !ordered || !in_unit {
            return Err(ConfigError::ThresholdOrder {
                water: self.water_threshold,
                sand: self.sand_threshold,
                forest: self.forest_threshold,
                grass: self.grass_threshold,
                rock: self.rock_threshold,
            });
        }

        if !(0.0..=1.0).contains(&self.slope_threshold) {
            return Err(ConfigError::UnitInterval {
                name: "slope_threshold",
                value: self.slope_threshold,
            });
        }

        for (name, c) in self.palette.entries() {
            let in_unit = [c.x, c.y, c.z]
                .iter()
                .all(|v| v.is_finite() && (0.0..=1.0).contains(v));
            if !in_unit {
                return Err(ConfigError::PaletteChannel {
                    name,
                    r: c.x,
                    g: c.y,
                    b: c.z,
                });
            }
        }

        Ok(())
    }
}

/// Positive-and-bounded check: value must lie in (0, max].
fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value <= min || value > max {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// ── Shared handle ─────────────────────────────────────────────────────────────

/// Shared, externally mutable config: the tuning surface writes through
/// [`ConfigHandle::update`], evaluation passes read one
/// [`ConfigHandle::snapshot`] per frame. Clones share the same underlying
/// config.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Config>>,
}

impl ConfigHandle {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(config)),
        })
    }

    /// Apply an edit to a scratch copy, validate, and commit only on
    /// success. A rejected edit leaves the committed config untouched.
    pub fn update(&self, edit: impl FnOnce(&mut Config)) -> Result<(), ConfigError> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = guard.clone();
        edit(&mut candidate);
        candidate.validate()?;
        *guard = candidate;
        Ok(())
    }

    /// Copy of the current config for one full evaluation pass. Edits made
    /// after the snapshot is taken are only visible to later snapshots, so a
    /// frame never mixes parameter values.
    pub fn snapshot(&self) -> Config {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Config::default())),
        }
    }
}
