//! Deterministic continuous noise kernels.
//!
//! Kernels are pure functions of the input coordinate: frequency is always
//! applied by the caller via coordinate scaling, and output stays in roughly
//! [-1, 1] per channel. Seeds are compile-time constants, so a given input
//! produces the same value within and across processes.

use glam::{Vec2, Vec3};
use noise::core::worley::ReturnType;
use noise::{NoiseFn, Perlin, Worley};

/// Seam between the evaluation pipeline and the underlying noise. Tests
/// substitute closed-form stubs here to check accumulation arithmetic.
pub trait NoiseSource {
    fn scalar(&self, p: Vec3) -> f32;
    fn vector(&self, p: Vec3) -> Vec3;
}

// Per-channel seeds. The x channel doubles as the scalar kernel.
const SEED_X: u32 = 0x51DE;
const SEED_Y: u32 = 0x51DE ^ 0x00F1;
const SEED_Z: u32 = 0x51DE ^ 0x00F2;
const SEED_CELL: u32 = 0x51DE ^ 0x0C11;

/// Default gradient kernel: three decorrelated fixed-seed Perlin instances,
/// one per vector channel.
pub struct GradientKernel {
    x: Perlin,
    y: Perlin,
    z: Perlin,
}

impl GradientKernel {
    pub fn new() -> Self {
        Self {
            x: Perlin::new(SEED_X),
            y: Perlin::new(SEED_Y),
            z: Perlin::new(SEED_Z),
        }
    }
}

impl Default for GradientKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for GradientKernel {
    fn scalar(&self, p: Vec3) -> f32 {
        self.x.get([p.x as f64, p.y as f64, p.z as f64]) as f32
    }

    fn vector(&self, p: Vec3) -> Vec3 {
        let q = [p.x as f64, p.y as f64, p.z as f64];
        Vec3::new(
            self.x.get(q) as f32,
            self.y.get(q) as f32,
            self.z.get(q) as f32,
        )
    }
}

/// Fixed-seed Worley kernel used by the animated water style.
pub struct CellularKernel {
    worley: Worley,
}

impl CellularKernel {
    pub fn new() -> Self {
        Self {
            worley: Worley::new(SEED_CELL).set_return_type(ReturnType::Distance),
        }
    }

    /// Distance to the nearest feature point at `p`, roughly [-1, 1].
    /// Low near cell centres, rising toward cell edges.
    pub fn cell_distance(&self, p: Vec2) -> f32 {
        self.worley.get([p.x as f64, p.y as f64]) as f32
    }
}

impl Default for CellularKernel {
    fn default() -> Self {
        Self::new()
    }
}
