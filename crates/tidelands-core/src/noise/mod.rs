pub mod fractal;
pub mod kernel;
pub mod warp;

pub use fractal::{accumulate_scalar, accumulate_vector};
pub use kernel::{CellularKernel, GradientKernel, NoiseSource};
pub use warp::warp;
