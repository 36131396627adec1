//! Offline snapshot renderer: evaluates one full frame of the landscape and
//! water surface and writes top-down PNG images for visual inspection.
//! Not part of the evaluation pipeline; no tests.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use image::{GrayImage, Luma, Rgb, RgbImage};
use tidelands_core::{
    terrain_pass, water_pass, ConfigHandle, SampleGrid, TerrainEvaluator, WaterEvaluator,
    WaterStyle, DEFAULT_EXTENT,
};

#[derive(Parser, Debug)]
#[command(name = "preview", about = "Top-down landscape/water snapshot renderer")]
struct Args {
    /// Grid resolution (cells per side).
    #[arg(short, long, default_value_t = 256)]
    resolution: usize,

    /// Elapsed time fed to the animated water style, in seconds.
    #[arg(short, long, default_value_t = 0.0)]
    time: f32,

    /// Water presentation style: flat, tinted, or cellular.
    #[arg(short, long, default_value = "tinted")]
    water: String,

    /// Output directory for the PNG images.
    #[arg(short, long, default_value = "data/preview")]
    out_dir: String,
}

fn water_style(name: &str) -> Result<WaterStyle> {
    Ok(match name {
        "flat" => WaterStyle::Flat,
        "tinted" => WaterStyle::Tinted,
        "cellular" => WaterStyle::Cellular,
        other => bail!("unknown water style {other:?} (expected flat, tinted, or cellular)"),
    })
}

/// [0, 1] float channel to an 8-bit value.
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn main() -> Result<()> {
    let args = Args::parse();
    let style = water_style(&args.water)?;

    let handle = ConfigHandle::default();
    let grid = SampleGrid::new(DEFAULT_EXTENT, args.resolution);
    let terrain = TerrainEvaluator::new();
    let water = WaterEvaluator::new(style);

    let side = grid.resolution() + 1;
    println!("Evaluating {side}x{side} samples ({} water, t = {}s)...", args.water, args.time);
    let land = terrain_pass(&grid, &handle, &terrain);
    let waves = water_pass(&grid, &handle, &water, args.time);

    let config = handle.snapshot();
    let mut color_img = RgbImage::new(side as u32, side as u32);
    let mut height_img = GrayImage::new(side as u32, side as u32);

    for (i, (t, w)) in land.iter().zip(&waves).enumerate() {
        let x = (i % side) as u32;
        let y = (i / side) as u32;

        // Water covers the land sample wherever the probe keeps it.
        let c = if w.visible { w.color } else { t.color };
        color_img.put_pixel(x, y, Rgb([to_byte(c.x), to_byte(c.y), to_byte(c.z)]));

        let h = (t.position.y + config.height_range) / (2.0 * config.height_range);
        height_img.put_pixel(x, y, Luma([to_byte(h)]));
    }

    let out_dir = Path::new(&args.out_dir);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create {}", out_dir.display()))?;

    let color_path = out_dir.join("surface_color.png");
    color_img
        .save(&color_path)
        .with_context(|| format!("cannot write {}", color_path.display()))?;
    println!("Wrote {}", color_path.display());

    let height_path = out_dir.join("surface_height.png");
    height_img
        .save(&height_path)
        .with_context(|| format!("cannot write {}", height_path.display()))?;
    println!("Wrote {}", height_path.display());

    Ok(())
}
