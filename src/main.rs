//! Headless renderer: draws an OBJ mesh (or a built-in two-triangle scene)
//! and writes the frame to a PNG.
//!
//! ```text
//! rastrum [mesh.obj] [out.png] [angle]
//! ```
//!
//! Diagnostics go through `env_logger`; set `RUST_LOG=debug` to see draw
//! summaries and mesh statistics.

use std::env;
use std::fs;

use anyhow::{Context, Result};
use log::info;
use rastrum::prelude::*;

const WIDTH: u32 = 700;
const HEIGHT: u32 = 700;
const EYE: Vec3 = Vec3::new(0.0, 0.0, 5.0);
const DEFAULT_OUTPUT: &str = "output.png";

/// Two overlapping triangles at different depths.
fn draw_default_scene(r: &mut Rasterizer) -> Result<()> {
    let pos = r.load_positions(vec![
        Vec3::new(2.0, 0.0, -2.0),
        Vec3::new(0.0, 2.0, -2.0),
        Vec3::new(-2.0, 0.0, -2.0),
        Vec3::new(3.5, -1.0, -5.0),
        Vec3::new(2.5, 1.5, -5.0),
        Vec3::new(-1.0, 0.5, -5.0),
    ]);
    let ind = r.load_indices(vec![[0, 1, 2], [3, 4, 5]]);
    let col = r.load_colors(vec![
        Vec3::new(217.0, 238.0, 185.0),
        Vec3::new(217.0, 238.0, 185.0),
        Vec3::new(217.0, 238.0, 185.0),
        Vec3::new(185.0, 217.0, 238.0),
        Vec3::new(185.0, 217.0, 238.0),
        Vec3::new(185.0, 217.0, 238.0),
    ]);
    r.draw(pos, ind, col, Primitive::Triangle)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mesh_path = args.first().filter(|p| p.as_str() != "-");
    let output = args.get(1).map(String::as_str).unwrap_or(DEFAULT_OUTPUT);
    let angle: f64 = match args.get(2) {
        Some(a) => a
            .parse()
            .with_context(|| format!("invalid rotation angle {:?}", a))?,
        None => 0.0,
    };

    let mut rasterizer = Rasterizer::new(WIDTH, HEIGHT);
    rasterizer.clear(ClearMask::COLOR | ClearMask::DEPTH);
    rasterizer.set_model(model_matrix(angle));
    rasterizer.set_view(view_matrix(EYE));
    let projection = Projection::new(45.0, WIDTH as f64 / HEIGHT as f64, -0.1, -50.0);
    rasterizer.set_projection(projection.matrix());
    info!(
        "rendering {}x{} ({} mode), fov {}°, aspect {}, planes {} .. {}",
        WIDTH,
        HEIGHT,
        rasterizer.render_mode(),
        projection.fov_y(),
        projection.aspect_ratio(),
        projection.z_near(),
        projection.z_far()
    );

    match mesh_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read mesh {}", path))?;
            rasterizer
                .draw_obj(&text)
                .with_context(|| format!("failed to draw mesh {}", path))?;
        }
        None => draw_default_scene(&mut rasterizer)?,
    }

    rasterizer
        .frame_buffer()
        .to_image()
        .save(output)
        .with_context(|| format!("failed to write {}", output))?;
    println!("wrote {}x{} frame to {}", WIDTH, HEIGHT, output);

    Ok(())
}
