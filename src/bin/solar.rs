use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use kiss3d::window::Window;

use rust_orrery::file::read_catalog;
use rust_orrery::gui::{Simulation, SolarView};
use rust_orrery::model::{CancelToken, RunLoop};

/// The Sun and the eight planets, going around in circles.
#[derive(Debug, Parser)]
struct Args {
    /// Body table to load
    #[arg(long, default_value = "solar-bodies.txt")]
    bodies: PathBuf,
    /// Directory holding textures and the skybox
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
    /// Initial speed multiplier; negative runs the planets backwards
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    speed: f64,
    /// Close the window after this many frames
    #[arg(long)]
    frames: Option<u64>,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let orrery = read_catalog(&args.bodies)
        .with_context(|| format!("loading bodies from {}", args.bodies.display()))?;

    let mut window = Window::new("Solar System");
    window.set_framerate_limit(Some(60));

    let view = SolarView::new(orrery, args.speed, &args.assets, &mut window);
    let run_loop = RunLoop::new(CancelToken::new()).with_frame_limit(args.frames);
    window.render_loop(Simulation::new(view, run_loop));
    Ok(())
}
