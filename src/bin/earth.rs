use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use kiss3d::window::Window;

use rust_orrery::file::{read_catalog, read_satellites};
use rust_orrery::gui::{EarthView, Simulation};
use rust_orrery::model::{CancelToken, RunLoop};
use rust_orrery::orbital_data::{spawn_fetch, HttpElementSource, DEFAULT_ENDPOINT};

/// The Earth, the Moon, and a handful of satellites, plus Earth's orbital elements.
#[derive(Debug, Parser)]
struct Args {
    /// Body table to load
    #[arg(long, default_value = "earth-system.txt")]
    bodies: PathBuf,
    /// Satellite table to load
    #[arg(long, default_value = "satellites.txt")]
    satellites: PathBuf,
    /// Directory holding textures, models and the skybox
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
    /// Where to get orbital elements from
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Close the window after this many frames
    #[arg(long)]
    frames: Option<u64>,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let orrery = read_catalog(&args.bodies)
        .with_context(|| format!("loading bodies from {}", args.bodies.display()))?;
    let satellites = read_satellites(&args.satellites)
        .with_context(|| format!("loading satellites from {}", args.satellites.display()))?;

    // Start the request now so it overlaps with asset loading
    let fetch = spawn_fetch(HttpElementSource::new(&args.endpoint));

    let mut window = Window::new("Earth and Satellites");
    window.set_framerate_limit(Some(60));

    let view = EarthView::new(orrery, satellites, &args.assets, Some(fetch), &mut window);
    let run_loop = RunLoop::new(CancelToken::new()).with_frame_limit(args.frames);
    window.render_loop(Simulation::new(view, run_loop));
    Ok(())
}
