mod flight;
mod shaders;

use anyhow::bail;
use clap::{Parser, Subcommand};
use ketemine_assets::{ShaderManifest, MANIFEST_PATH};
use ketemine_render::{CubeField, FieldLayout};
use ketemine_render_wgpu::{AdapterSummary, GpuContext};
use ketemine_tools::CameraInspector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::flight::{FlightState, Simulation};

#[derive(Parser)]
#[command(name = "ketemine-cli", version, about = "Headless keteMine tool")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the shader manifest
    Info {
        /// Resources directory
        #[arg(long, default_value = "resources")]
        resources: PathBuf,
    },
    /// Fly a scripted camera over the cube field and print text frames
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value_t = 300)]
        frames: u64,
        /// Simulated frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Print a text frame every N frames (0 disables)
        #[arg(long, default_value_t = 60)]
        every: u64,
        /// Seed for the cube colours
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
    },
    /// Compile and link every manifest program
    Shaders {
        /// Resources directory
        #[arg(long, default_value = "resources")]
        resources: PathBuf,
        /// Only check that the source files are readable
        #[arg(long)]
        sources_only: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info { resources } => {
            println!("ketemine-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", ketemine_kernel::crate_info());
            println!("input: {}", ketemine_input::crate_info());
            println!("assets: {}", ketemine_assets::crate_info());
            println!("render: {}", ketemine_render::crate_info());
            println!("render-wgpu: {}", ketemine_render_wgpu::crate_info());
            println!("tools: {}", ketemine_tools::crate_info());

            let manifest = ShaderManifest::load_or_builtin(&resources);
            println!("shader programs ({}):", resources.join(MANIFEST_PATH).display());
            for spec in &manifest.programs {
                println!(
                    "  {:<14} {} + {}",
                    spec.name,
                    spec.vertex.display(),
                    spec.fragment.display()
                );
            }
        }
        Commands::Simulate {
            frames,
            fps,
            every,
            seed,
        } => {
            if !(fps.is_finite() && fps > 0.0) {
                bail!("--fps must be a positive number (got {fps})");
            }
            println!("Scripted flight: {frames} frames at {fps} fps, seed={seed}");
            let field = CubeField::generate(FieldLayout::default(), Some(seed));
            let mut sim = Simulation::new(field, every);
            let camera = FlightState::start_camera();
            let game = flight::run(
                &mut sim,
                FlightState::new(camera.clone(), flight::default_script()),
                frames,
                fps,
            );

            for report in &sim.reports {
                print!("{report}");
            }
            let ts = game.timestep();
            println!(
                "Frames: {}  Updates: {}  Simulated: {:.3}s  Wall: {:.3}s",
                sim.frames,
                ts.total_steps(),
                ts.simulated_time(),
                ts.elapsed_time()
            );
            if let Some(view) = sim.last_view {
                let eye = view.eye;
                println!("Final eye: ({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z);
            }
            println!("Start camera: {}", CameraInspector::summary(&camera));
        }
        Commands::Shaders {
            resources,
            sources_only,
        } => {
            let manifest = ShaderManifest::load_or_builtin(&resources);
            let reports = if sources_only {
                println!("Checking shader sources under {}", resources.display());
                shaders::check_sources(&manifest, &resources)
            } else {
                match GpuContext::headless() {
                    Ok(gpu) => {
                        println!("{}", AdapterSummary::from_adapter(&gpu.adapter));
                        shaders::check_on_device(&gpu, &manifest, &resources)
                    }
                    Err(e) => {
                        tracing::warn!("{e}; falling back to a source check");
                        shaders::check_sources(&manifest, &resources)
                    }
                }
            };

            for report in &reports {
                println!("{report}");
            }
            let failed = reports.iter().filter(|r| !r.is_ok()).count();
            if failed > 0 {
                bail!("{failed} of {} shader programs failed", reports.len());
            }
            println!("All {} shader programs OK", reports.len());
        }
    }

    Ok(())
}
