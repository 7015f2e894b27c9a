mod app;
mod engine;
mod overlay;
mod playing;
mod ui;

use anyhow::Result;
use clap::Parser;
use ketemine_kernel::CameraSettings;
use ketemine_tools::{ConsoleLayer, LogConsole};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::App;
use crate::engine::Settings;

#[derive(Parser)]
#[command(name = "ketemine-desktop", version, about = "keteMine desktop application")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding `shaders/shaders.json` and the shader sources
    #[arg(long, default_value = "resources")]
    resources: PathBuf,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Start maximized
    #[arg(long)]
    maximized: bool,

    /// Start with the debug overlay hidden (F1 shows it)
    #[arg(long)]
    hide_gui: bool,

    /// Camera movement speed in units per second
    #[arg(long, default_value_t = 2.5)]
    speed: f32,

    /// Degrees of rotation per pixel of mouse movement
    #[arg(long, default_value_t = 0.1)]
    sensitivity: f32,

    /// Present without waiting for vertical sync
    #[arg(long)]
    no_vsync: bool,

    /// Seed for the cube colours (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            resources: self.resources.clone(),
            width: self.width.max(1),
            height: self.height.max(1),
            maximized: self.maximized,
            show_gui: !self.hide_gui,
            vsync: !self.no_vsync,
            seed: self.seed,
            camera: CameraSettings {
                movement_speed: self.speed,
                mouse_sensitivity: self.sensitivity,
                aspect_ratio: self.width.max(1) as f32 / self.height.max(1) as f32,
                ..CameraSettings::default()
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Every event goes to stderr and to the in-GUI console.
    let console = LogConsole::new();
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .with(ConsoleLayer::new(console.clone()))
        .init();

    tracing::info!("ketemine-desktop v{} starting", env!("CARGO_PKG_VERSION"));

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(cli.settings(), console);
    event_loop.run_app(&mut app)?;

    tracing::info!("ketemine-desktop exiting");
    Ok(())
}
