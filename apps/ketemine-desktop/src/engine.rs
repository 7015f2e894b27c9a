use anyhow::{Context as _, Result};
use ketemine_assets::{ShaderLibrary, ShaderManifest};
use ketemine_input::{Action, InputState, KeyBindings, OverlayFocus};
use ketemine_kernel::CameraSettings;
use ketemine_render_wgpu::{
    install_error_logger, log_adapter_info, AdapterSummary, DepthTexture, GpuContext, WgpuProgram,
    WgpuShaderCompiler,
};
use ketemine_tools::{FrameStats, LogConsole};
use std::path::PathBuf;
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorGrabMode, Window};

use crate::overlay::Overlay;
use crate::ui::{OverlayPanel, StateReadout};

/// Startup options, resolved from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub resources: PathBuf,
    pub width: u32,
    pub height: u32,
    pub maximized: bool,
    pub show_gui: bool,
    pub vsync: bool,
    pub seed: Option<u64>,
    pub camera: CameraSettings,
}

/// A surface texture being drawn this frame.
pub struct Frame {
    surface: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Everything a game state may touch: window, GPU, shaders, input, overlay.
pub struct Engine {
    pub settings: Settings,
    pub window: Arc<Window>,
    pub gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTexture,
    pub adapter: AdapterSummary,
    pub shaders: ShaderLibrary<WgpuProgram>,
    pub input: InputState,
    pub overlay: Overlay,
    pub stats: FrameStats,
    should_close: bool,
}

impl Engine {
    pub fn new(event_loop: &ActiveEventLoop, settings: Settings, console: LogConsole) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("keteMine")
            .with_inner_size(PhysicalSize::new(settings.width, settings.height))
            .with_maximized(settings.maximized);
        let window = Arc::new(event_loop.create_window(attrs).context("failed to create window")?);

        let instance = GpuContext::instance();
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;
        let gpu = GpuContext::for_surface(instance, &surface)?;
        let adapter = log_adapter_info(&gpu.adapter);
        install_error_logger(&gpu.device);

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&gpu.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if settings.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &config);
        let depth = DepthTexture::new(&gpu.device, config.width, config.height);

        let manifest = ShaderManifest::load_or_builtin(&settings.resources);
        let shaders = ShaderLibrary::load_all(
            &manifest,
            &settings.resources,
            &mut WgpuShaderCompiler::new(&gpu.device),
        );

        let overlay = Overlay::new(&window, &gpu.device, surface_format, settings.show_gui, console);

        tracing::info!(
            "surface {}x{} {:?}, present mode {:?}",
            config.width,
            config.height,
            config.format,
            config.present_mode
        );

        Ok(Self {
            settings,
            window,
            gpu,
            surface,
            config,
            depth,
            adapter,
            shaders,
            input: InputState::new(KeyBindings::default()),
            overlay,
            stats: FrameStats::default(),
            should_close: false,
        })
    }

    /// What the overlay claimed during the last frame.
    pub fn focus(&self) -> OverlayFocus {
        self.overlay.focus(self.input.is_captured())
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn request_close(&mut self) {
        self.should_close = true;
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// React to a discrete action straight from a key or button press.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => {
                tracing::info!("quit requested");
                self.request_close();
            }
            Action::ToggleOverlay => {
                let visible = self.overlay.toggle();
                tracing::debug!(visible, "overlay toggled");
            }
            Action::ToggleCapture => {
                let captured = !self.input.is_captured();
                self.set_capture(captured);
            }
            Action::Move(_) | Action::Look { .. } | Action::Zoom(_) => {}
        }
    }

    /// Grab and hide the cursor for mouse-look, or give it back.
    pub fn set_capture(&mut self, captured: bool) {
        if captured {
            let grab = self
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grab {
                tracing::warn!("cursor grab unavailable: {e}");
            }
            self.overlay.release_pointer();
        } else if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            tracing::warn!("failed to release cursor: {e}");
        }
        self.window.set_cursor_visible(!captured);
        self.input.set_captured(captured);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.gpu.device, &self.config);
        self.depth.resize(&self.gpu.device, self.config.width, self.config.height);
        tracing::debug!(width = self.config.width, height = self.config.height, "surface resized");
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        self.depth.view()
    }

    /// Acquire the next surface texture. `None` skips this frame.
    pub fn begin_frame(&mut self) -> Option<Frame> {
        let surface = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.gpu.device, &self.config);
                return None;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return None;
            }
        };
        let view = surface
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        Some(Frame {
            surface,
            view,
            encoder,
        })
    }

    /// Paint the overlay on top, submit and present.
    pub fn finish_frame(&mut self, mut frame: Frame, readout: &StateReadout) {
        let panel = OverlayPanel {
            state: readout,
            stats: &self.stats,
            adapter: &self.adapter,
            shaders: &self.shaders,
        };
        self.overlay.paint(
            &self.window,
            &self.gpu.device,
            &self.gpu.queue,
            &mut frame.encoder,
            &frame.view,
            [self.config.width, self.config.height],
            &panel,
        );
        self.gpu.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.surface.present();
    }
}
