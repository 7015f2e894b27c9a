use glam::{Mat4, Vec3};
use ketemine_input::Action;
use ketemine_kernel::{Camera, CameraSettings, GameState};
use ketemine_render::{CubeField, FieldLayout};
use ketemine_render_wgpu::{clear_pass, CubeFieldRenderer};
use ketemine_tools::CameraInspector;

use crate::engine::Engine;
use crate::ui::StateReadout;

/// Shader program the cube field is drawn with.
pub const CUBE_PROGRAM: &str = "test";

/// Free flight over the instanced cube field.
pub struct PlayingState {
    camera: Camera,
    layout: FieldLayout,
    renderer: Option<CubeFieldRenderer>,
}

impl PlayingState {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            camera: Camera::with_settings(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0, settings),
            layout: FieldLayout::default(),
            renderer: None,
        }
    }

    fn update_mvp(&self, engine: &Engine) {
        if let Some(renderer) = &self.renderer {
            renderer.set_mvp(&engine.gpu.queue, self.camera.mvp(Mat4::IDENTITY));
        }
    }

    fn readout(&self, engine: &Engine) -> StateReadout {
        StateReadout {
            name: self.name(),
            camera: CameraInspector::summary(&self.camera),
            program: self.renderer.as_ref().map(|r| r.program().to_string()),
            instances: self.renderer.as_ref().map_or(0, |r| r.instance_count()),
            captured: engine.input.is_captured(),
        }
    }
}

impl GameState<Engine> for PlayingState {
    fn name(&self) -> &'static str {
        "playing"
    }

    fn enter(&mut self, engine: &mut Engine) {
        let field = CubeField::generate(self.layout, engine.settings.seed);
        self.renderer = match engine.shaders.get(CUBE_PROGRAM) {
            Ok(program) => {
                match CubeFieldRenderer::new(&engine.gpu.device, engine.surface_format(), program, &field) {
                    Ok(renderer) => Some(renderer),
                    Err(e) => {
                        tracing::error!("{e}; the cube field will not be drawn");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::error!("{e}; the cube field will not be drawn");
                None
            }
        };

        let (width, height) = engine.size();
        self.camera.set_aspect_ratio(width as f32 / height.max(1) as f32);
        self.update_mvp(engine);
        engine.set_capture(true);
    }

    fn exit(&mut self, engine: &mut Engine) {
        engine.set_capture(false);
        self.renderer = None;
    }

    fn handle_input(&mut self, engine: &mut Engine) {
        for action in engine.input.drain_actions() {
            match action {
                Action::Look { dx, dy } => self.camera.look(dx, dy, true),
                Action::Zoom(lines) => self.camera.zoom(lines),
                _ => {}
            }
        }
    }

    fn update(&mut self, engine: &mut Engine, dt: f64) {
        let focus = engine.focus();
        for direction in engine.input.movements(focus) {
            self.camera.move_in(direction, dt as f32);
        }
        self.update_mvp(engine);
    }

    fn draw(&mut self, engine: &mut Engine) {
        let Some(mut frame) = engine.begin_frame() else {
            return;
        };
        match &self.renderer {
            Some(renderer) => renderer.render(&mut frame.encoder, &frame.view, engine.depth_view()),
            None => clear_pass(&mut frame.encoder, &frame.view, engine.depth_view()),
        }
        let readout = self.readout(engine);
        engine.finish_frame(frame, &readout);
    }

    fn resize(&mut self, engine: &mut Engine, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.set_aspect_ratio(width as f32 / height as f32);
        self.update_mvp(engine);
    }
}
