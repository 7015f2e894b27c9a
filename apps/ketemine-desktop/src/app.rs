use ketemine_kernel::{FixedTimestep, GameLoop};
use ketemine_tools::LogConsole;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::WindowId;

use crate::engine::{Engine, Settings};
use crate::playing::PlayingState;

/// Wheel pixels treated as one line of scrolling (touchpads report pixels).
const PIXELS_PER_LINE: f32 = 40.0;

/// Application shell. The engine and the game loop are sibling fields so a
/// state can borrow the engine mutably while the loop drives it.
pub struct App {
    settings: Settings,
    console: LogConsole,
    engine: Option<Engine>,
    game: GameLoop<Engine>,
    clock: Instant,
}

impl App {
    pub fn new(settings: Settings, console: LogConsole) -> Self {
        Self {
            settings,
            console,
            engine: None,
            game: GameLoop::new(FixedTimestep::default()),
            clock: Instant::now(),
        }
    }

    fn run_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let now = self.clock.elapsed().as_secs_f64();
        let report = self.game.frame(engine, now);
        engine.stats.record(&report);
        if engine.should_close() {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() {
            return;
        }
        let mut engine = match Engine::new(event_loop, self.settings.clone(), self.console.clone()) {
            Ok(engine) => engine,
            Err(e) => {
                tracing::error!("startup failed: {e:#}");
                event_loop.exit();
                return;
            }
        };
        self.game.go_to(Box::new(PlayingState::new(self.settings.camera)), &mut engine);
        self.engine = Some(engine);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let window = engine.window.clone();
        let captured = engine.input.is_captured();
        engine.overlay.on_window_event(&window, &event, captured);
        let focus = engine.focus();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                engine.resize(size.width, size.height);
                self.game.states_mut().resize(engine, size.width, size.height);
            }
            WindowEvent::Focused(false) => {
                engine.input.release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if repeat {
                    return;
                }
                if let Some(action) = engine.input.on_key(key, state == ElementState::Pressed, focus) {
                    engine.apply(action);
                }
            }
            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(action) = engine.input.on_mouse_button(button, state == ElementState::Pressed, focus) {
                    engine.apply(action);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                engine.input.on_scroll(lines, focus);
            }
            WindowEvent::RedrawRequested => {
                self.run_frame(event_loop);
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if let Some(engine) = self.engine.as_mut() {
                let focus = engine.focus();
                engine.input.on_mouse_motion(delta.0 as f32, delta.1 as f32, focus);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = &self.engine {
            engine.window.request_redraw();
        }
    }
}
