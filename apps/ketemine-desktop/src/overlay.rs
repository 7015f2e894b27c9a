use ketemine_input::OverlayFocus;
use ketemine_tools::LogConsole;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::ui::{self, ConsoleView, OverlayPanel};

fn is_pointer_event(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::CursorMoved { .. }
            | WindowEvent::CursorEntered { .. }
            | WindowEvent::CursorLeft { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. }
            | WindowEvent::Touch(_)
    )
}

/// A captured cursor drives the camera, so the overlay never claims the
/// pointer while captured.
fn focus_for(ctx: &egui::Context, visible: bool, captured: bool) -> OverlayFocus {
    if !visible {
        return OverlayFocus::NONE;
    }
    OverlayFocus {
        keyboard: ctx.wants_keyboard_input(),
        pointer: !captured && ctx.wants_pointer_input(),
    }
}

/// egui debug overlay: context, winit glue and wgpu painter.
pub struct Overlay {
    ctx: egui::Context,
    winit: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    visible: bool,
    console: LogConsole,
    console_view: ConsoleView,
}

impl Overlay {
    pub fn new(
        window: &Window,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        visible: bool,
        console: LogConsole,
    ) -> Self {
        let ctx = egui::Context::default();
        let winit = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);
        tracing::info!("egui overlay ready (visible: {visible})");
        Self {
            ctx,
            winit,
            renderer,
            visible,
            console,
            console_view: ConsoleView::default(),
        }
    }

    /// Forward a window event to egui. Whether it should also reach the
    /// game is decided later through [`Overlay::focus`].
    ///
    /// While the cursor is captured egui sees no pointer events: a confined
    /// cursor is hidden but still moves, and may rest over a window.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent, captured: bool) {
        if !self.visible || (captured && is_pointer_event(event)) {
            return;
        }
        let _ = self.winit.on_window_event(window, event);
    }

    /// Keyboard and pointer claims from the last painted frame.
    pub fn focus(&self, captured: bool) -> OverlayFocus {
        focus_for(&self.ctx, self.visible, captured)
    }

    /// Tell egui the pointer left, so nothing stays hovered under a
    /// captured cursor.
    pub fn release_pointer(&mut self) {
        self.winit.egui_input_mut().events.push(egui::Event::PointerGone);
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    #[allow(clippy::too_many_arguments)]
    pub fn paint(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        panel: &OverlayPanel<'_>,
    ) {
        // Drain queued input even while hidden so it does not pile up.
        let raw_input = self.winit.take_egui_input(window);
        if !self.visible {
            return;
        }

        let console = &self.console;
        let console_view = &mut self.console_view;
        let full_output = self.ctx.run(raw_input, |ctx| {
            ui::draw(ctx, panel, console, console_view);
        });
        self.winit
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ketemine_input::{Action, InputState};
    use winit::event::{DeviceId, ElementState, MouseButton};

    /// Lays out a window at the top-left and parks the pointer over it.
    fn hovered_context() -> egui::Context {
        let ctx = egui::Context::default();
        let frame = |ctx: &egui::Context| {
            egui::Window::new("keteMine")
                .default_pos([10.0, 10.0])
                .show(ctx, |ui| {
                    for i in 0..6 {
                        ui.label(format!("line {i}"));
                    }
                });
        };
        let _ = ctx.run(egui::RawInput::default(), frame);
        let moved = egui::RawInput {
            events: vec![egui::Event::PointerMoved(egui::pos2(30.0, 40.0))],
            ..Default::default()
        };
        let _ = ctx.run(moved, frame);
        let _ = ctx.run(egui::RawInput::default(), frame);
        ctx
    }

    #[test]
    fn captured_cursor_over_a_window_still_looks() {
        let ctx = hovered_context();
        assert!(ctx.wants_pointer_input());
        assert!(focus_for(&ctx, true, false).pointer);

        let focus = focus_for(&ctx, true, true);
        assert!(!focus.pointer);

        let mut input = InputState::default();
        input.set_captured(true);
        input.on_mouse_motion(3.0, 0.0, focus);
        input.on_mouse_motion(4.0, -2.0, focus);
        assert_eq!(input.drain_actions(), vec![Action::Look { dx: 4.0, dy: 2.0 }]);
    }

    #[test]
    fn hidden_overlay_claims_nothing() {
        let ctx = hovered_context();
        assert_eq!(focus_for(&ctx, false, false), OverlayFocus::NONE);
    }

    #[test]
    fn only_pointer_events_are_held_back() {
        // SAFETY: the id is only matched on, never handed to the platform.
        let device_id = unsafe { DeviceId::dummy() };
        assert!(is_pointer_event(&WindowEvent::CursorMoved {
            device_id,
            position: (30.0, 40.0).into(),
        }));
        assert!(is_pointer_event(&WindowEvent::MouseInput {
            device_id,
            state: ElementState::Pressed,
            button: MouseButton::Left,
        }));
        assert!(!is_pointer_event(&WindowEvent::Focused(true)));
        assert!(!is_pointer_event(&WindowEvent::CloseRequested));
    }
}
