use egui::{Color32, Context, RichText};
use ketemine_assets::ShaderLibrary;
use ketemine_render_wgpu::{AdapterSummary, WgpuProgram};
use ketemine_tools::{CameraSummary, FrameStats, LogConsole, Severity};

/// Per-frame facts the active state hands to the overlay.
#[derive(Debug, Clone)]
pub struct StateReadout {
    pub name: &'static str,
    pub camera: CameraSummary,
    /// Program drawing the cube field, if it linked.
    pub program: Option<String>,
    pub instances: u32,
    pub captured: bool,
}

/// Everything the overlay shows, borrowed for one frame.
pub struct OverlayPanel<'a> {
    pub state: &'a StateReadout,
    pub stats: &'a FrameStats,
    pub adapter: &'a AdapterSummary,
    pub shaders: &'a ShaderLibrary<WgpuProgram>,
}

/// Widget state of the log console window.
#[derive(Debug, Clone)]
pub struct ConsoleView {
    pub filter: String,
    pub auto_scroll: bool,
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self {
            filter: String::new(),
            auto_scroll: true,
        }
    }
}

const WARNING_COLOR: Color32 = Color32::from_rgb(230, 190, 60);
const ERROR_COLOR: Color32 = Color32::from_rgb(230, 80, 80);

fn line_color(severity: Severity) -> Option<Color32> {
    match severity {
        Severity::Info => None,
        Severity::Warning => Some(WARNING_COLOR),
        Severity::Error => Some(ERROR_COLOR),
    }
}

pub fn draw(ctx: &Context, panel: &OverlayPanel<'_>, console: &LogConsole, view: &mut ConsoleView) {
    main_window(ctx, panel);
    console_window(ctx, console, view);
}

fn main_window(ctx: &Context, panel: &OverlayPanel<'_>) {
    egui::Window::new("keteMine")
        .default_pos([10.0, 10.0])
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.label(panel.stats.to_string());
            ui.label(format!("State: {}", panel.state.name));
            ui.separator();

            ui.heading("Camera");
            let cam = &panel.state.camera;
            ui.label(format!(
                "Position: ({:.2}, {:.2}, {:.2})",
                cam.position.x, cam.position.y, cam.position.z
            ));
            ui.label(format!(
                "Front: ({:.2}, {:.2}, {:.2})",
                cam.front.x, cam.front.y, cam.front.z
            ));
            ui.label(format!("Yaw {:.1}  Pitch {:.1}  FOV {:.1}", cam.yaw, cam.pitch, cam.fov));
            ui.label(if panel.state.captured {
                "Mouse: captured"
            } else {
                "Mouse: free"
            });
            ui.separator();

            ui.heading("Shaders");
            for name in panel.shaders.names() {
                let active = panel.state.program.as_deref() == Some(name);
                let label = if active {
                    format!("{name} (cube field, {} instances)", panel.state.instances)
                } else {
                    name.to_string()
                };
                ui.label(label);
            }
            for (name, message) in panel.shaders.failures() {
                ui.colored_label(ERROR_COLOR, format!("{name}: failed"))
                    .on_hover_text(message.as_str());
            }
            if panel.state.program.is_none() {
                ui.label(RichText::new("Cube field disabled: no program").italics());
            }
            ui.separator();

            ui.collapsing("GPU", |ui| {
                for line in panel.adapter.to_string().lines() {
                    ui.label(line);
                }
            });
            ui.separator();
            ui.small("F1: Toggle GUI | Tab/RMB: Capture mouse | WASD: Move | Wheel: Zoom | Esc: Quit");
        });
}

fn console_window(ctx: &Context, console: &LogConsole, view: &mut ConsoleView) {
    egui::Window::new("Log")
        .default_pos([10.0, 420.0])
        .default_size([520.0, 260.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    console.clear();
                }
                if ui.button("Copy").clicked() {
                    ui.ctx().copy_text(console.text(&view.filter));
                }
                ui.checkbox(&mut view.auto_scroll, "Auto-scroll");
                ui.label("Filter:");
                ui.text_edit_singleline(&mut view.filter);
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(view.auto_scroll)
                .show(ui, |ui| {
                    for line in console.filtered(&view.filter) {
                        let text = RichText::new(line.text).monospace();
                        match line_color(line.severity) {
                            Some(color) => ui.label(text.color(color)),
                            None => ui.label(text),
                        };
                    }
                });
        });
}
