use glam::Vec3;
use ketemine_input::Action;
use ketemine_kernel::{Camera, CameraMovement, FixedTimestep, GameLoop, GameState};
use ketemine_render::{CubeField, DebugTextRenderer, RenderView, Renderer};

/// One scripted action, applied on every fixed update in `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub action: Action,
}

impl Segment {
    pub fn new(start: f64, end: f64, action: Action) -> Self {
        Self { start, end, action }
    }

    fn active_at(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }
}

/// Fly in, pan right, strafe, then zoom in.
pub fn default_script() -> Vec<Segment> {
    vec![
        Segment::new(0.0, 1.0, Action::Move(CameraMovement::Forward)),
        Segment::new(1.0, 2.0, Action::Look { dx: 5.0, dy: 0.0 }),
        Segment::new(2.0, 3.0, Action::Move(CameraMovement::Right)),
        Segment::new(3.0, 4.0, Action::Zoom(0.25)),
    ]
}

/// Context of a headless run: the field and collected text frames.
pub struct Simulation {
    pub field: CubeField,
    pub renderer: DebugTextRenderer,
    /// Render every n-th frame; 0 renders none.
    pub report_every: u64,
    pub frames: u64,
    pub updates: u64,
    pub reports: Vec<String>,
    pub last_view: Option<RenderView>,
}

impl Simulation {
    pub fn new(field: CubeField, report_every: u64) -> Self {
        Self {
            field,
            renderer: DebugTextRenderer::new(),
            report_every,
            frames: 0,
            updates: 0,
            reports: Vec::new(),
            last_view: None,
        }
    }
}

/// Game state that replays a script instead of reading devices.
pub struct FlightState {
    camera: Camera,
    script: Vec<Segment>,
    time: f64,
}

impl FlightState {
    pub fn new(camera: Camera, script: Vec<Segment>) -> Self {
        Self {
            camera,
            script,
            time: 0.0,
        }
    }

    /// Starting pose of the desktop app.
    pub fn start_camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0)
    }

    fn apply(&mut self, action: Action, dt: f32) {
        match action {
            Action::Move(direction) => self.camera.move_in(direction, dt),
            Action::Look { dx, dy } => self.camera.look(dx, dy, true),
            Action::Zoom(lines) => self.camera.zoom(lines),
            Action::ToggleOverlay | Action::ToggleCapture | Action::Quit => {}
        }
    }
}

impl GameState<Simulation> for FlightState {
    fn name(&self) -> &'static str {
        "flight"
    }

    fn enter(&mut self, sim: &mut Simulation) {
        tracing::info!(
            segments = self.script.len(),
            instances = sim.field.instance_count(),
            "scripted flight starting"
        );
    }

    fn handle_input(&mut self, _sim: &mut Simulation) {}

    fn update(&mut self, sim: &mut Simulation, dt: f64) {
        let active: Vec<Action> = self
            .script
            .iter()
            .filter(|s| s.active_at(self.time))
            .map(|s| s.action)
            .collect();
        for action in active {
            self.apply(action, dt as f32);
        }
        self.time += dt;
        sim.updates += 1;
    }

    fn draw(&mut self, sim: &mut Simulation) {
        sim.frames += 1;
        let view = RenderView::from_camera(&self.camera);
        if sim.report_every > 0 && sim.frames % sim.report_every == 0 {
            let text = sim.renderer.render(&sim.field, &view);
            sim.reports.push(format!("--- frame {} (t={:.2}s) ---\n{text}", sim.frames, self.time));
        }
        sim.last_view = Some(view);
    }
}

/// Drive `frames` frames at a steady `fps` through a fixed-step loop.
pub fn run(sim: &mut Simulation, state: FlightState, frames: u64, fps: f64) -> GameLoop<Simulation> {
    let mut game = GameLoop::new(FixedTimestep::default());
    game.go_to(Box::new(state), sim);
    let frame_time = 1.0 / fps.max(1.0);
    // Frame zero only sets the time baseline.
    for i in 0..=frames {
        game.frame(sim, i as f64 * frame_time);
    }
    game
}

#[cfg(test)]
mod tests {
    use super::*;
    use ketemine_render::FieldLayout;

    fn sim() -> Simulation {
        Simulation::new(CubeField::generate(FieldLayout::default(), Some(9)), 0)
    }

    #[test]
    fn one_second_forward_moves_speed_units() {
        let mut sim = sim();
        let script = vec![Segment::new(0.0, 1.0, Action::Move(CameraMovement::Forward))];
        run(&mut sim, FlightState::new(FlightState::start_camera(), script), 120, 60.0);
        let view = sim.last_view.unwrap();
        assert!((view.eye.z - 0.5).abs() < 0.05, "eye z = {}", view.eye.z);
        assert!(view.eye.x.abs() < 1e-4);
    }

    #[test]
    fn steady_frames_give_one_update_each() {
        let mut sim = sim();
        let game = run(&mut sim, FlightState::new(FlightState::start_camera(), vec![]), 60, 60.0);
        assert_eq!(sim.frames, 61);
        assert!((59..=60).contains(&sim.updates), "updates = {}", sim.updates);
        assert!((game.timestep().simulated_time() - 1.0).abs() <= game.timestep().fixed_dt());
    }

    #[test]
    fn slow_frames_catch_up_with_several_updates() {
        let mut sim = sim();
        run(&mut sim, FlightState::new(FlightState::start_camera(), vec![]), 10, 10.0);
        assert_eq!(sim.frames, 11);
        assert!((59..=60).contains(&sim.updates), "updates = {}", sim.updates);
    }

    #[test]
    fn default_script_pans_and_zooms() {
        let mut sim = sim();
        run(&mut sim, FlightState::new(FlightState::start_camera(), default_script()), 300, 60.0);
        let view = sim.last_view.unwrap();
        // Zoomed in from 45 degrees, and no longer facing straight down -Z.
        assert!(view.fov_degrees < 45.0);
        assert!(view.front.x > 0.1);
    }

    #[test]
    fn reports_follow_the_interval() {
        let mut sim = Simulation::new(CubeField::generate(FieldLayout::default(), Some(9)), 30);
        run(&mut sim, FlightState::new(FlightState::start_camera(), vec![]), 89, 60.0);
        assert_eq!(sim.reports.len(), 3);
        assert!(sim.reports[0].starts_with("--- frame 30"));
        assert!(sim.reports[0].contains("1000 instances"));
    }
}
