use crate::timestep::FixedTimestep;

/// One mode of the running application.
///
/// `C` is the application context handed to every call (window, GPU, input).
/// States never reach for globals; anything they need comes through `ctx`.
pub trait GameState<C> {
    /// Human-readable name for logs and the overlay.
    fn name(&self) -> &'static str;

    /// One-time setup, run once per transition into this state.
    fn enter(&mut self, ctx: &mut C);

    /// Cleanup, run after this state has been replaced.
    fn exit(&mut self, _ctx: &mut C) {}

    /// Once per rendered frame, before any fixed update.
    fn handle_input(&mut self, ctx: &mut C);

    /// Once per fixed step.
    fn update(&mut self, ctx: &mut C, dt: f64);

    /// Once per rendered frame, after the fixed updates.
    fn draw(&mut self, ctx: &mut C);

    /// The drawable area changed size.
    fn resize(&mut self, _ctx: &mut C, _width: u32, _height: u32) {}
}

/// Holds at most one current state and dispatches to it.
pub struct StateMachine<C> {
    current: Option<Box<dyn GameState<C>>>,
    transitions: u64,
}

impl<C> Default for StateMachine<C> {
    fn default() -> Self {
        Self {
            current: None,
            transitions: 0,
        }
    }
}

impl<C> StateMachine<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `next` and make it current.
    ///
    /// The outgoing state is only exited once `next` has finished entering,
    /// so its resources stay valid for the whole transition.
    pub fn go_to(&mut self, mut next: Box<dyn GameState<C>>, ctx: &mut C) {
        tracing::info!(
            from = self.current_name().unwrap_or("<none>"),
            to = next.name(),
            "state transition"
        );
        next.enter(ctx);
        if let Some(mut previous) = self.current.replace(next) {
            previous.exit(ctx);
        }
        self.transitions += 1;
    }

    pub fn current_name(&self) -> Option<&'static str> {
        self.current.as_ref().map(|s| s.name())
    }

    pub fn has_state(&self) -> bool {
        self.current.is_some()
    }

    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn handle_input(&mut self, ctx: &mut C) {
        if let Some(state) = self.current.as_mut() {
            state.handle_input(ctx);
        }
    }

    pub fn update(&mut self, ctx: &mut C, dt: f64) {
        if let Some(state) = self.current.as_mut() {
            state.update(ctx, dt);
        }
    }

    pub fn draw(&mut self, ctx: &mut C) {
        if let Some(state) = self.current.as_mut() {
            state.draw(ctx);
        }
    }

    pub fn resize(&mut self, ctx: &mut C, width: u32, height: u32) {
        if let Some(state) = self.current.as_mut() {
            state.resize(ctx, width, height);
        }
    }
}

/// What one call to [`GameLoop::frame`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frame time after clamping, in seconds.
    pub frame_time: f64,
    pub updates: u32,
    /// Interpolation factor left in the accumulator.
    pub alpha: f64,
}

/// Fixed-timestep driver around a [`StateMachine`].
///
/// Time is passed in as seconds on a monotonic clock so the loop can be
/// driven by `Instant` in the app and by plain numbers in tests.
pub struct GameLoop<C> {
    states: StateMachine<C>,
    timestep: FixedTimestep,
    last_time: Option<f64>,
}

impl<C> GameLoop<C> {
    pub fn new(timestep: FixedTimestep) -> Self {
        Self {
            states: StateMachine::new(),
            timestep,
            last_time: None,
        }
    }

    pub fn states(&self) -> &StateMachine<C> {
        &self.states
    }

    pub fn states_mut(&mut self) -> &mut StateMachine<C> {
        &mut self.states
    }

    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }

    pub fn go_to(&mut self, next: Box<dyn GameState<C>>, ctx: &mut C) {
        self.states.go_to(next, ctx);
    }

    /// Run one frame: input, due fixed updates, then a single draw.
    ///
    /// The first frame only establishes the time baseline.
    pub fn frame(&mut self, ctx: &mut C, now: f64) -> FrameReport {
        self.states.handle_input(ctx);

        let raw = self.last_time.map_or(0.0, |last| now - last);
        self.last_time = Some(now);
        let frame_time = self.timestep.clamp_frame_time(raw);

        let updates = self.timestep.advance(frame_time);
        let dt = self.timestep.fixed_dt();
        for _ in 0..updates {
            self.states.update(ctx, dt);
        }

        self.states.draw(ctx);

        FrameReport {
            frame_time,
            updates,
            alpha: self.timestep.alpha(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Journal {
        calls: Vec<String>,
        resources: Vec<&'static str>,
    }

    struct Recording {
        name: &'static str,
    }

    impl GameState<Journal> for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn enter(&mut self, ctx: &mut Journal) {
            ctx.calls.push(format!("{}:enter", self.name));
            ctx.resources.push(self.name);
        }

        fn exit(&mut self, ctx: &mut Journal) {
            // The incoming state has already set up by the time we leave.
            ctx.calls.push(format!("{}:exit({})", self.name, ctx.resources.len()));
            ctx.resources.retain(|r| *r != self.name);
        }

        fn handle_input(&mut self, ctx: &mut Journal) {
            ctx.calls.push(format!("{}:input", self.name));
        }

        fn update(&mut self, ctx: &mut Journal, _dt: f64) {
            ctx.calls.push(format!("{}:update", self.name));
        }

        fn draw(&mut self, ctx: &mut Journal) {
            ctx.calls.push(format!("{}:draw", self.name));
        }

        fn resize(&mut self, ctx: &mut Journal, width: u32, height: u32) {
            ctx.calls.push(format!("{}:resize({width}x{height})", self.name));
        }
    }

    fn boxed(name: &'static str) -> Box<dyn GameState<Journal>> {
        Box::new(Recording { name })
    }

    #[test]
    fn empty_machine_ignores_dispatch() {
        let mut journal = Journal::default();
        let mut machine = StateMachine::new();
        machine.handle_input(&mut journal);
        machine.update(&mut journal, 0.1);
        machine.draw(&mut journal);
        assert!(journal.calls.is_empty());
        assert!(!machine.has_state());
        assert_eq!(machine.current_name(), None);
    }

    #[test]
    fn go_to_enters_once_and_becomes_current() {
        let mut journal = Journal::default();
        let mut machine = StateMachine::new();
        machine.go_to(boxed("playing"), &mut journal);
        assert_eq!(journal.calls, vec!["playing:enter"]);
        assert_eq!(machine.current_name(), Some("playing"));
        assert_eq!(machine.transitions(), 1);
    }

    #[test]
    fn transition_exits_previous_after_entering_next() {
        let mut journal = Journal::default();
        let mut machine = StateMachine::new();
        machine.go_to(boxed("menu"), &mut journal);
        machine.go_to(boxed("playing"), &mut journal);
        assert_eq!(
            journal.calls,
            vec!["menu:enter", "playing:enter", "menu:exit(2)"]
        );
        assert_eq!(journal.resources, vec!["playing"]);
    }

    #[test]
    fn dispatch_reaches_only_current_state() {
        let mut journal = Journal::default();
        let mut machine = StateMachine::new();
        machine.go_to(boxed("menu"), &mut journal);
        machine.go_to(boxed("playing"), &mut journal);
        journal.calls.clear();

        machine.handle_input(&mut journal);
        machine.update(&mut journal, 0.5);
        machine.draw(&mut journal);
        machine.resize(&mut journal, 640, 480);
        assert_eq!(
            journal.calls,
            vec![
                "playing:input",
                "playing:update",
                "playing:draw",
                "playing:resize(640x480)"
            ]
        );
    }

    #[test]
    fn frame_runs_input_updates_then_one_draw() {
        let mut journal = Journal::default();
        let mut game = GameLoop::new(FixedTimestep::new(0.01).unwrap());
        game.go_to(boxed("playing"), &mut journal);
        journal.calls.clear();

        let first = game.frame(&mut journal, 100.0);
        assert_eq!(first.updates, 0);
        assert_eq!(first.frame_time, 0.0);

        journal.calls.clear();
        let report = game.frame(&mut journal, 100.035);
        assert_eq!(report.updates, 3);
        assert_eq!(
            journal.calls,
            vec![
                "playing:input",
                "playing:update",
                "playing:update",
                "playing:update",
                "playing:draw"
            ]
        );
    }

    #[test]
    fn frame_clamps_long_stalls() {
        let mut journal = Journal::default();
        let mut game = GameLoop::new(FixedTimestep::default());
        game.go_to(boxed("playing"), &mut journal);
        game.frame(&mut journal, 0.0);
        let report = game.frame(&mut journal, 5.0);
        assert_eq!(report.frame_time, 0.25);
        assert!(report.updates <= 15);
        let draws = journal.calls.iter().filter(|c| c.ends_with(":draw")).count();
        assert_eq!(draws, 2);
    }

    #[test]
    fn frame_without_state_still_advances_time() {
        let mut journal = Journal::default();
        let mut game: GameLoop<Journal> = GameLoop::new(FixedTimestep::default());
        game.frame(&mut journal, 1.0);
        let report = game.frame(&mut journal, 1.1);
        assert!(report.updates >= 5);
        assert!(journal.calls.is_empty());
        assert!(game.timestep().simulated_time() > 0.0);
    }
}
