/// Default simulation step: 60 updates per second.
pub const FIXED_DT: f64 = 1.0 / 60.0;
/// Longest frame time fed into the accumulator, in seconds.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Errors from configuring a timestep.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimestepError {
    #[error("fixed step must be a positive, finite number of seconds (got {0})")]
    InvalidStep(f64),
    #[error("maximum frame time must be at least one fixed step (got {max}, step {step})")]
    InvalidMaxFrameTime { max: f64, step: f64 },
}

/// Fixed-timestep accumulator.
///
/// Frame times are clamped to `max_frame_time` before they are accumulated,
/// so a stall (breakpoint, window drag, OS pause) costs at most
/// `max_frame_time / fixed_dt` updates instead of spiralling.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    fixed_dt: f64,
    max_frame_time: f64,
    accumulator: f64,
    simulated: f64,
    elapsed: f64,
    steps: u64,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self {
            fixed_dt: FIXED_DT,
            max_frame_time: MAX_FRAME_TIME,
            accumulator: 0.0,
            simulated: 0.0,
            elapsed: 0.0,
            steps: 0,
        }
    }
}

impl FixedTimestep {
    pub fn new(fixed_dt: f64) -> Result<Self, TimestepError> {
        Self::with_max_frame_time(fixed_dt, MAX_FRAME_TIME)
    }

    pub fn with_max_frame_time(fixed_dt: f64, max_frame_time: f64) -> Result<Self, TimestepError> {
        if !fixed_dt.is_finite() || fixed_dt <= 0.0 {
            return Err(TimestepError::InvalidStep(fixed_dt));
        }
        if !max_frame_time.is_finite() || max_frame_time < fixed_dt {
            return Err(TimestepError::InvalidMaxFrameTime {
                max: max_frame_time,
                step: fixed_dt,
            });
        }
        Ok(Self {
            fixed_dt,
            max_frame_time,
            ..Self::default()
        })
    }

    /// Feed one frame's wall time and return how many fixed updates are due.
    ///
    /// Negative or NaN frame times count as zero.
    pub fn advance(&mut self, frame_time: f64) -> u32 {
        let frame_time = self.clamp_frame_time(frame_time);
        self.elapsed += frame_time;
        self.accumulator += frame_time;

        let mut due = 0;
        while self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.simulated += self.fixed_dt;
            due += 1;
        }
        self.steps += u64::from(due);
        due
    }

    /// Clamp a raw frame time the way `advance` does.
    pub fn clamp_frame_time(&self, frame_time: f64) -> f64 {
        if frame_time.is_nan() {
            return 0.0;
        }
        frame_time.clamp(0.0, self.max_frame_time)
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    pub fn max_frame_time(&self) -> f64 {
        self.max_frame_time
    }

    /// Leftover time not yet consumed by an update.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Fraction of a step sitting in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.fixed_dt
    }

    /// Total time covered by fixed updates so far.
    pub fn simulated_time(&self) -> f64 {
        self.simulated
    }

    /// Total (clamped) wall time fed in so far.
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed
    }

    pub fn total_steps(&self) -> u64 {
        self.steps
    }
}
