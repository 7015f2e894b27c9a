use ketemine_kernel::FrameReport;
use std::fmt;

/// Smoothed frame-rate and update-rate readout.
#[derive(Debug, Clone)]
pub struct FrameStats {
    /// Weight of the newest sample in the running averages.
    smoothing: f64,
    frame_time: f64,
    updates_per_frame: f64,
    frames: u64,
    updates: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl FrameStats {
    /// `smoothing` is clamped into `(0, 1]`.
    pub fn new(smoothing: f64) -> Self {
        Self {
            smoothing: smoothing.clamp(f64::EPSILON, 1.0),
            frame_time: 0.0,
            updates_per_frame: 0.0,
            frames: 0,
            updates: 0,
        }
    }

    pub fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        self.updates += u64::from(report.updates);
        let updates = f64::from(report.updates);
        if self.frames == 1 {
            self.frame_time = report.frame_time;
            self.updates_per_frame = updates;
            return;
        }
        let k = self.smoothing;
        self.frame_time += (report.frame_time - self.frame_time) * k;
        self.updates_per_frame += (updates - self.updates_per_frame) * k;
    }

    pub fn fps(&self) -> f64 {
        if self.frame_time > 0.0 {
            1.0 / self.frame_time
        } else {
            0.0
        }
    }

    /// Smoothed frame time in milliseconds.
    pub fn frame_ms(&self) -> f64 {
        self.frame_time * 1000.0
    }

    pub fn updates_per_frame(&self) -> f64 {
        self.updates_per_frame
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn total_updates(&self) -> u64 {
        self.updates
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} fps ({:.2} ms) | {:.2} updates/frame",
            self.fps(),
            self.frame_ms(),
            self.updates_per_frame
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(frame_time: f64, updates: u32) -> FrameReport {
        FrameReport {
            frame_time,
            updates,
            alpha: 0.0,
        }
    }

    #[test]
    fn empty_stats_read_zero() {
        let stats = FrameStats::default();
        assert_eq!(stats.fps(), 0.0);
        assert_eq!(stats.frames(), 0);
    }

    #[test]
    fn steady_frames_converge() {
        let mut stats = FrameStats::default();
        for _ in 0..200 {
            stats.record(&report(0.02, 1));
        }
        assert!((stats.fps() - 50.0).abs() < 0.01);
        assert!((stats.updates_per_frame() - 1.0).abs() < 1e-9);
        assert_eq!(stats.total_updates(), 200);
    }

    #[test]
    fn spike_is_smoothed() {
        let mut stats = FrameStats::new(0.1);
        stats.record(&report(0.01, 1));
        stats.record(&report(0.25, 15));
        assert!(stats.frame_ms() < 50.0);
        assert!(stats.updates_per_frame() < 3.0);
    }

    #[test]
    fn display_is_one_line() {
        let mut stats = FrameStats::new(1.0);
        stats.record(&report(0.02, 1));
        assert_eq!(stats.to_string(), "50 fps (20.00 ms) | 1.00 updates/frame");
    }
}
