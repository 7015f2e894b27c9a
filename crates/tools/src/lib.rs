//! Developer tooling behind the debug overlay.
//!
//! # Invariants
//! - The log console is bounded; the oldest lines go first.
//! - Tools only read engine state.

mod console;
mod inspector;
mod layer;
mod stats;

pub use console::{LogConsole, LogLine, Severity, DEFAULT_CAPACITY, ERROR_PREFIX, WARNING_PREFIX};
pub use inspector::{CameraInspector, CameraSummary};
pub use layer::ConsoleLayer;
pub use stats::FrameStats;

pub fn crate_info() -> &'static str {
    concat!("ketemine-tools v", env!("CARGO_PKG_VERSION"))
}
