//! Simulation core: free-fly camera, fixed-timestep stepping, game states.
//!
//! # Invariants
//! - Camera basis vectors are re-derived from yaw/pitch on every rotation.
//! - Simulation advances in fixed steps, independent of the frame rate.
//! - At most one game state is current; all dispatch goes to it.

pub mod camera;
pub mod state;
pub mod timestep;

pub use camera::{Camera, CameraMovement, CameraSettings};
pub use state::{FrameReport, GameLoop, GameState, StateMachine};
pub use timestep::{FixedTimestep, TimestepError, FIXED_DT, MAX_FRAME_TIME};

pub fn crate_info() -> &'static str {
    concat!("ketemine-kernel v", env!("CARGO_PKG_VERSION"))
}
