//! Desktop input mapped to actions: movement keys, mouse look, scroll zoom.
//!
//! # Invariants
//! - States consume [`Action`]s and polled movements, never raw events.
//! - The first cursor sample after (re)capture never produces a look.
//! - Input claimed by the overlay is dropped, checked on every event.

pub mod action;
pub mod bindings;
pub mod mouse;
pub mod state;

pub use action::Action;
pub use bindings::KeyBindings;
pub use mouse::MouseLook;
pub use state::{InputState, OverlayFocus};

pub fn crate_info() -> &'static str {
    concat!("ketemine-input v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
