//! Renderer-agnostic scene data.
//!
//! # Invariants
//! - Renderers read the field and a view snapshot; they never move the camera.
//! - The cube mesh is shared by every instance; only translations differ.

mod field;
mod mesh;
mod renderer;

pub use field::{CubeField, FieldLayout};
pub use mesh::{cube, vertex_colors, CUBE_VERTEX_COUNT};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    concat!("ketemine-render v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
