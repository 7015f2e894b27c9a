//! wgpu render backend.
//!
//! Opens the device, compiles manifest shader programs and draws the
//! instanced cube field.
//!
//! # Invariants
//! - Shader and pipeline failures surface as `AssetError`, never as panics.
//! - Uncaptured device errors are logged, not fatal.
//! - The renderer only reads the camera through the mvp it is handed.

mod compiler;
mod context;
mod cube_field;
mod depth;
mod diagnostics;

pub use compiler::{WgpuProgram, WgpuShaderCompiler};
pub use context::{GpuContext, GpuError};
pub use cube_field::{clear_pass, CubeFieldRenderer, CLEAR_COLOR};
pub use depth::{DepthTexture, DEPTH_FORMAT};
pub use diagnostics::{install_error_logger, log_adapter_info, AdapterSummary};

pub fn crate_info() -> &'static str {
    concat!("ketemine-render-wgpu v", env!("CARGO_PKG_VERSION"))
}
