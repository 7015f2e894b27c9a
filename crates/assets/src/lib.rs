//! Resource loading: shader manifest, shader sources, compiled program library.
//!
//! Shader programs are looked up by name, never by raw file path. A program
//! that fails to load or compile is logged and left out of the library; the
//! rest keep working.
//!
//! # Layout
//! Paths in the manifest are relative to the resources root
//! (`resources/` by default), e.g. `shaders/test.vert.wgsl`.

mod manifest;
mod shader;

pub use manifest::{ProgramSpec, ShaderManifest, MANIFEST_PATH};
pub use shader::{
    load_source, LoadedProgram, ProgramSources, ShaderCompiler, ShaderLibrary, ShaderStage,
    FRAGMENT_ENTRY, VERTEX_ENTRY,
};

use std::path::PathBuf;

/// Errors from resource operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("could not open file \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader file \"{}\" is empty", path.display())]
    EmptySource { path: PathBuf },
    #[error("{stage} shader of program \"{program}\" failed to compile: {message}")]
    Compile {
        program: String,
        stage: ShaderStage,
        message: String,
    },
    #[error("program \"{program}\" failed to link: {message}")]
    Link { program: String, message: String },
    #[error("shader program \"{0}\" was never loaded")]
    ProgramNotFound(String),
    #[error("invalid shader manifest \"{}\": {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn crate_info() -> &'static str {
    concat!("ketemine-assets v", env!("CARGO_PKG_VERSION"))
}
