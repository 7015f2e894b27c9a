use crate::manifest::{ProgramSpec, ShaderManifest};
use crate::AssetError;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Entry point every vertex shader file must define.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Entry point every fragment shader file must define.
pub const FRAGMENT_ENTRY: &str = "fs_main";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Source text of one program, with the paths it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSources {
    pub name: String,
    pub vertex_path: PathBuf,
    pub vertex: String,
    pub fragment_path: PathBuf,
    pub fragment: String,
}

impl ProgramSources {
    /// Read both stages of `spec` from under `root`.
    pub fn read(spec: &ProgramSpec, root: &Path) -> Result<Self, AssetError> {
        let vertex_path = root.join(&spec.vertex);
        let fragment_path = root.join(&spec.fragment);
        let vertex = load_source(&vertex_path)?;
        let fragment = load_source(&fragment_path)?;
        Ok(Self {
            name: spec.name.clone(),
            vertex_path,
            vertex,
            fragment_path,
            fragment,
        })
    }

    pub fn path(&self, stage: ShaderStage) -> &Path {
        match stage {
            ShaderStage::Vertex => &self.vertex_path,
            ShaderStage::Fragment => &self.fragment_path,
        }
    }

    pub fn source(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

/// Read a shader source file. Empty files are rejected.
pub fn load_source(path: impl AsRef<Path>) -> Result<String, AssetError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Err(AssetError::EmptySource {
            path: path.to_path_buf(),
        });
    }
    Ok(text)
}

/// Turns program sources into a backend handle.
///
/// The library never talks to a graphics API itself; the render backend
/// supplies a compiler (and tests supply a fake one).
pub trait ShaderCompiler {
    type Program;

    fn compile(&mut self, sources: &ProgramSources) -> Result<Self::Program, AssetError>;
}

/// A compiled program together with the sources it came from.
#[derive(Debug)]
pub struct LoadedProgram<P> {
    pub program: P,
    pub sources: ProgramSources,
}

/// Name → compiled shader program.
#[derive(Debug)]
pub struct ShaderLibrary<P> {
    programs: BTreeMap<String, LoadedProgram<P>>,
    failures: BTreeMap<String, String>,
}

impl<P> Default for ShaderLibrary<P> {
    fn default() -> Self {
        Self {
            programs: BTreeMap::new(),
            failures: BTreeMap::new(),
        }
    }
}

impl<P> ShaderLibrary<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every program in `manifest`. Failures are logged and recorded,
    /// and loading carries on with the next program.
    pub fn load_all<C>(manifest: &ShaderManifest, root: impl AsRef<Path>, compiler: &mut C) -> Self
    where
        C: ShaderCompiler<Program = P>,
    {
        let root = root.as_ref();
        let mut library = Self::new();
        for spec in &manifest.programs {
            if let Err(e) = library.create_program(spec, root, compiler) {
                tracing::error!("{e}");
            }
        }
        tracing::info!(
            "{} of {} shader programs ready",
            library.len(),
            manifest.programs.len()
        );
        library
    }

    /// Read, compile and register one program. On failure nothing is
    /// registered under that name and the error is remembered.
    pub fn create_program<C>(&mut self, spec: &ProgramSpec, root: &Path, compiler: &mut C) -> Result<(), AssetError>
    where
        C: ShaderCompiler<Program = P>,
    {
        let result = ProgramSources::read(spec, root).and_then(|sources| {
            let program = compiler.compile(&sources)?;
            Ok(LoadedProgram { program, sources })
        });
        match result {
            Ok(loaded) => {
                // Linking happens when the backend builds a pipeline from it.
                tracing::info!("Shader program \"{}\" compiled.", spec.name);
                self.failures.remove(&spec.name);
                self.programs.insert(spec.name.clone(), loaded);
                Ok(())
            }
            Err(e) => {
                self.programs.remove(&spec.name);
                self.failures.insert(spec.name.clone(), e.to_string());
                Err(e)
            }
        }
    }

    /// Look up a program by name.
    pub fn get(&self, name: &str) -> Result<&P, AssetError> {
        self.programs
            .get(name)
            .map(|loaded| &loaded.program)
            .ok_or_else(|| AssetError::ProgramNotFound(name.to_string()))
    }

    pub fn get_loaded(&self, name: &str) -> Option<&LoadedProgram<P>> {
        self.programs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.programs.keys().map(String::as_str)
    }

    /// Programs that failed, with their error messages.
    pub fn failures(&self) -> &BTreeMap<String, String> {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
