use crate::AssetError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest location relative to the resources root.
pub const MANIFEST_PATH: &str = "shaders/shaders.json";

/// One shader program: a vertex and a fragment source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSpec {
    pub name: String,
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl ProgramSpec {
    pub fn new(name: impl Into<String>, vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// The list of shader programs to build at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderManifest {
    pub programs: Vec<ProgramSpec>,
}

impl Default for ShaderManifest {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ShaderManifest {
    /// Programs shipped in `resources/shaders`.
    pub fn builtin() -> Self {
        Self {
            programs: vec![
                ProgramSpec::new("basic", "shaders/basic.vert.wgsl", "shaders/basic.frag.wgsl"),
                ProgramSpec::new(
                    "interpolation",
                    "shaders/basic.vert.wgsl",
                    "shaders/interpolation.frag.wgsl",
                ),
                ProgramSpec::new("test", "shaders/test.vert.wgsl", "shaders/test.frag.wgsl"),
            ],
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| {
            AssetError::Manifest {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Read `<root>/shaders/shaders.json`, falling back to [`Self::builtin`]
    /// when it is missing or malformed.
    pub fn load_or_builtin(root: impl AsRef<Path>) -> Self {
        let path = root.as_ref().join(MANIFEST_PATH);
        match Self::load(&path) {
            Ok(manifest) => {
                tracing::debug!(
                    "loaded shader manifest {} ({} programs)",
                    path.display(),
                    manifest.programs.len()
                );
                manifest
            }
            Err(e) => {
                tracing::warn!("{e}; using built-in shader manifest");
                Self::builtin()
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ProgramSpec> {
        self.programs.iter().find(|p| p.name == name)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| AssetError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::create(path).map_err(io_err)?;
        serde_json::to_writer_pretty(file, self).map_err(|source| AssetError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lists_three_programs() {
        let m = ShaderManifest::builtin();
        let names: Vec<&str> = m.programs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["basic", "interpolation", "test"]);
        assert_eq!(
            m.get("interpolation").unwrap().vertex,
            PathBuf::from("shaders/basic.vert.wgsl")
        );
        assert!(m.get("missing").is_none());
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let manifest = ShaderManifest {
            programs: vec![ProgramSpec::new("only", "a.vert.wgsl", "a.frag.wgsl")],
        };
        manifest.save(tmp.path()).unwrap();
        assert_eq!(ShaderManifest::load(tmp.path()).unwrap(), manifest);
    }

    #[test]
    fn malformed_manifest_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ \"programs\": 3 }").unwrap();
        let err = ShaderManifest::load(&path).unwrap_err();
        assert!(matches!(err, AssetError::Manifest { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn missing_manifest_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ShaderManifest::load_or_builtin(dir.path()), ShaderManifest::builtin());
    }

    #[test]
    fn manifest_on_disk_wins_over_builtin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("shaders")).unwrap();
        let custom = ShaderManifest {
            programs: vec![ProgramSpec::new("solo", "shaders/s.vert.wgsl", "shaders/s.frag.wgsl")],
        };
        custom.save(dir.path().join(MANIFEST_PATH)).unwrap();
        assert_eq!(ShaderManifest::load_or_builtin(dir.path()), custom);
    }
}
