use ketemine_assets::{ProgramSources, ShaderLibrary, ShaderManifest};
use ketemine_render::{CubeField, FieldLayout};
use ketemine_render_wgpu::{CubeFieldRenderer, GpuContext, WgpuShaderCompiler};
use std::fmt;
use std::path::Path;

/// Format pipelines are linked against when there is no window.
const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Outcome for one manifest program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramReport {
    pub name: String,
    pub error: Option<String>,
}

impl ProgramReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for ProgramReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "  ok      {}", self.name),
            Some(e) => write!(f, "  FAILED  {}: {e}", self.name),
        }
    }
}

/// Check that every program's files exist and are not empty.
pub fn check_sources(manifest: &ShaderManifest, root: &Path) -> Vec<ProgramReport> {
    manifest
        .programs
        .iter()
        .map(|spec| ProgramReport {
            name: spec.name.clone(),
            error: ProgramSources::read(spec, root).err().map(|e| e.to_string()),
        })
        .collect()
}

/// Compile every program on `gpu` and link it into the cube field pipeline.
pub fn check_on_device(gpu: &GpuContext, manifest: &ShaderManifest, root: &Path) -> Vec<ProgramReport> {
    let library = ShaderLibrary::load_all(manifest, root, &mut WgpuShaderCompiler::new(&gpu.device));
    let field = CubeField::generate(FieldLayout::default(), Some(0));
    manifest
        .programs
        .iter()
        .map(|spec| {
            let error = match library.get(&spec.name) {
                Ok(program) => CubeFieldRenderer::new(&gpu.device, OFFSCREEN_FORMAT, program, &field)
                    .err()
                    .map(|e| e.to_string()),
                Err(_) => library
                    .failures()
                    .get(&spec.name)
                    .cloned()
                    .or_else(|| Some(format!("program `{}` was not built", spec.name))),
            };
            ProgramReport {
                name: spec.name.clone(),
                error,
            }
        })
        .collect()
}
