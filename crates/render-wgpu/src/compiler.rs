use ketemine_assets::{AssetError, ProgramSources, ShaderCompiler, ShaderStage};

/// Both stages of a manifest program as wgpu modules.
///
/// wgpu links stages when a pipeline is built, so this is only half of a
/// linked program; [`CubeFieldRenderer`](crate::CubeFieldRenderer) finishes
/// the job and reports link failures.
#[derive(Debug, Clone)]
pub struct WgpuProgram {
    pub name: String,
    pub vertex: wgpu::ShaderModule,
    pub fragment: wgpu::ShaderModule,
}

/// Compiles WGSL sources on a device, catching validation errors in an
/// error scope so a bad shader never reaches the uncaptured handler.
pub struct WgpuShaderCompiler<'a> {
    device: &'a wgpu::Device,
}

impl<'a> WgpuShaderCompiler<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    fn compile_stage(&self, sources: &ProgramSources, stage: ShaderStage) -> Result<wgpu::ShaderModule, AssetError> {
        let label = format!("{}.{stage}", sources.name);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(sources.source(stage).into()),
        });
        match pollster::block_on(self.device.pop_error_scope()) {
            None => Ok(module),
            Some(err) => Err(AssetError::Compile {
                program: sources.name.clone(),
                stage,
                message: format!("{}: {err}", sources.path(stage).display()),
            }),
        }
    }
}

impl ShaderCompiler for WgpuShaderCompiler<'_> {
    type Program = WgpuProgram;

    fn compile(&mut self, sources: &ProgramSources) -> Result<WgpuProgram, AssetError> {
        let vertex = self.compile_stage(sources, ShaderStage::Vertex)?;
        let fragment = self.compile_stage(sources, ShaderStage::Fragment)?;
        tracing::debug!(program = %sources.name, "compiled vertex and fragment modules");
        Ok(WgpuProgram {
            name: sources.name.clone(),
            vertex,
            fragment,
        })
    }
}
