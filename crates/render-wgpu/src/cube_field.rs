use crate::compiler::WgpuProgram;
use crate::depth::DEPTH_FORMAT;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use ketemine_assets::{AssetError, FRAGMENT_ENTRY, VERTEX_ENTRY};
use ketemine_render::CubeField;
use wgpu::util::DeviceExt;

/// Background colour behind the cube field.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.15,
    a: 1.0,
};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    mvp: [[f32; 4]; 4],
}

const FLOAT3: u64 = std::mem::size_of::<[f32; 3]>() as u64;

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const OFFSET_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x3];

/// Position (0) and colour (1) advance per vertex, offset (2) per instance.
fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    [
        wgpu::VertexBufferLayout {
            array_stride: FLOAT3,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: FLOAT3,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &COLOR_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: FLOAT3,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &OFFSET_ATTRS,
        },
    ]
}

/// Draws the whole cube field with a single instanced call.
pub struct CubeFieldRenderer {
    program: String,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    offset_buffer: wgpu::Buffer,
    vertex_count: u32,
    instance_count: u32,
}

impl CubeFieldRenderer {
    /// Upload `field` and link `program` into a pipeline for `surface_format`.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        program: &WgpuProgram,
        field: &CubeField,
    ) -> Result<Self, AssetError> {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mvp_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                mvp: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mvp_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mvp_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cube_field_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Entry points or stage interfaces that disagree only show up here.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&program.name),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &program.vertex,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &vertex_layouts(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &program.fragment,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(AssetError::Link {
                program: program.name.clone(),
                message: err.to_string(),
            });
        }

        let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_positions"),
            contents: bytemuck::cast_slice(&field.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_colors"),
            contents: bytemuck::cast_slice(&field.colors),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let offset_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_offsets"),
            contents: bytemuck::cast_slice(&field.translations),
            usage: wgpu::BufferUsages::VERTEX,
        });

        tracing::info!("Shader program \"{}\" successfully compiled and linked.", program.name);
        tracing::debug!(
            program = %program.name,
            vertices = field.vertex_count(),
            instances = field.instance_count(),
            "cube field uploaded"
        );

        Ok(Self {
            program: program.name.clone(),
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            position_buffer,
            color_buffer,
            offset_buffer,
            vertex_count: field.vertex_count(),
            instance_count: field.instance_count(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Upload the model-view-projection matrix used by the next draw.
    pub fn set_mvp(&self, queue: &wgpu::Queue, mvp: Mat4) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                mvp: mvp.to_cols_array_2d(),
            }),
        );
    }

    /// Clear colour and depth, then draw every instance.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView, depth: &wgpu::TextureView) {
        let mut pass = begin_clear_pass(encoder, target, depth, CLEAR_COLOR);
        if self.vertex_count == 0 || self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_vertex_buffer(0, self.position_buffer.slice(..));
        pass.set_vertex_buffer(1, self.color_buffer.slice(..));
        pass.set_vertex_buffer(2, self.offset_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..self.instance_count);
    }
}

/// Clear colour and depth without drawing anything.
pub fn clear_pass(encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView, depth: &wgpu::TextureView) {
    begin_clear_pass(encoder, target, depth, CLEAR_COLOR);
}

fn begin_clear_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    target: &wgpu::TextureView,
    depth: &wgpu::TextureView,
    color: wgpu::Color,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("cube_field_pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(color),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_bind_locations_zero_one_two() {
        let layouts = vertex_layouts();
        let locations: Vec<u32> = layouts
            .iter()
            .flat_map(|l| l.attributes.iter().map(|a| a.shader_location))
            .collect();
        assert_eq!(locations, vec![0, 1, 2]);
        assert!(layouts.iter().all(|l| l.array_stride == 12));
    }

    #[test]
    fn only_offsets_step_per_instance() {
        let steps: Vec<_> = vertex_layouts().iter().map(|l| l.step_mode).collect();
        assert_eq!(
            steps,
            vec![
                wgpu::VertexStepMode::Vertex,
                wgpu::VertexStepMode::Vertex,
                wgpu::VertexStepMode::Instance
            ]
        );
    }

    #[test]
    fn uniform_is_one_column_major_matrix() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 64);
        let u = Uniforms {
            mvp: Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0)).to_cols_array_2d(),
        };
        assert_eq!(u.mvp[3][..3], [1.0, 2.0, 3.0]);
    }
}
