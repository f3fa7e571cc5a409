use wgpu::util::DeviceExt;

use crate::compile::{create_shader_modules, ShaderError, TranslatedProgram};
use crate::geometry::{PlaneGeometry, PlaneVertex};

use super::uniforms::MaterialUniforms;

/// Bind group layout shared by every lesson pipeline.
pub(crate) struct PipelineLayouts {
    pub uniform_layout: wgpu::BindGroupLayout,
    pub pipeline_layout: wgpu::PipelineLayout,
}

impl PipelineLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<MaterialUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("material pipeline layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });
        Self {
            uniform_layout,
            pipeline_layout,
        }
    }
}

/// Uniform buffer plus its bind group.
pub(crate) struct MaterialBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl MaterialBinding {
    pub fn new(
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        uniforms: &MaterialUniforms,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("material uniform buffer"),
            contents: uniforms.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material bind group"),
            layout: &layouts.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    pub fn write(&self, queue: &wgpu::Queue, uniforms: &MaterialUniforms) {
        queue.write_buffer(&self.buffer, 0, uniforms.as_bytes());
    }
}

/// GPU copy of the lesson plane.
pub(crate) struct PlaneMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl PlaneMesh {
    pub fn new(device: &wgpu::Device, geometry: &PlaneGeometry) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane vertices"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane indices"),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Render pipeline compiled from one lesson.
pub(crate) struct MaterialPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub label: String,
}

impl MaterialPipeline {
    pub fn new(
        device: &wgpu::Device,
        layouts: &PipelineLayouts,
        target_format: wgpu::TextureFormat,
        sample_count: u32,
        translated: &TranslatedProgram,
    ) -> Result<Self, ShaderError> {
        let (vertex_module, fragment_module) = create_shader_modules(device, translated)?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&translated.label),
            layout: Some(&layouts.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("main"),
                buffers: &[PlaneVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(ShaderError::Pipeline {
                label: translated.label.clone(),
                message: err.to_string(),
            });
        }

        Ok(Self {
            pipeline,
            label: translated.label.clone(),
        })
    }
}

/// Multisampled colour attachment resolved into the final target.
pub(crate) struct MultisampleTarget {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl MultisampleTarget {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("msaa color target"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }

    pub fn for_sample_count(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Option<Self> {
        (sample_count > 1).then(|| Self::new(device, format, width, height, sample_count))
    }
}

/// Records one pass that clears `view` and draws the plane with `pipeline`.
pub(crate) fn encode_plane_pass(
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    multisample: Option<&MultisampleTarget>,
    pipeline: &MaterialPipeline,
    binding: &MaterialBinding,
    mesh: &PlaneMesh,
) {
    let (attachment_view, resolve_target) = match multisample {
        Some(msaa) => (&msaa.view, Some(view)),
        None => (view, None),
    };
    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("lesson pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: attachment_view,
            depth_slice: None,
            resolve_target,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        occlusion_query_set: None,
        timestamp_writes: None,
    });
    render_pass.set_pipeline(&pipeline.pipeline);
    render_pass.set_bind_group(0, &binding.bind_group, &[]);
    mesh.draw(&mut render_pass);
}
