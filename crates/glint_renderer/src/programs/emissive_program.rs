use glint_assets::MeshData;
use wgpu::{RenderPipeline, util::DeviceExt};

use crate::{
    DEPTH_FORMAT,
    mesh::{EmissiveUniform, GpuGeometry, Vertex},
    programs::{GpuProgram, GpuProgramRenderContext},
};

/// The pulsing cube on the GPU.
pub struct CubeGpu {
    pub geometry: GpuGeometry,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

/// Draws the self-lit cube. Output is premultiplied alpha, so the pipeline
/// blends instead of replacing, and depth writes are off as for any
/// transparent geometry.
pub struct EmissiveProgram {
    pipeline: RenderPipeline,
    pub uniform_layout: wgpu::BindGroupLayout,
}

impl GpuProgram for EmissiveProgram {
    type InitData = wgpu::BindGroupLayout;
    type DrawData<'a> = (&'a wgpu::BindGroup, &'a CubeGpu);

    fn new(ctx: &GpuProgramRenderContext, global_layout: &Self::InitData) -> Self {
        let shader = ctx
            .device
            .create_shader_module(wgpu::include_wgsl!("emissive.wgsl"));

        let uniform_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Emissive Bind Group Layout"),
                entries: &[
                    // --- BINDING 0: Model-View + Time ---
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Emissive Pipeline Layout"),
                bind_group_layouts: &[global_layout, &uniform_layout],
                push_constant_ranges: &[],
            });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                cache: None,
                label: Some("Emissive Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::desc()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.format,
                        blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            });

        Self {
            pipeline,
            uniform_layout,
        }
    }

    fn record<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>, data: Self::DrawData<'a>) {
        let (global_bind_group, cube) = data;

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, global_bind_group, &[]);
        render_pass.set_bind_group(1, &cube.bind_group, &[]);
        render_pass.set_vertex_buffer(0, cube.geometry.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            cube.geometry.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..cube.geometry.index_count, 0, 0..1);
    }
}

impl EmissiveProgram {
    pub fn create_cube(&self, device: &wgpu::Device, mesh: &MeshData) -> CubeGpu {
        let geometry = GpuGeometry::upload(device, mesh, "Cube Geometry");

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Emissive Uniform Buffer"),
            contents: bytemuck::cast_slice(&[EmissiveUniform::new(
                glam::Mat4::IDENTITY,
                glam::Mat4::IDENTITY,
                0.0,
            )]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Emissive Bind Group"),
            layout: &self.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        CubeGpu {
            geometry,
            buffer,
            bind_group,
        }
    }
}
