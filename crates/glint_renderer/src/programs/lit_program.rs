use bytemuck::{Pod, Zeroable};
use glint_assets::MeshData;
use glint_shading::{GlyphRole, Material};
use wgpu::{RenderPipeline, util::DeviceExt};

use crate::{
    DEPTH_FORMAT,
    mesh::{GpuGeometry, MeshUniform, Vertex},
    programs::{GpuProgram, GpuProgramRenderContext},
};

/// GPU mirror of [`glint_shading::Material`]; layout matches the
/// `MaterialUniform` struct in `lit.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MaterialUniform {
    pub diffuse_color: [f32; 4],
    pub specular_color: [f32; 4],
    pub shininess: f32,
    pub ambient_intensity: f32,
    pub _padding: [f32; 2],
}

impl From<Material> for MaterialUniform {
    fn from(m: Material) -> Self {
        Self {
            diffuse_color: [m.diffuse_color.x, m.diffuse_color.y, m.diffuse_color.z, 1.0],
            specular_color: [
                m.specular_color.x,
                m.specular_color.y,
                m.specular_color.z,
                1.0,
            ],
            shininess: m.shininess,
            ambient_intensity: m.ambient_intensity,
            _padding: [0.0; 2],
        }
    }
}

/// Everything one glyph needs on the GPU. The material bind group is
/// static; the mesh buffer is rewritten every frame with fresh model-view
/// and light data.
pub struct GlyphGpu {
    pub geometry: GpuGeometry,
    pub role: GlyphRole,
    pub model: glam::Mat4,
    pub material_bind_group: wgpu::BindGroup,
    pub mesh_buffer: wgpu::Buffer,
    pub mesh_bind_group: wgpu::BindGroup,
}

pub struct LitProgram {
    pipeline: RenderPipeline,
    pub material_layout: wgpu::BindGroupLayout,
    pub mesh_layout: wgpu::BindGroupLayout,
}

impl GpuProgram for LitProgram {
    type InitData = wgpu::BindGroupLayout;
    type DrawData<'a> = (&'a wgpu::BindGroup, &'a [GlyphGpu]);

    fn new(ctx: &GpuProgramRenderContext, global_layout: &Self::InitData) -> Self {
        let shader = ctx
            .device
            .create_shader_module(wgpu::include_wgsl!("lit.wgsl"));

        let material_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Material Bind Group Layout"),
                entries: &[
                    // --- BINDING 0: Material Settings (Uniform Buffer) ---
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let mesh_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Mesh Bind Group Layout"),
                entries: &[
                    // --- BINDING 0: Model-View / Normal Matrix / Light ---
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
                label: Some("Lit Pipeline Layout"),
                bind_group_layouts: &[global_layout, &material_layout, &mesh_layout],
                push_constant_ranges: &[],
            });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                cache: None,
                label: Some("Lit Pipeline"),
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
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Glyph walls are visible from both sides.
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            });

        Self {
            pipeline,
            material_layout,
            mesh_layout,
        }
    }

    fn record<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>, data: Self::DrawData<'a>) {
        let (global_bind_group, glyphs) = data;

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, global_bind_group, &[]);

        for glyph in glyphs {
            render_pass.set_bind_group(1, &glyph.material_bind_group, &[]);
            render_pass.set_bind_group(2, &glyph.mesh_bind_group, &[]);
            render_pass.set_vertex_buffer(0, glyph.geometry.vertex_buffer.slice(..));
            render_pass.set_index_buffer(
                glyph.geometry.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            render_pass.draw_indexed(0..glyph.geometry.index_count, 0, 0..1);
        }
    }
}

impl LitProgram {
    /// Uploads one glyph: geometry, its material preset, and a per-frame
    /// uniform buffer wired into a bind group.
    pub fn create_glyph(
        &self,
        device: &wgpu::Device,
        mesh: &MeshData,
        role: GlyphRole,
        model: glam::Mat4,
        label: &str,
    ) -> GlyphGpu {
        let geometry = GpuGeometry::upload(device, mesh, label);

        let material_uniform = MaterialUniform::from(Material::for_role(role));
        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Material Uniforms"),
            contents: bytemuck::cast_slice(&[material_uniform]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let material_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Material Bind Group"),
            layout: &self.material_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: material_buffer.as_entire_binding(),
            }],
        });

        let mesh_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Uniform Buffer"),
            contents: bytemuck::cast_slice(&[MeshUniform::zeroed()]),
            // COPY_DST is crucial: this buffer is rewritten every frame.
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let mesh_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Mesh Bind Group"),
            layout: &self.mesh_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: mesh_buffer.as_entire_binding(),
            }],
        });

        GlyphGpu {
            geometry,
            role,
            model,
            material_bind_group,
            mesh_buffer,
            mesh_bind_group,
        }
    }
}
