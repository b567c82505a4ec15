use std::mem;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use glint_assets::MeshData;
use wgpu::util::DeviceExt;

// #[repr(C)] ensures the compiler doesn't reorder fields; Pod/Zeroable let
// us cast the structs to raw bytes for upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0, // @location(0) in shader
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Per-glyph uniform, rewritten every frame. Lighting happens in view
/// space, so the normal matrix is derived from model-view, not model, and
/// the light position is pre-transformed into view space on the CPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshUniform {
    pub model_view: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// xyz = light position in view space, w = light intensity.
    pub light_position: [f32; 4],
}

impl MeshUniform {
    pub fn new(view: Mat4, model: Mat4, light_world: Vec3, light_intensity: f32) -> Self {
        let model_view = view * model;
        // Transpose(Inverse(ModelView)): normals must not inherit scale.
        let normal_matrix = model_view.inverse().transpose();
        let light_view = view.transform_point3(light_world);

        Self {
            model_view: model_view.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            light_position: [light_view.x, light_view.y, light_view.z, light_intensity],
        }
    }
}

/// Uniform for the emissive cube: placement plus the time that drives the
/// brightness curve.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct EmissiveUniform {
    pub model_view: [[f32; 4]; 4],
    pub time: f32,
    pub _padding: [f32; 3],
}

impl EmissiveUniform {
    pub fn new(view: Mat4, model: Mat4, time: f32) -> Self {
        Self {
            model_view: (view * model).to_cols_array_2d(),
            time,
            _padding: [0.0; 3],
        }
    }
}

pub struct GpuGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuGeometry {
    pub fn upload(device: &wgpu::Device, data: &MeshData, label: &str) -> Self {
        let vertices: Vec<Vertex> = data
            .vertices
            .iter()
            .map(|v| Vertex {
                position: v.position,
                normal: v.normal,
            })
            .collect();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    // The uniform structs are bound against the WGSL declarations in
    // lit.wgsl / emissive.wgsl; a size mismatch fails wgpu validation on
    // every draw, so the byte counts are pinned here.

    #[test]
    fn mesh_uniform_matches_the_shader_layout() {
        // mat4x4 + mat4x4 + vec4
        assert_eq!(size_of::<MeshUniform>(), 144);
    }

    #[test]
    fn emissive_uniform_matches_the_shader_layout() {
        // mat4x4 + f32, rounded up to the struct's 16-byte alignment
        assert_eq!(size_of::<EmissiveUniform>(), 80);
    }
}
