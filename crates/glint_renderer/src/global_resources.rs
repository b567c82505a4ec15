use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub proj: [[f32; 4]; 4], // Projection matrix; view is folded into the per-mesh uniforms
}

/// Buffers shared by every program: created once, bound as group 0.
pub struct GlobalResources {
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    cam_buffer: wgpu::Buffer,
}

impl GlobalResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Global Bind Group Layout"),
            entries: &[
                // --- BINDING 0: Projection Matrix ---
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let initial_camera_data = CameraUniform {
            proj: Mat4::IDENTITY.to_cols_array_2d(),
        };

        let cam_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[initial_camera_data]),
            // COPY_DST allows us to write to it later
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: cam_buffer.as_entire_binding(),
            }],
        });

        Self {
            layout,
            bind_group,
            cam_buffer,
        }
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, proj: Mat4) {
        queue.write_buffer(
            &self.cam_buffer,
            0,
            bytemuck::cast_slice(&[proj.to_cols_array_2d()]),
        );
    }
}
