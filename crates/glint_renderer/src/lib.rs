//! wgpu renderer for the glint scene: one lit program for the glyph
//! meshes, one emissive program for the pulsing cube.

use std::sync::Arc;

use glint_scene::{GlyphEntry, SceneState};
use thiserror::Error;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};
use winit::window::Window;

use crate::{
    global_resources::GlobalResources,
    mesh::{EmissiveUniform, MeshUniform},
    programs::{
        EmissiveProgram, GpuProgram, GpuProgramRenderContext, LitProgram,
        emissive_program::CubeGpu, lit_program::GlyphGpu,
    },
};

pub mod global_resources;
pub mod mesh;
pub mod programs;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Size of the emissive cube, world units.
const CUBE_SIZE: f32 = 1.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to acquire GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// The surface is gone and reconfiguring cannot bring it back.
    /// Unrecoverable, unlike a Lost/Outdated surface.
    #[error("rendering surface lost for good: {0}")]
    SurfaceFatal(wgpu::SurfaceError),
}

pub struct Renderer {
    device: Device,
    queue: Queue,
    surface: Surface<'static>,
    config: SurfaceConfiguration,
    depth_texture: wgpu::TextureView,

    global_resources: GlobalResources,
    lit_program: LitProgram,
    emissive_program: EmissiveProgram,

    cube: CubeGpu,
    glyphs: Vec<GlyphGpu>,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        log::info!("initializing GPU");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;

        // We use 'pollster' to block on the async adapter/device requests.
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|_| RenderError::NoAdapter)?;

        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: caps.formats[0], // Use the first supported format (usually sRGB)
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo, // VSync On
            desired_maximum_frame_latency: 2,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let depth_texture = create_depth_texture(&device, &config);
        let global_resources = GlobalResources::new(&device);

        let render_context = GpuProgramRenderContext {
            device: &device,
            queue: &queue,
            format: config.format,
        };
        let lit_program = LitProgram::new(&render_context, &global_resources.layout);
        let emissive_program = EmissiveProgram::new(&render_context, &global_resources.layout);

        let cube = emissive_program.create_cube(&device, &glint_assets::mesh::cube(CUBE_SIZE));

        log::info!("pipelines compiled, surface {}x{}", config.width, config.height);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            depth_texture,
            global_resources,
            lit_program,
            emissive_program,
            cube,
            glyphs: Vec::new(),
        })
    }

    /// Tracks the window's client area.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return; // minimized
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = create_depth_texture(&self.device, &self.config);
        log::debug!("surface resized to {width}x{height}");
    }

    /// Uploads the glyph meshes once the font completion handler has built
    /// them. Replaces any previous set.
    pub fn upload_glyphs(&mut self, glyphs: &[GlyphEntry]) {
        self.glyphs = glyphs
            .iter()
            .map(|entry| {
                self.lit_program.create_glyph(
                    &self.device,
                    &entry.mesh,
                    entry.role,
                    entry.transform.compute_matrix(),
                    &format!("Glyph {:?}", entry.glyph),
                )
            })
            .collect();
        log::info!("uploaded {} glyph meshes", self.glyphs.len());
    }

    pub fn render(&mut self, scene: &SceneState) -> Result<(), RenderError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            // Reconfiguring brings these back next frame.
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(err) => return Err(RenderError::SurfaceFatal(err)),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_matrix = scene.view_matrix();
        self.global_resources
            .update_camera(&self.queue, scene.camera.compute_projection_matrix());

        for glyph in &self.glyphs {
            let uniform = MeshUniform::new(
                view_matrix,
                glyph.model,
                scene.light_position,
                glyph.role.light_intensity(),
            );
            self.queue
                .write_buffer(&glyph.mesh_buffer, 0, bytemuck::cast_slice(&[uniform]));
        }

        let cube_uniform = EmissiveUniform::new(
            view_matrix,
            scene.cube.compute_matrix(),
            scene.elapsed_seconds(),
        );
        self.queue
            .write_buffer(&self.cube.buffer, 0, bytemuck::cast_slice(&[cube_uniform]));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        // Black background, as the scene always had.
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0), // Clear to "Far"
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            self.lit_program.record(
                &mut render_pass,
                (&self.global_resources.bind_group, self.glyphs.as_slice()),
            );
            // Transparent cube last, over the opaque glyphs.
            self.emissive_program
                .record(&mut render_pass, (&self.global_resources.bind_group, &self.cube));
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_depth_texture(device: &Device, config: &SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
