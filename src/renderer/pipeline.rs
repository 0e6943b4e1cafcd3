//! WebGPU render pipeline setup

use glam::Vec2;
use wgpu::util::DeviceExt;

use super::vertex::{Vertex, colors};

/// Surface, device and the one flat-colour pipeline
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Stage size mapped onto the viewport
    pub view_size: Vec2,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        view_size: Vec2,
    ) -> Self {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("reel-spin-device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await
            .expect("Failed to create device");

        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: Vec::new(),
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = flat_pipeline(&device, format);

        Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            size: (width, height),
            view_size,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw one frame of stage-space triangles
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let ndc = to_ndc(vertices, self.size, self.view_size);
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("frame_vertices"),
                contents: bytemuck::cast_slice(&ndc),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&Default::default());
        let mut encoder = self.device.create_command_encoder(&Default::default());

        let [r, g, b, _] = colors::BACKGROUND.map(f64::from);
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("stage_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a: 1.0 }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_vertex_buffer(0, buffer.slice(..));
            pass.draw(0..ndc.len() as u32, 0..1);
        }

        self.queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }
}

/// Alpha-blended triangle list, no bindings
fn flat_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::include_wgsl!("shader.wgsl"));
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("flat_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Shapes are wound both ways, so no culling
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Map a stage-space vertex list into clip space for the given viewport
pub fn to_ndc(vertices: &[Vertex], viewport: (u32, u32), view_size: Vec2) -> Vec<Vertex> {
    vertices
        .iter()
        .map(|v| {
            let (x, y) = stage_to_ndc(viewport, view_size, v.position[0], v.position[1]);
            Vertex::new(x, y, v.color)
        })
        .collect()
}

/// Map stage coordinates (origin top-left, y down) to NDC, letterboxing so
/// the stage keeps its aspect ratio inside the viewport
pub fn stage_to_ndc(viewport: (u32, u32), view_size: Vec2, x: f32, y: f32) -> (f32, f32) {
    let (w, h) = viewport;
    let viewport_aspect = w as f32 / h.max(1) as f32;
    let stage_aspect = view_size.x / view_size.y;

    let nx = (x / view_size.x) * 2.0 - 1.0;
    let ny = 1.0 - (y / view_size.y) * 2.0;

    if viewport_aspect > stage_aspect {
        // Wider than the stage
        (nx * stage_aspect / viewport_aspect, ny)
    } else {
        // Taller than the stage
        (nx, ny * viewport_aspect / stage_aspect)
    }
}

/// Inverse of `stage_to_ndc` for pointer input: client pixels to stage
/// coordinates
pub fn client_to_stage(viewport: (f32, f32), view_size: Vec2, x: f32, y: f32) -> Vec2 {
    let (w, h) = viewport;
    let viewport_aspect = w / h.max(1.0);
    let stage_aspect = view_size.x / view_size.y;

    let mut nx = (x / w.max(1.0)) * 2.0 - 1.0;
    let mut ny = 1.0 - (y / h.max(1.0)) * 2.0;
    if viewport_aspect > stage_aspect {
        nx *= viewport_aspect / stage_aspect;
    } else {
        ny *= stage_aspect / viewport_aspect;
    }

    Vec2::new((nx + 1.0) / 2.0 * view_size.x, (1.0 - ny) / 2.0 * view_size.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_corners_map_to_ndc() {
        let view = Vec2::new(800.0, 600.0);
        assert_eq!(stage_to_ndc((800, 600), view, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(stage_to_ndc((800, 600), view, 800.0, 600.0), (1.0, -1.0));
        assert_eq!(stage_to_ndc((800, 600), view, 400.0, 300.0), (0.0, 0.0));
    }

    #[test]
    fn test_letterbox_keeps_aspect() {
        let view = Vec2::new(800.0, 600.0);
        // Twice as wide: stage occupies the middle of the viewport
        let (x, y) = stage_to_ndc((1600, 600), view, 800.0, 0.0);
        assert!((x - 0.5).abs() < 1e-6);
        assert_eq!(y, 1.0);
        // Taller: stage squeezed vertically
        let (x, y) = stage_to_ndc((800, 1200), view, 0.0, 0.0);
        assert_eq!(x, -1.0);
        assert!((y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_to_ndc_keeps_colour_and_order() {
        let view = Vec2::new(800.0, 600.0);
        let stage = [
            Vertex::new(0.0, 0.0, [1.0, 0.0, 0.0, 1.0]),
            Vertex::new(400.0, 300.0, [0.0, 1.0, 0.0, 0.5]),
        ];
        let ndc = to_ndc(&stage, (800, 600), view);
        assert_eq!(ndc.len(), 2);
        assert_eq!(ndc[0].position, [-1.0, 1.0]);
        assert_eq!(ndc[1].position, [0.0, 0.0]);
        assert_eq!(ndc[1].color, stage[1].color);
    }

    #[test]
    fn test_client_to_stage_inverts_letterbox() {
        let view = Vec2::new(800.0, 835.0);
        for viewport in [(1600u32, 835u32), (800, 1600), (1024, 768)] {
            let (nx, ny) = stage_to_ndc(viewport, view, 400.0, 785.0);
            // NDC back to client pixels
            let px = (nx + 1.0) / 2.0 * viewport.0 as f32;
            let py = (1.0 - ny) / 2.0 * viewport.1 as f32;
            let stage = client_to_stage((viewport.0 as f32, viewport.1 as f32), view, px, py);
            assert!((stage - Vec2::new(400.0, 785.0)).length() < 0.01);
        }
    }
}
