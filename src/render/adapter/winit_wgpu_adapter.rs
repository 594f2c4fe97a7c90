// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! # Winit + WGPU Adapter Implementation
//!
//! Desktop output based on the winit + wgpu stack.
//!
//! - **winit**: window management and keyboard input, polled with
//!   `pump_app_events` so the viewer keeps control of its own loop
//! - **wgpu**: every presented canvas is uploaded to a texture and drawn
//!   as one textured quad, top-left aligned, one texel per screen pixel
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            WinitWgpuAdapter                 │
//! ├─────────────────────────────────────────────┤
//! │  WinitWgpuAppHandler │  WgpuState           │
//! │  - winit::Window     │  - Surface / Device  │
//! │  - key & resize      │  - canvas texture    │
//! │    events            │  - quad pipeline     │
//! └─────────────────────────────────────────────┘
//! ```

use crate::error::{Result, ViewerError};
use crate::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use crate::render::adapter::{Adapter, AdapterBase};
use crate::render::canvas::Canvas;
use log::{debug, error, info};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowId},
};

/// Draws the canvas texture on a quad anchored at the top-left corner.
/// `scale` is the canvas size relative to the surface size.
const CANVAS_SHADER: &str = r#"
struct Uniforms {
    scale: vec4<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var canvas_texture: texture_2d<f32>;
@group(0) @binding(2) var canvas_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tex_coords: vec2<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(0.0, 0.0),
        vec2<f32>(1.0, 0.0),
        vec2<f32>(0.0, 1.0),
        vec2<f32>(0.0, 1.0),
        vec2<f32>(1.0, 0.0),
        vec2<f32>(1.0, 1.0),
    );
    let corner = corners[index];
    var output: VertexOutput;
    output.clip_position = vec4<f32>(
        -1.0 + 2.0 * corner.x * uniforms.scale.x,
        1.0 - 2.0 * corner.y * uniforms.scale.y,
        0.0,
        1.0,
    );
    output.tex_coords = corner;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(canvas_texture, canvas_sampler, input.tex_coords);
}
"#;

/// Winit + WGPU adapter main structure
pub struct WinitWgpuAdapter {
    pub base: AdapterBase,
    event_loop: Option<EventLoop<()>>,
    app_handler: Option<WinitWgpuAppHandler>,
    should_exit: bool,
}

/// Owns the window and the GPU objects, receives winit callbacks.
pub struct WinitWgpuAppHandler {
    title: String,
    init_size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    gpu: Option<WgpuState>,
    /// Pending viewer event queue
    pending_events: Vec<Event>,
    modifiers: KeyModifiers,
    monitor: Option<(u32, u32)>,
    should_exit: bool,
}

/// Canvas upload target, recreated when the canvas size changes.
struct CanvasTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

struct WgpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    uniforms: wgpu::Buffer,
    canvas: Option<CanvasTexture>,
}

impl WgpuState {
    fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| ViewerError::Window(e.to_string()))?;

        let (adapter, device, queue) = pollster::block_on(async {
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                })
                .await
                .map_err(|e| ViewerError::Window(e.to_string()))?;
            info!("WGPU adapter found: {:?}", adapter.get_info());

            let (device, queue) = adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("Font Viewer Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    ..Default::default()
                })
                .await
                .map_err(|e| ViewerError::Window(e.to_string()))?;
            Ok::<_, ViewerError>((adapter, device, queue))
        })?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| ViewerError::Window("surface has no formats".into()))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        info!(
            "WGPU surface configured: {}x{}, format: {:?}",
            config.width, config.height, config.format
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Canvas Bind Group Layout"),
            entries: &[
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
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Canvas Shader"),
            source: wgpu::ShaderSource::Wgsl(CANVAS_SHADER.into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Canvas Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Canvas Pipeline"),
            layout: Some(&pipeline_layout),
            cache: None,
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Canvas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Canvas Uniforms"),
            size: std::mem::size_of::<[f32; 4]>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group_layout,
            sampler,
            uniforms,
            canvas: None,
        })
    }

    fn resize(&mut self, w: u32, h: u32) {
        if w == 0 || h == 0 {
            return;
        }
        self.config.width = w;
        self.config.height = h;
        self.surface.configure(&self.device, &self.config);
    }

    fn canvas_texture(&self, width: u32, height: u32) -> CanvasTexture {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Canvas Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Canvas Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        CanvasTexture {
            texture,
            bind_group,
            width,
            height,
        }
    }

    fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        let (cw, ch) = (canvas.width(), canvas.height());
        if cw == 0 || ch == 0 {
            return Ok(());
        }
        let stale = self
            .canvas
            .as_ref()
            .map_or(true, |t| t.width != cw || t.height != ch);
        if stale {
            debug!("canvas texture {}x{}", cw, ch);
            self.canvas = Some(self.canvas_texture(cw, ch));
        }
        let Some(target) = self.canvas.as_ref() else {
            return Ok(());
        };

        self.queue.write_texture(
            target.texture.as_image_copy(),
            canvas.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * cw),
                rows_per_image: Some(ch),
            },
            wgpu::Extent3d {
                width: cw,
                height: ch,
                depth_or_array_layers: 1,
            },
        );
        let scale = [
            cw as f32 / self.config.width as f32,
            ch as f32 / self.config.height as f32,
            0.0,
            0.0,
        ];
        self.queue
            .write_buffer(&self.uniforms, 0, bytemuck::cast_slice(&scale));

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(ViewerError::Window(e.to_string())),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Canvas Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &target.bind_group, &[]);
            pass.draw(0..6, 0..1);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Maps a winit physical key to a viewer key. Letters are lower case,
/// shift is reported through the modifiers.
fn key_from_winit(code: winit::keyboard::KeyCode) -> KeyCode {
    use winit::keyboard::KeyCode as K;
    let c = match code {
        K::Escape => return KeyCode::Esc,
        K::Space => return KeyCode::Space,
        K::Equal | K::NumpadAdd => '=',
        K::Minus | K::NumpadSubtract => '-',
        K::KeyA => 'a',
        K::KeyB => 'b',
        K::KeyC => 'c',
        K::KeyD => 'd',
        K::KeyE => 'e',
        K::KeyF => 'f',
        K::KeyG => 'g',
        K::KeyH => 'h',
        K::KeyI => 'i',
        K::KeyJ => 'j',
        K::KeyK => 'k',
        K::KeyL => 'l',
        K::KeyM => 'm',
        K::KeyN => 'n',
        K::KeyO => 'o',
        K::KeyP => 'p',
        K::KeyQ => 'q',
        K::KeyR => 'r',
        K::KeyS => 's',
        K::KeyT => 't',
        K::KeyU => 'u',
        K::KeyV => 'v',
        K::KeyW => 'w',
        K::KeyX => 'x',
        K::KeyY => 'y',
        K::KeyZ => 'z',
        _ => return KeyCode::Other,
    };
    KeyCode::Char(c)
}

/// New inner size to ask the window for, None when `requested` is empty or
/// already the current size.
fn resize_request(current: (u32, u32), requested: (u32, u32)) -> Option<PhysicalSize<u32>> {
    let (w, h) = requested;
    if w == 0 || h == 0 || requested == current {
        return None;
    }
    Some(PhysicalSize::new(w, h))
}

fn modifiers_from_winit(state: winit::keyboard::ModifiersState) -> KeyModifiers {
    let mut m = KeyModifiers::NONE;
    if state.shift_key() {
        m |= KeyModifiers::SHIFT;
    }
    if state.control_key() {
        m |= KeyModifiers::CONTROL;
    }
    if state.alt_key() {
        m |= KeyModifiers::ALT;
    }
    if state.super_key() {
        m |= KeyModifiers::SUPER;
    }
    m
}

impl WinitWgpuAppHandler {
    fn create_window_and_resources(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        info!("Creating WGPU window and resources...");
        let attributes = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(self.init_size)
            .with_resizable(true);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| ViewerError::Window(e.to_string()))?,
        );
        let monitor = window
            .current_monitor()
            .or_else(|| event_loop.primary_monitor());
        if let Some(m) = monitor {
            let size = m.size();
            self.monitor = Some((size.width, size.height));
        }
        self.gpu = Some(WgpuState::new(window.clone())?);
        self.window = Some(window);
        info!("WGPU window & context initialized successfully");
        Ok(())
    }
}

impl ApplicationHandler for WinitWgpuAppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window_and_resources(event_loop) {
            error!("{}", e);
            self.should_exit = true;
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.pending_events.push(Event::Quit);
                self.should_exit = true;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                }
                if size.width > 0 && size.height > 0 {
                    self.pending_events.push(Event::Resize(size.width, size.height));
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers_from_winit(modifiers.state());
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(code) = key_event.physical_key {
                    let code = key_from_winit(code);
                    if code != KeyCode::Other {
                        self.pending_events
                            .push(Event::Key(KeyEvent::new(code, self.modifiers)));
                    }
                }
            }
            _ => {}
        }
    }
}

impl WinitWgpuAdapter {
    pub fn new() -> Self {
        Self {
            base: AdapterBase::new(),
            event_loop: None,
            app_handler: None,
            should_exit: false,
        }
    }
}

impl Default for WinitWgpuAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter for WinitWgpuAdapter {
    /// Window creation is deferred to the first `resumed` callback.
    fn init(&mut self, w: u32, h: u32, title: &str) -> Result<()> {
        info!("Initializing WinitWgpu adapter {}x{}", w, h);
        self.base.pixel_w = w;
        self.base.pixel_h = h;
        self.base.title = title.to_string();
        let event_loop = EventLoop::new().map_err(|e| ViewerError::Window(e.to_string()))?;
        self.event_loop = Some(event_loop);
        self.app_handler = Some(WinitWgpuAppHandler {
            title: title.to_string(),
            init_size: PhysicalSize::new(w.max(1), h.max(1)),
            window: None,
            gpu: None,
            pending_events: Vec::new(),
            modifiers: KeyModifiers::NONE,
            monitor: None,
            should_exit: false,
        });
        Ok(())
    }

    fn get_base(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn poll_event(&mut self, timeout: Duration, es: &mut Vec<Event>) -> bool {
        if let (Some(event_loop), Some(app_handler)) =
            (self.event_loop.as_mut(), self.app_handler.as_mut())
        {
            // never blocks, the frame wait is the single sleep below
            let status = event_loop.pump_app_events(Some(Duration::ZERO), app_handler);

            for event in app_handler.pending_events.drain(..) {
                if let Event::Resize(w, h) = event {
                    self.base.pixel_w = w;
                    self.base.pixel_h = h;
                }
                es.push(event);
            }
            if let Some((w, h)) = app_handler.monitor {
                self.base.monitor_w = w;
                self.base.monitor_h = h;
            }
            if app_handler.should_exit {
                self.should_exit = true;
            }
            if let PumpStatus::Exit(code) = status {
                debug!("event loop exit {}", code);
                self.should_exit = true;
            }
        }

        if !self.should_exit {
            std::thread::sleep(timeout);
        }
        self.should_exit
    }

    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        match self.app_handler.as_mut().and_then(|h| h.gpu.as_mut()) {
            Some(gpu) => gpu.draw(canvas),
            None => Ok(()),
        }
    }

    fn set_title(&mut self, title: &str) {
        self.base.title = title.to_string();
        if let Some(handler) = self.app_handler.as_mut() {
            handler.title = title.to_string();
            if let Some(window) = handler.window.as_ref() {
                window.set_title(title);
            }
        }
    }

    /// Resized events already updated the base size, so following the
    /// window's own resize asks for nothing.
    fn resize(&mut self, w: u32, h: u32) {
        let Some(size) = resize_request((self.base.pixel_w, self.base.pixel_h), (w, h)) else {
            debug!("resize to {}x{} skipped", w, h);
            return;
        };
        self.base.pixel_w = w;
        self.base.pixel_h = h;
        if let Some(handler) = self.app_handler.as_mut() {
            handler.init_size = size;
            if let Some(window) = handler.window.as_ref() {
                let _ = window.request_inner_size(size);
            }
        }
    }

    fn as_any(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{KeyCode as K, ModifiersState};

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_from_winit(K::KeyT), KeyCode::Char('t'));
        assert_eq!(key_from_winit(K::Equal), KeyCode::Char('='));
        assert_eq!(key_from_winit(K::Minus), KeyCode::Char('-'));
        assert_eq!(key_from_winit(K::Escape), KeyCode::Esc);
        assert_eq!(key_from_winit(K::Space), KeyCode::Space);
        assert_eq!(key_from_winit(K::F1), KeyCode::Other);
    }

    #[test]
    fn test_resize_request() {
        assert_eq!(resize_request((256, 128), (256, 128)), None);
        assert_eq!(resize_request((256, 128), (0, 128)), None);
        assert_eq!(resize_request((256, 128), (300, 0)), None);
        assert_eq!(
            resize_request((256, 128), (300, 200)),
            Some(PhysicalSize::new(300, 200))
        );
    }

    #[test]
    fn test_resize_follows_window_without_request() {
        let mut adapter = WinitWgpuAdapter::new();
        adapter.base.pixel_w = 256;
        adapter.base.pixel_h = 128;
        adapter.resize(256, 128);
        adapter.resize(0, 10);
        assert_eq!(adapter.screen_size(), (256, 128));
        adapter.resize(300, 200);
        assert_eq!(adapter.screen_size(), (300, 200));
    }

    #[test]
    fn test_poll_without_window() {
        let mut adapter = WinitWgpuAdapter::new();
        let mut es = vec![];
        let start = std::time::Instant::now();
        assert!(!adapter.poll_event(Duration::from_millis(5), &mut es));
        assert!(start.elapsed() >= Duration::from_millis(5));
        assert!(es.is_empty());
    }

    #[test]
    fn test_modifier_mapping() {
        assert_eq!(modifiers_from_winit(ModifiersState::empty()), KeyModifiers::NONE);
        assert_eq!(
            modifiers_from_winit(ModifiersState::SUPER),
            KeyModifiers::SUPER
        );
        assert_eq!(
            modifiers_from_winit(ModifiersState::CONTROL | ModifiersState::SHIFT),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        );
    }
}
