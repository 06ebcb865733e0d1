// Hollow Corridor: endless hallway, one thing walking toward you.
// Instanced box renderer + first-person controller driving the simulation
// core once per redraw.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use glam::Vec3;
use hollow_corridor::engine::assets::{self, JUMPSCARE_IMAGE};
use hollow_corridor::engine::audio::AudioBank;
use hollow_corridor::engine::camera::FirstPersonController;
use hollow_corridor::engine::debug_overlay::{DebugOverlay, DebugStats};
use hollow_corridor::engine::frame::FrameContext;
use hollow_corridor::engine::input::InputState;
use hollow_corridor::engine::scene::{InstanceData, Scene};
use hollow_corridor::game::{GameConfig, NpcPhase, Simulation};
use winit::{
    event::{ElementState, Event as WinitEvent, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window},
};

// ============================================================================
// VERTEX DEFINITION
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

impl Vertex {
    const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

// ============================================================================
// INSTANCE DATA (per-entity)
// ============================================================================

fn instance_desc() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceData>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,  // One per instance, not per vertex
        attributes: &[
            // Position (location 2)
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x3,
            },
            // Scale (location 3)
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                shader_location: 3,
                format: wgpu::VertexFormat::Float32x3,
            },
            // Color (location 4)
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                shader_location: 4,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    }
}

// Unit cube, four vertices per face so each face gets a flat normal.
const CUBE_VERTICES: &[Vertex] = &[
    // +X
    Vertex::new([ 0.5, -0.5,  0.5], [ 1.0,  0.0,  0.0]),
    Vertex::new([ 0.5, -0.5, -0.5], [ 1.0,  0.0,  0.0]),
    Vertex::new([ 0.5,  0.5, -0.5], [ 1.0,  0.0,  0.0]),
    Vertex::new([ 0.5,  0.5,  0.5], [ 1.0,  0.0,  0.0]),
    // -X
    Vertex::new([-0.5, -0.5, -0.5], [-1.0,  0.0,  0.0]),
    Vertex::new([-0.5, -0.5,  0.5], [-1.0,  0.0,  0.0]),
    Vertex::new([-0.5,  0.5,  0.5], [-1.0,  0.0,  0.0]),
    Vertex::new([-0.5,  0.5, -0.5], [-1.0,  0.0,  0.0]),
    // +Y
    Vertex::new([-0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0]),
    Vertex::new([ 0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0]),
    Vertex::new([ 0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0]),
    Vertex::new([-0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0]),
    // -Y
    Vertex::new([-0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0]),
    Vertex::new([ 0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0]),
    Vertex::new([ 0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0]),
    Vertex::new([-0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0]),
    // +Z
    Vertex::new([-0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0]),
    Vertex::new([ 0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0]),
    Vertex::new([ 0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0]),
    Vertex::new([-0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0]),
    // -Z
    Vertex::new([ 0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0]),
    Vertex::new([-0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0]),
    Vertex::new([-0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0]),
    Vertex::new([ 0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0]),
];

const CUBE_INDICES: &[u16] = &[
     0,  1,  2,   0,  2,  3,  // +X
     4,  5,  6,   4,  6,  7,  // -X
     8,  9, 10,   8, 10, 11,  // +Y
    12, 13, 14,  12, 14, 15,  // -Y
    16, 17, 18,  16, 18, 19,  // +Z
    20, 21, 22,  20, 22, 23,  // -Z
];

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const FOG_COLOR: [f32; 3] = [0.01, 0.01, 0.015];
const FOG_DENSITY: f32 = 0.045;
const MAX_INSTANCES: usize = 256;

// ============================================================================
// UNIFORM DATA
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    fog: [f32; 4],
}

impl Uniforms {
    fn new(view_proj: glam::Mat4, eye: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
            fog: [FOG_COLOR[0], FOG_COLOR[1], FOG_COLOR[2], FOG_DENSITY],
        }
    }
}

// ============================================================================
// FRAME TIMING
// ============================================================================

struct FrameTimer {
    frames: u32,
    window_start: Instant,
    sum_ms: f32,
    min_ms: f32,
    max_ms: f32,
    // Last completed one-second window
    fps: u32,
    avg_ms: f32,
    last_min_ms: f32,
    last_max_ms: f32,
}

impl FrameTimer {
    fn new() -> Self {
        Self {
            frames: 0,
            window_start: Instant::now(),
            sum_ms: 0.0,
            min_ms: f32::MAX,
            max_ms: 0.0,
            fps: 0,
            avg_ms: 0.0,
            last_min_ms: 0.0,
            last_max_ms: 0.0,
        }
    }

    /// Record a frame. Returns true when a one-second window just closed.
    fn record(&mut self, frame_ms: f32) -> bool {
        self.frames += 1;
        self.sum_ms += frame_ms;
        self.min_ms = self.min_ms.min(frame_ms);
        self.max_ms = self.max_ms.max(frame_ms);

        let now = Instant::now();
        if (now - self.window_start).as_secs_f32() < 1.0 {
            return false;
        }
        self.fps = self.frames;
        self.avg_ms = self.sum_ms / self.frames as f32;
        self.last_min_ms = self.min_ms;
        self.last_max_ms = self.max_ms;
        self.frames = 0;
        self.sum_ms = 0.0;
        self.min_ms = f32::MAX;
        self.max_ms = 0.0;
        self.window_start = now;
        true
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

struct State {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    num_indices: u32,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    overlay: DebugOverlay,

    // Game
    scene: Scene,
    player: FirstPersonController,
    audio: AudioBank,
    input: InputState,
    sim: Simulation,
    max_frame_dt: f32,
    last_update: Instant,
    timer: FrameTimer,
}

impl State {
    async fn new(window: Arc<Window>, game_config: GameConfig) -> anyhow::Result<Self> {
        // Assets first: fail before any GPU work if something is missing.
        let image_path = game_config.assets_dir.join(JUMPSCARE_IMAGE);
        let jumpscare_image = assets::load_image(&image_path).context("loading jumpscare overlay")?;
        let mut audio = if game_config.audio_enabled {
            AudioBank::load(&game_config.assets_dir).context("loading audio cues")?
        } else {
            log::info!("audio disabled by config");
            AudioBank::silent()
        };

        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .context("requesting GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader_instanced.wgsl").into()),
        });

        use wgpu::util::DeviceExt;

        let uniforms = Uniforms::new(glam::Mat4::IDENTITY, Vec3::ZERO);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("uniform_bind_group_layout"),
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("uniform_bind_group"),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc(), instance_desc()],  // Vertex + Instance buffers
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
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
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (MAX_INSTANCES * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let num_indices = CUBE_INDICES.len() as u32;
        let depth_view = create_depth_view(&device, &config);
        let overlay = DebugOverlay::new(&window, &device, surface_format, &jumpscare_image);

        // Build the world: corridor ring and NPC go into the scene through
        // the same engine surface the tick uses.
        let mut scene = Scene::new();
        let mut player = FirstPersonController::new(&game_config.player, game_config.encounter.respawn_point);
        let input = InputState::new();
        let sim = {
            let mut frame = FrameContext {
                scene: &mut scene,
                player: &mut player,
                input: &input,
                audio: &mut audio,
            };
            Simulation::from_config(&game_config, &mut frame)
        };
        log::info!("spawned {} scene entities", scene.entity_count());

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            render_pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            num_indices,
            uniform_buffer,
            uniform_bind_group,
            depth_view,
            overlay,
            scene,
            player,
            audio,
            input,
            sim,
            max_frame_dt: game_config.max_frame_dt,
            last_update: Instant::now(),
            timer: FrameTimer::new(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, &self.config);
        }
    }

    fn update(&mut self) -> f32 {
        let now = Instant::now();
        let raw_dt = (now - self.last_update).as_secs_f32();
        self.last_update = now;
        let dt = raw_dt.min(self.max_frame_dt);

        if self.input.was_pressed(KeyCode::F3) {
            self.overlay.toggle();
        }

        let colliders = self.scene.colliders();
        self.player.update(&self.input, &colliders, dt);

        let mut frame = FrameContext {
            scene: &mut self.scene,
            player: &mut self.player,
            input: &self.input,
            audio: &mut self.audio,
        };
        self.sim.tick(dt, &mut frame);

        raw_dt * 1000.0
    }

    fn debug_stats(&self) -> DebugStats {
        let npc = self.sim.npc();
        let encounter = self.sim.encounter();
        let now = self.sim.clock().now();
        DebugStats {
            fps: self.timer.fps,
            frame_time_avg_ms: self.timer.avg_ms,
            frame_time_min_ms: self.timer.last_min_ms,
            frame_time_max_ms: self.timer.last_max_ms,
            entity_count: self.scene.entity_count(),
            resolution: (self.size.width, self.size.height),
            player_position: self.player.position,
            grounded: self.player.is_grounded(),
            npc_phase: match npc.phase() {
                NpcPhase::Dormant => "dormant",
                NpcPhase::Active => "active",
            },
            npc_position: npc.state().position,
            npc_visible: npc.state().visible,
            jumpscare_active: encounter.is_active(),
            reset_in: encounter.state().reset_deadline.map(|deadline| deadline - now),
            resets: encounter.resets(),
            segment_offsets: self.sim.corridor().offsets(),
            sim_time: now,
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Collect instance data from ECS BEFORE creating render pass
        let instance_data = self.scene.instances();
        let instance_count = instance_data.len().min(MAX_INSTANCES);

        if instance_count > 0 {
            self.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&instance_data[..instance_count]),
            );
        }

        let aspect = self.size.width as f32 / self.size.height.max(1) as f32;
        let uniforms = Uniforms::new(self.player.view_projection(aspect), self.player.eye());
        self.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: FOG_COLOR[0] as f64,
                            g: FOG_COLOR[1] as f64,
                            b: FOG_COLOR[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));  // Instance data
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

            // ONE DRAW CALL for the whole corridor
            render_pass.draw_indexed(0..self.num_indices, 0, 0..instance_count as u32);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        let stats = self.overlay.visible.then(|| self.debug_stats());
        self.overlay.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &self.window,
            &view,
            &screen_descriptor,
            stats.as_ref(),
            self.scene.overlay_visible,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
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

fn grab_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grabbed {
        log::warn!("could not grab cursor: {e}");
    }
    window.set_cursor_visible(false);
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let (game_config, source) = GameConfig::load().context("loading game config")?;
    match &source {
        Some(path) => log::info!("config loaded from {}", path.display()),
        None => log::info!("using built-in config"),
    }

    let event_loop = EventLoop::new()?;

    let window_attributes = Window::default_attributes()
        .with_title("Hollow Corridor")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

    let window = Arc::new(event_loop.create_window(window_attributes)?);
    grab_cursor(&window);

    let mut state = pollster::block_on(State::new(window.clone(), game_config))?;

    event_loop.run(move |event, control_flow| {
        match event {
            WinitEvent::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                let _ = state.overlay.handle_window_event(&window, event);
                state.input.process_event(event);

                match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                state: ElementState::Pressed,
                                physical_key: PhysicalKey::Code(KeyCode::Escape),
                                ..
                            },
                        ..
                    } => control_flow.exit(),
                    WindowEvent::Resized(physical_size) => {
                        state.resize(*physical_size);
                    }
                    WindowEvent::Focused(true) => grab_cursor(&window),
                    WindowEvent::RedrawRequested => {
                        let frame_ms = state.update();
                        match state.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => state.resize(state.size),
                            Err(wgpu::SurfaceError::OutOfMemory) => control_flow.exit(),
                            Err(e) => log::error!("{:?}", e),
                        }
                        state.input.end_frame();

                        if state.timer.record(frame_ms) {
                            log::info!(
                                "FPS: {} | Entities: {} | NPC: {:?} | Resets: {}",
                                state.timer.fps,
                                state.scene.entity_count(),
                                state.sim.npc().phase(),
                                state.sim.encounter().resets(),
                            );
                        }
                    }
                    _ => {}
                }
            }
            WinitEvent::DeviceEvent { ref event, .. } => {
                state.input.process_device_event(event);
            }
            WinitEvent::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
