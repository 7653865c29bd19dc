// src/app/mod.rs
//
// Application loop + per-frame orchestration.
//
// Frame order matters for temporal accumulation:
// 1) dt -> sample-rate update
// 2) input/camera/scene updates, which may reset the accumulation counter
// 3) counter snapshot + uniform writes
// 4) raytrace pass (write target, reading the other target's history)
// 5) present pass (tone-map the freshly written target to the swapchain)
// 6) advance the ping-pong parity and bump the accumulation counter,
//    exactly once each, before the next frame begins.

pub mod accum;
pub mod camera;
pub mod config;
pub mod input;
pub mod sample_rate;

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::Window,
};

use crate::app::accum::AccumulationController;
use crate::app::camera::Camera;
use crate::app::input::InputState;
use crate::app::sample_rate::{SampleRateController, SampleRateParams};
use crate::render::{FrameGpu, Renderer, TonemapGpu};
use crate::scene::VoxelScene;

pub async fn run(event_loop: EventLoop<()>, window: Arc<Window>) -> anyhow::Result<()> {
    let mut app = App::new(window).await?;

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match &event {
            Event::AboutToWait => {
                // Schedule the next frame; the redraw arrives as WindowEvent::RedrawRequested.
                app.window.request_redraw();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                app.render_frame(elwt);
            }
            _ => {
                app.handle_event(event, elwt);
            }
        }
    })?;

    Ok(())
}

pub struct App {
    window: Arc<Window>,
    start_time: Instant,

    // Keep handles alive for the app lifetime.
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'static>,
    _adapter: wgpu::Adapter,
    surface_config: wgpu::SurfaceConfiguration,

    renderer: Renderer,

    scene: VoxelScene,
    rng: StdRng,

    input: InputState,
    camera: Camera,

    accum: AccumulationController,
    sample_rate: SampleRateController,

    // Tone-mapping / shading toggles (original defaults).
    use_srgb: bool,
    use_aces: bool,
    use_fresnel: bool,

    // Per-second FPS/SPP report.
    fps_frames: u32,
    fps_last_report: Instant,

    last_frame_time: Instant,
}

impl App {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let start_time = Instant::now();
        let initial_size = window.inner_size();

        // --- GPU/Surface bootstrap -----------------------------------------------------------
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .map_err(crate::error::InitError::from)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(crate::error::InitError::AdapterUnavailable)?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps.formats[0];
        let present_mode = choose_present_mode(&surface_caps);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: initial_size.width.max(1),
            height: initial_size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        // --- Scene ---------------------------------------------------------------------------
        let mut rng = StdRng::from_entropy();
        let mut scene = VoxelScene::generate(&mut rng);

        let renderer = Renderer::new(
            &adapter,
            surface_format,
            surface_config.width,
            surface_config.height,
            scene.voxel_count(),
        )
        .await?;

        surface.configure(renderer.device(), &surface_config);

        // Initial upload; later uploads happen only when the scene is edited.
        renderer.write_scene(&scene.header_gpu(), scene.voxels());
        scene.mark_uploaded();

        let camera = Camera::new();
        let input = InputState::default();

        let sample_rate = SampleRateController::new(SampleRateParams::default());

        log::info!(
            "initialized: {}x{} surface, {} voxels",
            surface_config.width,
            surface_config.height,
            scene.voxel_count()
        );

        Ok(Self {
            window,
            start_time,
            _instance: instance,
            surface,
            _adapter: adapter,
            surface_config,
            renderer,
            scene,
            rng,
            input,
            camera,
            accum: AccumulationController::new(),
            sample_rate,
            use_srgb: true,
            use_aces: true,
            use_fresnel: false,
            fps_frames: 0,
            fps_last_report: Instant::now(),
            last_frame_time: Instant::now(),
        })
    }

    pub fn handle_event(&mut self, event: Event<()>, elwt: &EventLoopWindowTarget<()>) {
        match event {
            Event::DeviceEvent { event, .. } => {
                self.input.on_device_event(&event);
            }
            Event::WindowEvent { event, .. } => {
                let _ = self.input.on_window_event(&event, &self.window);

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),

                    WindowEvent::Resized(new_size) => {
                        self.handle_resize(new_size);
                    }

                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn handle_resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        // WGPU requires a non-zero surface size.
        self.surface_config.width = new_size.width.max(1);
        self.surface_config.height = new_size.height.max(1);

        self.surface
            .configure(self.renderer.device(), &self.surface_config);
        self.renderer
            .resize_output(self.surface_config.width, self.surface_config.height);

        // The target pair was recreated; accumulated history is gone.
        self.accum.reset();
    }

    fn render_frame(&mut self, elwt: &EventLoopWindowTarget<()>) {
        // --- BeginFrame ----------------------------------------------------------------------
        let delta_seconds = self.compute_frame_dt_seconds();
        let spp = self.sample_rate.update(delta_seconds);

        self.report_fps(spp);
        self.update_view_and_scene(delta_seconds);

        // Snapshot after all reset checks for this frame are finalized.
        let frames_since_reset = self.accum.snapshot();
        self.write_frame_uniforms(spp, frames_since_reset);

        // --- RaytracePass --------------------------------------------------------------------
        let mut encoder = self
            .renderer
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        self.renderer.encode_trace(&mut encoder);

        // Acquire the swapchain as late as possible.
        let swapchain_frame = match self.acquire_swapchain_frame(elwt) {
            Some(frame) => frame,
            None => return,
        };
        let swapchain_view = swapchain_frame.texture.create_view(&Default::default());

        // --- CompositePass -------------------------------------------------------------------
        self.renderer.encode_present(&mut encoder, &swapchain_view);

        // --- Present -------------------------------------------------------------------------
        self.renderer.queue().submit(Some(encoder.finish()));
        self.renderer.device().poll(wgpu::Maintain::Poll);
        swapchain_frame.present();

        // --- EndFrame ------------------------------------------------------------------------
        self.renderer.advance_frame();
        self.accum.on_frame_completed();
    }

    fn compute_frame_dt_seconds(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        dt
    }

    /// Input integration and scene maintenance. Any change that invalidates
    /// the accumulated image resets the counter here, before the snapshot.
    fn update_view_and_scene(&mut self, delta_seconds: f32) {
        let mut history_invalid = self
            .camera
            .integrate_input(&mut self.input, delta_seconds);

        if self.input.take_fresnel_toggled() {
            self.use_fresnel = !self.use_fresnel;
            // Shading changed; accumulated samples no longer match.
            history_invalid = true;
        }

        // Present-pass-only toggles; the accumulated image itself stays valid.
        if self.input.take_srgb_toggled() {
            self.use_srgb = !self.use_srgb;
        }
        if self.input.take_aces_toggled() {
            self.use_aces = !self.use_aces;
        }

        if self.input.take_regen_pressed() {
            self.scene.regenerate(&mut self.rng);
            log::info!("scene regenerated");
        }

        // Any scene mutation re-uploads and resets accumulation.
        if self.scene.is_dirty() {
            self.renderer
                .write_scene(&self.scene.header_gpu(), self.scene.voxels());
            self.scene.mark_uploaded();
            history_invalid = true;
        }

        if history_invalid {
            self.accum.reset();
        }
    }

    fn write_frame_uniforms(&mut self, spp: i32, frames_since_reset: u32) {
        let width = self.surface_config.width;
        let height = self.surface_config.height;
        let aspect = width as f32 / height as f32;

        let camera_frame = self.camera.frame_matrices(aspect);

        let frame = FrameGpu {
            resolution: [width as f32, height as f32],
            time: self.start_time.elapsed().as_secs_f32(),
            spp: spp as u32,
            view_inv: camera_frame.view_inv.to_cols_array_2d(),
            proj_inv: camera_frame.proj_inv.to_cols_array_2d(),
            bounce_limit: config::BOUNCE_LIMIT,
            frames_since_reset,
            use_fresnel: self.use_fresnel as u32,
            _pad0: 0,
        };
        self.renderer.write_frame(&frame);

        let tonemap = TonemapGpu {
            use_srgb: self.use_srgb as u32,
            use_aces: self.use_aces as u32,
            _pad0: [0; 2],
        };
        self.renderer.write_tonemap(&tonemap);
    }

    fn report_fps(&mut self, spp: i32) {
        self.fps_frames += 1;

        let elapsed = self.fps_last_report.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            let fps = (self.fps_frames as f32 / elapsed).round() as u32;
            log::info!("fps: {fps}  spp: {spp}  accumulated: {}", self.accum.snapshot());
            self.fps_frames = 0;
            self.fps_last_report = Instant::now();
        }
    }

    fn acquire_swapchain_frame(
        &mut self,
        elwt: &EventLoopWindowTarget<()>,
    ) -> Option<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(frame) => Some(frame),

            // Recoverable: reconfigure and try next frame.
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost/outdated, reconfiguring");
                self.surface
                    .configure(self.renderer.device(), &self.surface_config);
                None
            }

            // Transient: skip this frame.
            Err(wgpu::SurfaceError::Timeout) => None,

            // Fatal: exit the app.
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, exiting");
                elwt.exit();
                None
            }
        }
    }
}

fn choose_present_mode(surface_caps: &wgpu::SurfaceCapabilities) -> wgpu::PresentMode {
    // Mailbox: low latency without tearing (if supported).
    // Fifo: always supported, vsync.
    // Immediate: lowest latency but can tear.
    if surface_caps
        .present_modes
        .contains(&wgpu::PresentMode::Mailbox)
    {
        wgpu::PresentMode::Mailbox
    } else if surface_caps.present_modes.contains(&wgpu::PresentMode::Fifo) {
        wgpu::PresentMode::Fifo
    } else if surface_caps
        .present_modes
        .contains(&wgpu::PresentMode::Immediate)
    {
        wgpu::PresentMode::Immediate
    } else {
        surface_caps.present_modes[0]
    }
}
