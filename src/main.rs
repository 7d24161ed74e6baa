//! Spectral ocean - Phillips-spectrum wave synthesis viewer
//!
//! Builds a random wave spectrum once, then evolves and reconstructs the
//! height field every frame on the CPU or in GPU compute passes.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use spectral_ocean::cli::Args;
use spectral_ocean::error::OceanError;
use spectral_ocean::gpu::{create_instance, GpuContext};
use spectral_ocean::ocean::SurfaceMesh;
use spectral_ocean::params::{OceanParams, RenderConfig};
use spectral_ocean::pipeline::{OceanPipeline, SynthesisStrategy};
use spectral_ocean::rendering::RenderSystem;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    pipeline: Option<OceanPipeline>,

    // Configuration
    params: OceanParams,
    strategy: SynthesisStrategy,
    render_config: RenderConfig,

    // Time tracking
    start_time: Instant,
}

impl App {
    fn new(params: OceanParams, strategy: SynthesisStrategy) -> Self {
        Self {
            window: None,
            render_system: None,
            pipeline: None,
            params,
            strategy,
            render_config: RenderConfig::default(),
            start_time: Instant::now(),
        }
    }

    /// Window surface, device, synthesis, and renderer, in that order
    fn initialize(&mut self, window: Arc<Window>) -> Result<(), OceanError> {
        let instance = create_instance();
        let surface = instance.create_surface(Arc::clone(&window))?;
        let ctx = Arc::new(pollster::block_on(GpuContext::request(
            &instance,
            Some(&surface),
        ))?);

        let pipeline = OceanPipeline::from_seed(self.params.clone(), self.strategy, Some(ctx.clone()))?;
        let height_buffer = pipeline
            .height_buffer()
            .ok_or(OceanError::DeviceRequired(self.strategy))?;

        let mesh = SurfaceMesh::new(self.params.grid_size, self.params.domain_size_m);
        let size = window.inner_size();
        let render_system = RenderSystem::new(
            surface,
            ctx,
            (size.width, size.height),
            &self.render_config,
            &self.params,
            &mesh,
            height_buffer,
        );

        self.render_system = Some(render_system);
        self.pipeline = Some(pipeline);
        self.start_time = Instant::now();
        Ok(())
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        let (Some(render_system), Some(pipeline)) = (&self.render_system, &mut self.pipeline) else {
            return;
        };

        let time_s = self.start_time.elapsed().as_secs_f32();

        match render_system.render(pipeline, time_s) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                if let (Some(window), Some(render_system)) = (&self.window, &mut self.render_system)
                {
                    let size = window.inner_size();
                    render_system.resize(size.width, size.height);
                }
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Spectral Ocean")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.initialize(Arc::clone(&window)) {
            log::error!("Initialization failed: {}", e);
            event_loop.exit();
            return;
        }

        log::info!("Spectral ocean is running, press ESC to quit");
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

/// Headless snapshot: one step at `time_s`, heights written as 8-bit grayscale
fn export(
    params: OceanParams,
    strategy: SynthesisStrategy,
    time_s: f32,
    path: &Path,
) -> Result<(), OceanError> {
    let gpu = if strategy.is_gpu() {
        Some(Arc::new(GpuContext::headless()?))
    } else {
        None
    };

    let n = params.grid_size as u32;
    let mut pipeline = OceanPipeline::from_seed(params, strategy, gpu)?;
    pipeline.step(time_s);
    let heights = pipeline.read_heights()?;

    let pixels = normalize_to_gray(&heights);
    image::save_buffer(path, &pixels, n, n, image::ColorType::L8)?;

    log::info!("Wrote {}x{} height field at t={}s to {}", n, n, time_s, path.display());
    Ok(())
}

/// Map the field's min..max onto 0..255
fn normalize_to_gray(heights: &[f32]) -> Vec<u8> {
    let (min, max) = heights
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)));
    let range = max - min;
    heights
        .iter()
        .map(|&h| {
            if range > 0.0 {
                ((h - min) / range * 255.0).round() as u8
            } else {
                128
            }
        })
        .collect()
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let params = args.ocean_params();
    if let Some(path) = &args.export {
        if let Err(e) = export(params, args.parse_strategy(), args.time, path) {
            log::error!("Export failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(params, args.viewer_strategy());
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
