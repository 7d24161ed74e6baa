//! Device acquisition, windowed or headless.

use crate::error::OceanError;

/// Adapter, device, and queue shared by the compute passes and the renderer.
pub struct GpuContext {
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

/// Instance over every available backend
pub fn create_instance() -> wgpu::Instance {
    wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}

impl GpuContext {
    /// Request an adapter (optionally compatible with a window surface) and its device.
    pub async fn request(
        instance: &wgpu::Instance,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> Result<Self, OceanError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(OceanError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Ocean Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let info = adapter.get_info();
        log::info!("GPU: {} ({:?})", info.name, info.backend);

        Ok(Self {
            adapter,
            device,
            queue,
        })
    }

    /// Headless context for compute-only use (export mode, tests).
    pub fn headless() -> Result<Self, OceanError> {
        let instance = create_instance();
        pollster::block_on(Self::request(&instance, None))
    }
}
