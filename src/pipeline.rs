//! Strategy selection and the per-frame synthesis entry point.

use std::sync::Arc;

use glam::Vec3;

use crate::error::OceanError;
use crate::gpu::{GpuContext, GpuSynthesis, H0Binding};
use crate::ocean::{compute_normals, CpuSynthesis};
use crate::params::OceanParams;
use crate::spectrum::{InitialSpectrum, SeededUniform, UniformSource};

/// How h(t) and dz are produced each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynthesisStrategy {
    /// CPU evolution and direct inverse DFT (reference)
    #[default]
    DirectDft,
    /// CPU evolution and separable inverse FFT
    Fft,
    /// GPU compute with h0 in a float texture
    TexturedH0,
    /// GPU compute with h0 in a storage buffer
    ComputeDispatch,
}

impl SynthesisStrategy {
    pub fn is_gpu(self) -> bool {
        self.h0_binding().is_some()
    }

    /// Where a GPU strategy keeps h0; `None` for CPU strategies
    pub fn h0_binding(self) -> Option<H0Binding> {
        match self {
            Self::DirectDft | Self::Fft => None,
            Self::TexturedH0 => Some(H0Binding::Texture),
            Self::ComputeDispatch => Some(H0Binding::StorageBuffer),
        }
    }
}

/// Device copy of CPU heights, rewritten every step
struct DeviceMirror {
    ctx: Arc<GpuContext>,
    buffer: wgpu::Buffer,
}

enum Backend {
    Cpu {
        synthesis: CpuSynthesis,
        mirror: Option<DeviceMirror>,
    },
    Gpu {
        synthesis: GpuSynthesis,
        ctx: Arc<GpuContext>,
    },
}

/// Initial spectrum plus the backend that animates it.
pub struct OceanPipeline {
    params: OceanParams,
    strategy: SynthesisStrategy,
    h0: InitialSpectrum,
    backend: Backend,
}

impl OceanPipeline {
    /// Validate parameters, build h0 from `source`, and set up the chosen backend.
    pub fn new<S: UniformSource + ?Sized>(
        params: OceanParams,
        strategy: SynthesisStrategy,
        gpu: Option<Arc<GpuContext>>,
        source: &mut S,
    ) -> Result<Self, OceanError> {
        params.validate()?;

        if strategy.is_gpu() && gpu.is_none() {
            return Err(OceanError::DeviceRequired(strategy));
        }

        let h0 = InitialSpectrum::generate(&params, source);
        log::info!(
            "Ocean: {n}x{n} grid over {:.1} m, strategy {:?}, h0 energy {:.3e}",
            params.domain_size_m,
            strategy,
            h0.total_energy(),
            n = params.grid_size,
        );

        let backend = match (strategy.h0_binding(), gpu) {
            (Some(binding), Some(ctx)) => Backend::Gpu {
                synthesis: GpuSynthesis::new(&ctx.device, &ctx.queue, &params, &h0, binding),
                ctx,
            },
            (Some(_), None) => return Err(OceanError::DeviceRequired(strategy)),
            (None, ctx) => {
                let mirror = ctx.map(|ctx| {
                    let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                        label: Some("Dz Upload Buffer"),
                        size: (params.cell_count() * std::mem::size_of::<f32>())
                            as wgpu::BufferAddress,
                        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
                        mapped_at_creation: false,
                    });
                    DeviceMirror { ctx, buffer }
                });
                Backend::Cpu {
                    synthesis: CpuSynthesis::new(&params, strategy == SynthesisStrategy::Fft),
                    mirror,
                }
            }
        };

        Ok(Self {
            params,
            strategy,
            h0,
            backend,
        })
    }

    /// Same as [`OceanPipeline::new`] with the seeded source named by `params.seed`.
    pub fn from_seed(
        params: OceanParams,
        strategy: SynthesisStrategy,
        gpu: Option<Arc<GpuContext>>,
    ) -> Result<Self, OceanError> {
        let mut source = SeededUniform::new(params.seed);
        Self::new(params, strategy, gpu, &mut source)
    }

    /// Advance to `time_s` seconds. GPU work is submitted, not awaited.
    pub fn step(&mut self, time_s: f32) {
        match &mut self.backend {
            Backend::Cpu { synthesis, mirror } => {
                synthesis.advance(&self.h0, time_s);
                if let Some(mirror) = mirror {
                    mirror.ctx.queue.write_buffer(
                        &mirror.buffer,
                        0,
                        bytemuck::cast_slice(synthesis.heights()),
                    );
                }
            }
            Backend::Gpu { synthesis, ctx } => synthesis.step(&ctx.device, &ctx.queue, time_s),
        }
    }

    /// Record this frame's synthesis into a caller-owned encoder.
    ///
    /// On the GPU path this only writes the time and records both passes, so the
    /// caller can submit synthesis and rendering together. CPU strategies
    /// compute immediately and queue the upload.
    pub fn encode(&mut self, encoder: &mut wgpu::CommandEncoder, time_s: f32) {
        if let Backend::Gpu { synthesis, ctx } = &self.backend {
            synthesis.write_time(&ctx.queue, time_s);
            synthesis.encode(encoder);
            return;
        }
        self.step(time_s);
    }

    /// Device buffer holding dz (`N²` f32), if this pipeline has a device.
    pub fn height_buffer(&self) -> Option<&wgpu::Buffer> {
        match &self.backend {
            Backend::Cpu { mirror, .. } => mirror.as_ref().map(|mirror| &mirror.buffer),
            Backend::Gpu { synthesis, .. } => Some(synthesis.height_buffer()),
        }
    }

    /// Heights of the last step, row-major. Blocks on the GPU path.
    pub fn read_heights(&self) -> Result<Vec<f32>, OceanError> {
        match &self.backend {
            Backend::Cpu { synthesis, .. } => Ok(synthesis.heights().to_vec()),
            Backend::Gpu { synthesis, ctx } => synthesis.read_heights(&ctx.device, &ctx.queue),
        }
    }

    /// Unit surface normals of the last step.
    pub fn read_normals(&self) -> Result<Vec<Vec3>, OceanError> {
        match &self.backend {
            Backend::Cpu { synthesis, .. } => Ok(synthesis.normals().to_vec()),
            Backend::Gpu { .. } => {
                let heights = self.read_heights()?;
                let mut normals = vec![Vec3::Z; heights.len()];
                compute_normals(
                    &heights,
                    self.params.grid_size,
                    self.params.cell_spacing_m(),
                    &mut normals,
                );
                Ok(normals)
            }
        }
    }

    pub fn initial_spectrum(&self) -> &InitialSpectrum {
        &self.h0
    }

    pub fn params(&self) -> &OceanParams {
        &self.params
    }

    pub fn strategy(&self) -> SynthesisStrategy {
        self.strategy
    }
}
