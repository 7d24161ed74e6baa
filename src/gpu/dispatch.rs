//! Compute dispatch: buffers, pipelines, and the per-frame h(t) → dz pass sequence.

use bytemuck::Pod;

use super::layout::{workgroup_count, ParameterBlock, TIME_OFFSET};
use crate::error::OceanError;
use crate::params::OceanParams;
use crate::spectrum::InitialSpectrum;

/// Where the evolution kernel reads h0 from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum H0Binding {
    /// `array<vec2<f32>>` storage buffer
    StorageBuffer,
    /// `Rg32Float` texture sampled with `textureLoad`
    Texture,
}

/// Device-side copy of h0; kept alive for as long as the bind groups reference it.
enum H0Resource {
    Buffer(wgpu::Buffer),
    Texture {
        texture: wgpu::Texture,
        view: wgpu::TextureView,
    },
}

/// All GPU resources of the synthesis, created together and dropped together.
///
/// There is no partially-built state: if construction returns, every buffer,
/// pipeline, and bind group the frame needs exists.
pub struct GpuSynthesis {
    grid_size: u32,
    params_buffer: wgpu::Buffer,
    h0: H0Resource,
    ht_buffer: wgpu::Buffer,
    dz_buffer: wgpu::Buffer,
    evolve_pipeline: wgpu::ComputePipeline,
    evolve_bind_group: wgpu::BindGroup,
    reconstruct_pipeline: wgpu::ComputePipeline,
    reconstruct_bind_group: wgpu::BindGroup,
}

impl GpuSynthesis {
    /// Upload h0 and build both compute passes.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        params: &OceanParams,
        h0: &InitialSpectrum,
        binding: H0Binding,
    ) -> Self {
        let n = params.grid_size as u32;
        assert_eq!(h0.size(), params.grid_size, "h0 must match the grid size");

        let cell_count = (n * n) as wgpu::BufferAddress;
        let complex_size = cell_count * std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress;
        let real_size = cell_count * std::mem::size_of::<f32>() as wgpu::BufferAddress;

        // Parameter block (time rewritten every frame)
        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Ocean Params Buffer"),
            size: std::mem::size_of::<ParameterBlock>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(
            &params_buffer,
            0,
            bytemuck::bytes_of(&ParameterBlock::new(params, 0.0)),
        );

        let interleaved = h0.grid().interleaved();
        let h0 = match binding {
            H0Binding::StorageBuffer => {
                let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("H0 Buffer"),
                    size: complex_size,
                    usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                queue.write_buffer(&buffer, 0, bytemuck::cast_slice(&interleaved));
                H0Resource::Buffer(buffer)
            }
            H0Binding::Texture => {
                let size = wgpu::Extent3d {
                    width: n,
                    height: n,
                    depth_or_array_layers: 1,
                };
                let texture = device.create_texture(&wgpu::TextureDescriptor {
                    label: Some("H0 Texture"),
                    size,
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: wgpu::TextureDimension::D2,
                    format: wgpu::TextureFormat::Rg32Float,
                    usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                    view_formats: &[],
                });
                queue.write_texture(
                    wgpu::ImageCopyTexture {
                        texture: &texture,
                        mip_level: 0,
                        origin: wgpu::Origin3d::ZERO,
                        aspect: wgpu::TextureAspect::All,
                    },
                    bytemuck::cast_slice(&interleaved),
                    wgpu::ImageDataLayout {
                        offset: 0,
                        bytes_per_row: Some(n * std::mem::size_of::<[f32; 2]>() as u32),
                        rows_per_image: Some(n),
                    },
                    size,
                );
                let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
                H0Resource::Texture { texture, view }
            }
        };

        let ht_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Ht Buffer"),
            size: complex_size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let dz_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Dz Buffer"),
            size: real_size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        // === Evolution pass: h0 → h(t) ===
        let h0_entry = match binding {
            H0Binding::StorageBuffer => storage_entry(1, true),
            H0Binding::Texture => wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::COMPUTE,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
        };
        let evolve_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Evolve Bind Group Layout"),
            entries: &[uniform_entry(0), h0_entry, storage_entry(2, false)],
        });

        let h0_resource = match &h0 {
            H0Resource::Buffer(buffer) => buffer.as_entire_binding(),
            H0Resource::Texture { view, .. } => wgpu::BindingResource::TextureView(view),
        };
        let evolve_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Evolve Bind Group"),
            layout: &evolve_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: h0_resource,
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: ht_buffer.as_entire_binding(),
                },
            ],
        });

        let evolve_source = match binding {
            H0Binding::StorageBuffer => {
                concat!(include_str!("common.wgsl"), include_str!("evolve.wgsl"))
            }
            H0Binding::Texture => concat!(
                include_str!("common.wgsl"),
                include_str!("evolve_textured.wgsl")
            ),
        };
        let evolve_pipeline =
            compute_pipeline(device, "Evolve", evolve_source, &evolve_layout);

        // === Reconstruction pass: h(t) → dz ===
        let reconstruct_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Reconstruct Bind Group Layout"),
            entries: &[uniform_entry(0), storage_entry(1, true), storage_entry(2, false)],
        });

        let reconstruct_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Reconstruct Bind Group"),
            layout: &reconstruct_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: ht_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: dz_buffer.as_entire_binding(),
                },
            ],
        });

        let reconstruct_pipeline = compute_pipeline(
            device,
            "Reconstruct",
            concat!(include_str!("common.wgsl"), include_str!("reconstruct.wgsl")),
            &reconstruct_layout,
        );

        log::info!(
            "GPU synthesis ready: {}x{} grid, h0 via {:?}",
            n,
            n,
            binding
        );

        Self {
            grid_size: n,
            params_buffer,
            h0,
            ht_buffer,
            dz_buffer,
            evolve_pipeline,
            evolve_bind_group,
            reconstruct_pipeline,
            reconstruct_bind_group,
        }
    }

    /// Write the current simulation time into the parameter block.
    pub fn write_time(&self, queue: &wgpu::Queue, time_s: f32) {
        queue.write_buffer(&self.params_buffer, TIME_OFFSET, bytemuck::bytes_of(&time_s));
    }

    /// Record the evolution pass followed by the reconstruction pass.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder) {
        let groups = workgroup_count(self.grid_size);

        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("Ocean Compute Pass"),
            timestamp_writes: None,
        });

        pass.set_pipeline(&self.evolve_pipeline);
        pass.set_bind_group(0, &self.evolve_bind_group, &[]);
        pass.dispatch_workgroups(groups, groups, 1);

        // Same pass: wgpu orders the storage writes above before these reads
        pass.set_pipeline(&self.reconstruct_pipeline);
        pass.set_bind_group(0, &self.reconstruct_bind_group, &[]);
        pass.dispatch_workgroups(groups, groups, 1);
    }

    /// Update time, encode both passes, and submit. Does not wait for the GPU.
    pub fn step(&self, device: &wgpu::Device, queue: &wgpu::Queue, time_s: f32) {
        self.write_time(queue, time_s);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Ocean Compute Encoder"),
        });
        self.encode(&mut encoder);
        queue.submit(std::iter::once(encoder.finish()));

        log::debug!("dispatched ocean compute at t={time_s:.3}s");
    }

    /// Heights, `N²` f32 row-major, bindable as read-only storage
    pub fn height_buffer(&self) -> &wgpu::Buffer {
        &self.dz_buffer
    }

    /// Current h(t), `N²` interleaved complex
    pub fn spectrum_buffer(&self) -> &wgpu::Buffer {
        &self.ht_buffer
    }

    /// Whether h0 lives in a texture or a storage buffer
    pub fn h0_binding(&self) -> H0Binding {
        match self.h0 {
            H0Resource::Buffer(_) => H0Binding::StorageBuffer,
            H0Resource::Texture { .. } => H0Binding::Texture,
        }
    }

    /// Debug readback of dz. Blocks until the GPU has finished all submitted work.
    pub fn read_heights(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<Vec<f32>, OceanError> {
        read_buffer(device, queue, &self.dz_buffer)
    }

    /// Debug readback of h(t) as `[re, im]` pairs.
    pub fn read_spectrum(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<Vec<[f32; 2]>, OceanError> {
        read_buffer(device, queue, &self.ht_buffer)
    }
}

impl Drop for GpuSynthesis {
    fn drop(&mut self) {
        if let H0Resource::Texture { texture, .. } = &self.h0 {
            texture.destroy();
        }
        self.dz_buffer.destroy();
        self.ht_buffer.destroy();
    }
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn compute_pipeline(
    device: &wgpu::Device,
    name: &str,
    source: &'static str,
    bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::ComputePipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{name} Compute Shader")),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{name} Pipeline Layout")),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
        label: Some(&format!("{name} Compute Pipeline")),
        layout: Some(&layout),
        module: &shader,
        entry_point: Some("main"),
        compilation_options: Default::default(),
        cache: None,
    })
}

/// Copy a storage buffer into a staging buffer, map it, and wait for the result.
pub(crate) fn read_buffer<T: Pod>(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    source: &wgpu::Buffer,
) -> Result<Vec<T>, OceanError> {
    let size = source.size();
    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Readback Staging Buffer"),
        size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Readback Encoder"),
    });
    encoder.copy_buffer_to_buffer(source, 0, &staging, 0, size);
    queue.submit(Some(encoder.finish()));

    let slice = staging.slice(..);
    let (sender, receiver) = futures::channel::oneshot::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        // Receiver only disappears if the caller already gave up
        let _ = sender.send(result);
    });
    device.poll(wgpu::Maintain::Wait);

    pollster::block_on(receiver).map_err(|_| OceanError::ReadbackCancelled)??;

    let data = slice.get_mapped_range();
    let values = bytemuck::cast_slice(&data).to_vec();
    drop(data);
    staging.unmap();

    Ok(values)
}
