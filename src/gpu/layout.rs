//! Host-side mirrors of the WGSL uniform layout.

use bytemuck::{Pod, Zeroable};

use crate::params::OceanParams;

/// Threads per workgroup along each axis (matches `@workgroup_size(8, 8, 1)`)
pub const WORKGROUP_SIZE: u32 = 8;

/// Byte offset of `time` inside [`ParameterBlock`]; the only field rewritten per frame
pub const TIME_OFFSET: wgpu::BufferAddress = 0;

/// Uniform parameter block read by both compute passes.
///
/// `time, n, amplitude, period` lead in this order; gravity and domain size
/// follow so the kernels carry no baked-in physics. Padded to 32 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParameterBlock {
    pub time: f32,
    pub n: u32,
    pub amplitude: f32,
    pub period: f32,
    pub gravity: f32,
    pub domain_size: f32,
    pub _padding: [f32; 2],
}

impl ParameterBlock {
    pub fn new(params: &OceanParams, time_s: f32) -> Self {
        Self {
            time: time_s,
            n: params.grid_size as u32,
            amplitude: params.amplitude,
            period: params.period,
            gravity: params.gravity_m_per_s2,
            domain_size: params.domain_size_m,
            _padding: [0.0; 2],
        }
    }
}

/// Workgroups needed to cover `n` invocations along one axis
pub fn workgroup_count(n: u32) -> u32 {
    n.div_ceil(WORKGROUP_SIZE)
}
