//! Error types for spectrum construction, device setup, and readback.

use crate::pipeline::SynthesisStrategy;

/// Everything that can stop the ocean from starting (or a debug readback from completing).
///
/// Per-cell numerical degeneracies (zero wave-vector, `u1` close to 1) are handled
/// where they occur and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum OceanError {
    /// Grid resolution must be a power of two and at least 2.
    #[error("grid size must be a power of two >= 2, got {0}")]
    NonPowerOfTwoGrid(usize),

    #[error("domain size must be positive and finite, got {0}")]
    InvalidDomain(f32),

    #[error("gravity must be positive and finite, got {0}")]
    InvalidGravity(f32),

    #[error("wind speed must be positive and finite, got {0}")]
    InvalidWind(f32),

    #[error("amplitude must be finite and non-negative, got {0}")]
    InvalidAmplitude(f32),

    #[error("period must be finite and at least 1e-3 s, got {0}")]
    InvalidPeriod(f32),

    /// No compute-capable adapter on this host.
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to map readback buffer: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),

    /// The map callback was dropped before it reported a result.
    #[error("readback was cancelled before completion")]
    ReadbackCancelled,

    /// A GPU strategy was selected but no device was handed in.
    #[error("strategy {0:?} needs a GPU context")]
    DeviceRequired(SynthesisStrategy),

    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),
}
