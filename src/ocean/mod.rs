//! Ocean surface: time evolution, spatial reconstruction, and the render lattice.

mod evolve;
mod mesh;
mod reconstruct;
mod synthesis;

// Re-export public types
pub use evolve::{dispersion, evolve, evolve_cell};
pub use mesh::{SurfaceMesh, Vertex};
pub use reconstruct::{compute_normals, inverse_dft, inverse_dft_sample, FftReconstructor};
pub use synthesis::{CpuSynthesis, Reconstruction};
