//! Frequency-domain wave spectrum: random source, Phillips model, and h0 construction.

mod gaussian;
mod grid;
mod initial;
mod phillips;

pub use gaussian::{box_muller, gaussian_pair, SeededUniform, UniformSource};
pub use grid::{mirror_index, wave_vector, ComplexGrid};
pub use initial::{initial_amplitude, InitialSpectrum};
pub use phillips::PhillipsModel;
