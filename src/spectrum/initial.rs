//! Time-invariant spectrum h0(k), built once from Phillips density and Gaussian noise.

use std::f32::consts::SQRT_2;

use rustfft::num_complex::Complex32;

use super::gaussian::{gaussian_pair, UniformSource};
use super::grid::{wave_vector, ComplexGrid};
use super::phillips::PhillipsModel;
use crate::params::OceanParams;

/// Complex Gaussian amplitudes h0(k) whose expected power follows the Phillips spectrum.
///
/// Written once at construction and read-only afterwards.
#[derive(Debug, Clone)]
pub struct InitialSpectrum {
    grid: ComplexGrid,
}

impl InitialSpectrum {
    /// Build h0 for every lattice cell in row-major order.
    ///
    /// Each cell consumes one Gaussian pair (two uniforms) from `source`, so the
    /// result is fully determined by the sequence the source yields.
    pub fn generate<S: UniformSource + ?Sized>(params: &OceanParams, source: &mut S) -> Self {
        let n = params.grid_size;
        let model = PhillipsModel::new(
            params.amplitude,
            params.gravity_m_per_s2,
            params.wind_speed_m_per_s,
            params.wind_direction_rad,
        );

        let mut cells = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                let k = wave_vector(n, params.domain_size_m, x, y);
                let p = model.density(k);
                let (g0, g1) = gaussian_pair(source);
                cells.push(initial_amplitude(p, g0, g1));
            }
        }

        Self {
            grid: ComplexGrid::from_cells(n, cells),
        }
    }

    pub fn from_grid(grid: ComplexGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &ComplexGrid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn get(&self, x: usize, y: usize) -> Complex32 {
        self.grid.get(x, y)
    }

    /// h0(-k) for cell `(x, y)` through the folded index
    pub fn mirrored(&self, x: usize, y: usize) -> Complex32 {
        self.grid.mirrored(x, y)
    }

    pub fn total_energy(&self) -> f32 {
        self.grid.energy()
    }
}

/// `h0 = (g0, g1) · sqrt(p/2) / sqrt(2)`
pub fn initial_amplitude(p: f32, g0: f32, g1: f32) -> Complex32 {
    let scale = (p * 0.5).sqrt() / SQRT_2;
    Complex32::new(g0 * scale, g1 * scale)
}
