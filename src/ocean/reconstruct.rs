//! Spatial reconstruction: h(k, t) → real height field dz, plus surface normals.
//!
//! Two interchangeable reconstructions produce the same field:
//! - [`inverse_dft`]: direct O(N²)-per-sample sum, the same kernel the GPU runs
//! - [`FftReconstructor`]: separable inverse FFT (rustfft), O(N² log N) per frame
//!
//! Both use centered coordinates on the integer lattice, so the phase of frequency
//! `(i, j)` at sample `(x, y)` is `((i - N/2)(x - N/2) + (j - N/2)(y - N/2)) mod N · 2π/N`.

use std::f32::consts::PI;
use std::sync::Arc;

use glam::Vec3;
use rustfft::{num_complex::Complex32, Fft, FftPlanner};

use crate::spectrum::ComplexGrid;

/// Full complex inverse-DFT sum at spatial sample `(x, y)`.
///
/// The real part is the height; the imaginary part vanishes for Hermitian input.
pub fn inverse_dft_sample(ht: &ComplexGrid, x: usize, y: usize) -> Complex32 {
    let n = ht.size() as i64;
    let half = n / 2;
    let xs = x as i64 - half;
    let ys = y as i64 - half;
    let step = 2.0 * PI / n as f32;

    let cells = ht.cells();
    let mut sum = Complex32::new(0.0, 0.0);
    for j in 0..n {
        let ky = j - half;
        for i in 0..n {
            let kx = i - half;
            let phase = (kx * xs + ky * ys).rem_euclid(n) as f32 * step;
            let (sin, cos) = phase.sin_cos();
            let h = cells[(j * n + i) as usize];
            sum.re += h.re * cos - h.im * sin;
            sum.im += h.im * cos + h.re * sin;
        }
    }
    sum
}

/// Direct inverse DFT of the whole grid into `dz` (row-major, `y*N + x`).
pub fn inverse_dft(ht: &ComplexGrid, dz: &mut [f32]) {
    let n = ht.size();
    assert_eq!(dz.len(), n * n, "height field must hold N² samples");

    for y in 0..n {
        for x in 0..n {
            dz[y * n + x] = inverse_dft_sample(ht, x, y).re;
        }
    }
}

/// Inverse FFT reconstruction with a planned transform and reusable buffers.
pub struct FftReconstructor {
    n: usize,
    fft: Arc<dyn Fft<f32>>,
    work: Vec<Complex32>,
    column: Vec<Complex32>,
    scratch: Vec<Complex32>,
}

impl FftReconstructor {
    pub fn new(n: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_inverse(n);
        let scratch_len = fft.get_inplace_scratch_len();
        Self {
            n,
            fft,
            work: vec![Complex32::new(0.0, 0.0); n * n],
            column: vec![Complex32::new(0.0, 0.0); n],
            scratch: vec![Complex32::new(0.0, 0.0); scratch_len],
        }
    }

    /// Same output as [`inverse_dft`], computed separably.
    ///
    /// Centering shifts become `(-1)^(i+j)` on input and `(-1)^(x+y)` on output;
    /// the constant `e^{iπN}` is 1 for even N.
    pub fn reconstruct(&mut self, ht: &ComplexGrid, dz: &mut [f32]) {
        let n = self.n;
        assert_eq!(ht.size(), n, "planned for N={n}, got N={}", ht.size());
        assert_eq!(dz.len(), n * n, "height field must hold N² samples");

        for (idx, (dst, src)) in self.work.iter_mut().zip(ht.cells()).enumerate() {
            *dst = if checker(idx % n, idx / n) { -*src } else { *src };
        }

        // Rows: frequency i → spatial x
        for row in self.work.chunks_exact_mut(n) {
            self.fft.process_with_scratch(row, &mut self.scratch);
        }

        // Columns: frequency j → spatial y
        for x in 0..n {
            for y in 0..n {
                self.column[y] = self.work[y * n + x];
            }
            self.fft
                .process_with_scratch(&mut self.column, &mut self.scratch);
            for y in 0..n {
                self.work[y * n + x] = self.column[y];
            }
        }

        for (idx, (out, value)) in dz.iter_mut().zip(&self.work).enumerate() {
            *out = if checker(idx % n, idx / n) {
                -value.re
            } else {
                value.re
            };
        }
    }
}

/// True where `(-1)^(a+b)` is negative
fn checker(a: usize, b: usize) -> bool {
    (a + b) % 2 == 1
}

/// Unit normals from wrapped central differences of `dz`.
///
/// `spacing` is the physical distance between neighboring samples; the normal is
/// `normalize(-∂z/∂x, -∂z/∂y, 1)` (Z up).
pub fn compute_normals(dz: &[f32], n: usize, spacing: f32, normals: &mut [Vec3]) {
    assert_eq!(dz.len(), n * n);
    assert_eq!(normals.len(), n * n);

    let inv = 1.0 / (2.0 * spacing);
    for y in 0..n {
        let y0 = (y + n - 1) % n;
        let y1 = (y + 1) % n;
        for x in 0..n {
            let x0 = (x + n - 1) % n;
            let x1 = (x + 1) % n;
            let slope_x = (dz[y * n + x1] - dz[y * n + x0]) * inv;
            let slope_y = (dz[y1 * n + x] - dz[y0 * n + x]) * inv;
            normals[y * n + x] = Vec3::new(-slope_x, -slope_y, 1.0).normalize();
        }
    }
}
