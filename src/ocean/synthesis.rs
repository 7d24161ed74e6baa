//! CPU synthesis: evolve h0 and reconstruct dz and normals each frame.

use glam::Vec3;

use super::evolve::evolve;
use super::reconstruct::{compute_normals, inverse_dft, FftReconstructor};
use crate::params::OceanParams;
use crate::spectrum::{ComplexGrid, InitialSpectrum};

/// Which inverse transform turns h(k, t) into heights
pub enum Reconstruction {
    /// Direct inverse DFT, O(N⁴) per frame
    Direct,
    /// Separable inverse FFT, O(N² log N) per frame
    Fft(FftReconstructor),
}

/// Per-frame CPU state: h(t), dz, and normals, fully overwritten on every advance.
pub struct CpuSynthesis {
    params: OceanParams,
    reconstruction: Reconstruction,
    ht: ComplexGrid,
    dz: Vec<f32>,
    normals: Vec<Vec3>,
}

impl CpuSynthesis {
    pub fn new(params: &OceanParams, use_fft: bool) -> Self {
        let n = params.grid_size;
        let reconstruction = if use_fft {
            Reconstruction::Fft(FftReconstructor::new(n))
        } else {
            Reconstruction::Direct
        };
        Self {
            params: params.clone(),
            reconstruction,
            ht: ComplexGrid::zeros(n),
            dz: vec![0.0; n * n],
            normals: vec![Vec3::Z; n * n],
        }
    }

    /// Recompute h(t), dz, and normals for simulation time `time_s`.
    pub fn advance(&mut self, h0: &InitialSpectrum, time_s: f32) {
        evolve(h0, &self.params, time_s, &mut self.ht);

        match &mut self.reconstruction {
            Reconstruction::Direct => inverse_dft(&self.ht, &mut self.dz),
            Reconstruction::Fft(fft) => fft.reconstruct(&self.ht, &mut self.dz),
        }

        compute_normals(
            &self.dz,
            self.params.grid_size,
            self.params.cell_spacing_m(),
            &mut self.normals,
        );
    }

    pub fn spectrum(&self) -> &ComplexGrid {
        &self.ht
    }

    /// Heights, row-major `y*N + x`
    pub fn heights(&self) -> &[f32] {
        &self.dz
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::SeededUniform;

    #[test]
    fn test_heights_finite_across_configs() {
        for &(n, domain) in &[(2usize, 1.0f32), (4, 10.0), (8, 20.0), (16, 40.0), (16, 1.0e4)] {
            let params = OceanParams {
                grid_size: n,
                domain_size_m: domain,
                amplitude: 1.0,
                ..Default::default()
            };
            let h0 = InitialSpectrum::generate(&params, &mut SeededUniform::new(21));
            let mut cpu = CpuSynthesis::new(&params, false);
            for &t in &[0.0, 0.5, 100.0] {
                cpu.advance(&h0, t);
                assert!(cpu.heights().iter().all(|h| h.is_finite()), "N={n} L={domain} t={t}");
                assert!(cpu.normals().iter().all(|v| v.is_finite()));
            }
        }
    }

    #[test]
    fn test_heights_finite_at_accepted_extremes() {
        let cases = [
            OceanParams {
                grid_size: 4,
                domain_size_m: 1.0e9,
                ..Default::default()
            },
            OceanParams {
                grid_size: 4,
                domain_size_m: 1.0e-3,
                amplitude: 1.0,
                ..Default::default()
            },
            OceanParams {
                grid_size: 4,
                period: crate::params::MIN_PERIOD,
                amplitude: 1.0,
                ..Default::default()
            },
        ];
        for params in cases {
            params.validate().unwrap();
            let h0 = InitialSpectrum::generate(&params, &mut SeededUniform::new(5));
            for use_fft in [false, true] {
                let mut cpu = CpuSynthesis::new(&params, use_fft);
                for &t in &[0.0, 1.0, 1.0e6] {
                    cpu.advance(&h0, t);
                    assert!(
                        cpu.heights().iter().all(|h| h.is_finite()),
                        "{params:?} t={t}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_direct_and_fft_agree() {
        let params = OceanParams {
            grid_size: 16,
            amplitude: 1.0e-4,
            ..Default::default()
        };
        let h0 = InitialSpectrum::generate(&params, &mut SeededUniform::new(8));
        let mut direct = CpuSynthesis::new(&params, false);
        let mut fast = CpuSynthesis::new(&params, true);
        direct.advance(&h0, 2.5);
        fast.advance(&h0, 2.5);

        let peak = direct
            .heights()
            .iter()
            .fold(0.0f32, |m, h| m.max(h.abs()))
            .max(1e-12);
        for (a, b) in direct.heights().iter().zip(fast.heights()) {
            assert!((a - b).abs() <= 1e-4 * peak, "direct {a} fft {b}");
        }
    }

    #[test]
    fn test_surface_moves_over_time() {
        let params = OceanParams {
            grid_size: 8,
            amplitude: 1.0,
            ..Default::default()
        };
        let h0 = InitialSpectrum::generate(&params, &mut SeededUniform::new(4));
        let mut cpu = CpuSynthesis::new(&params, true);
        cpu.advance(&h0, 0.0);
        let first = cpu.heights().to_vec();
        cpu.advance(&h0, 1.0);
        assert_ne!(first.as_slice(), cpu.heights());
    }
}
