//! Time evolution of h0 through the deep-water dispersion relation.

use rustfft::num_complex::Complex32;

use crate::params::OceanParams;
use crate::spectrum::{wave_vector, ComplexGrid, InitialSpectrum};

/// Deep-water dispersion: ω = sqrt(g·|k|)
pub fn dispersion(gravity: f32, k_len: f32) -> f32 {
    (gravity * k_len).sqrt()
}

/// `e^{iθ}`
fn unit_phasor(theta: f32) -> Complex32 {
    Complex32::new(theta.cos(), theta.sin())
}

/// h(k, t) = h0(k)·e^{iωt} + conj(h0(-k))·e^{-iωt} for lattice cell `(x, y)`.
///
/// `t` is the already time-dilated evolution time.
pub fn evolve_cell(
    h0: &InitialSpectrum,
    domain_size: f32,
    gravity: f32,
    x: usize,
    y: usize,
    t: f32,
) -> Complex32 {
    let k = wave_vector(h0.size(), domain_size, x, y);
    let omega_t = dispersion(gravity, k.length()) * t;

    let h0_k = h0.get(x, y);
    let h0_mk = h0.mirrored(x, y);
    h0_k * unit_phasor(omega_t) + h0_mk.conj() * unit_phasor(-omega_t)
}

/// Rewrite every cell of `out` with h(k, t) at simulation time `time_s`.
pub fn evolve(h0: &InitialSpectrum, params: &OceanParams, time_s: f32, out: &mut ComplexGrid) {
    let n = h0.size();
    assert_eq!(out.size(), n, "h(t) grid must match h0");

    let t = time_s / params.period;
    let cells = out.cells_mut();
    for y in 0..n {
        for x in 0..n {
            cells[y * n + x] = evolve_cell(
                h0,
                params.domain_size_m,
                params.gravity_m_per_s2,
                x,
                y,
                t,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::{mirror_index, SeededUniform};

    fn small_params() -> OceanParams {
        OceanParams {
            grid_size: 8,
            domain_size_m: 20.0,
            amplitude: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_dispersion_monotonic() {
        let mut last = 0.0;
        for i in 0..200 {
            let w = dispersion(9.81, i as f32 * 0.05);
            assert!(w >= last);
            last = w;
        }
        assert_eq!(dispersion(9.81, 0.0), 0.0);
    }

    #[test]
    fn test_time_zero_is_fold_sum() {
        let params = small_params();
        let h0 = InitialSpectrum::generate(&params, &mut SeededUniform::new(11));
        let mut ht = ComplexGrid::zeros(8);
        evolve(&h0, &params, 0.0, &mut ht);

        for y in 0..8 {
            for x in 0..8 {
                let expected = h0.get(x, y) + h0.mirrored(x, y).conj();
                assert_eq!(ht.get(x, y), expected, "cell ({x},{y})");
            }
        }
    }

    #[test]
    fn test_result_is_hermitian() {
        let params = small_params();
        let h0 = InitialSpectrum::generate(&params, &mut SeededUniform::new(12));
        let mut ht = ComplexGrid::zeros(8);
        evolve(&h0, &params, 3.7, &mut ht);

        let cells = ht.cells();
        for y in 0..8 {
            for x in 0..8 {
                let k = cells[y * 8 + x];
                let mk = cells[mirror_index(8, x, y)];
                let scale = (h0.get(x, y).norm() + h0.mirrored(x, y).norm()).max(1e-12);
                assert!((k - mk.conj()).norm() <= 1e-5 * scale, "cell ({x},{y})");
            }
        }
    }

    #[test]
    fn test_period_dilates_time() {
        let params = small_params();
        let slow = OceanParams {
            period: 2.0,
            ..small_params()
        };
        let h0 = InitialSpectrum::generate(&params, &mut SeededUniform::new(13));
        let mut a = ComplexGrid::zeros(8);
        let mut b = ComplexGrid::zeros(8);
        evolve(&h0, &params, 1.5, &mut a);
        evolve(&h0, &slow, 3.0, &mut b);
        assert_eq!(a, b);
    }
}
