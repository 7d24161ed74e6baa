//! Standard-normal samples via the Box–Muller transform.

use std::f32::consts::PI;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of uniform samples in `(0, 1]`.
///
/// Zero must never be produced: `ln(0)` has no finite Box–Muller radius.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f32;
}

/// Seeded uniform source, reproducible across runs for the same seed.
pub struct SeededUniform {
    rng: StdRng,
}

impl SeededUniform {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl UniformSource for SeededUniform {
    fn next_uniform(&mut self) -> f32 {
        // gen() is [0, 1); flip it so 0 is excluded
        1.0 - self.rng.gen::<f32>()
    }
}

/// Box–Muller transform of two uniforms into two independent standard normals.
///
/// Precondition: `u1 > 0`. The radius is clamped to 0 when `-2 ln u1 <= 0`
/// (i.e. `u1` at or numerically next to 1).
pub fn box_muller(u1: f32, u2: f32) -> (f32, f32) {
    debug_assert!(u1 > 0.0, "Box-Muller needs u1 in (0, 1], got {u1}");

    let log = -2.0 * u1.ln();
    let radius = if log <= 0.0 { 0.0 } else { log.sqrt() };
    let theta = 2.0 * PI * u2;
    (radius * theta.cos(), radius * theta.sin())
}

/// Draw one Gaussian pair, consuming `u1` then `u2` from the source.
pub fn gaussian_pair<S: UniformSource + ?Sized>(source: &mut S) -> (f32, f32) {
    let u1 = source.next_uniform();
    let u2 = source.next_uniform();
    box_muller(u1, u2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_matches_log() {
        for &(u1, u2) in &[(0.5, 0.25), (0.01, 0.9), (0.999, 0.0), (0.3, 0.6)] {
            let (z0, z1) = box_muller(u1, u2);
            let r2 = -2.0 * f32::ln(u1);
            assert!(
                (z0 * z0 + z1 * z1 - r2).abs() < 1e-4 * r2.max(1.0),
                "u1={u1} u2={u2}"
            );
        }
    }

    #[test]
    fn test_unit_sample_collapses_to_zero() {
        let (z0, z1) = box_muller(1.0, 0.37);
        assert_eq!(z0, 0.0);
        assert_eq!(z1, 0.0);
    }

    #[test]
    fn test_quarter_turn() {
        // theta = π/2: all of the radius goes to z1
        let (z0, z1) = box_muller(0.5, 0.25);
        let r = (2.0 * std::f32::consts::LN_2).sqrt();
        assert!(z0.abs() < 1e-6);
        assert!((z1 - r).abs() < 1e-6);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = SeededUniform::new(7);
        let mut b = SeededUniform::new(7);
        for _ in 0..64 {
            let (x, y) = (a.next_uniform(), b.next_uniform());
            assert_eq!(x, y);
            assert!(x > 0.0 && x <= 1.0);
        }
    }

    #[test]
    fn test_samples_look_standard_normal() {
        let mut source = SeededUniform::new(1234);
        let count = 20_000;
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for _ in 0..count / 2 {
            let (z0, z1) = gaussian_pair(&mut source);
            sum += (z0 + z1) as f64;
            sum_sq += (z0 * z0 + z1 * z1) as f64;
        }
        let mean = sum / count as f64;
        let variance = sum_sq / count as f64 - mean * mean;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((variance - 1.0).abs() < 0.05, "variance {variance}");
    }
}
