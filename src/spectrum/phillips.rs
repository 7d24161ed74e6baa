//! Phillips wind-wave spectrum.

use glam::Vec2;

/// Wind and gravity constants feeding the spectrum.
#[derive(Debug, Clone, Copy)]
pub struct PhillipsModel {
    /// Amplitude constant A
    pub amplitude: f32,
    /// Gravity g (m/s²)
    pub gravity: f32,
    /// Wind speed V (m/s)
    pub wind_speed: f32,
    /// Unit wind direction ŵ
    pub wind_dir: Vec2,
}

impl PhillipsModel {
    pub fn new(amplitude: f32, gravity: f32, wind_speed: f32, wind_direction_rad: f32) -> Self {
        Self {
            amplitude,
            gravity,
            wind_speed,
            wind_dir: Vec2::from_angle(wind_direction_rad),
        }
    }

    /// Spectral density at wave-vector `k`. Always `>= 0` and finite, exactly 0 at `k = 0`.
    ///
    /// `P(k) = A · exp(-1/(k²L²)) / k⁴ · (k̂·ŵ)² · exp(-k²l²)` with `L = V²/g`
    /// and the ripple cutoff `l = L/1000`.
    pub fn density(&self, k: Vec2) -> f32 {
        let k2 = k.length_squared();
        if k2 == 0.0 {
            return 0.0;
        }

        let l = self.wind_speed * self.wind_speed / self.gravity;
        let k4 = k2 * k2;
        if !k4.is_normal() {
            return 0.0;
        }
        let w_dot_k = (k / k2.sqrt()).dot(self.wind_dir);

        let base = self.amplitude * (-1.0 / (k2 * l * l)).exp() / k4 * w_dot_k * w_dot_k;

        let small = l / 1000.0;
        let p = base * (-k2 * small * small).exp();
        if p.is_finite() {
            p
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn model() -> PhillipsModel {
        PhillipsModel::new(1.0, 9.81, 30.0, PI * 1.234)
    }

    #[test]
    fn test_zero_at_dc() {
        assert_eq!(model().density(Vec2::ZERO), 0.0);
        assert_eq!(
            PhillipsModel::new(50.0, 1.0, 1.0, 0.0).density(Vec2::ZERO),
            0.0
        );
    }

    #[test]
    fn test_non_negative_and_finite() {
        let m = model();
        for i in -16..16 {
            for j in -16..16 {
                let k = Vec2::new(i as f32, j as f32) * 0.05;
                let p = m.density(k);
                assert!(p >= 0.0 && p.is_finite(), "k={k:?} p={p}");
            }
        }
    }

    #[test]
    fn test_degenerate_wave_numbers_give_zero() {
        let m = model();
        // k⁴ underflows
        assert_eq!(m.density(Vec2::new(1.0e-12, 0.0)), 0.0);
        // k² overflows
        assert_eq!(m.density(Vec2::new(1.0e20, 1.0e20)), 0.0);
    }

    #[test]
    fn test_perpendicular_to_wind_is_zero() {
        let m = PhillipsModel::new(1.0, 9.81, 30.0, 0.0);
        assert!(m.density(Vec2::new(0.0, 0.3)).abs() < 1e-12);
        assert!(m.density(Vec2::new(0.3, 0.0)) > 0.0);
    }

    #[test]
    fn test_symmetric_under_negation() {
        let m = model();
        let k = Vec2::new(0.12, -0.07);
        assert!((m.density(k) - m.density(-k)).abs() <= 1e-6 * m.density(k));
    }

    #[test]
    fn test_matches_closed_form() {
        let m = PhillipsModel::new(2.0, 10.0, 10.0, 0.0);
        // L = 10, l = 0.01, k along the wind so (k̂·ŵ)² = 1
        let k = Vec2::new(0.5, 0.0);
        let expected = 2.0 * (-1.0f32 / (0.25 * 100.0)).exp() / 0.0625 * (-0.25f32 * 1e-4).exp();
        assert!((m.density(k) - expected).abs() < 1e-4 * expected);
    }
}
