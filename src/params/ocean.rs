//! Ocean spectrum parameters: grid lattice, gravity, and wind.

use std::f32::consts::{PI, SQRT_2};

use crate::error::OceanError;

/// Grid and wind parameters for the spectral ocean.
///
/// Fixed once the spectrum is built. The wave-vector lattice is
/// `k(x, y) = (-N/2 + x, -N/2 + y) * (2π / domain_size_m)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OceanParams {
    /// Grid resolution N (cells per side, power of two)
    pub grid_size: usize,

    /// Physical extent of the square patch, Lx = Ly (meters)
    pub domain_size_m: f32,

    /// Gravitational acceleration (m/s²)
    pub gravity_m_per_s2: f32,

    /// Wind speed V (m/s). Sets the largest wave scale L = V²/g.
    pub wind_speed_m_per_s: f32,

    /// Wind direction θw (radians, measured from +X toward +Y)
    pub wind_direction_rad: f32,

    /// Phillips amplitude constant A (dimensionless)
    pub amplitude: f32,

    /// Time dilation divisor (seconds): waves evolve with `t / period`.
    /// A classic period `T` applied as `t / (2πT)` maps to `period = 2π·T`.
    pub period: f32,

    /// Seed for the uniform source feeding the Gaussian draws
    pub seed: u64,
}

/// Smallest accepted time-dilation divisor (seconds)
pub const MIN_PERIOD: f32 = 1.0e-3;

impl Default for OceanParams {
    fn default() -> Self {
        let grid_size = 64;
        Self {
            grid_size,
            domain_size_m: grid_size as f32 * 5.0 / 2.0, // 2.5 m per cell
            gravity_m_per_s2: 9.81,
            wind_speed_m_per_s: 30.0,
            wind_direction_rad: PI * 1.234,
            amplitude: 1.0e-6,
            period: 1.0,
            seed: 42,
        }
    }
}

impl OceanParams {
    /// Distance between neighboring samples (meters)
    pub fn cell_spacing_m(&self) -> f32 {
        self.domain_size_m / self.grid_size as f32
    }

    /// Largest wave arising from a continuous wind of speed V: L = V²/g
    pub fn wave_scale_m(&self) -> f32 {
        self.wind_speed_m_per_s * self.wind_speed_m_per_s / self.gravity_m_per_s2
    }

    /// Number of cells in the N×N grid
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Validate configuration (grid must be a power of two, physical constants
    /// positive and finite, lattice wave-numbers representable in f32)
    pub fn validate(&self) -> Result<(), OceanError> {
        if self.grid_size < 2 || !self.grid_size.is_power_of_two() {
            return Err(OceanError::NonPowerOfTwoGrid(self.grid_size));
        }
        if !(self.domain_size_m.is_finite() && self.domain_size_m > 0.0) {
            return Err(OceanError::InvalidDomain(self.domain_size_m));
        }
        if !(self.gravity_m_per_s2.is_finite() && self.gravity_m_per_s2 > 0.0) {
            return Err(OceanError::InvalidGravity(self.gravity_m_per_s2));
        }
        if !(self.wind_speed_m_per_s.is_finite()
            && self.wind_speed_m_per_s > 0.0
            && self.wave_scale_m().is_finite())
        {
            return Err(OceanError::InvalidWind(self.wind_speed_m_per_s));
        }
        if !(self.amplitude.is_finite() && self.amplitude >= 0.0) {
            return Err(OceanError::InvalidAmplitude(self.amplitude));
        }
        if !(self.period.is_finite() && self.period >= MIN_PERIOD) {
            return Err(OceanError::InvalidPeriod(self.period));
        }

        // k⁴ of the shortest nonzero wave-vector must stay normal, and the
        // Nyquist corner must not overflow k⁴ or g·|k|
        let k_min = 2.0 * PI / self.domain_size_m;
        let k_max = k_min * (self.grid_size as f32 / 2.0) * SQRT_2;
        let k_min4 = (k_min * k_min) * (k_min * k_min);
        let k_max4 = (k_max * k_max) * (k_max * k_max);
        if !(k_min4.is_normal() && k_max4.is_finite() && (self.gravity_m_per_s2 * k_max).is_finite())
        {
            return Err(OceanError::InvalidDomain(self.domain_size_m));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        let params = OceanParams::default();
        assert!(params.validate().is_ok());
        assert!((params.cell_spacing_m() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let params = OceanParams {
            grid_size: 48,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(OceanError::NonPowerOfTwoGrid(48))
        ));

        let tiny = OceanParams {
            grid_size: 1,
            ..Default::default()
        };
        assert!(tiny.validate().is_err());
    }

    #[test]
    fn test_rejects_degenerate_physics() {
        let no_domain = OceanParams {
            domain_size_m: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            no_domain.validate(),
            Err(OceanError::InvalidDomain(_))
        ));

        let no_gravity = OceanParams {
            gravity_m_per_s2: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            no_gravity.validate(),
            Err(OceanError::InvalidGravity(_))
        ));

        let nan_wind = OceanParams {
            wind_speed_m_per_s: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(nan_wind.validate(), Err(OceanError::InvalidWind(_))));
    }

    #[test]
    fn test_rejects_unrepresentable_extremes() {
        let cases = [
            OceanParams {
                grid_size: 4,
                domain_size_m: 1.0e13,
                ..Default::default()
            },
            OceanParams {
                grid_size: 4,
                domain_size_m: 1.0e-39,
                ..Default::default()
            },
            OceanParams {
                grid_size: 4,
                gravity_m_per_s2: f32::INFINITY,
                ..Default::default()
            },
            OceanParams {
                grid_size: 4,
                period: 1.0e-45,
                ..Default::default()
            },
            OceanParams {
                grid_size: 4,
                wind_speed_m_per_s: 1.0e30,
                ..Default::default()
            },
            OceanParams {
                grid_size: 4,
                amplitude: f32::NAN,
                ..Default::default()
            },
        ];
        for params in cases {
            assert!(params.validate().is_err(), "{params:?}");
        }
    }

    #[test]
    fn test_wave_scale() {
        let params = OceanParams {
            wind_speed_m_per_s: 30.0,
            gravity_m_per_s2: 9.0,
            ..Default::default()
        };
        assert!((params.wave_scale_m() - 100.0).abs() < 1e-4);
    }
}
