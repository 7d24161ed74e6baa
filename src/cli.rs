//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::OceanParams;
use crate::pipeline::SynthesisStrategy;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "spectral-ocean")]
#[command(about = "Phillips-spectrum ocean surface synthesis", long_about = None)]
pub struct Args {
    /// Samples per side of the grid (power of two)
    #[arg(long, value_name = "N", default_value = "64")]
    pub grid_size: usize,

    /// Side length of the simulated patch (meters, defaults to 2.5 * N)
    #[arg(long, value_name = "METERS")]
    pub domain_size: Option<f32>,

    /// Wind speed (m/s)
    #[arg(long, value_name = "M_PER_S", default_value = "30")]
    pub wind_speed: f32,

    /// Wind direction (radians, counter-clockwise from +X)
    #[arg(long, value_name = "RADIANS")]
    pub wind_direction: Option<f32>,

    /// Gravitational acceleration (m/s²)
    #[arg(long, value_name = "M_PER_S2", default_value = "9.81")]
    pub gravity: f32,

    /// Time dilation divisor: waves evolve with t / period (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "1")]
    pub period: f32,

    /// Phillips amplitude constant
    #[arg(long, value_name = "A")]
    pub amplitude: Option<f32>,

    /// Seed for the Gaussian noise behind h0
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Synthesis strategy: direct-dft, fft, textured-h0, compute
    /// (default: compute in the viewer, direct-dft for --export)
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<String>,

    /// Write one height-field snapshot as a grayscale PNG and exit
    #[arg(long, value_name = "PNG")]
    pub export: Option<PathBuf>,

    /// Simulation time of the exported snapshot (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "0")]
    pub time: f32,
}

impl Args {
    /// Build ocean parameters, filling unset values from the defaults for this grid size
    pub fn ocean_params(&self) -> OceanParams {
        let base = OceanParams::default();
        OceanParams {
            grid_size: self.grid_size,
            domain_size_m: self
                .domain_size
                .unwrap_or(self.grid_size as f32 * 5.0 / 2.0),
            gravity_m_per_s2: self.gravity,
            wind_speed_m_per_s: self.wind_speed,
            wind_direction_rad: self.wind_direction.unwrap_or(base.wind_direction_rad),
            amplitude: self.amplitude.unwrap_or(base.amplitude),
            period: self.period,
            seed: self.seed,
        }
    }

    /// Strategy for the headless export: the CPU reference unless overridden
    pub fn parse_strategy(&self) -> SynthesisStrategy {
        self.strategy_or(SynthesisStrategy::DirectDft)
    }

    /// Strategy for the windowed viewer: GPU compute unless overridden
    pub fn viewer_strategy(&self) -> SynthesisStrategy {
        self.strategy_or(SynthesisStrategy::ComputeDispatch)
    }

    fn strategy_or(&self, default: SynthesisStrategy) -> SynthesisStrategy {
        let Some(name) = &self.strategy else {
            return default;
        };
        match name.to_lowercase().as_str() {
            "direct-dft" | "direct" | "dft" => SynthesisStrategy::DirectDft,
            "fft" => SynthesisStrategy::Fft,
            "textured-h0" | "textured" => SynthesisStrategy::TexturedH0,
            "compute" | "compute-dispatch" => SynthesisStrategy::ComputeDispatch,
            other => {
                log::warn!("Unknown strategy '{}', using {:?}", other, default);
                default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_ocean_params() {
        let args = Args::parse_from(["spectral-ocean"]);
        let params = args.ocean_params();
        let expected = OceanParams::default();
        assert_eq!(params.grid_size, expected.grid_size);
        assert_eq!(params.domain_size_m, expected.domain_size_m);
        assert_eq!(params.wind_direction_rad, expected.wind_direction_rad);
        assert_eq!(params.gravity_m_per_s2, expected.gravity_m_per_s2);
        assert_eq!(params.period, expected.period);
        assert_eq!(args.parse_strategy(), SynthesisStrategy::DirectDft);
        assert_eq!(args.viewer_strategy(), SynthesisStrategy::ComputeDispatch);
        assert!(args.export.is_none());
    }

    #[test]
    fn test_domain_follows_grid_size() {
        let args = Args::parse_from(["spectral-ocean", "--grid-size", "128"]);
        assert_eq!(args.ocean_params().domain_size_m, 320.0);

        let args = Args::parse_from(["spectral-ocean", "--grid-size", "16", "--domain-size", "100"]);
        assert_eq!(args.ocean_params().domain_size_m, 100.0);
    }

    #[test]
    fn test_parse_strategy() {
        let cases = [
            ("fft", SynthesisStrategy::Fft),
            ("Textured-H0", SynthesisStrategy::TexturedH0),
            ("compute", SynthesisStrategy::ComputeDispatch),
            ("bogus", SynthesisStrategy::DirectDft),
        ];
        for (name, expected) in cases {
            let args = Args::parse_from(["spectral-ocean", "--strategy", name]);
            assert_eq!(args.parse_strategy(), expected);
        }

        // Explicit choice overrides the viewer default; unknown names fall back to it
        let args = Args::parse_from(["spectral-ocean", "--strategy", "fft"]);
        assert_eq!(args.viewer_strategy(), SynthesisStrategy::Fft);
        let args = Args::parse_from(["spectral-ocean", "--strategy", "bogus"]);
        assert_eq!(args.viewer_strategy(), SynthesisStrategy::ComputeDispatch);
    }

    #[test]
    fn test_gravity_and_period_flags() {
        let args = Args::parse_from(["spectral-ocean", "--gravity", "3.7", "--period", "6.2832"]);
        let params = args.ocean_params();
        assert_eq!(params.gravity_m_per_s2, 3.7);
        assert_eq!(params.period, 6.2832);
        assert!(params.validate().is_ok());
    }
}
