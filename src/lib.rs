//! Spectral ocean library - Phillips-spectrum wave synthesis on CPU or GPU

pub mod cli;
pub mod error;
pub mod gpu;
pub mod ocean;
pub mod params;
pub mod pipeline;
pub mod rendering;
pub mod spectrum;
