//! Parameter definitions with physical units and documented semantics.
//!
//! Every tunable constant of the ocean lives here with:
//! - Physical units (meters, seconds, radians)
//! - Documented ranges and meanings
//! - Validation where a bad value would poison the spectrum

mod ocean;
mod render;

// Re-export all types
pub use ocean::{OceanParams, MIN_PERIOD};
pub use render::RenderConfig;
