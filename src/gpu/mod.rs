//! GPU compute path: device setup, the parameter block, and the dispatch manager.

mod context;
mod dispatch;
mod layout;

pub use context::{create_instance, GpuContext};
pub use dispatch::{GpuSynthesis, H0Binding};
pub use layout::{workgroup_count, ParameterBlock, TIME_OFFSET, WORKGROUP_SIZE};
