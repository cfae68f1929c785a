//! Process-level configuration for SpiralScope.

pub mod tracing;
pub mod visdom_env;
