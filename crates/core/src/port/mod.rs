// Port Layer - Interfaces for external dependencies

pub mod sampler;
pub mod time_provider;

// Re-exports
pub use sampler::{DiskStatsSampler, SampleError};
pub use time_provider::{SystemTimeProvider, TimeProvider};
