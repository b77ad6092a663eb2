// Scope IOPS Plugin Infrastructure - System Adapters
// Implements: DiskStatsSampler

pub mod host;
pub mod iostat_sampler;

pub use host::host_name;
pub use iostat_sampler::{IostatSampler, SamplerConfig};
