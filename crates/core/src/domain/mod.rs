// Domain Layer - Device samples and the plugin report document

pub mod device;
pub mod error;
pub mod report;

// Re-exports
pub use device::{DeviceIops, IopsColumn};
pub use error::ParseError;
pub use report::{
    Column, MetadataTemplate, Node, PluginSpec, Report, StringEntry, TableTemplate, Topology,
};
