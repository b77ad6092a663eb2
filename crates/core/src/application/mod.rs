// Application Layer - Parsing samples and assembling reports

pub mod constants;
pub mod parser;
pub mod report;

// Re-exports
pub use parser::parse_iostat;
pub use report::ReportBuilder;
