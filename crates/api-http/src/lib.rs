//! HTTP API Layer
//!
//! Serves the host plugin report over HTTP on a Unix domain socket.

pub mod error;
pub mod handler;
pub mod server;

pub use handler::ReportHandler;
pub use server::{ReportServer, ServerConfig, ServerError};
