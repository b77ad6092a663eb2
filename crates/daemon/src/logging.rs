//! Logging setup
//!
//! `RUST_LOG` overrides the default filter; `--log-format json` switches to
//! JSON lines.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Library crates (iops_core, iops_api_http, ...) plus this binary
const DEFAULT_FILTER: &str = "iops=info,scope_iops_plugin=info";

pub fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| default_filter())
        .context("Failed to create env filter")?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        // Production: JSON structured logging
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        // Development: Pretty formatting with colors
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
    }
    .context("Failed to install tracing subscriber")
}

fn default_filter() -> std::result::Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    EnvFilter::try_new(DEFAULT_FILTER)
}
