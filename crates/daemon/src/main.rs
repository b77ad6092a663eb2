//! Scope IOPS Plugin - Main Entry Point
//!
//! Samples `iostat -d` on every `/report` request and serves the result to
//! the Scope host over a Unix socket.

mod config;
mod logging;
mod signal;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use iops_api_http::{ReportHandler, ReportServer};
use iops_core::application::ReportBuilder;
use iops_core::port::{DiskStatsSampler, SystemTimeProvider};
use iops_infra_system::{host_name, IostatSampler};

use config::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Configuration and logging
    let args = Args::parse();
    logging::init_logging(args.log_format)?;

    if let Err(e) = run(args).await {
        error!(error = ?e, "Scope IOPS plugin failed");
        return Err(e);
    }

    info!("Shutdown complete.");
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let host_id = args.host_id.clone().unwrap_or_else(host_name);
    info!(
        version = iops_core::VERSION,
        host_id = %host_id,
        "Scope IOPS plugin starting"
    );

    // 2. Signal handlers go in before the socket directory is touched
    let shutdown = signal::shutdown_signal().context("Failed to install signal handlers")?;

    // 3. Startup check: refuse to start if the host cannot be sampled
    let sampler = Arc::new(IostatSampler::new(args.sampler_config()));
    startup_check(sampler.as_ref()).await?;

    // 4. Wiring
    let builder = ReportBuilder::new(host_id, Arc::new(SystemTimeProvider));
    let handler = Arc::new(ReportHandler::new(sampler, builder));
    let server = ReportServer::new(args.server_config(), handler);

    // 5. Serve until SIGINT/SIGTERM, then remove the socket directory
    server.run(shutdown).await.context("Report server failed")
}

/// Sample once; the daemon must not serve a host it cannot sample
async fn startup_check(sampler: &dyn DiskStatsSampler) -> Result<usize> {
    let devices = sampler
        .sample()
        .await
        .context("Initial disk sample failed")?;
    info!(devices = devices.len(), "Initial disk sample succeeded");
    Ok(devices.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use iops_core::domain::DeviceIops;
    use iops_core::port::sampler::mocks::MockSampler;

    #[tokio::test]
    async fn test_startup_check_counts_devices() {
        let sampler = MockSampler::with_devices(vec![
            DeviceIops::new("sda", "1.00", "2.00", "3.00"),
            DeviceIops::new("sdb", "0.00", "0.00", "0.00"),
        ]);

        assert_eq!(startup_check(&sampler).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_startup_check_failure_is_fatal() {
        let sampler = MockSampler::failing("iostat: command not found");

        let err = startup_check(&sampler).await.unwrap_err();

        assert_eq!(err.to_string(), "Initial disk sample failed");
        assert!(format!("{:#}", err).contains("iostat: command not found"));
    }
}
