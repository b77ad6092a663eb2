//! Command-line and environment configuration

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use iops_api_http::server::DEFAULT_SOCKET_PATH;
use iops_api_http::ServerConfig;
use iops_infra_system::iostat_sampler::DEFAULT_COMMAND;
use iops_infra_system::SamplerConfig;

#[derive(Parser, Debug)]
#[command(name = "scope-iops-plugin")]
#[command(about = "Reports per-device disk IOPS to Scope over a Unix socket", long_about = None)]
#[command(version)]
pub struct Args {
    /// Plugin socket path. Its parent directory is owned by the plugin and
    /// is deleted and recreated on startup.
    #[arg(long, env = "IOPS_SOCKET_PATH", default_value = DEFAULT_SOCKET_PATH)]
    pub socket_path: String,

    /// Disk statistics command
    #[arg(long, env = "IOPS_COMMAND", default_value = DEFAULT_COMMAND)]
    pub command: String,

    /// Arguments for the statistics command (comma separated)
    #[arg(
        long,
        env = "IOPS_COMMAND_ARGS",
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_value = "-d"
    )]
    pub command_args: Vec<String>,

    /// Give up on a sample after this many milliseconds
    #[arg(
        long,
        env = "IOPS_SAMPLE_TIMEOUT_MS",
        default_value_t = 10_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub sample_timeout_ms: u64,

    /// Host id used for the topology node (default: system host name)
    #[arg(long, env = "IOPS_HOST_ID")]
    pub host_id: Option<String>,

    /// Log output format
    #[arg(long, env = "IOPS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored
    Pretty,
    /// JSON lines for log shippers
    Json,
}

impl Args {
    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            command: self.command.clone(),
            args: self.command_args.clone(),
            timeout: Duration::from_millis(self.sample_timeout_ms),
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            socket_path: PathBuf::from(shellexpand::tilde(&self.socket_path).into_owned()),
        }
    }
}
