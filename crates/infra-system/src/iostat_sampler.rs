// iostat sampler implementation
// reason: tokio::process so a slow iostat never blocks the runtime
use async_trait::async_trait;
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use iops_core::application::parse_iostat;
use iops_core::domain::DeviceIops;
use iops_core::port::{DiskStatsSampler, SampleError};

/// Default sampling command
pub const DEFAULT_COMMAND: &str = "iostat";

/// Default upper bound on one sampling run (10 seconds)
pub const DEFAULT_SAMPLE_TIMEOUT: Duration = Duration::from_secs(10);

/// What to run and how long to wait for it
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    pub command: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            args: vec!["-d".to_string()],
            timeout: DEFAULT_SAMPLE_TIMEOUT,
        }
    }
}

/// Samples disk throughput by running `iostat -d` and parsing its device table
pub struct IostatSampler {
    config: SamplerConfig,
}

impl IostatSampler {
    /// Create a new sampler
    ///
    /// # Example
    /// ```ignore
    /// let sampler = IostatSampler::new(SamplerConfig::default());
    /// let devices = sampler.sample().await?;
    /// ```
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    /// Spawn the command and wait for its output, bounded by the timeout
    async fn spawn_and_wait(&self) -> Result<Output, SampleError> {
        let child = Command::new(&self.config.command)
            .args(&self.config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SampleError::SpawnFailed(format!("{}: {}", self.config.command, e)))?;

        match timeout(self.config.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(SampleError::IoError(e.to_string())),
            Err(_) => Err(SampleError::Timeout(timeout_ms(self.config.timeout))),
        }
    }
}

/// Milliseconds for error reporting, saturating instead of wrapping
fn timeout_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Default for IostatSampler {
    fn default() -> Self {
        Self::new(SamplerConfig::default())
    }
}

#[async_trait]
impl DiskStatsSampler for IostatSampler {
    async fn sample(&self) -> Result<Vec<DeviceIops>, SampleError> {
        let start = Instant::now();

        let output = self.spawn_and_wait().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                command = %self.config.command,
                exit_code = ?output.status.code(),
                stderr = %stderr,
                "Sampling command failed"
            );
            return Err(SampleError::CommandFailed {
                code: output.status.code(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let devices = parse_iostat(&stdout)?;

        debug!(
            command = %self.config.command,
            args = ?self.config.args,
            duration_ms = %start.elapsed().as_millis(),
            devices = devices.len(),
            "Disk sample collected"
        );

        Ok(devices)
    }
}
