// Disk Statistics Sampler Port
// Abstraction over whatever produces per-device IOPS rows (iostat today)

use crate::domain::{DeviceIops, ParseError};
use async_trait::async_trait;
use thiserror::Error;

/// Sampling errors
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Sampling timeout after {0}ms")]
    Timeout(u64),

    #[error("Command exited with {code:?}: {stderr}")]
    CommandFailed { code: Option<i32>, stderr: String },

    #[error("IO error: {0}")]
    IoError(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Disk statistics sampler
///
/// Implementations:
/// - IostatSampler: runs `iostat -d` and parses its table
#[async_trait]
pub trait DiskStatsSampler: Send + Sync {
    /// Take one sample of per-device throughput
    ///
    /// # Errors
    /// - SampleError::SpawnFailed if the tool cannot be started
    /// - SampleError::Timeout if the tool does not finish in time
    /// - SampleError::Parse if the output has no usable device rows
    async fn sample(&self) -> Result<Vec<DeviceIops>, SampleError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock sampler behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Return these rows
        Devices(Vec<DeviceIops>),
        /// Fail with a spawn error carrying this message
        Fail(String),
    }

    /// Mock DiskStatsSampler for testing
    pub struct MockSampler {
        behavior: Arc<Mutex<MockBehavior>>,
        call_count: Arc<Mutex<usize>>,
    }

    impl MockSampler {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        pub fn with_devices(devices: Vec<DeviceIops>) -> Self {
            Self::new(MockBehavior::Devices(devices))
        }

        pub fn failing(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Fail(message.into()))
        }

        pub fn set_behavior(&self, behavior: MockBehavior) {
            *self.behavior.lock().unwrap() = behavior;
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl DiskStatsSampler for MockSampler {
        async fn sample(&self) -> Result<Vec<DeviceIops>, SampleError> {
            *self.call_count.lock().unwrap() += 1;

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Devices(devices) => Ok(devices),
                MockBehavior::Fail(msg) => Err(SampleError::SpawnFailed(msg)),
            }
        }
    }
}
