//! Report Handler
//!
//! Every request takes a fresh sample and builds a fresh report.

use crate::error::ApiError;
use axum::extract::State;
use axum::http::{header, Uri};
use axum::response::{IntoResponse, Response};
use iops_core::application::ReportBuilder;
use iops_core::domain::Report;
use iops_core::error::AppError;
use iops_core::port::DiskStatsSampler;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Report handler with injected dependencies
pub struct ReportHandler {
    sampler: Arc<dyn DiskStatsSampler>,
    builder: ReportBuilder,
    // Serialises report requests; one iostat run at a time
    lock: Mutex<()>,
}

impl ReportHandler {
    pub fn new(sampler: Arc<dyn DiskStatsSampler>, builder: ReportBuilder) -> Self {
        Self {
            sampler,
            builder,
            lock: Mutex::new(()),
        }
    }

    /// Sample and build a report.
    ///
    /// A failed sample still yields a report; the host node just carries no
    /// latest values for this round.
    pub async fn report(&self) -> Report {
        let _guard = self.lock.lock().await;

        let devices = match self.sampler.sample().await {
            Ok(devices) => Some(devices),
            Err(e) => {
                warn!(error = %e, "Disk sample failed, reporting without latest values");
                None
            }
        };

        self.builder.build(devices.as_deref())
    }

    /// Report encoded as JSON
    pub async fn report_json(&self) -> Result<Vec<u8>, AppError> {
        let report = self.report().await;
        Ok(serde_json::to_vec(&report)?)
    }
}

/// GET /report
pub async fn handle_report(
    State(handler): State<Arc<ReportHandler>>,
    uri: Uri,
) -> Result<Response, ApiError> {
    info!(uri = %uri, "Report requested");

    let body = handler.report_json().await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use iops_core::domain::DeviceIops;
    use iops_core::port::sampler::mocks::{MockBehavior, MockSampler};
    use iops_core::port::time_provider::mocks::FixedTimeProvider;

    fn handler_with(sampler: Arc<MockSampler>) -> ReportHandler {
        let clock = FixedTimeProvider(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        ReportHandler::new(sampler, ReportBuilder::new("host-1", Arc::new(clock)))
    }

    #[tokio::test]
    async fn test_report_resamples_each_call() {
        let sampler = Arc::new(MockSampler::with_devices(vec![DeviceIops::new(
            "sda", "1.00", "2.00", "3.00",
        )]));
        let handler = handler_with(sampler.clone());

        handler.report().await;
        sampler.set_behavior(MockBehavior::Devices(vec![DeviceIops::new(
            "sda", "9.00", "2.00", "3.00",
        )]));
        let report = handler.report().await;

        assert_eq!(sampler.call_count(), 2);
        let latest = report.host.nodes["host-1;<host>"].latest.as_ref().unwrap();
        assert_eq!(latest["iops-table-1___tps"].value, "9.00");
    }

    #[tokio::test]
    async fn test_failed_sample_degrades_report() {
        let sampler = Arc::new(MockSampler::failing("iostat missing"));
        let handler = handler_with(sampler);

        let report = handler.report().await;

        assert!(report.host.nodes["host-1;<host>"].latest.is_none());
        assert_eq!(report.plugins.len(), 1);
        assert!(!report.host.table_templates.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_reports_all_sample() {
        let sampler = Arc::new(MockSampler::with_devices(vec![DeviceIops::new(
            "sda", "1.00", "2.00", "3.00",
        )]));
        let handler = Arc::new(handler_with(sampler.clone()));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let handler = handler.clone();
                tokio::spawn(async move { handler.report_json().await })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().is_ok());
        }

        assert_eq!(sampler.call_count(), 8);
    }
}
