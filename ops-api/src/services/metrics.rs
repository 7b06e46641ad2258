//! Prometheus export for the process-wide metrics recorder.

use crate::models::WorkItem;
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::{Mutex, OnceLock};

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Install the Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() -> Result<(), AppError> {
    let _guard = INIT_LOCK
        .lock()
        .map_err(|_| AppError::InternalError(anyhow::anyhow!("metrics init lock poisoned")))?;
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!("failed to install Prometheus recorder: {}", e))
    })?;
    let _ = METRICS_HANDLE.set(handle);
    Ok(())
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

/// Labelled by priority only. `profile_key` is caller-supplied and unbounded.
pub fn record_work_item_created(item: &WorkItem) {
    counter!("work_items_created_total", "priority" => item.priority.to_string()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WorkPriority, WorkStatus};

    #[test]
    fn test_created_counter_series_stay_bounded() {
        init_metrics().unwrap();
        let priorities = [
            WorkPriority::Low,
            WorkPriority::Medium,
            WorkPriority::High,
            WorkPriority::Urgent,
        ];

        for i in 0..500 {
            let item = WorkItem::new(
                format!("unknown-profile-{}", i),
                "Check".to_string(),
                WorkStatus::Backlog,
                priorities[i % priorities.len()],
                None,
                None,
            );
            record_work_item_created(&item);
        }

        let rendered = get_metrics();
        let series = rendered
            .lines()
            .filter(|line| line.starts_with("work_items_created_total{"))
            .count();
        assert_eq!(series, priorities.len());
        assert!(!rendered.contains("unknown-profile-"));
    }
}
