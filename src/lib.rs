//! IP address utilization report for cloud subnets.
//!
//! Lists the active IP utilization insights of a project, describes each one
//! and summarises the free address capacity per subnet.
//!
//! # Modules
//! - [`config`] - Constants and environment configuration
//! - [`gcloud`] - gcloud CLI interaction (insight retrieval)
//! - [`models`] - Data contract between retrieval and aggregation
//! - [`processing`] - Aggregation and report assembly
//! - [`output`] - Terminal table and JSON report

pub mod config;
pub mod gcloud;
pub mod models;
pub mod output;
pub mod processing;

use gcloud::InsightSource;
use models::UtilizationReport;
use std::sync::Arc;

/// Build the utilization report from all active insights of `source`.
///
/// Failures for individual insights are logged and leave the rest of the
/// report intact.
pub async fn collect_utilization(
    source: Arc<dyn InsightSource>,
    workers: usize,
) -> UtilizationReport {
    let lister = Arc::clone(&source);
    let insight_ids = match tokio::task::spawn_blocking(move || lister.list_active_insights()).await {
        Ok(ids) => ids,
        Err(e) => {
            log::error!("Insight listing failed: {e}");
            Vec::new()
        }
    };
    if insight_ids.is_empty() {
        log::warn!("No active IP utilization insights found");
        return UtilizationReport::new();
    }
    log::debug!("insight ids: {insight_ids:?}");

    processing::build_report(source, insight_ids, workers).await
}
