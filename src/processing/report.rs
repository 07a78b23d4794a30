//! Report assembly across insights.
//!
//! Each insight is fetched and aggregated on a blocking worker; at most
//! `workers` run at once. Results come back in discovery order and are merged
//! sequentially, so when two insights describe the same subnet the later one
//! in the list wins on every run.

use super::aggregate;
use crate::gcloud::InsightSource;
use crate::models::{InsightDocument, SubnetSummary, UtilizationReport};
use futures::{future, StreamExt};
use std::sync::Arc;

/// Summaries of one insight, keyed by subnet resource name, in document order.
pub type InsightEntries = Vec<(String, SubnetSummary)>;

/// Aggregate every subnet of a describe document.
///
/// A document without network statistics yields nothing.
pub fn summarize_document(insight_id: &str, document: &InsightDocument) -> InsightEntries {
    let networks = match document.network_stats() {
        Ok(networks) => networks,
        Err(e) => {
            log::warn!("Unexpected response format for insight {insight_id}: {e}");
            return Vec::new();
        }
    };

    let mut entries = Vec::new();
    for network in networks {
        log::trace!(
            "insight {insight_id}: network {:?} with {} subnets",
            network.network_uri,
            network.subnet_stats.len()
        );
        for subnet_stats in &network.subnet_stats {
            let resource = subnet_stats.resource_name();
            if resource.is_empty() {
                log::warn!(
                    "Skipping subnet without resource name in insight {insight_id}: uri={:?}",
                    subnet_stats.subnet_uri
                );
                continue;
            }
            entries.push((resource.to_string(), aggregate(subnet_stats)));
        }
    }
    entries
}

/// Fetch and aggregate a single insight. Failures are logged and give no entries.
pub fn process_insight(source: &dyn InsightSource, insight_id: &str) -> InsightEntries {
    match source.describe_insight(insight_id) {
        Ok(document) => {
            let entries = summarize_document(insight_id, &document);
            log::info!("insight {insight_id}: {} subnets", entries.len());
            entries
        }
        Err(e) => {
            log::warn!("Skipping insight {insight_id}: {e}");
            Vec::new()
        }
    }
}

/// Merge per-insight entries into a report, in order, later entries replacing earlier ones.
pub fn merge_entries<I>(results: I) -> UtilizationReport
where
    I: IntoIterator<Item = (String, InsightEntries)>,
{
    let mut report = UtilizationReport::new();
    for (insight_id, entries) in results {
        for (resource, summary) in entries {
            if report.insert(resource.clone(), summary).is_some() {
                log::warn!("Subnet '{resource}' reported again by insight {insight_id}, replacing earlier summary");
            }
        }
    }
    report
}

/// Process `insight_ids` on a pool of `workers` blocking tasks and build the report.
pub async fn build_report(
    source: Arc<dyn InsightSource>,
    insight_ids: Vec<String>,
    workers: usize,
) -> UtilizationReport {
    let workers = workers.max(1);
    log::info!(
        "Processing {} insights with {workers} workers",
        insight_ids.len()
    );

    let results: Vec<(String, InsightEntries)> = futures::stream::iter(insight_ids)
        .map(|insight_id| {
            let source = Arc::clone(&source);
            tokio::task::spawn_blocking(move || {
                let entries = process_insight(source.as_ref(), &insight_id);
                (insight_id, entries)
            })
        })
        .buffered(workers)
        .filter_map(|joined| {
            future::ready(match joined {
                Ok(result) => Some(result),
                Err(e) => {
                    log::error!("Insight worker failed: {e}");
                    None
                }
            })
        })
        .collect()
        .await;

    merge_entries(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_insight_document, InsightListEntry};
    use std::collections::HashMap;
    use std::error::Error;
    use std::time::Duration;

    /// Serves describe documents from memory, with an optional delay per id.
    struct FixtureInsights {
        documents: HashMap<String, String>,
        delays_ms: HashMap<String, u64>,
    }

    impl FixtureInsights {
        fn new(files: &[(&str, &str)]) -> FixtureInsights {
            let documents = files
                .iter()
                .map(|(id, file)| {
                    let json = std::fs::read_to_string(format!("src/tests/test_data/{file}"))
                        .expect("Error reading test data");
                    (id.to_string(), json)
                })
                .collect();
            FixtureInsights {
                documents,
                delays_ms: HashMap::new(),
            }
        }
    }

    impl InsightSource for FixtureInsights {
        fn list_insights(&self) -> Result<Vec<InsightListEntry>, Box<dyn Error>> {
            Ok(Vec::new())
        }

        fn describe_insight(&self, insight_id: &str) -> Result<InsightDocument, Box<dyn Error>> {
            if let Some(ms) = self.delays_ms.get(insight_id) {
                std::thread::sleep(Duration::from_millis(*ms));
            }
            let json = self
                .documents
                .get(insight_id)
                .ok_or_else(|| format!("ERROR running: insight {insight_id} not found"))?;
            parse_insight_document(json)
        }
    }

    fn single_subnet_document(name: &str, prefix: &str, ratio: f64) -> String {
        format!(
            r#"{{"content": {{"ipUtilizationSummaryInfo": [{{"networkStats": [{{"subnetStats": [
                {{"subnetUri": "projects/p/regions/r/subnetworks/{name}",
                  "subnetRangeStats": [{{"subnetRangePrefix": "{prefix}", "allocationRatio": {ratio}}}]}}
            ]}}]}}]}}}}"#
        )
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_summarize_document_fixture() {
        let json = std::fs::read_to_string("src/tests/test_data/insight_describe_01.json")
            .expect("Error reading test data");
        let document = parse_insight_document(&json).unwrap();
        let entries = summarize_document("0f1e2d3c-0001", &document);
        let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["app-subnet", "db-subnet", "gke-nodes", "empty-subnet"]);

        let app = &entries[0].1;
        assert_eq!(app.free_ips_list, vec![128, 0]);
        assert!((app.mean_free_ips - 64.0 / 1.5).abs() < 1e-9);
        assert_eq!(app.mean_allocation_ratio, 0.75);

        let db = &entries[1].1;
        assert_eq!(db.free_ips_list, vec![12], "range without ratio is skipped");

        let gke = &entries[2].1;
        assert_eq!(gke.free_ips_list, vec![410, 235930]);
        assert!((gke.mean_free_ips - 23962.0).abs() < 1e-6);
        assert!((gke.mean_allocation_ratio - 0.5).abs() < 1e-12);

        assert_eq!(entries[3].1, SubnetSummary::default());
    }

    #[test]
    fn test_summarize_document_without_network_stats() {
        let json = std::fs::read_to_string("src/tests/test_data/insight_describe_no_network_stats.json")
            .expect("Error reading test data");
        let document = parse_insight_document(&json).unwrap();
        assert!(summarize_document("0f1e2d3c-0006", &document).is_empty());
    }

    #[test]
    fn test_summarize_document_skips_missing_uri() {
        let document = parse_insight_document(
            r#"{"content": {"ipUtilizationSummaryInfo": [{"networkStats": [{"subnetStats": [
                {"subnetRangeStats": [{"subnetRangePrefix": "10.0.0.0/24", "allocationRatio": 0.5}]},
                {"subnetUri": "projects/p/regions/r/subnetworks/kept", "subnetRangeStats": []}
            ]}]}]}}"#,
        )
        .unwrap();
        let entries = summarize_document("x", &document);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "kept");
    }

    #[test]
    fn test_process_insight_transport_failure() {
        let source = FixtureInsights::new(&[]);
        assert!(process_insight(&source, "missing").is_empty());
    }

    #[test]
    fn test_merge_entries_last_write_wins_in_order() {
        let older = SubnetSummary {
            free_ips_list: vec![1],
            mean_free_ips: 1.0,
            mean_allocation_ratio: 0.1,
        };
        let newer = SubnetSummary {
            free_ips_list: vec![2],
            mean_free_ips: 2.0,
            mean_allocation_ratio: 0.2,
        };
        let report = merge_entries(vec![
            ("a".to_string(), vec![("shared".to_string(), older)]),
            ("b".to_string(), vec![("shared".to_string(), newer.clone())]),
        ]);
        assert_eq!(report.len(), 1);
        assert_eq!(report.get("shared"), Some(&newer));
    }

    #[tokio::test]
    async fn test_build_report_matches_sequential() {
        let source = FixtureInsights::new(&[
            ("one", "insight_describe_01.json"),
            ("two", "insight_describe_02.json"),
        ]);
        let sequential = merge_entries(vec![
            ("one".to_string(), process_insight(&source, "one")),
            ("two".to_string(), process_insight(&source, "two")),
        ]);

        let source: Arc<dyn InsightSource> = Arc::new(source);
        let report = build_report(source, ids(&["one", "two"]), 4).await;
        assert_eq!(report, sequential);
        assert_eq!(report.len(), 6);
        assert_eq!(report.get("dual-stack").unwrap().free_ips_list, vec![64, 192]);
    }

    #[tokio::test]
    async fn test_build_report_discovery_order_wins() {
        // the later insight in list order wins, whichever finishes first
        let mut source = FixtureInsights::new(&[]);
        source.documents.insert(
            "fast".to_string(),
            single_subnet_document("shared", "10.0.0.0/24", 0.5),
        );
        source.documents.insert(
            "slow".to_string(),
            single_subnet_document("shared", "10.0.0.0/28", 0.25),
        );
        source.delays_ms.insert("slow".to_string(), 100);
        let source: Arc<dyn InsightSource> = Arc::new(source);

        let report = build_report(source.clone(), ids(&["fast", "slow"]), 2).await;
        assert_eq!(report.len(), 1);
        assert_eq!(report.get("shared").unwrap().free_ips_list, vec![12]);

        let report = build_report(source, ids(&["slow", "fast"]), 2).await;
        assert_eq!(report.get("shared").unwrap().free_ips_list, vec![128]);
    }

    #[tokio::test]
    async fn test_build_report_failure_isolated() {
        let source: Arc<dyn InsightSource> = Arc::new(FixtureInsights::new(&[
            ("ok", "insight_describe_02.json"),
            ("bad-format", "insight_describe_no_network_stats.json"),
        ]));
        let report = build_report(source, ids(&["missing", "ok", "bad-format"]), 3).await;
        assert_eq!(report.len(), 2);
        assert!(report.get("dev-subnet").is_some());
        assert_eq!(report.get("dev-subnet").unwrap().mean_free_ips, 896.0);
    }

    #[tokio::test]
    async fn test_build_report_empty_and_zero_workers() {
        let source: Arc<dyn InsightSource> = Arc::new(FixtureInsights::new(&[]));
        let report = build_report(source, Vec::new(), 0).await;
        assert!(report.is_empty());
    }
}
