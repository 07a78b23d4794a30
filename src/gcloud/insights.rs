//! Recommender insight retrieval.
//!
//! [`InsightSource`] is the seam between orchestration and the external CLI:
//! [`GcloudInsights`] shells out to gcloud, tests plug in in-memory sources.

use super::{cli, table};
use crate::config::{Config, ListFormat, INSIGHT_TYPE, LOCATION};
use crate::models::{
    parse_insight_document, parse_insight_list, InsightDocument, InsightListEntry,
};
use std::error::Error;

/// Provider of IP utilization insights.
pub trait InsightSource: Send + Sync {
    /// All insights of the configured type, unfiltered.
    fn list_insights(&self) -> Result<Vec<InsightListEntry>, Box<dyn Error>>;

    /// Detailed document of one insight.
    fn describe_insight(&self, insight_id: &str) -> Result<InsightDocument, Box<dyn Error>>;

    /// Identifiers of the active IP utilization summary insights, in list order.
    ///
    /// A failed listing is logged and yields no identifiers.
    fn list_active_insights(&self) -> Vec<String> {
        let entries = match self.list_insights() {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Error listing insights: {e}");
                return Vec::new();
            }
        };
        let total = entries.len();
        let ids: Vec<String> = entries
            .into_iter()
            .filter(|entry| entry.is_active_utilization_summary())
            .map(|entry| entry.insight_id)
            .collect();
        log::info!("Found {} active utilization insights of {total} listed", ids.len());
        ids
    }
}

/// Insight source backed by `gcloud recommender insights`.
#[derive(Debug, Clone)]
pub struct GcloudInsights {
    pub gcloud_bin: String,
    pub project_id: String,
    pub list_format: ListFormat,
}

impl GcloudInsights {
    pub fn new(config: &Config) -> GcloudInsights {
        GcloudInsights {
            gcloud_bin: config.gcloud_bin.clone(),
            project_id: config.project_id.clone(),
            list_format: config.list_format,
        }
    }

    /// Arguments for `insights list`.
    pub fn list_args(&self) -> Vec<String> {
        let mut args = self.common_args(vec!["recommender", "insights", "list"]);
        if self.list_format == ListFormat::Json {
            args.push("--format=json".to_string());
        }
        args
    }

    /// Arguments for `insights describe <id>`, always JSON.
    pub fn describe_args(&self, insight_id: &str) -> Vec<String> {
        let mut args = self.common_args(vec!["recommender", "insights", "describe", insight_id]);
        args.push("--format=json".to_string());
        args
    }

    fn common_args(&self, leading: Vec<&str>) -> Vec<String> {
        let mut args: Vec<String> = leading.into_iter().map(str::to_string).collect();
        args.push("--project".to_string());
        args.push(self.project_id.clone());
        args.push(format!("--location={LOCATION}"));
        args.push(format!("--insight-type={INSIGHT_TYPE}"));
        args
    }
}

impl InsightSource for GcloudInsights {
    fn list_insights(&self) -> Result<Vec<InsightListEntry>, Box<dyn Error>> {
        let output = cli::run(&self.gcloud_bin, &self.list_args())?;
        match self.list_format {
            ListFormat::Json => parse_insight_list(&output),
            ListFormat::Table => Ok(table::parse_table(&output)
                .iter()
                .map(InsightListEntry::from_row)
                .collect()),
        }
    }

    fn describe_insight(&self, insight_id: &str) -> Result<InsightDocument, Box<dyn Error>> {
        let output = cli::run(&self.gcloud_bin, &self.describe_args(insight_id))?;
        parse_insight_document(&output)
    }
}
