//! Recommender insight records: list entries and describe documents.

use super::NetworkStats;
use crate::config::{ACTIVE_STATE, IP_UTILIZATION_SUBTYPE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;

/// One row of `gcloud recommender insights list`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct InsightListEntry {
    #[serde(rename = "INSIGHT_ID", default)]
    pub insight_id: String,
    #[serde(rename = "INSIGHT_SUBTYPE", default)]
    pub insight_subtype: String,
    #[serde(rename = "INSIGHT_STATE", default)]
    pub insight_state: String,
}

impl InsightListEntry {
    /// Build an entry from a tabular row keyed by column header.
    pub fn from_row(row: &HashMap<String, String>) -> InsightListEntry {
        let column = |name: &str| row.get(name).cloned().unwrap_or_default();
        InsightListEntry {
            insight_id: column("INSIGHT_ID"),
            insight_subtype: column("INSIGHT_SUBTYPE"),
            insight_state: column("INSIGHT_STATE"),
        }
    }

    /// True for an active IP utilization summary insight (case-insensitive match).
    pub fn is_active_utilization_summary(&self) -> bool {
        !self.insight_id.is_empty()
            && self
                .insight_subtype
                .eq_ignore_ascii_case(IP_UTILIZATION_SUBTYPE)
            && self.insight_state.eq_ignore_ascii_case(ACTIVE_STATE)
    }
}

/// Output of `gcloud recommender insights describe --format=json`.
///
/// Only the path down to the network statistics is modelled, every level is
/// optional so a partial document still parses.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct InsightDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<InsightContent>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct InsightContent {
    #[serde(default)]
    pub ip_utilization_summary_info: Vec<IpUtilizationSummaryInfo>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct IpUtilizationSummaryInfo {
    #[serde(default)]
    pub network_stats: Option<Vec<NetworkStats>>,
}

impl InsightDocument {
    /// Network statistics of the first `ipUtilizationSummaryInfo` entry.
    pub fn network_stats(&self) -> Result<&[NetworkStats], Box<dyn Error>> {
        let content = self.content.as_ref().ok_or("missing 'content'")?;
        let info = content
            .ip_utilization_summary_info
            .first()
            .ok_or("missing or empty 'ipUtilizationSummaryInfo'")?;
        match info.network_stats.as_deref() {
            Some(stats) if !stats.is_empty() => Ok(stats),
            Some(_) => Err("empty 'networkStats'".into()),
            None => Err("missing 'networkStats'".into()),
        }
    }
}

/// Parse a describe document, reporting the JSON path of any type mismatch.
pub fn parse_insight_document(json: &str) -> Result<InsightDocument, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let document: InsightDocument = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing insight JSON: path={} error={}", e.path(), e))?;
    Ok(document)
}

/// Parse the JSON form of the list output.
pub fn parse_insight_list(json: &str) -> Result<Vec<InsightListEntry>, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let entries: Vec<InsightListEntry> = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing insight list JSON: path={} error={}", e.path(), e))?;
    Ok(entries)
}
