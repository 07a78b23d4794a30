//! Aggregated utilization per subnet and the final report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-address summary of one subnet.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetSummary {
    /// Free addresses per accepted sub-range, in input order.
    #[serde(skip)]
    pub free_ips_list: Vec<u128>,
    /// Mean free addresses weighted by allocation ratio.
    pub mean_free_ips: f64,
    /// Unweighted mean of the allocation ratios.
    pub mean_allocation_ratio: f64,
}

/// Subnet resource name to summary.
///
/// Serializes as a plain JSON object with keys in sorted order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct UtilizationReport {
    pub subnets: BTreeMap<String, SubnetSummary>,
}

impl UtilizationReport {
    pub fn new() -> UtilizationReport {
        UtilizationReport::default()
    }

    /// Insert a summary, replacing any earlier one for the same resource name.
    ///
    /// Returns the replaced summary.
    pub fn insert(&mut self, resource: String, summary: SubnetSummary) -> Option<SubnetSummary> {
        self.subnets.insert(resource, summary)
    }

    pub fn get(&self, resource: &str) -> Option<&SubnetSummary> {
        self.subnets.get(resource)
    }

    pub fn len(&self) -> usize {
        self.subnets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subnets.is_empty()
    }
}
