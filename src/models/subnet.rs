//! Per-subnet allocation statistics as reported by the IP utilization insight.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sub-range of a subnet (primary or secondary range).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetRangeStat {
    /// CIDR of the range, e.g. `10.0.0.0/24`.
    #[serde(rename = "subnetRangePrefix")]
    pub prefix: String,
    /// Fraction of the range currently allocated, expected in [0,1].
    pub allocation_ratio: f64,
}

/// Statistics for one subnet.
///
/// Range entries are kept as raw JSON so a single malformed entry can be
/// skipped without rejecting the whole subnet, see [`SubnetStats::range_stats`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubnetStats {
    #[serde(default)]
    pub subnet_uri: Option<String>,
    #[serde(default)]
    pub subnet_range_stats: Vec<Value>,
}

impl SubnetStats {
    /// Decode each range entry in order; an `Err` carries the reason the entry is unusable.
    pub fn range_stats(&self) -> impl Iterator<Item = Result<SubnetRangeStat, String>> + '_ {
        self.subnet_range_stats.iter().map(|entry| -> Result<SubnetRangeStat, String> {
            let stat: SubnetRangeStat =
                serde_json::from_value(entry.clone()).map_err(|e| e.to_string())?;
            if !(0.0..=1.0).contains(&stat.allocation_ratio) {
                return Err(format!(
                    "allocationRatio {} out of range [0,1]",
                    stat.allocation_ratio
                ));
            }
            Ok(stat)
        })
    }

    /// Resource name of the subnet: the last path segment of `subnetUri`.
    pub fn resource_name(&self) -> &str {
        resource_name(self.subnet_uri.as_deref().unwrap_or(""))
    }
}

/// Last path segment of a resource URI.
///
/// # Examples
/// ```
/// use gcp_ip_utilization::models::resource_name;
/// assert_eq!(resource_name("projects/p/regions/r/subnetworks/my-subnet"), "my-subnet");
/// ```
pub fn resource_name(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or("")
}

/// Statistics for one VPC network.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    #[serde(default)]
    pub network_uri: Option<String>,
    #[serde(default)]
    pub subnet_stats: Vec<SubnetStats>,
}
