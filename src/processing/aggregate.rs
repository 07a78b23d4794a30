//! Utilization aggregation for a single subnet.

use crate::models::{Cidr, SubnetRangeStat, SubnetStats, SubnetSummary};
use std::error::Error;

/// Free and allocated address counts of one sub-range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeUsage {
    pub total_ips: u128,
    pub allocated_ips: u128,
    pub free_ips: u128,
}

/// Split `total_ips` into allocated and free for a ratio in [0,1].
///
/// Allocated is rounded down, so free is rounded up.
pub fn range_usage(total_ips: u128, allocation_ratio: f64) -> RangeUsage {
    let allocated_ips = ((total_ips as f64) * allocation_ratio).floor() as u128;
    let allocated_ips = allocated_ips.min(total_ips);
    RangeUsage {
        total_ips,
        allocated_ips,
        free_ips: total_ips - allocated_ips,
    }
}

/// Usage of a sub-range from its CIDR prefix.
pub fn range_stat_usage(stat: &SubnetRangeStat) -> Result<RangeUsage, Box<dyn Error>> {
    let cidr = Cidr::new(&stat.prefix)?;
    Ok(range_usage(cidr.total_ips()?, stat.allocation_ratio))
}

/// Summarise a subnet's sub-ranges.
///
/// Malformed sub-ranges (missing fields, ratio outside [0,1], invalid CIDR)
/// are logged and left out of every list and sum.
pub fn aggregate(subnet_stats: &SubnetStats) -> SubnetSummary {
    let mut free_ips_list = Vec::new();
    let mut allocation_ratios = Vec::new();
    let mut weighted_free_ips_sum = 0.0;
    let mut ratio_sum = 0.0;

    for (i, entry) in subnet_stats.range_stats().enumerate() {
        let stat = match entry {
            Ok(stat) => stat,
            Err(e) => {
                log::warn!(
                    "Skipping range #{i} of subnet '{}': {e}",
                    subnet_stats.resource_name()
                );
                continue;
            }
        };
        let usage = match range_stat_usage(&stat) {
            Ok(usage) => usage,
            Err(e) => {
                log::warn!(
                    "Skipping range #{i} of subnet '{}': {e}",
                    subnet_stats.resource_name()
                );
                continue;
            }
        };

        log::debug!(
            "Subnet: {prefix}, Total IPs: {total}, Allocated: {allocated}, Free: {free}",
            prefix = stat.prefix,
            total = usage.total_ips,
            allocated = usage.allocated_ips,
            free = usage.free_ips
        );

        weighted_free_ips_sum += usage.free_ips as f64 * stat.allocation_ratio;
        ratio_sum += stat.allocation_ratio;
        free_ips_list.push(usage.free_ips);
        allocation_ratios.push(stat.allocation_ratio);
    }

    let mean_free_ips = if ratio_sum > 0.0 {
        weighted_free_ips_sum / ratio_sum
    } else {
        0.0
    };
    let mean_allocation_ratio = if allocation_ratios.is_empty() {
        0.0
    } else {
        allocation_ratios.iter().sum::<f64>() / allocation_ratios.len() as f64
    };

    log::debug!(
        "Subnet '{}': mean free IPs (weighted) {mean_free_ips}, mean allocation ratio {mean_allocation_ratio}",
        subnet_stats.resource_name()
    );

    SubnetSummary {
        free_ips_list,
        mean_free_ips,
        mean_allocation_ratio,
    }
}
