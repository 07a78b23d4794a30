//! Terminal output utilities.
//!
//! Provides formatting helpers and the summary table printed before the JSON report.

use crate::config::HIGH_UTILIZATION_RATIO;
use crate::models::{SubnetSummary, UtilizationReport};
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// One table row, uncolored.
pub fn format_row(resource: &str, summary: &SubnetSummary) -> String {
    format!(
        "{name},{free},{mean_free},{ratio}",
        name = format_field(resource, 32),
        free = format_field(summary.free_ips_list.iter().join("|"), 24),
        mean_free = format_field(format!("{:.2}", summary.mean_free_ips), 14),
        ratio = format_field(format!("{:.3}", summary.mean_allocation_ratio), 8),
    )
}

/// Print one row per subnet, highly utilized subnets in red.
pub fn print_report_table(report: &UtilizationReport) {
    log::info!("# Got subnet count = {}", report.len());
    println!(
        "{},{},{},{}",
        format_field("subnet", 32),
        format_field("free_ips", 24),
        format_field("mean_free_ips", 14),
        format_field("ratio", 8)
    );
    for (resource, summary) in &report.subnets {
        let row = format_row(resource, summary);
        if summary.mean_allocation_ratio >= HIGH_UTILIZATION_RATIO {
            println!("{}", row.red());
        } else {
            println!("{row}");
        }
    }
}
