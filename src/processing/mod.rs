//! Utilization processing logic.
//!
//! This module turns insight documents into the report:
//! - [`aggregate`] - Free-address statistics of a single subnet
//! - [`report`] - Concurrent processing of insights and merging into the report

mod aggregate;
mod report;

// Re-export public functions
pub use aggregate::{aggregate, range_stat_usage, range_usage, RangeUsage};
pub use report::{build_report, merge_entries, process_insight, summarize_document, InsightEntries};
