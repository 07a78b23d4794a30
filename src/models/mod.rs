//! Domain models for the IP utilization report.
//!
//! This module contains the data contract between the retriever and the aggregator:
//! - [`Cidr`] - CIDR parsing and address counts for IPv4 and IPv6
//! - [`InsightListEntry`] and [`InsightDocument`] - recommender insight records
//! - [`SubnetStats`] and [`SubnetRangeStat`] - per-subnet allocation statistics
//! - [`SubnetSummary`] and [`UtilizationReport`] - aggregated output

mod cidr;
mod insight;
mod subnet;
mod summary;

// Re-export public types
pub use cidr::{num_addresses, Cidr, IPV4_BITS, IPV6_BITS};
pub use insight::{
    parse_insight_document, parse_insight_list, InsightContent, InsightDocument,
    InsightListEntry, IpUtilizationSummaryInfo,
};
pub use subnet::{resource_name, NetworkStats, SubnetRangeStat, SubnetStats};
pub use summary::{SubnetSummary, UtilizationReport};
