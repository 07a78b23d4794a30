//! gcloud CLI interaction.
//!
//! This module handles all calls to the external cloud CLI:
//! - [`cli`] - Subprocess execution
//! - [`table`] - Parsing of tabular CLI output
//! - [`insights`] - Listing and describing recommender insights

mod cli;
mod insights;
mod table;

// Re-export public types and functions
pub use cli::run;
pub use insights::{GcloudInsights, InsightSource};
pub use table::parse_table;
