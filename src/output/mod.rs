//! Output formatting for the utilization report.
//!
//! This module handles presenting the report:
//! - [`terminal`] - Summary table with colors
//! - [`json`] - Final formatted JSON report

mod json;
mod terminal;

pub use json::{print_report_json, report_json};
pub use terminal::{format_field, format_row, print_report_table};
