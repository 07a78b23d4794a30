//! Tabular CLI output parsing.
//!
//! gcloud's default output is a header row followed by whitespace aligned
//! columns. Values containing spaces cannot be told apart from column breaks,
//! so surplus tokens are folded into the last column.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Invalid Regex"))
}

fn split_columns(line: &str) -> Vec<&str> {
    get_whitespace_regex()
        .split(line.trim())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parse tabular output into one map per data row, keyed by column header.
///
/// Rows with fewer values than headers are skipped with a warning. Blank
/// lines are ignored. Empty input or an empty header gives no rows.
pub fn parse_table(output: &str) -> Vec<HashMap<String, String>> {
    let mut lines = output.lines().filter(|line| !line.trim().is_empty());

    let headers = match lines.next() {
        Some(header) => split_columns(header),
        None => return Vec::new(),
    };
    if headers.is_empty() {
        return Vec::new();
    }

    let mut rows = Vec::new();
    for (i, line) in lines.enumerate() {
        let columns = split_columns(line);
        if columns.len() < headers.len() {
            log::warn!(
                "Skipping table row #{i}: {} values for {} columns: '{}'",
                columns.len(),
                headers.len(),
                line.trim()
            );
            continue;
        }
        let last = headers.len() - 1;
        let mut row: HashMap<String, String> = headers[..last]
            .iter()
            .zip(columns.iter())
            .map(|(h, c)| (h.to_string(), c.to_string()))
            .collect();
        row.insert(headers[last].to_string(), columns[last..].join(" "));
        rows.push(row);
    }
    log::trace!("parse_table: {} headers, {} rows", headers.len(), rows.len());
    rows
}
