//! Application configuration.
//!
//! Compiled-in constants for the insight query plus the few settings that can
//! be overridden from the environment (or a `.env` file loaded in `main`).

use std::env;

/// Insight type queried from the recommender service.
pub const INSIGHT_TYPE: &str = "google.networkanalyzer.vpcnetwork.ipAddressInsight";
/// Location of the insights, they are not regional.
pub const LOCATION: &str = "global";
/// Only insights of this subtype carry per-subnet allocation statistics.
pub const IP_UTILIZATION_SUBTYPE: &str = "IP_UTILIZATION_SUMMARY";
pub const ACTIVE_STATE: &str = "ACTIVE";

pub const PROJECT_ID_ENV: &str = "GCP_PROJECT_ID";
pub const DEFAULT_PROJECT_ID: &str = "my-network-project";
pub const GCLOUD_BIN_ENV: &str = "GCLOUD_BIN";
pub const DEFAULT_GCLOUD_BIN: &str = "gcloud";
pub const WORKERS_ENV: &str = "IPU_WORKERS";
pub const LIST_FORMAT_ENV: &str = "IPU_LIST_FORMAT";

/// Largest stdout accepted from a single gcloud call.
pub const MAX_OUTPUT_BYTES: usize = 10_000_000;

/// Mean allocation ratio at which a subnet is highlighted in the terminal table.
pub const HIGH_UTILIZATION_RATIO: f64 = 0.8;

/// Output format requested from `gcloud recommender insights list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFormat {
    /// Whitespace separated columns with a header row.
    #[default]
    Table,
    /// `--format=json`, an array of records.
    Json,
}

impl ListFormat {
    pub fn parse(value: &str) -> Option<ListFormat> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" => Some(ListFormat::Table),
            "json" => Some(ListFormat::Json),
            _ => None,
        }
    }
}

/// Runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_id: String,
    pub gcloud_bin: String,
    /// Number of insights described concurrently.
    pub workers: usize,
    pub list_format: ListFormat,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, missing or invalid values
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_id = lookup(PROJECT_ID_ENV)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| {
                log::info!("{PROJECT_ID_ENV} not set, using default project {DEFAULT_PROJECT_ID}");
                DEFAULT_PROJECT_ID.to_string()
            });

        let gcloud_bin = lookup(GCLOUD_BIN_ENV)
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GCLOUD_BIN.to_string());

        let workers = match lookup(WORKERS_ENV) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    log::warn!("Ignoring invalid {WORKERS_ENV}='{raw}'");
                    default_workers()
                }
            },
            None => default_workers(),
        };

        let list_format = match lookup(LIST_FORMAT_ENV) {
            Some(raw) => ListFormat::parse(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring unknown {LIST_FORMAT_ENV}='{raw}', expected table or json");
                ListFormat::default()
            }),
            None => ListFormat::default(),
        };

        Config {
            project_id,
            gcloud_bin,
            workers,
            list_format,
        }
    }
}

/// Worker pool size when none is configured: cpus + 4, at most 32.
pub fn default_workers() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cpus + 4).min(32)
}
