//! JSON report output.

use crate::models::UtilizationReport;
use std::error::Error;

/// Pretty JSON of the report: `{ "<subnet>": { "meanFreeIps": .., "meanAllocationRatio": .. } }`.
pub fn report_json(report: &UtilizationReport) -> Result<String, Box<dyn Error>> {
    serde_json::to_string_pretty(report).map_err(|e| format!("Error serializing report: {e}").into())
}

/// Log and print the final report.
pub fn print_report_json(report: &UtilizationReport) -> Result<(), Box<dyn Error>> {
    let json = report_json(report)?;
    log::info!("Final IP utilization summary: {json}");
    println!("{json}");
    Ok(())
}
