use gcp_ip_utilization::collect_utilization;
use gcp_ip_utilization::config::Config;
use gcp_ip_utilization::gcloud::GcloudInsights;
use gcp_ip_utilization::output::{print_report_json, print_report_table};
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())
        .map_err(|e| format!("Error initializing log4rs: {e}"))?;
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let config = Config::from_env();
    log::info!(
        "project={} workers={} list_format={:?}",
        config.project_id,
        config.workers,
        config.list_format
    );

    let source = Arc::new(GcloudInsights::new(&config));
    let report = collect_utilization(source, config.workers).await;

    print_report_table(&report);
    print_report_json(&report)?;

    Ok(())
}
