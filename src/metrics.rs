use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!("plan_api_requests_total", "Total number of API requests");
    describe_counter!(
        "plan_catalog_reloads_total",
        "Catalog loads from the backing CSV, by outcome"
    );
    describe_gauge!("plan_catalog_size", "Number of plans in the held catalog");
    describe_counter!(
        "plan_recommendations_total",
        "Recommendations served, by strategy"
    );
    describe_counter!("plan_feedback_total", "Feedback submissions stored");
    describe_gauge!("plan_advisor_info", "Service version information");

    gauge!("plan_advisor_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

pub fn record_request(endpoint: &str) {
    counter!("plan_api_requests_total", "endpoint" => endpoint.to_string()).increment(1);
}

pub fn record_catalog_reload(outcome: &str) {
    counter!("plan_catalog_reloads_total", "outcome" => outcome.to_string()).increment(1);
}

pub fn set_catalog_size(plans: usize) {
    gauge!("plan_catalog_size").set(plans as f64);
}

pub fn record_recommendation(strategy: &str, returned: usize) {
    counter!(
        "plan_recommendations_total",
        "strategy" => strategy.to_string(),
        "empty" => (returned == 0).to_string(),
    )
    .increment(1);
}

pub fn record_feedback() {
    counter!("plan_feedback_total").increment(1);
}
