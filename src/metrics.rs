use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the Prometheus recorder
///
/// Fails if a global recorder is already installed.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "product_analysis_requests_total",
        "Total number of product image analyses started"
    );
    describe_counter!(
        "product_analysis_tokens_total",
        "Total number of completion tokens reported by the endpoint"
    );
    describe_histogram!(
        "product_analysis_completion_seconds",
        "Completion endpoint latency in seconds"
    );
    describe_counter!(
        "product_analysis_errors_total",
        "Total number of failed analyses by error type"
    );
    describe_gauge!("product_lens_info", "Service version information");

    gauge!("product_lens_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record an analysis request
pub fn record_analysis(model: &str) {
    counter!("product_analysis_requests_total", "model" => model.to_string()).increment(1);
}

/// Record tokens
pub fn record_tokens(model: &str, token_type: &str, count: u64) {
    counter!(
        "product_analysis_tokens_total",
        "model" => model.to_string(),
        "type" => token_type.to_string(),
    )
    .increment(count);
}

/// Record completion latency
pub fn record_duration(model: &str, duration: Duration) {
    histogram!("product_analysis_completion_seconds", "model" => model.to_string())
        .record(duration.as_secs_f64());
}

/// Record an error
pub fn record_error(model: &str, error_type: &str) {
    counter!(
        "product_analysis_errors_total",
        "model" => model.to_string(),
        "error_type" => error_type.to_string(),
    )
    .increment(1);
}
