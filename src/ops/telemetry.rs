// * Telemetry - Structured Logging and Prometheus Metrics
// * Provides the log subscriber setup and the audit counters

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};
use std::path::Path;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

lazy_static! {
    // * Pages handled by outcome
    pub static ref PAGES_AUDITED_TOTAL: CounterVec = register_counter_vec!(
        "carousel_pages_audited_total",
        "Total pages audited by outcome",
        &["outcome"]
    ).unwrap();

    // * Slides by disposition (evaluated / duplicate)
    pub static ref SLIDES_TOTAL: CounterVec = register_counter_vec!(
        "carousel_slides_total",
        "Total slides seen by disposition",
        &["disposition"]
    ).unwrap();

    // * Violations by rule
    pub static ref VIOLATIONS_TOTAL: CounterVec = register_counter_vec!(
        "carousel_violations_total",
        "Total rule violations by rule",
        &["rule"]
    ).unwrap();

    // * Image inspections by result
    pub static ref INSPECTIONS_TOTAL: CounterVec = register_counter_vec!(
        "carousel_image_inspections_total",
        "Total image inspections by result",
        &["result"]
    ).unwrap();

    // * Image fetch duration histogram
    pub static ref IMAGE_FETCH_SECONDS: HistogramVec = register_histogram_vec!(
        "carousel_image_fetch_seconds",
        "Image fetch and decode duration in seconds",
        &["stage"],
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    ).unwrap();
}

/// Initializes the tracing subscriber with JSON formatting at the given level
///
/// # Example
/// ```ignore
/// use carousel_audit::ops::telemetry;
///
/// telemetry::init_tracing_with_level("info");
/// tracing::info!(page_url = "https://example.com", "Analyzing page");
/// ```
pub fn init_tracing_with_level(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json())
        .init();
}

/// Initializes tracing with pretty formatting (for operators reading a terminal)
pub fn init_tracing_pretty(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().pretty())
        .init();
}

/// Returns the current metrics as a string
pub fn get_metrics_string() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Dumps the metrics text exposition to a file
pub fn write_metrics_file(path: &Path) -> std::io::Result<()> {
    std::fs::write(path, get_metrics_string())
}

/// Records a page outcome (`analyzed`, `structure_not_found`, ...)
pub fn record_page_outcome(outcome: &str) {
    PAGES_AUDITED_TOTAL.with_label_values(&[outcome]).inc();
}

/// Records a slide that went through rule evaluation
pub fn record_slide_evaluated() {
    SLIDES_TOTAL.with_label_values(&["evaluated"]).inc();
}

/// Records a slide skipped because its image was already processed on the page
pub fn record_slide_duplicate() {
    SLIDES_TOTAL.with_label_values(&["duplicate"]).inc();
}

/// Records one violation of a rule
pub fn record_violation(rule: &str) {
    VIOLATIONS_TOTAL.with_label_values(&[rule]).inc();
}

/// Records an inspection result (`ok` or an error kind)
pub fn record_inspection(result: &str) {
    INSPECTIONS_TOTAL.with_label_values(&[result]).inc();
}

/// Records image fetch duration
pub fn record_image_fetch_duration(seconds: f64) {
    IMAGE_FETCH_SECONDS
        .with_label_values(&["fetch"])
        .observe(seconds);
}
