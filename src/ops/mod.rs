// * Operations: logging setup and audit metrics

pub mod telemetry;

// * Re-exports for convenient access
pub use telemetry::{
    get_metrics_string, init_tracing_pretty, init_tracing_with_level,
    record_image_fetch_duration, record_inspection, record_page_outcome, record_slide_duplicate,
    record_slide_evaluated, record_violation, write_metrics_file,
};
