// * Command line surface

use std::path::PathBuf;

use clap::Parser;
use tracing::warn;
use url::Url;

use crate::config::constants::DEFAULT_REPORT_FILE;
use crate::config::AuditConfig;

/// Audits the main banner carousel of one or more pages and writes a report of non-compliant slides.
#[derive(Debug, Parser)]
#[command(name = "carousel-audit", version, about)]
pub struct Cli {
    /// One or more absolute page URLs (http or https), separated by spaces
    #[arg(long, value_name = "URL", num_args = 1.., required = true)]
    pub urls: Vec<String>,

    /// Report location; a .csv next to it is used if the spreadsheet cannot be written
    #[arg(long, value_name = "PATH", default_value = DEFAULT_REPORT_FILE)]
    pub output: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Human-readable logs instead of JSON
    #[arg(long)]
    pub pretty_logs: bool,

    /// Write Prometheus metrics of the run to this file
    #[arg(long, value_name = "PATH")]
    pub metrics_file: Option<PathBuf>,
}

impl Cli {
    pub fn audit_config(&self) -> AuditConfig {
        AuditConfig {
            output_path: self.output.clone(),
            metrics_path: self.metrics_file.clone(),
            ..AuditConfig::default()
        }
    }
}

// * Parses a page URL; only absolute http(s) URLs with a host qualify
pub fn parse_page_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Some(url),
        _ => None,
    }
}

/// Keeps the valid URLs in input order. Invalid ones are skipped with a warning.
pub fn validate_page_urls(raw: &[String]) -> Vec<Url> {
    raw.iter()
        .filter_map(|candidate| {
            let parsed = parse_page_url(candidate);
            if parsed.is_none() {
                warn!(url = %candidate, "Skipping invalid URL format");
            }
            parsed
        })
        .collect()
}
