use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use carousel_audit::browser::CarouselBrowser;
use carousel_audit::cli::{validate_page_urls, Cli};
use carousel_audit::engine::{BatchRunner, PageAnalyzer, SlideProcessor};
use carousel_audit::network::{IdentityProfile, ImageClient};
use carousel_audit::ops::telemetry;
use carousel_audit::report::save_report;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // * Initialize Telemetry
    if cli.pretty_logs {
        telemetry::init_tracing_pretty(&cli.log_level);
    } else {
        telemetry::init_tracing_with_level(&cli.log_level);
    }

    let config = cli.audit_config();
    let urls = validate_page_urls(&cli.urls);
    if urls.is_empty() {
        warn!("No valid URLs to analyze");
        return ExitCode::SUCCESS;
    }

    let identity = IdentityProfile::desktop_chrome();
    let inspector = match ImageClient::with_timeout(&identity, config.image_timeout) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Could not build the image client");
            return ExitCode::FAILURE;
        }
    };

    let mut browser = match CarouselBrowser::launch(config.clone(), &identity).await {
        Ok(browser) => browser,
        Err(e) => {
            error!(error = %e, "Could not start the browser");
            return ExitCode::FAILURE;
        }
    };

    let runner = BatchRunner::new(PageAnalyzer::new(SlideProcessor::new(&inspector, &config.rules)));
    let outcome = runner.run_live(&mut browser, &urls).await;
    browser.shutdown().await;

    if let Some(path) = &config.metrics_path {
        if let Err(e) = telemetry::write_metrics_file(path) {
            warn!(path = %path.display(), error = %e, "Could not write metrics file");
        }
    }

    if outcome.rows.is_empty() {
        info!(
            max_size_kb = config.rules.max_size_kb(),
            "No issues found (dimension mismatch, size, text length or wrong extension) in the analyzed carousels"
        );
        return ExitCode::SUCCESS;
    }

    info!(issues = outcome.rows.len(), "Creating report");
    match save_report(&outcome.rows, &config.output_path) {
        Ok(saved) => {
            info!(path = %saved.path().display(), "Report ready");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Report could not be saved");
            ExitCode::FAILURE
        }
    }
}
