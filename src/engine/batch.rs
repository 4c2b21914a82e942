// * Batch Runner
// * Walks pages in order and concatenates their rows. Page-level failures are
// * logged and contribute zero rows; nothing here aborts the batch.

use tracing::{error, info, warn};
use url::Url;

use crate::browser::{PageError, SlideSource};
use crate::engine::facts::SlideFacts;
use crate::engine::page::PageAnalyzer;
use crate::engine::row::ReportRow;
use crate::network::ImageInspector;
use crate::ops::telemetry::record_page_outcome;

/// Rows of a batch plus the page counts used in the final summary
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub rows: Vec<ReportRow>,
    pub pages_requested: usize,
    pub pages_analyzed: usize,
}

pub struct BatchRunner<'a, I> {
    analyzer: PageAnalyzer<'a, I>,
}

impl<'a, I: ImageInspector> BatchRunner<'a, I> {
    pub fn new(analyzer: PageAnalyzer<'a, I>) -> Self {
        Self { analyzer }
    }

    /// Runs already-discovered pages, preserving page order then slide order.
    pub async fn run(&self, pages: &[(String, Vec<SlideFacts>)]) -> Vec<ReportRow> {
        let mut rows = Vec::new();
        for (page_url, slides) in pages {
            rows.extend(self.analyzer.analyze_page(page_url, slides).await);
        }
        rows
    }

    /// Discovers each page through `source` and analyzes it, one page at a time.
    pub async fn run_live<S: SlideSource>(&self, source: &mut S, urls: &[Url]) -> BatchOutcome {
        let mut outcome = BatchOutcome {
            pages_requested: urls.len(),
            ..BatchOutcome::default()
        };

        for page_url in urls {
            info!(page_url = %page_url, "Analyzing URL");

            let descriptors = match source.discover(page_url).await {
                Ok(descriptors) => descriptors,
                Err(e) => {
                    log_page_error(page_url, &e);
                    record_page_outcome(e.outcome());
                    continue;
                }
            };

            info!(page_url = %page_url, slides = descriptors.len(), "Found non-duplicate slides");

            let slides: Vec<SlideFacts> = descriptors
                .iter()
                .enumerate()
                .map(|(i, d)| SlideFacts::from_descriptor(page_url, i + 1, d))
                .collect();

            let rows = self.analyzer.analyze_page(page_url.as_str(), &slides).await;
            record_page_outcome("analyzed");
            outcome.pages_analyzed += 1;
            outcome.rows.extend(rows);
        }

        info!(
            pages_requested = outcome.pages_requested,
            pages_analyzed = outcome.pages_analyzed,
            issues = outcome.rows.len(),
            "Analysis complete for all URLs"
        );

        outcome
    }
}

fn log_page_error(page_url: &Url, err: &PageError) {
    match err {
        PageError::StructureNotFound => {
            warn!(page_url = %page_url, "Carousel structure not found, skipping page")
        }
        PageError::NoSlidesFound => {
            warn!(page_url = %page_url, "No non-duplicate slides found in carousel, skipping page")
        }
        PageError::CarouselTimeout(ms) => {
            warn!(page_url = %page_url, waited_ms = ms, "Timed out waiting for carousel slides, skipping page")
        }
        other => error!(page_url = %page_url, error = %other, "Page analysis failed, skipping page"),
    }
}
