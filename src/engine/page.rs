// * Page Analyzer
// * Runs every slide of one page through the slide processor with a fresh dedup set.

use tracing::info;

use crate::engine::dedup::ProcessedUrlSet;
use crate::engine::facts::SlideFacts;
use crate::engine::row::ReportRow;
use crate::engine::slide::SlideProcessor;
use crate::network::ImageInspector;

pub struct PageAnalyzer<'a, I> {
    processor: SlideProcessor<'a, I>,
}

impl<'a, I: ImageInspector> PageAnalyzer<'a, I> {
    pub fn new(processor: SlideProcessor<'a, I>) -> Self {
        Self { processor }
    }

    /// Analyzes `slides` in order. Zero slides yields zero rows.
    pub async fn analyze_page(&self, page_url: &str, slides: &[SlideFacts]) -> Vec<ReportRow> {
        let mut seen = ProcessedUrlSet::new();
        let mut rows = Vec::new();

        for facts in slides {
            if let Some(row) = self.processor.process(facts, &mut seen).await {
                rows.push(row);
            }
        }

        info!(
            page_url = page_url,
            slides = slides.len(),
            unique_images = seen.len(),
            issues = rows.len(),
            "Finished page analysis"
        );

        rows
    }
}
