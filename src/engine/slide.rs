// * Slide Processor
// * Orchestrates one slide: dedup check, inspection, rule evaluation, row building.

use tracing::{debug, info, warn};

use crate::config::RuleConfig;
use crate::engine::dedup::ProcessedUrlSet;
use crate::engine::facts::SlideFacts;
use crate::engine::row::ReportRow;
use crate::engine::rules::evaluate;
use crate::network::ImageInspector;
use crate::ops::telemetry::{record_slide_duplicate, record_slide_evaluated, record_violation};

pub struct SlideProcessor<'a, I> {
    inspector: &'a I,
    config: &'a RuleConfig,
}

impl<'a, I: ImageInspector> SlideProcessor<'a, I> {
    pub fn new(inspector: &'a I, config: &'a RuleConfig) -> Self {
        Self { inspector, config }
    }

    /// Processes one slide and returns a row when at least one note was produced.
    ///
    /// A slide whose image URL is already in `seen` contributes nothing. The URL is
    /// marked as seen before the result of the fetch is known, so a failing URL is
    /// never fetched twice on the same page.
    pub async fn process(&self, facts: &SlideFacts, seen: &mut ProcessedUrlSet) -> Option<ReportRow> {
        let slide = facts.label.to_string();

        let details = match facts.image_url.as_deref() {
            Some(url) => {
                if !seen.insert(url) {
                    debug!(page_url = %facts.page_url, slide = %slide, image_url = url, "Skipping already processed image URL");
                    record_slide_duplicate();
                    return None;
                }
                self.inspector.inspect(url).await.ok()
            }
            None => None,
        };

        record_slide_evaluated();
        let notes = evaluate(facts, details.as_ref(), self.config);

        if notes.is_empty() {
            info!(page_url = %facts.page_url, slide = %slide, "Slide OK");
            return None;
        }

        for note in &notes {
            record_violation(note.rule.label());
            warn!(page_url = %facts.page_url, slide = %slide, rule = note.rule.label(), note = %note, "Validation failed");
        }

        Some(ReportRow::build(facts, details.as_ref(), &notes))
    }
}
