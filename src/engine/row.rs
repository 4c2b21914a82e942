// * Report row: one flagged slide, flattened for tabular output

use serde::Serialize;

use crate::engine::facts::SlideFacts;
use crate::engine::rules::{count_words, Note};
use crate::network::ImageDetails;

pub const NOT_AVAILABLE: &str = "N/A";

// * Position of "Secondary Text Word Count" in REPORT_COLUMNS
pub const WORD_COUNT_COLUMN: usize = 5;

/// Fixed column order of every report format
pub const REPORT_COLUMNS: [&str; 7] = [
    "Portal",
    "Slide Number",
    "Responsive Image URL",
    "Actual Dimensions",
    "Actual Size",
    "Secondary Text Word Count",
    "Note",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Portal")]
    pub portal: String,
    #[serde(rename = "Slide Number")]
    pub slide_label: String,
    #[serde(rename = "Responsive Image URL")]
    pub image_url: String,
    #[serde(rename = "Actual Dimensions")]
    pub dimensions: String,
    #[serde(rename = "Actual Size")]
    pub size: String,
    #[serde(rename = "Secondary Text Word Count")]
    pub word_count: usize,
    #[serde(rename = "Note")]
    pub notes: String,
}

impl ReportRow {
    /// Flattens a slide and its notes. Dimension and size columns read "N/A"
    /// exactly when no [`ImageDetails`] were obtained.
    pub fn build(facts: &SlideFacts, details: Option<&ImageDetails>, notes: &[Note]) -> Self {
        let (dimensions, size) = match details {
            Some(d) => (
                format!("{}x{}", d.width, d.height),
                format!("{:.2} KB", d.size_kb()),
            ),
            None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
        };

        Self {
            portal: facts.page_url.clone(),
            slide_label: facts.label.to_string(),
            image_url: facts
                .image_url
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            dimensions,
            size,
            word_count: count_words(&facts.caption_text),
            notes: notes
                .iter()
                .map(|n| n.text.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }

    // * Cells in REPORT_COLUMNS order
    pub fn cells(&self) -> [String; 7] {
        [
            self.portal.clone(),
            self.slide_label.clone(),
            self.image_url.clone(),
            self.dimensions.clone(),
            self.size.clone(),
            self.word_count.to_string(),
            self.notes.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::engine::facts::SlideLabel;
    use crate::engine::rules::evaluate;

    #[test]
    fn test_build_without_details() {
        let facts = SlideFacts::new("https://bank.example/", SlideLabel::new(2, Some("1")));
        let notes = evaluate(&facts, None, &RuleConfig::default());
        let row = ReportRow::build(&facts, None, &notes);

        assert_eq!(row.portal, "https://bank.example/");
        assert_eq!(row.slide_label, "2 (Index: 1)");
        assert_eq!(row.image_url, "N/A");
        assert_eq!(row.dimensions, "N/A");
        assert_eq!(row.size, "N/A");
        assert_eq!(row.word_count, 0);
        assert_eq!(row.notes, "could not find image URL.");
    }

    #[test]
    fn test_build_joins_notes() {
        let facts = SlideFacts::new("https://bank.example/", SlideLabel::new(1, None))
            .with_image_url("https://cdn.example/b.jpg")
            .with_caption("Three little words");
        let details = ImageDetails {
            width: 400,
            height: 612,
            size_bytes: 2048,
        };
        let notes = evaluate(&facts, Some(&details), &RuleConfig::default());
        let row = ReportRow::build(&facts, Some(&details), &notes);

        assert_eq!(row.dimensions, "400x612");
        assert_eq!(row.size, "2.00 KB");
        assert_eq!(row.word_count, 3);
        assert_eq!(
            row.notes,
            "wrong extension, expected .png; dimensions (400x612) out of range (428x612 +/-3px)."
        );
        assert_eq!(row.cells()[WORD_COUNT_COLUMN], "3");
        assert_eq!(REPORT_COLUMNS[WORD_COUNT_COLUMN], "Secondary Text Word Count");
    }
}
