// * Rule Evaluator
// * Applies the fixed rule set to one slide. Rules never short-circuit: every
// * applicable rule runs and contributes at most one note, in a fixed order.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use crate::config::RuleConfig;
use crate::engine::facts::SlideFacts;
use crate::network::ImageDetails;

lazy_static! {
    // * Runs of word characters (alphanumeric or underscore) between word boundaries
    static ref WORD_REGEX: Regex = Regex::new(r"\b\w+\b").unwrap();
}

/// Rule that produced a note. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    Extension,
    Dimensions,
    Size,
    MissingImageDetails,
    MissingImageUrl,
    CaptionLength,
    Processing,
}

impl Rule {
    pub fn label(&self) -> &'static str {
        match self {
            Rule::Extension => "extension",
            Rule::Dimensions => "dimensions",
            Rule::Size => "size",
            Rule::MissingImageDetails => "missing_image_details",
            Rule::MissingImageUrl => "missing_image_url",
            Rule::CaptionLength => "caption_length",
            Rule::Processing => "processing",
        }
    }
}

/// One human-readable violation note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub rule: Rule,
    pub text: String,
}

impl Note {
    fn new(rule: Rule, text: impl Into<String>) -> Self {
        Self {
            rule,
            text: text.into(),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Evaluates every rule against one slide. An empty result means the slide is compliant.
pub fn evaluate(facts: &SlideFacts, details: Option<&ImageDetails>, config: &RuleConfig) -> Vec<Note> {
    let mut notes = Vec::new();

    // * 1. Extension, only when there is a URL to look at
    if let Some(url) = facts.image_url.as_deref() {
        let extension = url_extension(url);
        if !extension.eq_ignore_ascii_case(&config.expected_extension) {
            tracing::debug!(image_url = url, extension = %extension, "Unexpected extension");
            notes.push(Note::new(
                Rule::Extension,
                format!("wrong extension, expected {}", config.expected_extension),
            ));
        }
    }

    if let Some(d) = details {
        // * 2. Dimensions, each axis bounded on its own
        if !dimensions_within_tolerance(d, config) {
            notes.push(Note::new(
                Rule::Dimensions,
                format!(
                    "dimensions ({}x{}) out of range ({}x{} +/-{}px).",
                    d.width,
                    d.height,
                    config.target_width,
                    config.target_height,
                    config.dimension_tolerance_px
                ),
            ));
        }

        // * 3. Weight
        if d.size_bytes > config.max_size_bytes {
            notes.push(Note::new(
                Rule::Size,
                format!(
                    "size ({:.2} KB) exceeds the {} KB limit.",
                    d.size_kb(),
                    config.max_size_kb()
                ),
            ));
        }
    }

    // * 4 / 5. Missing details vs missing URL, at most one of them
    match (facts.image_url.is_some(), details.is_some()) {
        (true, false) => notes.push(Note::new(
            Rule::MissingImageDetails,
            "could not obtain image details.",
        )),
        (false, _) => notes.push(Note::new(Rule::MissingImageUrl, "could not find image URL.")),
        (true, true) => {}
    }

    // * 6. Caption length
    if !facts.caption_text.is_empty() {
        let words = count_words(&facts.caption_text);
        if words > config.max_word_count {
            notes.push(Note::new(
                Rule::CaptionLength,
                format!(
                    "secondary text exceeds {} words ({} found).",
                    config.max_word_count, words
                ),
            ));
        }
    }

    // * 7. Extraction faults recorded while reading the slide
    for fault in &facts.faults {
        notes.push(Note::new(Rule::Processing, fault.note()));
    }

    notes
}

pub fn dimensions_within_tolerance(details: &ImageDetails, config: &RuleConfig) -> bool {
    details.width.abs_diff(config.target_width) <= config.dimension_tolerance_px
        && details.height.abs_diff(config.target_height) <= config.dimension_tolerance_px
}

pub fn count_words(text: &str) -> usize {
    WORD_REGEX.find_iter(text).count()
}

/// Lowercased, dot-prefixed extension of the last path segment, or an empty string.
///
/// Query and fragment are ignored. Leading dots of the file name do not start an
/// extension, so `/.png` has none.
pub fn url_extension(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };

    let file_name = path.rsplit('/').next().unwrap_or_default();
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();

    match file_name[stem_start..].rfind('.') {
        Some(dot) => file_name[stem_start + dot..].to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::facts::{ExtractionFault, SlideLabel};

    fn facts() -> SlideFacts {
        SlideFacts::new("https://bank.example/", SlideLabel::new(1, None))
    }

    #[test]
    fn test_url_extension() {
        assert_eq!(url_extension("https://cdn.example/img/banner.PNG"), ".png");
        assert_eq!(url_extension("https://cdn.example/img/banner.jpg?v=3#x"), ".jpg");
        assert_eq!(url_extension("https://cdn.example/a.tar.gz"), ".gz");
        assert_eq!(url_extension("https://cdn.example/img.d/banner"), "");
        assert_eq!(url_extension("https://cdn.example/img/.png"), "");
        assert_eq!(url_extension("https://cdn.example/"), "");
        assert_eq!(url_extension("not a url/banner.webp?x=1"), ".webp");
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("Hello, world!"), 2);
        assert_eq!(count_words("snake_case counts-as three"), 4);
        assert_eq!(count_words("Ahorra más con tu tarjeta"), 5);
        assert_eq!(count_words("   \n\t "), 0);
    }

    #[test]
    fn test_all_rules_fire_in_order() {
        let config = RuleConfig::default();
        let slide = facts()
            .with_image_url("https://cdn.example/banner.jpg")
            .with_caption("one two three four five six seven eight nine ten eleven twelve thirteen")
            .with_fault(ExtractionFault::Caption);
        let details = ImageDetails {
            width: 1000,
            height: 500,
            size_bytes: 800 * 1024,
        };

        let notes = evaluate(&slide, Some(&details), &config);
        let rules: Vec<Rule> = notes.iter().map(|n| n.rule).collect();
        assert_eq!(
            rules,
            vec![
                Rule::Extension,
                Rule::Dimensions,
                Rule::Size,
                Rule::CaptionLength,
                Rule::Processing
            ]
        );
        assert_eq!(notes[0].text, "wrong extension, expected .png");
        assert_eq!(notes[1].text, "dimensions (1000x500) out of range (428x612 +/-3px).");
        assert_eq!(notes[2].text, "size (800.00 KB) exceeds the 400 KB limit.");
        assert_eq!(notes[3].text, "secondary text exceeds 12 words (13 found).");
        assert_eq!(notes[4].text, "error processing secondary text.");
    }

    #[test]
    fn test_missing_details_excludes_missing_url() {
        let config = RuleConfig::default();
        let slide = facts().with_image_url("https://cdn.example/banner.png");
        let notes = evaluate(&slide, None, &config);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].rule, Rule::MissingImageDetails);
        assert_eq!(notes[0].text, "could not obtain image details.");
    }

    #[test]
    fn test_compliant_slide() {
        let config = RuleConfig::default();
        let slide = facts()
            .with_image_url("https://cdn.example/banner.png")
            .with_caption("Short and sweet");
        let details = ImageDetails {
            width: 428,
            height: 612,
            size_bytes: 100 * 1024,
        };
        assert!(evaluate(&slide, Some(&details), &config).is_empty());
    }
}
