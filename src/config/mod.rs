// * Run configuration
// * RuleConfig is the immutable rule set threaded into the evaluator,
// * AuditConfig carries everything else a batch run needs.

pub mod constants;

use std::path::PathBuf;
use std::time::Duration;

use constants::*;

/// Thresholds applied to every slide. One value per run, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    pub target_width: u32,
    pub target_height: u32,
    pub dimension_tolerance_px: u32,
    pub max_word_count: usize,
    pub expected_extension: String,
    pub max_size_bytes: u64,
}

impl RuleConfig {
    /// Size limit expressed in KB, as shown in notes
    pub fn max_size_kb(&self) -> f64 {
        self.max_size_bytes as f64 / 1024.0
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            target_width: TARGET_WIDTH_PX,
            target_height: TARGET_HEIGHT_PX,
            dimension_tolerance_px: DIMENSION_TOLERANCE_PX,
            max_word_count: MAX_CAPTION_WORDS,
            expected_extension: EXPECTED_EXTENSION.to_string(),
            max_size_bytes: MAX_IMAGE_SIZE_BYTES,
        }
    }
}

/// Per-run settings outside the rule set
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub rules: RuleConfig,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub image_timeout: Duration,
    pub page_timeout: Duration,
    pub carousel_wait: Duration,
    pub carousel_settle: Duration,
    pub output_path: PathBuf,
    pub metrics_path: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        let rules = RuleConfig::default();
        Self {
            // * The browser window is sized to the banner we are auditing
            viewport_width: rules.target_width,
            viewport_height: rules.target_height,
            rules,
            image_timeout: Duration::from_secs(IMAGE_FETCH_TIMEOUT_SECS),
            page_timeout: Duration::from_millis(PAGE_TIMEOUT_MS),
            carousel_wait: Duration::from_millis(CAROUSEL_WAIT_TIMEOUT_MS),
            carousel_settle: Duration::from_millis(CAROUSEL_SETTLE_MS),
            output_path: PathBuf::from(DEFAULT_REPORT_FILE),
            metrics_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_match_constants() {
        let rules = RuleConfig::default();
        assert_eq!(rules.target_width, 428);
        assert_eq!(rules.target_height, 612);
        assert_eq!(rules.dimension_tolerance_px, 3);
        assert_eq!(rules.max_word_count, 12);
        assert_eq!(rules.expected_extension, ".png");
        assert_eq!(rules.max_size_bytes, 409_600);
        assert!((rules.max_size_kb() - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_viewport_follows_target() {
        let config = AuditConfig::default();
        assert_eq!(config.viewport_width, config.rules.target_width);
        assert_eq!(config.viewport_height, config.rules.target_height);
        assert_eq!(config.image_timeout, Duration::from_secs(30));
    }
}
