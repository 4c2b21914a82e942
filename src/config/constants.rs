// * Configuration Constants
// * Central location for all rule thresholds, timeouts and carousel selectors

// * Responsive banner target dimensions in pixels
pub const TARGET_WIDTH_PX: u32 = 428;
pub const TARGET_HEIGHT_PX: u32 = 612;

// * Allowed deviation per axis, in pixels
pub const DIMENSION_TOLERANCE_PX: u32 = 3;

// * Maximum number of words allowed in the secondary text
pub const MAX_CAPTION_WORDS: usize = 12;

// * Required file extension, lowercase and dot-prefixed
pub const EXPECTED_EXTENSION: &str = ".png";

// * Maximum image weight
pub const MAX_IMAGE_SIZE_KB: u64 = 400;
pub const MAX_IMAGE_SIZE_BYTES: u64 = MAX_IMAGE_SIZE_KB * 1024;

// * Image fetch timeout in seconds
pub const IMAGE_FETCH_TIMEOUT_SECS: u64 = 30;

// * Page navigation timeout in milliseconds
pub const PAGE_TIMEOUT_MS: u64 = 60_000;

// * How long to wait for the first carousel slide to be attached
pub const CAROUSEL_WAIT_TIMEOUT_MS: u64 = 30_000;

// * Poll interval while waiting for the carousel
pub const CAROUSEL_POLL_INTERVAL_MS: u64 = 500;

// * Delay after the carousel shows up so the slider can resolve responsive sources
pub const CAROUSEL_SETTLE_MS: u64 = 5_000;

// * Default report location
pub const DEFAULT_REPORT_FILE: &str = "carousel_issues_report.xlsx";

// * Carousel structure selectors
pub const BANNER_CONTAINER_SELECTOR: &str = ".cont-banner";
pub const SLIDE_WRAPPER_SELECTOR: &str = ".swiper-wrapper";
pub const SLIDE_SELECTOR: &str = ":scope > div.swiper-slide:not(.swiper-slide-duplicate)";
pub const CAPTION_SELECTOR: &str = ".cont-titles";
pub const SLIDE_INDEX_ATTRIBUTE: &str = "data-swiper-slide-index";
