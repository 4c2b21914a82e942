use thiserror::Error;

// * Page-level failures. Each one aborts only the page it happened on.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("Page navigation failed: {0}")]
    Navigation(String),

    #[error("Page navigation timed out after {0}ms")]
    NavigationTimeout(u64),

    #[error("Timed out after {0}ms waiting for carousel slides")]
    CarouselTimeout(u64),

    #[error("Carousel container not found on page")]
    StructureNotFound,

    #[error("Carousel has no non-duplicate slides")]
    NoSlidesFound,

    #[error("Slide extraction script failed: {0}")]
    Script(String),
}

impl PageError {
    // * Outcome label for the pages-audited counter
    pub fn outcome(&self) -> &'static str {
        match self {
            PageError::BrowserLaunch(_) => "browser_error",
            PageError::Navigation(_) | PageError::NavigationTimeout(_) => "navigation_error",
            PageError::CarouselTimeout(_) => "carousel_timeout",
            PageError::StructureNotFound => "structure_not_found",
            PageError::NoSlidesFound => "no_slides",
            PageError::Script(_) => "script_error",
        }
    }
}
