// * Browser collaborator
// * Turns a page URL into plain slide descriptors. The engine only depends on
// * the SlideSource trait, never on the automation tooling.

pub mod carousel;
pub mod errors;

use serde::{Deserialize, Serialize};
use url::Url;

pub use carousel::CarouselBrowser;
pub use errors::PageError;

/// Raw facts about one non-duplicate slide, as read from the DOM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    #[serde(default)]
    pub swiper_index: Option<String>,
    #[serde(default)]
    pub has_image: bool,
    // * Source actually rendered for the current viewport
    #[serde(default)]
    pub current_src: Option<String>,
    // * Declared src attribute
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub image_error: Option<String>,
    #[serde(default)]
    pub caption_error: Option<String>,
}

/// Source of slide descriptors for a page.
///
/// `Err(PageError::StructureNotFound)` means the carousel container is absent,
/// which is distinct from a container holding zero slides (`NoSlidesFound`).
#[allow(async_fn_in_trait)]
pub trait SlideSource {
    async fn discover(&mut self, page_url: &Url) -> Result<Vec<SlideDescriptor>, PageError>;
}
