// * Slide facts: the immutable per-slide input of the rule pipeline.
// * Built from raw browser descriptors; resolution of the responsive image URL
// * happens here so the rest of the engine only sees absolute URLs.

use std::fmt;

use url::Url;

use crate::browser::SlideDescriptor;

/// 1-based position in the carousel plus the index the slider assigned, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLabel {
    pub position: usize,
    pub carousel_index: Option<String>,
}

impl SlideLabel {
    pub fn new(position: usize, carousel_index: Option<&str>) -> Self {
        let carousel_index = carousel_index
            .map(str::trim)
            .filter(|idx| !idx.is_empty())
            .map(str::to_string);
        Self {
            position,
            carousel_index,
        }
    }
}

impl fmt::Display for SlideLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.carousel_index {
            Some(idx) => write!(f, "{} (Index: {})", self.position, idx),
            None => write!(f, "{}", self.position),
        }
    }
}

/// A part of the slide that could not be read from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionFault {
    ImageAttributes,
    Caption,
}

impl ExtractionFault {
    pub fn note(&self) -> &'static str {
        match self {
            ExtractionFault::ImageAttributes => "error processing image attributes.",
            ExtractionFault::Caption => "error processing secondary text.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideFacts {
    pub page_url: String,
    pub label: SlideLabel,
    // * Absolute URL, resolved against page_url
    pub image_url: Option<String>,
    // * Trimmed caption, empty when the slide has none
    pub caption_text: String,
    pub faults: Vec<ExtractionFault>,
}

impl SlideFacts {
    pub fn new(page_url: impl Into<String>, label: SlideLabel) -> Self {
        Self {
            page_url: page_url.into(),
            label,
            image_url: None,
            caption_text: String::new(),
            faults: Vec::new(),
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption_text = caption.into().trim().to_string();
        self
    }

    pub fn with_fault(mut self, fault: ExtractionFault) -> Self {
        self.faults.push(fault);
        self
    }

    /// Converts a raw descriptor found at `position` (1-based) on `page_url`.
    pub fn from_descriptor(page_url: &Url, position: usize, descriptor: &SlideDescriptor) -> Self {
        let label = SlideLabel::new(position, descriptor.swiper_index.as_deref());
        let mut facts = SlideFacts::new(page_url.as_str(), label);

        if descriptor.image_error.is_some() {
            facts.faults.push(ExtractionFault::ImageAttributes);
        }
        if descriptor.caption_error.is_some() {
            facts.faults.push(ExtractionFault::Caption);
        }

        if descriptor.has_image {
            facts.image_url = select_image_source(
                descriptor.current_src.as_deref(),
                descriptor.src.as_deref(),
            )
            .and_then(|raw| resolve_image_url(raw, page_url));
        } else {
            tracing::debug!(page_url = %page_url, slide = %facts.label, "No <img> tag found in slide");
        }

        if let Some(caption) = descriptor.caption.as_deref() {
            facts.caption_text = caption.trim().to_string();
        }

        facts
    }
}

// * The rendered source wins over the declared one; blank values count as missing.
pub fn select_image_source<'a>(current_src: Option<&'a str>, src: Option<&'a str>) -> Option<&'a str> {
    current_src
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| src.map(str::trim).filter(|s| !s.is_empty()))
}

// * Joins a raw src against the page URL. Returns None when the result is not a URL.
pub fn resolve_image_url(raw: &str, base: &Url) -> Option<String> {
    base.join(raw).ok().map(|u| u.to_string())
}
