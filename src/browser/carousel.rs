// * Carousel discovery through a headless browser
// * Uses ChromiumOxide because slides and their responsive sources only exist after JS runs

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use chromiumoxide::Handler;
use futures::StreamExt;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

use crate::browser::errors::PageError;
use crate::browser::{SlideDescriptor, SlideSource};
use crate::config::constants::{
    BANNER_CONTAINER_SELECTOR, CAPTION_SELECTOR, CAROUSEL_POLL_INTERVAL_MS, SLIDE_INDEX_ATTRIBUTE,
    SLIDE_SELECTOR, SLIDE_WRAPPER_SELECTOR,
};
use crate::config::AuditConfig;
use crate::network::IdentityProfile;

// * Shape returned by the extraction script
#[derive(Debug, Deserialize)]
struct CarouselSnapshot {
    structure_found: bool,
    #[serde(default)]
    slides: Vec<SlideDescriptor>,
}

// * Splits a snapshot into slides or the page-level condition it represents.
// * A missing banner or wrapper is a different condition from a wrapper with no slides.
fn classify_snapshot(snapshot: CarouselSnapshot) -> Result<Vec<SlideDescriptor>, PageError> {
    if !snapshot.structure_found {
        return Err(PageError::StructureNotFound);
    }
    if snapshot.slides.is_empty() {
        return Err(PageError::NoSlidesFound);
    }
    Ok(snapshot.slides)
}

// * Reason reported when the wait budget runs out. A final snapshot tells whether the
// * carousel is absent or empty; anything else (slides present, script failure) is a timeout.
fn wait_expired_error(snapshot: Option<CarouselSnapshot>, waited_ms: u64) -> PageError {
    match snapshot.map(classify_snapshot) {
        Some(Err(e)) => e,
        _ => PageError::CarouselTimeout(waited_ms),
    }
}

// * JS string literal for a selector
fn js_str(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

// * True once at least one non-duplicate slide is attached under the banner
fn presence_script() -> String {
    let selector = format!(
        "{} {} > {}",
        BANNER_CONTAINER_SELECTOR,
        SLIDE_WRAPPER_SELECTOR,
        SLIDE_SELECTOR.trim_start_matches(":scope >").trim()
    );
    format!("document.querySelector({}) !== null", js_str(&selector))
}

// * Reads every non-duplicate slide. Image and caption reads are guarded separately
// * so one failing part still leaves the rest of the slide usable.
fn extraction_script() -> String {
    format!(
        r#"
(() => {{
    const banner = document.querySelector({banner});
    const wrapper = banner ? banner.querySelector({wrapper}) : null;
    if (!wrapper) {{
        return JSON.stringify({{ structure_found: false, slides: [] }});
    }}
    const slides = Array.from(wrapper.querySelectorAll({slide})).map((el) => {{
        const entry = {{
            swiper_index: el.getAttribute({index}),
            has_image: false,
            current_src: null,
            src: null,
            caption: null,
            image_error: null,
            caption_error: null
        }};
        try {{
            const img = el.querySelector('img');
            if (img) {{
                entry.has_image = true;
                entry.current_src = img.currentSrc || null;
                entry.src = img.getAttribute('src');
            }}
        }} catch (e) {{
            entry.image_error = String(e);
        }}
        try {{
            const titles = el.querySelector({caption});
            if (titles) {{
                entry.caption = titles.innerText;
            }}
        }} catch (e) {{
            entry.caption_error = String(e);
        }}
        return entry;
    }});
    return JSON.stringify({{ structure_found: true, slides }});
}})()
"#,
        banner = js_str(BANNER_CONTAINER_SELECTOR),
        wrapper = js_str(SLIDE_WRAPPER_SELECTOR),
        slide = js_str(SLIDE_SELECTOR),
        index = js_str(SLIDE_INDEX_ATTRIBUTE),
        caption = js_str(CAPTION_SELECTOR),
    )
}

// * One headless browser for a whole batch.
// * Call shutdown() when done; Drop only stops the event pump.
pub struct CarouselBrowser {
    browser: Option<Browser>,
    handler: Option<tokio::task::JoinHandle<()>>,
    config: AuditConfig,
}

impl CarouselBrowser {
    // * Launches the browser with a window matching the audited viewport
    pub async fn launch(config: AuditConfig, identity: &IdentityProfile) -> Result<Self, PageError> {
        let browser_config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(config.viewport_width, config.viewport_height)
            .viewport(None)
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg(identity.browser_arg())
            .build()
            .map_err(PageError::BrowserLaunch)?;

        let (browser, handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| PageError::BrowserLaunch(e.to_string()))?;

        let handle = tokio::spawn(pump_events(handler));

        info!(
            width = config.viewport_width,
            height = config.viewport_height,
            "Carousel browser launched"
        );

        Ok(Self {
            browser: Some(browser),
            handler: Some(handle),
            config,
        })
    }

    async fn snapshot(&self, page: &Page, url: &Url) -> Result<Vec<SlideDescriptor>, PageError> {
        let page_timeout_ms = self.config.page_timeout.as_millis() as u64;
        match tokio::time::timeout(self.config.page_timeout, page.goto(url.as_str())).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(PageError::Navigation(e.to_string())),
            Err(_) => return Err(PageError::NavigationTimeout(page_timeout_ms)),
        }

        self.wait_for_slides(page).await?;
        debug!(page_url = %url, "Carousel slides attached, letting the slider settle");
        tokio::time::sleep(self.config.carousel_settle).await;

        classify_snapshot(self.read_snapshot(page).await?)
    }

    async fn read_snapshot(&self, page: &Page) -> Result<CarouselSnapshot, PageError> {
        let raw = page
            .evaluate(extraction_script().as_str())
            .await
            .map_err(|e| PageError::Script(e.to_string()))?
            .into_value::<String>()
            .map_err(|e| PageError::Script(e.to_string()))?;

        serde_json::from_str(&raw).map_err(|e| PageError::Script(e.to_string()))
    }

    // * Polls until a slide shows up or the wait budget is spent
    async fn wait_for_slides(&self, page: &Page) -> Result<(), PageError> {
        let script = presence_script();
        let started = Instant::now();
        let poll = Duration::from_millis(CAROUSEL_POLL_INTERVAL_MS);

        loop {
            match page.evaluate(script.as_str()).await {
                Ok(value) => {
                    if value.into_value::<bool>().unwrap_or(false) {
                        return Ok(());
                    }
                }
                // * The document may still be swapping; keep polling
                Err(e) => debug!(error = %e, "Carousel presence check failed"),
            }

            if started.elapsed() >= self.config.carousel_wait {
                let snapshot = match self.read_snapshot(page).await {
                    Ok(snapshot) => Some(snapshot),
                    Err(e) => {
                        debug!(error = %e, "Final carousel snapshot failed");
                        None
                    }
                };
                return Err(wait_expired_error(
                    snapshot,
                    self.config.carousel_wait.as_millis() as u64,
                ));
            }
            tokio::time::sleep(poll).await;
        }
    }

    // * Closes the browser gracefully
    pub async fn shutdown(&mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!(error = %e, "Browser close failed");
            }
            let _ = browser.wait().await;
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        info!("Carousel browser closed");
    }
}

impl SlideSource for CarouselBrowser {
    async fn discover(&mut self, page_url: &Url) -> Result<Vec<SlideDescriptor>, PageError> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| PageError::BrowserLaunch("browser already shut down".to_string()))?;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| PageError::Navigation(e.to_string()))?;

        let result = self.snapshot(&page, page_url).await;

        // * The page is closed on every path, success or not
        if let Err(e) = page.close().await {
            debug!(error = %e, "Page close failed");
        }

        result
    }
}

impl Drop for CarouselBrowser {
    fn drop(&mut self) {
        // * Best effort cleanup - can't await in drop. Browser's own Drop kills the child.
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}

async fn pump_events(mut handler: Handler) {
    while let Some(event) = handler.next().await {
        if let Err(e) = event {
            debug!(error = %e, "Browser handler event error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_script_targets_non_duplicate_slides() {
        let script = presence_script();
        assert!(script.contains(".cont-banner .swiper-wrapper > div.swiper-slide:not(.swiper-slide-duplicate)"));
        assert!(script.starts_with("document.querySelector("));
    }

    #[test]
    fn test_extraction_script_reads_required_fields() {
        let script = extraction_script();
        assert!(script.contains("currentSrc"));
        assert!(script.contains("innerText"));
        assert!(script.contains("\"data-swiper-slide-index\""));
        assert!(script.contains("\".cont-titles\""));
        assert!(script.contains("structure_found: false"));
    }

    fn snapshot(structure_found: bool, slides: usize) -> CarouselSnapshot {
        CarouselSnapshot {
            structure_found,
            slides: vec![SlideDescriptor::default(); slides],
        }
    }

    #[test]
    fn test_classify_snapshot_outcomes() {
        assert!(matches!(
            classify_snapshot(snapshot(false, 0)),
            Err(PageError::StructureNotFound)
        ));
        assert!(matches!(
            classify_snapshot(snapshot(true, 0)),
            Err(PageError::NoSlidesFound)
        ));
        assert_eq!(classify_snapshot(snapshot(true, 2)).unwrap().len(), 2);
    }

    #[test]
    fn test_expired_wait_without_banner_is_structure_not_found() {
        assert!(matches!(
            wait_expired_error(Some(snapshot(false, 0)), 30_000),
            PageError::StructureNotFound
        ));
    }

    #[test]
    fn test_expired_wait_with_empty_wrapper_is_no_slides() {
        assert!(matches!(
            wait_expired_error(Some(snapshot(true, 0)), 30_000),
            PageError::NoSlidesFound
        ));
    }

    #[test]
    fn test_expired_wait_otherwise_is_timeout() {
        assert!(matches!(
            wait_expired_error(Some(snapshot(true, 1)), 30_000),
            PageError::CarouselTimeout(30_000)
        ));
        assert!(matches!(
            wait_expired_error(None, 30_000),
            PageError::CarouselTimeout(30_000)
        ));
    }

    #[test]
    fn test_snapshot_deserializes_partial_slides() {
        let raw = r#"{"structure_found":true,"slides":[{"swiper_index":"0","has_image":true,"current_src":"a.png","src":null,"caption":null,"image_error":null,"caption_error":null},{"has_image":false}]}"#;
        let snapshot: CarouselSnapshot = serde_json::from_str(raw).unwrap();
        assert!(snapshot.structure_found);
        assert_eq!(snapshot.slides.len(), 2);
        assert_eq!(snapshot.slides[0].current_src.as_deref(), Some("a.png"));
        assert!(!snapshot.slides[1].has_image);
    }
}
