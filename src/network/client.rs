use crate::network::errors::{InspectionError, NetworkError};
use crate::network::identity::IdentityProfile;
use crate::ops::telemetry::{record_image_fetch_duration, record_inspection};
use reqwest::header::{HeaderMap, CONTENT_LENGTH};
use reqwest::Client;
use std::io::Cursor;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::constants::IMAGE_FETCH_TIMEOUT_SECS;

/// Decoded facts about a fetched image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDetails {
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

impl ImageDetails {
    // * Size in KB rounded to two decimals, the unit used by reports and notes
    pub fn size_kb(&self) -> f64 {
        (self.size_bytes as f64 / 1024.0 * 100.0).round() / 100.0
    }
}

/// Anything able to turn an image URL into [`ImageDetails`].
///
/// Implementations perform exactly one fetch per call and keep no cache;
/// deduplication belongs to the caller.
#[allow(async_fn_in_trait)]
pub trait ImageInspector {
    async fn inspect(&self, url: &str) -> Result<ImageDetails, InspectionError>;
}

// * HTTP image inspector used for live audits.
pub struct ImageClient {
    inner: Client,
}

impl ImageClient {
    // * Initializes the client with the shared identity and the default 30s timeout.
    pub fn new(identity: &IdentityProfile) -> Result<Self, NetworkError> {
        Self::with_timeout(identity, Duration::from_secs(IMAGE_FETCH_TIMEOUT_SECS))
    }

    pub fn with_timeout(identity: &IdentityProfile, timeout: Duration) -> Result<Self, NetworkError> {
        let mut headers = HeaderMap::new();
        identity.apply_to_headers(&mut headers);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { inner: client })
    }

    async fn fetch_and_measure(&self, url: &str) -> Result<ImageDetails, InspectionError> {
        let resp = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(InspectionError::from_transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(InspectionError::FetchFailed(format!("HTTP {}", status.as_u16())));
        }

        // * Read the header before the body consumes the response
        let declared_len = declared_content_length(resp.headers());

        let body = resp.bytes().await.map_err(InspectionError::from_transport)?;

        measure_image(&body, declared_len)
    }
}

impl ImageInspector for ImageClient {
    async fn inspect(&self, url: &str) -> Result<ImageDetails, InspectionError> {
        let started = Instant::now();
        let result = self.fetch_and_measure(url).await;
        record_image_fetch_duration(started.elapsed().as_secs_f64());

        match &result {
            Ok(details) => {
                record_inspection("ok");
                debug!(
                    image_url = url,
                    width = details.width,
                    height = details.height,
                    size_bytes = details.size_bytes,
                    "Image inspected"
                );
            }
            Err(e) => {
                record_inspection(e.kind());
                warn!(image_url = url, kind = e.kind(), error = %e, "Image inspection failed");
            }
        }

        result
    }
}

// * Content-Length when present and non-zero. Zero or garbage counts as absent.
fn declared_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|len| *len > 0)
}

/// Decodes the image header from `bytes` and reports its dimensions.
///
/// The reported size prefers `declared_len` (the transport's length header)
/// and falls back to the body length when the header is absent or zero.
pub fn measure_image(bytes: &[u8], declared_len: Option<u64>) -> Result<ImageDetails, InspectionError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| InspectionError::Unexpected(e.to_string()))?;

    if reader.format().is_none() {
        return Err(InspectionError::UnrecognizedFormat(
            "unknown image signature".to_string(),
        ));
    }

    let (width, height) = reader.into_dimensions()?;
    if width == 0 || height == 0 {
        return Err(InspectionError::UnrecognizedFormat(format!(
            "degenerate dimensions {}x{}",
            width, height
        )));
    }

    let size_bytes = match declared_len {
        Some(len) if len > 0 => len,
        _ => bytes.len() as u64,
    };

    Ok(ImageDetails {
        width,
        height,
        size_bytes,
    })
}
