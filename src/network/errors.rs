use thiserror::Error;

// * Errors raised while building the HTTP layer itself.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP client construction failed: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

// * Typed outcome of a failed image inspection.
// * Every variant is recovered by the slide processor and turned into a note.
#[derive(Error, Debug)]
pub enum InspectionError {
    #[error("Timed out fetching image")]
    Timeout,

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Response is not a recognizable image: {0}")]
    UnrecognizedFormat(String),

    #[error("Unexpected inspection failure: {0}")]
    Unexpected(String),
}

impl InspectionError {
    // * Stable label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            InspectionError::Timeout => "timeout",
            InspectionError::FetchFailed(_) => "fetch_failed",
            InspectionError::UnrecognizedFormat(_) => "unrecognized_format",
            InspectionError::Unexpected(_) => "unexpected",
        }
    }

    // * Classifies a transport error. Timeouts win over everything else.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            InspectionError::Timeout
        } else if err.is_connect() || err.is_request() || err.is_status() || err.is_body() || err.is_redirect() {
            InspectionError::FetchFailed(err.to_string())
        } else {
            InspectionError::Unexpected(err.to_string())
        }
    }
}

impl From<image::ImageError> for InspectionError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => InspectionError::Unexpected(io.to_string()),
            other => InspectionError::UnrecognizedFormat(other.to_string()),
        }
    }
}
