use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

const DESKTOP_CHROME_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.109 Safari/537.36";

// * IdentityProfile is the client identity presented to audited sites.
// * The browser and the image fetcher share it so CDNs serve both the same variants.
#[derive(Debug, Clone)]
pub struct IdentityProfile {
    pub user_agent: &'static str,
    pub accept_language: &'static str,
}

impl IdentityProfile {
    pub fn desktop_chrome() -> Self {
        Self {
            user_agent: DESKTOP_CHROME_UA,
            accept_language: "en-US,en;q=0.9",
        }
    }

    // * Chromium launch flag carrying the same user agent
    pub fn browser_arg(&self) -> String {
        format!("--user-agent={}", self.user_agent)
    }

    // * Applies the profile to a mutable HeaderMap.
    pub fn apply_to_headers(&self, headers: &mut HeaderMap) {
        headers.insert(USER_AGENT, HeaderValue::from_static(self.user_agent));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(self.accept_language));
        // * No format preference: CDNs must serve the asset behind the URL, not a negotiated variant
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    }
}

impl Default for IdentityProfile {
    fn default() -> Self {
        Self::desktop_chrome()
    }
}
