use std::time::Duration;
use thiserror::Error;

/// Failures that abort a scrape.
///
/// A page without extractable content is not an error; see
/// [`Extraction::NoArticle`](crate::article::Extraction::NoArticle).
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid article URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to launch browser via {endpoint}: {message}")]
    Launch { endpoint: String, message: String },

    #[error("Failed to open a new page: {0}")]
    Page(String),

    #[error("Failed to navigate to {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("Timed out after {timeout:?} while scraping {url}")]
    Timeout { url: String, timeout: Duration },

    #[error("Failed to read page content: {0}")]
    Content(String),

    #[error("Readability extraction failed: {0}")]
    Extraction(String),

    #[error("Failed to release browser resources: {0}")]
    Release(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScrapeError {
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        ScrapeError::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn launch(endpoint: impl Into<String>, message: impl ToString) -> Self {
        ScrapeError::Launch {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }

    pub fn navigation(url: impl Into<String>, message: impl ToString) -> Self {
        ScrapeError::Navigation {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// True for failures caused by the target page rather than the browser.
    pub fn is_target_failure(&self) -> bool {
        matches!(
            self,
            ScrapeError::InvalidUrl { .. }
                | ScrapeError::Navigation { .. }
                | ScrapeError::Timeout { .. }
        )
    }
}

impl From<serde_json::Error> for ScrapeError {
    fn from(e: serde_json::Error) -> Self {
        ScrapeError::Config(e.to_string())
    }
}

impl From<std::io::Error> for ScrapeError {
    fn from(e: std::io::Error) -> Self {
        ScrapeError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
