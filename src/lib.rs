pub mod article;
pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod session;

// Re-export commonly used types for convenience
pub use article::{ArticleRequest, Extraction, ParsedArticle};
pub use config::{BrowserConfig, ReadabilityOptions, ScraperConfig};
pub use error::{Result, ScrapeError};

use browser::{Launcher, Page, WebDriverLauncher};
use extract::{Extractor, ReadabilityExtractor};
use session::Session;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use url::Url;

/// Renders article URLs in a browser and extracts their readable content.
///
/// Holds configuration only; every call to [`Scraper::scrape`] launches and
/// releases its own browser.
pub struct Scraper<L = WebDriverLauncher, E = ReadabilityExtractor> {
    launcher: L,
    extractor: E,
    operation_timeout: Duration,
    release_timeout: Duration,
}

impl Scraper {
    /// Create a scraper driving Chromium over WebDriver
    pub fn new(config: ScraperConfig) -> Self {
        let operation_timeout = config.browser.operation_timeout();
        let release_timeout = config.browser.release_timeout();
        Self {
            launcher: WebDriverLauncher::new(config.browser),
            extractor: ReadabilityExtractor::new(config.readability),
            operation_timeout,
            release_timeout,
        }
    }
}

impl<L: Launcher, E: Extractor> Scraper<L, E> {
    /// Create a scraper from custom browser and extraction backends
    pub fn with_parts(launcher: L, extractor: E) -> Self {
        let defaults = BrowserConfig::default();
        Self {
            launcher,
            extractor,
            operation_timeout: defaults.operation_timeout(),
            release_timeout: defaults.release_timeout(),
        }
    }

    /// Set the budget for navigating to and reading a page
    pub fn with_operation_timeout(mut self, operation_timeout: Duration) -> Self {
        self.operation_timeout = operation_timeout;
        self
    }

    /// Set the budget for closing the page and browser
    pub fn with_release_timeout(mut self, release_timeout: Duration) -> Self {
        self.release_timeout = release_timeout;
        self
    }

    /// Render `url` and extract its article.
    ///
    /// The browser and page are closed before this returns, whether or not
    /// rendering succeeded.
    pub async fn scrape(&self, url: &str) -> Result<Extraction> {
        let url = parse_article_url(url)?;
        ::log::info!("Processing url: {}", url);
        let started = Instant::now();

        let mut session = Session::open(&self.launcher).await?;

        let rendered = match timeout(self.operation_timeout, render(session.page_mut(), &url)).await
        {
            Ok(result) => result,
            Err(_) => {
                ::log::error!("Timeout scraping: {}", url);
                Err(ScrapeError::Timeout {
                    url: url.to_string(),
                    timeout: self.operation_timeout,
                })
            }
        };

        match timeout(self.release_timeout, session.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                ::log::warn!("Browser session for {} was not released cleanly: {}", url, e);
            }
            Err(_) => {
                ::log::warn!(
                    "Gave up releasing the browser session for {} after {:?}",
                    url,
                    self.release_timeout
                );
            }
        }

        let (html, final_url) = rendered?;
        let extraction = self.extractor.extract(&html, &final_url)?;

        ::log::info!(
            "Scraped {} in {:.2} seconds (article found: {})",
            url,
            started.elapsed().as_secs_f64(),
            extraction.is_article()
        );
        Ok(extraction)
    }
}

/// Navigates and captures the rendered HTML along with the final URL
async fn render<P: Page>(page: &mut P, url: &Url) -> Result<(String, String)> {
    page.goto(url.as_str()).await?;
    ::log::debug!("Navigated to {}", url);

    let html = page.content().await?;
    ::log::info!("Got page content: {} bytes", html.len());

    // Redirects change the base for relative links; keep the request URL
    // if the browser reports something unusable
    let final_url = match page.url().await {
        Ok(current) if parse_article_url(&current).is_ok() => current,
        Ok(current) => {
            ::log::debug!("Ignoring non-http page URL {}", current);
            url.to_string()
        }
        Err(e) => {
            ::log::warn!("Could not read final URL for {}: {}", url, e);
            url.to_string()
        }
    };

    Ok((html, final_url))
}

/// Parse and check an article URL: it must be absolute http(s) with a host
pub fn parse_article_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ScrapeError::invalid_url(input, "URL is empty"));
    }

    let url = Url::parse(trimmed).map_err(|e| ScrapeError::invalid_url(input, e))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ScrapeError::invalid_url(
                input,
                format!("unsupported scheme '{}'", scheme),
            ));
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ScrapeError::invalid_url(input, "URL has no host"));
    }

    Ok(url)
}
