use super::{Browser, Launcher, Page};
use crate::config::BrowserConfig;
use crate::error::{Result, ScrapeError};
use fantoccini::wd::WindowHandle;
use fantoccini::{Client, ClientBuilder};
use serde_json::{Map, Value, json};
use std::time::{Duration, Instant};

/// How often `document.readyState` is polled after navigation
const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Launches Chromium through a WebDriver server (e.g. chromedriver)
#[derive(Debug, Clone)]
pub struct WebDriverLauncher {
    config: BrowserConfig,
}

/// A WebDriver session; closing it ends the browser process
pub struct WebDriverBrowser {
    client: Client,
    endpoint: String,
    page_load_timeout: Duration,
    settle_delay: Duration,
}

/// A tab inside a WebDriver session
pub struct WebDriverPage {
    client: Client,
    handle: WindowHandle,
    page_load_timeout: Duration,
    settle_delay: Duration,
}

impl WebDriverLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// W3C capabilities for a new Chromium session
    pub fn capabilities(&self) -> Map<String, Value> {
        let mut chrome_options = Map::new();
        chrome_options.insert("args".to_string(), json!(self.config.launch_args()));
        if let Some(binary) = &self.config.executable_path {
            chrome_options.insert("binary".to_string(), json!(binary));
        }

        let mut caps = Map::new();
        caps.insert("browserName".to_string(), json!("chrome"));
        caps.insert("goog:chromeOptions".to_string(), Value::Object(chrome_options));
        caps.insert(
            "acceptInsecureCerts".to_string(),
            json!(self.config.accept_insecure_certs),
        );
        caps.insert("pageLoadStrategy".to_string(), json!("normal"));
        caps.insert(
            "timeouts".to_string(),
            json!({ "pageLoad": self.config.page_load_timeout().as_millis() as u64 }),
        );
        caps
    }
}

impl Launcher for WebDriverLauncher {
    type Browser = WebDriverBrowser;

    async fn launch(&self) -> Result<WebDriverBrowser> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(self.capabilities());

        let mut last_error = None;
        for (attempt, endpoint) in self.config.endpoints().into_iter().enumerate() {
            if attempt > 0 {
                ::log::info!("Trying fallback WebDriver URL: {}", endpoint);
            }

            match builder.connect(endpoint).await {
                Ok(client) => {
                    ::log::debug!("Connected to WebDriver at {}", endpoint);
                    return Ok(WebDriverBrowser {
                        client,
                        endpoint: endpoint.to_string(),
                        page_load_timeout: self.config.page_load_timeout(),
                        settle_delay: self.config.settle_delay(),
                    });
                }
                Err(e) => {
                    ::log::warn!("Failed to start a browser session at {}: {}", endpoint, e);
                    last_error = Some(ScrapeError::launch(endpoint, e));
                }
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(last_error
            .unwrap_or_else(|| ScrapeError::launch("<none>", "no WebDriver endpoints configured")))
    }
}

impl Browser for WebDriverBrowser {
    type Page = WebDriverPage;

    async fn new_page(&mut self) -> Result<WebDriverPage> {
        let window = self
            .client
            .new_window(true)
            .await
            .map_err(|e| ScrapeError::Page(e.to_string()))?;
        self.client
            .switch_to_window(window.handle.clone())
            .await
            .map_err(|e| ScrapeError::Page(e.to_string()))?;

        Ok(WebDriverPage {
            client: self.client.clone(),
            handle: window.handle,
            page_load_timeout: self.page_load_timeout,
            settle_delay: self.settle_delay,
        })
    }

    async fn close(self) -> Result<()> {
        self.client.close().await.map_err(|e| {
            ScrapeError::Release(format!("session at {}: {}", self.endpoint, e))
        })
    }
}

impl WebDriverPage {
    /// Polls until the document reports `complete` or the page load budget runs out
    async fn wait_for_load(&self, url: &str) -> Result<()> {
        let deadline = Instant::now() + self.page_load_timeout;
        loop {
            let state = self
                .client
                .execute("return document.readyState", vec![])
                .await
                .map_err(|e| ScrapeError::navigation(url, e))?;

            if state.as_str() == Some("complete") {
                break;
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::navigation(
                    url,
                    format!("document still '{}' after page load timeout", state),
                ));
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }

        if !self.settle_delay.is_zero() {
            ::log::debug!("Waiting {:?} for {} to settle", self.settle_delay, url);
            tokio::time::sleep(self.settle_delay).await;
        }
        Ok(())
    }
}

impl Page for WebDriverPage {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .map_err(|e| ScrapeError::navigation(url, e))?;
        self.wait_for_load(url).await
    }

    async fn content(&mut self) -> Result<String> {
        self.client
            .source()
            .await
            .map_err(|e| ScrapeError::Content(e.to_string()))
    }

    async fn url(&mut self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|u| u.to_string())
            .map_err(|e| ScrapeError::Content(e.to_string()))
    }

    async fn close(self) -> Result<()> {
        let closed = match self.client.switch_to_window(self.handle).await {
            Ok(()) => self.client.close_window().await,
            Err(e) => Err(e),
        };
        closed.map_err(|e| ScrapeError::Release(format!("page: {}", e)))
    }
}
