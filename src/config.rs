use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Environment variable naming a JSON config file
pub const ENV_CONFIG_PATH: &str = "SCRAPER_CONFIG";
/// Environment variable overriding the WebDriver endpoint
pub const ENV_WEBDRIVER_URL: &str = "WEBDRIVER_URL";
/// Environment variable overriding the Chromium binary
pub const ENV_CHROMIUM_PATH: &str = "CHROMIUM_PATH";
/// Environment variable toggling headless mode
pub const ENV_HEADLESS: &str = "SCRAPER_HEADLESS";

/// Configuration for the browser session used to render an article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// URL of the WebDriver server that launches the browser
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Endpoints tried when the primary WebDriver refuses the session
    #[serde(default = "default_fallback_webdriver_urls")]
    pub fallback_webdriver_urls: Vec<String>,

    /// Chromium binary to launch (the driver's default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable_path: Option<String>,

    /// Whether to run without a display
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Command-line switches passed to Chromium
    #[serde(default = "default_launch_args")]
    pub args: Vec<String>,

    /// Viewport width in pixels
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Viewport height in pixels
    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Load pages with invalid or self-signed certificates
    #[serde(default = "default_accept_insecure_certs")]
    pub accept_insecure_certs: bool,

    /// Page load timeout handed to the driver
    #[serde(default = "default_page_load_timeout_secs")]
    pub page_load_timeout_secs: u64,

    /// Upper bound for navigating to a page and reading it back
    #[serde(default = "default_operation_timeout_secs")]
    pub operation_timeout_secs: u64,

    /// Extra wait after the document reports complete, for late scripts
    #[serde(default)]
    pub settle_delay_ms: u64,

    /// Upper bound for closing the page and browser
    #[serde(default = "default_release_timeout_secs")]
    pub release_timeout_secs: u64,
}

/// Tuning for readability extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadabilityOptions {
    /// Abort extraction on documents with more elements than this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_elements_to_parse: Option<usize>,

    /// Minimum characters an article must have to be accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_threshold: Option<usize>,

    /// Keep class attributes in the extracted HTML
    #[serde(default)]
    pub keep_classes: bool,

    /// Skip extraction for pages that do not look like articles
    #[serde(default = "default_require_readerable")]
    pub require_readerable: bool,

    /// Shortest paragraph counted by the readerable check
    #[serde(default = "default_min_content_length")]
    pub min_content_length: usize,

    /// Score a page must reach to count as readerable
    #[serde(default = "default_min_score")]
    pub min_score: f32,
}

/// Complete scraper configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScraperConfig {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub readability: ReadabilityOptions,
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default fallback endpoints: chromedriver's own port, then the IP form of the default
fn default_fallback_webdriver_urls() -> Vec<String> {
    vec![
        "http://localhost:9515".to_string(),
        "http://127.0.0.1:4444".to_string(),
    ]
}

fn default_headless() -> bool {
    true
}

/// Switches for running Chromium inside a serverless sandbox
/// (no GPU, tiny /dev/shm, single process, no zygote)
pub fn default_launch_args() -> Vec<String> {
    [
        "--allow-pre-commit-input",
        "--disable-background-networking",
        "--disable-background-timer-throttling",
        "--disable-backgrounding-occluded-windows",
        "--disable-breakpad",
        "--disable-client-side-phishing-detection",
        "--disable-component-update",
        "--disable-default-apps",
        "--disable-dev-shm-usage",
        "--disable-extensions",
        "--disable-gpu",
        "--disable-hang-monitor",
        "--disable-ipc-flooding-protection",
        "--disable-popup-blocking",
        "--disable-prompt-on-repost",
        "--disable-renderer-backgrounding",
        "--disable-sync",
        "--hide-scrollbars",
        "--ignore-gpu-blocklist",
        "--metrics-recording-only",
        "--mute-audio",
        "--no-default-browser-check",
        "--no-first-run",
        "--no-pings",
        "--no-sandbox",
        "--no-zygote",
        "--password-store=basic",
        "--single-process",
        "--use-mock-keychain",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_accept_insecure_certs() -> bool {
    true
}

fn default_page_load_timeout_secs() -> u64 {
    30
}

fn default_operation_timeout_secs() -> u64 {
    45
}

fn default_release_timeout_secs() -> u64 {
    10
}

fn default_require_readerable() -> bool {
    true
}

fn default_min_content_length() -> usize {
    140
}

fn default_min_score() -> f32 {
    20.0
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            fallback_webdriver_urls: default_fallback_webdriver_urls(),
            executable_path: None,
            headless: default_headless(),
            args: default_launch_args(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            accept_insecure_certs: default_accept_insecure_certs(),
            page_load_timeout_secs: default_page_load_timeout_secs(),
            operation_timeout_secs: default_operation_timeout_secs(),
            settle_delay_ms: 0,
            release_timeout_secs: default_release_timeout_secs(),
        }
    }
}

impl BrowserConfig {
    /// Arguments actually passed to Chromium, including the headless switch
    pub fn launch_args(&self) -> Vec<String> {
        let mut args: Vec<String> = self
            .args
            .iter()
            .filter(|a| !a.starts_with("--headless"))
            .cloned()
            .collect();
        if self.headless {
            args.push("--headless=new".to_string());
        }
        args.push(format!(
            "--window-size={},{}",
            self.window_width, self.window_height
        ));
        args
    }

    /// Every endpoint to try, primary first, without duplicates
    pub fn endpoints(&self) -> Vec<&str> {
        let mut endpoints = vec![self.webdriver_url.as_str()];
        for url in &self.fallback_webdriver_urls {
            if !endpoints.contains(&url.as_str()) {
                endpoints.push(url.as_str());
            }
        }
        endpoints
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn release_timeout(&self) -> Duration {
        Duration::from_secs(self.release_timeout_secs)
    }
}

impl Default for ReadabilityOptions {
    fn default() -> Self {
        Self {
            max_elements_to_parse: None,
            char_threshold: None,
            keep_classes: false,
            require_readerable: default_require_readerable(),
            min_content_length: default_min_content_length(),
            min_score: default_min_score(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Build the configuration for a function invocation: the file named by
    /// `SCRAPER_CONFIG` if set, then environment overrides
    pub fn from_env() -> Result<Self> {
        let config = match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) if !path.is_empty() => {
                ::log::info!("Loading scraper config from {}", path);
                Self::from_file(path)?
            }
            _ => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_WEBDRIVER_URL).filter(|v| !v.is_empty()) {
            self.browser.webdriver_url = url;
        }

        if let Some(path) = lookup(ENV_CHROMIUM_PATH).filter(|v| !v.is_empty()) {
            self.browser.executable_path = Some(path);
        }

        if let Some(value) = lookup(ENV_HEADLESS).filter(|v| !v.is_empty()) {
            self.browser.headless = parse_flag(&value).ok_or_else(|| {
                ScrapeError::Config(format!("{} must be true or false, got '{}'", ENV_HEADLESS, value))
            })?;
        }

        Ok(self)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_from_empty_json() {
        let config = ScraperConfig::from_json("{}").unwrap();
        assert_eq!(config.browser.webdriver_url, "http://localhost:4444");
        assert!(config.browser.headless);
        assert!(config.browser.accept_insecure_certs);
        assert_eq!(config.browser.page_load_timeout_secs, 30);
        assert_eq!(config.browser.operation_timeout_secs, 45);
        assert_eq!(config.browser.release_timeout(), Duration::from_secs(10));
        assert!(config.browser.args.contains(&"--no-sandbox".to_string()));
        assert!(config.readability.require_readerable);
        assert_eq!(config.readability.min_content_length, 140);
        assert_eq!(config.readability.min_score, 20.0);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let json = r#"{
            "browser": { "webdriver_url": "http://chromedriver:9515", "headless": false },
            "readability": { "char_threshold": 250 }
        }"#;
        let config = ScraperConfig::from_json(json).unwrap();
        assert_eq!(config.browser.webdriver_url, "http://chromedriver:9515");
        assert!(!config.browser.headless);
        assert_eq!(config.browser.window_width, 1920);
        assert_eq!(config.readability.char_threshold, Some(250));
        assert_eq!(config.readability.max_elements_to_parse, None);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "browser": {{ "settle_delay_ms": 500 }} }}"#).unwrap();

        let config = ScraperConfig::from_file(file.path()).unwrap();
        assert_eq!(config.browser.settle_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = ScraperConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn test_launch_args_headless_switch() {
        let mut browser = BrowserConfig {
            args: vec!["--no-sandbox".to_string(), "--headless=old".to_string()],
            ..BrowserConfig::default()
        };
        let args = browser.launch_args();
        assert_eq!(
            args,
            vec!["--no-sandbox", "--headless=new", "--window-size=1920,1080"]
        );

        browser.headless = false;
        assert!(!browser.launch_args().iter().any(|a| a.starts_with("--headless")));
    }

    #[test]
    fn test_endpoints_skip_duplicates() {
        let browser = BrowserConfig {
            webdriver_url: "http://localhost:9515".to_string(),
            ..BrowserConfig::default()
        };
        assert_eq!(
            browser.endpoints(),
            vec!["http://localhost:9515", "http://127.0.0.1:4444"]
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = ScraperConfig::default()
            .apply_env_with(lookup(&[
                (ENV_WEBDRIVER_URL, "http://driver:4444"),
                (ENV_CHROMIUM_PATH, "/opt/chromium/chrome"),
                (ENV_HEADLESS, "false"),
            ]))
            .unwrap();
        assert_eq!(config.browser.webdriver_url, "http://driver:4444");
        assert_eq!(
            config.browser.executable_path.as_deref(),
            Some("/opt/chromium/chrome")
        );
        assert!(!config.browser.headless);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = ScraperConfig::default()
            .apply_env_with(lookup(&[(ENV_WEBDRIVER_URL, ""), (ENV_HEADLESS, "")]))
            .unwrap();
        assert_eq!(config.browser.webdriver_url, "http://localhost:4444");
        assert!(config.browser.headless);
    }

    #[test]
    fn test_bad_headless_flag() {
        let err = ScraperConfig::default()
            .apply_env_with(lookup(&[(ENV_HEADLESS, "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("SCRAPER_HEADLESS"));
    }
}
