use article_scraper::ScraperConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scrape")]
#[command(about = "Render an article in headless Chromium and print its readable content as JSON")]
#[command(version)]
pub struct Args {
    /// Article URL to scrape
    pub url: String,

    /// JSON configuration file (defaults to $SCRAPER_CONFIG, then built-in defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// WebDriver server that launches the browser
    #[arg(short, long)]
    pub webdriver_url: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub no_headless: bool,

    /// Operation timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply(&self, mut config: ScraperConfig) -> ScraperConfig {
        if let Some(url) = &self.webdriver_url {
            config.browser.webdriver_url = url.clone();
        }
        if self.no_headless {
            config.browser.headless = false;
        }
        if let Some(secs) = self.timeout {
            config.browser.operation_timeout_secs = secs;
        }
        config
    }
}
