use article_scraper::handler::handle;
use article_scraper::{Scraper, ScraperConfig};
use env_logger::Env;
use lambda_runtime::{Error, service_fn};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // CloudWatch adds the ingestion time, and module paths are noise there
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let config = ScraperConfig::from_env()?;
    ::log::info!(
        "Using WebDriver at {} (headless: {})",
        config.browser.webdriver_url,
        config.browser.headless
    );

    let scraper = Arc::new(Scraper::new(config));
    lambda_runtime::run(service_fn(move |event| {
        let scraper = Arc::clone(&scraper);
        async move { handle(scraper.as_ref(), event).await }
    }))
    .await
}
