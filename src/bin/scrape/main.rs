use article_scraper::{Scraper, ScraperConfig};
use clap::Parser;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ScraperConfig::from_file(path)
            .and_then(|config| config.apply_env_with(|key| std::env::var(key).ok())),
        None => ScraperConfig::from_env(),
    };
    let config = match config {
        Ok(config) => args.apply(config),
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };

    let scraper = Scraper::new(config);
    let extraction = match scraper.scrape(&args.url).await {
        Ok(extraction) => extraction,
        Err(e) => {
            ::log::error!("Failed to scrape {}: {}", args.url, e);
            std::process::exit(1);
        }
    };

    if !extraction.is_article() {
        ::log::warn!("No article content found at {}", args.url);
    }

    let article = extraction.into_article();
    let json = if args.compact {
        serde_json::to_string(&article)
    } else {
        serde_json::to_string_pretty(&article)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            ::log::error!("Failed to serialize article: {}", e);
            std::process::exit(1);
        }
    }
}
