use crate::Scraper;
use crate::article::{ArticleRequest, ParsedArticle};
use crate::browser::Launcher;
use crate::extract::Extractor;
use lambda_runtime::{Error, LambdaEvent};

/// Lambda entry point: scrape `articleUrl` and return the parsed article.
///
/// A page without an article still succeeds, with null content fields.
pub async fn handle<L, E>(
    scraper: &Scraper<L, E>,
    event: LambdaEvent<ArticleRequest>,
) -> Result<ParsedArticle, Error>
where
    L: Launcher,
    E: Extractor,
{
    let LambdaEvent { payload, context } = event;
    ::log::info!("In handler - request {}: {:?}", context.request_id, payload);

    let extraction = match scraper.scrape(&payload.article_url).await {
        Ok(extraction) => extraction,
        Err(e) => {
            if e.is_target_failure() {
                ::log::warn!(
                    "Request {} could not load {}: {}",
                    context.request_id,
                    payload.article_url,
                    e
                );
            } else {
                ::log::error!(
                    "Request {} failed for {}: {}",
                    context.request_id,
                    payload.article_url,
                    e
                );
            }
            return Err(e.into());
        }
    };

    if !extraction.is_article() {
        ::log::info!(
            "No article found at {} (page title: {:?})",
            payload.article_url,
            extraction.title()
        );
    }
    Ok(extraction.into_article())
}
