use crate::article::{Extraction, ParsedArticle};
use crate::config::ReadabilityOptions;
use crate::error::{Result, ScrapeError};
use dom_smoothie::{Config, Readability, ReadabilityError};

/// Turns rendered HTML into article fields
pub trait Extractor: Send + Sync {
    /// `url` is the page's final URL, used to resolve relative links
    fn extract(&self, html: &str, url: &str) -> Result<Extraction>;
}

/// Mozilla Readability, via `dom_smoothie`
#[derive(Debug, Clone, Default)]
pub struct ReadabilityExtractor {
    options: ReadabilityOptions,
}

impl ReadabilityExtractor {
    pub fn new(options: ReadabilityOptions) -> Self {
        Self { options }
    }

    fn readability_config(&self) -> Config {
        let defaults = Config::default();
        Config {
            max_elements_to_parse: self
                .options
                .max_elements_to_parse
                .unwrap_or(defaults.max_elements_to_parse),
            char_threshold: self
                .options
                .char_threshold
                .unwrap_or(defaults.char_threshold),
            keep_classes: self.options.keep_classes,
            readable_min_score: self.options.min_score,
            readable_min_content_length: self.options.min_content_length,
            ..defaults
        }
    }
}

impl Extractor for ReadabilityExtractor {
    fn extract(&self, html: &str, url: &str) -> Result<Extraction> {
        let config = self.readability_config();
        let char_threshold = config.char_threshold;

        let mut readability = Readability::new(html, Some(url), Some(config))
            .map_err(|e| ScrapeError::Extraction(e.to_string()))?;

        // Both must run before parse(), which rewrites the document
        let metadata = readability.get_article_metadata(readability.parse_json_ld());
        let title = Some(metadata.title).filter(|t| !t.trim().is_empty());

        if self.options.require_readerable && !readability.is_probably_readable() {
            ::log::info!("Page does not look like an article: {}", url);
            return Ok(Extraction::NoArticle { title });
        }

        let article = match readability.parse() {
            Ok(article) => article,
            Err(ReadabilityError::GrabFailed) => {
                ::log::info!("Readability found no article in {}", url);
                return Ok(Extraction::NoArticle { title });
            }
            Err(e) => return Err(ScrapeError::Extraction(e.to_string())),
        };

        let text_content = article.text_content.trim().to_string();
        let length = text_content.chars().count();
        if length < char_threshold {
            ::log::info!(
                "Readability kept only {} characters of {} (need {})",
                length,
                url,
                char_threshold
            );
            return Ok(Extraction::NoArticle { title });
        }

        let parsed = ParsedArticle {
            title: Some(article.title).filter(|t| !t.trim().is_empty()).or(title),
            byline: article.byline,
            dir: article.dir,
            lang: article.lang,
            content: Some(article.content.to_string()),
            length: Some(length as i64),
            text_content: Some(text_content),
            excerpt: article.excerpt,
            site_name: article.site_name,
            published_time: article.published_time,
        };

        ::log::debug!(
            "Extracted {} characters titled {:?}",
            length,
            parsed.title
        );
        Ok(Extraction::Article(parsed))
    }
}

#[cfg(test)]
mod tests;
