use super::*;

const ARTICLE_HTML: &str = include_str!("../../tests/fixtures/article.html");
const NAVIGATION_HTML: &str = include_str!("../../tests/fixtures/navigation.html");
const NOT_FOUND_HTML: &str = include_str!("../../tests/fixtures/not_found.html");

const ARTICLE_URL: &str = "https://example-news-site.test/article-123";

#[test]
fn test_extracts_article_page() {
    let extractor = ReadabilityExtractor::default();
    let extraction = extractor.extract(ARTICLE_HTML, ARTICLE_URL).unwrap();

    let Extraction::Article(article) = extraction else {
        panic!("expected an article, got {:?}", extraction);
    };

    assert_eq!(
        article.title.as_deref(),
        Some("Harbour Bridge Reopens After Two Years")
    );

    let content = article.content.as_deref().unwrap();
    assert!(content.contains("engineers replaced every cable"));
    assert!(content.contains("cycle lane on the eastern side"));
    assert!(!content.contains("Subscribe to our newsletter"));
    assert!(!content.contains("Advertisement"));

    let text = article.text_content.as_deref().unwrap();
    assert!(text.contains("queued from before dawn"));
    assert_eq!(article.length, Some(text.chars().count() as i64));
}

#[test]
fn test_article_metadata() {
    let extractor = ReadabilityExtractor::default();
    let article = extractor
        .extract(ARTICLE_HTML, ARTICLE_URL)
        .unwrap()
        .into_article();

    assert_eq!(article.site_name.as_deref(), Some("Example News"));
    assert_eq!(article.lang.as_deref(), Some("en"));
    assert!(article.excerpt.is_some());
}

#[test]
fn test_navigation_page_has_no_article() {
    let extractor = ReadabilityExtractor::default();
    let extraction = extractor
        .extract(NAVIGATION_HTML, "https://example.test/sections")
        .unwrap();

    assert_eq!(
        extraction,
        Extraction::NoArticle {
            title: Some("Sections".to_string())
        }
    );
}

#[test]
fn test_not_found_page_has_empty_content() {
    let extractor = ReadabilityExtractor::default();
    let article = extractor
        .extract(NOT_FOUND_HTML, "https://example.test/not-found")
        .unwrap()
        .into_article();

    assert_eq!(article.title.as_deref(), Some("404 Not Found"));
    assert!(article.is_empty());
    assert!(article.text_content.is_none());
}

fn without_readerable_check() -> ReadabilityExtractor {
    ReadabilityExtractor::new(ReadabilityOptions {
        require_readerable: false,
        ..ReadabilityOptions::default()
    })
}

#[test]
fn test_readerable_check_can_be_disabled() {
    // The article page must still extract without the pre-check
    let extraction = without_readerable_check()
        .extract(ARTICLE_HTML, ARTICLE_URL)
        .unwrap();
    assert!(extraction.is_article());
}

#[test]
fn test_navigation_page_without_readerable_check() {
    let extraction = without_readerable_check()
        .extract(NAVIGATION_HTML, "https://example.test/sections")
        .unwrap();

    assert_eq!(
        extraction,
        Extraction::NoArticle {
            title: Some("Sections".to_string())
        }
    );
}

#[test]
fn test_not_found_page_without_readerable_check() {
    let extraction = without_readerable_check()
        .extract(NOT_FOUND_HTML, "https://example.test/not-found")
        .unwrap();

    assert!(!extraction.is_article());
    let article = extraction.into_article();
    assert!(article.content.is_none());
    assert_eq!(article.title.as_deref(), Some("404 Not Found"));
}

#[test]
fn test_short_text_below_char_threshold() {
    let options = ReadabilityOptions {
        require_readerable: false,
        char_threshold: Some(100_000),
        ..ReadabilityOptions::default()
    };
    let extraction = ReadabilityExtractor::new(options)
        .extract(ARTICLE_HTML, ARTICLE_URL)
        .unwrap();

    assert_eq!(
        extraction,
        Extraction::NoArticle {
            title: Some("Harbour Bridge Reopens After Two Years".to_string())
        }
    );
}

#[test]
fn test_element_limit_is_an_error() {
    let options = ReadabilityOptions {
        max_elements_to_parse: Some(5),
        ..ReadabilityOptions::default()
    };
    let err = ReadabilityExtractor::new(options)
        .extract(ARTICLE_HTML, ARTICLE_URL)
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Extraction(_)));
    assert!(err.to_string().contains("too many elements"));
}

#[test]
fn test_bad_document_url_is_an_error() {
    let err = ReadabilityExtractor::default()
        .extract(ARTICLE_HTML, "not a url")
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Extraction(_)));
}

#[test]
fn test_readerable_thresholds_reach_readability() {
    let options = ReadabilityOptions {
        min_content_length: 1_000,
        min_score: 5.0,
        ..ReadabilityOptions::default()
    };
    let config = ReadabilityExtractor::new(options).readability_config();
    assert_eq!(config.readable_min_content_length, 1_000);
    assert_eq!(config.readable_min_score, 5.0);

    // No paragraph in the fixture is long enough to count
    let extraction = ReadabilityExtractor::new(ReadabilityOptions {
        min_content_length: 1_000,
        ..ReadabilityOptions::default()
    })
    .extract(ARTICLE_HTML, ARTICLE_URL)
    .unwrap();
    assert!(!extraction.is_article());
}

#[test]
fn test_readability_config_uses_options() {
    let options = ReadabilityOptions {
        max_elements_to_parse: Some(9000),
        char_threshold: Some(250),
        keep_classes: true,
        ..ReadabilityOptions::default()
    };
    let config = ReadabilityExtractor::new(options).readability_config();
    assert_eq!(config.max_elements_to_parse, 9000);
    assert_eq!(config.char_threshold, 250);
    assert!(config.keep_classes);
}
