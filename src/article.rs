use serde::{Deserialize, Serialize};

/// Invocation payload: the article to fetch
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRequest {
    pub article_url: String,
}

/// Reader-friendly article fields, serialized the way Readability names them
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedArticle {
    pub title: Option<String>,
    pub byline: Option<String>,
    pub dir: Option<String>,
    pub lang: Option<String>,
    /// Cleaned article HTML
    pub content: Option<String>,
    /// Article text with markup removed
    pub text_content: Option<String>,
    /// Length of `text_content` in characters
    pub length: Option<i64>,
    pub excerpt: Option<String>,
    pub site_name: Option<String>,
    pub published_time: Option<String>,
}

impl ParsedArticle {
    /// True when no article body was extracted
    pub fn is_empty(&self) -> bool {
        self.content.as_deref().is_none_or(|c| c.trim().is_empty())
    }
}

/// Outcome of running extraction on a rendered page
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Readable content was found
    Article(ParsedArticle),
    /// The page rendered but holds nothing article-like
    NoArticle { title: Option<String> },
}

impl Extraction {
    pub fn is_article(&self) -> bool {
        matches!(self, Extraction::Article(_))
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Extraction::Article(article) => article.title.as_deref(),
            Extraction::NoArticle { title } => title.as_deref(),
        }
    }

    /// Collapse into the response shape; `NoArticle` keeps only the title
    pub fn into_article(self) -> ParsedArticle {
        match self {
            Extraction::Article(article) => article,
            Extraction::NoArticle { title } => ParsedArticle {
                title,
                ..ParsedArticle::default()
            },
        }
    }
}
