//! Scraper configuration loaded from YAML.
//!
//! Every field has a default tuned for The Hindu, so a config file only needs
//! to list what differs for another site:
//!
//! ```yaml
//! link_selector: "a.story-link"
//! required_link_fragment: "/2025/"
//! allowed_domain: "example-news.com"
//! headline_selector: "h1"
//! max_articles: 20
//! lexicon_overrides:
//!   surge: 0.4
//!   shutdown: -0.5
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Selectors and HTTP settings used by the scrapers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Selector for article links on the homepage.
    pub link_selector: String,
    /// Substring a link must contain to count as an article.
    pub required_link_fragment: String,
    /// When set, the link host must contain this string.
    pub allowed_domain: Option<String>,
    /// Selector for the article headline.
    pub headline_selector: String,
    /// Meta `property` holding the publication timestamp.
    pub published_meta_property: String,
    /// Selector for the primary article body container.
    pub body_selector: String,
    /// Selector for body paragraphs, used when the primary body is empty.
    pub paragraph_selector: String,
    /// Maximum number of article links to follow.
    pub max_articles: usize,
    /// Number of article pages fetched concurrently.
    pub concurrency: usize,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Retries after the first failed request.
    pub max_retries: usize,
    /// Extra or replacement sentiment lexicon entries, word -> polarity.
    pub lexicon_overrides: BTreeMap<String, f64>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            link_selector: "h3.title a, h2.title a, div.story-card a".to_string(),
            required_link_fragment: "/article".to_string(),
            allowed_domain: None,
            headline_selector: "h1.title".to_string(),
            published_meta_property: "article:published_time".to_string(),
            body_selector: r#"div[id^="content-body-"]"#.to_string(),
            paragraph_selector: "div.article-body p".to_string(),
            max_articles: 50,
            concurrency: 8,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            timeout_secs: 30,
            max_retries: 3,
            lexicon_overrides: BTreeMap::new(),
        }
    }
}

impl ScraperConfig {
    /// Parse a YAML document, filling missing fields with defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load the config from `path`.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let yaml = tokio::fs::read_to_string(path.as_ref()).await?;
        let config = Self::from_yaml(&yaml)?;
        info!(
            max_articles = config.max_articles,
            link_selector = %config.link_selector,
            "Loaded scraper configuration"
        );
        Ok(config)
    }
}
