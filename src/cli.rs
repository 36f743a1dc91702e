//! Command-line interface definitions.
//!
//! All arguments can be provided via command-line flags or environment
//! variables. Scraper settings given here override the YAML config file.

use crate::config::ScraperConfig;
use crate::scrapers::hackernews::HACKER_NEWS_URL;
use crate::sentiment::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, DEFAULT_THRESHOLD};
use clap::{Parser, ValueEnum};

pub const DEFAULT_URL: &str = "https://www.thehindu.com/";

/// Where articles come from.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// Follow article links found on a news homepage
    Homepage,
    /// Score the Hacker News front page story titles
    HackerNews,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Score The Hindu homepage, JSON only
/// news_sentiment -j ./json
///
/// # Another site with custom selectors, plus a Markdown report
/// news_sentiment -u https://example-news.com/ -c ./example.yaml -j ./json -m ./markdown
///
/// # Hacker News titles
/// news_sentiment -s hacker-news -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Homepage to collect article links from
    #[arg(short, long, env = "NEWS_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Article source
    #[arg(short, long, value_enum, env = "NEWS_SOURCE", default_value_t = Source::Homepage)]
    pub source: Source,

    /// Output directory for the JSON dashboard file
    #[arg(short, long, env = "JSON_OUTPUT_DIR")]
    pub json_output_dir: String,

    /// Output directory for the Markdown report
    #[arg(short, long, env = "MARKDOWN_OUTPUT_DIR")]
    pub markdown_output_dir: Option<String>,

    /// Optional path to a scraper config YAML file
    #[arg(short, long, env = "NEWS_SENTIMENT_CONFIG")]
    pub config: Option<String>,

    /// Maximum number of articles to score
    #[arg(long, env = "MAX_ARTICLES")]
    pub max_articles: Option<usize>,

    /// Number of article pages fetched concurrently
    #[arg(long, env = "FETCH_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Sentiment window length in characters
    #[arg(long, env = "CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Characters shared by consecutive sentiment windows
    #[arg(long, env = "CHUNK_OVERLAP", default_value_t = DEFAULT_OVERLAP)]
    pub overlap: usize,

    /// Polarity magnitude above which an article is Positive or Negative
    #[arg(long, env = "SENTIMENT_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,
}

impl Cli {
    /// Apply flag overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut ScraperConfig) {
        if let Some(max) = self.max_articles {
            config.max_articles = max;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
    }

    /// Page the dashboard credits as its source: the homepage URL, or the
    /// Hacker News front page when that source is selected.
    pub fn source_url(&self) -> String {
        match self.source {
            Source::Homepage => self.url.clone(),
            Source::HackerNews => HACKER_NEWS_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["news_sentiment", "--json-output-dir", "./json"]);

        assert_eq!(cli.json_output_dir, "./json");
        assert_eq!(cli.url, DEFAULT_URL);
        assert_eq!(cli.source, Source::Homepage);
        assert!(cli.markdown_output_dir.is_none());
        assert_eq!(cli.chunk_size, 500);
        assert_eq!(cli.overlap, 50);
        assert_eq!(cli.threshold, 0.05);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "news_sentiment",
            "-j",
            "/tmp/json",
            "-m",
            "/tmp/markdown",
            "-s",
            "hacker-news",
            "-u",
            "https://example.com/",
        ]);

        assert_eq!(cli.json_output_dir, "/tmp/json");
        assert_eq!(cli.markdown_output_dir.as_deref(), Some("/tmp/markdown"));
        assert_eq!(cli.source, Source::HackerNews);
        assert_eq!(cli.url, "https://example.com/");
    }

    #[test]
    fn test_cli_requires_json_dir() {
        assert!(Cli::try_parse_from(["news_sentiment"]).is_err());
    }

    #[test]
    fn test_source_url_follows_source() {
        let homepage = Cli::parse_from(["news_sentiment", "-j", "./json", "-u", "https://example.com/"]);
        assert_eq!(homepage.source_url(), "https://example.com/");

        let hacker_news = Cli::parse_from([
            "news_sentiment",
            "-j",
            "./json",
            "-u",
            "https://example.com/",
            "-s",
            "hacker-news",
        ]);
        assert_eq!(hacker_news.source_url(), HACKER_NEWS_URL);
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from(["news_sentiment", "-j", "./json", "--max-articles", "15"]);
        let mut config = ScraperConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.max_articles, 15);
        assert_eq!(config.concurrency, ScraperConfig::default().concurrency);
    }
}
