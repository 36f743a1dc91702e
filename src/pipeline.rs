//! Glue between scraping, scoring and categorisation.

use crate::category::map_category;
use crate::cli::Source;
use crate::config::ScraperConfig;
use crate::http::Fetch;
use crate::models::{NewsArticle, ScoredArticle};
use crate::scrapers::{hackernews, homepage};
use crate::sentiment::{PolarityScorer, SentimentAnalyzer};
use std::error::Error;
use tracing::{debug, info, instrument};

/// Scrape articles from the selected source.
#[instrument(level = "info", skip_all, fields(?source, %homepage_url))]
pub async fn collect_articles<F: Fetch>(
    fetcher: &F,
    source: Source,
    homepage_url: &str,
    config: &ScraperConfig,
) -> Result<Vec<NewsArticle>, Box<dyn Error>> {
    match source {
        Source::Homepage => {
            let urls = homepage::index_articles(fetcher, homepage_url, config).await?;
            Ok(homepage::fetch_articles(fetcher, urls, config).await)
        }
        Source::HackerNews => hackernews::fetch_articles(fetcher, config.max_articles).await,
    }
}

/// Score one article and assign its dashboard category.
pub fn score_article<S: PolarityScorer>(article: NewsArticle, analyzer: &SentimentAnalyzer<S>) -> ScoredArticle {
    let sentiment = analyzer.analyze(&article.content);
    let mapped_category = map_category(&article.url, &article.content);
    debug!(
        url = %article.url,
        polarity = sentiment.polarity,
        label = %sentiment.label,
        %mapped_category,
        "Scored article"
    );
    ScoredArticle::new(article, sentiment, mapped_category)
}

#[instrument(level = "info", skip_all, fields(count = articles.len()))]
pub fn score_articles<S: PolarityScorer>(
    articles: Vec<NewsArticle>,
    analyzer: &SentimentAnalyzer<S>,
) -> Vec<ScoredArticle> {
    let scored: Vec<ScoredArticle> = articles
        .into_iter()
        .map(|article| score_article(article, analyzer))
        .collect();
    info!(count = scored.len(), "Scored articles");
    scored
}
