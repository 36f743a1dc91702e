//! Data models for scraped articles and their scored representations.
//!
//! This module defines the core data structures used throughout the application:
//! - [`NewsArticle`]: Raw article fields extracted from a news page
//! - [`SentimentLabel`] and [`Sentiment`]: The result of chunked sentiment scoring
//! - [`ScoredArticle`]: An article with its sentiment and mapped category attached
//!
//! Aggregated dashboard data lives in [`crate::analytics`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw news article as scraped from a news source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// The URL the article was scraped from.
    pub url: String,
    /// The article headline, or `"N/A"` when the page has none.
    pub headline: String,
    /// Category derived from the URL path.
    pub category: String,
    /// Publication date, or the scrape date when the page does not publish one.
    pub date: NaiveDate,
    /// The article body text.
    pub content: String,
    /// Story score on sources that rank by votes, such as Hacker News.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

/// Three-way sentiment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Every label, in display order.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    /// Classify a polarity value.
    ///
    /// Values strictly above `threshold` are positive, values strictly below
    /// `-threshold` are negative, everything in between (boundaries included)
    /// is neutral.
    pub fn from_polarity(polarity: f64, threshold: f64) -> Self {
        if polarity > threshold {
            SentimentLabel::Positive
        } else if polarity < -threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
            SentimentLabel::Negative => write!(f, "Negative"),
        }
    }
}

/// Averaged polarity of a text together with its label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub polarity: f64,
    pub label: SentimentLabel,
}

impl Sentiment {
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            label: SentimentLabel::Neutral,
        }
    }
}

/// A news article after sentiment scoring and category mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredArticle {
    pub url: String,
    pub headline: String,
    /// Category derived from the URL path at scrape time.
    pub category: String,
    pub date: NaiveDate,
    pub content: String,
    /// Mean polarity over all text chunks, in `[-1.0, 1.0]`.
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    /// Category assigned by keyword mapping over URL and content.
    pub mapped_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

impl ScoredArticle {
    pub fn new(article: NewsArticle, sentiment: Sentiment, mapped_category: String) -> Self {
        Self {
            url: article.url,
            headline: article.headline,
            category: article.category,
            date: article.date,
            content: article.content,
            sentiment_score: sentiment.polarity,
            sentiment_label: sentiment.label,
            mapped_category,
            points: article.points,
        }
    }

    /// Extract the site name (the label before the TLD) from the article URL.
    ///
    /// For example: `"https://www.thehindu.com/news/..."` -> `"thehindu"`.
    pub fn source_tag(&self) -> Option<String> {
        let parsed = url::Url::parse(&self.url).ok()?;
        let host = parsed.host_str()?;
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() >= 2 {
            Some(parts[parts.len() - 2].to_string())
        } else {
            None
        }
    }
}
