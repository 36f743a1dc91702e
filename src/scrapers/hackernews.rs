//! Hacker News front page scraper.
//!
//! Most social platforms render posts with JavaScript, so their static HTML
//! carries no content. Hacker News serves plain HTML, which makes it a usable
//! social source without a browser. Stories sit in `.titleline > a`; the
//! matching `.subtext` row holds the score.
//!
//! Stories have no body, so each one becomes a [`NewsArticle`] whose content
//! is the title itself.

use super::{element_text, selector};
use crate::http::Fetch;
use crate::models::NewsArticle;
use chrono::{Local, NaiveDate};
use std::error::Error;
use tracing::{debug, info, instrument};
use url::Url;

pub const HACKER_NEWS_URL: &str = "https://news.ycombinator.com/";

/// Category assigned to every Hacker News story.
pub const SOCIAL_CATEGORY: &str = "Social";

/// A story from the Hacker News front page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HackerNewsStory {
    pub title: String,
    /// Absolute link; self posts resolve to their `item?id=` page.
    pub url: String,
    pub points: u32,
}

impl HackerNewsStory {
    pub fn into_article(self, today: NaiveDate) -> NewsArticle {
        NewsArticle {
            url: self.url,
            headline: self.title.clone(),
            category: SOCIAL_CATEGORY.to_string(),
            date: today,
            content: self.title,
            points: Some(self.points),
        }
    }
}

/// Parse a score such as `"123 points"`; anything unparseable is `0`.
pub fn parse_points(text: &str) -> u32 {
    text.split_whitespace()
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

/// Parse stories out of front page HTML.
///
/// Title links and subtext rows are paired in page order. Jobs postings
/// have a subtext without a score and get `0` points.
pub fn parse_front_page(html: &str, base_url: &Url) -> Result<Vec<HackerNewsStory>, Box<dyn Error>> {
    let document = scraper::Html::parse_document(html);
    let title_selector = selector(".titleline > a")?;
    let subtext_selector = selector(".subtext")?;
    let score_selector = selector(".score")?;

    let stories = document
        .select(&title_selector)
        .zip(document.select(&subtext_selector))
        .map(|(link, subtext)| {
            let href = link.value().attr("href").unwrap_or_default();
            let url = base_url
                .join(href)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| href.to_string());
            let points = subtext
                .select(&score_selector)
                .next()
                .map(|score| parse_points(&element_text(score)))
                .unwrap_or(0);
            HackerNewsStory {
                title: element_text(link),
                url,
                points,
            }
        })
        .collect();

    Ok(stories)
}

/// Fetch the front page and return up to `limit` stories.
#[instrument(level = "info", skip_all, fields(limit = limit))]
pub async fn index_stories<F: Fetch>(fetcher: &F, limit: usize) -> Result<Vec<HackerNewsStory>, Box<dyn Error>> {
    let base_url = Url::parse(HACKER_NEWS_URL)?;
    let html = fetcher.fetch(HACKER_NEWS_URL).await?;
    let mut stories = parse_front_page(&html, &base_url)?;
    stories.truncate(limit);

    info!(count = stories.len(), "Indexed Hacker News stories");
    for story in &stories {
        debug!(title = %story.title, points = story.points, url = %story.url, "Hacker News story");
    }
    Ok(stories)
}

/// Fetch front page stories as articles dated today.
pub async fn fetch_articles<F: Fetch>(fetcher: &F, limit: usize) -> Result<Vec<NewsArticle>, Box<dyn Error>> {
    let today = Local::now().date_naive();
    let stories = index_stories(fetcher, limit).await?;
    Ok(stories.into_iter().map(|s| s.into_article(today)).collect())
}
