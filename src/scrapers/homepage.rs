//! Selector-driven news homepage scraper.
//!
//! Article links are gathered from the homepage, then each article page is
//! parsed for headline, publication date and body text. The default
//! selectors match The Hindu:
//!
//! | Field | Selector |
//! |-------|----------|
//! | Links | `h3.title a, h2.title a, div.story-card a` |
//! | Headline | `h1.title` |
//! | Date | `meta[property="article:published_time"]` |
//! | Body | `div[id^="content-body-"]`, else `div.article-body p` |

use super::{element_text, selector};
use crate::category::category_from_url;
use crate::config::ScraperConfig;
use crate::http::Fetch;
use crate::models::NewsArticle;
use crate::utils::truncate_for_log;
use chrono::{DateTime, Local, NaiveDate};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use scraper::Html;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Headline used when an article page has none.
pub const MISSING_HEADLINE: &str = "N/A";

/// Extract article links from homepage HTML.
///
/// Links are resolved against `base_url`, filtered to http(s) URLs that
/// contain the configured fragment (and domain, when set), de-duplicated in
/// page order and capped at `max_articles`.
pub fn extract_article_links(
    html: &str,
    base_url: &Url,
    config: &ScraperConfig,
) -> Result<Vec<String>, Box<dyn Error>> {
    let document = Html::parse_document(html);
    let link_selector = selector(&config.link_selector)?;

    let links = document
        .select(&link_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| base_url.join(href.trim()).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .filter(|url| match &config.allowed_domain {
            Some(domain) => url.host_str().is_some_and(|host| host.contains(domain.as_str())),
            None => true,
        })
        .map(|url| url.to_string())
        .filter(|url| url.contains(&config.required_link_fragment))
        .unique()
        .take(config.max_articles)
        .collect();

    Ok(links)
}

/// Index the homepage to extract article URLs.
///
/// # Arguments
///
/// * `fetcher` - Page fetcher used for the homepage request
/// * `homepage` - Absolute URL of the homepage
/// * `config` - Link selector, domain and fragment filters, and the article cap
///
/// # Returns
///
/// Unique absolute article URLs in page order, or an error if the homepage
/// URL is invalid or the page cannot be fetched.
#[instrument(level = "info", skip_all, fields(%homepage))]
pub async fn index_articles<F: Fetch>(
    fetcher: &F,
    homepage: &str,
    config: &ScraperConfig,
) -> Result<Vec<String>, Box<dyn Error>> {
    let base_url = Url::parse(homepage)?;
    let html = fetcher.fetch(homepage).await?;
    let article_urls = extract_article_links(&html, &base_url, config)?;

    info!(count = article_urls.len(), source = homepage, "Indexed article URLs");
    debug!(urls = ?article_urls, "Article URLs");
    Ok(article_urls)
}

/// Parse the publication date from an ISO 8601 / RFC 3339 timestamp.
pub fn parse_published_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    raw.get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
}

/// Parse an article page into a [`NewsArticle`].
///
/// `today` is used when the page carries no parseable publication date.
pub fn parse_article(
    html: &str,
    url: &str,
    config: &ScraperConfig,
    today: NaiveDate,
) -> Result<NewsArticle, Box<dyn Error>> {
    let document = Html::parse_document(html);
    let headline_selector = selector(&config.headline_selector)?;
    let meta_selector = selector(&format!(
        r#"meta[property="{}"]"#,
        config.published_meta_property
    ))?;
    let body_selector = selector(&config.body_selector)?;
    let paragraph_selector = selector(&config.paragraph_selector)?;

    let headline = document
        .select(&headline_selector)
        .next()
        .map(element_text)
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| MISSING_HEADLINE.to_string());

    let date = document
        .select(&meta_selector)
        .filter_map(|meta| meta.value().attr("content"))
        .find_map(parse_published_date)
        .unwrap_or(today);

    let mut content = document
        .select(&body_selector)
        .next()
        .map(element_text)
        .unwrap_or_default();
    if content.is_empty() {
        content = document
            .select(&paragraph_selector)
            .map(element_text)
            .filter(|p| !p.is_empty())
            .join(" ");
    }

    Ok(NewsArticle {
        url: url.to_string(),
        headline,
        category: category_from_url(url),
        date,
        content,
        points: None,
    })
}

/// Fetch all articles concurrently, preserving index order.
///
/// Failed fetches are logged and skipped without failing the batch.
#[instrument(level = "info", skip_all, fields(count = urls.len()))]
pub async fn fetch_articles<F: Fetch>(
    fetcher: &F,
    urls: Vec<String>,
    config: &ScraperConfig,
) -> Vec<NewsArticle> {
    let today = Local::now().date_naive();

    let articles: Vec<NewsArticle> = stream::iter(urls)
        .map(|url| async move {
            match fetch_article(fetcher, &url, config, today).await {
                Ok(article) => {
                    debug!(%url, "Fetched article");
                    Some(article)
                }
                Err(e) => {
                    error!(error = %e, %url, "Article fetch failed");
                    None
                }
            }
        })
        .buffered(config.concurrency.max(1))
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(count = articles.len(), "Fetched article contents");
    articles
}

#[instrument(level = "debug", skip_all, fields(%url))]
async fn fetch_article<F: Fetch>(
    fetcher: &F,
    url: &str,
    config: &ScraperConfig,
    today: NaiveDate,
) -> Result<NewsArticle, Box<dyn Error>> {
    let body = fetcher.fetch(url).await?;
    let article = parse_article(&body, url, config, today)?;
    if article.content.is_empty() {
        warn!(preview = %truncate_for_log(&body, 300), "Article produced no content");
    }
    debug!(bytes = article.content.len(), headline = %article.headline, "Parsed article");
    Ok(article)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::tests::StaticFetcher;

    const HOMEPAGE: &str = r#"
        <html><body>
          <h3 class="title"><a href="https://www.thehindu.com/news/national/story-one/article1.ece">One</a></h3>
          <h2 class="title"><a href="/sport/cricket/story-two/article2.ece">Two</a></h2>
          <div class="story-card"><a href="https://www.thehindu.com/news/national/story-one/article1.ece">Dup</a></div>
          <div class="story-card"><a href="https://www.thehindu.com/opinion/">Section</a></div>
          <div class="story-card"><a href="https://ads.example.com/article/promo">Ad</a></div>
          <div class="story-card"><a href="mailto:desk@thehindu.com?article">Mail</a></div>
          <p><a href="https://www.thehindu.com/news/ignored/article3.ece">Not matched</a></p>
        </body></html>
    "#;

    const ARTICLE: &str = r#"
        <html><head>
          <meta property="article:published_time" content="2025-05-06T14:30:00+05:30">
        </head><body>
          <h1 class="title"> Rescue teams celebrate success </h1>
          <div id="content-body-12345"><p>First paragraph.</p><p>Second paragraph.</p></div>
        </body></html>
    "#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn base() -> Url {
        Url::parse("https://www.thehindu.com/").unwrap()
    }

    #[test]
    fn test_extract_links_resolves_filters_and_dedupes() {
        let links = extract_article_links(HOMEPAGE, &base(), &ScraperConfig::default()).unwrap();
        assert_eq!(
            links,
            vec![
                "https://www.thehindu.com/news/national/story-one/article1.ece",
                "https://www.thehindu.com/sport/cricket/story-two/article2.ece",
                "https://ads.example.com/article/promo",
            ]
        );
    }

    #[test]
    fn test_extract_links_allowed_domain() {
        let config = ScraperConfig {
            allowed_domain: Some("thehindu.com".to_string()),
            ..ScraperConfig::default()
        };
        let links = extract_article_links(HOMEPAGE, &base(), &config).unwrap();
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.contains("thehindu.com")));
    }

    #[test]
    fn test_extract_links_respects_limit() {
        let config = ScraperConfig {
            max_articles: 1,
            ..ScraperConfig::default()
        };
        let links = extract_article_links(HOMEPAGE, &base(), &config).unwrap();
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_extract_links_invalid_selector() {
        let config = ScraperConfig {
            link_selector: "a[".to_string(),
            ..ScraperConfig::default()
        };
        assert!(extract_article_links(HOMEPAGE, &base(), &config).is_err());
    }

    #[test]
    fn test_parse_article_fields() {
        let url = "https://www.thehindu.com/news/national/story-one/article1.ece";
        let article = parse_article(ARTICLE, url, &ScraperConfig::default(), today()).unwrap();
        assert_eq!(article.headline, "Rescue teams celebrate success");
        assert_eq!(article.date, NaiveDate::from_ymd_opt(2025, 5, 6).unwrap());
        assert_eq!(article.content, "First paragraph. Second paragraph.");
        assert_eq!(article.category, "National");
        assert_eq!(article.url, url);
    }

    #[test]
    fn test_parse_article_fallbacks() {
        let html = r#"
            <html><body>
              <div class="article-body"><p>Alpha.</p><p> </p><p>Beta.</p></div>
            </body></html>
        "#;
        let article = parse_article(html, "https://x.test/opinion/a", &ScraperConfig::default(), today()).unwrap();
        assert_eq!(article.headline, MISSING_HEADLINE);
        assert_eq!(article.date, today());
        assert_eq!(article.content, "Alpha. Beta.");
        assert_eq!(article.category, "General");
    }

    #[test]
    fn test_parse_article_empty_page() {
        let article = parse_article("<html></html>", "https://x.test/a", &ScraperConfig::default(), today()).unwrap();
        assert!(article.content.is_empty());
    }

    #[test]
    fn test_parse_published_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 5, 6);
        assert_eq!(parse_published_date("2025-05-06T14:30:00+05:30"), expected);
        assert_eq!(parse_published_date("2025-05-06T14:30:00"), expected);
        assert_eq!(parse_published_date("2025-05-06"), expected);
        assert_eq!(parse_published_date("yesterday"), None);
        assert_eq!(parse_published_date(""), None);
    }

    #[tokio::test]
    async fn test_index_and_fetch_articles() {
        let one = "https://www.thehindu.com/news/national/story-one/article1.ece";
        let fetcher = StaticFetcher::default()
            .with_page("https://www.thehindu.com/", HOMEPAGE)
            .with_page(one, ARTICLE);
        let config = ScraperConfig::default();

        let urls = index_articles(&fetcher, "https://www.thehindu.com/", &config)
            .await
            .unwrap();
        assert_eq!(urls.len(), 3);

        // Only the first URL has a page; the others fail and are skipped.
        let articles = fetch_articles(&fetcher, urls, &config).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, one);
    }

    #[tokio::test]
    async fn test_index_articles_bad_homepage_url() {
        let fetcher = StaticFetcher::default();
        assert!(index_articles(&fetcher, "not a url", &ScraperConfig::default()).await.is_err());
    }
}
