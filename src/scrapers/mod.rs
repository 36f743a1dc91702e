//! News source scrapers.
//!
//! Each scraper follows a two-phase pattern:
//!
//! 1. **Indexing**: Discover article URLs (or stories) from a front page
//! 2. **Fetching**: Download and parse article content from each URL
//!
//! # Supported Sources
//!
//! | Source | Module | Notes |
//! |--------|--------|-------|
//! | News homepage | [`homepage`] | Selector-driven; defaults target The Hindu |
//! | Hacker News | [`hackernews`] | Story titles only, scored as short texts |
//!
//! Scrapers take any [`crate::http::Fetch`] implementation, so parsing can be
//! tested against fixture HTML. Failed fetches are logged and skipped.

pub mod hackernews;
pub mod homepage;

use scraper::{ElementRef, Selector};
use std::error::Error;

/// Parse a CSS selector, turning the borrowed parse error into an owned one.
pub(crate) fn selector(css: &str) -> Result<Selector, Box<dyn Error>> {
    Selector::parse(css).map_err(|e| format!("invalid selector {css:?}: {e}").into())
}

/// Collect the visible text of an element, trimming each text node and
/// joining the pieces with single spaces.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
