//! Category assignment for scraped articles.
//!
//! Two passes are used. At scrape time [`category_from_url`] reads the section
//! straight out of the URL path (`/news/national/...` -> `"National"`). Before
//! reporting, [`map_category`] folds articles into a small fixed set of
//! dashboard categories using keyword matching on the URL, then the content.

/// Default category when nothing matches.
pub const GENERAL: &str = "General";

/// URL keywords checked first, in priority order.
const URL_RULES: &[(&[&str], &str)] = &[
    (&["sport", "cricket", "football"], "Sports"),
    (&["business", "economy", "market"], "Business"),
    (&["tech", "technology", "science"], "Tech"),
    (&["entertainment", "movie", "film"], "Entertainment"),
    (&["politics", "election", "government"], "Politics"),
];

/// Content keywords used when the URL is not conclusive.
const CONTENT_RULES: &[(&[&str], &str)] = &[
    (&["politics", "election"], "Politics"),
    (&["sport", "match"], "Sports"),
    (&["business", "stock"], "Business"),
    (&["movie", "cinema"], "Entertainment"),
    (&["technology", "software"], "Tech"),
];

/// Derive a section name from the URL path.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(category_from_url("https://www.thehindu.com/news/national/x.ece"), "National");
/// assert_eq!(category_from_url("https://www.thehindu.com/sport/cricket/x.ece"), "Sport");
/// ```
pub fn category_from_url(url: &str) -> String {
    let parts: Vec<&str> = url.split('/').collect();

    if let Some(idx) = parts.iter().position(|p| *p == "news") {
        if let Some(section) = parts.get(idx + 1).filter(|s| !s.is_empty()) {
            return capitalize(section);
        }
        return GENERAL.to_string();
    }

    for (segment, name) in [
        ("sport", "Sport"),
        ("business", "Business"),
        ("entertainment", "Entertainment"),
    ] {
        if parts.contains(&segment) {
            return name.to_string();
        }
    }
    GENERAL.to_string()
}

/// Map an article onto one of the dashboard categories.
///
/// URL keywords take priority over content keywords. Matching is a
/// case-insensitive substring test.
pub fn map_category(url: &str, content: &str) -> String {
    let url = url.to_lowercase();
    let content = content.to_lowercase();

    let matches = |haystack: &str, rules: &[(&[&str], &str)]| {
        rules
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| haystack.contains(k)))
            .map(|(_, name)| name.to_string())
    };

    matches(&url, URL_RULES)
        .or_else(|| matches(&content, CONTENT_RULES))
        .unwrap_or_else(|| GENERAL.to_string())
}

/// Uppercase the first character and lowercase the rest, like Python's
/// `str.capitalize`.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}
