//! Dashboard aggregation over scored articles.
//!
//! Turns a batch of [`ScoredArticle`]s into the numbers behind the dashboard:
//! category counts, sentiment distribution, a category × sentiment crosstab,
//! the most frequent words and a per-article table.

use crate::models::{ScoredArticle, SentimentLabel};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Number of words reported in [`Dashboard::top_words`].
pub const TOP_WORDS: usize = 20;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// English stop words, the same 318-word list scikit-learn's
/// `CountVectorizer(stop_words="english")` uses.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
        "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
        "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
        "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
        "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
        "beside", "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call",
        "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail",
        "do", "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
        "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
        "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
        "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
        "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
        "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
        "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
        "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
        "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
        "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
        "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
        "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
        "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
        "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
        "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
        "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
        "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
        "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
        "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
        "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
        "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
        "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
        "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
        "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
        "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
        "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Number of articles in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Share of articles carrying one sentiment label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelShare {
    pub label: SentimentLabel,
    pub count: usize,
    /// Percentage of all articles, `0.0..=100.0`.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// One row of the article table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRow {
    pub headline: String,
    pub url: String,
    /// Site name taken from the URL host, e.g. `"thehindu"`.
    pub source: Option<String>,
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f64,
    pub mapped_category: String,
    /// Story score, only present for vote-ranked sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

impl From<&ScoredArticle> for ArticleRow {
    fn from(article: &ScoredArticle) -> Self {
        Self {
            headline: article.headline.clone(),
            url: article.url.clone(),
            source: article.source_tag(),
            sentiment_label: article.sentiment_label,
            sentiment_score: article.sentiment_score,
            mapped_category: article.mapped_category.clone(),
            points: article.points,
        }
    }
}

/// Everything rendered for one scrape run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// The page the articles were scraped from.
    pub source_url: String,
    /// Run date in `YYYY-MM-DD` format.
    pub local_date: String,
    /// "morning", "afternoon" or "evening".
    pub time_of_day: String,
    pub local_time: String,
    pub total_articles: usize,
    pub average_polarity: f64,
    pub category_distribution: Vec<CategoryCount>,
    pub sentiment_distribution: Vec<LabelShare>,
    /// Category -> label -> count, every label present for every category.
    pub sentiment_by_category: BTreeMap<String, BTreeMap<SentimentLabel, usize>>,
    pub top_words: Vec<WordCount>,
    pub articles: Vec<ArticleRow>,
}

/// Run metadata stamped onto a [`Dashboard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    pub source_url: String,
    pub local_date: String,
    pub time_of_day: String,
    pub local_time: String,
}

impl Dashboard {
    pub fn build(run: RunInfo, articles: &[ScoredArticle]) -> Self {
        Self {
            source_url: run.source_url,
            local_date: run.local_date,
            time_of_day: run.time_of_day,
            local_time: run.local_time,
            total_articles: articles.len(),
            average_polarity: average_polarity(articles),
            category_distribution: category_distribution(articles),
            sentiment_distribution: sentiment_distribution(articles),
            sentiment_by_category: sentiment_by_category(articles),
            top_words: top_words(articles, TOP_WORDS),
            articles: articles.iter().map(ArticleRow::from).collect(),
        }
    }
}

/// Mean sentiment score, `0.0` for no articles.
pub fn average_polarity(articles: &[ScoredArticle]) -> f64 {
    if articles.is_empty() {
        return 0.0;
    }
    articles.iter().map(|a| a.sentiment_score).sum::<f64>() / articles.len() as f64
}

/// Article counts per mapped category, most frequent first, ties by name.
pub fn category_distribution(articles: &[ScoredArticle]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for article in articles {
        *counts.entry(article.mapped_category.as_str()).or_default() += 1;
    }

    let mut distribution: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    distribution
}

/// Count and percentage for every label that occurs at least once.
pub fn sentiment_distribution(articles: &[ScoredArticle]) -> Vec<LabelShare> {
    let total = articles.len();
    SentimentLabel::ALL
        .iter()
        .filter_map(|label| {
            let count = articles.iter().filter(|a| a.sentiment_label == *label).count();
            (count > 0).then(|| LabelShare {
                label: *label,
                count,
                percent: count as f64 * 100.0 / total as f64,
            })
        })
        .collect()
}

/// Category × label crosstab with missing cells filled with zero.
pub fn sentiment_by_category(articles: &[ScoredArticle]) -> BTreeMap<String, BTreeMap<SentimentLabel, usize>> {
    let mut table: BTreeMap<String, BTreeMap<SentimentLabel, usize>> = BTreeMap::new();
    for article in articles {
        let row = table.entry(article.mapped_category.clone()).or_insert_with(|| {
            SentimentLabel::ALL.iter().map(|label| (*label, 0)).collect()
        });
        *row.entry(article.sentiment_label).or_default() += 1;
    }
    table
}

/// Split text into lower-cased words of two or more word characters,
/// dropping stop words. Numbers count as words.
pub fn tokenize_words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|w| !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// The `limit` most frequent words over headlines and content, ties broken
/// alphabetically.
pub fn top_words(articles: &[ScoredArticle], limit: usize) -> Vec<WordCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for article in articles {
        let text = format!("{} {}", article.headline, article.content);
        for word in tokenize_words(&text) {
            *counts.entry(word).or_default() += 1;
        }
    }

    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words.truncate(limit);
    words
}
