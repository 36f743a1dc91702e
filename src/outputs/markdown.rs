//! Markdown rendering of the dashboard.
//!
//! The report mirrors the dashboard panels as tables: category counts,
//! overall sentiment shares, the category × sentiment crosstab, the most
//! frequent words and the scored article list.

use crate::analytics::Dashboard;
use crate::models::SentimentLabel;
use crate::utils::upcase;
use std::fmt::Write;

/// Escape text for use inside a Markdown table cell.
pub fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Escape text for use as Markdown link text inside a table cell.
fn escape_link_text(text: &str) -> String {
    escape_cell(text).replace('[', "\\[").replace(']', "\\]")
}

/// Percent-encode the characters that would end a link target or split a
/// table row.
fn escape_link_target(url: &str) -> String {
    url.replace('|', "%7C")
        .replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
        .replace(['\n', '\r'], "")
}

/// Filename of the Markdown report for `dashboard`.
pub fn report_filename(dashboard: &Dashboard) -> String {
    format!("{}_{}.md", dashboard.local_date, dashboard.time_of_day)
}

/// Render a [`Dashboard`] as a Markdown document.
pub fn dashboard_to_markdown(dashboard: &Dashboard) -> String {
    let mut md = String::new();

    writeln!(
        md,
        "# News Sentiment: {} {} Edition\n",
        dashboard.local_date,
        upcase(&dashboard.time_of_day)
    )
    .unwrap();
    writeln!(md, "Source: <{}>  ", dashboard.source_url).unwrap();
    writeln!(md, "Generated at {}\n", dashboard.local_time).unwrap();

    writeln!(md, "## Summary\n").unwrap();
    writeln!(md, "- Articles analyzed: {}", dashboard.total_articles).unwrap();
    writeln!(md, "- Average polarity: {:.3}\n", dashboard.average_polarity).unwrap();

    if dashboard.total_articles == 0 {
        writeln!(md, "_No articles were extracted._").unwrap();
        return md;
    }

    writeln!(md, "## Articles by Category\n").unwrap();
    writeln!(md, "| Category | Count |\n|---|---:|").unwrap();
    for entry in &dashboard.category_distribution {
        writeln!(md, "| {} | {} |", escape_cell(&entry.category), entry.count).unwrap();
    }
    md.push('\n');

    writeln!(md, "## Overall Sentiment\n").unwrap();
    writeln!(md, "| Sentiment | Count | Share |\n|---|---:|---:|").unwrap();
    for share in &dashboard.sentiment_distribution {
        writeln!(md, "| {} | {} | {:.1}% |", share.label, share.count, share.percent).unwrap();
    }
    md.push('\n');

    writeln!(md, "## Sentiment by Category\n").unwrap();
    let header = SentimentLabel::ALL.map(|l| l.to_string()).join(" | ");
    writeln!(md, "| Category | {header} |\n|---|---:|---:|---:|").unwrap();
    for (category, row) in &dashboard.sentiment_by_category {
        let cells = SentimentLabel::ALL
            .map(|label| row.get(&label).copied().unwrap_or(0).to_string())
            .join(" | ");
        writeln!(md, "| {} | {} |", escape_cell(category), cells).unwrap();
    }
    md.push('\n');

    if !dashboard.top_words.is_empty() {
        writeln!(md, "## Top {} Frequent Words\n", dashboard.top_words.len()).unwrap();
        writeln!(md, "| Word | Frequency |\n|---|---:|").unwrap();
        for word in &dashboard.top_words {
            writeln!(md, "| {} | {} |", escape_cell(&word.word), word.count).unwrap();
        }
        md.push('\n');
    }

    writeln!(md, "## Articles\n").unwrap();
    writeln!(md, "| Headline | Source | Category | Sentiment | Score |\n|---|---|---|---|---:|").unwrap();
    for article in &dashboard.articles {
        writeln!(
            md,
            "| [{}]({}) | {} | {} | {} | {:.3} |",
            escape_link_text(&article.headline),
            escape_link_target(&article.url),
            article.source.as_deref().map(escape_cell).unwrap_or_default(),
            escape_cell(&article.mapped_category),
            article.sentiment_label,
            article.sentiment_score
        )
        .unwrap();
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::RunInfo;
    use crate::models::ScoredArticle;
    use chrono::NaiveDate;

    fn run() -> RunInfo {
        RunInfo {
            source_url: "https://www.thehindu.com/".to_string(),
            local_date: "2025-05-06".to_string(),
            time_of_day: "afternoon".to_string(),
            local_time: "12:00:00".to_string(),
        }
    }

    fn article(headline: &str, category: &str, label: SentimentLabel, score: f64) -> ScoredArticle {
        ScoredArticle {
            url: "https://www.thehindu.com/news/a/article1.ece".to_string(),
            headline: headline.to_string(),
            category: "General".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
            content: "monsoon arrives early".to_string(),
            sentiment_score: score,
            sentiment_label: label,
            mapped_category: category.to_string(),
            points: None,
        }
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a | b\nc"), "a \\| b c");
    }

    #[test]
    fn test_escape_link_target() {
        assert_eq!(escape_link_target("https://x.com/a|b/(c) d"), "https://x.com/a%7Cb/%28c%29%20d");
    }

    #[test]
    fn test_pipe_in_url_keeps_row_intact() {
        let mut piped = article("Pipe story", "World", SentimentLabel::Neutral, 0.0);
        piped.url = "https://x.com/a|b/article1".to_string();
        let md = dashboard_to_markdown(&Dashboard::build(run(), &[piped]));

        let row = md.lines().find(|l| l.starts_with("| [Pipe story]")).unwrap();
        assert_eq!(row, "| [Pipe story](https://x.com/a%7Cb/article1) | x | World | Neutral | 0.000 |");
        assert_eq!(row.matches('|').count(), 6);
    }

    #[test]
    fn test_report_filename() {
        let dashboard = Dashboard::build(run(), &[]);
        assert_eq!(report_filename(&dashboard), "2025-05-06_afternoon.md");
    }

    #[test]
    fn test_empty_report() {
        let md = dashboard_to_markdown(&Dashboard::build(run(), &[]));
        assert!(md.starts_with("# News Sentiment: 2025-05-06 Afternoon Edition"));
        assert!(md.contains("- Articles analyzed: 0"));
        assert!(md.contains("_No articles were extracted._"));
        assert!(!md.contains("## Articles by Category"));
    }

    #[test]
    fn test_full_report_tables() {
        let articles = vec![
            article("Team [finally] wins", "Sports", SentimentLabel::Positive, 0.25),
            article("Budget | Debate", "Politics", SentimentLabel::Negative, -0.1),
        ];
        let md = dashboard_to_markdown(&Dashboard::build(run(), &articles));

        assert!(md.contains("- Average polarity: 0.075"));
        assert!(md.contains("| Politics | 1 |"));
        assert!(md.contains("| Positive | 1 | 50.0% |"));
        assert!(md.contains("| Category | Positive | Neutral | Negative |"));
        assert!(md.contains("| Sports | 1 | 0 | 0 |"));
        assert!(md.contains("| monsoon | 2 |"));
        assert!(md.contains("| [Team \\[finally\\] wins](https://www.thehindu.com/news/a/article1.ece) | thehindu | Sports | Positive | 0.250 |"));
        assert!(md.contains("[Budget \\| Debate]"));
    }
}
