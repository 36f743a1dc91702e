//! # News Sentiment
//!
//! Scrapes articles from a news homepage (or Hacker News), scores each one
//! with chunked lexicon sentiment, maps it to a dashboard category, and writes
//! the aggregated dashboard as JSON and Markdown.
//!
//! ## Usage
//!
//! ```sh
//! news_sentiment -j ./json -m ./markdown
//! ```
//!
//! ## Architecture
//!
//! 1. **Indexing**: Discover article URLs on the homepage
//! 2. **Fetching**: Download and parse article pages concurrently
//! 3. **Scoring**: Average sentiment over overlapping text chunks
//! 4. **Aggregation**: Category, sentiment and word statistics
//! 5. **Output**: JSON dashboard, Markdown report and report index

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analytics;
mod category;
mod cli;
mod config;
mod http;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod sentiment;
mod utils;

use analytics::{Dashboard, RunInfo};
use cli::Cli;
use config::ScraperConfig;
use outputs::{indexes, json, markdown};
use sentiment::{ChunkConfig, Lexicon, SentimentAnalyzer};
use utils::{ensure_writable_dir, time_of_day};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_sentiment starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Config ----
    let mut config = match &args.config {
        Some(path) => ScraperConfig::load(path).await?,
        None => ScraperConfig::default(),
    };
    args.apply_overrides(&mut config);

    let lexicon = Lexicon::default().with_overrides(&config.lexicon_overrides);
    let lexicon_words = lexicon.len();
    let chunking = ChunkConfig::new(args.chunk_size, args.overlap)?;
    let analyzer = SentimentAnalyzer::new(lexicon, chunking, args.threshold);
    info!(
        lexicon_words,
        chunk_size = analyzer.chunking().chunk_size(),
        overlap = analyzer.chunking().overlap(),
        threshold = analyzer.threshold(),
        "Sentiment analyzer ready"
    );

    // Early check: ensure output dirs are writable
    if let Err(e) = ensure_writable_dir(&args.json_output_dir).await {
        error!(
            path = %args.json_output_dir,
            error = %e,
            "JSON output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }
    if let Some(dir) = &args.markdown_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Markdown output directory is not writable");
            return Err(e);
        }
    }

    // ---- Scrape ----
    let fetcher = http::build_fetcher(&config)?;
    let articles = pipeline::collect_articles(&fetcher, args.source, &args.url, &config).await?;
    if articles.is_empty() {
        warn!(url = %args.url, "No articles found or scraping failed");
        return Err(format!("no articles extracted from {}", args.url).into());
    }
    info!(count = articles.len(), "Total articles to analyze");

    // ---- Score and aggregate ----
    let scored = pipeline::score_articles(articles, &analyzer);

    let now = Local::now();
    let run = RunInfo {
        source_url: args.source_url(),
        local_date: now.date_naive().to_string(),
        time_of_day: time_of_day(),
        local_time: now.time().format("%H:%M:%S").to_string(),
    };
    let dashboard = Dashboard::build(run, &scored);
    info!(
        total = dashboard.total_articles,
        average_polarity = dashboard.average_polarity,
        categories = dashboard.category_distribution.len(),
        edition = %dashboard.time_of_day,
        "Dashboard built"
    );

    // ---- JSON output ----
    if let Err(e) = json::write_dashboard(&dashboard, &args.json_output_dir).await {
        error!(error = %e, "Failed to write JSON dashboard");
    }

    // ---- Markdown output ----
    if let Some(markdown_dir) = &args.markdown_output_dir {
        let markdown_filename = markdown::report_filename(&dashboard);
        let path = std::path::Path::new(markdown_dir).join(&markdown_filename);
        let md = markdown::dashboard_to_markdown(&dashboard);

        info!(path = %path.display(), "Writing Markdown");
        match tokio::fs::write(&path, md).await {
            Ok(()) => {
                info!(path = %path.display(), "Wrote Markdown report");
                if let Err(e) = indexes::update_report_index(markdown_dir, &dashboard, &markdown_filename).await {
                    error!(error = %e, "Failed to update report index");
                }
            }
            Err(e) => error!(path = %path.display(), error = %e, "Failed writing Markdown"),
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
