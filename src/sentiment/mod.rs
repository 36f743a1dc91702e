//! Chunked sentiment scoring.
//!
//! Lexicon scorers are tuned for sentence-sized inputs, so long articles are
//! split into overlapping fixed-size windows before scoring:
//!
//! 1. **Chunking**: [`chunk_text`] cuts the text into windows of
//!    `chunk_size` characters, each starting `chunk_size - overlap`
//!    characters after the previous one
//! 2. **Scoring**: every window is scored independently by a [`PolarityScorer`]
//! 3. **Aggregation**: the window polarities are averaged and the mean is
//!    labelled Positive, Neutral or Negative against a threshold
//!
//! Windows are measured in characters (Unicode scalar values), so multi-byte
//! text is never cut inside a code point.

pub mod lexicon;

use crate::models::{Sentiment, SentimentLabel};
use std::error::Error;
use std::fmt;
use tracing::{debug, instrument};

pub use lexicon::Lexicon;

/// Default window length in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500;
/// Default number of characters shared by consecutive windows.
pub const DEFAULT_OVERLAP: usize = 50;
/// Default polarity magnitude a text must exceed to be labelled non-neutral.
pub const DEFAULT_THRESHOLD: f64 = 0.05;

/// Anything that can assign a polarity in `[-1.0, 1.0]` to a short text.
pub trait PolarityScorer {
    fn polarity(&self, text: &str) -> f64;
}

/// Rejected chunking parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkConfigError {
    /// A zero-length window cannot hold any text.
    ZeroChunkSize,
    /// The overlap must be smaller than the window or the window never advances.
    OverlapTooLarge { chunk_size: usize, overlap: usize },
}

impl fmt::Display for ChunkConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkConfigError::ZeroChunkSize => write!(f, "chunk size must be greater than zero"),
            ChunkConfigError::OverlapTooLarge { chunk_size, overlap } => write!(
                f,
                "overlap ({overlap}) must be smaller than chunk size ({chunk_size})"
            ),
        }
    }
}

impl Error for ChunkConfigError {}

/// Window length and overlap used by [`chunk_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    chunk_size: usize,
    overlap: usize,
}

impl ChunkConfig {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ChunkConfigError> {
        if chunk_size == 0 {
            return Err(ChunkConfigError::ZeroChunkSize);
        }
        if overlap >= chunk_size {
            return Err(ChunkConfigError::OverlapTooLarge { chunk_size, overlap });
        }
        Ok(Self { chunk_size, overlap })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance in characters between the starts of consecutive windows.
    pub fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

/// Split `text` into overlapping windows of at most `chunk_size` characters.
///
/// The last window always ends at the end of the text. Empty input yields no
/// windows.
///
/// # Examples
///
/// ```ignore
/// let config = ChunkConfig::new(4, 1)?;
/// assert_eq!(chunk_text("abcdefghij", &config), vec!["abcd", "defg", "ghij"]);
/// ```
pub fn chunk_text<'a>(text: &'a str, config: &ChunkConfig) -> Vec<&'a str> {
    if text.is_empty() {
        return Vec::new();
    }

    // Byte offset of every character start, plus the end of the string.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = boundaries.len() - 1;

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < char_len {
        let end = (start + config.chunk_size).min(char_len);
        chunks.push(&text[boundaries[start]..boundaries[end]]);
        if end == char_len {
            break;
        }
        start += config.step();
    }
    chunks
}

/// Scores whole articles by averaging the polarity of their chunks.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer<S = Lexicon> {
    scorer: S,
    chunking: ChunkConfig,
    threshold: f64,
}

impl<S> SentimentAnalyzer<S>
where
    S: PolarityScorer,
{
    pub fn new(scorer: S, chunking: ChunkConfig, threshold: f64) -> Self {
        Self {
            scorer,
            chunking,
            threshold: threshold.abs(),
        }
    }

    pub fn chunking(&self) -> &ChunkConfig {
        &self.chunking
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Average chunk polarity of `text` and its three-way label.
    ///
    /// # Arguments
    ///
    /// * `text` - Article body, split into overlapping character windows
    ///
    /// # Returns
    ///
    /// The mean polarity of all windows, labelled against the threshold.
    /// Empty text is neutral with a polarity of `0.0`.
    #[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
    pub fn analyze(&self, text: &str) -> Sentiment {
        let chunks = chunk_text(text, &self.chunking);
        if chunks.is_empty() {
            return Sentiment::neutral();
        }

        let total: f64 = chunks.iter().map(|chunk| self.scorer.polarity(chunk)).sum();
        let polarity = total / chunks.len() as f64;
        let label = SentimentLabel::from_polarity(polarity, self.threshold);
        debug!(chunks = chunks.len(), polarity, %label, "Scored text");

        Sentiment { polarity, label }
    }
}

impl Default for SentimentAnalyzer<Lexicon> {
    fn default() -> Self {
        Self::new(Lexicon::default(), ChunkConfig::default(), DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scores a chunk by the share of '+' characters minus the share of '-'.
    struct SignScorer;

    impl PolarityScorer for SignScorer {
        fn polarity(&self, text: &str) -> f64 {
            let len = text.chars().count() as f64;
            let plus = text.chars().filter(|c| *c == '+').count() as f64;
            let minus = text.chars().filter(|c| *c == '-').count() as f64;
            (plus - minus) / len
        }
    }

    fn sign_analyzer() -> SentimentAnalyzer<SignScorer> {
        SentimentAnalyzer::new(SignScorer, ChunkConfig::default(), DEFAULT_THRESHOLD)
    }

    #[test]
    fn test_chunk_config_rejects_zero_size() {
        assert_eq!(ChunkConfig::new(0, 0), Err(ChunkConfigError::ZeroChunkSize));
    }

    #[test]
    fn test_chunk_config_rejects_overlap_not_smaller_than_size() {
        assert!(matches!(
            ChunkConfig::new(50, 50),
            Err(ChunkConfigError::OverlapTooLarge { .. })
        ));
        assert!(ChunkConfig::new(50, 49).is_ok());
    }

    #[test]
    fn test_chunk_empty_text() {
        assert!(chunk_text("", &ChunkConfig::default()).is_empty());
    }

    #[test]
    fn test_chunk_short_text_is_single_window() {
        let chunks = chunk_text("short text", &ChunkConfig::default());
        assert_eq!(chunks, vec!["short text"]);
    }

    #[test]
    fn test_chunk_exact_window_length() {
        let text = "a".repeat(500);
        let chunks = chunk_text(&text, &ChunkConfig::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 500);
    }

    #[test]
    fn test_chunk_windows_overlap() {
        let config = ChunkConfig::new(4, 1).unwrap();
        assert_eq!(chunk_text("abcdefghij", &config), vec!["abcd", "defg", "ghij"]);
    }

    #[test]
    fn test_chunk_default_window_positions() {
        let text = "a".repeat(1000);
        let lengths: Vec<usize> = chunk_text(&text, &ChunkConfig::default())
            .iter()
            .map(|c| c.len())
            .collect();
        // Windows start at 0, 450 and 900.
        assert_eq!(lengths, vec![500, 500, 100]);
    }

    #[test]
    fn test_chunk_one_past_window() {
        let text = "a".repeat(501);
        let chunks = chunk_text(&text, &ChunkConfig::default());
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].len(), 51);
    }

    #[test]
    fn test_chunk_respects_multibyte_characters() {
        let config = ChunkConfig::new(4, 1).unwrap();
        let text = "éééééééééé";
        let chunks = chunk_text(text, &config);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() == 4));
    }

    #[test]
    fn test_analyze_empty_text_is_neutral() {
        let sentiment = sign_analyzer().analyze("");
        assert_eq!(sentiment, Sentiment::neutral());
    }

    #[test]
    fn test_analyze_averages_chunk_polarities() {
        // Chunk 1 is 450 '+' and 50 '-' (0.8); chunks 2 and 3 are all '-'.
        let text = format!("{}{}", "+".repeat(450), "-".repeat(550));
        let sentiment = sign_analyzer().analyze(&text);
        assert!((sentiment.polarity - (-0.4)).abs() < 1e-9);
        assert_eq!(sentiment.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_analyze_positive_text() {
        let sentiment = sign_analyzer().analyze(&"+".repeat(1200));
        assert_eq!(sentiment.polarity, 1.0);
        assert_eq!(sentiment.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_analyze_small_polarity_is_neutral() {
        // 2 '+' in 100 characters: polarity 0.02 sits inside the neutral band.
        let text = format!("{}{}", "+".repeat(2), ".".repeat(98));
        let sentiment = sign_analyzer().analyze(&text);
        assert_eq!(sentiment.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_negative_threshold_is_normalized() {
        let analyzer = SentimentAnalyzer::new(SignScorer, ChunkConfig::default(), -0.1);
        assert_eq!(analyzer.threshold(), 0.1);
    }

    #[test]
    fn test_default_analyzer_uses_lexicon() {
        let analyzer = SentimentAnalyzer::default();
        assert_eq!(analyzer.chunking().chunk_size(), 500);
        assert_eq!(analyzer.chunking().overlap(), 50);
        let sentiment = analyzer.analyze("The rescue was a great success.");
        assert_eq!(sentiment.label, SentimentLabel::Positive);
    }
}
