//! Text normalization and tokenization.
//!
//! Every metric works from the same [`TokenizedText`]: the lower-cased,
//! punctuation-stripped text plus its sentence and word sequences. There is
//! no abbreviation handling: `e.g.` ends a sentence.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DetectionError, DetectionResult};

/// Minimum number of characters (after trimming) required to attempt scoring.
pub const MIN_TEXT_CHARS: usize = 10;

/// Minimum number of words required for a reliable score.
pub const MIN_WORDS: usize = 5;

/// Minimum number of sentences required for a reliable score.
pub const MIN_SENTENCES: usize = 1;

/// Characters that survive normalization: letters, numbers, underscore,
/// whitespace, and the three sentence terminators.
///
/// Narrower than the regex crate's `\w`, which also keeps combining marks
/// and connector punctuation.
static STRIP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_\s.!?]").expect("valid regex"));

/// One or more consecutive sentence terminators.
static TERMINATOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Tokenized view of an input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedText {
    /// Lower-cased text with disallowed characters removed.
    pub normalized: String,
    /// Trimmed, non-empty sentences in document order.
    pub sentences: Vec<String>,
    /// Whitespace-delimited words in document order.
    ///
    /// Terminators stay attached to the word they follow (`"sat."`).
    pub words: Vec<String>,
}

/// Lower-case `text` and strip everything except word characters,
/// whitespace, `.`, `!` and `?`.
pub fn normalize(text: &str) -> String {
    STRIP_PATTERN
        .replace_all(&text.to_lowercase(), "")
        .into_owned()
}

/// Split normalized text on runs of `.`, `!` and `?`, dropping empty pieces.
pub fn split_sentences(normalized: &str) -> Vec<String> {
    TERMINATOR_PATTERN
        .split(normalized)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split normalized text on whitespace.
pub fn extract_words(normalized: &str) -> Vec<String> {
    normalized
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Normalize and tokenize `text`, enforcing the minimum-size preconditions.
///
/// # Errors
///
/// - [`DetectionError::TooShort`] if the trimmed input has fewer than
///   [`MIN_TEXT_CHARS`] characters.
/// - [`DetectionError::Unreliable`] if normalization leaves fewer than
///   [`MIN_SENTENCES`] sentences or fewer than [`MIN_WORDS`] words.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn tokenize(text: &str) -> DetectionResult<TokenizedText> {
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return Err(DetectionError::TooShort);
    }

    let normalized = normalize(text);
    let sentences = split_sentences(&normalized);
    let words = extract_words(&normalized);

    if sentences.len() < MIN_SENTENCES || words.len() < MIN_WORDS {
        tracing::debug!(
            sentences = sentences.len(),
            words = words.len(),
            "not enough material to score"
        );
        return Err(DetectionError::Unreliable);
    }

    Ok(TokenizedText {
        normalized,
        sentences,
        words,
    })
}
