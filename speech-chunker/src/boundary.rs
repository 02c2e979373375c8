//! Valid-chunk-end predicate.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shortest trailing run accepted as a chunk end.
const MIN_TRAILING_RUN: usize = 4;

static TRAILING_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+|\w+|[^\s\w])$").expect("trailing run pattern is valid"));

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s\w]$").expect("punctuation pattern is valid"));

/// Whether a chunk may end here without cutting a short word head.
///
/// True for an empty chunk, a chunk ending in punctuation or whitespace,
/// or one whose trailing word/number run is at least four chars long.
pub fn is_valid_chunk_end(chunk: &str) -> bool {
    let Some(last) = chunk.chars().last() else {
        return true;
    };

    let mut buf = [0u8; 4];
    if PUNCTUATION.is_match(last.encode_utf8(&mut buf)) {
        return true;
    }

    match TRAILING_RUN.find(chunk) {
        Some(m) => m.as_str().chars().count() >= MIN_TRAILING_RUN,
        // Nothing captured: the chunk ends in whitespace
        None => true,
    }
}
