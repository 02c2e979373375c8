//! Chunker entry points: normalize, tokenize, assemble.

use crate::assembler::assemble;
use crate::normalize::normalize;
use crate::split::hard_split;
use crate::token::tokenize;

/// Default chunk size in chars.
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// An emitted fragment, as reported to a [`Chunker::chunk_with`] observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// 1-based position in the output
    pub ordinal: usize,
    /// Length in chars
    pub char_len: usize,
    pub text: &'a str,
}

/// Splits text into fragments of at most `chunk_size` chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    chunk_size: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl Chunker {
    /// Create a chunker. A chunk size below 1 is raised to 1.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Split text into fragments.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.chunk_with(text, |_| {})
    }

    /// Split text into fragments, reporting each one to `on_fragment` in order.
    pub fn chunk_with<F>(&self, text: &str, mut on_fragment: F) -> Vec<String>
    where
        F: FnMut(&Fragment<'_>),
    {
        let chunks = self.split(text);

        for (i, chunk) in chunks.iter().enumerate() {
            on_fragment(&Fragment {
                ordinal: i + 1,
                char_len: chunk.chars().count(),
                text: chunk,
            });
        }

        chunks
    }

    fn split(&self, text: &str) -> Vec<String> {
        let text = normalize(text);

        if text.is_empty() {
            return Vec::new();
        }

        // One unbroken run (hashes, URLs): fixed-width slices
        if !text.contains(' ') {
            return hard_split(&text, self.chunk_size);
        }

        assemble(tokenize(&text), self.chunk_size)
    }
}

/// Split text into TTS-friendly fragments of at most `chunk_size` chars.
///
/// A `chunk_size` of 0 is treated as 1.
pub fn chunk(text: &str, chunk_size: usize) -> Vec<String> {
    Chunker::new(chunk_size).chunk(text)
}
