//! Tokenizer that partitions normalized text into digit runs, whitespace,
//! single punctuation marks and words.

use once_cell::sync::Lazy;
use regex::Regex;

/// Alternation order matters: digits win over words at the same position.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<digits>\d+)|(?P<space>\s+)|(?P<punct>[^\s\w])|(?P<word>\w+)")
        .expect("token pattern is valid")
});

/// Category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Maximal run of decimal digits
    Digits,
    /// Maximal run of whitespace
    Space,
    /// One character that is neither whitespace nor a word character
    Punct,
    /// Run of word characters that does not start with a digit
    Word,
}

/// A slice of the input text with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Length in chars.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whitespace tokens are never split and never start a chunk.
    pub fn is_space(&self) -> bool {
        self.kind == TokenKind::Space
    }
}

/// Split text into an ordered, lossless sequence of tokens.
///
/// Concatenating the token texts yields the input again.
pub fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let (kind, m) = if let Some(m) = caps.name("digits") {
                (TokenKind::Digits, m)
            } else if let Some(m) = caps.name("space") {
                (TokenKind::Space, m)
            } else if let Some(m) = caps.name("punct") {
                (TokenKind::Punct, m)
            } else {
                (TokenKind::Word, caps.name("word")?)
            };
            Some(Token::new(kind, m.as_str()))
        })
        .collect()
}
