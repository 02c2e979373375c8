//! Greedy chunk assembly over the token stream.
//!
//! Oversize tokens are expanded into pieces that each fit in an empty chunk
//! before assembly starts, so every chunk takes at least one piece and
//! parts that do not fit are carried into the next chunk.

use crate::boundary::is_valid_chunk_end;
use crate::normalize::normalize;
use crate::split::{MAX_NUMBER_DIGITS, split_long_token, split_number};
use crate::token::{Token, TokenKind};
use log::trace;

/// A token, or a slice of an oversize token, no longer than the chunk size
/// (whitespace excepted).
#[derive(Debug, Clone, PartialEq, Eq)]
struct Piece {
    kind: TokenKind,
    text: String,
    char_len: usize,
}

impl Piece {
    fn new(kind: TokenKind, text: String) -> Self {
        let char_len = text.chars().count();
        Self {
            kind,
            text,
            char_len,
        }
    }

    fn is_space(&self) -> bool {
        self.kind == TokenKind::Space
    }
}

/// Expand tokens into pieces, splitting long numbers and oversize tokens.
fn expand_pieces(tokens: Vec<Token>, chunk_size: usize) -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(tokens.len());

    for token in tokens {
        if token.is_space() {
            pieces.push(Piece::new(token.kind, token.text));
            continue;
        }

        let len = token.char_len();
        match token.kind {
            TokenKind::Digits if len > MAX_NUMBER_DIGITS => {
                for part in split_number(&token.text, MAX_NUMBER_DIGITS) {
                    if part.chars().count() > chunk_size {
                        pieces.extend(
                            split_long_token(&part, chunk_size)
                                .into_iter()
                                .map(|p| Piece::new(TokenKind::Digits, p)),
                        );
                    } else {
                        pieces.push(Piece::new(TokenKind::Digits, part));
                    }
                }
            }
            kind if len > chunk_size => {
                pieces.extend(
                    split_long_token(&token.text, chunk_size)
                        .into_iter()
                        .map(|p| Piece::new(kind, p)),
                );
            }
            kind => pieces.push(Piece::new(kind, token.text)),
        }
    }

    pieces
}

fn join(pieces: &[Piece]) -> String {
    pieces.iter().map(|p| p.text.as_str()).collect()
}

/// A cut before `next` is acceptable when the chunk passes the valid-end
/// check or the cut falls on whitespace.
fn is_valid_cut(chunk: &[Piece], next: &Piece) -> bool {
    next.is_space() || is_valid_chunk_end(&join(chunk))
}

/// Assemble chunks of at most `chunk_size` chars from a token stream.
pub(crate) fn assemble(tokens: Vec<Token>, chunk_size: usize) -> Vec<String> {
    let pieces = expand_pieces(tokens, chunk_size);
    let mut chunks = Vec::new();
    let mut index = 0;

    while index < pieces.len() {
        // No leading whitespace
        while index < pieces.len() && pieces[index].is_space() {
            index += 1;
        }

        let first = index;
        let mut length = 0;

        while index < pieces.len() && length < chunk_size {
            let piece = &pieces[index];
            if length + piece.char_len > chunk_size {
                break;
            }
            length += piece.char_len;
            index += 1;
        }

        // Back up to a valid boundary, never past the first piece
        if index < pieces.len() {
            let mut end = index;
            while end > first + 1 && !is_valid_cut(&pieces[first..end], &pieces[end]) {
                end -= 1;
            }
            if end != index {
                trace!(
                    "backed up chunk from {} to {} pieces",
                    index - first,
                    end - first
                );
            }
            index = end;
        }

        let chunk = normalize(&join(&pieces[first..index]));
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
    }

    chunks
}
