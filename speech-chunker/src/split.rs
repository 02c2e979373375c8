//! Fixed-width splitters for oversize tokens.

/// Longest digit run read as a single number.
pub const MAX_NUMBER_DIGITS: usize = 8;

/// Split a digit run into consecutive parts of at most `max_digits` digits.
pub fn split_number(digits: &str, max_digits: usize) -> Vec<String> {
    hard_split(digits, max_digits)
}

/// Split a token into consecutive slices of at most `chunk_size` chars.
pub fn split_long_token(token: &str, chunk_size: usize) -> Vec<String> {
    hard_split(token, chunk_size)
}

/// Hard split text at exact char positions.
pub(crate) fn hard_split(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();

    chars
        .chunks(width)
        .map(|part| part.iter().collect())
        .collect()
}
