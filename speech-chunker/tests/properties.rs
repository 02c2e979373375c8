use proptest::prelude::*;
use speech_chunker::{TokenKind, chunk, is_valid_chunk_end, normalize, tokenize};

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn mixed_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ,.!?:;'()\\-\t\n]{0,300}",
        "[а-яА-Яё0-9 ,.!?\u{00a0}]{0,200}",
        prop::collection::vec("[a-z]{1,20}|[0-9]{1,30}|[,.!?]| {1,3}", 0..40)
            .prop_map(|parts| parts.concat()),
        any::<String>(),
    ]
}

/// Text built from short words, where whole-word cuts fail the trailing-run check.
fn short_word_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![4 => "[a-z]{1,5}", 1 => "[0-9]{1,3}", 1 => "[,.!?]"], 1..40)
        .prop_map(|parts| parts.join(" "))
}

/// A forced cut keeps only the chunk's first piece: one punctuation mark, or a
/// run of word characters taken from a single token.
fn is_single_piece(chunk: &str) -> bool {
    let tokens = tokenize(chunk);
    match tokens.as_slice() {
        [token] if token.kind == TokenKind::Punct => true,
        _ => tokens
            .iter()
            .all(|t| matches!(t.kind, TokenKind::Digits | TokenKind::Word)),
    }
}

/// Every non-final chunk ends validly, is cut before a space, or is a forced
/// single-piece cut.
fn check_chunk_ends(text: &str, size: usize) -> Result<(), TestCaseError> {
    let normalized = normalize(text);
    // Text without spaces is sliced at fixed width instead
    if !normalized.contains(' ') {
        return Ok(());
    }

    let chunks = chunk(text, size);
    let mut rest = normalized.as_str();
    for (i, c) in chunks.iter().enumerate() {
        rest = rest.strip_prefix(' ').unwrap_or(rest);
        prop_assert!(rest.starts_with(c.as_str()), "{:?} not found at {:?}", c, rest);
        rest = &rest[c.len()..];

        if i + 1 == chunks.len() {
            break;
        }
        prop_assert!(
            is_valid_chunk_end(c) || rest.starts_with(' ') || is_single_piece(c),
            "bad cut after {:?} in {:?}",
            c,
            chunks
        );
    }
    Ok(())
}

/// Words of four or more letters and punctuation: every boundary is valid.
fn prose_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![4 => "[a-z]{4,10}", 1 => "[,.!?]"], 1..60)
        .prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn prop_chunks_respect_length_bound(text in mixed_text(), size in 1usize..40) {
        for c in chunk(&text, size) {
            prop_assert!(c.chars().count() <= size, "{:?} exceeds {}", c, size);
        }
    }

    #[test]
    fn prop_chunks_have_clean_whitespace(text in mixed_text(), size in 1usize..40) {
        for c in chunk(&text, size) {
            prop_assert!(!c.is_empty());
            prop_assert!(!c.starts_with(char::is_whitespace));
            prop_assert!(!c.ends_with(char::is_whitespace));
            prop_assert!(!c.contains("  "));
            prop_assert!(c.chars().all(|ch| ch == ' ' || !ch.is_whitespace()));
        }
    }

    #[test]
    fn prop_content_and_order_preserved(text in mixed_text(), size in 1usize..40) {
        let joined = chunk(&text, size).concat();
        prop_assert_eq!(strip_whitespace(&joined), strip_whitespace(&normalize(&text)));
    }

    #[test]
    fn prop_normalize_idempotent(text in any::<String>()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn prop_no_space_input_sliced_exactly(text in "[a-zA-Z0-9,.:/]{1,200}", size in 1usize..30) {
        let chunks = chunk(&text, size);
        let (last, rest) = chunks.split_last().expect("non-empty input yields chunks");
        for c in rest {
            prop_assert_eq!(c.chars().count(), size);
        }
        prop_assert!(last.chars().count() <= size);
        prop_assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn prop_cuts_fall_on_valid_boundaries(text in mixed_text(), size in 1usize..40) {
        check_chunk_ends(&text, size)?;
    }

    #[test]
    fn prop_short_words_cut_on_whitespace(text in short_word_text(), size in 1usize..20) {
        check_chunk_ends(&text, size)?;
    }

    #[test]
    fn prop_non_final_chunks_end_validly(text in prose_text(), size in 10usize..60) {
        let chunks = chunk(&text, size);
        if let Some((_, rest)) = chunks.split_last() {
            for c in rest {
                prop_assert!(is_valid_chunk_end(c), "invalid end: {:?}", c);
            }
        }
    }
}
