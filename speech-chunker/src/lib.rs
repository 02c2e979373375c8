//! Text chunking for text-to-speech engines.
//!
//! Many engines mishandle or truncate long utterances. This crate splits
//! arbitrary input into short fragments:
//! - whitespace is collapsed and trimmed
//! - fragments never exceed the chunk size (counted in chars)
//! - numbers longer than eight digits are read in eight-digit groups
//! - a fragment does not end on a short word head when a better break exists
//!
//! ```
//! use speech_chunker::chunk;
//!
//! assert_eq!(chunk("Hello, world!", 7), vec!["Hello,", "world!"]);
//! ```

mod assembler;
pub mod boundary;
pub mod chunker;
pub mod normalize;
pub mod split;
pub mod token;

pub use boundary::is_valid_chunk_end;
pub use chunker::{Chunker, DEFAULT_CHUNK_SIZE, Fragment, chunk};
pub use normalize::normalize;
pub use split::{MAX_NUMBER_DIGITS, split_long_token, split_number};
pub use token::{Token, TokenKind, tokenize};
