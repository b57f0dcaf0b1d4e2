//! Single-pass tokenizer for JSON text. Hands each token to a visitor (or yields it from
//! an iterator) as soon as it is recognized: `{`, `}`, `[`, `]`, `:`, `,`, `true`, `false`,
//! `null`, strings and numbers. No value tree is built.
//!
//! String and number tokens carry a [`TextSpan`]. When the input is an in-memory slice the
//! span borrows from it and nothing is copied. When the input is a single-pass iterator,
//! e.g. bytes coming from a reader, the text is collected into an owned buffer instead.
//! Which of the two happens is decided by the cursor type, see [`Cursor`].
//!
//! String text is the content between the quotes with escape sequences left exactly as
//! written. Number text is the literal as it appears in the input.
//!
//! ```
//! use json_tokenizer::{tokenize, tokenize_stream, Token};
//!
//! # fn main() {
//!     let s = r#"{"key1": 1234, "key2": [true]}"#;
//!     let mut tokens = Vec::new();
//!     tokenize(s, |token| tokens.push(token)).unwrap();
//!     assert_eq!(tokens[0], Token::ObjectBegin);
//!     assert_eq!(tokens[1].to_string(), r#""key1""#);
//!     assert_eq!(tokens[3].to_string(), "1234");
//!     assert_eq!(tokens.len(), 11);
//!
//!     // Stop after the first string.
//!     let mut first = None;
//!     let result = tokenize_stream(s.bytes(), |token| match token {
//!         Token::String(text) => {
//!             first = Some(text.to_string());
//!             false
//!         }
//!         _ => true,
//!     });
//!     assert!(result.is_err());
//!     assert_eq!(first.as_deref(), Some("key1"));
//! # }
//! ```

mod chars;
mod cursor;
mod error;
mod options;
mod token;
mod tokenizer;
mod visitor;

pub use chars::JsonChar;
pub use cursor::*;
pub use error::*;
pub use options::TokenizerOptions;
pub use token::*;
pub use tokenizer::*;
pub use visitor::*;
