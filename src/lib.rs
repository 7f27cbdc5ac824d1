#![deny(missing_docs)]
// Markup can be untrusted input from the internet.
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod emitter;
mod error;
mod htmlstring;
mod machine;
mod reader;
mod span;
mod state;
#[doc(hidden)]
pub mod testutils;
mod tokenizer;
mod utils;

pub use emitter::{
    Attribute, Comment, DefaultEmitter, Emitter, ErrorToken, Tag, Text, Token, TokenKind,
};
pub use error::Error;
pub use htmlstring::HtmlString;
pub use reader::{Cursor, Readable};
pub use span::Span;
pub use state::{next_state, State, RAW_TEXT_ELEMENTS};
pub use tokenizer::{tokenize, Tokenizer};
