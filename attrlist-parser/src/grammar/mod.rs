//! Tokenizing and parsing.
//!
//! Constructs are functions over a [`Tokenizer`] that emit enter/exit events
//! for labeled source spans; `tree_builder` folds the events of a matched
//! construct into tree nodes. The document driver stitches block and inline
//! scanning together.

pub(crate) mod cursor;
pub(crate) mod definition;
mod document;
pub(crate) mod inline;
mod list;
mod name;
mod text;
mod token;
mod tokenizer;

pub(crate) use document::parse_document;
pub(crate) use token::{EventKind, TokenKind};
pub(crate) use tokenizer::Tokenizer;
