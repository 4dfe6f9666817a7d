//! Streaming, incremental JSON parsing with a continuously observable value
//! tree.
//!
//! Input arrives in arbitrarily-sized text chunks; after every chunk the
//! root value returned by [`Parser::value`] already reflects it. Strings
//! that are mid-parse can be surfaced as partial values, a placeholder tree
//! can be installed as a default overlay, and every structural mutation can
//! be recorded as a [`ParseEvent`].

#![no_std]
#![allow(missing_docs)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod chunk_utils;
mod cursor;
mod error;
mod escape_buffer;
mod event;
mod lexer;
mod location;
mod options;
mod parser;
mod stream;
mod value;

pub use chunk_utils::{chunks_of, prefixes_of};
pub use error::{ParserError, SyntaxError, SyntaxErrorKind, UsageError};
pub use event::{ContainerKind, ParseEvent, PathComponent};
pub use location::Location;
pub use options::{IncompleteStrings, ParserOptions};
pub use parser::Parser;
pub use stream::{parse, ParseStream, ParseUpdate};
pub use value::{Array, Map, Value};
