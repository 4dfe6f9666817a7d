//! Pull-based adapter over an iterator of input chunks.
//!
//! [`parse`] wraps a [`Parser`] around any sequence of text chunks and
//! yields one observation per chunk plus a final one after closing. This is
//! the recommended interface for UI consumers that re-render on every
//! chunk.
//!
//! # Examples
//!
//! ```rust
//! use jsonloom::{parse, ParserOptions, Value};
//!
//! let chunks = [r#"{"a": 1, "#, r#""b": [true]}"#];
//! let last = parse(chunks, ParserOptions::default())
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap()
//!     .pop()
//!     .unwrap();
//! assert!(last.done);
//! assert!(last.root.is_object());
//! ```
use alloc::vec::Vec;

use crate::{
    error::ParserError,
    event::ParseEvent,
    options::ParserOptions,
    parser::Parser,
    value::Value,
};

/// One observation of the parse, yielded after each chunk and once more
/// after the end of input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseUpdate {
    /// A snapshot of the root value.
    pub root: Value,
    /// The events recorded since the previous observation; empty when event
    /// tracking is off.
    pub events: Vec<ParseEvent>,
    /// `true` only for the final observation, after a successful close.
    pub done: bool,
}

/// Iterator returned by [`parse`].
#[derive(Debug)]
pub struct ParseStream<I> {
    parser: Parser,
    chunks: I,
    finished: bool,
}

/// Streams `chunks` through a [`Parser`], yielding a [`ParseUpdate`] per
/// chunk and a final one (with `done = true`) after closing.
///
/// The stream fuses after the final update or the first error.
pub fn parse<I>(chunks: I, options: ParserOptions) -> ParseStream<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    ParseStream {
        parser: Parser::new(options),
        chunks: chunks.into_iter(),
        finished: false,
    }
}

impl<I> ParseStream<I> {
    fn observe(&mut self, done: bool) -> ParseUpdate {
        let events = self.parser.take_events().unwrap_or_default();
        ParseUpdate {
            root: self.parser.value().clone(),
            events,
            done,
        }
    }
}

impl<I> Iterator for ParseStream<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<ParseUpdate, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.chunks.next() {
            Some(chunk) => {
                if let Err(err) = self.parser.push(chunk.as_ref()) {
                    self.finished = true;
                    return Some(Err(err));
                }
                Some(Ok(self.observe(false)))
            }
            None => {
                self.finished = true;
                if let Err(err) = self.parser.close() {
                    return Some(Err(err));
                }
                Some(Ok(self.observe(true)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::parse;
    use crate::{options::ParserOptions, value::Value};

    #[test]
    fn yields_one_update_per_chunk_plus_final() {
        let updates: Vec<_> = parse(["[1,", "2]"], ParserOptions::default())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(updates.len(), 3);
        assert!(!updates[0].done);
        assert!(!updates[1].done);
        assert!(updates[2].done);
        assert_eq!(
            updates[2].root,
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])
        );
    }

    #[test]
    fn fuses_after_error() {
        let mut stream = parse(["[1 2]"], ParserOptions::default());
        assert!(stream.next().unwrap().is_err());
        assert!(stream.next().is_none());
    }
}
