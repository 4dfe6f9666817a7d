//! The streaming JSON parser.
//!
//! [`Parser`] consumes input in arbitrarily-sized chunks and keeps the
//! decoded value tree continuously observable through [`Parser::value`]. A
//! placeholder tree can be installed before parsing to serve as a default
//! overlay, and every structural mutation can be recorded as a
//! [`ParseEvent`] for differential rendering.
//!
//! # Examples
//!
//! ```rust
//! use jsonloom::{Parser, ParserOptions};
//!
//! let mut parser = Parser::new(ParserOptions::default());
//! parser.push(r#"{"key": [null, true, 3.14]}"#).unwrap();
//! parser.close().unwrap();
//! assert!(parser.value().is_object());
//! ```
use alloc::{collections::BTreeSet, string::String, vec, vec::Vec};
use core::mem;

use crate::{
    cursor::{CursorError, Slot, ValueCursor},
    error::{ParserError, SyntaxError, SyntaxErrorKind, UsageError},
    event::{ContainerKind, ParseEvent, PathComponent},
    lexer::{Lexer, Token, TokenBuf, TokenValue},
    location::Location,
    options::{IncompleteStrings, ParserOptions},
    value::{Array, Map, Value},
};

/// The next lexical atom a container context expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    PropertyName,
    Colon,
    Value,
    Comma,
}

/// One entry on the parse stack: the container currently being populated or
/// the string currently being accumulated.
#[derive(Debug)]
enum Frame {
    Array {
        /// Slot for the next (or in-flight) element.
        index: usize,
        expected: Piece,
        is_empty: bool,
    },
    Object {
        /// The most recently consumed property name.
        key: String,
        expected: Piece,
        is_empty: bool,
        /// Property names whose values have completed.
        seen_keys: BTreeSet<String>,
    },
    Str {
        buffer: String,
    },
}

impl Frame {
    /// The synthetic base frame: a one-slot array holding the root.
    fn root() -> Self {
        Frame::Array {
            index: 0,
            expected: Piece::Value,
            is_empty: true,
        }
    }

    fn new_array() -> Self {
        Frame::Array {
            index: 0,
            expected: Piece::Value,
            is_empty: true,
        }
    }

    fn new_object() -> Self {
        Frame::Object {
            key: String::new(),
            expected: Piece::PropertyName,
            is_empty: true,
            seen_keys: BTreeSet::new(),
        }
    }
}

/// The streaming JSON parser.
///
/// A parser is constructed empty, accepts any number of [`push`] calls, and
/// terminates with exactly one [`close`]. The root value returned by
/// [`value`] is valid at every point in between, with the latest chunk
/// already reflected.
///
/// # Examples
///
/// ```rust
/// use jsonloom::{IncompleteStrings, Parser, ParserOptions, Value};
///
/// let mut parser = Parser::new(ParserOptions {
///     incomplete_strings: IncompleteStrings::WithSuffix("...".into()),
///     ..Default::default()
/// });
/// parser.push(r#"["Hello, Wor"#).unwrap();
/// assert_eq!(
///     parser.value(),
///     &Value::Array(vec![Value::String("Hello, Wor...".into())])
/// );
/// parser.push(r#"ld!"]"#).unwrap();
/// parser.close().unwrap();
/// assert_eq!(
///     parser.value(),
///     &Value::Array(vec![Value::String("Hello, World!".into())])
/// );
/// ```
///
/// [`push`]: Parser::push
/// [`close`]: Parser::close
/// [`value`]: Parser::value
#[derive(Debug)]
pub struct Parser {
    lexer: Lexer,
    tokens: TokenBuf,
    /// Parse contexts from root to the node being populated; the bottom is
    /// always the synthetic root frame.
    stack: Vec<Frame>,
    cursor: ValueCursor,
    events: Vec<ParseEvent>,
    options: ParserOptions,
    placeholder: bool,
    started: bool,
    closed: bool,
    fault: Option<SyntaxError>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl Parser {
    /// Creates a new `Parser` with the given options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::new(),
            tokens: TokenBuf::new(),
            stack: vec![Frame::root()],
            cursor: ValueCursor::new(),
            events: Vec::new(),
            options,
            placeholder: false,
            started: false,
            closed: false,
            fault: None,
        }
    }

    /// Appends a chunk of JSON text and parses it.
    ///
    /// On return the tree observable through [`Parser::value`] reflects the
    /// chunk, including — depending on
    /// [`ParserOptions::incomplete_strings`] — a string that is still
    /// mid-parse.
    ///
    /// # Errors
    ///
    /// Returns the syntax error that halted parsing, or a [`UsageError`]
    /// when the parser is already closed. After a syntax error the same
    /// error is replayed until [`Parser::reset`].
    pub fn push(&mut self, text: &str) -> Result<(), ParserError> {
        if let Some(err) = &self.fault {
            return Err(ParserError::Syntax(err.clone()));
        }
        if self.closed {
            return Err(ParserError::Usage(UsageError::PushAfterClose));
        }
        if !text.is_empty() {
            self.started = true;
        }
        let result = self.push_inner(text);
        self.record_fault(&result);
        result
    }

    /// Marks the end of input, flushing any trailing literal and validating
    /// that every container has been closed.
    ///
    /// # Errors
    ///
    /// `Unterminated string`/`object`/`array` when the input stops short,
    /// any syntax error from a trailing literal, or a [`UsageError`] when
    /// called twice.
    pub fn close(&mut self) -> Result<(), ParserError> {
        if let Some(err) = &self.fault {
            return Err(ParserError::Syntax(err.clone()));
        }
        if self.closed {
            return Err(ParserError::Usage(UsageError::AlreadyClosed));
        }
        let result = self.close_inner();
        self.record_fault(&result);
        if result.is_ok() {
            self.closed = true;
        }
        result
    }

    /// Returns the parser to its freshly-constructed state, discarding the
    /// tree, any installed placeholder, and any recorded fault.
    pub fn reset(&mut self) {
        self.lexer.reset();
        self.tokens.clear();
        self.stack.clear();
        self.stack.push(Frame::root());
        self.cursor.reset(Value::Null);
        self.events.clear();
        self.placeholder = false;
        self.started = false;
        self.closed = false;
        self.fault = None;
    }

    /// Seeds the root with a placeholder tree.
    ///
    /// While parsing descends into containers that already exist in the
    /// placeholder, their untouched entries remain visible; when a
    /// container's closing token is seen, entries not visited during the
    /// parse are trimmed away.
    ///
    /// # Errors
    ///
    /// Fails once any input has been consumed.
    pub fn set_placeholder(&mut self, value: Value) -> Result<(), UsageError> {
        if self.started {
            return Err(UsageError::PlaceholderAfterInput);
        }
        self.cursor.reset(value);
        self.placeholder = true;
        Ok(())
    }

    /// The current root value. Always valid; `Null` until input (or a
    /// placeholder) provides something else.
    #[must_use]
    pub fn value(&self) -> &Value {
        self.cursor.root_value()
    }

    /// Drains and returns the events accumulated since the last call.
    ///
    /// # Errors
    ///
    /// Fails when [`ParserOptions::track_events`] is off.
    pub fn take_events(&mut self) -> Result<Vec<ParseEvent>, UsageError> {
        if !self.options.track_events {
            return Err(UsageError::EventsNotTracked);
        }
        Ok(mem::take(&mut self.events))
    }

    fn push_inner(&mut self, text: &str) -> Result<(), ParserError> {
        for c in text.chars() {
            self.lexer
                .push_char(c, &mut self.tokens)
                .map_err(ParserError::Syntax)?;
            while let Some(token) = self.tokens.pop() {
                self.consume(token)?;
            }
        }
        self.surface_incomplete()
    }

    fn close_inner(&mut self) -> Result<(), ParserError> {
        // Surface the final partial contents before the lexer rejects an
        // unterminated string, so the tree still reflects them.
        self.surface_incomplete()?;
        self.lexer
            .close(&mut self.tokens)
            .map_err(ParserError::Syntax)?;
        while let Some(token) = self.tokens.pop() {
            self.consume(token)?;
        }
        if self.stack.len() > 1 {
            let kind = match self.stack.last() {
                Some(Frame::Object { .. }) => SyntaxErrorKind::UnterminatedObject,
                Some(Frame::Array { .. }) => SyntaxErrorKind::UnterminatedArray,
                _ => SyntaxErrorKind::UnterminatedString,
            };
            return Err(self.syntax_at(kind, self.lexer.location()));
        }
        Ok(())
    }

    fn record_fault(&mut self, result: &Result<(), ParserError>) {
        if let Err(ParserError::Syntax(err)) = result {
            self.fault = Some(err.clone());
        }
    }

    fn syntax_at(&self, kind: SyntaxErrorKind, location: Location) -> ParserError {
        ParserError::Syntax(SyntaxError::new(kind, location))
    }

    fn bug(err: CursorError) -> ParserError {
        ParserError::Bug(err.message())
    }

    // ------------------------------------------------------------------
    // Token dispatch
    // ------------------------------------------------------------------

    fn consume(&mut self, token: Token) -> Result<(), ParserError> {
        let Token { value, location } = token;
        let name = value.display_name();
        match value {
            TokenValue::Literal(lit) => self.set_value(lit.into(), location),
            TokenValue::StartObject => self.begin_container(ContainerKind::Object, location),
            TokenValue::StartArray => self.begin_container(ContainerKind::Array, location),

            TokenValue::EndObject => {
                let accepted = match self.stack.last() {
                    Some(Frame::Object {
                        expected, is_empty, ..
                    }) => {
                        let want = if *is_empty {
                            Piece::PropertyName
                        } else {
                            Piece::Comma
                        };
                        *expected == want
                    }
                    _ => false,
                };
                if accepted {
                    self.close_container()
                } else {
                    Err(self.syntax_at(SyntaxErrorKind::UnexpectedToken(name), location))
                }
            }

            TokenValue::EndArray => match self.stack.last() {
                Some(Frame::Array {
                    expected, is_empty, ..
                }) if self.stack.len() > 1 && (*is_empty || *expected != Piece::Value) => {
                    self.close_container()
                }
                _ => Err(self.syntax_at(SyntaxErrorKind::UnexpectedToken(name), location)),
            },

            TokenValue::Colon => match self.stack.last_mut() {
                Some(Frame::Object { expected, .. }) if *expected == Piece::Colon => {
                    *expected = Piece::Value;
                    Ok(())
                }
                _ => Err(self.syntax_at(SyntaxErrorKind::UnexpectedToken(name), location)),
            },

            TokenValue::Comma => match self.stack.last_mut() {
                Some(Frame::Array {
                    index, expected, ..
                }) if *expected == Piece::Comma => {
                    *index += 1;
                    *expected = Piece::Value;
                    Ok(())
                }
                Some(Frame::Object {
                    key,
                    expected,
                    seen_keys,
                    ..
                }) if *expected == Piece::Comma => {
                    seen_keys.insert(key.clone());
                    *expected = Piece::PropertyName;
                    Ok(())
                }
                _ => Err(self.syntax_at(SyntaxErrorKind::UnexpectedToken(name), location)),
            },

            TokenValue::StartString => {
                let accepted = matches!(
                    self.stack.last(),
                    Some(Frame::Object {
                        expected: Piece::PropertyName | Piece::Value,
                        ..
                    }) | Some(Frame::Array {
                        expected: Piece::Value,
                        ..
                    })
                );
                if accepted {
                    self.stack.push(Frame::Str {
                        buffer: String::new(),
                    });
                    Ok(())
                } else {
                    Err(self.syntax_at(SyntaxErrorKind::UnexpectedToken(name), location))
                }
            }

            TokenValue::StringChunk(s) => match self.stack.last_mut() {
                Some(Frame::Str { buffer }) => {
                    buffer.push_str(&s);
                    Ok(())
                }
                _ => Err(ParserError::Bug("string chunk outside string context")),
            },

            TokenValue::EndString(s) => {
                let Some(Frame::Str { mut buffer }) = self.stack.pop() else {
                    return Err(ParserError::Bug("string end outside string context"));
                };
                buffer.push_str(&s);
                match self.stack.last_mut() {
                    Some(Frame::Object { key, expected, .. })
                        if *expected == Piece::PropertyName =>
                    {
                        *key = buffer;
                        *expected = Piece::Colon;
                        Ok(())
                    }
                    _ => self.set_value(Value::String(buffer), location),
                }
            }
        }
    }

    /// Writes `value` into the slot designated by the top container frame.
    fn set_value(&mut self, value: Value, location: Location) -> Result<(), ParserError> {
        if !self.expects_value() {
            return Err(self.syntax_at(SyntaxErrorKind::UnexpectedValue, location));
        }
        if self.options.track_events {
            let path = self.slot_path();
            self.events.push(ParseEvent::Set {
                path,
                value: value.clone(),
            });
        }
        let slot = self
            .top_slot()
            .ok_or(ParserError::Bug("value outside any container frame"))?;
        self.cursor.write(&slot, value).map_err(Self::bug)?;
        self.mark_filled();
        Ok(())
    }

    /// Opens a container in the current slot, reusing a compatible
    /// placeholder value so its untouched entries stay visible.
    fn begin_container(
        &mut self,
        kind: ContainerKind,
        location: Location,
    ) -> Result<(), ParserError> {
        if !self.expects_value() {
            return Err(self.syntax_at(SyntaxErrorKind::UnexpectedValue, location));
        }
        let slot = self
            .top_slot()
            .ok_or(ParserError::Bug("container outside any container frame"))?;
        let reuse = self.placeholder
            && matches!(
                (kind, self.cursor.peek(&slot)),
                (ContainerKind::Array, Some(Value::Array(_)))
                    | (ContainerKind::Object, Some(Value::Object(_)))
            );
        if !reuse {
            let fresh = match kind {
                ContainerKind::Array => Value::Array(Array::new()),
                ContainerKind::Object => Value::Object(Map::default()),
            };
            self.cursor.write(&slot, fresh).map_err(Self::bug)?;
        }
        if self.options.track_events {
            let path = self.slot_path();
            self.events.push(ParseEvent::Begin { path, kind });
        }
        self.mark_filled();
        self.cursor.enter(&slot).map_err(Self::bug)?;
        self.stack.push(match kind {
            ContainerKind::Array => Frame::new_array(),
            ContainerKind::Object => Frame::new_object(),
        });
        Ok(())
    }

    /// Closes the top container: normalizes its bookkeeping, trims
    /// placeholder leftovers, and pops the frame.
    fn close_container(&mut self) -> Result<(), ParserError> {
        let path = self
            .options
            .track_events
            .then(|| self.container_path());
        match self.stack.last_mut() {
            Some(Frame::Array {
                index, is_empty, ..
            }) => {
                if !*is_empty {
                    *index += 1;
                }
                if self.placeholder {
                    self.cursor.trim_array(*index).map_err(Self::bug)?;
                }
            }
            Some(Frame::Object {
                key,
                is_empty,
                seen_keys,
                ..
            }) => {
                if !*is_empty {
                    seen_keys.insert(mem::take(key));
                }
                if self.placeholder {
                    self.cursor.trim_object(seen_keys).map_err(Self::bug)?;
                }
            }
            _ => return Err(ParserError::Bug("close on a non-container frame")),
        }
        self.stack.pop();
        self.cursor.exit().map_err(Self::bug)?;
        if let Some(path) = path {
            self.events.push(ParseEvent::End { path });
        }
        Ok(())
    }

    /// At a chunk boundary (and at close), writes an in-flight string value
    /// into its destination slot. Does not advance `expected` and emits no
    /// events; the next token overwrites.
    fn surface_incomplete(&mut self) -> Result<(), ParserError> {
        if matches!(self.options.incomplete_strings, IncompleteStrings::Off) {
            return Ok(());
        }
        if let Some(token) = self.lexer.flush_string() {
            self.consume(token)?;
        }
        let n = self.stack.len();
        let Some(Frame::Str { buffer }) = self.stack.last() else {
            return Ok(());
        };
        // A property name in flight is not a value; it stays invisible.
        if matches!(
            self.stack.get(n - 2),
            Some(Frame::Object {
                expected: Piece::PropertyName,
                ..
            })
        ) {
            return Ok(());
        }
        let suffix = match &self.options.incomplete_strings {
            IncompleteStrings::WithSuffix(s) => s.as_str(),
            _ => "",
        };
        let mut text = String::with_capacity(buffer.len() + suffix.len());
        text.push_str(buffer);
        text.push_str(suffix);
        let slot = match self.stack.get(n - 2) {
            Some(Frame::Array { index, .. }) => Slot::Index(*index),
            Some(Frame::Object { key, .. }) => Slot::Key(key.clone()),
            _ => return Err(ParserError::Bug("string context without a parent container")),
        };
        self.cursor
            .write(&slot, Value::String(text))
            .map_err(Self::bug)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Frame helpers
    // ------------------------------------------------------------------

    fn expects_value(&self) -> bool {
        matches!(
            self.stack.last(),
            Some(
                Frame::Array {
                    expected: Piece::Value,
                    ..
                } | Frame::Object {
                    expected: Piece::Value,
                    ..
                }
            )
        )
    }

    /// The slot the top container frame is currently writing.
    fn top_slot(&self) -> Option<Slot> {
        match self.stack.last()? {
            Frame::Array { index, .. } => Some(Slot::Index(*index)),
            Frame::Object { key, .. } => Some(Slot::Key(key.clone())),
            Frame::Str { .. } => None,
        }
    }

    fn mark_filled(&mut self) {
        if let Some(
            Frame::Array {
                expected, is_empty, ..
            }
            | Frame::Object {
                expected, is_empty, ..
            },
        ) = self.stack.last_mut()
        {
            *expected = Piece::Comma;
            *is_empty = false;
        }
    }

    /// Path to the slot the top frame is writing. The synthetic base frame
    /// contributes nothing, so the root slot's path is empty.
    fn slot_path(&self) -> Vec<PathComponent> {
        self.stack[1..]
            .iter()
            .filter_map(Self::frame_component)
            .collect()
    }

    /// Path of the container the top frame populates.
    fn container_path(&self) -> Vec<PathComponent> {
        let n = self.stack.len();
        self.stack[1..n - 1]
            .iter()
            .filter_map(Self::frame_component)
            .collect()
    }

    fn frame_component(frame: &Frame) -> Option<PathComponent> {
        match frame {
            Frame::Array { index, .. } => Some(PathComponent::Index(*index)),
            Frame::Object { key, .. } => Some(PathComponent::Key(key.clone())),
            Frame::Str { .. } => None,
        }
    }
}
