//! The character-driven lexer.
//!
//! [`Lexer`] consumes one code point at a time and emits zero, one, or two
//! [`Token`]s per character into a fixed two-slot output area. Two tokens
//! arise only when a character both terminates a pending literal and is
//! itself structural, e.g. the `}` in `{"n":1}`; the literal is always
//! emitted first.
//!
//! String content is emitted under one convention: [`Lexer::flush_string`]
//! produces a [`TokenValue::StringChunk`] with whatever has accumulated
//! since the last emission (the parser calls it at chunk boundaries), and
//! the closing quote produces a [`TokenValue::EndString`] carrying the final
//! remaining content, which may be empty. The concatenation of all chunk and
//! end payloads is the decoded string.
use alloc::string::String;
use core::mem;

use crate::{
    error::{SyntaxError, SyntaxErrorKind},
    escape_buffer::{Step, UnicodeEscapeBuffer},
    location::Location,
    value::Value,
};

/// A decoded `null`, boolean, or number literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
}

impl From<LiteralValue> for Value {
    fn from(lit: LiteralValue) -> Self {
        match lit {
            LiteralValue::Null => Value::Null,
            LiteralValue::Boolean(b) => Value::Boolean(b),
            LiteralValue::Number(n) => Value::Number(n),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenValue {
    Literal(LiteralValue),
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Colon,
    Comma,
    StartString,
    StringChunk(String),
    EndString(String),
}

impl TokenValue {
    /// The lexical display used in `Unexpected token` messages.
    pub(crate) fn display_name(&self) -> &'static str {
        match self {
            TokenValue::Literal(_) => "literal value",
            TokenValue::StartObject => "{",
            TokenValue::EndObject => "}",
            TokenValue::StartArray => "[",
            TokenValue::EndArray => "]",
            TokenValue::Colon => ":",
            TokenValue::Comma => ",",
            TokenValue::StartString | TokenValue::EndString(_) => "\"",
            TokenValue::StringChunk(_) => "string chunk",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub value: TokenValue,
    pub location: Location,
}

/// Fixed-capacity output area for the at most two tokens one character can
/// produce. Reused across calls so lexing never allocates per character.
#[derive(Debug, Default)]
pub(crate) struct TokenBuf {
    slots: [Option<Token>; 2],
}

impl TokenBuf {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn pop(&mut self) -> Option<Token> {
        if let Some(tok) = self.slots[0].take() {
            return Some(tok);
        }
        self.slots[1].take()
    }

    pub(crate) fn clear(&mut self) {
        self.slots = [None, None];
    }

    fn push(&mut self, token: Token) {
        if self.slots[0].is_none() {
            self.slots[0] = Some(token);
        } else {
            debug_assert!(self.slots[1].is_none(), "token buffer overflow");
            self.slots[1] = Some(token);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Main,
    String,
    Escape,
    UnicodeEscape,
}

#[derive(Debug)]
pub(crate) struct Lexer {
    mode: Mode,
    string_buffer: String,
    literal_buffer: String,
    literal_start: Location,
    unicode: UnicodeEscapeBuffer,
    location: Location,
    last_char_is_cr: bool,
}

impl Lexer {
    pub(crate) fn new() -> Self {
        Self {
            mode: Mode::Main,
            string_buffer: String::new(),
            literal_buffer: String::new(),
            literal_start: Location::default(),
            unicode: UnicodeEscapeBuffer::new(),
            location: Location::default(),
            last_char_is_cr: false,
        }
    }

    /// The position of the most recently consumed character.
    pub(crate) fn location(&self) -> Location {
        self.location
    }

    /// Consumes one code point, emitting any resulting tokens into `out`.
    pub(crate) fn push_char(&mut self, c: char, out: &mut TokenBuf) -> Result<(), SyntaxError> {
        self.advance(c);
        match self.mode {
            Mode::Main => self.lex_main(c, out),
            Mode::String => {
                self.lex_string(c, out);
                Ok(())
            }
            Mode::Escape => self.lex_escape(c),
            Mode::UnicodeEscape => self.lex_unicode_escape(c),
        }
    }

    /// Emits the string content accumulated since the last emission, if any.
    ///
    /// Called at chunk boundaries so partially received strings can be
    /// observed in the tree.
    pub(crate) fn flush_string(&mut self) -> Option<Token> {
        if self.mode == Mode::Main || self.string_buffer.is_empty() {
            return None;
        }
        let fragment = mem::take(&mut self.string_buffer);
        Some(Token {
            value: TokenValue::StringChunk(fragment),
            location: self.location,
        })
    }

    /// Flushes any pending literal; fails when the input ends inside a
    /// string.
    pub(crate) fn close(&mut self, out: &mut TokenBuf) -> Result<(), SyntaxError> {
        if self.mode != Mode::Main {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnterminatedString,
                self.location,
            ));
        }
        self.flush_literal(out)
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advances the location bookkeeping for `c`, before classification.
    /// `\r\n` counts as a single line break.
    fn advance(&mut self, c: char) {
        self.location.index += 1;
        self.location.column += 1;
        match c {
            '\r' => {
                self.location.line += 1;
                self.location.column = 0;
                self.last_char_is_cr = true;
            }
            '\n' => {
                if !self.last_char_is_cr {
                    self.location.line += 1;
                    self.location.column = 0;
                }
                self.last_char_is_cr = false;
            }
            _ => self.last_char_is_cr = false,
        }
    }

    fn lex_main(&mut self, c: char, out: &mut TokenBuf) -> Result<(), SyntaxError> {
        match c {
            '{' | '}' | '[' | ']' | ',' | ':' => {
                self.flush_literal(out)?;
                let value = match c {
                    '{' => TokenValue::StartObject,
                    '}' => TokenValue::EndObject,
                    '[' => TokenValue::StartArray,
                    ']' => TokenValue::EndArray,
                    ',' => TokenValue::Comma,
                    _ => TokenValue::Colon,
                };
                out.push(Token {
                    value,
                    location: self.location,
                });
                Ok(())
            }
            '"' => {
                self.flush_literal(out)?;
                self.mode = Mode::String;
                self.string_buffer.clear();
                out.push(Token {
                    value: TokenValue::StartString,
                    location: self.location,
                });
                Ok(())
            }
            ' ' | '\t' | '\r' | '\n' => self.flush_literal(out),
            _ => {
                if self.literal_buffer.is_empty() {
                    self.literal_start = self.location;
                }
                self.literal_buffer.push(c);
                Ok(())
            }
        }
    }

    fn lex_string(&mut self, c: char, out: &mut TokenBuf) {
        match c {
            '\\' => self.mode = Mode::Escape,
            '"' => {
                let rest = mem::take(&mut self.string_buffer);
                out.push(Token {
                    value: TokenValue::EndString(rest),
                    location: self.location,
                });
                self.mode = Mode::Main;
            }
            // Raw control characters (including line breaks) are carried
            // through unmodified.
            _ => self.string_buffer.push(c),
        }
    }

    fn lex_escape(&mut self, c: char) -> Result<(), SyntaxError> {
        let decoded = match c {
            '"' | '\\' | '/' => c,
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                self.unicode.reset();
                self.mode = Mode::UnicodeEscape;
                return Ok(());
            }
            _ => {
                let mut text = String::new();
                text.push(c);
                return Err(SyntaxError::new(
                    SyntaxErrorKind::IllegalEscapeSequence(text),
                    self.location,
                ));
            }
        };
        self.string_buffer.push(decoded);
        self.mode = Mode::String;
        Ok(())
    }

    fn lex_unicode_escape(&mut self, c: char) -> Result<(), SyntaxError> {
        match self.unicode.feed(c) {
            Step::Pending => Ok(()),
            Step::Decoded(ch) => {
                self.string_buffer.push(ch);
                self.mode = Mode::String;
                Ok(())
            }
            Step::Invalid => {
                let mut text = String::from("u");
                text.push_str(&self.unicode.payload());
                Err(SyntaxError::new(
                    SyntaxErrorKind::IllegalEscapeSequence(text),
                    self.location,
                ))
            }
        }
    }

    /// Decodes and emits the pending literal, if any. Errors are reported at
    /// the literal's start location.
    fn flush_literal(&mut self, out: &mut TokenBuf) -> Result<(), SyntaxError> {
        if self.literal_buffer.is_empty() {
            return Ok(());
        }
        let text = mem::take(&mut self.literal_buffer);
        let value = match text.as_str() {
            "null" => LiteralValue::Null,
            "true" => LiteralValue::Boolean(true),
            "false" => LiteralValue::Boolean(false),
            _ => match text.parse::<f64>() {
                Ok(n) if n.is_finite() => LiteralValue::Number(n),
                _ => {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::UnknownLiteral(text),
                        self.literal_start,
                    ));
                }
            },
        };
        out.push(Token {
            value: TokenValue::Literal(value),
            location: self.literal_start,
        });
        Ok(())
    }
}
