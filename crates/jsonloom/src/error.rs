//! Error types surfaced by the parser.
//!
//! Faults come in two families: [`SyntaxError`] describes malformed input
//! and always carries the [`Location`] of the offending character (or, for a
//! bad literal, the literal's start). [`UsageError`] describes API misuse
//! and is independent of the input. [`ParserError`] is the union returned by
//! the streaming entry points.
use alloc::string::String;

use thiserror::Error;

use crate::location::Location;

/// A fault in the JSON input.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {location}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub location: Location,
}

impl SyntaxError {
    pub(crate) fn new(kind: SyntaxErrorKind, location: Location) -> Self {
        Self { kind, location }
    }

    /// The human-readable message without the location suffix.
    #[must_use]
    pub fn message(&self) -> String {
        use alloc::string::ToString;
        self.kind.to_string()
    }
}

/// What went wrong, rendering to the canonical message text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxErrorKind {
    /// A structurally valid token arrived where the grammar does not allow
    /// it. The payload is the token's lexical display.
    #[error("Unexpected token: \"{0}\"")]
    UnexpectedToken(&'static str),
    /// A value arrived in a slot that does not expect one.
    #[error("Unexpected value")]
    UnexpectedValue,
    /// A bare literal that is neither `null`, `true`, `false`, nor a finite
    /// number.
    #[error("Unknown literal value: {0}")]
    UnknownLiteral(String),
    /// A backslash escape the grammar does not define, including malformed
    /// `\uXXXX` payloads (reported as e.g. `\uzzzz`).
    #[error("Illegal escape sequence: \\{0}")]
    IllegalEscapeSequence(String),
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Unterminated object")]
    UnterminatedObject,
    #[error("Unterminated array")]
    UnterminatedArray,
}

/// API misuse, unambiguous and without a source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("input pushed after close")]
    PushAfterClose,
    #[error("parser already closed")]
    AlreadyClosed,
    #[error("placeholder installed after parsing started")]
    PlaceholderAfterInput,
    #[error("event tracking is not enabled")]
    EventsNotTracked,
}

/// Any fault reported by [`Parser::push`] or [`Parser::close`].
///
/// [`Parser::push`]: crate::Parser::push
/// [`Parser::close`]: crate::Parser::close
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParserError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Usage(#[from] UsageError),
    /// A violated internal invariant. If this ever surfaces, it is a defect
    /// in the parser, not in the input.
    #[error("internal parser defect: {0}")]
    Bug(&'static str),
}
