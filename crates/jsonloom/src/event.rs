//! Structural mutation events and value paths.
//!
//! When event tracking is enabled, the parser appends one [`ParseEvent`] per
//! tree mutation: `Begin` when a container opens, `Set` when a scalar is
//! assigned, `End` when a container closes. Replaying the log against an
//! empty root reproduces the final tree, which makes the log suitable for
//! differential rendering.
use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::value::Value;

/// A component in the path from the root to a value.
///
/// # Examples
///
/// ```
/// use jsonloom::PathComponent;
///
/// let key = PathComponent::Key("foo".to_string());
/// assert_eq!(key.as_key(), Some("foo"));
///
/// let idx = PathComponent::Index(3);
/// assert_eq!(idx.as_index(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    Key(String),
    Index(usize),
}

impl From<&str> for PathComponent {
    fn from(s: &str) -> Self {
        Self::Key(s.to_string())
    }
}

impl From<String> for PathComponent {
    fn from(s: String) -> Self {
        Self::Key(s)
    }
}

impl From<usize> for PathComponent {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl PathComponent {
    /// Returns the index if this component addresses an array element.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        if let Self::Index(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    /// Returns the key if this component addresses an object property.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        if let Self::Key(k) = self {
            Some(k)
        } else {
            None
        }
    }
}

// A `Vec<PathComponent>` serializes as e.g. `["foo", 0, "bar"]` instead of
// the default tagged representation.
#[cfg(feature = "serde")]
mod serde_impls {
    use alloc::string::String;
    use core::fmt;

    use serde::{
        de::{Error, Unexpected, Visitor},
        Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::PathComponent;

    impl Serialize for PathComponent {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                PathComponent::Key(k) => serializer.serialize_str(k),
                PathComponent::Index(i) => serializer.serialize_u64(*i as u64),
            }
        }
    }

    struct PathComponentVisitor;

    impl Visitor<'_> for PathComponentVisitor {
        type Value = PathComponent;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or unsigned integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            use alloc::string::ToString;
            Ok(PathComponent::Key(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(PathComponent::Key(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            #[allow(clippy::cast_possible_truncation)]
            Ok(PathComponent::Index(value as usize))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            usize::try_from(value)
                .map(PathComponent::Index)
                .map_err(|_| Error::invalid_value(Unexpected::Signed(value), &"non-negative index"))
        }
    }

    impl<'de> Deserialize<'de> for PathComponent {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(PathComponentVisitor)
        }
    }
}

/// Which kind of container a `Begin` event opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainerKind {
    Array,
    Object,
}

/// One structural mutation applied to the value tree.
///
/// The path is captured at the moment of emission; ordering matches the
/// structural traversal of the input.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    /// A container was opened at `path`.
    Begin {
        path: Vec<PathComponent>,
        kind: ContainerKind,
    },
    /// A scalar was assigned at `path`.
    Set {
        path: Vec<PathComponent>,
        value: Value,
    },
    /// The container at `path` was closed.
    End { path: Vec<PathComponent> },
}

impl ParseEvent {
    /// The path the event applies to.
    #[must_use]
    pub fn path(&self) -> &[PathComponent] {
        match self {
            Self::Begin { path, .. } | Self::Set { path, .. } | Self::End { path } => path,
        }
    }
}
