//! Pointer-backed access into the live value tree.
//!
//! Stack frames in the parser need to mutate the container they are
//! populating while the whole tree stays observable from the root. The
//! cursor keeps one raw pointer per open container, innermost last, so slot
//! writes are O(1) without re-walking the tree.
//!
//! Safety rests on one invariant, upheld by the parser: while a child
//! container is open, its parent is never structurally mutated. Every write
//! goes through the innermost open container, so the heap storage the
//! pointers refer to cannot move underneath them.
//!
//! The root slot lives inside a synthetic one-element array so the parser's
//! base frame can address it with ordinary array indexing.
use alloc::{
    collections::BTreeSet,
    string::{String, ToString},
    vec,
    vec::Vec,
};
use core::ptr::NonNull;

use crate::value::Value;

/// Identifies the slot a container frame is currently writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot {
    Index(usize),
    Key(String),
}

/// Internal invariant violations. These indicate a parser defect, never an
/// input fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CursorError {
    ExpectedArray,
    ExpectedObject,
    MissingSlot,
    IndexOutOfBounds,
    ExitedRoot,
}

impl CursorError {
    pub(crate) fn message(self) -> &'static str {
        match self {
            CursorError::ExpectedArray => "expected an array at the open container",
            CursorError::ExpectedObject => "expected an object at the open container",
            CursorError::MissingSlot => "addressed slot does not exist",
            CursorError::IndexOutOfBounds => "array write past the next free index",
            CursorError::ExitedRoot => "exited past the root container",
        }
    }
}

#[derive(Debug)]
pub(crate) struct ValueCursor {
    /// Always `Value::Array`, holding the root slot(s). Slot 0 is the value
    /// observable through the public API.
    root: Value,
    /// One pointer per open container above the root slots, innermost last.
    open: Vec<NonNull<Value>>,
}

impl ValueCursor {
    pub(crate) fn new() -> Self {
        Self {
            root: Value::Array(vec![Value::Null]),
            open: Vec::new(),
        }
    }

    /// Discards the tree and reinstalls `root_slot` as the root value.
    pub(crate) fn reset(&mut self, root_slot: Value) {
        self.open.clear();
        self.root = Value::Array(vec![root_slot]);
    }

    /// The root value. Always present; `Null` until something is parsed.
    pub(crate) fn root_value(&self) -> &Value {
        match &self.root {
            Value::Array(slots) => slots.first().unwrap_or(&Value::Null),
            _ => &Value::Null,
        }
    }

    fn top_mut(&mut self) -> &mut Value {
        match self.open.last().copied() {
            Some(mut ptr) => unsafe { ptr.as_mut() },
            None => &mut self.root,
        }
    }

    fn top_ref(&self) -> &Value {
        match self.open.last() {
            Some(ptr) => unsafe { ptr.as_ref() },
            None => &self.root,
        }
    }

    /// The current contents of `slot`, if the slot exists.
    pub(crate) fn peek(&self, slot: &Slot) -> Option<&Value> {
        match (self.top_ref(), slot) {
            (Value::Array(arr), Slot::Index(i)) => arr.get(*i),
            (Value::Object(map), Slot::Key(k)) => map.get(k.as_str()),
            _ => None,
        }
    }

    /// Writes `value` into `slot` of the innermost open container,
    /// overwriting existing contents or appending at an array's end.
    pub(crate) fn write(&mut self, slot: &Slot, value: Value) -> Result<(), CursorError> {
        match (self.top_mut(), slot) {
            (Value::Array(arr), Slot::Index(i)) => {
                use core::cmp::Ordering;
                match i.cmp(&arr.len()) {
                    Ordering::Less => arr[*i] = value,
                    Ordering::Equal => arr.push(value),
                    Ordering::Greater => return Err(CursorError::IndexOutOfBounds),
                }
                Ok(())
            }
            (Value::Object(map), Slot::Key(k)) => {
                map.insert(k.to_string(), value);
                Ok(())
            }
            (Value::Array(_), Slot::Key(_)) => Err(CursorError::ExpectedObject),
            _ => Err(CursorError::ExpectedArray),
        }
    }

    /// Makes the container stored in `slot` the innermost open container.
    /// The slot must already hold an array or object.
    pub(crate) fn enter(&mut self, slot: &Slot) -> Result<(), CursorError> {
        let ptr = {
            let child = match (self.top_mut(), slot) {
                (Value::Array(arr), Slot::Index(i)) => arr.get_mut(*i),
                (Value::Object(map), Slot::Key(k)) => map.get_mut(k.as_str()),
                _ => None,
            }
            .ok_or(CursorError::MissingSlot)?;
            if !matches!(child, Value::Array(_) | Value::Object(_)) {
                return Err(CursorError::MissingSlot);
            }
            NonNull::from(child)
        };
        self.open.push(ptr);
        Ok(())
    }

    /// Closes the innermost open container.
    pub(crate) fn exit(&mut self) -> Result<(), CursorError> {
        self.open.pop().map(|_| ()).ok_or(CursorError::ExitedRoot)
    }

    /// Truncates the innermost open array to `len` elements.
    pub(crate) fn trim_array(&mut self, len: usize) -> Result<(), CursorError> {
        match self.top_mut() {
            Value::Array(arr) => {
                arr.truncate(len);
                Ok(())
            }
            _ => Err(CursorError::ExpectedArray),
        }
    }

    /// Drops every property of the innermost open object whose name is not
    /// in `keep`, preserving the order of the survivors.
    pub(crate) fn trim_object(&mut self, keep: &BTreeSet<String>) -> Result<(), CursorError> {
        match self.top_mut() {
            Value::Object(map) => {
                map.retain(|k, _| keep.contains(k));
                Ok(())
            }
            _ => Err(CursorError::ExpectedObject),
        }
    }
}
