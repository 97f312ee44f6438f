//! Keyed and positional access on a [`Node`].
//!
//! Two policies live side by side:
//!
//! - **Strict**: [`Node::get_key`], [`Node::get_index`], [`Node::get_typed`]
//!   return a [`DocError`] for a missing member, a bad position or the wrong
//!   variant. Use these where the shape of the document is a contract.
//! - **Lenient**: [`Node::get_or`] and the `Index` impls (`doc["key"]`,
//!   `doc[0]`) never fail. They are meant for optional fields.

use crate::convert::FromNode;
use crate::error::{DocError, Result};
use crate::node::Node;
use std::ops::Index;

static NULL: Node = Node::Null;

impl Node {
    /// Look up an object member.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` when `self` is not an object, `KeyNotFound` when the key
    /// is absent. Keys are compared case-sensitively.
    pub fn get_key(&self, key: &str) -> Result<&Node> {
        match self {
            Node::Object(map) => map.get(key).ok_or_else(|| DocError::key_not_found(key)),
            other => Err(DocError::type_mismatch("object", other.kind())),
        }
    }

    /// Mutable variant of [`Node::get_key`].
    pub fn get_key_mut(&mut self, key: &str) -> Result<&mut Node> {
        match self {
            Node::Object(map) => map.get_mut(key).ok_or_else(|| DocError::key_not_found(key)),
            other => Err(DocError::type_mismatch("object", other.kind())),
        }
    }

    /// Look up an array element.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` when `self` is not an array, `IndexOutOfRange` when
    /// `index >= len`.
    pub fn get_index(&self, index: usize) -> Result<&Node> {
        match self {
            Node::Array(items) => items.get(index).ok_or(DocError::IndexOutOfRange {
                index,
                len: items.len(),
            }),
            other => Err(DocError::type_mismatch("array", other.kind())),
        }
    }

    /// Mutable variant of [`Node::get_index`].
    pub fn get_index_mut(&mut self, index: usize) -> Result<&mut Node> {
        match self {
            Node::Array(items) => {
                let len = items.len();
                items
                    .get_mut(index)
                    .ok_or(DocError::IndexOutOfRange { index, len })
            }
            other => Err(DocError::type_mismatch("array", other.kind())),
        }
    }

    /// Extract a Rust value of type `T`.
    ///
    /// Conversions are exact: a string is never produced from a number or a
    /// boolean, and an integer is never produced from a non-integral float.
    ///
    /// ```
    /// let doc = jdoc_core::parse("[1,6,6,8]").unwrap();
    /// let numbers: Vec<i32> = doc.get_typed().unwrap();
    /// assert_eq!(numbers, vec![1, 6, 6, 8]);
    /// assert!(doc.get_typed::<String>().is_err());
    /// ```
    pub fn get_typed<T: FromNode>(&self) -> Result<T> {
        T::from_node(self)
    }

    /// Insert or replace an object member, returning the previous value.
    ///
    /// New keys append; replaced keys keep their position. A `Null` receiver
    /// is turned into an empty object first, so a document can be built up
    /// from `Node::Null`.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` when `self` is neither an object nor `Null`.
    pub fn set_key(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Result<Option<Node>> {
        if self.is_null() {
            *self = Node::Object(Default::default());
        }
        match self {
            Node::Object(map) => Ok(map.insert(key, value)),
            other => Err(DocError::type_mismatch("object", other.kind())),
        }
    }

    /// Remove an object member and return it.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` when `self` is not an object, `KeyNotFound` when absent.
    pub fn remove_key(&mut self, key: &str) -> Result<Node> {
        match self {
            Node::Object(map) => map.remove(key).ok_or_else(|| DocError::key_not_found(key)),
            other => Err(DocError::type_mismatch("object", other.kind())),
        }
    }

    /// Append to an array. A `Null` receiver becomes an empty array first.
    pub fn push(&mut self, value: impl Into<Node>) -> Result<()> {
        if self.is_null() {
            *self = Node::Array(Vec::new());
        }
        match self {
            Node::Array(items) => {
                items.push(value.into());
                Ok(())
            }
            other => Err(DocError::type_mismatch("array", other.kind())),
        }
    }

    /// Read an optional member, falling back to `default`.
    ///
    /// Returns `default` when `self` is not an object (including `Null`), when
    /// the key is absent, or when the member does not convert to `T`.
    ///
    /// ```
    /// let doc = jdoc_core::parse(r#"{"city": "London"}"#).unwrap();
    /// assert_eq!(doc.get_or("city", String::new()), "London");
    /// assert_eq!(doc.get_or("age", 0u32), 0);
    /// ```
    pub fn get_or<T: FromNode>(&self, key: &str, default: T) -> T {
        let Some(member) = self.as_object().and_then(|map| map.get(key)) else {
            return default;
        };
        match T::from_node(member) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(key, error = %err, "member did not convert, using default");
                default
            }
        }
    }
}

/// Lenient member read: any miss yields `Null`.
impl Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        self.as_object().and_then(|map| map.get(key)).unwrap_or(&NULL)
    }
}

/// Lenient element read: any miss yields `Null`.
impl Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        self.as_array().and_then(|items| items.get(index)).unwrap_or(&NULL)
    }
}
