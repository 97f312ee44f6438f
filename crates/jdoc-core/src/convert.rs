//! Conversions between [`Node`] and Rust values.
//!
//! - [`FromNode`] is the fallible, exact extraction behind [`Node::get_typed`].
//! - `From<T> for Node` builds trees from Rust values.

use crate::error::{DocError, Result};
use crate::node::{Node, Number, Object};
use std::collections::{BTreeMap, HashMap};

/// Types that can be extracted from a [`Node`] without coercion.
pub trait FromNode: Sized {
    fn from_node(node: &Node) -> Result<Self>;
}

impl FromNode for Node {
    fn from_node(node: &Node) -> Result<Self> {
        Ok(node.clone())
    }
}

impl FromNode for bool {
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::Bool(b) => Ok(*b),
            other => Err(DocError::type_mismatch("boolean", other.kind())),
        }
    }
}

impl FromNode for String {
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::String(s) => Ok(s.clone()),
            other => Err(DocError::type_mismatch("string", other.kind())),
        }
    }
}

/// Integers accept integer nodes and integral floats that fit the target width.
macro_rules! impl_from_node_int {
    ($($ty:ty),*) => {$(
        impl FromNode for $ty {
            fn from_node(node: &Node) -> Result<Self> {
                let Node::Number(n) = node else {
                    return Err(DocError::type_mismatch(stringify!($ty), node.kind()));
                };
                let Some(wide) = n.as_integral_i128() else {
                    let found = if n.is_integral_float() {
                        format!("out-of-range integer {}", n)
                    } else {
                        format!("non-integral float {}", n)
                    };
                    return Err(DocError::type_mismatch(stringify!($ty), found));
                };
                <$ty>::try_from(wide).map_err(|_| {
                    DocError::type_mismatch(stringify!($ty), format!("out-of-range integer {}", n))
                })
            }
        }
    )*};
}

impl_from_node_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromNode for f64 {
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::Number(n) => Ok(n.as_f64()),
            other => Err(DocError::type_mismatch("f64", other.kind())),
        }
    }
}

impl FromNode for f32 {
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::Number(n) => {
                let narrowed = n.as_f64() as f32;
                if narrowed.is_finite() {
                    Ok(narrowed)
                } else {
                    Err(DocError::type_mismatch("f32", format!("out-of-range float {}", n)))
                }
            }
            other => Err(DocError::type_mismatch("f32", other.kind())),
        }
    }
}

impl FromNode for () {
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::Null => Ok(()),
            other => Err(DocError::type_mismatch("null", other.kind())),
        }
    }
}

/// `Null` becomes `None`; anything else must convert to `T`.
impl<T: FromNode> FromNode for Option<T> {
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::Null => Ok(None),
            other => T::from_node(other).map(Some),
        }
    }
}

impl<T: FromNode> FromNode for Vec<T> {
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::Array(items) => items.iter().map(T::from_node).collect(),
            other => Err(DocError::type_mismatch("array", other.kind())),
        }
    }
}

impl<T: FromNode> FromNode for BTreeMap<String, T> {
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::Object(map) => map
                .iter()
                .map(|(k, v)| Ok((k.to_string(), T::from_node(v)?)))
                .collect(),
            other => Err(DocError::type_mismatch("object", other.kind())),
        }
    }
}

impl<T: FromNode> FromNode for HashMap<String, T> {
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::Object(map) => map
                .iter()
                .map(|(k, v)| Ok((k.to_string(), T::from_node(v)?)))
                .collect(),
            other => Err(DocError::type_mismatch("object", other.kind())),
        }
    }
}

impl FromNode for Object {
    fn from_node(node: &Node) -> Result<Self> {
        match node {
            Node::Object(map) => Ok(map.clone()),
            other => Err(DocError::type_mismatch("object", other.kind())),
        }
    }
}

// ---------------------------------------------------------------------------
// Rust values -> Node
// ---------------------------------------------------------------------------

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Node {
            fn from(n: $ty) -> Self {
                Node::Number(Number::Int(n as i64))
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Node {
            fn from(n: $ty) -> Self {
                let n = n as u64;
                match i64::try_from(n) {
                    Ok(i) => Node::Number(Number::Int(i)),
                    Err(_) => Node::Number(Number::UInt(n)),
                }
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

/// Non-finite values have no JSON form and become `Null`.
impl From<f64> for Node {
    fn from(f: f64) -> Self {
        if f.is_finite() {
            Node::Number(Number::Float(f))
        } else {
            Node::Null
        }
    }
}

impl From<f32> for Node {
    fn from(f: f32) -> Self {
        Node::from(f as f64)
    }
}

impl From<Number> for Node {
    fn from(n: Number) -> Self {
        Node::Number(n)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<&String> for Node {
    fn from(s: &String) -> Self {
        Node::String(s.clone())
    }
}

impl From<()> for Node {
    fn from(_: ()) -> Self {
        Node::Null
    }
}

impl From<Object> for Node {
    fn from(map: Object) -> Self {
        Node::Object(map)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Node>> From<&[T]> for Node {
    fn from(items: &[T]) -> Self {
        Node::Array(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Null, Into::into)
    }
}

impl<V: Into<Node>> From<BTreeMap<String, V>> for Node {
    fn from(map: BTreeMap<String, V>) -> Self {
        Node::Object(map.into_iter().collect())
    }
}

/// Collects into an array.
impl<T: Into<Node>> FromIterator<T> for Node {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Node::Array(iter.into_iter().map(Into::into).collect())
    }
}
