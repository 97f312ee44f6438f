//! The document tree: [`Node`], [`Number`] and the insertion-ordered [`Object`].

use indexmap::IndexMap;
use std::fmt;

/// 2^63: the magnitude of `i64::MIN`, exact in `f64`.
const I64_MIN_MAGNITUDE: f64 = 9_223_372_036_854_775_808.0;
/// 2^64: one past `u64::MAX`, exact in `f64`.
const U64_END: f64 = 18_446_744_073_709_551_616.0;

/// A JSON number that remembers whether it was written as an integer.
///
/// `UInt` only holds values above `i64::MAX`; the parser never produces it for
/// anything that fits `Int`. Integer kinds compare by value, so
/// `Int(1) == UInt(1)`, but an integer never equals a float.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    pub fn is_integer(&self) -> bool {
        !matches!(self, Number::Float(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// The value as `i64`, if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Int(n) => Some(n),
            Number::UInt(n) => i64::try_from(n).ok(),
            Number::Float(_) => None,
        }
    }

    /// The value as `u64`, if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Number::Int(n) => u64::try_from(n).ok(),
            Number::UInt(n) => Some(n),
            Number::Float(_) => None,
        }
    }

    /// The value as `f64`. Always succeeds; large integers may lose precision.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(n) => n as f64,
            Number::UInt(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// Widen to `i128` for range checks against narrower integer targets.
    /// Floats qualify only when integral and inside `[i64::MIN, u64::MAX]`.
    pub(crate) fn as_integral_i128(&self) -> Option<i128> {
        match *self {
            Number::Int(n) => Some(n as i128),
            Number::UInt(n) => Some(n as i128),
            Number::Float(f) => {
                if f.fract() == 0.0 && f >= -I64_MIN_MAGNITUDE && f < U64_END {
                    Some(f as i128)
                } else {
                    None
                }
            }
        }
    }

    /// A float with no fractional part, whatever its magnitude.
    pub(crate) fn is_integral_float(&self) -> bool {
        matches!(*self, Number::Float(f) if f.is_finite() && f.fract() == 0.0)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::Float(_), _) | (_, Number::Float(_)) => false,
            (a, b) => a.as_integral_i128() == b.as_integral_i128(),
        }
    }
}

/// Same spelling as the serializer: floats always carry a `.` or an exponent,
/// non-finite floats print as `null`.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(n) => write!(f, "{n}"),
            Number::UInt(n) => write!(f, "{n}"),
            Number::Float(x) => match serde_json::Number::from_f64(x) {
                Some(n) => write!(f, "{n}"),
                None => f.write_str("null"),
            },
        }
    }
}

/// One value in a document tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Node>),
    Object(Object),
}

impl Node {
    /// Short lowercase name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(Number::Float(_)) => "float",
            Node::Number(_) => "integer",
            Node::String(_) => "string",
            Node::Array(_) => "array",
            Node::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Node::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Node::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Node::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Node::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    /// `Null`, an empty array or an empty object.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Null => true,
            Node::Array(items) => items.is_empty(),
            Node::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Number of direct children for containers, 0 for `Null`, 1 otherwise.
    pub fn len(&self) -> usize {
        match self {
            Node::Null => 0,
            Node::Array(items) => items.len(),
            Node::Object(map) => map.len(),
            _ => 1,
        }
    }

    /// Replace `self` with `Null` and return the previous value.
    pub fn take(&mut self) -> Node {
        std::mem::take(self)
    }
}

/// Object members in insertion order with unique keys.
///
/// Inserting an existing key replaces its value in place; new keys append.
/// Equality is order-sensitive: `{"a":1,"b":2}` and `{"b":2,"a":1}` differ.
#[derive(Debug, Clone, Default)]
pub struct Object {
    entries: IndexMap<String, Node>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    /// Insert or replace. Returns the previous value when the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), value.into())
    }

    /// Mutable access to `key`, appending `Null` first if it is absent.
    pub fn entry_or_null(&mut self, key: &str) -> &mut Node {
        self.entries.entry(key.to_owned()).or_default()
    }

    /// Remove `key`, keeping the relative order of the remaining members.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Node)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl IntoIterator for Object {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Object::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K: Into<String>, V: Into<Node>, const N: usize> From<[(K, V); N]> for Object {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
