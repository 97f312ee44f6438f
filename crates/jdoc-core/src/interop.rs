//! serde and `serde_json` interop.
//!
//! `Node` implements `Serialize`/`Deserialize`, converts losslessly to and from
//! `serde_json::Value` (member order included, thanks to `preserve_order`),
//! and can extract or absorb any serde type through that bridge.

use crate::error::{DocError, Result};
use crate::node::{Node, Number, Object};
use serde::de::{DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match *self {
            Number::Int(n) => serializer.serialize_i64(n),
            Number::UInt(n) => serializer.serialize_u64(n),
            Number::Float(f) => serializer.serialize_f64(f),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Number(n) => n.serialize(serializer),
            Node::String(s) => serializer.serialize_str(s),
            Node::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

/// Works with any self-describing format; `parse` uses it with `serde_json`.
/// Repeated object keys keep their first position and take the last value.
impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E>(self) -> std::result::Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_none<E>(self) -> std::result::Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_bool<E>(self, b: bool) -> std::result::Result<Node, E> {
        Ok(Node::Bool(b))
    }

    fn visit_i64<E>(self, n: i64) -> std::result::Result<Node, E> {
        Ok(Node::Number(Number::Int(n)))
    }

    fn visit_u64<E>(self, n: u64) -> std::result::Result<Node, E> {
        Ok(Node::from(n))
    }

    fn visit_f64<E>(self, f: f64) -> std::result::Result<Node, E> {
        Ok(Node::from(f))
    }

    fn visit_str<E>(self, s: &str) -> std::result::Result<Node, E> {
        Ok(Node::String(s.to_owned()))
    }

    fn visit_string<E>(self, s: String) -> std::result::Result<Node, E> {
        Ok(Node::String(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item);
        }
        Ok(Node::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Node, A::Error> {
        let mut map = Object::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(key) = access.next_key::<String>()? {
            let value = access.next_value::<Node>()?;
            map.insert(key, value);
        }
        Ok(Node::Object(map))
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Number(Number::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Node::Number(Number::UInt(u))
                } else {
                    n.as_f64().map_or(Node::Null, Node::from)
                }
            }
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::Array(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Object(map.into_iter().collect::<Object>()),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(b),
            Node::Number(Number::Int(i)) => Value::Number(i.into()),
            Node::Number(Number::UInt(u)) => Value::Number(u.into()),
            Node::Number(Number::Float(f)) => {
                serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
            }
            Node::String(s) => Value::String(s),
            Node::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Node::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Node {
    /// Extract any deserializable type, e.g. a `#[derive(Deserialize)]` struct.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` naming the target type and serde's description of the
    /// first field that did not fit.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::from(self.clone())).map_err(|err| {
            DocError::type_mismatch(std::any::type_name::<T>(), err.to_string())
        })
    }

    /// Build a tree from any serializable value.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` when the value has no JSON form (e.g. a map with
    /// non-string keys).
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Node> {
        serde_json::to_value(value)
            .map(Node::from)
            .map_err(|err| DocError::type_mismatch("JSON-representable value", err.to_string()))
    }
}
