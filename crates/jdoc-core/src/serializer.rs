//! Serializer: writes a [`Node`] tree back to JSON text.
//!
//! Output is produced by `serde_json` over `Node`'s `Serialize` impl, using its
//! default formatter for the compact layout and `PrettyFormatter` otherwise:
//!
//! - **Compact** (`indent == 0`): no whitespace at all, e.g. `{"a":1,"b":[1,2]}`
//! - **Pretty** (`indent > 0`): one member per line, each nesting level indented
//!   by `indent` spaces, object members written as `"key": value`. Empty
//!   containers stay on one line as `{}` / `[]`.
//!
//! Numbers keep their kind: integers print as plain digits, floats always carry
//! a fraction or exponent (`1.0`, `1e300`), so re-parsing the output restores
//! the same `Number` variant. Non-finite floats have no JSON spelling and are
//! written as `null`.

use crate::node::Node;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fmt;

/// Serialize `node` to JSON text. `indent == 0` selects the compact layout.
///
/// # Examples
///
/// ```
/// let doc = jdoc_core::parse(r#"{ "a": 1, "b": [1, 2] }"#).unwrap();
/// assert_eq!(jdoc_core::to_string(&doc, 0), r#"{"a":1,"b":[1,2]}"#);
/// assert_eq!(
///     jdoc_core::to_string(&doc, 2),
///     "{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2\n  ]\n}"
/// );
/// ```
pub fn to_string(node: &Node, indent: usize) -> String {
    let mut buf = Vec::with_capacity(128);
    let written = if indent == 0 {
        node.serialize(&mut Serializer::new(&mut buf))
    } else {
        let pad = " ".repeat(indent);
        let formatter = PrettyFormatter::with_indent(pad.as_bytes());
        node.serialize(&mut Serializer::with_formatter(&mut buf, formatter))
    };
    // Vec writes are infallible and every Node has a JSON form.
    if let Err(err) = written {
        tracing::error!(error = %err, "serializing document failed");
    }
    String::from_utf8(buf).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

impl Node {
    /// Shorthand for [`to_string`].
    pub fn dump(&self, indent: usize) -> String {
        to_string(self, indent)
    }
}

/// `{}` is compact; `{:#}` is pretty with a 2-space indent.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = if f.alternate() { 2 } else { 0 };
        f.write_str(&to_string(self, indent))
    }
}
