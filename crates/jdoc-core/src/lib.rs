//! # jdoc-core
//!
//! A small, embeddable access layer for JSON documents: parse text into a
//! [`Node`] tree, read it with strict or lenient accessors, edit it by key or
//! path, and serialize it back without losing member order or numeric kind.
//!
//! ## Quick start
//!
//! ```rust
//! use jdoc_core::{parse, to_string, DocError};
//!
//! let mut doc = parse(r#"{"name": "Roderick", "guild": {"role": "Driver"}}"#).unwrap();
//!
//! // Strict access fails loudly on a miss...
//! assert_eq!(doc.pointer("guild.role").unwrap().as_str(), Some("Driver"));
//! assert!(matches!(doc.get_key("some"), Err(DocError::KeyNotFound { .. })));
//!
//! // ...lenient access falls back.
//! assert_eq!(doc.get_or("age", 36u32), 36);
//!
//! doc.set_key("age", 36).unwrap();
//! assert_eq!(
//!     to_string(&doc, 0),
//!     r#"{"name":"Roderick","guild":{"role":"Driver"},"age":36}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`node`]: `Node`, `Number` and the insertion-ordered `Object`
//! - [`parser`]: JSON text → `Node` (`parse`, `parse_with`, `accepts`)
//! - [`serializer`]: `Node` → JSON text, compact or indented
//! - [`access`]: key/index lookup, typed extraction, `set_key`, `get_or`
//! - [`convert`]: `FromNode` extraction and `From` constructors
//! - [`path`]: dotted/bracketed path expressions for deep reads and writes
//! - [`interop`]: serde and `serde_json::Value` bridges
//! - [`error`]: the `DocError` taxonomy

pub mod access;
pub mod convert;
pub mod error;
pub mod interop;
pub mod node;
pub mod parser;
pub mod path;
pub mod serializer;

pub use convert::FromNode;
pub use error::{DocError, Result};
pub use node::{Node, Number, Object};
pub use parser::{accepts, parse, parse_with, ParseOptions, DEFAULT_MAX_DEPTH};
pub use path::{Path, Segment};
pub use serializer::to_string;
