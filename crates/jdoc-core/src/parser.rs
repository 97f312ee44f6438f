//! RFC 8259 parser: converts JSON text into a [`Node`] tree.
//!
//! Tokenizing and validation are done by `serde_json`, which drives the
//! [`Node`] deserializer in `interop`. This module maps its errors onto
//! [`DocError::Parse`] and applies the caller's nesting limit.
//!
//! - **Locations**: `serde_json` reports byte columns; they are converted to
//!   1-based character columns so `é` counts once.
//! - **Numbers**: integers land in `Number::Int`, then `Number::UInt`, and only
//!   become `Number::Float` when they overflow both. Float literals that
//!   overflow `f64` are rejected.
//! - **Nesting**: `serde_json` refuses more than [`DEFAULT_MAX_DEPTH`] levels.
//!   A lower [`ParseOptions::max_depth`] is checked after a successful parse.

use crate::error::{DocError, Result};
use crate::node::Node;
use std::str::FromStr;

/// Nesting limit applied by [`parse`] and [`accepts`]. This is the deepest
/// nesting `serde_json`'s recursion guard lets through; larger
/// [`ParseOptions::max_depth`] values behave like this one.
pub const DEFAULT_MAX_DEPTH: usize = 127;

/// Tunables for [`parse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested arrays/objects. The root container is depth 1.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parse JSON text into a document tree.
///
/// Empty or whitespace-only input is an error, as is anything after the first
/// complete value other than whitespace.
///
/// # Examples
///
/// ```
/// let doc = jdoc_core::parse(r#"{"name": "Roderick", "guild": {"name": "Reds"}}"#).unwrap();
/// assert_eq!(doc.pointer("guild.name").unwrap().as_str(), Some("Reds"));
/// ```
pub fn parse(text: &str) -> Result<Node> {
    parse_with(text, &ParseOptions::default())
}

/// Parse with explicit [`ParseOptions`].
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Node> {
    tracing::trace!(len = text.len(), max_depth = options.max_depth, "parsing document");
    let result = serde_json::from_str::<Node>(text)
        .map_err(|err| from_json_error(text, &err))
        .and_then(|node| {
            if options.max_depth < DEFAULT_MAX_DEPTH {
                check_depth(text, options.max_depth)?;
            }
            Ok(node)
        });
    if let Err(err) = &result {
        tracing::debug!(error = %err, "document rejected");
    }
    result
}

/// Well-formedness check. Returns `true` exactly when [`parse`] would succeed.
pub fn accepts(text: &str) -> bool {
    parse(text).is_ok()
}

impl FromStr for Node {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Convert a `serde_json` error into a located [`DocError::Parse`].
fn from_json_error(text: &str, err: &serde_json::Error) -> DocError {
    let full = err.to_string();
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    let message = full.strip_suffix(&suffix).unwrap_or(&full).to_string();
    let line = err.line().max(1);
    DocError::Parse {
        line,
        column: char_column(text, line, err.column()),
        message,
    }
}

/// Turn `serde_json`'s byte column (the 1-based byte offset of the offending
/// byte within its line) into a 1-based character column.
fn char_column(text: &str, line: usize, byte_column: usize) -> usize {
    let Some(line_text) = text.split('\n').nth(line - 1) else {
        return byte_column.max(1);
    };
    let mut end = byte_column.saturating_sub(1).min(line_text.len());
    while !line_text.is_char_boundary(end) {
        end -= 1;
    }
    line_text[..end].chars().count() + 1
}

/// Locate the first bracket that opens a container deeper than `max_depth`.
/// Only called on text that already parsed, so strings are well formed.
fn check_depth(text: &str, max_depth: usize) -> Result<()> {
    let mut depth = 0usize;
    let mut line = 1;
    let mut column = 0;
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        column += 1;
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' | '{' => {
                depth += 1;
                if depth > max_depth {
                    return Err(DocError::Parse {
                        line,
                        column,
                        message: format!("nesting depth exceeds the limit of {max_depth}"),
                    });
                }
            }
            ']' | '}' => depth = depth.saturating_sub(1),
            '\n' => {
                line += 1;
                column = 0;
            }
            _ => {}
        }
    }
    Ok(())
}
