//! Paths: address a node inside a tree with a dotted/bracketed expression.
//!
//! # Path syntax
//!
//! - `""` -- the root itself
//! - `"guild.role"` -- member `role` of member `guild`
//! - `"cast[2]"` -- third element of array `cast`
//! - `"similar_movies[0].name"` -- keys and indexes mix freely
//! - `"[\"key.with.dots\"]"` -- bracket-quoted keys for names containing
//!   `.`, `[`, `]` or `"` (escape `"` and `\` with a backslash)
//!
//! Reads follow the strict access rules of [`Node::get_key`] and
//! [`Node::get_index`], so a path miss reports exactly which step failed.

use crate::error::{DocError, Result};
use crate::node::{Node, Object};
use std::fmt;
use std::str::FromStr;

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A parsed path expression. See the module docs for the syntax.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path, addressing the root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a path expression.
    ///
    /// # Errors
    ///
    /// `DocError::Parse` (line 1, column of the offending character) for empty
    /// keys, unbalanced brackets, non-numeric indexes or unterminated quotes.
    pub fn parse(expr: &str) -> Result<Self> {
        PathParser { expr, pos: 0 }.parse()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a key step.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment::Key(key.into()));
        self
    }

    /// Append an index step.
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    /// Walk `node` along this path.
    pub fn resolve<'a>(&self, node: &'a Node) -> Result<&'a Node> {
        self.segments
            .iter()
            .try_fold(node, |current, segment| match segment {
                Segment::Key(key) => current.get_key(key),
                Segment::Index(index) => current.get_index(*index),
            })
    }

    /// Mutable variant of [`Path::resolve`].
    pub fn resolve_mut<'a>(&self, node: &'a mut Node) -> Result<&'a mut Node> {
        let mut current = node;
        for segment in &self.segments {
            current = match segment {
                Segment::Key(key) => current.get_key_mut(key)?,
                Segment::Index(index) => current.get_index_mut(*index)?,
            };
        }
        Ok(current)
    }

    /// Check that [`Path::assign`] would succeed without touching the tree.
    ///
    /// Missing keys are allowed (they will be created, and so will every key
    /// after them); an index step needs an existing element.
    fn check_assignable(&self, node: &Node) -> Result<()> {
        // `None` means "does not exist yet, will be created as an object".
        let mut current = Some(node);
        for segment in &self.segments {
            current = match (current, segment) {
                (None | Some(Node::Null), Segment::Key(_)) => None,
                (Some(Node::Object(map)), Segment::Key(key)) => map.get(key.as_str()),
                (Some(other), Segment::Key(_)) => {
                    return Err(DocError::type_mismatch("object", other.kind()))
                }
                (None, Segment::Index(_)) => {
                    return Err(DocError::type_mismatch("array", "null"))
                }
                (Some(other), Segment::Index(index)) => Some(other.get_index(*index)?),
            };
        }
        Ok(())
    }

    /// Store `value` at this path, returning what it replaced.
    ///
    /// Missing keys along the way are created as empty objects; `Null` nodes
    /// on a key step are promoted to objects. The tree is left untouched when
    /// an error is returned.
    pub fn assign(&self, node: &mut Node, value: Node) -> Result<Option<Node>> {
        let Some((last, parents)) = self.segments.split_last() else {
            return Ok(Some(std::mem::replace(node, value)));
        };
        self.check_assignable(node)?;

        let mut current = node;
        for segment in parents {
            current = match segment {
                Segment::Key(key) => {
                    if current.is_null() {
                        *current = Node::Object(Object::new());
                    }
                    match current {
                        Node::Object(map) => map.entry_or_null(key),
                        other => return Err(DocError::type_mismatch("object", other.kind())),
                    }
                }
                Segment::Index(index) => current.get_index_mut(*index)?,
            };
        }

        match last {
            Segment::Key(key) => current.set_key(key.clone(), value),
            Segment::Index(index) => {
                let slot = current.get_index_mut(*index)?;
                Ok(Some(std::mem::replace(slot, value)))
            }
        }
    }

    /// Detach and return the node at this path. The root path takes the whole
    /// tree, leaving `Null` behind.
    pub fn remove(&self, node: &mut Node) -> Result<Node> {
        let Some((last, parents)) = self.segments.split_last() else {
            return Ok(node.take());
        };
        let parent = Path {
            segments: parents.to_vec(),
        }
        .resolve_mut(node)?;

        match last {
            Segment::Key(key) => parent.remove_key(key),
            Segment::Index(index) => match parent {
                Node::Array(items) if *index < items.len() => Ok(items.remove(*index)),
                Node::Array(items) => Err(DocError::IndexOutOfRange {
                    index: *index,
                    len: items.len(),
                }),
                other => Err(DocError::type_mismatch("array", other.kind())),
            },
        }
    }
}

impl FromStr for Path {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Key(key) if needs_brackets(key) => {
                    f.write_str("[\"")?;
                    for ch in key.chars() {
                        if ch == '"' || ch == '\\' {
                            f.write_str("\\")?;
                        }
                        write!(f, "{ch}")?;
                    }
                    f.write_str("\"]")?;
                }
                Segment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
            }
        }
        Ok(())
    }
}

fn needs_brackets(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']', '"', '\\'])
}

struct PathParser<'a> {
    expr: &'a str,
    pos: usize,
}

impl PathParser<'_> {
    fn error(&self, message: impl Into<String>) -> DocError {
        DocError::Parse {
            line: 1,
            column: self.expr[..self.pos].chars().count() + 1,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.expr[self.pos..].chars().next()
    }

    fn parse(mut self) -> Result<Path> {
        let mut segments = Vec::new();
        // A bare key may start the path or follow a '.'; a '[' may start the
        // path or follow any complete segment.
        let mut after_dot = false;

        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    if segments.is_empty() || after_dot {
                        return Err(self.error("empty key in path"));
                    }
                    after_dot = true;
                    self.pos += 1;
                }
                '[' => {
                    if after_dot {
                        return Err(self.error("expected a key after '.'"));
                    }
                    segments.push(self.parse_bracket()?);
                }
                ']' => return Err(self.error("unexpected ']' in path")),
                _ => {
                    if !segments.is_empty() && !after_dot {
                        return Err(self.error("expected '.' or '[' between path segments"));
                    }
                    after_dot = false;
                    let start = self.pos;
                    while let Some(c) = self.peek() {
                        if matches!(c, '.' | '[' | ']') {
                            break;
                        }
                        self.pos += c.len_utf8();
                    }
                    segments.push(Segment::Key(self.expr[start..self.pos].to_string()));
                }
            }
        }

        if after_dot {
            return Err(self.error("path ends with '.'"));
        }
        Ok(Path { segments })
    }

    /// Parse `[123]` or `["key"]`. The cursor is on the '['.
    fn parse_bracket(&mut self) -> Result<Segment> {
        let open = self.pos;
        self.pos += 1;

        let segment = if self.peek() == Some('"') {
            self.pos += 1;
            let mut key = String::new();
            loop {
                match self.peek() {
                    None => {
                        self.pos = open;
                        return Err(self.error("unterminated quoted key in path"));
                    }
                    Some('"') => {
                        self.pos += 1;
                        break;
                    }
                    Some('\\') => {
                        self.pos += 1;
                        match self.peek() {
                            Some(c @ ('"' | '\\')) => {
                                key.push(c);
                                self.pos += 1;
                            }
                            _ => return Err(self.error("invalid escape in quoted key")),
                        }
                    }
                    Some(c) => {
                        key.push(c);
                        self.pos += c.len_utf8();
                    }
                }
            }
            Segment::Key(key)
        } else {
            let start = self.pos;
            while matches!(self.peek(), Some('0'..='9')) {
                self.pos += 1;
            }
            if start == self.pos {
                return Err(self.error("expected an index or a quoted key after '['"));
            }
            let digits = &self.expr[start..self.pos];
            let index = digits.parse::<usize>().map_err(|_| {
                DocError::Parse {
                    line: 1,
                    column: self.expr[..start].chars().count() + 1,
                    message: format!("index {digits} is too large"),
                }
            })?;
            Segment::Index(index)
        };

        if self.peek() != Some(']') {
            return Err(self.error("expected ']'"));
        }
        self.pos += 1;
        Ok(segment)
    }
}

impl Node {
    /// Read the node at a path expression.
    ///
    /// ```
    /// let doc = jdoc_core::parse(r#"{"speed": {"walk": "30 ft."}}"#).unwrap();
    /// assert_eq!(doc.pointer("speed.walk").unwrap().as_str(), Some("30 ft."));
    /// assert!(doc.pointer("speed.fly").is_err());
    /// ```
    pub fn pointer(&self, expr: &str) -> Result<&Node> {
        Path::parse(expr)?.resolve(self)
    }

    /// Mutable variant of [`Node::pointer`].
    pub fn pointer_mut(&mut self, expr: &str) -> Result<&mut Node> {
        Path::parse(expr)?.resolve_mut(self)
    }

    /// Store a value at a path expression. See [`Path::assign`].
    pub fn set_path(&mut self, expr: &str, value: impl Into<Node>) -> Result<Option<Node>> {
        Path::parse(expr)?.assign(self, value.into())
    }

    /// Remove the node at a path expression. See [`Path::remove`].
    pub fn remove_path(&mut self, expr: &str) -> Result<Node> {
        Path::parse(expr)?.remove(self)
    }
}
