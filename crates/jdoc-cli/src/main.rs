//! `jdoc` CLI: validate, format, query, and edit JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Check that a document is well formed
//! echo '{"a":1}' | jdoc validate
//!
//! # Pretty-print with a 4-space indent (0 = compact)
//! jdoc fmt --indent 4 -i movie.json
//!
//! # Read a nested value, falling back to a default when it is missing
//! jdoc get director.name -i movie.json --raw
//! jdoc get guild.role --default '"Driver"' -i person.json
//!
//! # Write a value and save the result
//! jdoc set similar_movies[0].year 1984 -i movie.json -o movie.json
//!
//! # Show node counts and sizes
//! jdoc stats -i movie.json
//! ```
//!
//! Logging goes to stderr. The filter is read from `JDOC_LOG` (default `warn`);
//! `-v/--verbose` raises it to `debug`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jdoc_core::{DocError, Node, ParseOptions, DEFAULT_MAX_DEPTH};
use std::io::{self, Read};
use std::process;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the `tracing` filter directive.
const LOG_ENV: &str = "JDOC_LOG";

#[derive(Parser)]
#[command(name = "jdoc", version, about = "Structured JSON document tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level (overrides JDOC_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Maximum nesting depth accepted by the parser
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the input is well-formed JSON
    Validate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Reserialize the input with the given indent
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Spaces per nesting level (0 = compact)
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },
    /// Print the value at a path such as `cast[0]` or `director.name`
    Get {
        /// Path expression (empty string = whole document)
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Spaces per nesting level (0 = compact)
        #[arg(long, default_value_t = 0)]
        indent: usize,
        /// JSON value printed when the path does not resolve
        #[arg(long)]
        default: Option<String>,
        /// Print strings without quotes or escapes
        #[arg(long)]
        raw: bool,
    },
    /// Set the value at a path and print the resulting document
    Set {
        /// Path expression; missing object members are created
        path: String,
        /// JSON value; text that does not parse is stored as a string
        value: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Spaces per nesting level (0 = compact)
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },
    /// Show node counts, nesting depth, and serialized sizes
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.max_depth == 0 {
        bail!("--max-depth must be at least 1");
    }
    let options = ParseOptions::default().with_max_depth(cli.max_depth);

    match cli.command {
        Commands::Validate { input } => {
            let text = read_input(input.as_deref())?;
            match jdoc_core::parse_with(&text, &options) {
                Ok(_) => println!("valid"),
                Err(e) => {
                    eprintln!("invalid: {e}");
                    process::exit(1);
                }
            }
        }
        Commands::Fmt {
            input,
            output,
            indent,
        } => {
            let doc = load(input.as_deref(), &options)?;
            write_output(output.as_deref(), &doc.dump(indent))?;
        }
        Commands::Get {
            path,
            input,
            indent,
            default,
            raw,
        } => {
            let doc = load(input.as_deref(), &options)?;
            let fallback;
            let node = match (doc.pointer(&path), default.as_deref()) {
                (Ok(node), _) => node,
                (Err(e @ DocError::Parse { .. }), _) | (Err(e), None) => {
                    return Err(e).with_context(|| format!("Failed to resolve path '{path}'"));
                }
                (Err(e), Some(text)) => {
                    debug!(path = %path, error = %e, "path did not resolve, using default");
                    fallback = jdoc_core::parse(text)
                        .with_context(|| format!("--default is not valid JSON: {text}"))?;
                    &fallback
                }
            };
            let rendered = match (raw, node) {
                (true, Node::String(s)) => s.clone(),
                _ => node.dump(indent),
            };
            write_output(None, &rendered)?;
        }
        Commands::Set {
            path,
            value,
            input,
            output,
            indent,
        } => {
            let mut doc = load(input.as_deref(), &options)?;
            let value = parse_value(&value);
            doc.set_path(&path, value)
                .with_context(|| format!("Failed to set path '{path}'"))?;
            write_output(output.as_deref(), &doc.dump(indent))?;
        }
        Commands::Stats { input } => {
            let doc = load(input.as_deref(), &options)?;
            let stats = Stats::collect(&doc);
            let compact = doc.dump(0).len();
            let pretty = doc.dump(2).len();
            println!("Nodes:        {}", stats.total());
            for (kind, count) in stats.counts() {
                if count > 0 {
                    println!("  {kind:<10}  {count}");
                }
            }
            println!("Max depth:    {}", stats.max_depth);
            println!("Compact size: {compact} bytes");
            println!("Pretty size:  {pretty} bytes");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Read and parse the input document.
fn load(path: Option<&str>, options: &ParseOptions) -> Result<Node> {
    let text = read_input(path)?;
    let source = path.unwrap_or("stdin");
    jdoc_core::parse_with(&text, options).with_context(|| format!("Failed to parse {source}"))
}

/// Interpret a command-line value as JSON, or as a plain string when it is not JSON.
fn parse_value(text: &str) -> Node {
    match jdoc_core::parse(text) {
        Ok(node) => node,
        Err(e) => {
            debug!(error = %e, "value is not JSON, storing it as a string");
            Node::from(text)
        }
    }
}

/// Per-kind node counts and the deepest container nesting.
#[derive(Debug, Default)]
struct Stats {
    nulls: usize,
    booleans: usize,
    integers: usize,
    floats: usize,
    strings: usize,
    arrays: usize,
    objects: usize,
    max_depth: usize,
}

impl Stats {
    fn collect(root: &Node) -> Self {
        let mut stats = Stats::default();
        stats.visit(root, 0);
        stats
    }

    fn visit(&mut self, node: &Node, depth: usize) {
        match node {
            Node::Null => self.nulls += 1,
            Node::Bool(_) => self.booleans += 1,
            Node::Number(n) if n.is_float() => self.floats += 1,
            Node::Number(_) => self.integers += 1,
            Node::String(_) => self.strings += 1,
            Node::Array(items) => {
                self.arrays += 1;
                self.max_depth = self.max_depth.max(depth + 1);
                for item in items {
                    self.visit(item, depth + 1);
                }
            }
            Node::Object(members) => {
                self.objects += 1;
                self.max_depth = self.max_depth.max(depth + 1);
                for value in members.values() {
                    self.visit(value, depth + 1);
                }
            }
        }
    }

    fn counts(&self) -> [(&'static str, usize); 7] {
        [
            ("null", self.nulls),
            ("boolean", self.booleans),
            ("integer", self.integers),
            ("float", self.floats),
            ("string", self.strings),
            ("array", self.arrays),
            ("object", self.objects),
        ]
    }

    fn total(&self) -> usize {
        self.counts().iter().map(|(_, count)| count).sum()
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Write `content` followed by a newline to the output file or stdout.
fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
