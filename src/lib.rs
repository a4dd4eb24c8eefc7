//! xmldom: an in-memory document model for a restricted XML dialect
//!
//! This crate provides functionality to:
//! - Build and mutate element trees with validated names
//! - Serialize a tree to a fixed, line-oriented text form
//! - Parse that text form back into a tree
//! - Handle errors with categorized kinds and line information
//!
//! The dialect has no namespaces, CDATA, comments, DTD or multi-line text;
//! the only processing instruction is the fixed `<?xml version="1.0"?>` prolog.
//!
//! # Examples
//! ```
//! use xmldom::{Node, Result};
//!
//! fn example() -> Result<()> {
//!     let mut book = Node::new("book")?;
//!     book.add_attribute("id", "1")?;
//!     book.add_element("title")?.set_text("Dune");
//!
//!     let text = book.to_string();
//!     let parsed: Node = text.parse()?;
//!     assert_eq!(parsed, book);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

use tracing::{debug, info, instrument};

pub mod error;
pub mod escape;
pub mod name;
pub mod node;
pub mod parser;
pub mod serializer;
pub mod test_utils;
pub mod utils;

// Re-exports
pub use error::{Result, XmlError, XmlErrorKind};
pub use name::is_valid_name;
pub use node::Node;
pub use parser::{config::ParserConfig, parse_str, Parser};
pub use serializer::{FormatConfig, Serializer, PROLOG};
use utils::{format_xml, parse_xml, read_file, write_file};

/// Reads the file at `path` and parses it into a new tree.
#[instrument]
pub fn parse_file(path: &str) -> Result<Node> {
    debug!("Starting to parse file: {}", path);

    let content = read_file(path)?;

    info!("File read successfully, {} bytes", content.len());

    let root = parse_xml(&content)?;

    debug!("Parsing completed");
    Ok(root)
}

/// Serializes `root` and overwrites the file at `path`.
#[instrument(skip(root), fields(root = root.name()))]
pub fn save_file(root: &Node, path: &str) -> Result<()> {
    let content = format_xml(root);
    write_file(path, &content)?;
    info!("Saved {} bytes to {}", content.len(), path);
    Ok(())
}
