use std::fs;

use crate::{
    error::{Result, XmlError},
    node::Node,
    parser::Parser,
    serializer::{FormatConfig, Serializer},
};

/// Reads the whole resource at `path`.
pub fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| XmlError::from_io(e, path, false))
}

/// Overwrites the resource at `path` with `content`.
pub fn write_file(path: &str, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| XmlError::from_io(e, path, true))
}

pub fn parse_xml(content: &str) -> Result<Node> {
    Parser::new(content).parse()
}

pub fn format_xml(root: &Node) -> String {
    Serializer::new().serialize(root)
}

pub fn format_xml_with(root: &Node, config: FormatConfig) -> String {
    Serializer::with_config(config).serialize(root)
}
