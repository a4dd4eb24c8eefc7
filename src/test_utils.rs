mod fixtures;
mod helpers;

pub use fixtures::{book_document, BOOK_XML, INVALID_XML_SAMPLES};
pub use helpers::{nested_document, tmp_file_path};

// Re-export common test types/traits
pub use crate::{
    error::{
        AttributeError, FormatError, IOError, IndexError, NameError, Result, SecurityError,
        StructureError, XmlError, XmlErrorKind,
    },
    escape::{decode, encode},
    name::is_valid_name,
    node::Node,
    parse_file, save_file,
    parser::{
        config::{ParserConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE, DEFAULT_MAX_TEXT_LENGTH},
        parse_str, Parser,
    },
    serializer::{FormatConfig, Serializer, PROLOG},
    utils::{format_xml, format_xml_with, parse_xml, read_file, write_file},
};
