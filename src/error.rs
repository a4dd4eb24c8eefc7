//! Error handling types for the document model
//!
//! Every fallible operation in this crate returns [`Result`], whose error
//! carries a categorized [`XmlErrorKind`] plus optional location, context and
//! source information.

use std::{error::Error, fmt, io};

/// Main error type for tree, parse and I/O operations
#[derive(Debug)]
pub struct XmlError {
    /// The specific kind of error
    kind: XmlErrorKind,
    /// Location where the error occurred
    location: Option<Location>,
    /// Source error that caused this error
    source: Option<Box<dyn Error + Send + Sync>>,
    /// Additional context for the error
    context: Option<String>,
}

/// Represents a location in the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Top-level error categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlErrorKind {
    Attribute(AttributeError),
    Format(FormatError),
    IO(IOError),
    Index(IndexError),
    Name(NameError),
    Security(SecurityError),
    Structure(StructureError),
}

/// Out-of-range positional access or removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Child index outside `0..len`
    ChildOutOfRange { index: usize, len: usize },
    /// Attribute index outside `0..len`
    AttributeOutOfRange { index: usize, len: usize },
}

/// Lookup of an attribute that does not exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// No attribute with this name
    NotFound(String),
    /// No attribute at this position
    NoSuchIndex { index: usize, len: usize },
}

/// Names rejected by the name grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    InvalidElementName(String),
    InvalidAttributeName(String),
}

/// Malformed document text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// First line is not the fixed prolog
    PrologMismatch(String),
    /// Tag syntax could not be read
    MalformedTag(String),
    /// Text line with no open element to receive it
    TextOutsideElement,
    /// Document contains no element at all
    MissingRoot,
    /// Input ended while this element was still open
    UnclosedElement(String),
}

/// Nesting violations found while rebuilding the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// Closing tag does not match the innermost open element
    MismatchedClosingTag { expected: String, found: String },
    /// Closing tag with no open element
    UnexpectedClosingTag(String),
    /// Attribute name inside a tag fails the name grammar
    InvalidAttributeName(String),
}

/// Parser limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    /// Exceeded maximum depth of nesting
    MaxDepthExceeded,
    /// Exceeded maximum input size
    MaxSizeExceeded,
    /// Exceeded maximum text or attribute value length
    MaxTextLengthExceeded,
}

/// IO operation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IOError {
    /// File not found
    FileNotFound(String),
    /// Permission denied
    PermissionDenied(String),
    /// Error reading from a file
    ReadError(String),
    /// Error writing to a file
    WriteError(String),
}

impl XmlError {
    pub fn new(kind: XmlErrorKind) -> Self {
        Self {
            kind,
            location: None,
            source: None,
            context: None,
        }
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.location = Some(Location::new(line, column));
        self
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn kind(&self) -> &XmlErrorKind {
        &self.kind
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Maps an I/O failure on `path` to the matching [`IOError`] category.
    pub(crate) fn from_io(err: io::Error, path: &str, writing: bool) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::NotFound if !writing => IOError::FileNotFound(path.to_string()),
            io::ErrorKind::PermissionDenied => IOError::PermissionDenied(path.to_string()),
            _ if writing => IOError::WriteError(format!("{}: {}", path, err)),
            _ => IOError::ReadError(format!("{}: {}", path, err)),
        };
        Self::new(XmlErrorKind::IO(kind)).with_source(err)
    }
}

impl From<IndexError> for XmlError {
    fn from(err: IndexError) -> Self {
        Self::new(XmlErrorKind::Index(err))
    }
}

impl From<AttributeError> for XmlError {
    fn from(err: AttributeError) -> Self {
        Self::new(XmlErrorKind::Attribute(err))
    }
}

impl From<NameError> for XmlError {
    fn from(err: NameError) -> Self {
        Self::new(XmlErrorKind::Name(err))
    }
}

impl From<FormatError> for XmlError {
    fn from(err: FormatError) -> Self {
        Self::new(XmlErrorKind::Format(err))
    }
}

impl From<StructureError> for XmlError {
    fn from(err: StructureError) -> Self {
        Self::new(XmlErrorKind::Structure(err))
    }
}

impl From<SecurityError> for XmlError {
    fn from(err: SecurityError) -> Self {
        Self::new(XmlErrorKind::Security(err))
    }
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base_error = match &self.kind {
            XmlErrorKind::Attribute(err) => err.to_string(),
            XmlErrorKind::Format(err) => err.to_string(),
            XmlErrorKind::IO(err) => err.to_string(),
            XmlErrorKind::Index(err) => err.to_string(),
            XmlErrorKind::Name(err) => err.to_string(),
            XmlErrorKind::Security(err) => err.to_string(),
            XmlErrorKind::Structure(err) => err.to_string(),
        };

        if let Some(loc) = &self.location {
            write!(
                f,
                "at line {}, column {}: {}",
                loc.line, loc.column, base_error
            )?;
        } else {
            write!(f, "Error: {}", base_error)?;
        }

        if let Some(ctx) = &self.context {
            write!(f, "\nContext: {}", ctx)?;
        }

        if let Some(source) = &self.source {
            write!(f, "\nCaused by: {}", source)?;
        }

        Ok(())
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChildOutOfRange { index, len } => {
                write!(f, "Child index {} out of range (count {})", index, len)
            }
            Self::AttributeOutOfRange { index, len } => {
                write!(f, "Attribute index {} out of range (count {})", index, len)
            }
        }
    }
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "Attribute '{}' does not exist", name),
            Self::NoSuchIndex { index, len } => {
                write!(f, "No attribute at index {} (count {})", index, len)
            }
        }
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidElementName(n) => write!(f, "Invalid element name: '{}'", n),
            Self::InvalidAttributeName(n) => write!(f, "Invalid attribute name: '{}'", n),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrologMismatch(found) => write!(f, "Expected XML prolog, found '{}'", found),
            Self::MalformedTag(tag) => write!(f, "Malformed tag: '{}'", tag),
            Self::TextOutsideElement => write!(f, "Text outside of any element"),
            Self::MissingRoot => write!(f, "Document has no root element"),
            Self::UnclosedElement(name) => write!(f, "Element '{}' is never closed", name),
        }
    }
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MismatchedClosingTag { expected, found } => write!(
                f,
                "Closing tag '{}' does not match open element '{}'",
                found, expected
            ),
            Self::UnexpectedClosingTag(name) => {
                write!(f, "Closing tag '{}' without an open element", name)
            }
            Self::InvalidAttributeName(n) => write!(f, "Invalid attribute name in tag: '{}'", n),
        }
    }
}

impl fmt::Display for SecurityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxDepthExceeded => write!(f, "Maximum nesting depth exceeded"),
            Self::MaxSizeExceeded => write!(f, "Maximum input size exceeded"),
            Self::MaxTextLengthExceeded => write!(f, "Maximum text length exceeded"),
        }
    }
}

impl fmt::Display for IOError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => write!(f, "File not found: {}", path),
            Self::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            Self::ReadError(msg) => write!(f, "Read error: {}", msg),
            Self::WriteError(msg) => write!(f, "Write error: {}", msg),
        }
    }
}

impl Error for XmlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

pub type Result<T> = std::result::Result<T, XmlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let err = XmlError::from(StructureError::MismatchedClosingTag {
            expected: "b".to_string(),
            found: "c".to_string(),
        })
        .with_location(3, 1);
        let display = err.to_string();
        assert!(display.starts_with("at line 3, column 1"));
        assert!(display.contains("'c'"));
    }

    #[test]
    fn test_display_with_context() {
        let err = XmlError::from(NameError::InvalidElementName("1a".to_string()))
            .with_context("while adding child");
        assert_eq!(err.context(), Some("while adding child"));
        assert!(err.to_string().contains("Context: while adding child"));
    }

    #[test]
    fn test_io_mapping() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = XmlError::from_io(io_err, "doc.xml", false);
        assert_eq!(
            err.kind(),
            &XmlErrorKind::IO(IOError::FileNotFound("doc.xml".to_string()))
        );
        assert!(err.source().is_some());
    }
}
