use std::fmt;

use crate::error::{Result, SecurityError};

/// Maximum element nesting depth (256) accepted by the parser
pub const DEFAULT_MAX_DEPTH: usize = 256;
/// Maximum input size (8MB) to prevent memory exhaustion
pub const DEFAULT_MAX_SIZE: usize = 8 * 1_048_576;
/// Maximum length (1MB) of a single text run or attribute value
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1_048_576;

/// Configuration for parser limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting depth of open elements
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
    /// Maximum decoded text or attribute value length in bytes
    pub max_text_length: usize,
}

/// Tracks nesting depth during parsing
#[derive(Debug, Default)]
pub struct ParsingContext {
    pub current_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

impl fmt::Display for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParserConfig {{ max_depth: {}, max_size: {}, max_text_length: {} }}",
            self.max_depth, self.max_size, self.max_text_length
        )
    }
}

impl ParserConfig {
    pub fn validate_input_size(&self, size: usize) -> Result<()> {
        if size > self.max_size {
            return Err(SecurityError::MaxSizeExceeded.into());
        }
        Ok(())
    }

    pub fn validate_text(&self, s: &str) -> Result<()> {
        if s.len() > self.max_text_length {
            return Err(SecurityError::MaxTextLengthExceeded.into());
        }
        Ok(())
    }
}

impl ParsingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_nested(&mut self, config: &ParserConfig) -> Result<()> {
        self.current_depth += 1;
        if self.current_depth > config.max_depth {
            return Err(SecurityError::MaxDepthExceeded.into());
        }
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        if self.current_depth > 0 {
            self.current_depth -= 1;
        }
    }
}
