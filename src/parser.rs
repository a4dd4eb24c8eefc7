//! Line-oriented parser.
//!
//! The parser rebuilds nesting from flat text with an explicit stack of open
//! elements:
//! - an opening tag pushes a new element
//! - a closing tag must name the innermost open element; it is popped and
//!   attached to its parent, or, when it is the root, parsing stops
//! - text up to the next `<` becomes the text of the innermost open element
//!
//! Several tags on one line are handled left to right. Parsing is all or
//! nothing: on error the partially built tree is dropped.

pub mod config;
pub mod line;

use tracing::{debug, trace};

use crate::error::{FormatError, NameError, Result, StructureError, XmlError};
use crate::escape::decode;
use crate::name::is_valid_name;
use crate::node::Node;
use crate::serializer::PROLOG;

use self::config::{ParserConfig, ParsingContext};
use self::line::normalize;

/// Outcome of interpreting one line
enum Step {
    Continue,
    Finished(Node),
}

/// Parser for documents in the restricted dialect
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    config: ParserConfig,
    context: ParsingContext,
    /// Open elements, innermost last
    stack: Vec<Node>,
}

impl<'a> Parser<'a> {
    /// Creates a parser with default limits.
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        Self {
            input,
            config,
            context: ParsingContext::new(),
            stack: Vec::new(),
        }
    }

    /// Parses the whole input and returns the root element.
    pub fn parse(&mut self) -> Result<Node> {
        self.config.validate_input_size(self.input.len())?;
        self.stack.clear();
        self.context = ParsingContext::new();

        let result = self.parse_lines();
        // never hand out a half-built tree
        self.stack.clear();
        result
    }

    fn parse_lines(&mut self) -> Result<Node> {
        let input = self.input;
        let mut lines = input.lines().enumerate();

        match lines.next() {
            Some((_, first)) if first == PROLOG => {}
            Some((_, first)) => {
                return Err(
                    XmlError::from(FormatError::PrologMismatch(first.to_string()))
                        .with_location(1, 1),
                )
            }
            None => {
                return Err(
                    XmlError::from(FormatError::PrologMismatch(String::new())).with_location(1, 1)
                )
            }
        }

        for (index, raw) in lines {
            let line_no = index + 1;
            let line = normalize(raw);
            if line.is_empty() {
                continue;
            }
            trace!(line_no, line = %line, "parsing line");

            match self
                .parse_line(&line)
                .map_err(|e| e.with_location(line_no, 1))?
            {
                Step::Continue => {}
                Step::Finished(root) => {
                    debug!(
                        root = root.name(),
                        elements = root.element_count(),
                        last_line = line_no,
                        "parsed document"
                    );
                    return Ok(root);
                }
            }
        }

        let line_count = input.lines().count();
        let err = match self.stack.last() {
            Some(open) => FormatError::UnclosedElement(open.name().to_string()),
            None => FormatError::MissingRoot,
        };
        Err(XmlError::from(err).with_location(line_count, 1))
    }

    /// Interprets one normalized, non-empty line.
    fn parse_line(&mut self, line: &str) -> Result<Step> {
        let mut rest = line;
        loop {
            if rest.is_empty() {
                return Ok(Step::Continue);
            }

            if !rest.starts_with('<') {
                let (text, after) = split_text_run(rest);
                self.set_open_text(text)?;
                rest = after;
                continue;
            }

            if let Some(tag) = rest.strip_prefix("</") {
                let (name, after) = tag.split_once('>').ok_or_else(|| {
                    XmlError::from(FormatError::MalformedTag(rest.to_string()))
                        .with_context("closing tag has no '>'")
                })?;
                if let Some(root) = self.close(name)? {
                    return Ok(Step::Finished(root));
                }
                rest = after;
                continue;
            }

            match self.open(rest)? {
                (Some(root), _) => return Ok(Step::Finished(root)),
                (None, after) => rest = after,
            }
        }
    }

    /// Handles an opening or self-closing tag at the start of `tag`.
    ///
    /// Returns the finished root if the tag closed it, and the unconsumed rest
    /// of the line.
    fn open<'l>(&mut self, tag: &'l str) -> Result<(Option<Node>, &'l str)> {
        let malformed = || {
            XmlError::from(FormatError::MalformedTag(tag.to_string()))
                .with_context("expected '<name ...>' or '<name ... />'")
        };

        let body = tag.strip_prefix('<').ok_or_else(malformed)?;
        let (name, mut rest) = split_at_any(body, &[' ', '/', '>']).ok_or_else(malformed)?;
        if !is_valid_name(name) {
            return Err(NameError::InvalidElementName(name.to_string()).into());
        }

        let mut node = Node::new(name)?;
        rest = self.parse_attributes(&mut node, rest, tag)?;

        self.context.enter_nested(&self.config)?;
        self.stack.push(node);

        if let Some(after) = rest.strip_prefix("/>") {
            let root = self.close(name)?;
            return Ok((root, after));
        }

        let after = rest.strip_prefix('>').ok_or_else(malformed)?;
        let (text, after) = split_text_run(after);
        if !text.is_empty() {
            self.set_open_text(text)?;
        }
        Ok((None, after))
    }

    /// Reads `name="value"` pairs into `node` until `/` or `>`.
    fn parse_attributes<'l>(&self, node: &mut Node, mut rest: &'l str, tag: &str) -> Result<&'l str> {
        let malformed = || {
            XmlError::from(FormatError::MalformedTag(tag.to_string()))
                .with_context("expected attributes of the form name=\"value\"")
        };

        loop {
            rest = rest.trim_start_matches(' ');
            match rest.chars().next() {
                Some('/' | '>') => return Ok(rest),
                Some(_) => {}
                None => return Err(malformed()),
            }

            let (attr_name, after) =
                split_at_any(rest, &['=', ' ', '/', '>']).ok_or_else(malformed)?;
            let after = after.strip_prefix('=').ok_or_else(malformed)?;
            if !is_valid_name(attr_name) {
                return Err(StructureError::InvalidAttributeName(attr_name.to_string()).into());
            }

            let quoted = after.strip_prefix('"').ok_or_else(malformed)?;
            let (raw_value, after) = quoted.split_once('"').ok_or_else(malformed)?;
            let value = decode(raw_value);
            self.config.validate_text(&value)?;
            node.add_attribute(attr_name, value)?;
            rest = after;
        }
    }

    /// Applies a closing tag for `name`.
    ///
    /// Returns the root once the outermost element closes.
    fn close(&mut self, name: &str) -> Result<Option<Node>> {
        let closed = match self.stack.pop() {
            Some(top) if top.name() == name => top,
            Some(top) => {
                return Err(StructureError::MismatchedClosingTag {
                    expected: top.name().to_string(),
                    found: name.to_string(),
                }
                .into())
            }
            None => return Err(StructureError::UnexpectedClosingTag(name.to_string()).into()),
        };
        self.context.exit_nested();

        match self.stack.last_mut() {
            Some(parent) => {
                parent.append_child(closed)?;
                Ok(None)
            }
            None => Ok(Some(closed)),
        }
    }

    /// Replaces the text of the innermost open element.
    fn set_open_text(&mut self, raw: &str) -> Result<()> {
        let text = decode(raw);
        self.config.validate_text(&text)?;
        let open = self
            .stack
            .last_mut()
            .ok_or_else(|| XmlError::from(FormatError::TextOutsideElement))?;
        open.set_text(text);
        Ok(())
    }
}

/// Splits `s` before the first character found in `delims`.
fn split_at_any<'s>(s: &'s str, delims: &[char]) -> Option<(&'s str, &'s str)> {
    s.find(delims).map(|pos| s.split_at(pos))
}

/// Splits a text run off the front of `s`, ending before the next `<`.
fn split_text_run(s: &str) -> (&str, &str) {
    match s.find('<') {
        Some(pos) => s.split_at(pos),
        None => (s, ""),
    }
}

/// Parses a complete document held in memory.
pub fn parse_str(input: &str) -> Result<Node> {
    Parser::new(input).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SecurityError, XmlErrorKind};

    fn doc(body: &str) -> String {
        format!("{PROLOG}\n{body}")
    }

    #[test]
    fn test_parse_self_closing_root() -> Result<()> {
        let root = parse_str(&doc("<empty />"))?;
        assert_eq!(root.name(), "empty");
        assert_eq!(root.children_count(), 0);
        Ok(())
    }

    #[test]
    fn test_parse_self_closing_without_space() -> Result<()> {
        let root = parse_str(&doc("<r>\n<a k=\"v\"/>\n<b/>\n</r>"))?;
        assert_eq!(root.children_count(), 2);
        assert_eq!(root.child(0)?.attribute_value("k")?, "v");
        assert_eq!(root.child(1)?.name(), "b");
        Ok(())
    }

    #[test]
    fn test_parse_leaf_text_decoded() -> Result<()> {
        let root = parse_str(&doc("<r>\n<t>a &amp; b</t>\n</r>"))?;
        assert_eq!(root.child(0)?.text(), Some("a & b"));
        Ok(())
    }

    #[test]
    fn test_text_line_last_assignment_wins() -> Result<()> {
        let root = parse_str(&doc("<r>\nfirst\n<c />\nsecond\n</r>"))?;
        assert_eq!(root.text(), Some("second"));
        assert_eq!(root.children_count(), 1);
        Ok(())
    }

    #[test]
    fn test_attribute_value_with_slash_and_gt() -> Result<()> {
        let root = parse_str(&doc("<link href=\"a/b&gt;c\" />"))?;
        assert_eq!(root.attribute_value("href")?, "a/b>c");
        Ok(())
    }

    #[test]
    fn test_duplicate_attribute_overwrites() -> Result<()> {
        let root = parse_str(&doc("<r a=\"1\" b=\"2\" a=\"3\" />"))?;
        assert_eq!(root.attributes_count(), 2);
        assert_eq!(root.attribute_value_at(0)?, "3");
        Ok(())
    }

    #[test]
    fn test_text_after_tag_ends_at_next_tag() -> Result<()> {
        let root = parse_str(&doc("<a><b />tail</a>"))?;
        assert_eq!(root.text(), Some("tail"));
        assert_eq!(root.children_count(), 1);
        assert_eq!(root.child(0)?.name(), "b");
        Ok(())
    }

    #[test]
    fn test_text_after_tag_in_nested_element() -> Result<()> {
        let root = parse_str(&doc("<r>\n<a><b />x</a>\n</r>"))?;
        assert_eq!(root.children_count(), 1);
        let a = root.child(0)?;
        assert_eq!(a.text(), Some("x"));
        assert_eq!(a.children_count(), 1);
        Ok(())
    }

    #[test]
    fn test_text_line_followed_by_tag() -> Result<()> {
        let root = parse_str(&doc("<r>\nlead<c />\n</r>"))?;
        assert_eq!(root.text(), Some("lead"));
        assert_eq!(root.child(0)?.name(), "c");
        Ok(())
    }

    #[test]
    fn test_malformed_tag_carries_context() {
        let err = parse_str(&doc("<r a=1 />")).unwrap_err();
        assert!(err.context().is_some_and(|c| c.contains("name=")));
    }

    #[test]
    fn test_content_after_root_is_ignored() -> Result<()> {
        let root = parse_str(&doc("<r />\n<other>\ngarbage"))?;
        assert_eq!(root.name(), "r");
        Ok(())
    }

    #[test]
    fn test_mismatch_on_single_line() {
        let err = parse_str(&doc("<a><b></c></a>")).unwrap_err();
        assert!(matches!(
            err.kind(),
            XmlErrorKind::Structure(StructureError::MismatchedClosingTag { .. })
        ));
        assert_eq!(err.location().map(|l| l.line), Some(2));
    }

    #[test]
    fn test_invalid_attribute_name_is_structure_error() {
        let err = parse_str(&doc("<r 1x=\"v\" />")).unwrap_err();
        assert!(matches!(
            err.kind(),
            XmlErrorKind::Structure(StructureError::InvalidAttributeName(_))
        ));
    }

    #[test]
    fn test_invalid_element_name_is_name_error() {
        let err = parse_str(&doc("<1r />")).unwrap_err();
        assert!(matches!(
            err.kind(),
            XmlErrorKind::Name(NameError::InvalidElementName(_))
        ));
    }

    #[test]
    fn test_malformed_tags() {
        for body in ["<r", "<r a=1 />", "<r a=\"1 />", "<r flag />", "<r /"] {
            let err = parse_str(&doc(body)).unwrap_err();
            assert!(
                matches!(err.kind(), XmlErrorKind::Format(FormatError::MalformedTag(_))),
                "{body}: {err}"
            );
        }
    }

    #[test]
    fn test_text_outside_element() {
        let err = parse_str(&doc("loose text")).unwrap_err();
        assert!(matches!(
            err.kind(),
            XmlErrorKind::Format(FormatError::TextOutsideElement)
        ));
    }

    #[test]
    fn test_closing_without_open() {
        let err = parse_str(&doc("</r>")).unwrap_err();
        assert!(matches!(
            err.kind(),
            XmlErrorKind::Structure(StructureError::UnexpectedClosingTag(_))
        ));
    }

    #[test]
    fn test_unclosed_and_missing_root() {
        let err = parse_str(&doc("<r>\n<c>")).unwrap_err();
        assert_eq!(
            err.kind(),
            &XmlErrorKind::Format(FormatError::UnclosedElement("c".to_string()))
        );

        let err = parse_str(&doc("")).unwrap_err();
        assert_eq!(err.kind(), &XmlErrorKind::Format(FormatError::MissingRoot));
    }

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig {
            max_depth: 2,
            ..ParserConfig::default()
        };
        let input = doc("<a>\n<b>\n<c />\n</b>\n</a>");
        let err = Parser::with_config(&input, config).parse().unwrap_err();
        assert_eq!(
            err.kind(),
            &XmlErrorKind::Security(SecurityError::MaxDepthExceeded)
        );
    }

    #[test]
    fn test_size_limit() {
        let config = ParserConfig {
            max_size: 10,
            ..ParserConfig::default()
        };
        let input = doc("<a />");
        let err = Parser::with_config(&input, config).parse().unwrap_err();
        assert_eq!(
            err.kind(),
            &XmlErrorKind::Security(SecurityError::MaxSizeExceeded)
        );
    }
}
