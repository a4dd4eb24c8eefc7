//! The owning tree entity.
//!
//! A [`Node`] exclusively owns its attributes and its whole subtree. Dropping a
//! node drops every descendant; cloning it copies the whole subtree.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{AttributeError, IndexError, NameError, Result, XmlError};
use crate::name::is_valid_name;
use crate::parser::Parser;
use crate::serializer::Serializer;

/// An element with a validated name, optional text, ordered unique attributes
/// and ordered children.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    text: Option<String>,
    attributes: IndexMap<String, String>,
    children: Vec<Node>,
}

impl Node {
    /// Creates a standalone node with no parent.
    ///
    /// Fails with a name error if `name` does not satisfy the name grammar.
    pub fn new(name: &str) -> Result<Self> {
        if !is_valid_name(name) {
            return Err(NameError::InvalidElementName(name.to_string()).into());
        }
        Ok(Self {
            name: name.to_string(),
            text: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inline text, if any. Empty text is reported as `None`.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replaces the inline text. Setting an empty string clears it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.text = if text.is_empty() { None } else { Some(text) };
    }

    pub fn clear_text(&mut self) {
        self.text = None;
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    // Children

    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self) -> &[Self] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Result<&Self> {
        let len = self.children.len();
        self.children
            .get(index)
            .ok_or_else(|| IndexError::ChildOutOfRange { index, len }.into())
    }

    pub fn child_mut(&mut self, index: usize) -> Result<&mut Self> {
        let len = self.children.len();
        self.children
            .get_mut(index)
            .ok_or_else(|| IndexError::ChildOutOfRange { index, len }.into())
    }

    /// Creates a child named `name`, appends it and returns it for further
    /// building.
    pub fn add_element(&mut self, name: &str) -> Result<&mut Self> {
        let child = Self::new(name)?;
        self.append_child(child)
    }

    /// Appends an already built subtree as the last child and returns it.
    pub fn append_child(&mut self, child: Self) -> Result<&mut Self> {
        trace!(parent = %self.name, child = %child.name, "appending child");
        self.children.push(child);
        let len = self.children.len();
        self.children.last_mut().ok_or_else(|| {
            IndexError::ChildOutOfRange {
                index: len.saturating_sub(1),
                len,
            }
            .into()
        })
    }

    /// Removes and drops the child at `index`. Later children shift down by one.
    pub fn remove_element(&mut self, index: usize) -> Result<()> {
        let len = self.children.len();
        if index >= len {
            return Err(IndexError::ChildOutOfRange { index, len }.into());
        }
        let removed = self.children.remove(index);
        trace!(parent = %self.name, child = %removed.name, index, "removed child");
        Ok(())
    }

    /// First direct child named `name` that carries attribute
    /// `attr_name="attr_value"`. Descendants below the children are not searched.
    pub fn find_element(&self, name: &str, attr_name: &str, attr_value: &str) -> Option<&Self> {
        self.children
            .iter()
            .find(|child| child.matches(name, attr_name, attr_value))
    }

    pub fn find_element_mut(
        &mut self,
        name: &str,
        attr_name: &str,
        attr_value: &str,
    ) -> Option<&mut Self> {
        self.children
            .iter_mut()
            .find(|child| child.matches(name, attr_name, attr_value))
    }

    fn matches(&self, name: &str, attr_name: &str, attr_value: &str) -> bool {
        self.name == name
            && self
                .attributes
                .get(attr_name)
                .is_some_and(|value| value == attr_value)
    }

    // Attributes

    pub fn attributes_count(&self) -> usize {
        self.attributes.len()
    }

    /// Attributes as `(name, value)` pairs in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Adds an attribute, or overwrites the value of an existing one in place.
    pub fn add_attribute(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        if !is_valid_name(name) {
            return Err(NameError::InvalidAttributeName(name.to_string()).into());
        }
        // an existing key keeps its position
        self.attributes.insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn attribute_name(&self, index: usize) -> Result<&str> {
        self.attributes
            .get_index(index)
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| self.no_such_attribute(index))
    }

    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.get_index_of(name)
    }

    pub fn attribute_value_at(&self, index: usize) -> Result<&str> {
        self.attributes
            .get_index(index)
            .map(|(_, value)| value.as_str())
            .ok_or_else(|| self.no_such_attribute(index))
    }

    pub fn attribute_value(&self, name: &str) -> Result<&str> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| AttributeError::NotFound(name.to_string()).into())
    }

    /// Removes the attribute at `index`. Later attributes shift down by one.
    pub fn remove_attribute(&mut self, index: usize) -> Result<()> {
        let len = self.attributes.len();
        match self.attributes.shift_remove_index(index) {
            Some(_) => Ok(()),
            None => Err(IndexError::AttributeOutOfRange { index, len }.into()),
        }
    }

    fn no_such_attribute(&self, index: usize) -> XmlError {
        AttributeError::NoSuchIndex {
            index,
            len: self.attributes.len(),
        }
        .into()
    }

    // Whole tree

    /// Full copy of this node and its subtree.
    pub fn deep_clone(&self) -> Self {
        self.clone()
    }

    /// Number of elements in this subtree, including `self`.
    pub fn element_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Self::element_count)
            .sum::<usize>()
    }

    /// Serializes the tree and overwrites the file at `path`.
    pub fn save(&self, path: &str) -> Result<()> {
        crate::save_file(self, path)
    }

    /// Reads and parses the file at `path` into a new tree.
    pub fn parse(path: &str) -> Result<Self> {
        crate::parse_file(path)
    }
}

/// Structural equality. Unlike the underlying map, attribute order matters.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.text == other.text
            && self.attributes.iter().eq(other.attributes.iter())
            && self.children == other.children
    }
}

impl Eq for Node {}

/// Writes the complete document, prolog included.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Serializer::new().serialize(self))
    }
}

impl FromStr for Node {
    type Err = XmlError;

    fn from_str(s: &str) -> Result<Self> {
        Parser::new(s).parse()
    }
}
