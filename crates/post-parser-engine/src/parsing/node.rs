use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

use super::kinds::BlockNamePart;
use super::span::Span;

/// A parsed post: the top-level nodes in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document<'a> {
    pub nodes: Vec<Node<'a>>,
}

impl<'a> Document<'a> {
    pub fn new(nodes: Vec<Node<'a>>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node<'a>> {
        self.nodes.iter()
    }

    /// Walks every node of the tree in document (pre-)order.
    pub fn descendants(&self) -> Descendants<'_, 'a> {
        Descendants {
            stack: self.nodes.iter().rev().collect(),
        }
    }

    /// Iterates over every block of the tree in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block<'a>> {
        self.descendants().filter_map(|node| match node {
            Node::Block(block) => Some(block),
            Node::Phrase(_) => None,
        })
    }
}

impl<'d, 'a> IntoIterator for &'d Document<'a> {
    type Item = &'d Node<'a>;
    type IntoIter = std::slice::Iter<'d, Node<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Pre-order iterator returned by [`Document::descendants`].
pub struct Descendants<'d, 'a> {
    stack: Vec<&'d Node<'a>>,
}

impl<'d, 'a> Iterator for Descendants<'d, 'a> {
    type Item = &'d Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Block(block) = node {
            self.stack.extend(block.children.iter().rev());
        }
        Some(node)
    }
}

/// A node of the tree. The variant set is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node<'a> {
    Block(Block<'a>),
    Phrase(Phrase<'a>),
}

/// A block delimited by `<!-- wp:… -->` markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub name: BlockName<'a>,
    pub attributes: Option<Attributes<'a>>,
    /// Empty for void blocks.
    pub children: Vec<Node<'a>>,
}

impl Serialize for Block<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Block", 4)?;
        state.serialize_field("namespace", self.name.namespace())?;
        state.serialize_field("name", self.name.name())?;
        state.serialize_field("attributes", &self.attributes.as_ref().map(|a| a.text))?;
        state.serialize_field("children", &self.children)?;
        state.end()
    }
}

/// Raw text between or around blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase<'a> {
    pub span: Span,
    pub content: &'a str,
}

impl Serialize for Phrase<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Phrase", 1)?;
        state.serialize_field("content", self.content)?;
        state.end()
    }
}

/// The unparsed JSON text following a block name.
///
/// Only the brace-delimited extent was checked while parsing; the content is
/// whatever the author wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes<'a> {
    pub span: Span,
    pub text: &'a str,
}

impl Attributes<'_> {
    /// Parses the attribute text as JSON.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(self.text)
    }
}

/// A block name exactly as written: `namespace/name` or just `name`.
///
/// Equality is lexical. `core/foo` and `foo` name the same block type but
/// are different `BlockName`s, which is what closer matching requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockName<'a>(&'a str);

impl<'a> BlockName<'a> {
    /// Validates `raw` as one or two `/`-separated name parts.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let valid = match raw.split_once(BlockNamePart::SEPARATOR as char) {
            Some((namespace, name)) => {
                BlockNamePart::is_valid(namespace) && BlockNamePart::is_valid(name)
            }
            None => BlockNamePart::is_valid(raw),
        };
        valid.then_some(Self(raw))
    }

    /// Wraps text the grammar has already matched.
    pub(crate) fn from_matched(raw: &'a str) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// The namespace, `core` when the name has no prefix.
    pub fn namespace(&self) -> &'a str {
        match self.0.split_once(BlockNamePart::SEPARATOR as char) {
            Some((namespace, _)) => namespace,
            None => BlockNamePart::DEFAULT_NAMESPACE,
        }
    }

    pub fn name(&self) -> &'a str {
        match self.0.split_once(BlockNamePart::SEPARATOR as char) {
            Some((_, name)) => name,
            None => self.0,
        }
    }

    pub fn is_namespaced(&self) -> bool {
        self.0.contains(BlockNamePart::SEPARATOR as char)
    }
}

impl fmt::Display for BlockName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace(), self.name())
    }
}
