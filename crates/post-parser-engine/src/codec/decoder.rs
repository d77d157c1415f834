use std::collections::HashMap;

use crate::parsing::span::Span;
use crate::parsing::{Attributes, Block, BlockName, DEFAULT_MAX_DEPTH, Document, Node, Phrase};

use super::error::DecodeError;
use super::reader::Reader;
use super::{TAG_BLOCK, TAG_PHRASE};

/// Rebuilds documents from wire buffers encoded against one input.
///
/// Block names seen once are remembered, so decoding many buffers of the
/// same post (or one buffer with many paragraphs) validates each distinct
/// name once. A `Decoder` is not shared between threads; make one per
/// thread instead.
pub struct Decoder<'a> {
    input: &'a str,
    max_depth: usize,
    names: NameTable<'a>,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            max_depth: DEFAULT_MAX_DEPTH,
            names: NameTable::default(),
        }
    }

    /// Sets how many levels of blocks with children are accepted.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn decode(&mut self, buffer: &'a [u8]) -> Result<Document<'a>, DecodeError> {
        let mut reader = Reader::new(buffer);

        let declared = reader.u32()? as usize;
        if declared != buffer.len() {
            return Err(DecodeError::LengthMismatch {
                declared,
                actual: buffer.len(),
            });
        }
        let count = reader.u32()? as usize;

        let nodes = self.nodes(&mut reader, count, 0)?;
        if reader.remaining() > 0 {
            return Err(DecodeError::TrailingBytes {
                offset: reader.pos(),
                count: reader.remaining(),
            });
        }

        log::debug!("decoded {} top-level nodes from {} bytes", nodes.len(), buffer.len());
        Ok(Document::new(nodes))
    }

    fn nodes(
        &mut self,
        reader: &mut Reader<'a>,
        count: usize,
        depth: usize,
    ) -> Result<Vec<Node<'a>>, DecodeError> {
        // A corrupt count must not drive the allocation; every node takes at
        // least nine bytes.
        let mut nodes = Vec::with_capacity(count.min(reader.remaining() / 9));
        for _ in 0..count {
            nodes.push(self.node(reader, depth)?);
        }
        Ok(nodes)
    }

    fn node(&mut self, reader: &mut Reader<'a>, depth: usize) -> Result<Node<'a>, DecodeError> {
        let offset = reader.pos();
        match reader.u8()? {
            TAG_BLOCK => self.block(reader, depth).map(Node::Block),
            TAG_PHRASE => {
                let (span, content) = self
                    .span(reader)?
                    .ok_or(DecodeError::EmptyPhrase { offset })?;
                Ok(Node::Phrase(Phrase { span, content }))
            }
            tag => Err(DecodeError::UnknownTag { offset, tag }),
        }
    }

    fn block(&mut self, reader: &mut Reader<'a>, depth: usize) -> Result<Block<'a>, DecodeError> {
        let name_len = reader.u8()? as usize;
        let name_offset = reader.pos();
        let raw = reader.bytes(name_len)?;
        let name = self
            .names
            .resolve(raw)
            .ok_or(DecodeError::InvalidName {
                offset: name_offset,
            })?;

        let attributes = self
            .span(reader)?
            .map(|(span, text)| Attributes { span, text });

        let children_offset = reader.pos();
        let count = reader.u8()? as usize;
        if count > 0 && depth + 1 > self.max_depth {
            return Err(DecodeError::DepthExceeded {
                offset: children_offset,
                max_depth: self.max_depth,
            });
        }
        let children = self.nodes(reader, count, depth + 1)?;

        Ok(Block {
            name,
            attributes,
            children,
        })
    }

    /// Reads an `offset:u32, len:u32` pair and resolves it against the input.
    ///
    /// A zero length reads as `None`.
    fn span(&self, reader: &mut Reader<'a>) -> Result<Option<(Span, &'a str)>, DecodeError> {
        let offset = reader.pos();
        let start = reader.u32()? as usize;
        let len = reader.u32()? as usize;
        if len == 0 {
            return Ok(None);
        }
        let end = start.saturating_add(len);
        let span = Span::new(start, end);

        span.slice(self.input)
            .map(|text| Some((span, text)))
            .ok_or(DecodeError::SpanOutOfBounds {
                offset,
                start,
                end,
                input_len: self.input.len(),
            })
    }
}

/// Block names already validated, keyed by their bytes in the buffer.
#[derive(Default)]
struct NameTable<'a> {
    names: HashMap<&'a [u8], BlockName<'a>>,
}

impl<'a> NameTable<'a> {
    fn resolve(&mut self, raw: &'a [u8]) -> Option<BlockName<'a>> {
        if let Some(name) = self.names.get(raw) {
            return Some(*name);
        }
        let name = std::str::from_utf8(raw).ok().and_then(BlockName::parse)?;
        self.names.insert(raw, name);
        Some(name)
    }
}
