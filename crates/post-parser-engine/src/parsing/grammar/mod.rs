//! # Grammar
//!
//! Recursive descent over a [`Cursor`], one function per rule:
//!
//! ```text
//! block_list  = { block | phrase } ;
//! block       = balanced | void ;
//! balanced    = opener(-->) , block_list , closer(same name) ;
//! void        = opener(/-->) ;
//! opener      = "<!--" , ws* , "wp:" , block_name , ws+ , [ attributes ] , ws* ;
//! closer      = "<!--" , ws* , "/wp:" , block_name , ws* , "-->" ;
//! block_name  = [ part , "/" ] , part ;
//! part        = [a-z] , { [a-z0-9-] } ;
//! phrase      = anything up to the next "<!--" that starts a block ;
//! ```
//!
//! Alternatives are tried in that order at every `<!--`. Whatever is not a
//! block stays in the current phrase, so the grammar has no reject state.
//!
//! Inside a balanced block only a closer repeating the opener's name text
//! ends the children. Any other closer is phrase text. If the input ends
//! first, the opener is not a block and is re-read as phrase text by the
//! enclosing list.

mod attributes;
mod block;

use std::collections::{HashMap, HashSet};

use super::cursor::Cursor;
use super::error::ParseError;
use super::kinds::Marker;
use super::node::{Block, BlockName, Document, Node, Phrase};
use super::options::ParseOptions;
use super::span::Span;

use attributes::AttributeEnds;

/// How a block list stopped.
enum ListEnd {
    /// The input ran out.
    Eof,
    /// The enclosing block's closer was consumed.
    Closer,
}

/// Grammar state for one parse of `input`.
pub(crate) struct Grammar<'o, 'a> {
    options: &'o ParseOptions,
    input: &'a str,
    /// Offsets of `<!--` known not to start a block.
    ///
    /// Whether a marker starts a block depends only on the text after it,
    /// so a marker that failed once fails everywhere. Without this, every
    /// enclosing attempt would re-explore the same dead openers and a run of
    /// unclosed openers would take exponential time.
    not_blocks: HashSet<usize>,
    /// Offset of the last closer for each name text.
    last_closers: HashMap<&'a str, usize>,
    attribute_ends: AttributeEnds,
}

impl<'o, 'a> Grammar<'o, 'a> {
    pub(crate) fn new(options: &'o ParseOptions, input: &'a str) -> Self {
        Self {
            options,
            input,
            not_blocks: HashSet::new(),
            last_closers: block::last_closers(input),
            attribute_ends: AttributeEnds::default(),
        }
    }

    /// Axiom of the grammar.
    pub(crate) fn document(&mut self) -> Result<Document<'a>, ParseError> {
        let mut cur = Cursor::new(self.input);
        let (nodes, _) = self.block_list(&mut cur, 0, None)?;
        log::trace!(
            "attribute scans examined {} bytes, {} markers are not blocks",
            self.attribute_ends.scanned(),
            self.not_blocks.len()
        );
        Ok(Document::new(nodes))
    }

    /// Recognizes `{ block | phrase }` until the input ends or, when
    /// `enclosing` is set, until that block's closer.
    fn block_list(
        &mut self,
        cur: &mut Cursor<'a>,
        depth: usize,
        enclosing: Option<BlockName<'a>>,
    ) -> Result<(Vec<Node<'a>>, ListEnd), ParseError> {
        let mut out = vec![];
        let mut text_start = cur.pos();

        // Helper to flush accumulated text as a Phrase node
        fn flush_phrase<'a>(out: &mut Vec<Node<'a>>, s: &'a str, start: usize, end: usize) {
            if end > start {
                out.push(Node::Phrase(Phrase {
                    span: Span::new(start, end),
                    content: &s[start..end],
                }));
            }
        }

        loop {
            match cur.find(Marker::OPEN) {
                Some(offset) => cur.bump_n(offset),
                None => {
                    cur.bump_to_end();
                    break;
                }
            }
            let marker_start = cur.pos();

            if let Some(name) = enclosing
                && block::closer(cur, name)
            {
                flush_phrase(&mut out, cur.s, text_start, marker_start);
                return Ok((out, ListEnd::Closer));
            }

            if let Some(node) = self.block(cur, depth)? {
                flush_phrase(&mut out, cur.s, text_start, marker_start);
                out.push(node);
                text_start = cur.pos();
                continue;
            }

            // Not a block here: the `<!--` stays in the running phrase.
            cur.bump_n(Marker::OPEN.len());
        }

        flush_phrase(&mut out, cur.s, text_start, cur.pos());
        Ok((out, ListEnd::Eof))
    }

    /// Recognizes a balanced or void block at the cursor.
    ///
    /// Returns `Ok(None)` with the cursor untouched when there is no block
    /// here. Nesting past the depth limit is an error only for an opener
    /// whose closer follows somewhere; one without is phrase text at any
    /// depth.
    fn block(&mut self, cur: &mut Cursor<'a>, depth: usize) -> Result<Option<Node<'a>>, ParseError> {
        let saved = cur.clone();
        let start = cur.pos();
        if self.not_blocks.contains(&start) {
            return Ok(None);
        }

        let Some(opener) = block::opener(cur, self.options.attribute_scan, &mut self.attribute_ends)
        else {
            self.not_blocks.insert(start);
            return Ok(None);
        };

        if opener.void {
            return Ok(Some(Node::Block(Block {
                name: opener.name,
                attributes: opener.attributes,
                children: vec![],
            })));
        }

        let closer_follows = self
            .last_closers
            .get(opener.name.as_str())
            .is_some_and(|&closer| closer >= cur.pos());
        if !closer_follows {
            log::trace!(
                "no closer for `{}` after byte {start}, reading it as phrase text",
                opener.name.as_str()
            );
            self.not_blocks.insert(start);
            *cur = saved;
            return Ok(None);
        }

        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(ParseError::DepthExceeded {
                max_depth: self.options.max_depth,
                offset: start,
            });
        }

        let (children, end) = self.block_list(cur, depth, Some(opener.name))?;
        match end {
            ListEnd::Closer => Ok(Some(Node::Block(Block {
                name: opener.name,
                attributes: opener.attributes,
                children,
            }))),
            ListEnd::Eof => {
                log::trace!(
                    "closer for `{}` opened at byte {start} is never reached, reading it as phrase text",
                    opener.name.as_str()
                );
                self.not_blocks.insert(start);
                *cur = saved;
                Ok(None)
            }
        }
    }
}
