use std::collections::HashMap;

use crate::parsing::cursor::Cursor;
use crate::parsing::kinds::{BlockNamePart, Marker};
use crate::parsing::node::{Attributes, BlockName};
use crate::parsing::options::AttributeScan;

use super::attributes::{AttributeEnds, block_attributes};

/// A recognized block opener.
pub(super) struct Opener<'a> {
    pub name: BlockName<'a>,
    pub attributes: Option<Attributes<'a>>,
    /// Ended with `/-->`.
    pub void: bool,
}

/// Recognizes `<!-- wp:name {attrs} -->` or `<!-- wp:name {attrs} /-->`.
///
/// On failure the cursor is restored.
pub(super) fn opener<'a>(
    cur: &mut Cursor<'a>,
    scan: AttributeScan,
    ends: &mut AttributeEnds,
) -> Option<Opener<'a>> {
    let saved = cur.clone();
    let opener = try_opener(cur, scan, ends);
    if opener.is_none() {
        *cur = saved;
    }
    opener
}

fn try_opener<'a>(
    cur: &mut Cursor<'a>,
    scan: AttributeScan,
    ends: &mut AttributeEnds,
) -> Option<Opener<'a>> {
    if !cur.eat(Marker::OPEN.as_bytes()) {
        return None;
    }
    cur.eat_whitespace();
    if !cur.eat(Marker::OPENER) {
        return None;
    }
    let name = block_name(cur)?;
    if cur.eat_whitespace() == 0 {
        return None;
    }
    let attributes = block_attributes(cur, scan, ends);
    cur.eat_whitespace();

    let void = if cur.eat(Marker::VOID_CLOSE) {
        true
    } else if cur.eat(Marker::CLOSE) {
        false
    } else {
        return None;
    };

    Some(Opener {
        name,
        attributes,
        void,
    })
}

/// Recognizes `<!-- /wp:name -->` whose name text is exactly `expected`.
///
/// Consumes the closer and returns true on a match; otherwise the cursor is
/// restored.
pub(super) fn closer(cur: &mut Cursor<'_>, expected: BlockName<'_>) -> bool {
    let saved = cur.clone();
    let matched = try_closer(cur).is_some_and(|name| name.as_str() == expected.as_str());
    if !matched {
        *cur = saved;
    }
    matched
}

fn try_closer<'a>(cur: &mut Cursor<'a>) -> Option<BlockName<'a>> {
    if !cur.eat(Marker::OPEN.as_bytes()) {
        return None;
    }
    cur.eat_whitespace();
    if !cur.eat(Marker::CLOSER) {
        return None;
    }
    let name = block_name(cur)?;
    cur.eat_whitespace();
    cur.eat(Marker::CLOSE).then_some(name)
}

/// Offset of the last closer for each name text in `input`.
///
/// A balanced opener can only succeed if a closer with its name text
/// starts somewhere after it.
pub(super) fn last_closers(input: &str) -> HashMap<&str, usize> {
    let mut closers = HashMap::new();
    let mut cur = Cursor::new(input);
    while let Some(offset) = cur.find(Marker::OPEN) {
        cur.bump_n(offset);
        let saved = cur.clone();
        match try_closer(&mut cur) {
            Some(name) => {
                closers.insert(name.as_str(), saved.pos());
            }
            None => {
                cur = saved;
                cur.bump_n(Marker::OPEN.len());
            }
        }
    }
    closers
}

/// Recognizes `namespace/name` or `name`, preferring the namespaced form.
fn block_name<'a>(cur: &mut Cursor<'a>) -> Option<BlockName<'a>> {
    let start = cur.pos();
    block_name_part(cur)?;

    let after_first = cur.clone();
    if !(cur.eat(&[BlockNamePart::SEPARATOR]) && block_name_part(cur).is_some()) {
        *cur = after_first;
    }

    Some(BlockName::from_matched(cur.slice_from(start)))
}

/// Recognizes `[a-z][a-z0-9-]*`.
fn block_name_part(cur: &mut Cursor<'_>) -> Option<()> {
    if !cur.peek().is_some_and(BlockNamePart::is_start) {
        return None;
    }
    cur.bump();
    cur.eat_while(BlockNamePart::is_continue);
    Some(())
}
