use std::collections::HashMap;

use crate::parsing::cursor::Cursor;
use crate::parsing::kinds::Marker;
use crate::parsing::node::Attributes;
use crate::parsing::options::AttributeScan;
use crate::parsing::span::Span;

const OBJECT_OPEN: u8 = b'{';
const OBJECT_CLOSE: u8 = b'}';
const QUOTE: u8 = b'"';
const ESCAPE: u8 = b'\\';

/// Recognizes the attribute object of an opener.
///
/// Only the extent is checked, never the JSON itself. Returns `None` with
/// the cursor untouched when the cursor is not at `{` or no acceptable end
/// is found.
pub(super) fn block_attributes<'a>(
    cur: &mut Cursor<'a>,
    scan: AttributeScan,
    ends: &mut AttributeEnds,
) -> Option<Attributes<'a>> {
    if cur.peek() != Some(OBJECT_OPEN) {
        return None;
    }
    let start = cur.pos();
    let end = match scan {
        AttributeScan::Lookahead => ends.lookahead_end(cur),
        AttributeScan::Balanced => ends.balanced_end(cur),
    }?;

    cur.bump_n(end - start);
    Some(Attributes {
        span: Span::new(start, end),
        text: cur.slice_from(start),
    })
}

/// The last lookahead search: it started at `from` and found the closing
/// `}` at `brace`, or nothing up to the end of input.
#[derive(Clone, Copy)]
struct LookaheadHit {
    from: usize,
    brace: Option<usize>,
}

impl LookaheadHit {
    /// Every start in `from..=brace` finds the same `}`.
    fn covers(self, pos: usize) -> bool {
        self.from <= pos && self.brace.is_none_or(|brace| pos <= brace)
    }
}

/// Attribute extents already worked out during one parse.
///
/// Openers are retried at the same offsets whenever an enclosing block
/// fails, and every `{` in hostile text may start an attempt. With these
/// caches each byte is scanned a bounded number of times.
#[derive(Default)]
pub(super) struct AttributeEnds {
    lookahead: Option<LookaheadHit>,
    /// Offset of the matching `}` for each `{` met outside a JSON string,
    /// `None` when it is never closed.
    matches: HashMap<usize, Option<usize>>,
    scanned: usize,
}

impl AttributeEnds {
    /// Bytes examined by scans so far.
    pub(super) fn scanned(&self) -> usize {
        self.scanned
    }

    /// End of the object under [`AttributeScan::Lookahead`]: just past the
    /// first `}` followed by a marker end.
    fn lookahead_end(&mut self, cur: &Cursor<'_>) -> Option<usize> {
        let start = cur.pos();
        let previous = self.lookahead;
        let mut ahead = cur.clone();

        let brace = loop {
            if let Some(hit) = previous
                && hit.covers(ahead.pos())
            {
                break hit.brace;
            }
            let Some(offset) = ahead.find("}") else {
                ahead.bump_to_end();
                break None;
            };
            ahead.bump_n(offset + 1);
            if at_marker_end(&ahead) {
                break Some(ahead.pos() - 1);
            }
        };

        self.scanned += ahead.pos() - start;
        self.lookahead = Some(LookaheadHit { from: start, brace });
        brace.map(|brace| brace + 1)
    }

    /// End of the object under [`AttributeScan::Balanced`]: just past the
    /// `}` closing the outermost `{`, provided a marker end follows it.
    fn balanced_end(&mut self, cur: &Cursor<'_>) -> Option<usize> {
        let start = cur.pos();
        let close = match self.matches.get(&start) {
            Some(close) => *close,
            None => self.match_braces(cur),
        }?;

        let mut ahead = cur.clone();
        ahead.bump_n(close + 1 - start);
        at_marker_end(&ahead).then(|| ahead.pos())
    }

    /// Scans from the `{` at the cursor to its matching `}`, recording the
    /// match of every `{` passed outside a string. Objects matched by an
    /// earlier scan are skipped whole.
    fn match_braces(&mut self, cur: &Cursor<'_>) -> Option<usize> {
        let start = cur.pos();
        let mut ahead = cur.clone();
        let mut open: Vec<usize> = vec![];
        let mut in_string = false;

        while let Some(b) = ahead.bump() {
            let at = ahead.pos() - 1;
            if in_string {
                match b {
                    ESCAPE => {
                        ahead.bump();
                    }
                    QUOTE => in_string = false,
                    _ => {}
                }
                continue;
            }
            match b {
                QUOTE => in_string = true,
                OBJECT_OPEN if at != start => match self.matches.get(&at) {
                    Some(Some(close)) => ahead.bump_n(close - at),
                    Some(None) => break,
                    None => open.push(at),
                },
                OBJECT_OPEN => open.push(at),
                OBJECT_CLOSE => {
                    let Some(opened) = open.pop() else {
                        continue;
                    };
                    self.matches.insert(opened, Some(at));
                    if opened == start {
                        self.scanned += ahead.pos() - start;
                        return Some(at);
                    }
                }
                _ => {}
            }
        }

        // Everything still open runs to the end of input unclosed.
        for opened in open {
            self.matches.insert(opened, None);
        }
        self.scanned += ahead.pos() - start;
        None
    }
}

/// Whether optional whitespace and then `-->` or `/-->` follow.
fn at_marker_end(cur: &Cursor<'_>) -> bool {
    let mut ahead = cur.clone();
    ahead.eat_whitespace();
    ahead.starts_with(Marker::VOID_CLOSE) || ahead.starts_with(Marker::CLOSE)
}
