use crate::parsing::{Document, Node};

use super::error::EncodeError;
use super::{HEADER_LEN, TAG_BLOCK, TAG_PHRASE};

/// Encodes `document` into the wire layout.
///
/// Fails when a block name, child count or offset does not fit its field.
pub fn encode(document: &Document<'_>) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::with_capacity(HEADER_LEN + 16 * document.len());

    // total_length is patched in once the body is written
    buf.extend_from_slice(&[0; 4]);
    put_u32(&mut buf, "node count", document.len())?;
    for node in document {
        encode_node(&mut buf, node)?;
    }

    let total = to_u32("buffer length", buf.len())?;
    buf[..4].copy_from_slice(&total.to_le_bytes());

    log::debug!("encoded {} top-level nodes into {total} bytes", document.len());
    Ok(buf)
}

fn encode_node(buf: &mut Vec<u8>, node: &Node<'_>) -> Result<(), EncodeError> {
    match node {
        Node::Block(block) => {
            let name = block.name.as_str();
            let name_len = u8::try_from(name.len()).map_err(|_| EncodeError::NameTooLong {
                name: name.to_string(),
                len: name.len(),
            })?;
            let child_count =
                u8::try_from(block.children.len()).map_err(|_| EncodeError::TooManyChildren {
                    name: name.to_string(),
                    count: block.children.len(),
                })?;
            let (attrs_offset, attrs_len) = block
                .attributes
                .as_ref()
                .map_or((0, 0), |a| (a.span.start, a.span.len()));

            buf.push(TAG_BLOCK);
            buf.push(name_len);
            buf.extend_from_slice(name.as_bytes());
            put_u32(buf, "attributes offset", attrs_offset)?;
            put_u32(buf, "attributes length", attrs_len)?;
            buf.push(child_count);
            for child in &block.children {
                encode_node(buf, child)?;
            }
        }
        Node::Phrase(phrase) => {
            buf.push(TAG_PHRASE);
            put_u32(buf, "phrase offset", phrase.span.start)?;
            put_u32(buf, "phrase length", phrase.span.len())?;
        }
    }
    Ok(())
}

fn put_u32(buf: &mut Vec<u8>, what: &'static str, value: usize) -> Result<(), EncodeError> {
    buf.extend_from_slice(&to_u32(what, value)?.to_le_bytes());
    Ok(())
}

fn to_u32(what: &'static str, value: usize) -> Result<u32, EncodeError> {
    u32::try_from(value).map_err(|_| EncodeError::Overflow { what, value })
}
