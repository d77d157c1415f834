//! Bindings for hosts that consume parsed posts from another runtime.
//!
//! Two surfaces share one encoder:
//!
//! - a plain C ABI (`allocate`, `release`, `root`) for hosts that manage
//!   linear memory themselves, such as a WebAssembly embedder;
//! - UniFFI bindings (`PostHandle`, `encode_post`) for Kotlin and Swift.
//!
//! Both hand out the wire format of [`post_parser_engine::codec`]. Offsets in
//! it point into the text the host passed in, so the host keeps that text.

use std::ptr::{self, NonNull};

use post_parser_engine::{encode, parse};

mod region;

pub use region::Region;

uniffi::setup_scaffolding!();

/// Size of the `capacity:u32` prefix in front of a `root` result.
pub const CAPACITY_LEN: usize = 4;

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Input is not UTF-8: {reason}")]
    InvalidUtf8 { reason: String },

    #[error("Parse error: {reason}")]
    Parse { reason: String },

    #[error("Encode error: {reason}")]
    Encode { reason: String },
}

/// Parses `content` and encodes the resulting tree.
fn encode_text(content: &str) -> Result<Vec<u8>, FfiError> {
    let document = parse(content).map_err(|e| FfiError::Parse {
        reason: e.to_string(),
    })?;
    encode(&document).map_err(|e| FfiError::Encode {
        reason: e.to_string(),
    })
}

/// Builds the `capacity:u32 , buffer` region returned by [`root`].
fn encode_region(input: &[u8]) -> Result<Region, FfiError> {
    let content = std::str::from_utf8(input).map_err(|e| FfiError::InvalidUtf8 {
        reason: e.to_string(),
    })?;
    let wire = encode_text(content)?;

    let capacity = CAPACITY_LEN + wire.len();
    let capacity_field = u32::try_from(capacity).map_err(|_| FfiError::Encode {
        reason: format!("output of {capacity} bytes does not fit in 32 bits"),
    })?;

    let mut region = Region::zeroed(capacity);
    let bytes = region.as_mut_slice();
    bytes[..CAPACITY_LEN].copy_from_slice(&capacity_field.to_le_bytes());
    bytes[CAPACITY_LEN..].copy_from_slice(&wire);
    Ok(region)
}

// ============ C ABI ============

/// Reserves `size` zeroed bytes for the host to fill.
#[unsafe(no_mangle)]
pub extern "C" fn allocate(size: usize) -> *mut u8 {
    Region::zeroed(size).into_raw()
}

/// Frees a region obtained from [`allocate`] or [`root`].
///
/// # Safety
/// `ptr` must come from this library with exactly `size` bytes (for a `root`
/// result, its `capacity` field) and must not be released twice.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn release(ptr: *mut u8, size: usize) {
    if let Some(ptr) = NonNull::new(ptr) {
        drop(unsafe { Region::from_raw(ptr, size) });
    }
}

/// Parses the UTF-8 text at `ptr..ptr + len` and returns its encoded tree
/// behind a `capacity:u32` prefix, or null on failure.
///
/// The input region stays owned by the host.
///
/// # Safety
/// `ptr` must be valid for reads of `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn root(ptr: *const u8, len: usize) -> *mut u8 {
    let input: &[u8] = if len == 0 {
        &[]
    } else if ptr.is_null() {
        log::warn!("root called with a null pointer and length {len}");
        return ptr::null_mut();
    } else {
        unsafe { std::slice::from_raw_parts(ptr, len) }
    };

    match encode_region(input) {
        Ok(region) => region.into_raw(),
        Err(err) => {
            log::warn!("root failed: {err}");
            ptr::null_mut()
        }
    }
}

// ============ Post Handle ============

/// A parsed post held on the Rust side.
///
/// The handle owns the text, so the offsets in [`PostHandle::wire`] stay
/// meaningful for as long as the host keeps the handle.
#[derive(uniffi::Object)]
pub struct PostHandle {
    content: String,
    wire: Vec<u8>,
    node_count: u32,
    block_names: Vec<String>,
}

#[uniffi::export]
impl PostHandle {
    /// Parse and encode a post.
    #[uniffi::constructor]
    pub fn from_string(content: String) -> Result<Self, FfiError> {
        let document = parse(&content).map_err(|e| FfiError::Parse {
            reason: e.to_string(),
        })?;
        let wire = encode(&document).map_err(|e| FfiError::Encode {
            reason: e.to_string(),
        })?;
        let node_count = u32::try_from(document.len()).map_err(|_| FfiError::Encode {
            reason: format!("{} top-level nodes", document.len()),
        })?;
        let block_names = document.blocks().map(|b| b.name.to_string()).collect();

        Ok(Self {
            content,
            wire,
            node_count,
            block_names,
        })
    }

    /// The encoded tree, offsets relative to [`PostHandle::get_text`].
    pub fn wire(&self) -> Vec<u8> {
        self.wire.clone()
    }

    /// Number of top-level nodes.
    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    /// Every block name as `namespace/name`, in document order.
    pub fn block_names(&self) -> Vec<String> {
        self.block_names.clone()
    }

    /// The text the handle was built from.
    pub fn get_text(&self) -> String {
        self.content.clone()
    }
}

// ============ Standalone Functions ============

/// Parse and encode a post in one call, without keeping a handle.
#[uniffi::export]
pub fn encode_post(content: String) -> Result<Vec<u8>, FfiError> {
    encode_text(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use post_parser_engine::{Node, decode};
    use pretty_assertions::assert_eq;

    const POST: &str = "<!-- wp:columns --><!-- wp:ns/card {\"id\":1} /-->x<!-- /wp:columns -->tail";

    /// Copies `text` into host-style memory, runs `root` and returns the
    /// output region's bytes after releasing everything.
    fn call_root(text: &[u8]) -> Option<Vec<u8>> {
        let input = allocate(text.len());
        unsafe {
            std::slice::from_raw_parts_mut(input, text.len()).copy_from_slice(text);
        }

        let output = unsafe { root(input, text.len()) };
        unsafe { release(input, text.len()) };
        if output.is_null() {
            return None;
        }

        let capacity = unsafe {
            let prefix = std::slice::from_raw_parts(output, CAPACITY_LEN);
            u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize
        };
        let bytes = unsafe { std::slice::from_raw_parts(output, capacity) }.to_vec();
        unsafe { release(output, capacity) };
        Some(bytes)
    }

    #[test]
    fn test_root_returns_capacity_prefixed_wire() {
        let bytes = call_root(POST.as_bytes()).unwrap();

        let wire = &bytes[CAPACITY_LEN..];
        assert_eq!(wire, encode_post(POST.to_string()).unwrap());

        let document = decode(wire, POST).unwrap();
        assert_eq!(document, parse(POST).unwrap());
    }

    #[test]
    fn test_root_on_empty_input() {
        let bytes = call_root(b"").unwrap();
        assert_eq!(bytes, [12, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_root_rejects_invalid_utf8() {
        assert_eq!(call_root(&[b'a', 0xff, b'b']), None);
    }

    #[test]
    fn test_root_rejects_too_deep_nesting() {
        let post = "<!-- wp:a -->".repeat(300) + &"<!-- /wp:a -->".repeat(300);
        assert_eq!(call_root(post.as_bytes()), None);
    }

    #[test]
    fn test_root_accepts_many_unclosed_openers() {
        let post = "<!-- wp:p -->x".repeat(300);
        let bytes = call_root(post.as_bytes()).unwrap();

        let document = decode(&bytes[CAPACITY_LEN..], &post).unwrap();
        assert_eq!(document.nodes.len(), 1);
        assert!(matches!(document.nodes[0], Node::Phrase(_)));
    }

    #[test]
    fn test_root_null_pointer() {
        assert!(unsafe { root(ptr::null(), 5) }.is_null());
    }

    #[test]
    fn test_release_null_is_a_no_op() {
        unsafe { release(ptr::null_mut(), 16) };
    }

    #[test]
    fn test_handle_from_string() {
        let handle = PostHandle::from_string(POST.to_string()).unwrap();

        assert_eq!(handle.get_text(), POST);
        assert_eq!(handle.node_count(), 2);
        assert_eq!(handle.block_names(), ["core/columns", "ns/card"]);
        assert_eq!(
            decode(&handle.wire(), POST).unwrap(),
            parse(POST).unwrap()
        );
    }

    #[test]
    fn test_handle_reports_depth_error() {
        let post = "<!-- wp:a -->".repeat(300) + &"<!-- /wp:a -->".repeat(300);
        let err = PostHandle::from_string(post).err().unwrap();
        assert!(matches!(err, FfiError::Parse { .. }));
    }

    #[test]
    fn test_simple_string_parses() {
        let handle = PostHandle::from_string("Hello".to_string()).unwrap();
        assert_eq!(handle.node_count(), 1);
        assert!(handle.block_names().is_empty());
    }
}
