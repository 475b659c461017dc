//! TLV cursor over a BER-encoded buffer
//!
//! A [`Node`] is three offsets into the buffer: where its tag starts, where
//! its value starts and where it ends (exclusive). Because a constructed
//! value's content is itself a run of TLVs, document order is simply byte
//! order: the first child of a constructed node starts at its value offset,
//! and the node after any node starts at its end offset.
//!
//! # Usage Example
//!
//! ```rust
//! use berdump_ber::ber::cursor::{first_child, root, value_bytes};
//!
//! let der = [0x30, 0x03, 0x02, 0x01, 0x05];
//! let seq = root(&der).unwrap();
//! let int = first_child(&der, &seq).unwrap();
//! assert_eq!(value_bytes(&der, &int), &[0x05]);
//! ```

use berdump_core::{Asn1Error, Asn1Result};
use num_bigint::BigUint;

use super::types::{BerLength, BerTag};

/// Position of one TLV inside a buffer
///
/// ```text
/// start        value_start              end
///   |  T  |  L  |        V              |
/// ```
///
/// Invariant: `start <= value_start <= end <= buffer.len()` for the buffer
/// the node was read from.
///
/// # Ownership
/// A node borrows nothing. It is only meaningful together with the buffer
/// it was read from, which every cursor function takes alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    /// Offset of the first tag byte
    start: usize,
    /// Offset of the first value byte, just past the length octets
    value_start: usize,
    /// Offset one past the last value byte
    end: usize,
}

impl Node {
    /// Read the TLV starting at `offset`
    ///
    /// # Error Handling
    /// - `Exhausted` if `offset` is at or past the end of the buffer
    /// - `Truncated` if the declared length runs past the end of the buffer
    /// - tag/length decoding errors otherwise
    pub fn read(buffer: &[u8], offset: usize) -> Asn1Result<Self> {
        if offset >= buffer.len() {
            return Err(Asn1Error::Exhausted);
        }

        let (_, tag_bytes) = BerTag::decode(&buffer[offset..])?;
        let length_offset = offset + tag_bytes;
        if length_offset >= buffer.len() {
            return Err(Asn1Error::Truncated {
                offset,
                needed: 1,
                available: 0,
            });
        }

        let (length, length_bytes) = BerLength::decode(&buffer[length_offset..])?;
        let value_start = length_offset + length_bytes;
        let available = buffer.len() - value_start;
        if length.value() > available {
            return Err(Asn1Error::Truncated {
                offset,
                needed: length.value(),
                available,
            });
        }

        Ok(Self {
            start: offset,
            value_start,
            end: value_start + length.value(),
        })
    }

    /// Offset of the first tag byte
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn value_start(&self) -> usize {
        self.value_start
    }

    /// Offset one past the last value byte
    pub fn end(&self) -> usize {
        self.end
    }

    /// Length of the value payload
    pub fn len(&self) -> usize {
        self.end - self.value_start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.value_start
    }

    /// Decode this node's tag
    pub fn tag(&self, buffer: &[u8]) -> Asn1Result<BerTag> {
        let (tag, _) = BerTag::decode(&buffer[self.start..self.value_start])?;
        Ok(tag)
    }

    /// Leading tag byte, as used for class and constructed bit tests
    pub fn tag_byte(&self, buffer: &[u8]) -> u8 {
        buffer[self.start]
    }
}

/// First top-level node of the buffer
pub fn root(buffer: &[u8]) -> Asn1Result<Node> {
    Node::read(buffer, 0)
}

/// First child of a constructed node
///
/// Returns `Exhausted` when the node has no content, and `InvalidLength`
/// when the child runs past the end of its parent.
pub fn first_child(buffer: &[u8], node: &Node) -> Asn1Result<Node> {
    if node.tag_byte(buffer) & 0x20 == 0 {
        return Err(Asn1Error::Internal(format!(
            "first_child requested on primitive node at offset {}",
            node.start
        )));
    }
    if node.is_empty() {
        return Err(Asn1Error::Exhausted);
    }
    let child = Node::read(buffer, node.value_start)?;
    if !is_descendant_of(node, &child) {
        return Err(Asn1Error::InvalidLength(format!(
            "child at offset {} ends at {}, past its parent ending at {}",
            child.start, child.end, node.end
        )));
    }
    Ok(child)
}

/// Next node in document order: the next sibling, or the next sibling of
/// the nearest ancestor that has one
pub fn next(buffer: &[u8], node: &Node) -> Asn1Result<Node> {
    Node::read(buffer, node.end)
}

/// Whether `node` lies entirely within the content of `ancestor`
pub fn is_descendant_of(ancestor: &Node, node: &Node) -> bool {
    ancestor.value_start <= node.start && node.end <= ancestor.end
}

/// Raw value payload, excluding tag and length octets
pub fn value_bytes<'a>(buffer: &'a [u8], node: &Node) -> &'a [u8] {
    &buffer[node.value_start..node.end]
}

/// Unsigned big-endian accumulation of `bytes`
///
/// No sign extension is applied; an empty slice yields zero.
pub fn bytes_to_integer(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}
