//! BER (Basic Encoding Rules) primitives for ASN.1
//!
//! Each ASN.1 value is encoded as a TLV (Tag-Length-Value) triplet:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! ## Tag Encoding
//!
//! ```text
//! Bits: 8 7 6 5 4 3 2 1
//!       C C P T T T T T
//! ```
//! Where:
//! - CC = Class (00=Universal, 01=Application, 10=Context, 11=Private)
//! - P = Primitive (0) or Constructed (1)
//! - TTTTT = Tag number (0-30), or 11111 indicates extended tag
//!
//! ## Length Encoding
//!
//! - **Short form** (1 byte): lengths 0-127, bit 7 = 0
//! - **Long form**: first byte has bit 7 = 1 and bits 6-0 give the number
//!   of big-endian length bytes that follow
//!
//! Indefinite length is not supported. Constructed values are walked by
//! the [`cursor`] module, which never needs a schema: a constructed
//! value's content is simply the next TLV in the buffer.

pub mod cursor;
pub mod types;

pub use cursor::Node;
pub use types::{BerLength, BerTag, BerTagClass};
