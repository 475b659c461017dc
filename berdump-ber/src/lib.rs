//! BER processing for the berdump disassembler
//!
//! This crate decodes BER tags and lengths and exposes a small cursor API
//! for walking a TLV stream in document order without any schema.

pub mod ber;

pub use berdump_core::{Asn1Error, Asn1Result, ErrorKind};
pub use ber::{BerLength, BerTag, BerTagClass, Node};
pub use ber::cursor::{bytes_to_integer, first_child, is_descendant_of, next, root, value_bytes};
