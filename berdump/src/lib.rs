//! berdump - schema-free BER/DER structure dump
//!
//! Decodes a BER or DER encoded byte stream into an indented tree of its
//! tag-length-value nodes without access to any ASN.1 module. Each node is
//! printed with its tag class and number, whether it is constructed, and a
//! best-guess rendering of primitive values.
//!
//! # Architecture
//!
//! - `berdump-core`: error types
//! - `berdump-ber`: BER tag/length decoding and the TLV cursor
//! - `berdump` (this crate): tag classification, value rendering, the tree
//!   walker and the `berdump` command-line tool
//!
//! # Usage
//!
//! ```rust
//! let report = berdump::parse_der(b"3006 0201 05 0101 ff", false).unwrap();
//! assert_eq!(
//!     report.as_str(),
//!     "group SEQUENCE\n    element INTEGER int 5\n    element BOOLEAN bool true\n"
//! );
//! ```

pub mod driver;
pub mod options;
pub mod render;
pub mod report;
pub mod tag;
pub mod walker;

pub use berdump_core::{Asn1Error, Asn1Result, ErrorKind};
pub use driver::{decode_with, parse_der};
pub use options::{DecodeOptions, InputFormat};
pub use render::{RenderKind, Rendering};
pub use report::Report;
pub use tag::{TagDescriptor, classify};
pub use walker::{DecodeFailure, TreeWalker, walk};
