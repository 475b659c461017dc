//! Core types for the berdump workspace
//!
//! This crate provides the error taxonomy used by the BER cursor layer and
//! the structural disassembler built on top of it.

pub mod error;

pub use error::{Asn1Error, Asn1Result, ErrorKind};
