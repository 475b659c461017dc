use std::fmt;
use thiserror::Error;

/// Main error type for BER traversal and value rendering
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Asn1Error {
    /// The cursor has no further node. Normal termination of a walk.
    #[error("No further node in stream")]
    Exhausted,

    #[error("Truncated encoding at offset {offset}: need {needed} bytes, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Invalid tag encoding: {0}")]
    InvalidTag(String),

    #[error("Invalid length encoding: {0}")]
    InvalidLength(String),

    #[error("Unknown universal tag number: {0}")]
    UnknownUniversalTag(u32),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid hex input: {0}")]
    InvalidHex(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Asn1Error {
    /// Coarse classification used by callers to tell end-of-stream apart
    /// from bad input and from faults in the decoder itself.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Asn1Error::Exhausted => ErrorKind::StreamExhausted,
            Asn1Error::Truncated { .. }
            | Asn1Error::InvalidTag(_)
            | Asn1Error::InvalidLength(_)
            | Asn1Error::UnknownUniversalTag(_)
            | Asn1Error::InvalidValue(_)
            | Asn1Error::InvalidHex(_) => ErrorKind::MalformedEncoding,
            Asn1Error::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Asn1Error::Exhausted)
    }
}

/// Error classes a decode can end with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    StreamExhausted,
    MalformedEncoding,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::StreamExhausted => write!(f, "stream exhausted"),
            ErrorKind::MalformedEncoding => write!(f, "malformed encoding"),
            ErrorKind::Internal => write!(f, "internal error"),
        }
    }
}

/// Result type alias for berdump operations
pub type Asn1Result<T> = Result<T, Asn1Error>;
