//! Decode configuration

use berdump_ber::{Asn1Error, Asn1Result};

use crate::report::DEFAULT_INDENT;

/// How the input bytes are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Raw BER/DER bytes
    #[default]
    Binary,
    /// Hex text; ASCII whitespace is ignored
    Hex,
}

impl InputFormat {
    pub fn from_is_bin(is_bin: bool) -> Self {
        if is_bin {
            InputFormat::Binary
        } else {
            InputFormat::Hex
        }
    }

    /// Turn the input into the byte buffer to walk
    pub fn normalize(self, input: &[u8]) -> Asn1Result<Vec<u8>> {
        match self {
            InputFormat::Binary => Ok(input.to_vec()),
            InputFormat::Hex => {
                let compact: Vec<u8> = input
                    .iter()
                    .copied()
                    .filter(|b| !b.is_ascii_whitespace())
                    .collect();
                hex::decode(&compact).map_err(|e| Asn1Error::InvalidHex(e.to_string()))
            }
        }
    }
}

/// Options for a single decode
///
/// # Usage Example
///
/// ```rust
/// use berdump::{DecodeOptions, InputFormat};
///
/// let options = DecodeOptions::new()
///     .input_format(InputFormat::Hex)
///     .indent(2);
/// assert_eq!(options.indent_width(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    input_format: InputFormat,
    indent: usize,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self {
            input_format: InputFormat::Binary,
            indent: DEFAULT_INDENT,
        }
    }

    pub fn input_format(mut self, format: InputFormat) -> Self {
        self.input_format = format;
        self
    }

    /// Spaces per nesting level
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = width;
        self
    }

    pub fn format(&self) -> InputFormat {
        self.input_format
    }

    pub fn indent_width(&self) -> usize {
        self.indent
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DecodeOptions::default();
        assert_eq!(options.format(), InputFormat::Binary);
        assert_eq!(options.indent_width(), 4);
        assert_eq!(InputFormat::from_is_bin(false), InputFormat::Hex);
    }

    #[test]
    fn test_hex_normalize() {
        let bytes = InputFormat::Hex.normalize(b"30 03\r\n02 01\t05\n").unwrap();
        assert_eq!(bytes, vec![0x30, 0x03, 0x02, 0x01, 0x05]);
        assert_eq!(InputFormat::Hex.normalize(b"0A0b").unwrap(), vec![0x0A, 0x0B]);
    }

    #[test]
    fn test_hex_invalid() {
        assert!(matches!(
            InputFormat::Hex.normalize(b"3"),
            Err(Asn1Error::InvalidHex(_))
        ));
        assert!(InputFormat::Hex.normalize(b"zz").is_err());
    }

    #[test]
    fn test_binary_passthrough() {
        assert_eq!(InputFormat::Binary.normalize(b"\x05\x00").unwrap(), vec![0x05, 0x00]);
    }
}
