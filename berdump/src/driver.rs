//! Entry points that turn input bytes into a report

use crate::options::{DecodeOptions, InputFormat};
use crate::report::Report;
use crate::walker::{DecodeFailure, walk};

/// Decode `input` into an indented structure report
///
/// `is_bin` selects raw bytes; otherwise `input` is hex text.
pub fn parse_der(input: &[u8], is_bin: bool) -> Result<Report, DecodeFailure> {
    let options = DecodeOptions::new().input_format(InputFormat::from_is_bin(is_bin));
    decode_with(input, &options)
}

/// Decode `input` using explicit options
pub fn decode_with(input: &[u8], options: &DecodeOptions) -> Result<Report, DecodeFailure> {
    let buffer = options
        .format()
        .normalize(input)
        .map_err(|error| DecodeFailure {
            error,
            partial: Report::new(options.indent_width()),
        })?;

    log::debug!("decoding {} bytes", buffer.len());
    walk(&buffer, options.indent_width())
}
