//! Value rendering for primitive nodes
//!
//! Without a schema the type of a primitive value has to be guessed. The
//! guesses live in [`RULES`], evaluated in order; the first rule whose
//! predicate accepts the descriptor and payload produces the rendering.
//! The final rule accepts everything, so a payload always renders.

use std::fmt;

use berdump_ber::{Asn1Error, Asn1Result, bytes_to_integer};

use crate::tag::TagDescriptor;

/// Kind of rendering chosen for a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    Null,
    Bool,
    Oid,
    Utc,
    Str,
    Int,
    Ipv4,
    Bcd,
    Hex,
}

impl RenderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderKind::Null => "null",
            RenderKind::Bool => "bool",
            RenderKind::Oid => "oid",
            RenderKind::Utc => "utc",
            RenderKind::Str => "str",
            RenderKind::Int => "int",
            RenderKind::Ipv4 => "ipv4",
            RenderKind::Bcd => "bcd",
            RenderKind::Hex => "hex",
        }
    }
}

impl fmt::Display for RenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered primitive value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    pub kind: RenderKind,
    pub text: String,
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {}", self.kind, self.text)
        }
    }
}

/// One heuristic: when it applies, and how it renders
pub struct Rule {
    pub kind: RenderKind,
    applies: fn(&str, &[u8]) -> bool,
    render: fn(&[u8]) -> Asn1Result<String>,
}

/// Heuristics in priority order
pub static RULES: [Rule; 9] = [
    Rule {
        kind: RenderKind::Null,
        applies: |tag, _| tag == "NULL",
        render: |_| Ok(String::new()),
    },
    Rule {
        kind: RenderKind::Bool,
        applies: |tag, _| tag == "BOOLEAN",
        render: decode_boolean,
    },
    Rule {
        kind: RenderKind::Oid,
        applies: |tag, _| tag == "OBJECT_IDENTIFIER",
        render: decode_oid,
    },
    Rule {
        kind: RenderKind::Utc,
        applies: |tag, _| tag == "UTCTime",
        render: decode_time,
    },
    Rule {
        kind: RenderKind::Str,
        applies: |tag, val| tag.ends_with("String") || (val.len() >= 3 && is_printable(val)),
        render: |val| Ok(escape_controls(&String::from_utf8_lossy(val))),
    },
    Rule {
        kind: RenderKind::Int,
        applies: |tag, val| tag == "INTEGER" || tag == "ENUMERATED" || val.len() <= 4,
        render: |val| Ok(bytes_to_integer(val).to_string()),
    },
    Rule {
        kind: RenderKind::Ipv4,
        applies: |_, val| val.len() == 5 && val[0] == 4,
        render: decode_ipv4,
    },
    Rule {
        kind: RenderKind::Bcd,
        applies: |_, val| is_bcd(val),
        render: |val| Ok(hex::encode(val)),
    },
    Rule {
        kind: RenderKind::Hex,
        applies: |_, _| true,
        render: |val| Ok(hex::encode(val)),
    },
];

/// Render a primitive value using the first matching rule
pub fn render(descriptor: &TagDescriptor, value: &[u8]) -> Asn1Result<Rendering> {
    let tag = descriptor.as_str();
    let rule = RULES
        .iter()
        .find(|rule| (rule.applies)(tag, value))
        .ok_or_else(|| Asn1Error::Internal(format!("no rendering rule for {}", tag)))?;

    log::trace!("{} ({} bytes) rendered as {}", tag, value.len(), rule.kind);

    Ok(Rendering {
        kind: rule.kind,
        text: (rule.render)(value)?,
    })
}

/// Printable in the ASCII sense: graphic characters plus whitespace
pub fn is_printable(value: &[u8]) -> bool {
    value
        .iter()
        .all(|b| b.is_ascii_graphic() || matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C))
}

/// Binary-coded decimal check
///
/// Every byte but the last holds two decimal digits. The last byte may use
/// 0xF as filler in either nibble, but may not be 0xFF.
pub fn is_bcd(value: &[u8]) -> bool {
    let Some((&last, head)) = value.split_last() else {
        return false;
    };
    let digit = |nibble: u8| nibble <= 9;

    if !head.iter().all(|&b| digit(b >> 4) && digit(b & 0x0F)) {
        return false;
    }

    let (high, low) = (last >> 4, last & 0x0F);
    last != 0xFF && (digit(high) || high == 0x0F) && (digit(low) || low == 0x0F)
}

fn decode_boolean(value: &[u8]) -> Asn1Result<String> {
    match value.first() {
        Some(0x00) => Ok("false".to_string()),
        Some(_) => Ok("true".to_string()),
        None => Err(Asn1Error::InvalidValue("Empty BOOLEAN".to_string())),
    }
}

/// Dotted OID: the first byte carries two arcs as `40 * X + Y`, the rest
/// are base-128 arcs with the high bit as continuation flag
pub fn decode_oid(value: &[u8]) -> Asn1Result<String> {
    let Some((&first, rest)) = value.split_first() else {
        return Err(Asn1Error::InvalidValue(
            "Empty object identifier encoding".to_string(),
        ));
    };

    let mut oid = format!("{}.{}", first / 40, first % 40);
    let mut arc = 0u128;
    let mut pending = false;

    for &byte in rest {
        arc = arc
            .checked_mul(128)
            .map(|x| x | (byte & 0x7F) as u128)
            .ok_or_else(|| Asn1Error::InvalidValue("OID component overflow".to_string()))?;
        pending = byte & 0x80 != 0;
        if !pending {
            oid.push('.');
            oid.push_str(&arc.to_string());
            arc = 0;
        }
    }

    if pending {
        return Err(Asn1Error::InvalidValue(format!(
            "Unterminated OID component after {}",
            oid
        )));
    }

    Ok(oid)
}

/// Two-digit year expanded by prefixing "20"; the digits are not checked
fn decode_time(value: &[u8]) -> Asn1Result<String> {
    Ok(format!("20{}", escape_controls(&String::from_utf8_lossy(value))))
}

/// Escape control characters so a rendering stays on one report line
fn escape_controls(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

fn decode_ipv4(value: &[u8]) -> Asn1Result<String> {
    match value {
        [4, a, b, c, d] => Ok(format!("{}.{}.{}.{}", a, b, c, d)),
        _ => Err(Asn1Error::Internal(format!(
            "IPv4 rendering applied to {} bytes",
            value.len()
        ))),
    }
}
