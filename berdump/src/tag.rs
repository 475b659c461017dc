//! Tag classification
//!
//! Maps a decoded BER tag to the descriptor printed on each report line:
//! the X.690 type name for universal tags, `<CLASS>_<number>` otherwise.

use std::borrow::Cow;
use std::fmt;

use berdump_ber::{Asn1Error, Asn1Result, BerTag, BerTagClass};

/// Universal type names indexed by tag number (0x00-0x25)
///
/// Numbers with no assigned type are `RESERVE` placeholders.
static UNIVERSAL_TYPES: [&str; 38] = [
    "BER_RESERVE",       // 0x00
    "BOOLEAN",           // 0x01
    "INTEGER",           // 0x02
    "BIT_STRING",        // 0x03
    "OCTET_STRING",      // 0x04
    "NULL",              // 0x05
    "OBJECT_IDENTIFIER", // 0x06
    "ObjectDescriptor",  // 0x07
    "EXTERNAL",          // 0x08
    "REAL",              // 0x09
    "ENUMERATED",        // 0x0A
    "EMBEDDED_PDV",      // 0x0B
    "UTF8String",        // 0x0C
    "RELATIVE-OID",      // 0x0D
    "TIME",              // 0x0E
    "RESERVE",           // 0x0F
    "SEQUENCE",          // 0x10
    "SET",               // 0x11
    "NumericString",     // 0x12
    "PrintableString",   // 0x13
    "TeletexString",     // 0x14
    "VideotexString",    // 0x15
    "IA5String",         // 0x16
    "UTCTime",           // 0x17
    "GeneralizedTime",   // 0x18
    "GraphicString",     // 0x19
    "VisibleString",     // 0x1A
    "GeneralString",     // 0x1B
    "UniversalString",   // 0x1C
    "CHARACTER_STRING",  // 0x1D
    "BMPString",         // 0x1E
    "DATE",              // 0x1F
    "TIME-OF-DAY",       // 0x20
    "DATE-TIME",         // 0x21
    "DURATION",          // 0x22
    "OID-IRI",           // 0x23
    "RELATIVE-OID-IRI",  // 0x24
    "RESERVE",           // 0x25
];

/// Human-readable name of a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDescriptor(Cow<'static, str>);

impl TagDescriptor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Describe a tag
///
/// # Error Handling
/// Returns `UnknownUniversalTag` for a universal number beyond the table,
/// which can only be produced by the extended tag form.
pub fn classify(tag: &BerTag) -> Asn1Result<TagDescriptor> {
    match tag.class() {
        BerTagClass::Universal => UNIVERSAL_TYPES
            .get(tag.number() as usize)
            .map(|name| TagDescriptor(Cow::Borrowed(*name)))
            .ok_or(Asn1Error::UnknownUniversalTag(tag.number())),
        class => Ok(TagDescriptor(Cow::Owned(format!(
            "{}_{}",
            class.name(),
            tag.number()
        )))),
    }
}
