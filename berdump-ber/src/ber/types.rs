//! BER encoding types (Tag, Length)

use berdump_core::{Asn1Error, Asn1Result};

/// BER Tag Class
///
/// ASN.1 defines four tag classes:
/// - **Universal**: Standard ASN.1 types (INTEGER, OCTET STRING, etc.)
/// - **Application**: Application-specific types
/// - **Context-specific**: Context-dependent types (used in SEQUENCE/SET)
/// - **Private**: Private/implementation-specific types
///
/// # Why Four Classes?
/// Tag numbers are only unique within a class. Universal 1 is always
/// BOOLEAN, while context-specific 1 means whatever the enclosing
/// definition says it means, which is unknown here. That is why only
/// universal tags can be given a type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerTagClass {
    /// Universal class (00)
    Universal = 0,
    /// Application class (01)
    Application = 1,
    /// Context-specific class (10)
    ContextSpecific = 2,
    /// Private class (11)
    Private = 3,
}

impl BerTagClass {
    /// Get tag class from bits 7-6 of a tag byte
    ///
    /// Only two bits are examined, so every byte maps to a class.
    pub fn from_bits(byte: u8) -> Self {
        match byte >> 6 {
            0 => BerTagClass::Universal,
            1 => BerTagClass::Application,
            2 => BerTagClass::ContextSpecific,
            _ => BerTagClass::Private,
        }
    }

    /// Name used when describing a tag of this class
    pub fn name(self) -> &'static str {
        match self {
            BerTagClass::Universal => "UNIVERSAL",
            BerTagClass::Application => "APPLICATION",
            BerTagClass::ContextSpecific => "CONTEXT",
            BerTagClass::Private => "PRIVATE",
        }
    }
}

/// BER Tag
///
/// A BER tag identifies the type of an ASN.1 value. It consists of:
/// - **Class**: Universal, Application, Context-specific, or Private
/// - **Constructed/Primitive**: Whether the value contains other values
/// - **Tag Number**: 0-30 in the first byte, or extended form
///
/// # Encoding Format
///
/// Short form (tag number 0-30):
/// ```text
/// Bits: 8 7 6 5 4 3 2 1
///       C C P T T T T T
/// ```
///
/// Extended form (tag number > 30):
/// ```text
/// First byte:      C C P 1 1 1 1 1  (all tag bits set to 1)
/// Following bytes: 1 T T T T T T T  (last byte has bit 8 = 0)
/// ```
///
/// # Constructed Bit
/// The P bit is independent of class and number. It decides whether the
/// value holds nested TLVs (walked as a group) or a payload (rendered as
/// an element); it never changes how the tag is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BerTag {
    /// Tag class
    class: BerTagClass,
    /// Whether this is a constructed type
    constructed: bool,
    /// Tag number, from the low five bits or the extended form
    number: u32,
}

impl BerTag {
    /// Create a new BER tag
    ///
    /// # Arguments
    /// * `class` - Tag class
    /// * `constructed` - Whether this is a constructed type
    /// * `number` - Tag number
    pub fn new(class: BerTagClass, constructed: bool, number: u32) -> Self {
        Self {
            class,
            constructed,
            number,
        }
    }

    /// Get tag class
    pub fn class(&self) -> BerTagClass {
        self.class
    }

    /// Check if tag is constructed
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Get tag number
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Decode tag from bytes
    ///
    /// # Returns
    /// Returns `Ok((BerTag, bytes_consumed))` if successful
    ///
    /// # Error Handling
    /// Returns error if:
    /// - Buffer is empty
    /// - Extended tag form is incomplete or longer than 4 continuation bytes
    pub fn decode(data: &[u8]) -> Asn1Result<(Self, usize)> {
        let Some(&first_byte) = data.first() else {
            return Err(Asn1Error::InvalidTag(
                "Empty buffer for tag decoding".to_string(),
            ));
        };

        let class = BerTagClass::from_bits(first_byte);
        let constructed = (first_byte & 0x20) != 0;
        let tag_bits = first_byte & 0x1F;

        if tag_bits < 31 {
            return Ok((Self::new(class, constructed, tag_bits as u32), 1));
        }

        let mut tag_number = 0u32;
        let mut pos = 1;
        let mut has_more = true;

        while has_more && pos < data.len() {
            if pos > 4 {
                return Err(Asn1Error::InvalidTag(
                    "Tag number too large".to_string(),
                ));
            }
            let byte = data[pos];
            has_more = (byte & 0x80) != 0;
            tag_number = (tag_number << 7) | ((byte & 0x7F) as u32);
            pos += 1;
        }

        if has_more {
            return Err(Asn1Error::InvalidTag(
                "Incomplete extended tag encoding".to_string(),
            ));
        }

        Ok((Self::new(class, constructed, tag_number), pos))
    }
}

/// BER Length encoding
///
/// Short form:
/// ```text
/// Byte: 0 L L L L L L L
/// ```
///
/// Long form:
/// ```text
/// First byte:      1 N N N N N N N  (N = number of length bytes)
/// Following bytes: L L L L L L L L  (big-endian length value)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerLength {
    /// Short form: length 0-127
    Short(u8),
    /// Long form, encoded with length-of-length
    Long(usize),
}

impl BerLength {
    pub fn value(&self) -> usize {
        match self {
            BerLength::Short(l) => *l as usize,
            BerLength::Long(l) => *l,
        }
    }

    /// Decode length from bytes
    ///
    /// # Returns
    /// Returns `Ok((BerLength, bytes_consumed))` if successful
    ///
    /// # Error Handling
    /// Returns error if:
    /// - Buffer is too short
    /// - Length is indefinite (`0x80`)
    /// - More than 4 length bytes are declared
    pub fn decode(data: &[u8]) -> Asn1Result<(Self, usize)> {
        let Some(&first_byte) = data.first() else {
            return Err(Asn1Error::InvalidLength(
                "Empty buffer for length decoding".to_string(),
            ));
        };

        if (first_byte & 0x80) == 0 {
            return Ok((BerLength::Short(first_byte), 1));
        }

        let num_bytes = (first_byte & 0x7F) as usize;

        if num_bytes == 0 {
            return Err(Asn1Error::InvalidLength(
                "Indefinite length encoding not supported".to_string(),
            ));
        }

        if num_bytes > 4 {
            return Err(Asn1Error::InvalidLength(format!(
                "Length encoding too large: {} bytes (max 4)",
                num_bytes
            )));
        }

        if data.len() < 1 + num_bytes {
            return Err(Asn1Error::InvalidLength(format!(
                "Buffer too short for long form length: need {} bytes, got {}",
                1 + num_bytes,
                data.len()
            )));
        }

        let length = data[1..=num_bytes]
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | b as usize);

        Ok((BerLength::Long(length), 1 + num_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ber_tag_decode() {
        let (tag, consumed) = BerTag::decode(&[0x02]).unwrap();
        assert_eq!(consumed, 1);
        assert_eq!(tag.class(), BerTagClass::Universal);
        assert!(!tag.is_constructed());
        assert_eq!(tag.number(), 2);
    }

    #[test]
    fn test_ber_tag_constructed() {
        let (tag, _) = BerTag::decode(&[0x60]).unwrap();
        assert_eq!(tag, BerTag::new(BerTagClass::Application, true, 0));

        let (tag, _) = BerTag::decode(&[0xA1]).unwrap();
        assert_eq!(tag, BerTag::new(BerTagClass::ContextSpecific, true, 1));
    }

    #[test]
    fn test_ber_tag_extended() {
        // [PRIVATE 200], primitive: 0xDF 0x81 0x48
        let (tag, consumed) = BerTag::decode(&[0xDF, 0x81, 0x48]).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(tag.class(), BerTagClass::Private);
        assert_eq!(tag.number(), 200);
    }

    #[test]
    fn test_ber_tag_extended_incomplete() {
        assert!(matches!(
            BerTag::decode(&[0x1F, 0x81]),
            Err(Asn1Error::InvalidTag(_))
        ));
        assert!(BerTag::decode(&[]).is_err());
    }

    #[test]
    fn test_ber_tag_class_name() {
        assert_eq!(BerTagClass::from_bits(0x30).name(), "UNIVERSAL");
        assert_eq!(BerTagClass::from_bits(0x61).name(), "APPLICATION");
        assert_eq!(BerTagClass::from_bits(0x80).name(), "CONTEXT");
        assert_eq!(BerTagClass::from_bits(0xC3).name(), "PRIVATE");
    }

    #[test]
    fn test_ber_length_short() {
        let (length, consumed) = BerLength::decode(&[100]).unwrap();
        assert_eq!(consumed, 1);
        assert_eq!(length.value(), 100);
    }

    #[test]
    fn test_ber_length_long() {
        let (length, consumed) = BerLength::decode(&[0x82, 0x03, 0xE8]).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(length, BerLength::Long(1000));
    }

    #[test]
    fn test_ber_length_indefinite_rejected() {
        assert!(matches!(
            BerLength::decode(&[0x80]),
            Err(Asn1Error::InvalidLength(_))
        ));
        assert!(BerLength::decode(&[0x85, 1, 2, 3, 4, 5]).is_err());
        assert!(BerLength::decode(&[0x82, 0x01]).is_err());
    }
}
