//! # Payload Framer
//!
//! Wraps raw payload bytes in a small self-describing header so a decoder can
//! recover exactly the original bytes from a padded bit stream.
//!
//! ## Wire Format
//!
//! ```text
//! v1 (length):       [length: u32 LE][payload ...]
//! v2 (checksummed):  [length: u32 LE][crc32: u32 LE][payload ...]
//! ```
//!
//! Anything after `header + length` is slack and is ignored by [`Framer::parse`].
//! The header carries no version tag, so encoder and decoder must agree on the
//! [`HeaderVariant`] out of band (through configuration).

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SmuggleError};
use crate::processing::sizing::FrameLimits;

/// Width in bytes of every fixed header field.
const FIELD_LEN: usize = 4;

/// Which header layout frames are built and parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeaderVariant {
    /// Wire format v1: length only.
    #[serde(rename = "length")]
    LengthOnly,
    /// Wire format v2: length followed by a CRC-32 of the payload.
    #[default]
    #[serde(rename = "checksummed")]
    Checksummed,
}

impl HeaderVariant {
    /// Size of the header in bytes.
    pub fn header_len(&self) -> usize {
        match self {
            HeaderVariant::LengthOnly => FIELD_LEN,
            HeaderVariant::Checksummed => 2 * FIELD_LEN,
        }
    }

    /// Wire format version number of this layout.
    pub fn version(&self) -> u8 {
        match self {
            HeaderVariant::LengthOnly => 1,
            HeaderVariant::Checksummed => 2,
        }
    }
}

/// Integrity hash stored in v2 headers (CRC-32, IEEE polynomial).
///
/// Detects transport corruption only; it offers no protection against tampering.
pub fn checksum(payload: &[u8]) -> u32 {
    crc32fast::hash(payload)
}

/// Decoded header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadHeader {
    /// Byte count of the payload that follows the header.
    pub length: u32,
    /// Present only for [`HeaderVariant::Checksummed`].
    pub checksum: Option<u32>,
}

impl PayloadHeader {
    pub fn variant(&self) -> HeaderVariant {
        match self.checksum {
            Some(_) => HeaderVariant::Checksummed,
            None => HeaderVariant::LengthOnly,
        }
    }

    /// Serializes the header fields in wire order.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.variant().header_len());
        out.extend_from_slice(&self.length.to_le_bytes());
        if let Some(sum) = self.checksum {
            out.extend_from_slice(&sum.to_le_bytes());
        }
        out
    }

    /// Reads a header of the given layout from the front of `buf`.
    ///
    /// # Errors
    /// [`SmuggleError::MalformedHeader`] if `buf` is shorter than the header.
    pub fn decode(buf: &[u8], variant: HeaderVariant) -> Result<Self> {
        let need = variant.header_len();
        if buf.len() < need {
            return Err(SmuggleError::MalformedHeader {
                reason: format!("need {} header bytes, have {}", need, buf.len()),
            });
        }

        let read_u32 = |offset: usize| {
            let mut field = [0u8; FIELD_LEN];
            field.copy_from_slice(&buf[offset..offset + FIELD_LEN]);
            u32::from_le_bytes(field)
        };

        let length = read_u32(0);
        let checksum = match variant {
            HeaderVariant::LengthOnly => None,
            HeaderVariant::Checksummed => Some(read_u32(FIELD_LEN)),
        };

        Ok(Self { length, checksum })
    }
}

/// Header bytes followed by payload bytes. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedBuffer {
    header: PayloadHeader,
    bytes: Vec<u8>,
}

impl FramedBuffer {
    pub fn header(&self) -> PayloadHeader {
        self.header
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The raw payload region, without the header.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[self.header.variant().header_len()..]
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of bits the codec will write for this buffer.
    pub fn bit_count(&self) -> usize {
        self.bytes.len() * 8
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Builds and parses framed buffers for one header layout and frame budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct Framer {
    variant: HeaderVariant,
    limits: FrameLimits,
}

impl Framer {
    pub fn new(variant: HeaderVariant, limits: FrameLimits) -> Self {
        Self { variant, limits }
    }

    pub fn variant(&self) -> HeaderVariant {
        self.variant
    }

    pub fn limits(&self) -> FrameLimits {
        self.limits
    }

    /// Largest payload, in bytes, that still fits in the biggest frame.
    pub fn max_payload_len(&self) -> usize {
        let max_bytes = (self.limits.max_bits() / 8) as usize;
        max_bytes.saturating_sub(self.variant.header_len())
    }

    /// Prefixes `payload` with its header.
    ///
    /// The bit budget is checked before anything is allocated, so an oversized
    /// payload fails here rather than while building the frame.
    ///
    /// # Errors
    /// [`SmuggleError::PayloadTooLarge`] if the framed bits exceed the frame budget.
    pub fn build(&self, payload: &[u8]) -> Result<FramedBuffer> {
        let header_len = self.variant.header_len();
        let bits = ((header_len + payload.len()) as u64) * 8;
        self.limits.check_bits(bits)?;

        let length = u32::try_from(payload.len()).map_err(|_| SmuggleError::PayloadTooLarge {
            bits,
            max_bits: self.limits.max_bits(),
        })?;

        let header = PayloadHeader {
            length,
            checksum: match self.variant {
                HeaderVariant::LengthOnly => None,
                HeaderVariant::Checksummed => Some(checksum(payload)),
            },
        };

        let mut bytes = Vec::with_capacity(header_len + payload.len());
        bytes.extend_from_slice(&header.encode());
        bytes.extend_from_slice(payload);

        debug!(
            "Framed {} payload bytes with v{} header ({} bits)",
            payload.len(),
            self.variant.version(),
            bits
        );

        Ok(FramedBuffer { header, bytes })
    }

    /// Recovers the payload from a framed buffer, ignoring trailing slack.
    ///
    /// # Errors
    /// - [`SmuggleError::MalformedHeader`] if `framed` is shorter than the header
    ///   or the declared length runs past the end of `framed`.
    /// - [`SmuggleError::ChecksumMismatch`] if the v2 checksum disagrees.
    pub fn parse(&self, framed: &[u8]) -> Result<Vec<u8>> {
        let header = PayloadHeader::decode(framed, self.variant)?;
        let start = self.variant.header_len();
        let end = start.saturating_add(header.length as usize);

        if end > framed.len() {
            return Err(SmuggleError::MalformedHeader {
                reason: format!(
                    "declared length {} needs {} bytes, only {} available",
                    header.length,
                    end,
                    framed.len()
                ),
            });
        }

        let payload = &framed[start..end];

        if let Some(expected) = header.checksum {
            let actual = checksum(payload);
            if actual != expected {
                return Err(SmuggleError::ChecksumMismatch { expected, actual });
            }
        }

        debug!(
            "Parsed {} payload bytes ({} slack bytes ignored)",
            payload.len(),
            framed.len() - end
        );

        Ok(payload.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framer(variant: HeaderVariant) -> Framer {
        Framer::new(variant, FrameLimits::default())
    }

    #[test]
    fn test_header_layout_checksummed() {
        let framed = framer(HeaderVariant::Checksummed).build(b"hello").unwrap();
        let bytes = framed.as_bytes();

        assert_eq!(bytes.len(), 8 + 5);
        assert_eq!(&bytes[..4], &5u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &checksum(b"hello").to_le_bytes());
        assert_eq!(&bytes[8..], b"hello");
        assert_eq!(framed.payload(), b"hello");
        assert_eq!(framed.bit_count(), 13 * 8);
    }

    #[test]
    fn test_header_layout_length_only() {
        let framed = framer(HeaderVariant::LengthOnly).build(b"abc").unwrap();
        assert_eq!(framed.as_bytes(), &[3, 0, 0, 0, b'a', b'b', b'c']);
        assert_eq!(framed.header().checksum, None);
    }

    #[test]
    fn test_empty_payload() {
        let f = framer(HeaderVariant::Checksummed);
        let framed = f.build(&[]).unwrap();
        assert_eq!(framed.header().length, 0);
        assert!(f.parse(framed.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_ignores_slack() {
        let f = framer(HeaderVariant::Checksummed);
        let mut bytes = f.build(b"payload").unwrap().into_bytes();
        bytes.extend_from_slice(&[0xAA; 32]);
        assert_eq!(f.parse(&bytes).unwrap(), b"payload");
    }

    #[test]
    fn test_parse_short_buffer() {
        let f = framer(HeaderVariant::Checksummed);
        assert!(matches!(
            f.parse(&[1, 0, 0, 0, 9]),
            Err(SmuggleError::MalformedHeader { .. })
        ));
        assert!(matches!(
            framer(HeaderVariant::LengthOnly).parse(&[1, 0]),
            Err(SmuggleError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_parse_length_past_end() {
        let f = framer(HeaderVariant::LengthOnly);
        assert!(matches!(
            f.parse(&[10, 0, 0, 0, 1, 2, 3]),
            Err(SmuggleError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_parse_detects_corruption() {
        let f = framer(HeaderVariant::Checksummed);
        let mut bytes = f.build(b"sensitive bytes").unwrap().into_bytes();
        bytes[10] ^= 0x01;
        assert!(matches!(
            f.parse(&bytes),
            Err(SmuggleError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_build_budget_boundary() {
        // 8x8 frame = 64 bits = 8 bytes: the v1 header plus 4 payload bytes.
        let f = Framer::new(HeaderVariant::LengthOnly, FrameLimits::new(0, 8).unwrap());
        assert_eq!(f.max_payload_len(), 4);
        assert!(f.build(&[0u8; 4]).is_ok());
        assert!(matches!(
            f.build(&[0u8; 5]),
            Err(SmuggleError::PayloadTooLarge { bits: 72, max_bits: 64 })
        ));
    }

    #[test]
    fn test_header_variant_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            header: HeaderVariant,
        }
        let w: Wrapper = toml::from_str("header = \"length\"").unwrap();
        assert_eq!(w.header, HeaderVariant::LengthOnly);
        let w: Wrapper = toml::from_str("header = \"checksummed\"").unwrap();
        assert_eq!(w.header, HeaderVariant::Checksummed);
    }
}
