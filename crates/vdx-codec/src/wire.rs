//! Wire primitives: LEB128 varints, fixed-width little-endian payloads,
//! length-delimited payloads and unit headers.
//!
//! Writers append to a `Vec<u8>` and cannot fail. [`WireReader`] is a
//! bounds-checked cursor over a borrowed slice; running off the end is
//! always [`CodecError::TruncatedInput`].

use smallvec::SmallVec;
use vdx_core::{Tag, WireKind};

use crate::error::CodecError;

/// Longest valid encoding of a `u64` varint.
pub const MAX_VARINT_LEN: usize = 10;

// ── Writers ─────────────────────────────────────────────────────

/// Encode `v` as an unsigned LEB128 varint.
pub fn encode_varint(mut v: u64) -> SmallVec<[u8; MAX_VARINT_LEN]> {
    let mut out = SmallVec::new();
    loop {
        let byte = (v & 0x7F) as u8;
        v >>= 7;
        if v == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | 0x80);
    }
}

/// Number of bytes [`encode_varint`] produces for `v`.
pub fn varint_len(v: u64) -> usize {
    let bits = 64 - v.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

/// Append a varint.
pub fn write_varint(buf: &mut Vec<u8>, v: u64) {
    buf.extend_from_slice(&encode_varint(v));
}

/// Append a unit header: varint tag followed by the wire-kind byte.
pub fn write_unit_header(buf: &mut Vec<u8>, tag: Tag, kind: WireKind) {
    write_varint(buf, u64::from(tag.0));
    buf.push(kind.as_u8());
}

/// Append a varint length prefix followed by `bytes`.
pub fn write_length_prefixed(buf: &mut Vec<u8>, bytes: &[u8]) {
    write_varint(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

// ── Reader ──────────────────────────────────────────────────────

/// Bounds-checked read cursor over an encoded message.
#[derive(Clone, Debug)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Start reading at the beginning of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` when the input is exhausted.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Consume exactly `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::TruncatedInput {
                detail: format!(
                    "need {n} bytes at offset {}, {} remaining",
                    self.pos,
                    self.remaining()
                ),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Read an unsigned LEB128 varint of at most [`MAX_VARINT_LEN`] bytes.
    pub fn read_varint(&mut self) -> Result<u64, CodecError> {
        let start = self.pos;
        let mut value = 0u64;
        for i in 0..MAX_VARINT_LEN {
            let Some(&byte) = self.data.get(self.pos) else {
                return Err(CodecError::TruncatedInput {
                    detail: format!("varint at offset {start} ends after {i} bytes"),
                });
            };
            self.pos += 1;
            // The tenth byte may only contribute bit 63.
            if i == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(CodecError::MalformedInput {
                    detail: format!("varint at offset {start} overflows 64 bits"),
                });
            }
            value |= u64::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(CodecError::MalformedInput {
            detail: format!("varint at offset {start} is longer than {MAX_VARINT_LEN} bytes"),
        })
    }

    /// Read four little-endian bytes.
    pub fn read_fixed32(&mut self) -> Result<[u8; 4], CodecError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(buf)
    }

    /// Read eight little-endian bytes.
    pub fn read_fixed64(&mut self) -> Result<[u8; 8], CodecError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(buf)
    }

    /// Read a varint length and then that many bytes.
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.read_varint()?;
        let len = usize::try_from(len).map_err(|_| CodecError::TruncatedInput {
            detail: format!("length prefix {len} exceeds the address space"),
        })?;
        self.take(len)
    }

    /// Read a unit header, validating the tag and the wire-kind byte.
    pub fn read_unit_header(&mut self) -> Result<(Tag, WireKind), CodecError> {
        let offset = self.pos;
        let raw_tag = self.read_varint()?;
        let tag = u32::try_from(raw_tag)
            .ok()
            .map(Tag)
            .filter(|tag| tag.is_valid())
            .ok_or_else(|| CodecError::MalformedInput {
                detail: format!("invalid tag {raw_tag} at offset {offset}"),
            })?;
        let byte = self.take(1)?[0];
        let kind = WireKind::from_u8(byte).ok_or_else(|| CodecError::MalformedInput {
            detail: format!("invalid wire kind {byte} for tag {tag} at offset {offset}"),
        })?;
        Ok((tag, kind))
    }

    /// Consume one payload of `kind` and return its raw bytes.
    ///
    /// Varint payloads are returned with their encoding bytes. Length-
    /// delimited payloads are returned without their length prefix.
    pub fn read_payload(&mut self, kind: WireKind) -> Result<&'a [u8], CodecError> {
        match kind {
            WireKind::Varint => {
                let start = self.pos;
                self.read_varint()?;
                Ok(&self.data[start..self.pos])
            }
            WireKind::Fixed32 => self.take(4),
            WireKind::Fixed64 => self.take(8),
            WireKind::LengthDelimited => self.read_length_prefixed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn roundtrip_varint(v in any::<u64>()) {
            let mut buf = Vec::new();
            write_varint(&mut buf, v);
            prop_assert_eq!(buf.len(), varint_len(v));
            let mut reader = WireReader::new(&buf);
            prop_assert_eq!(reader.read_varint().unwrap(), v);
            prop_assert!(reader.is_empty());
        }

        #[test]
        fn truncated_varint_is_detected(v in 128u64..=u64::MAX) {
            let encoded = encode_varint(v);
            for cut in 1..encoded.len() {
                let mut reader = WireReader::new(&encoded[..cut]);
                let is_truncated = matches!(
                    reader.read_varint(),
                    Err(CodecError::TruncatedInput { .. })
                );
                prop_assert!(is_truncated);
            }
        }
    }

    #[test]
    fn varint_known_encodings() {
        assert_eq!(encode_varint(0).as_slice(), &[0x00]);
        assert_eq!(encode_varint(1).as_slice(), &[0x01]);
        assert_eq!(encode_varint(127).as_slice(), &[0x7F]);
        assert_eq!(encode_varint(128).as_slice(), &[0x80, 0x01]);
        assert_eq!(encode_varint(300).as_slice(), &[0xAC, 0x02]);
        assert_eq!(encode_varint(u64::MAX).len(), MAX_VARINT_LEN);
    }

    #[test]
    fn overlong_varint_is_malformed() {
        let data = [0xFFu8; 11];
        assert!(matches!(
            WireReader::new(&data).read_varint(),
            Err(CodecError::MalformedInput { .. })
        ));

        // Ten bytes whose last byte carries more than bit 63.
        let mut data = [0xFFu8; 10];
        data[9] = 0x02;
        assert!(matches!(
            WireReader::new(&data).read_varint(),
            Err(CodecError::MalformedInput { .. })
        ));
    }

    #[test]
    fn unit_header_roundtrip() {
        let mut buf = Vec::new();
        write_unit_header(&mut buf, Tag(300), WireKind::Fixed64);
        assert_eq!(buf, vec![0xAC, 0x02, 0x02]);
        let (tag, kind) = WireReader::new(&buf).read_unit_header().unwrap();
        assert_eq!(tag, Tag(300));
        assert_eq!(kind, WireKind::Fixed64);
    }

    #[test]
    fn unit_header_rejects_bad_kind_and_tag_zero() {
        assert!(matches!(
            WireReader::new(&[0x01, 0x07]).read_unit_header(),
            Err(CodecError::MalformedInput { .. })
        ));
        assert!(matches!(
            WireReader::new(&[0x00, 0x00]).read_unit_header(),
            Err(CodecError::MalformedInput { .. })
        ));
        let mut too_big = Vec::new();
        write_varint(&mut too_big, u64::from(u32::MAX) + 1);
        too_big.push(0);
        assert!(matches!(
            WireReader::new(&too_big).read_unit_header(),
            Err(CodecError::MalformedInput { .. })
        ));
    }

    #[test]
    fn length_prefixed_past_end_is_truncated() {
        let mut buf = Vec::new();
        write_length_prefixed(&mut buf, b"hello");
        buf.truncate(buf.len() - 1);
        assert!(matches!(
            WireReader::new(&buf).read_length_prefixed(),
            Err(CodecError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn read_payload_returns_raw_bytes() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 300);
        buf.extend_from_slice(&7u32.to_le_bytes());
        write_length_prefixed(&mut buf, b"abc");

        let mut reader = WireReader::new(&buf);
        assert_eq!(reader.read_payload(WireKind::Varint).unwrap(), &[0xAC, 0x02]);
        assert_eq!(
            reader.read_payload(WireKind::Fixed32).unwrap(),
            &7u32.to_le_bytes()
        );
        assert_eq!(reader.read_payload(WireKind::LengthDelimited).unwrap(), b"abc");
        assert!(reader.is_empty());
        assert_eq!(reader.position(), buf.len());
    }
}
