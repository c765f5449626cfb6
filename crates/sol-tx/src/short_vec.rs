//! Short-vec ("compact-u16") length prefixes and a byte reader for the
//! transaction wire format.
//!
//! Every variable-length list on the wire is preceded by its length encoded
//! as a base-128 varint: 7 bits per byte, least significant group first, high
//! bit set on every byte except the last. Lengths are capped at `u16::MAX`,
//! so an encoding is at most 3 bytes.

use crate::error::SolError;

/// Maximum number of bytes a short-vec length can take.
pub const MAX_ENCODING_LENGTH: usize = 3;

/// Encode a `u16` value in short-vec form.
///
/// - Values 0..0x7f       -> 1 byte
/// - Values 0x80..0x3fff  -> 2 bytes
/// - Values 0x4000..      -> 3 bytes
pub fn encode_compact_u16(value: u16) -> Vec<u8> {
    let mut val = value as u32;
    let mut out = Vec::with_capacity(MAX_ENCODING_LENGTH);

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }

    out
}

/// Append the short-vec encoding of `len` to `buf`.
///
/// Fails if the list is too long to be described on the wire.
pub fn write_len(buf: &mut Vec<u8>, len: usize) -> Result<(), SolError> {
    let len = u16::try_from(len).map_err(|_| {
        SolError::TransactionTooLarge(format!("list of {len} items exceeds the short-vec limit"))
    })?;
    buf.extend_from_slice(&encode_compact_u16(len));
    Ok(())
}

/// Decode a short-vec value from the front of `data`.
///
/// Returns `(value, bytes_consumed)`. Truncated input, values above
/// `u16::MAX` and non-canonical (padded) encodings are rejected.
pub fn decode_compact_u16(data: &[u8]) -> Result<(u16, usize), SolError> {
    let mut value: u32 = 0;

    for (i, &byte) in data.iter().take(MAX_ENCODING_LENGTH).enumerate() {
        if i > 0 && byte == 0 {
            return Err(SolError::SerializationError(
                "non-canonical short-vec encoding".into(),
            ));
        }
        value |= ((byte & 0x7f) as u32) << (7 * i);

        if byte & 0x80 == 0 {
            return u16::try_from(value)
                .map(|v| (v, i + 1))
                .map_err(|_| SolError::SerializationError("short-vec value overflow".into()));
        }
    }

    if data.len() < MAX_ENCODING_LENGTH {
        Err(SolError::SerializationError(
            "unexpected end of data while decoding short-vec".into(),
        ))
    } else {
        Err(SolError::SerializationError("short-vec value overflow".into()))
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Forward-only reader over wire bytes.
pub(crate) struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub(crate) fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, SolError> {
        let byte = self.peek_u8().ok_or_else(|| truncated("u8"))?;
        self.pos += 1;
        Ok(byte)
    }

    pub(crate) fn read_bytes(&mut self, len: usize, what: &str) -> Result<&'a [u8], SolError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| truncated(what))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn read_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N], SolError> {
        let bytes = self.read_bytes(N, what)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub(crate) fn read_len(&mut self) -> Result<usize, SolError> {
        let (value, consumed) = decode_compact_u16(&self.data[self.pos.min(self.data.len())..])?;
        self.pos += consumed;
        Ok(value as usize)
    }

    /// Reads a short-vec prefixed byte list.
    pub(crate) fn read_vec(&mut self, what: &str) -> Result<Vec<u8>, SolError> {
        let len = self.read_len()?;
        Ok(self.read_bytes(len, what)?.to_vec())
    }
}

fn truncated(what: &str) -> SolError {
    SolError::SerializationError(format!("unexpected end of data while reading {what}"))
}
