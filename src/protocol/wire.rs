//! Wire primitives
//!
//! All integers are little-endian. Strings are length-prefixed (u32)
//! UTF-8 with a hard size cap, so a corrupt length field fails fast
//! instead of driving a huge allocation.

use super::errors::{ProtocolError, ProtocolResult};

/// Cap on one encoded entry string.
pub const MAX_ENTRY_BYTES: usize = 32 * 1024;

/// Cap on the number of entries in one snapshot.
pub const MAX_SNAPSHOT_ENTRIES: usize = 65_536;

/// Append a little-endian u32.
pub(crate) fn write_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Append a length-prefixed UTF-8 string.
pub(crate) fn write_string(buf: &mut Vec<u8>, value: &str) {
    write_u32(buf, value.len() as u32);
    buf.extend_from_slice(value.as_bytes());
}

/// Strict forward-only reader over one message buffer.
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize, what: &str) -> ProtocolResult<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or_else(|| {
            ProtocolError::oversized(format!("{} length overflows the buffer", what))
        })?;
        if end > self.data.len() {
            return Err(ProtocolError::truncated(format!(
                "message ended while reading {} ({} bytes needed, {} left)",
                what,
                len,
                self.data.len() - self.pos
            )));
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn read_u8(&mut self, what: &str) -> ProtocolResult<u8> {
        Ok(self.take(1, what)?[0])
    }

    pub(crate) fn read_u32(&mut self, what: &str) -> ProtocolResult<u32> {
        let bytes = self.take(4, what)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn read_string(&mut self, what: &str) -> ProtocolResult<String> {
        let len = self.read_u32(what)? as usize;
        if len > MAX_ENTRY_BYTES {
            return Err(ProtocolError::oversized(format!(
                "{} of {} bytes exceeds cap of {}",
                what, len, MAX_ENTRY_BYTES
            )));
        }
        let bytes = self.take(len, what)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ProtocolError::invalid_utf8(format!("{}: {}", what, e)))
    }

    /// Finish decoding: trailing bytes mean a corrupt message.
    pub(crate) fn finish(self) -> ProtocolResult<()> {
        let remaining = self.data.len() - self.pos;
        if remaining > 0 {
            return Err(ProtocolError::trailing_bytes(remaining));
        }
        Ok(())
    }
}
