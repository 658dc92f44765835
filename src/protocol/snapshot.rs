//! Full-state snapshot message
//!
//! Wire layout:
//!
//! ```text
//! +------------------+
//! | Entry Count      | (u32 LE)
//! +------------------+
//! | Entry            | (length-prefixed UTF-8) × count
//! +------------------+
//! ```
//!
//! Entries are canonical matcher renderings. The enabled flag is not
//! part of the snapshot; it replicates through Enable/Disable deltas.

use super::errors::{ProtocolError, ProtocolResult};
use super::wire::{write_string, write_u32, Reader, MAX_SNAPSHOT_ENTRIES};

/// Full whitelist state transfer, sent once at session join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<String>,
}

impl Snapshot {
    /// Create a snapshot from rendered entries.
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// The carried entries.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of carried entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot carries no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode to wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.entries.iter().map(|e| 4 + e.len()).sum::<usize>());
        write_u32(&mut buf, self.entries.len() as u32);
        for entry in &self.entries {
            write_string(&mut buf, entry);
        }
        buf
    }

    /// Decode from wire bytes, consuming the whole buffer.
    pub fn decode(data: &[u8]) -> ProtocolResult<Self> {
        let mut reader = Reader::new(data);

        let count = reader.read_u32("entry count")? as usize;
        if count > MAX_SNAPSHOT_ENTRIES {
            return Err(ProtocolError::oversized(format!(
                "snapshot of {} entries exceeds cap of {}",
                count, MAX_SNAPSHOT_ENTRIES
            )));
        }

        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            entries.push(reader.read_string("snapshot entry")?);
        }
        reader.finish()?;

        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ProtocolErrorKind;

    #[test]
    fn test_round_trip() {
        let snapshot = Snapshot::new(vec![
            "computercraft:*".to_string(),
            "minecraft:log[variant=oak]".to_string(),
        ]);

        let decoded = Snapshot::decode(&snapshot.encode()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_empty_round_trip() {
        let snapshot = Snapshot::default();
        let bytes = snapshot.encode();
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        assert_eq!(Snapshot::decode(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn test_missing_entries_rejected() {
        let mut buf = Vec::new();
        super::super::wire::write_u32(&mut buf, 2);
        super::super::wire::write_string(&mut buf, "computercraft:*");
        // Second entry promised but absent

        let err = Snapshot::decode(&buf).unwrap_err();
        assert_eq!(err.kind, ProtocolErrorKind::Truncated);
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = Snapshot::new(vec!["a:b".to_string()]).encode();
        bytes.push(0);

        let err = Snapshot::decode(&bytes).unwrap_err();
        assert_eq!(err.kind, ProtocolErrorKind::TrailingBytes);
    }

    #[test]
    fn test_absurd_count_rejected_without_allocation() {
        let mut buf = Vec::new();
        super::super::wire::write_u32(&mut buf, u32::MAX);

        let err = Snapshot::decode(&buf).unwrap_err();
        assert_eq!(err.kind, ProtocolErrorKind::Oversized);
    }
}
