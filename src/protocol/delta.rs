//! Incremental mutation message
//!
//! Wire layout:
//!
//! ```text
//! +------------------+
//! | Op Tag           | (u8: 0=Add, 1=Remove, 2=Clear, 3=Enable, 4=Disable)
//! +------------------+
//! | Entry            | (length-prefixed UTF-8, present iff Add or Remove)
//! +------------------+
//! ```
//!
//! The tag ordinals are part of the wire contract. A tag outside the
//! known range fails decoding, and the decoder never reads an entry for
//! tags that carry none.

use std::fmt;

use super::errors::{ProtocolError, ProtocolResult};
use super::wire::{write_string, Reader};

/// One whitelist mutation, as applied locally and as broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOp {
    /// Insert an entry
    Add(String),
    /// Remove an entry
    Remove(String),
    /// Empty the whitelist
    Clear,
    /// Enable the gate
    Enable,
    /// Disable the gate
    Disable,
}

impl MutationOp {
    /// Wire tag ordinal.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Add(_) => 0,
            Self::Remove(_) => 1,
            Self::Clear => 2,
            Self::Enable => 3,
            Self::Disable => 4,
        }
    }

    /// Short operation name, used in logs and replies.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Clear => "clear",
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }

    /// The carried entry, for ops that carry one.
    pub fn entry(&self) -> Option<&str> {
        match self {
            Self::Add(entry) | Self::Remove(entry) => Some(entry),
            _ => None,
        }
    }

    /// Encode to wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + self.entry().map_or(0, |e| 4 + e.len()));
        buf.push(self.tag());
        if let Some(entry) = self.entry() {
            write_string(&mut buf, entry);
        }
        buf
    }

    /// Decode from wire bytes, consuming the whole buffer.
    pub fn decode(data: &[u8]) -> ProtocolResult<Self> {
        let mut reader = Reader::new(data);

        let tag = reader.read_u8("op tag")?;
        let op = match tag {
            0 => Self::Add(reader.read_string("add entry")?),
            1 => Self::Remove(reader.read_string("remove entry")?),
            2 => Self::Clear,
            3 => Self::Enable,
            4 => Self::Disable,
            other => return Err(ProtocolError::unknown_tag(other)),
        };
        reader.finish()?;

        Ok(op)
    }
}

impl fmt::Display for MutationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entry() {
            Some(entry) => write!(f, "{} '{}'", self.name(), entry),
            None => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ProtocolErrorKind;

    #[test]
    fn test_tag_ordinals_are_fixed() {
        assert_eq!(MutationOp::Add("x:y".to_string()).tag(), 0);
        assert_eq!(MutationOp::Remove("x:y".to_string()).tag(), 1);
        assert_eq!(MutationOp::Clear.tag(), 2);
        assert_eq!(MutationOp::Enable.tag(), 3);
        assert_eq!(MutationOp::Disable.tag(), 4);
    }

    #[test]
    fn test_round_trip_all_ops() {
        let ops = [
            MutationOp::Add("computercraft:*".to_string()),
            MutationOp::Remove("minecraft:log[variant=oak]".to_string()),
            MutationOp::Clear,
            MutationOp::Enable,
            MutationOp::Disable,
        ];

        for op in ops {
            assert_eq!(MutationOp::decode(&op.encode()).unwrap(), op);
        }
    }

    #[test]
    fn test_parameterless_ops_encode_to_one_byte() {
        assert_eq!(MutationOp::Clear.encode(), vec![2]);
        assert_eq!(MutationOp::Enable.encode(), vec![3]);
        assert_eq!(MutationOp::Disable.encode(), vec![4]);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        for tag in [5u8, 6, 17, 255] {
            let err = MutationOp::decode(&[tag]).unwrap_err();
            assert_eq!(err.kind, ProtocolErrorKind::UnknownTag, "tag {}", tag);
        }
    }

    #[test]
    fn test_add_without_entry_rejected() {
        let err = MutationOp::decode(&[0]).unwrap_err();
        assert_eq!(err.kind, ProtocolErrorKind::Truncated);
    }

    #[test]
    fn test_parameterless_op_with_payload_rejected() {
        let mut bytes = MutationOp::Clear.encode();
        bytes.extend_from_slice(&MutationOp::Add("a:b".to_string()).encode()[1..]);

        let err = MutationOp::decode(&bytes).unwrap_err();
        assert_eq!(err.kind, ProtocolErrorKind::TrailingBytes);
    }

    #[test]
    fn test_empty_message_rejected() {
        let err = MutationOp::decode(&[]).unwrap_err();
        assert_eq!(err.kind, ProtocolErrorKind::Truncated);
    }
}
