//! Decoding error types.

use thiserror::Error;

/// Escape prefix family named in header errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    Vex2,
    Vex3,
    Xop,
    Evex,
}

impl std::fmt::Display for Escape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Vex2 => "2-byte VEX",
            Self::Vex3 => "3-byte VEX",
            Self::Xop => "XOP",
            Self::Evex => "EVEX",
        };
        f.write_str(name)
    }
}

/// Error type for instruction decoding.
///
/// `address` is always the address of the first byte of the instruction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input ended before the instruction did.
    #[error("unexpected end of input at {address:#x}: need {needed} bytes, have {available}")]
    UnexpectedEnd {
        address: u64,
        needed: usize,
        available: usize,
    },

    /// A VEX/XOP/EVEX header violates a fixed bit or names a reserved map.
    #[error("invalid {escape} prefix at {address:#x}: {reason}")]
    InvalidEscapeEncoding {
        address: u64,
        escape: Escape,
        reason: &'static str,
    },

    /// No instruction is defined for these bytes in the current mode.
    #[error("invalid opcode at {address:#x}: {bytes:02x?}")]
    InvalidOpcode { address: u64, bytes: Vec<u8> },

    /// The opcode is defined but its attribute bits are not legal.
    #[error("invalid encoding at {address:#x}: {reason}")]
    InvalidEncoding { address: u64, reason: String },

    /// The instruction would exceed 15 bytes.
    #[error("instruction at {address:#x} is longer than 15 bytes")]
    TooLong { address: u64 },
}

impl DecodeError {
    /// Creates a new UnexpectedEnd error.
    pub fn unexpected_end(address: u64, needed: usize, available: usize) -> Self {
        Self::UnexpectedEnd {
            address,
            needed,
            available,
        }
    }

    /// Creates a new InvalidEscapeEncoding error.
    pub fn invalid_escape(address: u64, escape: Escape, reason: &'static str) -> Self {
        Self::InvalidEscapeEncoding {
            address,
            escape,
            reason,
        }
    }

    /// Creates a new InvalidOpcode error.
    pub fn invalid_opcode(address: u64, bytes: &[u8]) -> Self {
        Self::InvalidOpcode {
            address,
            bytes: bytes.to_vec(),
        }
    }

    /// Creates a new InvalidEncoding error.
    pub fn invalid_encoding(address: u64, reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            address,
            reason: reason.into(),
        }
    }

    /// Creates a new TooLong error.
    pub fn too_long(address: u64) -> Self {
        Self::TooLong { address }
    }

    /// Address of the instruction that failed to decode.
    pub fn address(&self) -> u64 {
        match self {
            Self::UnexpectedEnd { address, .. }
            | Self::InvalidEscapeEncoding { address, .. }
            | Self::InvalidOpcode { address, .. }
            | Self::InvalidEncoding { address, .. }
            | Self::TooLong { address } => *address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DecodeError::unexpected_end(0x1000, 3, 2);
        assert_eq!(
            err.to_string(),
            "unexpected end of input at 0x1000: need 3 bytes, have 2"
        );

        let err = DecodeError::invalid_escape(0x10, Escape::Evex, "P1 bit 2 must be set");
        assert_eq!(
            err.to_string(),
            "invalid EVEX prefix at 0x10: P1 bit 2 must be set"
        );

        let err = DecodeError::invalid_opcode(0x20, &[0x0f, 0xff]);
        assert_eq!(err.to_string(), "invalid opcode at 0x20: [0f, ff]");
        assert_eq!(err.address(), 0x20);
    }
}
