//! CPU mode and encoding family identification.

/// Operating mode of the decoding CPU (16, 32 or 64-bit code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bitness {
    Bits16,
    Bits32,
    #[default]
    Bits64,
}

impl Bitness {
    /// Returns the mode width in bits.
    pub fn bits(&self) -> u32 {
        match self {
            Self::Bits16 => 16,
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }

    /// Returns whether this is 64-bit (long) mode.
    pub fn is_64bit(&self) -> bool {
        matches!(self, Self::Bits64)
    }
}

impl TryFrom<u32> for Bitness {
    type Error = u32;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(Self::Bits16),
            32 => Ok(Self::Bits32),
            64 => Ok(Self::Bits64),
            other => Err(other),
        }
    }
}

/// Encoding family an instruction was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncodingKind {
    /// One, two or three byte legacy opcode, optionally with REX.
    #[default]
    Legacy,
    /// 2 or 3 byte VEX prefix (C5/C4).
    Vex,
    /// AMD XOP prefix (8F).
    Xop,
    /// AVX-512 EVEX prefix (62).
    Evex,
}

impl EncodingKind {
    /// Returns a short name for this encoding family.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Vex => "vex",
            Self::Xop => "xop",
            Self::Evex => "evex",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitness_from_bits() {
        assert_eq!(Bitness::try_from(16), Ok(Bitness::Bits16));
        assert_eq!(Bitness::try_from(32), Ok(Bitness::Bits32));
        assert_eq!(Bitness::try_from(64), Ok(Bitness::Bits64));
        assert_eq!(Bitness::try_from(8), Err(8));
    }

    #[test]
    fn test_bitness_bits() {
        assert_eq!(Bitness::Bits16.bits(), 16);
        assert!(Bitness::Bits64.is_64bit());
        assert!(!Bitness::Bits32.is_64bit());
    }
}
