//! Decoder configuration.

use bitflags::bitflags;

bitflags! {
    /// Options controlling how strictly bytes are decoded and which
    /// instruction set extensions are recognized.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DecoderOptions: u32 {
        /// Clear illegal attribute bits instead of failing with `InvalidEncoding`.
        const PERMISSIVE = 1 << 0;
        /// Do not recognize VEX prefixes (C4/C5 decode as LES/LDS outside 64-bit mode).
        const NO_VEX = 1 << 1;
        /// Do not recognize XOP prefixes (8F always decodes as POP r/m).
        const NO_XOP = 1 << 2;
        /// Do not recognize EVEX prefixes (62 decodes as BOUND outside 64-bit mode).
        const NO_EVEX = 1 << 3;
    }
}

impl DecoderOptions {
    /// Strict ISA decoding with every extension enabled.
    pub const NONE: Self = Self::empty();

    pub fn is_strict(&self) -> bool {
        !self.contains(Self::PERMISSIVE)
    }
}
