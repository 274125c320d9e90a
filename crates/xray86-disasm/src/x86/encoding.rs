//! Escape header parsing.
//!
//! Each parser turns the raw header bytes of one encoding family into the same
//! normalized [`EncodingContext`], so later stages never look at which prefix
//! bytes produced a field.

use xray86_core::{Bitness, EncodingKind};

use super::prefix::{MandatoryPrefix, Prefixes};
use crate::error::Escape;
use crate::DecodeError;

/// Vector length selected by VEX.L / EVEX.L'L.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VectorLength {
    #[default]
    L128,
    L256,
    L512,
    /// EVEX.L'L == 11
    Reserved,
}

impl VectorLength {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 3 {
            0 => Self::L128,
            1 => Self::L256,
            2 => Self::L512,
            _ => Self::Reserved,
        }
    }
}

/// Opcode map the opcode byte is looked up in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpcodeMap {
    #[default]
    Primary,
    Map0F,
    Map0F38,
    Map0F3A,
    Xop8,
    Xop9,
    XopA,
}

/// Normalized encoding fields of one instruction.
///
/// Extension fields hold the value to OR into a register number (`8` or
/// `16`), not the raw inverted bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodingContext {
    pub kind: EncodingKind,
    pub map: OpcodeMap,
    pub mandatory_prefix: MandatoryPrefix,
    pub w: bool,
    /// REX.R / VEX.R / EVEX.R
    pub reg_ext: u8,
    /// EVEX.R'
    pub reg_ext2: u8,
    /// REX.X / VEX.X / EVEX.X for the SIB index
    pub index_ext: u8,
    /// REX.B / VEX.B / EVEX.B
    pub base_ext: u8,
    /// EVEX.X as fifth bit of a register-direct rm
    pub rm_ext2: u8,
    /// EVEX.V' as fifth bit of vvvv or of a VSIB index
    pub v_ext: u8,
    /// Low four bits of the vvvv register number
    pub vvvv: u8,
    pub vector_length: VectorLength,
    /// Raw EVEX.L'L, the rounding mode when EVEX.b selects static rounding
    pub ll: u8,
    /// EVEX.aaa
    pub opmask: u8,
    /// EVEX.z
    pub zeroing: bool,
    /// EVEX.b
    pub broadcast: bool,
    /// A REX prefix is in effect (selects SPL..DIL for 8-bit registers)
    pub has_rex: bool,
}

impl EncodingContext {
    /// Context for a legacy-encoded instruction, from its prefixes.
    pub fn legacy(prefixes: &Prefixes) -> Self {
        let mut ctx = Self {
            kind: EncodingKind::Legacy,
            mandatory_prefix: prefixes.mandatory,
            ..Self::default()
        };
        if let Some(rex) = prefixes.rex {
            ctx.has_rex = true;
            ctx.w = rex.w;
            ctx.reg_ext = (rex.r as u8) << 3;
            ctx.index_ext = (rex.x as u8) << 3;
            ctx.base_ext = (rex.b as u8) << 3;
        }
        ctx
    }

    /// Parses the byte after a `C5` escape.
    pub fn vex2(b1: u8, bitness: Bitness) -> Self {
        let inv = !b1;
        let mut ctx = Self {
            kind: EncodingKind::Vex,
            map: OpcodeMap::Map0F,
            mandatory_prefix: MandatoryPrefix::from_pp(b1),
            vector_length: VectorLength::from_bits((b1 >> 2) & 1),
            ..Self::default()
        };
        if bitness.is_64bit() {
            ctx.reg_ext = (inv >> 4) & 8;
            ctx.vvvv = (inv >> 3) & 0x0F;
        } else {
            ctx.vvvv = (inv >> 3) & 0x07;
        }
        ctx
    }

    /// Parses the two bytes after a `C4` escape.
    pub fn vex3(b1: u8, b2: u8, bitness: Bitness, address: u64) -> Result<Self, DecodeError> {
        let map = match b1 & 0x1F {
            1 => OpcodeMap::Map0F,
            2 => OpcodeMap::Map0F38,
            3 => OpcodeMap::Map0F3A,
            _ => {
                return Err(DecodeError::invalid_escape(
                    address,
                    Escape::Vex3,
                    "reserved map select",
                ))
            }
        };
        Ok(Self::three_byte(EncodingKind::Vex, map, b1, b2, bitness))
    }

    /// Parses the two bytes after an `8F` escape.
    pub fn xop(b1: u8, b2: u8, bitness: Bitness, address: u64) -> Result<Self, DecodeError> {
        let map = match b1 & 0x1F {
            8 => OpcodeMap::Xop8,
            9 => OpcodeMap::Xop9,
            10 => OpcodeMap::XopA,
            _ => {
                return Err(DecodeError::invalid_escape(
                    address,
                    Escape::Xop,
                    "reserved map select",
                ))
            }
        };
        Ok(Self::three_byte(EncodingKind::Xop, map, b1, b2, bitness))
    }

    // VEX3 and XOP share their layout and differ only in map numbering.
    fn three_byte(kind: EncodingKind, map: OpcodeMap, b1: u8, b2: u8, bitness: Bitness) -> Self {
        let mut ctx = Self {
            kind,
            map,
            mandatory_prefix: MandatoryPrefix::from_pp(b2),
            w: b2 & 0x80 != 0,
            vector_length: VectorLength::from_bits((b2 >> 2) & 1),
            ..Self::default()
        };
        if bitness.is_64bit() {
            let inv = !b1;
            ctx.reg_ext = (inv >> 4) & 8;
            ctx.index_ext = (inv >> 3) & 8;
            ctx.base_ext = (inv >> 2) & 8;
            ctx.vvvv = (!b2 >> 3) & 0x0F;
        } else {
            ctx.vvvv = (!b2 >> 3) & 0x07;
        }
        ctx
    }

    /// Parses the three payload bytes after a `62` escape.
    pub fn evex(p0: u8, p1: u8, p2: u8, bitness: Bitness, address: u64) -> Result<Self, DecodeError> {
        if p1 & 0x04 == 0 {
            return Err(DecodeError::invalid_escape(
                address,
                Escape::Evex,
                "fixed bit P1[2] is clear",
            ));
        }
        if p0 & 0x0C != 0 {
            return Err(DecodeError::invalid_escape(
                address,
                Escape::Evex,
                "reserved bits P0[3:2] are set",
            ));
        }
        let map = match p0 & 0x03 {
            1 => OpcodeMap::Map0F,
            2 => OpcodeMap::Map0F38,
            3 => OpcodeMap::Map0F3A,
            _ => {
                return Err(DecodeError::invalid_escape(
                    address,
                    Escape::Evex,
                    "reserved map select",
                ))
            }
        };

        let ll = (p2 >> 5) & 3;
        let mut ctx = Self {
            kind: EncodingKind::Evex,
            map,
            mandatory_prefix: MandatoryPrefix::from_pp(p1),
            w: p1 & 0x80 != 0,
            vector_length: VectorLength::from_bits(ll),
            ll,
            opmask: p2 & 0x07,
            zeroing: p2 & 0x80 != 0,
            broadcast: p2 & 0x10 != 0,
            ..Self::default()
        };
        if bitness.is_64bit() {
            let inv = !p0;
            ctx.reg_ext = (inv >> 4) & 8;
            ctx.index_ext = (inv >> 3) & 8;
            ctx.base_ext = (inv >> 2) & 8;
            ctx.reg_ext2 = inv & 0x10;
            ctx.rm_ext2 = (inv >> 2) & 0x10;
            ctx.v_ext = (!p2 & 0x08) << 1;
            ctx.vvvv = (!p1 >> 3) & 0x0F;
        } else {
            ctx.vvvv = (!p1 >> 3) & 0x07;
        }
        Ok(ctx)
    }

    /// Full vvvv register number, including EVEX.V'.
    pub fn vvvv_register(&self) -> u8 {
        self.vvvv | self.v_ext
    }

    /// Full ModRM.reg register number for a vector/GPR operand.
    pub fn reg_number(&self, reg: u8) -> u8 {
        reg | self.reg_ext | self.reg_ext2
    }

    /// Full ModRM.rm register number for a register-direct operand.
    pub fn rm_number(&self, rm: u8) -> u8 {
        rm | self.base_ext | self.rm_ext2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vex2_fields() {
        // C5 F8 77: vzeroupper
        let ctx = EncodingContext::vex2(0xF8, Bitness::Bits64);
        assert_eq!(ctx.kind, EncodingKind::Vex);
        assert_eq!(ctx.map, OpcodeMap::Map0F);
        assert_eq!(ctx.vvvv, 0);
        assert_eq!(ctx.reg_ext, 0);
        assert_eq!(ctx.vector_length, VectorLength::L128);
        assert_eq!(ctx.mandatory_prefix, MandatoryPrefix::None);

        // C5 4D: R=0 (inverted), vvvv=1001 -> 6, L=1, pp=01
        let ctx = EncodingContext::vex2(0x4D, Bitness::Bits64);
        assert_eq!(ctx.reg_ext, 8);
        assert_eq!(ctx.vvvv, 6);
        assert_eq!(ctx.vector_length, VectorLength::L256);
        assert_eq!(ctx.mandatory_prefix, MandatoryPrefix::P66);
    }

    #[test]
    fn test_vex2_32bit_ignores_high_bits() {
        let ctx = EncodingContext::vex2(0xC9, Bitness::Bits32);
        assert_eq!(ctx.reg_ext, 0);
        assert_eq!(ctx.vvvv, 6);
    }

    #[test]
    fn test_vex3_fields() {
        // C4 E2 79: map 0F38, W0, vvvv=0, L0, pp=66
        let ctx = EncodingContext::vex3(0xE2, 0x79, Bitness::Bits64, 0).unwrap();
        assert_eq!(ctx.map, OpcodeMap::Map0F38);
        assert!(!ctx.w);
        assert_eq!(ctx.mandatory_prefix, MandatoryPrefix::P66);

        // C4 02 F9: R X B all set (inverted zero), W1
        let ctx = EncodingContext::vex3(0x02, 0xF9, Bitness::Bits64, 0).unwrap();
        assert_eq!((ctx.reg_ext, ctx.index_ext, ctx.base_ext), (8, 8, 8));
        assert!(ctx.w);
    }

    #[test]
    fn test_vex3_reserved_map() {
        for map in [0u8, 4, 8, 0x1F] {
            let err = EncodingContext::vex3(0xE0 | map, 0x78, Bitness::Bits64, 0x1000).unwrap_err();
            assert!(matches!(
                err,
                DecodeError::InvalidEscapeEncoding { address: 0x1000, escape: Escape::Vex3, .. }
            ));
        }
    }

    #[test]
    fn test_xop_maps() {
        let ctx = EncodingContext::xop(0xE8, 0x78, Bitness::Bits64, 0).unwrap();
        assert_eq!(ctx.kind, EncodingKind::Xop);
        assert_eq!(ctx.map, OpcodeMap::Xop8);
        assert_eq!(EncodingContext::xop(0xE9, 0x78, Bitness::Bits32, 0).unwrap().map, OpcodeMap::Xop9);
        assert_eq!(EncodingContext::xop(0xEA, 0x78, Bitness::Bits16, 0).unwrap().map, OpcodeMap::XopA);
        assert!(EncodingContext::xop(0xEB, 0x78, Bitness::Bits64, 0).is_err());
    }

    #[test]
    fn test_evex_fields() {
        // 62 F1 4D 8B: map 0F, W0, vvvv=6, pp=66, z=1, L'L=00, b=0, V'=1, aaa=3
        let ctx = EncodingContext::evex(0xF1, 0x4D, 0x8B, Bitness::Bits64, 0).unwrap();
        assert_eq!(ctx.kind, EncodingKind::Evex);
        assert_eq!(ctx.map, OpcodeMap::Map0F);
        assert_eq!(ctx.vvvv_register(), 6);
        assert_eq!(ctx.mandatory_prefix, MandatoryPrefix::P66);
        assert!(ctx.zeroing);
        assert!(!ctx.broadcast);
        assert_eq!(ctx.opmask, 3);
        assert_eq!(ctx.vector_length, VectorLength::L128);

        // 62 21 4D 9D: R, X and R' clear (inverted), b=1
        let ctx = EncodingContext::evex(0x21, 0x4D, 0x9D, Bitness::Bits64, 0).unwrap();
        assert_eq!(ctx.reg_number(1), 25);
        assert_eq!(ctx.rm_number(1), 17);
        assert!(ctx.broadcast);

        // V' clear (inverted) extends vvvv
        let ctx = EncodingContext::evex(0xF1, 0x4D, 0x43, Bitness::Bits64, 0).unwrap();
        assert_eq!(ctx.vvvv_register(), 22);
        assert_eq!(ctx.vector_length, VectorLength::L512);
    }

    #[test]
    fn test_evex_fixed_bits() {
        assert!(matches!(
            EncodingContext::evex(0xF1, 0x48, 0x08, Bitness::Bits64, 0),
            Err(DecodeError::InvalidEscapeEncoding { escape: Escape::Evex, .. })
        ));
        assert!(EncodingContext::evex(0xF5, 0x4C, 0x08, Bitness::Bits64, 0).is_err());
        assert!(EncodingContext::evex(0xF0, 0x4C, 0x08, Bitness::Bits64, 0).is_err());
    }

    #[test]
    fn test_evex_32bit_ignores_extensions() {
        let ctx = EncodingContext::evex(0xC1, 0x0D, 0x03, Bitness::Bits32, 0).unwrap();
        assert_eq!(ctx.reg_ext | ctx.reg_ext2 | ctx.index_ext | ctx.base_ext | ctx.v_ext, 0);
        assert_eq!(ctx.vvvv, 6);
    }
}
