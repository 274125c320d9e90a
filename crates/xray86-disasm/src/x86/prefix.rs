//! Legacy prefix and REX scanning.

use xray86_core::{Bitness, Register};

use super::stream::ByteStream;
use crate::DecodeError;

/// REX prefix fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rex {
    /// REX.W - 64-bit operand size
    pub w: bool,
    /// REX.R - extends ModR/M reg field
    pub r: bool,
    /// REX.X - extends SIB index field
    pub x: bool,
    /// REX.B - extends ModR/M r/m, SIB base, or opcode reg
    pub b: bool,
}

impl Rex {
    /// Parse a REX byte.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            w: byte & 0x08 != 0,
            r: byte & 0x04 != 0,
            x: byte & 0x02 != 0,
            b: byte & 0x01 != 0,
        }
    }
}

/// Mandatory prefix class, numbered like the VEX/EVEX `pp` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MandatoryPrefix {
    #[default]
    None,
    P66,
    PF3,
    PF2,
}

impl MandatoryPrefix {
    pub fn from_pp(pp: u8) -> Self {
        match pp & 3 {
            0 => Self::None,
            1 => Self::P66,
            2 => Self::PF3,
            _ => Self::PF2,
        }
    }

    /// Index into a `Slot::Mandatory` table.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Legacy prefixes seen before the opcode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefixes {
    /// LOCK prefix (0xF0)
    pub lock: bool,
    /// REPNE/REPNZ prefix (0xF2)
    pub repne: bool,
    /// REP/REPE/REPZ prefix (0xF3)
    pub repe: bool,
    /// Segment override, `Register::None` if absent
    pub segment: Register,
    /// Operand size override (0x66)
    pub operand_size: bool,
    /// Address size override (0x67)
    pub address_size: bool,
    /// REX prefix, only if it directly precedes the opcode
    pub rex: Option<Rex>,
    /// Mandatory prefix candidate for SIMD opcode slots
    pub mandatory: MandatoryPrefix,
}

impl Prefixes {
    /// Consumes the prefix run at the start of `stream`.
    ///
    /// Stops at the first byte that is not a prefix, which is left unread.
    pub fn scan(stream: &mut ByteStream<'_>, bitness: Bitness) -> Result<Self, DecodeError> {
        let mut prefixes = Self::default();

        while let Some(byte) = stream.peek_u8() {
            match byte {
                // Group 1: LOCK and repeat
                0xF0 => prefixes.lock = true,
                0xF2 => {
                    prefixes.repne = true;
                    prefixes.mandatory = MandatoryPrefix::PF2;
                }
                0xF3 => {
                    prefixes.repe = true;
                    prefixes.mandatory = MandatoryPrefix::PF3;
                }

                // Group 2: Segment overrides
                0x26 | 0x2E | 0x36 | 0x3E => {
                    // ES/CS/SS/DS are null overrides in 64-bit mode and do not
                    // displace an FS/GS override.
                    let fs_gs = matches!(prefixes.segment, Register::FS | Register::GS);
                    if !(bitness.is_64bit() && fs_gs) {
                        prefixes.segment = match byte {
                            0x26 => Register::ES,
                            0x2E => Register::CS,
                            0x36 => Register::SS,
                            _ => Register::DS,
                        };
                    }
                }
                0x64 => prefixes.segment = Register::FS,
                0x65 => prefixes.segment = Register::GS,

                // Group 3: Operand size override
                0x66 => {
                    prefixes.operand_size = true;
                    if prefixes.mandatory == MandatoryPrefix::None {
                        prefixes.mandatory = MandatoryPrefix::P66;
                    }
                }

                // Group 4: Address size override
                0x67 => prefixes.address_size = true,

                // REX prefix (0x40-0x4F in 64-bit mode)
                0x40..=0x4F if bitness.is_64bit() => {
                    stream.read_u8()?;
                    prefixes.rex = Some(Rex::from_byte(byte));
                    continue;
                }

                // Not a prefix
                _ => break,
            }

            stream.read_u8()?;
            // REX must be the last prefix; an earlier one is ignored.
            prefixes.rex = None;
        }

        Ok(prefixes)
    }

    /// Returns whether any prefix that conflicts with a VEX/XOP/EVEX escape
    /// (66, F2, F3 or REX) was seen.
    pub fn conflicts_with_escape(&self) -> bool {
        self.rex.is_some() || self.mandatory != MandatoryPrefix::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(bytes: &[u8], bitness: Bitness) -> (Prefixes, usize) {
        let mut stream = ByteStream::new(bytes, 0);
        let prefixes = Prefixes::scan(&mut stream, bitness).unwrap();
        (prefixes, stream.position())
    }

    #[test]
    fn test_no_prefixes() {
        let (p, len) = scan(&[0x90], Bitness::Bits64);
        assert_eq!(len, 0);
        assert_eq!(p, Prefixes::default());
    }

    #[test]
    fn test_rex_must_be_last() {
        let (p, len) = scan(&[0x48, 0x01, 0xC0], Bitness::Bits64);
        assert_eq!(len, 1);
        assert!(p.rex.unwrap().w);

        // A legacy prefix after REX cancels it.
        let (p, len) = scan(&[0x48, 0x66, 0x01, 0xC0], Bitness::Bits64);
        assert_eq!(len, 2);
        assert!(p.rex.is_none());
        assert!(p.operand_size);

        // Last REX wins.
        let (p, len) = scan(&[0x41, 0x44, 0x90], Bitness::Bits64);
        assert_eq!(len, 2);
        assert_eq!(p.rex, Some(Rex { w: false, r: true, x: false, b: false }));
    }

    #[test]
    fn test_rex_bytes_are_opcodes_outside_64bit() {
        let (p, len) = scan(&[0x48, 0x01], Bitness::Bits32);
        assert_eq!(len, 0);
        assert!(p.rex.is_none());
    }

    #[test]
    fn test_mandatory_prefix_order() {
        let (p, _) = scan(&[0x66, 0xF3, 0x0F], Bitness::Bits32);
        assert_eq!(p.mandatory, MandatoryPrefix::PF3);
        let (p, _) = scan(&[0xF2, 0x66, 0x0F], Bitness::Bits32);
        assert_eq!(p.mandatory, MandatoryPrefix::PF2);
        let (p, _) = scan(&[0xF3, 0xF2, 0x0F], Bitness::Bits32);
        assert_eq!(p.mandatory, MandatoryPrefix::PF2);
        // Both repeat prefixes stay recorded; only the mandatory one is picked.
        assert!(p.repne);
        assert!(p.repe);
    }

    #[test]
    fn test_segment_overrides() {
        let (p, _) = scan(&[0x64, 0x2E, 0x8B], Bitness::Bits64);
        assert_eq!(p.segment, Register::FS);
        let (p, _) = scan(&[0x64, 0x2E, 0x8B], Bitness::Bits32);
        assert_eq!(p.segment, Register::CS);
        let (p, _) = scan(&[0x26, 0x8B], Bitness::Bits64);
        assert_eq!(p.segment, Register::ES);
    }

    #[test]
    fn test_prefix_flood_is_too_long() {
        let bytes = [0x66u8; 20];
        let mut stream = ByteStream::new(&bytes, 0);
        Prefixes::scan(&mut stream, Bitness::Bits32).unwrap();
        assert_eq!(stream.position(), 15);
        assert!(matches!(stream.read_u8(), Err(DecodeError::TooLong { .. })));
    }
}
