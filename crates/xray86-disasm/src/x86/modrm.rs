//! ModR/M, SIB and displacement decoding.

use xray86_core::{Bitness, MemoryOperand, Register, RegisterClass, VsibIndex};

use super::encoding::EncodingContext;
use super::stream::ByteStream;
use crate::DecodeError;

/// Decoded ModR/M byte. Fields are raw; extension bits live in the
/// [`EncodingContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModRM {
    /// Mod field (2 bits)
    pub mod_: u8,
    /// Reg field (3 bits)
    pub reg: u8,
    /// R/M field (3 bits)
    pub rm: u8,
}

impl ModRM {
    pub fn parse(byte: u8) -> Self {
        Self {
            mod_: (byte >> 6) & 0x3,
            reg: (byte >> 3) & 0x7,
            rm: byte & 0x7,
        }
    }

    /// Returns true if this ModR/M encodes a register operand (mod=11).
    pub fn is_register(&self) -> bool {
        self.mod_ == 0b11
    }
}

/// Decoded SIB byte, raw fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sib {
    /// Scale (2 bits) - actual scale is 1 << scale
    pub scale: u8,
    pub index: u8,
    pub base: u8,
}

impl Sib {
    pub fn parse(byte: u8) -> Self {
        Self {
            scale: (byte >> 6) & 0x3,
            index: (byte >> 3) & 0x7,
            base: byte & 0x7,
        }
    }

    /// Returns the actual scale factor (1, 2, 4, or 8).
    pub fn scale_factor(&self) -> u8 {
        1 << self.scale
    }
}

/// Effective address size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSize {
    A16,
    A32,
    A64,
}

impl AddressSize {
    /// Address size for the CPU mode, toggled by a `67` prefix.
    pub fn new(bitness: Bitness, override_67: bool) -> Self {
        match (bitness, override_67) {
            (Bitness::Bits16, false) | (Bitness::Bits32, true) => Self::A16,
            (Bitness::Bits16, true) | (Bitness::Bits32, false) | (Bitness::Bits64, true) => Self::A32,
            (Bitness::Bits64, false) => Self::A64,
        }
    }

    /// Width of an address in bytes.
    pub fn bytes(self) -> u8 {
        match self {
            Self::A16 => 2,
            Self::A32 => 4,
            Self::A64 => 8,
        }
    }

    /// Truncates a signed value to this width.
    pub fn wrap(self, value: i64) -> u64 {
        match self {
            Self::A16 => value as u16 as u64,
            Self::A32 => value as u32 as u64,
            Self::A64 => value as u64,
        }
    }
}

/// Base/index pairs of 16-bit addressing, by rm.
const MEM16: [(Register, Register); 8] = [
    (Register::BX, Register::SI),
    (Register::BX, Register::DI),
    (Register::BP, Register::SI),
    (Register::BP, Register::DI),
    (Register::SI, Register::None),
    (Register::DI, Register::None),
    (Register::BP, Register::None),
    (Register::BX, Register::None),
];

/// Inputs for decoding the memory form of a ModR/M operand.
#[derive(Debug, Clone, Copy)]
pub struct MemoryRequest {
    pub bitness: Bitness,
    pub address_size: AddressSize,
    /// Vector index class and width for VSIB operands.
    pub vsib: Option<(RegisterClass, VsibIndex)>,
    /// EVEX compressed-displacement multiplier (1 outside EVEX).
    pub disp8_scale: u64,
}

/// Decodes the SIB and displacement of a memory ModR/M, reading them from
/// `stream`. The returned operand's `size` is left `Unknown`.
pub fn decode_memory(
    stream: &mut ByteStream<'_>,
    modrm: ModRM,
    ctx: &EncodingContext,
    request: MemoryRequest,
) -> Result<MemoryOperand, DecodeError> {
    debug_assert!(!modrm.is_register());
    let address = stream.address();
    let has_sib = request.address_size != AddressSize::A16 && modrm.rm == 4;
    if request.vsib.is_some() && !has_sib {
        return Err(DecodeError::invalid_encoding(
            address,
            "VSIB operand requires a SIB byte with 32/64-bit addressing",
        ));
    }

    match request.address_size {
        AddressSize::A16 => decode_memory16(stream, modrm, request.disp8_scale),
        size => decode_memory32(stream, modrm, ctx, size, request),
    }
}

fn decode_memory16(
    stream: &mut ByteStream<'_>,
    modrm: ModRM,
    disp8_scale: u64,
) -> Result<MemoryOperand, DecodeError> {
    let mut mem = MemoryOperand::default();
    let (base, index) = MEM16[modrm.rm as usize];

    match modrm.mod_ {
        0 if modrm.rm == 6 => {
            mem.displacement = stream.read_u16()? as u64;
            mem.displ_size = 2;
            return Ok(mem);
        }
        0 => {}
        1 => {
            let disp = stream.read_u8()? as i8 as i64;
            mem.displacement = AddressSize::A16.wrap(disp.wrapping_mul(disp8_scale as i64));
            mem.displ_size = 1;
        }
        _ => {
            mem.displacement = stream.read_u16()? as u64;
            mem.displ_size = 2;
        }
    }

    mem.base = base;
    mem.index = index;
    Ok(mem)
}

fn decode_memory32(
    stream: &mut ByteStream<'_>,
    modrm: ModRM,
    ctx: &EncodingContext,
    size: AddressSize,
    request: MemoryRequest,
) -> Result<MemoryOperand, DecodeError> {
    let gpr = |n: u8| match size {
        AddressSize::A64 => Register::gpr64(n),
        _ => Register::gpr32(n),
    };
    let mut mem = MemoryOperand::default();

    let sib = if modrm.rm == 4 {
        Some(Sib::parse(stream.read_u8()?))
    } else {
        None
    };

    // Base register, or the disp32-only / RIP-relative forms.
    let mut disp32_no_base = false;
    match sib {
        Some(sib) if sib.base == 5 && modrm.mod_ == 0 => disp32_no_base = true,
        Some(sib) => mem.base = gpr(sib.base | ctx.base_ext),
        None if modrm.rm == 5 && modrm.mod_ == 0 => {
            disp32_no_base = true;
            // RIP/EIP-relative in 64-bit mode, absolute disp32 elsewhere.
            if request.bitness.is_64bit() {
                mem.base = if size == AddressSize::A64 {
                    Register::RIP
                } else {
                    Register::EIP
                };
            }
        }
        None => mem.base = gpr(modrm.rm | ctx.base_ext),
    }

    if let Some(sib) = sib {
        mem.scale = sib.scale_factor();
        match request.vsib {
            Some((class, width)) => {
                let n = sib.index | ctx.index_ext | ctx.v_ext;
                mem.index = Register::from_class(class, n, false).unwrap_or(Register::None);
                mem.vsib = width;
            }
            None => {
                let n = sib.index | ctx.index_ext;
                if n != 4 {
                    mem.index = gpr(n);
                }
            }
        }
    }

    if disp32_no_base || modrm.mod_ == 2 {
        mem.displacement = size.wrap(stream.read_u32()? as i32 as i64);
        mem.displ_size = 4;
    } else if modrm.mod_ == 1 {
        let disp = stream.read_u8()? as i8 as i64;
        mem.displacement = size.wrap(disp.wrapping_mul(request.disp8_scale as i64));
        mem.displ_size = 1;
    }

    Ok(mem)
}
