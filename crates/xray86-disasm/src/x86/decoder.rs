//! x86 instruction decoder.

use tracing::{debug, trace};
use xray86_core::{Bitness, EncodingKind, Instruction};

use super::encoding::{EncodingContext, OpcodeMap, VectorLength};
use super::finalize::Finalizer;
use super::modrm::{decode_memory, AddressSize, MemoryRequest, ModRM};
use super::opcodes;
use super::operands::{materialize, OperandInputs};
use super::prefix::{MandatoryPrefix, Prefixes};
use super::stream::{ByteStream, MAX_INSTRUCTION_LEN};
use super::template::{OpSize, OperandRole, Slot, Template, TemplateFlags};
use crate::error::DecodeError;
use crate::options::DecoderOptions;
use crate::traits::Disassembler;

/// x86 instruction decoder for one CPU mode.
///
/// Holds no per-instruction state; decoding is a pure function of the bytes,
/// the address, the mode and the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct X86Disassembler {
    bitness: Bitness,
    options: DecoderOptions,
}

impl X86Disassembler {
    /// Creates a decoder for `bitness`-bit code.
    pub fn new(bitness: Bitness, options: DecoderOptions) -> Self {
        debug!(bits = bitness.bits(), ?options, "creating x86 disassembler");
        Self { bitness, options }
    }

    pub fn options(&self) -> DecoderOptions {
        self.options
    }

    /// Decodes one instruction from the start of `bytes`, whose first byte is
    /// at address `ip`.
    pub fn decode(&self, bytes: &[u8], ip: u64) -> Result<Instruction, DecodeError> {
        let result = self.decode_one(bytes, ip);
        if let Err(err) = &result {
            trace!(address = ip, error = %err, "failed to decode instruction");
        }
        result
    }

    /// Returns the escape family `lead` starts, given the byte after it.
    fn escape_kind(&self, lead: u8, next: Option<u8>) -> Option<EncodingKind> {
        // Outside 64-bit mode C4/C5/62 are LES/LDS/BOUND unless the next byte
        // would be a register ModRM, which those instructions cannot take.
        let mod3 = self.bitness.is_64bit() || next.is_some_and(|b| b >= 0xC0);
        match lead {
            0xC4 | 0xC5 if !self.options.contains(DecoderOptions::NO_VEX) && mod3 => Some(EncodingKind::Vex),
            0x62 if !self.options.contains(DecoderOptions::NO_EVEX) && mod3 => Some(EncodingKind::Evex),
            0x8F if !self.options.contains(DecoderOptions::NO_XOP) && next.is_some_and(|b| (b & 0x1F) >= 8) => {
                Some(EncodingKind::Xop)
            }
            _ => None,
        }
    }

    /// Reads the header of the escape `lead` and returns its context.
    fn read_escape(&self, stream: &mut ByteStream<'_>, lead: u8) -> Result<EncodingContext, DecodeError> {
        let address = stream.address();
        match lead {
            0xC5 => Ok(EncodingContext::vex2(stream.read_u8()?, self.bitness)),
            0xC4 => {
                let b1 = stream.read_u8()?;
                let b2 = stream.read_u8()?;
                EncodingContext::vex3(b1, b2, self.bitness, address)
            }
            0x8F => {
                let b1 = stream.read_u8()?;
                let b2 = stream.read_u8()?;
                EncodingContext::xop(b1, b2, self.bitness, address)
            }
            _ => {
                let p0 = stream.read_u8()?;
                let p1 = stream.read_u8()?;
                let p2 = stream.read_u8()?;
                EncodingContext::evex(p0, p1, p2, self.bitness, address)
            }
        }
    }

    fn operand_size(&self, prefixes: &Prefixes, ctx: &EncodingContext, flags: TemplateFlags) -> OpSize {
        let o16 = prefixes.operand_size;
        match self.bitness {
            Bitness::Bits16 if o16 => OpSize::W32,
            Bitness::Bits16 => OpSize::W16,
            Bitness::Bits32 if o16 => OpSize::W16,
            Bitness::Bits32 => OpSize::W32,
            Bitness::Bits64 => {
                if ctx.w || flags.contains(TemplateFlags::FORCE_64) {
                    OpSize::W64
                } else if o16 {
                    OpSize::W16
                } else if flags.contains(TemplateFlags::DEFAULT_64) {
                    OpSize::W64
                } else {
                    OpSize::W32
                }
            }
        }
    }

    fn decode_one(&self, bytes: &[u8], ip: u64) -> Result<Instruction, DecodeError> {
        let strict = self.options.is_strict();
        let is_64 = self.bitness.is_64bit();
        let mut stream = ByteStream::new(bytes, ip);

        let prefixes = Prefixes::scan(&mut stream, self.bitness)?;
        let lead = stream.read_u8()?;
        let (ctx, opcode) = match self.escape_kind(lead, stream.peek_u8()) {
            Some(_) => {
                if prefixes.conflicts_with_escape() {
                    if strict {
                        return Err(DecodeError::invalid_encoding(
                            ip,
                            "66/F2/F3/REX prefix before a VEX/XOP/EVEX escape",
                        ));
                    }
                    trace!(address = ip, "escape supersedes legacy prefixes");
                }
                let ctx = self.read_escape(&mut stream, lead)?;
                (ctx, stream.read_u8()?)
            }
            None if lead == 0x0F => {
                let mut ctx = EncodingContext::legacy(&prefixes);
                let (map, opcode) = match stream.read_u8()? {
                    0x38 => (OpcodeMap::Map0F38, stream.read_u8()?),
                    0x3A => (OpcodeMap::Map0F3A, stream.read_u8()?),
                    op => (OpcodeMap::Map0F, op),
                };
                ctx.map = map;
                (ctx, opcode)
            }
            None => (EncodingContext::legacy(&prefixes), lead),
        };

        let invalid_opcode = |stream: &ByteStream<'_>| DecodeError::invalid_opcode(ip, stream.consumed());
        let table = opcodes::table(ctx.kind, ctx.map).ok_or_else(|| invalid_opcode(&stream))?;

        // Walk selector slots down to a template. Groups read ModRM early.
        let mut slot = table[opcode as usize];
        let mut modrm: Option<ModRM> = None;
        let mut consumed = None;
        let template: &Template = loop {
            match slot {
                Slot::Invalid => return Err(invalid_opcode(&stream)),
                Slot::Op(template) => break template,
                Slot::Mandatory(row) => {
                    consumed = Some(ctx.mandatory_prefix);
                    slot = row[ctx.mandatory_prefix.index()];
                }
                Slot::Group(row) => {
                    let m = match modrm {
                        Some(m) => m,
                        None => {
                            let m = ModRM::parse(stream.read_u8()?);
                            modrm = Some(m);
                            m
                        }
                    };
                    slot = row[m.reg as usize];
                }
                Slot::RexB { plain, extended } => {
                    slot = if ctx.base_ext != 0 { *extended } else { *plain };
                }
            }
        };
        if consumed == Some(MandatoryPrefix::None) {
            consumed = None;
        }

        let flags = template.flags;
        if (flags.contains(TemplateFlags::NO_64) && is_64) || (flags.contains(TemplateFlags::ONLY_64) && !is_64) {
            return Err(invalid_opcode(&stream));
        }
        if modrm.is_none() && template.needs_modrm() {
            modrm = Some(ModRM::parse(stream.read_u8()?));
        }
        if ctx.kind != EncodingKind::Legacy
            && flags.contains(TemplateFlags::L0)
            && ctx.vector_length != VectorLength::L128
        {
            return Err(invalid_opcode(&stream));
        }

        // EVEX.b on a register form repurposes L'L as the rounding mode.
        let register_form = modrm.map_or(true, |m| m.is_register());
        let static_rounding = ctx.kind == EncodingKind::Evex
            && ctx.broadcast
            && register_form
            && flags.intersects(TemplateFlags::ROUNDING | TemplateFlags::SAE);
        let length = if static_rounding {
            VectorLength::L512
        } else {
            ctx.vector_length
        };
        if ctx.kind == EncodingKind::Evex && ctx.vector_length == VectorLength::Reserved && !static_rounding {
            return Err(DecodeError::invalid_encoding(ip, "EVEX.L'L = 11 is reserved"));
        }

        let op_size = self.operand_size(&prefixes, &ctx, flags);
        let w = ctx.w && !(flags.contains(TemplateFlags::WIG32) && !is_64);
        let form = template
            .select(op_size, length, w)
            .ok_or_else(|| invalid_opcode(&stream))?;

        if let Some(m) = modrm {
            let shape_ok = form.operands.iter().all(|op| match op {
                OperandRole::RmReg(_) => m.is_register(),
                OperandRole::Mem | OperandRole::Vsib(..) => !m.is_register(),
                _ => true,
            });
            if !shape_ok || (!m.is_register() && !form.may_use_memory()) {
                return Err(invalid_opcode(&stream));
            }
        }

        let address_size = AddressSize::new(self.bitness, prefixes.address_size);
        let memory = match modrm {
            Some(m) if !m.is_register() => {
                // EVEX disp8 is scaled by the size of the memory access.
                let disp8_scale = if ctx.kind == EncodingKind::Evex {
                    let size = if ctx.broadcast && form.can_broadcast() {
                        form.bcst.size()
                    } else {
                        form.mem.size()
                    };
                    size.max(1) as u64
                } else {
                    1
                };
                let request = MemoryRequest {
                    bitness: self.bitness,
                    address_size,
                    vsib: form.vsib(),
                    disp8_scale,
                };
                let mut memory = decode_memory(&mut stream, m, &ctx, request)?;
                memory.size = form.mem;
                Some(memory)
            }
            _ => None,
        };

        let mut instr = Instruction::new(ip);
        let inputs = OperandInputs {
            ctx: &ctx,
            bitness: self.bitness,
            address_size,
            opcode,
            modrm,
            memory,
        };
        materialize(&mut stream, form, &inputs, &mut instr)?;
        instr.set_code(form.code);
        instr.set_encoding(ctx.kind);

        Finalizer {
            address: ip,
            bytes: stream.consumed(),
            strict,
            ctx: &ctx,
            prefixes: &prefixes,
            consumed,
            form,
            flags,
        }
        .apply(&mut instr)?;

        instr.set_len(stream.position());
        Ok(instr)
    }
}

impl Default for X86Disassembler {
    fn default() -> Self {
        Self::new(Bitness::Bits64, DecoderOptions::NONE)
    }
}

impl Disassembler for X86Disassembler {
    fn decode_instruction(&self, bytes: &[u8], address: u64) -> Result<Instruction, DecodeError> {
        self.decode(bytes, address)
    }

    fn min_instruction_size(&self) -> usize {
        1
    }

    fn max_instruction_size(&self) -> usize {
        MAX_INSTRUCTION_LEN
    }

    fn is_fixed_width(&self) -> bool {
        false
    }

    fn bitness(&self) -> Bitness {
        self.bitness
    }
}

/// Cursor-style decoder over a buffer of consecutive instructions.
///
/// Each successful [`Decoder::decode`] advances past the instruction; a failed
/// one advances a single byte so iteration always makes progress.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    disasm: X86Disassembler,
    bytes: &'a [u8],
    position: usize,
    ip: u64,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder whose first byte is at address 0.
    pub fn new(bytes: &'a [u8], bitness: Bitness, options: DecoderOptions) -> Self {
        Self::with_ip(bytes, bitness, 0, options)
    }

    /// Creates a decoder whose first byte is at address `ip`.
    pub fn with_ip(bytes: &'a [u8], bitness: Bitness, ip: u64, options: DecoderOptions) -> Self {
        Self {
            disasm: X86Disassembler::new(bitness, options),
            bytes,
            position: 0,
            ip,
        }
    }

    /// Offset of the next instruction in the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor. Positions past the end are clamped to the end.
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.bytes.len());
    }

    /// Returns whether any bytes are left to decode.
    pub fn can_decode(&self) -> bool {
        self.position < self.bytes.len()
    }

    /// Address of the next instruction.
    pub fn ip(&self) -> u64 {
        self.ip.wrapping_add(self.position as u64)
    }

    pub fn bitness(&self) -> Bitness {
        self.disasm.bitness
    }

    /// Decodes the instruction at the cursor and advances past it.
    pub fn decode(&mut self) -> Result<Instruction, DecodeError> {
        let ip = self.ip();
        let rest = &self.bytes[self.position..];
        let result = self.disasm.decode(rest, ip);
        let advance = match &result {
            Ok(instr) => instr.len(),
            Err(_) => 1,
        };
        self.position = (self.position + advance).min(self.bytes.len());
        result
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Instruction, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.can_decode() {
            return None;
        }
        Some(self.decode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xray86_core::{Code, MemorySize, OpKind, Register};

    fn decode(bytes: &[u8], bitness: Bitness) -> Result<Instruction, DecodeError> {
        X86Disassembler::new(bitness, DecoderOptions::NONE).decode(bytes, 0)
    }

    #[test]
    fn test_decode_simple() {
        let instr = decode(&[0x0F, 0x68, 0xCD], Bitness::Bits16).unwrap();
        assert_eq!(instr.code(), Code::Punpckhbw_mm_mmm64);
        assert_eq!(instr.op_count(), 2);
        assert_eq!(instr.len(), 3);
        assert_eq!(instr.op0_register(), Register::MM1);
        assert_eq!(instr.op1_register(), Register::MM5);
        assert!(!instr.has_op_mask());
    }

    #[test]
    fn test_mandatory_prefix_flips_family() {
        let instr = decode(&[0x66, 0x0F, 0x68, 0x08], Bitness::Bits16).unwrap();
        assert_eq!(instr.code(), Code::Punpckhbw_xmm_xmmm128);
        assert_eq!(instr.op0_register(), Register::XMM1);
        assert_eq!(instr.memory_base(), Register::BX);
        assert_eq!(instr.memory_index(), Register::SI);
        assert_eq!(instr.memory_size(), MemorySize::Packed128_Int8);
    }

    #[test]
    fn test_escape_bytes_outside_64bit() {
        // C5 with a memory ModRM is LDS in 32-bit mode.
        let instr = decode(&[0xC5, 0x08], Bitness::Bits32).unwrap();
        assert_eq!(instr.code(), Code::Lds_r32_m1632);

        // In 64-bit mode it is always VEX: C5 F8 77 = vzeroupper.
        let instr = decode(&[0xC5, 0xF8, 0x77], Bitness::Bits64).unwrap();
        assert_eq!(instr.code(), Code::VEX_Vzeroupper);
        assert_eq!(instr.encoding(), EncodingKind::Vex);
    }

    #[test]
    fn test_rex_before_vex_is_rejected() {
        let err = decode(&[0x48, 0xC5, 0xF8, 0x77], Bitness::Bits64).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEncoding { .. }));

        let permissive = X86Disassembler::new(Bitness::Bits64, DecoderOptions::PERMISSIVE);
        let instr = permissive.decode(&[0x48, 0xC5, 0xF8, 0x77], 0).unwrap();
        assert_eq!(instr.code(), Code::VEX_Vzeroupper);
        assert_eq!(instr.len(), 4);
    }

    #[test]
    fn test_invalid_in_64bit() {
        let err = decode(&[0x40], Bitness::Bits64).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEnd { .. }));
        let err = decode(&[0x27], Bitness::Bits64).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidOpcode { .. }));
    }

    #[test]
    fn test_near_branch_target() {
        let instr = X86Disassembler::new(Bitness::Bits64, DecoderOptions::NONE)
            .decode(&[0xE8, 0x10, 0x00, 0x00, 0x00], 0x1000)
            .unwrap();
        assert_eq!(instr.code(), Code::Call_rel32_64);
        assert_eq!(instr.op0_kind(), OpKind::NearBranch64);
        assert_eq!(instr.near_branch_target(), 0x1015);
    }

    #[test]
    fn test_decoder_cursor() {
        // nop; int3; <truncated mov>
        let bytes = [0x90, 0xCC, 0xB8, 0x01];
        let mut decoder = Decoder::with_ip(&bytes, Bitness::Bits32, 0x400, DecoderOptions::NONE);
        assert_eq!(decoder.decode().unwrap().code(), Code::Nopd);
        assert_eq!(decoder.ip(), 0x401);
        assert_eq!(decoder.decode().unwrap().code(), Code::Int3);
        assert!(decoder.decode().is_err());
        assert_eq!(decoder.position(), 3);

        decoder.set_position(100);
        assert!(!decoder.can_decode());
        assert_eq!(decoder.next(), None);
    }

    #[test]
    fn test_iterator_counts_every_byte_on_failure() {
        let bytes = [0x0F, 0xFF, 0x90];
        let results: Vec<_> = Decoder::new(&bytes, Bitness::Bits64, DecoderOptions::NONE).collect();
        assert!(results[0].is_err());
        assert!(results.last().unwrap().as_ref().is_ok_and(|i| i.code() == Code::Nopd));
    }
}
