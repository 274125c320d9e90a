//! Operand materialization.
//!
//! Turns the role list of the selected [`Form`] into operand kinds, registers,
//! immediates and branch targets on the [`Instruction`]. Memory has already
//! been decoded; immediates are read here, in operand order.

use xray86_core::{Bitness, Instruction, MemoryOperand, OpKind, Register, RegisterClass};

use super::encoding::EncodingContext;
use super::modrm::{AddressSize, ModRM};
use super::stream::ByteStream;
use super::template::{Form, OperandRole};
use crate::DecodeError;

/// Everything the materializer needs besides the stream.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OperandInputs<'a> {
    pub ctx: &'a EncodingContext,
    pub bitness: Bitness,
    pub address_size: AddressSize,
    /// The opcode byte, for registers encoded in its low bits.
    pub opcode: u8,
    pub modrm: Option<ModRM>,
    /// Decoded memory operand, size already set.
    pub memory: Option<MemoryOperand>,
}

/// A near branch whose target is resolved once the length is known.
#[derive(Debug, Clone, Copy)]
struct PendingBranch {
    displacement: i64,
    kind: OpKind,
}

pub(crate) fn materialize(
    stream: &mut ByteStream<'_>,
    form: &Form,
    inputs: &OperandInputs<'_>,
    instr: &mut Instruction,
) -> Result<(), DecodeError> {
    let address = stream.address();
    let ctx = inputs.ctx;
    let mut branch = None;

    instr.set_op_count(form.operands.len());
    for (i, role) in form.operands.iter().enumerate() {
        match *role {
            OperandRole::Reg(class) => {
                let modrm = require_modrm(inputs, address)?;
                let number = match class {
                    RegisterClass::Mmx | RegisterClass::Segment | RegisterClass::Opmask => modrm.reg,
                    c if is_gpr(c) => modrm.reg | ctx.reg_ext,
                    _ => ctx.reg_number(modrm.reg),
                };
                set_register(instr, i, class, number, ctx, stream)?;
            }
            OperandRole::RegOrMem(class) | OperandRole::RmReg(class) => {
                let modrm = require_modrm(inputs, address)?;
                if modrm.is_register() {
                    set_register(instr, i, class, rm_number(class, modrm.rm, ctx), ctx, stream)?;
                } else {
                    set_memory(instr, i, inputs, address)?;
                }
            }
            OperandRole::Mem | OperandRole::Vsib(..) => set_memory(instr, i, inputs, address)?,
            OperandRole::Vvvv(class) => {
                let number = match class {
                    RegisterClass::Opmask => ctx.vvvv & 7,
                    c if is_gpr(c) => ctx.vvvv,
                    _ => ctx.vvvv_register(),
                };
                set_register(instr, i, class, number, ctx, stream)?;
            }
            OperandRole::OpcodeReg(class) => {
                let number = (inputs.opcode & 7) | ctx.base_ext;
                set_register(instr, i, class, number, ctx, stream)?;
            }
            OperandRole::Fixed(register) => {
                instr.set_op_kind(i, OpKind::Register);
                instr.set_op_register(i, register);
            }
            OperandRole::Is4(class) => {
                let imm = stream.read_u8()?;
                let mut number = imm >> 4;
                if !inputs.bitness.is_64bit() {
                    number &= 7;
                }
                set_register(instr, i, class, number, ctx, stream)?;
            }

            OperandRole::Imm8 => {
                instr.set_immediate(stream.read_u8()? as u64);
                instr.set_op_kind(i, OpKind::Immediate8);
            }
            OperandRole::Imm8_2nd => {
                instr.set_immediate8_2nd(stream.read_u8()?);
                instr.set_op_kind(i, OpKind::Immediate8_2nd);
            }
            OperandRole::Imm8to16 => {
                let value = stream.read_u8()? as i8 as i16 as u16;
                instr.set_immediate(value as u64);
                instr.set_op_kind(i, OpKind::Immediate8to16);
            }
            OperandRole::Imm8to32 => {
                let value = stream.read_u8()? as i8 as i32 as u32;
                instr.set_immediate(value as u64);
                instr.set_op_kind(i, OpKind::Immediate8to32);
            }
            OperandRole::Imm8to64 => {
                let value = stream.read_u8()? as i8 as i64 as u64;
                instr.set_immediate(value);
                instr.set_op_kind(i, OpKind::Immediate8to64);
            }
            OperandRole::Imm16 => {
                instr.set_immediate(stream.read_u16()? as u64);
                instr.set_op_kind(i, OpKind::Immediate16);
            }
            OperandRole::Imm32 => {
                instr.set_immediate(stream.read_u32()? as u64);
                instr.set_op_kind(i, OpKind::Immediate32);
            }
            OperandRole::Imm32to64 => {
                instr.set_immediate(stream.read_u32()? as i32 as i64 as u64);
                instr.set_op_kind(i, OpKind::Immediate32to64);
            }
            OperandRole::Imm64 => {
                instr.set_immediate(stream.read_u64()?);
                instr.set_op_kind(i, OpKind::Immediate64);
            }

            OperandRole::Rel8_16 | OperandRole::Rel8_32 | OperandRole::Rel8_64 => {
                let displacement = stream.read_u8()? as i8 as i64;
                let kind = match *role {
                    OperandRole::Rel8_16 => OpKind::NearBranch16,
                    OperandRole::Rel8_32 => OpKind::NearBranch32,
                    _ => OpKind::NearBranch64,
                };
                instr.set_op_kind(i, kind);
                branch = Some(PendingBranch { displacement, kind });
            }
            OperandRole::Rel16 => {
                let displacement = stream.read_u16()? as i16 as i64;
                instr.set_op_kind(i, OpKind::NearBranch16);
                branch = Some(PendingBranch {
                    displacement,
                    kind: OpKind::NearBranch16,
                });
            }
            OperandRole::Rel32_32 | OperandRole::Rel32_64 => {
                let displacement = stream.read_u32()? as i32 as i64;
                let kind = if *role == OperandRole::Rel32_32 {
                    OpKind::NearBranch32
                } else {
                    OpKind::NearBranch64
                };
                instr.set_op_kind(i, kind);
                branch = Some(PendingBranch { displacement, kind });
            }

            OperandRole::Ptr16_16 => {
                let offset = stream.read_u16()?;
                let selector = stream.read_u16()?;
                instr.set_far_branch(selector, offset as u32);
                instr.set_op_kind(i, OpKind::FarBranch16);
            }
            OperandRole::Ptr16_32 => {
                let offset = stream.read_u32()?;
                let selector = stream.read_u16()?;
                instr.set_far_branch(selector, offset);
                instr.set_op_kind(i, OpKind::FarBranch32);
            }
            OperandRole::Moffs => {
                let mut memory = MemoryOperand {
                    size: form.mem,
                    displ_size: inputs.address_size.bytes(),
                    ..MemoryOperand::default()
                };
                memory.displacement = match inputs.address_size {
                    AddressSize::A16 => stream.read_u16()? as u64,
                    AddressSize::A32 => stream.read_u32()? as u64,
                    AddressSize::A64 => stream.read_u64()?,
                };
                instr.set_memory(memory);
                instr.set_op_kind(i, OpKind::MemoryOffset);
            }
        }
    }

    // Relative operands are always last, so the stream position is the length.
    if let Some(branch) = branch {
        let next_ip = address.wrapping_add(stream.position() as u64);
        let target = next_ip.wrapping_add(branch.displacement as u64);
        let target = match branch.kind {
            OpKind::NearBranch16 => target & 0xFFFF,
            OpKind::NearBranch32 => target & 0xFFFF_FFFF,
            _ => target,
        };
        instr.set_near_branch_target(target);
    }

    Ok(())
}

fn is_gpr(class: RegisterClass) -> bool {
    matches!(
        class,
        RegisterClass::Gpr8 | RegisterClass::Gpr16 | RegisterClass::Gpr32 | RegisterClass::Gpr64
    )
}

/// Register number of a register-direct ModRM.rm for `class`.
fn rm_number(class: RegisterClass, rm: u8, ctx: &EncodingContext) -> u8 {
    match class {
        RegisterClass::Mmx | RegisterClass::Segment | RegisterClass::Opmask => rm,
        c if is_gpr(c) => rm | ctx.base_ext,
        _ => ctx.rm_number(rm),
    }
}

fn require_modrm(inputs: &OperandInputs<'_>, address: u64) -> Result<ModRM, DecodeError> {
    inputs
        .modrm
        .ok_or_else(|| DecodeError::invalid_encoding(address, "operand requires a ModRM byte"))
}

fn set_register(
    instr: &mut Instruction,
    operand: usize,
    class: RegisterClass,
    number: u8,
    ctx: &EncodingContext,
    stream: &ByteStream<'_>,
) -> Result<(), DecodeError> {
    // Segment encodings 6 and 7 are reserved.
    let register = Register::from_class(class, number, ctx.has_rex)
        .ok_or_else(|| DecodeError::invalid_opcode(stream.address(), stream.consumed()))?;
    instr.set_op_kind(operand, OpKind::Register);
    instr.set_op_register(operand, register);
    Ok(())
}

fn set_memory(
    instr: &mut Instruction,
    operand: usize,
    inputs: &OperandInputs<'_>,
    address: u64,
) -> Result<(), DecodeError> {
    let memory = inputs
        .memory
        .ok_or_else(|| DecodeError::invalid_encoding(address, "memory operand with a register ModRM"))?;
    instr.set_memory(memory);
    instr.set_op_kind(operand, OpKind::Memory);
    Ok(())
}
