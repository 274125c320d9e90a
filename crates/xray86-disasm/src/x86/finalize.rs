//! Attribute finalization.
//!
//! Applies prefixes and EVEX attributes to a materialized instruction and
//! enforces the rules that tie them to the selected form: masking, zeroing,
//! broadcast, rounding, unused vvvv, gather register overlap and LOCK.
//!
//! In strict mode a violated rule is an `InvalidEncoding` error. In permissive
//! mode the offending attribute is dropped and decoding continues.

use tracing::trace;
use xray86_core::{Code, EncodingKind, Instruction, OpKind, Register, RegisterClass, RoundingControl};

use super::encoding::EncodingContext;
use super::prefix::{MandatoryPrefix, Prefixes};
use super::template::{Form, OperandRole, TemplateFlags};
use crate::DecodeError;

/// Inputs of the finalizer for one instruction.
pub(crate) struct Finalizer<'a> {
    pub address: u64,
    /// Bytes consumed so far, for `InvalidOpcode` reports.
    pub bytes: &'a [u8],
    pub strict: bool,
    pub ctx: &'a EncodingContext,
    pub prefixes: &'a Prefixes,
    /// Mandatory prefix consumed by a prefix-keyed table row.
    pub consumed: Option<MandatoryPrefix>,
    pub form: &'a Form,
    pub flags: TemplateFlags,
}

impl Finalizer<'_> {
    fn reject(&self, reason: &'static str) -> Result<(), DecodeError> {
        if self.strict {
            Err(DecodeError::invalid_encoding(self.address, reason))
        } else {
            trace!(address = self.address, reason, "ignoring illegal attribute");
            Ok(())
        }
    }

    pub fn apply(&self, instr: &mut Instruction) -> Result<(), DecodeError> {
        self.apply_prefixes(instr)?;
        if self.ctx.kind == EncodingKind::Evex {
            self.apply_evex(instr)?;
        }
        if self.ctx.kind != EncodingKind::Legacy {
            self.check_vvvv()?;
        }
        if self.flags.contains(TemplateFlags::DISTINCT_GATHER_REGS) {
            self.check_gather_registers(instr)?;
        }
        self.check_segment_destination(instr)
    }

    fn apply_prefixes(&self, instr: &mut Instruction) -> Result<(), DecodeError> {
        let prefixes = self.prefixes;
        instr.set_segment_prefix(prefixes.segment);

        if self.ctx.kind == EncodingKind::Legacy {
            // A consumed mandatory prefix is not reported; the other one still is.
            instr.set_repne_prefix(prefixes.repne && self.consumed != Some(MandatoryPrefix::PF2));
            instr.set_repe_prefix(prefixes.repe && self.consumed != Some(MandatoryPrefix::PF3));
        }

        if prefixes.lock {
            let lockable = self.flags.contains(TemplateFlags::LOCKABLE);
            if lockable && instr.op0_kind() == OpKind::Memory {
                instr.set_lock_prefix(true);
            } else {
                self.reject("LOCK prefix on a form that cannot be locked")?;
            }
        }
        Ok(())
    }

    fn apply_evex(&self, instr: &mut Instruction) -> Result<(), DecodeError> {
        let ctx = self.ctx;
        let flags = self.flags;

        if ctx.opmask != 0 {
            if flags.contains(TemplateFlags::OPMASK) {
                instr.set_op_mask(Register::k(ctx.opmask));
            } else {
                self.reject("opmask on a form without masking")?;
            }
        } else if flags.contains(TemplateFlags::REQUIRE_OPMASK) {
            self.reject("form requires a non-zero opmask")?;
        }

        if ctx.zeroing {
            if !instr.has_op_mask() {
                self.reject("zeroing-masking without an opmask")?;
            } else if !flags.contains(TemplateFlags::ZEROING) {
                self.reject("zeroing-masking on a form without zeroing")?;
            } else if instr.op0_kind() == OpKind::Memory {
                self.reject("zeroing-masking on a memory destination")?;
            } else {
                instr.set_zeroing_masking(true);
            }
        }

        if ctx.broadcast {
            if instr.has_memory_operand() {
                if self.form.can_broadcast() {
                    instr.set_memory_size(self.form.bcst);
                } else {
                    self.reject("broadcast on a form that cannot broadcast")?;
                }
            } else if flags.contains(TemplateFlags::ROUNDING) {
                instr.set_rounding_control(RoundingControl::from_evex_ll(ctx.ll));
            } else if flags.contains(TemplateFlags::SAE) {
                instr.set_suppress_all_exceptions(true);
            } else {
                self.reject("EVEX.b on a register form without rounding or SAE")?;
            }
        }

        // EVEX.R and EVEX.R' cannot extend an opmask register.
        let opmask_reg = self.form.operands.contains(&OperandRole::Reg(RegisterClass::Opmask));
        if opmask_reg && (ctx.reg_ext | ctx.reg_ext2) != 0 {
            self.reject("EVEX.R/R' set with an opmask destination")?;
        }
        Ok(())
    }

    fn check_vvvv(&self) -> Result<(), DecodeError> {
        if self.form.has_vvvv() {
            return Ok(());
        }
        // V' is the fifth bit of a VSIB index, not part of vvvv.
        let unused = if self.form.vsib().is_some() {
            self.ctx.vvvv
        } else {
            self.ctx.vvvv_register()
        };
        if unused != 0 {
            self.reject("vvvv must be 1111b when unused")?;
        }
        Ok(())
    }

    fn check_gather_registers(&self, instr: &Instruction) -> Result<(), DecodeError> {
        let destination = instr.op0_register().number();
        let index = instr.memory_index().number();
        let mask = self
            .form
            .operands
            .iter()
            .position(|op| matches!(op, OperandRole::Vvvv(_)))
            .map(|i| instr.op_register(i).number());

        let overlap = destination == index
            || mask.is_some_and(|m| m == destination || m == index);
        if overlap {
            self.reject("gather destination, index and mask must differ")?;
        }
        Ok(())
    }

    fn check_segment_destination(&self, instr: &Instruction) -> Result<(), DecodeError> {
        let is_mov_sreg = matches!(
            instr.code(),
            Code::Mov_Sreg_rm16 | Code::Mov_Sreg_r32m16 | Code::Mov_Sreg_r64m16
        );
        if is_mov_sreg && instr.op0_register() == Register::CS {
            return Err(DecodeError::invalid_opcode(self.address, self.bytes));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xray86_core::{MemoryOperand, MemorySize, RegisterClass::*};

    const ADD_ER: Form = Form::new(
        Code::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er,
        &[OperandRole::Reg(Zmm), OperandRole::Vvvv(Zmm), OperandRole::RegOrMem(Zmm)],
    )
    .mem(MemorySize::Packed512_Float32)
    .bcst(MemorySize::Broadcast512_Float32);

    const STORE: Form = Form::new(
        Code::EVEX_Vmovups_xmmm128_k1z_xmm,
        &[OperandRole::RegOrMem(Xmm), OperandRole::Reg(Xmm)],
    )
    .mem(MemorySize::Packed128_Float32);

    fn evex(opmask: u8, zeroing: bool, broadcast: bool) -> EncodingContext {
        EncodingContext {
            kind: EncodingKind::Evex,
            opmask,
            zeroing,
            broadcast,
            ll: 2,
            ..EncodingContext::default()
        }
    }

    fn finalize(
        ctx: &EncodingContext,
        form: &Form,
        flags: TemplateFlags,
        strict: bool,
        instr: &mut Instruction,
    ) -> Result<(), DecodeError> {
        let prefixes = Prefixes::default();
        Finalizer {
            address: 0,
            bytes: &[],
            strict,
            ctx,
            prefixes: &prefixes,
            consumed: None,
            form,
            flags,
        }
        .apply(instr)
    }

    fn register_instr(form: &Form) -> Instruction {
        let mut instr = Instruction::new(0);
        instr.set_code(form.code);
        instr.set_op_count(form.operands.len());
        instr
    }

    fn memory_destination(form: &Form) -> Instruction {
        let mut instr = register_instr(form);
        instr.set_op_kind(0, OpKind::Memory);
        instr.set_memory(MemoryOperand {
            base: Register::RAX,
            size: form.mem,
            ..MemoryOperand::default()
        });
        instr
    }

    const K1Z: TemplateFlags = TemplateFlags::OPMASK.union(TemplateFlags::ZEROING);

    #[test]
    fn test_static_rounding() {
        let mut instr = register_instr(&ADD_ER);
        let ctx = evex(0, false, true);
        finalize(&ctx, &ADD_ER, K1Z | TemplateFlags::ROUNDING, true, &mut instr).unwrap();
        assert_eq!(instr.rounding_control(), RoundingControl::RoundUp);
        assert!(!instr.suppress_all_exceptions());
    }

    #[test]
    fn test_sae_only() {
        let mut instr = register_instr(&ADD_ER);
        let ctx = evex(0, false, true);
        finalize(&ctx, &ADD_ER, K1Z | TemplateFlags::SAE, true, &mut instr).unwrap();
        assert_eq!(instr.rounding_control(), RoundingControl::None);
        assert!(instr.suppress_all_exceptions());
    }

    #[test]
    fn test_zeroing_requires_mask() {
        let mut instr = register_instr(&ADD_ER);
        let ctx = evex(0, true, false);
        let err = finalize(&ctx, &ADD_ER, K1Z, true, &mut instr).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEncoding { .. }));

        // Permissive mode drops the z bit.
        let mut instr = register_instr(&ADD_ER);
        finalize(&ctx, &ADD_ER, K1Z, false, &mut instr).unwrap();
        assert!(!instr.zeroing_masking());
    }

    #[test]
    fn test_zeroing_rejected_on_memory_destination() {
        let ctx = evex(1, true, false);
        let mut instr = memory_destination(&STORE);
        assert!(finalize(&ctx, &STORE, K1Z, true, &mut instr).is_err());

        let ctx = evex(1, false, false);
        let mut instr = memory_destination(&STORE);
        finalize(&ctx, &STORE, K1Z, true, &mut instr).unwrap();
        assert_eq!(instr.op_mask(), Register::K1);
    }

    #[test]
    fn test_broadcast_without_capability() {
        let ctx = evex(0, false, true);
        let mut instr = memory_destination(&STORE);
        assert!(finalize(&ctx, &STORE, K1Z, true, &mut instr).is_err());

        let mut instr = memory_destination(&STORE);
        finalize(&ctx, &STORE, K1Z, false, &mut instr).unwrap();
        assert_eq!(instr.memory_size(), MemorySize::Packed128_Float32);
    }

    #[test]
    fn test_unused_vvvv() {
        let ctx = EncodingContext {
            v_ext: 16,
            ..evex(0, false, false)
        };
        let mut instr = register_instr(&STORE);
        assert!(finalize(&ctx, &STORE, K1Z, true, &mut instr).is_err());
    }

    #[test]
    fn test_lock_needs_memory_destination() {
        let form = Form::new(Code::Add_rm32_r32, &[OperandRole::RegOrMem(Gpr32), OperandRole::Reg(Gpr32)]);
        let prefixes = Prefixes {
            lock: true,
            ..Prefixes::default()
        };
        let ctx = EncodingContext::default();
        let run = |instr: &mut Instruction| {
            Finalizer {
                address: 0,
                bytes: &[],
                strict: true,
                ctx: &ctx,
                prefixes: &prefixes,
                consumed: None,
                form: &form,
                flags: TemplateFlags::LOCKABLE,
            }
            .apply(instr)
        };

        let mut instr = register_instr(&form);
        assert!(run(&mut instr).is_err());

        let mut instr = memory_destination(&form);
        run(&mut instr).unwrap();
        assert!(instr.has_lock_prefix());
    }
}
