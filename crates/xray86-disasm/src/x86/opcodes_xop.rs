//! XOP maps 8, 9 and 0A.
//!
//! XOP has no mandatory-prefix selection; a nonzero pp is undefined, so every
//! row only fills the first mandatory-prefix slot.

use xray86_core::{Code, MemorySize::*, RegisterClass::*};

use super::template::{Form, OperandRole::*, Slot, Template, TemplateFlags, INVALID_SLOT};

/// A row valid only with pp == 0.
macro_rules! np {
    ($slot:expr) => {
        Slot::Mandatory(&[$slot, INVALID_SLOT, INVALID_SLOT, INVALID_SLOT])
    };
}

const SCALAR_GPR: TemplateFlags = TemplateFlags::WIG32.union(TemplateFlags::L0);

/// XOP map 8.
pub static XOP8: [Slot; 256] = {
    let mut t = [INVALID_SLOT; 256];

    // W swaps the r/m and imm8[7:4] operands.
    t[0xA2] = np!(Slot::Op(&Template::w_vec_len(
        [
            Form::new(
                Code::XOP_Vpcmov_xmm_xmm_xmmm128_xmm,
                &[Reg(Xmm), Vvvv(Xmm), RegOrMem(Xmm), Is4(Xmm)],
            )
            .mem(UInt128),
            Form::new(
                Code::XOP_Vpcmov_ymm_ymm_ymmm256_ymm,
                &[Reg(Ymm), Vvvv(Ymm), RegOrMem(Ymm), Is4(Ymm)],
            )
            .mem(UInt256),
            Form::INVALID,
        ],
        [
            Form::new(
                Code::XOP_Vpcmov_xmm_xmm_xmm_xmmm128,
                &[Reg(Xmm), Vvvv(Xmm), Is4(Xmm), RegOrMem(Xmm)],
            )
            .mem(UInt128),
            Form::new(
                Code::XOP_Vpcmov_ymm_ymm_ymm_ymmm256,
                &[Reg(Ymm), Vvvv(Ymm), Is4(Ymm), RegOrMem(Ymm)],
            )
            .mem(UInt256),
            Form::INVALID,
        ],
    )));

    t[0xC0] = np!(Slot::Op(&Template::w(
        Form::new(Code::XOP_Vprotb_xmm_xmmm128_imm8, &[Reg(Xmm), RegOrMem(Xmm), Imm8]).mem(Packed128_Int8),
        Form::INVALID,
    )
    .flags(TemplateFlags::L0)));

    t
};

/// XOP map 9.
pub static XOP9: [Slot; 256] = {
    let mut t = [INVALID_SLOT; 256];

    t[0x01] = Slot::Group(&[
        INVALID_SLOT,
        np!(Slot::Op(&Template::w(
            Form::new(Code::XOP_Blcfill_r32_rm32, &[Vvvv(Gpr32), RegOrMem(Gpr32)]).mem(UInt32),
            Form::new(Code::XOP_Blcfill_r64_rm64, &[Vvvv(Gpr64), RegOrMem(Gpr64)]).mem(UInt64),
        )
        .flags(SCALAR_GPR))),
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
    ]);

    t[0x80] = np!(Slot::Op(&Template::w_vec_len(
        [
            Form::new(Code::XOP_Vfrczps_xmm_xmmm128, &[Reg(Xmm), RegOrMem(Xmm)]).mem(Packed128_Float32),
            Form::new(Code::XOP_Vfrczps_ymm_ymmm256, &[Reg(Ymm), RegOrMem(Ymm)]).mem(Packed256_Float32),
            Form::INVALID,
        ],
        [Form::INVALID; 3],
    )));

    // W swaps the r/m and vvvv operands.
    t[0x90] = np!(Slot::Op(&Template::w(
        Form::new(Code::XOP_Vprotb_xmm_xmmm128_xmm, &[Reg(Xmm), RegOrMem(Xmm), Vvvv(Xmm)]).mem(Packed128_Int8),
        Form::new(Code::XOP_Vprotb_xmm_xmm_xmmm128, &[Reg(Xmm), Vvvv(Xmm), RegOrMem(Xmm)]).mem(Packed128_Int8),
    )
    .flags(TemplateFlags::L0)));

    t
};

/// XOP map 0A.
pub static XOPA: [Slot; 256] = {
    let mut t = [INVALID_SLOT; 256];

    t[0x10] = np!(Slot::Op(&Template::w(
        Form::new(Code::XOP_Bextr_r32_rm32_imm32, &[Reg(Gpr32), RegOrMem(Gpr32), Imm32]).mem(UInt32),
        Form::new(Code::XOP_Bextr_r64_rm64_imm32, &[Reg(Gpr64), RegOrMem(Gpr64), Imm32]).mem(UInt64),
    )
    .flags(SCALAR_GPR)));

    t
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x86::encoding::VectorLength;
    use crate::x86::template::OpSize;

    fn template(slot: Slot) -> &'static Template {
        match slot {
            Slot::Mandatory(row) => match row[0] {
                Slot::Op(t) => t,
                other => panic!("no template: {other:?}"),
            },
            other => panic!("not a prefix row: {other:?}"),
        }
    }

    #[test]
    fn test_vpcmov_operand_order_follows_w() {
        let t = template(XOP8[0xA2]);
        let w0 = t.select(OpSize::W32, VectorLength::L128, false).unwrap();
        let w1 = t.select(OpSize::W32, VectorLength::L128, true).unwrap();
        assert_eq!(w0.operands[3], Is4(Xmm));
        assert_eq!(w1.operands[2], Is4(Xmm));
        assert_eq!(w1.code, Code::XOP_Vpcmov_xmm_xmm_xmm_xmmm128);
    }

    #[test]
    fn test_scalar_rows_are_l0() {
        assert!(template(XOP9[0x90]).flags.contains(TemplateFlags::L0));
        assert!(template(XOPA[0x10]).flags.contains(TemplateFlags::WIG32));
        assert!(template(XOP8[0xC0]).select(OpSize::W32, VectorLength::L128, true).is_none());
    }

    #[test]
    fn test_blcfill_is_group_one() {
        let Slot::Group(group) = XOP9[0x01] else { panic!("group") };
        assert!(matches!(group[0], Slot::Invalid));
        assert!(matches!(group[1], Slot::Mandatory(_)));
    }
}
