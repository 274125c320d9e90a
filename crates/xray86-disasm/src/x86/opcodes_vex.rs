//! VEX-encoded map 0F.

use xray86_core::{Code, MemorySize, MemorySize::*, RegisterClass::*};

use super::template::{Form, OperandRole, OperandRole::*, Slot, Template, TemplateFlags, INVALID_SLOT};

type Roles = &'static [OperandRole];

const VX_WX: Roles = &[Reg(Xmm), RegOrMem(Xmm)];
const VY_WY: Roles = &[Reg(Ymm), RegOrMem(Ymm)];
const WX_VX: Roles = &[RegOrMem(Xmm), Reg(Xmm)];
const WY_VY: Roles = &[RegOrMem(Ymm), Reg(Ymm)];
const VX_HX_WX: Roles = &[Reg(Xmm), Vvvv(Xmm), RegOrMem(Xmm)];
const VY_HY_WY: Roles = &[Reg(Ymm), Vvvv(Ymm), RegOrMem(Ymm)];
const HX_UX_IB: Roles = &[Vvvv(Xmm), RmReg(Xmm), Imm8];
const HY_UY_IB: Roles = &[Vvvv(Ymm), RmReg(Ymm), Imm8];

/// 128- and 256-bit forms with the same operand layout.
pub(super) const fn by_len(
    x: Code,
    y: Code,
    operands: [Roles; 2],
    mem: [MemorySize; 2],
) -> Template {
    Template::vec_len(
        Form::new(x, operands[0]).mem(mem[0]),
        Form::new(y, operands[1]).mem(mem[1]),
        Form::INVALID,
    )
}

const fn load(x: Code, y: Code, mem: [MemorySize; 2]) -> Template {
    by_len(x, y, [VX_WX, VY_WY], mem)
}

const fn store(x: Code, y: Code, mem: [MemorySize; 2]) -> Template {
    by_len(x, y, [WX_VX, WY_VY], mem)
}

/// Three-operand `reg, vvvv, r/m` forms.
pub(super) const fn rvm(x: Code, y: Code, mem: [MemorySize; 2]) -> Template {
    by_len(x, y, [VX_HX_WX, VY_HY_WY], mem)
}

const fn shift_imm(x: Code, y: Code) -> Template {
    by_len(x, y, [HX_UX_IB, HY_UY_IB], [Unknown, Unknown])
}

/// A row that only defines the 66-prefixed form.
macro_rules! p66 {
    ($slot:expr) => {
        Slot::Mandatory(&[INVALID_SLOT, $slot, INVALID_SLOT, INVALID_SLOT])
    };
}
pub(super) use p66;

const BYTES: [MemorySize; 2] = [Packed128_Int8, Packed256_Int8];
const WORDS: [MemorySize; 2] = [Packed128_Int16, Packed256_Int16];
const DWORDS: [MemorySize; 2] = [Packed128_Int32, Packed256_Int32];
const QWORDS: [MemorySize; 2] = [Packed128_Int64, Packed256_Int64];
const PS: [MemorySize; 2] = [Packed128_Float32, Packed256_Float32];
const PD: [MemorySize; 2] = [Packed128_Float64, Packed256_Float64];
const INTS: [MemorySize; 2] = [UInt128, UInt256];

/// VEX map 0F.
pub static VEX_0F: [Slot; 256] = {
    let mut t = [INVALID_SLOT; 256];

    t[0x10] = Slot::Mandatory(&[
        Slot::Op(&load(Code::VEX_Vmovups_xmm_xmmm128, Code::VEX_Vmovups_ymm_ymmm256, PS)),
        Slot::Op(&load(Code::VEX_Vmovupd_xmm_xmmm128, Code::VEX_Vmovupd_ymm_ymmm256, PD)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x11] = Slot::Mandatory(&[
        Slot::Op(&store(Code::VEX_Vmovups_xmmm128_xmm, Code::VEX_Vmovups_ymmm256_ymm, PS)),
        Slot::Op(&store(Code::VEX_Vmovupd_xmmm128_xmm, Code::VEX_Vmovupd_ymmm256_ymm, PD)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x28] = Slot::Mandatory(&[
        Slot::Op(&load(Code::VEX_Vmovaps_xmm_xmmm128, Code::VEX_Vmovaps_ymm_ymmm256, PS)),
        Slot::Op(&load(Code::VEX_Vmovapd_xmm_xmmm128, Code::VEX_Vmovapd_ymm_ymmm256, PD)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x29] = Slot::Mandatory(&[
        Slot::Op(&store(Code::VEX_Vmovaps_xmmm128_xmm, Code::VEX_Vmovaps_ymmm256_ymm, PS)),
        Slot::Op(&store(Code::VEX_Vmovapd_xmmm128_xmm, Code::VEX_Vmovapd_ymmm256_ymm, PD)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);

    // Scalar forms ignore VEX.L.
    t[0x58] = Slot::Mandatory(&[
        Slot::Op(&rvm(Code::VEX_Vaddps_xmm_xmm_xmmm128, Code::VEX_Vaddps_ymm_ymm_ymmm256, PS)),
        Slot::Op(&rvm(Code::VEX_Vaddpd_xmm_xmm_xmmm128, Code::VEX_Vaddpd_ymm_ymm_ymmm256, PD)),
        Slot::Op(&Template::one(Form::new(Code::VEX_Vaddss_xmm_xmm_xmmm32, VX_HX_WX).mem(Float32))),
        Slot::Op(&Template::one(Form::new(Code::VEX_Vaddsd_xmm_xmm_xmmm64, VX_HX_WX).mem(Float64))),
    ]);
    t[0x59] = Slot::Mandatory(&[
        Slot::Op(&rvm(Code::VEX_Vmulps_xmm_xmm_xmmm128, Code::VEX_Vmulps_ymm_ymm_ymmm256, PS)),
        Slot::Op(&rvm(Code::VEX_Vmulpd_xmm_xmm_xmmm128, Code::VEX_Vmulpd_ymm_ymm_ymmm256, PD)),
        Slot::Op(&Template::one(Form::new(Code::VEX_Vmulss_xmm_xmm_xmmm32, VX_HX_WX).mem(Float32))),
        Slot::Op(&Template::one(Form::new(Code::VEX_Vmulsd_xmm_xmm_xmmm64, VX_HX_WX).mem(Float64))),
    ]);

    t[0x60] = p66!(Slot::Op(&rvm(Code::VEX_Vpunpcklbw_xmm_xmm_xmmm128, Code::VEX_Vpunpcklbw_ymm_ymm_ymmm256, BYTES)));
    t[0x61] = p66!(Slot::Op(&rvm(Code::VEX_Vpunpcklwd_xmm_xmm_xmmm128, Code::VEX_Vpunpcklwd_ymm_ymm_ymmm256, WORDS)));
    t[0x62] = p66!(Slot::Op(&rvm(Code::VEX_Vpunpckldq_xmm_xmm_xmmm128, Code::VEX_Vpunpckldq_ymm_ymm_ymmm256, DWORDS)));
    t[0x63] = p66!(Slot::Op(&rvm(Code::VEX_Vpacksswb_xmm_xmm_xmmm128, Code::VEX_Vpacksswb_ymm_ymm_ymmm256, WORDS)));
    t[0x64] = p66!(Slot::Op(&rvm(Code::VEX_Vpcmpgtb_xmm_xmm_xmmm128, Code::VEX_Vpcmpgtb_ymm_ymm_ymmm256, BYTES)));
    t[0x65] = p66!(Slot::Op(&rvm(Code::VEX_Vpcmpgtw_xmm_xmm_xmmm128, Code::VEX_Vpcmpgtw_ymm_ymm_ymmm256, WORDS)));
    t[0x66] = p66!(Slot::Op(&rvm(Code::VEX_Vpcmpgtd_xmm_xmm_xmmm128, Code::VEX_Vpcmpgtd_ymm_ymm_ymmm256, DWORDS)));
    t[0x67] = p66!(Slot::Op(&rvm(Code::VEX_Vpackuswb_xmm_xmm_xmmm128, Code::VEX_Vpackuswb_ymm_ymm_ymmm256, WORDS)));
    t[0x68] = p66!(Slot::Op(&rvm(Code::VEX_Vpunpckhbw_xmm_xmm_xmmm128, Code::VEX_Vpunpckhbw_ymm_ymm_ymmm256, BYTES)));
    t[0x69] = p66!(Slot::Op(&rvm(Code::VEX_Vpunpckhwd_xmm_xmm_xmmm128, Code::VEX_Vpunpckhwd_ymm_ymm_ymmm256, WORDS)));
    t[0x6A] = p66!(Slot::Op(&rvm(Code::VEX_Vpunpckhdq_xmm_xmm_xmmm128, Code::VEX_Vpunpckhdq_ymm_ymm_ymmm256, DWORDS)));
    t[0x6B] = p66!(Slot::Op(&rvm(Code::VEX_Vpackssdw_xmm_xmm_xmmm128, Code::VEX_Vpackssdw_ymm_ymm_ymmm256, DWORDS)));
    t[0x6C] = p66!(Slot::Op(&rvm(Code::VEX_Vpunpcklqdq_xmm_xmm_xmmm128, Code::VEX_Vpunpcklqdq_ymm_ymm_ymmm256, QWORDS)));
    t[0x6D] = p66!(Slot::Op(&rvm(Code::VEX_Vpunpckhqdq_xmm_xmm_xmmm128, Code::VEX_Vpunpckhqdq_ymm_ymm_ymmm256, QWORDS)));

    t[0x6E] = p66!(Slot::Op(&Template::w(
        Form::new(Code::VEX_Vmovd_xmm_rm32, &[Reg(Xmm), RegOrMem(Gpr32)]).mem(UInt32),
        Form::new(Code::VEX_Vmovq_xmm_rm64, &[Reg(Xmm), RegOrMem(Gpr64)]).mem(UInt64),
    )
    .flags(TemplateFlags::WIG32.union(TemplateFlags::L0))));
    t[0x6F] = Slot::Mandatory(&[
        INVALID_SLOT,
        Slot::Op(&load(Code::VEX_Vmovdqa_xmm_xmmm128, Code::VEX_Vmovdqa_ymm_ymmm256, INTS)),
        Slot::Op(&load(Code::VEX_Vmovdqu_xmm_xmmm128, Code::VEX_Vmovdqu_ymm_ymmm256, INTS)),
        INVALID_SLOT,
    ]);

    t[0x72] = Slot::Group(&[
        INVALID_SLOT,
        INVALID_SLOT,
        p66!(Slot::Op(&shift_imm(Code::VEX_Vpsrld_xmm_xmm_imm8, Code::VEX_Vpsrld_ymm_ymm_imm8))),
        INVALID_SLOT,
        p66!(Slot::Op(&shift_imm(Code::VEX_Vpsrad_xmm_xmm_imm8, Code::VEX_Vpsrad_ymm_ymm_imm8))),
        INVALID_SLOT,
        p66!(Slot::Op(&shift_imm(Code::VEX_Vpslld_xmm_xmm_imm8, Code::VEX_Vpslld_ymm_ymm_imm8))),
        INVALID_SLOT,
    ]);

    // VEX.L selects between the two.
    t[0x77] = Slot::Mandatory(&[
        Slot::Op(&Template::vec_len(
            Form::new(Code::VEX_Vzeroupper, &[]),
            Form::new(Code::VEX_Vzeroall, &[]),
            Form::INVALID,
        )),
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
    ]);

    t[0x7E] = p66!(Slot::Op(&Template::w(
        Form::new(Code::VEX_Vmovd_rm32_xmm, &[RegOrMem(Gpr32), Reg(Xmm)]).mem(UInt32),
        Form::new(Code::VEX_Vmovq_rm64_xmm, &[RegOrMem(Gpr64), Reg(Xmm)]).mem(UInt64),
    )
    .flags(TemplateFlags::WIG32.union(TemplateFlags::L0))));
    t[0x7F] = Slot::Mandatory(&[
        INVALID_SLOT,
        Slot::Op(&store(Code::VEX_Vmovdqa_xmmm128_xmm, Code::VEX_Vmovdqa_ymmm256_ymm, INTS)),
        Slot::Op(&store(Code::VEX_Vmovdqu_xmmm128_xmm, Code::VEX_Vmovdqu_ymmm256_ymm, INTS)),
        INVALID_SLOT,
    ]);

    t[0xEF] = p66!(Slot::Op(&rvm(Code::VEX_Vpxor_xmm_xmm_xmmm128, Code::VEX_Vpxor_ymm_ymm_ymmm256, INTS)));
    t[0xFE] = p66!(Slot::Op(&rvm(Code::VEX_Vpaddd_xmm_xmm_xmmm128, Code::VEX_Vpaddd_ymm_ymm_ymmm256, DWORDS)));

    t
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x86::encoding::VectorLength;
    use crate::x86::template::OpSize;

    fn code(slot: &Slot, pp: usize, length: VectorLength, w: bool) -> Option<Code> {
        let slot = match *slot {
            Slot::Mandatory(row) => row[pp],
            other => other,
        };
        match slot {
            Slot::Op(t) => t.select(OpSize::W32, length, w).map(|f| f.code),
            _ => None,
        }
    }

    #[test]
    fn test_unpack_row_by_length() {
        assert_eq!(
            code(&VEX_0F[0x68], 1, VectorLength::L128, false),
            Some(Code::VEX_Vpunpckhbw_xmm_xmm_xmmm128)
        );
        assert_eq!(
            code(&VEX_0F[0x68], 1, VectorLength::L256, false),
            Some(Code::VEX_Vpunpckhbw_ymm_ymm_ymmm256)
        );
        assert_eq!(code(&VEX_0F[0x68], 0, VectorLength::L128, false), None);
    }

    #[test]
    fn test_vzero_pair() {
        assert_eq!(code(&VEX_0F[0x77], 0, VectorLength::L128, false), Some(Code::VEX_Vzeroupper));
        assert_eq!(code(&VEX_0F[0x77], 0, VectorLength::L256, false), Some(Code::VEX_Vzeroall));
    }

    #[test]
    fn test_movd_movq_by_w() {
        assert_eq!(code(&VEX_0F[0x6E], 1, VectorLength::L128, true), Some(Code::VEX_Vmovq_xmm_rm64));
        assert_eq!(code(&VEX_0F[0x7E], 1, VectorLength::L128, false), Some(Code::VEX_Vmovd_rm32_xmm));
    }
}
