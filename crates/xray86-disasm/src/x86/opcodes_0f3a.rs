//! Map 0F3A in its legacy, VEX and EVEX encodings. Every form carries an imm8.

use xray86_core::{Code, MemorySize::*, RegisterClass::*};

use super::opcodes_evex::{forms, wig, K1Z, NO_BCST};
use super::opcodes_vex::{by_len, p66};
use super::template::{Form, OperandRole::*, Slot, Template, INVALID_SLOT};

/// Legacy map 0F3A.
pub static LEGACY: [Slot; 256] = {
    let mut t = [INVALID_SLOT; 256];

    t[0x0F] = Slot::Mandatory(&[
        Slot::Op(&Template::one(
            Form::new(Code::Palignr_mm_mmm64_imm8, &[Reg(Mmx), RegOrMem(Mmx), Imm8]).mem(UInt64),
        )),
        Slot::Op(&Template::one(
            Form::new(Code::Palignr_xmm_xmmm128_imm8, &[Reg(Xmm), RegOrMem(Xmm), Imm8]).mem(UInt128),
        )),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);

    t
};

/// VEX map 0F3A.
pub static VEX: [Slot; 256] = {
    let mut t = [INVALID_SLOT; 256];

    t[0x0F] = p66!(Slot::Op(&by_len(
        Code::VEX_Vpalignr_xmm_xmm_xmmm128_imm8,
        Code::VEX_Vpalignr_ymm_ymm_ymmm256_imm8,
        [
            &[Reg(Xmm), Vvvv(Xmm), RegOrMem(Xmm), Imm8],
            &[Reg(Ymm), Vvvv(Ymm), RegOrMem(Ymm), Imm8],
        ],
        [UInt128, UInt256],
    )));

    // The fourth operand lives in imm8[7:4]. W1 is undefined.
    t[0x4A] = p66!(Slot::Op(&Template::w_vec_len(
        [
            Form::new(
                Code::VEX_Vblendvps_xmm_xmm_xmmm128_xmm,
                &[Reg(Xmm), Vvvv(Xmm), RegOrMem(Xmm), Is4(Xmm)],
            )
            .mem(Packed128_Float32),
            Form::new(
                Code::VEX_Vblendvps_ymm_ymm_ymmm256_ymm,
                &[Reg(Ymm), Vvvv(Ymm), RegOrMem(Ymm), Is4(Ymm)],
            )
            .mem(Packed256_Float32),
            Form::INVALID,
        ],
        [Form::INVALID; 3],
    )));

    t
};

/// EVEX map 0F3A.
pub static EVEX: [Slot; 256] = {
    let mut t = [INVALID_SLOT; 256];

    t[0x0F] = p66!(Slot::Op(&wig(forms(
        [
            Code::EVEX_Vpalignr_xmm_k1z_xmm_xmmm128_imm8,
            Code::EVEX_Vpalignr_ymm_k1z_ymm_ymmm256_imm8,
            Code::EVEX_Vpalignr_zmm_k1z_zmm_zmmm512_imm8,
        ],
        [
            &[Reg(Xmm), Vvvv(Xmm), RegOrMem(Xmm), Imm8],
            &[Reg(Ymm), Vvvv(Ymm), RegOrMem(Ymm), Imm8],
            &[Reg(Zmm), Vvvv(Zmm), RegOrMem(Zmm), Imm8],
        ],
        [UInt128, UInt256, UInt512],
        NO_BCST,
    ))
    .flags(K1Z)));

    t
};
