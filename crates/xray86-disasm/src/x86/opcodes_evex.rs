//! EVEX-encoded map 0F.
//!
//! Rows hold the 128/256/512-bit forms of one instruction. Most AVX-512
//! instructions are W-sensitive: dword forms require W0 and qword forms W1, so
//! the other half of a row stays invalid.

use xray86_core::{Code, MemorySize, MemorySize::*, RegisterClass::*};

use super::opcodes_vex::p66;
use super::template::{Form, OperandRole, OperandRole::*, Slot, Template, TemplateFlags, INVALID_SLOT};

type Roles = &'static [OperandRole];

/// `{k1}{z}` destination.
pub(super) const K1Z: TemplateFlags = TemplateFlags::OPMASK.union(TemplateFlags::ZEROING);
const ER: TemplateFlags = K1Z.union(TemplateFlags::ROUNDING);
const SAE: TemplateFlags = K1Z.union(TemplateFlags::SAE);

const LOAD: [Roles; 3] = [
    &[Reg(Xmm), RegOrMem(Xmm)],
    &[Reg(Ymm), RegOrMem(Ymm)],
    &[Reg(Zmm), RegOrMem(Zmm)],
];
const STORE: [Roles; 3] = [
    &[RegOrMem(Xmm), Reg(Xmm)],
    &[RegOrMem(Ymm), Reg(Ymm)],
    &[RegOrMem(Zmm), Reg(Zmm)],
];
const RVM: [Roles; 3] = [
    &[Reg(Xmm), Vvvv(Xmm), RegOrMem(Xmm)],
    &[Reg(Ymm), Vvvv(Ymm), RegOrMem(Ymm)],
    &[Reg(Zmm), Vvvv(Zmm), RegOrMem(Zmm)],
];
const KVM: [Roles; 3] = [
    &[Reg(Opmask), Vvvv(Xmm), RegOrMem(Xmm)],
    &[Reg(Opmask), Vvvv(Ymm), RegOrMem(Ymm)],
    &[Reg(Opmask), Vvvv(Zmm), RegOrMem(Zmm)],
];
const SHIFT_IMM: [Roles; 3] = [
    &[Vvvv(Xmm), RegOrMem(Xmm), Imm8],
    &[Vvvv(Ymm), RegOrMem(Ymm), Imm8],
    &[Vvvv(Zmm), RegOrMem(Zmm), Imm8],
];

pub(super) const NO_BCST: [MemorySize; 3] = [Unknown, Unknown, Unknown];
const PS: [MemorySize; 3] = [Packed128_Float32, Packed256_Float32, Packed512_Float32];
const PD: [MemorySize; 3] = [Packed128_Float64, Packed256_Float64, Packed512_Float64];
const BPS: [MemorySize; 3] = [Broadcast128_Float32, Broadcast256_Float32, Broadcast512_Float32];
const BPD: [MemorySize; 3] = [Broadcast128_Float64, Broadcast256_Float64, Broadcast512_Float64];
const BYTES: [MemorySize; 3] = [Packed128_Int8, Packed256_Int8, Packed512_Int8];
const WORDS: [MemorySize; 3] = [Packed128_Int16, Packed256_Int16, Packed512_Int16];
const DWORDS: [MemorySize; 3] = [Packed128_Int32, Packed256_Int32, Packed512_Int32];
const QWORDS: [MemorySize; 3] = [Packed128_Int64, Packed256_Int64, Packed512_Int64];
const BDWORD: [MemorySize; 3] = [Broadcast128_Int32, Broadcast256_Int32, Broadcast512_Int32];
const BQWORD: [MemorySize; 3] = [Broadcast128_Int64, Broadcast256_Int64, Broadcast512_Int64];
const UDWORDS: [MemorySize; 3] = [Packed128_UInt32, Packed256_UInt32, Packed512_UInt32];
const UQWORDS: [MemorySize; 3] = [Packed128_UInt64, Packed256_UInt64, Packed512_UInt64];
const BUDWORD: [MemorySize; 3] = [Broadcast128_UInt32, Broadcast256_UInt32, Broadcast512_UInt32];
const BUQWORD: [MemorySize; 3] = [Broadcast128_UInt64, Broadcast256_UInt64, Broadcast512_UInt64];

/// The three vector-length forms of one instruction.
pub(super) const fn forms(
    codes: [Code; 3],
    operands: [Roles; 3],
    mem: [MemorySize; 3],
    bcst: [MemorySize; 3],
) -> [Form; 3] {
    [
        Form::new(codes[0], operands[0]).mem(mem[0]).bcst(bcst[0]),
        Form::new(codes[1], operands[1]).mem(mem[1]).bcst(bcst[1]),
        Form::new(codes[2], operands[2]).mem(mem[2]).bcst(bcst[2]),
    ]
}

/// Defined for EVEX.W0 only.
pub(super) const fn w0(forms: [Form; 3]) -> Template {
    Template::w_vec_len(forms, [Form::INVALID; 3])
}

/// Defined for EVEX.W1 only.
const fn w1(forms: [Form; 3]) -> Template {
    Template::w_vec_len([Form::INVALID; 3], forms)
}

/// EVEX.W ignored.
pub(super) const fn wig(forms: [Form; 3]) -> Template {
    Template::vec_len(forms[0], forms[1], forms[2])
}

const fn scalar(code: Code, mem: MemorySize, w: bool) -> Template {
    let form = Form::new(code, RVM[0]).mem(mem);
    if w {
        Template::w(Form::INVALID, form)
    } else {
        Template::w(form, Form::INVALID)
    }
}

/// EVEX map 0F.
pub static EVEX_0F: [Slot; 256] = {
    let mut t = [INVALID_SLOT; 256];

    t[0x10] = Slot::Mandatory(&[
        Slot::Op(&w0(forms(
            [Code::EVEX_Vmovups_xmm_k1z_xmmm128, Code::EVEX_Vmovups_ymm_k1z_ymmm256, Code::EVEX_Vmovups_zmm_k1z_zmmm512],
            LOAD,
            PS,
            NO_BCST,
        ))
        .flags(K1Z)),
        Slot::Op(&w1(forms(
            [Code::EVEX_Vmovupd_xmm_k1z_xmmm128, Code::EVEX_Vmovupd_ymm_k1z_ymmm256, Code::EVEX_Vmovupd_zmm_k1z_zmmm512],
            LOAD,
            PD,
            NO_BCST,
        ))
        .flags(K1Z)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x11] = Slot::Mandatory(&[
        Slot::Op(&w0(forms(
            [Code::EVEX_Vmovups_xmmm128_k1z_xmm, Code::EVEX_Vmovups_ymmm256_k1z_ymm, Code::EVEX_Vmovups_zmmm512_k1z_zmm],
            STORE,
            PS,
            NO_BCST,
        ))
        .flags(K1Z)),
        Slot::Op(&w1(forms(
            [Code::EVEX_Vmovupd_xmmm128_k1z_xmm, Code::EVEX_Vmovupd_ymmm256_k1z_ymm, Code::EVEX_Vmovupd_zmmm512_k1z_zmm],
            STORE,
            PD,
            NO_BCST,
        ))
        .flags(K1Z)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);

    t[0x58] = Slot::Mandatory(&[
        Slot::Op(&w0(forms(
            [
                Code::EVEX_Vaddps_xmm_k1z_xmm_xmmm128b32,
                Code::EVEX_Vaddps_ymm_k1z_ymm_ymmm256b32,
                Code::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er,
            ],
            RVM,
            PS,
            BPS,
        ))
        .flags(ER)),
        Slot::Op(&w1(forms(
            [
                Code::EVEX_Vaddpd_xmm_k1z_xmm_xmmm128b64,
                Code::EVEX_Vaddpd_ymm_k1z_ymm_ymmm256b64,
                Code::EVEX_Vaddpd_zmm_k1z_zmm_zmmm512b64_er,
            ],
            RVM,
            PD,
            BPD,
        ))
        .flags(ER)),
        Slot::Op(&scalar(Code::EVEX_Vaddss_xmm_k1z_xmm_xmmm32_er, Float32, false).flags(ER)),
        Slot::Op(&scalar(Code::EVEX_Vaddsd_xmm_k1z_xmm_xmmm64_er, Float64, true).flags(ER)),
    ]);
    t[0x5F] = Slot::Mandatory(&[
        Slot::Op(&w0(forms(
            [
                Code::EVEX_Vmaxps_xmm_k1z_xmm_xmmm128b32,
                Code::EVEX_Vmaxps_ymm_k1z_ymm_ymmm256b32,
                Code::EVEX_Vmaxps_zmm_k1z_zmm_zmmm512b32_sae,
            ],
            RVM,
            PS,
            BPS,
        ))
        .flags(SAE)),
        Slot::Op(&w1(forms(
            [
                Code::EVEX_Vmaxpd_xmm_k1z_xmm_xmmm128b64,
                Code::EVEX_Vmaxpd_ymm_k1z_ymm_ymmm256b64,
                Code::EVEX_Vmaxpd_zmm_k1z_zmm_zmmm512b64_sae,
            ],
            RVM,
            PD,
            BPD,
        ))
        .flags(SAE)),
        Slot::Op(&scalar(Code::EVEX_Vmaxss_xmm_k1z_xmm_xmmm32_sae, Float32, false).flags(SAE)),
        Slot::Op(&scalar(Code::EVEX_Vmaxsd_xmm_k1z_xmm_xmmm64_sae, Float64, true).flags(SAE)),
    ]);

    // Byte and word elements ignore W; dword elements need W0, qword W1.
    t[0x60] = p66!(Slot::Op(&wig(forms(
        [
            Code::EVEX_Vpunpcklbw_xmm_k1z_xmm_xmmm128,
            Code::EVEX_Vpunpcklbw_ymm_k1z_ymm_ymmm256,
            Code::EVEX_Vpunpcklbw_zmm_k1z_zmm_zmmm512,
        ],
        RVM,
        BYTES,
        NO_BCST,
    ))
    .flags(K1Z)));
    t[0x61] = p66!(Slot::Op(&wig(forms(
        [
            Code::EVEX_Vpunpcklwd_xmm_k1z_xmm_xmmm128,
            Code::EVEX_Vpunpcklwd_ymm_k1z_ymm_ymmm256,
            Code::EVEX_Vpunpcklwd_zmm_k1z_zmm_zmmm512,
        ],
        RVM,
        WORDS,
        NO_BCST,
    ))
    .flags(K1Z)));
    t[0x62] = p66!(Slot::Op(&w0(forms(
        [
            Code::EVEX_Vpunpckldq_xmm_k1z_xmm_xmmm128b32,
            Code::EVEX_Vpunpckldq_ymm_k1z_ymm_ymmm256b32,
            Code::EVEX_Vpunpckldq_zmm_k1z_zmm_zmmm512b32,
        ],
        RVM,
        DWORDS,
        BDWORD,
    ))
    .flags(K1Z)));
    t[0x63] = p66!(Slot::Op(&wig(forms(
        [
            Code::EVEX_Vpacksswb_xmm_k1z_xmm_xmmm128,
            Code::EVEX_Vpacksswb_ymm_k1z_ymm_ymmm256,
            Code::EVEX_Vpacksswb_zmm_k1z_zmm_zmmm512,
        ],
        RVM,
        WORDS,
        NO_BCST,
    ))
    .flags(K1Z)));
    t[0x64] = p66!(Slot::Op(&wig(forms(
        [
            Code::EVEX_Vpcmpgtb_kr_k1_xmm_xmmm128,
            Code::EVEX_Vpcmpgtb_kr_k1_ymm_ymmm256,
            Code::EVEX_Vpcmpgtb_kr_k1_zmm_zmmm512,
        ],
        KVM,
        BYTES,
        NO_BCST,
    ))
    .flags(TemplateFlags::OPMASK)));
    t[0x65] = p66!(Slot::Op(&wig(forms(
        [
            Code::EVEX_Vpcmpgtw_kr_k1_xmm_xmmm128,
            Code::EVEX_Vpcmpgtw_kr_k1_ymm_ymmm256,
            Code::EVEX_Vpcmpgtw_kr_k1_zmm_zmmm512,
        ],
        KVM,
        WORDS,
        NO_BCST,
    ))
    .flags(TemplateFlags::OPMASK)));
    t[0x66] = p66!(Slot::Op(&w0(forms(
        [
            Code::EVEX_Vpcmpgtd_kr_k1_xmm_xmmm128b32,
            Code::EVEX_Vpcmpgtd_kr_k1_ymm_ymmm256b32,
            Code::EVEX_Vpcmpgtd_kr_k1_zmm_zmmm512b32,
        ],
        KVM,
        DWORDS,
        BDWORD,
    ))
    .flags(TemplateFlags::OPMASK)));
    t[0x67] = p66!(Slot::Op(&wig(forms(
        [
            Code::EVEX_Vpackuswb_xmm_k1z_xmm_xmmm128,
            Code::EVEX_Vpackuswb_ymm_k1z_ymm_ymmm256,
            Code::EVEX_Vpackuswb_zmm_k1z_zmm_zmmm512,
        ],
        RVM,
        WORDS,
        NO_BCST,
    ))
    .flags(K1Z)));
    t[0x68] = p66!(Slot::Op(&wig(forms(
        [
            Code::EVEX_Vpunpckhbw_xmm_k1z_xmm_xmmm128,
            Code::EVEX_Vpunpckhbw_ymm_k1z_ymm_ymmm256,
            Code::EVEX_Vpunpckhbw_zmm_k1z_zmm_zmmm512,
        ],
        RVM,
        BYTES,
        NO_BCST,
    ))
    .flags(K1Z)));
    t[0x69] = p66!(Slot::Op(&wig(forms(
        [
            Code::EVEX_Vpunpckhwd_xmm_k1z_xmm_xmmm128,
            Code::EVEX_Vpunpckhwd_ymm_k1z_ymm_ymmm256,
            Code::EVEX_Vpunpckhwd_zmm_k1z_zmm_zmmm512,
        ],
        RVM,
        WORDS,
        NO_BCST,
    ))
    .flags(K1Z)));
    t[0x6A] = p66!(Slot::Op(&w0(forms(
        [
            Code::EVEX_Vpunpckhdq_xmm_k1z_xmm_xmmm128b32,
            Code::EVEX_Vpunpckhdq_ymm_k1z_ymm_ymmm256b32,
            Code::EVEX_Vpunpckhdq_zmm_k1z_zmm_zmmm512b32,
        ],
        RVM,
        DWORDS,
        BDWORD,
    ))
    .flags(K1Z)));
    t[0x6B] = p66!(Slot::Op(&w0(forms(
        [
            Code::EVEX_Vpackssdw_xmm_k1z_xmm_xmmm128b32,
            Code::EVEX_Vpackssdw_ymm_k1z_ymm_ymmm256b32,
            Code::EVEX_Vpackssdw_zmm_k1z_zmm_zmmm512b32,
        ],
        RVM,
        DWORDS,
        BDWORD,
    ))
    .flags(K1Z)));
    t[0x6C] = p66!(Slot::Op(&w1(forms(
        [
            Code::EVEX_Vpunpcklqdq_xmm_k1z_xmm_xmmm128b64,
            Code::EVEX_Vpunpcklqdq_ymm_k1z_ymm_ymmm256b64,
            Code::EVEX_Vpunpcklqdq_zmm_k1z_zmm_zmmm512b64,
        ],
        RVM,
        QWORDS,
        BQWORD,
    ))
    .flags(K1Z)));
    t[0x6D] = p66!(Slot::Op(&w1(forms(
        [
            Code::EVEX_Vpunpckhqdq_xmm_k1z_xmm_xmmm128b64,
            Code::EVEX_Vpunpckhqdq_ymm_k1z_ymm_ymmm256b64,
            Code::EVEX_Vpunpckhqdq_zmm_k1z_zmm_zmmm512b64,
        ],
        RVM,
        QWORDS,
        BQWORD,
    ))
    .flags(K1Z)));

    t[0x6F] = Slot::Mandatory(&[
        INVALID_SLOT,
        Slot::Op(&Template::w_vec_len(
            forms(
                [Code::EVEX_Vmovdqa32_xmm_k1z_xmmm128, Code::EVEX_Vmovdqa32_ymm_k1z_ymmm256, Code::EVEX_Vmovdqa32_zmm_k1z_zmmm512],
                LOAD,
                UDWORDS,
                NO_BCST,
            ),
            forms(
                [Code::EVEX_Vmovdqa64_xmm_k1z_xmmm128, Code::EVEX_Vmovdqa64_ymm_k1z_ymmm256, Code::EVEX_Vmovdqa64_zmm_k1z_zmmm512],
                LOAD,
                UQWORDS,
                NO_BCST,
            ),
        )
        .flags(K1Z)),
        Slot::Op(&Template::w_vec_len(
            forms(
                [Code::EVEX_Vmovdqu32_xmm_k1z_xmmm128, Code::EVEX_Vmovdqu32_ymm_k1z_ymmm256, Code::EVEX_Vmovdqu32_zmm_k1z_zmmm512],
                LOAD,
                UDWORDS,
                NO_BCST,
            ),
            forms(
                [Code::EVEX_Vmovdqu64_xmm_k1z_xmmm128, Code::EVEX_Vmovdqu64_ymm_k1z_ymmm256, Code::EVEX_Vmovdqu64_zmm_k1z_zmmm512],
                LOAD,
                UQWORDS,
                NO_BCST,
            ),
        )
        .flags(K1Z)),
        INVALID_SLOT,
    ]);

    t[0x72] = Slot::Group(&[
        INVALID_SLOT,
        INVALID_SLOT,
        p66!(Slot::Op(&w0(forms(
            [
                Code::EVEX_Vpsrld_xmm_k1z_xmmm128b32_imm8,
                Code::EVEX_Vpsrld_ymm_k1z_ymmm256b32_imm8,
                Code::EVEX_Vpsrld_zmm_k1z_zmmm512b32_imm8,
            ],
            SHIFT_IMM,
            UDWORDS,
            BUDWORD,
        ))
        .flags(K1Z))),
        INVALID_SLOT,
        p66!(Slot::Op(&w0(forms(
            [
                Code::EVEX_Vpsrad_xmm_k1z_xmmm128b32_imm8,
                Code::EVEX_Vpsrad_ymm_k1z_ymmm256b32_imm8,
                Code::EVEX_Vpsrad_zmm_k1z_zmmm512b32_imm8,
            ],
            SHIFT_IMM,
            DWORDS,
            BDWORD,
        ))
        .flags(K1Z))),
        INVALID_SLOT,
        p66!(Slot::Op(&w0(forms(
            [
                Code::EVEX_Vpslld_xmm_k1z_xmmm128b32_imm8,
                Code::EVEX_Vpslld_ymm_k1z_ymmm256b32_imm8,
                Code::EVEX_Vpslld_zmm_k1z_zmmm512b32_imm8,
            ],
            SHIFT_IMM,
            UDWORDS,
            BUDWORD,
        ))
        .flags(K1Z))),
        INVALID_SLOT,
    ]);

    t[0x7F] = Slot::Mandatory(&[
        INVALID_SLOT,
        Slot::Op(&Template::w_vec_len(
            forms(
                [Code::EVEX_Vmovdqa32_xmmm128_k1z_xmm, Code::EVEX_Vmovdqa32_ymmm256_k1z_ymm, Code::EVEX_Vmovdqa32_zmmm512_k1z_zmm],
                STORE,
                UDWORDS,
                NO_BCST,
            ),
            forms(
                [Code::EVEX_Vmovdqa64_xmmm128_k1z_xmm, Code::EVEX_Vmovdqa64_ymmm256_k1z_ymm, Code::EVEX_Vmovdqa64_zmmm512_k1z_zmm],
                STORE,
                UQWORDS,
                NO_BCST,
            ),
        )
        .flags(K1Z)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);

    t[0xEF] = p66!(Slot::Op(&Template::w_vec_len(
        forms(
            [
                Code::EVEX_Vpxord_xmm_k1z_xmm_xmmm128b32,
                Code::EVEX_Vpxord_ymm_k1z_ymm_ymmm256b32,
                Code::EVEX_Vpxord_zmm_k1z_zmm_zmmm512b32,
            ],
            RVM,
            UDWORDS,
            BUDWORD,
        ),
        forms(
            [
                Code::EVEX_Vpxorq_xmm_k1z_xmm_xmmm128b64,
                Code::EVEX_Vpxorq_ymm_k1z_ymm_ymmm256b64,
                Code::EVEX_Vpxorq_zmm_k1z_zmm_zmmm512b64,
            ],
            RVM,
            UQWORDS,
            BUQWORD,
        ),
    )
    .flags(K1Z)));
    t[0xFE] = p66!(Slot::Op(&w0(forms(
        [
            Code::EVEX_Vpaddd_xmm_k1z_xmm_xmmm128b32,
            Code::EVEX_Vpaddd_ymm_k1z_ymm_ymmm256b32,
            Code::EVEX_Vpaddd_zmm_k1z_zmm_zmmm512b32,
        ],
        RVM,
        DWORDS,
        BDWORD,
    ))
    .flags(K1Z)));

    t
};
