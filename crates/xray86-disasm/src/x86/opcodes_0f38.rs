//! Map 0F38 in its legacy, VEX and EVEX encodings.

use xray86_core::{Code, MemorySize, MemorySize::*, RegisterClass::*, VsibIndex};

use super::opcodes_evex::{forms, w0, K1Z, NO_BCST};
use super::opcodes_vex::{p66, rvm};
use super::template::{Form, OperandRole, OperandRole::*, Slot, Template, TemplateFlags, INVALID_SLOT};

type Roles = &'static [OperandRole];

const D: VsibIndex = VsibIndex::Dword;
const Q: VsibIndex = VsibIndex::Qword;

/// Legacy map 0F38.
pub static LEGACY: [Slot; 256] = {
    let mut t = [INVALID_SLOT; 256];

    t[0x00] = Slot::Mandatory(&[
        Slot::Op(&Template::one(
            Form::new(Code::Pshufb_mm_mmm64, &[Reg(Mmx), RegOrMem(Mmx)]).mem(Packed64_Int8),
        )),
        Slot::Op(&Template::one(
            Form::new(Code::Pshufb_xmm_xmmm128, &[Reg(Xmm), RegOrMem(Xmm)]).mem(Packed128_Int8),
        )),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);

    t
};

/// VEX gather: destination, VSIB memory and the mask in vvvv. Index width and
/// destination width differ for the qword-index dword-element forms.
const fn gather(
    codes: [[Code; 2]; 2],
    operands: [[Roles; 2]; 2],
    mem: [MemorySize; 2],
) -> Template {
    Template::w_vec_len(
        [
            Form::new(codes[0][0], operands[0][0]).mem(mem[0]),
            Form::new(codes[0][1], operands[0][1]).mem(mem[0]),
            Form::INVALID,
        ],
        [
            Form::new(codes[1][0], operands[1][0]).mem(mem[1]),
            Form::new(codes[1][1], operands[1][1]).mem(mem[1]),
            Form::INVALID,
        ],
    )
    .flags(TemplateFlags::DISTINCT_GATHER_REGS)
}

// vm32x/vm32y with dword or qword elements.
const GATHER_D: [[Roles; 2]; 2] = [
    [
        &[Reg(Xmm), Vsib(Xmm, D), Vvvv(Xmm)],
        &[Reg(Ymm), Vsib(Ymm, D), Vvvv(Ymm)],
    ],
    [
        &[Reg(Xmm), Vsib(Xmm, D), Vvvv(Xmm)],
        &[Reg(Ymm), Vsib(Xmm, D), Vvvv(Ymm)],
    ],
];
// vm64x/vm64y with dword or qword elements.
const GATHER_Q: [[Roles; 2]; 2] = [
    [
        &[Reg(Xmm), Vsib(Xmm, Q), Vvvv(Xmm)],
        &[Reg(Xmm), Vsib(Ymm, Q), Vvvv(Xmm)],
    ],
    [
        &[Reg(Xmm), Vsib(Xmm, Q), Vvvv(Xmm)],
        &[Reg(Ymm), Vsib(Ymm, Q), Vvvv(Ymm)],
    ],
];

/// VEX map 0F38.
pub static VEX: [Slot; 256] = {
    let mut t = [INVALID_SLOT; 256];

    t[0x00] = p66!(Slot::Op(&rvm(
        Code::VEX_Vpshufb_xmm_xmm_xmmm128,
        Code::VEX_Vpshufb_ymm_ymm_ymmm256,
        [Packed128_Int8, Packed256_Int8],
    )));

    t[0x90] = p66!(Slot::Op(&gather(
        [
            [Code::VEX_Vpgatherdd_xmm_vm32x_xmm, Code::VEX_Vpgatherdd_ymm_vm32y_ymm],
            [Code::VEX_Vpgatherdq_xmm_vm32x_xmm, Code::VEX_Vpgatherdq_ymm_vm32x_ymm],
        ],
        GATHER_D,
        [Int32, Int64],
    )));
    t[0x91] = p66!(Slot::Op(&gather(
        [
            [Code::VEX_Vpgatherqd_xmm_vm64x_xmm, Code::VEX_Vpgatherqd_xmm_vm64y_xmm],
            [Code::VEX_Vpgatherqq_xmm_vm64x_xmm, Code::VEX_Vpgatherqq_ymm_vm64y_ymm],
        ],
        GATHER_Q,
        [Int32, Int64],
    )));
    t[0x92] = p66!(Slot::Op(&gather(
        [
            [Code::VEX_Vgatherdps_xmm_vm32x_xmm, Code::VEX_Vgatherdps_ymm_vm32y_ymm],
            [Code::VEX_Vgatherdpd_xmm_vm32x_xmm, Code::VEX_Vgatherdpd_ymm_vm32x_ymm],
        ],
        GATHER_D,
        [Float32, Float64],
    )));
    t[0x93] = p66!(Slot::Op(&gather(
        [
            [Code::VEX_Vgatherqps_xmm_vm64x_xmm, Code::VEX_Vgatherqps_xmm_vm64y_xmm],
            [Code::VEX_Vgatherqpd_xmm_vm64x_xmm, Code::VEX_Vgatherqpd_ymm_vm64y_ymm],
        ],
        GATHER_Q,
        [Float32, Float64],
    )));

    // BMI1, no mandatory prefix.
    t[0xF2] = Slot::Mandatory(&[
        Slot::Op(&Template::w(
            Form::new(Code::VEX_Andn_r32_r32_rm32, &[Reg(Gpr32), Vvvv(Gpr32), RegOrMem(Gpr32)]).mem(UInt32),
            Form::new(Code::VEX_Andn_r64_r64_rm64, &[Reg(Gpr64), Vvvv(Gpr64), RegOrMem(Gpr64)]).mem(UInt64),
        )
        .flags(TemplateFlags::WIG32.union(TemplateFlags::L0))),
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
    ]);

    t
};

const EVEX_GATHER: TemplateFlags = TemplateFlags::OPMASK
    .union(TemplateFlags::REQUIRE_OPMASK)
    .union(TemplateFlags::DISTINCT_GATHER_REGS);
const EVEX_SCATTER: TemplateFlags = TemplateFlags::OPMASK.union(TemplateFlags::REQUIRE_OPMASK);

const fn vsib_forms(codes: [Code; 3], operands: [Roles; 3], mem: MemorySize) -> [Form; 3] {
    forms(codes, operands, [mem, mem, mem], NO_BCST)
}

/// EVEX map 0F38.
pub static EVEX: [Slot; 256] = {
    let mut t = [INVALID_SLOT; 256];

    // Source is always an xmm register or a dword in memory.
    t[0x58] = p66!(Slot::Op(&w0(forms(
        [
            Code::EVEX_Vpbroadcastd_xmm_k1z_xmmm32,
            Code::EVEX_Vpbroadcastd_ymm_k1z_xmmm32,
            Code::EVEX_Vpbroadcastd_zmm_k1z_xmmm32,
        ],
        [
            &[Reg(Xmm), RegOrMem(Xmm)],
            &[Reg(Ymm), RegOrMem(Xmm)],
            &[Reg(Zmm), RegOrMem(Xmm)],
        ],
        [Int32, Int32, Int32],
        NO_BCST,
    ))
    .flags(K1Z)));

    t[0x90] = p66!(Slot::Op(&Template::w_vec_len(
        vsib_forms(
            [
                Code::EVEX_Vpgatherdd_xmm_k1_vm32x,
                Code::EVEX_Vpgatherdd_ymm_k1_vm32y,
                Code::EVEX_Vpgatherdd_zmm_k1_vm32z,
            ],
            [
                &[Reg(Xmm), Vsib(Xmm, D)],
                &[Reg(Ymm), Vsib(Ymm, D)],
                &[Reg(Zmm), Vsib(Zmm, D)],
            ],
            Int32,
        ),
        vsib_forms(
            [
                Code::EVEX_Vpgatherdq_xmm_k1_vm32x,
                Code::EVEX_Vpgatherdq_ymm_k1_vm32x,
                Code::EVEX_Vpgatherdq_zmm_k1_vm32y,
            ],
            [
                &[Reg(Xmm), Vsib(Xmm, D)],
                &[Reg(Ymm), Vsib(Xmm, D)],
                &[Reg(Zmm), Vsib(Ymm, D)],
            ],
            Int64,
        ),
    )
    .flags(EVEX_GATHER)));
    t[0x91] = p66!(Slot::Op(&Template::w_vec_len(
        vsib_forms(
            [
                Code::EVEX_Vpgatherqd_xmm_k1_vm64x,
                Code::EVEX_Vpgatherqd_xmm_k1_vm64y,
                Code::EVEX_Vpgatherqd_ymm_k1_vm64z,
            ],
            [
                &[Reg(Xmm), Vsib(Xmm, Q)],
                &[Reg(Xmm), Vsib(Ymm, Q)],
                &[Reg(Ymm), Vsib(Zmm, Q)],
            ],
            Int32,
        ),
        vsib_forms(
            [
                Code::EVEX_Vpgatherqq_xmm_k1_vm64x,
                Code::EVEX_Vpgatherqq_ymm_k1_vm64y,
                Code::EVEX_Vpgatherqq_zmm_k1_vm64z,
            ],
            [
                &[Reg(Xmm), Vsib(Xmm, Q)],
                &[Reg(Ymm), Vsib(Ymm, Q)],
                &[Reg(Zmm), Vsib(Zmm, Q)],
            ],
            Int64,
        ),
    )
    .flags(EVEX_GATHER)));

    t[0xA0] = p66!(Slot::Op(&Template::w_vec_len(
        vsib_forms(
            [
                Code::EVEX_Vpscatterdd_vm32x_k1_xmm,
                Code::EVEX_Vpscatterdd_vm32y_k1_ymm,
                Code::EVEX_Vpscatterdd_vm32z_k1_zmm,
            ],
            [
                &[Vsib(Xmm, D), Reg(Xmm)],
                &[Vsib(Ymm, D), Reg(Ymm)],
                &[Vsib(Zmm, D), Reg(Zmm)],
            ],
            Int32,
        ),
        vsib_forms(
            [
                Code::EVEX_Vpscatterdq_vm32x_k1_xmm,
                Code::EVEX_Vpscatterdq_vm32x_k1_ymm,
                Code::EVEX_Vpscatterdq_vm32y_k1_zmm,
            ],
            [
                &[Vsib(Xmm, D), Reg(Xmm)],
                &[Vsib(Xmm, D), Reg(Ymm)],
                &[Vsib(Ymm, D), Reg(Zmm)],
            ],
            Int64,
        ),
    )
    .flags(EVEX_SCATTER)));
    t[0xA1] = p66!(Slot::Op(&Template::w_vec_len(
        vsib_forms(
            [
                Code::EVEX_Vpscatterqd_vm64x_k1_xmm,
                Code::EVEX_Vpscatterqd_vm64y_k1_xmm,
                Code::EVEX_Vpscatterqd_vm64z_k1_ymm,
            ],
            [
                &[Vsib(Xmm, Q), Reg(Xmm)],
                &[Vsib(Ymm, Q), Reg(Xmm)],
                &[Vsib(Zmm, Q), Reg(Ymm)],
            ],
            Int32,
        ),
        vsib_forms(
            [
                Code::EVEX_Vpscatterqq_vm64x_k1_xmm,
                Code::EVEX_Vpscatterqq_vm64y_k1_ymm,
                Code::EVEX_Vpscatterqq_vm64z_k1_zmm,
            ],
            [
                &[Vsib(Xmm, Q), Reg(Xmm)],
                &[Vsib(Ymm, Q), Reg(Ymm)],
                &[Vsib(Zmm, Q), Reg(Zmm)],
            ],
            Int64,
        ),
    )
    .flags(EVEX_SCATTER)));

    t
};
