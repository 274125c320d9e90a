//! Legacy one-byte and two-byte (0F) opcode tables, and table lookup.

use xray86_core::{Code, EncodingKind, MemorySize, Register, RegisterClass::*};

use super::encoding::OpcodeMap;
use super::template::{Form, OperandRole, OperandRole::*, Slot, Template, TemplateFlags, INVALID_SLOT};
use super::{opcodes_0f38, opcodes_0f3a, opcodes_evex, opcodes_vex, opcodes_xop};

type Roles = &'static [OperandRole];

const LOCK: TemplateFlags = TemplateFlags::LOCKABLE;
const NO_64: TemplateFlags = TemplateFlags::NO_64;
const DEFAULT_64: TemplateFlags = TemplateFlags::DEFAULT_64;
const FORCE_64: TemplateFlags = TemplateFlags::FORCE_64;

const EB_GB: Roles = &[RegOrMem(Gpr8), Reg(Gpr8)];
const GB_EB: Roles = &[Reg(Gpr8), RegOrMem(Gpr8)];
const AL_IB: Roles = &[Fixed(Register::AL), Imm8];
const EB_IB: Roles = &[RegOrMem(Gpr8), Imm8];
const EB: Roles = &[RegOrMem(Gpr8)];

const E_G: [Roles; 3] = [
    &[RegOrMem(Gpr16), Reg(Gpr16)],
    &[RegOrMem(Gpr32), Reg(Gpr32)],
    &[RegOrMem(Gpr64), Reg(Gpr64)],
];
const G_E: [Roles; 3] = [
    &[Reg(Gpr16), RegOrMem(Gpr16)],
    &[Reg(Gpr32), RegOrMem(Gpr32)],
    &[Reg(Gpr64), RegOrMem(Gpr64)],
];
const ACC_IZ: [Roles; 3] = [
    &[Fixed(Register::AX), Imm16],
    &[Fixed(Register::EAX), Imm32],
    &[Fixed(Register::RAX), Imm32to64],
];
const E_IZ: [Roles; 3] = [
    &[RegOrMem(Gpr16), Imm16],
    &[RegOrMem(Gpr32), Imm32],
    &[RegOrMem(Gpr64), Imm32to64],
];
const E_IB: [Roles; 3] = [
    &[RegOrMem(Gpr16), Imm8to16],
    &[RegOrMem(Gpr32), Imm8to32],
    &[RegOrMem(Gpr64), Imm8to64],
];
const E: [Roles; 3] = [&[RegOrMem(Gpr16)], &[RegOrMem(Gpr32)], &[RegOrMem(Gpr64)]];
const Z: [Roles; 3] = [&[OpcodeReg(Gpr16)], &[OpcodeReg(Gpr32)], &[OpcodeReg(Gpr64)]];
const NONE: [Roles; 3] = [&[], &[], &[]];

/// A template with a single byte-sized form.
const fn byte(code: Code, operands: Roles) -> Template {
    Template::one(Form::new(code, operands).mem(MemorySize::UInt8))
}

/// A template whose forms follow the operand size, with matching memory sizes.
const fn sized(codes: [Code; 3], operands: [Roles; 3]) -> Template {
    Template::op_size(
        Form::new(codes[0], operands[0]).mem(MemorySize::UInt16),
        Form::new(codes[1], operands[1]).mem(MemorySize::UInt32),
        Form::new(codes[2], operands[2]).mem(MemorySize::UInt64),
    )
}

/// Like [`sized`], without a 64-bit form.
const fn sized_no64(codes: [Code; 2], operands: [Roles; 3]) -> Template {
    Template::op_size(
        Form::new(codes[0], operands[0]).mem(MemorySize::UInt16),
        Form::new(codes[1], operands[1]).mem(MemorySize::UInt32),
        Form::INVALID,
    )
    .flags(NO_64)
}

const fn simple(code: Code) -> Template {
    Template::one(Form::new(code, &[]))
}

const fn mmx(code: Code, mem: MemorySize) -> Template {
    Template::one(Form::new(code, &[Reg(Mmx), RegOrMem(Mmx)]).mem(mem))
}

const fn sse(code: Code, mem: MemorySize) -> Template {
    Template::one(Form::new(code, &[Reg(Xmm), RegOrMem(Xmm)]).mem(mem))
}

const fn sse_store(code: Code, mem: MemorySize) -> Template {
    Template::one(Form::new(code, &[RegOrMem(Xmm), Reg(Xmm)]).mem(mem))
}

const fn jcc_rel8(codes: [Code; 3]) -> Template {
    Template::op_size(
        Form::new(codes[0], &[Rel8_16]),
        Form::new(codes[1], &[Rel8_32]),
        Form::new(codes[2], &[Rel8_64]),
    )
    .flags(FORCE_64)
}

const fn jcc_rel32(codes: [Code; 3]) -> Template {
    Template::op_size(
        Form::new(codes[0], &[Rel16]),
        Form::new(codes[1], &[Rel32_32]),
        Form::new(codes[2], &[Rel32_64]),
    )
    .flags(FORCE_64)
}

/// One-byte opcode table.
pub static ONE_BYTE: [Slot; 256] = {
    let mut t = [INVALID_SLOT; 256];

    // ADD
    t[0x00] = Slot::Op(&byte(Code::Add_rm8_r8, EB_GB).flags(LOCK));
    t[0x01] = Slot::Op(&sized([Code::Add_rm16_r16, Code::Add_rm32_r32, Code::Add_rm64_r64], E_G).flags(LOCK));
    t[0x02] = Slot::Op(&byte(Code::Add_r8_rm8, GB_EB));
    t[0x03] = Slot::Op(&sized([Code::Add_r16_rm16, Code::Add_r32_rm32, Code::Add_r64_rm64], G_E));
    t[0x04] = Slot::Op(&byte(Code::Add_AL_imm8, AL_IB));
    t[0x05] = Slot::Op(&sized([Code::Add_AX_imm16, Code::Add_EAX_imm32, Code::Add_RAX_imm32], ACC_IZ));

    // OR
    t[0x08] = Slot::Op(&byte(Code::Or_rm8_r8, EB_GB).flags(LOCK));
    t[0x09] = Slot::Op(&sized([Code::Or_rm16_r16, Code::Or_rm32_r32, Code::Or_rm64_r64], E_G).flags(LOCK));
    t[0x0A] = Slot::Op(&byte(Code::Or_r8_rm8, GB_EB));
    t[0x0B] = Slot::Op(&sized([Code::Or_r16_rm16, Code::Or_r32_rm32, Code::Or_r64_rm64], G_E));
    t[0x0C] = Slot::Op(&byte(Code::Or_AL_imm8, AL_IB));
    t[0x0D] = Slot::Op(&sized([Code::Or_AX_imm16, Code::Or_EAX_imm32, Code::Or_RAX_imm32], ACC_IZ));

    // ADC
    t[0x10] = Slot::Op(&byte(Code::Adc_rm8_r8, EB_GB).flags(LOCK));
    t[0x11] = Slot::Op(&sized([Code::Adc_rm16_r16, Code::Adc_rm32_r32, Code::Adc_rm64_r64], E_G).flags(LOCK));
    t[0x12] = Slot::Op(&byte(Code::Adc_r8_rm8, GB_EB));
    t[0x13] = Slot::Op(&sized([Code::Adc_r16_rm16, Code::Adc_r32_rm32, Code::Adc_r64_rm64], G_E));
    t[0x14] = Slot::Op(&byte(Code::Adc_AL_imm8, AL_IB));
    t[0x15] = Slot::Op(&sized([Code::Adc_AX_imm16, Code::Adc_EAX_imm32, Code::Adc_RAX_imm32], ACC_IZ));

    // SBB
    t[0x18] = Slot::Op(&byte(Code::Sbb_rm8_r8, EB_GB).flags(LOCK));
    t[0x19] = Slot::Op(&sized([Code::Sbb_rm16_r16, Code::Sbb_rm32_r32, Code::Sbb_rm64_r64], E_G).flags(LOCK));
    t[0x1A] = Slot::Op(&byte(Code::Sbb_r8_rm8, GB_EB));
    t[0x1B] = Slot::Op(&sized([Code::Sbb_r16_rm16, Code::Sbb_r32_rm32, Code::Sbb_r64_rm64], G_E));
    t[0x1C] = Slot::Op(&byte(Code::Sbb_AL_imm8, AL_IB));
    t[0x1D] = Slot::Op(&sized([Code::Sbb_AX_imm16, Code::Sbb_EAX_imm32, Code::Sbb_RAX_imm32], ACC_IZ));

    // AND
    t[0x20] = Slot::Op(&byte(Code::And_rm8_r8, EB_GB).flags(LOCK));
    t[0x21] = Slot::Op(&sized([Code::And_rm16_r16, Code::And_rm32_r32, Code::And_rm64_r64], E_G).flags(LOCK));
    t[0x22] = Slot::Op(&byte(Code::And_r8_rm8, GB_EB));
    t[0x23] = Slot::Op(&sized([Code::And_r16_rm16, Code::And_r32_rm32, Code::And_r64_rm64], G_E));
    t[0x24] = Slot::Op(&byte(Code::And_AL_imm8, AL_IB));
    t[0x25] = Slot::Op(&sized([Code::And_AX_imm16, Code::And_EAX_imm32, Code::And_RAX_imm32], ACC_IZ));

    // SUB
    t[0x28] = Slot::Op(&byte(Code::Sub_rm8_r8, EB_GB).flags(LOCK));
    t[0x29] = Slot::Op(&sized([Code::Sub_rm16_r16, Code::Sub_rm32_r32, Code::Sub_rm64_r64], E_G).flags(LOCK));
    t[0x2A] = Slot::Op(&byte(Code::Sub_r8_rm8, GB_EB));
    t[0x2B] = Slot::Op(&sized([Code::Sub_r16_rm16, Code::Sub_r32_rm32, Code::Sub_r64_rm64], G_E));
    t[0x2C] = Slot::Op(&byte(Code::Sub_AL_imm8, AL_IB));
    t[0x2D] = Slot::Op(&sized([Code::Sub_AX_imm16, Code::Sub_EAX_imm32, Code::Sub_RAX_imm32], ACC_IZ));

    // XOR
    t[0x30] = Slot::Op(&byte(Code::Xor_rm8_r8, EB_GB).flags(LOCK));
    t[0x31] = Slot::Op(&sized([Code::Xor_rm16_r16, Code::Xor_rm32_r32, Code::Xor_rm64_r64], E_G).flags(LOCK));
    t[0x32] = Slot::Op(&byte(Code::Xor_r8_rm8, GB_EB));
    t[0x33] = Slot::Op(&sized([Code::Xor_r16_rm16, Code::Xor_r32_rm32, Code::Xor_r64_rm64], G_E));
    t[0x34] = Slot::Op(&byte(Code::Xor_AL_imm8, AL_IB));
    t[0x35] = Slot::Op(&sized([Code::Xor_AX_imm16, Code::Xor_EAX_imm32, Code::Xor_RAX_imm32], ACC_IZ));

    // CMP
    t[0x38] = Slot::Op(&byte(Code::Cmp_rm8_r8, EB_GB));
    t[0x39] = Slot::Op(&sized([Code::Cmp_rm16_r16, Code::Cmp_rm32_r32, Code::Cmp_rm64_r64], E_G));
    t[0x3A] = Slot::Op(&byte(Code::Cmp_r8_rm8, GB_EB));
    t[0x3B] = Slot::Op(&sized([Code::Cmp_r16_rm16, Code::Cmp_r32_rm32, Code::Cmp_r64_rm64], G_E));
    t[0x3C] = Slot::Op(&byte(Code::Cmp_AL_imm8, AL_IB));
    t[0x3D] = Slot::Op(&sized([Code::Cmp_AX_imm16, Code::Cmp_EAX_imm32, Code::Cmp_RAX_imm32], ACC_IZ));

    // INC/DEC r (REX prefixes in 64-bit mode)
    t[0x40] = Slot::Op(&INC_R);
    t[0x41] = Slot::Op(&INC_R);
    t[0x42] = Slot::Op(&INC_R);
    t[0x43] = Slot::Op(&INC_R);
    t[0x44] = Slot::Op(&INC_R);
    t[0x45] = Slot::Op(&INC_R);
    t[0x46] = Slot::Op(&INC_R);
    t[0x47] = Slot::Op(&INC_R);
    t[0x48] = Slot::Op(&DEC_R);
    t[0x49] = Slot::Op(&DEC_R);
    t[0x4A] = Slot::Op(&DEC_R);
    t[0x4B] = Slot::Op(&DEC_R);
    t[0x4C] = Slot::Op(&DEC_R);
    t[0x4D] = Slot::Op(&DEC_R);
    t[0x4E] = Slot::Op(&DEC_R);
    t[0x4F] = Slot::Op(&DEC_R);

    // PUSH/POP r
    t[0x50] = Slot::Op(&PUSH_R);
    t[0x51] = Slot::Op(&PUSH_R);
    t[0x52] = Slot::Op(&PUSH_R);
    t[0x53] = Slot::Op(&PUSH_R);
    t[0x54] = Slot::Op(&PUSH_R);
    t[0x55] = Slot::Op(&PUSH_R);
    t[0x56] = Slot::Op(&PUSH_R);
    t[0x57] = Slot::Op(&PUSH_R);
    t[0x58] = Slot::Op(&POP_R);
    t[0x59] = Slot::Op(&POP_R);
    t[0x5A] = Slot::Op(&POP_R);
    t[0x5B] = Slot::Op(&POP_R);
    t[0x5C] = Slot::Op(&POP_R);
    t[0x5D] = Slot::Op(&POP_R);
    t[0x5E] = Slot::Op(&POP_R);
    t[0x5F] = Slot::Op(&POP_R);

    t[0x62] = Slot::Op(&Template::op_size(
        Form::new(Code::Bound_r16_m1616, &[Reg(Gpr16), Mem]).mem(MemorySize::Bound16_WordWord),
        Form::new(Code::Bound_r32_m3232, &[Reg(Gpr32), Mem]).mem(MemorySize::Bound32_DwordDword),
        Form::INVALID,
    )
    .flags(NO_64));
    t[0x68] = Slot::Op(&Template::op_size(
        Form::new(Code::Pushw_imm16, &[Imm16]),
        Form::new(Code::Pushd_imm32, &[Imm32]),
        Form::new(Code::Pushq_imm32, &[Imm32to64]),
    )
    .flags(DEFAULT_64));
    t[0x69] = Slot::Op(&sized(
        [Code::Imul_r16_rm16_imm16, Code::Imul_r32_rm32_imm32, Code::Imul_r64_rm64_imm32],
        [
            &[Reg(Gpr16), RegOrMem(Gpr16), Imm16],
            &[Reg(Gpr32), RegOrMem(Gpr32), Imm32],
            &[Reg(Gpr64), RegOrMem(Gpr64), Imm32to64],
        ],
    ));
    t[0x6A] = Slot::Op(&Template::op_size(
        Form::new(Code::Pushw_imm8, &[Imm8to16]),
        Form::new(Code::Pushd_imm8, &[Imm8to32]),
        Form::new(Code::Pushq_imm8, &[Imm8to64]),
    )
    .flags(DEFAULT_64));
    t[0x6B] = Slot::Op(&sized(
        [Code::Imul_r16_rm16_imm8, Code::Imul_r32_rm32_imm8, Code::Imul_r64_rm64_imm8],
        [
            &[Reg(Gpr16), RegOrMem(Gpr16), Imm8to16],
            &[Reg(Gpr32), RegOrMem(Gpr32), Imm8to32],
            &[Reg(Gpr64), RegOrMem(Gpr64), Imm8to64],
        ],
    ));

    // Jcc rel8
    t[0x70] = Slot::Op(&jcc_rel8([Code::Jo_rel8_16, Code::Jo_rel8_32, Code::Jo_rel8_64]));
    t[0x71] = Slot::Op(&jcc_rel8([Code::Jno_rel8_16, Code::Jno_rel8_32, Code::Jno_rel8_64]));
    t[0x72] = Slot::Op(&jcc_rel8([Code::Jb_rel8_16, Code::Jb_rel8_32, Code::Jb_rel8_64]));
    t[0x73] = Slot::Op(&jcc_rel8([Code::Jae_rel8_16, Code::Jae_rel8_32, Code::Jae_rel8_64]));
    t[0x74] = Slot::Op(&jcc_rel8([Code::Je_rel8_16, Code::Je_rel8_32, Code::Je_rel8_64]));
    t[0x75] = Slot::Op(&jcc_rel8([Code::Jne_rel8_16, Code::Jne_rel8_32, Code::Jne_rel8_64]));
    t[0x76] = Slot::Op(&jcc_rel8([Code::Jbe_rel8_16, Code::Jbe_rel8_32, Code::Jbe_rel8_64]));
    t[0x77] = Slot::Op(&jcc_rel8([Code::Ja_rel8_16, Code::Ja_rel8_32, Code::Ja_rel8_64]));
    t[0x78] = Slot::Op(&jcc_rel8([Code::Js_rel8_16, Code::Js_rel8_32, Code::Js_rel8_64]));
    t[0x79] = Slot::Op(&jcc_rel8([Code::Jns_rel8_16, Code::Jns_rel8_32, Code::Jns_rel8_64]));
    t[0x7A] = Slot::Op(&jcc_rel8([Code::Jp_rel8_16, Code::Jp_rel8_32, Code::Jp_rel8_64]));
    t[0x7B] = Slot::Op(&jcc_rel8([Code::Jnp_rel8_16, Code::Jnp_rel8_32, Code::Jnp_rel8_64]));
    t[0x7C] = Slot::Op(&jcc_rel8([Code::Jl_rel8_16, Code::Jl_rel8_32, Code::Jl_rel8_64]));
    t[0x7D] = Slot::Op(&jcc_rel8([Code::Jge_rel8_16, Code::Jge_rel8_32, Code::Jge_rel8_64]));
    t[0x7E] = Slot::Op(&jcc_rel8([Code::Jle_rel8_16, Code::Jle_rel8_32, Code::Jle_rel8_64]));
    t[0x7F] = Slot::Op(&jcc_rel8([Code::Jg_rel8_16, Code::Jg_rel8_32, Code::Jg_rel8_64]));

    // Group 1
    t[0x80] = Slot::Group(&[
        Slot::Op(&byte(Code::Add_rm8_imm8, EB_IB).flags(LOCK)),
        Slot::Op(&byte(Code::Or_rm8_imm8, EB_IB).flags(LOCK)),
        Slot::Op(&byte(Code::Adc_rm8_imm8, EB_IB).flags(LOCK)),
        Slot::Op(&byte(Code::Sbb_rm8_imm8, EB_IB).flags(LOCK)),
        Slot::Op(&byte(Code::And_rm8_imm8, EB_IB).flags(LOCK)),
        Slot::Op(&byte(Code::Sub_rm8_imm8, EB_IB).flags(LOCK)),
        Slot::Op(&byte(Code::Xor_rm8_imm8, EB_IB).flags(LOCK)),
        Slot::Op(&byte(Code::Cmp_rm8_imm8, EB_IB)),
    ]);
    t[0x81] = Slot::Group(&[
        Slot::Op(&sized([Code::Add_rm16_imm16, Code::Add_rm32_imm32, Code::Add_rm64_imm32], E_IZ).flags(LOCK)),
        Slot::Op(&sized([Code::Or_rm16_imm16, Code::Or_rm32_imm32, Code::Or_rm64_imm32], E_IZ).flags(LOCK)),
        Slot::Op(&sized([Code::Adc_rm16_imm16, Code::Adc_rm32_imm32, Code::Adc_rm64_imm32], E_IZ).flags(LOCK)),
        Slot::Op(&sized([Code::Sbb_rm16_imm16, Code::Sbb_rm32_imm32, Code::Sbb_rm64_imm32], E_IZ).flags(LOCK)),
        Slot::Op(&sized([Code::And_rm16_imm16, Code::And_rm32_imm32, Code::And_rm64_imm32], E_IZ).flags(LOCK)),
        Slot::Op(&sized([Code::Sub_rm16_imm16, Code::Sub_rm32_imm32, Code::Sub_rm64_imm32], E_IZ).flags(LOCK)),
        Slot::Op(&sized([Code::Xor_rm16_imm16, Code::Xor_rm32_imm32, Code::Xor_rm64_imm32], E_IZ).flags(LOCK)),
        Slot::Op(&sized([Code::Cmp_rm16_imm16, Code::Cmp_rm32_imm32, Code::Cmp_rm64_imm32], E_IZ)),
    ]);
    t[0x82] = Slot::Group(&[
        Slot::Op(&byte(Code::Add_rm8_imm8_82, EB_IB).flags(LOCK.union(NO_64))),
        Slot::Op(&byte(Code::Or_rm8_imm8_82, EB_IB).flags(LOCK.union(NO_64))),
        Slot::Op(&byte(Code::Adc_rm8_imm8_82, EB_IB).flags(LOCK.union(NO_64))),
        Slot::Op(&byte(Code::Sbb_rm8_imm8_82, EB_IB).flags(LOCK.union(NO_64))),
        Slot::Op(&byte(Code::And_rm8_imm8_82, EB_IB).flags(LOCK.union(NO_64))),
        Slot::Op(&byte(Code::Sub_rm8_imm8_82, EB_IB).flags(LOCK.union(NO_64))),
        Slot::Op(&byte(Code::Xor_rm8_imm8_82, EB_IB).flags(LOCK.union(NO_64))),
        Slot::Op(&byte(Code::Cmp_rm8_imm8_82, EB_IB).flags(NO_64)),
    ]);
    t[0x83] = Slot::Group(&[
        Slot::Op(&sized([Code::Add_rm16_imm8, Code::Add_rm32_imm8, Code::Add_rm64_imm8], E_IB).flags(LOCK)),
        Slot::Op(&sized([Code::Or_rm16_imm8, Code::Or_rm32_imm8, Code::Or_rm64_imm8], E_IB).flags(LOCK)),
        Slot::Op(&sized([Code::Adc_rm16_imm8, Code::Adc_rm32_imm8, Code::Adc_rm64_imm8], E_IB).flags(LOCK)),
        Slot::Op(&sized([Code::Sbb_rm16_imm8, Code::Sbb_rm32_imm8, Code::Sbb_rm64_imm8], E_IB).flags(LOCK)),
        Slot::Op(&sized([Code::And_rm16_imm8, Code::And_rm32_imm8, Code::And_rm64_imm8], E_IB).flags(LOCK)),
        Slot::Op(&sized([Code::Sub_rm16_imm8, Code::Sub_rm32_imm8, Code::Sub_rm64_imm8], E_IB).flags(LOCK)),
        Slot::Op(&sized([Code::Xor_rm16_imm8, Code::Xor_rm32_imm8, Code::Xor_rm64_imm8], E_IB).flags(LOCK)),
        Slot::Op(&sized([Code::Cmp_rm16_imm8, Code::Cmp_rm32_imm8, Code::Cmp_rm64_imm8], E_IB)),
    ]);

    // TEST/XCHG/MOV
    t[0x84] = Slot::Op(&byte(Code::Test_rm8_r8, EB_GB));
    t[0x85] = Slot::Op(&sized([Code::Test_rm16_r16, Code::Test_rm32_r32, Code::Test_rm64_r64], E_G));
    t[0x86] = Slot::Op(&byte(Code::Xchg_rm8_r8, EB_GB).flags(LOCK));
    t[0x87] = Slot::Op(&sized([Code::Xchg_rm16_r16, Code::Xchg_rm32_r32, Code::Xchg_rm64_r64], E_G).flags(LOCK));
    t[0x88] = Slot::Op(&byte(Code::Mov_rm8_r8, EB_GB));
    t[0x89] = Slot::Op(&sized([Code::Mov_rm16_r16, Code::Mov_rm32_r32, Code::Mov_rm64_r64], E_G));
    t[0x8A] = Slot::Op(&byte(Code::Mov_r8_rm8, GB_EB));
    t[0x8B] = Slot::Op(&sized([Code::Mov_r16_rm16, Code::Mov_r32_rm32, Code::Mov_r64_rm64], G_E));
    t[0x8C] = Slot::Op(&Template::op_size(
        Form::new(Code::Mov_rm16_Sreg, &[RegOrMem(Gpr16), Reg(Segment)]).mem(MemorySize::UInt16),
        Form::new(Code::Mov_r32m16_Sreg, &[RegOrMem(Gpr32), Reg(Segment)]).mem(MemorySize::UInt16),
        Form::new(Code::Mov_r64m16_Sreg, &[RegOrMem(Gpr64), Reg(Segment)]).mem(MemorySize::UInt16),
    ));
    t[0x8D] = Slot::Op(&Template::op_size(
        Form::new(Code::Lea_r16_m, &[Reg(Gpr16), Mem]),
        Form::new(Code::Lea_r32_m, &[Reg(Gpr32), Mem]),
        Form::new(Code::Lea_r64_m, &[Reg(Gpr64), Mem]),
    ));
    t[0x8E] = Slot::Op(&Template::op_size(
        Form::new(Code::Mov_Sreg_rm16, &[Reg(Segment), RegOrMem(Gpr16)]).mem(MemorySize::UInt16),
        Form::new(Code::Mov_Sreg_r32m16, &[Reg(Segment), RegOrMem(Gpr32)]).mem(MemorySize::UInt16),
        Form::new(Code::Mov_Sreg_r64m16, &[Reg(Segment), RegOrMem(Gpr64)]).mem(MemorySize::UInt16),
    ));
    t[0x8F] = Slot::Group(&[
        Slot::Op(&sized([Code::Pop_rm16, Code::Pop_rm32, Code::Pop_rm64], E).flags(DEFAULT_64)),
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
    ]);

    // NOP/PAUSE, or XCHG r8,rAX with REX.B
    t[0x90] = Slot::RexB {
        plain: &Slot::Mandatory(&[
            Slot::Op(&NOP),
            Slot::Op(&NOP),
            Slot::Op(&simple(Code::Pause)),
            Slot::Op(&NOP),
        ]),
        extended: &Slot::Op(&XCHG_R_ACC),
    };
    t[0x91] = Slot::Op(&XCHG_R_ACC);
    t[0x92] = Slot::Op(&XCHG_R_ACC);
    t[0x93] = Slot::Op(&XCHG_R_ACC);
    t[0x94] = Slot::Op(&XCHG_R_ACC);
    t[0x95] = Slot::Op(&XCHG_R_ACC);
    t[0x96] = Slot::Op(&XCHG_R_ACC);
    t[0x97] = Slot::Op(&XCHG_R_ACC);
    t[0x98] = Slot::Op(&sized([Code::Cbw, Code::Cwde, Code::Cdqe], NONE));
    t[0x99] = Slot::Op(&sized([Code::Cwd, Code::Cdq, Code::Cqo], NONE));
    t[0x9A] = Slot::Op(&Template::op_size(
        Form::new(Code::Call_ptr1616, &[Ptr16_16]),
        Form::new(Code::Call_ptr1632, &[Ptr16_32]),
        Form::INVALID,
    )
    .flags(NO_64));

    // MOV moffs
    t[0xA0] = Slot::Op(&byte(Code::Mov_AL_moffs8, &[Fixed(Register::AL), Moffs]));
    t[0xA1] = Slot::Op(&sized(
        [Code::Mov_AX_moffs16, Code::Mov_EAX_moffs32, Code::Mov_RAX_moffs64],
        [&[Fixed(Register::AX), Moffs], &[Fixed(Register::EAX), Moffs], &[Fixed(Register::RAX), Moffs]],
    ));
    t[0xA2] = Slot::Op(&byte(Code::Mov_moffs8_AL, &[Moffs, Fixed(Register::AL)]));
    t[0xA3] = Slot::Op(&sized(
        [Code::Mov_moffs16_AX, Code::Mov_moffs32_EAX, Code::Mov_moffs64_RAX],
        [&[Moffs, Fixed(Register::AX)], &[Moffs, Fixed(Register::EAX)], &[Moffs, Fixed(Register::RAX)]],
    ));
    t[0xA8] = Slot::Op(&byte(Code::Test_AL_imm8, AL_IB));
    t[0xA9] = Slot::Op(&sized([Code::Test_AX_imm16, Code::Test_EAX_imm32, Code::Test_RAX_imm32], ACC_IZ));

    // MOV r, imm
    t[0xB0] = Slot::Op(&MOV_R8_IMM);
    t[0xB1] = Slot::Op(&MOV_R8_IMM);
    t[0xB2] = Slot::Op(&MOV_R8_IMM);
    t[0xB3] = Slot::Op(&MOV_R8_IMM);
    t[0xB4] = Slot::Op(&MOV_R8_IMM);
    t[0xB5] = Slot::Op(&MOV_R8_IMM);
    t[0xB6] = Slot::Op(&MOV_R8_IMM);
    t[0xB7] = Slot::Op(&MOV_R8_IMM);
    t[0xB8] = Slot::Op(&MOV_R_IMM);
    t[0xB9] = Slot::Op(&MOV_R_IMM);
    t[0xBA] = Slot::Op(&MOV_R_IMM);
    t[0xBB] = Slot::Op(&MOV_R_IMM);
    t[0xBC] = Slot::Op(&MOV_R_IMM);
    t[0xBD] = Slot::Op(&MOV_R_IMM);
    t[0xBE] = Slot::Op(&MOV_R_IMM);
    t[0xBF] = Slot::Op(&MOV_R_IMM);

    t[0xC2] = Slot::Op(&Template::op_size(
        Form::new(Code::Retnw_imm16, &[Imm16]),
        Form::new(Code::Retnd_imm16, &[Imm16]),
        Form::new(Code::Retnq_imm16, &[Imm16]),
    )
    .flags(DEFAULT_64));
    t[0xC3] = Slot::Op(&Template::op_size(
        Form::new(Code::Retnw, &[]),
        Form::new(Code::Retnd, &[]),
        Form::new(Code::Retnq, &[]),
    )
    .flags(DEFAULT_64));
    t[0xC4] = Slot::Op(&Template::op_size(
        Form::new(Code::Les_r16_m1616, &[Reg(Gpr16), Mem]).mem(MemorySize::SegPtr16),
        Form::new(Code::Les_r32_m1632, &[Reg(Gpr32), Mem]).mem(MemorySize::SegPtr32),
        Form::INVALID,
    )
    .flags(NO_64));
    t[0xC5] = Slot::Op(&Template::op_size(
        Form::new(Code::Lds_r16_m1616, &[Reg(Gpr16), Mem]).mem(MemorySize::SegPtr16),
        Form::new(Code::Lds_r32_m1632, &[Reg(Gpr32), Mem]).mem(MemorySize::SegPtr32),
        Form::INVALID,
    )
    .flags(NO_64));
    t[0xC6] = Slot::Group(&[
        Slot::Op(&byte(Code::Mov_rm8_imm8, EB_IB)),
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0xC7] = Slot::Group(&[
        Slot::Op(&sized([Code::Mov_rm16_imm16, Code::Mov_rm32_imm32, Code::Mov_rm64_imm32], E_IZ)),
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0xC8] = Slot::Op(&Template::op_size(
        Form::new(Code::Enterw_imm16_imm8, &[Imm16, Imm8_2nd]),
        Form::new(Code::Enterd_imm16_imm8, &[Imm16, Imm8_2nd]),
        Form::new(Code::Enterq_imm16_imm8, &[Imm16, Imm8_2nd]),
    )
    .flags(DEFAULT_64));
    t[0xCC] = Slot::Op(&simple(Code::Int3));
    t[0xCD] = Slot::Op(&Template::one(Form::new(Code::Int_imm8, &[Imm8])));
    t[0xCE] = Slot::Op(&simple(Code::Into).flags(NO_64));

    // CALL/JMP
    t[0xE8] = Slot::Op(&jcc_rel32([Code::Call_rel16, Code::Call_rel32_32, Code::Call_rel32_64]));
    t[0xE9] = Slot::Op(&jcc_rel32([Code::Jmp_rel16, Code::Jmp_rel32_32, Code::Jmp_rel32_64]));
    t[0xEA] = Slot::Op(&Template::op_size(
        Form::new(Code::Jmp_ptr1616, &[Ptr16_16]),
        Form::new(Code::Jmp_ptr1632, &[Ptr16_32]),
        Form::INVALID,
    )
    .flags(NO_64));
    t[0xEB] = Slot::Op(&jcc_rel8([Code::Jmp_rel8_16, Code::Jmp_rel8_32, Code::Jmp_rel8_64]));

    t[0xF4] = Slot::Op(&simple(Code::Hlt));
    t[0xF5] = Slot::Op(&simple(Code::Cmc));

    // Group 3
    t[0xF6] = Slot::Group(&[
        Slot::Op(&byte(Code::Test_rm8_imm8, EB_IB)),
        Slot::Op(&byte(Code::Test_rm8_imm8, EB_IB)),
        Slot::Op(&byte(Code::Not_rm8, EB).flags(LOCK)),
        Slot::Op(&byte(Code::Neg_rm8, EB).flags(LOCK)),
        Slot::Op(&byte(Code::Mul_rm8, EB)),
        Slot::Op(&byte(Code::Imul_rm8, EB)),
        Slot::Op(&byte(Code::Div_rm8, EB)),
        Slot::Op(&byte(Code::Idiv_rm8, EB)),
    ]);
    t[0xF7] = Slot::Group(&[
        Slot::Op(&sized([Code::Test_rm16_imm16, Code::Test_rm32_imm32, Code::Test_rm64_imm32], E_IZ)),
        Slot::Op(&sized([Code::Test_rm16_imm16, Code::Test_rm32_imm32, Code::Test_rm64_imm32], E_IZ)),
        Slot::Op(&sized([Code::Not_rm16, Code::Not_rm32, Code::Not_rm64], E).flags(LOCK)),
        Slot::Op(&sized([Code::Neg_rm16, Code::Neg_rm32, Code::Neg_rm64], E).flags(LOCK)),
        Slot::Op(&sized([Code::Mul_rm16, Code::Mul_rm32, Code::Mul_rm64], E)),
        Slot::Op(&sized([Code::Imul_rm16, Code::Imul_rm32, Code::Imul_rm64], E)),
        Slot::Op(&sized([Code::Div_rm16, Code::Div_rm32, Code::Div_rm64], E)),
        Slot::Op(&sized([Code::Idiv_rm16, Code::Idiv_rm32, Code::Idiv_rm64], E)),
    ]);

    t[0xF8] = Slot::Op(&simple(Code::Clc));
    t[0xF9] = Slot::Op(&simple(Code::Stc));
    t[0xFA] = Slot::Op(&simple(Code::Cli));
    t[0xFB] = Slot::Op(&simple(Code::Sti));
    t[0xFC] = Slot::Op(&simple(Code::Cld));
    t[0xFD] = Slot::Op(&simple(Code::Std));

    // Group 4
    t[0xFE] = Slot::Group(&[
        Slot::Op(&byte(Code::Inc_rm8, EB).flags(LOCK)),
        Slot::Op(&byte(Code::Dec_rm8, EB).flags(LOCK)),
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    // Group 5
    t[0xFF] = Slot::Group(&[
        Slot::Op(&sized([Code::Inc_rm16, Code::Inc_rm32, Code::Inc_rm64], E).flags(LOCK)),
        Slot::Op(&sized([Code::Dec_rm16, Code::Dec_rm32, Code::Dec_rm64], E).flags(LOCK)),
        Slot::Op(&sized([Code::Call_rm16, Code::Call_rm32, Code::Call_rm64], E).flags(DEFAULT_64)),
        INVALID_SLOT,
        Slot::Op(&sized([Code::Jmp_rm16, Code::Jmp_rm32, Code::Jmp_rm64], E).flags(DEFAULT_64)),
        INVALID_SLOT,
        Slot::Op(&sized([Code::Push_rm16, Code::Push_rm32, Code::Push_rm64], E).flags(DEFAULT_64)),
        INVALID_SLOT,
    ]);

    t
};

const INC_R: Template = sized_no64([Code::Inc_r16, Code::Inc_r32], Z);
const DEC_R: Template = sized_no64([Code::Dec_r16, Code::Dec_r32], Z);
const PUSH_R: Template = sized([Code::Push_r16, Code::Push_r32, Code::Push_r64], Z).flags(DEFAULT_64);
const POP_R: Template = sized([Code::Pop_r16, Code::Pop_r32, Code::Pop_r64], Z).flags(DEFAULT_64);
const NOP: Template = sized([Code::Nopw, Code::Nopd, Code::Nopq], NONE);
const XCHG_R_ACC: Template = sized(
    [Code::Xchg_r16_AX, Code::Xchg_r32_EAX, Code::Xchg_r64_RAX],
    [
        &[OpcodeReg(Gpr16), Fixed(Register::AX)],
        &[OpcodeReg(Gpr32), Fixed(Register::EAX)],
        &[OpcodeReg(Gpr64), Fixed(Register::RAX)],
    ],
);
const MOV_R8_IMM: Template = byte(Code::Mov_r8_imm8, &[OpcodeReg(Gpr8), Imm8]);
const MOV_R_IMM: Template = sized(
    [Code::Mov_r16_imm16, Code::Mov_r32_imm32, Code::Mov_r64_imm64],
    [&[OpcodeReg(Gpr16), Imm16], &[OpcodeReg(Gpr32), Imm32], &[OpcodeReg(Gpr64), Imm64]],
);

/// Two-byte (0F xx) opcode table.
pub static TWO_BYTE: [Slot; 256] = {
    use MemorySize::*;
    let mut t = [INVALID_SLOT; 256];

    t[0x05] = Slot::Op(&simple(Code::Syscall));
    t[0x0B] = Slot::Op(&simple(Code::Ud2));

    // SSE moves
    t[0x10] = Slot::Mandatory(&[
        Slot::Op(&sse(Code::Movups_xmm_xmmm128, Packed128_Float32)),
        Slot::Op(&sse(Code::Movupd_xmm_xmmm128, Packed128_Float64)),
        Slot::Op(&sse(Code::Movss_xmm_xmmm32, Float32)),
        Slot::Op(&sse(Code::Movsd_xmm_xmmm64, Float64)),
    ]);
    t[0x11] = Slot::Mandatory(&[
        Slot::Op(&sse_store(Code::Movups_xmmm128_xmm, Packed128_Float32)),
        Slot::Op(&sse_store(Code::Movupd_xmmm128_xmm, Packed128_Float64)),
        Slot::Op(&sse_store(Code::Movss_xmmm32_xmm, Float32)),
        Slot::Op(&sse_store(Code::Movsd_xmmm64_xmm, Float64)),
    ]);
    t[0x1F] = Slot::Op(&sized([Code::Nop_rm16, Code::Nop_rm32, Code::Nop_rm64], E));
    t[0x28] = Slot::Mandatory(&[
        Slot::Op(&sse(Code::Movaps_xmm_xmmm128, Packed128_Float32)),
        Slot::Op(&sse(Code::Movapd_xmm_xmmm128, Packed128_Float64)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x29] = Slot::Mandatory(&[
        Slot::Op(&sse_store(Code::Movaps_xmmm128_xmm, Packed128_Float32)),
        Slot::Op(&sse_store(Code::Movapd_xmmm128_xmm, Packed128_Float64)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x31] = Slot::Op(&simple(Code::Rdtsc));

    // SSE arithmetic
    t[0x58] = Slot::Mandatory(&[
        Slot::Op(&sse(Code::Addps_xmm_xmmm128, Packed128_Float32)),
        Slot::Op(&sse(Code::Addpd_xmm_xmmm128, Packed128_Float64)),
        Slot::Op(&sse(Code::Addss_xmm_xmmm32, Float32)),
        Slot::Op(&sse(Code::Addsd_xmm_xmmm64, Float64)),
    ]);
    t[0x59] = Slot::Mandatory(&[
        Slot::Op(&sse(Code::Mulps_xmm_xmmm128, Packed128_Float32)),
        Slot::Op(&sse(Code::Mulpd_xmm_xmmm128, Packed128_Float64)),
        Slot::Op(&sse(Code::Mulss_xmm_xmmm32, Float32)),
        Slot::Op(&sse(Code::Mulsd_xmm_xmmm64, Float64)),
    ]);

    // Unpack/pack/compare, MMX without a prefix and SSE2 with 66
    t[0x60] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Punpcklbw_mm_mmm32, Packed32_Int8)),
        Slot::Op(&sse(Code::Punpcklbw_xmm_xmmm128, Packed128_Int8)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x61] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Punpcklwd_mm_mmm32, Packed32_Int16)),
        Slot::Op(&sse(Code::Punpcklwd_xmm_xmmm128, Packed128_Int16)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x62] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Punpckldq_mm_mmm32, UInt32)),
        Slot::Op(&sse(Code::Punpckldq_xmm_xmmm128, Packed128_Int32)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x63] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Packsswb_mm_mmm64, Packed64_Int16)),
        Slot::Op(&sse(Code::Packsswb_xmm_xmmm128, Packed128_Int16)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x64] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Pcmpgtb_mm_mmm64, Packed64_Int8)),
        Slot::Op(&sse(Code::Pcmpgtb_xmm_xmmm128, Packed128_Int8)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x65] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Pcmpgtw_mm_mmm64, Packed64_Int16)),
        Slot::Op(&sse(Code::Pcmpgtw_xmm_xmmm128, Packed128_Int16)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x66] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Pcmpgtd_mm_mmm64, Packed64_Int32)),
        Slot::Op(&sse(Code::Pcmpgtd_xmm_xmmm128, Packed128_Int32)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x67] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Packuswb_mm_mmm64, Packed64_Int16)),
        Slot::Op(&sse(Code::Packuswb_xmm_xmmm128, Packed128_Int16)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x68] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Punpckhbw_mm_mmm64, Packed64_Int8)),
        Slot::Op(&sse(Code::Punpckhbw_xmm_xmmm128, Packed128_Int8)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x69] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Punpckhwd_mm_mmm64, Packed64_Int16)),
        Slot::Op(&sse(Code::Punpckhwd_xmm_xmmm128, Packed128_Int16)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x6A] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Punpckhdq_mm_mmm64, Packed64_Int32)),
        Slot::Op(&sse(Code::Punpckhdq_xmm_xmmm128, Packed128_Int32)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x6B] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Packssdw_mm_mmm64, Packed64_Int32)),
        Slot::Op(&sse(Code::Packssdw_xmm_xmmm128, Packed128_Int32)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x6C] = Slot::Mandatory(&[
        INVALID_SLOT,
        Slot::Op(&sse(Code::Punpcklqdq_xmm_xmmm128, Packed128_Int64)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x6D] = Slot::Mandatory(&[
        INVALID_SLOT,
        Slot::Op(&sse(Code::Punpckhqdq_xmm_xmmm128, Packed128_Int64)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);

    // MOVD/MOVQ
    t[0x6E] = Slot::Mandatory(&[
        Slot::Op(&Template::w(
            Form::new(Code::Movd_mm_rm32, &[Reg(Mmx), RegOrMem(Gpr32)]).mem(UInt32),
            Form::new(Code::Movq_mm_rm64, &[Reg(Mmx), RegOrMem(Gpr64)]).mem(UInt64),
        )),
        Slot::Op(&Template::w(
            Form::new(Code::Movd_xmm_rm32, &[Reg(Xmm), RegOrMem(Gpr32)]).mem(UInt32),
            Form::new(Code::Movq_xmm_rm64, &[Reg(Xmm), RegOrMem(Gpr64)]).mem(UInt64),
        )),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0x6F] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Movq_mm_mmm64, UInt64)),
        Slot::Op(&sse(Code::Movdqa_xmm_xmmm128, UInt128)),
        Slot::Op(&sse(Code::Movdqu_xmm_xmmm128, UInt128)),
        INVALID_SLOT,
    ]);

    // Shift by immediate
    t[0x72] = Slot::Group(&[
        INVALID_SLOT,
        INVALID_SLOT,
        Slot::Mandatory(&[
            Slot::Op(&Template::one(Form::new(Code::Psrld_mm_imm8, &[RmReg(Mmx), Imm8]))),
            Slot::Op(&Template::one(Form::new(Code::Psrld_xmm_imm8, &[RmReg(Xmm), Imm8]))),
            INVALID_SLOT,
            INVALID_SLOT,
        ]),
        INVALID_SLOT,
        Slot::Mandatory(&[
            Slot::Op(&Template::one(Form::new(Code::Psrad_mm_imm8, &[RmReg(Mmx), Imm8]))),
            Slot::Op(&Template::one(Form::new(Code::Psrad_xmm_imm8, &[RmReg(Xmm), Imm8]))),
            INVALID_SLOT,
            INVALID_SLOT,
        ]),
        INVALID_SLOT,
        Slot::Mandatory(&[
            Slot::Op(&Template::one(Form::new(Code::Pslld_mm_imm8, &[RmReg(Mmx), Imm8]))),
            Slot::Op(&Template::one(Form::new(Code::Pslld_xmm_imm8, &[RmReg(Xmm), Imm8]))),
            INVALID_SLOT,
            INVALID_SLOT,
        ]),
        INVALID_SLOT,
    ]);

    t[0x7E] = Slot::Mandatory(&[
        Slot::Op(&Template::w(
            Form::new(Code::Movd_rm32_mm, &[RegOrMem(Gpr32), Reg(Mmx)]).mem(UInt32),
            Form::new(Code::Movq_rm64_mm, &[RegOrMem(Gpr64), Reg(Mmx)]).mem(UInt64),
        )),
        Slot::Op(&Template::w(
            Form::new(Code::Movd_rm32_xmm, &[RegOrMem(Gpr32), Reg(Xmm)]).mem(UInt32),
            Form::new(Code::Movq_rm64_xmm, &[RegOrMem(Gpr64), Reg(Xmm)]).mem(UInt64),
        )),
        Slot::Op(&sse(Code::Movq_xmm_xmmm64, UInt64)),
        INVALID_SLOT,
    ]);
    t[0x7F] = Slot::Mandatory(&[
        Slot::Op(&Template::one(Form::new(Code::Movq_mmm64_mm, &[RegOrMem(Mmx), Reg(Mmx)]).mem(UInt64))),
        Slot::Op(&sse_store(Code::Movdqa_xmmm128_xmm, UInt128)),
        Slot::Op(&sse_store(Code::Movdqu_xmmm128_xmm, UInt128)),
        INVALID_SLOT,
    ]);

    // Jcc rel16/rel32
    t[0x80] = Slot::Op(&jcc_rel32([Code::Jo_rel16, Code::Jo_rel32_32, Code::Jo_rel32_64]));
    t[0x81] = Slot::Op(&jcc_rel32([Code::Jno_rel16, Code::Jno_rel32_32, Code::Jno_rel32_64]));
    t[0x82] = Slot::Op(&jcc_rel32([Code::Jb_rel16, Code::Jb_rel32_32, Code::Jb_rel32_64]));
    t[0x83] = Slot::Op(&jcc_rel32([Code::Jae_rel16, Code::Jae_rel32_32, Code::Jae_rel32_64]));
    t[0x84] = Slot::Op(&jcc_rel32([Code::Je_rel16, Code::Je_rel32_32, Code::Je_rel32_64]));
    t[0x85] = Slot::Op(&jcc_rel32([Code::Jne_rel16, Code::Jne_rel32_32, Code::Jne_rel32_64]));
    t[0x86] = Slot::Op(&jcc_rel32([Code::Jbe_rel16, Code::Jbe_rel32_32, Code::Jbe_rel32_64]));
    t[0x87] = Slot::Op(&jcc_rel32([Code::Ja_rel16, Code::Ja_rel32_32, Code::Ja_rel32_64]));
    t[0x88] = Slot::Op(&jcc_rel32([Code::Js_rel16, Code::Js_rel32_32, Code::Js_rel32_64]));
    t[0x89] = Slot::Op(&jcc_rel32([Code::Jns_rel16, Code::Jns_rel32_32, Code::Jns_rel32_64]));
    t[0x8A] = Slot::Op(&jcc_rel32([Code::Jp_rel16, Code::Jp_rel32_32, Code::Jp_rel32_64]));
    t[0x8B] = Slot::Op(&jcc_rel32([Code::Jnp_rel16, Code::Jnp_rel32_32, Code::Jnp_rel32_64]));
    t[0x8C] = Slot::Op(&jcc_rel32([Code::Jl_rel16, Code::Jl_rel32_32, Code::Jl_rel32_64]));
    t[0x8D] = Slot::Op(&jcc_rel32([Code::Jge_rel16, Code::Jge_rel32_32, Code::Jge_rel32_64]));
    t[0x8E] = Slot::Op(&jcc_rel32([Code::Jle_rel16, Code::Jle_rel32_32, Code::Jle_rel32_64]));
    t[0x8F] = Slot::Op(&jcc_rel32([Code::Jg_rel16, Code::Jg_rel32_32, Code::Jg_rel32_64]));

    t[0xA2] = Slot::Op(&simple(Code::Cpuid));
    t[0xAF] = Slot::Op(&sized([Code::Imul_r16_rm16, Code::Imul_r32_rm32, Code::Imul_r64_rm64], G_E));
    t[0xB0] = Slot::Op(&byte(Code::Cmpxchg_rm8_r8, EB_GB).flags(LOCK));
    t[0xB1] = Slot::Op(&sized([Code::Cmpxchg_rm16_r16, Code::Cmpxchg_rm32_r32, Code::Cmpxchg_rm64_r64], E_G).flags(LOCK));

    // MOVZX/MOVSX
    t[0xB6] = Slot::Op(&Template::op_size(
        Form::new(Code::Movzx_r16_rm8, &[Reg(Gpr16), RegOrMem(Gpr8)]).mem(UInt8),
        Form::new(Code::Movzx_r32_rm8, &[Reg(Gpr32), RegOrMem(Gpr8)]).mem(UInt8),
        Form::new(Code::Movzx_r64_rm8, &[Reg(Gpr64), RegOrMem(Gpr8)]).mem(UInt8),
    ));
    t[0xB7] = Slot::Op(&Template::op_size(
        Form::new(Code::Movzx_r16_rm16, &[Reg(Gpr16), RegOrMem(Gpr16)]).mem(UInt16),
        Form::new(Code::Movzx_r32_rm16, &[Reg(Gpr32), RegOrMem(Gpr16)]).mem(UInt16),
        Form::new(Code::Movzx_r64_rm16, &[Reg(Gpr64), RegOrMem(Gpr16)]).mem(UInt16),
    ));
    t[0xBE] = Slot::Op(&Template::op_size(
        Form::new(Code::Movsx_r16_rm8, &[Reg(Gpr16), RegOrMem(Gpr8)]).mem(UInt8),
        Form::new(Code::Movsx_r32_rm8, &[Reg(Gpr32), RegOrMem(Gpr8)]).mem(UInt8),
        Form::new(Code::Movsx_r64_rm8, &[Reg(Gpr64), RegOrMem(Gpr8)]).mem(UInt8),
    ));
    t[0xBF] = Slot::Op(&Template::op_size(
        Form::new(Code::Movsx_r16_rm16, &[Reg(Gpr16), RegOrMem(Gpr16)]).mem(UInt16),
        Form::new(Code::Movsx_r32_rm16, &[Reg(Gpr32), RegOrMem(Gpr16)]).mem(UInt16),
        Form::new(Code::Movsx_r64_rm16, &[Reg(Gpr64), RegOrMem(Gpr16)]).mem(UInt16),
    ));

    t[0xC0] = Slot::Op(&byte(Code::Xadd_rm8_r8, EB_GB).flags(LOCK));
    t[0xC1] = Slot::Op(&sized([Code::Xadd_rm16_r16, Code::Xadd_rm32_r32, Code::Xadd_rm64_r64], E_G).flags(LOCK));

    t[0xEF] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Pxor_mm_mmm64, UInt64)),
        Slot::Op(&sse(Code::Pxor_xmm_xmmm128, UInt128)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);
    t[0xFE] = Slot::Mandatory(&[
        Slot::Op(&mmx(Code::Paddd_mm_mmm64, Packed64_Int32)),
        Slot::Op(&sse(Code::Paddd_xmm_xmmm128, Packed128_Int32)),
        INVALID_SLOT,
        INVALID_SLOT,
    ]);

    t
};

/// Returns the opcode table for an encoding family and map, if one exists.
pub fn table(kind: EncodingKind, map: OpcodeMap) -> Option<&'static [Slot; 256]> {
    let table = match (kind, map) {
        (EncodingKind::Legacy, OpcodeMap::Primary) => &ONE_BYTE,
        (EncodingKind::Legacy, OpcodeMap::Map0F) => &TWO_BYTE,
        (EncodingKind::Legacy, OpcodeMap::Map0F38) => &opcodes_0f38::LEGACY,
        (EncodingKind::Legacy, OpcodeMap::Map0F3A) => &opcodes_0f3a::LEGACY,
        (EncodingKind::Vex, OpcodeMap::Map0F) => &opcodes_vex::VEX_0F,
        (EncodingKind::Vex, OpcodeMap::Map0F38) => &opcodes_0f38::VEX,
        (EncodingKind::Vex, OpcodeMap::Map0F3A) => &opcodes_0f3a::VEX,
        (EncodingKind::Evex, OpcodeMap::Map0F) => &opcodes_evex::EVEX_0F,
        (EncodingKind::Evex, OpcodeMap::Map0F38) => &opcodes_0f38::EVEX,
        (EncodingKind::Evex, OpcodeMap::Map0F3A) => &opcodes_0f3a::EVEX,
        (EncodingKind::Xop, OpcodeMap::Xop8) => &opcodes_xop::XOP8,
        (EncodingKind::Xop, OpcodeMap::Xop9) => &opcodes_xop::XOP9,
        (EncodingKind::Xop, OpcodeMap::XopA) => &opcodes_xop::XOPA,
        _ => return None,
    };
    Some(table)
}
