//! Instruction form identities.
//!
//! One variant per concrete form: mnemonic, operand shapes and encoding family.
//! The suffix lists the operands left to right (`rm32` register or memory,
//! `xmmm128` XMM register or 128-bit memory, `k1z` opmask with optional zeroing,
//! `b32` embedded dword broadcast, `er`/`sae` static rounding or suppressed
//! exceptions, `vm32x` VSIB with XMM dword indices).

use crate::EncodingKind;

/// Decoded instruction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(non_camel_case_types)]
#[repr(u16)]
pub enum Code {
    /// Not a valid instruction.
    #[default]
    INVALID,
    // Arithmetic and logic, opcodes 00-3D
    Add_rm8_r8,
    Add_rm16_r16,
    Add_rm32_r32,
    Add_rm64_r64,
    Add_r8_rm8,
    Add_r16_rm16,
    Add_r32_rm32,
    Add_r64_rm64,
    Add_AL_imm8,
    Add_AX_imm16,
    Add_EAX_imm32,
    Add_RAX_imm32,
    Or_rm8_r8,
    Or_rm16_r16,
    Or_rm32_r32,
    Or_rm64_r64,
    Or_r8_rm8,
    Or_r16_rm16,
    Or_r32_rm32,
    Or_r64_rm64,
    Or_AL_imm8,
    Or_AX_imm16,
    Or_EAX_imm32,
    Or_RAX_imm32,
    Adc_rm8_r8,
    Adc_rm16_r16,
    Adc_rm32_r32,
    Adc_rm64_r64,
    Adc_r8_rm8,
    Adc_r16_rm16,
    Adc_r32_rm32,
    Adc_r64_rm64,
    Adc_AL_imm8,
    Adc_AX_imm16,
    Adc_EAX_imm32,
    Adc_RAX_imm32,
    Sbb_rm8_r8,
    Sbb_rm16_r16,
    Sbb_rm32_r32,
    Sbb_rm64_r64,
    Sbb_r8_rm8,
    Sbb_r16_rm16,
    Sbb_r32_rm32,
    Sbb_r64_rm64,
    Sbb_AL_imm8,
    Sbb_AX_imm16,
    Sbb_EAX_imm32,
    Sbb_RAX_imm32,
    And_rm8_r8,
    And_rm16_r16,
    And_rm32_r32,
    And_rm64_r64,
    And_r8_rm8,
    And_r16_rm16,
    And_r32_rm32,
    And_r64_rm64,
    And_AL_imm8,
    And_AX_imm16,
    And_EAX_imm32,
    And_RAX_imm32,
    Sub_rm8_r8,
    Sub_rm16_r16,
    Sub_rm32_r32,
    Sub_rm64_r64,
    Sub_r8_rm8,
    Sub_r16_rm16,
    Sub_r32_rm32,
    Sub_r64_rm64,
    Sub_AL_imm8,
    Sub_AX_imm16,
    Sub_EAX_imm32,
    Sub_RAX_imm32,
    Xor_rm8_r8,
    Xor_rm16_r16,
    Xor_rm32_r32,
    Xor_rm64_r64,
    Xor_r8_rm8,
    Xor_r16_rm16,
    Xor_r32_rm32,
    Xor_r64_rm64,
    Xor_AL_imm8,
    Xor_AX_imm16,
    Xor_EAX_imm32,
    Xor_RAX_imm32,
    Cmp_rm8_r8,
    Cmp_rm16_r16,
    Cmp_rm32_r32,
    Cmp_rm64_r64,
    Cmp_r8_rm8,
    Cmp_r16_rm16,
    Cmp_r32_rm32,
    Cmp_r64_rm64,
    Cmp_AL_imm8,
    Cmp_AX_imm16,
    Cmp_EAX_imm32,
    Cmp_RAX_imm32,
    // Group 1, opcodes 80-83
    Add_rm8_imm8,
    Add_rm16_imm16,
    Add_rm32_imm32,
    Add_rm64_imm32,
    Add_rm8_imm8_82,
    Add_rm16_imm8,
    Add_rm32_imm8,
    Add_rm64_imm8,
    Or_rm8_imm8,
    Or_rm16_imm16,
    Or_rm32_imm32,
    Or_rm64_imm32,
    Or_rm8_imm8_82,
    Or_rm16_imm8,
    Or_rm32_imm8,
    Or_rm64_imm8,
    Adc_rm8_imm8,
    Adc_rm16_imm16,
    Adc_rm32_imm32,
    Adc_rm64_imm32,
    Adc_rm8_imm8_82,
    Adc_rm16_imm8,
    Adc_rm32_imm8,
    Adc_rm64_imm8,
    Sbb_rm8_imm8,
    Sbb_rm16_imm16,
    Sbb_rm32_imm32,
    Sbb_rm64_imm32,
    Sbb_rm8_imm8_82,
    Sbb_rm16_imm8,
    Sbb_rm32_imm8,
    Sbb_rm64_imm8,
    And_rm8_imm8,
    And_rm16_imm16,
    And_rm32_imm32,
    And_rm64_imm32,
    And_rm8_imm8_82,
    And_rm16_imm8,
    And_rm32_imm8,
    And_rm64_imm8,
    Sub_rm8_imm8,
    Sub_rm16_imm16,
    Sub_rm32_imm32,
    Sub_rm64_imm32,
    Sub_rm8_imm8_82,
    Sub_rm16_imm8,
    Sub_rm32_imm8,
    Sub_rm64_imm8,
    Xor_rm8_imm8,
    Xor_rm16_imm16,
    Xor_rm32_imm32,
    Xor_rm64_imm32,
    Xor_rm8_imm8_82,
    Xor_rm16_imm8,
    Xor_rm32_imm8,
    Xor_rm64_imm8,
    Cmp_rm8_imm8,
    Cmp_rm16_imm16,
    Cmp_rm32_imm32,
    Cmp_rm64_imm32,
    Cmp_rm8_imm8_82,
    Cmp_rm16_imm8,
    Cmp_rm32_imm8,
    Cmp_rm64_imm8,
    // One-byte map
    Inc_r16,
    Inc_r32,
    Dec_r16,
    Dec_r32,
    Push_r16,
    Push_r32,
    Push_r64,
    Pop_r16,
    Pop_r32,
    Pop_r64,
    Bound_r16_m1616,
    Bound_r32_m3232,
    Pushw_imm16,
    Pushd_imm32,
    Pushq_imm32,
    Pushw_imm8,
    Pushd_imm8,
    Pushq_imm8,
    Imul_r16_rm16_imm16,
    Imul_r32_rm32_imm32,
    Imul_r64_rm64_imm32,
    Imul_r16_rm16_imm8,
    Imul_r32_rm32_imm8,
    Imul_r64_rm64_imm8,
    Test_rm8_r8,
    Test_rm16_r16,
    Test_rm32_r32,
    Test_rm64_r64,
    Xchg_rm8_r8,
    Xchg_rm16_r16,
    Xchg_rm32_r32,
    Xchg_rm64_r64,
    Mov_rm8_r8,
    Mov_rm16_r16,
    Mov_rm32_r32,
    Mov_rm64_r64,
    Mov_r8_rm8,
    Mov_r16_rm16,
    Mov_r32_rm32,
    Mov_r64_rm64,
    Mov_rm16_Sreg,
    Mov_r32m16_Sreg,
    Mov_r64m16_Sreg,
    Mov_Sreg_rm16,
    Mov_Sreg_r32m16,
    Mov_Sreg_r64m16,
    Lea_r16_m,
    Lea_r32_m,
    Lea_r64_m,
    Pop_rm16,
    Pop_rm32,
    Pop_rm64,
    Nopw,
    Nopd,
    Nopq,
    Pause,
    Xchg_r16_AX,
    Xchg_r32_EAX,
    Xchg_r64_RAX,
    Cbw,
    Cwde,
    Cdqe,
    Cwd,
    Cdq,
    Cqo,
    Call_ptr1616,
    Call_ptr1632,
    Jmp_ptr1616,
    Jmp_ptr1632,
    Mov_AL_moffs8,
    Mov_AX_moffs16,
    Mov_EAX_moffs32,
    Mov_RAX_moffs64,
    Mov_moffs8_AL,
    Mov_moffs16_AX,
    Mov_moffs32_EAX,
    Mov_moffs64_RAX,
    Test_AL_imm8,
    Test_AX_imm16,
    Test_EAX_imm32,
    Test_RAX_imm32,
    Mov_r8_imm8,
    Mov_r16_imm16,
    Mov_r32_imm32,
    Mov_r64_imm64,
    Retnw_imm16,
    Retnd_imm16,
    Retnq_imm16,
    Retnw,
    Retnd,
    Retnq,
    Les_r16_m1616,
    Les_r32_m1632,
    Lds_r16_m1616,
    Lds_r32_m1632,
    Mov_rm8_imm8,
    Mov_rm16_imm16,
    Mov_rm32_imm32,
    Mov_rm64_imm32,
    Enterw_imm16_imm8,
    Enterd_imm16_imm8,
    Enterq_imm16_imm8,
    Int3,
    Int_imm8,
    Into,
    Call_rel16,
    Call_rel32_32,
    Call_rel32_64,
    Jmp_rel16,
    Jmp_rel32_32,
    Jmp_rel32_64,
    Jmp_rel8_16,
    Jmp_rel8_32,
    Jmp_rel8_64,
    Hlt,
    Cmc,
    Clc,
    Stc,
    Cli,
    Sti,
    Cld,
    Std,
    // Conditional branches, opcodes 70-7F and 0F 80-8F
    Jo_rel8_16,
    Jo_rel8_32,
    Jo_rel8_64,
    Jo_rel16,
    Jo_rel32_32,
    Jo_rel32_64,
    Jno_rel8_16,
    Jno_rel8_32,
    Jno_rel8_64,
    Jno_rel16,
    Jno_rel32_32,
    Jno_rel32_64,
    Jb_rel8_16,
    Jb_rel8_32,
    Jb_rel8_64,
    Jb_rel16,
    Jb_rel32_32,
    Jb_rel32_64,
    Jae_rel8_16,
    Jae_rel8_32,
    Jae_rel8_64,
    Jae_rel16,
    Jae_rel32_32,
    Jae_rel32_64,
    Je_rel8_16,
    Je_rel8_32,
    Je_rel8_64,
    Je_rel16,
    Je_rel32_32,
    Je_rel32_64,
    Jne_rel8_16,
    Jne_rel8_32,
    Jne_rel8_64,
    Jne_rel16,
    Jne_rel32_32,
    Jne_rel32_64,
    Jbe_rel8_16,
    Jbe_rel8_32,
    Jbe_rel8_64,
    Jbe_rel16,
    Jbe_rel32_32,
    Jbe_rel32_64,
    Ja_rel8_16,
    Ja_rel8_32,
    Ja_rel8_64,
    Ja_rel16,
    Ja_rel32_32,
    Ja_rel32_64,
    Js_rel8_16,
    Js_rel8_32,
    Js_rel8_64,
    Js_rel16,
    Js_rel32_32,
    Js_rel32_64,
    Jns_rel8_16,
    Jns_rel8_32,
    Jns_rel8_64,
    Jns_rel16,
    Jns_rel32_32,
    Jns_rel32_64,
    Jp_rel8_16,
    Jp_rel8_32,
    Jp_rel8_64,
    Jp_rel16,
    Jp_rel32_32,
    Jp_rel32_64,
    Jnp_rel8_16,
    Jnp_rel8_32,
    Jnp_rel8_64,
    Jnp_rel16,
    Jnp_rel32_32,
    Jnp_rel32_64,
    Jl_rel8_16,
    Jl_rel8_32,
    Jl_rel8_64,
    Jl_rel16,
    Jl_rel32_32,
    Jl_rel32_64,
    Jge_rel8_16,
    Jge_rel8_32,
    Jge_rel8_64,
    Jge_rel16,
    Jge_rel32_32,
    Jge_rel32_64,
    Jle_rel8_16,
    Jle_rel8_32,
    Jle_rel8_64,
    Jle_rel16,
    Jle_rel32_32,
    Jle_rel32_64,
    Jg_rel8_16,
    Jg_rel8_32,
    Jg_rel8_64,
    Jg_rel16,
    Jg_rel32_32,
    Jg_rel32_64,
    // Groups 3, 4 and 5, opcodes F6-F7 and FE-FF
    Test_rm8_imm8,
    Test_rm16_imm16,
    Test_rm32_imm32,
    Test_rm64_imm32,
    Not_rm8,
    Not_rm16,
    Not_rm32,
    Not_rm64,
    Neg_rm8,
    Neg_rm16,
    Neg_rm32,
    Neg_rm64,
    Mul_rm8,
    Mul_rm16,
    Mul_rm32,
    Mul_rm64,
    Imul_rm8,
    Imul_rm16,
    Imul_rm32,
    Imul_rm64,
    Div_rm8,
    Div_rm16,
    Div_rm32,
    Div_rm64,
    Idiv_rm8,
    Idiv_rm16,
    Idiv_rm32,
    Idiv_rm64,
    Inc_rm8,
    Dec_rm8,
    Inc_rm16,
    Inc_rm32,
    Inc_rm64,
    Dec_rm16,
    Dec_rm32,
    Dec_rm64,
    Call_rm16,
    Call_rm32,
    Call_rm64,
    Jmp_rm16,
    Jmp_rm32,
    Jmp_rm64,
    Push_rm16,
    Push_rm32,
    Push_rm64,
    // Two and three byte legacy maps
    Syscall,
    Ud2,
    Rdtsc,
    Cpuid,
    Nop_rm16,
    Nop_rm32,
    Nop_rm64,
    Movups_xmm_xmmm128,
    Movupd_xmm_xmmm128,
    Movss_xmm_xmmm32,
    Movsd_xmm_xmmm64,
    Movups_xmmm128_xmm,
    Movupd_xmmm128_xmm,
    Movss_xmmm32_xmm,
    Movsd_xmmm64_xmm,
    Movaps_xmm_xmmm128,
    Movapd_xmm_xmmm128,
    Movaps_xmmm128_xmm,
    Movapd_xmmm128_xmm,
    Addps_xmm_xmmm128,
    Addpd_xmm_xmmm128,
    Addss_xmm_xmmm32,
    Addsd_xmm_xmmm64,
    Mulps_xmm_xmmm128,
    Mulpd_xmm_xmmm128,
    Mulss_xmm_xmmm32,
    Mulsd_xmm_xmmm64,
    Punpcklbw_mm_mmm32,
    Punpcklbw_xmm_xmmm128,
    Punpcklwd_mm_mmm32,
    Punpcklwd_xmm_xmmm128,
    Punpckldq_mm_mmm32,
    Punpckldq_xmm_xmmm128,
    Packsswb_mm_mmm64,
    Packsswb_xmm_xmmm128,
    Pcmpgtb_mm_mmm64,
    Pcmpgtb_xmm_xmmm128,
    Pcmpgtw_mm_mmm64,
    Pcmpgtw_xmm_xmmm128,
    Pcmpgtd_mm_mmm64,
    Pcmpgtd_xmm_xmmm128,
    Packuswb_mm_mmm64,
    Packuswb_xmm_xmmm128,
    Punpckhbw_mm_mmm64,
    Punpckhbw_xmm_xmmm128,
    Punpckhwd_mm_mmm64,
    Punpckhwd_xmm_xmmm128,
    Punpckhdq_mm_mmm64,
    Punpckhdq_xmm_xmmm128,
    Packssdw_mm_mmm64,
    Packssdw_xmm_xmmm128,
    Punpcklqdq_xmm_xmmm128,
    Punpckhqdq_xmm_xmmm128,
    Movd_mm_rm32,
    Movq_mm_rm64,
    Movd_xmm_rm32,
    Movq_xmm_rm64,
    Movd_rm32_mm,
    Movq_rm64_mm,
    Movd_rm32_xmm,
    Movq_rm64_xmm,
    Movq_xmm_xmmm64,
    Movq_mm_mmm64,
    Movdqa_xmm_xmmm128,
    Movdqu_xmm_xmmm128,
    Movq_mmm64_mm,
    Movdqa_xmmm128_xmm,
    Movdqu_xmmm128_xmm,
    Psrld_mm_imm8,
    Psrld_xmm_imm8,
    Psrad_mm_imm8,
    Psrad_xmm_imm8,
    Pslld_mm_imm8,
    Pslld_xmm_imm8,
    Imul_r16_rm16,
    Imul_r32_rm32,
    Imul_r64_rm64,
    Cmpxchg_rm8_r8,
    Cmpxchg_rm16_r16,
    Cmpxchg_rm32_r32,
    Cmpxchg_rm64_r64,
    Movzx_r16_rm8,
    Movzx_r32_rm8,
    Movzx_r64_rm8,
    Movzx_r16_rm16,
    Movzx_r32_rm16,
    Movzx_r64_rm16,
    Movsx_r16_rm8,
    Movsx_r32_rm8,
    Movsx_r64_rm8,
    Movsx_r16_rm16,
    Movsx_r32_rm16,
    Movsx_r64_rm16,
    Xadd_rm8_r8,
    Xadd_rm16_r16,
    Xadd_rm32_r32,
    Xadd_rm64_r64,
    Paddd_mm_mmm64,
    Paddd_xmm_xmmm128,
    Pxor_mm_mmm64,
    Pxor_xmm_xmmm128,
    Pshufb_mm_mmm64,
    Pshufb_xmm_xmmm128,
    Palignr_mm_mmm64_imm8,
    Palignr_xmm_xmmm128_imm8,
    // VEX
    VEX_Vmovups_xmm_xmmm128,
    VEX_Vmovups_ymm_ymmm256,
    VEX_Vmovups_xmmm128_xmm,
    VEX_Vmovups_ymmm256_ymm,
    VEX_Vmovupd_xmm_xmmm128,
    VEX_Vmovupd_ymm_ymmm256,
    VEX_Vmovupd_xmmm128_xmm,
    VEX_Vmovupd_ymmm256_ymm,
    VEX_Vmovaps_xmm_xmmm128,
    VEX_Vmovaps_ymm_ymmm256,
    VEX_Vmovaps_xmmm128_xmm,
    VEX_Vmovaps_ymmm256_ymm,
    VEX_Vmovapd_xmm_xmmm128,
    VEX_Vmovapd_ymm_ymmm256,
    VEX_Vmovapd_xmmm128_xmm,
    VEX_Vmovapd_ymmm256_ymm,
    VEX_Vaddps_xmm_xmm_xmmm128,
    VEX_Vaddps_ymm_ymm_ymmm256,
    VEX_Vaddpd_xmm_xmm_xmmm128,
    VEX_Vaddpd_ymm_ymm_ymmm256,
    VEX_Vaddss_xmm_xmm_xmmm32,
    VEX_Vaddsd_xmm_xmm_xmmm64,
    VEX_Vmulps_xmm_xmm_xmmm128,
    VEX_Vmulps_ymm_ymm_ymmm256,
    VEX_Vmulpd_xmm_xmm_xmmm128,
    VEX_Vmulpd_ymm_ymm_ymmm256,
    VEX_Vmulss_xmm_xmm_xmmm32,
    VEX_Vmulsd_xmm_xmm_xmmm64,
    VEX_Vpunpcklbw_xmm_xmm_xmmm128,
    VEX_Vpunpcklbw_ymm_ymm_ymmm256,
    VEX_Vpunpcklwd_xmm_xmm_xmmm128,
    VEX_Vpunpcklwd_ymm_ymm_ymmm256,
    VEX_Vpunpckldq_xmm_xmm_xmmm128,
    VEX_Vpunpckldq_ymm_ymm_ymmm256,
    VEX_Vpacksswb_xmm_xmm_xmmm128,
    VEX_Vpacksswb_ymm_ymm_ymmm256,
    VEX_Vpcmpgtb_xmm_xmm_xmmm128,
    VEX_Vpcmpgtb_ymm_ymm_ymmm256,
    VEX_Vpcmpgtw_xmm_xmm_xmmm128,
    VEX_Vpcmpgtw_ymm_ymm_ymmm256,
    VEX_Vpcmpgtd_xmm_xmm_xmmm128,
    VEX_Vpcmpgtd_ymm_ymm_ymmm256,
    VEX_Vpackuswb_xmm_xmm_xmmm128,
    VEX_Vpackuswb_ymm_ymm_ymmm256,
    VEX_Vpunpckhbw_xmm_xmm_xmmm128,
    VEX_Vpunpckhbw_ymm_ymm_ymmm256,
    VEX_Vpunpckhwd_xmm_xmm_xmmm128,
    VEX_Vpunpckhwd_ymm_ymm_ymmm256,
    VEX_Vpunpckhdq_xmm_xmm_xmmm128,
    VEX_Vpunpckhdq_ymm_ymm_ymmm256,
    VEX_Vpackssdw_xmm_xmm_xmmm128,
    VEX_Vpackssdw_ymm_ymm_ymmm256,
    VEX_Vpunpcklqdq_xmm_xmm_xmmm128,
    VEX_Vpunpcklqdq_ymm_ymm_ymmm256,
    VEX_Vpunpckhqdq_xmm_xmm_xmmm128,
    VEX_Vpunpckhqdq_ymm_ymm_ymmm256,
    VEX_Vmovd_xmm_rm32,
    VEX_Vmovq_xmm_rm64,
    VEX_Vmovd_rm32_xmm,
    VEX_Vmovq_rm64_xmm,
    VEX_Vmovdqa_xmm_xmmm128,
    VEX_Vmovdqa_ymm_ymmm256,
    VEX_Vmovdqa_xmmm128_xmm,
    VEX_Vmovdqa_ymmm256_ymm,
    VEX_Vmovdqu_xmm_xmmm128,
    VEX_Vmovdqu_ymm_ymmm256,
    VEX_Vmovdqu_xmmm128_xmm,
    VEX_Vmovdqu_ymmm256_ymm,
    VEX_Vpsrld_xmm_xmm_imm8,
    VEX_Vpsrld_ymm_ymm_imm8,
    VEX_Vpsrad_xmm_xmm_imm8,
    VEX_Vpsrad_ymm_ymm_imm8,
    VEX_Vpslld_xmm_xmm_imm8,
    VEX_Vpslld_ymm_ymm_imm8,
    VEX_Vzeroupper,
    VEX_Vzeroall,
    VEX_Vpxor_xmm_xmm_xmmm128,
    VEX_Vpxor_ymm_ymm_ymmm256,
    VEX_Vpaddd_xmm_xmm_xmmm128,
    VEX_Vpaddd_ymm_ymm_ymmm256,
    VEX_Vpshufb_xmm_xmm_xmmm128,
    VEX_Vpshufb_ymm_ymm_ymmm256,
    VEX_Vpgatherdd_xmm_vm32x_xmm,
    VEX_Vpgatherdd_ymm_vm32y_ymm,
    VEX_Vpgatherdq_xmm_vm32x_xmm,
    VEX_Vpgatherdq_ymm_vm32x_ymm,
    VEX_Vpgatherqd_xmm_vm64x_xmm,
    VEX_Vpgatherqd_xmm_vm64y_xmm,
    VEX_Vpgatherqq_xmm_vm64x_xmm,
    VEX_Vpgatherqq_ymm_vm64y_ymm,
    VEX_Vgatherdps_xmm_vm32x_xmm,
    VEX_Vgatherdps_ymm_vm32y_ymm,
    VEX_Vgatherdpd_xmm_vm32x_xmm,
    VEX_Vgatherdpd_ymm_vm32x_ymm,
    VEX_Vgatherqps_xmm_vm64x_xmm,
    VEX_Vgatherqps_xmm_vm64y_xmm,
    VEX_Vgatherqpd_xmm_vm64x_xmm,
    VEX_Vgatherqpd_ymm_vm64y_ymm,
    VEX_Andn_r32_r32_rm32,
    VEX_Andn_r64_r64_rm64,
    VEX_Vpalignr_xmm_xmm_xmmm128_imm8,
    VEX_Vpalignr_ymm_ymm_ymmm256_imm8,
    VEX_Vblendvps_xmm_xmm_xmmm128_xmm,
    VEX_Vblendvps_ymm_ymm_ymmm256_ymm,
    // EVEX
    EVEX_Vmovups_xmm_k1z_xmmm128,
    EVEX_Vmovups_ymm_k1z_ymmm256,
    EVEX_Vmovups_zmm_k1z_zmmm512,
    EVEX_Vmovups_xmmm128_k1z_xmm,
    EVEX_Vmovups_ymmm256_k1z_ymm,
    EVEX_Vmovups_zmmm512_k1z_zmm,
    EVEX_Vmovupd_xmm_k1z_xmmm128,
    EVEX_Vmovupd_ymm_k1z_ymmm256,
    EVEX_Vmovupd_zmm_k1z_zmmm512,
    EVEX_Vmovupd_xmmm128_k1z_xmm,
    EVEX_Vmovupd_ymmm256_k1z_ymm,
    EVEX_Vmovupd_zmmm512_k1z_zmm,
    EVEX_Vaddps_xmm_k1z_xmm_xmmm128b32,
    EVEX_Vaddps_ymm_k1z_ymm_ymmm256b32,
    EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er,
    EVEX_Vaddpd_xmm_k1z_xmm_xmmm128b64,
    EVEX_Vaddpd_ymm_k1z_ymm_ymmm256b64,
    EVEX_Vaddpd_zmm_k1z_zmm_zmmm512b64_er,
    EVEX_Vmaxps_xmm_k1z_xmm_xmmm128b32,
    EVEX_Vmaxps_ymm_k1z_ymm_ymmm256b32,
    EVEX_Vmaxps_zmm_k1z_zmm_zmmm512b32_sae,
    EVEX_Vmaxpd_xmm_k1z_xmm_xmmm128b64,
    EVEX_Vmaxpd_ymm_k1z_ymm_ymmm256b64,
    EVEX_Vmaxpd_zmm_k1z_zmm_zmmm512b64_sae,
    EVEX_Vaddss_xmm_k1z_xmm_xmmm32_er,
    EVEX_Vaddsd_xmm_k1z_xmm_xmmm64_er,
    EVEX_Vmaxss_xmm_k1z_xmm_xmmm32_sae,
    EVEX_Vmaxsd_xmm_k1z_xmm_xmmm64_sae,
    EVEX_Vpunpcklbw_xmm_k1z_xmm_xmmm128,
    EVEX_Vpunpcklbw_ymm_k1z_ymm_ymmm256,
    EVEX_Vpunpcklbw_zmm_k1z_zmm_zmmm512,
    EVEX_Vpunpcklwd_xmm_k1z_xmm_xmmm128,
    EVEX_Vpunpcklwd_ymm_k1z_ymm_ymmm256,
    EVEX_Vpunpcklwd_zmm_k1z_zmm_zmmm512,
    EVEX_Vpunpckldq_xmm_k1z_xmm_xmmm128b32,
    EVEX_Vpunpckldq_ymm_k1z_ymm_ymmm256b32,
    EVEX_Vpunpckldq_zmm_k1z_zmm_zmmm512b32,
    EVEX_Vpacksswb_xmm_k1z_xmm_xmmm128,
    EVEX_Vpacksswb_ymm_k1z_ymm_ymmm256,
    EVEX_Vpacksswb_zmm_k1z_zmm_zmmm512,
    EVEX_Vpcmpgtb_kr_k1_xmm_xmmm128,
    EVEX_Vpcmpgtb_kr_k1_ymm_ymmm256,
    EVEX_Vpcmpgtb_kr_k1_zmm_zmmm512,
    EVEX_Vpcmpgtw_kr_k1_xmm_xmmm128,
    EVEX_Vpcmpgtw_kr_k1_ymm_ymmm256,
    EVEX_Vpcmpgtw_kr_k1_zmm_zmmm512,
    EVEX_Vpcmpgtd_kr_k1_xmm_xmmm128b32,
    EVEX_Vpcmpgtd_kr_k1_ymm_ymmm256b32,
    EVEX_Vpcmpgtd_kr_k1_zmm_zmmm512b32,
    EVEX_Vpackuswb_xmm_k1z_xmm_xmmm128,
    EVEX_Vpackuswb_ymm_k1z_ymm_ymmm256,
    EVEX_Vpackuswb_zmm_k1z_zmm_zmmm512,
    EVEX_Vpunpckhbw_xmm_k1z_xmm_xmmm128,
    EVEX_Vpunpckhbw_ymm_k1z_ymm_ymmm256,
    EVEX_Vpunpckhbw_zmm_k1z_zmm_zmmm512,
    EVEX_Vpunpckhwd_xmm_k1z_xmm_xmmm128,
    EVEX_Vpunpckhwd_ymm_k1z_ymm_ymmm256,
    EVEX_Vpunpckhwd_zmm_k1z_zmm_zmmm512,
    EVEX_Vpunpckhdq_xmm_k1z_xmm_xmmm128b32,
    EVEX_Vpunpckhdq_ymm_k1z_ymm_ymmm256b32,
    EVEX_Vpunpckhdq_zmm_k1z_zmm_zmmm512b32,
    EVEX_Vpackssdw_xmm_k1z_xmm_xmmm128b32,
    EVEX_Vpackssdw_ymm_k1z_ymm_ymmm256b32,
    EVEX_Vpackssdw_zmm_k1z_zmm_zmmm512b32,
    EVEX_Vpunpcklqdq_xmm_k1z_xmm_xmmm128b64,
    EVEX_Vpunpcklqdq_ymm_k1z_ymm_ymmm256b64,
    EVEX_Vpunpcklqdq_zmm_k1z_zmm_zmmm512b64,
    EVEX_Vpunpckhqdq_xmm_k1z_xmm_xmmm128b64,
    EVEX_Vpunpckhqdq_ymm_k1z_ymm_ymmm256b64,
    EVEX_Vpunpckhqdq_zmm_k1z_zmm_zmmm512b64,
    EVEX_Vmovdqa32_xmm_k1z_xmmm128,
    EVEX_Vmovdqa32_ymm_k1z_ymmm256,
    EVEX_Vmovdqa32_zmm_k1z_zmmm512,
    EVEX_Vmovdqa64_xmm_k1z_xmmm128,
    EVEX_Vmovdqa64_ymm_k1z_ymmm256,
    EVEX_Vmovdqa64_zmm_k1z_zmmm512,
    EVEX_Vmovdqu32_xmm_k1z_xmmm128,
    EVEX_Vmovdqu32_ymm_k1z_ymmm256,
    EVEX_Vmovdqu32_zmm_k1z_zmmm512,
    EVEX_Vmovdqu64_xmm_k1z_xmmm128,
    EVEX_Vmovdqu64_ymm_k1z_ymmm256,
    EVEX_Vmovdqu64_zmm_k1z_zmmm512,
    EVEX_Vmovdqa32_xmmm128_k1z_xmm,
    EVEX_Vmovdqa32_ymmm256_k1z_ymm,
    EVEX_Vmovdqa32_zmmm512_k1z_zmm,
    EVEX_Vmovdqa64_xmmm128_k1z_xmm,
    EVEX_Vmovdqa64_ymmm256_k1z_ymm,
    EVEX_Vmovdqa64_zmmm512_k1z_zmm,
    EVEX_Vpsrld_xmm_k1z_xmmm128b32_imm8,
    EVEX_Vpsrld_ymm_k1z_ymmm256b32_imm8,
    EVEX_Vpsrld_zmm_k1z_zmmm512b32_imm8,
    EVEX_Vpsrad_xmm_k1z_xmmm128b32_imm8,
    EVEX_Vpsrad_ymm_k1z_ymmm256b32_imm8,
    EVEX_Vpsrad_zmm_k1z_zmmm512b32_imm8,
    EVEX_Vpslld_xmm_k1z_xmmm128b32_imm8,
    EVEX_Vpslld_ymm_k1z_ymmm256b32_imm8,
    EVEX_Vpslld_zmm_k1z_zmmm512b32_imm8,
    EVEX_Vpxord_xmm_k1z_xmm_xmmm128b32,
    EVEX_Vpxord_ymm_k1z_ymm_ymmm256b32,
    EVEX_Vpxord_zmm_k1z_zmm_zmmm512b32,
    EVEX_Vpxorq_xmm_k1z_xmm_xmmm128b64,
    EVEX_Vpxorq_ymm_k1z_ymm_ymmm256b64,
    EVEX_Vpxorq_zmm_k1z_zmm_zmmm512b64,
    EVEX_Vpaddd_xmm_k1z_xmm_xmmm128b32,
    EVEX_Vpaddd_ymm_k1z_ymm_ymmm256b32,
    EVEX_Vpaddd_zmm_k1z_zmm_zmmm512b32,
    EVEX_Vpbroadcastd_xmm_k1z_xmmm32,
    EVEX_Vpbroadcastd_ymm_k1z_xmmm32,
    EVEX_Vpbroadcastd_zmm_k1z_xmmm32,
    EVEX_Vpgatherdd_xmm_k1_vm32x,
    EVEX_Vpgatherdd_ymm_k1_vm32y,
    EVEX_Vpgatherdd_zmm_k1_vm32z,
    EVEX_Vpgatherdq_xmm_k1_vm32x,
    EVEX_Vpgatherdq_ymm_k1_vm32x,
    EVEX_Vpgatherdq_zmm_k1_vm32y,
    EVEX_Vpgatherqd_xmm_k1_vm64x,
    EVEX_Vpgatherqd_xmm_k1_vm64y,
    EVEX_Vpgatherqd_ymm_k1_vm64z,
    EVEX_Vpgatherqq_xmm_k1_vm64x,
    EVEX_Vpgatherqq_ymm_k1_vm64y,
    EVEX_Vpgatherqq_zmm_k1_vm64z,
    EVEX_Vpscatterdd_vm32x_k1_xmm,
    EVEX_Vpscatterdd_vm32y_k1_ymm,
    EVEX_Vpscatterdd_vm32z_k1_zmm,
    EVEX_Vpscatterdq_vm32x_k1_xmm,
    EVEX_Vpscatterdq_vm32x_k1_ymm,
    EVEX_Vpscatterdq_vm32y_k1_zmm,
    EVEX_Vpscatterqd_vm64x_k1_xmm,
    EVEX_Vpscatterqd_vm64y_k1_xmm,
    EVEX_Vpscatterqd_vm64z_k1_ymm,
    EVEX_Vpscatterqq_vm64x_k1_xmm,
    EVEX_Vpscatterqq_vm64y_k1_ymm,
    EVEX_Vpscatterqq_vm64z_k1_zmm,
    EVEX_Vpalignr_xmm_k1z_xmm_xmmm128_imm8,
    EVEX_Vpalignr_ymm_k1z_ymm_ymmm256_imm8,
    EVEX_Vpalignr_zmm_k1z_zmm_zmmm512_imm8,
    // XOP
    XOP_Vpcmov_xmm_xmm_xmmm128_xmm,
    XOP_Vpcmov_ymm_ymm_ymmm256_ymm,
    XOP_Vpcmov_xmm_xmm_xmm_xmmm128,
    XOP_Vpcmov_ymm_ymm_ymm_ymmm256,
    XOP_Vprotb_xmm_xmmm128_imm8,
    XOP_Vprotb_xmm_xmmm128_xmm,
    XOP_Vprotb_xmm_xmm_xmmm128,
    XOP_Vfrczps_xmm_xmmm128,
    XOP_Vfrczps_ymm_ymmm256,
    XOP_Blcfill_r32_rm32,
    XOP_Blcfill_r64_rm64,
    XOP_Bextr_r32_rm32_imm32,
    XOP_Bextr_r64_rm64_imm32,
}

impl Code {
    /// Number of `Code` values, including `INVALID`.
    pub const COUNT: usize = Self::XOP_Bextr_r64_rm64_imm32 as usize + 1;

    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }

    /// Encoding family of this form. `INVALID` reports `Legacy`.
    pub fn encoding(self) -> EncodingKind {
        let c = self as u16;
        if c >= Self::VEX_Vmovups_xmm_xmmm128 as u16 && c <= Self::VEX_Vblendvps_ymm_ymm_ymmm256_ymm as u16 {
            EncodingKind::Vex
        } else if c >= Self::EVEX_Vmovups_xmm_k1z_xmmm128 as u16 && c <= Self::EVEX_Vpalignr_zmm_k1z_zmm_zmmm512_imm8 as u16 {
            EncodingKind::Evex
        } else if c >= Self::XOP_Vpcmov_xmm_xmm_xmmm128_xmm as u16 && c <= Self::XOP_Bextr_r64_rm64_imm32 as u16 {
            EncodingKind::Xop
        } else {
            EncodingKind::Legacy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_ranges() {
        assert_eq!(Code::Add_rm8_r8.encoding(), EncodingKind::Legacy);
        assert_eq!(Code::Punpckhbw_mm_mmm64.encoding(), EncodingKind::Legacy);
        assert_eq!(Code::VEX_Vpunpckhbw_xmm_xmm_xmmm128.encoding(), EncodingKind::Vex);
        assert_eq!(Code::EVEX_Vpunpckhbw_zmm_k1z_zmm_zmmm512.encoding(), EncodingKind::Evex);
        assert_eq!(Code::XOP_Vpcmov_xmm_xmm_xmmm128_xmm.encoding(), EncodingKind::Xop);
    }

    #[test]
    fn test_invalid_default() {
        assert!(Code::default().is_invalid());
        assert!(!Code::Nopd.is_invalid());
        assert_eq!(Code::COUNT, 782);
    }
}
