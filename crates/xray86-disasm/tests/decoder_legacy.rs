//! Legacy-encoded instruction vectors.

mod common;

use common::*;
use xray86_core::{Bitness, Code, EncodingKind, MemorySize, OpKind, Register};
use xray86_disasm::{DecodeError, DecoderOptions};

// =============================================================================
// Family disambiguation and register extension
// =============================================================================

#[test]
fn test_punpckhbw_mmx_register_form_16bit() {
    let instr = decode16(&[0x0F, 0x68, 0xCD]);
    assert_eq!(instr.code(), Code::Punpckhbw_mm_mmm64);
    assert_eq!(instr.encoding(), EncodingKind::Legacy);
    assert_eq!(instr.op_count(), 2);
    assert_eq!(instr.byte_length(), 3);
    assert_eq!(instr.op0_kind(), OpKind::Register);
    assert_eq!(instr.op0_register(), Register::MM1);
    assert_eq!(instr.op1_kind(), OpKind::Register);
    assert_eq!(instr.op1_register(), Register::MM5);
    assert!(!instr.has_lock_prefix());
    assert!(!instr.has_repe_prefix());
    assert!(!instr.has_repne_prefix());
    assert_eq!(instr.segment_prefix(), Register::None);
    assert_eq!(instr.op_mask(), Register::None);
    assert!(!instr.zeroing_masking());
    assert!(!instr.suppress_all_exceptions());
}

#[test]
fn test_punpckhbw_operand_size_prefix_selects_sse() {
    let mmx = decode16(&[0x0F, 0x68, 0x08]);
    assert_eq!(mmx.code(), Code::Punpckhbw_mm_mmm64);
    assert_eq!(mmx.op0_register(), Register::MM1);
    assert_eq!(mmx.op1_kind(), OpKind::Memory);
    assert_eq!(mmx.memory_base(), Register::BX);
    assert_eq!(mmx.memory_index(), Register::SI);
    assert_eq!(mmx.memory_index_scale(), 1);
    assert_eq!(mmx.memory_displacement(), 0);
    assert_eq!(mmx.memory_size(), MemorySize::Packed64_Int8);

    let sse = decode16(&[0x66, 0x0F, 0x68, 0x08]);
    assert_eq!(sse.code(), Code::Punpckhbw_xmm_xmmm128);
    assert_eq!(sse.op0_register(), Register::XMM1);
    assert_eq!(sse.memory_size(), MemorySize::Packed128_Int8);
}

#[test]
fn test_rex_r_extends_xmm_register() {
    let instr = decode64(&[0x66, 0x44, 0x0F, 0x68, 0xCD]);
    assert_eq!(instr.code(), Code::Punpckhbw_xmm_xmmm128);
    assert_eq!(instr.op0_register(), Register::XMM9);
    assert_eq!(instr.op1_register(), Register::XMM5);

    let instr = decode64(&[0x66, 0x0F, 0x68, 0xCD]);
    assert_eq!(instr.op0_register(), Register::XMM1);

    // MMX registers ignore REX.R and REX.B.
    let instr = decode64(&[0x45, 0x0F, 0x68, 0xCD]);
    assert_eq!(instr.op0_register(), Register::MM1);
    assert_eq!(instr.op1_register(), Register::MM5);
}

// =============================================================================
// Addressing
// =============================================================================

#[test]
fn test_mode_dependent_base_register() {
    let bytes = [0x0F, 0x68, 0x08];

    let instr = decode16(&bytes);
    assert_eq!((instr.memory_base(), instr.memory_index()), (Register::BX, Register::SI));

    let instr = decode32(&bytes);
    assert_eq!((instr.memory_base(), instr.memory_index()), (Register::EAX, Register::None));

    let instr = decode64(&bytes);
    assert_eq!((instr.memory_base(), instr.memory_index()), (Register::RAX, Register::None));
}

#[test]
fn test_address_size_override() {
    let instr = decode16(&[0x67, 0x0F, 0x68, 0x08]);
    assert_eq!(instr.memory_base(), Register::EAX);
    assert_eq!(instr.len(), 4);

    let instr = decode32(&[0x67, 0x0F, 0x68, 0x08]);
    assert_eq!((instr.memory_base(), instr.memory_index()), (Register::BX, Register::SI));

    let instr = decode64(&[0x67, 0x0F, 0x68, 0x08]);
    assert_eq!(instr.memory_base(), Register::EAX);
}

#[test]
fn test_rip_relative() {
    // mov eax, [rip+0x10]
    let instr = decode64(&[0x8B, 0x05, 0x10, 0x00, 0x00, 0x00]);
    assert_eq!(instr.code(), Code::Mov_r32_rm32);
    assert_eq!(instr.op0_register(), Register::EAX);
    assert_eq!(instr.memory_base(), Register::RIP);
    assert_eq!(instr.memory_displacement(), 0x10);
    assert_eq!(instr.memory_displ_size(), 4);
    assert_eq!(instr.ip_rel_memory_address(), 0x1016);

    let instr = decode64(&[0x67, 0x8B, 0x05, 0x10, 0x00, 0x00, 0x00]);
    assert_eq!(instr.memory_base(), Register::EIP);
    assert_eq!(instr.ip_rel_memory_address(), 0x1017);

    // Outside 64-bit mode the same ModRM is an absolute disp32.
    let instr = decode32(&[0x8B, 0x05, 0x10, 0x00, 0x00, 0x00]);
    assert_eq!(instr.memory_base(), Register::None);
    assert_eq!(instr.memory_displacement(), 0x10);
}

#[test]
fn test_negative_displacement_is_sign_extended() {
    // mov rax, [rbp-8]
    let instr = decode64(&[0x48, 0x8B, 0x45, 0xF8]);
    assert_eq!(instr.code(), Code::Mov_r64_rm64);
    assert_eq!(instr.memory_base(), Register::RBP);
    assert_eq!(instr.memory_displacement(), 0xFFFF_FFF8);
    assert_eq!(instr.memory_displacement64(), 0xFFFF_FFFF_FFFF_FFF8);
    assert_eq!(instr.memory_displ_size(), 1);
}

#[test]
fn test_memory_segment() {
    let instr = decode64(&[0x8B, 0x00]);
    assert_eq!(instr.memory_segment(), Register::DS);

    let instr = decode64(&[0x8B, 0x45, 0x00]);
    assert_eq!(instr.memory_segment(), Register::SS);

    let instr = decode64(&[0x64, 0x8B, 0x00]);
    assert_eq!(instr.segment_prefix(), Register::FS);
    assert_eq!(instr.memory_segment(), Register::FS);

    // ES does not displace FS in 64-bit mode, but does elsewhere.
    let instr = decode64(&[0x64, 0x26, 0x8B, 0x00]);
    assert_eq!(instr.segment_prefix(), Register::FS);
    let instr = decode32(&[0x64, 0x26, 0x8B, 0x00]);
    assert_eq!(instr.segment_prefix(), Register::ES);
}

#[test]
fn test_moffs() {
    let instr = decode32(&[0xA1, 0x78, 0x56, 0x34, 0x12]);
    assert_eq!(instr.code(), Code::Mov_EAX_moffs32);
    assert_eq!(instr.op0_register(), Register::EAX);
    assert_eq!(instr.op1_kind(), OpKind::MemoryOffset);
    assert_eq!(instr.memory_displacement(), 0x1234_5678);
    assert_eq!(instr.memory_displ_size(), 4);
    assert_eq!(instr.memory_base(), Register::None);

    let instr = decode64(&[0x48, 0xA1, 0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
    assert_eq!(instr.code(), Code::Mov_RAX_moffs64);
    assert_eq!(instr.memory_displacement64(), 0x1122_3344_5566_7788);
    assert_eq!(instr.memory_displ_size(), 8);

    let instr = decode16(&[0xA2, 0x34, 0x12]);
    assert_eq!(instr.code(), Code::Mov_moffs8_AL);
    assert_eq!(instr.op0_kind(), OpKind::MemoryOffset);
    assert_eq!(instr.memory_displ_size(), 2);
}

// =============================================================================
// Operand size and registers
// =============================================================================

#[test]
fn test_push_operand_size_by_mode() {
    assert_eq!(decode64(&[0x55]).code(), Code::Push_r64);
    assert_eq!(decode64(&[0x55]).op0_register(), Register::RBP);
    assert_eq!(decode64(&[0x41, 0x55]).op0_register(), Register::R13);
    assert_eq!(decode64(&[0x66, 0x55]).code(), Code::Push_r16);
    assert_eq!(decode32(&[0x55]).code(), Code::Push_r32);
    assert_eq!(decode16(&[0x55]).op0_register(), Register::BP);
}

#[test]
fn test_rex_w_and_operand_size() {
    let instr = decode64(&[0x48, 0x89, 0xE5]);
    assert_eq!(instr.code(), Code::Mov_rm64_r64);
    assert_eq!(instr.op0_register(), Register::RBP);
    assert_eq!(instr.op1_register(), Register::RSP);

    // REX.W wins over 66.
    let instr = decode64(&[0x66, 0x48, 0x89, 0xE5]);
    assert_eq!(instr.code(), Code::Mov_rm64_r64);

    // A legacy prefix after REX discards it.
    let instr = decode64(&[0x48, 0x66, 0x89, 0xC8]);
    assert_eq!(instr.code(), Code::Mov_rm16_r16);
    assert_eq!(instr.op0_register(), Register::AX);
    assert_eq!(instr.op1_register(), Register::CX);
}

#[test]
fn test_byte_registers_depend_on_rex() {
    let instr = decode64(&[0x88, 0xE0]);
    assert_eq!(instr.code(), Code::Mov_rm8_r8);
    assert_eq!(instr.op0_register(), Register::AL);
    assert_eq!(instr.op1_register(), Register::AH);

    let instr = decode64(&[0x40, 0x88, 0xE0]);
    assert_eq!(instr.op1_register(), Register::SPL);
}

#[test]
fn test_inc_dec_outside_64bit() {
    let instr = decode32(&[0x40]);
    assert_eq!(instr.code(), Code::Inc_r32);
    assert_eq!(instr.op0_register(), Register::EAX);
    assert_eq!(decode16(&[0x4F]).code(), Code::Dec_r16);
}

#[test]
fn test_nop_and_xchg() {
    assert_eq!(decode64(&[0x90]).code(), Code::Nopd);
    assert_eq!(decode16(&[0x90]).code(), Code::Nopw);

    let instr = decode64(&[0x41, 0x90]);
    assert_eq!(instr.code(), Code::Xchg_r32_EAX);
    assert_eq!(instr.op0_register(), Register::R8D);

    let instr = decode64(&[0xF3, 0x90]);
    assert_eq!(instr.code(), Code::Pause);
    assert!(!instr.has_repe_prefix());
}

#[test]
fn test_movzx() {
    let instr = decode64(&[0x0F, 0xB6, 0xC1]);
    assert_eq!(instr.code(), Code::Movzx_r32_rm8);
    assert_eq!(instr.op1_register(), Register::CL);
    assert_eq!(decode64(&[0x48, 0x0F, 0xB6, 0xC1]).code(), Code::Movzx_r64_rm8);
}

#[test]
fn test_mov_segment_register() {
    let instr = decode64(&[0x8E, 0xD8]);
    assert_eq!(instr.code(), Code::Mov_Sreg_r32m16);
    assert_eq!(instr.op0_register(), Register::DS);
    assert_eq!(instr.op1_register(), Register::EAX);

    // CS cannot be loaded with MOV.
    let err = decode_err(Bitness::Bits64, &[0x8E, 0xC8]);
    assert!(is_invalid_opcode(&err));
    // Sreg 6 and 7 do not exist.
    assert!(is_invalid_opcode(&decode_err(Bitness::Bits32, &[0x8C, 0xF0])));
}

// =============================================================================
// Immediates and branches
// =============================================================================

#[test]
fn test_immediates() {
    let instr = decode64(&[0x48, 0xB8, 0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
    assert_eq!(instr.code(), Code::Mov_r64_imm64);
    assert_eq!(instr.op1_kind(), OpKind::Immediate64);
    assert_eq!(instr.immediate64(), 0x1122_3344_5566_7788);

    let instr = decode32(&[0x6B, 0xC0, 0xFB]);
    assert_eq!(instr.code(), Code::Imul_r32_rm32_imm8);
    assert_eq!(instr.op2_kind(), OpKind::Immediate8to32);
    assert_eq!(instr.immediate32(), 0xFFFF_FFFB);

    let instr = decode64(&[0x48, 0x83, 0xEC, 0x20]);
    assert_eq!(instr.code(), Code::Sub_rm64_imm8);
    assert_eq!(instr.op1_kind(), OpKind::Immediate8to64);
    assert_eq!(instr.immediate(1), 0x20);
}

#[test]
fn test_enter() {
    let instr = decode64(&[0xC8, 0x10, 0x00, 0x01]);
    assert_eq!(instr.code(), Code::Enterq_imm16_imm8);
    assert_eq!(instr.op0_kind(), OpKind::Immediate16);
    assert_eq!(instr.op1_kind(), OpKind::Immediate8_2nd);
    assert_eq!(instr.immediate16(), 0x10);
    assert_eq!(instr.immediate8_2nd(), 1);
}

#[test]
fn test_near_branches() {
    let instr = decode64(&[0x74, 0xFE]);
    assert_eq!(instr.code(), Code::Je_rel8_64);
    assert_eq!(instr.op0_kind(), OpKind::NearBranch64);
    assert_eq!(instr.near_branch_target(), IP);

    let instr = decode32(&[0x0F, 0x85, 0x00, 0x01, 0x00, 0x00]);
    assert_eq!(instr.code(), Code::Jne_rel32_32);
    assert_eq!(instr.near_branch_target(), 0x1106);

    // 66 does not shrink a near branch in 64-bit mode.
    let instr = decode64(&[0x66, 0xEB, 0x00]);
    assert_eq!(instr.code(), Code::Jmp_rel8_64);
}

#[test]
fn test_far_branches() {
    let instr = decode32(&[0xEA, 0x78, 0x56, 0x34, 0x12, 0x00, 0x10]);
    assert_eq!(instr.code(), Code::Jmp_ptr1632);
    assert_eq!(instr.op0_kind(), OpKind::FarBranch32);
    assert_eq!(instr.far_branch_selector(), 0x1000);
    assert_eq!(instr.far_branch32(), 0x1234_5678);

    let instr = decode16(&[0x9A, 0x34, 0x12, 0x00, 0xF0]);
    assert_eq!(instr.code(), Code::Call_ptr1616);
    assert_eq!(instr.op0_kind(), OpKind::FarBranch16);
    assert_eq!(instr.far_branch_selector(), 0xF000);

    assert!(is_invalid_opcode(&decode_err(Bitness::Bits64, &[0xEA, 0, 0, 0, 0, 0, 0])));
}

// =============================================================================
// Prefixes
// =============================================================================

#[test]
fn test_mandatory_prefix_selection() {
    assert_eq!(decode64(&[0x0F, 0x10, 0xC1]).code(), Code::Movups_xmm_xmmm128);
    assert_eq!(decode64(&[0x66, 0x0F, 0x10, 0xC1]).code(), Code::Movupd_xmm_xmmm128);

    let instr = decode64(&[0xF2, 0x0F, 0x10, 0xC1]);
    assert_eq!(instr.code(), Code::Movsd_xmm_xmmm64);
    assert!(!instr.has_repne_prefix());

    // F2/F3 beat 66; the last of F2/F3 wins.
    assert_eq!(decode64(&[0xF3, 0x66, 0x0F, 0x10, 0xC1]).code(), Code::Movss_xmm_xmmm32);
    assert_eq!(decode64(&[0xF3, 0xF2, 0x0F, 0x10, 0xC1]).code(), Code::Movsd_xmm_xmmm64);
}

#[test]
fn test_repeat_prefix_is_reported_when_not_consumed() {
    let instr = decode64(&[0xF3, 0x01, 0xC8]);
    assert_eq!(instr.code(), Code::Add_rm32_r32);
    assert!(instr.has_repe_prefix());
    assert!(!instr.has_repne_prefix());
}

#[test]
fn test_only_the_consumed_repeat_prefix_is_hidden() {
    // F3 selects MOVDQU; the earlier F2 is still reported.
    let instr = decode64(&[0xF2, 0xF3, 0x0F, 0x6F, 0xC1]);
    assert_eq!(instr.code(), Code::Movdqu_xmm_xmmm128);
    assert!(instr.has_repne_prefix());
    assert!(!instr.has_repe_prefix());

    // F2 selects MOVSD; the earlier F3 is still reported.
    let instr = decode64(&[0xF3, 0xF2, 0x0F, 0x10, 0xC1]);
    assert_eq!(instr.code(), Code::Movsd_xmm_xmmm64);
    assert!(instr.has_repe_prefix());
    assert!(!instr.has_repne_prefix());
}

#[test]
fn test_lock_prefix() {
    let instr = decode64(&[0xF0, 0x01, 0x08]);
    assert_eq!(instr.code(), Code::Add_rm32_r32);
    assert!(instr.has_lock_prefix());

    let err = decode_err(Bitness::Bits64, &[0xF0, 0x01, 0xC8]);
    assert!(is_invalid_encoding(&err));
    let err = decode_err(Bitness::Bits64, &[0xF0, 0x8B, 0x00]);
    assert!(is_invalid_encoding(&err));

    let instr = decode_with(Bitness::Bits64, DecoderOptions::PERMISSIVE, &[0xF0, 0x01, 0xC8]);
    assert_eq!(instr.code(), Code::Add_rm32_r32);
    assert!(!instr.has_lock_prefix());
}

// =============================================================================
// Escape-byte fallbacks
// =============================================================================

#[test]
fn test_bound_les_lds_outside_64bit() {
    let instr = decode32(&[0x62, 0x00]);
    assert_eq!(instr.code(), Code::Bound_r32_m3232);
    assert_eq!(instr.memory_base(), Register::EAX);

    assert_eq!(decode16(&[0x62, 0x00]).code(), Code::Bound_r16_m1616);
    assert_eq!(decode32(&[0xC4, 0x00]).code(), Code::Les_r32_m1632);
    assert_eq!(decode32(&[0xC5, 0x00]).code(), Code::Lds_r32_m1632);
}

#[test]
fn test_pop_group_is_not_xop() {
    let instr = decode64(&[0x8F, 0xC0]);
    assert_eq!(instr.code(), Code::Pop_rm64);
    assert_eq!(instr.op0_register(), Register::RAX);

    let instr = decode32(&[0x8F, 0x00]);
    assert_eq!(instr.code(), Code::Pop_rm32);
    assert_eq!(instr.op0_kind(), OpKind::Memory);
}

#[test]
fn test_disabled_escapes_fall_back_to_legacy() {
    let err = decode_err_with(Bitness::Bits32, DecoderOptions::NO_EVEX, &[0x62, 0xC0]);
    assert!(is_invalid_opcode(&err));

    let err = decode_err_with(Bitness::Bits64, DecoderOptions::NO_VEX, &[0xC5, 0xF8, 0x77]);
    assert!(is_invalid_opcode(&err));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_invalid_opcodes() {
    assert!(is_invalid_opcode(&decode_err(Bitness::Bits64, &[0x27])));
    assert!(is_invalid_opcode(&decode_err(Bitness::Bits64, &[0x06])));
    // INC r is not available in 64-bit mode because 40 is REX; alone it is truncated.
    assert!(matches!(
        decode_err(Bitness::Bits64, &[0x40]),
        DecodeError::UnexpectedEnd { .. }
    ));
}

#[test]
fn test_truncated_immediate() {
    let err = decode_err(Bitness::Bits32, &[0xB8, 0x01, 0x02]);
    assert_eq!(
        err,
        DecodeError::UnexpectedEnd {
            address: IP,
            needed: 5,
            available: 3,
        }
    );
}

#[test]
fn test_instruction_length_limit() {
    let mut bytes = vec![0x66; 14];
    bytes.push(0x90);
    let instr = decode64(&bytes);
    assert_eq!(instr.code(), Code::Nopw);
    assert_eq!(instr.len(), 15);

    let mut bytes = vec![0x66; 15];
    bytes.push(0x90);
    let err = decode_err(Bitness::Bits64, &bytes);
    assert_eq!(err, DecodeError::TooLong { address: IP });
}
