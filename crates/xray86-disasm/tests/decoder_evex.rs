//! EVEX-encoded instruction vectors.

mod common;

use common::*;
use xray86_core::{Bitness, Code, EncodingKind, MemorySize, OpKind, Register, RoundingControl};
use xray86_disasm::DecoderOptions;

// =============================================================================
// Opmask and zeroing
// =============================================================================

#[test]
fn test_opmask_with_zeroing() {
    let instr = decode64(&[0x62, 0xF1, 0x4D, 0x8B, 0x68, 0xD3]);
    assert_eq!(instr.code(), Code::EVEX_Vpunpckhbw_xmm_k1z_xmm_xmmm128);
    assert_eq!(instr.encoding(), EncodingKind::Evex);
    assert_eq!(instr.op0_register(), Register::XMM2);
    assert_eq!(instr.op1_register(), Register::XMM6);
    assert_eq!(instr.op2_register(), Register::XMM3);
    assert_eq!(instr.op_mask(), Register::K3);
    assert!(instr.zeroing_masking());
    assert!(!instr.merging_masking());
}

#[test]
fn test_opmask_with_merging() {
    let instr = decode64(&[0x62, 0xF1, 0x4D, 0x0B, 0x68, 0xD3]);
    assert_eq!(instr.code(), Code::EVEX_Vpunpckhbw_xmm_k1z_xmm_xmmm128);
    assert_eq!(instr.op_mask(), Register::K3);
    assert!(!instr.zeroing_masking());
    assert!(instr.merging_masking());
}

#[test]
fn test_evex_in_32bit_mode() {
    let instr = decode32(&[0x62, 0xF1, 0x4D, 0x8B, 0x68, 0xD3]);
    assert_eq!(instr.code(), Code::EVEX_Vpunpckhbw_xmm_k1z_xmm_xmmm128);
    assert_eq!(instr.op1_register(), Register::XMM6);
    assert_eq!(instr.op_mask(), Register::K3);
}

#[test]
fn test_zeroing_without_opmask() {
    let bytes = [0x62, 0xF1, 0x4D, 0x88, 0x68, 0xD3];
    assert!(is_invalid_encoding(&decode_err(Bitness::Bits64, &bytes)));

    let instr = decode_with(Bitness::Bits64, DecoderOptions::PERMISSIVE, &bytes);
    assert_eq!(instr.op_mask(), Register::None);
    assert!(!instr.zeroing_masking());
}

#[test]
fn test_zeroing_on_memory_destination() {
    let err = decode_err(Bitness::Bits64, &[0x62, 0xF1, 0x7D, 0x89, 0x7F, 0x00]);
    assert!(is_invalid_encoding(&err));

    let instr = decode64(&[0x62, 0xF1, 0x7D, 0x09, 0x7F, 0x00]);
    assert_eq!(instr.code(), Code::EVEX_Vmovdqa32_xmmm128_k1z_xmm);
    assert_eq!(instr.op0_kind(), OpKind::Memory);
    assert_eq!(instr.op_mask(), Register::K1);
}

// =============================================================================
// Broadcast and compressed displacement
// =============================================================================

#[test]
fn test_broadcast_scales_disp8_by_element() {
    let instr = decode64(&[0x62, 0xF1, 0x4D, 0x9D, 0x6A, 0x50, 0x01]);
    assert_eq!(instr.code(), Code::EVEX_Vpunpckhdq_xmm_k1z_xmm_xmmm128b32);
    assert_eq!(instr.op2_kind(), OpKind::Memory);
    assert_eq!(instr.memory_base(), Register::RAX);
    assert_eq!(instr.memory_size(), MemorySize::Broadcast128_Int32);
    assert!(instr.is_broadcast());
    assert_eq!(instr.memory_displacement(), 4);
    assert_eq!(instr.memory_displ_size(), 1);
    assert_eq!(instr.op_mask(), Register::K5);
    assert!(instr.zeroing_masking());
}

#[test]
fn test_plain_memory_scales_disp8_by_vector() {
    let instr = decode64(&[0x62, 0xF1, 0x4D, 0x0B, 0x6A, 0x50, 0x01]);
    assert_eq!(instr.code(), Code::EVEX_Vpunpckhdq_xmm_k1z_xmm_xmmm128b32);
    assert_eq!(instr.memory_size(), MemorySize::Packed128_Int32);
    assert!(!instr.is_broadcast());
    assert_eq!(instr.memory_displacement(), 16);
    assert_eq!(instr.memory_displ_size(), 1);
}

#[test]
fn test_disp8_scale_follows_vector_length() {
    // vmovdqa32 zmm0, [rax+0x40]
    let instr = decode64(&[0x62, 0xF1, 0x7D, 0x48, 0x6F, 0x40, 0x01]);
    assert_eq!(instr.code(), Code::EVEX_Vmovdqa32_zmm_k1z_zmmm512);
    assert_eq!(instr.memory_displacement(), 64);

    // disp32 is never scaled.
    let instr = decode64(&[0x62, 0xF1, 0x7D, 0x48, 0x6F, 0x80, 0x01, 0x00, 0x00, 0x00]);
    assert_eq!(instr.memory_displacement(), 1);
    assert_eq!(instr.memory_displ_size(), 4);
}

#[test]
fn test_broadcast_on_zmm() {
    let instr = decode64(&[0x62, 0xF1, 0x7D, 0x58, 0xEF, 0x40, 0x01]);
    assert_eq!(instr.code(), Code::EVEX_Vpxord_zmm_k1z_zmm_zmmm512b32);
    assert!(instr.is_broadcast());
    assert_eq!(instr.memory_displacement(), 4);
}

#[test]
fn test_broadcast_on_form_without_broadcast() {
    let bytes = [0x62, 0xF1, 0x4D, 0x18, 0x68, 0x50, 0x01];
    assert!(is_invalid_encoding(&decode_err(Bitness::Bits64, &bytes)));

    let instr = decode_with(Bitness::Bits64, DecoderOptions::PERMISSIVE, &bytes);
    assert_eq!(instr.memory_size(), MemorySize::Packed128_Int8);
    assert!(!instr.is_broadcast());
}

#[test]
fn test_scalar_memory_disp8() {
    // vpbroadcastd zmm0, [rax+4]
    let instr = decode64(&[0x62, 0xF2, 0x7D, 0x48, 0x58, 0x40, 0x01]);
    assert_eq!(instr.code(), Code::EVEX_Vpbroadcastd_zmm_k1z_xmmm32);
    assert_eq!(instr.memory_size(), MemorySize::Int32);
    assert_eq!(instr.memory_displacement(), 4);

    let instr = decode64(&[0x62, 0xF2, 0x7D, 0x48, 0x58, 0xC1]);
    assert_eq!(instr.op0_register(), Register::ZMM0);
    assert_eq!(instr.op1_register(), Register::XMM1);
}

// =============================================================================
// Rounding and SAE
// =============================================================================

#[test]
fn test_static_rounding() {
    let instr = decode64(&[0x62, 0xF1, 0x74, 0x38, 0x58, 0xC2]);
    assert_eq!(instr.code(), Code::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er);
    assert_eq!(instr.op0_register(), Register::ZMM0);
    assert_eq!(instr.op1_register(), Register::ZMM1);
    assert_eq!(instr.op2_register(), Register::ZMM2);
    assert_eq!(instr.rounding_control(), RoundingControl::RoundDown);
    assert!(!instr.suppress_all_exceptions());

    let instr = decode64(&[0x62, 0xF1, 0x74, 0x58, 0x58, 0xC2]);
    assert_eq!(instr.rounding_control(), RoundingControl::RoundUp);

    let instr = decode64(&[0x62, 0xF1, 0x74, 0x18, 0x58, 0xC2]);
    assert_eq!(instr.rounding_control(), RoundingControl::RoundToNearest);

    let instr = decode64(&[0x62, 0xF1, 0x74, 0x78, 0x58, 0xC2]);
    assert_eq!(instr.rounding_control(), RoundingControl::RoundTowardZero);
}

#[test]
fn test_scalar_static_rounding() {
    let instr = decode64(&[0x62, 0xF1, 0x76, 0x58, 0x58, 0xC2]);
    assert_eq!(instr.code(), Code::EVEX_Vaddss_xmm_k1z_xmm_xmmm32_er);
    assert_eq!(instr.op0_register(), Register::XMM0);
    assert_eq!(instr.rounding_control(), RoundingControl::RoundUp);
}

#[test]
fn test_suppress_all_exceptions() {
    let instr = decode64(&[0x62, 0xF1, 0x74, 0x18, 0x5F, 0xC2]);
    assert_eq!(instr.code(), Code::EVEX_Vmaxps_zmm_k1z_zmm_zmmm512b32_sae);
    assert!(instr.suppress_all_exceptions());
    assert_eq!(instr.rounding_control(), RoundingControl::None);
}

#[test]
fn test_rounding_bit_on_memory_form_is_broadcast() {
    let instr = decode64(&[0x62, 0xF1, 0x74, 0x18, 0x58, 0x00]);
    assert_eq!(instr.code(), Code::EVEX_Vaddps_xmm_k1z_xmm_xmmm128b32);
    assert_eq!(instr.memory_size(), MemorySize::Broadcast128_Float32);
    assert_eq!(instr.rounding_control(), RoundingControl::None);
}

#[test]
fn test_reserved_vector_length() {
    let err = decode_err(Bitness::Bits64, &[0x62, 0xF1, 0x74, 0x68, 0x58, 0xC2]);
    assert!(is_invalid_encoding(&err));
}

#[test]
fn test_rounding_on_form_without_rounding() {
    let bytes = [0x62, 0xF1, 0x4D, 0x18, 0x68, 0xD3];
    assert!(is_invalid_encoding(&decode_err(Bitness::Bits64, &bytes)));
}

// =============================================================================
// Registers
// =============================================================================

#[test]
fn test_five_bit_register_numbers() {
    // vmovups xmm24, xmm1
    let instr = decode64(&[0x62, 0x61, 0x7C, 0x08, 0x10, 0xC1]);
    assert_eq!(instr.code(), Code::EVEX_Vmovups_xmm_k1z_xmmm128);
    assert_eq!(instr.op0_register(), Register::XMM24);
    assert_eq!(instr.op1_register(), Register::XMM1);

    // EVEX.X extends a register-direct rm.
    let instr = decode64(&[0x62, 0x21, 0x7C, 0x08, 0x10, 0xC1]);
    assert_eq!(instr.op0_register(), Register::XMM24);
    assert_eq!(instr.op1_register(), Register::XMM17);
}

#[test]
fn test_vpcmpgtd_writes_opmask() {
    let instr = decode64(&[0x62, 0xF1, 0x75, 0x08, 0x66, 0xC2]);
    assert_eq!(instr.code(), Code::EVEX_Vpcmpgtd_kr_k1_xmm_xmmm128b32);
    assert_eq!(instr.op0_register(), Register::K0);
    assert_eq!(instr.op1_register(), Register::XMM1);
    assert_eq!(instr.op2_register(), Register::XMM2);

    // No zeroing into an opmask.
    let err = decode_err(Bitness::Bits64, &[0x62, 0xF1, 0x75, 0x89, 0x66, 0xC2]);
    assert!(is_invalid_encoding(&err));

    // EVEX.R' cannot extend an opmask register.
    let err = decode_err(Bitness::Bits64, &[0x62, 0xE1, 0x75, 0x08, 0x66, 0xC2]);
    assert!(is_invalid_encoding(&err));
}

#[test]
fn test_w_selects_element_size() {
    assert_eq!(
        decode64(&[0x62, 0xF1, 0x7D, 0x08, 0x6F, 0xC1]).code(),
        Code::EVEX_Vmovdqa32_xmm_k1z_xmmm128
    );
    assert_eq!(
        decode64(&[0x62, 0xF1, 0xFD, 0x08, 0x6F, 0xC1]).code(),
        Code::EVEX_Vmovdqa64_xmm_k1z_xmmm128
    );
    assert_eq!(
        decode64(&[0x62, 0xF1, 0x7E, 0x28, 0x6F, 0xC1]).code(),
        Code::EVEX_Vmovdqu32_ymm_k1z_ymmm256
    );

    // vpunpckhdq is W0 only.
    let err = decode_err(Bitness::Bits64, &[0x62, 0xF1, 0xCD, 0x08, 0x6A, 0xD3]);
    assert!(is_invalid_opcode(&err));
}

#[test]
fn test_vpalignr() {
    let instr = decode64(&[0x62, 0xF3, 0x75, 0x28, 0x0F, 0xC2, 0x04]);
    assert_eq!(instr.code(), Code::EVEX_Vpalignr_ymm_k1z_ymm_ymmm256_imm8);
    assert_eq!(instr.op0_register(), Register::YMM0);
    assert_eq!(instr.op1_register(), Register::YMM1);
    assert_eq!(instr.op2_register(), Register::YMM2);
    assert_eq!(instr.immediate8(), 4);
}

// =============================================================================
// Gather and scatter
// =============================================================================

#[test]
fn test_gather() {
    let instr = decode64(&[0x62, 0xF2, 0x7D, 0x09, 0x90, 0x44, 0x88, 0x01]);
    assert_eq!(instr.code(), Code::EVEX_Vpgatherdd_xmm_k1_vm32x);
    assert_eq!(instr.op0_register(), Register::XMM0);
    assert_eq!(instr.op_mask(), Register::K1);
    assert_eq!(instr.memory_index(), Register::XMM1);
    assert_eq!(instr.memory_index_scale(), 4);
    assert_eq!(instr.memory_displacement(), 4);
    assert!(instr.is_vsib32());

    // EVEX.V' is the fifth index bit.
    let instr = decode64(&[0x62, 0xF2, 0x7D, 0x01, 0x90, 0x04, 0x88]);
    assert_eq!(instr.memory_index(), Register::XMM17);

    let instr = decode64(&[0x62, 0xF2, 0xFD, 0x49, 0x91, 0x04, 0x88]);
    assert_eq!(instr.code(), Code::EVEX_Vpgatherqq_zmm_k1_vm64z);
    assert_eq!(instr.memory_index(), Register::ZMM1);
    assert!(instr.is_vsib64());
}

#[test]
fn test_gather_requires_opmask() {
    let err = decode_err(Bitness::Bits64, &[0x62, 0xF2, 0x7D, 0x08, 0x90, 0x04, 0x88]);
    assert!(is_invalid_encoding(&err));
}

#[test]
fn test_scatter() {
    let instr = decode64(&[0x62, 0xF2, 0x7D, 0x09, 0xA0, 0x04, 0x88]);
    assert_eq!(instr.code(), Code::EVEX_Vpscatterdd_vm32x_k1_xmm);
    assert_eq!(instr.op0_kind(), OpKind::Memory);
    assert_eq!(instr.op1_register(), Register::XMM0);
    assert_eq!(instr.op_mask(), Register::K1);
    assert!(instr.is_vsib32());
}

// =============================================================================
// Header errors
// =============================================================================

#[test]
fn test_evex_header_errors() {
    // P1 bit 2 clear.
    assert!(is_invalid_escape(&decode_err(Bitness::Bits64, &[0x62, 0xF1, 0x78, 0x08, 0x10, 0xC1])));
    // P0 bits 3:2 set.
    assert!(is_invalid_escape(&decode_err(Bitness::Bits64, &[0x62, 0xF5, 0x7C, 0x08, 0x10, 0xC1])));
    // mm == 0.
    assert!(is_invalid_escape(&decode_err(Bitness::Bits64, &[0x62, 0xF0, 0x7C, 0x08, 0x10, 0xC1])));
}

#[test]
fn test_rex_before_evex() {
    let bytes = [0x48, 0x62, 0xF1, 0x7C, 0x08, 0x10, 0xC1];
    assert!(is_invalid_encoding(&decode_err(Bitness::Bits64, &bytes)));

    let instr = decode_with(Bitness::Bits64, DecoderOptions::PERMISSIVE, &bytes);
    assert_eq!(instr.code(), Code::EVEX_Vmovups_xmm_k1z_xmmm128);
}
