//! Shared helpers for the decoder vector tests.

#![allow(dead_code)]

use xray86_core::{Bitness, Instruction};
use xray86_disasm::{DecodeError, DecoderOptions, Disassembler, X86Disassembler};

pub const IP: u64 = 0x1000;

/// Decodes `bytes` and asserts the instruction spans all of them.
pub fn decode(bitness: Bitness, bytes: &[u8]) -> Instruction {
    decode_with(bitness, DecoderOptions::NONE, bytes)
}

pub fn decode_with(bitness: Bitness, options: DecoderOptions, bytes: &[u8]) -> Instruction {
    let disasm = X86Disassembler::new(bitness, options);
    let instr = disasm
        .decode_instruction(bytes, IP)
        .unwrap_or_else(|e| panic!("failed to decode {bytes:02X?}: {e}"));
    assert_eq!(instr.len(), bytes.len(), "length of {bytes:02X?}");
    assert_eq!(instr.ip(), IP);
    instr
}

pub fn decode16(bytes: &[u8]) -> Instruction {
    decode(Bitness::Bits16, bytes)
}

pub fn decode32(bytes: &[u8]) -> Instruction {
    decode(Bitness::Bits32, bytes)
}

pub fn decode64(bytes: &[u8]) -> Instruction {
    decode(Bitness::Bits64, bytes)
}

pub fn decode_err(bitness: Bitness, bytes: &[u8]) -> DecodeError {
    decode_err_with(bitness, DecoderOptions::NONE, bytes)
}

pub fn decode_err_with(bitness: Bitness, options: DecoderOptions, bytes: &[u8]) -> DecodeError {
    let disasm = X86Disassembler::new(bitness, options);
    match disasm.decode_instruction(bytes, IP) {
        Ok(instr) => panic!("{bytes:02X?} decoded as {:?}", instr.code()),
        Err(e) => {
            assert_eq!(e.address(), IP);
            e
        }
    }
}

pub fn is_invalid_opcode(err: &DecodeError) -> bool {
    matches!(err, DecodeError::InvalidOpcode { .. })
}

pub fn is_invalid_encoding(err: &DecodeError) -> bool {
    matches!(err, DecodeError::InvalidEncoding { .. })
}

pub fn is_invalid_escape(err: &DecodeError) -> bool {
    matches!(err, DecodeError::InvalidEscapeEncoding { .. })
}
