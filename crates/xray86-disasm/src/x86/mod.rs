//! x86 / x86-64 instruction decoder.
//!
//! Decoding runs as a single pass over the instruction bytes:
//! - legacy prefixes and REX ([`prefix`])
//! - the VEX, XOP or EVEX header, normalized into an [`EncodingContext`]
//! - table dispatch on map, mandatory prefix, opcode and ModRM.reg
//! - ModRM, SIB and displacement ([`modrm`])
//! - operand materialization and attribute finalization

mod decoder;
mod encoding;
mod finalize;
mod modrm;
mod opcodes;
mod opcodes_0f38;
mod opcodes_0f3a;
mod opcodes_evex;
mod opcodes_vex;
mod opcodes_xop;
mod operands;
mod prefix;
mod stream;
mod template;

pub use decoder::{Decoder, X86Disassembler};
pub use stream::MAX_INSTRUCTION_LEN;
