//! # xray86-disasm
//!
//! x86 and x86-64 instruction decoder for 16, 32 and 64-bit code, covering the
//! legacy, VEX, XOP and EVEX encodings.
//!
//! ```
//! use xray86_core::{Bitness, Code, Register};
//! use xray86_disasm::{DecoderOptions, Disassembler, X86Disassembler};
//!
//! let disasm = X86Disassembler::new(Bitness::Bits64, DecoderOptions::NONE);
//! let instr = disasm.decode_instruction(&[0x66, 0x44, 0x0F, 0x68, 0xCD], 0x1000).unwrap();
//! assert_eq!(instr.code(), Code::Punpckhbw_xmm_xmmm128);
//! assert_eq!(instr.op0_register(), Register::XMM9);
//! assert_eq!(instr.len(), 5);
//! ```

pub mod error;
pub mod options;
pub mod traits;
pub mod x86;

pub use error::{DecodeError, Escape};
pub use options::DecoderOptions;
pub use traits::Disassembler;
pub use x86::{Decoder, X86Disassembler, MAX_INSTRUCTION_LEN};
