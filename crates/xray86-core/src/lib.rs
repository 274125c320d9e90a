//! # xray86-core
//!
//! Value types shared by the xray86 decoder and its consumers: instruction
//! forms (`Code`), registers, operand kinds, memory size tags and the decoded
//! `Instruction` record.

pub mod arch;
pub mod code;
pub mod instruction;
pub mod memory_size;
pub mod operand;
pub mod register;

pub use arch::{Bitness, EncodingKind};
pub use code::Code;
pub use instruction::{Instruction, MemoryOperand, VsibIndex, MAX_OPERANDS};
pub use memory_size::MemorySize;
pub use operand::{OpKind, RoundingControl};
pub use register::{Register, RegisterClass};
