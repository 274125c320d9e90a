//! The decoder interface shared by every mode of the x86 decoder.

use crate::DecodeError;
use xray86_core::{Bitness, Instruction};

/// A variable-length x86 instruction decoder bound to one CPU mode.
pub trait Disassembler {
    /// Decodes the instruction whose first byte is `bytes[0]`, located at `address`.
    ///
    /// Trailing bytes past the instruction are ignored. On success `len()` of the
    /// result is the number of bytes it occupies; on failure nothing is
    /// partially decoded and the error carries `address`.
    fn decode_instruction(&self, bytes: &[u8], address: u64) -> Result<Instruction, DecodeError>;

    /// Shortest possible encoding, in bytes.
    fn min_instruction_size(&self) -> usize;

    /// Architectural length ceiling, in bytes.
    fn max_instruction_size(&self) -> usize;

    fn is_fixed_width(&self) -> bool;

    /// 16, 32 or 64-bit mode.
    fn bitness(&self) -> Bitness;

    /// Decodes `bytes` as a run of consecutive instructions starting at `start_address`.
    ///
    /// Yields one entry per decode attempt. A failed attempt resynchronizes one
    /// byte later, so every byte of `bytes` is visited.
    fn disassemble_block(&self, bytes: &[u8], start_address: u64) -> Vec<Result<Instruction, DecodeError>> {
        let mut results = Vec::new();
        let mut offset = 0;

        while offset < bytes.len() {
            let ip = start_address.wrapping_add(offset as u64);
            let result = self.decode_instruction(&bytes[offset..], ip);
            offset += result.as_ref().map_or(1, Instruction::len);
            results.push(result);
        }

        results
    }
}
