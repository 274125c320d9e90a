//! Bounds-checked cursor over instruction bytes.

use crate::DecodeError;

/// Architectural limit on the length of one instruction.
pub const MAX_INSTRUCTION_LEN: usize = 15;

/// Cursor over the bytes of a single instruction.
///
/// Reads past the end of the input fail with `UnexpectedEnd`; reads past the
/// 15-byte instruction limit fail with `TooLong`. Neither ever panics.
#[derive(Debug, Clone)]
pub struct ByteStream<'a> {
    bytes: &'a [u8],
    pos: usize,
    address: u64,
}

impl<'a> ByteStream<'a> {
    /// Creates a stream over `bytes`, whose first byte lives at `address`.
    pub fn new(bytes: &'a [u8], address: u64) -> Self {
        Self {
            bytes,
            pos: 0,
            address,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left in the input.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Address of the first byte of the instruction.
    pub fn address(&self) -> u64 {
        self.address
    }

    /// Bytes consumed so far.
    pub fn consumed(&self) -> &'a [u8] {
        &self.bytes[..self.pos]
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        if self.pos >= MAX_INSTRUCTION_LEN {
            return None;
        }
        self.bytes.get(self.pos).copied()
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let end = self.pos + N;
        if end > MAX_INSTRUCTION_LEN {
            return Err(DecodeError::too_long(self.address));
        }
        if N > self.remaining() {
            return Err(DecodeError::unexpected_end(self.address, end, self.bytes.len()));
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..end]);
        self.pos = end;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.take()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_reads() {
        let bytes = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut s = ByteStream::new(&bytes, 0x1000);
        assert_eq!(s.read_u8().unwrap(), 0x01);
        assert_eq!(s.read_u16().unwrap(), 0x1234);
        assert_eq!(s.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(s.position(), 7);
        assert_eq!(s.remaining(), 0);
    }

    #[test]
    fn test_unexpected_end() {
        let bytes = [0x01, 0x02];
        let mut s = ByteStream::new(&bytes, 0x2000);
        s.read_u8().unwrap();
        let err = s.read_u32().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnexpectedEnd { address: 0x2000, needed: 5, available: 2 }
        ));
        // A failed read does not advance.
        assert_eq!(s.position(), 1);
    }

    #[test]
    fn test_length_limit() {
        let bytes = [0x66u8; 32];
        let mut s = ByteStream::new(&bytes, 0);
        for _ in 0..MAX_INSTRUCTION_LEN {
            s.read_u8().unwrap();
        }
        assert_eq!(s.peek_u8(), None);
        assert!(matches!(s.read_u8(), Err(DecodeError::TooLong { .. })));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let bytes = [0xAA];
        let s = ByteStream::new(&bytes, 0);
        assert_eq!(s.peek_u8(), Some(0xAA));
        assert_eq!(s.position(), 0);
    }
}
