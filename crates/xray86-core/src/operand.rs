//! Operand kinds and EVEX rounding modes.

/// Kind of an instruction operand.
///
/// The immediate kinds name both the encoded width and the width the value is
/// extended to, e.g. `Immediate8to32` is an imm8 sign-extended to 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(non_camel_case_types)]
pub enum OpKind {
    #[default]
    Register,
    NearBranch16,
    NearBranch32,
    NearBranch64,
    FarBranch16,
    FarBranch32,
    Immediate8,
    /// Second imm8 of ENTER.
    Immediate8_2nd,
    Immediate16,
    Immediate32,
    Immediate64,
    Immediate8to16,
    Immediate8to32,
    Immediate8to64,
    Immediate32to64,
    /// ModRM/SIB memory operand.
    Memory,
    /// Absolute segment-relative offset (MOV AL, moffs8 and friends).
    MemoryOffset,
}

impl OpKind {
    /// Returns whether this operand reads an immediate value.
    pub fn is_immediate(self) -> bool {
        matches!(
            self,
            Self::Immediate8
                | Self::Immediate8_2nd
                | Self::Immediate16
                | Self::Immediate32
                | Self::Immediate64
                | Self::Immediate8to16
                | Self::Immediate8to32
                | Self::Immediate8to64
                | Self::Immediate32to64
        )
    }

    /// Returns whether this operand references memory.
    pub fn is_memory(self) -> bool {
        matches!(self, Self::Memory | Self::MemoryOffset)
    }

    pub fn is_near_branch(self) -> bool {
        matches!(self, Self::NearBranch16 | Self::NearBranch32 | Self::NearBranch64)
    }

    pub fn is_far_branch(self) -> bool {
        matches!(self, Self::FarBranch16 | Self::FarBranch32)
    }
}

/// EVEX static rounding mode (`{rn-sae}`, `{rd-sae}`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingControl {
    #[default]
    None,
    RoundToNearest,
    RoundDown,
    RoundUp,
    RoundTowardZero,
}

impl RoundingControl {
    /// Rounding mode for the two EVEX.L'L bits of a register-only `{er}` form.
    pub fn from_evex_ll(ll: u8) -> Self {
        match ll & 3 {
            0 => Self::RoundToNearest,
            1 => Self::RoundDown,
            2 => Self::RoundUp,
            _ => Self::RoundTowardZero,
        }
    }
}
