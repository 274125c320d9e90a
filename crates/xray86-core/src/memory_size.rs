//! Memory operand size and shape tags.

/// Size and element shape of a memory operand.
///
/// `Packed*` tags describe a full vector load or store, `Broadcast*` tags an
/// EVEX embedded broadcast of one element to every lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(non_camel_case_types)]
pub enum MemorySize {
    /// No memory operand, or a size-less reference (LEA, NOP r/m).
    #[default]
    Unknown,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int32,
    Int64,
    Float32,
    Float64,
    UInt128,
    UInt256,
    UInt512,
    /// Far pointer, 16-bit offset and selector.
    SegPtr16,
    /// Far pointer, 32-bit offset and selector.
    SegPtr32,
    Bound16_WordWord,
    Bound32_DwordDword,
    Packed32_Int8,
    Packed32_Int16,
    Packed64_Int8,
    Packed64_Int16,
    Packed64_Int32,
    Packed64_Int64,
    Packed128_Int8,
    Packed128_Int16,
    Packed128_Int32,
    Packed128_Int64,
    Packed128_UInt32,
    Packed128_UInt64,
    Packed128_Float32,
    Packed128_Float64,
    Packed256_Int8,
    Packed256_Int16,
    Packed256_Int32,
    Packed256_Int64,
    Packed256_UInt32,
    Packed256_UInt64,
    Packed256_Float32,
    Packed256_Float64,
    Packed512_Int8,
    Packed512_Int16,
    Packed512_Int32,
    Packed512_Int64,
    Packed512_UInt32,
    Packed512_UInt64,
    Packed512_Float32,
    Packed512_Float64,
    Broadcast128_Int32,
    Broadcast128_Int64,
    Broadcast128_UInt32,
    Broadcast128_UInt64,
    Broadcast128_Float32,
    Broadcast128_Float64,
    Broadcast256_Int32,
    Broadcast256_Int64,
    Broadcast256_UInt32,
    Broadcast256_UInt64,
    Broadcast256_Float32,
    Broadcast256_Float64,
    Broadcast512_Int32,
    Broadcast512_Int64,
    Broadcast512_UInt32,
    Broadcast512_UInt64,
    Broadcast512_Float32,
    Broadcast512_Float64,
}

impl MemorySize {
    /// Number of bytes accessed in memory (the element size for broadcasts).
    pub fn size(self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::UInt8 => 1,
            Self::UInt16 => 2,
            Self::UInt32 => 4,
            Self::UInt64 => 8,
            Self::Int32 => 4,
            Self::Int64 => 8,
            Self::Float32 => 4,
            Self::Float64 => 8,
            Self::UInt128 => 16,
            Self::UInt256 => 32,
            Self::UInt512 => 64,
            Self::SegPtr16 => 4,
            Self::SegPtr32 => 6,
            Self::Bound16_WordWord => 4,
            Self::Bound32_DwordDword => 8,
            Self::Packed32_Int8 => 4,
            Self::Packed32_Int16 => 4,
            Self::Packed64_Int8 => 8,
            Self::Packed64_Int16 => 8,
            Self::Packed64_Int32 => 8,
            Self::Packed64_Int64 => 8,
            Self::Packed128_Int8 => 16,
            Self::Packed128_Int16 => 16,
            Self::Packed128_Int32 => 16,
            Self::Packed128_Int64 => 16,
            Self::Packed128_UInt32 => 16,
            Self::Packed128_UInt64 => 16,
            Self::Packed128_Float32 => 16,
            Self::Packed128_Float64 => 16,
            Self::Packed256_Int8 => 32,
            Self::Packed256_Int16 => 32,
            Self::Packed256_Int32 => 32,
            Self::Packed256_Int64 => 32,
            Self::Packed256_UInt32 => 32,
            Self::Packed256_UInt64 => 32,
            Self::Packed256_Float32 => 32,
            Self::Packed256_Float64 => 32,
            Self::Packed512_Int8 => 64,
            Self::Packed512_Int16 => 64,
            Self::Packed512_Int32 => 64,
            Self::Packed512_Int64 => 64,
            Self::Packed512_UInt32 => 64,
            Self::Packed512_UInt64 => 64,
            Self::Packed512_Float32 => 64,
            Self::Packed512_Float64 => 64,
            Self::Broadcast128_Int32 => 4,
            Self::Broadcast128_Int64 => 8,
            Self::Broadcast128_UInt32 => 4,
            Self::Broadcast128_UInt64 => 8,
            Self::Broadcast128_Float32 => 4,
            Self::Broadcast128_Float64 => 8,
            Self::Broadcast256_Int32 => 4,
            Self::Broadcast256_Int64 => 8,
            Self::Broadcast256_UInt32 => 4,
            Self::Broadcast256_UInt64 => 8,
            Self::Broadcast256_Float32 => 4,
            Self::Broadcast256_Float64 => 8,
            Self::Broadcast512_Int32 => 4,
            Self::Broadcast512_Int64 => 8,
            Self::Broadcast512_UInt32 => 4,
            Self::Broadcast512_UInt64 => 8,
            Self::Broadcast512_Float32 => 4,
            Self::Broadcast512_Float64 => 8,
        }
    }

    /// Size of one element in bytes (the whole size for scalars).
    pub fn element_size(self) -> usize {
        match self {
            Self::SegPtr16 => 2,
            Self::SegPtr32 => 4,
            Self::Bound16_WordWord => 2,
            Self::Bound32_DwordDword => 4,
            Self::Packed32_Int8
            | Self::Packed64_Int8
            | Self::Packed128_Int8
            | Self::Packed256_Int8
            | Self::Packed512_Int8 => 1,
            Self::Packed32_Int16
            | Self::Packed64_Int16
            | Self::Packed128_Int16
            | Self::Packed256_Int16
            | Self::Packed512_Int16 => 2,
            Self::Packed64_Int32
            | Self::Packed128_Int32
            | Self::Packed128_UInt32
            | Self::Packed128_Float32
            | Self::Packed256_Int32
            | Self::Packed256_UInt32
            | Self::Packed256_Float32
            | Self::Packed512_Int32
            | Self::Packed512_UInt32
            | Self::Packed512_Float32
            | Self::Broadcast128_Int32
            | Self::Broadcast128_UInt32
            | Self::Broadcast128_Float32
            | Self::Broadcast256_Int32
            | Self::Broadcast256_UInt32
            | Self::Broadcast256_Float32
            | Self::Broadcast512_Int32
            | Self::Broadcast512_UInt32
            | Self::Broadcast512_Float32 => 4,
            Self::Packed64_Int64
            | Self::Packed128_Int64
            | Self::Packed128_UInt64
            | Self::Packed128_Float64
            | Self::Packed256_Int64
            | Self::Packed256_UInt64
            | Self::Packed256_Float64
            | Self::Packed512_Int64
            | Self::Packed512_UInt64
            | Self::Packed512_Float64
            | Self::Broadcast128_Int64
            | Self::Broadcast128_UInt64
            | Self::Broadcast128_Float64
            | Self::Broadcast256_Int64
            | Self::Broadcast256_UInt64
            | Self::Broadcast256_Float64
            | Self::Broadcast512_Int64
            | Self::Broadcast512_UInt64
            | Self::Broadcast512_Float64 => 8,
            other => other.size(),
        }
    }

    /// Returns whether this is an EVEX embedded-broadcast tag.
    pub fn is_broadcast(self) -> bool {
        matches!(
            self,
            Self::Broadcast128_Int32
                | Self::Broadcast128_Int64
                | Self::Broadcast128_UInt32
                | Self::Broadcast128_UInt64
                | Self::Broadcast128_Float32
                | Self::Broadcast128_Float64
                | Self::Broadcast256_Int32
                | Self::Broadcast256_Int64
                | Self::Broadcast256_UInt32
                | Self::Broadcast256_UInt64
                | Self::Broadcast256_Float32
                | Self::Broadcast256_Float64
                | Self::Broadcast512_Int32
                | Self::Broadcast512_Int64
                | Self::Broadcast512_UInt32
                | Self::Broadcast512_UInt64
                | Self::Broadcast512_Float32
                | Self::Broadcast512_Float64
        )
    }
}
