//! x86 register file.
//!
//! Registers are a flat enum grouped by class. The decoder maps an encoded
//! register number to a register of the class an operand requires through the
//! per-class lookup functions (`gpr32`, `xmm`, ...), which never panic: indices
//! are masked to the size of the class.

/// Register class, as required by an operand slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegisterClass {
    /// 8-bit general purpose (AL..R15L, AH..BH).
    Gpr8,
    /// 16-bit general purpose.
    Gpr16,
    /// 32-bit general purpose.
    Gpr32,
    /// 64-bit general purpose.
    Gpr64,
    /// Segment register (ES..GS).
    Segment,
    /// MMX register (MM0..MM7).
    Mmx,
    /// 128-bit vector register.
    Xmm,
    /// 256-bit vector register.
    Ymm,
    /// 512-bit vector register.
    Zmm,
    /// AVX-512 opmask register (K0..K7).
    Opmask,
}

/// An x86 register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Register {
    #[default]
    None,
    // 8-bit
    AL, CL, DL, BL, AH, CH, DH, BH, SPL, BPL, SIL, DIL, R8L, R9L, R10L, R11L, R12L, R13L, R14L,
    R15L,
    // 16-bit
    AX, CX, DX, BX, SP, BP, SI, DI, R8W, R9W, R10W, R11W, R12W, R13W, R14W, R15W,
    // 32-bit
    EAX, ECX, EDX, EBX, ESP, EBP, ESI, EDI, R8D, R9D, R10D, R11D, R12D, R13D, R14D, R15D,
    // 64-bit
    RAX, RCX, RDX, RBX, RSP, RBP, RSI, RDI, R8, R9, R10, R11, R12, R13, R14, R15,
    // Instruction pointer (RIP-relative addressing)
    EIP, RIP,
    // Segment
    ES, CS, SS, DS, FS, GS,
    MM0, MM1, MM2, MM3, MM4, MM5, MM6, MM7,
    XMM0, XMM1, XMM2, XMM3, XMM4, XMM5, XMM6, XMM7, XMM8, XMM9, XMM10, XMM11, XMM12, XMM13,
    XMM14, XMM15, XMM16, XMM17, XMM18, XMM19, XMM20, XMM21, XMM22, XMM23, XMM24, XMM25, XMM26,
    XMM27, XMM28, XMM29, XMM30, XMM31,
    YMM0, YMM1, YMM2, YMM3, YMM4, YMM5, YMM6, YMM7, YMM8, YMM9, YMM10, YMM11, YMM12, YMM13,
    YMM14, YMM15, YMM16, YMM17, YMM18, YMM19, YMM20, YMM21, YMM22, YMM23, YMM24, YMM25, YMM26,
    YMM27, YMM28, YMM29, YMM30, YMM31,
    ZMM0, ZMM1, ZMM2, ZMM3, ZMM4, ZMM5, ZMM6, ZMM7, ZMM8, ZMM9, ZMM10, ZMM11, ZMM12, ZMM13,
    ZMM14, ZMM15, ZMM16, ZMM17, ZMM18, ZMM19, ZMM20, ZMM21, ZMM22, ZMM23, ZMM24, ZMM25, ZMM26,
    ZMM27, ZMM28, ZMM29, ZMM30, ZMM31,
    K0, K1, K2, K3, K4, K5, K6, K7,
}

const GPR8_LEGACY: [Register; 8] = [
    Register::AL, Register::CL, Register::DL, Register::BL, Register::AH, Register::CH,
    Register::DH, Register::BH,
];

const GPR8_REX: [Register; 16] = [
    Register::AL, Register::CL, Register::DL, Register::BL, Register::SPL, Register::BPL,
    Register::SIL, Register::DIL, Register::R8L, Register::R9L, Register::R10L, Register::R11L,
    Register::R12L, Register::R13L, Register::R14L, Register::R15L,
];

const GPR16: [Register; 16] = [
    Register::AX, Register::CX, Register::DX, Register::BX, Register::SP, Register::BP,
    Register::SI, Register::DI, Register::R8W, Register::R9W, Register::R10W, Register::R11W,
    Register::R12W, Register::R13W, Register::R14W, Register::R15W,
];

const GPR32: [Register; 16] = [
    Register::EAX, Register::ECX, Register::EDX, Register::EBX, Register::ESP, Register::EBP,
    Register::ESI, Register::EDI, Register::R8D, Register::R9D, Register::R10D, Register::R11D,
    Register::R12D, Register::R13D, Register::R14D, Register::R15D,
];

const GPR64: [Register; 16] = [
    Register::RAX, Register::RCX, Register::RDX, Register::RBX, Register::RSP, Register::RBP,
    Register::RSI, Register::RDI, Register::R8, Register::R9, Register::R10, Register::R11,
    Register::R12, Register::R13, Register::R14, Register::R15,
];

const SEGMENT: [Register; 6] = [
    Register::ES, Register::CS, Register::SS, Register::DS, Register::FS, Register::GS,
];

const MMX: [Register; 8] = [
    Register::MM0, Register::MM1, Register::MM2, Register::MM3, Register::MM4, Register::MM5,
    Register::MM6, Register::MM7,
];

const XMM: [Register; 32] = [
    Register::XMM0, Register::XMM1, Register::XMM2, Register::XMM3, Register::XMM4,
    Register::XMM5, Register::XMM6, Register::XMM7, Register::XMM8, Register::XMM9,
    Register::XMM10, Register::XMM11, Register::XMM12, Register::XMM13, Register::XMM14,
    Register::XMM15, Register::XMM16, Register::XMM17, Register::XMM18, Register::XMM19,
    Register::XMM20, Register::XMM21, Register::XMM22, Register::XMM23, Register::XMM24,
    Register::XMM25, Register::XMM26, Register::XMM27, Register::XMM28, Register::XMM29,
    Register::XMM30, Register::XMM31,
];

const YMM: [Register; 32] = [
    Register::YMM0, Register::YMM1, Register::YMM2, Register::YMM3, Register::YMM4,
    Register::YMM5, Register::YMM6, Register::YMM7, Register::YMM8, Register::YMM9,
    Register::YMM10, Register::YMM11, Register::YMM12, Register::YMM13, Register::YMM14,
    Register::YMM15, Register::YMM16, Register::YMM17, Register::YMM18, Register::YMM19,
    Register::YMM20, Register::YMM21, Register::YMM22, Register::YMM23, Register::YMM24,
    Register::YMM25, Register::YMM26, Register::YMM27, Register::YMM28, Register::YMM29,
    Register::YMM30, Register::YMM31,
];

const ZMM: [Register; 32] = [
    Register::ZMM0, Register::ZMM1, Register::ZMM2, Register::ZMM3, Register::ZMM4,
    Register::ZMM5, Register::ZMM6, Register::ZMM7, Register::ZMM8, Register::ZMM9,
    Register::ZMM10, Register::ZMM11, Register::ZMM12, Register::ZMM13, Register::ZMM14,
    Register::ZMM15, Register::ZMM16, Register::ZMM17, Register::ZMM18, Register::ZMM19,
    Register::ZMM20, Register::ZMM21, Register::ZMM22, Register::ZMM23, Register::ZMM24,
    Register::ZMM25, Register::ZMM26, Register::ZMM27, Register::ZMM28, Register::ZMM29,
    Register::ZMM30, Register::ZMM31,
];

const OPMASK: [Register; 8] = [
    Register::K0, Register::K1, Register::K2, Register::K3, Register::K4, Register::K5,
    Register::K6, Register::K7,
];

impl Register {
    /// 8-bit GPR for an encoded register number.
    ///
    /// Numbers 4..=7 select AH/CH/DH/BH without a REX prefix and SPL/BPL/SIL/DIL
    /// with one.
    pub fn gpr8(number: u8, has_rex: bool) -> Self {
        let n = (number & 0x0F) as usize;
        if has_rex || n >= 8 {
            GPR8_REX[n]
        } else {
            GPR8_LEGACY[n]
        }
    }

    /// 16-bit GPR for an encoded register number.
    pub fn gpr16(number: u8) -> Self {
        GPR16[(number & 0x0F) as usize]
    }

    /// 32-bit GPR for an encoded register number.
    pub fn gpr32(number: u8) -> Self {
        GPR32[(number & 0x0F) as usize]
    }

    /// 64-bit GPR for an encoded register number.
    pub fn gpr64(number: u8) -> Self {
        GPR64[(number & 0x0F) as usize]
    }

    /// Segment register for an encoded number; 6 and 7 are reserved.
    pub fn segment(number: u8) -> Option<Self> {
        SEGMENT.get((number & 0x07) as usize).copied()
    }

    pub fn mm(number: u8) -> Self {
        MMX[(number & 0x07) as usize]
    }

    pub fn xmm(number: u8) -> Self {
        XMM[(number & 0x1F) as usize]
    }

    pub fn ymm(number: u8) -> Self {
        YMM[(number & 0x1F) as usize]
    }

    pub fn zmm(number: u8) -> Self {
        ZMM[(number & 0x1F) as usize]
    }

    pub fn k(number: u8) -> Self {
        OPMASK[(number & 0x07) as usize]
    }

    /// Register of `class` for an encoded number.
    ///
    /// Returns `None` for the reserved segment encodings.
    pub fn from_class(class: RegisterClass, number: u8, has_rex: bool) -> Option<Self> {
        Some(match class {
            RegisterClass::Gpr8 => Self::gpr8(number, has_rex),
            RegisterClass::Gpr16 => Self::gpr16(number),
            RegisterClass::Gpr32 => Self::gpr32(number),
            RegisterClass::Gpr64 => Self::gpr64(number),
            RegisterClass::Segment => return Self::segment(number),
            RegisterClass::Mmx => Self::mm(number),
            RegisterClass::Xmm => Self::xmm(number),
            RegisterClass::Ymm => Self::ymm(number),
            RegisterClass::Zmm => Self::zmm(number),
            RegisterClass::Opmask => Self::k(number),
        })
    }

    /// Returns the class of this register, or `None` for `Register::None` and
    /// the instruction pointers.
    pub fn class(self) -> Option<RegisterClass> {
        let r = self as u8;
        let class = if r >= Self::AL as u8 && r <= Self::R15L as u8 {
            RegisterClass::Gpr8
        } else if r >= Self::AX as u8 && r <= Self::R15W as u8 {
            RegisterClass::Gpr16
        } else if r >= Self::EAX as u8 && r <= Self::R15D as u8 {
            RegisterClass::Gpr32
        } else if r >= Self::RAX as u8 && r <= Self::R15 as u8 {
            RegisterClass::Gpr64
        } else if r >= Self::ES as u8 && r <= Self::GS as u8 {
            RegisterClass::Segment
        } else if r >= Self::MM0 as u8 && r <= Self::MM7 as u8 {
            RegisterClass::Mmx
        } else if r >= Self::XMM0 as u8 && r <= Self::XMM31 as u8 {
            RegisterClass::Xmm
        } else if r >= Self::YMM0 as u8 && r <= Self::YMM31 as u8 {
            RegisterClass::Ymm
        } else if r >= Self::ZMM0 as u8 && r <= Self::ZMM31 as u8 {
            RegisterClass::Zmm
        } else if r >= Self::K0 as u8 && r <= Self::K7 as u8 {
            RegisterClass::Opmask
        } else {
            return None;
        };
        Some(class)
    }

    /// Register number within its class (0..=31).
    pub fn number(self) -> u8 {
        let r = self as u8;
        match self.class() {
            Some(RegisterClass::Gpr8) => {
                let n = r - Self::AL as u8;
                // SPL..DIL follow AH..BH in the enum.
                if n < 8 {
                    n
                } else {
                    n - 4
                }
            }
            Some(RegisterClass::Gpr16) => r - Self::AX as u8,
            Some(RegisterClass::Gpr32) => r - Self::EAX as u8,
            Some(RegisterClass::Gpr64) => r - Self::RAX as u8,
            Some(RegisterClass::Segment) => r - Self::ES as u8,
            Some(RegisterClass::Mmx) => r - Self::MM0 as u8,
            Some(RegisterClass::Xmm) => r - Self::XMM0 as u8,
            Some(RegisterClass::Ymm) => r - Self::YMM0 as u8,
            Some(RegisterClass::Zmm) => r - Self::ZMM0 as u8,
            Some(RegisterClass::Opmask) => r - Self::K0 as u8,
            None => 0,
        }
    }

    /// Size of the register in bytes (0 for `Register::None`).
    pub fn size(self) -> usize {
        match self {
            Self::EIP => 4,
            Self::RIP => 8,
            _ => match self.class() {
                Some(RegisterClass::Gpr8) => 1,
                Some(RegisterClass::Gpr16 | RegisterClass::Segment) => 2,
                Some(RegisterClass::Gpr32) => 4,
                Some(RegisterClass::Gpr64 | RegisterClass::Mmx | RegisterClass::Opmask) => 8,
                Some(RegisterClass::Xmm) => 16,
                Some(RegisterClass::Ymm) => 32,
                Some(RegisterClass::Zmm) => 64,
                None => 0,
            },
        }
    }

    pub fn is_gpr(self) -> bool {
        matches!(
            self.class(),
            Some(
                RegisterClass::Gpr8
                    | RegisterClass::Gpr16
                    | RegisterClass::Gpr32
                    | RegisterClass::Gpr64
            )
        )
    }

    pub fn is_vector(self) -> bool {
        matches!(
            self.class(),
            Some(RegisterClass::Xmm | RegisterClass::Ymm | RegisterClass::Zmm)
        )
    }

    pub fn is_xmm(self) -> bool {
        self.class() == Some(RegisterClass::Xmm)
    }

    pub fn is_ymm(self) -> bool {
        self.class() == Some(RegisterClass::Ymm)
    }

    pub fn is_zmm(self) -> bool {
        self.class() == Some(RegisterClass::Zmm)
    }

    pub fn is_opmask(self) -> bool {
        self.class() == Some(RegisterClass::Opmask)
    }

    /// Returns whether this register implies the SS segment when used as a
    /// memory base.
    pub fn is_stack_base(self) -> bool {
        matches!(
            self,
            Self::SP | Self::BP | Self::ESP | Self::EBP | Self::RSP | Self::RBP
        )
    }
}
