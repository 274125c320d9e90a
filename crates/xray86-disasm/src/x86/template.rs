//! Opcode table building blocks.
//!
//! Every opcode table is a `[Slot; 256]` indexed by the opcode byte. A slot is
//! either a terminal [`Template`] or a selector node keyed by the mandatory
//! prefix, the ModRM.reg opcode extension or REX.B. A template in turn picks one
//! concrete [`Form`] by operand size, vector length and/or W.

#![allow(non_camel_case_types)]

use bitflags::bitflags;
use xray86_core::{Code, MemorySize, Register, RegisterClass, VsibIndex};

use super::encoding::VectorLength;

/// Where an operand comes from and what it becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandRole {
    /// ModRM.reg as a register.
    Reg(RegisterClass),
    /// ModRM.rm as a register (mod == 11) or memory.
    RegOrMem(RegisterClass),
    /// ModRM.rm, register only.
    RmReg(RegisterClass),
    /// ModRM.rm, memory only.
    Mem,
    /// VEX/XOP/EVEX.vvvv register.
    Vvvv(RegisterClass),
    /// Register in the low three opcode bits, extended by REX.B.
    OpcodeReg(RegisterClass),
    /// Implicit register.
    Fixed(Register),
    /// Register in bits 7:4 of a trailing imm8.
    Is4(RegisterClass),
    /// VSIB memory operand with a vector index of the given class.
    Vsib(RegisterClass, VsibIndex),
    Imm8,
    Imm8_2nd,
    Imm8to16,
    Imm8to32,
    Imm8to64,
    Imm16,
    Imm32,
    Imm32to64,
    Imm64,
    Rel8_16,
    Rel8_32,
    Rel8_64,
    Rel16,
    Rel32_32,
    Rel32_64,
    /// Far pointer, 16-bit offset then selector.
    Ptr16_16,
    /// Far pointer, 32-bit offset then selector.
    Ptr16_32,
    /// Address-size wide absolute offset.
    Moffs,
}

impl OperandRole {
    /// Returns whether this operand is encoded in a ModRM byte.
    pub const fn uses_modrm(&self) -> bool {
        matches!(
            self,
            Self::Reg(_) | Self::RegOrMem(_) | Self::RmReg(_) | Self::Mem | Self::Vsib(..)
        )
    }

    /// Returns whether this operand may be a ModRM memory operand.
    pub const fn may_be_memory(&self) -> bool {
        matches!(self, Self::RegOrMem(_) | Self::Mem | Self::Vsib(..))
    }
}

bitflags! {
    /// Mode restrictions and attribute capabilities of a template.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TemplateFlags: u16 {
        /// Invalid in 64-bit mode.
        const NO_64 = 1 << 0;
        /// Valid only in 64-bit mode.
        const ONLY_64 = 1 << 1;
        /// Operand size defaults to 64 in 64-bit mode (66 selects 16).
        const DEFAULT_64 = 1 << 2;
        /// Operand size is always 64 in 64-bit mode.
        const FORCE_64 = 1 << 3;
        /// Accepts a LOCK prefix when the destination is memory.
        const LOCKABLE = 1 << 4;
        /// W selects the form only in 64-bit mode; W1 decodes as W0 elsewhere.
        const WIG32 = 1 << 5;
        /// EVEX.aaa may name an opmask.
        const OPMASK = 1 << 6;
        /// EVEX.aaa must name an opmask (gather/scatter).
        const REQUIRE_OPMASK = 1 << 7;
        /// EVEX.z may request zeroing-masking.
        const ZEROING = 1 << 8;
        /// EVEX.b on register operands selects static rounding.
        const ROUNDING = 1 << 9;
        /// EVEX.b on register operands suppresses all exceptions.
        const SAE = 1 << 10;
        /// VSIB destination, index and mask registers must be distinct.
        const DISTINCT_GATHER_REGS = 1 << 11;
        /// VEX.L / EVEX.L'L must select 128 bits.
        const L0 = 1 << 12;
    }
}

/// One concrete instruction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Form {
    pub code: Code,
    pub operands: &'static [OperandRole],
    /// Size of the memory operand when it is not broadcast.
    pub mem: MemorySize,
    /// Size of an EVEX embedded broadcast, `Unknown` if the form cannot broadcast.
    pub bcst: MemorySize,
}

impl Form {
    pub const INVALID: Form = Form::new(Code::INVALID, &[]);

    pub const fn new(code: Code, operands: &'static [OperandRole]) -> Self {
        Self {
            code,
            operands,
            mem: MemorySize::Unknown,
            bcst: MemorySize::Unknown,
        }
    }

    pub const fn mem(mut self, mem: MemorySize) -> Self {
        self.mem = mem;
        self
    }

    pub const fn bcst(mut self, bcst: MemorySize) -> Self {
        self.bcst = bcst;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.code != Code::INVALID
    }

    pub fn needs_modrm(&self) -> bool {
        self.operands.iter().any(|op| op.uses_modrm())
    }

    pub fn has_vvvv(&self) -> bool {
        self.operands.iter().any(|op| matches!(op, OperandRole::Vvvv(_)))
    }

    /// Returns the VSIB index class and width, if this is a gather/scatter form.
    pub fn vsib(&self) -> Option<(RegisterClass, VsibIndex)> {
        self.operands.iter().find_map(|op| match *op {
            OperandRole::Vsib(class, width) => Some((class, width)),
            _ => None,
        })
    }

    pub fn may_use_memory(&self) -> bool {
        self.operands.iter().any(|op| op.may_be_memory())
    }

    pub fn can_broadcast(&self) -> bool {
        self.bcst != MemorySize::Unknown
    }
}

/// Effective operand size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpSize {
    W16,
    W32,
    W64,
}

/// The forms of one template and the key that selects among them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forms {
    One(Form),
    /// Indexed by operand size 16/32/64.
    OpSize([Form; 3]),
    /// Indexed by vector length 128/256/512.
    VecLen([Form; 3]),
    /// Indexed by W.
    W([Form; 2]),
    /// Indexed by W, then vector length.
    WVecLen([[Form; 3]; 2]),
}

/// Terminal opcode table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub forms: Forms,
    pub flags: TemplateFlags,
}

impl Template {
    pub const fn one(form: Form) -> Self {
        Self::with_forms(Forms::One(form))
    }

    pub const fn op_size(w16: Form, w32: Form, w64: Form) -> Self {
        Self::with_forms(Forms::OpSize([w16, w32, w64]))
    }

    pub const fn vec_len(l128: Form, l256: Form, l512: Form) -> Self {
        Self::with_forms(Forms::VecLen([l128, l256, l512]))
    }

    pub const fn w(w0: Form, w1: Form) -> Self {
        Self::with_forms(Forms::W([w0, w1]))
    }

    pub const fn w_vec_len(w0: [Form; 3], w1: [Form; 3]) -> Self {
        Self::with_forms(Forms::WVecLen([w0, w1]))
    }

    const fn with_forms(forms: Forms) -> Self {
        Self {
            forms,
            flags: TemplateFlags::empty(),
        }
    }

    pub const fn flags(mut self, flags: TemplateFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// Any form of this template; they all agree on ModRM usage.
    fn first_form(&self) -> &Form {
        match &self.forms {
            Forms::One(f) => f,
            Forms::OpSize(fs) | Forms::VecLen(fs) => {
                fs.iter().find(|f| f.is_valid()).unwrap_or(&fs[0])
            }
            Forms::W(fs) => fs.iter().find(|f| f.is_valid()).unwrap_or(&fs[0]),
            Forms::WVecLen(ws) => ws
                .iter()
                .flatten()
                .find(|f| f.is_valid())
                .unwrap_or(&ws[0][0]),
        }
    }

    pub fn needs_modrm(&self) -> bool {
        self.first_form().needs_modrm()
    }

    /// Picks the form for the decoded operand size, vector length and W.
    ///
    /// Returns `None` when the key selects no valid form.
    pub fn select(&self, op_size: OpSize, length: VectorLength, w: bool) -> Option<&Form> {
        let len_index = |length: VectorLength| match length {
            VectorLength::L128 => Some(0),
            VectorLength::L256 => Some(1),
            VectorLength::L512 => Some(2),
            VectorLength::Reserved => None,
        };
        let form = match &self.forms {
            Forms::One(f) => f,
            Forms::OpSize(fs) => match op_size {
                OpSize::W16 => &fs[0],
                OpSize::W32 => &fs[1],
                OpSize::W64 => &fs[2],
            },
            Forms::VecLen(fs) => &fs[len_index(length)?],
            Forms::W(fs) => &fs[w as usize],
            Forms::WVecLen(ws) => &ws[w as usize][len_index(length)?],
        };
        form.is_valid().then_some(form)
    }
}

/// An opcode table entry.
#[derive(Debug, Clone, Copy)]
pub enum Slot {
    /// No instruction.
    Invalid,
    Op(&'static Template),
    /// Selected by mandatory prefix: none, 66, F3, F2.
    Mandatory(&'static [Slot; 4]),
    /// Selected by ModRM.reg.
    Group(&'static [Slot; 8]),
    /// Selected by whether REX.B extends the opcode register.
    RexB {
        plain: &'static Slot,
        extended: &'static Slot,
    },
}

/// Const invalid entry for array initialization.
pub const INVALID_SLOT: Slot = Slot::Invalid;
