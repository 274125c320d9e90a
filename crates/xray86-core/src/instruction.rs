//! Decoded instruction record.

use crate::{Code, EncodingKind, MemorySize, OpKind, Register, RoundingControl};

/// Maximum number of explicit operands of one instruction.
pub const MAX_OPERANDS: usize = 5;

/// Width of the vector index of a VSIB memory operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VsibIndex {
    /// Not a VSIB operand.
    #[default]
    None,
    /// Dword indices (`vm32x`, `vm32y`, `vm32z`).
    Dword,
    /// Qword indices (`vm64x`, `vm64y`, `vm64z`).
    Qword,
}

/// The memory operand of an instruction. x86 encodes at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryOperand {
    /// Base register, `Register::None` if absent.
    pub base: Register,
    /// Index register, `Register::None` if absent. A vector register for VSIB.
    pub index: Register,
    /// Index scale as encoded (1, 2, 4 or 8).
    pub scale: u8,
    /// Displacement, sign-extended to the address size.
    pub displacement: u64,
    /// Encoded displacement size in bytes (0 if none).
    pub displ_size: u8,
    /// Size and shape of the referenced data.
    pub size: MemorySize,
    /// VSIB index width.
    pub vsib: VsibIndex,
}

impl Default for MemoryOperand {
    fn default() -> Self {
        Self {
            base: Register::None,
            index: Register::None,
            scale: 1,
            displacement: 0,
            displ_size: 0,
            size: MemorySize::Unknown,
            vsib: VsibIndex::None,
        }
    }
}

/// A fully decoded x86 instruction.
///
/// `Instruction::default()` is the `Code::INVALID` sentinel. All fields are
/// plain values; an instruction borrows nothing from the decoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    ip: u64,
    len: u8,
    code: Code,
    encoding: EncodingKind,
    op_count: u8,
    op_kinds: [OpKind; MAX_OPERANDS],
    op_registers: [Register; MAX_OPERANDS],
    immediate: u64,
    immediate8_2nd: u8,
    branch_target: u64,
    far_selector: u16,
    memory: MemoryOperand,
    segment_prefix: Register,
    lock: bool,
    repe: bool,
    repne: bool,
    op_mask: Register,
    zeroing_masking: bool,
    rounding_control: RoundingControl,
    suppress_all_exceptions: bool,
}

impl Instruction {
    /// Creates an empty (invalid) instruction at `ip`.
    pub fn new(ip: u64) -> Self {
        Self {
            ip,
            ..Self::default()
        }
    }

    // ---- identity ------------------------------------------------------

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn is_invalid(&self) -> bool {
        self.code == Code::INVALID
    }

    pub fn encoding(&self) -> EncodingKind {
        self.encoding
    }

    /// Address of the first byte.
    pub fn ip(&self) -> u64 {
        self.ip
    }

    /// Address of the following instruction.
    pub fn next_ip(&self) -> u64 {
        self.ip.wrapping_add(self.len as u64)
    }

    /// Number of bytes consumed (1..=15).
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Same as [`Instruction::len`].
    pub fn byte_length(&self) -> usize {
        self.len as usize
    }

    // ---- operands ------------------------------------------------------

    pub fn op_count(&self) -> usize {
        self.op_count as usize
    }

    /// Kind of operand `operand`. Slots past `op_count()` report `Register`.
    pub fn op_kind(&self, operand: usize) -> OpKind {
        self.op_kinds.get(operand).copied().unwrap_or_default()
    }

    /// Register of operand `operand`, `Register::None` unless it is a register operand.
    pub fn op_register(&self, operand: usize) -> Register {
        self.op_registers.get(operand).copied().unwrap_or_default()
    }

    pub fn op0_kind(&self) -> OpKind {
        self.op_kinds[0]
    }

    pub fn op1_kind(&self) -> OpKind {
        self.op_kinds[1]
    }

    pub fn op2_kind(&self) -> OpKind {
        self.op_kinds[2]
    }

    pub fn op3_kind(&self) -> OpKind {
        self.op_kinds[3]
    }

    pub fn op4_kind(&self) -> OpKind {
        self.op_kinds[4]
    }

    pub fn op0_register(&self) -> Register {
        self.op_registers[0]
    }

    pub fn op1_register(&self) -> Register {
        self.op_registers[1]
    }

    pub fn op2_register(&self) -> Register {
        self.op_registers[2]
    }

    pub fn op3_register(&self) -> Register {
        self.op_registers[3]
    }

    pub fn op4_register(&self) -> Register {
        self.op_registers[4]
    }

    /// Returns whether any operand references memory.
    pub fn has_memory_operand(&self) -> bool {
        self.op_kinds[..self.op_count()].iter().any(|k| k.is_memory())
    }

    /// Immediate value of operand `operand`, extended as its kind says.
    /// Returns 0 if the operand is not an immediate.
    pub fn immediate(&self, operand: usize) -> u64 {
        match self.op_kind(operand) {
            OpKind::Immediate8_2nd => self.immediate8_2nd as u64,
            kind if kind.is_immediate() => self.immediate,
            _ => 0,
        }
    }

    pub fn immediate8(&self) -> u8 {
        self.immediate as u8
    }

    pub fn immediate8_2nd(&self) -> u8 {
        self.immediate8_2nd
    }

    pub fn immediate16(&self) -> u16 {
        self.immediate as u16
    }

    pub fn immediate32(&self) -> u32 {
        self.immediate as u32
    }

    pub fn immediate64(&self) -> u64 {
        self.immediate
    }

    /// Target of a near branch, already masked to the operand size.
    pub fn near_branch_target(&self) -> u64 {
        self.branch_target
    }

    pub fn far_branch_selector(&self) -> u16 {
        self.far_selector
    }

    /// Offset part of a far branch.
    pub fn far_branch32(&self) -> u32 {
        self.branch_target as u32
    }

    // ---- memory --------------------------------------------------------

    pub fn memory(&self) -> &MemoryOperand {
        &self.memory
    }

    /// Effective segment of the memory operand: the override if present, SS
    /// for stack-based addressing, DS otherwise.
    pub fn memory_segment(&self) -> Register {
        if self.segment_prefix != Register::None {
            self.segment_prefix
        } else if self.memory.base.is_stack_base() {
            Register::SS
        } else {
            Register::DS
        }
    }

    pub fn memory_base(&self) -> Register {
        self.memory.base
    }

    pub fn memory_index(&self) -> Register {
        self.memory.index
    }

    pub fn memory_index_scale(&self) -> u32 {
        self.memory.scale as u32
    }

    /// Low 32 bits of the displacement.
    pub fn memory_displacement(&self) -> u32 {
        self.memory.displacement as u32
    }

    pub fn memory_displacement64(&self) -> u64 {
        self.memory.displacement
    }

    pub fn memory_displ_size(&self) -> u32 {
        self.memory.displ_size as u32
    }

    pub fn memory_size(&self) -> MemorySize {
        self.memory.size
    }

    pub fn is_broadcast(&self) -> bool {
        self.memory.size.is_broadcast()
    }

    pub fn is_vsib(&self) -> bool {
        self.memory.vsib != VsibIndex::None
    }

    pub fn is_vsib32(&self) -> bool {
        self.memory.vsib == VsibIndex::Dword
    }

    pub fn is_vsib64(&self) -> bool {
        self.memory.vsib == VsibIndex::Qword
    }

    /// Absolute address of a RIP/EIP-relative memory operand.
    pub fn ip_rel_memory_address(&self) -> u64 {
        match self.memory.base {
            Register::RIP => self.next_ip().wrapping_add(self.memory.displacement),
            Register::EIP => (self.next_ip() as u32).wrapping_add(self.memory.displacement as u32) as u64,
            _ => self.memory.displacement,
        }
    }

    // ---- prefixes ------------------------------------------------------

    pub fn has_lock_prefix(&self) -> bool {
        self.lock
    }

    pub fn has_repe_prefix(&self) -> bool {
        self.repe
    }

    pub fn has_repne_prefix(&self) -> bool {
        self.repne
    }

    /// Explicit segment override prefix, `Register::None` if absent.
    pub fn segment_prefix(&self) -> Register {
        self.segment_prefix
    }

    // ---- EVEX ----------------------------------------------------------

    /// Opmask register, `Register::None` when unmasked.
    pub fn op_mask(&self) -> Register {
        self.op_mask
    }

    pub fn has_op_mask(&self) -> bool {
        self.op_mask != Register::None
    }

    pub fn zeroing_masking(&self) -> bool {
        self.zeroing_masking
    }

    pub fn merging_masking(&self) -> bool {
        !self.zeroing_masking
    }

    pub fn rounding_control(&self) -> RoundingControl {
        self.rounding_control
    }

    pub fn suppress_all_exceptions(&self) -> bool {
        self.suppress_all_exceptions
    }

    // ---- construction (used by decoders) -------------------------------

    pub fn set_ip(&mut self, ip: u64) {
        self.ip = ip;
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len as u8;
    }

    pub fn set_code(&mut self, code: Code) {
        self.code = code;
    }

    pub fn set_encoding(&mut self, encoding: EncodingKind) {
        self.encoding = encoding;
    }

    pub fn set_op_count(&mut self, count: usize) {
        self.op_count = count.min(MAX_OPERANDS) as u8;
    }

    pub fn set_op_kind(&mut self, operand: usize, kind: OpKind) {
        if let Some(slot) = self.op_kinds.get_mut(operand) {
            *slot = kind;
        }
    }

    pub fn set_op_register(&mut self, operand: usize, register: Register) {
        if let Some(slot) = self.op_registers.get_mut(operand) {
            *slot = register;
        }
    }

    pub fn set_immediate(&mut self, value: u64) {
        self.immediate = value;
    }

    pub fn set_immediate8_2nd(&mut self, value: u8) {
        self.immediate8_2nd = value;
    }

    pub fn set_near_branch_target(&mut self, target: u64) {
        self.branch_target = target;
    }

    pub fn set_far_branch(&mut self, selector: u16, offset: u32) {
        self.far_selector = selector;
        self.branch_target = offset as u64;
    }

    pub fn set_memory(&mut self, memory: MemoryOperand) {
        self.memory = memory;
    }

    pub fn set_memory_size(&mut self, size: MemorySize) {
        self.memory.size = size;
    }

    pub fn set_segment_prefix(&mut self, segment: Register) {
        self.segment_prefix = segment;
    }

    pub fn set_lock_prefix(&mut self, value: bool) {
        self.lock = value;
    }

    pub fn set_repe_prefix(&mut self, value: bool) {
        self.repe = value;
    }

    pub fn set_repne_prefix(&mut self, value: bool) {
        self.repne = value;
    }

    pub fn set_op_mask(&mut self, mask: Register) {
        self.op_mask = mask;
    }

    pub fn set_zeroing_masking(&mut self, value: bool) {
        self.zeroing_masking = value;
    }

    pub fn set_rounding_control(&mut self, rc: RoundingControl) {
        self.rounding_control = rc;
    }

    pub fn set_suppress_all_exceptions(&mut self, value: bool) {
        self.suppress_all_exceptions = value;
    }
}
