/// Size of one encoded instruction in bytes: a `u32` opcode followed by a
/// `u32` operand. Jump targets are byte addresses, so they are always a
/// multiple of this.
pub const INSTRUCTION_BYTES: u32 = 8;

/// `JUMP` operand that stops the machine instead of naming a target.
pub const HALT_ADDRESS: u32 = 0xFFFF_FFFF;
