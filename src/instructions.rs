use byteorder::ByteOrder;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::ToPrimitive;
use util::Endian;

use crate::constants;

/// Machine instruction set.
///
/// Every instruction is a `u32` opcode followed by a single `u32` operand;
/// opcodes that take no operand are encoded with operand 0. Arithmetic and
/// branching run through [`EVAL`](Opcode::EVAL), whose operand selects an
/// [`EvalOp`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum Opcode {
    /// Does nothing.
    NOP = 0x0000_0000,
    /// Pushes the operand onto the operand stack (zero-extended).
    DSTORE = 0x0000_0001,
    /// Pushes the variable slot named by the operand.
    DLOAD = 0x0000_0002,
    /// Pops the stack top into the variable slot named by the operand,
    /// truncating to 32 bits.
    DWRITE = 0x0000_0003,
    /// Performs the stack operation selected by the operand.
    EVAL = 0x0000_0005,
    /// Jumps to the byte address in the operand;
    /// [`HALT_ADDRESS`](constants::HALT_ADDRESS) stops the machine instead.
    JUMP = 0x0000_0006,
    /// Reads the next integer token from the input and pushes it.
    GETI = 0x0000_0007,
    /// Reads the next input byte and pushes its code point.
    GETC = 0x0000_0008,
    /// Pops the stack top and prints it as a signed 32-bit decimal.
    PUTI = 0x0000_0009,
    /// Pops the stack top and prints it as an ASCII byte if it truncates
    /// into `0..=127`; other values produce no output.
    PUTC = 0x0000_000A,
}

/// Stack operations selected by the operand of [`Opcode::EVAL`].
///
/// Binary operations pop the right operand, then the left, and push the
/// result. `ADD` and `MUL` keep the full 64-bit result on the stack; `SUB`,
/// `DIV` and `MOD` truncate to 32 bits. Comparisons push 0 or 1.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum EvalOp {
    ADD = 0x0001_0001,
    SUB = 0x0001_0002,
    MUL = 0x0001_0003,
    /// Floored division. A zero divisor is fatal.
    DIV = 0x0001_0004,
    /// Floored modulus, non-negative whenever the divisor is positive.
    /// A zero divisor is fatal.
    MOD = 0x0001_0005,
    GT = 0x0001_0006,
    LT = 0x0001_0007,
    GE = 0x0001_0008,
    LE = 0x0001_0009,
    EQ = 0x0001_000A,
    NE = 0x0001_000B,
    /// Pops the else target, the then target and the condition (in that
    /// order) and jumps to the then target if the condition is non-zero,
    /// to the else target otherwise.
    COND_JUMP = 0x0001_000C,
}

/// A single decoded instruction.
///
/// The opcode is kept as a raw `u32` so that images with unknown opcodes
/// can be loaded; the machine reports them when (and only when) they are
/// reached.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub opcode: u32,
    pub operand: u32,
}

impl Instruction {
    pub fn new(opcode: Opcode, operand: u32) -> Instruction {
        Instruction {
            opcode: enum_to_u32(opcode),
            operand,
        }
    }

    pub fn eval(op: EvalOp) -> Instruction {
        Instruction::new(Opcode::EVAL, enum_to_u32(op))
    }
}

#[inline]
pub fn enum_to_u32<T: ToPrimitive>(val: T) -> u32 {
    val.to_u32().unwrap()
}

/// Constructs an [`Instruction`] from an opcode mnemonic and an optional
/// operand.
#[macro_export]
macro_rules! instr {
    ($opcode:ident) => {
        $crate::instr!($opcode, 0)
    };
    ($opcode:ident, $operand:expr) => {
        $crate::Instruction::new($crate::Opcode::$opcode, $operand)
    };
}

/// Constructs an `EVAL` [`Instruction`] from a sub-operation mnemonic.
#[macro_export]
macro_rules! eval_instr {
    ($op:ident) => {
        $crate::Instruction::eval($crate::EvalOp::$op)
    };
}

/// Decodes a big-endian instruction image.
///
/// The slice length must be a multiple of
/// [`INSTRUCTION_BYTES`](constants::INSTRUCTION_BYTES); the container codec
/// guarantees this for loaded executables. Trailing partial instructions
/// would be dropped.
pub fn decode_instructions(bytes: &[u8]) -> Vec<Instruction> {
    bytes
        .chunks_exact(constants::INSTRUCTION_BYTES as usize)
        .map(|chunk| Instruction {
            opcode: Endian::read_u32(&chunk[..4]),
            operand: Endian::read_u32(&chunk[4..]),
        })
        .collect()
}

/// Encodes instructions into their big-endian byte image.
pub fn encode_instructions(instructions: &[Instruction]) -> Vec<u8> {
    let mut bytes = vec![0u8; instructions.len() * constants::INSTRUCTION_BYTES as usize];
    for (i, instruction) in instructions.iter().enumerate() {
        let offset = i * constants::INSTRUCTION_BYTES as usize;
        Endian::write_u32(&mut bytes[offset..offset + 4], instruction.opcode);
        Endian::write_u32(&mut bytes[offset + 4..offset + 8], instruction.operand);
    }
    bytes
}
