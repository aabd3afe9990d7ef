use std::convert::TryFrom;
use std::fmt;
use std::io::{self, Write};

use num_integer::Integer;
use num_traits::FromPrimitive;
use util::truncate32;

use crate::constants;
use crate::input::Input;
use crate::instructions::{EvalOp, Instruction, Opcode};

/// Fatal execution failures. Any of these aborts the run.
#[derive(Debug)]
pub enum RuntimeError {
    DivisionByZero,
    ModulusByZero,
    /// The opcode at the current instruction is not part of the set.
    UnknownOpcode(u32),
    /// An `EVAL` operand that selects no operation.
    UnknownEvalOp(u32),
    /// A consuming instruction found too few operands on the stack.
    StackUnderflow,
    /// The program counter left the code region; carries the byte address.
    PcOutOfRange(i64),
    /// A variable index past the declared data region.
    VariableOutOfRange(u32),
    Io(io::Error),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeError::DivisionByZero => f.write_str("division by zero"),
            RuntimeError::ModulusByZero => f.write_str("modulus by zero"),
            RuntimeError::UnknownOpcode(opcode) => write!(f, "unknown opcode: {:#x}", opcode),
            RuntimeError::UnknownEvalOp(operand) => {
                write!(f, "unknown eval operand: {:#x}", operand)
            }
            RuntimeError::StackUnderflow => f.write_str("stack underflow"),
            RuntimeError::PcOutOfRange(address) => {
                write!(f, "program counter out of range: {}", address)
            }
            RuntimeError::VariableOutOfRange(index) => {
                write!(f, "variable index out of range: {}", index)
            }
            RuntimeError::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<io::Error> for RuntimeError {
    fn from(err: io::Error) -> RuntimeError {
        RuntimeError::Io(err)
    }
}

enum Step {
    Next,
    Jump(u32),
    Halt,
}

/// The Mandrill stack machine.
///
/// Holds the decoded code image, the zero-initialized variable slots and
/// the operand stack. Stack values are `i64` so that `ADD` and `MUL` keep
/// their full precision across chained arithmetic; truncation to 32 bits
/// happens only where the instruction set demands it.
#[derive(Debug)]
pub struct Machine {
    code: Vec<Instruction>,
    variables: Vec<i32>,
    stack: Vec<i64>,
}

impl Machine {
    pub fn new(code: Vec<Instruction>, var_count: u32) -> Machine {
        Machine {
            code,
            variables: vec![0; var_count as usize],
            stack: Vec::new(),
        }
    }

    /// Variable slots, in index order.
    pub fn variables(&self) -> &[i32] {
        &self.variables
    }

    /// The operand stack, bottom first. A normal halt may leave residue
    /// behind; that is not a failure.
    pub fn stack(&self) -> &[i64] {
        &self.stack
    }

    /// Runs the loaded program until its halt jump.
    ///
    /// `GETI`/`GETC` read from `input`, `PUTI`/`PUTC` write to `output`.
    /// On error the machine state is left as of the failing instruction.
    pub fn run<W: Write>(&mut self, input: &mut Input, output: &mut W) -> Result<(), RuntimeError> {
        let mut pc = 0usize;

        loop {
            let instruction = *self.code.get(pc).ok_or_else(|| {
                RuntimeError::PcOutOfRange(pc as i64 * i64::from(constants::INSTRUCTION_BYTES))
            })?;

            match self.step(instruction, input, output)? {
                Step::Next => pc += 1,
                Step::Jump(address) => pc = (address / constants::INSTRUCTION_BYTES) as usize,
                Step::Halt => return Ok(()),
            }
        }
    }

    fn step<W: Write>(
        &mut self,
        instruction: Instruction,
        input: &mut Input,
        output: &mut W,
    ) -> Result<Step, RuntimeError> {
        let opcode = Opcode::from_u32(instruction.opcode)
            .ok_or(RuntimeError::UnknownOpcode(instruction.opcode))?;
        let operand = instruction.operand;

        match opcode {
            Opcode::NOP => {}

            Opcode::DSTORE => self.stack.push(i64::from(operand)),

            Opcode::DLOAD => {
                let value = *self
                    .variables
                    .get(operand as usize)
                    .ok_or(RuntimeError::VariableOutOfRange(operand))?;
                self.stack.push(i64::from(value));
            }

            Opcode::DWRITE => {
                let value = self.pop()?;
                let slot = self
                    .variables
                    .get_mut(operand as usize)
                    .ok_or(RuntimeError::VariableOutOfRange(operand))?;
                *slot = truncate32(value);
            }

            Opcode::EVAL => return self.eval(operand),

            Opcode::JUMP => {
                return Ok(if operand == constants::HALT_ADDRESS {
                    Step::Halt
                } else {
                    Step::Jump(operand)
                });
            }

            Opcode::GETI => self.stack.push(input.next_integer()),

            Opcode::GETC => self.stack.push(i64::from(input.next_byte())),

            Opcode::PUTI => {
                let value = self.pop()?;
                write!(output, "{}", truncate32(value))?;
            }

            Opcode::PUTC => {
                let value = truncate32(self.pop()?);
                if (0..=127).contains(&value) {
                    output.write_all(&[value as u8])?;
                }
            }
        }

        Ok(Step::Next)
    }

    fn eval(&mut self, operand: u32) -> Result<Step, RuntimeError> {
        let op = EvalOp::from_u32(operand).ok_or(RuntimeError::UnknownEvalOp(operand))?;

        if let EvalOp::COND_JUMP = op {
            let else_target = self.pop()?;
            let then_target = self.pop()?;
            let condition = self.pop()?;

            let target = if condition != 0 {
                then_target
            } else {
                else_target
            };
            let address =
                u32::try_from(target).map_err(|_| RuntimeError::PcOutOfRange(target))?;
            return Ok(Step::Jump(address));
        }

        let right = self.pop()?;
        let left = self.pop()?;

        let result = match op {
            EvalOp::ADD => left.wrapping_add(right),
            EvalOp::SUB => i64::from(truncate32(left.wrapping_sub(right))),
            EvalOp::MUL => left.wrapping_mul(right),
            EvalOp::DIV => {
                if right == 0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                // The quotient of i64::MIN / -1 overflows i64, but its
                // 32-bit truncation equals that of the wrapped negation.
                if right == -1 {
                    i64::from(truncate32(left.wrapping_neg()))
                } else {
                    i64::from(truncate32(left.div_floor(&right)))
                }
            }
            EvalOp::MOD => {
                if right == 0 {
                    return Err(RuntimeError::ModulusByZero);
                }
                if right == -1 {
                    0
                } else {
                    i64::from(truncate32(left.mod_floor(&right)))
                }
            }
            EvalOp::GT => (left > right) as i64,
            EvalOp::LT => (left < right) as i64,
            EvalOp::GE => (left >= right) as i64,
            EvalOp::LE => (left <= right) as i64,
            EvalOp::EQ => (left == right) as i64,
            EvalOp::NE => (left != right) as i64,
            EvalOp::COND_JUMP => unreachable!(),
        };

        self.stack.push(result);
        Ok(Step::Next)
    }

    fn pop(&mut self) -> Result<i64, RuntimeError> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow)
    }
}
