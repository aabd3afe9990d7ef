//! Lowers the AST to a linear instruction list.
//!
//! A single left-to-right walk emits code; variable slots are allocated on
//! first use, in emission order. Structured control flow becomes
//! `COND_JUMP`: the two `DSTORE`s in front of it push the then and else
//! byte targets, which are emitted as placeholders and overwritten once the
//! branch ends are known. Generation finishes by appending the halt jump,
//! so every program image ends with `JUMP 0xFFFFFFFF`.

use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;

use mvm::{constants, EvalOp, Instruction, Opcode};

use crate::ast::{BinOp, Expr, LValue, Program, Stmt};

/// Emitter invariant violations. Parser output can only trigger these by
/// exceeding the 32-bit address space of the container format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenError {
    /// The code region outgrew 32-bit byte addressing.
    CodeTooLarge,
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenError::CodeTooLarge => f.write_str("program is too large to address"),
        }
    }
}

impl std::error::Error for GenError {}

/// A generated program: the instruction list and the number of variable
/// slots it addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generated {
    pub instructions: Vec<Instruction>,
    pub var_count: u32,
}

/// Operand written into patch slots until the real target is known. Shares
/// the halt sentinel's value: an unpatched slot could never be mistaken for
/// a code address.
const PLACEHOLDER: u32 = constants::HALT_ADDRESS;

/// Generates code for a whole program.
pub fn generate(program: &Program) -> Result<Generated, GenError> {
    let mut gen = CodeGen::default();

    for statement in &program.statements {
        gen.statement(statement)?;
    }
    gen.emit(Opcode::JUMP, constants::HALT_ADDRESS);

    // The finished image must stay byte-addressable.
    gen.here()?;

    Ok(Generated {
        instructions: gen.code,
        var_count: gen.var_count,
    })
}

#[derive(Default)]
struct CodeGen {
    code: Vec<Instruction>,
    variables: HashMap<String, u32>,
    var_count: u32,
}

impl CodeGen {
    /// Appends an instruction and returns its index for later patching.
    fn emit(&mut self, opcode: Opcode, operand: u32) -> usize {
        self.code.push(Instruction::new(opcode, operand));
        self.code.len() - 1
    }

    fn emit_eval(&mut self, op: EvalOp) {
        self.code.push(Instruction::eval(op));
    }

    fn patch(&mut self, index: usize, operand: u32) {
        debug_assert_eq!(self.code[index].operand, PLACEHOLDER);
        self.code[index].operand = operand;
    }

    /// Byte address of the next instruction to be emitted.
    fn here(&self) -> Result<u32, GenError> {
        let address = self.code.len() as u64 * u64::from(constants::INSTRUCTION_BYTES);
        u32::try_from(address).map_err(|_| GenError::CodeTooLarge)
    }

    fn var_index(&mut self, name: &str) -> u32 {
        if let Some(&index) = self.variables.get(name) {
            return index;
        }

        let index = self.var_count;
        self.variables.insert(name.to_string(), index);
        self.var_count += 1;
        index
    }

    fn statement(&mut self, statement: &Stmt) -> Result<(), GenError> {
        match statement {
            Stmt::Assign { target, value } => {
                self.expression(value);
                match target {
                    LValue::Var(name) => {
                        let index = self.var_index(name);
                        self.emit(Opcode::DWRITE, index);
                    }
                    LValue::Write => {
                        self.emit(Opcode::PUTI, 0);
                    }
                    LValue::Put => {
                        self.emit(Opcode::PUTC, 0);
                    }
                }
                Ok(())
            }
            Stmt::If {
                condition,
                then_body,
                else_body,
            } => self.if_statement(condition, then_body, else_body.as_deref()),
            Stmt::While { condition, body } => self.while_statement(condition, body),
        }
    }

    fn if_statement(
        &mut self,
        condition: &Expr,
        then_body: &[Stmt],
        else_body: Option<&[Stmt]>,
    ) -> Result<(), GenError> {
        self.expression(condition);
        let then_slot = self.emit(Opcode::DSTORE, PLACEHOLDER);
        let else_slot = self.emit(Opcode::DSTORE, PLACEHOLDER);
        self.emit_eval(EvalOp::COND_JUMP);

        let then_start = self.here()?;
        for statement in then_body {
            self.statement(statement)?;
        }

        match else_body {
            Some(else_statements) => {
                let end_jump = self.emit(Opcode::JUMP, PLACEHOLDER);

                let else_start = self.here()?;
                for statement in else_statements {
                    self.statement(statement)?;
                }

                let end = self.here()?;
                self.patch(then_slot, then_start);
                self.patch(else_slot, else_start);
                self.patch(end_jump, end);
            }
            None => {
                let end = self.here()?;
                self.patch(then_slot, then_start);
                self.patch(else_slot, end);
            }
        }

        Ok(())
    }

    fn while_statement(&mut self, condition: &Expr, body: &[Stmt]) -> Result<(), GenError> {
        let loop_start = self.here()?;
        self.expression(condition);
        let body_slot = self.emit(Opcode::DSTORE, PLACEHOLDER);
        let end_slot = self.emit(Opcode::DSTORE, PLACEHOLDER);
        self.emit_eval(EvalOp::COND_JUMP);

        let body_start = self.here()?;
        for statement in body {
            self.statement(statement)?;
        }
        self.emit(Opcode::JUMP, loop_start);

        let end = self.here()?;
        self.patch(body_slot, body_start);
        self.patch(end_slot, end);

        Ok(())
    }

    fn expression(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(value) => {
                self.emit(Opcode::DSTORE, *value);
            }
            Expr::Var(name) => {
                let index = self.var_index(name);
                self.emit(Opcode::DLOAD, index);
            }
            Expr::Read => {
                self.emit(Opcode::GETI, 0);
            }
            Expr::Get => {
                self.emit(Opcode::GETC, 0);
            }
            Expr::Binary { left, op, right } => {
                self.expression(left);
                self.expression(right);
                self.emit_eval(eval_op(*op));
            }
        }
    }
}

fn eval_op(op: BinOp) -> EvalOp {
    match op {
        BinOp::Add => EvalOp::ADD,
        BinOp::Sub => EvalOp::SUB,
        BinOp::Mul => EvalOp::MUL,
        BinOp::Div => EvalOp::DIV,
        BinOp::Mod => EvalOp::MOD,
        BinOp::Gt => EvalOp::GT,
        BinOp::Lt => EvalOp::LT,
        BinOp::Ge => EvalOp::GE,
        BinOp::Le => EvalOp::LE,
        BinOp::Eq => EvalOp::EQ,
        BinOp::Ne => EvalOp::NE,
    }
}
