//! Tree-walking evaluator.
//!
//! Executes the AST directly with the same observable semantics as the
//! compiled bytecode: intermediates are 64-bit, truncation to 32 bits
//! happens at variable stores, at subtraction, division and modulus, and at
//! integer output; character output is gated to `0..=127`. Tests use it as
//! an oracle against the virtual machine.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use num_integer::Integer;
use util::truncate32;

use mvm::Input;

use crate::ast::{BinOp, Expr, LValue, Program, Stmt};

/// Fatal evaluation failures, mirroring the machine's arithmetic faults.
#[derive(Debug)]
pub enum Error {
    DivisionByZero,
    ModulusByZero,
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DivisionByZero => f.write_str("division by zero"),
            Error::ModulusByZero => f.write_str("modulus by zero"),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

/// Direct AST executor over a buffered [`Input`] and an output sink.
pub struct Interpreter<'a, W> {
    variables: HashMap<String, i32>,
    input: &'a mut Input,
    output: &'a mut W,
}

impl<'a, W: Write> Interpreter<'a, W> {
    pub fn new(input: &'a mut Input, output: &'a mut W) -> Interpreter<'a, W> {
        Interpreter {
            variables: HashMap::new(),
            input,
            output,
        }
    }

    pub fn run(&mut self, program: &Program) -> Result<(), Error> {
        self.body(&program.statements)
    }

    fn body(&mut self, statements: &[Stmt]) -> Result<(), Error> {
        for statement in statements {
            self.statement(statement)?;
        }
        Ok(())
    }

    fn statement(&mut self, statement: &Stmt) -> Result<(), Error> {
        match statement {
            Stmt::Assign { target, value } => {
                let value = self.expression(value)?;
                match target {
                    LValue::Var(name) => {
                        self.variables.insert(name.clone(), truncate32(value));
                    }
                    LValue::Write => write!(self.output, "{}", truncate32(value))?,
                    LValue::Put => {
                        let value = truncate32(value);
                        if (0..=127).contains(&value) {
                            self.output.write_all(&[value as u8])?;
                        }
                    }
                }
            }
            Stmt::If {
                condition,
                then_body,
                else_body,
            } => {
                if self.expression(condition)? != 0 {
                    self.body(then_body)?;
                } else if let Some(else_body) = else_body {
                    self.body(else_body)?;
                }
            }
            Stmt::While { condition, body } => {
                while self.expression(condition)? != 0 {
                    self.body(body)?;
                }
            }
        }
        Ok(())
    }

    fn expression(&mut self, expr: &Expr) -> Result<i64, Error> {
        Ok(match expr {
            Expr::Literal(value) => i64::from(*value),
            // Unassigned variables read as zero.
            Expr::Var(name) => i64::from(self.variables.get(name).copied().unwrap_or(0)),
            Expr::Read => self.input.next_integer(),
            Expr::Get => i64::from(self.input.next_byte()),
            Expr::Binary { left, op, right } => {
                let left = self.expression(left)?;
                let right = self.expression(right)?;
                binary(left, *op, right)?
            }
        })
    }
}

fn binary(left: i64, op: BinOp, right: i64) -> Result<i64, Error> {
    Ok(match op {
        BinOp::Add => left.wrapping_add(right),
        BinOp::Sub => i64::from(truncate32(left.wrapping_sub(right))),
        BinOp::Mul => left.wrapping_mul(right),
        BinOp::Div => {
            if right == 0 {
                return Err(Error::DivisionByZero);
            }
            // The quotient of i64::MIN / -1 overflows i64, but its 32-bit
            // truncation equals that of the wrapped negation.
            if right == -1 {
                i64::from(truncate32(left.wrapping_neg()))
            } else {
                i64::from(truncate32(left.div_floor(&right)))
            }
        }
        BinOp::Mod => {
            if right == 0 {
                return Err(Error::ModulusByZero);
            }
            if right == -1 {
                0
            } else {
                i64::from(truncate32(left.mod_floor(&right)))
            }
        }
        BinOp::Gt => (left > right) as i64,
        BinOp::Lt => (left < right) as i64,
        BinOp::Ge => (left >= right) as i64,
        BinOp::Le => (left <= right) as i64,
        BinOp::Eq => (left == right) as i64,
        BinOp::Ne => (left != right) as i64,
    })
}
