//! Abstract syntax for Mandrill programs.
//!
//! The tree is built once by the parser and then only read. `Display`
//! renders a tree back to parseable source (fully parenthesized), which the
//! parser tests use to check that printing and re-parsing is lossless.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// `target = value ;` — covers ordinary variables and the output sinks.
    Assign { target: LValue, value: Expr },
    If {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
    },
    While { condition: Expr, body: Vec<Stmt> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LValue {
    Var(String),
    /// The integer output sink (`write = …;`).
    Write,
    /// The character output sink (`put = …;`).
    Put,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// A non-negative integer or character literal.
    Literal(u32),
    Var(String),
    /// The integer input source (`read`).
    Read,
    /// The character input source (`get`).
    Get,
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Gt => ">",
            BinOp::Lt => "<",
            BinOp::Ge => ">=",
            BinOp::Le => "<=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_body(f, &self.statements)
    }
}

fn write_body(f: &mut fmt::Formatter, statements: &[Stmt]) -> fmt::Result {
    for (i, statement) in statements.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        fmt::Display::fmt(statement, f)?;
    }
    Ok(())
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stmt::Assign { target, value } => write!(f, "{} = {};", target, value),
            Stmt::If {
                condition,
                then_body,
                else_body,
            } => {
                write!(f, "if ({}) {{ ", condition)?;
                write_body(f, then_body)?;
                f.write_str(" }")?;
                if let Some(else_body) = else_body {
                    f.write_str(" else { ")?;
                    write_body(f, else_body)?;
                    f.write_str(" }")?;
                }
                Ok(())
            }
            Stmt::While { condition, body } => {
                write!(f, "while ({}) {{ ", condition)?;
                write_body(f, body)?;
                f.write_str(" }")
            }
        }
    }
}

impl fmt::Display for LValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LValue::Var(name) => f.write_str(name),
            LValue::Write => f.write_str("write"),
            LValue::Put => f.write_str("put"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Var(name) => f.write_str(name),
            Expr::Read => f.write_str("read"),
            Expr::Get => f.write_str("get"),
            Expr::Binary { left, op, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}
