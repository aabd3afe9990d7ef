//! Compiler for the Mandrill language.
//!
//! Mandrill is a small imperative language with 32-bit integers, a single
//! flat variable namespace, `if`/`while` control flow and stream I/O
//! through four keyword pseudo-variables: `read` and `get` produce the
//! next input integer or character, assigning to `write` or `put` prints
//! one.
//!
//! The pipeline is linear: [`lexer`] turns source text into tokens,
//! [`parser`] builds the [`ast`] by recursive descent, and [`codegen`]
//! lowers the tree to [mvm](../mvm/index.html) instructions, resolving
//! forward branches by back-patching. [`compile`] runs the whole pipeline
//! and packs the result into an [mbcfile](../mbcfile/index.html)
//! executable. [`interp`] executes the AST directly with the same
//! observable semantics as the compiled bytecode.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod interp;
pub mod lexer;
pub mod parser;

pub use crate::error::Error;

use mbcfile::Executable;
use mvm::encode_instructions;

/// Compiles Mandrill source into a bytecode executable.
pub fn compile(source: &str) -> Result<Executable, Error> {
    let program = parser::parse(source)?;
    let generated = codegen::generate(&program)?;

    Ok(Executable::from(
        generated.var_count,
        encode_instructions(&generated.instructions),
    ))
}

/// Checks that the source lexes and parses, reporting the first error.
pub fn check(source: &str) -> Result<(), Error> {
    parser::parse(source).map(|_| ())
}
