//! Stack virtual machine for Mandrill bytecode.
//!
//! The machine executes the fixed-width instruction stream produced by the
//! [mandrillc](../mandrillc/index.html) compiler and carried in the
//! [mbcfile](../mbcfile/index.html) container. It owns an operand stack of
//! 64-bit values, a zero-initialized array of 32-bit variable slots and a
//! program counter; program input is served by [`Input`], which buffers the
//! whole input up front and exposes independent integer and byte cursors.

pub mod constants;

mod input;
mod instructions;
mod machine;

pub use crate::input::Input;
pub use crate::instructions::{
    decode_instructions, encode_instructions, enum_to_u32, EvalOp, Instruction, Opcode,
};
pub use crate::machine::{Machine, RuntimeError};
