use std::fmt;

use crate::codegen::GenError;
use crate::lexer::LexError;
use crate::parser::SyntaxError;

/// Any failure on the source-to-bytecode path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Lex(LexError),
    Syntax(SyntaxError),
    Gen(GenError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Lex(err) => err.fmt(f),
            Error::Syntax(err) => err.fmt(f),
            Error::Gen(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<LexError> for Error {
    fn from(err: LexError) -> Error {
        Error::Lex(err)
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Error {
        Error::Syntax(err)
    }
}

impl From<GenError> for Error {
    fn from(err: GenError) -> Error {
        Error::Gen(err)
    }
}
