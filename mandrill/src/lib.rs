//! Glue between the container codec, the compiler and the virtual machine.
//!
//! The `mandrill` binary executes a bytecode file, or compiles and runs a
//! source file in one step with `--source`. The machine's integer and
//! character input is read from standard input, fully buffered before
//! execution begins; program output goes to standard output.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use mbcfile::Executable;
use mvm::{decode_instructions, Input, Machine, RuntimeError};

#[derive(Debug)]
pub enum Error {
    Compile(mandrillc::Error),
    Container(mbcfile::Error),
    Runtime(RuntimeError),
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Compile(err) => err.fmt(f),
            Error::Container(err) => err.fmt(f),
            Error::Runtime(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<mandrillc::Error> for Error {
    fn from(err: mandrillc::Error) -> Error {
        Error::Compile(err)
    }
}

impl From<mbcfile::Error> for Error {
    fn from(err: mbcfile::Error) -> Error {
        Error::Container(err)
    }
}

impl From<RuntimeError> for Error {
    fn from(err: RuntimeError) -> Error {
        Error::Runtime(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

/// Executes a loaded executable. Returns the machine so callers can
/// inspect its final state.
pub fn run_executable<W: Write>(
    executable: &Executable,
    input: &mut Input,
    output: &mut W,
) -> Result<Machine, Error> {
    let mut machine = Machine::new(
        decode_instructions(executable.code()),
        executable.var_count(),
    );
    machine.run(input, output)?;
    Ok(machine)
}

/// Loads a bytecode file and executes it.
pub fn run_file<P: AsRef<Path>, W: Write>(
    path: P,
    input: &mut Input,
    output: &mut W,
) -> Result<Machine, Error> {
    let executable = mbcfile::read_file(path)?;
    run_executable(&executable, input, output)
}

/// Compiles a source string and immediately executes the result.
pub fn run_source<W: Write>(
    source: &str,
    input: &mut Input,
    output: &mut W,
) -> Result<Machine, Error> {
    let executable = mandrillc::compile(source)?;
    run_executable(&executable, input, output)
}
