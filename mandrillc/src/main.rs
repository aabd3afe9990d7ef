#[macro_use]
extern crate clap;

use clap::Arg;
use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::io;
use std::process;

use mbcfile::Executable;

#[derive(Debug)]
enum Error {
    Compile(mandrillc::Error),
    Read(io::Error),
    Write(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Compile(err) => err.fmt(f),
            Error::Read(err) => write!(f, "reading source failed: {}", err),
            Error::Write(err) => write!(f, "writing bytecode failed: {}", err),
        }
    }
}

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Source file to compile (defaults to standard input)")
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("OUTPUT")
                .help("File to write the bytecode to (defaults to standard output)"),
        )
        .get_matches();

    if let Err(err) = compile(matches.value_of("INPUT"), matches.value_of("output")) {
        eprintln!("Compilation error: {}", err);
        process::exit(1);
    }
}

fn compile(input: Option<&str>, output: Option<&str>) -> Result<(), Error> {
    let source = read_source(input).map_err(Error::Read)?;
    let executable = mandrillc::compile(&source).map_err(Error::Compile)?;
    write_executable(&executable, output).map_err(Error::Write)
}

fn read_source(path: Option<&str>) -> io::Result<String> {
    let mut source = String::new();
    match path {
        Some(path) => {
            File::open(path)?.read_to_string(&mut source)?;
        }
        None => {
            io::stdin().read_to_string(&mut source)?;
        }
    }
    Ok(source)
}

fn write_executable(executable: &Executable, path: Option<&str>) -> io::Result<()> {
    match path {
        Some(path) => mbcfile::write_file(path, executable),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            mbcfile::write(&mut handle, executable)?;
            handle.flush()
        }
    }
}
