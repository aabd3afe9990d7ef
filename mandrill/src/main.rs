#[macro_use]
extern crate clap;

use clap::{Arg, ArgGroup};
use std::fs;
use std::io::{self, Write};
use std::process;

use mvm::Input;

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("PROGRAM")
                .help("Bytecode file to execute")
                .index(1),
        )
        .arg(
            Arg::with_name("source")
                .short("s")
                .long("source")
                .takes_value(true)
                .value_name("SOURCE")
                .help("Compile and run a Mandrill source file instead"),
        )
        .group(
            ArgGroup::with_name("input")
                .args(&["PROGRAM", "source"])
                .required(true),
        )
        .get_matches();

    if let Err(err) = run(matches.value_of("PROGRAM"), matches.value_of("source")) {
        match err {
            mandrill::Error::Compile(err) => eprintln!("Compilation error: {}", err),
            err => eprintln!("VM error: {}", err),
        }
        process::exit(1);
    }
}

fn run(program: Option<&str>, source: Option<&str>) -> Result<(), mandrill::Error> {
    let mut input = Input::from_reader(&mut io::stdin())?;
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match program {
        Some(path) => {
            mandrill::run_file(path, &mut input, &mut output)?;
        }
        None => {
            let source_text = fs::read_to_string(source.unwrap())?;
            mandrill::run_source(&source_text, &mut input, &mut output)?;
        }
    }

    output.flush()?;
    Ok(())
}
