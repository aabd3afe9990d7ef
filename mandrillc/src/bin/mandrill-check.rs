//! Syntax checker: prints `PASS` if the source lexes and parses, `ERROR`
//! otherwise. Both outcomes exit 0; only failing to read the source at all
//! is reported as a failure.

#[macro_use]
extern crate clap;

use clap::Arg;
use std::fs::File;
use std::io::prelude::*;
use std::io;
use std::process;

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Source file to check (defaults to standard input)")
                .index(1),
        )
        .get_matches();

    let source = match read_source(matches.value_of("INPUT")) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("reading source failed: {}", err);
            process::exit(1);
        }
    };

    match mandrillc::check(&source) {
        Ok(()) => println!("PASS"),
        Err(_) => println!("ERROR"),
    }
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
