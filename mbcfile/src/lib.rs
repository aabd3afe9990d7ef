//! Reader and writer for the Mandrill bytecode container format.
//!
//! A container is a 32-byte big-endian header followed by the instruction
//! stream:
//!
//! | Offset | Size | Content |
//! |--------|------|---------|
//! | 0      | 16   | magic, the ASCII bytes `MANDRILLBYTECODE` |
//! | 16     | 4    | format version, currently 1 |
//! | 20     | 4    | data size in bytes, 4 per runtime variable slot |
//! | 24     | 4    | code size in bytes, 8 per instruction |
//! | 28     | 4    | reserved, zero |
//! | 32     | code size | encoded instructions |
//!
//! The data region has no payload: its size only tells the virtual machine
//! how many zero-initialized variable slots to allocate. Writing the same
//! executable twice produces byte-identical output.

use byteorder::{ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use util::Endian;

/// Leading magic bytes of every container.
pub const MAGIC: [u8; 16] = *b"MANDRILLBYTECODE";

/// The only container format version this codec understands.
pub const VERSION: u32 = 1;

/// Total header size in bytes.
pub const HEADER_BYTES: usize = 32;

/// Size of one runtime variable slot in the declared data region.
pub const VAR_BYTES: u32 = 4;

/// Size of one encoded instruction in the code region.
pub const INSTRUCTION_BYTES: u32 = 8;

/// Container validation and I/O failures.
#[derive(Debug)]
pub enum Error {
    /// The file does not start with [`MAGIC`].
    InvalidMagic,
    /// The file declares a version other than [`VERSION`].
    UnsupportedVersion(u32),
    /// The declared data size is not a multiple of [`VAR_BYTES`].
    MisalignedDataSize(u32),
    /// The declared code size is not a multiple of [`INSTRUCTION_BYTES`].
    MisalignedCodeSize(u32),
    /// The file ends before the header or the declared code region does.
    Truncated,
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidMagic => f.write_str("invalid bytecode file: wrong magic number"),
            Error::UnsupportedVersion(version) => {
                write!(f, "unsupported bytecode version: {}", version)
            }
            Error::MisalignedDataSize(size) => {
                write!(f, "data size {} is not a multiple of {}", size, VAR_BYTES)
            }
            Error::MisalignedCodeSize(size) => write!(
                f,
                "code size {} is not a multiple of {}",
                size, INSTRUCTION_BYTES
            ),
            Error::Truncated => f.write_str("bytecode file is truncated"),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::Truncated
        } else {
            Error::Io(err)
        }
    }
}

/// A loaded or to-be-written executable: the declared variable-slot count
/// and the raw code bytes.
#[derive(Debug, PartialEq)]
pub struct Executable {
    data_size: u32,
    code: Vec<u8>,
}

impl Executable {
    pub fn from(var_count: u32, code: Vec<u8>) -> Executable {
        debug_assert_eq!(code.len() as u32 % INSTRUCTION_BYTES, 0);
        Executable {
            data_size: var_count * VAR_BYTES,
            code,
        }
    }

    pub fn copy_from(var_count: u32, code: &[u8]) -> Executable {
        Executable::from(var_count, Vec::from(code))
    }

    /// Number of runtime variable slots the program addresses.
    pub fn var_count(&self) -> u32 {
        self.data_size / VAR_BYTES
    }

    /// Declared data-region size in bytes.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Raw big-endian instruction stream.
    pub fn code(&self) -> &[u8] {
        &self.code[..]
    }

    pub fn instruction_count(&self) -> u32 {
        self.code.len() as u32 / INSTRUCTION_BYTES
    }
}

pub fn read<R: Read>(reader: &mut R) -> Result<Executable, Error> {
    let mut magic = [0u8; 16];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(Error::InvalidMagic);
    }

    let version = reader.read_u32::<Endian>()?;
    if version != VERSION {
        return Err(Error::UnsupportedVersion(version));
    }

    let data_size = reader.read_u32::<Endian>()?;
    let code_size = reader.read_u32::<Endian>()?;

    let mut reserved = [0u8; 4];
    reader.read_exact(&mut reserved)?;

    if data_size % VAR_BYTES != 0 {
        return Err(Error::MisalignedDataSize(data_size));
    }
    if code_size % INSTRUCTION_BYTES != 0 {
        return Err(Error::MisalignedCodeSize(code_size));
    }

    let mut code = vec![0; code_size as usize];
    reader.read_exact(&mut code)?;

    Ok(Executable { data_size, code })
}

pub fn write<W: Write>(writer: &mut W, executable: &Executable) -> io::Result<()> {
    writer.write_all(&MAGIC)?;
    writer.write_u32::<Endian>(VERSION)?;
    writer.write_u32::<Endian>(executable.data_size)?;
    writer.write_u32::<Endian>(executable.code.len() as u32)?;
    writer.write_all(&[0u8; 4])?;
    writer.write_all(&executable.code[..])?;
    Ok(())
}

pub trait ReadMbcExt: Read + Sized {
    fn read_mbc(&mut self) -> Result<Executable, Error> {
        read(self)
    }
}

impl<R: Read + Sized> ReadMbcExt for R {}

pub trait WriteMbcExt: Write + Sized {
    fn write_mbc(&mut self, executable: &Executable) -> io::Result<()> {
        write(self, executable)
    }
}

impl<W: Write + Sized> WriteMbcExt for W {}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Executable, Error> {
    BufReader::new(File::open(path)?).read_mbc()
}

pub fn write_file<P: AsRef<Path>>(path: P, executable: &Executable) -> io::Result<()> {
    BufWriter::new(File::create(path)?).write_mbc(executable)
}
