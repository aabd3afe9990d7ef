use std::io::{self, Read};

/// Buffered program input.
///
/// The whole input is read up front and then served through two independent
/// cursors: a whitespace-token cursor for integer reads and a byte cursor
/// for character reads. Integer reads and character reads therefore never
/// consume each other's data.
pub struct Input {
    bytes: Vec<u8>,
    integers: Vec<i64>,
    integer_pos: usize,
    byte_pos: usize,
}

impl Input {
    pub fn new(bytes: Vec<u8>) -> Input {
        let integers = String::from_utf8_lossy(&bytes)
            .split_whitespace()
            .filter_map(|token| token.parse().ok())
            .collect();

        Input {
            bytes,
            integers,
            integer_pos: 0,
            byte_pos: 0,
        }
    }

    /// Reads a source to its end and buffers it.
    pub fn from_reader<R: Read>(reader: &mut R) -> io::Result<Input> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Input::new(bytes))
    }

    /// The next whitespace-delimited integer token. Tokens that do not
    /// parse as a signed decimal are skipped; exhausted input yields 0.
    pub fn next_integer(&mut self) -> i64 {
        match self.integers.get(self.integer_pos) {
            Some(&value) => {
                self.integer_pos += 1;
                value
            }
            None => 0,
        }
    }

    /// The code point of the next input byte; exhausted input yields 0.
    pub fn next_byte(&mut self) -> u8 {
        match self.bytes.get(self.byte_pos) {
            Some(&byte) => {
                self.byte_pos += 1;
                byte
            }
            None => 0,
        }
    }
}

impl<'a> From<&'a str> for Input {
    fn from(s: &'a str) -> Input {
        Input::new(s.as_bytes().to_vec())
    }
}

impl<'a> From<&'a [u8]> for Input {
    fn from(bytes: &'a [u8]) -> Input {
        Input::new(Vec::from(bytes))
    }
}
