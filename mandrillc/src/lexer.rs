//! Token stream over Mandrill source text.
//!
//! Integer literals are parsed as non-negative decimals and re-emitted with
//! a lowercase `0x…` payload; character literals carry the hex code point
//! of the quoted character. The lexer never skips anything but whitespace:
//! every other character either starts a token or is a lexical error.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// Reserved words of the language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    If,
    Else,
    While,
    Read,
    Put,
    Write,
    Get,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Keyword> {
        match word {
            "if" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            "while" => Some(Keyword::While),
            "read" => Some(Keyword::Read),
            "put" => Some(Keyword::Put),
            "write" => Some(Keyword::Write),
            "get" => Some(Keyword::Get),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Read => "read",
            Keyword::Put => "put",
            Keyword::Write => "write",
            Keyword::Get => "get",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operators and punctuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    Assign,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Star => "*",
            Op::Slash => "/",
            Op::Percent => "%",
            Op::Gt => ">",
            Op::Lt => "<",
            Op::Ge => ">=",
            Op::Le => "<=",
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Assign => "=",
            Op::Semicolon => ";",
            Op::LParen => "(",
            Op::RParen => ")",
            Op::LBrace => "{",
            Op::RBrace => "}",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn single_op(c: char) -> Option<Op> {
    match c {
        '+' => Some(Op::Plus),
        '-' => Some(Op::Minus),
        '*' => Some(Op::Star),
        '/' => Some(Op::Slash),
        '%' => Some(Op::Percent),
        '>' => Some(Op::Gt),
        '<' => Some(Op::Lt),
        '=' => Some(Op::Assign),
        ';' => Some(Op::Semicolon),
        '(' => Some(Op::LParen),
        ')' => Some(Op::RParen),
        '{' => Some(Op::LBrace),
        '}' => Some(Op::RBrace),
        _ => None,
    }
}

/// A lexical token. Literal payloads are the lexer's lowercase `0x…`
/// rewriting of the source literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Keyword(Keyword),
    Ident(String),
    Literal(String),
    Op(Op),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Keyword(keyword) => write!(f, "[keyword:{}]", keyword),
            Token::Ident(name) => write!(f, "[id:{}]", name),
            Token::Literal(payload) => write!(f, "[literal:{}]", payload),
            Token::Op(op) => write!(f, "[op:{}]", op),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
    pub column: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    InvalidCharacter(char),
    UnterminatedCharLiteral,
    UnknownEscape(char),
    /// A character literal whose code point is above 127.
    CharLiteralOutOfRange(char),
    /// A decimal literal above 2^32 - 1; carries the digits as written.
    LiteralOutOfRange(String),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "lexical error at line {}, column {}: ",
            self.line, self.column
        )?;
        match &self.kind {
            LexErrorKind::InvalidCharacter(c) => write!(f, "invalid character: {:?}", c),
            LexErrorKind::UnterminatedCharLiteral => f.write_str("unterminated character literal"),
            LexErrorKind::UnknownEscape(c) => write!(f, "unsupported escape sequence \\{}", c),
            LexErrorKind::CharLiteralOutOfRange(c) => {
                write!(f, "character literal {:?} is not ASCII", c)
            }
            LexErrorKind::LiteralOutOfRange(digits) => {
                write!(f, "integer literal {} does not fit in 32 bits", digits)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// One-token-at-a-time producer over a source string.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    current: Option<char>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        let mut chars = source.chars().peekable();
        let current = chars.next();

        Lexer {
            chars,
            current,
            line: 1,
            column: 1,
        }
    }

    /// Produces the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            let c = match self.current {
                Some(c) => c,
                None => return Ok(None),
            };

            if c.is_whitespace() {
                self.advance();
                continue;
            }

            if c.is_ascii_lowercase() {
                return Ok(Some(self.word()));
            }
            if c.is_ascii_digit() {
                return self.number().map(Some);
            }
            if c == '\'' {
                return self.character().map(Some);
            }

            // Two-character operators win over their one-character prefix.
            if matches!(c, '>' | '<' | '=' | '!') && self.peek() == Some('=') {
                self.advance();
                self.advance();
                let op = match c {
                    '>' => Op::Ge,
                    '<' => Op::Le,
                    '=' => Op::Eq,
                    _ => Op::Ne,
                };
                return Ok(Some(Token::Op(op)));
            }

            if let Some(op) = single_op(c) {
                self.advance();
                return Ok(Some(Token::Op(op)));
            }

            return Err(self.error(LexErrorKind::InvalidCharacter(c)));
        }
    }

    fn advance(&mut self) {
        if let Some(c) = self.current {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.current = self.chars.next();
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            line: self.line,
            column: self.column,
        }
    }

    fn word(&mut self) -> Token {
        let mut word = String::new();
        while let Some(c) = self.current {
            if !c.is_ascii_lowercase() {
                break;
            }
            word.push(c);
            self.advance();
        }

        match Keyword::from_word(&word) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Ident(word),
        }
    }

    fn number(&mut self) -> Result<Token, LexError> {
        let mut digits = String::new();
        while let Some(c) = self.current {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.advance();
        }

        match digits.parse::<u32>() {
            Ok(value) => Ok(Token::Literal(format!("{:#x}", value))),
            Err(_) => Err(self.error(LexErrorKind::LiteralOutOfRange(digits))),
        }
    }

    fn character(&mut self) -> Result<Token, LexError> {
        self.advance(); // opening quote

        let value = match self.current {
            Some('\\') => {
                self.advance();
                match self.current {
                    Some('n') => '\n',
                    Some('\\') => '\\',
                    Some('\'') => '\'',
                    Some(c) => return Err(self.error(LexErrorKind::UnknownEscape(c))),
                    None => return Err(self.error(LexErrorKind::UnterminatedCharLiteral)),
                }
            }
            Some(c) => c,
            None => return Err(self.error(LexErrorKind::UnterminatedCharLiteral)),
        };

        if value as u32 > 127 {
            return Err(self.error(LexErrorKind::CharLiteralOutOfRange(value)));
        }

        self.advance(); // the character itself
        match self.current {
            Some('\'') => {
                self.advance();
                Ok(Token::Literal(format!("{:#x}", value as u32)))
            }
            _ => Err(self.error(LexErrorKind::UnterminatedCharLiteral)),
        }
    }
}

/// Lexes an entire source string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }

    Ok(tokens)
}
