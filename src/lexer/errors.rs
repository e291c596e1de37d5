use std::fmt;
use std::error::Error;
use crate::lexer::Span;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerErrorKind {
    UnrecognizedChar,
    UnterminatedString,
    InvalidNumber,
}

#[derive(Debug, Clone)]
pub struct LexerError {
    pub kind: LexerErrorKind,
    pub location: Span,
    pub lineno: u64,
}

impl LexerError {
    pub fn new(kind: LexerErrorKind, location: Span, lineno: u64) -> Self {
        LexerError { kind, location, lineno }
    }
}

impl Error for LexerError { }

impl fmt::Display for LexerError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self.kind {
            LexerErrorKind::UnrecognizedChar => "unrecognized character",
            LexerErrorKind::UnterminatedString => "unterminated string literal",
            LexerErrorKind::InvalidNumber => "invalid numeric literal",
        };
        write!(fmt, "{}", message)
    }
}
