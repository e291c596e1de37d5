use std::iter::Peekable;
use crate::language;
use crate::lexer::{Token, TokenMeta, Span};
use crate::lexer::errors::{LexerError, LexerErrorKind};


// Hand-rolled scanner. The token set is small and fixed, so tokens are
// matched directly instead of through a table of rule objects.

pub struct Lexer<S> where S: Iterator<Item=char> {
    source: Peekable<S>,

    current: usize, // one ahead of current char
    lineno: u64,
}

impl<S> Lexer<S> where S: Iterator<Item=char> {
    pub fn new(source: S) -> Self {
        Lexer {
            source: source.peekable(),
            current: 0,
            lineno: 1,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let next = self.source.next();
        if let Some(ch) = next {
            self.current += 1;
            if ch == '\n' {
                self.lineno += 1;
            }
        }
        next
    }

    fn peek(&mut self) -> Option<char> {
        self.source.peek().copied()
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => { self.advance(); },
                _ => break,
            }
        }
    }

    fn skip_until_next_line(&mut self) {
        loop {
            match self.advance() {
                None | Some('\n') => break,
                _ => { },
            }
        }
    }

    fn token_out(&self, token: Token, start: usize, lineno: u64) -> TokenMeta {
        TokenMeta {
            token,
            span: Span { index: start, length: self.current - start },
            lineno,
        }
    }

    fn error_out(&self, kind: LexerErrorKind, start: usize, lineno: u64) -> LexerError {
        LexerError::new(kind, Span { index: start, length: self.current - start }, lineno)
    }

    pub fn next_token(&mut self) -> Result<TokenMeta, LexerError> {
        loop {
            self.skip_whitespace();

            let start = self.current;
            let lineno = self.lineno;

            let ch = match self.advance() {
                Some(ch) => ch,
                None => return Ok(TokenMeta {
                    token: Token::EOF,
                    span: Span { index: start, length: 0 },
                    lineno,
                }),
            };

            let token = match ch {
                '(' => Token::OpenParen,
                ')' => Token::CloseParen,
                '{' => Token::OpenBrace,
                '}' => Token::CloseBrace,
                '[' => Token::OpenSquare,
                ']' => Token::CloseSquare,
                ',' => Token::Comma,
                ';' => Token::Semicolon,
                '#' => Token::Hash,

                '+' => Token::OpAdd,
                '-' => Token::OpSub,
                '*' => Token::OpMul,
                '%' => Token::OpMod,

                '/' => {
                    // line comments
                    if matches!(self.peek(), Some('/')) {
                        self.skip_until_next_line();
                        continue;
                    }
                    Token::OpDiv
                },

                '=' => {
                    if matches!(self.peek(), Some('=')) {
                        self.advance();
                        Token::OpEQ
                    } else {
                        Token::OpAssign
                    }
                },

                '!' => {
                    if matches!(self.peek(), Some('=')) {
                        self.advance();
                        Token::OpNE
                    } else {
                        return Err(self.error_out(LexerErrorKind::UnrecognizedChar, start, lineno));
                    }
                },

                '<' => {
                    if matches!(self.peek(), Some('=')) {
                        self.advance();
                        Token::OpLE
                    } else {
                        Token::OpLT
                    }
                },

                '>' => {
                    if matches!(self.peek(), Some('=')) {
                        self.advance();
                        Token::OpGE
                    } else {
                        Token::OpGT
                    }
                },

                '.' => {
                    if matches!(self.peek(), Some('.')) {
                        self.advance();
                        if !matches!(self.advance(), Some('.')) {
                            return Err(self.error_out(LexerErrorKind::UnrecognizedChar, start, lineno));
                        }
                        Token::Ellipsis
                    } else {
                        Token::OpAccess
                    }
                },

                '"' => return self.scan_string(start, lineno),

                ch if ch.is_ascii_digit() => return self.scan_number(ch, start, lineno),

                ch if ch.is_alphabetic() || ch == '_' => return Ok(self.scan_name(ch, start, lineno)),

                _ => return Err(self.error_out(LexerErrorKind::UnrecognizedChar, start, lineno)),
            };

            return Ok(self.token_out(token, start, lineno));
        }
    }

    fn scan_name(&mut self, first: char, start: usize, lineno: u64) -> TokenMeta {
        let mut name = String::new();
        name.push(first);

        while let Some(ch) = self.peek() {
            if !ch.is_alphanumeric() && ch != '_' {
                break;
            }
            name.push(ch);
            self.advance();
        }

        let token = language::keyword(&name)
            .unwrap_or(Token::Identifier(name));

        self.token_out(token, start, lineno)
    }

    fn scan_number(&mut self, first: char, start: usize, lineno: u64) -> Result<TokenMeta, LexerError> {
        let mut digits = String::new();
        digits.push(first);

        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            digits.push(ch);
            self.advance();
        }

        // a single '.' makes this a float literal; "1." is accepted
        let mut float = false;
        if matches!(self.peek(), Some('.')) {
            float = true;
            digits.push('.');
            self.advance();

            while let Some(ch) = self.peek() {
                if !ch.is_ascii_digit() {
                    break;
                }
                digits.push(ch);
                self.advance();
            }
        }

        let token = if float {
            match digits.parse() {
                Ok(value) => Token::FloatLiteral(value),
                Err(..) => return Err(self.error_out(LexerErrorKind::InvalidNumber, start, lineno)),
            }
        } else {
            match digits.parse() {
                Ok(value) => Token::IntegerLiteral(value),
                Err(..) => return Err(self.error_out(LexerErrorKind::InvalidNumber, start, lineno)),
            }
        };

        Ok(self.token_out(token, start, lineno))
    }

    fn scan_string(&mut self, start: usize, lineno: u64) -> Result<TokenMeta, LexerError> {
        let mut value = String::new();

        loop {
            match self.advance() {
                None => return Err(self.error_out(LexerErrorKind::UnterminatedString, start, lineno)),

                Some('"') => break,

                Some('\\') => {
                    let escape = match self.advance() {
                        None => return Err(self.error_out(LexerErrorKind::UnterminatedString, start, lineno)),
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some(ch) => ch,
                    };
                    value.push(escape);
                },

                Some(ch) => value.push(ch),
            }
        }

        Ok(self.token_out(Token::StringLiteral(value), start, lineno))
    }
}

// EOF is yielded indefinitely, so the parser can always look ahead.
impl<S> Iterator for Lexer<S> where S: Iterator<Item=char> {
    type Item = Result<TokenMeta, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_token())
    }
}
