use std::fmt;
use std::error::Error;
use crate::lexer::{Span, TokenMeta};
use crate::debug::DebugSymbol;


pub type ErrorKind = ParserErrorKind;

// Specifies the actual error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErrorKind {
    LexerError,
    ExpectedStartOfExpr,
    ExpectedCloseParen,
    ExpectedCloseSquare,
    ExpectedOpenParen,
    ExpectedOpenBrace,
    ExpectedCloseBrace,
    ExpectedSemicolon,
    ExpectedIdentifier,
    InvalidAssignmentLHS,
    MalformedParameterList,
}

// Provide information about the type of syntactic construct from which the error originated
#[derive(Debug, Clone, Copy)]
pub enum ContextTag {
    TopLevel,
    Stmt,
    Block,
    Expr,
    AssignmentExpr,
    BinaryOpExpr,
    UnaryOpExpr,
    PrimaryExpr,
    MemberAccess,
    IndexAccess,
    Invocation,
    Atom,
    Group,
    FunDef,
    ParamList,
}

// Since ErrorContext is shared by the whole recursive descent call stack,
// errors are built as prototypes and get their context frame attached at the
// base of the stack.
#[derive(Debug)]
pub struct ErrorPrototype {
    kind: ErrorKind,
    cause: Option<Box<dyn Error>>,
}

impl ErrorPrototype {
    pub fn new(kind: ErrorKind) -> Self {
        ErrorPrototype { kind, cause: None }
    }

    pub fn caused_by(cause: impl Into<Box<dyn Error>>, kind: ErrorKind) -> Self {
        ErrorPrototype { kind, cause: Some(cause.into()) }
    }
}

impl From<ParserErrorKind> for ErrorPrototype {
    fn from(kind: ParserErrorKind) -> Self {
        ErrorPrototype::new(kind)
    }
}

#[derive(Debug)]
pub struct ParserError {
    kind: ErrorKind,
    context: ContextTag,
    symbol: Option<DebugSymbol>,
    cause: Option<Box<dyn Error>>,
}

impl ParserError {
    pub fn from_prototype(proto: ErrorPrototype, context: ErrorContext) -> Self {
        let frame = context.take();
        ParserError {
            kind: proto.kind,
            context: frame.context(),
            symbol: frame.as_debug_symbol(),
            cause: proto.cause,
        }
    }

    pub fn kind(&self) -> ErrorKind { self.kind }
    pub fn context(&self) -> ContextTag { self.context }
    pub fn debug_symbol(&self) -> Option<&DebugSymbol> { self.symbol.as_ref() }
}

impl Error for ParserError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|o| o.as_ref())
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self.kind {
            ParserErrorKind::LexerError => "",
            ParserErrorKind::ExpectedStartOfExpr => "expected start of expression",
            ParserErrorKind::ExpectedCloseParen => "missing closing ')'",
            ParserErrorKind::ExpectedCloseSquare => "missing closing ']'",
            ParserErrorKind::ExpectedOpenParen => "missing opening '('",
            ParserErrorKind::ExpectedOpenBrace => "missing opening '{'",
            ParserErrorKind::ExpectedCloseBrace => "missing closing '}'",
            ParserErrorKind::ExpectedSemicolon => "missing ';'",
            ParserErrorKind::ExpectedIdentifier => "invalid identifier",
            ParserErrorKind::InvalidAssignmentLHS => "invalid assignment",
            ParserErrorKind::MalformedParameterList => "malformed parameter list",
        };

        match (message, self.source()) {
            ("", None) => write!(fmt, "syntax error"),
            ("", Some(error)) => write!(fmt, "syntax error: {}", error),
            (message, None) => write!(fmt, "syntax error: {}", message),
            (message, Some(error)) => write!(fmt, "syntax error: {}: {}", message, error),
        }
    }
}


// Structures used by the parser for error handling and synchronization

#[derive(Debug)]
pub struct ErrorContext {
    stack: Vec<ContextFrame>,
}

impl ErrorContext {
    pub fn new(base: ContextTag) -> Self {
        ErrorContext {
            stack: vec![ ContextFrame::new(base) ],
        }
    }

    pub fn frame(&self) -> &ContextFrame { self.stack.last().unwrap() }
    pub fn frame_mut(&mut self) -> &mut ContextFrame { self.stack.last_mut().unwrap() }

    pub fn push(&mut self, tag: ContextTag) { self.stack.push(ContextFrame::new(tag)) }

    // open a new frame that picks up where the current one started
    pub fn push_continuation(&mut self, tag: ContextTag) {
        let start = self.frame().start().copied();
        self.push(tag);
        self.frame_mut().set_span(start, None);
    }

    pub fn pop(&mut self) -> ContextFrame {
        assert!(self.stack.len() > 1);
        self.stack.pop().unwrap()
    }

    pub fn pop_extend(&mut self) {
        let inner_frame = self.pop();
        self.frame_mut().extend(inner_frame);
    }

    pub fn take(mut self) -> ContextFrame {
        assert!(!self.stack.is_empty());
        self.stack.pop().unwrap()
    }

    // for convenience
    pub fn set_start(&mut self, token: &TokenMeta) { self.frame_mut().set_start(token) }
    pub fn set_end(&mut self, token: &TokenMeta) { self.frame_mut().set_end(token) }
}

#[derive(Debug, Clone)]
pub struct ContextFrame {
    tag: ContextTag,
    start: Option<Span>,
    end: Option<Span>,
}

impl ContextFrame {
    pub fn new(tag: ContextTag) -> Self {
        ContextFrame { tag, start: None, end: None }
    }

    pub fn context(&self) -> ContextTag { self.tag }
    pub fn start(&self) -> Option<&Span> { self.start.as_ref() }

    pub fn set_start(&mut self, token: &TokenMeta) {
        self.start.replace(token.span);
    }

    pub fn set_end(&mut self, token: &TokenMeta) {
        self.end.replace(token.span);
    }

    pub fn set_span(&mut self, start: Option<Span>, end: Option<Span>) {
        self.start = start;
        self.end = end;
    }

    pub fn extend(&mut self, other: ContextFrame) {
        match (self.start, other.start) {
            (Some(this), Some(that)) if that.index < this.index => { self.start = other.start },
            (None, Some(..)) => { self.start = other.start },
            _ => { },
        }

        match (self.end, other.end) {
            (Some(this), Some(that)) if this.index < that.index => { self.end = other.end },
            (None, Some(..)) => { self.end = other.end },
            _ => { },
        }
    }

    pub fn as_debug_symbol(&self) -> Option<DebugSymbol> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                Some((start.index, end.index + end.length).into())
            },

            (Some(span), None) | (None, Some(span)) => {
                Some((span.index, span.index + span.length).into())
            },

            (None, None) => None,
        }
    }
}
