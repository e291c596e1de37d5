use std::fmt;
use std::error::Error;
use crate::language::IntType;


pub type ExecResult<T> = Result<T, Box<RuntimeError>>;

pub type ErrorKind = RuntimeErrorKind;

#[derive(Debug)]
pub enum RuntimeErrorKind {
    NameNotDefined(String),
    UnsupportedUnaryOperand(&'static str),
    UnsupportedBinaryOperand(&'static str, &'static str),
    DivideByZero,
    NotCallable(&'static str),
    NoAttributes(&'static str),
    NotIndexable(&'static str),
    InvalidIndex(&'static str),
    IndexOutOfBounds { index: IntType, len: usize },
    NoLength(&'static str),
    UnexpectedArgType { expected: &'static str, received: &'static str },
    InvalidArgumentCount { expected: usize, received: usize },
    AssertFailed,
    RecursionLimit,
    ForwardingOutsideFunction,
}

#[derive(Debug)]
pub struct RuntimeError {
    kind: ErrorKind,
}

impl RuntimeError {
    pub fn new(kind: ErrorKind) -> Self {
        RuntimeError { kind }
    }

    pub fn kind(&self) -> &ErrorKind { &self.kind }
}

impl From<RuntimeErrorKind> for Box<RuntimeError> {
    fn from(kind: RuntimeErrorKind) -> Self {
        Box::new(RuntimeError::new(kind))
    }
}

impl Error for RuntimeError { }

impl fmt::Display for RuntimeError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ErrorKind::NameNotDefined(name) =>
                write!(fmt, "name '{}' is not defined", name),

            ErrorKind::UnsupportedUnaryOperand(operand) =>
                write!(fmt, "unsupported operand type: '{}'", operand),

            ErrorKind::UnsupportedBinaryOperand(lhs, rhs) =>
                write!(fmt, "unsupported operand types: '{}' and '{}'", lhs, rhs),

            ErrorKind::DivideByZero =>
                write!(fmt, "division by zero"),

            ErrorKind::NotCallable(operand) =>
                write!(fmt, "'{}' value is not callable", operand),

            ErrorKind::NoAttributes(operand) =>
                write!(fmt, "'{}' value has no attributes", operand),

            ErrorKind::NotIndexable(operand) =>
                write!(fmt, "'{}' value is not indexable", operand),

            ErrorKind::InvalidIndex(operand) =>
                write!(fmt, "'{}' value is not a valid index", operand),

            ErrorKind::IndexOutOfBounds { index, len } =>
                write!(fmt, "index {} out of bounds for length {}", index, len),

            ErrorKind::NoLength(operand) =>
                write!(fmt, "'{}' value has no length", operand),

            ErrorKind::UnexpectedArgType { expected, received } =>
                write!(fmt, "expected '{}' argument, got '{}'", expected, received),

            ErrorKind::InvalidArgumentCount { expected, received } =>
                write!(fmt, "expected {} argument(s), got {}", expected, received),

            ErrorKind::AssertFailed =>
                write!(fmt, "assertion failed"),

            ErrorKind::RecursionLimit =>
                write!(fmt, "recursion limit exceeded"),

            ErrorKind::ForwardingOutsideFunction =>
                write!(fmt, "forwarding requires an enclosing function call"),
        }
    }
}
