use std::fmt;
use std::error::Error;
use crate::debug::DebugSymbol;


pub type ErrorKind = TransformErrorKind;

// Structural violations detected over a parameter list, before any rewrite
// is attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformErrorKind {
    OrderingViolation,
    MissingDefaultForPrivateParameter,
    DuplicateParameterName,
    PrivateRestParameterRejected,
}

// Carries the offending parameter's name and declaration position so the
// embedding driver can produce a reproducible diagnostic.
#[derive(Debug)]
pub struct TransformError {
    kind: ErrorKind,
    name: String,
    position: usize,
    symbol: DebugSymbol,
}

impl TransformError {
    pub fn new(kind: ErrorKind, name: impl Into<String>, position: usize, symbol: DebugSymbol) -> Self {
        TransformError {
            kind,
            name: name.into(),
            position,
            symbol,
        }
    }

    pub fn kind(&self) -> ErrorKind { self.kind }
    pub fn param_name(&self) -> &str { &self.name }
    pub fn position(&self) -> usize { self.position }
    pub fn debug_symbol(&self) -> &DebugSymbol { &self.symbol }
}

impl Error for TransformError { }

impl fmt::Display for TransformError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self.kind {
            TransformErrorKind::OrderingViolation =>
                "public parameter follows a private parameter",
            TransformErrorKind::MissingDefaultForPrivateParameter =>
                "private parameter requires a default value",
            TransformErrorKind::DuplicateParameterName =>
                "duplicate parameter name",
            TransformErrorKind::PrivateRestParameterRejected =>
                "rest parameter may not be private",
        };

        write!(fmt, "parameter '{}' at position {}: {}", self.name, self.position, message)
    }
}
