use crate::lexer::Span;

// metadata attached to parser output for error handling and diagnostics

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebugSymbol {
    pub start: usize,
    pub end: usize,
}

impl DebugSymbol {
    pub fn new(start: usize, end: usize) -> Self {
        DebugSymbol { start, end }
    }

    // smallest symbol covering both operands
    pub fn extend(&self, other: &DebugSymbol) -> DebugSymbol {
        DebugSymbol {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<(usize, usize)> for DebugSymbol {
    fn from(tuple: (usize, usize)) -> Self {
        let (start, end) = tuple;
        DebugSymbol { start, end }
    }
}

impl From<&Span> for DebugSymbol {
    fn from(span: &Span) -> Self {
        DebugSymbol {
            start: span.index,
            end: span.index + span.length,
        }
    }
}
