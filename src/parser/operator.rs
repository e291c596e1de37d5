use core::fmt;

// Unary Operators

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg, Not,
}

// Binary Operators

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // precedence level 1
    Mul, Div, Mod,

    // precedence level 2
    Add, Sub,

    // precedence level 3
    LT, GT, LE, GE,

    // precedence level 4
    EQ, NE,

    // precedence level 5
    And,

    // precedence level 6
    Or,
}

pub type Precedence = u8;
pub const PRECEDENCE_END: Precedence = 0; // tightest binding
pub const PRECEDENCE_START: Precedence = 6; // weakest binding

impl BinaryOp {
    pub const fn precedence_level(&self) -> Precedence {
        match self {
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 1,

            BinaryOp::Add | BinaryOp::Sub => 2,

            BinaryOp::LT | BinaryOp::GT | BinaryOp::LE | BinaryOp::GE => 3,
            BinaryOp::EQ | BinaryOp::NE => 4,

            BinaryOp::And => 5,
            BinaryOp::Or => 6,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::LT  => "<",
            BinaryOp::GT  => ">",
            BinaryOp::LE  => "<=",
            BinaryOp::GE  => ">=",
            BinaryOp::EQ  => "==",
            BinaryOp::NE  => "!=",
            BinaryOp::And => "and",
            BinaryOp::Or  => "or",
        };
        fmt.write_str(symbol)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        };
        fmt.write_str(symbol)
    }
}
