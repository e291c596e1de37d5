use crate::debug::DebugSymbol;
use crate::parser::operator::{UnaryOp, BinaryOp};
use crate::parser::primary::{Atom, Primary};
use crate::parser::lvalue::Assignment;
use crate::parser::fundef::FunctionDef;


#[derive(Debug, Clone)]
pub enum Expr {

    Atom(Atom),

    Primary(Box<Primary>),

    UnaryOp(UnaryOp, Box<ExprMeta>),

    BinaryOp(BinaryOp, Box<(ExprMeta, ExprMeta)>),

    Assignment(Box<Assignment>),

    FunctionDef(FunctionDef),

    // The remaining forms are emitted by the closure rewriter and are not
    // reachable from source text.

    // Close `fun` over the current frame and wrap it in a capability that
    // redirects attribute operations to the enclosing function object, while
    // call behavior remains the closure's own. `visible` bounds the
    // `arguments` view of each call through the capability.
    Forwarding {
        fun: FunctionDef,
        visible: usize,
    },

    // Invoke the callee, forwarding the current frame's supplied arguments
    // truncated to the current function's declared parameter count.
    DelegateCall(Box<ExprMeta>),
}

impl Expr {
    pub fn primary(primary: Primary) -> Self {
        Expr::Primary(Box::new(primary))
    }

    pub fn unary_op(op: UnaryOp, operand: ExprMeta) -> Self {
        Expr::UnaryOp(op, Box::new(operand))
    }

    pub fn binary_op(op: BinaryOp, lhs: ExprMeta, rhs: ExprMeta) -> Self {
        Expr::BinaryOp(op, Box::new((lhs, rhs)))
    }

    pub fn assignment(assignment: Assignment) -> Self {
        Expr::Assignment(Box::new(assignment))
    }
}


/// An `Expr` plus a `DebugSymbol`
#[derive(Debug, Clone)]
pub struct ExprMeta {
    variant: Expr,
    symbol: DebugSymbol,
}

impl ExprMeta {
    pub fn new(variant: Expr, symbol: DebugSymbol) -> Self {
        ExprMeta { variant, symbol }
    }

    pub fn variant(&self) -> &Expr { &self.variant }
    pub fn take_variant(self) -> Expr { self.variant }

    pub fn debug_symbol(&self) -> &DebugSymbol { &self.symbol }

    pub fn take(self) -> (Expr, DebugSymbol) { (self.variant, self.symbol) }
}
