use crate::language::InternSymbol;
use crate::parser::primary::{Primary, AccessItem, Atom};
use crate::parser::expr::{Expr, ExprMeta};


/*
    lvalue ::= IDENTIFIER | primary attribute-access ;
*/

#[derive(Debug, Clone)]
pub enum LValue {
    Identifier(InternSymbol),
    Attribute(Box<AttributeTarget>), // receiver, attribute name
}

#[derive(Debug, Clone)]
pub struct AttributeTarget {
    pub receiver: Primary,
    pub name: InternSymbol,
}

// Assignments

#[derive(Debug, Clone)]
pub struct Assignment {
    pub lhs: LValue,
    pub rhs: ExprMeta,
}

// Convert expressions to LValues...

pub struct IntoLValueError;

impl TryFrom<Atom> for LValue {
    type Error = IntoLValueError;
    fn try_from(atom: Atom) -> Result<Self, Self::Error> {
        match atom {
            Atom::Identifier(name) => Ok(LValue::Identifier(name)),
            Atom::Group(group) => LValue::try_from(group.take_variant()),
            _ => Err(IntoLValueError),
        }
    }
}

impl TryFrom<Primary> for LValue {
    type Error = IntoLValueError;
    fn try_from(primary: Primary) -> Result<Self, Self::Error> {
        // remove the last item so that the rest evaluates to the receiver
        let (atom, mut path) = primary.take();

        if path.is_empty() {
            return atom.try_into();
        }

        let tail = path.pop();
        let receiver = Primary::with_path(atom, path);

        match tail {
            Some(AccessItem::Attribute(name)) =>
                Ok(LValue::Attribute(Box::new(AttributeTarget { receiver, name }))),
            _ => Err(IntoLValueError),
        }
    }
}

impl TryFrom<Expr> for LValue {
    type Error = IntoLValueError;
    fn try_from(expr: Expr) -> Result<Self, Self::Error> {
        match expr {
            Expr::Atom(atom) => atom.try_into(),
            Expr::Primary(primary) => (*primary).try_into(),
            _ => Err(IntoLValueError),
        }
    }
}
