use crate::language::{IntType, FloatType, InternSymbol};
use crate::parser::expr::ExprMeta;


// atom ::= LITERAL | IDENTIFIER | "(" expression ")" ;
#[derive(Debug, Clone)]
pub enum Atom {
    Nil,
    BooleanLiteral(bool),
    IntegerLiteral(IntType),
    FloatLiteral(FloatType),
    StringLiteral(InternSymbol),
    Identifier(InternSymbol),
    Group(Box<ExprMeta>),
}

impl Atom {
    pub fn is_literal(&self) -> bool {
        !matches!(self, Atom::Identifier(..) | Atom::Group(..))
    }
}


// access/invocation items trailing an atom
#[derive(Debug, Clone)]
pub enum AccessItem {
    Attribute(InternSymbol),
    Index(ExprMeta),
    Invoke(Box<[ExprMeta]>),
}

#[derive(Debug, Clone)]
pub struct Primary {
    atom: Atom,
    path: Vec<AccessItem>,
}

impl Primary {
    pub fn new(atom: Atom) -> Self {
        Primary { atom, path: Vec::new() }
    }

    pub fn with_path(atom: Atom, path: Vec<AccessItem>) -> Self {
        Primary { atom, path }
    }

    pub fn atom(&self) -> &Atom { &self.atom }
    pub fn path(&self) -> &[AccessItem] { &self.path }

    pub fn push_access_attr(&mut self, name: InternSymbol) {
        self.path.push(AccessItem::Attribute(name))
    }

    pub fn push_access_index(&mut self, index: ExprMeta) {
        self.path.push(AccessItem::Index(index))
    }

    pub fn push_invoke(&mut self, args: Vec<ExprMeta>) {
        self.path.push(AccessItem::Invoke(args.into_boxed_slice()))
    }

    pub fn take(self) -> (Atom, Vec<AccessItem>) {
        (self.atom, self.path)
    }

    pub fn is_lvalue(&self) -> bool {
        match self.path.last() {
            None => matches!(self.atom, Atom::Identifier(..)),
            Some(AccessItem::Attribute(..)) => true,
            Some(..) => false,
        }
    }
}
