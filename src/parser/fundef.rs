use std::rc::Rc;
use crate::language::InternSymbol;
use crate::debug::DebugSymbol;
use crate::parser::expr::ExprMeta;
use crate::parser::stmt::StmtList;

// Function Definitions

// `params` and `body` are reference-counted so that closure creation at
// runtime does not clone the statement tree.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: Option<InternSymbol>,
    pub params: Rc<ParamList>,
    pub body: Rc<StmtList>,
}

impl FunctionDef {
    pub fn new(name: Option<InternSymbol>, params: ParamList, body: StmtList) -> Self {
        FunctionDef {
            name,
            params: Rc::new(params),
            body: Rc::new(body),
        }
    }
}


// Private parameters are invisible to callers and initialize from their
// default on every external invocation; they only change value through
// internal self-recursive calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Simple,
    Rest,
}

#[derive(Debug, Clone)]
pub struct ParamDef {
    pub name: InternSymbol,
    pub visibility: Visibility,
    pub kind: ParamKind,
    pub default: Option<Box<ExprMeta>>,
    pub symbol: DebugSymbol,
}

impl ParamDef {
    pub fn is_private(&self) -> bool { matches!(self.visibility, Visibility::Private) }
    pub fn is_rest(&self) -> bool { matches!(self.kind, ParamKind::Rest) }
}


// Ordered parameter descriptor list; the declaration position of each entry
// is its index.
#[derive(Debug, Clone)]
pub struct ParamList {
    params: Box<[ParamDef]>,
}

impl ParamList {
    pub fn new(params: Vec<ParamDef>) -> Self {
        ParamList { params: params.into_boxed_slice() }
    }

    pub fn len(&self) -> usize { self.params.len() }
    pub fn is_empty(&self) -> bool { self.params.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item=&ParamDef> {
        self.params.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ParamDef> {
        self.params.get(index)
    }

    // position of the first private entry, or the length if there is none;
    // for a validated list this is the public/private split point
    pub fn split_point(&self) -> usize {
        self.params.iter()
            .position(|param| param.is_private())
            .unwrap_or(self.params.len())
    }

    pub fn public_count(&self) -> usize {
        self.params.iter().filter(|param| !param.is_private()).count()
    }

    pub fn private_count(&self) -> usize {
        self.params.iter().filter(|param| param.is_private()).count()
    }

    pub fn has_rest(&self) -> bool {
        self.params.iter().any(|param| param.is_rest())
    }

    // caller-visible arity: leading parameters up to the first defaulted or
    // rest parameter
    pub fn visible_arity(&self) -> usize {
        self.params.iter()
            .position(|param| param.default.is_some() || param.is_rest())
            .unwrap_or(self.params.len())
    }
}
