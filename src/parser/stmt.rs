use crate::language::InternSymbol;
use crate::debug::DebugSymbol;
use crate::parser::expr::Expr;
use crate::parser::fundef::FunctionDef;


#[derive(Debug, Clone)]
pub enum Stmt {

    Expression(Expr),

    Let {
        name: InternSymbol,
        init: Option<Expr>,
    },

    If {
        branches: Box<[CondBranch]>,
        else_branch: Option<StmtList>,
    },

    While {
        condition: Expr,
        body: StmtList,
    },

    Function(FunctionDef),

    Return(Option<Expr>),

    Assert(Expr),

    Echo(Expr),
}


#[derive(Debug, Clone)]
pub struct CondBranch {
    condition: Expr,
    body: StmtList,
}

impl CondBranch {
    pub fn new(condition: Expr, body: StmtList) -> Self {
        Self { condition, body }
    }

    pub fn condition(&self) -> &Expr { &self.condition }
    pub fn body(&self) -> &StmtList { &self.body }

    pub fn take(self) -> (Expr, StmtList) { (self.condition, self.body) }
}


// Statement lists
#[derive(Debug, Clone)]
pub struct StmtList {
    suite: Box<[StmtMeta]>,
}

impl StmtList {
    pub fn new(suite: Vec<StmtMeta>) -> Self {
        Self { suite: suite.into_boxed_slice() }
    }

    pub fn len(&self) -> usize { self.suite.len() }
    pub fn is_empty(&self) -> bool { self.suite.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item=&StmtMeta> {
        self.suite.iter()
    }

    pub fn take(self) -> Vec<StmtMeta> {
        self.suite.into_vec()
    }
}


// Stmt + DebugSymbol
#[derive(Debug, Clone)]
pub struct StmtMeta {
    variant: Stmt,
    symbol: DebugSymbol,
}

impl StmtMeta {
    pub fn new(variant: Stmt, symbol: DebugSymbol) -> Self {
        StmtMeta { variant, symbol }
    }

    pub fn variant(&self) -> &Stmt { &self.variant }
    pub fn take_variant(self) -> Stmt { self.variant }

    pub fn debug_symbol(&self) -> &DebugSymbol { &self.symbol }

    pub fn take(self) -> (Stmt, DebugSymbol) { (self.variant, self.symbol) }
}
