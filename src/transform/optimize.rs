use log::debug;
use crate::language::{StringInterner, InternSymbol};
use crate::parser::expr::{Expr, ExprMeta};
use crate::parser::stmt::{Stmt, StmtMeta, StmtList};
use crate::parser::primary::{Atom, AccessItem, Primary};
use crate::parser::lvalue::LValue;
use crate::parser::fundef::FunctionDef;


/*
    Call-site optimizer: an independent pass over an already-rewritten
    module. For each top-level function declaration matching the rewriter's
    two-layer output, flatten outer + forwarding capability + inner closure
    back into a single function (parameters = publics ++ defaulted privates,
    body = the inner body) when the whole module proves the flattened form
    observationally equivalent:

      - every private default is a literal, so its value cannot depend on
        the frame it is evaluated in;
      - inside the body, the self-reference name occurs only as a direct
        call callee, always passing the full parameter count positionally,
        and is never rebound or reassigned; recursion then keeps threading
        the accumulator, and no identity operation needs the capability;
      - the body never references `arguments`;
      - outside the body, the function name occurs only as a direct call
        callee with at most public-arity arguments, and is never rebound or
        reassigned; no superfluous argument can then reach a private slot,
        and the function value never escapes.

    The accumulator seed is carried by the retained default on the flattened
    parameter. If any condition fails, the function is left untouched; the
    pass never partially applies.
*/
pub fn optimize_module(stmts: Vec<StmtMeta>, interner: &StringInterner) -> Vec<StmtMeta> {
    let mut replacements: Vec<(usize, FunctionDef)> = Vec::new();

    for (index, stmt) in stmts.iter().enumerate() {
        let fun = match stmt.variant() {
            Stmt::Function(fun) => fun,
            _ => continue,
        };

        let name = match fun.name {
            Some(name) => name,
            None => continue,
        };

        let shape = match match_rewritten(fun) {
            Some(shape) => shape,
            None => continue,
        };

        match check_flatten(&stmts, index, name, &shape, interner) {
            Ok(..) => {
                debug!("flattening function '{}'", resolve(interner, name));
                replacements.push((index, flatten(fun, &shape)));
            },
            Err(reason) => {
                debug!("not flattening function '{}': {}", resolve(interner, name), reason);
            },
        }
    }

    if replacements.is_empty() {
        return stmts;
    }

    let mut stmts = stmts;
    for (index, flat) in replacements {
        let symbol = *stmts[index].debug_symbol();
        stmts[index] = StmtMeta::new(Stmt::Function(flat), symbol);
    }
    stmts
}

fn resolve<'h>(interner: &'h StringInterner, name: InternSymbol) -> &'h str {
    interner.resolve(name).unwrap_or("<unknown>")
}


// The rewriter's output shape:
//
//     let <self> = <forwarding wrap of inner, visible = k>;
//     return <delegated call of self>;

struct Shape<'a> {
    self_name: InternSymbol,
    inner: &'a FunctionDef,
    visible: usize,
}

fn match_rewritten(fun: &FunctionDef) -> Option<Shape<'_>> {
    if fun.body.len() != 2 {
        return None;
    }

    let mut stmts = fun.body.iter();
    let first = stmts.next().unwrap().variant();
    let second = stmts.next().unwrap().variant();

    let (self_name, inner, visible) = match first {
        Stmt::Let { name, init: Some(Expr::Forwarding { fun, visible }) } => (*name, fun, *visible),
        _ => return None,
    };

    match second {
        Stmt::Return(Some(Expr::DelegateCall(callee)))
            if matches!(callee.variant(), Expr::Atom(Atom::Identifier(name)) if *name == self_name) => { },
        _ => return None,
    }

    Some(Shape { self_name, inner, visible })
}

fn flatten(outer: &FunctionDef, shape: &Shape) -> FunctionDef {
    FunctionDef {
        name: outer.name,
        params: shape.inner.params.clone(),
        body: shape.inner.body.clone(),
    }
}

type CheckResult = Result<(), &'static str>;

fn check_flatten(
    stmts: &[StmtMeta],
    index: usize,
    name: InternSymbol,
    shape: &Shape,
    interner: &StringInterner,
) -> CheckResult {
    // private defaults must be literals
    for param in shape.inner.params.iter().skip(shape.visible) {
        let literal = match &param.default {
            Some(default) => matches!(default.variant(), Expr::Atom(atom) if atom.is_literal()),
            None => false,
        };
        if !literal {
            return Err("private default is not a literal");
        }
    }

    // inside the body: self-calls only, full positional argument count
    let body_check = UseCheck {
        name: shape.self_name,
        exact_argc: Some(shape.inner.params.len()),
        max_argc: None,
        forbid: interner.get("arguments"),
    };
    body_check.check_stmt_list(&shape.inner.body)?;

    // parameter defaults evaluate in the inner frame, so the same rules apply
    for param in shape.inner.params.iter() {
        if let Some(default) = &param.default {
            body_check.check_expr_meta(default)?;
        }
    }

    // outside the body: calls only, at most public-arity arguments
    let module_check = UseCheck {
        name,
        exact_argc: None,
        max_argc: Some(shape.visible),
        forbid: None,
    };
    for (other, stmt) in stmts.iter().enumerate() {
        if other != index {
            module_check.check_stmt(stmt)?;
        }
    }

    Ok(())
}


// Scans for uses of a single name, accepting only direct invocations within
// the configured argument-count bounds.
struct UseCheck {
    name: InternSymbol,
    exact_argc: Option<usize>,
    max_argc: Option<usize>,
    forbid: Option<InternSymbol>, // bail on any use of this name at all
}

impl UseCheck {
    fn check_stmt_list(&self, list: &StmtList) -> CheckResult {
        for stmt in list.iter() {
            self.check_stmt(stmt)?;
        }
        Ok(())
    }

    fn check_stmt(&self, stmt: &StmtMeta) -> CheckResult {
        match stmt.variant() {
            Stmt::Expression(expr) => self.check_expr(expr),

            Stmt::Let { name, init } => {
                if *name == self.name {
                    return Err("name is rebound");
                }
                match init {
                    Some(init) => self.check_expr(init),
                    None => Ok(()),
                }
            },

            Stmt::If { branches, else_branch } => {
                for branch in branches.iter() {
                    self.check_expr(branch.condition())?;
                    self.check_stmt_list(branch.body())?;
                }
                match else_branch {
                    Some(body) => self.check_stmt_list(body),
                    None => Ok(()),
                }
            },

            Stmt::While { condition, body } => {
                self.check_expr(condition)?;
                self.check_stmt_list(body)
            },

            Stmt::Function(fun) => self.check_fundef(fun),

            Stmt::Return(expr) => match expr {
                Some(expr) => self.check_expr(expr),
                None => Ok(()),
            },

            Stmt::Assert(expr) => self.check_expr(expr),
            Stmt::Echo(expr) => self.check_expr(expr),
        }
    }

    fn check_expr_meta(&self, expr: &ExprMeta) -> CheckResult {
        self.check_expr(expr.variant())
    }

    fn check_expr(&self, expr: &Expr) -> CheckResult {
        match expr {
            Expr::Atom(atom) => self.check_atom(atom),

            Expr::Primary(primary) => self.check_primary(primary),

            Expr::UnaryOp(.., operand) => self.check_expr_meta(operand),

            Expr::BinaryOp(.., operands) => {
                let (lhs, rhs) = &**operands;
                self.check_expr_meta(lhs)?;
                self.check_expr_meta(rhs)
            },

            Expr::Assignment(assignment) => {
                match &assignment.lhs {
                    LValue::Identifier(name) => {
                        if *name == self.name {
                            return Err("name is reassigned");
                        }
                    },
                    LValue::Attribute(target) => self.check_primary(&target.receiver)?,
                }
                self.check_expr_meta(&assignment.rhs)
            },

            Expr::FunctionDef(fun) => self.check_fundef(fun),

            Expr::Forwarding { fun, .. } => self.check_fundef(fun),

            Expr::DelegateCall(callee) => self.check_expr_meta(callee),
        }
    }

    fn check_atom(&self, atom: &Atom) -> CheckResult {
        match atom {
            Atom::Identifier(name) if *name == self.name =>
                Err("function name escapes as a value"),

            Atom::Identifier(name) if Some(*name) == self.forbid =>
                Err("body references the arguments collection"),

            Atom::Group(expr) => self.check_expr_meta(expr),

            _ => Ok(()),
        }
    }

    fn check_primary(&self, primary: &Primary) -> CheckResult {
        let is_target = matches!(primary.atom(), Atom::Identifier(name) if *name == self.name);

        let mut path = primary.path().iter();

        if is_target {
            match path.next() {
                Some(AccessItem::Invoke(args)) => {
                    if matches!(self.exact_argc, Some(exact) if args.len() != exact) {
                        return Err("recursive call does not pass all parameters positionally");
                    }
                    if matches!(self.max_argc, Some(max) if args.len() > max) {
                        return Err("call site passes more than the public arity");
                    }
                    for arg in args.iter() {
                        self.check_expr_meta(arg)?;
                    }
                },
                Some(..) => return Err("attribute or index access on the function identity"),
                None => return Err("function name escapes as a value"),
            }
        } else {
            self.check_atom(primary.atom())?;
        }

        for item in path {
            match item {
                AccessItem::Attribute(..) => { },
                AccessItem::Index(index) => self.check_expr_meta(index)?,
                AccessItem::Invoke(args) => {
                    for arg in args.iter() {
                        self.check_expr_meta(arg)?;
                    }
                },
            }
        }

        Ok(())
    }

    fn check_fundef(&self, fun: &FunctionDef) -> CheckResult {
        if fun.name == Some(self.name) {
            return Err("name is rebound");
        }

        for param in fun.params.iter() {
            if param.name == self.name {
                return Err("name is rebound");
            }
            if let Some(default) = &param.default {
                self.check_expr_meta(default)?;
            }
        }

        self.check_stmt_list(&fun.body)
    }
}
