use std::rc::Rc;
use log::debug;
use crate::language::StringInterner;
use crate::debug::DebugSymbol;
use crate::parser::expr::{Expr, ExprMeta};
use crate::parser::stmt::{Stmt, StmtMeta, StmtList, CondBranch};
use crate::parser::primary::{Atom, AccessItem, Primary};
use crate::parser::lvalue::{LValue, Assignment, AttributeTarget};
use crate::parser::fundef::{FunctionDef, ParamDef, ParamList, Visibility};
use crate::transform::validate;
use crate::transform::errors::TransformError;


// Name bound to the forwarding capability inside the outer function when the
// source function is anonymous. The '#' keeps it unspellable in source text,
// so it can never collide with or shadow a user binding.
const ANON_SELF: &str = "#self";


pub fn transform_module(stmts: Vec<StmtMeta>, interner: &mut StringInterner) -> Result<Vec<StmtMeta>, TransformError> {
    stmts.into_iter()
        .map(|stmt| transform_stmt(stmt, interner))
        .collect()
}

/// Validate and rewrite a single function definition, transforming any
/// nested definitions in its body first. This is the transform's entry
/// point: either the parameter list passes validation and a complete
/// replacement definition is produced, or the error is the sole output.
pub fn transform_function(fun: FunctionDef, symbol: DebugSymbol, interner: &mut StringInterner) -> Result<FunctionDef, TransformError> {
    validate::check_params(&fun.params, interner)?;

    // nested definitions first, so the inner closure receives a fully
    // transformed body
    let body = transform_stmt_list((*fun.body).clone(), interner)?;
    let fun = FunctionDef {
        name: fun.name,
        params: fun.params,
        body: Rc::new(body),
    };

    if fun.params.private_count() == 0 {
        return Ok(fun); // identity transform
    }

    Ok(rewrite(fun, symbol, interner))
}

/*
    Split the parameter list at the public/private boundary and emit:

        fun <name>(<publics>) {
            let <self> = <forwarding wrap of inner, visible = split>;
            return <delegated call of self>;
        }

    where the inner closure is anonymous, takes publics ++ privates (the
    privates demoted to ordinary defaulted parameters), and carries the
    original body verbatim. Binding the capability under the function's own
    name shadows it for the body, so self-references resolve lexically to
    the inner closure and attribute operations on it land on the outer
    function object.
*/
fn rewrite(fun: FunctionDef, symbol: DebugSymbol, interner: &mut StringInterner) -> FunctionDef {
    let split = fun.params.split_point();
    let publics: Vec<ParamDef> = fun.params.iter().take(split).cloned().collect();

    let mut inner_params = publics.clone();
    inner_params.extend(
        fun.params.iter().skip(split)
            .map(|param| ParamDef { visibility: Visibility::Public, ..param.clone() })
    );

    debug!(
        "rewriting function: {} public parameter(s), {} private",
        split, inner_params.len() - split,
    );

    let inner = FunctionDef {
        name: None,
        params: Rc::new(ParamList::new(inner_params)),
        body: fun.body,
    };

    let self_name = fun.name
        .unwrap_or_else(|| interner.get_or_intern(ANON_SELF));

    let bind = Stmt::Let {
        name: self_name,
        init: Some(Expr::Forwarding { fun: inner, visible: split }),
    };

    let self_ref = ExprMeta::new(Expr::Atom(Atom::Identifier(self_name)), symbol);
    let ret = Stmt::Return(Some(Expr::DelegateCall(Box::new(self_ref))));

    let body = StmtList::new(vec![
        StmtMeta::new(bind, symbol),
        StmtMeta::new(ret, symbol),
    ]);

    FunctionDef {
        name: fun.name,
        params: Rc::new(ParamList::new(publics)),
        body: Rc::new(body),
    }
}


// recursive descent over the tree, in statement order

fn transform_stmt(stmt: StmtMeta, interner: &mut StringInterner) -> Result<StmtMeta, TransformError> {
    let (variant, symbol) = stmt.take();

    let variant = match variant {
        Stmt::Function(fun) => Stmt::Function(transform_function(fun, symbol, interner)?),

        Stmt::Expression(expr) => Stmt::Expression(transform_expr(expr, symbol, interner)?),

        Stmt::Let { name, init } => Stmt::Let {
            name,
            init: init.map(|expr| transform_expr(expr, symbol, interner)).transpose()?,
        },

        Stmt::If { branches, else_branch } => {
            let branches = branches.into_vec().into_iter()
                .map(|branch| {
                    let (condition, body) = branch.take();
                    let condition = transform_expr(condition, symbol, interner)?;
                    let body = transform_stmt_list(body, interner)?;
                    Ok(CondBranch::new(condition, body))
                })
                .collect::<Result<Vec<_>, TransformError>>()?;

            let else_branch = else_branch
                .map(|body| transform_stmt_list(body, interner))
                .transpose()?;

            Stmt::If { branches: branches.into_boxed_slice(), else_branch }
        },

        Stmt::While { condition, body } => Stmt::While {
            condition: transform_expr(condition, symbol, interner)?,
            body: transform_stmt_list(body, interner)?,
        },

        Stmt::Return(expr) => Stmt::Return(
            expr.map(|expr| transform_expr(expr, symbol, interner)).transpose()?
        ),

        Stmt::Assert(expr) => Stmt::Assert(transform_expr(expr, symbol, interner)?),
        Stmt::Echo(expr) => Stmt::Echo(transform_expr(expr, symbol, interner)?),
    };

    Ok(StmtMeta::new(variant, symbol))
}

fn transform_stmt_list(list: StmtList, interner: &mut StringInterner) -> Result<StmtList, TransformError> {
    let suite = list.take().into_iter()
        .map(|stmt| transform_stmt(stmt, interner))
        .collect::<Result<Vec<_>, TransformError>>()?;

    Ok(StmtList::new(suite))
}

fn transform_expr_meta(expr: ExprMeta, interner: &mut StringInterner) -> Result<ExprMeta, TransformError> {
    let (variant, symbol) = expr.take();
    let variant = transform_expr(variant, symbol, interner)?;
    Ok(ExprMeta::new(variant, symbol))
}

fn transform_expr(expr: Expr, symbol: DebugSymbol, interner: &mut StringInterner) -> Result<Expr, TransformError> {
    let expr = match expr {
        Expr::FunctionDef(fun) => Expr::FunctionDef(transform_function(fun, symbol, interner)?),

        Expr::Atom(atom) => Expr::Atom(transform_atom(atom, interner)?),

        Expr::Primary(primary) => Expr::primary(transform_primary(*primary, interner)?),

        Expr::UnaryOp(op, operand) => Expr::unary_op(op, transform_expr_meta(*operand, interner)?),

        Expr::BinaryOp(op, operands) => {
            let (lhs, rhs) = *operands;
            Expr::binary_op(
                op,
                transform_expr_meta(lhs, interner)?,
                transform_expr_meta(rhs, interner)?,
            )
        },

        Expr::Assignment(assignment) => {
            let Assignment { lhs, rhs } = *assignment;

            let lhs = match lhs {
                LValue::Identifier(name) => LValue::Identifier(name),
                LValue::Attribute(target) => {
                    let AttributeTarget { receiver, name } = *target;
                    let receiver = transform_primary(receiver, interner)?;
                    LValue::Attribute(Box::new(AttributeTarget { receiver, name }))
                },
            };

            Expr::assignment(Assignment {
                lhs,
                rhs: transform_expr_meta(rhs, interner)?,
            })
        },

        // already in rewritten form
        Expr::Forwarding { .. } | Expr::DelegateCall(..) => expr,
    };

    Ok(expr)
}

fn transform_atom(atom: Atom, interner: &mut StringInterner) -> Result<Atom, TransformError> {
    let atom = match atom {
        Atom::Group(expr) => Atom::Group(Box::new(transform_expr_meta(*expr, interner)?)),
        _ => atom,
    };

    Ok(atom)
}

fn transform_primary(primary: Primary, interner: &mut StringInterner) -> Result<Primary, TransformError> {
    let (atom, path) = primary.take();

    let atom = transform_atom(atom, interner)?;

    let path = path.into_iter()
        .map(|item| {
            let item = match item {
                AccessItem::Attribute(name) => AccessItem::Attribute(name),
                AccessItem::Index(index) => AccessItem::Index(transform_expr_meta(index, interner)?),
                AccessItem::Invoke(args) => {
                    let args = args.into_vec().into_iter()
                        .map(|arg| transform_expr_meta(arg, interner))
                        .collect::<Result<Vec<_>, TransformError>>()?;
                    AccessItem::Invoke(args.into_boxed_slice())
                },
            };
            Ok(item)
        })
        .collect::<Result<Vec<_>, TransformError>>()?;

    Ok(Primary::with_path(atom, path))
}
