#![cfg(test)]

use test_log::test;

use crate::language::StringInterner;
use crate::parse_source;
use crate::parser::stmt::{Stmt, StmtMeta};
use crate::parser::expr::Expr;
use crate::parser::fundef::{FunctionDef, Visibility};
use crate::transform::{validate, rewrite, optimize};
use crate::transform::{TransformError, TransformErrorKind};


fn parse_module(source: &str) -> (Vec<StmtMeta>, StringInterner) {
    let mut interner = StringInterner::new();
    let ast = parse_source(&mut interner, source).expect("parse failed");
    (ast, interner)
}

fn first_fundef(stmts: &[StmtMeta]) -> &FunctionDef {
    stmts.iter()
        .find_map(|stmt| match stmt.variant() {
            Stmt::Function(fundef) => Some(fundef),
            _ => None,
        })
        .expect("no function definition")
}

fn check_params(source: &str) -> Result<(), TransformError> {
    let (stmts, interner) = parse_module(source);
    let fundef = first_fundef(&stmts);
    validate::check_params(&fundef.params, &interner)
}

fn transformed_fundef(source: &str) -> (FunctionDef, StringInterner) {
    let (stmts, mut interner) = parse_module(source);
    let stmts = rewrite::transform_module(stmts, &mut interner).expect("transform failed");
    let fundef = first_fundef(&stmts).clone();
    (fundef, interner)
}


/*** Validator ***/

#[test]
fn validate_accepts_well_formed_lists() {
    assert!(check_params("fun f() { }").is_ok());
    assert!(check_params("fun f(x) { }").is_ok());
    assert!(check_params("fun f(x, y = 1, #a = 2) { }").is_ok());
    assert!(check_params("fun f(x, ...rest) { }").is_ok());
    assert!(check_params("fun f(#a = 1, #b = 2) { }").is_ok());
}

#[test]
fn validate_missing_default_for_private() {
    let error = check_params("fun f(x, y = 1, #a, #b = 3) { }").unwrap_err();

    assert!(error.kind() == TransformErrorKind::MissingDefaultForPrivateParameter);
    assert!(error.param_name() == "a");
    assert!(error.position() == 2);
}

#[test]
fn validate_ordering_violation() {
    let error = check_params("fun f(x, #a = 1, y) { }").unwrap_err();

    assert!(error.kind() == TransformErrorKind::OrderingViolation);
    assert!(error.param_name() == "y");
    assert!(error.position() == 2);
}

#[test]
fn validate_private_rest_rejected() {
    let error = check_params("fun f(#...xs) { }").unwrap_err();

    assert!(error.kind() == TransformErrorKind::PrivateRestParameterRejected);
    assert!(error.param_name() == "xs");
    assert!(error.position() == 0);
}

#[test]
fn validate_duplicate_name_across_visibility() {
    let error = check_params("fun f(x, #x = 1) { }").unwrap_err();

    assert!(error.kind() == TransformErrorKind::DuplicateParameterName);
    assert!(error.position() == 1);
}

// a rest parameter after privates is a public entry after a private one
#[test]
fn validate_rest_after_private_is_ordering_violation() {
    let error = check_params("fun f(#a = 1, ...xs) { }").unwrap_err();

    assert!(error.kind() == TransformErrorKind::OrderingViolation);
    assert!(error.param_name() == "xs");
}

// the first structural violation in declaration order wins
#[test]
fn validate_reports_first_violation() {
    let error = check_params("fun f(x, #a, y) { }").unwrap_err();

    assert!(error.kind() == TransformErrorKind::MissingDefaultForPrivateParameter);
    assert!(error.param_name() == "a");
    assert!(error.position() == 1);
}

#[test]
fn validate_is_deterministic() {
    for _ in 0..3 {
        let error = check_params("fun f(x, #a = 1, y, z) { }").unwrap_err();
        assert!(error.param_name() == "y");
        assert!(error.position() == 2);
    }
}


/*** Rewriter ***/

#[test]
fn rewrite_splits_into_two_layers() {
    let (outer, interner) = transformed_fundef(r#"
        fun fact(n, #acc = 1) {
            if (n <= 1) { return acc; }
            return fact(n - 1, acc * n);
        }
    "#);

    // outer keeps only the public parameters
    assert!(outer.params.len() == 1);
    assert!(interner.resolve(outer.params.get(0).unwrap().name) == Some("n"));

    // body is exactly: bind the capability, delegate to it
    assert!(outer.body.len() == 2);

    let mut stmts = outer.body.iter();
    let first = stmts.next().unwrap().variant();
    let second = stmts.next().unwrap().variant();

    let (bound_name, inner, visible) = match first {
        Stmt::Let { name, init: Some(Expr::Forwarding { fun, visible }) } => (*name, fun, *visible),
        other => panic!("unexpected statement: {:?}", other),
    };

    // the capability is bound under the function's own name
    assert!(interner.resolve(bound_name) == Some("fact"));
    assert!(visible == 1);

    // inner takes publics ++ privates, privates demoted to defaulted publics
    assert!(inner.name.is_none());
    assert!(inner.params.len() == 2);
    assert!(inner.params.iter().all(|param| param.visibility == Visibility::Public));
    assert!(inner.params.get(1).unwrap().default.is_some());

    // original body carried over verbatim
    assert!(inner.body.len() == 2);

    assert!(matches!(second, Stmt::Return(Some(Expr::DelegateCall(..)))));
}

#[test]
fn rewrite_is_identity_without_privates() {
    let (fundef, _) = transformed_fundef(r#"
        fun add(x, y = 1) {
            return x + y;
        }
    "#);

    assert!(fundef.params.len() == 2);
    assert!(fundef.body.len() == 1);
    assert!(matches!(fundef.body.iter().next().unwrap().variant(), Stmt::Return(..)));
}

#[test]
fn rewrite_anonymous_function_uses_synthesized_self() {
    let (stmts, mut interner) = parse_module("let f = fun(x, #a = 0) { return a; };");
    let stmts = rewrite::transform_module(stmts, &mut interner).expect("transform failed");

    let outer = match stmts[0].variant() {
        Stmt::Let { init: Some(Expr::FunctionDef(fundef)), .. } => fundef,
        other => panic!("unexpected statement: {:?}", other),
    };

    let bound_name = match outer.body.iter().next().unwrap().variant() {
        Stmt::Let { name, .. } => *name,
        other => panic!("unexpected statement: {:?}", other),
    };

    // unspellable in source text
    assert!(interner.resolve(bound_name) == Some("#self"));
}

#[test]
fn rewrite_transforms_nested_definitions() {
    let (host, _) = transformed_fundef(r#"
        fun host(x) {
            fun counter(n, #acc = 0) {
                if (n == 0) { return acc; }
                return counter(n - 1, acc + 1);
            }
            return counter(x);
        }
    "#);

    // host itself is untouched, but the nested definition was rewritten
    let nested = host.body.iter()
        .find_map(|stmt| match stmt.variant() {
            Stmt::Function(fundef) => Some(fundef),
            _ => None,
        })
        .expect("no nested definition");

    assert!(nested.params.len() == 1);
    assert!(nested.body.len() == 2);
    assert!(matches!(
        nested.body.iter().next().unwrap().variant(),
        Stmt::Let { init: Some(Expr::Forwarding { .. }), .. }
    ));
}

#[test]
fn transform_module_fails_on_first_invalid_function() {
    let (stmts, mut interner) = parse_module(r#"
        fun first(x, #a, #b = 1) { }
        fun second(#...xs) { }
    "#);

    let error = rewrite::transform_module(stmts, &mut interner).unwrap_err();
    assert!(error.param_name() == "a");
}


/*** Call-site optimizer ***/

const COMPLIANT: &str = r#"
    fun fib(n, #a = 0, #b = 1) {
        if (n == 0) { return a; }
        return fib(n - 1, b, a + b);
    }
    let result = fib(10);
"#;

fn optimized_module(source: &str) -> (Vec<StmtMeta>, StringInterner) {
    let (stmts, mut interner) = parse_module(source);
    let stmts = rewrite::transform_module(stmts, &mut interner).expect("transform failed");
    let stmts = optimize::optimize_module(stmts, &interner);
    (stmts, interner)
}

fn is_flattened(fundef: &FunctionDef) -> bool {
    !matches!(
        fundef.body.iter().next().map(|stmt| stmt.variant()),
        Some(Stmt::Let { init: Some(Expr::Forwarding { .. }), .. })
    )
}

#[test]
fn optimize_flattens_compliant_function() {
    let (stmts, _) = optimized_module(COMPLIANT);

    let fundef = first_fundef(&stmts);
    assert!(is_flattened(fundef));

    // single function taking all parameters positionally
    assert!(fundef.params.len() == 3);
    assert!(fundef.params.get(1).unwrap().default.is_some());
}

#[test]
fn optimize_bails_on_identity_operations() {
    let (stmts, _) = optimized_module(r#"
        fun tagged(n, #acc = 0) {
            tagged.calls = 1;
            return tagged(n - 1, acc);
        }
        tagged(1);
    "#);

    assert!(!is_flattened(first_fundef(&stmts)));
}

#[test]
fn optimize_bails_on_arguments_use() {
    let (stmts, _) = optimized_module(r#"
        fun probe(n, #acc = 0) {
            if (n == 0) { return len(arguments); }
            return probe(n - 1, acc + 1);
        }
        probe(2);
    "#);

    assert!(!is_flattened(first_fundef(&stmts)));
}

#[test]
fn optimize_bails_when_function_escapes_as_value() {
    let (stmts, _) = optimized_module(r#"
        fun fact(n, #acc = 1) {
            if (n <= 1) { return acc; }
            return fact(n - 1, acc * n);
        }
        let alias = fact;
    "#);

    assert!(!is_flattened(first_fundef(&stmts)));
}

#[test]
fn optimize_bails_on_non_literal_default() {
    let (stmts, _) = optimized_module(r#"
        fun fact(n, #acc = 1 + 0) {
            if (n <= 1) { return acc; }
            return fact(n - 1, acc * n);
        }
        fact(3);
    "#);

    assert!(!is_flattened(first_fundef(&stmts)));
}

#[test]
fn optimize_bails_on_partial_recursive_call() {
    let (stmts, _) = optimized_module(r#"
        fun fact(n, #acc = 1) {
            if (n <= 1) { return acc; }
            return fact(n - 1);
        }
        fact(3);
    "#);

    assert!(!is_flattened(first_fundef(&stmts)));
}

#[test]
fn optimize_bails_on_oversupplied_call_site() {
    let (stmts, _) = optimized_module(r#"
        fun fact(n, #acc = 1) {
            if (n <= 1) { return acc; }
            return fact(n - 1, acc * n);
        }
        fact(3, 999, nil);
    "#);

    assert!(!is_flattened(first_fundef(&stmts)));
}

// a function that was not rewritten is never a flattening candidate
#[test]
fn optimize_ignores_plain_functions() {
    let (stmts, _) = optimized_module(r#"
        fun add(x, y) { return x + y; }
        add(1, 2);
    "#);

    let fundef = first_fundef(&stmts);
    assert!(fundef.params.len() == 2);
    assert!(fundef.body.len() == 1);
}
