#![cfg(test)]

use crate::language::StringInterner;
use crate::lexer::Lexer;
use crate::parser::{Parser, ParserError, ParserErrorKind};
use crate::parser::stmt::{Stmt, StmtMeta};
use crate::parser::expr::Expr;
use crate::parser::operator::BinaryOp;
use crate::parser::lvalue::LValue;
use crate::parser::primary::AccessItem;
use crate::parser::fundef::{FunctionDef, Visibility, ParamKind};


fn parse_str(source: &str) -> (Result<Vec<StmtMeta>, Vec<ParserError>>, StringInterner) {
    let mut interner = StringInterner::new();
    let lexer = Lexer::new(source.chars());
    let result = Parser::new(&mut interner, lexer).parse_module();
    (result, interner)
}

fn parse_fundef(source: &str) -> (FunctionDef, StringInterner) {
    let (result, interner) = parse_str(source);
    let stmts = result.expect("parse failed");

    let fundef = stmts.into_iter()
        .find_map(|stmt| match stmt.take_variant() {
            Stmt::Function(fundef) => Some(fundef),
            _ => None,
        })
        .expect("no function definition");

    (fundef, interner)
}

fn first_error_kind(source: &str) -> ParserErrorKind {
    let (result, _) = parse_str(source);
    let errors = result.expect_err("parse unexpectedly succeeded");
    errors[0].kind()
}


#[test]
fn parser_empty_param_list() {
    let (fundef, _) = parse_fundef("fun f() { }");
    assert!(fundef.params.is_empty());
}

#[test]
fn parser_param_markers_and_defaults() {
    let (fundef, interner) = parse_fundef("fun f(x, y = 1, #a = 2) { }");

    assert!(fundef.params.len() == 3);

    let x = fundef.params.get(0).unwrap();
    assert!(interner.resolve(x.name) == Some("x"));
    assert!(x.visibility == Visibility::Public);
    assert!(x.kind == ParamKind::Simple);
    assert!(x.default.is_none());

    let y = fundef.params.get(1).unwrap();
    assert!(y.visibility == Visibility::Public);
    assert!(y.default.is_some());

    let a = fundef.params.get(2).unwrap();
    assert!(interner.resolve(a.name) == Some("a"));
    assert!(a.visibility == Visibility::Private);
    assert!(a.default.is_some());
}

#[test]
fn parser_rest_param() {
    let (fundef, interner) = parse_fundef("fun f(x, ...rest) { }");

    let rest = fundef.params.get(1).unwrap();
    assert!(interner.resolve(rest.name) == Some("rest"));
    assert!(rest.kind == ParamKind::Rest);
    assert!(rest.visibility == Visibility::Public);
}

// the parser accepts a private rest marker; rejecting it is the validator's job
#[test]
fn parser_private_rest_marker() {
    let (fundef, _) = parse_fundef("fun f(#...xs) { }");

    let xs = fundef.params.get(0).unwrap();
    assert!(xs.visibility == Visibility::Private);
    assert!(xs.kind == ParamKind::Rest);
}

// likewise a private parameter without a default
#[test]
fn parser_private_without_default() {
    let (fundef, _) = parse_fundef("fun f(#a) { }");
    assert!(fundef.params.get(0).unwrap().default.is_none());
}

#[test]
fn parser_param_after_rest_is_malformed() {
    assert!(first_error_kind("fun f(...xs, y) { }") == ParserErrorKind::MalformedParameterList);
}

#[test]
fn parser_default_on_rest_is_malformed() {
    assert!(first_error_kind("fun f(...xs = 1) { }") == ParserErrorKind::MalformedParameterList);
}

#[test]
fn parser_marker_without_name_is_malformed() {
    assert!(first_error_kind("fun f(#) { }") == ParserErrorKind::MalformedParameterList);
    assert!(first_error_kind("fun f(#1) { }") == ParserErrorKind::MalformedParameterList);
    assert!(first_error_kind("fun f(x y) { }") == ParserErrorKind::MalformedParameterList);
}

#[test]
fn parser_binop_precedence() {
    let (result, _) = parse_str("1 + 2 * 3;");
    let stmts = result.unwrap();

    let expr = match stmts[0].variant() {
        Stmt::Expression(expr) => expr,
        other => panic!("unexpected statement: {:?}", other),
    };

    match expr {
        Expr::BinaryOp(BinaryOp::Add, operands) => {
            let (_, rhs) = &**operands;
            assert!(matches!(rhs.variant(), Expr::BinaryOp(BinaryOp::Mul, ..)));
        },
        other => panic!("unexpected expression: {:?}", other),
    }
}

#[test]
fn parser_attribute_assignment() {
    let (result, _) = parse_str("f.count = 1;");
    let stmts = result.unwrap();

    let expr = match stmts[0].variant() {
        Stmt::Expression(expr) => expr,
        other => panic!("unexpected statement: {:?}", other),
    };

    match expr {
        Expr::Assignment(assignment) => {
            assert!(matches!(assignment.lhs, LValue::Attribute(..)));
        },
        other => panic!("unexpected expression: {:?}", other),
    }
}

#[test]
fn parser_invalid_assignment_lhs() {
    assert!(first_error_kind("1 = 2;") == ParserErrorKind::InvalidAssignmentLHS);
}

#[test]
fn parser_access_chain() {
    let (result, _) = parse_str("f(1)(2).a[0];");
    let stmts = result.unwrap();

    let primary = match stmts[0].variant() {
        Stmt::Expression(Expr::Primary(primary)) => primary,
        other => panic!("unexpected statement: {:?}", other),
    };

    let path = primary.path();
    assert!(path.len() == 4);
    assert!(matches!(path[0], AccessItem::Invoke(..)));
    assert!(matches!(path[1], AccessItem::Invoke(..)));
    assert!(matches!(path[2], AccessItem::Attribute(..)));
    assert!(matches!(path[3], AccessItem::Index(..)));
}

#[test]
fn parser_statement_forms() {
    let source = r#"
        let x = 1;
        let y;
        if (x < 2) { x = 2; } else if (x < 3) { x = 3; } else { x = 4; }
        while (x > 0) { x = x - 1; }
        assert x == 0;
        echo x;
    "#;

    let (result, _) = parse_str(source);
    let stmts = result.unwrap();
    assert!(stmts.len() == 6);

    assert!(matches!(stmts[0].variant(), Stmt::Let { init: Some(..), .. }));
    assert!(matches!(stmts[1].variant(), Stmt::Let { init: None, .. }));
    assert!(matches!(stmts[2].variant(), Stmt::If { branches, else_branch: Some(..) } if branches.len() == 2));
    assert!(matches!(stmts[3].variant(), Stmt::While { .. }));
    assert!(matches!(stmts[4].variant(), Stmt::Assert(..)));
    assert!(matches!(stmts[5].variant(), Stmt::Echo(..)));
}

#[test]
fn parser_function_expression() {
    let (result, _) = parse_str("let g = fun(x) { return x; };");
    let stmts = result.unwrap();

    match stmts[0].variant() {
        Stmt::Let { init: Some(Expr::FunctionDef(fundef)), .. } => {
            assert!(fundef.name.is_none());
            assert!(fundef.params.len() == 1);
        },
        other => panic!("unexpected statement: {:?}", other),
    }
}

#[test]
fn parser_missing_semicolon() {
    assert!(first_error_kind("let x = 1") == ParserErrorKind::ExpectedSemicolon);
}

#[test]
fn parser_recovers_at_statement_boundaries() {
    let (result, _) = parse_str("let = 1; let y = ; let z = 3;");
    let errors = result.expect_err("parse unexpectedly succeeded");
    assert!(errors.len() == 2, "unexpected errors: {:?}", errors);
}

#[test]
fn parser_error_carries_symbol() {
    let (result, _) = parse_str("fun f(#) { }");
    let errors = result.expect_err("parse unexpectedly succeeded");
    assert!(errors[0].debug_symbol().is_some());
}
