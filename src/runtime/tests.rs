#![cfg(test)]

use std::rc::Rc;
use crate::language::StringInterner;
use crate::parser::fundef::{FunctionDef, ParamList};
use crate::parser::stmt::StmtList;
use crate::runtime::{Variant, Environment, Function, Forwarding};
use crate::runtime::errors::ErrorKind;
use crate::runtime::ops::*;


fn empty_function() -> Rc<Function> {
    let def = FunctionDef::new(None, ParamList::new(Vec::new()), StmtList::new(Vec::new()));
    Rc::new(Function::new(def, Environment::new()))
}


#[test]
fn variant_truth_values() {
    assert!(!Variant::Nil.truth_value());
    assert!(!Variant::BoolFalse.truth_value());

    assert!(Variant::BoolTrue.truth_value());
    assert!(Variant::Integer(0).truth_value());
    assert!(Variant::Float(0.0).truth_value());
}

#[test]
fn variant_equality() {
    assert!(Variant::Nil.cmp_eq(&Variant::Nil));
    assert!(Variant::Integer(3).cmp_eq(&Variant::Integer(3)));
    assert!(!Variant::Integer(3).cmp_eq(&Variant::Integer(4)));

    // numeric comparison crosses the int/float divide
    assert!(Variant::Integer(3).cmp_eq(&Variant::Float(3.0)));
    assert!(Variant::Float(3.0).cmp_eq(&Variant::Integer(3)));

    assert!(!Variant::Nil.cmp_eq(&Variant::BoolFalse));

    let list = Variant::from(vec![Variant::Integer(1), Variant::Nil]);
    assert!(list.cmp_eq(&Variant::from(vec![Variant::Integer(1), Variant::Nil])));
    assert!(!list.cmp_eq(&Variant::from(vec![Variant::Integer(1)])));
}

#[test]
fn function_equality_is_identity() {
    let first = Variant::Function(empty_function());
    let second = Variant::Function(empty_function());

    assert!(first.cmp_eq(&first.clone()));
    assert!(!first.cmp_eq(&second));
}

#[test]
fn function_attribute_table() {
    let mut interner = StringInterner::new();
    let name = interner.get_or_intern("count");

    let fun = Variant::Function(empty_function());

    assert!(fun.get_attr(name).unwrap().is_nil()); // absent reads yield nil
    assert!(!fun.has_attr(name).unwrap());

    fun.set_attr(name, Variant::Integer(1)).unwrap();
    assert!(fun.has_attr(name).unwrap());
    assert!(fun.get_attr(name).unwrap().cmp_eq(&Variant::Integer(1)));

    assert!(fun.attr_names().unwrap() == vec![name]);

    assert!(fun.del_attr(name).unwrap());
    assert!(!fun.del_attr(name).unwrap());
    assert!(!fun.has_attr(name).unwrap());
}

// every structural operation on the capability lands on the target
#[test]
fn forwarding_redirects_attributes_to_target() {
    let mut interner = StringInterner::new();
    let name = interner.get_or_intern("tag");

    let inner = empty_function();
    let target = empty_function();
    let capability = Variant::from(Forwarding::new(inner, Rc::clone(&target), 1));

    capability.set_attr(name, Variant::Integer(7)).unwrap();

    let target = Variant::Function(target);
    assert!(target.get_attr(name).unwrap().cmp_eq(&Variant::Integer(7)));
    assert!(capability.has_attr(name).unwrap());
    assert!(capability.attr_names().unwrap() == vec![name]);

    assert!(capability.del_attr(name).unwrap());
    assert!(!target.has_attr(name).unwrap());
}

#[test]
fn attributes_require_a_function_value() {
    let mut interner = StringInterner::new();
    let name = interner.get_or_intern("tag");

    let result = Variant::Integer(1).get_attr(name);
    assert!(matches!(result.unwrap_err().kind(), ErrorKind::NoAttributes("int")));
}

#[test]
fn arithmetic_promotes_to_float() {
    let sum = eval_add(&Variant::Integer(1), &Variant::Integer(2)).unwrap();
    assert!(matches!(sum, Variant::Integer(3)));

    let sum = eval_add(&Variant::Integer(1), &Variant::Float(2.5)).unwrap();
    assert!(matches!(sum, Variant::Float(value) if value == 3.5));

    let result = eval_add(&Variant::Integer(1), &Variant::Nil);
    assert!(matches!(result.unwrap_err().kind(), ErrorKind::UnsupportedBinaryOperand("int", "nil")));
}

#[test]
fn division_by_zero() {
    let result = eval_div(&Variant::Integer(1), &Variant::Integer(0));
    assert!(matches!(result.unwrap_err().kind(), ErrorKind::DivideByZero));

    let result = eval_mod(&Variant::Integer(1), &Variant::Integer(0));
    assert!(matches!(result.unwrap_err().kind(), ErrorKind::DivideByZero));
}

#[test]
fn comparison_operators() {
    assert!(eval_lt(&Variant::Integer(1), &Variant::Integer(2)).unwrap().truth_value());
    assert!(eval_ge(&Variant::Float(2.0), &Variant::Integer(2)).unwrap().truth_value());
    assert!(eval_eq(&Variant::Integer(2), &Variant::Float(2.0)).truth_value());
    assert!(eval_ne(&Variant::Nil, &Variant::Integer(0)).truth_value());
}

#[test]
fn environment_scope_chain() {
    let mut interner = StringInterner::new();
    let x = interner.get_or_intern("x");
    let y = interner.get_or_intern("y");

    let root = Environment::new();
    root.insert_value(x, Variant::Integer(1));

    let child = Environment::nested(&root);
    assert!(child.find_value(x).unwrap().cmp_eq(&Variant::Integer(1)));
    assert!(child.lookup_value(x).is_none()); // local scope only

    // assignment walks the chain to the owning scope
    assert!(child.store_value(x, Variant::Integer(2)));
    assert!(root.lookup_value(x).unwrap().cmp_eq(&Variant::Integer(2)));

    // unbound names are not created by assignment
    assert!(!child.store_value(y, Variant::Integer(3)));
    assert!(child.find_value(y).is_none());
}

// bindings created after closure capture are visible through the handle
#[test]
fn environment_capture_is_by_handle() {
    let mut interner = StringInterner::new();
    let x = interner.get_or_intern("x");

    let root = Environment::new();
    let captured = Rc::clone(&root);

    root.insert_value(x, Variant::Integer(9));
    assert!(captured.find_value(x).unwrap().cmp_eq(&Variant::Integer(9)));
}
