//! Native functions installed into the global environment.

use std::rc::Rc;
use crate::language::{StringInterner, InternSymbol};
use crate::runtime::{Variant, Environment, NativeFunction};
use crate::runtime::function::NativeFn;
use crate::runtime::errors::{ExecResult, ErrorKind};


pub fn install(globals: &Rc<Environment>, interner: &mut StringInterner) {
    let natives: [(&'static str, usize, NativeFn); 5] = [
        ("len", 1, native_len),
        ("arity", 1, native_arity),
        ("hasattr", 2, native_hasattr),
        ("delattr", 2, native_delattr),
        ("attrnames", 1, native_attrnames),
    ];

    for (name, arity, func) in natives {
        let symbol = interner.get_or_intern(name);
        globals.insert_value(symbol, Variant::from(NativeFunction::new(name, arity, func)));
    }
}

fn native_len(args: &[Variant]) -> ExecResult<Variant> {
    match &args[0] {
        Variant::List(items) => Ok(Variant::Integer(items.len() as _)),
        value => Err(ErrorKind::NoLength(value.type_name()).into()),
    }
}

// Caller-visible arity: leading parameters up to the first defaulted or
// rest parameter. Private parameters never reach a function object's
// signature, so they can never be counted.
fn native_arity(args: &[Variant]) -> ExecResult<Variant> {
    let arity = match &args[0] {
        Variant::Function(fun) => fun.def().params.visible_arity(),
        Variant::Forwarding(fwd) => fwd.inner().def().params.visible_arity(),
        Variant::NativeFunction(fun) => fun.arity(),
        value => return Err(ErrorKind::NotCallable(value.type_name()).into()),
    };

    Ok(Variant::Integer(arity as _))
}

fn attr_name(arg: &Variant) -> ExecResult<InternSymbol> {
    arg.as_string()
        .ok_or_else(|| ErrorKind::UnexpectedArgType {
            expected: "string",
            received: arg.type_name(),
        }.into())
}

fn native_hasattr(args: &[Variant]) -> ExecResult<Variant> {
    let name = attr_name(&args[1])?;
    Ok(Variant::from(args[0].has_attr(name)?))
}

fn native_delattr(args: &[Variant]) -> ExecResult<Variant> {
    let name = attr_name(&args[1])?;
    Ok(Variant::from(args[0].del_attr(name)?))
}

fn native_attrnames(args: &[Variant]) -> ExecResult<Variant> {
    let names = args[0].attr_names()?;

    let items: Vec<Variant> = names.into_iter()
        .map(Variant::String)
        .collect();

    Ok(Variant::from(items))
}
