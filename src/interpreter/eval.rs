use std::rc::Rc;
use crate::language::InternSymbol;
use crate::parser::expr::{Expr, ExprMeta};
use crate::parser::primary::{Atom, AccessItem, Primary};
use crate::parser::lvalue::{LValue, Assignment};
use crate::parser::operator::{UnaryOp, BinaryOp};
use crate::parser::fundef::{FunctionDef, ParamKind};
use crate::runtime::{Variant, Environment, Function, Forwarding};
use crate::runtime::errors::{ExecResult, ErrorKind};
use crate::runtime::ops::*;
use super::Interpreter;
use super::exec::{ExecContext, Control};


// Per-call data. The rewriter's forwarding forms need the identity of the
// executing function and the arguments as supplied by the caller.
pub struct Frame {
    callee: Rc<Function>,
    args: Box<[Variant]>,
}


pub struct EvalContext<'a> {
    interp: &'a Interpreter,
    env: &'a Rc<Environment>,
    frame: Option<&'a Frame>,
}

impl<'a> EvalContext<'a> {
    pub fn new(interp: &'a Interpreter, env: &'a Rc<Environment>, frame: Option<&'a Frame>) -> Self {
        EvalContext { interp, env, frame }
    }

    pub fn eval(&self, expr: &ExprMeta) -> ExecResult<Variant> {
        self.eval_variant(expr.variant())
    }

    pub fn eval_variant(&self, expr: &Expr) -> ExecResult<Variant> {
        match expr {
            Expr::Atom(atom) => self.eval_atom(atom),

            Expr::Primary(primary) => self.eval_primary(primary),

            Expr::UnaryOp(op, operand) => self.eval_unary_op(*op, operand),

            Expr::BinaryOp(op, operands) => {
                let (lhs, rhs) = &**operands;
                self.eval_binary_op(*op, lhs, rhs)
            },

            Expr::Assignment(assignment) => self.eval_assignment(assignment),

            Expr::FunctionDef(fundef) => Ok(self.make_closure(fundef)),

            Expr::Forwarding { fun, visible } => self.eval_forwarding(fun, *visible),

            Expr::DelegateCall(callee) => self.eval_delegate_call(callee),
        }
    }

    fn eval_atom(&self, atom: &Atom) -> ExecResult<Variant> {
        let value = match atom {
            Atom::Nil => Variant::Nil,
            Atom::BooleanLiteral(value) => Variant::from(*value),
            Atom::IntegerLiteral(value) => Variant::Integer(*value),
            Atom::FloatLiteral(value) => Variant::Float(*value),
            Atom::StringLiteral(symbol) => Variant::String(*symbol),

            Atom::Identifier(name) => self.find_value(*name)?,

            Atom::Group(expr) => self.eval(expr)?,
        };
        Ok(value)
    }

    fn find_value(&self, name: InternSymbol) -> ExecResult<Variant> {
        self.env.find_value(name)
            .ok_or_else(|| {
                let name = self.interp.interner.resolve(name).unwrap_or("<unknown>").to_string();
                ErrorKind::NameNotDefined(name).into()
            })
    }

    fn eval_primary(&self, primary: &Primary) -> ExecResult<Variant> {
        let mut value = self.eval_atom(primary.atom())?;

        for item in primary.path().iter() {
            value = match item {
                AccessItem::Attribute(name) => value.get_attr(*name)?,

                AccessItem::Index(index) => {
                    let index = self.eval(index)?;
                    eval_index(&value, &index)?
                },

                AccessItem::Invoke(args) => {
                    let mut arg_values = Vec::with_capacity(args.len());
                    for arg in args.iter() {
                        arg_values.push(self.eval(arg)?);
                    }
                    call_value(self.interp, &value, arg_values)?
                },
            };
        }

        Ok(value)
    }

    fn eval_unary_op(&self, op: UnaryOp, operand: &ExprMeta) -> ExecResult<Variant> {
        let operand = self.eval(operand)?;

        match op {
            UnaryOp::Neg => eval_neg(&operand),
            UnaryOp::Not => Ok(eval_not(&operand)),
        }
    }

    fn eval_binary_op(&self, op: BinaryOp, lhs: &ExprMeta, rhs: &ExprMeta) -> ExecResult<Variant> {
        // logical operators short-circuit
        if matches!(op, BinaryOp::And | BinaryOp::Or) {
            let lhs_value = self.eval(lhs)?;

            let take_lhs = match op {
                BinaryOp::And => !lhs_value.truth_value(),
                _ => lhs_value.truth_value(),
            };

            return if take_lhs { Ok(lhs_value) } else { self.eval(rhs) };
        }

        let lhs = self.eval(lhs)?;
        let rhs = self.eval(rhs)?;

        match op {
            BinaryOp::Mul => eval_mul(&lhs, &rhs),
            BinaryOp::Div => eval_div(&lhs, &rhs),
            BinaryOp::Mod => eval_mod(&lhs, &rhs),
            BinaryOp::Add => eval_add(&lhs, &rhs),
            BinaryOp::Sub => eval_sub(&lhs, &rhs),
            BinaryOp::LT => eval_lt(&lhs, &rhs),
            BinaryOp::GT => eval_gt(&lhs, &rhs),
            BinaryOp::LE => eval_le(&lhs, &rhs),
            BinaryOp::GE => eval_ge(&lhs, &rhs),
            BinaryOp::EQ => Ok(eval_eq(&lhs, &rhs)),
            BinaryOp::NE => Ok(eval_ne(&lhs, &rhs)),
            BinaryOp::And | BinaryOp::Or => unreachable!(),
        }
    }

    fn eval_assignment(&self, assignment: &Assignment) -> ExecResult<Variant> {
        let value = self.eval(&assignment.rhs)?;

        match &assignment.lhs {
            LValue::Identifier(name) => {
                if !self.env.store_value(*name, value.clone()) {
                    return self.find_value(*name); // produces NameNotDefined
                }
            },

            LValue::Attribute(target) => {
                let receiver = self.eval_primary(&target.receiver)?;
                receiver.set_attr(target.name, value.clone())?;
            },
        }

        Ok(value)
    }

    fn make_closure(&self, def: &FunctionDef) -> Variant {
        match def.name {
            // a named function expression can call itself by name
            Some(name) => {
                let local = Environment::nested(self.env);
                let fun = Variant::from(Function::new(def.clone(), Rc::clone(&local)));
                local.insert_value(name, fun.clone());
                fun
            },
            None => Variant::from(Function::new(def.clone(), Rc::clone(self.env))),
        }
    }

    // close the inner definition over the current frame and wrap it in the
    // forwarding capability targeting the executing function's identity
    fn eval_forwarding(&self, fun: &FunctionDef, visible: usize) -> ExecResult<Variant> {
        let frame = match self.frame {
            Some(frame) => frame,
            None => return Err(ErrorKind::ForwardingOutsideFunction.into()),
        };

        let inner = Rc::new(Function::new(fun.clone(), Rc::clone(self.env)));
        Ok(Variant::from(Forwarding::new(inner, Rc::clone(&frame.callee), visible)))
    }

    // invoke the callee, forwarding this frame's supplied arguments
    // truncated to the executing function's declared parameter count
    fn eval_delegate_call(&self, callee: &ExprMeta) -> ExecResult<Variant> {
        let frame = match self.frame {
            Some(frame) => frame,
            None => return Err(ErrorKind::ForwardingOutsideFunction.into()),
        };

        let callee = self.eval(callee)?;

        let count = frame.args.len().min(frame.callee.def().params.len());
        let args = frame.args[..count].to_vec();

        call_value(self.interp, &callee, args)
    }
}


// call dispatch
pub fn call_value(interp: &Interpreter, callee: &Variant, args: Vec<Variant>) -> ExecResult<Variant> {
    match callee {
        Variant::Function(fun) => invoke_function(interp, fun, args, None),

        // calls pass through to the inner closure; only the arguments view
        // is bounded by the capability
        Variant::Forwarding(fwd) => invoke_function(interp, fwd.inner(), args, Some(fwd.visible())),

        Variant::NativeFunction(fun) => fun.invoke(&args),

        _ => Err(ErrorKind::NotCallable(callee.type_name()).into()),
    }
}

/*
    Parameters bind left to right. A defaulted parameter's expression is
    evaluated in the new frame, so it sees previously-bound parameters. A
    rest parameter collects the remaining arguments into a list. Arguments
    beyond the declared parameters are ignored.

    The `arguments` binding holds the caller-visible prefix of the supplied
    arguments: everything that was supplied for a plain call, at most
    `visible` entries for a call through a forwarding capability.
*/
fn invoke_function(interp: &Interpreter, fun: &Rc<Function>, args: Vec<Variant>, visible: Option<usize>) -> ExecResult<Variant> {
    interp.enter_call()?;
    let result = invoke_inner(interp, fun, args, visible);
    interp.exit_call();
    result
}

fn invoke_inner(interp: &Interpreter, fun: &Rc<Function>, args: Vec<Variant>, visible: Option<usize>) -> ExecResult<Variant> {
    let env = Environment::nested(fun.env());
    let frame = Frame {
        callee: Rc::clone(fun),
        args: args.into_boxed_slice(),
    };

    let ctx = EvalContext::new(interp, &env, Some(&frame));

    let def = fun.def();
    let mut index = 0;
    for param in def.params.iter() {
        let value = match param.kind {
            ParamKind::Rest => {
                let rest = frame.args.get(index..).unwrap_or(&[]).to_vec();
                index = frame.args.len();
                Variant::from(rest)
            },

            ParamKind::Simple => {
                let value = match frame.args.get(index) {
                    Some(value) => value.clone(),
                    None => match &param.default {
                        Some(default) => ctx.eval(default)?,
                        None => Variant::Nil,
                    },
                };
                index += 1;
                value
            },
        };

        env.insert_value(param.name, value);
    }

    let visible = visible.unwrap_or(frame.args.len()).min(frame.args.len());
    env.insert_value(interp.args_name, Variant::from(frame.args[..visible].to_vec()));

    let exec = ExecContext::new(interp, &env, Some(&frame));
    for stmt in def.body.iter() {
        if let Control::Return(value) = exec.exec(stmt)? {
            return Ok(value);
        }
    }
    Ok(Variant::Nil)
}

fn eval_index(value: &Variant, index: &Variant) -> ExecResult<Variant> {
    let items = match value {
        Variant::List(items) => items,
        _ => return Err(ErrorKind::NotIndexable(value.type_name()).into()),
    };

    let index = match index {
        Variant::Integer(index) => *index,
        _ => return Err(ErrorKind::InvalidIndex(index.type_name()).into()),
    };

    if index < 0 || index as usize >= items.len() {
        return Err(ErrorKind::IndexOutOfBounds { index, len: items.len() }.into());
    }

    Ok(items[index as usize].clone())
}
