use std::rc::Rc;
use crate::parser::stmt::{Stmt, StmtMeta, StmtList};
use crate::runtime::{Variant, Environment, Function};
use crate::runtime::errors::{ExecResult, ErrorKind};
use super::Interpreter;
use super::eval::{EvalContext, Frame};


// control flow escaping a statement list
#[derive(Debug)]
pub enum Control {
    None,
    Return(Variant),
}


pub struct ExecContext<'a> {
    interp: &'a Interpreter,
    env: &'a Rc<Environment>,
    frame: Option<&'a Frame>,
}

impl<'a> ExecContext<'a> {
    pub fn new(interp: &'a Interpreter, env: &'a Rc<Environment>, frame: Option<&'a Frame>) -> Self {
        ExecContext { interp, env, frame }
    }

    fn eval_ctx(&self) -> EvalContext<'a> {
        EvalContext::new(self.interp, self.env, self.frame)
    }

    pub fn exec(&self, stmt: &StmtMeta) -> ExecResult<Control> {
        match stmt.variant() {

            Stmt::Expression(expr) => {
                self.eval_ctx().eval_variant(expr)?;
                Ok(Control::None)
            },

            Stmt::Let { name, init } => {
                let value = match init {
                    Some(expr) => self.eval_ctx().eval_variant(expr)?,
                    None => Variant::Nil,
                };
                self.env.insert_value(*name, value);
                Ok(Control::None)
            },

            // declarations bind in the current scope; the closure captures
            // the same scope, so recursion by name works
            Stmt::Function(fundef) => {
                let fun = Variant::from(Function::new(fundef.clone(), Rc::clone(self.env)));
                if let Some(name) = fundef.name {
                    self.env.insert_value(name, fun);
                }
                Ok(Control::None)
            },

            Stmt::If { branches, else_branch } => {
                for branch in branches.iter() {
                    if self.eval_ctx().eval_variant(branch.condition())?.truth_value() {
                        return self.exec_list(branch.body());
                    }
                }

                match else_branch {
                    Some(body) => self.exec_list(body),
                    None => Ok(Control::None),
                }
            },

            Stmt::While { condition, body } => {
                while self.eval_ctx().eval_variant(condition)?.truth_value() {
                    if let Control::Return(value) = self.exec_list(body)? {
                        return Ok(Control::Return(value));
                    }
                }
                Ok(Control::None)
            },

            Stmt::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval_ctx().eval_variant(expr)?,
                    None => Variant::Nil,
                };
                Ok(Control::Return(value))
            },

            Stmt::Assert(expr) => {
                if self.eval_ctx().eval_variant(expr)?.truth_value() {
                    Ok(Control::None)
                } else {
                    Err(ErrorKind::AssertFailed.into())
                }
            },

            Stmt::Echo(expr) => {
                let value = self.eval_ctx().eval_variant(expr)?;
                println!("{}", value.echo_str(&self.interp.interner));
                Ok(Control::None)
            },
        }
    }

    pub fn exec_list(&self, list: &StmtList) -> ExecResult<Control> {
        for stmt in list.iter() {
            if let Control::Return(value) = self.exec(stmt)? {
                return Ok(Control::Return(value));
            }
        }
        Ok(Control::None)
    }
}
