mod eval;
mod exec;

pub use exec::Control;
pub use eval::call_value;

use std::cell::Cell;
use std::rc::Rc;
use crate::language::{StringInterner, InternSymbol};
use crate::parser::stmt::StmtMeta;
use crate::runtime::{Variant, Environment, ExecResult, ErrorKind};
use crate::builtins;


// recursion limit for the tree-walking evaluator
const MAX_CALL_DEPTH: usize = 500;

pub struct Interpreter {
    interner: StringInterner,
    globals: Rc<Environment>,
    args_name: InternSymbol,
    depth: Cell<usize>,
}

impl Interpreter {
    pub fn new(mut interner: StringInterner) -> Self {
        let globals = Environment::new();
        builtins::install(&globals, &mut interner);

        let args_name = interner.get_or_intern("arguments");

        Interpreter {
            interner,
            globals,
            args_name,
            depth: Cell::new(0),
        }
    }

    pub fn interner(&self) -> &StringInterner { &self.interner }
    pub fn globals(&self) -> &Rc<Environment> { &self.globals }

    pub fn exec_module(&self, stmts: &[StmtMeta]) -> ExecResult<()> {
        let exec = exec::ExecContext::new(self, &self.globals, None);

        for stmt in stmts {
            if let Control::Return(..) = exec.exec(stmt)? {
                break;
            }
        }
        Ok(())
    }

    pub fn global(&self, name: &str) -> Option<Variant> {
        let name = self.interner.get(name)?;
        self.globals.find_value(name)
    }

    pub fn call(&self, callee: &Variant, args: Vec<Variant>) -> ExecResult<Variant> {
        eval::call_value(self, callee, args)
    }

    fn enter_call(&self) -> ExecResult<()> {
        let depth = self.depth.get() + 1;
        if depth > MAX_CALL_DEPTH {
            return Err(ErrorKind::RecursionLimit.into());
        }
        self.depth.set(depth);
        Ok(())
    }

    fn exit_call(&self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
