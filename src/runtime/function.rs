use std::rc::Rc;
use std::cell::RefCell;
use ahash::AHashMap;
use crate::language::InternSymbol;
use crate::parser::fundef::FunctionDef;
use crate::runtime::Variant;
use crate::runtime::environment::Environment;
use crate::runtime::errors::{ExecResult, ErrorKind};


// A function value: definition + captured environment + attribute table.
#[derive(Debug)]
pub struct Function {
    def: FunctionDef,
    env: Rc<Environment>,
    attrs: RefCell<AHashMap<InternSymbol, Variant>>,
}

impl Function {
    pub fn new(def: FunctionDef, env: Rc<Environment>) -> Self {
        Function {
            def, env,
            attrs: RefCell::new(AHashMap::new()),
        }
    }

    pub fn def(&self) -> &FunctionDef { &self.def }
    pub fn env(&self) -> &Rc<Environment> { &self.env }

    pub fn get_attr(&self, name: InternSymbol) -> Option<Variant> {
        self.attrs.borrow().get(&name).cloned()
    }

    pub fn set_attr(&self, name: InternSymbol, value: Variant) {
        self.attrs.borrow_mut().insert(name, value);
    }

    pub fn del_attr(&self, name: InternSymbol) -> Option<Variant> {
        self.attrs.borrow_mut().remove(&name)
    }

    pub fn has_attr(&self, name: InternSymbol) -> bool {
        self.attrs.borrow().contains_key(&name)
    }

    pub fn attr_names(&self) -> Vec<InternSymbol> {
        self.attrs.borrow().keys().copied().collect()
    }
}


pub type NativeFn = fn(&[Variant]) -> ExecResult<Variant>;

pub struct NativeFunction {
    name: &'static str,
    arity: usize,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new(name: &'static str, arity: usize, func: NativeFn) -> Self {
        Self { name, arity, func }
    }

    pub fn name(&self) -> &'static str { self.name }
    pub fn arity(&self) -> usize { self.arity }

    pub fn invoke(&self, args: &[Variant]) -> ExecResult<Variant> {
        if args.len() != self.arity {
            return Err(ErrorKind::InvalidArgumentCount {
                expected: self.arity,
                received: args.len(),
            }.into());
        }

        (self.func)(args)
    }
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}
