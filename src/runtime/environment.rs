use std::rc::Rc;
use std::cell::RefCell;
use ahash::AHashMap;
use crate::language::InternSymbol;
use crate::runtime::Variant;


// Lexical scope chain. Closures capture their defining environment by
// handle, so bindings inserted after closure creation are still visible at
// call time.
#[derive(Debug, Default)]
pub struct Environment {
    values: RefCell<AHashMap<InternSymbol, Variant>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    pub fn new() -> Rc<Environment> {
        Rc::new(Environment::default())
    }

    pub fn nested(parent: &Rc<Environment>) -> Rc<Environment> {
        Rc::new(Environment {
            values: RefCell::new(AHashMap::new()),
            parent: Some(Rc::clone(parent)),
        })
    }

    // create or replace a binding in this scope
    pub fn insert_value(&self, name: InternSymbol, value: Variant) {
        self.values.borrow_mut().insert(name, value);
    }

    // this scope only
    pub fn lookup_value(&self, name: InternSymbol) -> Option<Variant> {
        self.values.borrow().get(&name).cloned()
    }

    // walk the scope chain
    pub fn find_value(&self, name: InternSymbol) -> Option<Variant> {
        match self.lookup_value(name) {
            Some(value) => Some(value),
            None => self.parent.as_ref()?.find_value(name),
        }
    }

    // assign to an existing binding, wherever it lives; false if unbound
    pub fn store_value(&self, name: InternSymbol, value: Variant) -> bool {
        if self.values.borrow().contains_key(&name) {
            self.values.borrow_mut().insert(name, value);
            return true;
        }

        match &self.parent {
            Some(parent) => parent.store_value(name, value),
            None => false,
        }
    }
}
