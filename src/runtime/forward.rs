use std::rc::Rc;
use crate::runtime::function::Function;


// Capability object produced by the closure rewriter's forwarding wrap.
//
// Attribute get/set/delete/has/enumerate on this value are redirected to
// the target (the externally visible outer function object), while call
// behavior remains the wrapped inner closure's own. `visible` is the count
// of caller-visible parameters; each call through the capability exposes at
// most that many of its arguments in the callee's `arguments` view, so
// accumulator values threaded through internal recursion never appear in
// it. Every other behavior passes through unchanged.
#[derive(Debug)]
pub struct Forwarding {
    inner: Rc<Function>,
    target: Rc<Function>,
    visible: usize,
}

impl Forwarding {
    pub fn new(inner: Rc<Function>, target: Rc<Function>, visible: usize) -> Self {
        Forwarding { inner, target, visible }
    }

    pub fn inner(&self) -> &Rc<Function> { &self.inner }
    pub fn target(&self) -> &Rc<Function> { &self.target }
    pub fn visible(&self) -> usize { self.visible }
}
