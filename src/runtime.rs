mod tests;

pub mod errors;
pub mod variant;
pub mod function;
pub mod environment;
pub mod forward;
pub mod ops;

pub use variant::Variant;
pub use environment::Environment;
pub use function::{Function, NativeFunction};
pub use forward::Forwarding;
pub use errors::{RuntimeError, ErrorKind, ExecResult};
