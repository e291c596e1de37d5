//! The private-parameter transform pipeline.
//!
//! Parameter lists arrive from the parser as ordered descriptor lists; the
//! validator checks the structural constraints, the rewriter replaces each
//! function that declares private parameters with a two-layer closure form,
//! and the optional optimizer flattens that form back into a single function
//! where a whole-module analysis proves it safe. Validation always runs
//! before any rewrite; nothing is ever partially rewritten.

mod errors;
mod tests;

pub mod validate;
pub mod rewrite;
pub mod optimize;

pub use errors::{TransformError, TransformErrorKind};
pub use rewrite::{transform_module, transform_function};
