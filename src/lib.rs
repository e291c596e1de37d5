//! Source-to-source transform engine for private function parameters.
//!
//! Parameters declared with a `#` privacy marker are invisible to callers,
//! carry mandatory default values, and behave as closure-captured
//! accumulator variables across recursive invocations of the same function.
//! The pipeline is parse → validate → rewrite, with an optional call-site
//! optimizer pass; a small tree-walking interpreter executes the rewritten
//! output so the transform's behavioral guarantees are directly observable.

pub mod language;
pub mod source;
pub mod debug;
pub mod lexer;
pub mod parser;
pub mod transform;
pub mod runtime;
pub mod interpreter;
pub mod builtins;
pub mod frontend;

use language::StringInterner;
use source::ModuleSource;
use lexer::Lexer;
use parser::{Parser, ParserError};
use parser::stmt::StmtMeta;
use transform::TransformError;


#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    // run the call-site optimizer after rewriting
    pub flatten_calls: bool,
}

#[derive(Debug)]
pub enum BuildErrors {
    // depending on which stage the build failed
    Syntax(Box<[ParserError]>),
    Transform(Box<TransformError>),
}

/// Produce an AST from source text.
pub fn parse_source(interner: &mut StringInterner, text: &str) -> Result<Vec<StmtMeta>, Vec<ParserError>> {
    let lexer = Lexer::new(text.chars());
    let parser = Parser::new(interner, lexer);

    parser.parse_module()
}

/// Parse and transform a module: every function declaring private
/// parameters is validated and rewritten into its two-layer closure form,
/// then optionally flattened by the call-site optimizer.
pub fn build_source(module: &ModuleSource, options: &BuildOptions) -> Result<(Vec<StmtMeta>, StringInterner), BuildErrors> {
    let mut interner = StringInterner::new();

    let ast = parse_source(&mut interner, module.text())
        .map_err(|errors| BuildErrors::Syntax(errors.into_boxed_slice()))?;

    let ast = transform::transform_module(ast, &mut interner)
        .map_err(|error| BuildErrors::Transform(Box::new(error)))?;

    let ast =
        if options.flatten_calls {
            transform::optimize::optimize_module(ast, &interner)
        } else {
            ast
        };

    Ok((ast, interner))
}

pub fn render_build_errors(module: &ModuleSource, errors: &BuildErrors) -> String {
    match errors {
        BuildErrors::Syntax(errors) => frontend::render_parse_errors(module, errors),
        BuildErrors::Transform(error) => frontend::render_transform_error(module, error),
    }
}
