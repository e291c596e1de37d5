//! Error reporting and formatting for the embedding driver.

use std::fmt::Write;
use std::iter;
use crate::source::ModuleSource;
use crate::debug::DebugSymbol;
use crate::parser::ParserError;
use crate::transform::TransformError;


pub fn render_parse_errors(module: &ModuleSource, errors: &[ParserError]) -> String {
    let mut out = String::new();

    for error in errors {
        render_error(&mut out, module, error.debug_symbol(), &error.to_string());
    }

    out
}

pub fn render_transform_error(module: &ModuleSource, error: &TransformError) -> String {
    let mut out = String::new();

    render_error(&mut out, module, Some(error.debug_symbol()), &error.to_string());

    out
}

// compiler-style output:
//
//     error: <message>
//       --> <module>:<line>:<col>
//       |    <source line>
//            ^^^^
fn render_error(out: &mut String, module: &ModuleSource, symbol: Option<&DebugSymbol>, message: &str) {
    writeln!(out, "error: {}", message).unwrap();

    let symbol = match symbol {
        Some(symbol) => module.resolve_symbol(symbol),
        None => {
            writeln!(out, "  --> {}", module.name()).unwrap();
            return;
        },
    };

    writeln!(out, "  --> {}:{}:{}", module.name(), symbol.lineno(), symbol.start_col() + 1).unwrap();

    let margin = format!("{: >3}", symbol.lineno());
    writeln!(out, "{}|    {}", margin, symbol.line().trim_end()).unwrap();

    let mut marker = String::new();
    marker.extend(iter::repeat(' ').take(margin.len() + 5 + symbol.start_col()));
    marker.extend(iter::repeat('^').take(symbol.end_col().saturating_sub(symbol.start_col()).max(1)));
    writeln!(out, "{}", marker).unwrap();
}
