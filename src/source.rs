use crate::debug::DebugSymbol;


// A named unit of source text, provided by the embedding driver. The
// transform core performs no I/O of its own.
#[derive(Debug, Clone)]
pub struct ModuleSource {
    name: String,
    text: String,
}

impl ModuleSource {
    pub fn new(name: impl ToString, text: impl ToString) -> Self {
        ModuleSource {
            name: name.to_string(),
            text: text.to_string(),
        }
    }

    pub fn name(&self) -> &str { self.name.as_str() }
    pub fn text(&self) -> &str { self.text.as_str() }

    // Resolve a symbol's char range against the source text. Multi-line
    // symbols resolve to their first line.
    pub fn resolve_symbol(&self, symbol: &DebugSymbol) -> ResolvedSymbol {
        let mut lineno = 1;
        let mut line_start = 0; // char index of the start of the current line

        let mut chars = self.text.chars().enumerate();
        let mut line = String::new();

        loop {
            match chars.next() {
                Some((index, '\n')) => {
                    if index >= symbol.start {
                        break;
                    }
                    lineno += 1;
                    line_start = index + 1;
                    line.clear();
                },

                Some((_, ch)) => line.push(ch),

                None => break,
            }
        }

        let start_col = symbol.start.saturating_sub(line_start);
        let end_col = symbol.end.saturating_sub(line_start).min(line.chars().count().max(start_col + 1));

        ResolvedSymbol {
            lineno,
            line,
            start_col,
            end_col,
        }
    }
}


#[derive(Debug, Clone)]
pub struct ResolvedSymbol {
    lineno: usize,     // 1-based
    line: String,      // source line containing the start of the symbol
    start_col: usize,  // 0-based char columns within the line
    end_col: usize,
}

impl ResolvedSymbol {
    pub fn lineno(&self) -> usize { self.lineno }
    pub fn line(&self) -> &str { self.line.as_str() }
    pub fn start_col(&self) -> usize { self.start_col }
    pub fn end_col(&self) -> usize { self.end_col }
}
