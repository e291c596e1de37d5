use std::collections::HashMap;
use once_cell::sync::Lazy;
use crate::lexer::Token;


pub type IntType = i64;    // internal representation for integers
pub type FloatType = f64;  // internal representation for floats

// identifier interning used throughout the frontend and runtime
pub type InternSymbol = string_interner::DefaultSymbol;
pub type InternBackend = string_interner::DefaultBackend<InternSymbol>;
pub type StringInterner = string_interner::StringInterner<InternBackend>;


static KEYWORDS: Lazy<HashMap<&'static str, Token>> = Lazy::new(|| {
    let mut keywords = HashMap::new();

    keywords.insert("and",    Token::And);
    keywords.insert("or",     Token::Or);
    keywords.insert("not",    Token::Not);
    keywords.insert("true",   Token::True);
    keywords.insert("false",  Token::False);
    keywords.insert("nil",    Token::Nil);

    keywords.insert("fun",    Token::Fun);
    keywords.insert("let",    Token::Let);
    keywords.insert("if",     Token::If);
    keywords.insert("else",   Token::Else);
    keywords.insert("while",  Token::While);
    keywords.insert("return", Token::Return);
    keywords.insert("assert", Token::Assert);
    keywords.insert("echo",   Token::Echo);

    keywords
});

pub fn keyword(name: &str) -> Option<Token> {
    KEYWORDS.get(name).cloned()
}
