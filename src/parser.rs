mod errors;
mod tests;

pub mod expr;
pub mod stmt;
pub mod primary;
pub mod operator;
pub mod lvalue;
pub mod fundef;

pub use errors::{ParserError, ParserErrorKind, ContextTag};

use crate::language::{StringInterner, InternSymbol};
use crate::lexer::{TokenMeta, Token, Span, LexerError};
use crate::debug::DebugSymbol;

use expr::{Expr, ExprMeta};
use stmt::{Stmt, StmtMeta, StmtList, CondBranch};
use primary::{Primary, Atom};
use operator::{UnaryOp, BinaryOp, Precedence, PRECEDENCE_START, PRECEDENCE_END};
use lvalue::{LValue, Assignment};
use fundef::{FunctionDef, ParamDef, ParamList, Visibility, ParamKind};
use errors::{ErrorPrototype, ErrorKind, ErrorContext};


// Recursive descent parser

pub struct Parser<'h, T> where T: Iterator<Item=Result<TokenMeta, LexerError>> {
    interner: &'h mut StringInterner,
    tokens: T,
    next: Option<Result<TokenMeta, LexerError>>,
    last_span: Span, // span of the most recently consumed token
}

type InternalResult<T> = Result<T, ErrorPrototype>;

impl<'h, T> Parser<'h, T> where T: Iterator<Item=Result<TokenMeta, LexerError>> {

    pub fn new(interner: &'h mut StringInterner, tokens: T) -> Self {
        Parser {
            interner,
            tokens,
            next: None,
            last_span: Span { index: 0, length: 0 },
        }
    }

    fn next_token(&mut self) -> Result<TokenMeta, LexerError> {
        // should never run out of tokens as we should always get EOF first
        self.tokens.next().expect("unexpected end of token sequence")
    }

    fn advance(&mut self) -> InternalResult<TokenMeta> {
        let result = self.next.take()
            .unwrap_or_else(|| self.next_token());

        match result {
            Ok(token) => {
                self.last_span = token.span;
                Ok(token)
            },
            Err(error) => Err(ErrorPrototype::caused_by(Box::new(error), ErrorKind::LexerError)),
        }
    }

    fn peek(&mut self) -> InternalResult<&TokenMeta> {
        if self.next.is_none() {
            self.next = Some(self.next_token());
        }

        // a reference can only be produced in the Ok branch; the Err branch
        // has to take ownership of the underlying lexer error by advancing
        if self.next.as_ref().unwrap().is_ok() {
            Ok(self.next.as_ref().unwrap().as_ref().unwrap())
        } else {
            Err(self.advance().unwrap_err())
        }
    }

    fn peek_span(&mut self) -> InternalResult<Span> {
        Ok(self.peek()?.span)
    }

    // symbol covering everything consumed since `start`
    fn span_symbol(&self, start: &Span) -> DebugSymbol {
        DebugSymbol::new(start.index, self.last_span.index + self.last_span.length)
    }

    /*** Module Parsing ***/

    pub fn parse_module(mut self) -> Result<Vec<StmtMeta>, Vec<ParserError>> {
        let mut stmts = Vec::new();
        let mut errors = Vec::new();

        loop {
            let mut ctx = ErrorContext::new(ContextTag::TopLevel);

            match self.peek() {
                Ok(token) if matches!(token.token, Token::EOF) => break,

                Ok(..) => match self.parse_stmt(&mut ctx) {
                    Ok(stmt) => stmts.push(stmt),
                    Err(proto) => {
                        errors.push(ParserError::from_prototype(proto, ctx));
                        self.synchronize_stmt();
                    },
                },

                Err(proto) => {
                    errors.push(ParserError::from_prototype(proto, ctx));
                    self.synchronize_stmt();
                },
            }
        }

        if errors.is_empty() {
            Ok(stmts)
        } else {
            Err(errors)
        }
    }

    // Discards tokens until we reach a likely statement boundary
    fn synchronize_stmt(&mut self) {
        loop {
            match self.peek() {
                Err(..) => continue, // the bad token was consumed by peek

                Ok(token) => match token.token {
                    Token::EOF
                    | Token::Fun | Token::Let
                    | Token::If | Token::While
                    | Token::Return | Token::Assert | Token::Echo => break,

                    Token::Semicolon => {
                        self.advance().unwrap();
                        break;
                    },

                    _ => { self.advance().unwrap(); },
                },
            }
        }
    }

    /*** Statement Parsing ***/

    /*
        statement ::= function-decl | let-stmt | return-stmt | if-stmt
                    | while-stmt | assert-stmt | echo-stmt | expr-stmt ;
    */
    fn parse_stmt(&mut self, ctx: &mut ErrorContext) -> InternalResult<StmtMeta> {
        ctx.push(ContextTag::Stmt);

        let start = self.peek_span()?;

        let variant = match self.peek()?.token {
            Token::Fun => {
                let fundef = self.parse_function_def(ctx)?;
                if fundef.name.is_some() {
                    Stmt::Function(fundef)
                } else {
                    // an anonymous function in statement position is just an
                    // expression statement
                    self.expect_semicolon(ctx)?;
                    Stmt::Expression(Expr::FunctionDef(fundef))
                }
            },

            Token::Let => {
                self.advance().unwrap();

                let name = self.expect_identifier(ctx)?;

                let init =
                    if matches!(self.peek()?.token, Token::OpAssign) {
                        self.advance().unwrap();
                        Some(self.parse_expr(ctx)?.take_variant())
                    } else {
                        None
                    };

                self.expect_semicolon(ctx)?;
                Stmt::Let { name, init }
            },

            Token::Return => {
                self.advance().unwrap();

                let expr =
                    if matches!(self.peek()?.token, Token::Semicolon) {
                        None
                    } else {
                        Some(self.parse_expr(ctx)?.take_variant())
                    };

                self.expect_semicolon(ctx)?;
                Stmt::Return(expr)
            },

            Token::If => self.parse_if_stmt(ctx)?,

            Token::While => {
                self.advance().unwrap();

                let condition = self.parse_condition(ctx)?;
                let body = self.parse_block(ctx)?;
                Stmt::While { condition, body }
            },

            Token::Assert => {
                self.advance().unwrap();

                let expr = self.parse_expr(ctx)?.take_variant();
                self.expect_semicolon(ctx)?;
                Stmt::Assert(expr)
            },

            Token::Echo => {
                self.advance().unwrap();

                let expr = self.parse_expr(ctx)?.take_variant();
                self.expect_semicolon(ctx)?;
                Stmt::Echo(expr)
            },

            _ => {
                let expr = self.parse_expr(ctx)?.take_variant();
                self.expect_semicolon(ctx)?;
                Stmt::Expression(expr)
            },
        };

        ctx.pop_extend();
        Ok(StmtMeta::new(variant, self.span_symbol(&start)))
    }

    /*
        if-stmt ::= "if" "(" expression ")" block ( "else" ( if-stmt | block ) )? ;
    */
    fn parse_if_stmt(&mut self, ctx: &mut ErrorContext) -> InternalResult<Stmt> {
        let mut branches = Vec::new();
        let mut else_branch = None;

        loop {
            self.advance().unwrap(); // consume "if"

            let condition = self.parse_condition(ctx)?;
            let body = self.parse_block(ctx)?;
            branches.push(CondBranch::new(condition, body));

            if !matches!(self.peek()?.token, Token::Else) {
                break;
            }
            self.advance().unwrap(); // consume "else"

            if !matches!(self.peek()?.token, Token::If) {
                else_branch = Some(self.parse_block(ctx)?);
                break;
            }
        }

        Ok(Stmt::If {
            branches: branches.into_boxed_slice(),
            else_branch,
        })
    }

    // "(" expression ")" after "if"/"while"
    fn parse_condition(&mut self, ctx: &mut ErrorContext) -> InternalResult<Expr> {
        let next = self.advance()?;
        ctx.set_end(&next);
        if !matches!(next.token, Token::OpenParen) {
            return Err(ErrorKind::ExpectedOpenParen.into());
        }

        let condition = self.parse_expr(ctx)?.take_variant();

        let next = self.advance()?;
        ctx.set_end(&next);
        if !matches!(next.token, Token::CloseParen) {
            return Err(ErrorKind::ExpectedCloseParen.into());
        }

        Ok(condition)
    }

    /*
        block ::= "{" statement* "}" ;
    */
    fn parse_block(&mut self, ctx: &mut ErrorContext) -> InternalResult<StmtList> {
        ctx.push(ContextTag::Block);

        let next = self.advance()?;
        ctx.set_start(&next);
        if !matches!(next.token, Token::OpenBrace) {
            return Err(ErrorKind::ExpectedOpenBrace.into());
        }

        let mut suite = Vec::new();
        loop {
            match self.peek()?.token {
                Token::CloseBrace => {
                    ctx.set_end(&self.advance().unwrap());
                    break;
                },
                Token::EOF => return Err(ErrorKind::ExpectedCloseBrace.into()),
                _ => suite.push(self.parse_stmt(ctx)?),
            }
        }

        ctx.pop_extend();
        Ok(StmtList::new(suite))
    }

    fn expect_semicolon(&mut self, ctx: &mut ErrorContext) -> InternalResult<()> {
        let next = self.advance()?;
        ctx.set_end(&next);

        if matches!(next.token, Token::Semicolon) {
            Ok(())
        } else {
            Err(ErrorKind::ExpectedSemicolon.into())
        }
    }

    fn expect_identifier(&mut self, ctx: &mut ErrorContext) -> InternalResult<InternSymbol> {
        let next = self.advance()?;
        ctx.set_end(&next);

        if let Token::Identifier(name) = next.token {
            Ok(self.interner.get_or_intern(name))
        } else {
            Err(ErrorKind::ExpectedIdentifier.into())
        }
    }

    /*** Function Definitions ***/

    /*
        function-def ::= "fun" IDENTIFIER? "(" parameter-list? ")" block ;
    */
    fn parse_function_def(&mut self, ctx: &mut ErrorContext) -> InternalResult<FunctionDef> {
        ctx.push(ContextTag::FunDef);

        let next = self.advance().unwrap();
        ctx.set_start(&next);
        debug_assert!(matches!(next.token, Token::Fun));

        let name =
            if matches!(self.peek()?.token, Token::Identifier(..)) {
                Some(self.expect_identifier(ctx)?)
            } else {
                None
            };

        let next = self.advance()?;
        ctx.set_end(&next);
        if !matches!(next.token, Token::OpenParen) {
            return Err(ErrorKind::ExpectedOpenParen.into());
        }

        let params = self.parse_param_list(ctx)?;
        let body = self.parse_block(ctx)?;

        ctx.pop_extend();
        Ok(FunctionDef::new(name, params, body))
    }

    /*
        parameter-list ::= parameter ( "," parameter )* ;
        parameter ::= "#"? "..."? IDENTIFIER ( "=" expression )? ;

        A single left-to-right pass with no backtracking: the marker set is
        unambiguous at the start of each parameter. Consumes the closing ')'.
        Structural constraints over the finished list (ordering, mandatory
        defaults, duplicates, private rest) are the validator's concern, not
        the parser's.
    */
    fn parse_param_list(&mut self, ctx: &mut ErrorContext) -> InternalResult<ParamList> {
        ctx.push(ContextTag::ParamList);

        if matches!(self.peek()?.token, Token::CloseParen) {
            ctx.set_end(&self.advance().unwrap());
            ctx.pop_extend();
            return Ok(ParamList::new(Vec::new()));
        }

        let mut params = Vec::new();
        loop {
            let param_start = self.peek_span()?;

            let visibility =
                if matches!(self.peek()?.token, Token::Hash) {
                    self.advance().unwrap();
                    Visibility::Private
                } else {
                    Visibility::Public
                };

            let kind =
                if matches!(self.peek()?.token, Token::Ellipsis) {
                    self.advance().unwrap();
                    ParamKind::Rest
                } else {
                    ParamKind::Simple
                };

            let next = self.advance()?;
            ctx.set_end(&next);
            let name = match next.token {
                Token::Identifier(name) => self.interner.get_or_intern(name),
                _ => return Err(ErrorKind::MalformedParameterList.into()),
            };

            let default =
                if matches!(self.peek()?.token, Token::OpAssign) {
                    self.advance().unwrap();

                    // a rest parameter cannot carry a default expression
                    if matches!(kind, ParamKind::Rest) {
                        return Err(ErrorKind::MalformedParameterList.into());
                    }

                    Some(Box::new(self.parse_expr(ctx)?))
                } else {
                    None
                };

            params.push(ParamDef {
                name, visibility, kind, default,
                symbol: self.span_symbol(&param_start),
            });

            let next = self.advance()?;
            ctx.set_end(&next);
            match next.token {
                Token::CloseParen => break,

                Token::Comma => {
                    // nothing may follow a rest parameter
                    if params.last().unwrap().is_rest() {
                        return Err(ErrorKind::MalformedParameterList.into());
                    }
                },

                _ => return Err(ErrorKind::MalformedParameterList.into()),
            }
        }

        ctx.pop_extend();
        Ok(ParamList::new(params))
    }

    /*** Expression Parsing ***/

    fn parse_expr(&mut self, ctx: &mut ErrorContext) -> InternalResult<ExprMeta> {
        self.parse_assignment_expr(ctx)
    }

    /*
        assignment-expression ::= lvalue "=" assignment-expression | binop-expression ;
    */
    fn parse_assignment_expr(&mut self, ctx: &mut ErrorContext) -> InternalResult<ExprMeta> {
        let start = self.peek_span()?;

        let expr = self.parse_binop_expr(ctx, PRECEDENCE_START)?;

        if matches!(self.peek()?.token, Token::OpAssign) {
            ctx.push_continuation(ContextTag::AssignmentExpr);
            ctx.set_end(&self.advance().unwrap());

            // LHS of assignment has to be an lvalue
            let lhs = match LValue::try_from(expr.take_variant()) {
                Ok(lhs) => lhs,
                Err(..) => return Err(ErrorKind::InvalidAssignmentLHS.into()),
            };

            let rhs = self.parse_assignment_expr(ctx)?; // right-associative

            ctx.pop_extend();
            let variant = Expr::assignment(Assignment { lhs, rhs });
            return Ok(ExprMeta::new(variant, self.span_symbol(&start)));
        }

        Ok(expr)
    }

    /*
        Binary operator syntax:

        operand[0] ::= unary ;
        operand[N] ::= operand[N-1] ( OPERATOR[N] operand[N-1] )* ;
    */
    fn parse_binop_expr(&mut self, ctx: &mut ErrorContext, level: Precedence) -> InternalResult<ExprMeta> {
        if level == PRECEDENCE_END {
            return self.parse_unary_expr(ctx); // exit binop precedence recursion
        }

        let start = self.peek_span()?;
        let mut expr = self.parse_binop_expr(ctx, level - 1)?;

        loop {
            let binary_op = Self::which_binary_op(&self.peek()?.token);

            let binary_op = match binary_op {
                Some(op) if op.precedence_level() == level => op,
                _ => break,
            };

            ctx.push_continuation(ContextTag::BinaryOpExpr);
            ctx.set_end(&self.advance().unwrap()); // consume binary_op token

            let rhs = self.parse_binop_expr(ctx, level - 1)?;

            let variant = Expr::binary_op(binary_op, expr, rhs);
            expr = ExprMeta::new(variant, self.span_symbol(&start));

            ctx.pop_extend();
        }

        Ok(expr)
    }

    /*
        unary-expression ::= ( "-" | "not" ) unary-expression | primary-expression ;
    */
    fn parse_unary_expr(&mut self, ctx: &mut ErrorContext) -> InternalResult<ExprMeta> {
        let start = self.peek_span()?;

        if let Some(unary_op) = Self::which_unary_op(&self.peek()?.token) {
            ctx.push(ContextTag::UnaryOpExpr);
            ctx.set_start(&self.advance().unwrap()); // consume unary_op token

            let operand = self.parse_unary_expr(ctx)?;

            ctx.pop_extend();
            let variant = Expr::unary_op(unary_op, operand);
            return Ok(ExprMeta::new(variant, self.span_symbol(&start)));
        }

        self.parse_primary_expr(ctx)
    }

    fn which_unary_op(token: &Token) -> Option<UnaryOp> {
        let op = match token {
            Token::OpSub => UnaryOp::Neg,
            Token::Not => UnaryOp::Not,

            _ => return None,
        };

        Some(op)
    }

    fn which_binary_op(token: &Token) -> Option<BinaryOp> {
        let op = match token {
            Token::OpMul => BinaryOp::Mul,
            Token::OpDiv => BinaryOp::Div,
            Token::OpMod => BinaryOp::Mod,
            Token::OpAdd => BinaryOp::Add,
            Token::OpSub => BinaryOp::Sub,
            Token::OpLT => BinaryOp::LT,
            Token::OpGT => BinaryOp::GT,
            Token::OpLE => BinaryOp::LE,
            Token::OpGE => BinaryOp::GE,
            Token::OpEQ => BinaryOp::EQ,
            Token::OpNE => BinaryOp::NE,
            Token::And => BinaryOp::And,
            Token::Or => BinaryOp::Or,

            _ => return None,
        };

        Some(op)
    }

    /*
        Anything that binds tighter than unary or binary operator expressions.
    */
    fn parse_primary_expr(&mut self, ctx: &mut ErrorContext) -> InternalResult<ExprMeta> {
        let start = self.peek_span()?;

        if matches!(self.peek()?.token, Token::Fun) {
            let fundef = self.parse_function_def(ctx)?;
            return Ok(ExprMeta::new(Expr::FunctionDef(fundef), self.span_symbol(&start)));
        }

        let primary = self.parse_primary(ctx)?;

        let variant =
            if primary.path().is_empty() {
                let (atom, _) = primary.take();
                Expr::Atom(atom)
            } else {
                Expr::primary(primary)
            };

        Ok(ExprMeta::new(variant, self.span_symbol(&start)))
    }

    /*
        primary ::= atom ( access | subscript | invocation )* ;
        subscript ::= "[" expression "]" ;
        access ::= "." IDENTIFIER ;
        invocation ::= "(" ( expression ( "," expression )* )? ")" ;
    */
    fn parse_primary(&mut self, ctx: &mut ErrorContext) -> InternalResult<Primary> {
        ctx.push(ContextTag::PrimaryExpr);

        let mut primary = Primary::new(self.parse_atom(ctx)?);

        loop {
            match self.peek()?.token {

                // access ::= "." IDENTIFIER ;
                Token::OpAccess => {
                    ctx.push(ContextTag::MemberAccess);
                    ctx.set_start(&self.advance().unwrap());

                    let name = self.expect_identifier(ctx)?;
                    primary.push_access_attr(name);

                    ctx.pop_extend();
                },

                // subscript ::= "[" expression "]" ;
                Token::OpenSquare => {
                    ctx.push(ContextTag::IndexAccess);
                    ctx.set_start(&self.advance().unwrap());

                    let index_expr = self.parse_expr(ctx)?;

                    let next = self.advance()?;
                    ctx.set_end(&next);
                    if !matches!(next.token, Token::CloseSquare) {
                        return Err(ErrorKind::ExpectedCloseSquare.into());
                    }
                    primary.push_access_index(index_expr);

                    ctx.pop_extend();
                },

                // invocation ::= "(" ... ")" ;
                Token::OpenParen => {
                    ctx.push(ContextTag::Invocation);
                    ctx.set_start(&self.advance().unwrap());

                    let args = self.parse_invoke_args(ctx)?;
                    primary.push_invoke(args);

                    ctx.pop_extend();
                },

                _ => break,
            }
        }

        ctx.pop_extend();
        Ok(primary)
    }

    // argument list of an invocation, after the opening '('
    fn parse_invoke_args(&mut self, ctx: &mut ErrorContext) -> InternalResult<Vec<ExprMeta>> {
        let mut args = Vec::new();

        if matches!(self.peek()?.token, Token::CloseParen) {
            ctx.set_end(&self.advance().unwrap());
            return Ok(args);
        }

        loop {
            args.push(self.parse_expr(ctx)?);

            let next = self.advance()?;
            ctx.set_end(&next);
            match next.token {
                Token::CloseParen => break,
                Token::Comma => continue,
                _ => return Err(ErrorKind::ExpectedCloseParen.into()),
            }
        }

        Ok(args)
    }

    // atom ::= LITERAL | IDENTIFIER | "(" expression ")" ;
    fn parse_atom(&mut self, ctx: &mut ErrorContext) -> InternalResult<Atom> {

        if matches!(self.peek()?.token, Token::OpenParen) {
            return self.parse_group_expr(ctx); // Groups
        }

        ctx.push(ContextTag::Atom);

        let next = self.advance()?;
        ctx.set_start(&next);

        let atom = match next.token {
            // Identifiers
            Token::Identifier(name) => Atom::Identifier(self.interner.get_or_intern(name)),

            // Literals
            Token::Nil => Atom::Nil,
            Token::True => Atom::BooleanLiteral(true),
            Token::False => Atom::BooleanLiteral(false),

            Token::IntegerLiteral(value) => Atom::IntegerLiteral(value),
            Token::FloatLiteral(value) => Atom::FloatLiteral(value),
            Token::StringLiteral(value) => Atom::StringLiteral(self.interner.get_or_intern(value)),

            _ => return Err(ErrorKind::ExpectedStartOfExpr.into()),
        };

        ctx.pop_extend();
        Ok(atom)
    }

    fn parse_group_expr(&mut self, ctx: &mut ErrorContext) -> InternalResult<Atom> {
        ctx.push(ContextTag::Group);

        let next = self.advance().unwrap(); // consume the "("
        ctx.set_start(&next);
        debug_assert!(matches!(next.token, Token::OpenParen));

        let expr = self.parse_expr(ctx)?;

        let next = self.advance()?;
        ctx.set_end(&next);
        if !matches!(next.token, Token::CloseParen) {
            return Err(ErrorKind::ExpectedCloseParen.into());
        }

        ctx.pop_extend();
        Ok(Atom::Group(Box::new(expr)))
    }
}
