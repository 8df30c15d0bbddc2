//! Parser for LogicPy sources.
//!
//! The parser converts a stream of tokens into a [`Module`]. Class
//! declarations and annotated assignments are parsed in full; any other
//! statement is consumed up to the end of its logical line, together with
//! the indented block that follows it, and recorded as [`Stmt::Other`].

use logicpy_foundation::{Error, Result};

use crate::ast::{AnnAssign, ClassDef, Expr, Module, OtherStmt, Stmt};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Python keywords that can never start an annotated assignment.
const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Deepest bracket nesting accepted inside one expression.
pub const MAX_NESTING: usize = 256;

/// Parser for LogicPy source code.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Span of the most recently consumed token.
    previous: Span,
    /// Brackets currently open in the expression being parsed.
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let mut current = lexer.next_token();
        while current.kind.is_trivia() {
            current = lexer.next_token();
        }
        Self {
            lexer,
            current,
            previous: Span::default(),
            depth: 0,
        }
    }

    /// Parses the whole source unit.
    ///
    /// # Errors
    /// Returns an error if the source cannot be parsed.
    pub fn parse_module(&mut self) -> Result<Module> {
        let mut body = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::Eof => break,
                TokenKind::Newline => self.advance(),
                TokenKind::Indent => return Err(self.error("unexpected indent")),
                TokenKind::Dedent => return Err(self.error("unexpected dedent")),
                _ => body.push(self.parse_statement()?),
            }
        }
        Ok(Module { body })
    }

    /// Parses a single expression, which must make up the whole source.
    ///
    /// # Errors
    /// Returns an error if the source is not exactly one expression.
    pub fn parse_expression(&mut self) -> Result<Expr> {
        let expr = self.parse_expr()?;
        while self.current.kind == TokenKind::Newline {
            self.advance();
        }
        if self.current.kind != TokenKind::Eof {
            return Err(self.unexpected("end of input"));
        }
        Ok(expr)
    }

    /// Parses one statement.
    fn parse_statement(&mut self) -> Result<Stmt> {
        let start = self.current.span;
        match &self.current.kind {
            TokenKind::Error(msg) => Err(self.error(msg)),
            TokenKind::Name(name) if name == "class" => self.parse_class_def(),
            TokenKind::Name(name) if KEYWORDS.contains(&name.as_str()) => {
                let keyword = name.clone();
                self.advance();
                self.skip_statement(Some(keyword), start)
            }
            TokenKind::Name(name) => {
                let target = name.clone();
                self.advance();
                if self.current.kind == TokenKind::Colon {
                    self.advance();
                    self.parse_ann_assign(target, start)
                } else {
                    self.skip_statement(None, start)
                }
            }
            _ => self.skip_statement(None, start),
        }
    }

    /// Parses `class Name(bases):` and its body.
    fn parse_class_def(&mut self) -> Result<Stmt> {
        let start = self.current.span;
        self.advance(); // consume 'class'

        let name = match &self.current.kind {
            TokenKind::Name(name) if !KEYWORDS.contains(&name.as_str()) => name.clone(),
            _ => return Err(self.unexpected("class name")),
        };
        self.advance();

        let bases = if self.current.kind == TokenKind::LParen {
            self.advance();
            self.parse_sequence(&TokenKind::RParen, "base class list")?.items
        } else {
            Vec::new()
        };

        self.expect(&TokenKind::Colon)?;
        let body = self.parse_block()?;

        Ok(Stmt::ClassDef(ClassDef {
            name,
            bases,
            body,
            span: start.to(self.previous),
        }))
    }

    /// Parses the body after a `:`, either inline or as an indented block.
    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        if self.current.kind != TokenKind::Newline {
            return Ok(vec![self.parse_statement()?]);
        }
        self.advance();

        if self.current.kind != TokenKind::Indent {
            return Err(self.error("expected an indented block"));
        }
        self.advance();

        let mut body = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::Dedent => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => break,
                TokenKind::Newline => self.advance(),
                TokenKind::Indent => return Err(self.error("unexpected indent")),
                _ => body.push(self.parse_statement()?),
            }
        }
        Ok(body)
    }

    /// Parses the rest of `target: annotation [= value]`.
    fn parse_ann_assign(&mut self, target: String, start: Span) -> Result<Stmt> {
        let annotation = self.parse_expr()?;
        let value = if self.current.kind == TokenKind::Equals {
            self.advance();
            Some(self.parse_expr()?)
        } else {
            None
        };
        let span = start.to(self.previous);
        self.expect_line_end()?;

        Ok(Stmt::AnnAssign(AnnAssign {
            target,
            annotation,
            value,
            span,
        }))
    }

    /// Consumes a statement without interpreting it.
    ///
    /// Takes everything up to the end of the logical line, plus the indented
    /// block that follows if there is one.
    fn skip_statement(&mut self, keyword: Option<String>, start: Span) -> Result<Stmt> {
        let mut end = start;
        loop {
            match &self.current.kind {
                TokenKind::Newline => {
                    self.advance();
                    break;
                }
                TokenKind::Eof | TokenKind::Indent | TokenKind::Dedent => break,
                TokenKind::Error(msg) => return Err(self.error(msg)),
                _ => {
                    end = self.current.span;
                    self.advance();
                }
            }
        }

        if self.current.kind == TokenKind::Indent {
            let mut depth = 0usize;
            loop {
                match &self.current.kind {
                    TokenKind::Indent => depth += 1,
                    TokenKind::Dedent => depth -= 1,
                    TokenKind::Eof => break,
                    TokenKind::Error(msg) => return Err(self.error(msg)),
                    _ => end = self.current.span,
                }
                self.advance();
                if depth == 0 {
                    break;
                }
            }
        }

        Ok(Stmt::Other(OtherStmt {
            keyword,
            span: start.to(end),
        }))
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parses an expression: an atom followed by subscripts, calls, and attributes.
    fn parse_expr(&mut self) -> Result<Expr> {
        let mut expr = self.parse_atom()?;
        loop {
            match &self.current.kind {
                TokenKind::LBracket => {
                    self.advance();
                    let seq = self.parse_sequence(&TokenKind::RBracket, "subscript")?;
                    let span = expr.span().to(seq.end);
                    expr = Expr::Subscript(Box::new(expr), seq.items, span);
                }
                TokenKind::LParen => {
                    self.advance();
                    let seq = self.parse_sequence(&TokenKind::RParen, "call")?;
                    let span = expr.span().to(seq.end);
                    expr = Expr::Call(Box::new(expr), seq.items, span);
                }
                TokenKind::Dot => {
                    self.advance();
                    let TokenKind::Name(attr) = &self.current.kind else {
                        return Err(self.unexpected("attribute name"));
                    };
                    let attr = attr.clone();
                    let span = expr.span().to(self.current.span);
                    self.advance();
                    expr = Expr::Attribute(Box::new(expr), attr, span);
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Parses an atom.
    fn parse_atom(&mut self) -> Result<Expr> {
        let span = self.current.span;
        match &self.current.kind {
            TokenKind::Name(name) => {
                let expr = match name.as_str() {
                    "True" => Expr::Bool(true, span),
                    "False" => Expr::Bool(false, span),
                    "None" => Expr::NoneLiteral(span),
                    _ => Expr::Name(name.clone(), span),
                };
                self.advance();
                Ok(expr)
            }
            TokenKind::Int(n) => {
                let n = *n;
                self.advance();
                Ok(Expr::Int(n, span))
            }
            TokenKind::Minus => {
                self.advance();
                let TokenKind::Int(n) = self.current.kind else {
                    return Err(self.error("unary minus is only supported on integer literals"));
                };
                let Some(negated) = n.checked_neg() else {
                    return Err(self.error("integer literal out of range"));
                };
                let span = span.to(self.current.span);
                self.advance();
                Ok(Expr::Int(negated, span))
            }
            TokenKind::String(_) => self.parse_string(),
            TokenKind::LBracket => {
                self.advance();
                let seq = self.parse_sequence(&TokenKind::RBracket, "list")?;
                Ok(Expr::List(seq.items, span.to(seq.end)))
            }
            TokenKind::LParen => self.parse_parenthesized(),
            TokenKind::Number(text) => {
                Err(self.error(&format!("unsupported numeric literal: {text}")))
            }
            TokenKind::Error(msg) => Err(self.error(msg)),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parses one or more adjacent string literals into one.
    fn parse_string(&mut self) -> Result<Expr> {
        let start = self.current.span;
        let mut text = String::new();
        while let TokenKind::String(part) = &self.current.kind {
            text.push_str(part);
            self.advance();
        }
        Ok(Expr::Str(text, start.to(self.previous)))
    }

    /// Parses `(...)`: a parenthesized expression or a tuple.
    fn parse_parenthesized(&mut self) -> Result<Expr> {
        let start = self.current.span;
        self.advance(); // consume '('
        let mut seq = self.parse_sequence(&TokenKind::RParen, "tuple")?;
        if seq.items.len() == 1 && !seq.trailing_comma {
            return Ok(seq.items.remove(0));
        }
        Ok(Expr::Tuple(seq.items, start.to(seq.end)))
    }

    /// Parses comma-separated expressions up to and including `close`.
    ///
    /// Every nested bracket passes through here, so this is where nesting
    /// depth is bounded.
    fn parse_sequence(&mut self, close: &TokenKind, what: &str) -> Result<Sequence> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(&format!(
                "{what} nested more than {MAX_NESTING} levels deep"
            )));
        }
        self.depth += 1;
        let seq = self.parse_sequence_items(close, what);
        self.depth -= 1;
        seq
    }

    fn parse_sequence_items(&mut self, close: &TokenKind, what: &str) -> Result<Sequence> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            if &self.current.kind == close {
                break;
            }
            if self.current.kind == TokenKind::Eof {
                return Err(self.error(&format!("unterminated {what}")));
            }
            items.push(self.parse_expr()?);
            trailing_comma = false;

            match &self.current.kind {
                TokenKind::Comma => {
                    trailing_comma = true;
                    self.advance();
                }
                kind if kind == close => {}
                TokenKind::Equals => {
                    return Err(self.error(&format!("keyword arguments are not supported in {what}")));
                }
                _ => return Err(self.unexpected(&format!("',' or {} in {what}", close.name()))),
            }
        }
        let end = self.current.span;
        self.advance();
        Ok(Sequence {
            items,
            end,
            trailing_comma,
        })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Advances to the next non-trivia token.
    fn advance(&mut self) {
        self.previous = self.current.span;
        self.current = self.lexer.next_token();
        while self.current.kind.is_trivia() {
            self.current = self.lexer.next_token();
        }
    }

    /// Consumes the expected token or fails.
    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if &self.current.kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(kind.name()))
        }
    }

    /// Consumes the end of a logical line.
    fn expect_line_end(&mut self) -> Result<()> {
        match &self.current.kind {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof | TokenKind::Dedent => Ok(()),
            _ => Err(self.unexpected("end of line")),
        }
    }

    /// Creates an error at the current token.
    fn error(&self, message: &str) -> Error {
        Error::parse(message, self.current.span.line, self.current.span.column)
    }

    /// Creates an "expected X, found Y" error at the current token.
    fn unexpected(&self, expected: &str) -> Error {
        let found = match &self.current.kind {
            TokenKind::Name(name) => format!("'{name}'"),
            TokenKind::Op(op) => format!("'{op}'"),
            TokenKind::Error(msg) => return self.error(msg),
            other => other.name().to_string(),
        };
        self.error(&format!("expected {expected}, found {found}"))
    }
}

/// Comma-separated items parsed by [`Parser::parse_sequence`].
struct Sequence {
    items: Vec<Expr>,
    /// Span of the closing delimiter.
    end: Span,
    trailing_comma: bool,
}

/// Parses a source unit into a [`Module`].
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse(source: &str) -> Result<Module> {
    Parser::new(source).parse_module()
}

/// Parses a single expression, such as an annotation.
///
/// # Errors
/// Returns an error if the source is not exactly one expression.
pub fn parse_expr(source: &str) -> Result<Expr> {
    Parser::new(source).parse_expression()
}
