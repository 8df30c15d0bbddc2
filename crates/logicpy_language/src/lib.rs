//! Lexer, parser, and syntax tree for LogicPy schema sources.
//!
//! LogicPy schemas are written in a Python-shaped syntax. This crate
//! provides:
//! - [`Lexer`] - Tokenization with Python indentation rules
//! - [`Parser`] - Parsing tokens into a [`Module`] of statements
//! - [`visitor`] - A statement visitor for analysis passes
//!
//! Only class declarations and annotated assignments are parsed in detail;
//! everything else (validation functions, imports, ...) is kept as an opaque
//! statement so it can sit in the same source unit.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;
pub mod visitor;


pub use ast::{AnnAssign, ClassDef, Expr, Module, OtherStmt, Stmt};
pub use lexer::Lexer;
pub use parser::{MAX_NESTING, Parser, parse, parse_expr};
pub use span::Span;
pub use token::{Token, TokenKind};
