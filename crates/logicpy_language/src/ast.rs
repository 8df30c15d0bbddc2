//! Syntax tree for LogicPy sources.
//!
//! Only the statement forms the schema DSL cares about are represented in
//! detail: class declarations and annotated assignments. Every other
//! statement is kept as an opaque [`OtherStmt`] with its span.

use std::fmt;

use logicpy_foundation::Literal;

use crate::span::Span;

/// A parsed source unit.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Module {
    /// Top-level statements in source order.
    pub body: Vec<Stmt>,
}

impl Module {
    /// Returns the top-level class declarations in source order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDef> {
        self.body.iter().filter_map(Stmt::as_class_def)
    }
}

/// A statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// `class Name(bases):` with an indented body
    ClassDef(ClassDef),
    /// `target: annotation` or `target: annotation = value`
    AnnAssign(AnnAssign),
    /// Any statement the schema DSL does not interpret
    Other(OtherStmt),
}

impl Stmt {
    /// Returns the source span of this statement.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::ClassDef(class) => class.span,
            Self::AnnAssign(assign) => assign.span,
            Self::Other(other) => other.span,
        }
    }

    /// Returns the class declaration, or None if not a class.
    #[must_use]
    pub const fn as_class_def(&self) -> Option<&ClassDef> {
        match self {
            Self::ClassDef(class) => Some(class),
            _ => None,
        }
    }

    /// Returns the annotated assignment, or None if not one.
    #[must_use]
    pub const fn as_ann_assign(&self) -> Option<&AnnAssign> {
        match self {
            Self::AnnAssign(assign) => Some(assign),
            _ => None,
        }
    }
}

/// A class declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDef {
    /// The class name.
    pub name: String,
    /// Base class expressions, as written.
    pub bases: Vec<Expr>,
    /// Statements in the class body.
    pub body: Vec<Stmt>,
    /// Source span of the whole declaration.
    pub span: Span,
}

/// An annotated assignment like `number: int = 3`.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnAssign {
    /// The assigned name.
    pub target: String,
    /// The annotation expression.
    pub annotation: Expr,
    /// The assigned value, if any.
    pub value: Option<Expr>,
    /// Source span of the whole statement.
    pub span: Span,
}

/// A statement that is skipped, not interpreted.
#[derive(Clone, Debug, PartialEq)]
pub struct OtherStmt {
    /// The leading keyword, like `def` or `import`, if the statement has one.
    pub keyword: Option<String>,
    /// Source span, including any indented block.
    pub span: Span,
}

/// An expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Identifier like `int` or `House`
    Name(String, Span),
    /// Integer literal like `3` or `-1`
    Int(i64, Span),
    /// String literal like `"Alice"`
    Str(String, Span),
    /// `True` or `False`
    Bool(bool, Span),
    /// `None`
    NoneLiteral(Span),
    /// List display like `[1, 2]`
    List(Vec<Expr>, Span),
    /// Tuple like `(1, 2)`
    Tuple(Vec<Expr>, Span),
    /// Subscript like `list[House, 3]`; the slice holds the comma-separated items
    Subscript(Box<Expr>, Vec<Expr>, Span),
    /// Call like `range(1, 4)`
    Call(Box<Expr>, Vec<Expr>, Span),
    /// Attribute access like `typing.List`
    Attribute(Box<Expr>, String, Span),
}

impl Expr {
    /// Returns the source span of this expression.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Name(_, s)
            | Self::Int(_, s)
            | Self::Str(_, s)
            | Self::Bool(_, s)
            | Self::NoneLiteral(s)
            | Self::List(_, s)
            | Self::Tuple(_, s)
            | Self::Subscript(_, _, s)
            | Self::Call(_, _, s)
            | Self::Attribute(_, _, s) => *s,
        }
    }

    /// Returns the identifier, or None if not a name.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name, _) => Some(name),
            _ => None,
        }
    }

    /// Returns the integer value, or None if not an integer literal.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n, _) => Some(*n),
            _ => None,
        }
    }

    /// Returns the literal value of an `int`, `str`, or `bool` literal.
    #[must_use]
    pub fn as_literal(&self) -> Option<Literal> {
        match self {
            Self::Int(n, _) => Some(Literal::Int(*n)),
            Self::Str(s, _) => Some(Literal::Str(s.clone())),
            Self::Bool(b, _) => Some(Literal::Bool(*b)),
            _ => None,
        }
    }

    /// If this is `Head[items]` with a plain name head, returns the head and items.
    #[must_use]
    pub fn as_generic(&self) -> Option<(&str, &[Expr])> {
        match self {
            Self::Subscript(value, items, _) => Some((value.as_name()?, items)),
            _ => None,
        }
    }

    /// If this is `name(args)` with a plain name callee, returns it and the args.
    #[must_use]
    pub fn as_call(&self) -> Option<(&str, &[Expr])> {
        match self {
            Self::Call(func, args, _) => Some((func.as_name()?, args)),
            _ => None,
        }
    }

    /// A human-readable type name for this expression.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Name(_, _) => "name",
            Self::Int(_, _) => "int",
            Self::Str(_, _) => "string",
            Self::Bool(_, _) => "bool",
            Self::NoneLiteral(_) => "None",
            Self::List(_, _) => "list",
            Self::Tuple(_, _) => "tuple",
            Self::Subscript(_, _, _) => "subscript",
            Self::Call(_, _, _) => "call",
            Self::Attribute(_, _, _) => "attribute",
        }
    }
}

/// Renders the expression back to source form.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name, _) => f.write_str(name),
            Self::Int(n, _) => write!(f, "{n}"),
            Self::Str(s, _) => write_python_string(f, s),
            Self::Bool(true, _) => f.write_str("True"),
            Self::Bool(false, _) => f.write_str("False"),
            Self::NoneLiteral(_) => f.write_str("None"),
            Self::List(items, _) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Self::Tuple(items, _) => {
                f.write_str("(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::Subscript(value, items, _) => {
                write!(f, "{value}[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Self::Call(func, args, _) => {
                write!(f, "{func}(")?;
                write_items(f, args)?;
                f.write_str(")")
            }
            Self::Attribute(value, attr, _) => write!(f, "{value}.{attr}"),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_python_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}
