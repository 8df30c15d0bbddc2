//! Error types for the LogicPy compiler.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Every user-facing failure is detected before emission begins. The only
//! kind that can surface from the emitter is [`ErrorKind::Internal`], which
//! marks a broken invariant in the compiler rather than malformed input.

use std::fmt;

use thiserror::Error;

/// The main error type for LogicPy operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a parse error at the given position.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(ErrorKind::Parse {
            message: message.into(),
            line,
            column,
        })
    }

    /// Creates an unrecognized field annotation error.
    #[must_use]
    pub fn unrecognized_annotation(
        entity: impl Into<String>,
        field: impl Into<String>,
        annotation: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::UnrecognizedFieldAnnotation {
            entity: entity.into(),
            field: field.into(),
            annotation: annotation.into(),
        })
    }

    /// Creates a cyclic dependency error naming the types on the cycle.
    #[must_use]
    pub fn cyclic_dependency(cycle: Vec<String>) -> Self {
        Self::new(ErrorKind::CyclicDependency { cycle })
    }

    /// Creates a malformed domain literal error.
    #[must_use]
    pub fn malformed_domain(
        entity: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::MalformedDomainLiteral {
            entity: entity.into(),
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Creates a duplicate entity type error.
    #[must_use]
    pub fn duplicate_entity(entity: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateDeclaration {
            entity: entity.into(),
            field: None,
            symbol: None,
        })
    }

    /// Creates a duplicate field error.
    #[must_use]
    pub fn duplicate_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateDeclaration {
            entity: entity.into(),
            field: Some(field.into()),
            symbol: None,
        })
    }

    /// Creates an error for a generated C identifier that is already taken.
    #[must_use]
    pub fn duplicate_symbol(
        symbol: impl Into<String>,
        entity: impl Into<String>,
        field: Option<&str>,
    ) -> Self {
        Self::new(ErrorKind::DuplicateDeclaration {
            entity: entity.into(),
            field: field.map(str::to_string),
            symbol: Some(symbol.into()),
        })
    }

    /// Creates an invalid default value error.
    #[must_use]
    pub fn invalid_default(
        entity: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidDefault {
            entity: entity.into(),
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this error is a compiler defect rather than bad input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self.kind, ErrorKind::Internal(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The source could not be parsed.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
    },

    /// A field annotation matches none of the recognized DSL shapes.
    #[error("unrecognized annotation on {entity}.{field}: {annotation}")]
    UnrecognizedFieldAnnotation {
        /// The entity type declaring the field.
        entity: String,
        /// The field name.
        field: String,
        /// The annotation as written.
        annotation: String,
    },

    /// The entity reference graph contains a cycle.
    #[error("cyclic dependency between entity types: {}", .cycle.join(" -> "))]
    CyclicDependency {
        /// The types on the cycle, first type repeated at the end.
        cycle: Vec<String>,
    },

    /// A domain is empty, mistyped, or has bad range bounds.
    #[error("malformed domain on {entity}.{field}: {reason}")]
    MalformedDomainLiteral {
        /// The entity type declaring the field.
        entity: String,
        /// The field name.
        field: String,
        /// What is wrong with the domain.
        reason: String,
    },

    /// An entity type or a field within one is declared twice.
    #[error(
        "duplicate declaration: {}",
        duplicate_name(.entity, .field.as_deref(), .symbol.as_deref())
    )]
    DuplicateDeclaration {
        /// The entity type name.
        entity: String,
        /// The field name, if the duplicate is a field.
        field: Option<String>,
        /// The generated C identifier, if two declarations emit the same one.
        symbol: Option<String>,
    },

    /// A default value does not fit its field.
    #[error("invalid default on {entity}.{field}: {reason}")]
    InvalidDefault {
        /// The entity type declaring the field.
        entity: String,
        /// The field name.
        field: String,
        /// What is wrong with the default.
        reason: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

fn duplicate_name(entity: &str, field: Option<&str>, symbol: Option<&str>) -> String {
    let name = match field {
        Some(field) => format!("field {entity}.{field}"),
        None => format!("entity type {entity}"),
    };
    match symbol {
        Some(symbol) => format!("C symbol {symbol} emitted again for {name}"),
        None => name,
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file or unit name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<u32>,
    /// Column number in source.
    pub column: Option<u32>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "{source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        Ok(())
    }
}

/// Result alias used across the LogicPy crates.
pub type Result<T> = std::result::Result<T, Error>;
