//! Core error, primitive, and literal types for LogicPy.
//!
//! This crate provides:
//! - [`Error`] / [`ErrorKind`] - Typed compilation failures with context
//! - [`Primitive`] - The primitive field types (`int`, `str`, `bool`)
//! - [`Literal`] - Literal values used in domains and defaults

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod types;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use types::Primitive;
pub use value::Literal;
