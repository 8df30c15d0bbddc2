//! Schema layer for LogicPy.
//!
//! This crate turns a parsed module into an ordered, resolved schema:
//! - [`SchemaAnalyzer`] - Extracts entity types and classifies field annotations
//! - [`order`] - Dependency ordering with cycle detection
//! - [`DomainResolver`] - Materializes domain tables and reports advisories
//!
//! # Example
//!
//! ```
//! use logicpy_language::parse;
//! use logicpy_schema::{DomainResolver, SchemaAnalyzer, order};
//!
//! let module = parse(
//!     "class Puzzle:\n    items: list[Item, 3]\n\nclass Item:\n    id: Unique[Domain[int, range(1, 4)]]\n",
//! )
//! .unwrap();
//! let schema = SchemaAnalyzer::analyze(&module).unwrap();
//! let mut ordered = order(schema).unwrap();
//! let advisories = DomainResolver::resolve(&mut ordered).unwrap();
//!
//! assert_eq!(ordered.names().collect::<Vec<_>>(), vec!["Item", "Puzzle"]);
//! assert!(advisories.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod analyzer;
pub mod domain;
pub mod model;
pub mod order;

pub use analyzer::{AnnotationShape, SchemaAnalyzer};
pub use domain::{DomainAdvisory, DomainResolver};
pub use model::{
    Domain, DomainField, ElementType, EntityType, Field, FieldKind, OrderedSchema, Schema,
};
pub use order::{DependencyOrderer, order};
