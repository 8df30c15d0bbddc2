//! LogicPy - Compiles puzzle schemas to C harness declarations
//!
//! This crate re-exports all layers of the LogicPy compiler for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: logicpy_codegen     - C emitter, configuration, compile pipeline
//! Layer 1: logicpy_schema      - Schema model, analyzer, ordering, domains
//! Layer 0: logicpy_language    - Lexer, parser, syntax tree, visitor
//!          logicpy_foundation  - Core types (Primitive, Literal, Error)
//! ```

pub use logicpy_codegen as codegen;
pub use logicpy_foundation as foundation;
pub use logicpy_language as language;
pub use logicpy_schema as schema;

pub use logicpy_codegen::{CodegenConfig, Compiler, compile};
pub use logicpy_foundation::{Error, ErrorKind, Result};
