//! C emission and the compile pipeline for LogicPy.
//!
//! This crate provides:
//! - [`CEmitter`] - Renders an ordered, resolved schema as C declarations
//! - [`CodegenConfig`] - Emitter configuration with builder methods
//! - [`Compiler`] - The full pipeline from source text to C text
//!
//! # Example
//!
//! ```
//! let c = logicpy_codegen::compile(
//!     "class Item:\n    id: Unique[Domain[int, range(1, 4)]]\n\nclass Box:\n    items: list[Item, 3]\n",
//! )
//! .unwrap();
//! assert!(c.contains("static int Item_id[] = {1, 2, 3};"));
//! assert!(c.contains("init_Item(&instance->items[i]);"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compiler;
pub mod config;
pub mod emitter;

pub use compiler::{Compiler, TranslationUnit, compile};
pub use config::CodegenConfig;
pub use emitter::{CEmitter, c_primitive};
