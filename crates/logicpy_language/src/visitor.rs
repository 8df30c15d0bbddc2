//! Statement visitor for traversing parsed modules.
//!
//! Implement the `visit_*` methods of interest on [`StmtVisitor`] and drive
//! it with [`walk_module`]. The default implementations do nothing.
//!
//! # Example
//!
//! ```
//! use logicpy_language::parse;
//! use logicpy_language::ast::ClassDef;
//! use logicpy_language::visitor::{StmtVisitor, walk_module};
//!
//! struct ClassCounter(usize);
//!
//! impl StmtVisitor for ClassCounter {
//!     fn visit_class_def(&mut self, _class: &ClassDef) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let module = parse("class A:\n    x: int\n\nclass B:\n    a: A\n").unwrap();
//! let mut counter = ClassCounter(0);
//! walk_module(&mut counter, &module);
//! assert_eq!(counter.0, 2);
//! ```

use crate::ast::{AnnAssign, ClassDef, Module, OtherStmt, Stmt};

/// Trait for read-only statement visitors.
#[allow(unused_variables)]
pub trait StmtVisitor {
    /// Called when entering a class declaration, before its body.
    fn visit_class_def(&mut self, class: &ClassDef) {}

    /// Called after a class body has been walked.
    fn leave_class_def(&mut self, class: &ClassDef) {}

    /// Visit an annotated assignment.
    fn visit_ann_assign(&mut self, assign: &AnnAssign) {}

    /// Visit a statement the DSL does not interpret.
    fn visit_other(&mut self, stmt: &OtherStmt) {}
}

/// Walks every statement of a module in source order.
pub fn walk_module<V: StmtVisitor + ?Sized>(visitor: &mut V, module: &Module) {
    for stmt in &module.body {
        walk_stmt(visitor, stmt);
    }
}

/// Walks a statement, recursing into class bodies.
pub fn walk_stmt<V: StmtVisitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::ClassDef(class) => {
            visitor.visit_class_def(class);
            for inner in &class.body {
                walk_stmt(visitor, inner);
            }
            visitor.leave_class_def(class);
        }
        Stmt::AnnAssign(assign) => visitor.visit_ann_assign(assign),
        Stmt::Other(other) => visitor.visit_other(other),
    }
}
