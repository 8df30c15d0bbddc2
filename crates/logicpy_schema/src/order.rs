//! Dependency ordering of entity types.
//!
//! Depth-first topological sort over the entity reference graph. Roots are
//! visited in declaration order and dependencies in field order, so the same
//! schema always yields the same emission order.

use logicpy_foundation::{Error, Result};
use tracing::debug;

use crate::model::{OrderedSchema, Schema};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Computes emission order for a schema.
///
/// The walk keeps its own stack, so arbitrarily long reference chains
/// never exhaust the thread's stack.
pub struct DependencyOrderer<'a> {
    schema: &'a Schema,
    marks: Vec<Mark>,
    /// Types currently being visited, outermost first, each with the
    /// position of the next field to follow.
    stack: Vec<(usize, usize)>,
    order: Vec<usize>,
}

impl<'a> DependencyOrderer<'a> {
    fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            marks: vec![Mark::Unvisited; schema.len()],
            stack: Vec::new(),
            order: Vec::with_capacity(schema.len()),
        }
    }

    /// Returns entity type names so that every type follows the types it
    /// references.
    ///
    /// # Errors
    ///
    /// Returns `CyclicDependency` naming the types on the first cycle found,
    /// with the first type repeated at the end.
    pub fn order_names(schema: &'a Schema) -> Result<Vec<&'a str>> {
        Ok(Self::order_indices(schema)?
            .into_iter()
            .filter_map(|i| schema.get_index(i))
            .map(|e| e.name.as_str())
            .collect())
    }

    fn order_indices(schema: &'a Schema) -> Result<Vec<usize>> {
        let mut orderer = Self::new(schema);
        for index in 0..schema.len() {
            orderer.visit(index)?;
        }
        Ok(orderer.order)
    }

    fn visit(&mut self, root: usize) -> Result<()> {
        if self.marks[root] == Mark::Done {
            return Ok(());
        }
        self.enter(root);

        let schema = self.schema;
        while let Some(&(index, cursor)) = self.stack.last() {
            let entity = schema
                .get_index(index)
                .ok_or_else(|| Error::internal(format!("entity index {index} out of range")))?;
            let next = entity.fields[cursor..]
                .iter()
                .enumerate()
                .find_map(|(offset, field)| {
                    field
                        .referenced_entity()
                        .map(|target| (cursor + offset, field, target))
                });

            let Some((position, field, target)) = next else {
                self.stack.pop();
                self.marks[index] = Mark::Done;
                self.order.push(index);
                continue;
            };
            if let Some(top) = self.stack.last_mut() {
                top.1 = position + 1;
            }

            let target_index = schema.index_of(target).ok_or_else(|| {
                Error::unrecognized_annotation(&entity.name, &field.name, target)
            })?;
            match self.marks[target_index] {
                Mark::Done => {}
                Mark::Visiting => return Err(self.cycle_error(target_index)),
                Mark::Unvisited => self.enter(target_index),
            }
        }
        Ok(())
    }

    fn enter(&mut self, index: usize) {
        self.marks[index] = Mark::Visiting;
        self.stack.push((index, 0));
    }

    fn cycle_error(&self, repeated: usize) -> Error {
        let start = self
            .stack
            .iter()
            .position(|&(i, _)| i == repeated)
            .unwrap_or(0);
        let names = self.stack[start..]
            .iter()
            .map(|&(i, _)| i)
            .chain(std::iter::once(repeated))
            .filter_map(|i| self.schema.get_index(i))
            .map(|e| e.name.clone())
            .collect();
        Error::cyclic_dependency(names)
    }
}

/// Arranges a schema in emission order.
///
/// # Errors
///
/// Returns `CyclicDependency` if the reference graph has a cycle.
pub fn order(schema: Schema) -> Result<OrderedSchema> {
    let indices = DependencyOrderer::order_indices(&schema)?;
    let names: Vec<&str> = indices
        .iter()
        .filter_map(|&i| schema.get_index(i))
        .map(|e| e.name.as_str())
        .collect();
    debug!(order = ?names, "ordered entity types");

    let mut entities: Vec<_> = schema.into_entities().map(Some).collect();
    let mut sorted = Vec::with_capacity(entities.len());
    for index in indices {
        let entity = entities
            .get_mut(index)
            .and_then(Option::take)
            .ok_or_else(|| Error::internal(format!("entity index {index} lost during ordering")))?;
        sorted.push(entity);
    }
    Ok(OrderedSchema::from_sorted(sorted))
}
