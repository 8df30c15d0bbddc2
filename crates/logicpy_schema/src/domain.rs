//! Domain and uniqueness resolution.
//!
//! Materializes every domain field's ordered value table. Structural
//! problems (empty, inverted, or repeated values) are errors. Callers may
//! also cap the size of a table with [`DomainResolver::resolve_with_limit`].
//! A unique domain whose size differs from the length of a list holding its
//! entity type is only reported as an advisory.

use std::collections::HashSet;
use std::fmt;

use logicpy_foundation::{Error, Literal, Result};
use tracing::{debug, warn};

use crate::model::{Domain, DomainField, ElementType, FieldKind, OrderedSchema};

/// A non-fatal observation about a unique domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainAdvisory {
    /// Entity type declaring the unique field.
    pub entity: String,
    /// The unique field.
    pub field: String,
    /// Number of values in the field's domain.
    pub cardinality: usize,
    /// Entity type holding the list.
    pub container: String,
    /// The list field.
    pub container_field: String,
    /// Declared length of the list.
    pub length: usize,
}

impl fmt::Display for DomainAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unique domain {}.{} has {} values but {}.{} holds {} instances",
            self.entity,
            self.field,
            self.cardinality,
            self.container,
            self.container_field,
            self.length
        )
    }
}

/// Resolves domain tables in place.
pub struct DomainResolver;

impl DomainResolver {
    /// Fills in the resolved values of every domain field.
    ///
    /// Resolving an already resolved schema recomputes the same tables.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDomainLiteral` for the first empty, inverted, or
    /// repetitive domain.
    pub fn resolve(schema: &mut OrderedSchema) -> Result<Vec<DomainAdvisory>> {
        Self::resolve_with_limit(schema, None)
    }

    /// Like [`resolve`](Self::resolve), but rejects any domain with more
    /// than `limit` values before expanding it.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDomainLiteral` for the first empty, inverted,
    /// repetitive, or oversized domain.
    pub fn resolve_with_limit(
        schema: &mut OrderedSchema,
        limit: Option<usize>,
    ) -> Result<Vec<DomainAdvisory>> {
        let mut tables = 0usize;
        for entity in schema.entities_mut() {
            for field in &mut entity.fields {
                let (FieldKind::DomainScalar(domain)
                | FieldKind::UniqueDomainScalar(domain)) = &mut field.kind
                else {
                    continue;
                };
                let values = Self::expand_within(domain, limit)
                    .map_err(|reason| Error::malformed_domain(&entity.name, &field.name, reason))?;
                domain.resolved = Some(values);
                tables += 1;
            }
        }

        let advisories = Self::advisories(schema);
        for advisory in &advisories {
            warn!(
                entity = %advisory.entity,
                field = %advisory.field,
                cardinality = advisory.cardinality,
                length = advisory.length,
                "{advisory}"
            );
        }
        debug!(tables, advisories = advisories.len(), "resolved domains");
        Ok(advisories)
    }

    /// Expands a domain to its ordered values.
    ///
    /// # Errors
    ///
    /// Returns a description of what is wrong with the domain.
    pub fn expand(domain: &DomainField) -> std::result::Result<Vec<Literal>, String> {
        Self::expand_within(domain, None)
    }

    /// Expands a domain, refusing to build more than `limit` values.
    ///
    /// # Errors
    ///
    /// Returns a description of what is wrong with the domain.
    pub fn expand_within(
        domain: &DomainField,
        limit: Option<usize>,
    ) -> std::result::Result<Vec<Literal>, String> {
        let size = match &domain.domain {
            Domain::Range { start, stop } => {
                if stop < start {
                    return Err(format!("range({start}, {stop}) has inverted bounds"));
                }
                stop.abs_diff(*start)
            }
            Domain::Values(values) => values.len() as u64,
        };
        if let Some(limit) = limit {
            if size > limit as u64 {
                return Err(format!("domain has {size} values, more than the limit of {limit}"));
            }
        }

        let values = match &domain.domain {
            Domain::Range { start, stop } => (*start..*stop).map(Literal::Int).collect(),
            Domain::Values(values) => {
                let mut seen = HashSet::with_capacity(values.len());
                if let Some(repeated) = values.iter().find(|v| !seen.insert(*v)) {
                    return Err(format!("value {repeated} appears more than once"));
                }
                values.clone()
            }
        };

        if values.is_empty() {
            return Err("domain has no values".to_string());
        }
        Ok(values)
    }

    /// Compares each unique domain against every list of its entity type.
    #[must_use]
    pub fn advisories(schema: &OrderedSchema) -> Vec<DomainAdvisory> {
        let mut advisories = Vec::new();
        for entity in schema.entities() {
            for field in entity.fields.iter().filter(|f| f.is_unique()) {
                let Some(cardinality) = field.domain().and_then(DomainField::cardinality) else {
                    continue;
                };
                for container in schema.entities() {
                    for list in &container.fields {
                        let FieldKind::FixedList {
                            element: ElementType::Entity(element),
                            length,
                            ..
                        } = &list.kind
                        else {
                            continue;
                        };
                        if element == &entity.name && *length != cardinality {
                            advisories.push(DomainAdvisory {
                                entity: entity.name.clone(),
                                field: field.name.clone(),
                                cardinality,
                                container: container.name.clone(),
                                container_field: list.name.clone(),
                                length: *length,
                            });
                        }
                    }
                }
            }
        }
        advisories
    }
}
