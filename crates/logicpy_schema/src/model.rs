//! Schema model types.
//!
//! The model is independent of source syntax: the analyzer builds it from a
//! parsed module, the orderer arranges it, the resolver fills in domain
//! values, and the emitter renders it.

use indexmap::IndexMap;
use logicpy_foundation::{Error, Literal, Primitive, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Schema
// =============================================================================

/// All entity types declared in one source unit, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schema {
    entities: IndexMap<String, EntityType>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity type.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateDeclaration` if a type with the same name exists.
    pub fn insert(&mut self, entity: EntityType) -> Result<()> {
        if self.entities.contains_key(&entity.name) {
            return Err(Error::duplicate_entity(entity.name));
        }
        self.entities.insert(entity.name.clone(), entity);
        Ok(())
    }

    /// Looks up an entity type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntityType> {
        self.entities.get(name)
    }

    /// Looks up an entity type by declaration index.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&EntityType> {
        self.entities.get_index(index).map(|(_, entity)| entity)
    }

    /// Returns the declaration index of an entity type.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entities.get_index_of(name)
    }

    /// Returns true if an entity type with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Number of entity types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no entity types were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates entity types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityType> {
        self.entities.values()
    }

    /// Consumes the schema, yielding entity types in declaration order.
    pub fn into_entities(self) -> impl Iterator<Item = EntityType> {
        self.entities.into_values()
    }
}

/// A schema arranged in emission order: every entity type comes after the
/// types it references.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderedSchema {
    entities: Vec<EntityType>,
}

impl OrderedSchema {
    pub(crate) const fn from_sorted(entities: Vec<EntityType>) -> Self {
        Self { entities }
    }

    /// Entity types in emission order.
    #[must_use]
    pub fn entities(&self) -> &[EntityType] {
        &self.entities
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [EntityType] {
        &mut self.entities
    }

    /// Looks up an entity type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntityType> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Names in emission order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(|e| e.name.as_str())
    }

    /// Number of entity types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if there are no entity types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns true if every domain field carries resolved values.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.entities
            .iter()
            .flat_map(|e| &e.fields)
            .filter_map(Field::domain)
            .all(|d| d.resolved.is_some())
    }
}

// =============================================================================
// Entity Types and Fields
// =============================================================================

/// One declared class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityType {
    /// Type name, used verbatim in generated declarations.
    pub name: String,
    /// Fields in declaration order (the struct layout order).
    pub fields: Vec<Field>,
    /// Base classes as written; they carry no semantics.
    pub bases: Vec<String>,
}

impl EntityType {
    /// Creates an entity type with no fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            bases: Vec::new(),
        }
    }

    /// Appends a field.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateDeclaration` if a field with the same name exists.
    pub fn add_field(&mut self, field: Field) -> Result<()> {
        if self.field(&field.name).is_some() {
            return Err(Error::duplicate_field(&self.name, field.name));
        }
        self.fields.push(field);
        Ok(())
    }

    /// Builder form of [`EntityType::add_field`].
    ///
    /// # Errors
    ///
    /// Returns `DuplicateDeclaration` if a field with the same name exists.
    pub fn with_field(mut self, field: Field) -> Result<Self> {
        self.add_field(field)?;
        Ok(self)
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the entity types this one references, in field order.
    ///
    /// A type referenced by several fields appears once per field.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(Field::referenced_entity)
    }

    /// Returns true if any field has a domain table.
    #[must_use]
    pub fn has_domains(&self) -> bool {
        self.fields.iter().any(|f| f.domain().is_some())
    }
}

/// One annotated attribute of an entity type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    /// Field name, unique within its entity type.
    pub name: String,
    /// What the field holds and how it is initialized.
    pub kind: FieldKind,
}

impl Field {
    /// Creates a field.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// The entity type this field references, directly or as list element.
    #[must_use]
    pub fn referenced_entity(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::EntityReference(name)
            | FieldKind::FixedList {
                element: ElementType::Entity(name),
                ..
            } => Some(name),
            _ => None,
        }
    }

    /// The domain of a domain field.
    #[must_use]
    pub const fn domain(&self) -> Option<&DomainField> {
        match &self.kind {
            FieldKind::DomainScalar(domain) | FieldKind::UniqueDomainScalar(domain) => {
                Some(domain)
            }
            _ => None,
        }
    }

    /// Returns true if the field requests unique values across siblings.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        matches!(self.kind, FieldKind::UniqueDomainScalar(_))
    }

    /// The stored element type (the element type for lists).
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match &self.kind {
            FieldKind::ScalarPrimitive(p) | FieldKind::ScalarWithDefault(p, _) => {
                ElementType::Primitive(*p)
            }
            FieldKind::DomainScalar(d) | FieldKind::UniqueDomainScalar(d) => {
                ElementType::Primitive(d.primitive)
            }
            FieldKind::EntityReference(name) => ElementType::Entity(name.clone()),
            FieldKind::FixedList { element, .. } => element.clone(),
        }
    }

    /// The declared length of a fixed list.
    #[must_use]
    pub const fn length(&self) -> Option<usize> {
        match &self.kind {
            FieldKind::FixedList { length, .. } => Some(*length),
            _ => None,
        }
    }
}

/// The closed set of field kinds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldKind {
    /// `x: int`
    ScalarPrimitive(Primitive),
    /// `x: int = 10`
    ScalarWithDefault(Primitive, Literal),
    /// `x: Domain[int, 1, 2]`
    DomainScalar(DomainField),
    /// `x: Unique[Domain[int, range(1, 4)]]`
    UniqueDomainScalar(DomainField),
    /// `x: House`
    EntityReference(String),
    /// `x: list[House, 3]`, optionally with literal defaults for primitives
    FixedList {
        /// Element type.
        element: ElementType,
        /// Exact arity, always positive.
        length: usize,
        /// Literal defaults, exactly `length` of them when present.
        defaults: Option<Vec<Literal>>,
    },
}

impl FieldKind {
    /// A short name for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ScalarPrimitive(_) => "scalar",
            Self::ScalarWithDefault(_, _) => "scalar with default",
            Self::DomainScalar(_) => "domain",
            Self::UniqueDomainScalar(_) => "unique domain",
            Self::EntityReference(_) => "entity reference",
            Self::FixedList { .. } => "fixed list",
        }
    }
}

/// Element type of a field or list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElementType {
    /// A primitive value.
    Primitive(Primitive),
    /// A nested entity, by name.
    Entity(String),
}

// =============================================================================
// Domains
// =============================================================================

/// A domain field's declared values and, after resolution, its table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DomainField {
    /// Primitive type of the values.
    pub primitive: Primitive,
    /// The domain as declared.
    pub domain: Domain,
    /// Ordered values, filled in by the resolver.
    pub resolved: Option<Vec<Literal>>,
}

impl DomainField {
    /// Creates an unresolved domain field.
    #[must_use]
    pub const fn new(primitive: Primitive, domain: Domain) -> Self {
        Self {
            primitive,
            domain,
            resolved: None,
        }
    }

    /// Number of values, once resolved.
    #[must_use]
    pub fn cardinality(&self) -> Option<usize> {
        self.resolved.as_ref().map(Vec::len)
    }
}

/// A domain as written in source.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Domain {
    /// Explicit literals, in declared order.
    Values(Vec<Literal>),
    /// `range(start, stop)`: start inclusive, stop exclusive.
    Range {
        /// First value.
        start: i64,
        /// One past the last value.
        stop: i64,
    },
}
