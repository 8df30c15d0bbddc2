//! Declaration analyzer.
//!
//! Walks a parsed module and extracts entity types and their fields into a
//! [`Schema`]. Every field annotation is first classified into an
//! [`AnnotationShape`]; an annotation with no matching shape is an error.

use indexmap::IndexSet;
use logicpy_foundation::{Error, ErrorContext, Literal, Primitive, Result};
use logicpy_language::ast::{AnnAssign, ClassDef, Expr, Module};
use logicpy_language::visitor::{StmtVisitor, walk_module};
use tracing::{debug, trace};

use crate::model::{Domain, DomainField, ElementType, EntityType, Field, FieldKind, Schema};

// =============================================================================
// Annotation Shapes
// =============================================================================

/// The recognized shapes of a field annotation.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationShape<'a> {
    /// `Unique[Domain[T, ...]]`
    UniqueDomain {
        /// Value type.
        primitive: Primitive,
        /// Domain items after the type.
        values: &'a [Expr],
    },
    /// `Domain[T, ...]`
    Domain {
        /// Value type.
        primitive: Primitive,
        /// Domain items after the type.
        values: &'a [Expr],
    },
    /// A declared entity type name.
    EntityReference(&'a str),
    /// `list[T, N]`
    FixedList {
        /// Element type.
        element: ElementType,
        /// Declared length, positive.
        length: usize,
    },
    /// `int`, `str`, or `bool`
    Primitive(Primitive),
}

impl<'a> AnnotationShape<'a> {
    /// Classifies an annotation, checking patterns in priority order.
    ///
    /// `entities` holds every entity type name in the source unit.
    #[must_use]
    pub fn classify(annotation: &'a Expr, entities: &IndexSet<String>) -> Option<Self> {
        if let Some((head, items)) = annotation.as_generic() {
            return match (head, items) {
                ("Unique", [inner]) => match Self::classify_domain(inner)? {
                    Self::Domain { primitive, values } => {
                        Some(Self::UniqueDomain { primitive, values })
                    }
                    _ => None,
                },
                ("Domain", _) => Self::classify_domain(annotation),
                ("list", [element, length]) => {
                    let element = Self::element_type(element, entities)?;
                    let length = usize::try_from(length.as_int()?).ok()?;
                    (length > 0).then_some(Self::FixedList { element, length })
                }
                _ => None,
            };
        }

        let name = annotation.as_name()?;
        if entities.contains(name) {
            return Some(Self::EntityReference(name));
        }
        Primitive::from_name(name).map(Self::Primitive)
    }

    fn classify_domain(expr: &'a Expr) -> Option<Self> {
        match expr.as_generic()? {
            ("Domain", [ty, values @ ..]) => Some(Self::Domain {
                primitive: Primitive::from_name(ty.as_name()?)?,
                values,
            }),
            _ => None,
        }
    }

    fn element_type(expr: &Expr, entities: &IndexSet<String>) -> Option<ElementType> {
        let name = expr.as_name()?;
        if entities.contains(name) {
            Some(ElementType::Entity(name.to_string()))
        } else {
            Primitive::from_name(name).map(ElementType::Primitive)
        }
    }
}

// =============================================================================
// Analyzer
// =============================================================================

/// Collects top-level class names in source order.
#[derive(Default)]
struct ClassNames {
    depth: usize,
    names: Vec<String>,
}

impl StmtVisitor for ClassNames {
    fn visit_class_def(&mut self, class: &ClassDef) {
        if self.depth == 0 {
            self.names.push(class.name.clone());
        }
        self.depth += 1;
    }

    fn leave_class_def(&mut self, _class: &ClassDef) {
        self.depth -= 1;
    }
}

/// Extracts a [`Schema`] from a parsed module.
pub struct SchemaAnalyzer;

impl SchemaAnalyzer {
    /// Analyzes every top-level class in the module.
    ///
    /// Statements other than classes and annotated fields are ignored, as
    /// are classes nested inside a class body.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateDeclaration`, `UnrecognizedFieldAnnotation`,
    /// `MalformedDomainLiteral`, or `InvalidDefault` for the first offending
    /// declaration.
    pub fn analyze(module: &Module) -> Result<Schema> {
        let entities = Self::collect_entity_names(module)?;

        let mut schema = Schema::new();
        for class in module.classes() {
            schema.insert(Self::analyze_class(class, &entities)?)?;
        }

        debug!(
            entities = schema.len(),
            fields = schema.iter().map(|e| e.fields.len()).sum::<usize>(),
            "analyzed schema"
        );
        Ok(schema)
    }

    /// First pass: the names of all top-level classes, so that fields may
    /// reference types declared later.
    ///
    /// A class may not take the name of a primitive type.
    fn collect_entity_names(module: &Module) -> Result<IndexSet<String>> {
        let mut collector = ClassNames::default();
        walk_module(&mut collector, module);

        let mut entities = IndexSet::with_capacity(collector.names.len());
        for name in collector.names {
            if entities.contains(&name) || Primitive::from_name(&name).is_some() {
                return Err(Error::duplicate_entity(name));
            }
            entities.insert(name);
        }
        Ok(entities)
    }

    /// Analyzes one class declaration.
    ///
    /// # Errors
    ///
    /// Returns the first field error, or `DuplicateDeclaration` for a
    /// repeated field name.
    pub fn analyze_class(class: &ClassDef, entities: &IndexSet<String>) -> Result<EntityType> {
        let mut entity = EntityType::new(&class.name);
        entity.bases = class.bases.iter().map(ToString::to_string).collect();

        for assign in class.body.iter().filter_map(|stmt| stmt.as_ann_assign()) {
            let field = Self::analyze_field(&class.name, assign, entities).map_err(|e| {
                e.with_context(
                    ErrorContext::new().with_position(assign.span.line, assign.span.column),
                )
            })?;
            trace!(
                entity = %class.name,
                field = %field.name,
                kind = field.kind.name(),
                "classified field"
            );
            entity.add_field(field)?;
        }
        Ok(entity)
    }

    /// Analyzes one annotated field.
    ///
    /// # Errors
    ///
    /// Returns an error if the annotation is not recognized, a domain is
    /// malformed, or the default does not fit the field.
    pub fn analyze_field(
        entity: &str,
        assign: &AnnAssign,
        entities: &IndexSet<String>,
    ) -> Result<Field> {
        let name = assign.target.as_str();
        let shape = AnnotationShape::classify(&assign.annotation, entities).ok_or_else(|| {
            Error::unrecognized_annotation(entity, name, assign.annotation.to_string())
        })?;

        let kind = match shape {
            AnnotationShape::UniqueDomain { primitive, values } => FieldKind::UniqueDomainScalar(
                DomainField::new(primitive, Self::domain(entity, name, primitive, values)?),
            ),
            AnnotationShape::Domain { primitive, values } => FieldKind::DomainScalar(
                DomainField::new(primitive, Self::domain(entity, name, primitive, values)?),
            ),
            AnnotationShape::EntityReference(target) => {
                FieldKind::EntityReference(target.to_string())
            }
            AnnotationShape::FixedList { element, length } => {
                let defaults = match (&assign.value, &element) {
                    (None, _) => None,
                    (Some(value), ElementType::Primitive(primitive)) => Some(
                        Self::list_defaults(entity, name, *primitive, length, value)?,
                    ),
                    (Some(_), ElementType::Entity(_)) => {
                        return Err(Error::invalid_default(
                            entity,
                            name,
                            "lists of entity types cannot have defaults",
                        ));
                    }
                };
                FieldKind::FixedList {
                    element,
                    length,
                    defaults,
                }
            }
            AnnotationShape::Primitive(primitive) => match &assign.value {
                None => FieldKind::ScalarPrimitive(primitive),
                Some(value) => FieldKind::ScalarWithDefault(
                    primitive,
                    Self::literal_of(entity, name, primitive, value)?,
                ),
            },
        };

        if assign.value.is_some()
            && matches!(
                kind,
                FieldKind::DomainScalar(_)
                    | FieldKind::UniqueDomainScalar(_)
                    | FieldKind::EntityReference(_)
            )
        {
            return Err(Error::invalid_default(
                entity,
                name,
                format!("{} fields cannot have defaults", kind.name()),
            ));
        }

        Ok(Field::new(name, kind))
    }

    /// Builds a domain from the items after the type in `Domain[T, ...]`.
    fn domain(entity: &str, field: &str, primitive: Primitive, values: &[Expr]) -> Result<Domain> {
        let range = match values {
            [single] => single
                .as_call()
                .filter(|(func, _)| *func == "range")
                .map(|(_, args)| (single, args)),
            _ => None,
        };
        if let Some((single, args)) = range {
            if primitive != Primitive::Int {
                return Err(Error::malformed_domain(
                    entity,
                    field,
                    format!("range domains must be int, not {primitive}"),
                ));
            }
            let bounds: Option<Vec<i64>> = args.iter().map(Expr::as_int).collect();
            return match bounds.as_deref() {
                Some(&[stop]) => Ok(Domain::Range { start: 0, stop }),
                Some(&[start, stop]) => Ok(Domain::Range { start, stop }),
                _ => Err(Error::malformed_domain(
                    entity,
                    field,
                    format!("range bounds must be one or two integer literals: {single}"),
                )),
            };
        }

        let mut literals = Vec::with_capacity(values.len());
        for value in values {
            if value.as_call().is_some_and(|(func, _)| func == "range") {
                return Err(Error::malformed_domain(
                    entity,
                    field,
                    "range must be the only domain value",
                ));
            }
            match value.as_literal() {
                Some(literal) if literal.primitive() == primitive => literals.push(literal),
                _ => {
                    return Err(Error::malformed_domain(
                        entity,
                        field,
                        format!("expected {primitive} literal, found {value}"),
                    ));
                }
            }
        }
        Ok(Domain::Values(literals))
    }

    fn literal_of(entity: &str, field: &str, primitive: Primitive, value: &Expr) -> Result<Literal> {
        match value.as_literal() {
            Some(literal) if literal.primitive() == primitive => Ok(literal),
            _ => Err(Error::invalid_default(
                entity,
                field,
                format!("expected {primitive} literal, found {value}"),
            )),
        }
    }

    fn list_defaults(
        entity: &str,
        field: &str,
        primitive: Primitive,
        length: usize,
        value: &Expr,
    ) -> Result<Vec<Literal>> {
        let Expr::List(items, _) = value else {
            return Err(Error::invalid_default(
                entity,
                field,
                format!("expected list literal, found {value}"),
            ));
        };
        if items.len() != length {
            return Err(Error::invalid_default(
                entity,
                field,
                format!("expected {length} values, found {}", items.len()),
            ));
        }
        items
            .iter()
            .map(|item| Self::literal_of(entity, field, primitive, item))
            .collect()
    }
}
