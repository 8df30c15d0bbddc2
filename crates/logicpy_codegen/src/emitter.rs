//! C declaration emitter.
//!
//! Renders an ordered, resolved schema as C source for a bounded model
//! checker: per entity type, a struct, its domain tables, and an init
//! routine.
//!
//! # Example
//!
//! ```
//! use logicpy_codegen::{CEmitter, CodegenConfig};
//! use logicpy_language::parse;
//! use logicpy_schema::{DomainResolver, SchemaAnalyzer, order};
//!
//! let module = parse("class Item:\n    id: Unique[Domain[int, range(1, 3)]]\n").unwrap();
//! let mut schema = order(SchemaAnalyzer::analyze(&module).unwrap()).unwrap();
//! DomainResolver::resolve(&mut schema).unwrap();
//!
//! let config = CodegenConfig::default();
//! let c = CEmitter::new(&config).emit(&schema).unwrap();
//! assert!(c.starts_with("struct Item {\n    int id;\n};\n"));
//! assert!(c.contains("static int Item_id[] = {1, 2};\n"));
//! ```

use std::fmt::Write;

use logicpy_foundation::{Error, Literal, Primitive, Result};
use logicpy_schema::{DomainField, ElementType, EntityType, Field, FieldKind, OrderedSchema};

use crate::config::CodegenConfig;

/// Emitter state.
pub struct CEmitter<'a> {
    config: &'a CodegenConfig,
    output: String,
    /// Declared name of the type emitted under `config.root_alias`.
    root: Option<String>,
}

impl<'a> CEmitter<'a> {
    /// Creates an emitter with the given configuration.
    #[must_use]
    pub fn new(config: &'a CodegenConfig) -> Self {
        Self {
            config,
            output: String::new(),
            root: None,
        }
    }

    /// Renders every entity type in emission order.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the schema breaks an invariant the
    /// earlier passes guarantee, such as an unresolved domain.
    pub fn emit(mut self, schema: &OrderedSchema) -> Result<String> {
        if self.config.root_alias.is_some() {
            self.root = schema.entities().last().map(|e| e.name.clone());
        }
        for entity in schema.entities() {
            self.emit_entity(entity)?;
        }
        Ok(self.output)
    }

    fn emit_entity(&mut self, entity: &EntityType) -> Result<()> {
        let name = self.type_name(&entity.name).to_string();
        self.emit_struct(&name, entity)?;
        self.emit_tables(&name, entity)?;
        self.emit_init(&name, entity)
    }

    fn emit_struct(&mut self, name: &str, entity: &EntityType) -> Result<()> {
        let _ = writeln!(self.output, "struct {name} {{");
        for field in &entity.fields {
            let ty = self.c_type(&field.element_type());
            let _ = write!(self.output, "{}{ty} {}", self.config.indent, field.name);
            if let FieldKind::FixedList { length, defaults, .. } = &field.kind {
                if defaults.as_ref().is_some_and(|d| d.len() != *length) {
                    return Err(Error::internal(format!(
                        "{}.{}: default count differs from list length {length}",
                        entity.name, field.name
                    )));
                }
                let _ = write!(self.output, "[{length}]");
            }
            self.output.push_str(";\n");
        }
        self.output.push_str("};\n\n");
        Ok(())
    }

    fn emit_tables(&mut self, name: &str, entity: &EntityType) -> Result<()> {
        for field in &entity.fields {
            let Some(domain) = field.domain() else {
                continue;
            };
            let values = resolved(entity, field, domain)?;
            let ty = self.c_type(&ElementType::Primitive(domain.primitive));
            let _ = write!(self.output, "static {ty} {name}_{}[] = ", field.name);
            self.emit_literals(values);
            self.output.push_str(";\n");
            let _ = writeln!(
                self.output,
                "static bool {name}_{}_used[{}];",
                field.name,
                values.len()
            );
        }
        if entity.has_domains() {
            self.output.push('\n');
        }
        Ok(())
    }

    fn emit_init(&mut self, name: &str, entity: &EntityType) -> Result<()> {
        let indent = self.config.indent.clone();
        let _ = writeln!(
            self.output,
            "static void init_{name}(struct {name} * instance) {{"
        );
        for field in &entity.fields {
            let member = &field.name;
            match &field.kind {
                FieldKind::ScalarPrimitive(_) => {}
                FieldKind::UniqueDomainScalar(domain) | FieldKind::DomainScalar(domain) => {
                    resolved(entity, field, domain)?;
                    let primitive = if field.is_unique() {
                        &self.config.unique_domain_primitive
                    } else {
                        &self.config.domain_primitive
                    };
                    let _ = writeln!(
                        self.output,
                        "{indent}{primitive}(instance->{member}, {name}_{member});"
                    );
                }
                FieldKind::ScalarWithDefault(_, value) => {
                    let _ = write!(self.output, "{indent}instance->{member} = ");
                    self.emit_literal(value);
                    self.output.push_str(";\n");
                }
                FieldKind::EntityReference(target) => {
                    let target = self.type_name(target).to_string();
                    let _ = writeln!(
                        self.output,
                        "{indent}init_{target}(&instance->{member});"
                    );
                }
                FieldKind::FixedList {
                    element,
                    defaults: Some(values),
                    ..
                } => {
                    let ty = self.c_type(element);
                    let _ = write!(
                        self.output,
                        "{indent}{}(instance->{member}, ({ty}[])",
                        self.config.array_copy_primitive
                    );
                    self.emit_literals(values);
                    self.output.push_str(");\n");
                }
                FieldKind::FixedList {
                    element: ElementType::Entity(target),
                    defaults: None,
                    ..
                } => {
                    let target = self.type_name(target).to_string();
                    let _ = writeln!(
                        self.output,
                        "{indent}for (size_t i = 0; i < sizeof(instance->{member}) / sizeof(instance->{member}[0]); ++i) {{"
                    );
                    let _ = writeln!(
                        self.output,
                        "{indent}{indent}init_{target}(&instance->{member}[i]);"
                    );
                    let _ = writeln!(self.output, "{indent}}}");
                }
                // Primitive lists without defaults are left nondeterministic.
                FieldKind::FixedList {
                    element: ElementType::Primitive(_),
                    defaults: None,
                    ..
                } => {}
            }
        }
        self.output.push_str("}\n\n");
        Ok(())
    }

    fn emit_literals(&mut self, values: &[Literal]) {
        self.output.push('{');
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.emit_literal(value);
        }
        self.output.push('}');
    }

    fn emit_literal(&mut self, value: &Literal) {
        match value {
            Literal::Int(n) => {
                let _ = write!(self.output, "{n}");
            }
            Literal::Bool(true) => self.output.push_str("true"),
            Literal::Bool(false) => self.output.push_str("false"),
            Literal::Str(s) => self.emit_string(s),
        }
    }

    fn emit_string(&mut self, s: &str) {
        self.output.push('"');
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                // Octal escapes stop after three digits, unlike hex ones.
                c if c.is_ascii_control() => {
                    let _ = write!(self.output, "\\{:03o}", c as u32);
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    fn c_type(&self, element: &ElementType) -> String {
        match element {
            ElementType::Primitive(primitive) => c_primitive(*primitive).to_string(),
            ElementType::Entity(name) => format!("struct {}", self.type_name(name)),
        }
    }

    fn type_name<'n>(&'n self, name: &'n str) -> &'n str {
        match (&self.root, &self.config.root_alias) {
            (Some(root), Some(alias)) if root == name => alias,
            _ => name,
        }
    }
}

/// The C spelling of a primitive.
#[must_use]
pub const fn c_primitive(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Int => "int",
        Primitive::Str => "const char *",
        Primitive::Bool => "bool",
    }
}

fn resolved<'d>(entity: &EntityType, field: &Field, domain: &'d DomainField) -> Result<&'d [Literal]> {
    match domain.resolved.as_deref() {
        Some(values) if !values.is_empty() => Ok(values),
        _ => Err(Error::internal(format!(
            "domain of {}.{} reached the emitter unresolved",
            entity.name, field.name
        ))),
    }
}
