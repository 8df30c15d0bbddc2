//! Configuration for C emission.

/// Configuration for the C emitter.
///
/// Controls the verification primitives called from init routines, the
/// indentation, and the optional renaming of the root entity type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodegenConfig {
    /// Primitive called for unique domain fields.
    pub unique_domain_primitive: String,

    /// Primitive called for plain domain fields.
    pub domain_primitive: String,

    /// Primitive used to copy literal defaults into list fields.
    pub array_copy_primitive: String,

    /// One level of indentation.
    pub indent: String,

    /// If set, the last type in emission order is emitted under this name.
    pub root_alias: Option<String>,

    /// If set, domains with more values than this are rejected.
    pub max_domain_size: Option<usize>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self::cbmc()
    }
}

impl CodegenConfig {
    /// Creates a configuration targeting CBMC's builtins.
    #[must_use]
    pub fn cbmc() -> Self {
        Self {
            unique_domain_primitive: "__CPROVER_unique_domain".to_string(),
            domain_primitive: "__CPROVER_domain".to_string(),
            array_copy_primitive: "__CPROVER_array_copy".to_string(),
            indent: "    ".to_string(),
            root_alias: None,
            max_domain_size: None,
        }
    }

    /// Builder method to rename the root entity type.
    #[must_use]
    pub fn with_root_alias(mut self, alias: impl Into<String>) -> Self {
        self.root_alias = Some(alias.into());
        self
    }

    /// Builder method to cap the number of values in any domain table.
    #[must_use]
    pub fn with_max_domain_size(mut self, limit: usize) -> Self {
        self.max_domain_size = Some(limit);
        self
    }

    /// Builder method to set the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Builder method to set the unique domain primitive.
    #[must_use]
    pub fn with_unique_domain_primitive(mut self, name: impl Into<String>) -> Self {
        self.unique_domain_primitive = name.into();
        self
    }

    /// Builder method to set the domain membership primitive.
    #[must_use]
    pub fn with_domain_primitive(mut self, name: impl Into<String>) -> Self {
        self.domain_primitive = name.into();
        self
    }

    /// Builder method to set the array copy primitive.
    #[must_use]
    pub fn with_array_copy_primitive(mut self, name: impl Into<String>) -> Self {
        self.array_copy_primitive = name.into();
        self
    }
}
