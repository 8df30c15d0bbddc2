//! The compile pipeline.
//!
//! parse → analyze → order → resolve → emit. Every input error is reported
//! before emission starts, so a failed compile never yields partial output.

use indexmap::IndexSet;
use logicpy_foundation::{Error, Result};
use logicpy_language::{Module, parse};
use logicpy_schema::{DomainAdvisory, DomainResolver, OrderedSchema, SchemaAnalyzer, order};
use tracing::debug;

use crate::config::CodegenConfig;
use crate::emitter::CEmitter;

/// Compiles LogicPy sources to C.
///
/// Holds only configuration, so one compiler can serve many threads.
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    config: CodegenConfig,
}

impl Compiler {
    /// Creates a compiler with the given configuration.
    #[must_use]
    pub fn new(config: CodegenConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Compiles one source unit.
    ///
    /// # Errors
    ///
    /// Returns the first parse, analysis, ordering, or resolution error.
    pub fn compile(&self, source: &str) -> Result<String> {
        let module = parse(source)?;
        self.compile_module(&module)
    }

    /// Compiles an already parsed module.
    ///
    /// # Errors
    ///
    /// Returns the first analysis, ordering, or resolution error, or an
    /// internal error if emission fails.
    pub fn compile_module(&self, module: &Module) -> Result<String> {
        let (schema, _) = self.prepare(module)?;
        let output = CEmitter::new(&self.config).emit(&schema)?;
        debug!(
            entities = schema.len(),
            bytes = output.len(),
            "emitted C declarations"
        );
        Ok(output)
    }

    /// Runs every pass except emission.
    ///
    /// # Errors
    ///
    /// Returns the first parse, analysis, ordering, or resolution error.
    pub fn check(&self, source: &str) -> Result<Vec<DomainAdvisory>> {
        let module = parse(source)?;
        let (_, advisories) = self.prepare(&module)?;
        Ok(advisories)
    }

    /// Analyzes, orders, and resolves a module.
    ///
    /// # Errors
    ///
    /// Returns the first analysis, ordering, or resolution error, or
    /// `DuplicateDeclaration` if the root alias names another entity type
    /// or two declarations would emit the same C identifier.
    pub fn prepare(&self, module: &Module) -> Result<(OrderedSchema, Vec<DomainAdvisory>)> {
        let schema = SchemaAnalyzer::analyze(module)?;
        let mut ordered = order(schema)?;
        let advisories =
            DomainResolver::resolve_with_limit(&mut ordered, self.config.max_domain_size)?;

        if let Some(alias) = &self.config.root_alias {
            let root = ordered.names().last();
            if root != Some(alias.as_str()) && ordered.get(alias).is_some() {
                return Err(Error::duplicate_entity(alias));
            }
        }
        self.claim_symbols(&ordered, &mut IndexSet::new(), &mut IndexSet::new())?;
        Ok((ordered, advisories))
    }

    /// Starts an empty translation unit that sources can be added to.
    #[must_use]
    pub fn unit(&self) -> TranslationUnit<'_> {
        TranslationUnit {
            compiler: self,
            types: IndexSet::new(),
            symbols: IndexSet::new(),
            output: String::new(),
        }
    }

    /// Records every type and identifier the schema will emit, failing on
    /// the first one already taken.
    ///
    /// Struct tags and ordinary identifiers are separate C namespaces.
    fn claim_symbols(
        &self,
        schema: &OrderedSchema,
        types: &mut IndexSet<String>,
        symbols: &mut IndexSet<String>,
    ) -> Result<()> {
        let root = schema.names().last();
        let mut claim = |symbol: String, entity: &str, field: Option<&str>| {
            if symbols.insert(symbol.clone()) {
                Ok(())
            } else {
                Err(Error::duplicate_symbol(symbol, entity, field))
            }
        };

        for entity in schema.entities() {
            let name = match &self.config.root_alias {
                Some(alias) if root == Some(entity.name.as_str()) => alias.as_str(),
                _ => entity.name.as_str(),
            };
            if !types.insert(name.to_string()) {
                return Err(Error::duplicate_entity(name));
            }
            claim(format!("init_{name}"), &entity.name, None)?;
            for field in entity.fields.iter().filter(|f| f.domain().is_some()) {
                let table = format!("{name}_{}", field.name);
                claim(table.clone(), &entity.name, Some(field.name.as_str()))?;
                claim(format!("{table}_used"), &entity.name, Some(field.name.as_str()))?;
            }
        }
        Ok(())
    }
}

/// Several sources compiled into one C translation unit.
///
/// Entity types and generated identifiers must be unique across every
/// source added. A source that fails leaves the unit unchanged.
#[derive(Debug)]
pub struct TranslationUnit<'c> {
    compiler: &'c Compiler,
    types: IndexSet<String>,
    symbols: IndexSet<String>,
    output: String,
}

impl TranslationUnit<'_> {
    /// Compiles a source and appends its declarations.
    ///
    /// # Errors
    ///
    /// Returns any error `Compiler::compile` would, or
    /// `DuplicateDeclaration` if the source declares a type or identifier
    /// an earlier source already emitted.
    pub fn add(&mut self, source: &str) -> Result<Vec<DomainAdvisory>> {
        let module = parse(source)?;
        let (schema, advisories) = self.compiler.prepare(&module)?;

        let mut types = self.types.clone();
        let mut symbols = self.symbols.clone();
        self.compiler.claim_symbols(&schema, &mut types, &mut symbols)?;
        let output = CEmitter::new(&self.compiler.config).emit(&schema)?;

        debug!(
            entities = schema.len(),
            total = types.len(),
            bytes = output.len(),
            "added source to translation unit"
        );
        self.types = types;
        self.symbols = symbols;
        self.output.push_str(&output);
        Ok(advisories)
    }

    /// The declarations emitted so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the unit and returns its declarations.
    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }
}

/// Compiles one source unit with the default configuration.
///
/// # Errors
///
/// Returns the first parse, analysis, ordering, or resolution error.
pub fn compile(source: &str) -> Result<String> {
    Compiler::default().compile(source)
}
