//! Schema assembly.

use tracing::info;

use super::builder::build_schema;
use super::executable::ExecutableSchema;
use super::graph::SchemaGraph;
use crate::config::SchemaConfig;
use crate::declaration::Declaration;
use crate::error::DeclarationError;

/// Collects declarations and assembles them into an [`ExecutableSchema`].
///
/// # Example
///
/// ```ignore
/// let schema = SchemaAssembler::with_config(config)
///     .declare(&query)
///     .declare(&sum)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaAssembler {
    config: SchemaConfig,
    declarations: Vec<Declaration>,
}

impl SchemaAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SchemaConfig) -> Self {
        Self {
            config,
            declarations: Vec::new(),
        }
    }

    #[must_use]
    pub fn declare(mut self, declaration: &Declaration) -> Self {
        self.declarations.push(Declaration::clone(declaration));
        self
    }

    #[must_use]
    pub fn declare_all<'a>(mut self, declarations: impl IntoIterator<Item = &'a Declaration>) -> Self {
        self.declarations.extend(declarations.into_iter().cloned());
        self
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Assembles the declared types and their requirements.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError`] if the configuration is invalid, the
    /// declarations do not form a consistent schema, or async-graphql
    /// rejects the result.
    pub fn build(&self) -> Result<ExecutableSchema, DeclarationError> {
        self.config.validate()?;

        let graph = SchemaGraph::from_declarations(&self.declarations)?;
        let schema = build_schema(&graph, &self.config)?;

        info!(
            types = graph.types().count(),
            bindings = graph.bindings().count(),
            "GraphQL schema assembled"
        );

        Ok(ExecutableSchema::new(schema, graph))
    }
}

/// Assembles an executable schema from declarations with the default
/// configuration.
///
/// Requirements of the given declarations are collected transitively, so
/// only root declarations need to be passed.
///
/// # Errors
///
/// See [`SchemaAssembler::build`].
pub fn make_executable_schema<'a>(
    declarations: impl IntoIterator<Item = &'a Declaration>,
) -> Result<ExecutableSchema, DeclarationError> {
    SchemaAssembler::new().declare_all(declarations).build()
}
