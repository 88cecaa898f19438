use std::fmt;
use std::sync::Arc;

use async_graphql::dynamic::Schema;
use async_graphql::{Request, Response};

use super::graph::SchemaGraph;
use crate::resolver::ResolverBinding;

/// An assembled schema ready to execute operations.
///
/// Cloning is cheap; clones share the same schema.
#[derive(Clone)]
pub struct ExecutableSchema {
    schema: Schema,
    graph: Arc<SchemaGraph>,
}

impl ExecutableSchema {
    pub(crate) fn new(schema: Schema, graph: SchemaGraph) -> Self {
        Self {
            schema,
            graph: Arc::new(graph),
        }
    }

    /// Returns the merged SDL of all declared types.
    pub fn sdl(&self) -> &str {
        self.graph.document()
    }

    /// Returns the underlying async-graphql schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    pub fn bindings(&self) -> impl Iterator<Item = &ResolverBinding> {
        self.graph.bindings()
    }

    /// Returns `true` if a resolver is bound to `type_name.field_name`.
    pub fn has_binding(&self, type_name: &str, field_name: &str) -> bool {
        self.graph.binding(type_name, field_name).is_some()
    }

    /// Executes a GraphQL request.
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        self.schema.execute(request).await
    }
}

impl fmt::Debug for ExecutableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutableSchema")
            .field("types", &self.graph.types().map(|t| t.name()).collect::<Vec<_>>())
            .field("bindings", &self.graph.bindings().count())
            .finish()
    }
}
