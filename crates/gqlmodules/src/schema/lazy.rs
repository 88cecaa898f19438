//! Deferred schema assembly.
//!
//! [`LazySchema`] holds a [`SchemaAssembler`] and assembles the schema on
//! first access, so a service can start before its schema is ready and
//! rebuild it after [`LazySchema::invalidate`].

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::assembler::SchemaAssembler;
use super::executable::ExecutableSchema;
use crate::error::DeclarationError;

/// State of the lazy schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// Schema has not been built yet.
    Uninitialized,
    /// Schema is currently being built.
    Building,
    Ready,
    Failed,
}

/// Thread-safe holder of a schema that is assembled on first access.
///
/// # Example
///
/// ```ignore
/// let lazy = LazySchema::new(SchemaAssembler::new().declare(&query));
///
/// // First access assembles the schema
/// let schema = lazy.get_or_build().await?;
///
/// // Force reassembly on next access
/// lazy.invalidate().await;
/// ```
pub struct LazySchema {
    schema: RwLock<Option<ExecutableSchema>>,
    /// Serializes builds.
    build_lock: Mutex<()>,
    state: RwLock<SchemaState>,
    assembler: SchemaAssembler,
    last_error: RwLock<Option<String>>,
}

impl LazySchema {
    #[must_use]
    pub fn new(assembler: SchemaAssembler) -> Self {
        Self {
            schema: RwLock::new(None),
            build_lock: Mutex::new(()),
            state: RwLock::new(SchemaState::Uninitialized),
            assembler,
            last_error: RwLock::new(None),
        }
    }

    pub async fn state(&self) -> SchemaState {
        *self.state.read().await
    }

    /// Gets the schema, assembling it if necessary.
    ///
    /// Concurrent callers wait for an in-progress build. A failed build is
    /// retried on the next call.
    ///
    /// # Errors
    ///
    /// Returns the assembly error if the build fails.
    pub async fn get_or_build(&self) -> Result<ExecutableSchema, DeclarationError> {
        if let Some(schema) = self.get().await {
            return Ok(schema);
        }

        let _guard = self.build_lock.lock().await;

        // Double-check after acquiring lock
        if let Some(schema) = self.get().await {
            return Ok(schema);
        }

        *self.state.write().await = SchemaState::Building;
        info!("Building GraphQL schema...");

        match self.assembler.build() {
            Ok(schema) => {
                *self.schema.write().await = Some(schema.clone());
                *self.state.write().await = SchemaState::Ready;
                *self.last_error.write().await = None;
                info!("GraphQL schema built successfully");
                Ok(schema)
            }
            Err(e) => {
                let error_msg = e.to_string();
                warn!(error = %error_msg, "Failed to build GraphQL schema");
                *self.state.write().await = SchemaState::Failed;
                *self.last_error.write().await = Some(error_msg);
                Err(e)
            }
        }
    }

    /// Gets the schema if it is already built, without triggering a build.
    pub async fn get(&self) -> Option<ExecutableSchema> {
        self.schema.read().await.clone()
    }

    /// Drops the cached schema so the next [`LazySchema::get_or_build`]
    /// assembles it again.
    pub async fn invalidate(&self) {
        let _guard = self.build_lock.lock().await;

        *self.schema.write().await = None;
        *self.state.write().await = SchemaState::Uninitialized;
        *self.last_error.write().await = None;

        info!("GraphQL schema invalidated - will rebuild on next request");
    }

    /// Returns the last build error, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::ObjectType;

    fn query_assembler() -> SchemaAssembler {
        let query = ObjectType::new("QueryType")
            .schema("type Query { hello: String }")
            .build()
            .unwrap();
        SchemaAssembler::new().declare(&query)
    }

    #[tokio::test]
    async fn test_builds_on_first_access() {
        let lazy = LazySchema::new(query_assembler());
        assert_eq!(lazy.state().await, SchemaState::Uninitialized);
        assert!(lazy.get().await.is_none());

        let schema = lazy.get_or_build().await.unwrap();
        assert_eq!(schema.sdl(), "type Query {\n  hello: String\n}\n");
        assert_eq!(lazy.state().await, SchemaState::Ready);
        assert!(lazy.get().await.is_some());
    }

    #[tokio::test]
    async fn test_invalidate_resets_state() {
        let lazy = LazySchema::new(query_assembler());
        lazy.get_or_build().await.unwrap();

        lazy.invalidate().await;
        assert_eq!(lazy.state().await, SchemaState::Uninitialized);
        assert!(lazy.get().await.is_none());

        lazy.get_or_build().await.unwrap();
        assert_eq!(lazy.state().await, SchemaState::Ready);
    }

    #[tokio::test]
    async fn test_records_build_failure() {
        let lazy = LazySchema::new(SchemaAssembler::new());

        let err = lazy.get_or_build().await.unwrap_err();
        assert!(matches!(err, DeclarationError::QueryCount { count: 0 }));
        assert_eq!(lazy.state().await, SchemaState::Failed);
        assert_eq!(
            lazy.last_error().await.as_deref(),
            Some("schema requires exactly one Query type declaration, found 0")
        );
    }
}
