//! Enum type declarations.

use std::sync::Arc;

use gqlmodules_sdl::DefinitionKind;
use indexmap::IndexMap;
use tracing::debug;

use super::{Declaration, DeclarationKind, TypeDeclaration, parse_schema};
use crate::error::DeclarationError;

/// Builder for an enum declaration.
///
/// Resolvers return enum values as `Value::Enum`.
pub struct EnumType {
    owner: String,
    schema: Option<serde_json::Value>,
}

impl EnumType {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            schema: None,
        }
    }

    #[must_use]
    pub fn schema(mut self, schema: impl Into<serde_json::Value>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Validates the declaration.
    ///
    /// # Errors
    ///
    /// Fails if the schema is missing, not a string, or not a single enum
    /// definition.
    pub fn build(self) -> Result<Declaration, DeclarationError> {
        let owner = self.owner;
        let (raw_schema, fragment) = parse_schema(&owner, self.schema, DefinitionKind::Enum)?;

        debug!(owner = %owner, type_name = %fragment.name, "Enum declared");

        Ok(Arc::new(TypeDeclaration {
            owner,
            kind: DeclarationKind::Enum,
            raw_schema,
            fragment,
            requirements: Vec::new(),
            bindings: Vec::new(),
            aliases: IndexMap::new(),
            scalar_validator: None,
        }))
    }
}
