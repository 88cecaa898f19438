//! Custom scalar declarations.

use std::sync::Arc;

use async_graphql::Value;
use gqlmodules_sdl::DefinitionKind;
use indexmap::IndexMap;
use tracing::debug;

use super::{Declaration, DeclarationKind, ScalarValidator, TypeDeclaration, parse_schema};
use crate::error::DeclarationError;

/// Builder for a custom scalar declaration.
///
/// Values of the scalar are passed through unchanged; an optional validator
/// decides which input values are accepted.
pub struct ScalarType {
    owner: String,
    schema: Option<serde_json::Value>,
    validator: Option<ScalarValidator>,
}

impl ScalarType {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            schema: None,
            validator: None,
        }
    }

    #[must_use]
    pub fn schema(mut self, schema: impl Into<serde_json::Value>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Rejects input values for which `validator` returns `false`.
    #[must_use]
    pub fn validator(mut self, validator: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Validates the declaration.
    ///
    /// # Errors
    ///
    /// Fails if the schema is missing, not a string, or not a single scalar
    /// definition.
    pub fn build(self) -> Result<Declaration, DeclarationError> {
        let owner = self.owner;
        let (raw_schema, fragment) = parse_schema(&owner, self.schema, DefinitionKind::Scalar)?;

        debug!(owner = %owner, type_name = %fragment.name, "Scalar declared");

        Ok(Arc::new(TypeDeclaration {
            owner,
            kind: DeclarationKind::Scalar,
            raw_schema,
            fragment,
            requirements: Vec::new(),
            bindings: Vec::new(),
            aliases: IndexMap::new(),
            scalar_validator: self.validator,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_scalar_declaration() {
        let date = ScalarType::new("DateScalar")
            .schema("scalar Date")
            .validator(|value| matches!(value, Value::String(_)))
            .build()
            .unwrap();

        assert_eq!(date.kind(), DeclarationKind::Scalar);
        assert_eq!(date.name(), "Date");
        let validator = date.scalar_validator().unwrap();
        assert!(validator(&Value::String("2024-01-01".into())));
        assert!(!validator(&Value::Boolean(true)));
    }

    #[test]
    fn test_rejects_object_schema() {
        let err = ScalarType::new("DateScalar")
            .schema("type Date { day: Int }")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDefinition);
    }
}
