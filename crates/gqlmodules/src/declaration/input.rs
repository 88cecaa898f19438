//! Input object declarations.

use std::sync::Arc;

use gqlmodules_sdl::DefinitionKind;
use indexmap::IndexMap;
use tracing::debug;

use super::{
    Declaration, DeclarationKind, Requirement, TypeDeclaration, check_dependencies,
    collect_requirements, parse_schema,
};
use crate::dependencies::resolve_requirements;
use crate::error::DeclarationError;

/// Builder for an input object declaration.
///
/// Input values reach resolvers as `Value::Object` maps keyed by field name.
pub struct InputType {
    owner: String,
    schema: Option<serde_json::Value>,
    requirements: Vec<Requirement>,
}

impl InputType {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            schema: None,
            requirements: Vec::new(),
        }
    }

    #[must_use]
    pub fn schema(mut self, schema: impl Into<serde_json::Value>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn requires<R: Into<Requirement>>(mut self, requirements: impl IntoIterator<Item = R>) -> Self {
        self.requirements.extend(collect_requirements(requirements));
        self
    }

    /// Validates the declaration.
    ///
    /// # Errors
    ///
    /// Fails if the schema is missing, not a string, not a single input
    /// definition, or if a field type is neither a built-in scalar nor
    /// required.
    pub fn build(self) -> Result<Declaration, DeclarationError> {
        let owner = self.owner;
        let (raw_schema, fragment) =
            parse_schema(&owner, self.schema, DefinitionKind::InputObject)?;

        let closure = resolve_requirements(&self.requirements);
        check_dependencies(&owner, &fragment, &closure)?;

        debug!(owner = %owner, type_name = %fragment.name, "Input type declared");

        Ok(Arc::new(TypeDeclaration {
            owner,
            kind: DeclarationKind::Input,
            raw_schema,
            fragment,
            requirements: self.requirements,
            bindings: Vec::new(),
            aliases: IndexMap::new(),
            scalar_validator: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::EnumType;
    use crate::error::{ErrorKind, TypeUsage};

    #[test]
    fn test_input_with_enum_field() {
        let role = EnumType::new("RoleEnum")
            .schema("enum Role { ADMIN USER }")
            .build()
            .unwrap();

        let input = InputType::new("UserInputType")
            .schema("input UserInput { name: String! role: Role = USER }")
            .requires([&role])
            .build()
            .unwrap();

        assert_eq!(input.kind(), DeclarationKind::Input);
        assert_eq!(input.requirements().len(), 1);
    }

    #[test]
    fn test_rejects_undeclared_field_type() {
        let err = InputType::new("UserInputType")
            .schema("input UserInput { role: Role }")
            .build()
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidDefinition);
        assert!(matches!(
            err,
            DeclarationError::MissingDependency {
                usage: TypeUsage::InputFieldType,
                ..
            }
        ));
    }
}
