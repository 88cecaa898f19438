//! Object type declarations.
//!
//! Plain object types, including the `Query` root. Fields without a custom
//! resolver read their value from the parent value (a map returned by the
//! parent resolver), optionally under an aliased key.

use std::sync::Arc;

use gqlmodules_sdl::DefinitionKind;
use indexmap::IndexMap;
use tracing::debug;

use super::mutation::MUTATION_TYPE_NAME;
use super::{
    Declaration, DeclarationKind, Requirement, TypeDeclaration, check_dependencies,
    collect_requirements, parse_schema,
};
use crate::dependencies::resolve_requirements;
use crate::error::DeclarationError;
use crate::resolver::{ArgumentMapping, ResolveFn, ResolverBinding};

/// Builder for an object type declaration.
///
/// # Example
///
/// ```ignore
/// let query = ObjectType::new("QueryType")
///     .schema("type Query { hello(name: String!): String! }")
///     .field_resolver("hello", resolver(|_ctx, args| {
///         FieldFuture::new(async move {
///             let name: String = args.get("name")?;
///             Ok(Some(Value::String(format!("Hello, {name}!"))))
///         })
///     }))
///     .build()?;
/// ```
pub struct ObjectType {
    owner: String,
    schema: Option<serde_json::Value>,
    requirements: Vec<Requirement>,
    resolvers: IndexMap<String, ResolveFn>,
    field_args: IndexMap<String, ArgumentMapping>,
    aliases: IndexMap<String, String>,
}

impl ObjectType {
    /// Starts a declaration owned by `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            schema: None,
            requirements: Vec::new(),
            resolvers: IndexMap::new(),
            field_args: IndexMap::new(),
            aliases: IndexMap::new(),
        }
    }

    /// Sets the SDL fragment. Any value is accepted here; non-strings are
    /// rejected by [`ObjectType::build`].
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

    /// Attaches a custom resolver to a field.
    #[must_use]
    pub fn field_resolver(mut self, field: impl Into<String>, resolver: ResolveFn) -> Self {
        self.resolvers.insert(field.into(), resolver);
        self
    }

    /// Renames a field's arguments before they reach its resolver.
    #[must_use]
    pub fn field_args<K, V>(
        mut self,
        field: impl Into<String>,
        mapping: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.field_args
            .insert(field.into(), mapping.into_iter().collect());
        self
    }

    /// Makes a field without resolver read `key` from the parent value.
    #[must_use]
    pub fn alias(mut self, field: impl Into<String>, key: impl Into<String>) -> Self {
        self.aliases.insert(field.into(), key.into());
        self
    }

    /// Validates the declaration.
    ///
    /// # Errors
    ///
    /// Fails if the schema is missing, not a string, not a single object
    /// type, declares the `Mutation` root, references undeclared types, if
    /// resolvers, aliases or argument mappings target fields or arguments
    /// that do not exist, or if an argument mapping has no resolver to
    /// receive it.
    pub fn build(self) -> Result<Declaration, DeclarationError> {
        let owner = self.owner;
        let (raw_schema, fragment) = parse_schema(&owner, self.schema, DefinitionKind::Object)?;

        if fragment.name == MUTATION_TYPE_NAME {
            return Err(DeclarationError::ReservedTypeName {
                owner,
                type_name: fragment.name,
            });
        }

        let closure = resolve_requirements(&self.requirements);
        check_dependencies(&owner, &fragment, &closure)?;

        for field in self.aliases.keys() {
            if fragment.field(field).is_none() {
                return Err(DeclarationError::UnknownField {
                    owner,
                    attribute: "an alias",
                    field: field.clone(),
                });
            }
        }

        for (field_name, mapping) in &self.field_args {
            let Some(field) = fragment.field(field_name) else {
                return Err(DeclarationError::UnknownField {
                    owner,
                    attribute: "an argument mapping",
                    field: field_name.clone(),
                });
            };
            if let Some(argument) = mapping.external_names().find(|a| field.argument(a).is_none()) {
                return Err(DeclarationError::UnknownArgumentMapping {
                    field: field_name.clone(),
                    argument: argument.to_string(),
                    owner,
                });
            }
        }

        let mut bindings = Vec::with_capacity(self.resolvers.len());
        let mut field_args = self.field_args;
        for (field_name, resolver) in self.resolvers {
            let Some(field) = fragment.field(&field_name) else {
                return Err(DeclarationError::UnknownField {
                    owner,
                    attribute: "a resolver",
                    field: field_name,
                });
            };
            bindings.push(ResolverBinding {
                type_name: fragment.name.clone(),
                arguments: field.arguments.iter().map(|a| a.name.clone()).collect(),
                mapping: field_args.shift_remove(&field_name).unwrap_or_default(),
                field_name,
                resolver,
            });
        }

        if let Some(field) = field_args.keys().next() {
            return Err(DeclarationError::ArgumentMappingWithoutResolver {
                owner,
                field: field.clone(),
            });
        }

        let kind = if fragment.name == "Query" {
            DeclarationKind::Query
        } else {
            DeclarationKind::Object
        };

        debug!(
            owner = %owner,
            type_name = %fragment.name,
            fields = fragment.fields().len(),
            resolvers = bindings.len(),
            "Object type declared"
        );

        Ok(Arc::new(TypeDeclaration {
            owner,
            kind,
            raw_schema,
            fragment,
            requirements: self.requirements,
            bindings,
            aliases: self.aliases,
            scalar_validator: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::dynamic::FieldFuture;

    use super::*;
    use crate::error::ErrorKind;
    use crate::resolver::resolver;

    fn noop() -> ResolveFn {
        resolver(|_, _| FieldFuture::from_value(None))
    }

    #[test]
    fn test_query_declaration_kind() {
        let query = ObjectType::new("QueryType")
            .schema("type Query { field: String! }")
            .build()
            .unwrap();

        assert_eq!(query.kind(), DeclarationKind::Query);
        assert_eq!(query.name(), "Query");
        assert_eq!(query.raw_schema(), "type Query { field: String! }");
        assert!(query.bindings().is_empty());
    }

    #[test]
    fn test_object_declaration_collects_bindings() {
        let user = ObjectType::new("UserType")
            .schema("type User { id: ID! displayName(upper: Boolean): String! }")
            .field_resolver("displayName", noop())
            .field_args("displayName", [("upper", "uppercase")])
            .alias("id", "user_id")
            .build()
            .unwrap();

        assert_eq!(user.kind(), DeclarationKind::Object);
        assert_eq!(user.alias("id"), Some("user_id"));
        assert_eq!(user.bindings().len(), 1);

        let binding = &user.bindings()[0];
        assert_eq!(binding.type_name, "User");
        assert_eq!(binding.field_name, "displayName");
        assert_eq!(binding.arguments, ["upper"]);
        assert_eq!(binding.mapping.internal_name("upper"), "uppercase");
    }

    #[test]
    fn test_rejects_non_object_schema() {
        let err = ObjectType::new("DateType")
            .schema("scalar Date")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDefinition);
    }

    #[test]
    fn test_rejects_missing_dependency() {
        let err = ObjectType::new("UserType")
            .schema("type User { group: Group }")
            .build()
            .unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"UserType is missing dependency for return type Group (used by User.group)"
        );
    }

    #[test]
    fn test_rejects_resolver_for_unknown_field() {
        let err = ObjectType::new("QueryType")
            .schema("type Query { field: String! }")
            .field_resolver("other", noop())
            .build()
            .unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"QueryType defines a resolver for unknown field other");
    }

    #[test]
    fn test_rejects_alias_for_unknown_field() {
        let err = ObjectType::new("UserType")
            .schema("type User { id: ID! }")
            .alias("name", "full_name")
            .build()
            .unwrap_err();
        assert!(matches!(err, DeclarationError::UnknownField { .. }));
    }

    #[test]
    fn test_rejects_unknown_field_argument_mapping() {
        let err = ObjectType::new("QueryType")
            .schema("type Query { user(id: ID!): String }")
            .field_args("user", [("userId", "user_id")])
            .build()
            .unwrap_err();
        assert!(matches!(err, DeclarationError::UnknownArgumentMapping { .. }));
    }

    #[test]
    fn test_rejects_argument_mapping_without_resolver() {
        let err = ObjectType::new("QueryType")
            .schema("type Query { user(id: ID!): String }")
            .field_args("user", [("id", "user_id")])
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDefinition);
        insta::assert_snapshot!(
            err.to_string(),
            @"QueryType maps arguments of field user which has no resolver"
        );
    }

    #[test]
    fn test_rejects_mutation_root() {
        let err = ObjectType::new("MutationObject")
            .schema("type Mutation { first: Boolean second: Boolean }")
            .field_resolver("first", noop())
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDefinition);
        insta::assert_snapshot!(
            err.to_string(),
            @"MutationObject cannot declare Mutation as an object type, use a mutation declaration"
        );
    }
}
