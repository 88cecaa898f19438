//! Mutation declarations.
//!
//! Each mutation declaration contributes exactly one field to the `Mutation`
//! root type, together with the resolver that serves it. The assembler fuses
//! all mutation declarations of a schema into a single `Mutation` type.

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
use crate::resolver::{ArgumentMapping, ResolverAttr, ResolverBinding};

/// The root type name every mutation declaration must use.
pub const MUTATION_TYPE_NAME: &str = "Mutation";

/// Builder for a single-field mutation declaration.
///
/// # Example
///
/// ```ignore
/// let split = MutationType::new("SplitMutation")
///     .schema("type Mutation { split(strToSplit: String!): [String!]! }")
///     .arg("strToSplit", "split_str")
///     .resolve(resolver(|_ctx, args| {
///         FieldFuture::new(async move {
///             let text: String = args.get("split_str")?;
///             Ok(Some(Value::List(
///                 text.split_whitespace().map(|s| Value::String(s.into())).collect(),
///             )))
///         })
///     }))
///     .build()?;
/// ```
pub struct MutationType {
    owner: String,
    schema: Option<serde_json::Value>,
    requirements: Vec<Requirement>,
    args: IndexMap<String, String>,
    resolver: Option<ResolverAttr>,
}

impl MutationType {
    /// Starts a declaration owned by `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            schema: None,
            requirements: Vec::new(),
            args: IndexMap::new(),
            resolver: None,
        }
    }

    /// Sets the SDL fragment. Any value is accepted here; non-strings are
    /// rejected by [`MutationType::build`].
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

    /// Passes the GraphQL argument `external` to the resolver as `internal`.
    #[must_use]
    pub fn arg(mut self, external: impl Into<String>, internal: impl Into<String>) -> Self {
        self.args.insert(external.into(), internal.into());
        self
    }

    /// Sets the resolver attribute.
    #[must_use]
    pub fn resolve(mut self, resolver: impl Into<ResolverAttr>) -> Self {
        self.resolver = Some(resolver.into());
        self
    }

    /// Validates the declaration.
    ///
    /// Checks run in a fixed order and the first failure is returned: schema
    /// presence and type, fragment shape, root type name, field count,
    /// resolver presence, resolver callability, type dependencies, and
    /// finally the argument mapping.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`DeclarationError`].
    pub fn build(self) -> Result<Declaration, DeclarationError> {
        let owner = self.owner;
        let (raw_schema, fragment) = parse_schema(&owner, self.schema, DefinitionKind::Object)?;

        if fragment.name != MUTATION_TYPE_NAME {
            return Err(DeclarationError::WrongTypeName {
                owner,
                expected: MUTATION_TYPE_NAME,
                found: fragment.name,
            });
        }

        let [field] = fragment.fields() else {
            return Err(DeclarationError::FieldCount {
                count: fragment.fields().len(),
                owner,
            });
        };

        let resolver = match self.resolver {
            None => return Err(DeclarationError::MissingResolver { owner }),
            Some(ResolverAttr::Callable(resolver)) => resolver,
            Some(other) => {
                return Err(DeclarationError::ResolverNotCallable {
                    found: other.value_kind(),
                    owner,
                });
            }
        };

        let closure = resolve_requirements(&self.requirements);
        check_dependencies(&owner, &fragment, &closure)?;

        if let Some(argument) = self.args.keys().find(|name| field.argument(name).is_none()) {
            return Err(DeclarationError::UnknownArgumentMapping {
                field: field.name.clone(),
                argument: argument.clone(),
                owner,
            });
        }

        let binding = ResolverBinding {
            type_name: MUTATION_TYPE_NAME.to_string(),
            field_name: field.name.clone(),
            arguments: field.arguments.iter().map(|a| a.name.clone()).collect(),
            mapping: self.args.into_iter().collect::<ArgumentMapping>(),
            resolver,
        };

        debug!(
            owner = %owner,
            field = %binding.field_name,
            requirements = self.requirements.len(),
            "Mutation declared"
        );

        Ok(Arc::new(TypeDeclaration {
            owner,
            kind: DeclarationKind::Mutation,
            raw_schema,
            fragment,
            requirements: self.requirements,
            bindings: vec![binding],
            aliases: IndexMap::new(),
            scalar_validator: None,
        }))
    }
}
