//! Validated GraphQL type declarations.
//!
//! Each declaration pairs one SDL fragment with the resolvers and
//! requirements needed to serve it. Declarations are produced by builders
//! ([`ObjectType`], [`MutationType`], [`ScalarType`], [`EnumType`],
//! [`InputType`]) which validate everything up front: a declaration that
//! exists is valid, and it never changes afterwards.
//!
//! ## Requirements
//!
//! A declaration that references another declared type must list it as a
//! [`Requirement`]. Requirements are shared, immutable declarations or
//! deferred type names; a deferred name is resolved when the schema is
//! assembled, which is how two types can refer to each other.

mod enums;
mod input;
mod mutation;
mod object;
mod scalar;

pub use enums::EnumType;
pub use input::InputType;
pub use mutation::MutationType;
pub use object::ObjectType;
pub use scalar::ScalarType;

use std::fmt;
use std::sync::Arc;

use async_graphql::Value;
use gqlmodules_sdl::{DefinitionKind, Fragment, FragmentBody, is_builtin_scalar, parse_fragment};
use indexmap::IndexMap;

use crate::dependencies::DependencyClosure;
use crate::error::{DeclarationError, TypeUsage};
use crate::resolver::{ResolverBinding, json_kind};

/// A shared, validated declaration.
pub type Declaration = Arc<TypeDeclaration>;

/// Validator deciding whether an input value is acceptable for a custom scalar.
pub type ScalarValidator = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// The role a declaration plays in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Object,
    /// The `Query` root type.
    Query,
    /// A single-field contribution to the `Mutation` root type.
    Mutation,
    Scalar,
    Enum,
    Input,
}

/// A type that a declaration depends on.
#[derive(Debug, Clone)]
pub enum Requirement {
    Declared(Declaration),
    /// A type name that must be declared somewhere in the assembled schema.
    Deferred(String),
}

impl From<Declaration> for Requirement {
    fn from(declaration: Declaration) -> Self {
        Self::Declared(declaration)
    }
}

impl From<&Declaration> for Requirement {
    fn from(declaration: &Declaration) -> Self {
        Self::Declared(Arc::clone(declaration))
    }
}

/// Creates a requirement on a type declared elsewhere in the schema.
pub fn deferred(type_name: impl Into<String>) -> Requirement {
    Requirement::Deferred(type_name.into())
}

/// A validated, immutable description of one GraphQL type.
pub struct TypeDeclaration {
    owner: String,
    kind: DeclarationKind,
    raw_schema: String,
    fragment: Fragment,
    requirements: Vec<Requirement>,
    bindings: Vec<ResolverBinding>,
    aliases: IndexMap<String, String>,
    scalar_validator: Option<ScalarValidator>,
}

impl TypeDeclaration {
    /// Returns the name of the declaring item, used in error messages.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// Returns the GraphQL name of the declared type.
    pub fn name(&self) -> &str {
        &self.fragment.name
    }

    /// Returns the SDL fragment exactly as supplied.
    pub fn raw_schema(&self) -> &str {
        &self.raw_schema
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    pub fn fields(&self) -> &[gqlmodules_sdl::FieldDefinition] {
        self.fragment.fields()
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Returns the resolver bindings this declaration contributes.
    pub fn bindings(&self) -> &[ResolverBinding] {
        &self.bindings
    }

    /// Returns the parent value key a field reads from when it has no resolver.
    pub fn alias(&self, field_name: &str) -> Option<&str> {
        self.aliases.get(field_name).map(String::as_str)
    }

    pub(crate) fn aliases(&self) -> &IndexMap<String, String> {
        &self.aliases
    }

    pub(crate) fn scalar_validator(&self) -> Option<&ScalarValidator> {
        self.scalar_validator.as_ref()
    }
}

impl fmt::Debug for TypeDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDeclaration")
            .field("owner", &self.owner)
            .field("kind", &self.kind)
            .field("name", &self.fragment.name)
            .field("requirements", &self.requirements.len())
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

/// Reads the schema attribute of a declaration builder.
pub(crate) fn read_schema(
    owner: &str,
    schema: Option<serde_json::Value>,
) -> Result<String, DeclarationError> {
    match schema {
        None => Err(DeclarationError::MissingSchema {
            owner: owner.to_string(),
        }),
        Some(serde_json::Value::String(schema)) => Ok(schema),
        Some(other) => Err(DeclarationError::InvalidSchemaType {
            owner: owner.to_string(),
            found: json_kind(&other),
        }),
    }
}

/// Reads and parses the schema attribute, expecting a type of `expected` kind.
pub(crate) fn parse_schema(
    owner: &str,
    schema: Option<serde_json::Value>,
    expected: DefinitionKind,
) -> Result<(String, Fragment), DeclarationError> {
    let raw = read_schema(owner, schema)?;
    let fragment =
        parse_fragment(&raw, expected).map_err(|e| DeclarationError::fragment(owner, e))?;
    Ok((raw, fragment))
}

/// Checks that every type the fragment references is a built-in scalar, the
/// fragment's own type, or satisfied by the closure.
pub(crate) fn check_dependencies(
    owner: &str,
    fragment: &Fragment,
    closure: &DependencyClosure,
) -> Result<(), DeclarationError> {
    let check = |usage: TypeUsage, type_name: &str, location: String| {
        if is_builtin_scalar(type_name) || type_name == fragment.name || closure.satisfies(type_name)
        {
            return Ok(());
        }
        Err(DeclarationError::MissingDependency {
            owner: owner.to_string(),
            usage,
            type_name: type_name.to_string(),
            location,
        })
    };

    match &fragment.body {
        FragmentBody::Object(fields) => {
            for field in fields {
                check(
                    TypeUsage::ReturnType,
                    field.ty.named_type(),
                    format!("{}.{}", fragment.name, field.name),
                )?;
                for argument in &field.arguments {
                    check(
                        TypeUsage::ArgumentType,
                        argument.ty.named_type(),
                        format!("{}.{}({})", fragment.name, field.name, argument.name),
                    )?;
                }
            }
        }
        FragmentBody::InputObject(fields) => {
            for field in fields {
                check(
                    TypeUsage::InputFieldType,
                    field.ty.named_type(),
                    format!("{}.{}", fragment.name, field.name),
                )?;
            }
        }
        FragmentBody::Enum(_) | FragmentBody::Scalar => {}
    }

    Ok(())
}

/// Collects builder requirement arguments.
pub(crate) fn collect_requirements<R: Into<Requirement>>(
    requirements: impl IntoIterator<Item = R>,
) -> Vec<Requirement> {
    requirements.into_iter().map(Into::into).collect()
}
