//! Error types for declarations and schema assembly.
//!
//! All of these are raised while declarations are built or while the schema
//! is assembled, never during query execution. [`ErrorKind`] groups them into
//! the broad categories callers usually branch on.

use gqlmodules_sdl::FragmentError;
use thiserror::Error;

/// Broad category of a [`DeclarationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required attribute is missing entirely.
    MissingAttribute,
    /// An attribute is present but has the wrong shape.
    InvalidAttributeType,
    /// The SDL fragment does not parse.
    Syntax,
    /// The fragment parses but breaks a structural rule.
    InvalidDefinition,
    /// The GraphQL engine refused the assembled schema.
    SchemaBuild,
    /// Invalid schema configuration.
    Config,
}

/// Where a type is referenced from, for dependency errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeUsage {
    ReturnType,
    ArgumentType,
    InputFieldType,
}

impl std::fmt::Display for TypeUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ReturnType => "return type",
            Self::ArgumentType => "argument type",
            Self::InputFieldType => "input field type",
        })
    }
}

/// Errors raised while declaring types or assembling a schema.
#[derive(Debug, Error)]
pub enum DeclarationError {
    #[error("{owner} requires a schema attribute")]
    MissingSchema { owner: String },

    #[error("{owner} schema attribute must be a string, found {found}")]
    InvalidSchemaType { owner: String, found: &'static str },

    #[error("{owner} {source}")]
    Fragment {
        owner: String,
        #[source]
        source: FragmentError,
    },

    #[error("{owner} cannot declare {type_name} as an object type, use a mutation declaration")]
    ReservedTypeName { owner: String, type_name: String },

    #[error("{owner} type name must be {expected}, found {found}")]
    WrongTypeName {
        owner: String,
        expected: &'static str,
        found: String,
    },

    #[error("{owner} must define exactly one field, found {count}")]
    FieldCount { owner: String, count: usize },

    #[error("{owner} requires a resolve_mutation resolver")]
    MissingResolver { owner: String },

    #[error("{owner} resolve_mutation must be callable, found {found}")]
    ResolverNotCallable { owner: String, found: &'static str },

    #[error("{owner} is missing dependency for {usage} {type_name} (used by {location})")]
    MissingDependency {
        owner: String,
        usage: TypeUsage,
        type_name: String,
        location: String,
    },

    #[error("{owner} has unknown argument mapping target {argument} for field {field}")]
    UnknownArgumentMapping {
        owner: String,
        field: String,
        argument: String,
    },

    #[error("{owner} defines {attribute} for unknown field {field}")]
    UnknownField {
        owner: String,
        attribute: &'static str,
        field: String,
    },

    #[error("{owner} maps arguments of field {field} which has no resolver")]
    ArgumentMappingWithoutResolver { owner: String, field: String },

    #[error("duplicate resolver binding for {type_name}.{field_name}")]
    DuplicateBinding {
        type_name: String,
        field_name: String,
    },

    #[error("duplicate field {type_name}.{field_name} declared by {owner}")]
    DuplicateField {
        owner: String,
        type_name: String,
        field_name: String,
    },

    #[error("type {type_name} is declared by both {first} and {second}")]
    DuplicateType {
        type_name: String,
        first: String,
        second: String,
    },

    #[error("schema requires exactly one Query type declaration, found {count}")]
    QueryCount { count: usize },

    #[error("{owner} requires deferred type {type_name} which is not declared in the schema")]
    UnresolvedDeferred { owner: String, type_name: String },

    #[error("failed to build GraphQL schema: {0}")]
    SchemaBuild(String),

    #[error("invalid schema configuration: {0}")]
    Config(String),
}

impl DeclarationError {
    /// Wraps a fragment validation failure for the declaring `owner`.
    pub fn fragment(owner: impl Into<String>, source: FragmentError) -> Self {
        Self::Fragment {
            owner: owner.into(),
            source,
        }
    }

    /// Returns the broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSchema { .. } | Self::MissingResolver { .. } => ErrorKind::MissingAttribute,
            Self::InvalidSchemaType { .. } | Self::ResolverNotCallable { .. } => {
                ErrorKind::InvalidAttributeType
            }
            Self::Fragment { source, .. } if source.is_syntax_error() => ErrorKind::Syntax,
            Self::Fragment { .. }
            | Self::ReservedTypeName { .. }
            | Self::WrongTypeName { .. }
            | Self::FieldCount { .. }
            | Self::MissingDependency { .. }
            | Self::UnknownArgumentMapping { .. }
            | Self::UnknownField { .. }
            | Self::ArgumentMappingWithoutResolver { .. }
            | Self::DuplicateBinding { .. }
            | Self::DuplicateField { .. }
            | Self::DuplicateType { .. }
            | Self::QueryCount { .. }
            | Self::UnresolvedDeferred { .. } => ErrorKind::InvalidDefinition,
            Self::SchemaBuild(_) => ErrorKind::SchemaBuild,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns the underlying SDL parser error, if this is a syntax failure.
    pub fn syntax_error(&self) -> Option<&async_graphql::parser::Error> {
        match self {
            Self::Fragment {
                source: FragmentError::Syntax(err),
                ..
            } => Some(err),
            _ => None,
        }
    }
}

impl From<async_graphql::dynamic::SchemaError> for DeclarationError {
    fn from(err: async_graphql::dynamic::SchemaError) -> Self {
        Self::SchemaBuild(err.to_string())
    }
}
