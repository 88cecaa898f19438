use thiserror::Error;

/// Errors raised while validating an SDL fragment.
#[derive(Debug, Error)]
pub enum FragmentError {
    /// The fragment is not valid GraphQL SDL.
    #[error("{0}")]
    Syntax(#[from] async_graphql_parser::Error),

    #[error("schema must contain exactly one type definition, found {count}")]
    TypeCount { count: usize },

    /// The only definition is a `schema` or `directive` definition.
    #[error("schema must define {expected}, found a {found} definition")]
    NotATypeDefinition {
        expected: &'static str,
        found: &'static str,
    },

    #[error("schema must define {expected}, found {found} {name}")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
        name: String,
    },

    #[error("schema must not be a type extension (found extend {kind} {name})")]
    Extension { kind: &'static str, name: String },
}

impl FragmentError {
    /// Check if this error comes from the SDL parser itself
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }
}
