//! Type references as written in field and argument positions.
//!
//! A [`TypeRef`] mirrors GraphQL's wrapping rules: a named type can be
//! wrapped in lists and non-null markers in any combination, e.g.
//! `[String!]!` is `NonNull(List(NonNull(Named("String"))))`.

use std::fmt;

use async_graphql_parser::types::{BaseType, Type};

/// Scalars every GraphQL schema provides without declaring them.
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Checks if a type name is one of the built-in GraphQL scalars.
pub fn is_builtin_scalar(type_name: &str) -> bool {
    BUILTIN_SCALARS.contains(&type_name)
}

/// A possibly wrapped reference to a named type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Creates a nullable reference to a named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps this reference in a non-null marker.
    #[must_use]
    pub fn non_null(self) -> Self {
        Self::NonNull(Box::new(self))
    }

    /// Wraps this reference in a list.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Returns the bare named type with all list and non-null wrappers stripped.
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }

    /// Returns `true` if the outermost wrapper is non-null.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Returns `true` if this reference is a list, looking through a
    /// non-null wrapper.
    pub fn is_list(&self) -> bool {
        match self {
            Self::List(_) => true,
            Self::NonNull(inner) => matches!(**inner, Self::List(_)),
            Self::Named(_) => false,
        }
    }

    /// Returns the wrapped reference, or `None` for a bare named type.
    pub fn of(&self) -> Option<&TypeRef> {
        match self {
            Self::Named(_) => None,
            Self::List(inner) | Self::NonNull(inner) => Some(inner),
        }
    }
}

impl From<&Type> for TypeRef {
    fn from(ty: &Type) -> Self {
        let base = match &ty.base {
            BaseType::Named(name) => Self::Named(name.to_string()),
            BaseType::List(inner) => Self::List(Box::new(Self::from(inner.as_ref()))),
        };

        if ty.nullable { base } else { base.non_null() }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_type(ty: &str) -> TypeRef {
        let parsed = Type::new(ty).expect("valid type");
        TypeRef::from(&parsed)
    }

    #[test]
    fn test_named_type_strips_wrappers() {
        let ty = parse_type("[UserCreateResult!]!");
        assert_eq!(ty.named_type(), "UserCreateResult");
        assert!(ty.is_non_null());
        assert!(ty.is_list());
    }

    #[test]
    fn test_nullable_named_type() {
        let ty = parse_type("String");
        assert_eq!(ty, TypeRef::named("String"));
        assert!(!ty.is_non_null());
        assert!(!ty.is_list());
        assert!(ty.of().is_none());
    }

    #[test]
    fn test_display_matches_sdl() {
        for sdl in ["Int", "Int!", "[Int]", "[Int!]!", "[[ID]!]"] {
            assert_eq!(parse_type(sdl).to_string(), sdl);
        }
    }

    #[test]
    fn test_builder_helpers() {
        let ty = TypeRef::named("String").non_null().list().non_null();
        assert_eq!(ty.to_string(), "[String!]!");
        assert_eq!(ty.of().map(TypeRef::is_list), Some(true));
    }

    #[test]
    fn test_builtin_scalars() {
        assert!(is_builtin_scalar("ID"));
        assert!(is_builtin_scalar("Boolean"));
        assert!(!is_builtin_scalar("DateTime"));
        assert!(!is_builtin_scalar("string"));
    }
}
