//! # gqlmodules-sdl
//!
//! SDL fragment handling for the gqlmodules declaration layer.
//!
//! Every declared GraphQL type carries a small schema-definition-language
//! fragment. This crate parses such fragments with `async-graphql-parser`,
//! checks that they hold exactly one type definition of the expected kind,
//! and converts the parser AST into a compact owned model ([`Fragment`],
//! [`FieldDefinition`], [`TypeRef`]) that the rest of the workspace works with.
//!
//! ## Modules
//!
//! - [`fragment`] - Fragment parsing and validation
//! - [`type_ref`] - Wrapped type references and built-in scalars
//! - [`printer`] - Deterministic SDL rendering of fragments
//! - [`error`] - Fragment validation errors

pub mod error;
pub mod fragment;
pub mod printer;
pub mod type_ref;

pub use error::FragmentError;
pub use fragment::{
    DefinitionKind, EnumValue, FieldDefinition, Fragment, FragmentBody, InputValue, parse_fragment,
};
pub use printer::print_document;
pub use type_ref::{BUILTIN_SCALARS, TypeRef, is_builtin_scalar};

/// Constant GraphQL value used for argument defaults.
pub use async_graphql_value::ConstValue;

/// Result type for fragment operations.
pub type Result<T> = std::result::Result<T, FragmentError>;
