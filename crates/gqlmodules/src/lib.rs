//! # gqlmodules
//!
//! Modular GraphQL schema declarations.
//!
//! A schema is written as a set of small, independently validated type
//! declarations. Each declaration carries one SDL fragment, the resolvers
//! for its fields and the declarations it depends on. Declarations are
//! checked when they are built, so a schema author learns about a missing
//! resolver or an undeclared return type at the point of declaration rather
//! than when the schema is first queried.
//!
//! ## Overview
//!
//! ```ignore
//! let result = ObjectType::new("ResultType")
//!     .schema("type Result { total: Int error: String }")
//!     .build()?;
//!
//! let sum = MutationType::new("SumMutation")
//!     .schema("type Mutation { sum(a: Int!, b: Int!): Result! }")
//!     .requires([&result])
//!     .resolve(resolver(|_ctx, args| {
//!         FieldFuture::new(async move {
//!             let total = args.get::<i64>("a")? + args.get::<i64>("b")?;
//!             Ok(Some(Value::from_json(json!({ "total": total, "error": null }))?))
//!         })
//!     }))
//!     .build()?;
//!
//! let schema = make_executable_schema([&query, &sum])?;
//! let response = schema.execute("mutation { sum(a: 5, b: 3) { total } }").await;
//! ```
//!
//! ## Configuration
//!
//! Execution limits are read from TOML:
//!
//! ```toml
//! [graphql]
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```
//!
//! ## Modules
//!
//! - [`declaration`] - Declaration builders and validated declarations
//! - [`dependencies`] - Transitive requirement resolution
//! - [`resolver`] - Resolver functions, arguments and bindings
//! - [`schema`] - Schema assembly, execution and lazy loading
//! - [`config`] - Schema configuration
//! - [`error`] - Error types

pub mod config;
pub mod declaration;
pub mod dependencies;
pub mod error;
pub mod resolver;
pub mod schema;

pub use config::SchemaConfig;
pub use declaration::{
    Declaration, DeclarationKind, EnumType, InputType, MutationType, ObjectType, Requirement,
    ScalarType, TypeDeclaration, deferred,
};
pub use dependencies::{DependencyClosure, resolve_closure, resolve_requirements};
pub use error::{DeclarationError, ErrorKind, TypeUsage};
pub use resolver::{ArgumentMapping, Arguments, ResolveFn, ResolverAttr, ResolverBinding, resolver};
pub use schema::{
    ExecutableSchema, LazySchema, SchemaAssembler, SchemaGraph, SchemaState,
    make_executable_schema,
};

/// Result type for declaration and assembly operations.
pub type Result<T> = std::result::Result<T, DeclarationError>;
