//! Schema assembly and execution.
//!
//! Declarations are merged into a [`SchemaGraph`], translated into an
//! async-graphql dynamic schema, and wrapped in an [`ExecutableSchema`].
//! [`LazySchema`] defers the whole process until first use.

mod assembler;
mod builder;
mod executable;
mod graph;
mod lazy;

pub use assembler::{SchemaAssembler, make_executable_schema};
pub use executable::ExecutableSchema;
pub use graph::{SchemaGraph, TypeNode};
pub use lazy::{LazySchema, SchemaState};
