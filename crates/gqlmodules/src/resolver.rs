//! Resolver functions and their bindings to schema fields.
//!
//! A resolver receives the engine's [`ResolverContext`] and the field's
//! [`Arguments`], already renamed through the declaration's argument mapping:
//!
//! ```ignore
//! let split = resolver(|_ctx, args| {
//!     FieldFuture::new(async move {
//!         let text: String = args.get("split_str")?;
//!         Ok(Some(Value::List(
//!             text.split_whitespace().map(|s| Value::String(s.into())).collect(),
//!         )))
//!     })
//! });
//! ```

use std::fmt;
use std::sync::Arc;

use async_graphql::dynamic::{FieldFuture, ResolverContext};
use async_graphql::{Error, Value};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use tracing::trace;

/// A field resolver shared between a declaration and the assembled schema.
pub type ResolveFn =
    Arc<dyn for<'a> Fn(ResolverContext<'a>, Arguments) -> FieldFuture<'a> + Send + Sync>;

/// Wraps a closure into a [`ResolveFn`].
pub fn resolver<F>(f: F) -> ResolveFn
where
    F: for<'a> Fn(ResolverContext<'a>, Arguments) -> FieldFuture<'a> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A resolver attribute as supplied to a declaration builder.
///
/// Builders accept loosely typed attribute values so that declarations can
/// be assembled from dynamic sources; anything other than
/// [`ResolverAttr::Callable`] is rejected when the declaration is built.
#[derive(Clone)]
pub enum ResolverAttr {
    Callable(ResolveFn),
    Value(serde_json::Value),
}

impl ResolverAttr {
    pub(crate) fn value_kind(&self) -> &'static str {
        match self {
            Self::Callable(_) => "function",
            Self::Value(value) => json_kind(value),
        }
    }
}

impl From<ResolveFn> for ResolverAttr {
    fn from(f: ResolveFn) -> Self {
        Self::Callable(f)
    }
}

impl From<serde_json::Value> for ResolverAttr {
    fn from(value: serde_json::Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Debug for ResolverAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callable(_) => f.write_str("Callable(..)"),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// Returns the JSON type name of a value, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Maps declared GraphQL argument names to resolver parameter names.
///
/// Arguments without an entry keep their declared name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMapping(IndexMap<String, String>);

impl ArgumentMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, external: impl Into<String>, internal: impl Into<String>) {
        self.0.insert(external.into(), internal.into());
    }

    /// Returns the parameter name an argument is passed under.
    pub fn internal_name<'a>(&'a self, external: &'a str) -> &'a str {
        self.0.get(external).map_or(external, String::as_str)
    }

    /// Iterates over the mapped external argument names.
    pub fn external_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ArgumentMapping {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Field arguments as passed to a resolver, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(IndexMap<String, Value>);

impl Arguments {
    /// Collects the declared arguments present in `ctx`, renamed through `mapping`.
    pub(crate) fn collect<'a>(
        ctx: &ResolverContext<'_>,
        declared: impl IntoIterator<Item = &'a str>,
        mapping: &ArgumentMapping,
    ) -> Self {
        let mut values = IndexMap::new();
        for name in declared {
            if let Some(value) = ctx.args.get(name) {
                values.insert(
                    mapping.internal_name(name).to_string(),
                    value.as_value().clone(),
                );
            }
        }
        Self(values)
    }

    /// Returns the raw value of a parameter.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Deserializes a parameter. Absent parameters deserialize from `null`,
    /// so `Option<T>` targets accept omitted nullable arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not deserialize into `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, Error> {
        let value = self.0.get(name).cloned().unwrap_or(Value::Null);
        async_graphql::from_value(value)
            .map_err(|e| Error::new(format!("invalid value for argument {name}: {e}")))
    }

    /// Iterates over parameter names and values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Arguments {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A resolver attached to one field of one type.
#[derive(Clone)]
pub struct ResolverBinding {
    pub type_name: String,
    pub field_name: String,
    /// Declared argument names, in declaration order.
    pub arguments: Vec<String>,
    pub mapping: ArgumentMapping,
    pub resolver: ResolveFn,
}

impl ResolverBinding {
    /// Invokes the resolver for a field resolution.
    pub(crate) fn invoke<'a>(&self, ctx: ResolverContext<'a>) -> FieldFuture<'a> {
        let arguments = Arguments::collect(
            &ctx,
            self.arguments.iter().map(String::as_str),
            &self.mapping,
        );
        trace!(
            type_name = %self.type_name,
            field_name = %self.field_name,
            argument_count = arguments.len(),
            "Invoking resolver"
        );
        (self.resolver)(ctx, arguments)
    }
}

impl fmt::Debug for ResolverBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverBinding")
            .field("type_name", &self.type_name)
            .field("field_name", &self.field_name)
            .field("arguments", &self.arguments)
            .field("mapping", &self.mapping)
            .finish_non_exhaustive()
    }
}
