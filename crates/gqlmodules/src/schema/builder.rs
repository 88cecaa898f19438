//! Translation of a [`SchemaGraph`] into an async-graphql dynamic schema.

use async_graphql::Value;
use async_graphql::dynamic::{
    Enum, EnumItem, Field, FieldFuture, InputObject, InputValue, Object, ResolverContext, Scalar,
    Schema, SchemaBuilder, TypeRef,
};
use gqlmodules_sdl::{self as sdl, EnumValue, FieldDefinition, FragmentBody};
use tracing::debug;

use super::graph::{SchemaGraph, TypeNode};
use crate::config::SchemaConfig;
use crate::error::DeclarationError;

/// Builds the executable dynamic schema for `graph`.
///
/// # Errors
///
/// Returns [`DeclarationError::SchemaBuild`] if async-graphql rejects the
/// assembled types.
pub(crate) fn build_schema(
    graph: &SchemaGraph,
    config: &SchemaConfig,
) -> Result<Schema, DeclarationError> {
    debug!("Starting GraphQL schema build");

    let mutation = graph.has_mutation().then_some("Mutation");
    let mut builder = Schema::build("Query", mutation, None);

    for node in graph.types() {
        builder = register_type(builder, graph, node);
    }

    builder = builder
        .limit_depth(config.max_depth)
        .limit_complexity(config.max_complexity);
    if !config.introspection {
        builder = builder.disable_introspection();
    }

    let schema = builder.finish()?;
    debug!("GraphQL schema build complete");
    Ok(schema)
}

fn register_type(builder: SchemaBuilder, graph: &SchemaGraph, node: &TypeNode) -> SchemaBuilder {
    let fragment = node.fragment();
    match &fragment.body {
        FragmentBody::Object(fields) => {
            let mut object = Object::new(&fragment.name);
            if let Some(description) = &fragment.description {
                object = object.description(description);
            }
            for field in fields {
                object = object.field(build_field(graph, node, field));
            }
            builder.register(object)
        }
        FragmentBody::InputObject(fields) => {
            let mut input = InputObject::new(&fragment.name);
            if let Some(description) = &fragment.description {
                input = input.description(description);
            }
            for field in fields {
                input = input.field(build_input_value(field));
            }
            builder.register(input)
        }
        FragmentBody::Enum(values) => {
            let mut enum_type = Enum::new(&fragment.name);
            if let Some(description) = &fragment.description {
                enum_type = enum_type.description(description);
            }
            for value in values {
                enum_type = enum_type.item(build_enum_item(value));
            }
            builder.register(enum_type)
        }
        FragmentBody::Scalar => {
            let mut scalar = Scalar::new(&fragment.name);
            if let Some(description) = &fragment.description {
                scalar = scalar.description(description);
            }
            if let Some(validator) = node.scalar_validator().cloned() {
                scalar = scalar.validator(move |value: &Value| validator(value));
            }
            builder.register(scalar)
        }
    }
}

fn build_field(graph: &SchemaGraph, node: &TypeNode, definition: &FieldDefinition) -> Field {
    let ty = to_type_ref(&definition.ty);
    let mut field = match graph.binding(node.name(), &definition.name) {
        Some(binding) => {
            let binding = binding.clone();
            Field::new(&definition.name, ty, move |ctx| binding.invoke(ctx))
        }
        None => {
            let key = node.parent_key(&definition.name).to_string();
            Field::new(&definition.name, ty, move |ctx| {
                FieldFuture::from_value(parent_field(&ctx, &key))
            })
        }
    };

    if let Some(description) = &definition.description {
        field = field.description(description);
    }
    for argument in &definition.arguments {
        field = field.argument(build_input_value(argument));
    }
    field
}

/// Default resolution: read `key` from the parent object value.
fn parent_field(ctx: &ResolverContext<'_>, key: &str) -> Option<Value> {
    match ctx.parent_value.as_value() {
        Some(Value::Object(map)) => map.get(key).cloned(),
        _ => None,
    }
}

fn build_input_value(definition: &sdl::InputValue) -> InputValue {
    let mut input = InputValue::new(&definition.name, to_type_ref(&definition.ty));
    if let Some(description) = &definition.description {
        input = input.description(description);
    }
    if let Some(default) = &definition.default_value {
        input = input.default_value(default.clone());
    }
    input
}

fn build_enum_item(value: &EnumValue) -> EnumItem {
    let item = EnumItem::new(&value.name);
    match &value.description {
        Some(description) => item.description(description),
        None => item,
    }
}

fn to_type_ref(ty: &sdl::TypeRef) -> TypeRef {
    match ty {
        sdl::TypeRef::Named(name) => TypeRef::named(name),
        sdl::TypeRef::List(inner) => TypeRef::List(Box::new(to_type_ref(inner))),
        sdl::TypeRef::NonNull(inner) => TypeRef::NonNull(Box::new(to_type_ref(inner))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_conversion() {
        let ty = sdl::TypeRef::named("String").non_null().list().non_null();
        assert_eq!(to_type_ref(&ty).to_string(), "[String!]!");
        assert_eq!(to_type_ref(&sdl::TypeRef::named("Result")).to_string(), "Result");
    }
}
