//! End-to-end execution of mutation declarations.

mod common;

use async_graphql::dynamic::FieldFuture;
use gqlmodules::{DeclarationError, ErrorKind, MutationType, make_executable_schema, resolver};
use serde_json::json;

use common::{divide, init_tracing, query, result_type, split, sum};

async fn execute(schema: &gqlmodules::ExecutableSchema, source: &str) -> serde_json::Value {
    let response = schema.execute(source).await;
    assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
    response.data.into_json().expect("response data is valid JSON")
}

#[tokio::test]
async fn test_sum_mutation() {
    init_tracing();
    let result = result_type();
    let schema = make_executable_schema([&query(), &sum(&result)]).unwrap();

    let data = execute(&schema, "mutation { sum(a: 5, b: 3) { total error } }").await;
    assert_eq!(data, json!({ "sum": { "total": 8, "error": null } }));
}

#[tokio::test]
async fn test_divide_mutation_reports_errors_in_result() {
    init_tracing();
    let result = result_type();
    let schema = make_executable_schema([&query(), &divide(&result)]).unwrap();

    let data = execute(&schema, "mutation { divide(a: 6, b: 3) { total error } }").await;
    assert_eq!(data, json!({ "divide": { "total": 2, "error": null } }));

    let data = execute(&schema, "mutation { divide(a: 6, b: 0) { total error } }").await;
    assert_eq!(
        data,
        json!({ "divide": { "total": null, "error": "Division by zero" } })
    );
}

#[tokio::test]
async fn test_argument_mapping() {
    init_tracing();
    let schema = make_executable_schema([&query(), &split()]).unwrap();

    let data = execute(&schema, r#"mutation { split(strToSplit: "a b c") }"#).await;
    assert_eq!(data, json!({ "split": ["a", "b", "c"] }));
}

#[tokio::test]
async fn test_mutations_share_one_root_type() {
    init_tracing();
    let result = result_type();
    let schema =
        make_executable_schema([&query(), &sum(&result), &divide(&result), &split()]).unwrap();

    assert!(schema.has_binding("Mutation", "sum"));
    assert!(schema.has_binding("Mutation", "divide"));
    assert!(schema.has_binding("Mutation", "split"));
    assert_eq!(schema.bindings().count(), 3);

    let data = execute(
        &schema,
        r#"mutation {
            sum(a: 1, b: 2) { total }
            divide(a: 9, b: 3) { total }
            split(strToSplit: "x y")
        }"#,
    )
    .await;
    assert_eq!(
        data,
        json!({
            "sum": { "total": 3 },
            "divide": { "total": 3 },
            "split": ["x", "y"],
        })
    );
}

#[tokio::test]
async fn test_resolver_errors_surface_as_graphql_errors() {
    init_tracing();
    let failing = MutationType::new("FailingMutation")
        .schema("type Mutation { fail: Boolean }")
        .resolve(resolver(|_ctx, _args| {
            FieldFuture::new(async move {
                Err::<Option<async_graphql::Value>, _>(async_graphql::Error::new("boom"))
            })
        }))
        .build()
        .unwrap();
    let schema = make_executable_schema([&query(), &failing]).unwrap();

    let response = schema.execute("mutation { fail }").await;
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "boom");
}

#[test]
fn test_schema_requires_query() {
    init_tracing();
    let err = make_executable_schema([&split()]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDefinition);
    assert!(matches!(err, DeclarationError::QueryCount { count: 0 }));
}

#[test]
fn test_duplicate_mutation_binding() {
    init_tracing();
    let other_split = MutationType::new("OtherSplitMutation")
        .schema("type Mutation { split(text: String!): [String!]! }")
        .resolve(resolver(|_ctx, _args| FieldFuture::from_value(None)))
        .build()
        .unwrap();

    let err = make_executable_schema([&query(), &split(), &other_split]).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"duplicate resolver binding for Mutation.split");
}
