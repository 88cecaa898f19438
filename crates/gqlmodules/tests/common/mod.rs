//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use async_graphql::Value;
use async_graphql::dynamic::FieldFuture;
use gqlmodules::{Declaration, MutationType, ObjectType, resolver};
use serde_json::json;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Installs a test subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_test_writer())
            .try_init();
    });
}

pub fn query() -> Declaration {
    ObjectType::new("QueryType")
        .schema("type Query { _unused: Boolean }")
        .build()
        .expect("query declaration")
}

pub fn result_type() -> Declaration {
    ObjectType::new("ResultType")
        .schema(
            "type Result {
                total: Int
                error: String
            }",
        )
        .build()
        .expect("result declaration")
}

pub fn sum(result: &Declaration) -> Declaration {
    MutationType::new("SumMutation")
        .schema("type Mutation { sum(a: Int!, b: Int!): Result! }")
        .requires([result])
        .resolve(resolver(|_ctx, args| {
            FieldFuture::new(async move {
                let a: i64 = args.get("a")?;
                let b: i64 = args.get("b")?;
                Ok(Some(Value::from_json(json!({ "total": a + b, "error": null }))?))
            })
        }))
        .build()
        .expect("sum declaration")
}

pub fn divide(result: &Declaration) -> Declaration {
    MutationType::new("DivideMutation")
        .schema("type Mutation { divide(a: Int!, b: Int!): Result! }")
        .requires([result])
        .resolve(resolver(|_ctx, args| {
            FieldFuture::new(async move {
                let a: i64 = args.get("a")?;
                let b: i64 = args.get("b")?;
                let result = match a.checked_div(b) {
                    Some(total) => json!({ "total": total, "error": null }),
                    None => json!({ "total": null, "error": "Division by zero" }),
                };
                Ok(Some(Value::from_json(result)?))
            })
        }))
        .build()
        .expect("divide declaration")
}

pub fn split() -> Declaration {
    MutationType::new("SplitMutation")
        .schema("type Mutation { split(strToSplit: String!): [String!]! }")
        .arg("strToSplit", "split_str")
        .resolve(resolver(|_ctx, args| {
            FieldFuture::new(async move {
                let text: String = args.get("split_str")?;
                Ok(Some(Value::List(
                    text.split_whitespace()
                        .map(|part| Value::String(part.to_string()))
                        .collect(),
                )))
            })
        }))
        .build()
        .expect("split declaration")
}
