//! HTTP routes for the breach check API

use std::path::Path;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::post;
use hibp_range::{CredentialDigest, RangeClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::{Result, ServerError};

/// Response for both check endpoints.
///
/// A failed range lookup still answers 200, with `error` set and `found`
/// false. `count` is left out when zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub prefix: String,
    pub found: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn is_zero(count: &u64) -> bool {
    *count == 0
}

/// Build the router: the two JSON endpoints, with `static_dir` served for
/// every other path.
pub fn create_router(client: RangeClient, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/api/check/password", post(check_password).fallback(method_not_allowed))
        .route("/api/check/hash", post(check_hash).fallback(method_not_allowed))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(client)
}

async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

// Bodies are decoded by hand so any decode failure, including an oversized
// body, is a 400 regardless of content type. Only the first JSON value is
// read and keys match case-insensitively when there is no exact match.
fn string_field(body: &[u8], name: &str) -> Result<String> {
    let value = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()
        .ok_or(ServerError::InvalidBody)?
        .map_err(|e| {
            tracing::debug!(error = %e, "rejecting request body");
            ServerError::InvalidBody
        })?;

    let object = match value {
        Value::Object(object) => object,
        Value::Null => return Ok(String::new()),
        _ => return Err(ServerError::InvalidBody),
    };

    let field = object.get(name).or_else(|| {
        object.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value)
    });

    match field {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ServerError::InvalidBody),
    }
}

fn read_body(body: std::result::Result<Bytes, BytesRejection>) -> Result<Bytes> {
    body.map_err(|e| {
        tracing::debug!(error = %e, "failed to read request body");
        ServerError::InvalidBody
    })
}

async fn check_password(
    State(client): State<RangeClient>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<CheckResponse>> {
    let password = string_field(&read_body(body)?, "password")?;
    if password.is_empty() {
        return Err(ServerError::MissingPassword);
    }

    let digest = CredentialDigest::hash(&password);
    Ok(Json(check(&client, &digest).await))
}

async fn check_hash(
    State(client): State<RangeClient>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<CheckResponse>> {
    let hash = string_field(&read_body(body)?, "hash")?;
    let digest = CredentialDigest::from_hex(&hash).map_err(|_| ServerError::InvalidHash)?;

    Ok(Json(check(&client, &digest).await))
}

async fn check(client: &RangeClient, digest: &CredentialDigest) -> CheckResponse {
    let prefix = digest.prefix().to_string();

    match client.check_digest(digest).await {
        Ok(lookup) => CheckResponse {
            prefix,
            found: lookup.found(),
            count: lookup.count,
            error: None,
        },
        Err(e) => {
            tracing::warn!(prefix = %prefix, error = %e, "range lookup failed");
            CheckResponse { prefix, found: false, count: 0, error: Some(e.to_string()) }
        }
    }
}
