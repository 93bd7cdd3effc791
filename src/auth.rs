use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use crate::handler::AppState;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_KEY: &[u8] = b"bookmarks-api-token";

#[derive(Debug, Serialize)]
struct Unauthorized {
    error: &'static str,
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

fn token_mac(token: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(TOKEN_KEY).ok()?;
    mac.update(token.as_bytes());
    Some(mac)
}

/// Compares fixed-size digests of both tokens with `verify_slice`, so the
/// time taken does not depend on how much of the presented token matches.
fn token_matches(presented: Option<&str>, expected: &str) -> bool {
    let (Some(presented), Some(expected)) = (presented.and_then(token_mac), token_mac(expected)) else {
        return false;
    };
    presented.verify_slice(&expected.finalize().into_bytes()).is_ok()
}

/// Rejects requests whose `Authorization` header does not carry the configured token.
pub async fn require_bearer_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !token_matches(bearer_token(&request), &state.api_token) {
        tracing::error!(path = %request.uri().path(), "unauthorized request");
        return (
            StatusCode::UNAUTHORIZED,
            Json(Unauthorized {
                error: "Unauthorized request",
            }),
        )
            .into_response();
    }

    next.run(request).await
}
