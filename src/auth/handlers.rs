use axum::{
    extract::{FromRef, State},
    http::header::SET_COOKIE,
    response::AppendHeaders,
    routing::post,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tracing::{info, instrument};

use crate::{
    auth::jwt::{token_cookie, JwtKeys},
    error::ApiError,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/jwt", post(issue_token))
}

/// POST /jwt — signs the submitted claim object and hands it back as the
/// token cookie.
#[instrument(skip(state, claims))]
pub async fn issue_token(
    State(state): State<AppState>,
    Json(claims): Json<Map<String, Value>>,
) -> Result<(AppendHeaders<[(axum::http::HeaderName, String); 1]>, Json<Value>), ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let token = keys.issue(claims)?;
    let cookie = token_cookie(&token, keys.ttl);
    info!("session token issued");
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(json!({ "success": true })),
    ))
}
