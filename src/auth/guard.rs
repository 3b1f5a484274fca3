use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Path},
    http::request::Parts,
    RequestPartsExt,
};
use tracing::warn;

use crate::{
    auth::jwt::{token_from_cookie_header, Claims, JwtKeys},
    error::ApiError,
    state::AppState,
};

/// Extractor guarding the ownership-scoped list routes: the request must
/// carry a valid token cookie whose email claim equals the `:email` path
/// parameter. Missing/invalid token → 401, email mismatch → 403.
pub struct OwnerClaims(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for OwnerClaims {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let cookie_header = parts
            .headers
            .get(axum::http::header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;
        let token = token_from_cookie_header(cookie_header).ok_or(ApiError::Unauthorized)?;

        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::Unauthorized
        })?;

        let Path(email) = parts
            .extract::<Path<String>>()
            .await
            .map_err(|_| ApiError::Unauthorized)?;

        if claims.email() != Some(email.as_str()) {
            warn!(path_email = %email, "token email does not match path");
            return Err(ApiError::Forbidden);
        }

        Ok(OwnerClaims(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use serde_json::json;
    use tower::ServiceExt;

    async fn echo_email(OwnerClaims(claims): OwnerClaims, Path(email): Path<String>) -> String {
        assert_eq!(claims.email(), Some(email.as_str()));
        email
    }

    fn guarded_app(state: AppState) -> Router {
        Router::new()
            .route("/manage-my-food/:email", get(echo_email))
            .with_state(state)
    }

    fn token_for(state: &AppState, email: &str) -> String {
        let keys = JwtKeys::from_ref(state);
        let mut data = serde_json::Map::new();
        data.insert("email".into(), json!(email));
        keys.issue(data).expect("issue token")
    }

    fn request(uri: &str, cookie: Option<String>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(c) = cookie {
            builder = builder.header(axum::http::header::COOKIE, c);
        }
        builder.body(Body::empty()).expect("request")
    }

    #[tokio::test]
    async fn missing_cookie_is_unauthorized() {
        let app = guarded_app(AppState::fake());
        let res = app
            .oneshot(request("/manage-my-food/a@x.com", None))
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unrelated_cookie_is_unauthorized() {
        let app = guarded_app(AppState::fake());
        let res = app
            .oneshot(request(
                "/manage-my-food/a@x.com",
                Some("theme=dark".into()),
            ))
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn tampered_token_is_unauthorized() {
        let state = AppState::fake();
        let token = token_for(&state, "a@x.com");
        let app = guarded_app(state);
        let res = app
            .oneshot(request(
                "/manage-my-food/a@x.com",
                Some(format!("token={}x", token)),
            ))
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn email_mismatch_is_forbidden() {
        let state = AppState::fake();
        let token = token_for(&state, "a@x.com");
        let app = guarded_app(state);
        let res = app
            .oneshot(request(
                "/manage-my-food/b@x.com",
                Some(format!("token={token}")),
            ))
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn matching_email_passes_through() {
        let state = AppState::fake();
        let token = token_for(&state, "a@x.com");
        let app = guarded_app(state);
        let res = app
            .oneshot(request(
                "/manage-my-food/a@x.com",
                Some(format!("token={token}")),
            ))
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::OK);
    }
}
