use crate::state::AppState;
use axum::Router;

pub mod guard;
pub mod handlers;
pub mod jwt;

pub fn router() -> Router<AppState> {
    handlers::router()
}
