use axum::{
    extract::{Path, State},
    routing::{delete, get, patch},
    Json, Router,
};
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use crate::{auth::guard::OwnerClaims, error::ApiError, state::AppState};

use super::dto::{EditPatch, RequestPatch};
use super::repo::{self, DeleteResult, FoodRecord, InsertResult, UpdateResult};

/// Featured-foods carousel size on the client.
const TOP_FOODS_LIMIT: i64 = 6;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_top_foods).post(create_food))
        .route("/available-foods", get(list_available_foods))
        .route("/food/:id", get(get_food).patch(request_food))
        .route("/update/:id", patch(edit_food))
        .route("/delete/:id", delete(delete_food))
        .route("/manage-my-food/:email", get(manage_my_food))
        .route("/requested-food", get(list_requested_foods))
        .route("/requested-food/:email", get(requested_food))
}

/// GET /foods — top donations by quantity, fixed limit.
#[instrument(skip(state))]
pub async fn list_top_foods(
    State(state): State<AppState>,
) -> Result<Json<Vec<FoodRecord>>, ApiError> {
    let foods = repo::list_top_by_quantity(&state.db, TOP_FOODS_LIMIT).await?;
    Ok(Json(foods))
}

/// GET /available-foods — everything still up for grabs, soonest expiry first.
#[instrument(skip(state))]
pub async fn list_available_foods(
    State(state): State<AppState>,
) -> Result<Json<Vec<FoodRecord>>, ApiError> {
    let foods = repo::list_available(&state.db).await?;
    Ok(Json(foods))
}

/// POST /foods — stores the request body verbatim.
#[instrument(skip(state, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<InsertResult>, ApiError> {
    let result = repo::insert(&state.db, &payload).await?;
    Ok(Json(result))
}

/// GET /food/:id — a missing record is a 200 with a null body, not a 404.
#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<FoodRecord>>, ApiError> {
    let food = repo::get_by_id(&state.db, id).await?;
    Ok(Json(food))
}

/// PATCH /food/:id — the "requested" transition.
#[instrument(skip(state, patch))]
pub async fn request_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<RequestPatch>,
) -> Result<Json<UpdateResult>, ApiError> {
    let result = repo::update_fields(&state.db, id, &patch.into_merge_doc()).await?;
    Ok(Json(result))
}

/// PATCH /update/:id — donor edit of the listing fields.
#[instrument(skip(state, patch))]
pub async fn edit_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<EditPatch>,
) -> Result<Json<UpdateResult>, ApiError> {
    let result = repo::update_fields(&state.db, id, &patch.into_merge_doc()).await?;
    Ok(Json(result))
}

/// DELETE /delete/:id — irreversible; a second delete reports zero deleted.
#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResult>, ApiError> {
    let result = repo::delete_by_id(&state.db, id).await?;
    Ok(Json(result))
}

/// GET /manage-my-food/:email — donations listed by the authenticated donor.
#[instrument(skip(state, _claims))]
pub async fn manage_my_food(
    State(state): State<AppState>,
    _claims: OwnerClaims,
    Path(email): Path<String>,
) -> Result<Json<Vec<FoodRecord>>, ApiError> {
    let foods = repo::find_by_field_eq(&state.db, "donator.email", &email).await?;
    Ok(Json(foods))
}

/// GET /requested-food — legacy listing of every record carrying a
/// requestedDate, regardless of requester.
#[instrument(skip(state))]
pub async fn list_requested_foods(
    State(state): State<AppState>,
) -> Result<Json<Vec<FoodRecord>>, ApiError> {
    let foods = repo::find_where_field_exists(&state.db, "requestedDate").await?;
    Ok(Json(foods))
}

/// GET /requested-food/:email — donations the authenticated user has requested.
#[instrument(skip(state, _claims))]
pub async fn requested_food(
    State(state): State<AppState>,
    _claims: OwnerClaims,
    Path(email): Path<String>,
) -> Result<Json<Vec<FoodRecord>>, ApiError> {
    let foods = repo::find_by_field_eq(&state.db, "requestedEmail", &email).await?;
    Ok(Json(foods))
}
