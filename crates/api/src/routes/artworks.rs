//! Artwork endpoints.
//!
//! - `GET    /api/artworks`               public listing (`?search=&category=`)
//! - `POST   /api/artworks`               create
//! - `GET    /api/artworks/{id}`          fetch one, any visibility
//! - `PUT    /api/artworks/{id}`          shallow update
//! - `PATCH  /api/artworks/{id}/like`     add one like
//! - `PATCH  /api/artworks/{id}/favorite` add or remove a favorite mark

use artwork_gallery_core::access::Caller;
use artwork_gallery_core::artwork::{validate, Artwork, ArtworkId};
use artwork_gallery_core::mutation::{FavoriteRequest, InsertResult, UpdateResult};
use artwork_gallery_core::query::ArtworkFilter;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/artworks", get(list_artworks).post(create_artwork))
        .route("/api/artworks/{id}", get(get_artwork).put(update_artwork))
        .route("/api/artworks/{id}/like", patch(like_artwork))
        .route("/api/artworks/{id}/favorite", patch(favorite_artwork))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListArtworksQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

async fn list_artworks(
    State(state): State<AppState>,
    query: Result<Query<ListArtworksQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Artwork>>> {
    let Query(query) = query?;
    let filter = ArtworkFilter::new(query.search, query.category);
    let artworks = state
        .store()
        .list(&filter)
        .await
        .map_err(ApiError::storage("Failed to fetch artworks"))?;
    Ok(Json(artworks))
}

async fn get_artwork(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Artwork>> {
    let id = ArtworkId::parse(&id)?;
    state
        .store()
        .get(&id)
        .await
        .map_err(ApiError::storage("Failed to fetch artwork"))?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Artwork not found".to_string()))
}

async fn create_artwork(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<InsertResult>)> {
    let Json(body) = body?;
    let fields = validate::new_artwork(body)?;
    let result = state
        .store()
        .insert(Artwork::create(fields, Utc::now()))
        .await
        .map_err(ApiError::storage("Failed to add artwork"))?;

    tracing::info!(id = %result.inserted_id, "artwork created");
    Ok((StatusCode::CREATED, Json(result)))
}

async fn like_artwork(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UpdateResult>> {
    let id = ArtworkId::parse(&id)?;
    let result = state
        .store()
        .like(&id)
        .await
        .map_err(ApiError::storage("Failed to like artwork"))?;
    Ok(Json(result))
}

async fn favorite_artwork(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<FavoriteRequest>, JsonRejection>,
) -> ApiResult<Json<UpdateResult>> {
    let id = ArtworkId::parse(&id)?;
    let Json(req) = body?;
    let user = validate::user_email(&req.user_email)?;
    let result = state
        .store()
        .favorite(&id, user, req.action)
        .await
        .map_err(ApiError::storage("Failed to update favorites"))?;
    Ok(Json(result))
}

async fn update_artwork(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<UpdateResult>> {
    let id = ArtworkId::parse(&id)?;
    state.policy().authorize_update(&Caller::Anonymous, &id)?;
    let Json(body) = body?;
    let patch = validate::artwork_patch(body)?;
    let result = state
        .store()
        .update(&id, &patch)
        .await
        .map_err(ApiError::storage("Failed to update artwork"))?;
    Ok(Json(result))
}
