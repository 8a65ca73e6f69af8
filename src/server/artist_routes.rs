use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::state::ServerState;
use crate::catalog_store::{Album, Artist, ArtistLookupItem, ArtistResponse, ArtistWithAlbumCount};
use crate::controller::{ApiError, ArtistController, Principal};

#[derive(Deserialize, Debug)]
struct LookupQuery {
    #[serde(default)]
    search: String,
}

async fn get_artists(
    State(controller): State<ArtistController>,
) -> Result<Json<Vec<ArtistWithAlbumCount>>, ApiError> {
    Ok(Json(controller.get_artists()?))
}

async fn get_artist(
    State(controller): State<ArtistController>,
    Path(id): Path<i64>,
) -> Result<Json<ArtistResponse>, ApiError> {
    Ok(Json(controller.get_artist(id)?))
}

async fn get_artist_albums(
    State(controller): State<ArtistController>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Album>>, ApiError> {
    Ok(Json(controller.get_albums_for_artist(id)?))
}

async fn post_artist(
    principal: Principal,
    State(controller): State<ArtistController>,
    body: Result<Json<Artist>, JsonRejection>,
) -> Result<Json<ArtistResponse>, ApiError> {
    principal.require_user()?;
    let Json(artist) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    Ok(Json(controller.save_artist(&principal, artist)?))
}

async fn delete_artist(
    principal: Principal,
    State(controller): State<ArtistController>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, ApiError> {
    Ok(Json(controller.delete_artist(&principal, id)?))
}

async fn artist_lookup(
    State(controller): State<ArtistController>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Vec<ArtistLookupItem>>, ApiError> {
    Ok(Json(controller.artist_lookup(&query.search)?))
}

pub fn make_artist_routes(state: ServerState) -> Router {
    Router::new()
        .route("/artists", get(get_artists))
        .route("/artist", post(post_artist))
        .route("/artist/{id}", get(get_artist).delete(delete_artist))
        .route("/artist/{id}/albums", get(get_artist_albums))
        .route("/artistlookup", get(artist_lookup))
        .with_state(state)
}
