use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::state::ServerState;
use crate::catalog_store::{Album, DEFAULT_PAGE_SIZE};
use crate::controller::{AlbumController, ApiError, Principal};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AlbumsQuery {
    page: Option<i64>,
    page_size: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct DeleteByNameQuery {
    #[serde(default)]
    name: String,
}

async fn get_albums(
    State(controller): State<AlbumController>,
    Query(query): Query<AlbumsQuery>,
) -> Result<Json<Vec<Album>>, ApiError> {
    let page = query.page.unwrap_or(-1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    Ok(Json(controller.list_albums(page, page_size)?))
}

async fn get_album(
    State(controller): State<AlbumController>,
    Path(id): Path<i64>,
) -> Result<Json<Option<Album>>, ApiError> {
    Ok(Json(controller.load_album(id)?))
}

async fn post_album(
    principal: Principal,
    State(controller): State<AlbumController>,
    body: Result<Json<Album>, JsonRejection>,
) -> Result<Json<Album>, ApiError> {
    principal.require_user()?;
    let Json(album) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    Ok(Json(controller.save_album(&principal, album)?))
}

async fn delete_album(
    principal: Principal,
    State(controller): State<AlbumController>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, ApiError> {
    Ok(Json(controller.delete_album(&principal, id)?))
}

async fn delete_album_by_name(
    principal: Principal,
    State(controller): State<AlbumController>,
    Query(query): Query<DeleteByNameQuery>,
) -> Result<Json<String>, ApiError> {
    Ok(Json(controller.delete_album_by_name(&principal, &query.name)?))
}

pub fn make_album_routes(state: ServerState) -> Router {
    Router::new()
        .route("/albums", get(get_albums))
        .route("/albums/deletebyname", get(delete_album_by_name))
        .route("/album", post(post_album))
        .route("/album/{id}", get(get_album).delete(delete_album))
        .with_state(state)
}
