//! HTTP-independent API surface.
//!
//! Controllers enforce the authorization gate and turn repository outcomes
//! into `ApiError`s. They know nothing about axum beyond `ApiError`'s
//! response rendering.

mod album_controller;
mod artist_controller;
mod error;
mod principal;

pub use album_controller::AlbumController;
pub use artist_controller::ArtistController;
pub use error::{
    ApiError, ApiErrorBody, INVALID_ARTIST_ID_MESSAGE, INVALID_CREDENTIALS_MESSAGE,
    UNAUTHORIZED_MESSAGE,
};
pub use principal::Principal;
