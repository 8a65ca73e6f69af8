mod album_repository;
mod artist_repository;
mod models;
mod schema;
mod store;
mod trait_def;
mod validation;

pub use models::*;
pub use schema::CATALOG_VERSIONED_SCHEMAS;
pub use store::SqliteCatalogStore;
pub use trait_def::{
    AlbumRepository, ArtistRepository, RepositoryError, RepositoryResult, DEFAULT_PAGE_SIZE,
};
pub use validation::{validate_album, validate_artist, ValidationError, ValidationErrors};
