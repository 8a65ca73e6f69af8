//! Repository traits for the album catalog.
//!
//! Albums and artists are exposed through two independent capability traits
//! so that a consumer depends only on the entity it works with. Every call
//! reports its own outcome; implementations keep no per-call error state.

use super::models::{Album, Artist, ArtistLookupItem, ArtistWithAlbumCount};
use super::validation::{self, ValidationErrors};
use thiserror::Error;

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 15;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An expected failure, such as a missing row or a constraint violation.
    /// The message is meant to be shown to the client.
    #[error("{0}")]
    Persistence(String),

    #[error("Unexpected repository error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::ConstraintViolation) => {
                RepositoryError::Persistence(err.to_string())
            }
            _ => RepositoryError::Unexpected(err.into()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

pub trait AlbumRepository: Send + Sync {
    /// 1-indexed page of albums ordered by id, each with its artist and
    /// tracks. `page <= 0` or `page_size <= 0` returns every album.
    fn list_albums(&self, page: i64, page_size: i64) -> RepositoryResult<Vec<Album>>;

    fn load_album(&self, id: i64) -> RepositoryResult<Option<Album>>;

    /// Ids of the albums whose title is exactly `title`.
    fn find_album_ids_by_title(&self, title: &str) -> RepositoryResult<Vec<i64>>;

    /// Inserts or updates the album, its artist and its tracks in one
    /// transaction, and returns the album as persisted. The submitted track
    /// list replaces the stored one.
    fn save_album(&self, album: &Album) -> RepositoryResult<Album>;

    fn delete_album(&self, id: i64) -> RepositoryResult<()>;

    fn validate_album(&self, album: &Album) -> Result<(), ValidationErrors> {
        validation::validate_album(album)
    }
}

pub trait ArtistRepository: Send + Sync {
    /// Case-insensitive name prefix search ordered by name. A blank term
    /// matches nothing.
    fn artist_lookup(&self, search: &str) -> RepositoryResult<Vec<ArtistLookupItem>>;

    fn get_all_artists(&self) -> RepositoryResult<Vec<ArtistWithAlbumCount>>;

    /// Albums of the artist, newest year first.
    fn get_albums_for_artist(&self, artist_id: i64) -> RepositoryResult<Vec<Album>>;

    fn load_artist(&self, id: i64) -> RepositoryResult<Option<Artist>>;

    fn save_artist(&self, artist: &Artist) -> RepositoryResult<Artist>;

    /// Removes the artist along with its albums and their tracks.
    fn delete_artist(&self, id: i64) -> RepositoryResult<()>;

    fn validate_artist(&self, artist: &Artist) -> Result<(), ValidationErrors> {
        validation::validate_artist(artist)
    }
}
