use super::error::INVALID_ARTIST_ID_MESSAGE;
use super::{ApiError, Principal};
use crate::catalog_store::{
    Album, Artist, ArtistLookupItem, ArtistRepository, ArtistResponse, ArtistWithAlbumCount,
    RepositoryError,
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ArtistController {
    artists: Arc<dyn ArtistRepository>,
}

impl ArtistController {
    pub fn new(artists: Arc<dyn ArtistRepository>) -> Self {
        Self { artists }
    }

    pub fn get_artists(&self) -> Result<Vec<ArtistWithAlbumCount>, ApiError> {
        Ok(self.artists.get_all_artists()?)
    }

    pub fn get_artist(&self, id: i64) -> Result<ArtistResponse, ApiError> {
        let artist = self
            .artists
            .load_artist(id)?
            .ok_or_else(|| ApiError::NotFound(INVALID_ARTIST_ID_MESSAGE.to_string()))?;
        let albums = self.artists.get_albums_for_artist(artist.id)?;
        Ok(ArtistResponse { artist, albums })
    }

    pub fn artist_lookup(&self, search: &str) -> Result<Vec<ArtistLookupItem>, ApiError> {
        Ok(self.artists.artist_lookup(search)?)
    }

    pub fn get_albums_for_artist(&self, artist_id: i64) -> Result<Vec<Album>, ApiError> {
        Ok(self.artists.get_albums_for_artist(artist_id)?)
    }

    pub fn save_artist(
        &self,
        principal: &Principal,
        artist: Artist,
    ) -> Result<ArtistResponse, ApiError> {
        let handle = principal.require_user()?;

        if let Err(errors) = self.artists.validate_artist(&artist) {
            warn!("Rejected artist {:?} from {}: {}", artist.name, handle, errors);
            return Err(ApiError::validation(errors));
        }

        let saved = self.artists.save_artist(&artist)?;
        info!("{} saved artist {} ({:?})", handle, saved.id, saved.name);
        let albums = self.artists.get_albums_for_artist(saved.id)?;
        Ok(ArtistResponse {
            artist: saved,
            albums,
        })
    }

    pub fn delete_artist(&self, principal: &Principal, id: i64) -> Result<bool, ApiError> {
        let handle = principal.require_user()?;
        match self.artists.delete_artist(id) {
            Ok(()) => {
                info!("{} deleted artist {}", handle, id);
                Ok(true)
            }
            Err(RepositoryError::Persistence(message)) => {
                warn!("{} failed to delete artist {}: {}", handle, id, message);
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}
