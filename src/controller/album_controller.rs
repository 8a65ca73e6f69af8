use super::{ApiError, Principal};
use crate::catalog_store::{Album, AlbumRepository, RepositoryError};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AlbumController {
    albums: Arc<dyn AlbumRepository>,
}

impl AlbumController {
    pub fn new(albums: Arc<dyn AlbumRepository>) -> Self {
        Self { albums }
    }

    pub fn list_albums(&self, page: i64, page_size: i64) -> Result<Vec<Album>, ApiError> {
        Ok(self.albums.list_albums(page, page_size)?)
    }

    pub fn load_album(&self, id: i64) -> Result<Option<Album>, ApiError> {
        Ok(self.albums.load_album(id)?)
    }

    pub fn save_album(&self, principal: &Principal, album: Album) -> Result<Album, ApiError> {
        let handle = principal.require_user()?;

        if let Err(errors) = self.albums.validate_album(&album) {
            warn!("Rejected album {:?} from {}: {}", album.title, handle, errors);
            return Err(ApiError::validation(errors));
        }

        let saved = self.albums.save_album(&album)?;
        info!("{} saved album {} ({:?})", handle, saved.id, saved.title);
        Ok(saved)
    }

    /// `Ok(false)` when the album could not be deleted, e.g. it does not
    /// exist.
    pub fn delete_album(&self, principal: &Principal, id: i64) -> Result<bool, ApiError> {
        let handle = principal.require_user()?;
        match self.albums.delete_album(id) {
            Ok(()) => {
                info!("{} deleted album {}", handle, id);
                Ok(true)
            }
            Err(RepositoryError::Persistence(message)) => {
                warn!("{} failed to delete album {}: {}", handle, id, message);
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes every album titled exactly `name`, one at a time. Returns the
    /// failure messages, one per line; an empty report means every delete
    /// succeeded. A failing delete never stops the remaining ones.
    pub fn delete_album_by_name(
        &self,
        principal: &Principal,
        name: &str,
    ) -> Result<String, ApiError> {
        let handle = principal.require_user()?;

        let ids = self.albums.find_album_ids_by_title(name)?;
        let mut report = String::new();
        for id in ids {
            match self.albums.delete_album(id) {
                Ok(()) => info!("{} deleted album {} by name {:?}", handle, id, name),
                Err(RepositoryError::Unexpected(err)) => {
                    error!("{} failed to delete album {}: {:#}", handle, id, err);
                    report.push_str(&format!("Album {} could not be deleted.\n", id));
                }
                Err(err) => {
                    warn!("{} failed to delete album {}: {}", handle, id, err);
                    report.push_str(&err.to_string());
                    report.push('\n');
                }
            }
        }
        Ok(report)
    }
}
