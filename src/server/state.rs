use axum::extract::FromRef;

use crate::catalog_store::SqliteCatalogStore;
use crate::controller::{AlbumController, ArtistController};
use crate::user::UserManager;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::ServerConfig;

pub type GuardedCatalogStore = Arc<SqliteCatalogStore>;
pub type GuardedUserManager = Arc<Mutex<UserManager>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog_store: GuardedCatalogStore,
    pub album_controller: AlbumController,
    pub artist_controller: ArtistController,
    pub user_manager: GuardedUserManager,
    pub hash: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        catalog_store: GuardedCatalogStore,
        user_manager: UserManager,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            album_controller: AlbumController::new(catalog_store.clone()),
            artist_controller: ArtistController::new(catalog_store.clone()),
            catalog_store,
            user_manager: Arc::new(Mutex::new(user_manager)),
            hash: env!("GIT_HASH").to_string(),
        }
    }
}

impl FromRef<ServerState> for AlbumController {
    fn from_ref(input: &ServerState) -> Self {
        input.album_controller.clone()
    }
}

impl FromRef<ServerState> for ArtistController {
    fn from_ref(input: &ServerState) -> Self {
        input.artist_controller.clone()
    }
}

impl FromRef<ServerState> for GuardedUserManager {
    fn from_ref(input: &ServerState) -> Self {
        input.user_manager.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
