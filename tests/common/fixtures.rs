//! Test fixture creation for the catalog and user databases

use super::constants::*;
use album_viewer_server::catalog_store::{Album, AlbumRepository, Artist, SqliteCatalogStore, Track};
use album_viewer_server::user::{SqliteUserStore, UserManager};
use anyhow::Result;
use tempfile::TempDir;

fn track(song_name: &str, bytes: i64) -> Track {
    Track {
        song_name: song_name.to_string(),
        length: Some("3:30".to_string()),
        bytes,
        unit_price: 0.99,
        ..Default::default()
    }
}

/// Creates a temporary db dir holding a catalog with 2 artists and 3 albums
/// plus a user database with the test user.
pub fn create_test_db_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;

    let catalog_store = SqliteCatalogStore::new(dir.path().join("catalog.db"))?;
    let test_band = Artist {
        name: ARTIST_1_NAME.to_string(),
        description: Some("Loud and proud.".to_string()),
        ..Default::default()
    };
    let jazz_ensemble = Artist {
        name: ARTIST_2_NAME.to_string(),
        ..Default::default()
    };

    let albums = vec![
        Album {
            title: ALBUM_1_TITLE.to_string(),
            year: Some(1994),
            artist: Some(test_band.clone()),
            tracks: vec![
                track("Opening Track", 4_000_000),
                track("Middle Track", 5_000_000),
                track("Closing Track", 6_000_000),
            ],
            ..Default::default()
        },
        Album {
            title: ALBUM_2_TITLE.to_string(),
            year: Some(1998),
            artist: Some(test_band),
            tracks: vec![track("Lonely Track", 3_000_000)],
            ..Default::default()
        },
        Album {
            title: ALBUM_3_TITLE.to_string(),
            year: Some(2001),
            artist: Some(jazz_ensemble),
            tracks: vec![
                track("Smooth Jazz", 7_000_000),
                track("Upbeat Jazz", 8_000_000),
            ],
            ..Default::default()
        },
    ];
    for album in albums.iter() {
        catalog_store
            .save_album(album)
            .map_err(|e| anyhow::anyhow!("Failed to seed album {}: {}", album.title, e))?;
    }

    let user_store = SqliteUserStore::new(dir.path().join("user.db"))?;
    let user_manager = UserManager::new(Box::new(user_store));
    user_manager.add_user(TEST_USER)?;
    user_manager.set_password(TEST_USER, TEST_PASS)?;

    Ok(dir)
}
