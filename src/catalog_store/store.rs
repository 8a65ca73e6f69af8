//! SQLite-backed album catalog store.
//!
//! `SqliteCatalogStore` owns a single connection guarded by a mutex and
//! implements both [`AlbumRepository`](super::AlbumRepository) and
//! [`ArtistRepository`](super::ArtistRepository). The trait impls live in
//! `album_repository.rs` and `artist_repository.rs`; this file holds the
//! connection handling and the row mapping they share.

use super::models::{Album, Artist, Track};
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::{RepositoryError, RepositoryResult};
use crate::sqlite_persistence::{enable_foreign_keys, ensure_schema};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

pub(super) const ARTIST_COLUMNS: &str = "id, name, description, image_url, amazon_url";
pub(super) const ALBUM_COLUMNS: &str =
    "id, artist_id, title, description, year, image_url, amazon_url, spotify_url";

#[derive(Clone)]
pub struct SqliteCatalogStore {
    pub(super) conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open catalog database {:?}", db_path))?;

        enable_foreign_keys(&conn)?;
        ensure_schema(&conn, CATALOG_VERSIONED_SCHEMAS)
            .context("Catalog database schema is invalid")?;

        let store = SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        };
        info!(
            "Opened catalog {:?}: {} artists, {} albums, {} tracks",
            db_path,
            store.get_artists_count(),
            store.get_albums_count(),
            store.get_tracks_count()
        );
        Ok(store)
    }

    fn count(&self, table: &str) -> usize {
        let conn = self.conn.lock().unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
            r.get::<_, i64>(0)
        })
        .map(|c| c as usize)
        .unwrap_or(0)
    }

    pub fn get_artists_count(&self) -> usize {
        self.count("artists")
    }

    pub fn get_albums_count(&self) -> usize {
        self.count("albums")
    }

    pub fn get_tracks_count(&self) -> usize {
        self.count("tracks")
    }

    /// Runs `f` inside `BEGIN IMMEDIATE ... COMMIT`, rolling back when it
    /// returns an error or the commit fails.
    pub(super) fn in_transaction<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&Connection) -> RepositoryResult<T>,
    {
        let conn = self.conn.lock().unwrap();
        conn.execute("BEGIN IMMEDIATE", [])?;

        let result = f(&conn).and_then(|value| {
            conn.execute("COMMIT", [])?;
            Ok(value)
        });
        if result.is_err() && !conn.is_autocommit() {
            if let Err(err) = conn.execute("ROLLBACK", []) {
                warn!("Rollback failed: {}", err);
            }
        }
        result
    }

    pub(super) fn parse_artist_row(row: &rusqlite::Row) -> rusqlite::Result<Artist> {
        Ok(Artist {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            image_url: row.get(3)?,
            amazon_url: row.get(4)?,
        })
    }

    /// Maps an `ALBUM_COLUMNS` row; artist and tracks are left empty.
    pub(super) fn parse_album_row(row: &rusqlite::Row) -> rusqlite::Result<Album> {
        Ok(Album {
            id: row.get(0)?,
            artist_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            year: row.get(4)?,
            image_url: row.get(5)?,
            amazon_url: row.get(6)?,
            spotify_url: row.get(7)?,
            artist: None,
            tracks: vec![],
        })
    }

    pub(super) fn get_artist_inner(conn: &Connection, id: i64) -> RepositoryResult<Option<Artist>> {
        let artist = conn
            .query_row(
                &format!("SELECT {} FROM artists WHERE id = ?1", ARTIST_COLUMNS),
                params![id],
                Self::parse_artist_row,
            )
            .optional()?;
        Ok(artist)
    }

    pub(super) fn get_tracks_inner(conn: &Connection, album_id: i64) -> RepositoryResult<Vec<Track>> {
        let mut stmt = conn.prepare(
            "SELECT id, album_id, song_name, length, bytes, unit_price
             FROM tracks WHERE album_id = ?1 ORDER BY id",
        )?;
        let tracks = stmt
            .query_map(params![album_id], |row| {
                Ok(Track {
                    id: row.get(0)?,
                    album_id: row.get(1)?,
                    song_name: row.get(2)?,
                    length: row.get(3)?,
                    bytes: row.get(4)?,
                    unit_price: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tracks)
    }

    /// Fills in an album's artist and tracks.
    pub(super) fn resolve_album(conn: &Connection, mut album: Album) -> RepositoryResult<Album> {
        album.artist = Self::get_artist_inner(conn, album.artist_id)?;
        album.tracks = Self::get_tracks_inner(conn, album.id)?;
        Ok(album)
    }

    /// Runs an album query and resolves each resulting row.
    pub(super) fn query_albums<P: rusqlite::Params>(
        conn: &Connection,
        sql: &str,
        params: P,
    ) -> RepositoryResult<Vec<Album>> {
        let mut stmt = conn.prepare(sql)?;
        let albums = stmt
            .query_map(params, Self::parse_album_row)?
            .collect::<Result<Vec<_>, _>>()?;
        albums
            .into_iter()
            .map(|album| Self::resolve_album(conn, album))
            .collect()
    }

    pub(super) fn get_album_inner(conn: &Connection, id: i64) -> RepositoryResult<Option<Album>> {
        let album = conn
            .query_row(
                &format!("SELECT {} FROM albums WHERE id = ?1", ALBUM_COLUMNS),
                params![id],
                Self::parse_album_row,
            )
            .optional()?;
        match album {
            Some(album) => Ok(Some(Self::resolve_album(conn, album)?)),
            None => Ok(None),
        }
    }

    pub(super) fn artist_exists(conn: &Connection, id: i64) -> RepositoryResult<bool> {
        let exists = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?1)",
            params![id],
            |r| r.get(0),
        )?;
        Ok(exists)
    }
}

pub(super) fn not_found(entity: &str) -> RepositoryError {
    RepositoryError::Persistence(format!("{} not found", entity))
}
