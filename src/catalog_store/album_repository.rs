use super::models::Album;
use super::store::{not_found, SqliteCatalogStore, ALBUM_COLUMNS};
use super::trait_def::{AlbumRepository, RepositoryError, RepositoryResult};
use anyhow::anyhow;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

impl SqliteCatalogStore {
    /// Returns the id of the artist the album should belong to, creating or
    /// updating the nested artist when one is given. A nested artist carrying
    /// only an id is linked without touching its stored fields.
    fn resolve_album_artist(conn: &Connection, album: &Album) -> RepositoryResult<i64> {
        match &album.artist {
            Some(artist) if artist.id > 0 && artist.name.trim().is_empty() => {
                if !Self::artist_exists(conn, artist.id)? {
                    return Err(not_found("Artist"));
                }
                Ok(artist.id)
            }
            Some(artist) if artist.id > 0 => {
                let changed = conn.execute(
                    "UPDATE artists SET name = ?1, description = ?2, image_url = ?3, amazon_url = ?4
                     WHERE id = ?5",
                    params![
                        &artist.name,
                        &artist.description,
                        &artist.image_url,
                        &artist.amazon_url,
                        artist.id
                    ],
                )?;
                if changed == 0 {
                    return Err(not_found("Artist"));
                }
                Ok(artist.id)
            }
            Some(artist) if !artist.name.trim().is_empty() => {
                let existing: Option<i64> = conn
                    .query_row(
                        "SELECT id FROM artists WHERE name = ?1 ORDER BY id LIMIT 1",
                        params![&artist.name],
                        |r| r.get(0),
                    )
                    .optional()?;
                if let Some(id) = existing {
                    debug!("Reusing artist {} for name {:?}", id, artist.name);
                    return Ok(id);
                }
                conn.execute(
                    "INSERT INTO artists (name, description, image_url, amazon_url)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        &artist.name,
                        &artist.description,
                        &artist.image_url,
                        &artist.amazon_url
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            }
            _ => {
                if !Self::artist_exists(conn, album.artist_id)? {
                    return Err(RepositoryError::Persistence(format!(
                        "Artist {} does not exist",
                        album.artist_id
                    )));
                }
                Ok(album.artist_id)
            }
        }
    }

    fn save_album_inner(conn: &Connection, album: &Album) -> RepositoryResult<Album> {
        let artist_id = Self::resolve_album_artist(conn, album)?;

        let updated = if album.id > 0 {
            conn.execute(
                "UPDATE albums SET artist_id = ?1, title = ?2, description = ?3, year = ?4,
                 image_url = ?5, amazon_url = ?6, spotify_url = ?7
                 WHERE id = ?8",
                params![
                    artist_id,
                    &album.title,
                    &album.description,
                    album.year,
                    &album.image_url,
                    &album.amazon_url,
                    &album.spotify_url,
                    album.id
                ],
            )? > 0
        } else {
            false
        };

        let album_id = if updated {
            album.id
        } else {
            conn.execute(
                "INSERT INTO albums (artist_id, title, description, year, image_url, amazon_url, spotify_url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    artist_id,
                    &album.title,
                    &album.description,
                    album.year,
                    &album.image_url,
                    &album.amazon_url,
                    &album.spotify_url
                ],
            )?;
            conn.last_insert_rowid()
        };

        conn.execute("DELETE FROM tracks WHERE album_id = ?1", params![album_id])?;
        for track in &album.tracks {
            conn.execute(
                "INSERT INTO tracks (album_id, song_name, length, bytes, unit_price)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    album_id,
                    &track.song_name,
                    &track.length,
                    track.bytes,
                    track.unit_price
                ],
            )?;
        }

        Self::get_album_inner(conn, album_id)?
            .ok_or_else(|| RepositoryError::Unexpected(anyhow!("Album {} vanished after save", album_id)))
    }
}

impl AlbumRepository for SqliteCatalogStore {
    fn list_albums(&self, page: i64, page_size: i64) -> RepositoryResult<Vec<Album>> {
        let conn = self.conn.lock().unwrap();
        if page <= 0 || page_size <= 0 {
            return Self::query_albums(
                &conn,
                &format!("SELECT {} FROM albums ORDER BY id", ALBUM_COLUMNS),
                [],
            );
        }

        let offset = (page - 1).saturating_mul(page_size);
        Self::query_albums(
            &conn,
            &format!(
                "SELECT {} FROM albums ORDER BY id LIMIT ?1 OFFSET ?2",
                ALBUM_COLUMNS
            ),
            params![page_size, offset],
        )
    }

    fn load_album(&self, id: i64) -> RepositoryResult<Option<Album>> {
        let conn = self.conn.lock().unwrap();
        Self::get_album_inner(&conn, id)
    }

    fn find_album_ids_by_title(&self, title: &str) -> RepositoryResult<Vec<i64>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id FROM albums WHERE title = ?1 ORDER BY id")?;
        let ids = stmt
            .query_map(params![title], |r| r.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    fn save_album(&self, album: &Album) -> RepositoryResult<Album> {
        self.in_transaction(|conn| Self::save_album_inner(conn, album))
    }

    fn delete_album(&self, id: i64) -> RepositoryResult<()> {
        self.in_transaction(|conn| {
            let deleted = conn.execute("DELETE FROM albums WHERE id = ?1", params![id])?;
            if deleted == 0 {
                return Err(not_found("Album"));
            }
            Ok(())
        })
    }
}
