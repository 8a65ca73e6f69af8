use super::models::{Album, Artist, ArtistLookupItem, ArtistWithAlbumCount};
use super::store::{not_found, SqliteCatalogStore, ALBUM_COLUMNS};
use super::trait_def::{ArtistRepository, RepositoryError, RepositoryResult};
use anyhow::anyhow;
use rusqlite::params;

impl ArtistRepository for SqliteCatalogStore {
    fn artist_lookup(&self, search: &str) -> RepositoryResult<Vec<ArtistLookupItem>> {
        let term = search.trim().to_lowercase();
        if term.is_empty() {
            return Ok(vec![]);
        }

        // SQLite's lower() only folds ASCII, so names are matched here.
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, name FROM artists ORDER BY name, id")?;
        let mut items = vec![];
        for item in stmt.query_map([], |row| {
            Ok(ArtistLookupItem {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })? {
            let item = item?;
            if item.name.to_lowercase().starts_with(&term) {
                items.push(item);
            }
        }
        Ok(items)
    }

    fn get_all_artists(&self) -> RepositoryResult<Vec<ArtistWithAlbumCount>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT ar.id, ar.name, ar.description, COUNT(al.id)
             FROM artists ar
             LEFT JOIN albums al ON al.artist_id = ar.id
             GROUP BY ar.id
             ORDER BY ar.name, ar.id",
        )?;
        let artists = stmt
            .query_map([], |row| {
                Ok(ArtistWithAlbumCount {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    album_count: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(artists)
    }

    fn get_albums_for_artist(&self, artist_id: i64) -> RepositoryResult<Vec<Album>> {
        let conn = self.conn.lock().unwrap();
        Self::query_albums(
            &conn,
            &format!(
                "SELECT {} FROM albums WHERE artist_id = ?1 ORDER BY year DESC, id",
                ALBUM_COLUMNS
            ),
            params![artist_id],
        )
    }

    fn load_artist(&self, id: i64) -> RepositoryResult<Option<Artist>> {
        let conn = self.conn.lock().unwrap();
        Self::get_artist_inner(&conn, id)
    }

    fn save_artist(&self, artist: &Artist) -> RepositoryResult<Artist> {
        self.in_transaction(|conn| {
            let id = if artist.id > 0 {
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
                artist.id
            } else {
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
                conn.last_insert_rowid()
            };

            Self::get_artist_inner(conn, id)?.ok_or_else(|| {
                RepositoryError::Unexpected(anyhow!("Artist {} vanished after save", id))
            })
        })
    }

    fn delete_artist(&self, id: i64) -> RepositoryResult<()> {
        self.in_transaction(|conn| {
            let deleted = conn.execute("DELETE FROM artists WHERE id = ?1", params![id])?;
            if deleted == 0 {
                return Err(not_found("Artist"));
            }
            Ok(())
        })
    }
}
