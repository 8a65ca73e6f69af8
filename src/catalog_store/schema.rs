//! SQLite schema for the album catalog database.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!("image_url", &SqlType::Text),
        sqlite_column!("amazon_url", &SqlType::Text),
    ],
    indices: &[("idx_artists_name", "name")],
};

const ALBUMS_TABLE: Table = Table {
    name: "albums",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "artists",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("image_url", &SqlType::Text),
        sqlite_column!("amazon_url", &SqlType::Text),
        sqlite_column!("spotify_url", &SqlType::Text),
    ],
    indices: &[
        ("idx_albums_artist_id", "artist_id"),
        ("idx_albums_title", "title"),
    ],
};

const TRACKS_TABLE: Table = Table {
    name: "tracks",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "album_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "albums",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("song_name", &SqlType::Text, non_null = true),
        sqlite_column!("length", &SqlType::Text),
        sqlite_column!("bytes", &SqlType::Integer, non_null = true),
        sqlite_column!("unit_price", &SqlType::Real, non_null = true),
    ],
    indices: &[("idx_tracks_album_id", "album_id")],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[ARTISTS_TABLE, ALBUMS_TABLE, TRACKS_TABLE],
    migration: None,
}];
