//! Catalog entities as exchanged over the API and persisted in SQLite.
//!
//! Identifiers are SQLite integer rowids; an `id` of 0 marks an entity that
//! has not been persisted yet.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub amazon_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Track {
    pub id: i64,
    pub album_id: i64,
    pub song_name: String,
    /// Display duration, e.g. "5:11".
    pub length: Option<String>,
    pub bytes: i64,
    pub unit_price: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Album {
    pub id: i64,
    pub artist_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub year: Option<i64>,
    pub image_url: Option<String>,
    pub amazon_url: Option<String>,
    pub spotify_url: Option<String>,
    pub artist: Option<Artist>,
    pub tracks: Vec<Track>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistLookupItem {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistWithAlbumCount {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub album_count: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistResponse {
    pub artist: Artist,
    pub albums: Vec<Album>,
}
