//! Validation for catalog entities.
//!
//! Entities are checked before any write reaches the store. All rules are
//! evaluated, so a single call reports every problem with the entity.

use super::models::{Album, Artist};
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F: Into<String>, M: Into<String>>(&mut self, field: F, message: M) {
        self.0.push(ValidationError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.0 {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_artist(artist: &Artist) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if is_blank(&artist.name) {
        errors.add("name", "Artist name is required.");
    }
    errors.into_result()
}

pub fn validate_album(album: &Album) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if is_blank(&album.title) {
        errors.add("title", "Album title is required.");
    }

    let has_artist = match &album.artist {
        Some(artist) => artist.id > 0 || !is_blank(&artist.name),
        None => album.artist_id > 0,
    };
    if !has_artist {
        errors.add("artist", "An artist is required.");
    }

    for (index, track) in album.tracks.iter().enumerate() {
        if is_blank(&track.song_name) {
            errors.add(
                format!("tracks[{}].songName", index),
                format!("Track {} is missing a song name.", index + 1),
            );
        }
        if track.bytes < 0 {
            errors.add(
                format!("tracks[{}].bytes", index),
                format!("Track {} has a negative size.", index + 1),
            );
        }
        if track.unit_price < 0.0 {
            errors.add(
                format!("tracks[{}].unitPrice", index),
                format!("Track {} has a negative price.", index + 1),
            );
        }
    }

    errors.into_result()
}
