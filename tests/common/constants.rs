//! Shared constants for end-to-end tests
//!
//! When the seeded data changes, update only this file and `fixtures.rs`.

// ============================================================================
// Test User Credentials
// ============================================================================

pub const TEST_USER: &str = "testuser";
pub const TEST_PASS: &str = "testpass123";

// ============================================================================
// Seeded Catalog
// ============================================================================

/// Ids are assigned by SQLite in insertion order on a fresh database.
pub const ARTIST_1_ID: i64 = 1;
pub const ARTIST_1_NAME: &str = "The Test Band";

pub const ARTIST_2_ID: i64 = 2;
pub const ARTIST_2_NAME: &str = "Jazz Ensemble";

/// "First Album" by The Test Band, 1994, 3 tracks
pub const ALBUM_1_ID: i64 = 1;
pub const ALBUM_1_TITLE: &str = "First Album";

/// "Second Album" by The Test Band, 1998, 1 track
pub const ALBUM_2_ID: i64 = 2;
pub const ALBUM_2_TITLE: &str = "Second Album";

/// "Jazz Collection" by Jazz Ensemble, 2001, 2 tracks
pub const ALBUM_3_ID: i64 = 3;
pub const ALBUM_3_TITLE: &str = "Jazz Collection";

pub const SEEDED_ALBUMS_COUNT: usize = 3;

// ============================================================================
// Timeouts
// ============================================================================

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
