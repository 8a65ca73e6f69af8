//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per server endpoint. When routes or request
//! formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

/// HTTP test client with cookie-based session management
pub struct TestClient {
    pub client: reqwest::Client,
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    /// Creates a new unauthenticated client
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Creates a client logged in as the test user
    ///
    /// # Panics
    ///
    /// Panics if the login fails.
    pub async fn authenticated(base_url: String) -> Self {
        let client = Self::new(base_url);

        let response = client.login(TEST_USER, TEST_PASS).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::CREATED,
            "Test user authentication failed: {:?}",
            response.text().await
        );

        client
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Account Endpoints
    // ========================================================================

    /// POST /api/account/login
    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.client
            .post(self.url("/api/account/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Login request failed")
    }

    /// GET /api/account/logout
    pub async fn logout(&self) -> Response {
        self.client
            .get(self.url("/api/account/logout"))
            .send()
            .await
            .expect("Logout request failed")
    }

    /// GET /
    pub async fn get_stats(&self) -> Response {
        self.client
            .get(self.url("/"))
            .send()
            .await
            .expect("Stats request failed")
    }

    // ========================================================================
    // Album Endpoints
    // ========================================================================

    /// GET /api/albums
    pub async fn get_albums(&self) -> Response {
        self.client
            .get(self.url("/api/albums"))
            .send()
            .await
            .expect("Get albums request failed")
    }

    /// GET /api/albums?page&pageSize
    pub async fn get_albums_page(&self, page: i64, page_size: i64) -> Response {
        self.client
            .get(self.url(&format!("/api/albums?page={}&pageSize={}", page, page_size)))
            .send()
            .await
            .expect("Get albums page request failed")
    }

    /// GET /api/album/{id}
    pub async fn get_album(&self, id: i64) -> Response {
        self.client
            .get(self.url(&format!("/api/album/{}", id)))
            .send()
            .await
            .expect("Get album request failed")
    }

    /// POST /api/album
    pub async fn save_album(&self, album: &Value) -> Response {
        self.client
            .post(self.url("/api/album"))
            .json(album)
            .send()
            .await
            .expect("Save album request failed")
    }

    /// DELETE /api/album/{id}
    pub async fn delete_album(&self, id: i64) -> Response {
        self.client
            .delete(self.url(&format!("/api/album/{}", id)))
            .send()
            .await
            .expect("Delete album request failed")
    }

    /// GET /api/albums/deletebyname?name=
    pub async fn delete_albums_by_name(&self, name: &str) -> Response {
        self.client
            .get(self.url("/api/albums/deletebyname"))
            .query(&[("name", name)])
            .send()
            .await
            .expect("Delete albums by name request failed")
    }

    // ========================================================================
    // Artist Endpoints
    // ========================================================================

    /// GET /api/artists
    pub async fn get_artists(&self) -> Response {
        self.client
            .get(self.url("/api/artists"))
            .send()
            .await
            .expect("Get artists request failed")
    }

    /// GET /api/artist/{id}
    pub async fn get_artist(&self, id: i64) -> Response {
        self.client
            .get(self.url(&format!("/api/artist/{}", id)))
            .send()
            .await
            .expect("Get artist request failed")
    }

    /// GET /api/artist/{id}/albums
    pub async fn get_artist_albums(&self, id: i64) -> Response {
        self.client
            .get(self.url(&format!("/api/artist/{}/albums", id)))
            .send()
            .await
            .expect("Get artist albums request failed")
    }

    /// POST /api/artist
    pub async fn save_artist(&self, artist: &Value) -> Response {
        self.client
            .post(self.url("/api/artist"))
            .json(artist)
            .send()
            .await
            .expect("Save artist request failed")
    }

    /// DELETE /api/artist/{id}
    pub async fn delete_artist(&self, id: i64) -> Response {
        self.client
            .delete(self.url(&format!("/api/artist/{}", id)))
            .send()
            .await
            .expect("Delete artist request failed")
    }

    /// GET /api/artistlookup?search=
    pub async fn artist_lookup(&self, search: &str) -> Response {
        self.client
            .get(self.url("/api/artistlookup"))
            .query(&[("search", search)])
            .send()
            .await
            .expect("Artist lookup request failed")
    }
}
