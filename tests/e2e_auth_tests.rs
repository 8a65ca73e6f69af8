//! End-to-end tests for login, logout and the authorization gate

mod common;

use common::{TestClient, TestServer, ALBUM_1_ID, ARTIST_1_ID, TEST_PASS, TEST_USER};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login(TEST_USER, TEST_PASS).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("Missing session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session_token="));
    assert!(cookie.contains("HttpOnly"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["token"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_login_with_invalid_password() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login(TEST_USER, "wrong_password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_nonexistent_user() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login("nonexistent_user", TEST_PASS).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stats_report_login_state() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let stats: Value = client.get_stats().await.json().await.unwrap();
    assert_eq!(stats["loggedIn"], false);
    assert_eq!(stats["catalog"]["albums"], 3);

    client.login(TEST_USER, TEST_PASS).await;
    let stats: Value = client.get_stats().await.json().await.unwrap();
    assert_eq!(stats["loggedIn"], true);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone()).await;

    let response = client.save_artist(&json!({ "name": "Before Logout" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.logout().await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.save_artist(&json!({ "name": "After Logout" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client.logout().await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_token_authorizes_mutations() {
    let server = TestServer::spawn().await;
    let login_client = TestClient::new(server.base_url.clone());
    let body: Value = login_client
        .login(TEST_USER, TEST_PASS)
        .await
        .json()
        .await
        .unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let bare_client = reqwest::Client::new();
    let response = bare_client
        .delete(format!("{}/api/album/{}", server.base_url, ALBUM_1_ID))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<bool>().await.unwrap(), true);

    let response = bare_client
        .delete(format!("{}/api/artist/{}", server.base_url, ARTIST_1_ID))
        .header("Authorization", "not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_anonymous_mutations_are_rejected_with_message() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let responses = vec![
        client
            .save_album(&json!({ "title": "Nope", "artistId": ARTIST_1_ID }))
            .await,
        client.delete_album(ALBUM_1_ID).await,
        client.delete_albums_by_name("First Album").await,
        client.save_artist(&json!({ "name": "Nope" })).await,
        client.delete_artist(ARTIST_1_ID).await,
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "You have to be logged in to modify data");
        assert_eq!(body["statusCode"], 401);
    }

    // Nothing changed
    let albums: Vec<Value> = client.get_albums().await.json().await.unwrap();
    assert_eq!(albums.len(), 3);
    let response = client.get_artist(ARTIST_1_ID).await;
    assert_eq!(response.status(), StatusCode::OK);
}
