use anyhow::{Context, Result};
use std::{sync::Arc, time::Duration};

use tracing::{debug, error, info};

use crate::catalog_store::SqliteCatalogStore;
use crate::user::UserManager;
use axum_extra::extract::cookie::{Cookie, SameSite};
use tower_http::services::ServeDir;

use axum::{
    extract::State,
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::album_routes::make_album_routes;
use super::artist_routes::make_artist_routes;
use super::session::{Session, COOKIE_SESSION_TOKEN_KEY};
use super::{log_requests, state::*, ServerConfig};
use crate::controller::ApiError;
use crate::user::auth::AuthTokenValue;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogStats {
    artists: usize,
    albums: usize,
    tracks: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub logged_in: bool,
    pub catalog: CatalogStats,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize)]
struct LoginBody {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
struct LoginSuccessResponse {
    token: String,
}

async fn home(session: Option<Session>, State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        logged_in: session.is_some(),
        catalog: CatalogStats {
            artists: state.catalog_store.get_artists_count(),
            albums: state.catalog_store.get_albums_count(),
            tracks: state.catalog_store.get_tracks_count(),
        },
    };
    Json(stats)
}

async fn login(
    State(user_manager): State<GuardedUserManager>,
    Json(body): Json<LoginBody>,
) -> Response {
    debug!("login() called for {}", body.username);
    let login_result = user_manager
        .lock()
        .unwrap()
        .login(&body.username, &body.password);

    match login_result {
        Ok(Some(auth_token)) => {
            info!("User {} logged in", body.username);
            let cookie = format!(
                "{}={}; Path=/; HttpOnly",
                COOKIE_SESSION_TOKEN_KEY, auth_token.value.0
            );
            let response_body = LoginSuccessResponse {
                token: auth_token.value.0,
            };
            (
                StatusCode::CREATED,
                [(header::SET_COOKIE, cookie)],
                Json(response_body),
            )
                .into_response()
        }
        Ok(None) => {
            info!("Rejected login for {}", body.username);
            ApiError::InvalidCredentials.into_response()
        }
        Err(err) => {
            error!("Login failed for {}: {:#}", body.username, err);
            ApiError::Internal.into_response()
        }
    }
}

async fn logout(State(user_manager): State<GuardedUserManager>, session: Session) -> Response {
    let result = user_manager
        .lock()
        .unwrap()
        .delete_auth_token(session.user_id, &AuthTokenValue(session.token));
    match result {
        Ok(()) => {
            info!("User {} logged out", session.handle);
            let cookie = Cookie::build(Cookie::new(COOKIE_SESSION_TOKEN_KEY, ""))
                .path("/")
                .expires(time::OffsetDateTime::now_utc() - time::Duration::days(1))
                .same_site(SameSite::Lax)
                .build();
            (StatusCode::OK, [(header::SET_COOKIE, cookie.to_string())]).into_response()
        }
        Err(err) => {
            error!("Logout of {} failed: {:#}", session.handle, err);
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

pub fn make_app(
    config: ServerConfig,
    catalog_store: Arc<SqliteCatalogStore>,
    user_manager: UserManager,
) -> Result<Router> {
    let state = ServerState::new(config.clone(), catalog_store, user_manager);

    let account_routes: Router = Router::new()
        .route("/login", post(login))
        .route("/logout", get(logout))
        .with_state(state.clone());

    let api_routes: Router = make_album_routes(state.clone())
        .merge(make_artist_routes(state.clone()))
        .nest("/account", account_routes);

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new().route("/", get(home)).with_state(state.clone()),
    };

    let app: Router = home_router
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests));

    Ok(app)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

pub async fn run_server(
    config: ServerConfig,
    catalog_store: Arc<SqliteCatalogStore>,
    user_manager: UserManager,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, catalog_store, user_manager)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
