//! AlbumViewer server library
//!
//! Exposes the catalog, user and HTTP modules to the binaries and to the
//! end-to-end tests.

pub mod catalog_store;
pub mod config;
pub mod controller;
pub mod server;
pub mod sqlite_persistence;
pub mod user;

pub use catalog_store::SqliteCatalogStore;
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use user::{SqliteUserStore, UserManager};
