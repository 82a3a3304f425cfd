//! Biblion Library Catalog Server
//!
//! A Rust implementation of the Biblion catalog backend, providing a REST
//! JSON API for managing books, works, authors, publishers, storage
//! locations and staff accounts. Barcode issuance and the location
//! hierarchy rules live in `barcode` and `services::locations`.

use std::sync::Arc;

pub mod api;
pub mod barcode;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
