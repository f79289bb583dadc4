//! ShareIt - Peer-to-Peer Item Sharing
//!
//! A REST JSON API server where users list items, book each other's items
//! for time windows, and post requests for items not yet listed.

use std::sync::Arc;

pub mod api;
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
