//! Tourgate HTTP API
//!
//! This crate provides the Axum router for Tourgate: registration and login,
//! the authenticated `/api/me` endpoint, and the HTML pages with their static
//! assets.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiSettings, AppState};
