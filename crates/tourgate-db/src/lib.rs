//! Tourgate Database Layer
//!
//! This crate owns the user records of Tourgate. The [`UserStore`] trait is
//! the seam the HTTP layer talks to; [`Database`] implements it on SQLite
//! via sqlx.

pub mod error;
pub mod models;
pub mod repository;
pub mod store;

pub use error::DbError;
pub use models::*;
pub use repository::Database;
pub use store::UserStore;

/// Re-export sqlx types for convenience
pub use sqlx::{Error as SqlxError, SqlitePool};
