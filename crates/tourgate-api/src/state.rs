//! Application state

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tourgate_auth::{AuthError, JwtManager};
use tourgate_db::{DbError, UserStore};

use crate::error::ApiError;

/// Tunables for the HTTP layer
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Add the `Secure` attribute to the token cookie
    pub secure_cookie: bool,
    /// Upper bound for a single user store call
    pub storage_timeout: Duration,
    /// Upper bound for one password hash or verification
    pub hash_timeout: Duration,
    /// Deadline for a whole request
    pub request_timeout: Duration,
    /// Directory holding the HTML pages and `static/`
    pub ui_dir: PathBuf,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            secure_cookie: false,
            storage_timeout: Duration::from_secs(5),
            hash_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            ui_dir: PathBuf::from("./ui"),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub jwt: Arc<JwtManager>,
    pub settings: Arc<ApiSettings>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, jwt: Arc<JwtManager>, settings: ApiSettings) -> Self {
        Self {
            users,
            jwt,
            settings: Arc::new(settings),
        }
    }

    /// Await a user store call under the storage deadline
    ///
    /// The outer error is the deadline; the inner result is the store's own.
    pub async fn bounded_storage<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, DbError>>,
    ) -> Result<Result<T, DbError>, ApiError> {
        tokio::time::timeout(self.settings.storage_timeout, call)
            .await
            .map_err(|_| ApiError::Timeout(operation))
    }

    /// Run a hashing job on the blocking pool under the hashing deadline
    pub async fn bounded_hash<T, F>(&self, operation: &'static str, job: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Result<T, AuthError> + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::task::spawn_blocking(job);
        match tokio::time::timeout(self.settings.hash_timeout, handle).await {
            Ok(Ok(result)) => result.map_err(ApiError::from),
            Ok(Err(join_err)) => Err(ApiError::Internal(format!(
                "{} task failed: {}",
                operation, join_err
            ))),
            Err(_) => Err(ApiError::Timeout(operation)),
        }
    }
}
