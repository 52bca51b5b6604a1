//! Registration and login routes

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use tourgate_auth::{
    AuthError, hash_password, token_cookie, verify_against_dummy, verify_password,
};
use tourgate_db::{DbError, NewUser};
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::state::AppState;

use super::types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};

// ==================== Input Validation ====================

/// Minimum allowed password length
const MIN_PASSWORD_LENGTH: usize = 8;

/// Check a registration payload, reporting the first rule it breaks
fn validate_registration(request: &RegisterRequest) -> Result<(), ApiError> {
    if request.username.is_empty() {
        return Err(ApiError::BadRequest("username is empty".to_string()));
    }
    if request.email.is_empty() {
        return Err(ApiError::BadRequest("email is empty".to_string()));
    }
    if request.password.is_empty() {
        return Err(ApiError::BadRequest("password is empty".to_string()));
    }
    if request.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest("password is too short".to_string()));
    }
    Ok(())
}

fn malformed(route: &str, rejection: JsonRejection) -> ApiError {
    warn!("{}: could not decode request body: {}", route, rejection);
    ApiError::MalformedBody(rejection.body_text())
}

// ==================== Auth Routes ====================

/// POST /api/register
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| malformed("register", e))?;

    if let Err(e) = validate_registration(&request) {
        warn!("Registration rejected for '{}': {}", request.username, e);
        return Err(e);
    }

    debug!("Registering user: {}", request.username);

    let password = request.password;
    let password_hash = state
        .bounded_hash("hash password", move || hash_password(&password))
        .await?;

    let user = state
        .bounded_storage(
            "create user",
            state.users.create_user(NewUser {
                name: request.name,
                username: request.username,
                email: request.email,
                password_hash,
            }),
        )
        .await?
        .map_err(|e| {
            error!("Failed to store new user: {}", e);
            ApiError::from(e)
        })?;

    info!("User {} registered ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// POST /api/login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| malformed("login", e))?;

    debug!("Login attempt for user: {}", request.username);

    let lookup = state
        .bounded_storage("find credentials", state.users.find_credentials(&request.username))
        .await?;

    let credentials = match lookup {
        Ok(credentials) => Some(credentials),
        Err(DbError::NotFound(_)) => None,
        Err(e) => {
            error!("Credential lookup for '{}' failed: {}", request.username, e);
            return Err(e.into());
        }
    };

    // Verify even when the user is unknown so both failures take equally long.
    let password = request.password;
    let stored_hash = credentials.as_ref().map(|c| c.password_hash.clone());
    let password_valid = state
        .bounded_hash("verify password", move || match stored_hash {
            Some(hash) => verify_password(&password, &hash),
            None => verify_against_dummy(&password),
        })
        .await?;

    let user_id = match (credentials, password_valid) {
        (Some(credentials), true) => credentials.user_id,
        (None, _) => {
            warn!("Login failed for '{}': unknown user", request.username);
            return Err(AuthError::InvalidCredentials.into());
        }
        (Some(_), false) => {
            warn!("Login failed for '{}': wrong password", request.username);
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let now = Utc::now();
    let token = state.jwt.generate_token_at(&user_id, now).map_err(|e| {
        error!("Failed to issue token for {}: {}", user_id, e);
        ApiError::from(e)
    })?;
    let cookie = token_cookie(
        &token,
        now,
        now + state.jwt.expires_in(),
        state.settings.secure_cookie,
    );

    info!("User {} logged in successfully", request.username);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            message: "User authenticated successfully".to_string(),
            token,
        }),
    ))
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
}
