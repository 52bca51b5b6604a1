//! Tourgate Authentication
//!
//! Password hashing, JWT issuance and verification, and the cookie-based
//! access gate that protects routes.

pub mod cookie;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use cookie::{TOKEN_COOKIE, extract_cookie, token_cookie};
pub use error::AuthError;
pub use jwt::{Claims, JwtManager};
pub use middleware::{AuthUser, auth_middleware};
pub use password::{hash_password, prepare_dummy_hash, verify_against_dummy, verify_password};
