//! Credential verification for staff accounts.
//!
//! Passwords are stored as `pbkdf2-sha256$<iterations>$<salt>$<hash>` with a
//! random per-user salt (salt and hash base64-encoded). Token issuance and
//! session management are out of scope — `authenticate` stops at returning
//! the verified user's id and role.

use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rusqlite::Connection;
use serde::Serialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{repository, DatabaseError};
use crate::models::Role;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
const HASH_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;
const SCHEME: &str = "pbkdf2-sha256";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// The identity a successful login resolves to.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
}

/// Hash a password with PBKDF2-HMAC-SHA256 and a fresh random salt.
pub fn hash_password(password: &str) -> String {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    encode_hash(password, &salt, PBKDF2_ITERATIONS)
}

/// Verify a password against a stored hash string. A malformed stored hash
/// verifies as false rather than erroring — the caller cannot distinguish
/// it from a wrong password, which is the intent.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (scheme, iterations, salt, hash) = match (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) {
        (Some(scheme), Some(iters), Some(salt), Some(hash), None) => {
            (scheme, iters, salt, hash)
        }
        _ => return false,
    };
    if scheme != SCHEME {
        return false;
    }
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    let b64 = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let (Ok(salt), Ok(expected)) = (b64.decode(salt), b64.decode(hash)) else {
        return false;
    };

    let mut derived = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, iterations, &mut derived);
    derived.ct_eq(expected.as_slice()).into()
}

/// Resolve a username/password pair to a user id and role.
///
/// Unknown usernames and wrong passwords both surface as
/// `InvalidCredentials` — indistinguishable to the caller.
pub fn authenticate(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<AuthenticatedUser, AuthError> {
    if username.is_empty() {
        return Err(AuthError::MissingField("username"));
    }
    if password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }

    let user = repository::get_user_by_username(conn, username)?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash) {
        tracing::debug!(username, "password verification failed");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(AuthenticatedUser {
        user_id: user.id,
        role: user.role,
    })
}

fn encode_hash(password: &str, salt: &[u8], iterations: u32) -> String {
    let mut hash = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut hash);
    let b64 = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{SCHEME}${iterations}${}${}",
        b64.encode(salt),
        b64.encode(hash)
    )
}
