//! Email and password authentication.
//!
//! Passwords are hashed with Argon2id. Sign-up creates a plain account; the
//! dashboard additionally requires an `admin` role grant, checked by the
//! route guard on every request.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use brand_mappers_core::{AppRole, Email};

use crate::db::{IdentityStore, RepositoryError};
use crate::models::{CurrentUser, User};

/// Shortest accepted password.
pub const MIN_PASSWORD_LENGTH: usize = 6;
/// Longest accepted password.
pub const MAX_PASSWORD_LENGTH: usize = 100;

/// Where a request stands with respect to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// No session.
    Unauthenticated,
    /// Signed in without an admin grant, or the role lookup failed.
    NonAdmin(CurrentUser),
    /// Signed in with an admin grant.
    Admin(CurrentUser),
}

/// Authentication service over an identity store.
pub struct AuthService<'a> {
    identities: &'a dyn IdentityStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(identities: &'a dyn IdentityStore) -> Self {
        Self { identities }
    }

    /// Register a new account with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password length is out of range.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        self.identities
            .create_user(&email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let credentials = self
            .identities
            .find_credentials(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &credentials.password_hash)?;

        Ok(credentials.user)
    }

    /// Resolve the guard state for a session.
    ///
    /// Fails closed: a role lookup error yields `NonAdmin`.
    pub async fn guard_state(&self, current: Option<CurrentUser>) -> GuardState {
        let Some(user) = current else {
            return GuardState::Unauthenticated;
        };

        match self.identities.has_role(user.id, AppRole::Admin).await {
            Ok(true) => GuardState::Admin(user),
            Ok(false) => GuardState::NonAdmin(user),
            Err(e) => {
                tracing::error!(
                    user_id = %user.id,
                    error = %e,
                    "Role lookup failed, treating user as non-admin"
                );
                GuardState::NonAdmin(user)
            }
        }
    }
}

/// Validate password length.
fn validate_password(password: &str) -> Result<(), AuthError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at most {MAX_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
