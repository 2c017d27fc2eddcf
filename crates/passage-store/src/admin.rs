//! Administrator account operations.
//!
//! The account is created and repaired at startup and mutated only through
//! the credential-change flow. There is always exactly one row.

use thiserror::Error;

use crate::{Store, StoreError};
use passage_core::credentials::{
    self, DEFAULT_PASSWORD, DEFAULT_USERNAME, DIGEST_LEN, LEGACY_BAD_DIGEST,
};

/// Failures from the credential-change flow.
///
/// The display strings double as the user-facing messages, so callers can
/// surface them directly.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// A constraint on the submitted credentials was not met.
    #[error("{0}")]
    Validation(String),

    /// The supplied current password did not verify.
    #[error("Current password is incorrect!")]
    InvalidCredential,

    /// No administrator row exists.
    #[error("No admin account found!")]
    MissingAccount,

    /// The storage layer failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ensure exactly one valid administrator row exists.
///
/// Safe to run on every startup: a missing row is created with the default
/// credentials, and a stored password that is not a 64-character digest (or
/// matches the digest a broken earlier build wrote) is reset to the digest
/// of the default password.
pub async fn ensure_admin(store: &dyn Store) -> Result<(), StoreError> {
    match store.find_admin().await? {
        None => {
            store
                .insert_admin(DEFAULT_USERNAME, &credentials::digest(DEFAULT_PASSWORD))
                .await?;
            tracing::info!(username = DEFAULT_USERNAME, "created default admin account");
        }
        Some(admin)
            if admin.password.len() != DIGEST_LEN || admin.password == LEGACY_BAD_DIGEST =>
        {
            store
                .reset_admin_password(admin.id, &credentials::digest(DEFAULT_PASSWORD))
                .await?;
            tracing::warn!(username = %admin.username, "repaired invalid admin password digest");
        }
        Some(admin) => {
            tracing::debug!(username = %admin.username, "admin account ok");
        }
    }
    Ok(())
}

/// Change the administrator credentials after verifying the current password.
///
/// Returns the new username so callers can update any live session.
pub async fn change_credentials(
    store: &dyn Store,
    current_password: &str,
    new_username: &str,
    new_password: &str,
) -> Result<String, CredentialError> {
    if current_password.is_empty() {
        return Err(CredentialError::Validation(
            "Current password is required!".to_string(),
        ));
    }
    let new_username = new_username.trim();
    if new_username.len() < 3 {
        return Err(CredentialError::Validation(
            "Username must be at least 3 characters!".to_string(),
        ));
    }
    if new_password.len() < 6 {
        return Err(CredentialError::Validation(
            "Password must be at least 6 characters!".to_string(),
        ));
    }

    let admin = store
        .find_admin()
        .await?
        .ok_or(CredentialError::MissingAccount)?;
    if !credentials::verify(current_password, &admin.password) {
        return Err(CredentialError::InvalidCredential);
    }

    store
        .update_admin_credentials(admin.id, new_username, &credentials::digest(new_password))
        .await?;
    tracing::info!(username = new_username, "admin credentials updated");
    Ok(new_username.to_string())
}
