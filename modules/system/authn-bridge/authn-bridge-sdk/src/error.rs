//! Error types for the `AuthN` bridge module.

use thiserror::Error;

/// Errors raised by an [`IdentityStore`](crate::IdentityStore) implementation.
#[derive(Debug, Error)]
pub enum IdentityStoreError {
    /// No identity matches the username.
    #[error("no identity found for '{username}'")]
    NotFound { username: String },

    /// More than one identity matches the username.
    #[error("{matches} identities found for '{username}'")]
    Ambiguous { username: String, matches: usize },

    /// The backing store failed.
    #[error("data access error: {0}")]
    DataAccess(String),
}

/// Errors that can occur when using the `AuthN` bridge API.
#[derive(Debug, Error)]
pub enum AuthBridgeError {
    /// Zero or several identities match the name.
    #[error("a unique identity for '{username}' could not be found")]
    IdentityNotFound { username: String },

    /// The ambient principal is not of a supported representation.
    #[error("invalid security principal type: {kind}")]
    InvalidPrincipalType { kind: String },

    /// A blank login was supplied.
    #[error("empty login")]
    EmptyLogin,

    /// The identity store failed.
    #[error("data access fault: {0}")]
    DataAccessFault(String),

    /// An operation that needs a resolved identity has none.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// The caller runs outside any request scope; nothing was bound or installed.
    #[error("no request scope is active")]
    NoRequestScope,
}

impl From<IdentityStoreError> for AuthBridgeError {
    fn from(e: IdentityStoreError) -> Self {
        match e {
            IdentityStoreError::NotFound { username }
            | IdentityStoreError::Ambiguous { username, .. } => Self::IdentityNotFound { username },
            IdentityStoreError::DataAccess(msg) => Self::DataAccessFault(msg),
        }
    }
}
