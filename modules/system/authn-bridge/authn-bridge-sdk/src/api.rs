//! Public API traits of the `AuthN` bridge.

use std::sync::Arc;

use async_trait::async_trait;
use warden_security::Identity;

use crate::error::{AuthBridgeError, IdentityStoreError};
use crate::models::{Authentication, UserDetails};

/// Ambient authentication state of the external authentication subsystem.
///
/// Reads and writes apply to the logical request the caller runs in.
pub trait AuthenticationStore: Send + Sync {
    /// The currently installed authentication, if any.
    fn authentication(&self) -> Option<Arc<Authentication>>;

    /// Install `authentication`, replacing whatever was there. `None` clears.
    ///
    /// Returns `false` if the caller has no request to store it in; the
    /// value is dropped then.
    fn set_authentication(&self, authentication: Option<Authentication>) -> bool;

    fn clear(&self) {
        self.set_authentication(None);
    }
}

/// Read-only view of the external subsystem's current principal, in this
/// system's vocabulary.
///
/// Independent of any bound [`SecurityContext`](warden_security::SecurityContext).
pub trait AuthenticationBridge: Send + Sync {
    /// Name of the currently authenticated principal.
    ///
    /// Blank names count as no principal.
    ///
    /// # Errors
    ///
    /// - `InvalidPrincipalType` if the principal is of an unsupported representation
    fn current_principal_name(&self) -> Result<Option<String>, AuthBridgeError>;

    /// Role names granted to the current principal; empty if none.
    fn current_principal_roles(&self) -> Vec<String>;

    /// The structured user principal, if the current principal is one.
    fn current_user_details(&self) -> Option<UserDetails>;
}

/// Identity record lookup, implemented by the identity store.
///
/// ```ignore
/// let identity = store.find_by_username("alice").await?;
/// ```
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Find the unique identity with the given username.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no identity matches
    /// - `Ambiguous` if several identities match
    /// - `DataAccess` if the backing store fails
    async fn find_by_username(&self, username: &str) -> Result<Arc<Identity>, IdentityStoreError>;
}
