//! Resolution of stored identities into user principals.

use std::sync::Arc;

use authn_bridge_sdk::{
    AuthBridgeError, IdentityStore, IdentityStoreError, UserDetails, to_external_form,
};
use secrecy::SecretString;
use tracing::{debug, info};

/// Callback producing role names for a login; `None` falls back to the identity's roles.
pub type AuthorityCallback = Arc<dyn Fn(&str) -> Option<Vec<String>> + Send + Sync>;

/// Callback producing a password for a login; `None` falls back to the identity's password.
pub type PasswordCallback = Arc<dyn Fn(&str) -> Option<SecretString> + Send + Sync>;

/// Where granted authorities come from.
#[derive(Clone, Default)]
pub enum AuthoritySource {
    /// Role names of the identity record.
    #[default]
    IdentityRoles,
    Custom(AuthorityCallback),
}

/// Where the principal's password comes from.
#[derive(Clone, Default)]
pub enum PasswordSource {
    /// Password of the identity record; empty when it has none.
    #[default]
    IdentityPassword,
    Custom(PasswordCallback),
}

/// Loads [`UserDetails`] for a login from the identity store.
pub struct UserDetailsResolver {
    identities: Arc<dyn IdentityStore>,
    authorities: AuthoritySource,
    passwords: PasswordSource,
}

impl UserDetailsResolver {
    #[must_use]
    pub fn new(identities: Arc<dyn IdentityStore>) -> Self {
        Self {
            identities,
            authorities: AuthoritySource::default(),
            passwords: PasswordSource::default(),
        }
    }

    #[must_use]
    pub fn with_authority_source(mut self, source: AuthoritySource) -> Self {
        self.authorities = source;
        self
    }

    #[must_use]
    pub fn with_password_source(mut self, source: PasswordSource) -> Self {
        self.passwords = source;
        self
    }

    /// Load the user principal for `login`.
    ///
    /// # Errors
    ///
    /// - `EmptyLogin` if `login` is blank; the store is not queried
    /// - `IdentityNotFound` if no unique identity matches
    /// - `DataAccessFault` if the store fails
    pub async fn load_user_by_username(&self, login: &str) -> Result<UserDetails, AuthBridgeError> {
        if login.trim().is_empty() {
            return Err(AuthBridgeError::EmptyLogin);
        }

        debug!(login, "Security verification for user");

        let identity = self
            .identities
            .find_by_username(login)
            .await
            .map_err(|e| log_and_convert(login, e))?;

        let roles = match &self.authorities {
            AuthoritySource::Custom(source) => source(login),
            AuthoritySource::IdentityRoles => None,
        }
        .unwrap_or_else(|| identity.role_names());

        let password = match &self.passwords {
            PasswordSource::Custom(source) => source(login),
            PasswordSource::IdentityPassword => None,
        }
        .or_else(|| identity.password().cloned())
        .unwrap_or_else(|| SecretString::from(String::new()));

        Ok(UserDetails::new(login, password, to_external_form(&roles)))
    }
}

fn log_and_convert(login: &str, e: IdentityStoreError) -> AuthBridgeError {
    info!(login, error = %e, "account could not be resolved");
    e.into()
}
