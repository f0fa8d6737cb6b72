//! Programmatic authentication without credential verification.

use std::sync::Arc;

use authn_bridge_sdk::{
    AuthBridgeError, Authentication, AuthenticationStore, Principal, UserDetails,
    to_external_form,
};
use secrecy::SecretString;
use tracing::{debug, info};

/// Installs principals into the ambient [`AuthenticationStore`] directly.
///
/// Intended for trusted in-process callers (batch jobs, tests, already
/// verified logins). It never binds a security context; the lifecycle
/// manager picks the new principal up on its next `begin`.
pub struct ForcedAuthenticator {
    store: Arc<dyn AuthenticationStore>,
}

impl ForcedAuthenticator {
    #[must_use]
    pub fn new(store: Arc<dyn AuthenticationStore>) -> Self {
        Self { store }
    }

    /// Install `login` with `roles` as the current principal, replacing any
    /// previous one. Roles are passed through as given.
    ///
    /// # Errors
    ///
    /// - `EmptyLogin` if `login` is blank; nothing is installed
    /// - `NoRequestScope` if the caller runs outside a request scope
    pub fn force_authenticate<S: AsRef<str>>(
        &self,
        login: &str,
        credential: impl Into<SecretString>,
        roles: &[S],
    ) -> Result<(), AuthBridgeError> {
        if login.trim().is_empty() {
            return Err(AuthBridgeError::EmptyLogin);
        }

        let credential = credential.into();
        let authorities = to_external_form(roles);
        let user = UserDetails::new(login, credential.clone(), authorities);

        let authentication = Authentication::for_user(user).with_credentials(credential);
        if !self.store.set_authentication(Some(authentication)) {
            return Err(AuthBridgeError::NoRequestScope);
        }

        info!(login, roles = roles.len(), "principal force-authenticated");
        Ok(())
    }

    /// Clear the ambient authentication, returning the username logged out.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if nothing is installed
    /// - `InvalidPrincipalType` if the principal is not a user
    ///
    /// The ambient state is left as is on error.
    pub fn logout(&self) -> Result<String, AuthBridgeError> {
        let auth = self
            .store
            .authentication()
            .ok_or_else(|| AuthBridgeError::Unauthenticated("no principal to log out".to_owned()))?;

        let username = match auth.principal() {
            Principal::User(user) => user.username().to_owned(),
            other => {
                return Err(AuthBridgeError::InvalidPrincipalType {
                    kind: other.kind().to_owned(),
                });
            }
        };

        self.store.clear();
        debug!(username = %username, "principal logged out");
        Ok(username)
    }
}
