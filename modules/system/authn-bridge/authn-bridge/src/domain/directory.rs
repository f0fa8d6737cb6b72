//! Authentication of principals already verified by an external directory.

use std::sync::Arc;

use authn_bridge_sdk::{AuthBridgeError, Authentication, AuthenticationStore};
use tracing::{info, warn};

use super::principal_name::PrincipalNameNormalizer;
use super::resolver::UserDetailsResolver;

/// Maps a directory principal such as `CORP\alice` to a local user and
/// installs it as the ambient authentication.
///
/// The directory handshake is not performed here; callers pass the name the
/// directory has already verified.
pub struct DirectoryAuthenticator {
    normalizer: PrincipalNameNormalizer,
    resolver: Arc<UserDetailsResolver>,
    store: Arc<dyn AuthenticationStore>,
}

impl DirectoryAuthenticator {
    #[must_use]
    pub fn new(
        normalizer: PrincipalNameNormalizer,
        resolver: Arc<UserDetailsResolver>,
        store: Arc<dyn AuthenticationStore>,
    ) -> Self {
        Self {
            normalizer,
            resolver,
            store,
        }
    }

    /// Authenticate `directory_name` and install the result.
    ///
    /// The installed authentication keeps `directory_name` as its details.
    ///
    /// # Errors
    ///
    /// - `EmptyLogin` if nothing is left after stripping the domain
    /// - `Unauthenticated` if no unique local identity matches
    /// - `DataAccessFault` if the identity store fails
    /// - `NoRequestScope` if the caller runs outside a request scope
    pub async fn authenticate(
        &self,
        directory_name: &str,
    ) -> Result<Authentication, AuthBridgeError> {
        let login = self.normalizer.normalize(directory_name);

        let user = match self.resolver.load_user_by_username(login).await {
            Ok(user) => user,
            Err(AuthBridgeError::IdentityNotFound { username }) => {
                warn!(directory_name, "directory principal has no local identity");
                return Err(AuthBridgeError::Unauthenticated(format!(
                    "directory principal '{directory_name}' maps to no unique identity '{username}'"
                )));
            }
            Err(e) => return Err(e),
        };

        let authentication = Authentication::for_user(user).with_details(directory_name);
        if !self.store.set_authentication(Some(authentication.clone())) {
            return Err(AuthBridgeError::NoRequestScope);
        }

        info!(directory_name, login, "directory principal authenticated");
        Ok(authentication)
    }
}
