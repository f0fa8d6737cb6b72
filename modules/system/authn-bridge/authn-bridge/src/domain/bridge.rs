//! Bridge between the ambient authentication and this system's role model.

use std::sync::Arc;

use authn_bridge_sdk::{
    AuthBridgeError, AuthenticationBridge, AuthenticationStore, Principal, UserDetails,
    to_role_names,
};

/// [`AuthenticationBridge`] reading an [`AuthenticationStore`].
pub struct SubsystemBridge {
    store: Arc<dyn AuthenticationStore>,
}

impl SubsystemBridge {
    #[must_use]
    pub fn new(store: Arc<dyn AuthenticationStore>) -> Self {
        Self { store }
    }
}

impl AuthenticationBridge for SubsystemBridge {
    fn current_principal_name(&self) -> Result<Option<String>, AuthBridgeError> {
        let Some(auth) = self.store.authentication() else {
            return Ok(None);
        };

        let name = match auth.principal() {
            Principal::User(user) => user.username(),
            Principal::Named(name) => name.as_str(),
            Principal::Unsupported { kind } => {
                return Err(AuthBridgeError::InvalidPrincipalType { kind: kind.clone() });
            }
        };

        if name.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(name.to_owned()))
    }

    fn current_principal_roles(&self) -> Vec<String> {
        self.store
            .authentication()
            .map(|auth| to_role_names(auth.authorities()))
            .unwrap_or_default()
    }

    fn current_user_details(&self) -> Option<UserDetails> {
        let auth = self.store.authentication()?;
        match auth.principal() {
            Principal::User(user) => Some(user.clone()),
            Principal::Named(_) | Principal::Unsupported { .. } => None,
        }
    }
}
