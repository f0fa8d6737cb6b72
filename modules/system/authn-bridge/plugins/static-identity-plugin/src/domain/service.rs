//! Service implementation for the static identity store plugin.

use std::collections::HashMap;
use std::sync::Arc;

use authn_bridge_sdk::IdentityStoreError;
use secrecy::SecretString;
use warden_security::{Identity, Role};

use crate::config::{IdentityConfig, StaticIdentityPluginConfig};

/// In-memory identity store.
///
/// Records are grouped by username so duplicates stay observable as
/// `Ambiguous` instead of silently shadowing each other.
pub struct StaticIdentityStore {
    by_username: HashMap<String, Vec<Arc<Identity>>>,
}

impl StaticIdentityStore {
    /// Create a store from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticIdentityPluginConfig) -> Self {
        let mut by_username: HashMap<String, Vec<Arc<Identity>>> = HashMap::new();
        for record in &cfg.identities {
            by_username
                .entry(record.username.clone())
                .or_default()
                .push(Arc::new(build_identity(record)));
        }
        Self { by_username }
    }

    /// Number of configured records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_username.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_username.is_empty()
    }

    /// Find the unique identity named `username`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record matches
    /// - `Ambiguous` if several records match
    pub fn find(&self, username: &str) -> Result<Arc<Identity>, IdentityStoreError> {
        match self.by_username.get(username).map(Vec::as_slice) {
            Some([identity]) => Ok(identity.clone()),
            Some(matches) if !matches.is_empty() => Err(IdentityStoreError::Ambiguous {
                username: username.to_owned(),
                matches: matches.len(),
            }),
            _ => Err(IdentityStoreError::NotFound {
                username: username.to_owned(),
            }),
        }
    }
}

fn build_identity(record: &IdentityConfig) -> Identity {
    let roles = record.roles.iter().map(Role::new).collect();
    let identity = Identity::new(record.id, record.username.as_str()).with_roles(roles);
    match &record.password {
        Some(password) => identity.with_password(SecretString::from(password.clone())),
        None => identity,
    }
}
