//! Test doubles for the domain layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use authn_bridge_sdk::{IdentityStore, IdentityStoreError};
use warden_security::Identity;

/// In-memory [`IdentityStore`] counting its lookups.
pub struct MockIdentityStore {
    identities: Vec<Arc<Identity>>,
    failure: Option<String>,
    pub calls: AtomicUsize,
}

impl MockIdentityStore {
    pub fn with(identities: Vec<Identity>) -> Self {
        Self {
            identities: identities.into_iter().map(Arc::new).collect(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::with(Vec::new())
    }

    /// Every lookup fails with `DataAccess(message)`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_owned()),
            ..Self::empty()
        }
    }
}

#[async_trait]
impl IdentityStore for MockIdentityStore {
    async fn find_by_username(&self, username: &str) -> Result<Arc<Identity>, IdentityStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(IdentityStoreError::DataAccess(message.clone()));
        }

        let mut matches = self.identities.iter().filter(|i| i.username() == username);
        match (matches.next(), matches.count()) {
            (Some(identity), 0) => Ok(identity.clone()),
            (Some(_), rest) => Err(IdentityStoreError::Ambiguous {
                username: username.to_owned(),
                matches: rest + 1,
            }),
            (None, _) => Err(IdentityStoreError::NotFound {
                username: username.to_owned(),
            }),
        }
    }
}
