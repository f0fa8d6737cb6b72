//! Client implementation for the static identity store plugin.
//!
//! Implements `IdentityStore` using the domain service.

use std::sync::Arc;

use async_trait::async_trait;
use authn_bridge_sdk::{IdentityStore, IdentityStoreError};
use tracing::debug;
use warden_security::Identity;

use super::service::StaticIdentityStore;

#[async_trait]
impl IdentityStore for StaticIdentityStore {
    async fn find_by_username(&self, username: &str) -> Result<Arc<Identity>, IdentityStoreError> {
        let result = self.find(username);
        if let Err(e) = &result {
            debug!(username, error = %e, "static identity lookup failed");
        }
        result
    }
}
