//! Static identity store plugin module.

use std::sync::Arc;

use authn_bridge_sdk::IdentityStore;
use tracing::{info, warn};

use crate::config::StaticIdentityPluginConfig;
use crate::domain::StaticIdentityStore;

/// Static identity store plugin module.
///
/// Serves identity records from configuration. The store is handed to the
/// `AuthN` bridge as its [`IdentityStore`].
pub struct StaticIdentityPlugin {
    store: Arc<StaticIdentityStore>,
}

impl StaticIdentityPlugin {
    /// Build the store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured username is blank.
    #[tracing::instrument(skip_all, fields(identity_count = cfg.identities.len()))]
    pub fn init(cfg: &StaticIdentityPluginConfig) -> anyhow::Result<Self> {
        info!("Initializing static_identity_plugin");

        if let Some(pos) = cfg.identities.iter().position(|i| i.username.trim().is_empty()) {
            anyhow::bail!("identities[{pos}].username must not be blank");
        }
        if cfg.identities.iter().any(|i| i.password.is_some()) {
            warn!(
                "Static identity plugin holds plaintext passwords from configuration. \
                 Do NOT use it in production."
            );
        }

        let store = Arc::new(StaticIdentityStore::from_config(cfg));
        info!(records = store.len(), "Static identity plugin initialized");

        Ok(Self { store })
    }

    /// The store as seen by the `AuthN` bridge.
    #[must_use]
    pub fn client(&self) -> Arc<dyn IdentityStore> {
        self.store.clone()
    }
}
