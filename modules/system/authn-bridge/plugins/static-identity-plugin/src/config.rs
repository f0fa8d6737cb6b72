//! Configuration for the static identity store plugin.

use serde::Deserialize;
use uuid::Uuid;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticIdentityPluginConfig {
    /// Identity records served by the store.
    pub identities: Vec<IdentityConfig>,
}

/// A single identity record.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    /// Record id; records without one never compare equal to another.
    #[serde(default)]
    pub id: Option<Uuid>,

    /// Login name, matched exactly.
    pub username: String,

    /// Stored password, if any.
    #[serde(default)]
    pub password: Option<String>,

    /// Role names granted to the identity.
    #[serde(default)]
    pub roles: Vec<String>,
}
