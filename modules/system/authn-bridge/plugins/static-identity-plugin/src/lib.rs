#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static Identity Store Plugin
//!
//! This plugin provides an in-memory [`IdentityStore`](authn_bridge_sdk::IdentityStore)
//! filled from configuration, for development and testing.
//!
//! Lookups are exact (case-sensitive). A username configured more than once
//! resolves to `Ambiguous`.
//!
//! ## Configuration
//!
//! ```yaml
//! static_identity_plugin:
//!   identities:
//!     - id: "11111111-6a88-4768-9dfc-6bcd5187d9ed"
//!       username: alice
//!       password: changeit
//!       roles: ["User", "Manager"]
//!     - username: bob
//!       roles: ["User"]
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use module::StaticIdentityPlugin;
