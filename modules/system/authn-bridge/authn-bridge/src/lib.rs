//! `AuthN` Bridge Module
//!
//! Reconciles the external authentication subsystem's current principal with
//! the request-scoped [`SecurityContext`](warden_security::SecurityContext):
//!
//! - [`ContextLifecycleManager`] binds a context at request start and releases it at the end
//! - [`SubsystemBridge`] reads the ambient principal in this system's vocabulary
//! - [`ForcedAuthenticator`] installs a principal without credential verification
//! - [`UserDetailsResolver`] and [`DirectoryAuthenticator`] map stored identities to principals
//! - [`AuthNBridgeModule`] wires everything from [`AuthNBridgeConfig`]
//!
//! ## Usage
//!
//! ```ignore
//! let module = AuthNBridgeModule::init(&cfg, identity_store)?;
//! let lifecycle = module.lifecycle();
//!
//! request_scope(session_authentication, async move {
//!     lifecycle
//!         .run(&request_id, async { handle(request).await })
//!         .await
//! })
//! .await
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use config::{AuthNBridgeConfig, PrincipalNameConfig};
pub use domain::{
    AuthorityCallback, AuthoritySource, ContextLifecycleManager, DirectoryAuthenticator,
    ForcedAuthenticator, PasswordCallback, PasswordSource, PrincipalNameNormalizer, RequestScope,
    SubsystemBridge, TaskLocalAuthenticationStore, UserDetailsResolver, request_scope,
};
pub use module::AuthNBridgeModule;
