//! `AuthN` Bridge SDK
//!
//! This crate provides the public API of the `authn_bridge` module:
//!
//! - [`AuthenticationBridge`] - read-only view of the external subsystem's current principal
//! - [`AuthenticationStore`] - ambient authentication state of the external subsystem
//! - [`IdentityStore`] - identity record lookup implemented by storage plugins
//! - [`Authentication`], [`Principal`], [`UserDetails`], [`GrantedAuthority`] - models
//! - [`AuthBridgeError`], [`IdentityStoreError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use authn_bridge_sdk::AuthenticationBridge;
//!
//! let name = bridge.current_principal_name()?;
//! let roles = bridge.current_principal_roles();
//! ```

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::{AuthenticationBridge, AuthenticationStore, IdentityStore};
pub use error::{AuthBridgeError, IdentityStoreError};
pub use models::{
    Authentication, GrantedAuthority, Principal, UserDetails, to_external_form, to_role_names,
};
