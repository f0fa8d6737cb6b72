//! Domain layer for the `AuthN` bridge.

pub mod ambient;
pub mod bridge;
pub mod directory;
pub mod forced;
pub mod lifecycle;
pub mod principal_name;
pub mod resolver;

pub use ambient::{RequestScope, TaskLocalAuthenticationStore, request_scope};
pub use bridge::SubsystemBridge;
pub use directory::DirectoryAuthenticator;
pub use forced::ForcedAuthenticator;
pub use lifecycle::ContextLifecycleManager;
pub use principal_name::PrincipalNameNormalizer;
pub use resolver::{
    AuthorityCallback, AuthoritySource, PasswordCallback, PasswordSource, UserDetailsResolver,
};

#[cfg(test)]
pub(crate) mod test_support;
