//! `AuthN` bridge module.

use std::sync::Arc;

use authn_bridge_sdk::{AuthenticationBridge, AuthenticationStore, IdentityStore};
use tracing::info;
use warden_security::{ExecutionContext, TaskLocalExecutionContext};

use crate::config::AuthNBridgeConfig;
use crate::domain::{
    AuthoritySource, ContextLifecycleManager, DirectoryAuthenticator, ForcedAuthenticator,
    PasswordSource, PrincipalNameNormalizer, SubsystemBridge, TaskLocalAuthenticationStore,
    UserDetailsResolver,
};

/// `AuthN` bridge module.
///
/// This module:
/// 1. Validates the configuration
/// 2. Creates the task-local execution context and ambient authentication store
/// 3. Wires the bridge, lifecycle manager and authenticators on top of the
///    given identity store
///
/// Every component is exposed as a shared handle for the request boundary
/// and application services.
pub struct AuthNBridgeModule {
    execution: Arc<dyn ExecutionContext>,
    store: Arc<dyn AuthenticationStore>,
    bridge: Arc<dyn AuthenticationBridge>,
    lifecycle: Arc<ContextLifecycleManager>,
    forced: Arc<ForcedAuthenticator>,
    resolver: Arc<UserDetailsResolver>,
    directory: Arc<DirectoryAuthenticator>,
}

impl AuthNBridgeModule {
    /// Wire the module with default authority and password sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent.
    pub fn init(
        cfg: &AuthNBridgeConfig,
        identities: Arc<dyn IdentityStore>,
    ) -> anyhow::Result<Self> {
        Self::init_with(
            cfg,
            identities,
            AuthoritySource::default(),
            PasswordSource::default(),
        )
    }

    /// Wire the module with custom authority and password sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent.
    #[tracing::instrument(skip_all, fields(domain))]
    pub fn init_with(
        cfg: &AuthNBridgeConfig,
        identities: Arc<dyn IdentityStore>,
        authorities: AuthoritySource,
        passwords: PasswordSource,
    ) -> anyhow::Result<Self> {
        let names = &cfg.principal_name;
        if let Some(domain) = &names.domain {
            tracing::Span::current().record("domain", domain.as_str());
            if names.separator.is_empty() {
                anyhow::bail!("principal_name.separator must not be empty when a domain is set");
            }
            if domain.trim().is_empty() {
                anyhow::bail!("principal_name.domain must not be blank");
            }
        }
        info!(
            separator = %names.separator,
            case_insensitive_domain = names.case_insensitive_domain,
            "Initializing authn_bridge"
        );

        let execution: Arc<dyn ExecutionContext> = Arc::new(TaskLocalExecutionContext::new());
        let store: Arc<dyn AuthenticationStore> = Arc::new(TaskLocalAuthenticationStore::new());
        let bridge: Arc<dyn AuthenticationBridge> = Arc::new(SubsystemBridge::new(store.clone()));

        let lifecycle = Arc::new(ContextLifecycleManager::new(
            execution.clone(),
            bridge.clone(),
            identities.clone(),
        ));
        let forced = Arc::new(ForcedAuthenticator::new(store.clone()));
        let resolver = Arc::new(
            UserDetailsResolver::new(identities)
                .with_authority_source(authorities)
                .with_password_source(passwords),
        );
        let directory = Arc::new(DirectoryAuthenticator::new(
            PrincipalNameNormalizer::from_config(names),
            resolver.clone(),
            store.clone(),
        ));

        info!("AuthN bridge initialized");

        Ok(Self {
            execution,
            store,
            bridge,
            lifecycle,
            forced,
            resolver,
            directory,
        })
    }

    #[must_use]
    pub fn execution(&self) -> Arc<dyn ExecutionContext> {
        self.execution.clone()
    }

    #[must_use]
    pub fn authentication_store(&self) -> Arc<dyn AuthenticationStore> {
        self.store.clone()
    }

    #[must_use]
    pub fn bridge(&self) -> Arc<dyn AuthenticationBridge> {
        self.bridge.clone()
    }

    #[must_use]
    pub fn lifecycle(&self) -> Arc<ContextLifecycleManager> {
        self.lifecycle.clone()
    }

    #[must_use]
    pub fn forced(&self) -> Arc<ForcedAuthenticator> {
        self.forced.clone()
    }

    #[must_use]
    pub fn resolver(&self) -> Arc<UserDetailsResolver> {
        self.resolver.clone()
    }

    #[must_use]
    pub fn directory(&self) -> Arc<DirectoryAuthenticator> {
        self.directory.clone()
    }
}
