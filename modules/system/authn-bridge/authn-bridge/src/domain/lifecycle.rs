//! Per-request security context lifecycle.

use std::future::Future;
use std::sync::Arc;

use authn_bridge_sdk::{AuthBridgeError, AuthenticationBridge, IdentityStore};
use tracing::{debug, warn};
use warden_security::{ExecutionContext, Identity, SecurityContext};

/// Binds a [`SecurityContext`] built from the ambient principal when a
/// request starts and releases it when the request ends.
///
/// Each logical request goes `UNBOUND -> BOUND -> UNBOUND`. Prefer
/// [`ContextLifecycleManager::run`], which releases on every exit path.
pub struct ContextLifecycleManager {
    execution: Arc<dyn ExecutionContext>,
    bridge: Arc<dyn AuthenticationBridge>,
    identities: Arc<dyn IdentityStore>,
}

impl ContextLifecycleManager {
    #[must_use]
    pub fn new(
        execution: Arc<dyn ExecutionContext>,
        bridge: Arc<dyn AuthenticationBridge>,
        identities: Arc<dyn IdentityStore>,
    ) -> Self {
        Self {
            execution,
            bridge,
            identities,
        }
    }

    /// Build and bind the context for `request_id`, replacing any previous
    /// binding of this request.
    ///
    /// Identity lookup failures are logged and leave a role-only context.
    ///
    /// # Errors
    ///
    /// - `InvalidPrincipalType` if the ambient principal is unsupported; the
    ///   request is left unbound
    /// - `NoRequestScope` if called outside a request scope
    #[tracing::instrument(skip_all, fields(request_id = %request_id))]
    pub async fn begin(&self, request_id: &str) -> Result<Arc<SecurityContext>, AuthBridgeError> {
        let principal = match self.bridge.current_principal_name() {
            Ok(principal) => principal,
            Err(e) => {
                self.execution.unbind();
                warn!(error = %e, "cannot read the ambient principal; request left unbound");
                return Err(e);
            }
        };

        let mut builder =
            SecurityContext::builder(request_id).roles(self.bridge.current_principal_roles());

        if let Some(name) = principal {
            match self.identities.find_by_username(&name).await {
                Ok(identity) => {
                    builder = builder.username(identity.username()).identity(identity);
                }
                Err(e) => {
                    warn!(
                        principal = %name,
                        error = %e,
                        "identity lookup failed; binding role-only context"
                    );
                }
            }
        }

        let context = Arc::new(builder.build());
        if self.execution.bind_shared(Some(context.clone())).is_none() {
            warn!("no request scope to bind the security context to");
            return Err(AuthBridgeError::NoRequestScope);
        }

        debug!(
            username = context.effective_username(),
            roles = ?context.roles(),
            "security context bound"
        );
        Ok(context)
    }

    /// Release the calling request's binding. Safe to call repeatedly.
    pub fn end(&self) {
        self.execution.unbind();
        debug!("security context released");
    }

    /// Run `fut` between `begin` and `end`.
    ///
    /// The binding is released when `fut` completes, panics, or is dropped.
    ///
    /// # Errors
    ///
    /// Same as [`ContextLifecycleManager::begin`]; `fut` is not polled then.
    pub async fn run<F>(&self, request_id: &str, fut: F) -> Result<F::Output, AuthBridgeError>
    where
        F: Future,
    {
        let _release = ReleaseGuard { manager: self };
        self.begin(request_id).await?;
        Ok(fut.await)
    }

    /// The context bound for the calling request.
    #[must_use]
    pub fn current(&self) -> Option<Arc<SecurityContext>> {
        self.execution.current()
    }

    /// Identity of the current principal, for operations that cannot run
    /// anonymously.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if there is no principal or no unique identity for it
    /// - `InvalidPrincipalType`, `DataAccessFault` as raised underneath
    pub async fn require_identity(&self) -> Result<Arc<Identity>, AuthBridgeError> {
        if let Some(identity) = self.current().and_then(|ctx| ctx.identity().cloned()) {
            return Ok(identity);
        }

        let name = self.bridge.current_principal_name()?.ok_or_else(|| {
            AuthBridgeError::Unauthenticated("no authenticated principal".to_owned())
        })?;

        match self.identities.find_by_username(&name).await {
            Ok(identity) => Ok(identity),
            Err(e) => match AuthBridgeError::from(e) {
                AuthBridgeError::IdentityNotFound { username } => {
                    Err(AuthBridgeError::Unauthenticated(format!(
                        "no unique identity for '{username}'"
                    )))
                }
                other => Err(other),
            },
        }
    }
}

struct ReleaseGuard<'a> {
    manager: &'a ContextLifecycleManager,
}

impl Drop for ReleaseGuard<'_> {
    fn drop(&mut self) {
        self.manager.end();
    }
}
