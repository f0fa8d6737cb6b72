//! Ambient authentication state and request scopes.

use std::cell::RefCell;
use std::future::Future;
use std::sync::Arc;

use authn_bridge_sdk::{Authentication, AuthenticationStore};
use tokio::task::JoinHandle;
use tracing::warn;
use warden_security::{ContextSnapshot, ExecutionContext, TaskLocalExecutionContext};

tokio::task_local! {
    static AMBIENT_AUTHENTICATION: RefCell<Option<Arc<Authentication>>>;
}

/// [`AuthenticationStore`] kept in a tokio task-local, one slot per request scope.
///
/// The request boundary seeds it with the session's authentication through
/// [`request_scope`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskLocalAuthenticationStore;

impl TaskLocalAuthenticationStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AuthenticationStore for TaskLocalAuthenticationStore {
    fn authentication(&self) -> Option<Arc<Authentication>> {
        AMBIENT_AUTHENTICATION
            .try_with(|slot| slot.borrow().clone())
            .ok()
            .flatten()
    }

    fn set_authentication(&self, authentication: Option<Authentication>) -> bool {
        let installing = authentication.is_some();
        let stored = AMBIENT_AUTHENTICATION
            .try_with(|slot| slot.replace(authentication.map(Arc::new)))
            .is_ok();
        if installing && !stored {
            warn!("authentication installed outside of a request scope; ignored");
        }
        stored
    }
}

/// Everything a logical request carries: its security context binding and
/// the ambient authentication.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    context: ContextSnapshot,
    authentication: Option<Arc<Authentication>>,
}

impl RequestScope {
    /// A new request: nothing bound, `authentication` installed.
    #[must_use]
    pub fn new(authentication: Option<Authentication>) -> Self {
        Self {
            context: ContextSnapshot::empty(),
            authentication: authentication.map(Arc::new),
        }
    }

    /// Copy of the caller's current request state.
    #[must_use]
    pub fn capture(execution: &dyn ExecutionContext, store: &dyn AuthenticationStore) -> Self {
        Self {
            context: execution.snapshot(),
            authentication: store.authentication(),
        }
    }

    /// Run `fut` inside this scope.
    pub fn run<F>(self, fut: F) -> impl Future<Output = F::Output>
    where
        F: Future,
    {
        AMBIENT_AUTHENTICATION.scope(
            RefCell::new(self.authentication),
            self.context.scope(fut),
        )
    }

    /// Spawn `fut` as a helper task of this request.
    pub fn spawn<F>(self, fut: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        tokio::spawn(self.run(fut))
    }

    /// Spawn a helper task carrying the caller's current request state.
    pub fn spawn_current<F>(fut: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        Self::capture(
            &TaskLocalExecutionContext::new(),
            &TaskLocalAuthenticationStore::new(),
        )
        .spawn(fut)
    }
}

/// Run `fut` as a new logical request whose ambient authentication starts as
/// `authentication`.
pub fn request_scope<F>(
    authentication: Option<Authentication>,
    fut: F,
) -> impl Future<Output = F::Output>
where
    F: Future,
{
    RequestScope::new(authentication).run(fut)
}
