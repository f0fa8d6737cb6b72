//! Binding of a [`SecurityContext`] to the logical request being processed.
//!
//! Components receive an [`ExecutionContext`] handle instead of reaching for a
//! global. The tokio implementation keeps one slot per request scope in a
//! task-local; tasks started through [`TaskLocalExecutionContext::spawn`] get
//! their own scope seeded with a snapshot of the parent's binding.
//!
//! ```ignore
//! let exec = TaskLocalExecutionContext::new();
//!
//! TaskLocalExecutionContext::scope(async move {
//!     exec.bind(Some(SecurityContext::builder("req-1").roles(["Admin"]).build()));
//!
//!     let helper = exec.spawn(async move { exec.has_role("admin") });
//!     assert!(helper.await?);
//! })
//! .await;
//! ```

use std::cell::RefCell;
use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::warn;

use crate::constants::ANONYMOUS_USERNAME;
use crate::context::SecurityContext;

tokio::task_local! {
    static BOUND_CONTEXT: RefCell<Option<Arc<SecurityContext>>>;
}

/// Holder of the security context bound to the calling logical request.
///
/// Queries never fail: with nothing bound the request has no roles and the
/// username is [`ANONYMOUS_USERNAME`].
pub trait ExecutionContext: Send + Sync {
    /// Replace the binding with an already shared context. `None` unbinds.
    ///
    /// Returns what is bound afterwards.
    fn bind_shared(&self, context: Option<Arc<SecurityContext>>) -> Option<Arc<SecurityContext>>;

    /// The context bound for the calling request, if any.
    fn current(&self) -> Option<Arc<SecurityContext>>;

    /// Replace the binding. `None` is the same as [`Self::unbind`].
    fn bind(&self, context: Option<SecurityContext>) -> Option<Arc<SecurityContext>> {
        self.bind_shared(context.map(Arc::new))
    }

    fn unbind(&self) {
        self.bind_shared(None);
    }

    /// Capture the current binding by value.
    fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            context: self.current(),
        }
    }

    fn current_username(&self) -> String {
        self.current().map_or_else(
            || ANONYMOUS_USERNAME.to_owned(),
            |ctx| ctx.effective_username().to_owned(),
        )
    }

    /// Bound role names; empty when nothing is bound.
    fn current_roles(&self) -> Vec<String> {
        self.current()
            .map(|ctx| ctx.roles().to_vec())
            .unwrap_or_default()
    }

    fn has_role(&self, role: &str) -> bool {
        self.current().is_some_and(|ctx| ctx.has_role(role))
    }
}

/// Role-set queries against the bound context.
///
/// Accepts any collection of role names, so `&["Admin"]` and `Vec<String>`
/// work alike. Implemented for every [`ExecutionContext`], including
/// `dyn ExecutionContext`.
pub trait ExecutionContextExt: ExecutionContext {
    /// `true` if every role is held; vacuously `true` for no roles, even
    /// with nothing bound.
    fn has_all_roles<I, S>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.current() {
            Some(ctx) => ctx.has_all_roles(roles),
            None => roles.into_iter().next().is_none(),
        }
    }

    fn has_any_role<I, S>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.current().is_some_and(|ctx| ctx.has_any_role(roles))
    }

    fn has_no_role<I, S>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.current().is_none_or(|ctx| ctx.has_no_role(roles))
    }
}

impl<E: ExecutionContext + ?Sized> ExecutionContextExt for E {}

/// A by-value copy of a binding, used to seed a new request scope.
#[derive(Debug, Clone, Default)]
pub struct ContextSnapshot {
    context: Option<Arc<SecurityContext>>,
}

impl ContextSnapshot {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn of(context: Arc<SecurityContext>) -> Self {
        Self {
            context: Some(context),
        }
    }

    #[must_use]
    pub fn context(&self) -> Option<&Arc<SecurityContext>> {
        self.context.as_ref()
    }

    /// Run `fut` in a fresh scope whose slot starts with this snapshot.
    pub fn scope<F>(self, fut: F) -> impl Future<Output = F::Output>
    where
        F: Future,
    {
        BOUND_CONTEXT.scope(RefCell::new(self.context), fut)
    }

    /// Blocking counterpart of [`Self::scope`].
    pub fn sync_scope<F, R>(self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        BOUND_CONTEXT.sync_scope(RefCell::new(self.context), f)
    }
}

/// [`ExecutionContext`] backed by a tokio task-local slot.
///
/// Each [`Self::scope`] call owns an independent slot, so requests sharing
/// worker threads never see each other's binding. A plain `tokio::spawn`
/// inherits nothing; use [`Self::spawn`] or [`Self::spawn_blocking`] for
/// helpers that must see the request's context.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskLocalExecutionContext;

impl TaskLocalExecutionContext {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run `fut` as a new logical request with nothing bound.
    pub fn scope<F>(fut: F) -> impl Future<Output = F::Output>
    where
        F: Future,
    {
        ContextSnapshot::empty().scope(fut)
    }

    /// Whether the caller runs inside a request scope.
    #[must_use]
    pub fn in_scope() -> bool {
        BOUND_CONTEXT.try_with(|_| ()).is_ok()
    }

    /// Spawn a task that starts with a copy of the caller's binding.
    pub fn spawn<F>(&self, fut: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        tokio::spawn(self.snapshot().scope(fut))
    }

    /// Blocking counterpart of [`Self::spawn`].
    pub fn spawn_blocking<F, R>(&self, f: F) -> JoinHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let snapshot = self.snapshot();
        tokio::task::spawn_blocking(move || snapshot.sync_scope(f))
    }
}

impl ExecutionContext for TaskLocalExecutionContext {
    fn bind_shared(&self, context: Option<Arc<SecurityContext>>) -> Option<Arc<SecurityContext>> {
        let bound = context.clone();
        if BOUND_CONTEXT.try_with(|slot| slot.replace(context)).is_ok() {
            return bound;
        }
        if let Some(ctx) = bound {
            warn!(
                session_id = %ctx.session_id(),
                "security context bound outside of a request scope; ignored"
            );
        }
        None
    }

    fn current(&self) -> Option<Arc<SecurityContext>> {
        BOUND_CONTEXT
            .try_with(|slot| slot.borrow().clone())
            .ok()
            .flatten()
    }
}
