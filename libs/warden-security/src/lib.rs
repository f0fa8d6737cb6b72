#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Request-scoped security context.
//!
//! - [`SecurityContext`] - session id, username, roles and identity of one request
//! - [`ExecutionContext`] - injected holder binding a context to the running request
//! - [`ExecutionContextExt`] - role-set queries over any role collection
//! - [`TaskLocalExecutionContext`] - tokio task-local holder with copy-on-spawn
//! - [`Identity`] / [`Role`] - identity store records referenced by a context

pub mod constants;
pub mod context;
pub mod execution;
pub mod identity;
pub mod prelude;

pub use context::{SecurityContext, SecurityContextBuilder};
pub use execution::{
    ContextSnapshot, ExecutionContext, ExecutionContextExt, TaskLocalExecutionContext,
};
pub use identity::{Identity, Role};
