pub use crate::constants::ANONYMOUS_USERNAME;
pub use crate::context::SecurityContext;
pub use crate::execution::{
    ContextSnapshot, ExecutionContext, ExecutionContextExt, TaskLocalExecutionContext,
};
pub use crate::identity::{Identity, Role};
