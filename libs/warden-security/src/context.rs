use std::sync::Arc;

use crate::constants::ANONYMOUS_USERNAME;
use crate::identity::Identity;

/// `SecurityContext` carries the security-related information of one logical request.
///
/// Built by the lifecycle manager when a request begins and bound through an
/// [`ExecutionContext`](crate::ExecutionContext) for the rest of the request.
/// Once bound it sits behind an `Arc` and is read-only; the setters below
/// only apply to a context that has not been bound yet.
#[derive(Debug, Clone)]
pub struct SecurityContext {
    /// Correlation id of the owning request or session.
    session_id: String,
    /// Login / display name. Independent of [`Self::identity`].
    username: Option<String>,
    /// Role names used for authorization during this request.
    roles: Vec<String>,
    /// Identity store record, shared with the store.
    identity: Option<Arc<Identity>>,
}

impl SecurityContext {
    /// Create a new `SecurityContext` builder for the given session id
    #[must_use]
    pub fn builder(session_id: impl Into<String>) -> SecurityContextBuilder {
        SecurityContextBuilder {
            session_id: session_id.into(),
            username: None,
            roles: Vec::new(),
            identity: None,
        }
    }

    /// Get the session id this context was created for
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the bound username, if any
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Get the bound role names
    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Get the identity record, if one was resolved
    #[must_use]
    pub fn identity(&self) -> Option<&Arc<Identity>> {
        self.identity.as_ref()
    }

    /// The username if non-blank, otherwise [`ANONYMOUS_USERNAME`].
    #[must_use]
    pub fn effective_username(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => ANONYMOUS_USERNAME,
        }
    }

    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub fn set_roles(&mut self, roles: Vec<String>) {
        self.roles = roles;
    }

    pub fn set_identity(&mut self, identity: Option<Arc<Identity>>) {
        self.identity = identity;
    }

    /// Whether `role` case-insensitively matches one of the bound roles.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        role_matches(&self.roles, role)
    }

    /// Whether every role in `roles` is bound. True for an empty input.
    #[must_use]
    pub fn has_all_roles<I, S>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        roles.into_iter().all(|r| self.has_role(r.as_ref()))
    }

    /// Whether at least one role in `roles` is bound. False for an empty input.
    #[must_use]
    pub fn has_any_role<I, S>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        roles.into_iter().any(|r| self.has_role(r.as_ref()))
    }

    /// Whether none of `roles` is bound. True for an empty input.
    #[must_use]
    pub fn has_no_role<I, S>(&self, roles: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        !self.has_any_role(roles)
    }

    /// Whether `candidate` is the same account as the bound identity.
    ///
    /// False when either side is missing or has no id.
    #[must_use]
    pub fn is_same_identity(&self, candidate: Option<&Identity>) -> bool {
        match (self.identity.as_deref(), candidate) {
            (Some(bound), Some(candidate)) => bound.is_same_account(candidate),
            _ => false,
        }
    }
}

pub(crate) fn role_matches(roles: &[String], role: &str) -> bool {
    let wanted = role.to_lowercase();
    roles.iter().any(|r| r.to_lowercase() == wanted)
}

pub struct SecurityContextBuilder {
    session_id: String,
    username: Option<String>,
    roles: Vec<String>,
    identity: Option<Arc<Identity>>,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn username(mut self, username: &str) -> Self {
        self.username = Some(username.to_owned());
        self
    }

    #[must_use]
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn identity(mut self, identity: Arc<Identity>) -> Self {
        self.identity = Some(identity);
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        SecurityContext {
            session_id: self.session_id,
            username: self.username,
            roles: self.roles,
            identity: self.identity,
        }
    }
}
