use secrecy::SecretString;
use uuid::Uuid;

/// A role record as kept by the identity store.
///
/// Authorization never compares role records; the core works on
/// [`Role::name`] only. [`Role::is_same_record`] exists for store-side code.
#[derive(Debug, Clone)]
pub struct Role {
    id: Option<Uuid>,
    name: String,
}

impl Role {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn with_id(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Two role records are the same iff both carry an id and the ids match.
    #[must_use]
    pub fn is_same_record(&self, other: &Role) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

/// An identity (account) record owned by the external identity store.
///
/// A [`SecurityContext`](crate::SecurityContext) only holds a shared
/// reference to it; changes made to the context never write back here.
#[derive(Debug, Clone)]
pub struct Identity {
    id: Option<Uuid>,
    username: String,
    password: Option<SecretString>,
    roles: Vec<Role>,
}

impl Identity {
    #[must_use]
    pub fn new(id: Option<Uuid>, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password: None,
            roles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<SecretString>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> Option<&SecretString> {
        self.password.as_ref()
    }

    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Role names in record order.
    #[must_use]
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name().to_owned()).collect()
    }

    /// Same account iff both ids are present and equal.
    #[must_use]
    pub fn is_same_account(&self, other: &Identity) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn role_records_compare_by_id_only() {
        let id = Uuid::new_v4();
        let a = Role::with_id(id, "Admin");
        let b = Role::with_id(id, "renamed");

        assert!(a.is_same_record(&b));
        assert!(!a.is_same_record(&Role::with_id(Uuid::new_v4(), "Admin")));
    }

    #[test]
    fn role_without_id_is_never_the_same_record() {
        let a = Role::new("Admin");
        let b = Role::new("Admin");

        assert!(!a.is_same_record(&b));
        assert!(!a.is_same_record(&a));
    }

    #[test]
    fn identities_with_equal_ids_are_the_same_account() {
        let id = Uuid::new_v4();
        let a = Identity::new(Some(id), "alice");
        let b = Identity::new(Some(id), "alice-copy");

        assert!(a.is_same_account(&b));
    }

    #[test]
    fn identity_without_id_matches_nothing() {
        let a = Identity::new(None, "alice");
        let b = Identity::new(None, "alice");

        assert!(!a.is_same_account(&b));
        assert!(!a.is_same_account(&a));
        assert!(!Identity::new(Some(Uuid::new_v4()), "bob").is_same_account(&a));
    }

    #[test]
    fn role_names_follow_record_order() {
        let identity = Identity::new(None, "alice")
            .with_roles(vec![Role::new("User"), Role::new("Admin")]);

        assert_eq!(identity.role_names(), vec!["User", "Admin"]);
    }

    #[test]
    fn password_is_redacted_in_debug() {
        let identity = Identity::new(None, "alice").with_password("hunter2".to_owned());

        assert_eq!(
            identity.password().map(ExposeSecret::expose_secret),
            Some("hunter2")
        );
        assert!(!format!("{identity:?}").contains("hunter2"));
    }
}
