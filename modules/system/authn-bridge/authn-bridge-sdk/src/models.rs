//! Domain models of the external authentication subsystem.

use secrecy::SecretString;

/// A role in the external subsystem's structured form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrantedAuthority(String);

impl GrantedAuthority {
    #[must_use]
    pub fn new(authority: impl Into<String>) -> Self {
        Self(authority.into())
    }

    #[must_use]
    pub fn authority(&self) -> &str {
        &self.0
    }
}

/// Convert external authorities into plain role names.
///
/// Order and duplicates are kept.
#[must_use]
pub fn to_role_names(authorities: &[GrantedAuthority]) -> Vec<String> {
    authorities
        .iter()
        .map(|a| a.authority().to_owned())
        .collect()
}

/// Convert plain role names into external authorities.
///
/// Inverse of [`to_role_names`]: names are passed through unchanged.
#[must_use]
pub fn to_external_form<S: AsRef<str>>(roles: &[S]) -> Vec<GrantedAuthority> {
    roles
        .iter()
        .map(|r| GrantedAuthority::new(r.as_ref()))
        .collect()
}

/// A user principal: login name, credential and granted authorities.
#[derive(Debug, Clone)]
pub struct UserDetails {
    username: String,
    password: SecretString,
    authorities: Vec<GrantedAuthority>,
    enabled: bool,
}

impl UserDetails {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: SecretString,
        authorities: Vec<GrantedAuthority>,
    ) -> Self {
        Self {
            username: username.into(),
            password,
            authorities,
            enabled: true,
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &SecretString {
        &self.password
    }

    #[must_use]
    pub fn authorities(&self) -> &[GrantedAuthority] {
        &self.authorities
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Identity representation held by the external subsystem.
#[derive(Debug, Clone)]
pub enum Principal {
    /// Structured user principal; the expected representation.
    User(UserDetails),
    /// Bare principal name, e.g. an anonymous marker.
    Named(String),
    /// Any other representation. Reading a name from it is a fault.
    Unsupported { kind: String },
}

impl Principal {
    /// Short label of the representation, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::User(_) => "user",
            Self::Named(_) => "named",
            Self::Unsupported { kind } => kind,
        }
    }
}

/// The external subsystem's ambient authentication.
#[derive(Debug, Clone)]
pub struct Authentication {
    principal: Principal,
    credentials: Option<SecretString>,
    authorities: Vec<GrantedAuthority>,
    details: Option<String>,
}

impl Authentication {
    #[must_use]
    pub fn new(principal: Principal, authorities: Vec<GrantedAuthority>) -> Self {
        Self {
            principal,
            credentials: None,
            authorities,
            details: None,
        }
    }

    /// Authentication for a user principal carrying the user's own authorities.
    #[must_use]
    pub fn for_user(user: UserDetails) -> Self {
        let authorities = user.authorities().to_vec();
        Self::new(Principal::User(user), authorities)
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: SecretString) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    #[must_use]
    pub fn credentials(&self) -> Option<&SecretString> {
        self.credentials.as_ref()
    }

    #[must_use]
    pub fn authorities(&self) -> &[GrantedAuthority] {
        &self.authorities
    }

    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}
