//! Configuration for the `AuthN` bridge.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;

/// Prefix of environment variables overriding file configuration.
pub const ENV_PREFIX: &str = "WARDEN_";

/// Configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthNBridgeConfig {
    /// How directory principal names map to local usernames.
    pub principal_name: PrincipalNameConfig,
}

impl AuthNBridgeConfig {
    /// Extract the configuration from an assembled figment.
    ///
    /// # Errors
    ///
    /// Returns an error if a value has the wrong shape or an unknown key is present.
    pub fn from_figment(figment: &Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }

    /// Load from a YAML file, overridden by `WARDEN_PRINCIPAL_NAME__*`
    /// environment variables (`__` separates nested keys). Other
    /// `WARDEN_`-prefixed variables belong to other components and are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the result does not
    /// deserialize.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        let figment = Figment::new()
            .merge(Yaml::file(path))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .split("__")
                    .filter(|key| key.as_str().to_ascii_lowercase().starts_with("principal_name")),
            );
        Self::from_figment(&figment)
    }
}

/// Directory principal name handling, e.g. `CORP\alice` -> `alice`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrincipalNameConfig {
    /// Directory domain to strip. When unset, anything up to the first
    /// separator is stripped.
    pub domain: Option<String>,

    /// Separator between domain and username.
    pub separator: String,

    /// Match `domain` ignoring ASCII case.
    pub case_insensitive_domain: bool,
}

impl Default for PrincipalNameConfig {
    fn default() -> Self {
        Self {
            domain: None,
            separator: "\\".to_owned(),
            case_insensitive_domain: true,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_strip_backslash_domains() {
        let cfg = AuthNBridgeConfig::default();

        assert!(cfg.principal_name.domain.is_none());
        assert_eq!(cfg.principal_name.separator, "\\");
        assert!(cfg.principal_name.case_insensitive_domain);
    }

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = AuthNBridgeConfig::from_figment(&Figment::from(Yaml::string("{}"))).unwrap();

        assert_eq!(cfg.principal_name.separator, "\\");
    }

    #[test]
    fn yaml_overrides_principal_name() {
        let yaml = r"
principal_name:
  domain: CORP
  separator: '/'
  case_insensitive_domain: false
";
        let cfg = AuthNBridgeConfig::from_figment(&Figment::from(Yaml::string(yaml))).unwrap();

        assert_eq!(cfg.principal_name.domain.as_deref(), Some("CORP"));
        assert_eq!(cfg.principal_name.separator, "/");
        assert!(!cfg.principal_name.case_insensitive_domain);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let yaml = "principal_name:\n  domian: CORP\n";

        assert!(AuthNBridgeConfig::from_figment(&Figment::from(Yaml::string(yaml))).is_err());
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("warden.yaml", "principal_name:\n  domain: CORP\n")?;
            jail.set_env("WARDEN_PRINCIPAL_NAME__SEPARATOR", "/");

            let cfg = AuthNBridgeConfig::load("warden.yaml")?;

            assert_eq!(cfg.principal_name.domain.as_deref(), Some("CORP"));
            assert_eq!(cfg.principal_name.separator, "/");
            Ok(())
        });
    }

    #[test]
    fn unrelated_env_vars_are_ignored() {
        Jail::expect_with(|jail| {
            jail.create_file("warden.yaml", "principal_name:\n  domain: CORP\n")?;
            jail.set_env("WARDEN_LOG_LEVEL", "debug");
            jail.set_env("WARDEN_SERVER__PORT", "8080");

            let cfg = AuthNBridgeConfig::load("warden.yaml")?;

            assert_eq!(cfg.principal_name.domain.as_deref(), Some("CORP"));
            assert_eq!(cfg.principal_name.separator, "\\");
            Ok(())
        });
    }
}
