//! Mapping of directory principal names to local usernames.

use crate::config::PrincipalNameConfig;

/// Strips the directory domain from a principal name, e.g. `CORP\alice` -> `alice`.
#[derive(Debug, Clone)]
pub struct PrincipalNameNormalizer {
    domain: Option<String>,
    separator: String,
    case_insensitive_domain: bool,
}

impl PrincipalNameNormalizer {
    #[must_use]
    pub fn from_config(cfg: &PrincipalNameConfig) -> Self {
        Self {
            domain: cfg.domain.clone(),
            separator: cfg.separator.clone(),
            case_insensitive_domain: cfg.case_insensitive_domain,
        }
    }

    /// Local username for `raw`.
    ///
    /// With a configured domain only `<domain><separator>` is stripped; names
    /// from other domains are returned unchanged. Without one, everything up
    /// to the first separator is stripped.
    #[must_use]
    pub fn normalize<'a>(&self, raw: &'a str) -> &'a str {
        if self.separator.is_empty() {
            return raw;
        }

        match &self.domain {
            Some(domain) => self.strip_domain(raw, domain).unwrap_or(raw),
            None => raw
                .split_once(self.separator.as_str())
                .map_or(raw, |(_, name)| name),
        }
    }

    fn strip_domain<'a>(&self, raw: &'a str, domain: &str) -> Option<&'a str> {
        let head = raw.get(..domain.len())?;
        let matches = if self.case_insensitive_domain {
            head.eq_ignore_ascii_case(domain)
        } else {
            head == domain
        };
        if !matches {
            return None;
        }
        raw[domain.len()..].strip_prefix(self.separator.as_str())
    }
}
