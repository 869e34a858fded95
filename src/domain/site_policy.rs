use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict for whether a site may keep persistent data.
///
/// `Default` means no rule matched; callers resolve it against their
/// global fallback (usually `Accept`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum SiteDataPolicy {
    /// No rule matched
    #[default]
    Default = 0,
    /// Site data is allowed
    Accept = 1,
    /// Site data is rejected
    Block = 2,
    /// Site data is allowed and survives a global clear
    Preserve = 3,
}

impl SiteDataPolicy {
    /// Returns true if no rule decided this verdict.
    #[inline]
    pub fn is_default(&self) -> bool {
        *self == SiteDataPolicy::Default
    }

    /// Returns true if the site may store data.
    #[inline]
    pub fn allows_data(&self) -> bool {
        matches!(self, SiteDataPolicy::Accept | SiteDataPolicy::Preserve)
    }

    /// Returns true if the site's data must be kept by a clear pass.
    #[inline]
    pub fn survives_clear(&self) -> bool {
        *self == SiteDataPolicy::Preserve
    }

    /// Resolves `Default` to the given fallback, leaving decided verdicts alone.
    #[inline]
    pub fn or(self, fallback: Self) -> Self {
        if self.is_default() {
            fallback
        } else {
            self
        }
    }

    /// Parse from string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DEFAULT" => Some(SiteDataPolicy::Default),
            "ACCEPT" => Some(SiteDataPolicy::Accept),
            "BLOCK" => Some(SiteDataPolicy::Block),
            "PRESERVE" => Some(SiteDataPolicy::Preserve),
            _ => None,
        }
    }
}

impl fmt::Display for SiteDataPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteDataPolicy::Default => write!(f, "DEFAULT"),
            SiteDataPolicy::Accept => write!(f, "ACCEPT"),
            SiteDataPolicy::Block => write!(f, "BLOCK"),
            SiteDataPolicy::Preserve => write!(f, "PRESERVE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_default() {
        assert_eq!(SiteDataPolicy::default(), SiteDataPolicy::Default);
        assert!(SiteDataPolicy::Default.is_default());
        assert!(!SiteDataPolicy::Block.is_default());
    }

    #[test]
    fn test_or_resolves_only_default() {
        assert_eq!(
            SiteDataPolicy::Default.or(SiteDataPolicy::Accept),
            SiteDataPolicy::Accept
        );
        assert_eq!(
            SiteDataPolicy::Block.or(SiteDataPolicy::Accept),
            SiteDataPolicy::Block
        );
        assert_eq!(
            SiteDataPolicy::Preserve.or(SiteDataPolicy::Block),
            SiteDataPolicy::Preserve
        );
    }

    #[test]
    fn test_data_helpers() {
        assert!(SiteDataPolicy::Accept.allows_data());
        assert!(SiteDataPolicy::Preserve.allows_data());
        assert!(!SiteDataPolicy::Block.allows_data());
        assert!(SiteDataPolicy::Preserve.survives_clear());
        assert!(!SiteDataPolicy::Accept.survives_clear());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(SiteDataPolicy::from_str("block"), Some(SiteDataPolicy::Block));
        assert_eq!(
            SiteDataPolicy::from_str("PRESERVE"),
            Some(SiteDataPolicy::Preserve)
        );
        assert_eq!(SiteDataPolicy::from_str("allow"), None);
    }

    #[test]
    fn test_policy_serialization() {
        let json = serde_json::to_string(&SiteDataPolicy::Preserve).unwrap();
        assert_eq!(json, "\"PRESERVE\"");

        let parsed: SiteDataPolicy = serde_json::from_str("\"BLOCK\"").unwrap();
        assert_eq!(parsed, SiteDataPolicy::Block);
        assert_eq!(SiteDataPolicy::Accept.to_string(), "ACCEPT");
    }
}
