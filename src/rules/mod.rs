pub mod parser;

pub use parser::{SkipReason, SkippedToken};

use std::fmt;

use tracing::debug;
use url::Url;

use crate::domain::{Rule, SiteDataPolicy};

/// Ordered site-data rules parsed from a comma-separated rule string.
///
/// Immutable once built. Evaluation walks the rules in their original
/// order and the first pattern contained in the hostname decides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    skipped: Vec<SkippedToken>,
}

impl RuleSet {
    /// Build a ruleset from a rule string such as
    /// `-google.com,!bugzilla.gnome.org,+bugs.launchpad.net`.
    ///
    /// Never fails. Malformed tokens are dropped and kept in
    /// [`RuleSet::skipped`] for diagnostics.
    pub fn parse(input: &str) -> Self {
        let parsed = parser::parse_rules(input);

        for skipped in &parsed.skipped {
            debug!(
                position = skipped.position,
                token = %skipped.token,
                reason = %skipped.reason,
                "Skipping malformed site data rule"
            );
        }

        debug!(
            rules = parsed.rules.len(),
            skipped = parsed.skipped.len(),
            "Parsed site data rules"
        );

        RuleSet {
            rules: parsed.rules,
            skipped: parsed.skipped,
        }
    }

    /// Parse an optional setting; `None` behaves as an empty string.
    pub fn parse_opt(input: Option<&str>) -> Self {
        Self::parse(input.unwrap_or_default())
    }

    /// Create an empty rule set.
    pub fn empty() -> Self {
        RuleSet::default()
    }

    /// Verdict for a hostname; `Default` if nothing matches.
    #[inline]
    pub fn evaluate(&self, hostname: &str) -> SiteDataPolicy {
        self.matching_rule(hostname)
            .map(Rule::policy)
            .unwrap_or(SiteDataPolicy::Default)
    }

    /// The rule that decides the verdict for a hostname.
    pub fn matching_rule(&self, hostname: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(hostname))
    }

    /// Verdict for a full URI, evaluated against its host.
    ///
    /// `url` stores internationalized hosts in punycode; the host is
    /// mapped back to Unicode so `+ü.example` matches `https://ü.example/`.
    /// Inputs that do not parse as a URL, or carry no host
    /// (`about:blank`, `data:`), are evaluated verbatim.
    pub fn evaluate_uri(&self, uri: &str) -> SiteDataPolicy {
        match Url::parse(uri) {
            Ok(url) => match url.host_str() {
                Some(host) => self.evaluate(&unicode_host(host)),
                None => self.evaluate(uri),
            },
            Err(_) => self.evaluate(uri),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Tokens dropped during parsing.
    pub fn skipped(&self) -> &[SkippedToken] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Undo IDNA ASCII encoding of a host; plain ASCII hosts pass through.
fn unicode_host(host: &str) -> String {
    if !host.contains("xn--") {
        return host.to_string();
    }

    let (unicode, result) = idna::domain_to_unicode(host);
    match result {
        Ok(()) => unicode,
        Err(_) => host.to_string(),
    }
}

/// Writes the accepted rules back as a rule string, without skipped tokens.
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}
