pub mod config;
pub mod domain;
pub mod observability;
pub mod policy;
pub mod retention;
pub mod rules;

pub use crate::config::Config;
pub use domain::{Rule, Sign, SiteDataPolicy};
pub use policy::SiteDataSettings;
pub use retention::RetentionPlan;
pub use rules::{RuleSet, SkipReason, SkippedToken};

/// Parse a comma-separated site data rule string. Never fails.
pub fn parse(config: &str) -> RuleSet {
    RuleSet::parse(config)
}

/// Evaluate a hostname against a ruleset; first matching rule wins.
pub fn evaluate(ruleset: &RuleSet, hostname: &str) -> SiteDataPolicy {
    ruleset.evaluate(hostname)
}
