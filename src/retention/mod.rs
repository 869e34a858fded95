//! Which sites keep their data through a "clear private data" pass.

use tracing::debug;

use crate::rules::RuleSet;

/// Hosts split by what a global clear does to their stored data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionPlan {
    /// Hosts whose data is removed
    pub clear: Vec<String>,
    /// Hosts marked `!` in the rules
    pub preserve: Vec<String>,
}

impl RetentionPlan {
    /// Partition hosts holding site data. Input order is kept in both lists.
    pub fn build<I, S>(ruleset: &RuleSet, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut plan = RetentionPlan::default();

        for host in hosts {
            let host = host.into();
            if Self::should_preserve(ruleset, &host) {
                plan.preserve.push(host);
            } else {
                plan.clear.push(host);
            }
        }

        debug!(
            clear = plan.clear.len(),
            preserve = plan.preserve.len(),
            "Built site data retention plan"
        );

        plan
    }

    #[inline]
    pub fn should_preserve(ruleset: &RuleSet, host: &str) -> bool {
        ruleset.evaluate(host).survives_clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_splits_preserved_hosts() {
        let ruleset =
            RuleSet::parse("-google.com,-facebook.com,!bugzilla.gnome.org,+bugs.launchpad.net");

        let plan = RetentionPlan::build(
            &ruleset,
            [
                "google.com",
                "bugzilla.gnome.org",
                "bugs.launchpad.net",
                "example.org",
            ],
        );

        assert_eq!(plan.preserve, vec!["bugzilla.gnome.org"]);
        assert_eq!(
            plan.clear,
            vec!["google.com", "bugs.launchpad.net", "example.org"]
        );
    }

    #[test]
    fn test_first_match_decides_preservation() {
        let ruleset = RuleSet::parse("-gnome.org,!bugzilla.gnome.org");

        assert!(!RetentionPlan::should_preserve(&ruleset, "bugzilla.gnome.org"));
    }

    #[test]
    fn test_empty_ruleset_clears_everything() {
        let plan = RetentionPlan::build(&RuleSet::empty(), vec!["a.com".to_string()]);

        assert!(plan.preserve.is_empty());
        assert_eq!(plan.clear, vec!["a.com"]);
    }
}
