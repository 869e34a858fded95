use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use crate::domain::SiteDataPolicy;
use crate::observability::MetricsRegistry;
use crate::rules::RuleSet;

/// Owner of the active site data ruleset.
///
/// Reads load the current `Arc<RuleSet>` without locking. Updates build a
/// complete ruleset first and then swap it in, so a reader sees either the
/// old rules or the new ones, never a mix.
pub struct SiteDataSettings {
    ruleset: ArcSwap<RuleSet>,
    fallback: SiteDataPolicy,
    metrics: Option<Arc<MetricsRegistry>>,
}

impl SiteDataSettings {
    /// Create settings from a rule string.
    pub fn new(rules: &str, fallback: SiteDataPolicy) -> Self {
        Self::from_ruleset(RuleSet::parse(rules), fallback)
    }

    /// Create settings from an already built ruleset.
    ///
    /// A `Default` fallback would leave lookups unresolved and is
    /// replaced with `Accept`.
    pub fn from_ruleset(ruleset: RuleSet, fallback: SiteDataPolicy) -> Self {
        let fallback = if fallback.is_default() {
            warn!("Fallback site data policy cannot be DEFAULT, using ACCEPT");
            SiteDataPolicy::Accept
        } else {
            fallback
        };

        SiteDataSettings {
            ruleset: ArcSwap::new(Arc::new(ruleset)),
            fallback,
            metrics: None,
        }
    }

    /// Attach a metrics registry for verdict and reload counters.
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        metrics.record_skipped_tokens(self.ruleset.load().skipped().len());
        self.metrics = Some(metrics);
        self
    }

    /// Snapshot of the current ruleset.
    ///
    /// The snapshot stays valid and unchanged even if the rules are
    /// replaced afterwards.
    pub fn ruleset(&self) -> Arc<RuleSet> {
        self.ruleset.load_full()
    }

    pub fn fallback(&self) -> SiteDataPolicy {
        self.fallback
    }

    /// Rebuild the ruleset from a new rule string and publish it.
    ///
    /// Counts as a reload in the attached metrics.
    pub fn set_rules(&self, rules: &str) {
        let ruleset = RuleSet::parse(rules);

        if let Some(metrics) = &self.metrics {
            metrics.record_skipped_tokens(ruleset.skipped().len());
            metrics.record_rule_reload(true);
        }

        self.replace(Arc::new(ruleset));
    }

    /// Publish a ruleset built elsewhere.
    ///
    /// Nothing is recorded in metrics; whoever built the ruleset (e.g.
    /// `PolicyWatcher`) already counted the reload.
    pub fn replace(&self, ruleset: Arc<RuleSet>) {
        debug!(
            rules = ruleset.len(),
            skipped = ruleset.skipped().len(),
            "Site data rules replaced"
        );

        self.ruleset.store(ruleset);
    }

    /// Raw verdict for a hostname; may be `Default`.
    pub fn policy_for(&self, hostname: &str) -> SiteDataPolicy {
        let policy = self.ruleset.load().evaluate(hostname);
        self.record(policy);
        policy
    }

    /// Verdict for a hostname with the fallback applied; never `Default`.
    pub fn effective_policy_for(&self, hostname: &str) -> SiteDataPolicy {
        self.policy_for(hostname).or(self.fallback)
    }

    /// Raw verdict for the host of a URI.
    pub fn policy_for_uri(&self, uri: &str) -> SiteDataPolicy {
        let policy = self.ruleset.load().evaluate_uri(uri);
        self.record(policy);
        policy
    }

    fn record(&self, policy: SiteDataPolicy) {
        if let Some(metrics) = &self.metrics {
            metrics.record_evaluation(policy);
        }
    }
}

impl std::fmt::Debug for SiteDataSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteDataSettings")
            .field("ruleset", &*self.ruleset.load())
            .field("fallback", &self.fallback)
            .finish()
    }
}
