use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::SiteDataPolicy;

/// Counters for site data policy lookups and rule reloads.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Total policy lookups
    pub evaluations_total: AtomicU64,

    /// Lookups by verdict
    pub evaluations_default: AtomicU64,
    pub evaluations_accept: AtomicU64,
    pub evaluations_block: AtomicU64,
    pub evaluations_preserve: AtomicU64,

    /// Tokens dropped while parsing rule strings
    pub skipped_tokens_total: AtomicU64,

    /// Rule reloads
    pub rule_reloads_total: AtomicU64,
    pub rule_reload_errors: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        MetricsRegistry::default()
    }

    /// Record a policy verdict.
    pub fn record_evaluation(&self, policy: SiteDataPolicy) {
        self.evaluations_total.fetch_add(1, Ordering::Relaxed);

        let counter = match policy {
            SiteDataPolicy::Default => &self.evaluations_default,
            SiteDataPolicy::Accept => &self.evaluations_accept,
            SiteDataPolicy::Block => &self.evaluations_block,
            SiteDataPolicy::Preserve => &self.evaluations_preserve,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record tokens skipped by a parse.
    pub fn record_skipped_tokens(&self, count: usize) {
        self.skipped_tokens_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Record a rule reload.
    pub fn record_rule_reload(&self, success: bool) {
        self.rule_reloads_total.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.rule_reload_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        format!(
            r#"# HELP sitedata_evaluations_total Total number of site data policy lookups
# TYPE sitedata_evaluations_total counter
sitedata_evaluations_total {}

# HELP sitedata_evaluations Site data policy lookups by verdict
# TYPE sitedata_evaluations counter
sitedata_evaluations{{policy="default"}} {}
sitedata_evaluations{{policy="accept"}} {}
sitedata_evaluations{{policy="block"}} {}
sitedata_evaluations{{policy="preserve"}} {}

# HELP sitedata_skipped_tokens_total Malformed rule tokens dropped while parsing
# TYPE sitedata_skipped_tokens_total counter
sitedata_skipped_tokens_total {}

# HELP sitedata_rule_reloads_total Rule reload operations
# TYPE sitedata_rule_reloads_total counter
sitedata_rule_reloads_total {}

# HELP sitedata_rule_reload_errors_total Rule reload errors
# TYPE sitedata_rule_reload_errors_total counter
sitedata_rule_reload_errors_total {}
"#,
            self.evaluations_total.load(Ordering::Relaxed),
            self.evaluations_default.load(Ordering::Relaxed),
            self.evaluations_accept.load(Ordering::Relaxed),
            self.evaluations_block.load(Ordering::Relaxed),
            self.evaluations_preserve.load(Ordering::Relaxed),
            self.skipped_tokens_total.load(Ordering::Relaxed),
            self.rule_reloads_total.load(Ordering::Relaxed),
            self.rule_reload_errors.load(Ordering::Relaxed),
        )
    }
}
