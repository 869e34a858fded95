use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{error, info, warn};

use crate::observability::MetricsRegistry;
use crate::rules::RuleSet;

use super::loader::{PolicyError, PolicyLoader};
use super::settings::SiteDataSettings;

/// Watch the settings file and publish a new ruleset when its rules change.
pub struct PolicyWatcher {
    loader: PolicyLoader,
    check_interval: Duration,
    last_rules: Option<String>,
    metrics: Option<Arc<MetricsRegistry>>,
}

impl PolicyWatcher {
    /// Create a new policy watcher.
    pub fn new(loader: PolicyLoader, check_interval: Duration) -> Self {
        PolicyWatcher {
            loader,
            check_interval,
            last_rules: None,
            metrics: None,
        }
    }

    /// Count reloads and reload failures in the given registry.
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Start watching for rule changes.
    ///
    /// Returns a receiver holding the current ruleset. Each change is
    /// published as a freshly built `Arc<RuleSet>`.
    pub fn start(mut self) -> (watch::Receiver<Arc<RuleSet>>, JoinHandle<()>) {
        let initial_ruleset = match self.loader.load() {
            Ok((settings, ruleset)) => {
                info!(
                    path = %self.loader.path().display(),
                    rules = ruleset.len(),
                    skipped = ruleset.skipped().len(),
                    "Loaded initial site data rules"
                );
                self.last_rules = Some(settings.site_data_rules);
                Arc::new(ruleset)
            }
            Err(e) => {
                error!(
                    path = %self.loader.path().display(),
                    error = %e,
                    "Failed to load initial site data settings"
                );
                Arc::new(RuleSet::empty())
            }
        };

        let (tx, rx) = watch::channel(initial_ruleset);

        let handle = tokio::spawn(async move {
            let mut interval = interval(self.check_interval);

            loop {
                interval.tick().await;

                match self.check_for_updates(&tx) {
                    Ok(_) => {}
                    Err(e) => {
                        if let Some(metrics) = &self.metrics {
                            metrics.record_rule_reload(false);
                        }
                        warn!(error = %e, "Error checking for site data rule updates");
                    }
                }

                if tx.is_closed() {
                    break;
                }
            }
        });

        (rx, handle)
    }

    /// Re-read the settings file and publish if the rule string changed.
    fn check_for_updates(
        &mut self,
        tx: &watch::Sender<Arc<RuleSet>>,
    ) -> Result<bool, PolicyError> {
        let settings = self.loader.load_settings()?;

        if self.last_rules.as_deref() == Some(settings.site_data_rules.as_str()) {
            return Ok(false);
        }

        let ruleset = RuleSet::parse(&settings.site_data_rules);

        info!(
            rules = ruleset.len(),
            skipped = ruleset.skipped().len(),
            "Site data rules changed"
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_skipped_tokens(ruleset.skipped().len());
            metrics.record_rule_reload(true);
        }

        self.last_rules = Some(settings.site_data_rules);
        let _ = tx.send(Arc::new(ruleset));

        Ok(true)
    }
}

/// Forward every published ruleset into a shared settings holder.
///
/// The task ends when the watcher's sender is dropped.
pub fn spawn_settings_sync(
    mut rx: watch::Receiver<Arc<RuleSet>>,
    settings: Arc<SiteDataSettings>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        settings.replace(rx.borrow_and_update().clone());

        while rx.changed().await.is_ok() {
            let ruleset = rx.borrow_and_update().clone();
            settings.replace(ruleset);
        }
    })
}
