//! Sync orchestration
//!
//! One pass over the requested resource groups of a connected adapter.
//! Each group is pulled independently: an error in one group is recorded
//! against that group and the run moves on, so a single bad endpoint can
//! never sink the whole pass.

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::adapter::{AdapterCore, BackofficeAdapter};
use crate::error::AdapterResult;
use crate::options::{SyncOptions, SyncReport};

impl AdapterCore {
    /// Drive one sync run through the given adapter.
    ///
    /// Fails fast with `NotConnected` when the adapter has no live
    /// connection. Everything after that point is isolated per group: the
    /// returned report carries one counter per requested group in request
    /// order, plus errors in occurrence order. `last_sync` advances only
    /// when at least one group succeeded.
    #[instrument(skip_all, fields(backend = %self.backend()))]
    pub async fn run_sync(
        &self,
        adapter: &dyn BackofficeAdapter,
        options: SyncOptions,
    ) -> AdapterResult<SyncReport> {
        self.executor()?;

        let types = options.effective_types();
        let list_options = options.list_options();
        let mut report = SyncReport::begin();

        info!(run_id = %report.id, groups = types.len(), "starting sync run");

        for resource in types {
            match adapter.list_resource(resource, &list_options).await {
                Ok(records) => {
                    info!(resource = %resource, count = records.len(), "group synced");
                    report.record_processed(resource, records.len() as u64);
                }
                Err(err) => {
                    warn!(resource = %resource, error = %err, "group failed");
                    report.record_failure(resource, err.to_string());
                }
            }
        }

        report.finish();
        if report.made_progress() {
            self.mark_synced(report.finished_at.unwrap_or_else(Utc::now));
        }

        info!(
            run_id = %report.id,
            status = report.status.as_str(),
            processed = report.records_processed(),
            failed = report.records_failed(),
            "sync run finished"
        );

        self.store_report(report.clone());
        Ok(report)
    }
}
