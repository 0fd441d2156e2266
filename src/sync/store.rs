//! Load-state tracking for data stores
//!
//! Waiting for a store's "load" event is unreliable: it may already have fired by the
//! time the client starts listening. Stores instead keep a load counter that goes up
//! once per completed fetch. Resetting the counter to zero before an action and then
//! waiting for it to go above zero tells the client that a load caused by *its* action
//! has finished, with no race between triggering and observing.

use crate::error::{BrowserError, Result};
use crate::query::ComponentQuery;
use crate::rpc::{HelperCall, decode};
use crate::sync::Context;
use crate::sync::matching::{first_match, record_matches};
use crate::sync::poller;
use serde_json::{Map, Value};
use std::time::Duration;

/// What [`StoreTracker::reset_load_count`] actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The counter is now zero
    Reset,
    /// The store auto-loads on every access, so the counter was left alone
    ///
    /// Such stores make a freshly triggered load indistinguishable from a standing one.
    SkippedAutoLoad,
}

/// Tracks loads of the store owned by a store holder component (grid, combobox, ...)
pub struct StoreTracker<'a> {
    ctx: Context<'a>,
}

impl<'a> StoreTracker<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    /// Reset the load counter of the store owned by `store_holder_cq` to zero
    ///
    /// Call this before an action that will trigger a load, then use
    /// [`wait_for_loaded`](Self::wait_for_loaded). Resetting twice with no load in
    /// between leaves the counter at zero.
    pub fn reset_load_count(&self, store_holder_cq: &ComponentQuery) -> Result<ResetOutcome> {
        log::debug!("Resetting loadCount on store owned by '{}'", store_holder_cq);

        let applied = self.ctx.oracle.call_bool(&HelperCall::ResetStoreLoadCount {
            store_holder_cq: store_holder_cq.to_string(),
        })?;

        if applied {
            Ok(ResetOutcome::Reset)
        } else {
            log::debug!("Store owned by '{}' auto loads, load count left as is", store_holder_cq);
            Ok(ResetOutcome::SkippedAutoLoad)
        }
    }

    pub fn load_count(&self, store_holder_cq: &ComponentQuery) -> Result<u64> {
        self.ctx.oracle.call_count(&HelperCall::GetStoreLoadCount { store_holder_cq: store_holder_cq.to_string() })
    }

    pub fn is_loaded(&self, store_holder_cq: &ComponentQuery) -> Result<bool> {
        Ok(self.load_count(store_holder_cq)? > 0)
    }

    /// Wait until the store has completed at least one load since its last reset
    ///
    /// Without a prior reset this returns as soon as the store has ever loaded.
    /// `timeout` overrides the configured store load timeout.
    pub fn wait_for_loaded(&self, store_holder_cq: &ComponentQuery, timeout: Option<Duration>) -> Result<()> {
        log::debug!("Waiting for store owned by '{}' to load", store_holder_cq);

        let mut options = self.ctx.config.store_load_wait;
        if let Some(timeout) = timeout {
            options = options.timeout(timeout);
        }

        let description = format!("store owned by '{}' to load", store_holder_cq);
        poller::wait_until(&description, options, || self.is_loaded(store_holder_cq)).map_err(|e| match e {
            BrowserError::ConditionTimeout { elapsed, .. } => {
                BrowserError::LoadTimeout { store_holder_cq: store_holder_cq.to_string(), elapsed }
            }
            other => other,
        })?;

        log::debug!("Store owned by '{}' loaded", store_holder_cq);
        Ok(())
    }

    pub fn trigger_reload(&self, store_holder_cq: &ComponentQuery) -> Result<()> {
        log::info!("Reloading store owned by '{}'", store_holder_cq);
        self.ctx.oracle.call_unit(&HelperCall::ReloadStore { store_holder_cq: store_holder_cq.to_string() })
    }

    /// Reset the load counter, trigger a reload and wait for it to complete
    pub fn trigger_reload_and_wait(&self, store_holder_cq: &ComponentQuery, timeout: Option<Duration>) -> Result<()> {
        self.reset_load_count(store_holder_cq)?;
        self.trigger_reload(store_holder_cq)?;
        self.wait_for_loaded(store_holder_cq, timeout)
    }

    /// Whether any request of any kind is in flight in the page
    pub fn is_request_in_progress(&self) -> Result<bool> {
        self.ctx.oracle.call_bool(&HelperCall::IsAjaxInProgress)
    }

    /// Wait for a period with no outstanding requests, when the gate is enabled
    ///
    /// A store may load several times for one user action, and the counter can go
    /// above zero on an intermediate load. Use this after
    /// [`wait_for_loaded`](Self::wait_for_loaded) when the final load matters.
    pub fn wait_for_quiet_period(&self) -> Result<()> {
        let quiet = self.ctx.config.quiet_period;
        if !quiet.enabled {
            return Ok(());
        }

        poller::wait_until_idle("no requests to be in progress", quiet.wait(), quiet.recheck(), || {
            self.is_request_in_progress()
        })
    }

    /// The data of every record currently materialized in the store
    pub fn records(&self, store_holder_cq: &ComponentQuery) -> Result<Vec<Value>> {
        let call = HelperCall::GetStoreRecords { store_holder_cq: store_holder_cq.to_string() };
        let value = self.ctx.oracle.call(&call)?;
        Ok(decode(&call, value)?.unwrap_or_default())
    }

    /// Position of the first record matching `payload`, in store order
    pub fn find_record(&self, store_holder_cq: &ComponentQuery, payload: &Map<String, Value>) -> Result<Option<usize>> {
        Ok(first_match(&self.records(store_holder_cq)?, payload))
    }

    /// Check that the store holds a record matching each entry of `expected`
    ///
    /// With `only` set, every record in the store must also match one of the entries.
    /// Paged stores only expose their current page.
    pub fn check_store_contains(
        &self,
        store_holder_cq: &ComponentQuery,
        expected: &[Map<String, Value>],
        only: bool,
    ) -> Result<()> {
        self.wait_for_loaded(store_holder_cq, None)?;
        let records = self.records(store_holder_cq)?;

        let missing: Vec<Value> = expected
            .iter()
            .filter(|payload| first_match(&records, payload).is_none())
            .map(|payload| Value::Object((*payload).clone()))
            .collect();

        if !missing.is_empty() {
            return Err(BrowserError::StoreContentsMismatch {
                store_holder_cq: store_holder_cq.to_string(),
                reason: format!("missing records {}", Value::Array(missing)),
            });
        }

        if only {
            let unexpected = records
                .iter()
                .filter(|record| !expected.iter().any(|payload| record_matches(record, payload)))
                .count();

            if unexpected > 0 {
                return Err(BrowserError::StoreContentsMismatch {
                    store_holder_cq: store_holder_cq.to_string(),
                    reason: format!("{} record(s) beyond the expected data", unexpected),
                });
            }
        }

        Ok(())
    }
}
