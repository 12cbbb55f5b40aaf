//! Sync engine.
//!
//! Persists whole selection sets through [`SelectionGatewayPort`]. Local state
//! is optimistic: callers keep their [`SelectionSet`](lb_core::SelectionSet)
//! as edited no matter what this engine reports.
//!
//! Per category the engine keeps:
//! - the last set the gateway accepted (no-op short-circuit),
//! - one offline slot holding the newest payload that still has to reach the
//!   backend (captured offline, or left over from failed retries); it is only
//!   cleared by a successful send or a rejected payload,
//! - one debounce slot holding the newest scheduled payload,
//! - a send lock so at most one call is in flight.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use lb_core::ports::{
    ClockPort, GatewayError, NetworkStatusPort, SchedulerPort, SelectionGatewayPort,
};
use lb_core::selection::normalize_ids;
use lb_core::{
    DeferReason, PersistOutcome, RetryPolicy, SelectionCategory, SyncFailure, SyncQueueEntry,
    SyncStatus,
};

use crate::deps::AppDeps;

#[derive(Debug, Default)]
struct CategorySlot {
    last_persisted: Option<BTreeSet<String>>,
    offline: Option<SyncQueueEntry>,
    pending_flush: Option<BTreeSet<String>>,
    flush_armed: bool,
    /// Bumped for every payload that enters `persist`; only the newest one is sent.
    generation: u64,
    in_flight: bool,
}

/// Read-only view of one category's sync state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSnapshot {
    pub category: SelectionCategory,
    pub last_persisted: Option<Vec<String>>,
    pub queued_offline: Option<SyncQueueEntry>,
    pub pending_flush: Option<Vec<String>>,
    pub in_flight: bool,
}

pub struct SyncEngine {
    gateway: Arc<dyn SelectionGatewayPort>,
    network: Arc<dyn NetworkStatusPort>,
    clock: Arc<dyn ClockPort>,
    scheduler: Arc<dyn SchedulerPort>,
    policy: RetryPolicy,
    debounce: Duration,
    slots: Mutex<HashMap<SelectionCategory, CategorySlot>>,
    send_locks: [tokio::sync::Mutex<()>; 3],
}

impl SyncEngine {
    pub fn new(
        gateway: Arc<dyn SelectionGatewayPort>,
        network: Arc<dyn NetworkStatusPort>,
        clock: Arc<dyn ClockPort>,
        scheduler: Arc<dyn SchedulerPort>,
        policy: RetryPolicy,
        debounce: Duration,
    ) -> Self {
        Self {
            gateway,
            network,
            clock,
            scheduler,
            policy,
            debounce,
            slots: Mutex::new(HashMap::new()),
            send_locks: Default::default(),
        }
    }

    pub fn from_deps(deps: &AppDeps) -> Self {
        Self::new(
            deps.selection_gateway.clone(),
            deps.network.clone(),
            deps.clock.clone(),
            deps.scheduler.clone(),
            deps.retry_policy,
            deps.debounce,
        )
    }

    /// Persist the full desired set for `category`.
    ///
    /// Supersedes any payload still waiting in the debounce slot.
    pub async fn persist<I, S>(&self, category: SelectionCategory, ids: I) -> PersistOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let payload = normalize_ids(ids);
        self.with_slot(category, |slot| slot.pending_flush = None);

        let span = info_span!("usecase.sync.persist", category = %category, size = payload.len());
        self.persist_normalized(category, payload)
            .instrument(span)
            .await
    }

    /// Record `ids` as the newest payload and arm a flush after the debounce
    /// window. Calls inside an armed window only replace the payload.
    ///
    /// Returns the handle of the flush task when this call armed it.
    pub fn schedule<I, S>(self: &Arc<Self>, category: SelectionCategory, ids: I) -> Option<JoinHandle<()>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let payload = normalize_ids(ids);
        let arm = self.with_slot(category, |slot| {
            slot.pending_flush = Some(payload);
            !std::mem::replace(&mut slot.flush_armed, true)
        });
        if !arm {
            return None;
        }

        let engine = Arc::clone(self);
        let span = info_span!("usecase.sync.debounce", category = %category);
        Some(tokio::spawn(
            async move {
                engine.scheduler.sleep(engine.debounce).await;
                if let Some(outcome) = engine.flush(category).await {
                    debug!(?outcome, "debounced flush settled");
                }
            }
            .instrument(span),
        ))
    }

    /// Send whatever is waiting in the debounce slot now.
    pub async fn flush(&self, category: SelectionCategory) -> Option<PersistOutcome> {
        let pending = self.with_slot(category, |slot| {
            slot.flush_armed = false;
            slot.pending_flush.take()
        });
        let payload = pending?;
        let span = info_span!("usecase.sync.flush", category = %category, size = payload.len());
        Some(self.persist_normalized(category, payload).instrument(span).await)
    }

    /// Seed the last-persisted set from server state at load time.
    pub fn seed_persisted<I, S>(&self, category: SelectionCategory, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids = normalize_ids(ids);
        self.with_slot(category, |slot| slot.last_persisted = Some(ids));
    }

    pub fn last_persisted(&self, category: SelectionCategory) -> Option<BTreeSet<String>> {
        self.with_slot(category, |slot| slot.last_persisted.clone())
    }

    pub fn snapshot(&self, category: SelectionCategory) -> SyncSnapshot {
        self.with_slot(category, |slot| SyncSnapshot {
            category,
            last_persisted: slot
                .last_persisted
                .as_ref()
                .map(|ids| ids.iter().cloned().collect()),
            queued_offline: slot.offline.clone(),
            pending_flush: slot
                .pending_flush
                .as_ref()
                .map(|ids| ids.iter().cloned().collect()),
            in_flight: slot.in_flight,
        })
    }

    /// Send the newest payload captured while offline, once per category.
    pub async fn replay_offline(&self) -> Vec<(SelectionCategory, PersistOutcome)> {
        let span = info_span!("usecase.sync.replay_offline");
        async {
            let mut outcomes = Vec::new();
            for category in SelectionCategory::ALL {
                let queued = self.with_slot(category, |slot| {
                    slot.offline
                        .as_ref()
                        .filter(|entry| entry.status.is_waiting())
                        .map(|entry| entry.payload.clone())
                });
                let Some(payload) = queued else {
                    continue;
                };
                info!(category = %category, size = payload.len(), "replaying queued selection");
                let outcome = self.persist_normalized(category, payload).await;
                outcomes.push((category, outcome));
            }
            outcomes
        }
        .instrument(span)
        .await
    }

    /// Replay queued payloads on every offline→online transition.
    ///
    /// Runs until the network status channel closes.
    pub async fn run_connectivity_observer(self: Arc<Self>) {
        let mut status = self.network.subscribe();
        let mut was_online = *status.borrow_and_update();

        while status.changed().await.is_ok() {
            let online = *status.borrow_and_update();
            match (was_online, online) {
                (false, true) => {
                    info!("connectivity restored");
                    let outcomes = self.replay_offline().await;
                    for (category, outcome) in &outcomes {
                        if let Some(failure) = outcome.failure() {
                            warn!(category = %category, error = %failure, "offline replay failed");
                        }
                    }
                    debug!(replayed = outcomes.len(), "offline replay done");
                }
                (true, false) => info!("connectivity lost"),
                _ => {}
            }
            was_online = online;
        }

        debug!("network status channel closed, connectivity observer exiting");
    }

    pub fn spawn_connectivity_observer(self: &Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(Arc::clone(self).run_connectivity_observer())
    }

    async fn persist_normalized(
        &self,
        category: SelectionCategory,
        payload: BTreeSet<String>,
    ) -> PersistOutcome {
        let generation = self.with_slot(category, |slot| {
            slot.generation += 1;
            slot.generation
        });

        let _send_guard = self.send_lock(category).lock().await;

        let entry = {
            let mut slots = self.slots();
            let slot = slots.entry(category).or_default();

            if slot.generation != generation {
                debug!("superseded by a newer payload");
                return PersistOutcome::Deferred(DeferReason::Superseded);
            }
            if slot.last_persisted.as_ref() == Some(&payload) {
                slot.offline = None;
                debug!("payload matches the persisted set, nothing to send");
                return PersistOutcome::Persisted;
            }

            let entry = SyncQueueEntry::new(category, payload, self.clock.now_ms());
            if !self.network.is_online() {
                info!("offline, holding payload for replay");
                slot.offline = Some(entry.queued_offline());
                return PersistOutcome::Deferred(DeferReason::Offline);
            }

            slot.in_flight = true;
            entry
        };

        let outcome = self.send_with_retry(entry).await;
        self.with_slot(category, |slot| slot.in_flight = false);
        outcome
    }

    async fn send_with_retry(&self, mut entry: SyncQueueEntry) -> PersistOutcome {
        let category = entry.category;
        let ids = entry.payload_vec();

        loop {
            entry.status = entry.status.begin_attempt().unwrap_or(SyncStatus::InFlight);
            entry.attempt += 1;
            debug!(attempt = entry.attempt, "sending selection");

            let err = match self.gateway.replace(category, &ids).await {
                Ok(_) => {
                    entry.status = entry.status.on_succeeded();
                    info!(attempts = entry.attempt, status = ?entry.status, "selection persisted");
                    self.with_slot(category, |slot| {
                        slot.last_persisted = Some(entry.payload);
                        slot.offline = None;
                    });
                    return PersistOutcome::Persisted;
                }
                Err(err) => err,
            };

            let backoff = if err.is_retryable() {
                self.policy.backoff_after(entry.attempt)
            } else {
                None
            };
            entry.status = entry.status.on_failed(backoff.is_some());

            match backoff {
                Some(delay) if !entry.status.is_terminal() => {
                    warn!(
                        attempt = entry.attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "persist attempt failed, backing off"
                    );
                    self.scheduler.sleep(delay).await;
                }
                _ => return self.surface_failure(entry, &err),
            }
        }
    }

    /// Retryable failures keep the payload queued for the next reconnect
    /// replay; a rejected payload drops whatever was queued.
    fn surface_failure(&self, entry: SyncQueueEntry, err: &GatewayError) -> PersistOutcome {
        let category = entry.category;
        let attempts = entry.attempt;

        if !err.is_retryable() {
            self.with_slot(category, |slot| slot.offline = None);
            let failure = SyncFailure::from_gateway(err, attempts);
            warn!(attempts, error = %failure, "persist rejected");
            return PersistOutcome::Failed(failure);
        }

        self.with_slot(category, |slot| slot.offline = Some(entry.queued_offline()));
        if !self.network.is_online() {
            info!(attempts, "went offline while retrying, holding payload for replay");
            return PersistOutcome::Deferred(DeferReason::Offline);
        }

        let failure = SyncFailure::from_gateway(err, attempts);
        warn!(attempts, error = %failure, "persist failed, holding payload for replay");
        PersistOutcome::Failed(failure)
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<SelectionCategory, CategorySlot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_slot<R>(&self, category: SelectionCategory, f: impl FnOnce(&mut CategorySlot) -> R) -> R {
        let mut slots = self.slots();
        f(slots.entry(category).or_default())
    }

    fn send_lock(&self, category: SelectionCategory) -> &tokio::sync::Mutex<()> {
        let index = match category {
            SelectionCategory::Interests => 0,
            SelectionCategory::Subcategories => 1,
            SelectionCategory::DealBreakers => 2,
        };
        &self.send_locks[index]
    }
}
