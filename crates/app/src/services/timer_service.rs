//! Timer service — the watering countdown state machine.
//!
//! Per greenhouse the lifecycle is `Idle → Running → JustCompleted → Idle`:
//! `start` arms the countdown, `tick` recomputes the remaining seconds from
//! the absolute deadline (so delayed ticks cannot drift the clock), `cancel`
//! aborts a running countdown, and `acknowledge` returns a completed plot to
//! idle. Terminal transitions (`Completed`, `Canceled`) append to the
//! watering log; every mutation rewrites the affected persisted document.
//!
//! All mutation happens under one mutex, held only for the synchronous part
//! of a transition; the persisted snapshot is cloned out before any await.
//! Persistence failures are logged and swallowed — in-memory state stays
//! authoritative for the rest of the session.

use std::sync::{Mutex, MutexGuard, PoisonError};

use greenhub_domain::duration::WateringDuration;
use greenhub_domain::error::{GreenhubError, InvalidStateError};
use greenhub_domain::greenhouse::TimerState;
use greenhub_domain::id::GreenhouseKey;
use greenhub_domain::log::{LogDraft, LogEntry, RunStatus, WateringLog};
use greenhub_domain::registry::{GreenhouseView, PersistedState, Registry, RegistrySnapshot};
use greenhub_domain::time::{Timestamp, minutes_between, seconds_until};

use crate::ports::{Clock, EventPublisher, StateStore, WateringEvent};

struct Inner {
    registry: Registry,
    log: WateringLog,
}

/// Orchestrates timer transitions, linking registry mutations to log writes
/// and persistence.
pub struct TimerService<S, C, P> {
    store: S,
    clock: C,
    publisher: P,
    inner: Mutex<Inner>,
}

impl<S, C, P> TimerService<S, C, P>
where
    S: StateStore,
    C: Clock,
    P: EventPublisher,
{
    /// Build the service from persisted state, falling back to `defaults`
    /// when nothing usable was stored.
    ///
    /// Load failures are never fatal: a malformed or unreadable document
    /// degrades to the default initial state with a warning.
    pub async fn initialize(store: S, clock: C, publisher: P, defaults: Registry) -> Self {
        let mut registry = defaults;
        match store.load_state().await {
            Ok(Some(persisted)) => registry.restore(persisted),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "failed to load greenhouse state, starting from defaults");
            }
        }

        let log = match store.load_log().await {
            Ok(Some(log)) => log,
            Ok(None) => WateringLog::default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load watering log, starting empty");
                WateringLog::default()
            }
        };

        Self {
            store,
            clock,
            publisher,
            inner: Mutex::new(Inner { registry, log }),
        }
    }

    /// Start a countdown on an idle greenhouse.
    ///
    /// # Errors
    ///
    /// Returns [`GreenhubError::NotFound`] for an unknown key and
    /// [`GreenhubError::InvalidState`] when the greenhouse is not idle or
    /// another greenhouse already holds the active timer.
    pub async fn start(
        &self,
        key: &GreenhouseKey,
        duration: WateringDuration,
    ) -> Result<GreenhouseView, GreenhubError> {
        let (view, persisted) = {
            let mut inner = self.lock();
            let mut greenhouse = inner.registry.get(key)?.clone();
            match greenhouse.state() {
                TimerState::Idle => {}
                TimerState::Running(_) => {
                    return Err(InvalidStateError {
                        action: "start",
                        key: key.to_string(),
                        reason: "timer already running",
                    }
                    .into());
                }
                TimerState::JustCompleted => {
                    return Err(InvalidStateError {
                        action: "start",
                        key: key.to_string(),
                        reason: "previous run is waiting for acknowledgement",
                    }
                    .into());
                }
            }
            if inner.registry.active().is_some() {
                return Err(InvalidStateError {
                    action: "start",
                    key: key.to_string(),
                    reason: "another timer is already active",
                }
                .into());
            }

            greenhouse.begin(self.clock.now(), duration);
            inner.registry.replace(key, greenhouse)?;
            inner.registry.set_active(Some(key.clone()));
            (inner.registry.view(key)?, inner.registry.to_persisted())
        };

        self.persist_state(persisted).await;
        self.publish(WateringEvent::Started {
            key: key.clone(),
            minutes: duration.minutes(),
        })
        .await;
        Ok(view)
    }

    /// Advance the active countdown by recomputing the remaining seconds
    /// from the absolute deadline.
    ///
    /// Returns the completed log entry when this tick drove the countdown to
    /// zero. A tick with no active timer, or with the active plot waiting
    /// for acknowledgement, is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GreenhubError::NotFound`] if the active pointer names an
    /// unknown key, which would be a programmer error.
    pub async fn tick(&self) -> Result<Option<LogEntry>, GreenhubError> {
        enum Outcome {
            Noop,
            Running(PersistedState),
            Completed(PersistedState, WateringLog, LogEntry),
        }

        let outcome = {
            let mut inner = self.lock();
            let Some(key) = inner.registry.active().cloned() else {
                return Ok(None);
            };
            let greenhouse = inner.registry.get(&key)?.clone();
            match greenhouse.state() {
                TimerState::JustCompleted => Outcome::Noop,
                TimerState::Idle => {
                    // Stale pointer; repair it rather than ticking forever.
                    inner.registry.set_active(None);
                    Outcome::Running(inner.registry.to_persisted())
                }
                TimerState::Running(_) => {
                    let Some(target) = greenhouse.target_time else {
                        inner.registry.set_active(None);
                        return Ok(None);
                    };
                    let remaining = seconds_until(self.clock.now(), target);
                    let started = greenhouse.last_run.unwrap_or(target);

                    let mut updated = greenhouse;
                    updated.set_remaining(remaining);
                    inner.registry.replace(&key, updated)?;

                    if remaining == 0 {
                        let entry = inner.log.append(LogDraft {
                            greenhouse_id: key,
                            date: started,
                            duration: minutes_between(started, target),
                            status: RunStatus::Completed,
                        });
                        Outcome::Completed(
                            inner.registry.to_persisted(),
                            inner.log.clone(),
                            entry,
                        )
                    } else {
                        Outcome::Running(inner.registry.to_persisted())
                    }
                }
            }
        };

        match outcome {
            Outcome::Noop => Ok(None),
            Outcome::Running(persisted) => {
                self.persist_state(persisted).await;
                Ok(None)
            }
            Outcome::Completed(persisted, log, entry) => {
                self.persist_state(persisted).await;
                self.persist_log(log).await;
                self.publish(WateringEvent::Completed {
                    entry: entry.clone(),
                })
                .await;
                Ok(Some(entry))
            }
        }
    }

    /// Cancel a running countdown, logging the elapsed whole minutes.
    ///
    /// # Errors
    ///
    /// Returns [`GreenhubError::NotFound`] for an unknown key and
    /// [`GreenhubError::InvalidState`] when no countdown is running.
    pub async fn cancel(&self, key: &GreenhouseKey) -> Result<LogEntry, GreenhubError> {
        let (entry, persisted, log) = {
            let mut inner = self.lock();
            let greenhouse = inner.registry.get(key)?.clone();
            let TimerState::Running(_) = greenhouse.state() else {
                return Err(InvalidStateError {
                    action: "cancel",
                    key: key.to_string(),
                    reason: "no running timer",
                }
                .into());
            };

            let now = self.clock.now();
            let started = greenhouse.last_run.unwrap_or(now);
            let entry = inner.log.append(LogDraft {
                greenhouse_id: key.clone(),
                date: started,
                duration: minutes_between(started, now),
                status: RunStatus::Canceled,
            });

            let mut updated = greenhouse;
            updated.clear();
            inner.registry.replace(key, updated)?;
            if inner.registry.active() == Some(key) {
                inner.registry.set_active(None);
            }
            (entry, inner.registry.to_persisted(), inner.log.clone())
        };

        self.persist_state(persisted).await;
        self.persist_log(log).await;
        self.publish(WateringEvent::Canceled {
            entry: entry.clone(),
        })
        .await;
        Ok(entry)
    }

    /// Return a just-completed greenhouse to idle. The run was already
    /// logged when the countdown reached zero, so no entry is appended.
    ///
    /// # Errors
    ///
    /// Returns [`GreenhubError::NotFound`] for an unknown key and
    /// [`GreenhubError::InvalidState`] when the countdown has not completed.
    pub async fn acknowledge(&self, key: &GreenhouseKey) -> Result<(), GreenhubError> {
        let persisted = {
            let mut inner = self.lock();
            let greenhouse = inner.registry.get(key)?.clone();
            if greenhouse.state() != TimerState::JustCompleted {
                return Err(InvalidStateError {
                    action: "acknowledge",
                    key: key.to_string(),
                    reason: "countdown has not completed",
                }
                .into());
            }

            let mut updated = greenhouse;
            updated.clear();
            inner.registry.replace(key, updated)?;
            if inner.registry.active() == Some(key) {
                inner.registry.set_active(None);
            }
            inner.registry.to_persisted()
        };

        self.persist_state(persisted).await;
        self.publish(WateringEvent::Acknowledged { key: key.clone() })
            .await;
        Ok(())
    }

    /// Ordered read-only view of every greenhouse plus the active pointer.
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.lock().registry.snapshot()
    }

    /// Read-only view of a single greenhouse.
    ///
    /// # Errors
    ///
    /// Returns [`GreenhubError::NotFound`] for an unknown key.
    pub fn greenhouse(&self, key: &GreenhouseKey) -> Result<GreenhouseView, GreenhubError> {
        Ok(self.lock().registry.view(key)?)
    }

    /// All retained log entries, newest-first.
    pub fn logs(&self) -> Vec<LogEntry> {
        self.lock().log.entries().to_vec()
    }

    /// Log entries for one greenhouse, descending by date.
    ///
    /// # Errors
    ///
    /// Returns [`GreenhubError::NotFound`] for an unknown key.
    pub fn logs_for(&self, key: &GreenhouseKey) -> Result<Vec<LogEntry>, GreenhubError> {
        let inner = self.lock();
        inner.registry.get(key)?;
        Ok(inner.log.by_greenhouse(key))
    }

    /// The start date of the most recent run for a greenhouse.
    ///
    /// # Errors
    ///
    /// Returns [`GreenhubError::NotFound`] for an unknown key.
    pub fn latest_run(&self, key: &GreenhouseKey) -> Result<Option<Timestamp>, GreenhubError> {
        let inner = self.lock();
        inner.registry.get(key)?;
        Ok(inner.log.latest_date(key))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn persist_state(&self, state: PersistedState) {
        if let Err(err) = self.store.save_state(state).await {
            tracing::warn!(error = %err, "failed to persist greenhouse state, continuing in memory");
        }
    }

    async fn persist_log(&self, log: WateringLog) {
        if let Err(err) = self.store.save_log(log).await {
            tracing::warn!(error = %err, "failed to persist watering log, continuing in memory");
        }
    }

    async fn publish(&self, event: WateringEvent) {
        let _ = self.publisher.publish(event).await;
    }
}
