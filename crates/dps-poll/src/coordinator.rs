use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info, warn};

use dps_decode::{DecoderRegistry, KeyDecoder as _};
use dps_monitor::{compute_coverage, default_expected_keys};
use dps_types::{CycleResult, DecoderOutcome, KeyId};

use crate::fetch::{FetchError, SnapshotFetcher};

/// Where the coordinator is in its rotation.
///
/// ```text
///        ┌──────────── run_cycle ────────────┐
///        ▼                                   │
///      Idle ──▶ Fetching ──▶ Processing ──▶ Idle
///                  │
///                  │ fatal fetch error
///                  ▼
///               Faulted  (terminal)
/// ```
///
/// `Fetching` and `Processing` are only observable from another vantage
/// point while a cycle is in flight; between cycles the coordinator sits
/// in `Idle` or, permanently, in `Faulted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Fetching,
    Processing,
    Faulted,
}

/// Tuning surface for one coordinator instance.
///
/// `expected_keys` drives the coverage monitor and defaults to the
/// monitored-key table; `device_id` tags every emitted event so logs
/// from different coordinators stay distinguishable (one coordinator
/// serves one device).
#[derive(Clone, Debug)]
pub struct CoordinatorConfig {
    pub device_id: String,
    pub expected_keys: Vec<KeyId>,
}

impl CoordinatorConfig {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            expected_keys: default_expected_keys(),
        }
    }

    #[must_use]
    pub fn with_expected_keys(mut self, keys: Vec<KeyId>) -> Self {
        self.expected_keys = keys;
        self
    }
}

/// One failed fetch attempt, reported upward.
///
/// Carries the running consecutive-failure count so the consumer can
/// apply its own alerting threshold, and whether this failure was the
/// fatal one that faulted the coordinator.
#[derive(Debug, thiserror::Error)]
#[error("fetch failed ({consecutive_failures} consecutive): {cause}")]
pub struct FetchFailure {
    pub cause: FetchError,
    pub consecutive_failures: u32,
    pub fatal: bool,
}

/// Why `run_cycle` produced no [`CycleResult`].
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    /// The fetch collaborator produced no snapshot this cycle.
    #[error(transparent)]
    Fetch(#[from] FetchFailure),

    /// The coordinator hit a fatal fetch error on an earlier cycle and
    /// will not run again.
    #[error("coordinator faulted: {detail}")]
    Faulted { detail: String },
}

/// Drives one fetch→decode→monitor pass per call.
///
/// The coordinator owns its fetcher, registry, and a small fixed set of
/// rolling counters — nothing grows with uptime, because a poll loop
/// runs indefinitely. It retains only the most recent cycle result;
/// longer history belongs to whatever consumes the results.
///
/// ```text
/// run_cycle()
///   1. Fetching:   fetcher.fetch()
///        err ──▶ consecutive_failures += 1, cycle number untouched,
///                FetchFailure upward (Faulted if the error was fatal)
///   2. Processing: every registered decoder runs; a failing decoder
///                  fills its slot with the failure and the rest
///                  still run; then coverage over expected_keys
///   3. Assemble:   CycleResult{cycle, timestamp, snapshot,
///                  readings, coverage} — handed back by value
/// ```
///
/// `run_cycle` takes `&mut self`, so one coordinator can never have two
/// cycles in flight — exclusivity is enforced by ownership rather than
/// a lock. Wrap the coordinator in a mutex if it must be shared.
pub struct Coordinator<F> {
    fetcher: F,
    registry: DecoderRegistry,
    config: CoordinatorConfig,
    state: PollState,
    cycle: u64,
    consecutive_failures: u32,
    fault_detail: Option<String>,
    last: Option<CycleResult>,
}

impl<F: SnapshotFetcher> Coordinator<F> {
    pub fn new(fetcher: F, registry: DecoderRegistry, config: CoordinatorConfig) -> Self {
        Self {
            fetcher,
            registry,
            config,
            state: PollState::Idle,
            cycle: 0,
            consecutive_failures: 0,
            fault_detail: None,
            last: None,
        }
    }

    /// Run one poll cycle.
    ///
    /// # Errors
    ///
    /// - [`CycleError::Fetch`] when the fetch collaborator fails; the
    ///   cycle number does not advance and decoders never run.
    /// - [`CycleError::Faulted`] on every call after a fatal fetch
    ///   error.
    pub async fn run_cycle(&mut self) -> Result<CycleResult, CycleError> {
        if self.state == PollState::Faulted {
            return Err(CycleError::Faulted {
                detail: self
                    .fault_detail
                    .clone()
                    .unwrap_or_else(|| "unknown fault".into()),
            });
        }

        self.state = PollState::Fetching;
        debug!(
            device = %self.config.device_id,
            cycle = self.cycle + 1,
            "fetch start"
        );

        let snapshot = match self.fetcher.fetch().await {
            Ok(snapshot) => snapshot,
            Err(cause) => {
                self.consecutive_failures += 1;
                let fatal = cause.is_fatal();
                if fatal {
                    self.fault_detail = Some(cause.to_string());
                    self.state = PollState::Faulted;
                } else {
                    self.state = PollState::Idle;
                }
                warn!(
                    device = %self.config.device_id,
                    consecutive = self.consecutive_failures,
                    fatal,
                    error = %cause,
                    "fetch failed"
                );
                return Err(CycleError::Fetch(FetchFailure {
                    cause,
                    consecutive_failures: self.consecutive_failures,
                    fatal,
                }));
            }
        };

        self.state = PollState::Processing;
        self.consecutive_failures = 0;
        self.cycle += 1;
        let timestamp = Utc::now();
        debug!(
            device = %self.config.device_id,
            cycle = self.cycle,
            keys = snapshot.len(),
            "snapshot received"
        );

        let mut readings = BTreeMap::new();
        for decoder in self.registry.iter() {
            let outcome = match decoder.decode(&snapshot) {
                Ok(reading) => {
                    debug!(
                        device = %self.config.device_id,
                        cycle = self.cycle,
                        decoder = decoder.name(),
                        "reading decoded"
                    );
                    DecoderOutcome::Ok { reading }
                }
                Err(failure) => {
                    // One bad key degrades one reading, never the cycle
                    debug!(
                        device = %self.config.device_id,
                        cycle = self.cycle,
                        decoder = decoder.name(),
                        failure = %failure,
                        "decoder failed"
                    );
                    DecoderOutcome::Failed { failure }
                }
            };
            readings.insert(decoder.name().to_string(), outcome);
        }

        let coverage = compute_coverage(&snapshot, &self.config.expected_keys);

        let result = CycleResult {
            cycle: self.cycle,
            timestamp,
            snapshot,
            readings,
            coverage,
        };

        info!(
            device = %self.config.device_id,
            cycle = self.cycle,
            coverage = %result.coverage.summary(),
            "cycle complete"
        );

        self.last = Some(result.clone());
        self.state = PollState::Idle;
        Ok(result)
    }

    #[must_use]
    pub fn state(&self) -> PollState {
        self.state
    }

    /// Successful cycles run so far; also the most recent cycle number.
    #[must_use]
    pub fn cycles_run(&self) -> u64 {
        self.cycle
    }

    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// The most recent cycle result, if any cycle has succeeded.
    #[must_use]
    pub fn last_result(&self) -> Option<&CycleResult> {
        self.last.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }
}
