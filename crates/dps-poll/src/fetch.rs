use std::collections::VecDeque;
use std::future::Future;

use dps_types::{RawSnapshot, RawValue, SnapshotError};

/// Why a fetch attempt produced no snapshot.
///
/// A fetch error means *no snapshot at all* — it is never conflated with
/// an empty snapshot or a missing key, which are decoding-level facts.
///
/// ```text
///   FetchError
///   ├── Transport     ← connection refused, DNS, broken pipe   (transient)
///   ├── Timeout       ← vendor API did not answer in time      (transient)
///   ├── Unauthorized  ← session/token rejected                 (fatal)
///   └── Payload       ← response was not a flat telemetry map  (transient)
/// ```
///
/// Only fatal errors move the coordinator into its terminal `Faulted`
/// state; transient ones keep it in normal rotation with the
/// consecutive-failure counter climbing.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The transport layer failed before a response arrived.
    #[error("transport failure: {detail}")]
    Transport { detail: String },

    /// The vendor API did not respond within the collaborator's budget.
    ///
    /// Timeout enforcement itself lives in the fetch collaborator; the
    /// core only classifies the outcome.
    #[error("vendor API timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The vendor rejected the session. Retrying without re-auth cannot
    /// succeed, so this is fatal for the coordinator.
    #[error("vendor session rejected: {detail}")]
    Unauthorized { detail: String },

    /// A response arrived but was not an ingestible telemetry map.
    #[error("vendor payload rejected: {0}")]
    Payload(#[from] SnapshotError),
}

impl FetchError {
    /// Whether this error ends the coordinator's rotation for good.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// The one external collaborator the core depends on.
///
/// Everything between the core and the vendor — session handshake, HTTP
/// transport, retry/backoff, request timeout — hides behind this trait.
/// The coordinator is generic over it, so swapping the stub used during
/// key research for a real API client is a construction-site change
/// only.
///
/// `&mut self` because fetchers may carry connection or scripting state;
/// the coordinator owns its fetcher exclusively, which also serializes
/// fetches per §concurrency.
pub trait SnapshotFetcher: Send {
    /// Fetch one raw snapshot, or explain why none is available.
    fn fetch(&mut self) -> impl Future<Output = Result<RawSnapshot, FetchError>> + Send;
}

/// Replays a fixed sequence of fetch outcomes. The test-side fetcher.
///
/// Each call pops the next scripted outcome; an exhausted script yields
/// transport errors, so a test that over-polls fails loudly instead of
/// hanging on fabricated data.
pub struct ScriptedFetcher {
    script: VecDeque<Result<RawSnapshot, FetchError>>,
}

impl ScriptedFetcher {
    pub fn new(script: impl IntoIterator<Item = Result<RawSnapshot, FetchError>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Outcomes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SnapshotFetcher for ScriptedFetcher {
    async fn fetch(&mut self) -> Result<RawSnapshot, FetchError> {
        self.script.pop_front().unwrap_or_else(|| {
            Err(FetchError::Transport {
                detail: "scripted fetcher exhausted".into(),
            })
        })
    }
}

/// Deterministic stand-in for the vendor API.
///
/// Produces the payload captured during the original key research, with
/// battery and clean speed varying round-robin from tick to tick so a
/// demo poll loop visibly changes. Deliberately not random: demos,
/// tests, and snapshots all want the same sequence.
#[derive(Debug, Default)]
pub struct DemoFetcher {
    tick: u64,
}

impl DemoFetcher {
    const BATTERY_LEVELS: [i64; 4] = [85, 88, 91, 94];

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn payload(tick: u64) -> RawSnapshot {
        let battery = Self::BATTERY_LEVELS[(tick % 4) as usize];
        let speed = (tick % 4) as i64;
        RawSnapshot::from_entries([
            ("163", RawValue::Int(battery)),
            ("167", RawValue::Text("PAo6CgUIABC4AhgEGFRKJw==".into())),
            ("177", RawValue::Text("MgowCAEQABgEGlVKFw==".into())),
            ("178", RawValue::Text("OAo2CAEQABgEGlVlIw==".into())),
            ("168", RawValue::Text("QWNjZXNzb3JpZXMgZGF0YSBoZXJl".into())),
            ("153", RawValue::Int(5)),
            ("152", RawValue::Bool(true)),
            ("158", RawValue::Int(speed)),
            ("154", RawValue::Text("Q2xlYW5pbmcgcGFyYW1ldGVycw==".into())),
            ("155", RawValue::Text("RGlyZWN0aW9uIGRhdGE=".into())),
            ("160", RawValue::Bool(false)),
            ("173", RawValue::Text("R28gaG9tZSBkYXRh".into())),
        ])
    }
}

impl SnapshotFetcher for DemoFetcher {
    async fn fetch(&mut self) -> Result<RawSnapshot, FetchError> {
        let snapshot = Self::payload(self.tick);
        self.tick += 1;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_fetcher_replays_in_order() {
        let first = RawSnapshot::from_entries([("163", RawValue::Int(1))]);
        let second = RawSnapshot::from_entries([("163", RawValue::Int(2))]);
        let mut fetcher = ScriptedFetcher::new([Ok(first.clone()), Ok(second.clone())]);

        assert_eq!(fetcher.remaining(), 2);
        assert_eq!(fetcher.fetch().await.unwrap(), first);
        assert_eq!(fetcher.fetch().await.unwrap(), second);
        assert_eq!(fetcher.remaining(), 0);
    }

    #[tokio::test]
    async fn exhausted_script_errors() {
        let mut fetcher = ScriptedFetcher::new([]);
        let result = fetcher.fetch().await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }

    #[tokio::test]
    async fn demo_fetcher_is_deterministic() {
        let mut a = DemoFetcher::new();
        let mut b = DemoFetcher::new();
        for _ in 0..6 {
            assert_eq!(a.fetch().await.unwrap(), b.fetch().await.unwrap());
        }
    }

    #[tokio::test]
    async fn demo_fetcher_varies_battery_and_speed() {
        let mut fetcher = DemoFetcher::new();
        let first = fetcher.fetch().await.unwrap();
        let second = fetcher.fetch().await.unwrap();
        assert_ne!(first.get("163"), second.get("163"));
        assert_ne!(first.get("158"), second.get("158"));
        // The static keys do not move
        assert_eq!(first.get("167"), second.get("167"));
    }

    #[test]
    fn only_unauthorized_is_fatal() {
        assert!(
            FetchError::Unauthorized {
                detail: "token expired".into()
            }
            .is_fatal()
        );
        assert!(
            !FetchError::Transport {
                detail: "refused".into()
            }
            .is_fatal()
        );
        assert!(!FetchError::Timeout { seconds: 30 }.is_fatal());
    }
}
