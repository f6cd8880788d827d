use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::coverage::CoverageReport;
use crate::error::DecoderFailure;
use crate::raw::RawSnapshot;
use crate::reading::Reading;

/// What one decoder produced this cycle: a reading or its failure.
///
/// Failure is a first-class outcome, not an exception path — a cycle
/// with failed decoders is still a successful cycle, and the consumer
/// sees exactly which slots degraded and why.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DecoderOutcome {
  Ok { reading: Reading },
  Failed { failure: DecoderFailure },
}

impl DecoderOutcome {
  #[must_use]
  pub fn is_ok(&self) -> bool {
    matches!(self, Self::Ok { .. })
  }

  #[must_use]
  pub fn reading(&self) -> Option<&Reading> {
    match self {
      Self::Ok { reading } => Some(reading),
      Self::Failed { .. } => None,
    }
  }

  #[must_use]
  pub fn failure(&self) -> Option<&DecoderFailure> {
    match self {
      Self::Failed { failure } => Some(failure),
      Self::Ok { .. } => None,
    }
  }
}

/// Everything one successful poll cycle produced.
///
/// ```text
/// ┌───────────┬──────────────────────────────────────────────────────┐
/// │ Field     │ Meaning                                              │
/// ├───────────┼──────────────────────────────────────────────────────┤
/// │ cycle     │ 1-based, advances only on successful fetches         │
/// │ timestamp │ when processing of this snapshot began (UTC)         │
/// │ snapshot  │ the raw map, complete — display layers truncate,     │
/// │           │ this never does                                      │
/// │ readings  │ decoder name → outcome, every registered decoder     │
/// │ coverage  │ the cycle's coverage report                          │
/// └───────────┴──────────────────────────────────────────────────────┘
/// ```
///
/// A result is assembled whole and handed to the consumer by value; the
/// coordinator keeps only its own copy of the most recent one. Consumers
/// never observe a half-built cycle.
#[derive(Clone, Debug, Serialize)]
pub struct CycleResult {
  pub cycle: u64,
  pub timestamp: DateTime<Utc>,
  pub snapshot: RawSnapshot,
  pub readings: BTreeMap<String, DecoderOutcome>,
  pub coverage: CoverageReport,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::raw::RawValue;
  use crate::reading::{Confidence, ReadingValue};

  fn sample_reading() -> Reading {
    Reading {
      source_keys: vec!["163".into()],
      value: ReadingValue::Percent {
        value: 87,
        band: "high",
      },
      unit: Some("%"),
      confidence: Confidence::new(100),
      method: "raw value",
      raw_inputs: [("163".into(), RawValue::Int(87))].into(),
    }
  }

  #[test]
  fn outcome_accessors() {
    let ok = DecoderOutcome::Ok {
      reading: sample_reading(),
    };
    assert!(ok.is_ok());
    assert!(ok.reading().is_some());
    assert!(ok.failure().is_none());

    let failed = DecoderOutcome::Failed {
      failure: DecoderFailure::MissingKey { key: "167".into() },
    };
    assert!(!failed.is_ok());
    assert!(failed.reading().is_none());
    assert!(failed.failure().is_some());
  }

  #[test]
  fn outcome_serializes_tagged() {
    let failed = DecoderOutcome::Failed {
      failure: DecoderFailure::MissingKey { key: "167".into() },
    };
    let json = serde_json::to_value(&failed).unwrap();
    assert_eq!(json["outcome"], "failed");
    assert_eq!(json["failure"]["kind"], "missing_key");
  }
}
