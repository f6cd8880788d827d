use std::collections::BTreeMap;

use serde::Serialize;

use crate::enums::{CleanSpeed, PlayPause, WorkState};
use crate::raw::{KeyId, RawValue};

/// A decoder's static accuracy rating, 0–100.
///
/// Confidence encodes *known empirical accuracy* established during key
/// research (key 163 matched the vendor app exactly; key 167 byte 4
/// tracked the real tank level to within a point). It is a property of
/// the decoder, never recomputed per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Confidence(u8);

impl Confidence {
  /// Build a rating, saturating at 100.
  #[must_use]
  pub const fn new(percent: u8) -> Self {
    Self(if percent > 100 { 100 } else { percent })
  }

  #[must_use]
  pub const fn percent(self) -> u8 {
    self.0
  }
}

/// Presence of one sub-field inside a composite reading.
///
/// Multi-source decoders degrade gracefully: when one of their source
/// keys is absent, the present sub-value is still reported and the
/// missing one is flagged here, instead of failing the whole decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum FieldOutcome<T> {
  Present(T),
  Missing,
}

impl<T> FieldOutcome<T> {
  #[must_use]
  pub fn is_present(&self) -> bool {
    matches!(self, Self::Present(_))
  }

  #[must_use]
  pub fn value(&self) -> Option<&T> {
    match self {
      Self::Present(v) => Some(v),
      Self::Missing => None,
    }
  }
}

/// The typed payload of one reading.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReadingValue {
  /// A 0–100 display percentage with its derived level band.
  ///
  /// The band label is what upstream debugging consumers key on
  /// (battery `critical`/`low`/`medium`/`high`, tank
  /// `empty`/`low`/`medium`/`full`); which band table applies is the
  /// owning decoder's choice.
  Percent { value: u8, band: &'static str },

  /// Suction level mapped from key `158`.
  CleanSpeed { speed: CleanSpeed },

  /// Composite activity reading from keys `153` + `152`.
  ///
  /// Either sub-field may be `Missing` without the reading as a whole
  /// failing — one present signal is still actionable.
  WorkStatus {
    status: FieldOutcome<WorkState>,
    play_pause: FieldOutcome<PlayPause>,
  },
}

/// One decoded, typed, provenance-tagged sensor reading.
///
/// Created fresh each poll cycle and never mutated afterwards; the cycle
/// result that carries it is handed to the consumer by value, so no
/// reading outlives the cycle that produced it unless the consumer keeps
/// it.
///
/// ```text
/// ┌──────────────┬───────────────────────────────────────────────────┐
/// │ Field        │ Meaning                                           │
/// ├──────────────┼───────────────────────────────────────────────────┤
/// │ source_keys  │ the raw keys consulted, in consultation order     │
/// │ value        │ the typed result                                  │
/// │ unit         │ display unit, when one applies                    │
/// │ confidence   │ the decoder's static accuracy rating              │
/// │ method       │ human-readable provenance trail                   │
/// │ raw_inputs   │ verbatim copies of the raw values consulted       │
/// └──────────────┴───────────────────────────────────────────────────┘
/// ```
///
/// `raw_inputs` preserves values unclamped and undecoded — the battery
/// reading clamps its display value to 0–100 but the raw `163` entry
/// here keeps whatever the vendor sent.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reading {
  pub source_keys: Vec<KeyId>,
  pub value: ReadingValue,
  pub unit: Option<&'static str>,
  pub confidence: Confidence,
  pub method: &'static str,
  pub raw_inputs: BTreeMap<KeyId, RawValue>,
}

// ── Level bands ───────────────────────────────────────────────────────
//
// Threshold tables match the upstream debug sensors. Each band covers
// values up to and including its threshold.

/// Battery band: `critical ≤10 < low ≤20 < medium ≤50 < high`.
#[must_use]
pub fn battery_band(percent: u8) -> &'static str {
  match percent {
    0..=10 => "critical",
    11..=20 => "low",
    21..=50 => "medium",
    _ => "high",
  }
}

/// Water tank band: `empty ≤10 < low ≤30 < medium ≤70 < full`.
#[must_use]
pub fn tank_band(percent: u8) -> &'static str {
  match percent {
    0..=10 => "empty",
    11..=30 => "low",
    31..=70 => "medium",
    _ => "full",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn confidence_saturates_at_100() {
    assert_eq!(Confidence::new(82).percent(), 82);
    assert_eq!(Confidence::new(100).percent(), 100);
    assert_eq!(Confidence::new(250).percent(), 100);
  }

  #[test]
  fn battery_band_boundaries() {
    assert_eq!(battery_band(0), "critical");
    assert_eq!(battery_band(10), "critical");
    assert_eq!(battery_band(11), "low");
    assert_eq!(battery_band(20), "low");
    assert_eq!(battery_band(21), "medium");
    assert_eq!(battery_band(50), "medium");
    assert_eq!(battery_band(51), "high");
    assert_eq!(battery_band(100), "high");
  }

  #[test]
  fn tank_band_boundaries() {
    assert_eq!(tank_band(10), "empty");
    assert_eq!(tank_band(11), "low");
    assert_eq!(tank_band(30), "low");
    assert_eq!(tank_band(31), "medium");
    assert_eq!(tank_band(70), "medium");
    assert_eq!(tank_band(71), "full");
  }

  #[test]
  fn field_outcome_accessors() {
    let present = FieldOutcome::Present(WorkState::Cleaning);
    let missing: FieldOutcome<WorkState> = FieldOutcome::Missing;
    assert!(present.is_present());
    assert_eq!(present.value(), Some(&WorkState::Cleaning));
    assert!(!missing.is_present());
    assert_eq!(missing.value(), None);
  }

  #[test]
  fn field_outcome_serialization_shape() {
    let present = FieldOutcome::Present(PlayPause::Playing);
    let json = serde_json::to_value(present).unwrap();
    assert_eq!(json["state"], "present");
    assert_eq!(json["value"], "playing");

    let missing: FieldOutcome<PlayPause> = FieldOutcome::Missing;
    let json = serde_json::to_value(missing).unwrap();
    assert_eq!(json["state"], "missing");
  }

  #[test]
  fn reading_value_serializes_tagged() {
    let value = ReadingValue::Percent {
      value: 87,
      band: battery_band(87),
    };
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(json["type"], "percent");
    assert_eq!(json["value"], 87);
    assert_eq!(json["band"], "high");
  }
}
