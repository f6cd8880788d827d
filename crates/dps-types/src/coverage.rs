use serde::Serialize;

use crate::raw::KeyId;

/// Presence verdict for one monitored key in one cycle.
///
/// `expected` is always true for entries produced from the caller's
/// expected-key list; the field is kept so a serialized report stays
/// self-describing when read without that list at hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeyStatus {
  pub key: KeyId,
  pub expected: bool,
  pub present: bool,
}

/// Per-cycle report of which expected telemetry keys actually arrived.
///
/// ```text
/// ┌────────────────┬─────────────────────────────────────────────────┐
/// │ Field          │ Meaning                                         │
/// ├────────────────┼─────────────────────────────────────────────────┤
/// │ statuses       │ one entry per expected key, caller's order      │
/// │ found_count    │ expected keys that were present                 │
/// │ total_expected │ number of expected keys                         │
/// │ ratio          │ found/total, 0.0 when total is 0                │
/// │ unexpected     │ observed keys outside the expected set          │
/// └────────────────┴─────────────────────────────────────────────────┘
/// ```
///
/// Invariants: `found_count <= total_expected` and `0.0 <= ratio <= 1.0`
/// always hold; `unexpected` never influences either. Both counts are
/// derived from `statuses` at construction, so a report cannot carry
/// numbers that disagree with its own entries.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CoverageReport {
  pub statuses: Vec<KeyStatus>,
  pub found_count: usize,
  pub total_expected: usize,
  pub ratio: f64,
  pub unexpected: Vec<KeyId>,
}

impl CoverageReport {
  /// Assemble a report, deriving the counts and ratio from `statuses`.
  ///
  /// Only entries with `expected == true` count toward the totals, which
  /// keeps `found_count <= total_expected` even if a caller mixes in
  /// unexpected-key statuses.
  #[must_use]
  pub fn new(statuses: Vec<KeyStatus>, unexpected: Vec<KeyId>) -> Self {
    let total_expected = statuses.iter().filter(|s| s.expected).count();
    let found_count = statuses
      .iter()
      .filter(|s| s.expected && s.present)
      .count();
    // Guard the empty-expectation case rather than dividing by zero.
    #[allow(clippy::cast_precision_loss)]
    let ratio = if total_expected == 0 {
      0.0
    } else {
      found_count as f64 / total_expected as f64
    };
    Self {
      statuses,
      found_count,
      total_expected,
      ratio,
      unexpected,
    }
  }

  /// Compact `found/total` form, as the upstream monitoring sensor
  /// displayed it.
  #[must_use]
  pub fn summary(&self) -> String {
    format!("{}/{}", self.found_count, self.total_expected)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn status(key: &str, present: bool) -> KeyStatus {
    KeyStatus {
      key: key.into(),
      expected: true,
      present,
    }
  }

  #[test]
  fn counts_and_ratio_derive_from_statuses() {
    let report = CoverageReport::new(
      vec![status("163", true), status("167", false), status("158", true)],
      vec![],
    );
    assert_eq!(report.found_count, 2);
    assert_eq!(report.total_expected, 3);
    assert!((report.ratio - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(report.summary(), "2/3");
  }

  #[test]
  fn empty_expectation_has_zero_ratio() {
    let report = CoverageReport::new(vec![], vec!["163".into()]);
    assert_eq!(report.total_expected, 0);
    assert_eq!(report.found_count, 0);
    assert_eq!(report.ratio, 0.0);
  }

  #[test]
  fn ratio_stays_in_unit_interval() {
    let all_present = CoverageReport::new(
      vec![status("163", true), status("167", true)],
      vec![],
    );
    assert_eq!(all_present.ratio, 1.0);

    let none_present = CoverageReport::new(
      vec![status("163", false), status("167", false)],
      vec![],
    );
    assert_eq!(none_present.ratio, 0.0);
  }

  #[test]
  fn unexpected_keys_never_affect_counts() {
    let report = CoverageReport::new(
      vec![status("163", true)],
      vec!["154".into(), "155".into()],
    );
    assert_eq!(report.found_count, 1);
    assert_eq!(report.total_expected, 1);
    assert_eq!(report.ratio, 1.0);
    assert_eq!(report.unexpected.len(), 2);
  }
}
