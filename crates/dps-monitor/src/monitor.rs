use std::collections::BTreeSet;

use dps_types::{CoverageReport, KeyId, KeyStatus, RawSnapshot};

/// Compare a snapshot against an expected-key list.
///
/// Iterates the *caller's* list, not the snapshot's keys, so ordering
/// and the notion of "expected" stay stable and caller-controlled
/// across cycles. Presence is key existence: a key whose value is null
/// or an empty string still counts as present, because the question
/// this monitor answers is "did the vendor send the field at all", not
/// "was the field useful".
///
/// ```text
/// snapshot {163, 158}  ×  expected [163, 167, 158]
///    │
///    ▼
/// statuses: [163 present, 167 absent, 158 present]
/// found/total: 2/3, ratio 0.667
/// unexpected: []
/// ```
///
/// Observed keys outside the expected set land in the report's
/// `unexpected` list (sorted) — they are visibility, never part of the
/// ratio. Pure function; calling it twice with the same inputs yields
/// identical reports, and any cross-cycle memory belongs to the
/// coordinator.
#[must_use]
pub fn compute_coverage(snapshot: &RawSnapshot, expected: &[KeyId]) -> CoverageReport {
    let statuses: Vec<KeyStatus> = expected
        .iter()
        .map(|key| KeyStatus {
            key: key.clone(),
            expected: true,
            present: snapshot.contains_key(key),
        })
        .collect();

    let expected_set: BTreeSet<&str> = expected.iter().map(String::as_str).collect();
    let unexpected: Vec<KeyId> = snapshot
        .keys()
        .filter(|key| !expected_set.contains(key))
        .map(Into::into)
        .collect();

    CoverageReport::new(statuses, unexpected)
}
