/// Human-readable rendering shared by the `decode`, `coverage`, and
/// `poll` commands. JSON output paths bypass this module entirely and
/// serialize the typed structures directly.
use dps_types::{
    CoverageReport, CycleResult, DecoderOutcome, FieldOutcome, Reading, ReadingValue,
};

/// One line per decoder outcome, aligned for scanning.
///
/// ```text
/// battery      ok      87% (high)           confidence 100  key 163 raw level…
/// water_tank   FAILED  required key "167" missing from snapshot
/// ```
pub fn outcome_lines(readings: impl Iterator<Item = (String, DecoderOutcome)>) -> String {
    let mut lines = Vec::new();
    for (name, outcome) in readings {
        match outcome {
            DecoderOutcome::Ok { reading } => {
                lines.push(format!(
                    "{name:<12} ok      {:<20} confidence {:<4} {}",
                    value_text(&reading),
                    reading.confidence.percent(),
                    reading.method,
                ));
            }
            DecoderOutcome::Failed { failure } => {
                lines.push(format!("{name:<12} FAILED  {failure}"));
            }
        }
    }
    lines.join("\n")
}

/// The short value form: `87% (high)`, `turbo`, `cleaning/playing`.
fn value_text(reading: &Reading) -> String {
    match &reading.value {
        ReadingValue::Percent { value, band } => format!("{value}% ({band})"),
        ReadingValue::CleanSpeed { speed } => speed.to_string(),
        ReadingValue::WorkStatus { status, play_pause } => {
            format!("{}/{}", field_text(status), field_text(play_pause))
        }
    }
}

fn field_text<T: std::fmt::Display>(outcome: &FieldOutcome<T>) -> String {
    match outcome {
        FieldOutcome::Present(value) => value.to_string(),
        FieldOutcome::Missing => "missing".into(),
    }
}

/// Per-key presence table plus the aggregate line.
///
/// ```text
/// 163  PRESENT  battery level (newer app source)
/// 167  absent   water tank record (byte 4)
/// …
/// coverage 9/12 (75.0%), 2 unexpected
/// ```
pub fn coverage_lines(report: &CoverageReport) -> String {
    let mut lines = Vec::new();
    for status in &report.statuses {
        let presence = if status.present { "PRESENT" } else { "absent " };
        let description = dps_monitor::describe_key(&status.key).unwrap_or("");
        lines.push(format!("{:<4} {presence}  {description}", status.key));
    }
    let mut footer = format!(
        "coverage {} ({:.1}%)",
        report.summary(),
        report.ratio * 100.0
    );
    if !report.unexpected.is_empty() {
        footer.push_str(&format!(", {} unexpected", report.unexpected.len()));
    }
    lines.push(footer);
    lines.join("\n")
}

/// The one-line-per-cycle form the poll loop prints.
pub fn cycle_line(result: &CycleResult) -> String {
    let mut parts = Vec::new();
    for (name, outcome) in &result.readings {
        match outcome {
            DecoderOutcome::Ok { reading } => {
                parts.push(format!("{name}={}", value_text(reading)));
            }
            DecoderOutcome::Failed { failure } => {
                parts.push(format!("{name}=!{}", failure_tag(failure)));
            }
        }
    }
    format!(
        "cycle {:<4} coverage {} ({:.1}%)  {}",
        result.cycle,
        result.coverage.summary(),
        result.coverage.ratio * 100.0,
        parts.join("  ")
    )
}

fn failure_tag(failure: &dps_types::DecoderFailure) -> &'static str {
    use dps_types::DecoderFailure as F;
    match failure {
        F::MissingKey { .. } => "missing_key",
        F::TypeMismatch { .. } => "type_mismatch",
        F::UnknownEnumValue { .. } => "unknown_enum_value",
        F::Blob { .. } => "blob_error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dps_types::{Confidence, DecoderFailure, RawValue};

    fn percent_reading() -> Reading {
        Reading {
            source_keys: vec!["163".into()],
            value: ReadingValue::Percent {
                value: 87,
                band: "high",
            },
            unit: Some("%"),
            confidence: Confidence::new(100),
            method: "key 163 raw level",
            raw_inputs: [("163".into(), RawValue::Int(87))].into(),
        }
    }

    #[test]
    fn outcome_lines_cover_both_arms() {
        let rendered = outcome_lines(
            [
                (
                    "battery".to_string(),
                    DecoderOutcome::Ok {
                        reading: percent_reading(),
                    },
                ),
                (
                    "water_tank".to_string(),
                    DecoderOutcome::Failed {
                        failure: DecoderFailure::MissingKey { key: "167".into() },
                    },
                ),
            ]
            .into_iter(),
        );
        assert!(rendered.contains("87% (high)"));
        assert!(rendered.contains("FAILED"));
        assert!(rendered.contains("\"167\""));
    }

    #[test]
    fn cycle_line_tags_failures() {
        let result = CycleResult {
            cycle: 3,
            timestamp: chrono::Utc::now(),
            snapshot: dps_types::RawSnapshot::default(),
            readings: [
                (
                    "battery".to_string(),
                    DecoderOutcome::Ok {
                        reading: percent_reading(),
                    },
                ),
                (
                    "water_tank".to_string(),
                    DecoderOutcome::Failed {
                        failure: DecoderFailure::MissingKey { key: "167".into() },
                    },
                ),
            ]
            .into(),
            coverage: CoverageReport::new(vec![], vec![]),
        };
        let line = cycle_line(&result);
        assert!(line.starts_with("cycle 3"));
        assert!(line.contains("battery=87% (high)"));
        assert!(line.contains("water_tank=!missing_key"));
    }
}
