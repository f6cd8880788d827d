use dps_types::{
    Confidence, DecoderFailure, FieldOutcome, PlayPause, RawSnapshot, Reading, ReadingValue,
    WorkState,
};

use crate::registry::KeyDecoder;

/// The raw key carrying the activity state code.
pub const WORK_STATUS_KEY: &str = "153";

/// The raw key carrying the run/pause toggle.
pub const PLAY_PAUSE_KEY: &str = "152";

/// Composite activity reading from keys `153` (state) and `152`
/// (run/pause).
///
/// The two codes map through their own tables and combine into one
/// reading. Multi-source decoding degrades gracefully: if one key is
/// absent, the present sub-value is still reported and the other is
/// flagged `Missing` inside the reading — one signal is still
/// actionable for a debugging consumer. Only when *both* sources are
/// absent does the decoder fail, since there is nothing to report.
///
/// ```text
/// "153": 5, "152": true ──▶ WorkStatus { status: cleaning, play_pause: playing }
/// "153": 1              ──▶ WorkStatus { status: sleep,    play_pause: Missing }
/// (neither key)         ──▶ DecoderFailure::MissingKey("153")
/// ```
///
/// A key that is present but carries a non-code value or an unmapped
/// code is a real failure, not a `Missing` flag — partial success covers
/// absence only, never corruption.
pub struct WorkStatusDecoder;

impl WorkStatusDecoder {
    // The combined 153+152 mapping is still being validated against
    // device behavior across firmware revisions.
    const CONFIDENCE: Confidence = Confidence::new(95);
}

impl KeyDecoder for WorkStatusDecoder {
    fn name(&self) -> &'static str {
        "work_status"
    }

    fn source_keys(&self) -> &'static [&'static str] {
        &[WORK_STATUS_KEY, PLAY_PAUSE_KEY]
    }

    fn confidence(&self) -> Confidence {
        Self::CONFIDENCE
    }

    fn unit(&self) -> Option<&'static str> {
        None
    }

    fn method(&self) -> &'static str {
        "keys 153 (state table) + 152 (run/pause toggle), combined"
    }

    fn decode(&self, snapshot: &RawSnapshot) -> Result<Reading, DecoderFailure> {
        let status_raw = snapshot.get(WORK_STATUS_KEY);
        let play_raw = snapshot.get(PLAY_PAUSE_KEY);

        if status_raw.is_none() && play_raw.is_none() {
            return Err(DecoderFailure::MissingKey {
                key: WORK_STATUS_KEY.into(),
            });
        }

        let status = match status_raw {
            None => FieldOutcome::Missing,
            Some(raw) => {
                let code = raw.as_i64().ok_or_else(|| DecoderFailure::TypeMismatch {
                    key: WORK_STATUS_KEY.into(),
                    expected: "integer",
                    found: raw.type_name(),
                })?;
                let state = WorkState::from_code(code).ok_or_else(|| {
                    DecoderFailure::UnknownEnumValue {
                        key: WORK_STATUS_KEY.into(),
                        enum_name: WorkState::NAME,
                        code,
                    }
                })?;
                FieldOutcome::Present(state)
            }
        };

        let play_pause = match play_raw {
            None => FieldOutcome::Missing,
            Some(raw) => {
                // as_code: bools and 0/1 codes both appear in the wild
                let code = raw.as_code().ok_or_else(|| DecoderFailure::TypeMismatch {
                    key: PLAY_PAUSE_KEY.into(),
                    expected: "bool or integer",
                    found: raw.type_name(),
                })?;
                let toggle = PlayPause::from_code(code).ok_or_else(|| {
                    DecoderFailure::UnknownEnumValue {
                        key: PLAY_PAUSE_KEY.into(),
                        enum_name: PlayPause::NAME,
                        code,
                    }
                })?;
                FieldOutcome::Present(toggle)
            }
        };

        let mut raw_inputs = std::collections::BTreeMap::new();
        if let Some(raw) = status_raw {
            raw_inputs.insert(WORK_STATUS_KEY.into(), raw.clone());
        }
        if let Some(raw) = play_raw {
            raw_inputs.insert(PLAY_PAUSE_KEY.into(), raw.clone());
        }

        Ok(Reading {
            source_keys: vec![WORK_STATUS_KEY.into(), PLAY_PAUSE_KEY.into()],
            value: ReadingValue::WorkStatus { status, play_pause },
            unit: self.unit(),
            confidence: self.confidence(),
            method: self.method(),
            raw_inputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dps_types::RawValue;

    fn decode(snapshot: &RawSnapshot) -> Result<Reading, DecoderFailure> {
        WorkStatusDecoder.decode(snapshot)
    }

    #[test]
    fn both_sources_present() {
        let snapshot = RawSnapshot::from_entries([
            ("153", RawValue::Int(5)),
            ("152", RawValue::Bool(true)),
        ]);
        let reading = decode(&snapshot).unwrap();
        assert_eq!(
            reading.value,
            ReadingValue::WorkStatus {
                status: FieldOutcome::Present(WorkState::Cleaning),
                play_pause: FieldOutcome::Present(PlayPause::Playing),
            }
        );
        assert_eq!(reading.raw_inputs.len(), 2);
    }

    #[test]
    fn missing_toggle_degrades_to_partial_reading() {
        let snapshot = RawSnapshot::from_entries([("153", RawValue::Int(1))]);
        let reading = decode(&snapshot).unwrap();
        assert_eq!(
            reading.value,
            ReadingValue::WorkStatus {
                status: FieldOutcome::Present(WorkState::Sleep),
                play_pause: FieldOutcome::Missing,
            }
        );
        // Only the consulted key appears in raw_inputs
        assert!(reading.raw_inputs.contains_key("153"));
        assert!(!reading.raw_inputs.contains_key("152"));
    }

    #[test]
    fn missing_state_degrades_to_partial_reading() {
        let snapshot = RawSnapshot::from_entries([("152", RawValue::Int(0))]);
        let reading = decode(&snapshot).unwrap();
        assert_eq!(
            reading.value,
            ReadingValue::WorkStatus {
                status: FieldOutcome::Missing,
                play_pause: FieldOutcome::Present(PlayPause::Paused),
            }
        );
    }

    #[test]
    fn both_sources_absent_is_a_failure() {
        let snapshot = RawSnapshot::from_entries([("163", RawValue::Int(87))]);
        assert!(matches!(
            decode(&snapshot),
            Err(DecoderFailure::MissingKey { key }) if key == "153"
        ));
    }

    #[test]
    fn toggle_accepts_bool_and_integer_shapes() {
        for raw in [RawValue::Bool(false), RawValue::Int(0)] {
            let snapshot =
                RawSnapshot::from_entries([("153", RawValue::Int(3)), ("152", raw)]);
            let reading = decode(&snapshot).unwrap();
            assert_eq!(
                reading.value,
                ReadingValue::WorkStatus {
                    status: FieldOutcome::Present(WorkState::Charging),
                    play_pause: FieldOutcome::Present(PlayPause::Paused),
                }
            );
        }
    }

    #[test]
    fn unmapped_state_code_is_a_failure_not_a_flag() {
        let snapshot = RawSnapshot::from_entries([
            ("153", RawValue::Int(42)),
            ("152", RawValue::Bool(true)),
        ]);
        assert!(matches!(
            decode(&snapshot),
            Err(DecoderFailure::UnknownEnumValue {
                code: 42,
                enum_name: "WorkState",
                ..
            })
        ));
    }

    #[test]
    fn corrupt_present_toggle_is_a_failure() {
        let snapshot = RawSnapshot::from_entries([
            ("153", RawValue::Int(5)),
            ("152", RawValue::Text("maybe".into())),
        ]);
        assert!(matches!(
            decode(&snapshot),
            Err(DecoderFailure::TypeMismatch { key, .. }) if key == "152"
        ));
    }
}
