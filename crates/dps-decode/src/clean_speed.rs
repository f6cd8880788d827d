use dps_types::{
    CleanSpeed, Confidence, DecoderFailure, RawSnapshot, Reading, ReadingValue,
};

use crate::registry::KeyDecoder;

/// The raw key carrying the suction level code.
pub const CLEAN_SPEED_KEY: &str = "158";

/// Suction level from key `158`.
///
/// The value is an integer code mapped through the fixed
/// [`CleanSpeed`] table (`0 quiet, 1 standard, 2 turbo, 3 max`).
/// Codes outside the table are reported as unmapped rather than
/// rounded to a neighbor.
pub struct CleanSpeedDecoder;

impl CleanSpeedDecoder {
    const CONFIDENCE: Confidence = Confidence::new(100);
}

impl KeyDecoder for CleanSpeedDecoder {
    fn name(&self) -> &'static str {
        "clean_speed"
    }

    fn source_keys(&self) -> &'static [&'static str] {
        &[CLEAN_SPEED_KEY]
    }

    fn confidence(&self) -> Confidence {
        Self::CONFIDENCE
    }

    fn unit(&self) -> Option<&'static str> {
        None
    }

    fn method(&self) -> &'static str {
        "key 158 integer code through the fixed four-speed table"
    }

    fn decode(&self, snapshot: &RawSnapshot) -> Result<Reading, DecoderFailure> {
        let raw = snapshot
            .get(CLEAN_SPEED_KEY)
            .ok_or_else(|| DecoderFailure::MissingKey {
                key: CLEAN_SPEED_KEY.into(),
            })?;

        let code = raw.as_i64().ok_or_else(|| DecoderFailure::TypeMismatch {
            key: CLEAN_SPEED_KEY.into(),
            expected: "integer",
            found: raw.type_name(),
        })?;

        let speed =
            CleanSpeed::from_code(code).ok_or_else(|| DecoderFailure::UnknownEnumValue {
                key: CLEAN_SPEED_KEY.into(),
                enum_name: CleanSpeed::NAME,
                code,
            })?;

        Ok(Reading {
            source_keys: vec![CLEAN_SPEED_KEY.into()],
            value: ReadingValue::CleanSpeed { speed },
            unit: self.unit(),
            confidence: self.confidence(),
            method: self.method(),
            raw_inputs: [(CLEAN_SPEED_KEY.into(), raw.clone())].into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dps_types::RawValue;

    fn decode(snapshot: &RawSnapshot) -> Result<Reading, DecoderFailure> {
        CleanSpeedDecoder.decode(snapshot)
    }

    #[test]
    fn maps_each_documented_code() {
        for (code, speed) in [
            (0, CleanSpeed::Quiet),
            (1, CleanSpeed::Standard),
            (2, CleanSpeed::Turbo),
            (3, CleanSpeed::Max),
        ] {
            let snapshot = RawSnapshot::from_entries([("158", RawValue::Int(code))]);
            let reading = decode(&snapshot).unwrap();
            assert_eq!(reading.value, ReadingValue::CleanSpeed { speed });
        }
    }

    #[test]
    fn unmapped_code_fails_with_the_code() {
        let snapshot = RawSnapshot::from_entries([("158", RawValue::Int(7))]);
        assert!(matches!(
            decode(&snapshot),
            Err(DecoderFailure::UnknownEnumValue {
                code: 7,
                enum_name: "CleanSpeed",
                ..
            })
        ));
    }

    #[test]
    fn missing_key_fails() {
        let snapshot = RawSnapshot::from_entries([("163", RawValue::Int(87))]);
        assert!(matches!(
            decode(&snapshot),
            Err(DecoderFailure::MissingKey { key }) if key == "158"
        ));
    }

    #[test]
    fn non_integer_value_fails() {
        let snapshot = RawSnapshot::from_entries([("158", RawValue::Bool(true))]);
        assert!(matches!(
            decode(&snapshot),
            Err(DecoderFailure::TypeMismatch { found: "bool", .. })
        ));
    }
}
