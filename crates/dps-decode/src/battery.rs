use dps_types::{
    Confidence, DecoderFailure, RawSnapshot, Reading, ReadingValue, battery_band,
};

use crate::registry::KeyDecoder;

/// The raw key carrying the battery level.
pub const BATTERY_KEY: &str = "163";

/// Battery percentage from key `163`.
///
/// The newer vendor app sources its battery display directly from this
/// key, and during key research it matched the app exactly — hence the
/// 100 confidence rating. The raw value is used as-is: clamped to 0–100
/// for display, with the unclamped original preserved in `raw_inputs`.
///
/// ```text
/// "163": 87  ──▶  Percent { value: 87, band: "high" }
/// "163": 250 ──▶  Percent { value: 100, … }, raw_inputs["163"] = 250
/// ```
pub struct BatteryDecoder;

impl BatteryDecoder {
    const CONFIDENCE: Confidence = Confidence::new(100);
}

impl KeyDecoder for BatteryDecoder {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn source_keys(&self) -> &'static [&'static str] {
        &[BATTERY_KEY]
    }

    fn confidence(&self) -> Confidence {
        Self::CONFIDENCE
    }

    fn unit(&self) -> Option<&'static str> {
        Some("%")
    }

    fn method(&self) -> &'static str {
        "key 163 raw level (newer app source, exact match to vendor display)"
    }

    fn decode(&self, snapshot: &RawSnapshot) -> Result<Reading, DecoderFailure> {
        let raw = snapshot
            .get(BATTERY_KEY)
            .ok_or_else(|| DecoderFailure::MissingKey {
                key: BATTERY_KEY.into(),
            })?;

        let level = raw.as_i64().ok_or_else(|| DecoderFailure::TypeMismatch {
            key: BATTERY_KEY.into(),
            expected: "integer",
            found: raw.type_name(),
        })?;

        // clamp guarantees 0..=100
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let display = level.clamp(0, 100) as u8;

        Ok(Reading {
            source_keys: vec![BATTERY_KEY.into()],
            value: ReadingValue::Percent {
                value: display,
                band: battery_band(display),
            },
            unit: self.unit(),
            confidence: self.confidence(),
            method: self.method(),
            raw_inputs: [(BATTERY_KEY.into(), raw.clone())].into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dps_types::RawValue;

    fn decode(snapshot: &RawSnapshot) -> Result<Reading, DecoderFailure> {
        BatteryDecoder.decode(snapshot)
    }

    #[test]
    fn reads_integer_level() {
        let snapshot = RawSnapshot::from_entries([("163", RawValue::Int(87))]);
        let reading = decode(&snapshot).unwrap();
        assert_eq!(
            reading.value,
            ReadingValue::Percent {
                value: 87,
                band: "high"
            }
        );
        assert_eq!(reading.confidence.percent(), 100);
        assert_eq!(reading.unit, Some("%"));
    }

    #[test]
    fn reads_numeric_string_level() {
        let snapshot = RawSnapshot::from_entries([("163", RawValue::Text("42".into()))]);
        let reading = decode(&snapshot).unwrap();
        assert_eq!(
            reading.value,
            ReadingValue::Percent {
                value: 42,
                band: "medium"
            }
        );
    }

    #[test]
    fn clamps_display_but_preserves_raw() {
        let snapshot = RawSnapshot::from_entries([("163", RawValue::Int(250))]);
        let reading = decode(&snapshot).unwrap();
        assert_eq!(
            reading.value,
            ReadingValue::Percent {
                value: 100,
                band: "high"
            }
        );
        assert_eq!(reading.raw_inputs.get("163"), Some(&RawValue::Int(250)));

        let snapshot = RawSnapshot::from_entries([("163", RawValue::Int(-5))]);
        let reading = decode(&snapshot).unwrap();
        assert_eq!(
            reading.value,
            ReadingValue::Percent {
                value: 0,
                band: "critical"
            }
        );
        assert_eq!(reading.raw_inputs.get("163"), Some(&RawValue::Int(-5)));
    }

    #[test]
    fn missing_key_fails() {
        let snapshot = RawSnapshot::from_entries([("158", RawValue::Int(2))]);
        assert!(matches!(
            decode(&snapshot),
            Err(DecoderFailure::MissingKey { key }) if key == "163"
        ));
    }

    #[test]
    fn non_numeric_value_fails() {
        let snapshot = RawSnapshot::from_entries([("163", RawValue::Text("full".into()))]);
        assert!(matches!(
            decode(&snapshot),
            Err(DecoderFailure::TypeMismatch { found: "string", .. })
        ));

        let snapshot = RawSnapshot::from_entries([("163", RawValue::Bool(true))]);
        assert!(matches!(
            decode(&snapshot),
            Err(DecoderFailure::TypeMismatch { found: "bool", .. })
        ));
    }
}
