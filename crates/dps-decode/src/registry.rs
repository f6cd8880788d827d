use dps_types::{Confidence, DecoderFailure, RawSnapshot, Reading};

use crate::battery::BatteryDecoder;
use crate::clean_speed::CleanSpeedDecoder;
use crate::water_tank::{TankScale, WaterTankDecoder};
use crate::work_status::WorkStatusDecoder;

/// One named extractor from raw snapshot to typed reading.
///
/// Everything about a decoder other than its output is static: its name,
/// the keys it consults, its confidence rating, its unit, and its method
/// description are fixed at registration time. `decode` is a pure
/// function over the snapshot — no side effects, no state, so no
/// synchronization is ever needed around a decode pass.
///
/// ```text
/// RawSnapshot ──▶ KeyDecoder::decode() ──▶ Reading | DecoderFailure
/// ```
///
/// Implementations must treat failure as a return value: a decoder that
/// cannot produce a reading returns the matching [`DecoderFailure`] and
/// must never panic on malformed input. The coordinator relies on this
/// to keep one bad key from taking down a cycle.
pub trait KeyDecoder: Send + Sync {
    /// Stable identifier; becomes the reading's slot name in cycle
    /// results.
    fn name(&self) -> &'static str;

    /// The raw keys this decoder consults, in consultation order.
    fn source_keys(&self) -> &'static [&'static str];

    /// Static empirical accuracy rating.
    fn confidence(&self) -> Confidence;

    /// Display unit, when one applies.
    fn unit(&self) -> Option<&'static str>;

    /// Human-readable provenance trail.
    fn method(&self) -> &'static str;

    /// Extract a typed reading from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`DecoderFailure`] describing exactly what went wrong
    /// with this decoder's slice of the snapshot.
    fn decode(&self, snapshot: &RawSnapshot) -> Result<Reading, DecoderFailure>;
}

/// The ordered set of decoders a coordinator runs each cycle.
///
/// Dispatch is a plain iteration over registered trait objects — no
/// name-based lookup, no reflection. New decoders extend the set by
/// implementing [`KeyDecoder`] and registering; the coordinator never
/// changes.
///
/// ```text
/// ┌──────────────────────────────────────────────┐
/// │ DecoderRegistry                              │
/// │   battery      ← key 163                     │
/// │   water_tank   ← key 167 byte 4              │
/// │   clean_speed  ← key 158                     │
/// │   work_status  ← keys 153 + 152              │
/// │   …            ← anything registered later   │
/// └──────────────────────────────────────────────┘
/// ```
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn KeyDecoder>>,
}

impl DecoderRegistry {
    /// A registry with no decoders. Useful for tests and bespoke setups.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }

    /// The standard set: battery, water tank (default scale), clean
    /// speed, work status.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_tank_scale(TankScale::default())
    }

    /// The standard set with a calibrated water-tank scale.
    #[must_use]
    pub fn with_tank_scale(scale: TankScale) -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(BatteryDecoder));
        registry.register(Box::new(WaterTankDecoder::new(scale)));
        registry.register(Box::new(CleanSpeedDecoder));
        registry.register(Box::new(WorkStatusDecoder));
        registry
    }

    /// Append a decoder. Registration order is iteration order.
    pub fn register(&mut self, decoder: Box<dyn KeyDecoder>) {
        self.decoders.push(decoder);
    }

    /// Decoders in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn KeyDecoder> {
        self.decoders.iter().map(Box::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dps_types::{RawValue, ReadingValue};

    #[test]
    fn standard_registry_order() {
        let registry = DecoderRegistry::standard();
        let names: Vec<_> = registry.iter().map(KeyDecoder::name).collect();
        assert_eq!(
            names,
            vec!["battery", "water_tank", "clean_speed", "work_status"]
        );
    }

    #[test]
    fn empty_registry_has_no_decoders() {
        let registry = DecoderRegistry::empty();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    // A decoder outside this crate's built-ins, registered through the
    // same contract the built-ins use.
    struct FindRobotDecoder;

    impl KeyDecoder for FindRobotDecoder {
        fn name(&self) -> &'static str {
            "find_robot"
        }

        fn source_keys(&self) -> &'static [&'static str] {
            &["160"]
        }

        fn confidence(&self) -> Confidence {
            Confidence::new(100)
        }

        fn unit(&self) -> Option<&'static str> {
            None
        }

        fn method(&self) -> &'static str {
            "key 160 toggle"
        }

        fn decode(&self, snapshot: &RawSnapshot) -> Result<Reading, DecoderFailure> {
            let raw = snapshot
                .get("160")
                .ok_or_else(|| DecoderFailure::MissingKey { key: "160".into() })?;
            let code = raw.as_code().ok_or_else(|| DecoderFailure::TypeMismatch {
                key: "160".into(),
                expected: "bool or integer",
                found: raw.type_name(),
            })?;
            // Abuse Percent for a 0/1 toggle; good enough for the test.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = code.clamp(0, 1) as u8;
            Ok(Reading {
                source_keys: vec!["160".into()],
                value: ReadingValue::Percent { value, band: "high" },
                unit: None,
                confidence: self.confidence(),
                method: self.method(),
                raw_inputs: [("160".into(), raw.clone())].into(),
            })
        }
    }

    #[test]
    fn registry_is_extensible_without_touching_builtins() {
        let mut registry = DecoderRegistry::standard();
        registry.register(Box::new(FindRobotDecoder));
        assert_eq!(registry.len(), 5);

        let snapshot = RawSnapshot::from_entries([("160", RawValue::Bool(true))]);
        let custom = registry
            .iter()
            .find(|d| d.name() == "find_robot")
            .unwrap();
        let reading = custom.decode(&snapshot).unwrap();
        assert_eq!(reading.source_keys, vec!["160".to_string()]);
    }
}
