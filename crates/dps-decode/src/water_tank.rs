use dps_blob::ByteBlob;
use dps_types::{
    Confidence, DecoderFailure, RawSnapshot, RawValue, Reading, ReadingValue, tank_band,
};

use crate::registry::KeyDecoder;

/// The raw key carrying the encoded tank record.
pub const WATER_TANK_KEY: &str = "167";

/// Offset of the tank level byte inside the decoded record.
pub const WATER_TANK_BYTE: usize = 4;

/// Calibration for the raw-byte → percentage mapping.
///
/// The exact scale is still under calibration: the working method maps
/// `full_raw` to 100% linearly (the observed raw 210 reads as 82%
/// against a real 83% under the 255 default). Holding the constant here
/// rather than in the decoder body means recalibration is a constructor
/// argument, not a code change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TankScale {
    /// Raw byte value that maps to 100%.
    pub full_raw: u8,
}

impl Default for TankScale {
    fn default() -> Self {
        Self { full_raw: 255 }
    }
}

impl TankScale {
    /// Map a raw byte to a 0–100 percentage.
    #[must_use]
    pub fn percent(self, raw: u8) -> u8 {
        // full_raw 0 would divide by zero; treat it as the tightest scale
        let full = u32::from(self.full_raw.max(1));
        let pct = u32::from(raw) * 100 / full;
        // min guarantees 0..=100
        #[allow(clippy::cast_possible_truncation)]
        {
            pct.min(100) as u8
        }
    }
}

/// Water tank level from key `167`, byte 4.
///
/// The key's value is base64 text wrapping a short binary record; byte 4
/// of that record tracks the tank level. Key research put this source at
/// roughly 82% accuracy against the physical tank, hence the confidence
/// rating.
///
/// ```text
/// "167": "PAo6CgUIABC4AhgEGFRKJw=="
///    │ base64 decode
///    ▼
/// [0x3c, 0x0a, 0x3a, 0x0a, 0x05, …]
///              byte 4 ────┘
///    │ TankScale::percent (default 255 → 100)
///    ▼
/// Percent { value: 1, band: "empty" }
/// ```
///
/// Decode and offset failures surface as `DecoderFailure::Blob` with the
/// extractor's error as the cause; a record shorter than 5 bytes is a
/// failure, never a silent zero.
pub struct WaterTankDecoder {
    scale: TankScale,
}

impl WaterTankDecoder {
    const CONFIDENCE: Confidence = Confidence::new(82);

    #[must_use]
    pub fn new(scale: TankScale) -> Self {
        Self { scale }
    }

    #[must_use]
    pub fn scale(&self) -> TankScale {
        self.scale
    }
}

impl Default for WaterTankDecoder {
    fn default() -> Self {
        Self::new(TankScale::default())
    }
}

impl KeyDecoder for WaterTankDecoder {
    fn name(&self) -> &'static str {
        "water_tank"
    }

    fn source_keys(&self) -> &'static [&'static str] {
        &[WATER_TANK_KEY]
    }

    fn confidence(&self) -> Confidence {
        Self::CONFIDENCE
    }

    fn unit(&self) -> Option<&'static str> {
        Some("%")
    }

    fn method(&self) -> &'static str {
        "key 167 record byte 4, linear scale to 0-100 (calibratable)"
    }

    fn decode(&self, snapshot: &RawSnapshot) -> Result<Reading, DecoderFailure> {
        let raw = snapshot
            .get(WATER_TANK_KEY)
            .ok_or_else(|| DecoderFailure::MissingKey {
                key: WATER_TANK_KEY.into(),
            })?;

        let RawValue::Text(encoded) = raw else {
            return Err(DecoderFailure::TypeMismatch {
                key: WATER_TANK_KEY.into(),
                expected: "base64 string",
                found: raw.type_name(),
            });
        };

        let blob = ByteBlob::decode(encoded).map_err(|cause| DecoderFailure::Blob {
            key: WATER_TANK_KEY.into(),
            cause,
        })?;
        let level_byte = blob
            .byte_at(WATER_TANK_BYTE)
            .map_err(|cause| DecoderFailure::Blob {
                key: WATER_TANK_KEY.into(),
                cause,
            })?;

        let percent = self.scale.percent(level_byte);

        Ok(Reading {
            source_keys: vec![WATER_TANK_KEY.into()],
            value: ReadingValue::Percent {
                value: percent,
                band: tank_band(percent),
            },
            unit: self.unit(),
            confidence: self.confidence(),
            method: self.method(),
            raw_inputs: [(WATER_TANK_KEY.into(), raw.clone())].into(),
        })
    }
}
