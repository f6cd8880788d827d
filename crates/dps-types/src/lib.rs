#![warn(clippy::pedantic)]

pub mod coverage;
pub mod cycle;
pub mod enums;
pub mod error;
pub mod raw;
pub mod reading;

pub use coverage::{CoverageReport, KeyStatus};
pub use cycle::{CycleResult, DecoderOutcome};
pub use enums::{CleanSpeed, PlayPause, WorkState};
pub use error::{DecoderFailure, SnapshotError};
pub use raw::{KeyId, RawSnapshot, RawValue};
pub use reading::{
  Confidence, FieldOutcome, Reading, ReadingValue, battery_band, tank_band,
};
