#![warn(clippy::pedantic)]

//! Shared fixtures for the integration tests and benches.

use dps_types::{RawSnapshot, RawValue};

/// base64 of `[10, 20, 30, 40, 50]` — the shortest record with a
/// readable byte 4.
pub const FIVE_BYTE_RECORD: &str = "ChQeKDI=";

/// The tank record captured during the original key-167 research
/// (16 bytes, byte 4 = 5).
pub const RESEARCH_TANK_RECORD: &str = "PAo6CgUIABC4AhgEGFRKJw==";

/// A snapshot with only battery and clean speed present — the §"two of
/// three keys" shape used across the coverage scenarios.
#[must_use]
pub fn partial_snapshot() -> RawSnapshot {
    RawSnapshot::from_entries([
        ("163", RawValue::Int(87)),
        ("158", RawValue::Int(2)),
    ])
}

/// A snapshot with every monitored key present, shaped like the vendor
/// payload the key research was done against.
#[must_use]
pub fn full_snapshot() -> RawSnapshot {
    RawSnapshot::from_entries([
        ("163", RawValue::Int(91)),
        ("167", RawValue::Text(RESEARCH_TANK_RECORD.into())),
        ("177", RawValue::Text("MgowCAEQABgEGlVKFw==".into())),
        ("178", RawValue::Text("OAo2CAEQABgEGlVlIw==".into())),
        ("168", RawValue::Text("QWNjZXNzb3JpZXMgZGF0YSBoZXJl".into())),
        ("153", RawValue::Int(5)),
        ("152", RawValue::Bool(true)),
        ("158", RawValue::Int(2)),
        ("154", RawValue::Text("Q2xlYW5pbmcgcGFyYW1ldGVycw==".into())),
        ("155", RawValue::Text("RGlyZWN0aW9uIGRhdGE=".into())),
        ("160", RawValue::Bool(false)),
        ("173", RawValue::Text("R28gaG9tZSBkYXRh".into())),
    ])
}
