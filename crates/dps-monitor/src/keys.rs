use dps_types::KeyId;

/// One monitored key and what the key research established about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInfo {
    pub key: &'static str,
    pub description: &'static str,
}

/// The telemetry keys worth watching, in reporting order.
///
/// This is the default expected-key set for coverage monitoring. The
/// order is the reporting order established during key research: the
/// decoded sources first, then the still-opaque candidates.
///
/// ```text
/// ┌─────┬──────────────────────────────────────────────┐
/// │ Key │ Meaning                                      │
/// ├─────┼──────────────────────────────────────────────┤
/// │ 163 │ battery level (newer app source)             │
/// │ 167 │ water tank record (byte 4)                   │
/// │ 177 │ alternate water tank source                  │
/// │ 178 │ real-time data                               │
/// │ 168 │ accessories status                           │
/// │ 153 │ work status / mode                           │
/// │ 152 │ play/pause                                   │
/// │ 158 │ clean speed                                  │
/// │ 154 │ cleaning parameters                          │
/// │ 155 │ direction controls                           │
/// │ 160 │ find robot                                   │
/// │ 173 │ go home                                      │
/// └─────┴──────────────────────────────────────────────┘
/// ```
pub const MONITORED_KEYS: [KeyInfo; 12] = [
    KeyInfo { key: "163", description: "battery level (newer app source)" },
    KeyInfo { key: "167", description: "water tank record (byte 4)" },
    KeyInfo { key: "177", description: "alternate water tank source" },
    KeyInfo { key: "178", description: "real-time data" },
    KeyInfo { key: "168", description: "accessories status" },
    KeyInfo { key: "153", description: "work status / mode" },
    KeyInfo { key: "152", description: "play/pause" },
    KeyInfo { key: "158", description: "clean speed" },
    KeyInfo { key: "154", description: "cleaning parameters" },
    KeyInfo { key: "155", description: "direction controls" },
    KeyInfo { key: "160", description: "find robot" },
    KeyInfo { key: "173", description: "go home" },
];

/// The monitored keys as an owned expected-key list, in table order.
#[must_use]
pub fn default_expected_keys() -> Vec<KeyId> {
    MONITORED_KEYS.iter().map(|info| info.key.into()).collect()
}

/// Description for a monitored key, if it is one.
#[must_use]
pub fn describe_key(key: &str) -> Option<&'static str> {
    MONITORED_KEYS
        .iter()
        .find(|info| info.key == key)
        .map(|info| info.description)
}
