use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SnapshotError;

/// Identifier of one field in the vendor's raw telemetry map.
///
/// Keys are short numeric strings (`"163"`, `"167"`) and compare
/// case-sensitively as plain strings. The numeric look is a vendor
/// convention, not a promise — no arithmetic is ever done on a key.
pub type KeyId = String;

/// One untyped value from the vendor telemetry map.
///
/// The vendor API returns a flat JSON object whose values are a mix of
/// integers, booleans, plain strings, and base64 text wrapping binary
/// records. This enum preserves each value as received; interpretation
/// (numeric coercion, blob decoding, enum mapping) belongs to the
/// decoders.
///
/// ```text
/// ┌─────────┬────────────────────────────────────────────┐
/// │ Variant │ Vendor shape                               │
/// ├─────────┼────────────────────────────────────────────┤
/// │ Null    │ JSON null — present but empty              │
/// │ Bool    │ play/pause, find-robot toggles             │
/// │ Int     │ battery level, mode codes                  │
/// │ Float   │ rare; non-integral numerics pass through   │
/// │ Text    │ plain strings and base64-wrapped blobs     │
/// └─────────┴────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
  Null,
  Bool(bool),
  Int(i64),
  Float(f64),
  Text(String),
}

impl RawValue {
  /// Strict numeric view: integers, integral floats, and numeric strings.
  ///
  /// Booleans are *not* numbers under this view — a decoder that expects
  /// a level or a code should not silently accept `true`.
  #[must_use]
  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Self::Int(n) => Some(*n),
      // Integral floats appear when a vendor firmware stringifies and
      // re-parses its own numbers. 87.0 is 87; 87.5 is not a level.
      #[allow(clippy::cast_possible_truncation)]
      Self::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
      Self::Text(s) => s.trim().parse().ok(),
      _ => None,
    }
  }

  /// Lenient code view: everything `as_i64` accepts, plus booleans as 0/1.
  ///
  /// Some firmwares send toggle fields as bools, others as 0/1 codes.
  /// Enum-mapping decoders use this view so both shapes hit the same
  /// code table.
  #[must_use]
  pub fn as_code(&self) -> Option<i64> {
    match self {
      Self::Bool(b) => Some(i64::from(*b)),
      other => other.as_i64(),
    }
  }

  /// Short type label for diagnostics (`TypeMismatch` messages).
  #[must_use]
  pub fn type_name(&self) -> &'static str {
    match self {
      Self::Null => "null",
      Self::Bool(_) => "bool",
      Self::Int(_) => "int",
      Self::Float(_) => "float",
      Self::Text(_) => "string",
    }
  }
}

impl fmt::Display for RawValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Null => f.write_str("null"),
      Self::Bool(b) => write!(f, "{b}"),
      Self::Int(n) => write!(f, "{n}"),
      Self::Float(x) => write!(f, "{x}"),
      Self::Text(s) => write!(f, "{s:?}"),
    }
  }
}

/// Display truncation bounds for [`RawSnapshot::preview`].
///
/// Raw blob strings run long; the preview keeps log lines and CLI output
/// bounded. Internal values are never truncated — this applies to display
/// only.
const PREVIEW_MAX_ENTRIES: usize = 20;
const PREVIEW_TEXT_LIMIT: usize = 20;
const PREVIEW_TEXT_PREFIX: usize = 15;

/// One immutable key→value telemetry snapshot as fetched from the vendor.
///
/// A snapshot is valid only for the duration of the poll cycle that
/// fetched it. Decoders and the coverage monitor read it; nothing mutates
/// it. Absence of a key is distinct from a present-but-`Null` value — the
/// latter still counts as present for coverage purposes.
///
/// Keys iterate in sorted order (backing map is a `BTreeMap`), which keeps
/// previews, serialized output, and test expectations deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSnapshot {
  entries: BTreeMap<KeyId, RawValue>,
}

impl RawSnapshot {
  /// Build a snapshot from key/value pairs. Later duplicates win.
  pub fn from_entries<K, I>(entries: I) -> Self
  where
    K: Into<KeyId>,
    I: IntoIterator<Item = (K, RawValue)>,
  {
    Self {
      entries: entries
        .into_iter()
        .map(|(k, v)| (k.into(), v))
        .collect(),
    }
  }

  /// Ingest a vendor payload from an already-parsed JSON value.
  ///
  /// # Errors
  ///
  /// - [`SnapshotError::NotAnObject`] if the payload is not a JSON object.
  /// - [`SnapshotError::UnsupportedValue`] if any value is a nested array
  ///   or object — the vendor map is flat by contract, and a nested value
  ///   means the response is not the telemetry endpoint's.
  pub fn from_json_value(value: Value) -> Result<Self, SnapshotError> {
    let Value::Object(map) = value else {
      return Err(SnapshotError::NotAnObject);
    };

    let mut entries = BTreeMap::new();
    for (key, value) in map {
      let raw = match value {
        Value::Null => RawValue::Null,
        Value::Bool(b) => RawValue::Bool(b),
        Value::Number(n) => match n.as_i64() {
          Some(i) => RawValue::Int(i),
          // u64 overflow or a true float; keep the f64 view either way
          None => RawValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => RawValue::Text(s),
        Value::Array(_) | Value::Object(_) => {
          return Err(SnapshotError::UnsupportedValue { key });
        }
      };
      entries.insert(key, raw);
    }

    Ok(Self { entries })
  }

  /// Ingest a vendor payload from JSON text.
  ///
  /// # Errors
  ///
  /// [`SnapshotError::Json`] for malformed JSON, plus everything
  /// [`from_json_value`](Self::from_json_value) rejects.
  pub fn from_json_str(text: &str) -> Result<Self, SnapshotError> {
    Self::from_json_value(serde_json::from_str(text)?)
  }

  /// Look up one key. `None` means absent, which is not the same as a
  /// present [`RawValue::Null`].
  #[must_use]
  pub fn get(&self, key: &str) -> Option<&RawValue> {
    self.entries.get(key)
  }

  /// Whether the key exists in the snapshot, regardless of its value.
  #[must_use]
  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.contains_key(key)
  }

  /// Keys in sorted order.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  /// Entries in sorted key order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Bounded one-line rendering for logs and CLI output.
  ///
  /// Text values longer than 20 chars truncate to a 15-char prefix plus
  /// `…`, and at most 20 entries are shown with a `(+N more)` marker.
  /// Internal values are never truncated; this is display-only.
  #[must_use]
  pub fn preview(&self) -> String {
    let mut parts = Vec::with_capacity(self.entries.len().min(PREVIEW_MAX_ENTRIES));
    for (key, value) in self.entries.iter().take(PREVIEW_MAX_ENTRIES) {
      match value {
        RawValue::Text(s) if s.chars().count() > PREVIEW_TEXT_LIMIT => {
          let prefix: String = s.chars().take(PREVIEW_TEXT_PREFIX).collect();
          parts.push(format!("{key}={prefix:?}…"));
        }
        other => parts.push(format!("{key}={other}")),
      }
    }
    let shown = parts.join(", ");
    let hidden = self.entries.len().saturating_sub(PREVIEW_MAX_ENTRIES);
    if hidden > 0 {
      format!("{shown} (+{hidden} more)")
    } else {
      shown
    }
  }
}
