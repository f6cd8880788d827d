use serde::Serialize;

use dps_blob::BlobError;

use crate::raw::KeyId;

/// One decoder's failure for one poll cycle.
///
/// Failures are data, not control flow: a failing decoder's slot in the
/// cycle result holds one of these, and every other decoder plus the
/// coverage computation still runs. Nothing here ever aborts a cycle.
///
/// ```text
///   DecoderFailure
///   ├── MissingKey        ← required source key absent from the snapshot
///   ├── TypeMismatch      ← key present but the value has the wrong shape
///   ├── UnknownEnumValue  ← integer code outside the documented table
///   └── Blob              ← wraps BlobError from the byte extractor
/// ```
///
/// `Blob` is the only place extractor errors surface — a raw
/// [`BlobError`] never escapes a decoder unclassified.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecoderFailure {
  /// A required source key was absent from the snapshot.
  ///
  /// Absence means the key does not exist at all; a present-but-null
  /// value is a [`TypeMismatch`](Self::TypeMismatch) instead.
  #[error("required key {key:?} missing from snapshot")]
  MissingKey { key: KeyId },

  /// The key is present but its value has the wrong shape.
  ///
  /// `expected` and `found` are short type labels
  /// (see `RawValue::type_name`) for the diagnostic message.
  #[error("key {key:?} holds a {found} value, expected {expected}")]
  TypeMismatch {
    key: KeyId,
    expected: &'static str,
    found: &'static str,
  },

  /// An integer code fell outside the decoder's documented enum table.
  #[error("unmapped {enum_name} code {code} at key {key:?}")]
  UnknownEnumValue {
    key: KeyId,
    enum_name: &'static str,
    code: i64,
  },

  /// Byte extraction from an encoded blob value failed.
  ///
  /// Covers both malformed base64 and out-of-range offset reads; the
  /// `cause` distinguishes them.
  #[error("blob extraction failed for key {key:?}: {cause}")]
  Blob { key: KeyId, cause: BlobError },
}

impl DecoderFailure {
  /// The source key the failure is about.
  #[must_use]
  pub fn key(&self) -> &str {
    match self {
      Self::MissingKey { key }
      | Self::TypeMismatch { key, .. }
      | Self::UnknownEnumValue { key, .. }
      | Self::Blob { key, .. } => key,
    }
  }
}

/// Errors rejecting a vendor payload before it becomes a snapshot.
///
/// These belong to ingestion, not decoding: a payload that fails here
/// never produces a snapshot, so no cycle runs against it. Contrast with
/// [`DecoderFailure`], which always leaves the cycle intact.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
  /// The payload's top level is not a JSON object.
  #[error("vendor payload is not a JSON object")]
  NotAnObject,

  /// A value is a nested array or object; the telemetry map is flat.
  #[error("unsupported nested value at key {key:?}")]
  UnsupportedValue { key: KeyId },

  /// The payload text is not valid JSON.
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}
