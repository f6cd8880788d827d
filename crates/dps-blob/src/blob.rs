use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use crate::error::BlobError;

/// A decoded, immutable byte sequence extracted from one raw telemetry value.
///
/// Vendor payloads carry several fields as base64 text wrapping a short
/// binary record. `ByteBlob` is the decoded form: an ordered sequence of
/// unsigned bytes whose length is whatever the decode yields (no fixed
/// layout is assumed at this layer — offsets are interpreted by the
/// decoders that consume the blob).
///
/// ```text
/// "PAo6CgUIABC4AhgEGFRKJw=="  ──decode──▶  [0x3c, 0x0a, 0x3a, …]  (16 bytes)
///                                               │
///                                          byte_at(4) ──▶ 0x05
/// ```
///
/// Backed by [`Bytes`], so clones are cheap reference-count bumps and the
/// contents can never be mutated after construction.
///
/// # Example
///
/// ```rust
/// use dps_blob::ByteBlob;
///
/// let blob = ByteBlob::decode("ChQeKDI=").unwrap();
/// assert_eq!(blob.len(), 5);
/// assert_eq!(blob.byte_at(4).unwrap(), 50);
/// assert!(blob.byte_at(5).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBlob {
    bytes: Bytes,
}

impl ByteBlob {
    /// Decode a base64 string into a blob.
    ///
    /// The standard alphabet with canonical padding is required, matching
    /// what the vendor API emits. An empty input yields an empty blob, not
    /// an error — short-read failures surface later, at [`byte_at`].
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::MalformedEncoding`] if the input contains bytes
    /// outside the base64 alphabet or has invalid length/padding.
    ///
    /// [`byte_at`]: Self::byte_at
    pub fn decode(raw: &str) -> Result<Self, BlobError> {
        if raw.is_empty() {
            return Ok(Self::default());
        }
        let decoded = STANDARD.decode(raw)?;
        Ok(Self {
            bytes: Bytes::from(decoded),
        })
    }

    /// Wrap already-decoded bytes. Used by tests and fixtures.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Read the byte at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::OutOfRange`] if `offset >= self.len()`. The
    /// read never clamps to the last byte and never wraps.
    pub fn byte_at(&self, offset: usize) -> Result<u8, BlobError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(BlobError::OutOfRange {
                offset,
                length: self.bytes.len(),
            })
    }

    /// Number of bytes in the blob.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the blob holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The decoded bytes as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Lower-case hex rendering of the whole blob, no separators.
    ///
    /// This is the provenance form shown to debugging consumers alongside
    /// per-byte reads.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}
