use serde::Serialize;

/// Errors that can occur while extracting bytes from an encoded blob value.
///
/// The extractor validates at two levels: the base64 text itself, and the
/// offset of any subsequent byte read. Each variant captures enough context
/// for meaningful diagnostics without holding onto the input.
///
/// ```text
///   BlobError
///   ├── MalformedEncoding   ← input is not valid base64 (alphabet/padding)
///   └── OutOfRange          ← byte read past the end of the decoded blob
/// ```
///
/// `MalformedEncoding` is only produced by [`ByteBlob::decode`] and
/// `OutOfRange` only by [`ByteBlob::byte_at`]; the shared enum exists so
/// callers that chain decode-then-read can wrap one failure type.
///
/// [`ByteBlob::decode`]: crate::ByteBlob::decode
/// [`ByteBlob::byte_at`]: crate::ByteBlob::byte_at
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlobError {
    /// The input string is not valid base64.
    ///
    /// The `detail` string is the underlying decoder's diagnostic (invalid
    /// byte, bad length, bad padding). Stored as text so the error stays
    /// cheap to clone and serialize.
    #[error("malformed base64 encoding: {detail}")]
    MalformedEncoding { detail: String },

    /// A byte read past the end of the decoded blob.
    ///
    /// Reads never clamp or wrap; an offset equal to or beyond the blob
    /// length is always reported, with both sides of the comparison.
    #[error("byte offset {offset} out of range for blob of {length} bytes")]
    OutOfRange { offset: usize, length: usize },
}

impl From<base64::DecodeError> for BlobError {
    fn from(err: base64::DecodeError) -> Self {
        Self::MalformedEncoding {
            detail: err.to_string(),
        }
    }
}
