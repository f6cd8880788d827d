#![warn(clippy::pedantic)]

pub mod blob;
pub mod error;

pub use blob::ByteBlob;
pub use error::BlobError;
