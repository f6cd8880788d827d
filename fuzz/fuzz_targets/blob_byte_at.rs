#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: bounds-checked byte reads at arbitrary offsets.
//
// The read must either return a byte that indexing agrees with, or an
// OutOfRange error carrying the real length — never a panic.
fuzz_target!(|input: (Vec<u8>, usize)| {
    let (bytes, offset) = input;
    let blob = dps_blob::ByteBlob::from_bytes(bytes.clone());
    match blob.byte_at(offset) {
        Ok(byte) => assert_eq!(bytes[offset], byte),
        Err(dps_blob::BlobError::OutOfRange { offset: o, length }) => {
            assert_eq!(o, offset);
            assert_eq!(length, bytes.len());
            assert!(offset >= bytes.len());
        }
        Err(other) => panic!("unexpected error from byte_at: {other}"),
    }
});
