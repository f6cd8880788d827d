#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: ByteBlob::decode with arbitrary text.
//
// Catches bugs in:
// - Base64 alphabet/padding rejection
// - Empty-input handling
// - Hex rendering of whatever decoded
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(blob) = dps_blob::ByteBlob::decode(text) {
            let _ = blob.to_hex();
        }
    }
});
