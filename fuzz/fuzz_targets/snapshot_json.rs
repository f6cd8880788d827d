#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: snapshot ingestion from arbitrary JSON text.
//
// Catches bugs in:
// - Flat-object validation (nested values must be rejected, not kept)
// - Number handling across the i64/f64 boundary
// - Preview truncation on pathological key/value shapes
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(snapshot) = dps_types::RawSnapshot::from_json_str(text) {
            let _ = snapshot.preview();
            for (key, _) in snapshot.iter() {
                assert!(snapshot.contains_key(key));
            }
        }
    }
});
