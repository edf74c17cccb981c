#![no_main]

use libfuzzer_sys::fuzz_target;

// Parsing arbitrary text must never panic; errors must point inside the input.
fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Err(err) = tagparser::parse(&s) {
        if !err.is_too_large() {
            assert!(err.offset() < s.len());
        }
    }
});
