#![no_main]

use libfuzzer_sys::fuzz_target;

// Any value survives quoting and parsing unchanged.
fuzz_target!(|data: &[u8]| {
    if data.len() > 16 * 1024 {
        return;
    }
    let value = String::from_utf8_lossy(data);
    let tag = tagparser::parse(&format!("k={}", tagparser::quote(&value)))
        .expect("quoted value must parse");
    assert_eq!(tag.get("k"), Some(&*value));
});
