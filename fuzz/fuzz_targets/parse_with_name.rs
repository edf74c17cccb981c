#![no_main]

use libfuzzer_sys::fuzz_target;

// Name extraction must agree with options mode once the name is set aside.
fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let named = tagparser::parse_with_name(&format!("field,{s}"));
    let unnamed = tagparser::parse(&format!(",{s}"));
    match (named, unnamed) {
        (Ok(named), Ok(unnamed)) => {
            assert_eq!(named.name, "field");
            assert_eq!(named.options, unnamed.options);
        }
        (Err(a), Err(b)) => assert_eq!(a.kind(), b.kind()),
        (a, b) => panic!("modes disagree: {a:?} vs {b:?}"),
    }
});
