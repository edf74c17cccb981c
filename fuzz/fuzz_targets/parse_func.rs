#![no_main]

use std::collections::HashMap;
use std::convert::Infallible;

use libfuzzer_sys::fuzz_target;

// The callback path never sees an empty key and collects the same map as `parse`.
fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let mut collected = HashMap::new();
    let func = tagparser::parse_func(&s, |key, value| {
        assert!(!key.is_empty(), "empty key for {s:?}");
        collected.insert(key.to_owned(), value.to_owned());
        Ok::<(), Infallible>(())
    });
    if let (Ok(()), Ok(tag)) = (func, tagparser::parse(&s)) {
        assert_eq!(tag.options, collected);
    }
});
