//! Benchmarking harness. This is run periodically during development to make sure
//! the scanner does not get slower, in particular on the callback path that
//! should not allocate for plain tags.

use std::collections::HashMap;
use std::convert::Infallible;
use std::hint::black_box;
use std::time::{Duration, Instant};

use tagparser::{Error, parse, parse_func, parse_func_with_name, parse_with_name};

const ROUNDS: u32 = 200_000;

const SIMPLE: &str = "json,omitempty,min=5";
const SIMPLE_LONG: &str = "json,omitempty,required,min=5,max=100,unique,indexed";
const WITH_NAME: &str = "myfield,json,omitempty,min=5";
const COMPLEX: &str = "name='complex,quoted=value',key=another,flag";
const COMPLEX_ESCAPES: &str = r"name='complex\'quoted',key=val\,ue,flag\=test";
const JSON_TAG: &str = r#""name,omitempty""#;
const DB_TAG: &str = "column:user_email,type:varchar(255),index,unique";
const MANY_OPTIONS: &str =
    "opt1,opt2,opt3,opt4,opt5,opt6,opt7,opt8,opt9,opt10,opt11,opt12,opt13,opt14,opt15";
const LONG_VALUES: &str = "key1='this is a very long value with lots of text',key2='another long value here',key3='and more text'";

fn bench(label: &str, mut run: impl FnMut() -> Result<(), Error>) -> Result<(), Error> {
    let start = Instant::now();
    for _ in 0..ROUNDS {
        run()?;
    }
    let elapsed = start.elapsed();
    let per_call = elapsed / ROUNDS;
    println!("{label:<32} {per_call:>10.2?} per call ({elapsed:.2?} total)");
    Ok(())
}

fn noop(key: &str, value: &str) -> Result<(), Infallible> {
    black_box((key, value));
    Ok(())
}

fn main() -> Result<(), Error> {
    println!("{ROUNDS} rounds each");

    for (label, tag) in [
        ("parse/simple", SIMPLE),
        ("parse/simple_long", SIMPLE_LONG),
        ("parse/complex", COMPLEX),
        ("parse/complex_escapes", COMPLEX_ESCAPES),
        ("parse/json_tag", JSON_TAG),
        ("parse/db_tag", DB_TAG),
        ("parse/many_options", MANY_OPTIONS),
        ("parse/long_values", LONG_VALUES),
    ] {
        bench(label, || parse(black_box(tag)).map(drop))?;
    }

    bench("parse_with_name/simple", || parse_with_name(black_box(SIMPLE)).map(drop))?;
    bench("parse_with_name/with_name", || {
        parse_with_name(black_box(WITH_NAME)).map(drop)
    })?;

    bench("parse_func/zero_alloc", || parse_func(black_box(SIMPLE), noop))?;
    bench("parse_func_with_name/zero_alloc", || {
        parse_func_with_name(black_box(WITH_NAME), noop)
    })?;

    let mut reused: HashMap<String, String> = HashMap::with_capacity(4);
    bench("parse_func/reused_map", || {
        reused.clear();
        parse_func(black_box("json,omitempty,min=5,max=100"), |k, v| {
            reused.insert(k.to_owned(), v.to_owned());
            Ok::<(), Infallible>(())
        })
    })?;

    // Worst case the size guard allows: a single maximal flag.
    let largest = "a".repeat(tagparser::MAX_TAG_LENGTH);
    let start = Instant::now();
    parse(&largest)?;
    let elapsed: Duration = start.elapsed();
    println!("{:<32} {elapsed:>10.2?}", "parse/max_length");

    Ok(())
}
