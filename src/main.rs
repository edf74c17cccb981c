#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::process::exit;

use tagparser::{Tag, parse, parse_with_name};

const USAGE: &str = "Parses a struct tag and prints its name and options, \
    can also be used as a tag validator. Usage: tagparser [--name] <tag>";

/// Parse the tag given as argument and print the name and options, sorted by key.
/// With `--name`, the first item is taken as the name when it has no `=`.
fn main() {
    let mut with_name = false;
    let mut tag_arg = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--name" | "-n" => with_name = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                return;
            }
            _ if tag_arg.is_none() => tag_arg = Some(arg),
            _ => {
                eprintln!("unexpected argument {arg:?}\n{USAGE}");
                exit(1);
            }
        }
    }

    let Some(text) = tag_arg else {
        eprintln!("{USAGE}");
        exit(1);
    };

    let result = if with_name { parse_with_name(&text) } else { parse(&text) };
    match result {
        Ok(tag) => print_tag(&tag),
        Err(err) => {
            eprintln!("{}", err.render_snippet());
            exit(3);
        }
    }
}

fn print_tag(tag: &Tag) {
    if !tag.name.is_empty() {
        println!("name: {}", tag.name);
    }
    let sorted: BTreeMap<_, _> = tag.options.iter().collect();
    for (key, value) in sorted {
        if value.is_empty() {
            println!("{key}");
        } else {
            println!("{key} = {value:?}");
        }
    }
}
