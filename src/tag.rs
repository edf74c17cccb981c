use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed tag: an optional leading name and the options that follow it.
///
/// Flags (items without `=`) are stored with an empty value. No key is ever
/// empty. When a key occurs more than once, the last occurrence wins.
///
/// ```rust
/// let tag = tagparser::parse_with_name("json,omitempty,min=5").unwrap();
/// assert_eq!(tag.name, "json");
/// assert!(tag.has("omitempty"));
/// assert_eq!(tag.get("min"), Some("5"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tag {
    /// Leading name; empty unless parsed in name-extraction mode and present.
    pub name: String,
    pub options: HashMap<String, String>,
}

impl Tag {
    /// Value of `key`, `Some("")` for a flag.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Whether `key` was present, as a flag or with a value.
    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.options.is_empty()
    }
}
