//! Multi-valued query string decoding.
//!
//! `Query<HashMap<..>>` keeps one value per key, but a callback may repeat
//! `code`, and the log line reports every occurrence. `QueryValues` keeps
//! all values per key, in order of appearance.

use std::collections::HashMap;
use std::fmt;

/// Query parameters as a multi-map.
///
/// Keys are hashed, so decoding stays linear in the number of pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues {
    entries: HashMap<String, Vec<String>>,
}

impl QueryValues {
    /// Decode a raw query string (without the leading `?`).
    ///
    /// Uses `application/x-www-form-urlencoded` rules: percent-decoding,
    /// `+` as space, invalid UTF-8 replaced lossily.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            entries.entry(name.into_owned()).or_default().push(value.into_owned());
        }
        Self { entries }
    }

    /// All values for `name`, in order of appearance; empty when the key is absent.
    #[must_use]
    pub fn get(&self, name: &str) -> &[String] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Renders a value sequence as `[a b c]`.
#[derive(Debug, Clone, Copy)]
pub struct Bracketed<'a>(pub &'a [String]);

impl fmt::Display for Bracketed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(value)?;
        }
        f.write_str("]")
    }
}
