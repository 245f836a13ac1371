//! Member name normalization.
//!
//! All allow/block comparisons happen on [`NormalizedName`] values. Folding is
//! an explicit ASCII byte mapping so decisions never depend on the process
//! locale or on Unicode case tables.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A member name after case folding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedName(String);

impl NormalizedName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NormalizedName {
    fn from(s: &str) -> Self {
        normalize(s)
    }
}

impl From<String> for NormalizedName {
    fn from(s: String) -> Self {
        normalize(&s)
    }
}

impl From<NormalizedName> for String {
    fn from(n: NormalizedName) -> Self {
        n.0
    }
}

/// Fold `A-Z` to `a-z`. Every other character is kept as is.
pub fn normalize(name: &str) -> NormalizedName {
    NormalizedName(name.chars().map(fold_ascii).collect())
}

/// True when `raw` folds to `name`, without allocating.
pub fn eq_normalized(raw: &str, name: &NormalizedName) -> bool {
    raw.chars().map(fold_ascii).eq(name.0.chars())
}

#[inline]
fn fold_ascii(c: char) -> char {
    match c {
        'A'..='Z' => ((c as u8) + (b'a' - b'A')) as char,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_ascii_only() {
        assert_eq!(normalize("__toString").as_str(), "__tostring");
        assert_eq!(normalize("FROMURL").as_str(), "fromurl");
        // dotted/turkish I and sharp s are left alone
        assert_eq!(normalize("İß").as_str(), "İß");
        assert_eq!(normalize("ÀB").as_str(), "Àb");
    }

    #[test]
    fn eq_normalized_without_allocating() {
        let n = normalize("toHtml");
        assert!(eq_normalized("TOHTML", &n));
        assert!(eq_normalized("tohtml", &n));
        assert!(!eq_normalized("tohtm", &n));
    }

    #[test]
    fn idempotent() {
        let once = normalize("AddDynamicMethod");
        let twice = normalize(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn borrows_as_str_for_set_lookup() {
        let mut set = std::collections::HashSet::new();
        set.insert(normalize("Save"));
        assert!(set.contains("save"));
    }
}
