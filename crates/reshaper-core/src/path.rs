//! Output paths addressing positions in the reshaped object
//!
//! A [`TemplatePath`] keeps the template keys from the root down to a leaf
//! as separate segments. The dotted string form (`contract.signature_date.from`)
//! is only used for display and interchange, so a key can never be split
//! in the wrong place once it has been ingested.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Default separator used when rendering and parsing dotted paths
pub const DEFAULT_SEPARATOR: char = '.';

/// Mapping from output path to a source key (before resolution) or a value (after)
///
/// Iteration follows path order, which keeps tree building reproducible.
pub type PathMapping<T> = BTreeMap<TemplatePath, T>;

/// Path from the output root to a single field
///
/// Paths order lexicographically by segment, so a path always sorts
/// before every path it is a strict prefix of.
///
/// # Examples
/// - `["x"]` → `x`
/// - `["contract", "signature_date", "from"]` → `contract.signature_date.from`
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplatePath(Vec<String>);

impl TemplatePath {
    /// Create new path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Empty path (root)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Create path from a single segment
    #[inline]
    #[must_use]
    pub fn single(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// Split a dotted string on `separator`
    ///
    /// Always yields at least one segment: the empty string is the path of
    /// a single empty key, matching how `[""]` renders. The root path has
    /// no dotted form.
    #[must_use]
    pub fn parse_with(dotted: &str, separator: char) -> Self {
        Self(dotted.split(separator).map(str::to_string).collect())
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is empty (root)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get last segment (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Path one level deeper
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment.into());
        Self(segments)
    }

    /// Check whether `self` is a strict prefix of `other`
    #[must_use]
    pub fn is_strict_prefix_of(&self, other: &TemplatePath) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// Render with an explicit separator
    #[must_use]
    pub fn to_dotted(&self, separator: char) -> String {
        let mut out = String::new();
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            out.push_str(segment);
        }
        out
    }
}

impl Display for TemplatePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted(DEFAULT_SEPARATOR))
    }
}

impl FromStr for TemplatePath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_with(s, DEFAULT_SEPARATOR))
    }
}

impl From<Vec<String>> for TemplatePath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for TemplatePath {
    fn from(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| s.to_string()).collect())
    }
}

// Serialized as the dotted string so path mappings become plain JSON objects
impl Serialize for TemplatePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TemplatePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dotted = String::deserialize(deserializer)?;
        Ok(Self::parse_with(&dotted, DEFAULT_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_segments() {
        let path = TemplatePath::from(&["contract", "signature_date", "from"][..]);
        assert_eq!(path.to_string(), "contract.signature_date.from");
        assert_eq!(path.to_dotted('/'), "contract/signature_date/from");
    }

    #[test]
    fn test_parse_dotted() {
        let path: TemplatePath = "a.b.c".parse().unwrap();
        assert_eq!(path.segments(), &["a", "b", "c"]);
        assert_eq!(TemplatePath::parse_with("", '.').segments(), &[""]);
        assert_eq!(TemplatePath::parse_with("a.", '.').segments(), &["a", ""]);
        assert_eq!(TemplatePath::parse_with("a/b", '/').len(), 2);
    }

    #[test]
    fn test_empty_key_round_trips() {
        let path = TemplatePath::single("");
        assert_eq!(path.to_dotted('.'), "");
        assert_eq!(TemplatePath::parse_with(&path.to_dotted('.'), '.'), path);
        assert_ne!(path, TemplatePath::root());
    }

    #[test]
    fn test_child_leaves_parent_untouched() {
        let parent = TemplatePath::single("p");
        let child = parent.child("q");
        assert_eq!(parent.len(), 1);
        assert_eq!(child.to_string(), "p.q");
        assert_eq!(child.last(), Some("q"));
    }

    #[test]
    fn test_prefix_sorts_first() {
        let short = TemplatePath::single("a");
        let long = short.child("b");
        let sibling = TemplatePath::single("a0");
        assert!(short < long);
        assert!(long < sibling);
        assert!(short.is_strict_prefix_of(&long));
        assert!(!long.is_strict_prefix_of(&short));
        assert!(!short.is_strict_prefix_of(&short));
    }

    #[test]
    fn test_serde_uses_dotted_form() {
        let path = TemplatePath::from(&["x", "y"][..]);
        let encoded = serde_json::to_string(&path).unwrap();
        assert_eq!(encoded, "\"x.y\"");
        let decoded: TemplatePath = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, path);
    }
}
