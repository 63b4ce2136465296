//! Input resolution
//!
//! Looks up source keys in the flat input object. Lookup is an exact key
//! match: no case folding, no defaults, no coercion. A key that is not
//! present resolves to `None`, which callers treat as "skip this field".

use serde_json::{Map, Value};

/// Flat input object keyed by source key name
pub type Input = Map<String, Value>;

/// Look up `source_key` in `input`
#[inline]
pub fn resolve<'a>(source_key: &str, input: &'a Input) -> Option<&'a Value> {
    input.get(source_key)
}
