//! Path tree building
//!
//! Rebuilds a nested JSON object from a mapping of output paths to values.
//! Intermediate objects are created on demand, so an object only appears in
//! the output if at least one value was placed somewhere below it.
//!
//! A mapping in which one path is a strict prefix of another (`a` and
//! `a.b`) cannot be represented as a tree and is rejected with
//! [`Error::PathConflict`]. Mappings produced from an ingested
//! [`Template`](crate::Template) never contain such pairs.

use crate::error::{Error, Result};
use crate::path::{PathMapping, TemplatePath};
use serde_json::{Map, Value};

/// Build the nested output object for `mapping`
///
/// Because a [`PathMapping`] iterates in path order, a path is always
/// visited directly before the first path it is a prefix of, which is where
/// conflicts are detected.
pub fn build_tree(mapping: PathMapping<Value>) -> Result<Value> {
    let field_count = mapping.len();
    let mut output = Map::new();
    let mut previous: Option<TemplatePath> = None;

    for (path, value) in mapping {
        if let Some(prev) = &previous {
            if prev.is_strict_prefix_of(&path) {
                return Err(Error::PathConflict {
                    path: prev.to_string(),
                    message: format!("field is also the parent of '{}'", path),
                });
            }
        }

        insert_at(&mut output, &path, value)?;
        previous = Some(path);
    }

    tracing::trace!(fields = field_count, top_level = output.len(), "Output tree built");
    Ok(Value::Object(output))
}

/// Build the nested output object from dotted-string paths
///
/// Entries are split on `separator`. When the same path appears more than
/// once, the last entry wins.
pub fn build_tree_dotted<I, K>(entries: I, separator: char) -> Result<Value>
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    let mapping: PathMapping<Value> = entries
        .into_iter()
        .map(|(dotted, value)| (TemplatePath::parse_with(dotted.as_ref(), separator), value))
        .collect();
    build_tree(mapping)
}

/// Place `value` at `path`, creating intermediate objects as needed
fn insert_at(root: &mut Map<String, Value>, path: &TemplatePath, value: Value) -> Result<()> {
    let (last, parents) = path.segments().split_last().ok_or(Error::EmptyPath)?;

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match slot {
            Value::Object(children) => children,
            _ => {
                return Err(Error::PathConflict {
                    path: TemplatePath::new(path.segments()[..=depth].to_vec()).to_string(),
                    message: format!("field is not an object and cannot hold '{}'", path),
                });
            }
        };
    }

    current.insert(last.clone(), value);
    Ok(())
}
