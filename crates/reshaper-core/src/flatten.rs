//! Template flattening
//!
//! Walks the template depth-first and turns every leaf into an entry keyed
//! by its full output path. [`flatten`] keeps the source key names;
//! [`flatten_resolved`] looks each one up in the input as it goes and keeps
//! only the leaves that resolved.

use crate::path::{PathMapping, TemplatePath};
use crate::resolver::{resolve, Input};
use crate::template::{Template, TemplateNode};
use serde_json::Value;
use std::collections::BTreeMap;

/// Visit every leaf of `children` in pre-order, with its full path
pub(crate) fn walk_leaves<'t, F>(
    children: &'t BTreeMap<String, TemplateNode>,
    prefix: &TemplatePath,
    visit: &mut F,
) where
    F: FnMut(TemplatePath, &'t str),
{
    for (key, node) in children {
        let path = prefix.child(key.as_str());
        match node {
            TemplateNode::Branch(inner) => walk_leaves(inner, &path, visit),
            TemplateNode::Leaf(source_key) => visit(path, source_key.as_str()),
        }
    }
}

/// Map every template leaf path to the source key it names
pub fn flatten(template: &Template) -> PathMapping<&str> {
    let mut mapping = PathMapping::new();
    walk_leaves(template.root(), &TemplatePath::root(), &mut |path, source_key| {
        mapping.insert(path, source_key);
    });
    mapping
}

/// Map every template leaf path whose source key exists in `input` to the input value
///
/// Leaves whose source key is missing are left out; this is not an error.
pub fn flatten_resolved(template: &Template, input: &Input) -> PathMapping<Value> {
    let mut mapping = PathMapping::new();
    walk_leaves(template.root(), &TemplatePath::root(), &mut |path, source_key| {
        match resolve(source_key, input) {
            Some(value) => {
                mapping.insert(path, value.clone());
            }
            None => {
                tracing::trace!(path = %path, source_key, "Source key missing, field omitted");
            }
        }
    });
    mapping
}
