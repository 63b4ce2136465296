//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random
//! templates and inputs, plus the properties the transformer must hold
//! for all of them.

#![cfg(test)]

use crate::resolver::Input;
use crate::template::Template;
use proptest::collection::{hash_map, vec};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy for template keys (never contain the separator)
pub fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,6}"
}

/// Strategy for source key names; a small space so inputs hit them often
pub fn source_key_strategy() -> impl Strategy<Value = String> {
    "k[0-9]{1,2}"
}

/// Strategy for arbitrary input values with controlled depth
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ];

    leaf.prop_recursive(2, 8, 4, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..4).prop_map(Value::Array),
            hash_map("[a-z]{1,5}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Strategy for JSON template values: source key strings or nested objects
pub fn template_value_strategy() -> impl Strategy<Value = Value> {
    source_key_strategy()
        .prop_map(Value::String)
        .prop_recursive(4, 32, 4, |inner| {
            hash_map(key_strategy(), inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>()))
        })
}

/// Strategy for ingested templates
pub fn template_strategy() -> impl Strategy<Value = Template> {
    hash_map(key_strategy(), template_value_strategy(), 0..6).prop_map(|m| {
        let value = Value::Object(m.into_iter().collect());
        Template::from_value(&value).expect("generated templates are well-formed")
    })
}

/// Strategy for flat inputs keyed by source key names
pub fn input_strategy() -> impl Strategy<Value = Input> {
    hash_map(source_key_strategy(), json_value_strategy(), 0..20)
        .prop_map(|m| m.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::path::TemplatePath;
    use crate::template::TemplateNode;
    use crate::transformer::transform;
    use std::collections::BTreeMap;

    fn lookup<'v>(root: &'v Value, path: &TemplatePath) -> Option<&'v Value> {
        path.segments()
            .iter()
            .try_fold(root, |current, segment| current.as_object()?.get(segment))
    }

    /// Every output key is backed by the template, and no branch is empty
    fn assert_shape_within(output: &Map<String, Value>, children: &BTreeMap<String, TemplateNode>) {
        for (key, value) in output {
            match children.get(key) {
                Some(TemplateNode::Leaf(_)) => {}
                Some(TemplateNode::Branch(inner)) => {
                    let nested = value.as_object().expect("branch output is an object");
                    assert!(!nested.is_empty(), "empty branch '{}' in output", key);
                    assert_shape_within(nested, inner);
                }
                None => panic!("output key '{}' not in template", key),
            }
        }
    }

    proptest! {
        #[test]
        fn prop_empty_input_gives_empty_object(template in template_strategy()) {
            let output = transform(&template, &Input::new()).unwrap();
            prop_assert_eq!(output, Value::Object(Map::new()));
        }

        #[test]
        fn prop_every_resolvable_leaf_lands_at_its_path(
            template in template_strategy(),
            input in input_strategy(),
        ) {
            let output = transform(&template, &input).unwrap();
            for (path, source_key) in flatten(&template) {
                match input.get(source_key) {
                    Some(expected) => prop_assert_eq!(lookup(&output, &path), Some(expected)),
                    None => prop_assert!(lookup(&output, &path).is_none()),
                }
            }
        }

        #[test]
        fn prop_output_shape_stays_within_template(
            template in template_strategy(),
            input in input_strategy(),
        ) {
            let output = transform(&template, &input).unwrap();
            let output = output.as_object().expect("output is an object");
            assert_shape_within(output, template.root());
        }

        #[test]
        fn prop_transform_is_deterministic(
            template in template_strategy(),
            input in input_strategy(),
        ) {
            let first = transform(&template, &input).unwrap();
            let second = transform(&template, &input).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
