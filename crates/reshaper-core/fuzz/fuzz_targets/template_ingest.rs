//! Fuzzing target for template ingestion and transform
//!
//! Arbitrary bytes are parsed as a JSON template; whatever ingests must
//! transform the same bytes (reused as input) without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use reshaper_core::{LeafPolicy, ObjectTransformer, Template, TemplateOptions};
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    for leaf_policy in [LeafPolicy::Strict, LeafPolicy::Coerce] {
        let options = TemplateOptions {
            leaf_policy,
            ..Default::default()
        };
        if let Ok(template) = Template::from_value_with(&value, options) {
            // an ingested template always yields a tree
            let output = ObjectTransformer::new(template).transform_value(&value);
            if value.is_object() {
                assert!(output.is_ok());
            }
        }
    }
});
