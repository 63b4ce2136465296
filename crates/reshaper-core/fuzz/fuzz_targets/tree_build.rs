//! Fuzzing target for building trees from dotted paths
//!
//! Each input line is treated as a dotted path; the builder must either
//! produce an object or report an error, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use reshaper_core::build_tree_dotted;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let entries = text
        .lines()
        .enumerate()
        .map(|(i, line)| (line.to_string(), Value::from(i)));

    if let Ok(tree) = build_tree_dotted(entries, '.') {
        assert!(tree.is_object());
    }
});
