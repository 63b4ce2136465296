//! Reshaper Core - Template-driven reshaping of flat key/value objects
//!
//! This crate turns a flat input object into a nested output object. A
//! template mirrors the output shape; each leaf names the input key that
//! supplies its value.
//!
//! # Main Components
//!
//! - **Template**: ingestion of JSON templates into a closed `Leaf | Branch` tree
//! - **Flattener**: template leaves keyed by their full output path
//! - **Resolver**: exact-match lookup of source keys in the input
//! - **Tree builder**: nested output object rebuilt from resolved paths
//! - **Transformer**: the three phases composed behind one call
//!
//! # Example
//!
//! ```
//! use reshaper_core::{ObjectTransformer, Result};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let transformer = ObjectTransformer::from_value(&json!({
//!         "x": {"y": "a", "z": "b"}
//!     }))?;
//!
//!     let output = transformer.transform_value(&json!({"a": 1}))?;
//!     assert_eq!(output, json!({"x": {"y": 1}}));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod flatten;
pub mod path;
pub mod resolver;
pub mod template;
pub mod transformer;
pub mod tree;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use error::{Error, JsonKind, Result};
pub use flatten::{flatten, flatten_resolved};
pub use path::{PathMapping, TemplatePath, DEFAULT_SEPARATOR};
pub use resolver::{resolve, Input};
pub use template::{LeafPolicy, Template, TemplateBuilder, TemplateNode, TemplateOptions};
pub use transformer::{transform, MissingField, ObjectTransformer, TransformReport};
pub use tree::{build_tree, build_tree_dotted};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_pipeline_phases_compose() {
        let template = Template::from_value(&json!({"p": {"q": "src"}})).unwrap();
        let input = json!({"src": 5});
        let input = input.as_object().unwrap();

        let sources = flatten(&template);
        assert_eq!(sources.len(), 1);

        let resolved = flatten_resolved(&template, input);
        let tree = build_tree(resolved).unwrap();
        assert_eq!(tree, transform(&template, input).unwrap());
        assert_eq!(tree, json!({"p": {"q": 5}}));
    }
}
