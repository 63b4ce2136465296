//! Object transformer
//!
//! Ties the three phases together: the template is flattened, each leaf is
//! resolved against the input, and the resolved paths are rebuilt into a
//! nested object. The transformer keeps only its defaults; every call
//! builds and returns a fresh output, so one instance can serve many
//! threads at once.
//!
//! # Examples
//!
//! ```
//! use reshaper_core::ObjectTransformer;
//! use serde_json::json;
//!
//! let transformer = ObjectTransformer::from_value(&json!({
//!     "x": "a",
//!     "p": {"q": "src"}
//! }))
//! .unwrap();
//!
//! let output = transformer.transform_value(&json!({"a": 1, "src": 5})).unwrap();
//! assert_eq!(output, json!({"x": 1, "p": {"q": 5}}));
//! ```

use crate::error::{Error, JsonKind, Result};
use crate::flatten::{flatten_resolved, walk_leaves};
use crate::path::{PathMapping, TemplatePath};
use crate::resolver::{resolve, Input};
use crate::template::Template;
use crate::tree::build_tree;
use serde::Serialize;
use serde_json::Value;

/// A template leaf whose source key was not present in the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingField {
    /// Output path the value would have been placed at
    #[serde(skip)]
    pub path: TemplatePath,
    /// `path` rendered with the template's separator
    #[serde(rename = "path")]
    pub dotted_path: String,
    /// Input key that was looked up
    pub source_key: String,
}

/// Output of a transform together with what was left out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformReport {
    /// The reshaped object
    pub output: Value,
    /// Number of template leaves that resolved
    pub resolved: usize,
    /// Template leaves omitted because their source key was missing, in path order
    pub missing: Vec<MissingField>,
}

impl TransformReport {
    /// True when every template leaf resolved
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Reshape `input` according to `template`
///
/// Source keys missing from `input` are skipped. An error is only possible
/// when the resolved paths cannot form a tree, which an ingested template
/// rules out.
pub fn transform(template: &Template, input: &Input) -> Result<Value> {
    let span = tracing::debug_span!("transform", leaves = template.leaf_count());
    let _guard = span.enter();

    let resolved = flatten_resolved(template, input);
    tracing::debug!(resolved = resolved.len(), "Template leaves resolved");

    build_tree(resolved)
}

/// Reusable transformer holding a default template and default input
#[derive(Debug, Clone, Default)]
pub struct ObjectTransformer {
    template: Template,
    default_input: Input,
}

impl ObjectTransformer {
    /// Create a transformer with an empty default input
    pub fn new(template: Template) -> Self {
        Self {
            template,
            default_input: Input::new(),
        }
    }

    /// Ingest a JSON template with default options
    pub fn from_value(template: &Value) -> Result<Self> {
        Ok(Self::new(Template::from_value(template)?))
    }

    /// Parse and ingest a JSON template string with default options
    pub fn from_json_str(template: &str) -> Result<Self> {
        Ok(Self::new(Template::from_json_str(template)?))
    }

    /// Set the input used when a call does not supply one
    pub fn with_default_input(mut self, input: Input) -> Self {
        self.default_input = input;
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn default_input(&self) -> &Input {
        &self.default_input
    }

    /// Reshape an input; `None` arguments fall back to the stored defaults
    pub fn transform(&self, input: Option<&Input>, template: Option<&Template>) -> Result<Value> {
        transform(
            template.unwrap_or(&self.template),
            input.unwrap_or(&self.default_input),
        )
    }

    /// Reshape an untyped JSON input with the default template
    pub fn transform_value(&self, input: &Value) -> Result<Value> {
        let input = input.as_object().ok_or_else(|| Error::InvalidInput {
            found: JsonKind::of(input),
        })?;
        self.transform(Some(input), None)
    }

    /// Reshape an input and report which template leaves were omitted
    pub fn transform_with_report(
        &self,
        input: Option<&Input>,
        template: Option<&Template>,
    ) -> Result<TransformReport> {
        let template = template.unwrap_or(&self.template);
        let input = input.unwrap_or(&self.default_input);
        let separator = template.separator();

        let mut resolved = PathMapping::new();
        let mut missing = Vec::new();
        walk_leaves(template.root(), &TemplatePath::root(), &mut |path, source_key| {
            match resolve(source_key, input) {
                Some(value) => {
                    resolved.insert(path, value.clone());
                }
                None => missing.push(MissingField {
                    dotted_path: path.to_dotted(separator),
                    path,
                    source_key: source_key.to_string(),
                }),
            }
        });

        let resolved_count = resolved.len();
        if !missing.is_empty() {
            tracing::debug!(
                resolved = resolved_count,
                missing = missing.len(),
                "Transform left template leaves unresolved"
            );
        }

        Ok(TransformReport {
            output: build_tree(resolved)?,
            resolved: resolved_count,
            missing,
        })
    }
}
