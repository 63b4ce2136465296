//! Template model and ingestion
//!
//! A template describes the shape of the output object. Each value is
//! either the name of an input key (a leaf) or another template (a branch).
//! The leaf/branch decision is made here, once, when the template is
//! ingested from JSON; later phases only ever match on [`TemplateNode`].
//!
//! # Examples
//!
//! ```
//! use reshaper_core::Template;
//! use serde_json::json;
//!
//! let template = Template::from_value(&json!({
//!     "_id": "production_id",
//!     "contract": {
//!         "_id": "contract_id",
//!         "signature_date": {"from": "contract_signature_date_from"}
//!     }
//! }))
//! .unwrap();
//!
//! assert_eq!(template.leaf_count(), 3);
//! ```

use crate::error::{Error, JsonKind, Result};
use crate::path::{TemplatePath, DEFAULT_SEPARATOR};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// How ingestion treats scalar leaves that are not strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafPolicy {
    /// Reject numbers and booleans where a source key name is expected
    #[default]
    Strict,
    /// Use the string form of numbers and booleans as the source key name
    Coerce,
}

impl fmt::Display for LeafPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafPolicy::Strict => write!(f, "strict"),
            LeafPolicy::Coerce => write!(f, "coerce"),
        }
    }
}

/// Options applied while ingesting a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    /// Separator used for dotted path rendering; template keys may not contain it
    pub separator: char,

    /// Treatment of non-string scalar leaves
    pub leaf_policy: LeafPolicy,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            leaf_policy: LeafPolicy::Strict,
        }
    }
}

/// A single node of a template tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TemplateNode {
    /// Name of the input key supplying this output field
    Leaf(String),
    /// Nested output object
    Branch(BTreeMap<String, TemplateNode>),
}

impl TemplateNode {
    /// Number of leaves at or below this node
    pub fn leaf_count(&self) -> usize {
        match self {
            TemplateNode::Leaf(_) => 1,
            TemplateNode::Branch(children) => children.values().map(TemplateNode::leaf_count).sum(),
        }
    }
}

/// An ingested, immutable output template
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    root: BTreeMap<String, TemplateNode>,
    options: TemplateOptions,
}

impl Template {
    /// Template with no fields; transforms with it always produce `{}`
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ingest a JSON template using default options
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_value_with(value, TemplateOptions::default())
    }

    /// Ingest a JSON template
    ///
    /// Fails on the first malformed leaf or offending key, before any
    /// transform can run with the template.
    pub fn from_value_with(value: &Value, options: TemplateOptions) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| Error::InvalidTemplate {
            message: format!("template root must be an object, found {}", JsonKind::of(value)),
        })?;

        let root = ingest_branch(map, &TemplatePath::root(), &options)?;
        tracing::debug!(
            leaves = root.values().map(TemplateNode::leaf_count).sum::<usize>(),
            leaf_policy = %options.leaf_policy,
            "Template ingested"
        );

        Ok(Self { root, options })
    }

    /// Parse and ingest a JSON template string using default options
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Start building a template in code
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::new()
    }

    /// Top-level fields of the template
    pub fn root(&self) -> &BTreeMap<String, TemplateNode> {
        &self.root
    }

    /// Options the template was ingested with
    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }

    /// Path separator the template was ingested with
    pub fn separator(&self) -> char {
        self.options.separator
    }

    /// Total number of leaves
    pub fn leaf_count(&self) -> usize {
        self.root.values().map(TemplateNode::leaf_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Render the template back to its JSON shape
    pub fn to_value(&self) -> Value {
        fn render(children: &BTreeMap<String, TemplateNode>) -> Value {
            let mut map = Map::new();
            for (key, node) in children {
                let value = match node {
                    TemplateNode::Leaf(source) => Value::String(source.clone()),
                    TemplateNode::Branch(inner) => render(inner),
                };
                map.insert(key.clone(), value);
            }
            Value::Object(map)
        }
        render(&self.root)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Template::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<&Value> for Template {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        Template::from_value(value)
    }
}

fn display_path(path: &TemplatePath, separator: char) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.to_dotted(separator)
    }
}

fn ingest_branch(
    map: &Map<String, Value>,
    prefix: &TemplatePath,
    options: &TemplateOptions,
) -> Result<BTreeMap<String, TemplateNode>> {
    let mut branch = BTreeMap::new();

    for (key, value) in map {
        if key.contains(options.separator) {
            return Err(Error::SeparatorInKey {
                path: display_path(prefix, options.separator),
                key: key.clone(),
                separator: options.separator,
            });
        }

        let path = prefix.child(key.as_str());
        let node = match value {
            Value::Object(inner) => TemplateNode::Branch(ingest_branch(inner, &path, options)?),
            Value::String(source) => TemplateNode::Leaf(source.clone()),
            Value::Number(n) if options.leaf_policy == LeafPolicy::Coerce => {
                TemplateNode::Leaf(n.to_string())
            }
            Value::Bool(b) if options.leaf_policy == LeafPolicy::Coerce => {
                TemplateNode::Leaf(b.to_string())
            }
            other => {
                return Err(Error::InvalidLeaf {
                    path: display_path(&path, options.separator),
                    found: JsonKind::of(other),
                });
            }
        };

        branch.insert(key.clone(), node);
    }

    Ok(branch)
}

/// Builder for assembling templates in code
///
/// Keys are checked against the separator when [`TemplateBuilder::build`] runs.
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    fields: BTreeMap<String, TemplateNode>,
    options: TemplateOptions,
}

impl TemplateBuilder {
    /// Create a new template builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set ingestion options
    pub fn options(mut self, options: TemplateOptions) -> Self {
        self.options = options;
        self
    }

    /// Map output field `key` to input key `source_key`
    pub fn leaf(mut self, key: impl Into<String>, source_key: impl Into<String>) -> Self {
        self.fields.insert(key.into(), TemplateNode::Leaf(source_key.into()));
        self
    }

    /// Nest a sub-template under `key`
    pub fn branch(mut self, key: impl Into<String>, build: impl FnOnce(TemplateBuilder) -> TemplateBuilder) -> Self {
        let inner = build(TemplateBuilder::new());
        self.fields.insert(key.into(), TemplateNode::Branch(inner.fields));
        self
    }

    /// Validate keys and build the template
    pub fn build(self) -> Result<Template> {
        fn check(
            children: &BTreeMap<String, TemplateNode>,
            prefix: &TemplatePath,
            separator: char,
        ) -> Result<()> {
            for (key, node) in children {
                if key.contains(separator) {
                    return Err(Error::SeparatorInKey {
                        path: display_path(prefix, separator),
                        key: key.clone(),
                        separator,
                    });
                }
                if let TemplateNode::Branch(inner) = node {
                    check(inner, &prefix.child(key.as_str()), separator)?;
                }
            }
            Ok(())
        }

        check(&self.fields, &TemplatePath::root(), self.options.separator)?;
        Ok(Template {
            root: self.fields,
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ingest_nested_template() {
        let template = Template::from_value(&json!({
            "x": "a",
            "p": {"q": "src", "r": {"s": "deep"}}
        }))
        .unwrap();

        assert_eq!(template.leaf_count(), 3);
        assert_eq!(template.root()["x"], TemplateNode::Leaf("a".to_string()));
        match &template.root()["p"] {
            TemplateNode::Branch(children) => assert_eq!(children.len(), 2),
            other => panic!("expected branch, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_policy_rejects_number_leaf() {
        let err = Template::from_value(&json!({"a": {"b": 7}})).unwrap_err();
        match err {
            Error::InvalidLeaf { path, found } => {
                assert_eq!(path, "a.b");
                assert_eq!(found, JsonKind::Number);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_coerce_policy_stringifies_scalars() {
        let options = TemplateOptions {
            leaf_policy: LeafPolicy::Coerce,
            ..Default::default()
        };
        let template = Template::from_value_with(&json!({"n": 42, "b": true}), options).unwrap();
        assert_eq!(template.root()["n"], TemplateNode::Leaf("42".to_string()));
        assert_eq!(template.root()["b"], TemplateNode::Leaf("true".to_string()));
    }

    #[test]
    fn test_coerce_policy_still_rejects_null_and_arrays() {
        let options = TemplateOptions {
            leaf_policy: LeafPolicy::Coerce,
            ..Default::default()
        };
        let err = Template::from_value_with(&json!({"n": null}), options.clone()).unwrap_err();
        assert!(matches!(err, Error::InvalidLeaf { found: JsonKind::Null, .. }));

        let err = Template::from_value_with(&json!({"files": ["a", "b"]}), options).unwrap_err();
        assert!(matches!(err, Error::InvalidLeaf { found: JsonKind::Array, .. }));
    }

    #[test]
    fn test_separator_in_key_rejected() {
        let err = Template::from_value(&json!({"outer": {"a.b": "k"}})).unwrap_err();
        match err {
            Error::SeparatorInKey { path, key, separator } => {
                assert_eq!(path, "outer");
                assert_eq!(key, "a.b");
                assert_eq!(separator, '.');
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_custom_separator_allows_dots() {
        let options = TemplateOptions {
            separator: '/',
            ..Default::default()
        };
        let template = Template::from_value_with(&json!({"a.b": "k"}), options).unwrap();
        assert_eq!(template.separator(), '/');
        assert_eq!(template.leaf_count(), 1);
    }

    #[test]
    fn test_non_object_root_rejected() {
        let err = Template::from_value(&json!("a")).unwrap_err();
        assert!(matches!(err, Error::InvalidTemplate { .. }));
        assert!(err.to_string().contains("found string"));
    }

    #[test]
    fn test_serde_round_trip_preserves_shape() {
        let source = json!({"x": "a", "p": {"q": "src"}, "empty": {}});
        let template: Template = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(serde_json::to_value(&template).unwrap(), source);
        assert_eq!(template.to_value(), source);
    }

    #[test]
    fn test_deserialize_reports_ingestion_error() {
        let result: std::result::Result<Template, _> = serde_json::from_value(json!({"a": 1}));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Invalid template leaf at 'a'"));
    }

    #[test]
    fn test_builder_matches_ingested_template() {
        let built = Template::builder()
            .leaf("x", "a")
            .branch("p", |b| b.leaf("q", "src"))
            .build()
            .unwrap();
        let ingested = Template::from_value(&json!({"x": "a", "p": {"q": "src"}})).unwrap();
        assert_eq!(built, ingested);
    }

    #[test]
    fn test_builder_rejects_separator_in_nested_key() {
        let err = Template::builder()
            .branch("p", |b| b.leaf("q.r", "src"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::SeparatorInKey { .. }));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: TemplateOptions = serde_json::from_value(json!({"leaf_policy": "coerce"})).unwrap();
        assert_eq!(options.separator, '.');
        assert_eq!(options.leaf_policy, LeafPolicy::Coerce);
    }
}
