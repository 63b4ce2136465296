//! Shared utilities for command handlers

use crate::cli::TemplateArgs;
use crate::config::{is_yaml, Config};
use crate::error::{Error, Result};
use reshaper_core::Template;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Load a JSON or YAML document, picking the parser from the file extension
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read document");

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
            message: e.to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
            message: e.to_string(),
        })
    }
}

/// Read a document from stdin, trying JSON first and then YAML
pub fn read_stdin_document() -> Result<Value> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    debug!(bytes = content.len(), "Read document from stdin");
    parse_document(&content)
}

/// Parse document text of unknown format
pub fn parse_document(content: &str) -> Result<Value> {
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        // YAML is a superset of JSON, so a JSON syntax error is retried as YAML
        Err(json_err) => serde_yaml::from_str(content).map_err(|yaml_err| {
            debug!(error = %yaml_err, "Document is neither JSON nor YAML");
            Error::Json(json_err)
        }),
    }
}

/// Load and ingest the template named by the command-line arguments
pub fn load_template(args: &TemplateArgs, config: &Config) -> Result<Template> {
    let value = load_document(&args.template)?;
    let options = config.template_options(args);
    debug!(
        separator = %options.separator,
        leaf_policy = %options.leaf_policy,
        "Ingesting template"
    );
    Ok(Template::from_value_with(&value, options)?)
}
