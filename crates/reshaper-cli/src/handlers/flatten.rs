//! Flatten command handler

use super::utils::load_template;
use crate::cli::{FlattenArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use reshaper_core::{flatten, Template};
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Handle the flatten command
#[instrument(skip_all, fields(template = %args.template.template.display()))]
pub fn handle_flatten(args: FlattenArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let template = load_template(&args.template, config)?;
    write_flattened(&template, output)
}

/// Emit the dotted output path of every template leaf with its source key
pub(crate) fn write_flattened(template: &Template, output: &mut OutputWriter) -> Result<()> {
    let separator = template.separator();
    let mapping = flatten(template);
    info!(leaves = mapping.len(), "Template flattened");

    if output.format() == OutputFormat::Human {
        let rows = mapping
            .iter()
            .map(|(path, source_key)| vec![path.to_dotted(separator), source_key.to_string()])
            .collect();
        output.table(&["Path", "Source key"], rows)?;
        output.info(&format!("{} leaves", mapping.len()))
    } else {
        let dotted: BTreeMap<String, &str> = mapping
            .iter()
            .map(|(path, source_key)| (path.to_dotted(separator), *source_key))
            .collect();
        output.data(&dotted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::capture;
    use reshaper_core::TemplateOptions;
    use serde_json::json;

    #[test]
    fn test_flatten_json_mapping() {
        let template = Template::from_value(&json!({
            "x": {"y": "a", "z": "b"},
            "w": "c"
        }))
        .unwrap();
        let (mut output, data, _) = capture(OutputFormat::Json, false);

        write_flattened(&template, &mut output).unwrap();

        assert_eq!(data.contents(), "{\"w\":\"c\",\"x.y\":\"a\",\"x.z\":\"b\"}\n");
    }

    #[test]
    fn test_flatten_uses_template_separator() {
        let options = TemplateOptions {
            separator: '/',
            ..Default::default()
        };
        let template = Template::from_value_with(&json!({"a.b": {"c": "k"}}), options).unwrap();
        let (mut output, data, _) = capture(OutputFormat::Human, false);

        write_flattened(&template, &mut output).unwrap();

        let contents = data.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "a.b/c │ k");
    }
}
