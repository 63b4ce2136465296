//! Transform command handler

use super::utils::{load_document, load_template, read_stdin_document};
use crate::cli::{OutputFormat, TransformArgs};
use crate::config::{is_yaml, Config};
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use reshaper_core::{JsonKind, ObjectTransformer, Template, TransformReport};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Handle the transform command
#[instrument(skip_all, fields(template = %args.template.template.display()))]
pub fn handle_transform(args: TransformArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("transform_command");

    if let (Some(input), Some(save_to)) = (&args.input, &args.save_to) {
        if same_file(input, save_to) {
            return Err(Error::invalid_args("--save-to must not overwrite the --input file"));
        }
    }

    output.info(&format!("Loading template: {}", args.template.template.display()))?;
    let template = load_template(&args.template, config)?;
    info!(leaves = template.leaf_count(), "Template loaded");

    let input = match &args.input {
        Some(path) => {
            output.info(&format!("Reading input: {}", path.display()))?;
            load_document(path)?
        }
        None => {
            debug!("No input file given, reading stdin");
            read_stdin_document()?
        }
    };

    run_transform(template, &input, &args, output)
}

/// Whether two paths name the same file, resolving `.`, `..` and symlinks when both exist
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Reshape an already loaded input and emit the result
pub(crate) fn run_transform(
    template: Template,
    input: &Value,
    args: &TransformArgs,
    output: &mut OutputWriter,
) -> Result<()> {
    let input = input.as_object().ok_or_else(|| {
        Error::Core(reshaper_core::Error::InvalidInput {
            found: JsonKind::of(input),
        })
    })?;

    let transformer = ObjectTransformer::new(template);

    if args.report {
        let report = transformer.transform_with_report(Some(input), None)?;
        info!(resolved = report.resolved, missing = report.missing.len(), "Transform finished");

        match &args.save_to {
            Some(path) => {
                save_document(path, &report.output)?;
                output.success(&format!("Output written to {}", path.display()))?;
                print_report_summary(&report, output)?;
                if output.format() != OutputFormat::Human {
                    output.data(&report)?;
                }
            }
            None => {
                if output.format() == OutputFormat::Human {
                    output.data(&report.output)?;
                    print_report_summary(&report, output)?;
                } else {
                    output.data(&report)?;
                }
            }
        }
    } else {
        let reshaped = transformer.transform(Some(input), None)?;
        info!("Transform finished");

        match &args.save_to {
            Some(path) => {
                save_document(path, &reshaped)?;
                output.success(&format!("Output written to {}", path.display()))?;
            }
            None => output.data(&reshaped)?,
        }
    }

    Ok(())
}

fn print_report_summary(report: &TransformReport, output: &mut OutputWriter) -> Result<()> {
    if report.is_complete() {
        output.success(&format!("All {} template leaves resolved", report.resolved))?;
        return Ok(());
    }

    output.warning(&format!(
        "{} resolved, {} omitted (source key not in input)",
        report.resolved,
        report.missing.len()
    ))?;
    output.section("Missing fields")?;
    let rows = report
        .missing
        .iter()
        .map(|field| vec![field.dotted_path.clone(), field.source_key.clone()])
        .collect();
    output.table(&["Path", "Source key"], rows)
}

/// Write a document to disk, as YAML for .yaml/.yml paths and pretty JSON otherwise
fn save_document<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = if is_yaml(path) {
        serde_yaml::to_string(value)?
    } else {
        let mut json = serde_json::to_string_pretty(value)?;
        json.push('\n');
        json
    };
    fs::write(path, content)?;
    debug!(path = %path.display(), "Saved output");
    Ok(())
}
