//! Validate command handler

use super::utils::load_template;
use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use reshaper_core::Template;
use serde_json::json;
use tracing::{info, instrument};

/// Handle the validate command
#[instrument(skip_all, fields(template = %args.template.template.display(), detailed = args.detailed))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("validate_command");
    output.info(&format!("Validating template: {}", args.template.template.display()))?;

    // Ingestion performs every structural check
    let template = load_template(&args.template, config)?;
    info!(leaves = template.leaf_count(), "Template is valid");

    write_validation(&template, args.detailed, output)
}

pub(crate) fn write_validation(template: &Template, detailed: bool, output: &mut OutputWriter) -> Result<()> {
    if output.format() == OutputFormat::Human {
        output.success(&format!("✓ Template is valid ({} leaves)", template.leaf_count()))?;
        if detailed {
            output.section("Template")?;
            output.data(template)?;
        }
        return Ok(());
    }

    let mut summary = json!({
        "valid": true,
        "leaves": template.leaf_count(),
        "separator": template.separator().to_string(),
        "leaf_policy": template.options().leaf_policy,
    });
    if detailed {
        summary["template"] = template.to_value();
    }
    output.data(&summary)
}
