//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Reshaper CLI - Reshape flat JSON/YAML objects into nested documents
///
/// A template mirrors the desired output shape; each leaf names the input
/// key that supplies the value. Missing input keys are left out of the output.
#[derive(Parser, Debug)]
#[command(
    name = "reshaper",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "RESHAPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reshape an input object with a template
    Transform(TransformArgs),

    /// Show the output path each template leaf maps to
    Flatten(FlattenArgs),

    /// Check that a template is well-formed
    Validate(ValidateArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Template location and ingestion options shared by all template commands
#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    /// Path to the template file (JSON or YAML)
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// How non-string leaves are treated (overrides the config file)
    #[arg(long, value_enum)]
    pub leaf_policy: Option<LeafPolicy>,

    /// Path separator used for dotted paths (overrides the config file)
    #[arg(long, value_name = "CHAR")]
    pub separator: Option<char>,
}

/// Arguments for the transform command
#[derive(Parser, Debug)]
pub struct TransformArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Path to the input object (JSON or YAML); read from stdin if omitted
    #[arg(short, long, value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Include the resolved count and the omitted template leaves
    #[arg(long)]
    pub report: bool,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the flatten command
#[derive(Parser, Debug)]
pub struct FlattenArgs {
    #[command(flatten)]
    pub template: TemplateArgs,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Print the ingested template after validation
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Treatment of template leaves that are not strings
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LeafPolicy {
    /// Reject numbers and booleans as leaves
    Strict,
    /// Use the string form of numbers and booleans as source keys
    Coerce,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<LeafPolicy> for reshaper_core::LeafPolicy {
    fn from(policy: LeafPolicy) -> Self {
        match policy {
            LeafPolicy::Strict => reshaper_core::LeafPolicy::Strict,
            LeafPolicy::Coerce => reshaper_core::LeafPolicy::Coerce,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
