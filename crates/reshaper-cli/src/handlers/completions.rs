//! Shell completions command handler

use crate::cli::{Cli, CompletionsArgs};
use crate::error::Result;
use clap::CommandFactory;
use clap_complete::generate;
use std::io::{self, Write};

/// Handle the completions command
///
/// The script is written straight to stdout, bypassing the output format.
pub fn handle_completions(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    tracing::debug!(shell = ?args.shell, bin = %bin_name, "Generating completions");

    let mut stdout = io::stdout().lock();
    generate(args.shell.to_clap_shell(), &mut cmd, bin_name, &mut stdout);
    stdout.flush()?;

    Ok(())
}
