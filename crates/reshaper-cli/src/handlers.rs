//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod flatten;
mod transform;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use flatten::handle_flatten;
pub use transform::handle_transform;
pub use validate::handle_validate;
