//! Aggregate command handler.

use crate::config::AppConfig;
use crate::pipeline::{OutputTarget, PipelineError, aggregate_diff, exit_codes, write_document};
use crate::reports::load_diff_file;
use anyhow::Result;
use std::path::PathBuf;

/// Inputs of the `aggregate` subcommand.
#[derive(Debug, Clone)]
pub struct AggregateCommand {
    /// Diff document written by `diff`
    pub diff: PathBuf,
    /// Output file (stdout if not set)
    pub output: Option<PathBuf>,
    pub config: AppConfig,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run_aggregate(command: AggregateCommand) -> Result<i32> {
    let quiet = command.config.behavior.quiet;
    let diff = load_diff_file(&command.diff).map_err(|source| PipelineError::LoadFailed {
        path: command.diff.display().to_string(),
        source,
    })?;

    let document = aggregate_diff(&diff, command.config.risk, quiet);
    write_document(
        &document,
        &OutputTarget::from_option(command.output),
        command.config.output.pretty,
        quiet,
    )?;
    Ok(exit_codes::SUCCESS)
}
