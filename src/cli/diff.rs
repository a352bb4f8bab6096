//! Diff command handler.
//!
//! Compares two normalized documents written by `normalize`.

use crate::config::AppConfig;
use crate::pipeline::{
    OutputTarget, PipelineError, compute_diff, gate_exit_code, write_document,
};
use crate::reports::load_normalized_file;
use anyhow::Result;
use std::path::PathBuf;

/// Inputs of the `diff` subcommand.
#[derive(Debug, Clone)]
pub struct DiffCommand {
    /// Normalized document of the base revision
    pub base: PathBuf,
    /// Normalized document of the head revision
    pub head: PathBuf,
    /// Output file (stdout if not set)
    pub output: Option<PathBuf>,
    pub config: AppConfig,
}

/// Run the diff command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(command: DiffCommand) -> Result<i32> {
    let quiet = command.config.behavior.quiet;
    let load = |path: &PathBuf| {
        load_normalized_file(path).map_err(|source| PipelineError::LoadFailed {
            path: path.display().to_string(),
            source,
        })
    };
    let base = load(&command.base)?;
    let head = load(&command.head)?;

    let diff = compute_diff(&base, &head, quiet);
    let exit_code = gate_exit_code(&diff, command.config.behavior.fail_on_new);

    write_document(
        &diff,
        &OutputTarget::from_option(command.output),
        command.config.output.pretty,
        quiet,
    )?;
    Ok(exit_code)
}
