//! Run command handler: the whole pipeline in one invocation.

use crate::config::AppConfig;
use crate::pipeline::{RevisionJob, run_pipeline, write_pipeline_output};
use anyhow::Result;
use std::path::PathBuf;

/// Inputs of the `run` subcommand.
#[derive(Debug, Clone)]
pub struct RunCommand {
    pub base: RevisionJob,
    pub head: RevisionJob,
    /// Directory receiving all four documents
    pub output_dir: PathBuf,
    pub config: AppConfig,
}

/// Process both revisions and write every document, returning the gate's
/// exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_all(command: RunCommand) -> Result<i32> {
    let output = run_pipeline(command.base, command.head, &command.config)?;
    write_pipeline_output(&output, &command.output_dir, &command.config)?;

    if !command.config.behavior.quiet {
        tracing::info!("Documents written to {}", command.output_dir.display());
    }
    Ok(output.exit_code(&command.config))
}
