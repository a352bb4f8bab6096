//! Normalize command handler.

use crate::config::AppConfig;
use crate::model::RevisionInfo;
use crate::pipeline::{
    OutputTarget, RevisionPaths, exit_codes, normalize_revision, parse_revision, write_document,
};
use anyhow::Result;
use std::path::PathBuf;

/// Inputs of the `normalize` subcommand.
#[derive(Debug, Clone)]
pub struct NormalizeCommand {
    pub paths: RevisionPaths,
    pub revision: RevisionInfo,
    /// Output file (stdout if not set)
    pub output: Option<PathBuf>,
    pub config: AppConfig,
}

/// Normalize one revision and write its document.
#[allow(clippy::needless_pass_by_value)]
pub fn run_normalize(command: NormalizeCommand) -> Result<i32> {
    let quiet = command.config.behavior.quiet;
    let inputs = parse_revision(&command.paths, command.revision, quiet)?;
    let document = normalize_revision(&inputs, &command.config);

    write_document(
        &document,
        &OutputTarget::from_option(command.output),
        command.config.output.pretty,
        quiet,
    )?;
    Ok(exit_codes::SUCCESS)
}
