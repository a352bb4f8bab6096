//! Pipeline orchestration.
//!
//! Shared parse → normalize → diff → aggregate logic for the CLI command
//! handlers. The two revisions are independent until the diff, so
//! [`run_pipeline`] normalizes them on separate rayon workers.

mod aggregate_stage;
mod diff_stage;
mod normalize_stage;
mod output;
mod parse;

pub use aggregate_stage::aggregate_diff;
pub use diff_stage::{compute_diff, gate_exit_code};
pub use normalize_stage::normalize_revision;
pub use output::{OutputTarget, file_names, target_in, write_document, write_output};
pub use parse::{RevisionInputs, RevisionPaths, parse_revision, parse_scan_with_context, parse_sbom_with_context};

use crate::config::AppConfig;
use crate::model::RevisionInfo;
use crate::reports::{AggregateDocument, DiffDocument, NormalizedDocument};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse an input file
    #[error("Parse failed for {path}: {source}")]
    ParseFailed {
        path: String,
        source: anyhow::Error,
    },

    /// Failed to read a previously written document
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        #[source]
        source: crate::error::VulnDiffError,
    },

    /// Document serialization or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success, or no NEW finding tripped the gate
    pub const SUCCESS: i32 = 0;
    /// A NEW finding at or above the `--fail-on-new` severity exists
    pub const NEW_FINDINGS: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// One revision to process: where its inputs live and how to label it.
#[derive(Debug, Clone)]
pub struct RevisionJob {
    pub paths: RevisionPaths,
    pub info: RevisionInfo,
}

/// Every document produced by a full run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub base: NormalizedDocument,
    pub head: NormalizedDocument,
    pub diff: DiffDocument,
    pub aggregate: AggregateDocument,
}

impl PipelineOutput {
    /// Exit code under the configured `fail_on_new` gate.
    #[must_use]
    pub fn exit_code(&self, config: &AppConfig) -> i32 {
        gate_exit_code(&self.diff, config.behavior.fail_on_new)
    }
}

/// Parse, normalize, diff and aggregate both revisions.
pub fn run_pipeline(
    base: RevisionJob,
    head: RevisionJob,
    config: &AppConfig,
) -> Result<PipelineOutput, PipelineError> {
    let quiet = config.behavior.quiet;
    let process = |job: RevisionJob| -> Result<NormalizedDocument, PipelineError> {
        let inputs = parse_revision(&job.paths, job.info, quiet)?;
        Ok(normalize_revision(&inputs, config))
    };

    let (base, head) = rayon::join(|| process(base), || process(head));
    let (base, head) = (base?, head?);

    let diff = compute_diff(&base, &head, quiet);
    let aggregate = aggregate_diff(&diff, config.risk, quiet);

    Ok(PipelineOutput {
        base,
        head,
        diff,
        aggregate,
    })
}

/// Write all documents of a run into `dir`.
pub fn write_pipeline_output(
    output: &PipelineOutput,
    dir: &std::path::Path,
    config: &AppConfig,
) -> Result<(), PipelineError> {
    let pretty = config.output.pretty;
    let quiet = config.behavior.quiet;
    let write = |name: &str, result: anyhow::Result<()>| {
        result.map_err(|source| PipelineError::ReportFailed {
            source: source.context(format!("writing {name}")),
        })
    };

    write(
        file_names::NORMALIZED_BASE,
        write_document(&output.base, &target_in(dir, file_names::NORMALIZED_BASE), pretty, quiet),
    )?;
    write(
        file_names::NORMALIZED_HEAD,
        write_document(&output.head, &target_in(dir, file_names::NORMALIZED_HEAD), pretty, quiet),
    )?;
    write(
        file_names::DIFF,
        write_document(&output.diff, &target_in(dir, file_names::DIFF), pretty, quiet),
    )?;
    write(
        file_names::AGGREGATE,
        write_document(&output.aggregate, &target_in(dir, file_names::AGGREGATE), pretty, quiet),
    )
}
