//! Output handling for documents.

use crate::reports::JsonReporter;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{content}").context("Failed to write output to stdout")?;
            Ok(())
        }
        OutputTarget::File(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
            std::fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Document written to {}", path.display());
            }
            Ok(())
        }
    }
}

/// Serialize a document as JSON and write it to the target.
pub fn write_document<T: Serialize>(
    document: &T,
    target: &OutputTarget,
    pretty: bool,
    quiet: bool,
) -> Result<()> {
    let reporter = JsonReporter::new().pretty(pretty);
    match target {
        OutputTarget::Stdout => reporter
            .write_report(document, &mut std::io::stdout().lock())
            .context("Failed to write output to stdout"),
        OutputTarget::File(_) => {
            let json = reporter
                .generate(document)
                .context("Failed to serialize document")?;
            write_output(&json, target, quiet)
        }
    }
}

/// File names used by the `run` command inside its output directory.
pub mod file_names {
    pub const NORMALIZED_BASE: &str = "normalized-base.json";
    pub const NORMALIZED_HEAD: &str = "normalized-head.json";
    pub const DIFF: &str = "diff.json";
    pub const AGGREGATE: &str = "aggregate.json";
}

/// Target for one of the `run` command's documents.
#[must_use]
pub fn target_in(dir: &Path, file_name: &str) -> OutputTarget {
    OutputTarget::File(dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_from_option() {
        assert_eq!(OutputTarget::from_option(None), OutputTarget::Stdout);
        let path = PathBuf::from("/tmp/test.json");
        assert_eq!(
            OutputTarget::from_option(Some(path.clone())),
            OutputTarget::File(path)
        );
    }

    #[test]
    fn test_write_document_creates_parent_dirs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let target = target_in(&tmp.path().join("nested"), file_names::DIFF);
        write_document(&serde_json::json!({"items": []}), &target, false, true).unwrap();

        let written = std::fs::read_to_string(tmp.path().join("nested").join("diff.json")).unwrap();
        assert_eq!(written, "{\"items\":[]}\n");
    }
}
