//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full parse → normalize → diff → aggregate
//! pipeline, the staged CLI handlers and error paths with real fixture files.

use sbom_vuln_diff::cli::{
    AggregateCommand, DiffCommand, NormalizeCommand, RunCommand, run_aggregate, run_all, run_diff,
    run_normalize,
};
use sbom_vuln_diff::config::AppConfig;
use sbom_vuln_diff::model::{DiffState, RevisionInfo, Severity};
use sbom_vuln_diff::pipeline::{
    PipelineError, PipelineOutput, RevisionJob, RevisionPaths, exit_codes, file_names,
    parse_sbom_with_context, parse_scan_with_context, run_pipeline,
};
use sbom_vuln_diff::reports::{load_diff_file, load_normalized_file};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn revision(side: &str) -> RevisionJob {
    RevisionJob {
        paths: RevisionPaths::new(
            fixture_path(&format!("{side}/bom.cdx.json")),
            fixture_path(&format!("{side}/grype.json")),
        ),
        info: RevisionInfo::new(side),
    }
}

fn quiet_config() -> AppConfig {
    AppConfig::builder().quiet(true).build()
}

fn run_fixtures(config: &AppConfig) -> PipelineOutput {
    run_pipeline(revision("base"), revision("head"), config).expect("pipeline should succeed")
}

// ============================================================================
// Parse Stage
// ============================================================================

mod parse_stage {
    use super::*;

    #[test]
    fn parse_fixture_inputs() {
        let sbom = parse_sbom_with_context(&fixture_path("base/bom.cdx.json"), true).unwrap();
        assert_eq!(sbom.component_count(), 4);
        assert_eq!(sbom.primary_component_ref.as_deref(), Some("app"));

        let scan = parse_scan_with_context(&fixture_path("base/grype.json"), true).unwrap();
        assert_eq!(scan.finding_count(), 3);
    }

    #[test]
    fn parse_missing_file_fails() {
        let result = parse_sbom_with_context(Path::new("/nonexistent/bom.json"), true);
        assert!(result.is_err());
    }
}

// ============================================================================
// End-to-end scenario
// ============================================================================

mod end_to_end {
    use super::*;

    #[test]
    fn base_normalization_merges_duplicate_matches() {
        let output = run_fixtures(&quiet_config());
        let base = &output.base;

        assert_eq!(base.stats.raw_matches, 3);
        assert_eq!(base.stats.merged_duplicates, 1);
        assert_eq!(base.occurrences.len(), 2);

        let a = base
            .occurrences
            .iter()
            .find(|o| o.match_key == "CVE-2024-0001::com.lib:a:1.0")
            .expect("merged occurrence for a@1.0");
        assert_eq!(a.severity, Severity::High);
        assert_eq!(a.cvss_score(), Some(7.5));
        assert_eq!(
            a.paths.iter().next().unwrap(),
            &vec![
                "com.acme:app:1.0".to_string(),
                "com.acme:web:1.0".to_string(),
                "com.lib:a:1.0".to_string(),
            ]
        );
    }

    #[test]
    fn diff_partitions_fixture_revisions() {
        let output = run_fixtures(&quiet_config());
        let diff = &output.diff;

        let state_of = |key: &str| {
            diff.items
                .iter()
                .find(|i| i.match_key() == key)
                .map(|i| i.state)
        };
        assert_eq!(state_of("CVE-2024-0003::com.lib:c:3.0"), Some(DiffState::New));
        assert_eq!(state_of("CVE-2024-0002::com.lib:b:2.0"), Some(DiffState::Removed));
        assert_eq!(state_of("CVE-2024-0001::com.lib:a:1.0"), Some(DiffState::Unchanged));
        assert_eq!(diff.items.len(), 3);

        let summary = &diff.summary;
        assert_eq!(summary.cell(Severity::Critical, DiffState::New), 1);
        assert_eq!(summary.cell(Severity::Low, DiffState::Removed), 1);
        assert_eq!(summary.cell(Severity::High, DiffState::Unchanged), 1);
        assert_eq!(summary.populated_cells(), 3);

        // Presentation order: most severe first
        assert_eq!(diff.items[0].severity(), Severity::Critical);
    }

    #[test]
    fn aggregate_attributes_modules() {
        let output = run_fixtures(&quiet_config());
        let aggregate = &output.aggregate.aggregate;

        let web = &aggregate.modules["web"];
        assert_eq!(web.cell(Severity::Critical, DiffState::New), 1);
        assert_eq!(web.cell(Severity::High, DiffState::Unchanged), 1);
        assert_eq!(web.cell(Severity::Low, DiffState::Removed), 1);
        let api = &aggregate.modules["api"];
        assert_eq!(api.total(), 1);
        assert_eq!(aggregate.unattributed.total(), 0);

        assert_eq!(aggregate.multi_module_findings.len(), 1);
        let multi = &aggregate.multi_module_findings[0];
        assert_eq!(multi.id, "CVE-2024-0003");
        assert_eq!(multi.modules.len(), 2);
        assert!(multi.module_paths["api"].contains("com.lib:c:3.0"));

        assert_eq!(aggregate.risk.new_weighted, 5);
        assert_eq!(aggregate.risk.removed_weighted, 1);
        assert_eq!(aggregate.risk.net_risk, 4);
        assert_eq!(aggregate.fix_availability.new_only.with_fix.critical, 1);
        assert_eq!(aggregate.fix_availability.base.with_fix.low, 1);
    }

    #[test]
    fn gate_trips_on_new_critical() {
        let config = AppConfig::builder()
            .quiet(true)
            .fail_on_new(Some(Severity::Critical))
            .build();
        assert_eq!(run_fixtures(&config).exit_code(&config), exit_codes::NEW_FINDINGS);
        assert_eq!(run_fixtures(&quiet_config()).exit_code(&quiet_config()), exit_codes::SUCCESS);
    }

    #[test]
    fn revision_metadata_is_carried() {
        let output = run_fixtures(&quiet_config());
        assert_eq!(output.diff.base.name, "base");
        assert_eq!(output.diff.head.name, "head");
        assert_eq!(output.diff.head.component_count, 5);
        assert_eq!(output.diff.base.raw_match_count, 3);
    }

    #[test]
    fn zero_path_limit_leaves_everything_unattributed() {
        let config = AppConfig::builder().quiet(true).path_limit(0).build();
        let output = run_fixtures(&config);
        assert!(output.base.occurrences.iter().all(|o| o.paths.is_empty()));
        assert_eq!(output.aggregate.aggregate.unattributed.total(), 3);
        assert!(output.aggregate.aggregate.modules.is_empty());
    }
}

// ============================================================================
// CLI handlers
// ============================================================================

mod cli_handlers {
    use super::*;

    #[test]
    fn staged_commands_match_run() {
        let tmp = tempfile::TempDir::new().unwrap();
        let base_doc = tmp.path().join("base.json");
        let head_doc = tmp.path().join("head.json");
        let diff_doc = tmp.path().join("diff.json");
        let aggregate_doc = tmp.path().join("aggregate.json");

        for (side, out) in [("base", &base_doc), ("head", &head_doc)] {
            let job = revision(side);
            let code = run_normalize(NormalizeCommand {
                paths: job.paths,
                revision: job.info,
                output: Some(out.clone()),
                config: quiet_config(),
            })
            .unwrap();
            assert_eq!(code, exit_codes::SUCCESS);
        }

        let code = run_diff(DiffCommand {
            base: base_doc.clone(),
            head: head_doc.clone(),
            output: Some(diff_doc.clone()),
            config: quiet_config(),
        })
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        run_aggregate(AggregateCommand {
            diff: diff_doc.clone(),
            output: Some(aggregate_doc.clone()),
            config: quiet_config(),
        })
        .unwrap();

        let staged = load_diff_file(&diff_doc).unwrap();
        let direct = run_fixtures(&quiet_config()).diff;
        assert_eq!(staged.items, direct.items);
        assert_eq!(staged.summary, direct.summary);

        let aggregate: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&aggregate_doc).unwrap()).unwrap();
        assert_eq!(aggregate["risk"]["net_risk"], 4);
        assert_eq!(aggregate["schema_version"], "1.0");
    }

    #[test]
    fn run_writes_all_documents() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out_dir = tmp.path().join("report");
        let config = AppConfig::builder()
            .quiet(true)
            .fail_on_new(Some(Severity::High))
            .build();

        let code = run_all(RunCommand {
            base: revision("base"),
            head: revision("head"),
            output_dir: out_dir.clone(),
            config,
        })
        .unwrap();
        assert_eq!(code, exit_codes::NEW_FINDINGS);

        for name in [
            file_names::NORMALIZED_BASE,
            file_names::NORMALIZED_HEAD,
            file_names::DIFF,
            file_names::AGGREGATE,
        ] {
            assert!(out_dir.join(name).exists(), "{name} should be written");
        }
        let head = load_normalized_file(&out_dir.join(file_names::NORMALIZED_HEAD)).unwrap();
        assert_eq!(head.occurrences.len(), 2);
    }

    #[test]
    fn unparseable_scan_is_reported_with_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let scan = tmp.path().join("grype.json");
        std::fs::write(&scan, r#"{"descriptor": {"name": "grype"}}"#).unwrap();

        let head = RevisionJob {
            paths: RevisionPaths::new(fixture_path("head/bom.cdx.json"), &scan),
            info: RevisionInfo::new("head"),
        };
        let err = run_pipeline(revision("base"), head, &quiet_config()).unwrap_err();
        match err {
            PipelineError::ParseFailed { path, source } => {
                assert!(path.ends_with("grype.json"));
                assert!(format!("{source:#}").contains("matches"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn aggregate_rejects_document_without_items() {
        let tmp = tempfile::TempDir::new().unwrap();
        let diff_doc = tmp.path().join("diff.json");
        std::fs::write(
            &diff_doc,
            r#"{"schema_version": "1.0", "generated_at": "2024-01-01T00:00:00Z", "base": {"name": "b"}, "head": {"name": "h"}}"#,
        )
        .unwrap();
        let out = tmp.path().join("aggregate.json");

        let result = run_aggregate(AggregateCommand {
            diff: diff_doc,
            output: Some(out.clone()),
            config: quiet_config(),
        });
        assert!(result.is_err());
        assert!(!out.exists());
    }
}
