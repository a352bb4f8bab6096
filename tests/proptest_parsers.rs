//! Property-based tests for input parsers and document loaders.
//!
//! Parsers must return `Err` on malformed input, never panic. Assertions
//! are limited to no-panic except where random input cannot be valid.

use proptest::prelude::*;
use sbom_vuln_diff::parsers::{parse_sbom_str, parse_scan_str};
use sbom_vuln_diff::reports::{load_diff_str, load_normalized_str};

proptest! {
    // 500 cases balances coverage vs speed for parser fuzz tests.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parse_sbom_str_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = parse_sbom_str(&s);
    }

    #[test]
    fn parse_scan_str_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = parse_scan_str(&s);
    }

    #[test]
    fn json_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"\{[^\}]{0,500}\}"#).unwrap()
    ) {
        let _ = parse_sbom_str(&s);
        let _ = parse_scan_str(&s);
        let _ = load_normalized_str(&s);
        let _ = load_diff_str(&s);
    }

    #[test]
    fn arbitrary_component_fields_parse(
        name in "\\PC{0,40}",
        version in "\\PC{0,20}",
        purl in "\\PC{0,80}",
    ) {
        let doc = serde_json::json!({
            "components": [{"bom-ref": "x", "name": name, "version": version, "purl": purl}],
            "dependencies": [{"ref": "x", "dependsOn": ["x", "missing"]}]
        });
        let sbom = parse_sbom_str(&doc.to_string());
        prop_assert!(sbom.is_ok());
    }

    #[test]
    fn arbitrary_match_fields_parse(
        id in "\\PC{0,40}",
        severity in "\\PC{0,12}",
        score in any::<f64>(),
        state in "\\PC{0,12}",
    ) {
        let doc = serde_json::json!({
            "matches": [{
                "vulnerability": {
                    "id": id,
                    "severity": severity,
                    "cvss": [{"metrics": {"baseScore": if score.is_finite() { serde_json::json!(score) } else { serde_json::Value::Null }}}],
                    "fix": {"state": state, "versions": []}
                },
                "artifact": {"name": "a", "version": "1"}
            }]
        });
        let scan = parse_scan_str(&doc.to_string());
        prop_assert!(scan.is_ok());
        prop_assert_eq!(scan.unwrap().finding_count(), 1);
    }

    #[test]
    fn truncated_documents_fail_cleanly(cut in 0usize..200) {
        let doc = r#"{"matches": [{"vulnerability": {"id": "CVE-2024-1", "severity": "High"}, "artifact": {"name": "a"}}]}"#;
        let cut = cut.min(doc.len() - 1);
        prop_assert!(parse_scan_str(&doc[..cut]).is_err());
    }
}
