#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_vuln_diff::graph::SbomGraphIndex;
use sbom_vuln_diff::parsers::{CycloneDxParser, InputParser};

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the CycloneDX JSON parser and the graph built from its output.
///
/// Wrapped inputs land inside `components` so the fuzzer spends its time on
/// component and dependency handling instead of the top-level shape.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parser = CycloneDxParser::new();

        if let Ok(sbom) = parser.parse_str(s) {
            let graph = SbomGraphIndex::build(&sbom);
            for root in graph.roots() {
                let _ = graph.paths_to_target(root, 5);
            }
        }

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(
                r#"{{"bomFormat":"CycloneDX","specVersion":"1.5","components":[{s}]}}"#,
            );
            if let Ok(sbom) = parser.parse_str(&wrapped) {
                let graph = SbomGraphIndex::build(&sbom);
                for component in sbom.components.keys() {
                    let _ = graph.paths_to_target(component, 5);
                }
            }
        }
    }
});
