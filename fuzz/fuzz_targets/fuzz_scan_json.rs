#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_vuln_diff::graph::SbomGraphIndex;
use sbom_vuln_diff::model::Sbom;
use sbom_vuln_diff::normalize::Normalizer;
use sbom_vuln_diff::parsers::{GrypeParser, InputParser};

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the scan parser and normalize whatever it accepts against an empty graph.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parser = GrypeParser::new();
        let graph = SbomGraphIndex::build(&Sbom::new());

        if let Ok(scan) = parser.parse_str(s) {
            let _ = Normalizer::new(&graph).normalize(&scan);
        }

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(r#"{{"matches":[{s}]}}"#);
            if let Ok(scan) = parser.parse_str(&wrapped) {
                let _ = Normalizer::new(&graph).normalize(&scan);
            }
        }
    }
});
