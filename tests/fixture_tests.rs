//! Fixture-driven conversion tests.
//!
//! Each case in tests/fixtures/cases.json holds an input, the expected HTML
//! and optional option overrides.

use orgmark::{to_html_with_options, Options};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    input: String,
    html: String,
    #[serde(default)]
    heading_offset: usize,
    #[serde(default)]
    heading_ids: bool,
    #[serde(default = "default_allow_html")]
    allow_html: bool,
}

fn default_allow_html() -> bool {
    true
}

impl Case {
    fn options(&self) -> Options {
        Options {
            heading_offset: self.heading_offset,
            allow_html: self.allow_html,
            heading_ids: self.heading_ids,
        }
    }
}

fn load_cases() -> Vec<Case> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cases.json");
    let json = fs::read_to_string(path).expect("Failed to read tests/fixtures/cases.json");
    serde_json::from_str(&json).expect("Failed to parse cases.json")
}

#[test]
fn fixtures_all_pass() {
    let cases = load_cases();
    assert!(!cases.is_empty());

    let mut failures = Vec::new();
    for case in &cases {
        let output = to_html_with_options(&case.input, &case.options())
            .unwrap_or_else(|err| format!("error: {err}"));
        if output != case.html {
            failures.push(format!(
                "--- {}\ninput:    {:?}\nexpected: {:?}\ngot:      {:?}",
                case.name, case.input, case.html, output
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} fixtures failed:\n{}",
        failures.len(),
        cases.len(),
        failures.join("\n")
    );
}

#[test]
fn fixture_names_are_unique() {
    let cases = load_cases();
    let mut names: Vec<_> = cases.iter().map(|case| case.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), cases.len());
}
