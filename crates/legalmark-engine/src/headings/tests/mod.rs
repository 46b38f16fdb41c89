//! Whole-document tests for the numbering pass.
//!
//! Fixture pairs live in `fixtures/`: a `.lmd` template and the `.md`
//! output it must render to, compared byte-for-byte. Parameters are the
//! front matter the out-of-scope loader would have supplied.

use std::collections::HashMap;

use pretty_assertions::assert_eq;

fn assert_fixture(name: &str, parameters: &[(&str, &str)]) {
    let fixtures_dir = format!(
        "{}/src/headings/tests/fixtures",
        env!("CARGO_MANIFEST_DIR")
    );
    let input = std::fs::read_to_string(format!("{fixtures_dir}/{name}.lmd")).unwrap();
    let expected = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();

    let mut parameters: HashMap<String, String> = parameters
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let rendered = crate::process(&input, &mut parameters).unwrap();

    assert_eq!(rendered, expected);
}

#[test]
fn fixture_legacy_crossref() {
    assert_fixture(
        "legacy_crossref",
        &[("level-1", "1."), ("level-2", "a."), ("level-3", "i.")],
    );
}

#[test]
fn fixture_numbered_no_reset() {
    assert_fixture(
        "numbered_no_reset",
        &[
            ("level-style", "l1."),
            ("level-1", "A."),
            ("level-2", "(1)"),
            ("no-reset", "l2."),
            ("no-indent", "l1."),
        ],
    );
}

#[test]
fn fixture_backref_nested() {
    assert_fixture(
        "backref_nested",
        &[
            ("level-1", "1."),
            ("level-2", "pre (a)"),
            ("level-3", "pre (i)"),
        ],
    );
}

/// A document with no outline block is returned untouched.
#[test]
fn fixture_no_block_is_identity() {
    assert_fixture("no_block", &[("level-1", "1.")]);
}

/// Rendering the same template twice from fresh tables is byte-identical.
#[test]
fn passes_are_deterministic() {
    let fixtures_dir = format!(
        "{}/src/headings/tests/fixtures",
        env!("CARGO_MANIFEST_DIR")
    );
    let input = std::fs::read_to_string(format!("{fixtures_dir}/legacy_crossref.lmd")).unwrap();
    let pairs = [("level-1", "1."), ("level-2", "a."), ("level-3", "i.")];

    let mut first: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut second = first.clone();

    assert_eq!(
        crate::process(&input, &mut first).unwrap(),
        crate::process(&input, &mut second).unwrap()
    );
}

/// Control keys are consumed from the mapping; content macros survive.
#[test]
fn parameters_are_returned_without_control_keys() {
    let mut parameters: HashMap<String, String> = [
        ("level-style", "l1."),
        ("level-1", "1."),
        ("no-indent", "l1."),
        ("no-reset", "l1."),
        ("party-name", "Acme Ltd"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    crate::process("no block here\n", &mut parameters).unwrap();

    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters.get("party-name").map(String::as_str), Some("Acme Ltd"));
}
