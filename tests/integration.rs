//! Integration tests for the exemplify extraction engine
//!
//! These tests run full scan passes over the two near-duplicate fixture
//! sources (see `common`), covering cross-file assembly, callouts,
//! nested regions, and the recoverable-error contract end to end.

mod common;

use anyhow::Result;
use common::{fixture_on_disk, init_logging, FIXTURE_ONE, FIXTURE_TWO};
use exemplify::{scan_paths, scan_sources, MarkerSyntax, ScanErrorKind, ScanOutcome};

fn scan_fixture() -> ScanOutcome {
    init_logging();
    scan_sources(
        [("fixture_one.ts", FIXTURE_ONE), ("fixture_two.ts", FIXTURE_TWO)],
        &MarkerSyntax::default(),
    )
}

#[test]
fn integration_fixture_scans_cleanly() {
    let outcome = scan_fixture();
    assert!(outcome.errors.is_empty(), "unexpected: {:?}", outcome.errors);
    assert_eq!(outcome.store.len(), 2);
}

#[test]
fn integration_foo_bar_assembles_two_parts() {
    let outcome = scan_fixture();

    let example = outcome.store.get("foo/bar").expect("foo/bar assembled");
    assert_eq!(example.title.as_deref(), Some("Test example 1"));
    assert_eq!(example.parts.len(), 2);

    let part_one = &example.parts[0];
    assert_eq!(part_one.part, 1);
    assert_eq!(part_one.language, None);
    assert_eq!(part_one.text, "const greeting = greet(\"world\");");

    let part_two = &example.parts[1];
    assert_eq!(part_two.part, 2);
    assert_eq!(part_two.language.as_deref(), Some("javascript"));
}

#[test]
fn integration_multi_file_example_groups_across_files() {
    let outcome = scan_fixture();

    let example = outcome
        .store
        .get("multi-file-example")
        .expect("multi-file-example assembled");
    assert_eq!(example.parts.len(), 2);
    assert_eq!(example.parts[0].part, 1);
    assert_eq!(example.parts[0].text, "console.log(greeting);");
    assert_eq!(example.parts[1].part, 2);
    assert_eq!(example.parts[1].text, "console.log(greet(\"again\"));");
}

#[test]
fn integration_trailing_callout_preserves_code_line() {
    let outcome = scan_fixture();

    let example = outcome.store.get("foo/bar").unwrap();
    let part_two = &example.parts[1];
    assert_eq!(part_two.text, "console.log(greeting);");
    assert_eq!(part_two.callouts.len(), 1);
    assert_eq!(part_two.callouts[0].offset, 0);
    assert_eq!(part_two.callouts[0].value, "this is a callout");

    // The overlapping outer region keeps the code line but not the
    // inner region's callout.
    let outer = outcome.store.get("multi-file-example").unwrap();
    assert!(outer.parts[0].callouts.is_empty());
}

#[test]
fn integration_unterminated_region_contributes_nothing() {
    init_logging();
    let truncated = "// ##exemplify-start##{name=\"cut-off\"}\nnever_closed();\n";
    let outcome = scan_sources([("truncated.ts", truncated)], &MarkerSyntax::default());

    assert!(outcome.store.get("cut-off").is_none());
    assert_eq!(outcome.errors.len(), 1);
    let err = &outcome.errors[0];
    assert_eq!(err.line, 1);
    assert_eq!(
        err.kind,
        ScanErrorKind::UnterminatedRegion {
            name: "cut-off".into()
        }
    );
}

#[test]
fn integration_scan_order_does_not_change_assembly() {
    init_logging();
    let syntax = MarkerSyntax::default();

    let forward = scan_sources(
        [("fixture_one.ts", FIXTURE_ONE), ("fixture_two.ts", FIXTURE_TWO)],
        &syntax,
    );
    let reversed = scan_sources(
        [("fixture_two.ts", FIXTURE_TWO), ("fixture_one.ts", FIXTURE_ONE)],
        &syntax,
    );

    for name in ["foo/bar", "multi-file-example"] {
        let a = forward.store.get(name).unwrap();
        let b = reversed.store.get(name).unwrap();
        assert_eq!(a.parts, b.parts, "parts differ for {}", name);
    }
}

#[test]
fn integration_scan_paths_reads_fixture_files() -> Result<()> {
    init_logging();
    let (_dir, paths) = fixture_on_disk()?;

    let outcome = scan_paths(&paths, &MarkerSyntax::default())?;

    assert!(outcome.errors.is_empty());
    assert!(outcome.store.get("foo/bar").is_some());
    assert_eq!(
        outcome.store.get("multi-file-example").unwrap().parts.len(),
        2
    );
    Ok(())
}

#[test]
fn integration_scan_paths_fails_on_unreadable_file() {
    init_logging();
    let result = scan_paths(
        ["/nonexistent/exemplify/fixture.ts"],
        &MarkerSyntax::default(),
    );
    assert!(result.is_err());
}

#[test]
fn integration_store_resets_between_builds() {
    let mut outcome = scan_fixture();
    assert!(!outcome.store.is_empty());

    outcome.store.reset();
    assert!(outcome.store.is_empty());
    assert!(outcome.store.get("foo/bar").is_none());
}

#[test]
fn integration_examples_serialize_for_renderer() {
    let outcome = scan_fixture();
    let example = outcome.store.get("foo/bar").unwrap();

    let json: serde_json::Value = serde_json::from_str(&example.to_json().unwrap()).unwrap();
    assert_eq!(json["name"], "foo/bar");
    assert_eq!(json["title"], "Test example 1");
    assert_eq!(json["parts"][1]["language"], "javascript");
    assert_eq!(json["parts"][0].get("language"), None);
}
