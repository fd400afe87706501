//! Common test utilities for integration tests
//!
//! Holds the two near-duplicate fixture sources exercised by the
//! integration tests and a helper that materializes them on disk for the
//! file-reading tests.

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

/// Fixture file 1: a two-part `foo/bar` example plus part 1 of
/// `multi-file-example`, whose span overlaps `foo/bar` part 2.
pub const FIXTURE_ONE: &str = r#"import { greet } from "./greet";

// ##exemplify-start##{name = "foo/bar", title = "Test example 1", part = 1}
const greeting = greet("world");
// ##exemplify-end##

// ##exemplify-start##{name="multi-file-example", part=1, indentation=0}
// ##exemplify-start##{name="foo/bar" part=2 language="javascript"}
console.log(greeting); // ##callout##{value="this is a callout"}
// ##exemplify-end##
// ##exemplify-end##
"#;

/// Fixture file 2: near-duplicate of file 1, contributing part 2 of
/// `multi-file-example`.
pub const FIXTURE_TWO: &str = r#"import { greet } from "./greet";

// ##exemplify-start##{name="multi-file-example", part=2, indentation=0}
console.log(greet("again"));
// ##exemplify-end##
"#;

/// Writes both fixtures into a temporary directory and returns it with
/// the file paths. The directory cleans itself up on drop.
pub fn fixture_on_disk() -> Result<(TempDir, Vec<PathBuf>)> {
    let dir = TempDir::new()?;

    let one = dir.path().join("fixture_one.ts");
    let two = dir.path().join("fixture_two.ts");
    std::fs::write(&one, FIXTURE_ONE)?;
    std::fs::write(&two, FIXTURE_TWO)?;

    Ok((dir, vec![one, two]))
}

/// Initializes logging for tests that want `RUST_LOG` output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
