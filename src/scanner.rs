use crate::assembler::assemble_examples;
use crate::config::MarkerSyntax;
use crate::error::ScanError;
use crate::store::ExampleStore;
use crate::tracker::{scan_source, Region};
use anyhow::{Context, Result};
use std::path::Path;

/// The result of one scan pass: a populated store plus every recoverable
/// error from every file, in scan order.
///
/// A pass with errors still carries whatever assembled successfully;
/// callers decide whether diagnostics fail their build.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub store: ExampleStore,
    pub errors: Vec<ScanError>,
}

/// Runs one scan pass over in-memory sources.
///
/// Per-file scanning is independent; cross-file grouping happens as a
/// single reduction after all files are scanned, so the pass needs no
/// shared mutable state and duplicate-part conflicts resolve
/// deterministically in source order.
pub fn scan_sources<P, S>(
    sources: impl IntoIterator<Item = (P, S)>,
    syntax: &MarkerSyntax,
) -> ScanOutcome
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let mut regions: Vec<Region> = Vec::new();
    let mut errors: Vec<ScanError> = Vec::new();

    for (path, content) in sources {
        let path = path.as_ref();
        log::debug!("Scanning {}", path.display());

        let mut scan = scan_source(path, content.as_ref(), syntax);
        regions.append(&mut scan.regions);
        errors.append(&mut scan.errors);
    }

    let mut assembly = assemble_examples(regions);
    errors.append(&mut assembly.errors);

    let mut store = ExampleStore::new();
    for example in assembly.examples {
        store.put(example);
    }

    log::info!(
        "Scan pass assembled {} example(s), {} error(s)",
        store.len(),
        errors.len()
    );

    ScanOutcome { store, errors }
}

/// Runs one scan pass over files on disk.
///
/// The caller supplies the file list; discovery and glob matching belong
/// to the surrounding tool. Fails only when a file cannot be read —
/// marker problems are collected in the outcome, never fatal.
pub fn scan_paths<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
    syntax: &MarkerSyntax,
) -> Result<ScanOutcome> {
    let mut sources = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        sources.push((path.to_path_buf(), content));
    }

    Ok(scan_sources(sources, syntax))
}
