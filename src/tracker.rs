use crate::config::MarkerSyntax;
use crate::error::{ScanError, ScanErrorKind};
use crate::marker::{classify_line, Attributes, LineToken};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// An annotation attached to one line of a region, carrying a display
/// value for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Callout {
    /// 0-based index into the region's content lines.
    pub offset: usize,
    pub value: String,
}

/// One contiguous extracted span of source, bounded by a start/end marker
/// pair. Regions are transient: the assembler consumes them to build
/// [`Example`](crate::Example) parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Name of the example this region contributes to.
    pub name: String,
    /// Part number within the example. Defaults to 1.
    pub part: u32,
    pub title: Option<String>,
    pub language: Option<String>,
    /// Leading characters to strip from every line. Defaults to 0.
    pub indentation: usize,
    /// Content lines, verbatim, marker lines excluded.
    pub lines: Vec<String>,
    pub callouts: Vec<Callout>,
    /// File the region was extracted from.
    pub file: PathBuf,
    /// 1-based line number of the start marker.
    pub start_line: usize,
}

/// The outcome of scanning one file: completed regions plus every
/// recoverable error encountered, in source order.
#[derive(Debug, Default)]
pub struct FileScan {
    pub regions: Vec<Region>,
    pub errors: Vec<ScanError>,
}

/// Scans one file's text for marker comments and extracts its regions.
///
/// Regions may nest: a start marker is valid while another region is
/// open, and an end marker always closes the innermost one. Marker lines
/// are never content of any region; every other line between a region's
/// start and end belongs to that region, so an outer region keeps a
/// nested region's content lines but not its marker lines.
///
/// Errors are collected, never fatal — a file with a malformed marker
/// still yields every region that scanned cleanly.
pub fn scan_source(file: impl AsRef<Path>, content: &str, syntax: &MarkerSyntax) -> FileScan {
    let mut tracker = RegionTracker::new(file.as_ref());

    for (idx, line) in content.lines().enumerate() {
        tracker.feed_line(idx + 1, line, syntax);
    }

    tracker.finish()
}

struct RegionTracker {
    file: PathBuf,
    open: Vec<Region>,
    completed: Vec<Region>,
    errors: Vec<ScanError>,
}

impl RegionTracker {
    fn new(file: &Path) -> Self {
        Self {
            file: file.to_path_buf(),
            open: Vec::new(),
            completed: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn feed_line(&mut self, line_no: usize, line: &str, syntax: &MarkerSyntax) {
        match classify_line(line, syntax) {
            Err(kind) => self.report(kind, line_no),
            Ok(LineToken::Start(attrs)) => self.open_region(line_no, attrs),
            Ok(LineToken::End) => self.close_region(line_no),
            Ok(LineToken::Callout { before, attributes }) => {
                self.attach_callout(line_no, before, attributes)
            }
            Ok(LineToken::Plain) => {
                for region in &mut self.open {
                    region.lines.push(line.to_string());
                }
            }
        }
    }

    fn open_region(&mut self, line_no: usize, attrs: Attributes) {
        // A start without `name` continues the innermost open region's
        // example; with nothing open there is nothing to continue.
        let name = match attrs.name() {
            Some(name) => name.to_string(),
            None => match self.open.last() {
                Some(outer) => outer.name.clone(),
                None => {
                    self.report(ScanErrorKind::MissingNameOnStart, line_no);
                    return;
                }
            },
        };

        let part = match attrs.part() {
            Ok(part) => part.unwrap_or(1),
            Err(kind) => {
                self.report(kind, line_no);
                return;
            }
        };

        let indentation = match attrs.indentation() {
            Ok(indentation) => indentation.unwrap_or(0),
            Err(kind) => {
                self.report(kind, line_no);
                return;
            }
        };

        self.open.push(Region {
            name,
            part,
            title: attrs.title().map(str::to_string),
            language: attrs.language().map(str::to_string),
            indentation,
            lines: Vec::new(),
            callouts: Vec::new(),
            file: self.file.clone(),
            start_line: line_no,
        });
    }

    fn close_region(&mut self, line_no: usize) {
        match self.open.pop() {
            Some(region) => {
                log::debug!(
                    "{}:{}: closed region `{}` part {} ({} lines)",
                    self.file.display(),
                    line_no,
                    region.name,
                    region.part,
                    region.lines.len()
                );
                self.completed.push(region);
            }
            None => self.report(ScanErrorKind::UnmatchedEnd, line_no),
        }
    }

    fn attach_callout(&mut self, line_no: usize, before: String, attrs: Attributes) {
        let value = match attrs.value() {
            Some(value) => value.to_string(),
            None => {
                self.report(
                    ScanErrorKind::MalformedAttributeBlock(
                        "callout requires a `value` attribute".to_string(),
                    ),
                    line_no,
                );
                return;
            }
        };

        if self.open.is_empty() {
            log::warn!(
                "{}:{}: callout outside any region, ignored",
                self.file.display(),
                line_no
            );
            return;
        }

        // The code text survives in every open region's content; the
        // callout itself belongs to the innermost one.
        if !before.is_empty() {
            for region in &mut self.open {
                region.lines.push(before.clone());
            }
        }

        if let Some(innermost) = self.open.last_mut() {
            let offset = innermost.lines.len().saturating_sub(1);
            innermost.callouts.push(Callout { offset, value });
        }
    }

    fn finish(mut self) -> FileScan {
        // Innermost first, so errors come out in a stable order.
        while let Some(region) = self.open.pop() {
            self.errors.push(ScanError::new(
                ScanErrorKind::UnterminatedRegion {
                    name: region.name.clone(),
                },
                self.file.clone(),
                region.start_line,
            ));
        }

        self.errors.sort_by_key(|e| e.line);

        FileScan {
            regions: self.completed,
            errors: self.errors,
        }
    }

    fn report(&mut self, kind: ScanErrorKind, line_no: usize) {
        self.errors.push(ScanError::new(kind, self.file.clone(), line_no));
    }
}
