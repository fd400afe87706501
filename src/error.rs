use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A recoverable diagnostic produced while scanning source files.
///
/// Scan errors never abort a scan pass. They are collected and returned
/// alongside whatever assembled successfully, so the surrounding tool can
/// surface all of them to the user at once with file and line locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanError {
    pub kind: ScanErrorKind,
    /// Source file the diagnostic points at.
    pub file: PathBuf,
    /// 1-based line number of the offending marker.
    pub line: usize,
}

impl ScanError {
    pub fn new(kind: ScanErrorKind, file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            kind,
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file.display(), self.line, self.kind)
    }
}

/// The kinds of recoverable errors a scan can report.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ScanErrorKind {
    /// The brace-delimited attribute block after a marker token could not
    /// be parsed. The marker line is skipped; scanning continues.
    #[error("malformed attribute block: {0}")]
    MalformedAttributeBlock(String),

    /// An attribute that must be an integer (`part`, `indentation`) held
    /// something else, or `part` was zero.
    #[error("invalid numeric value for attribute `{attribute}`: {value}")]
    InvalidNumericAttribute { attribute: String, value: String },

    /// A start marker was still open when its file ended. The location is
    /// the start marker's; the region contributes nothing to any example.
    #[error("region `{name}` is never terminated")]
    UnterminatedRegion { name: String },

    /// An end marker appeared with no region open.
    #[error("end marker with no matching start")]
    UnmatchedEnd,

    /// Two regions claimed the same `(name, part)` pair. The first one in
    /// scan order is kept; this error points at the discarded one.
    #[error(
        "duplicate part {part} for example `{name}` (kept {}:{kept_line})",
        kept_file.display()
    )]
    DuplicatePart {
        name: String,
        part: u32,
        kept_file: PathBuf,
        kept_line: usize,
    },

    /// A start marker omitted `name` with no enclosing region to inherit
    /// it from.
    #[error("start marker is missing the `name` attribute")]
    MissingNameOnStart,
}
