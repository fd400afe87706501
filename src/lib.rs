//! exemplify example-extraction engine
//!
//! Scans ordinary source files for marker comments and reconstructs
//! named, possibly multi-part, multi-file code examples for documentation
//! rendering. The markers are plain text, so they work inside any host
//! language's comments:
//!
//! ```text
//! // ##exemplify-start##{name="foo/bar", title="Test example 1", part=1}
//! const greeting = "hello";
//! console.log(greeting); // ##callout##{value="this is a callout"}
//! // ##exemplify-end##
//! ```
//!
//! The engine treats source as text; it neither parses the host language
//! nor validates that extracted snippets compile. File discovery and
//! rendering belong to the surrounding tool.
//!
//! ## Public API
//!
//! A scan pass is one call to [`scan_sources`] (in-memory text) or
//! [`scan_paths`] (files on disk). Both return a [`ScanOutcome`]: an
//! [`ExampleStore`] of assembled [`Example`]s plus every recoverable
//! [`ScanError`], with file and line locations. Marker tokens are
//! configurable via [`MarkerSyntax`].
//!
//! The lower layers are exposed for tools that want them:
//! [`scan_source`] extracts one file's [`Region`]s, and
//! [`assemble_examples`] is the pure cross-file grouping step.

mod assembler;
mod config;
mod error;
mod marker;
mod scanner;
mod store;
mod tracker;

pub use assembler::{assemble_examples, Assembly, Example, Part};
pub use config::MarkerSyntax;
pub use error::{ScanError, ScanErrorKind};
pub use scanner::{scan_paths, scan_sources, ScanOutcome};
pub use store::ExampleStore;
pub use tracker::{scan_source, Callout, FileScan, Region};
