//! crlint core library
//!
//! Heuristic review checks for a single change request (merge/pull request):
//! metadata hygiene, commit title conventions, lock file consistency, asset
//! formats, and a concurrent line scanner for SVG content. Checks never
//! block or fail; they only report diagnostics through a [`DiagnosticSink`].

pub mod checks;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod facts;
pub mod fetch;
pub mod obs;
pub mod report;
pub mod telemetry;

pub use config::{
    EngineConfig, BIG_CHANGE_THRESHOLD, LONG_TITLE_THRESHOLD, PACKAGE_LOCKFILE, PACKAGE_MANIFEST,
};
pub use diagnostic::{Diagnostic, DiagnosticSink, MemorySink};
pub use engine::{EvaluationSummary, RuleEngine, SvgScanReport};
pub use error::{CrlintError, FetchError, Result};
pub use facts::{ChangeCount, ChangeFacts, ChangeRequest, Commit, FileChanges, Identity};
pub use fetch::{ContentFetcher, FetchResult, FsContentFetcher, MemoryContentFetcher};
pub use report::{render_markdown, EvaluationReport};
pub use telemetry::init_tracing;
