//! Structured observability hooks for the evaluation lifecycle.
//!
//! Lifecycle events are emitted at `info!`, per-check detail at `debug!`
//! (configurable via `RUST_LOG`). For JSON output see
//! [`init_tracing`](crate::telemetry::init_tracing).

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::engine::EvaluationSummary;

/// Span tagging every log line of one evaluation with its `run_id`.
///
/// Attach it with [`tracing::Instrument`] rather than entering it, so the
/// evaluation future stays `Send`.
pub fn evaluation_span(run_id: &Uuid) -> tracing::Span {
    tracing::info_span!("crlint.evaluate", run_id = %run_id)
}

/// Emit event: evaluation started.
pub fn emit_evaluation_started(commits: usize, modified: usize, created: usize) {
    info!(
        event = "evaluation.started",
        commits = commits,
        modified_files = modified,
        created_files = created,
    );
}

/// Emit event: one check finished.
pub fn emit_check_completed(check: &str, diagnostics: usize) {
    debug!(event = "check.completed", check = %check, diagnostics = diagnostics);
}

/// Emit event: SVG scans dispatched.
pub fn emit_svg_scans_dispatched(candidates: usize) {
    debug!(event = "svg.dispatched", candidates = candidates);
}

/// Emit event: a scan task panicked or was cancelled (warning level).
pub fn emit_svg_task_failed(error: &dyn std::fmt::Display) {
    warn!(event = "svg.task_failed", error = %error);
}

/// Emit event: evaluation finished.
pub fn emit_evaluation_finished(summary: &EvaluationSummary) {
    info!(
        event = "evaluation.finished",
        flags = summary.flags,
        notes = summary.notes,
        explains = summary.explains,
        svg_scanned = summary.svg_files_scanned,
        svg_skipped = summary.svg_files_skipped,
        duration_ms = summary.duration_ms,
    );
}
