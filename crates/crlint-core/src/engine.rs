//! Rule engine: runs every check against one change request.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::Instrument;
use uuid::Uuid;

use crate::checks::{self, SvgScan};
use crate::config::EngineConfig;
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::facts::{ChangeFacts, FileChanges};
use crate::fetch::ContentFetcher;
use crate::obs;

/// Counters describing one evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub run_id: Uuid,
    pub flags: usize,
    pub notes: usize,
    pub explains: usize,
    pub svg_files_scanned: usize,
    pub svg_files_skipped: usize,
    pub duration_ms: u64,
}

impl EvaluationSummary {
    fn record(&mut self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::Flag { .. } => self.flags += 1,
            Diagnostic::Note { .. } => self.notes += 1,
            Diagnostic::Explain { .. } => self.explains += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.flags + self.notes + self.explains
    }
}

/// Result of scanning every SVG candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvgScanReport {
    /// Diagnostics in candidate order.
    pub diagnostics: Vec<Diagnostic>,
    pub scanned: usize,
    pub skipped: usize,
}

/// Stateless rule engine. One instance can evaluate any number of change
/// requests; nothing is carried over between runs.
pub struct RuleEngine {
    config: EngineConfig,
    fetcher: Arc<dyn ContentFetcher>,
}

impl RuleEngine {
    pub fn new(config: EngineConfig, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { config, fetcher }
    }

    /// Evaluate `facts` and report every diagnostic to `sink`.
    ///
    /// Checks run in a fixed order. SVG scans run concurrently, but all of
    /// them are joined before this returns and their diagnostics are emitted
    /// in candidate order, so identical input yields an identical sequence.
    pub async fn evaluate(
        &self,
        facts: &ChangeFacts,
        sink: &dyn DiagnosticSink,
    ) -> EvaluationSummary {
        let run_id = Uuid::new_v4();
        self.evaluate_run(run_id, facts, sink)
            .instrument(obs::evaluation_span(&run_id))
            .await
    }

    async fn evaluate_run(
        &self,
        run_id: Uuid,
        facts: &ChangeFacts,
        sink: &dyn DiagnosticSink,
    ) -> EvaluationSummary {
        let start = Instant::now();
        obs::emit_evaluation_started(
            facts.commits.len(),
            facts.files.modified.len(),
            facts.files.created.len(),
        );

        let mut summary = EvaluationSummary {
            run_id,
            ..EvaluationSummary::default()
        };
        let mut report = |check: &str, diagnostics: Vec<Diagnostic>| {
            obs::emit_check_completed(check, diagnostics.len());
            for d in &diagnostics {
                sink.emit(d);
                summary.record(d);
            }
        };

        for (check, diagnostics) in self.synchronous_checks(facts) {
            report(check, diagnostics);
        }

        let svg = self.scan_svgs(&facts.files).await;
        report("svg", svg.diagnostics);

        summary.svg_files_scanned = svg.scanned;
        summary.svg_files_skipped = svg.skipped;
        summary.duration_ms = start.elapsed().as_millis() as u64;
        obs::emit_evaluation_finished(&summary);
        summary
    }

    /// Run the metadata, commit and file classification checks in order.
    pub fn synchronous_checks(&self, facts: &ChangeFacts) -> Vec<(&'static str, Vec<Diagnostic>)> {
        let cr = &facts.change_request;
        let files = &facts.files;
        let long_title = self.config.long_title_threshold;

        let (mut commit_diags, commit_summary) = checks::check_commits(&facts.commits, long_title);
        commit_diags.extend(checks::summary_explanations(&commit_summary, long_title));

        vec![
            ("description", checks::check_description(cr)),
            ("assignee", checks::check_assignee(cr)),
            ("size", checks::check_size(cr, self.config.big_change_threshold)),
            ("commits", commit_diags),
            (
                "lockfile",
                checks::check_lockfile(
                    files,
                    &self.config.package_manifest,
                    &self.config.package_lockfile,
                ),
            ),
            ("raster_images", checks::check_raster_images(files)),
            ("fonts", checks::check_fonts(files)),
        ]
    }

    /// Fetch and scan every SVG candidate concurrently, one task per file.
    pub async fn scan_svgs(&self, files: &FileChanges) -> SvgScanReport {
        let candidates = checks::svg_candidates(files);
        obs::emit_svg_scans_dispatched(candidates.len());

        let mut join_set = JoinSet::new();
        for (idx, path) in candidates.iter().cloned().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            join_set.spawn(
                async move {
                    let scan = checks::scan_svg_file(fetcher.as_ref(), &path).await;
                    (idx, scan)
                }
                .instrument(tracing::Span::current()),
            );
        }

        let mut slots: Vec<Option<SvgScan>> = vec![None; candidates.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, scan)) => slots[idx] = Some(scan),
                Err(e) => obs::emit_svg_task_failed(&e),
            }
        }

        let mut report = SvgScanReport::default();
        for slot in slots {
            match slot {
                Some(SvgScan::Scanned(diagnostics)) => {
                    report.scanned += 1;
                    report.diagnostics.extend(diagnostics);
                }
                Some(SvgScan::Skipped) | None => report.skipped += 1,
            }
        }
        report
    }
}
