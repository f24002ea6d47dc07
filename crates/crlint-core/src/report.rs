//! Rendering of one run's diagnostics for the host's output stream.
//!
//! Nothing here is persisted: the report is printed once and discarded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::engine::EvaluationSummary;

/// Everything one evaluation produced, in machine-readable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub summary: EvaluationSummary,
    pub diagnostics: Vec<Diagnostic>,
}

impl EvaluationReport {
    pub fn new(summary: EvaluationSummary, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            run_id: summary.run_id.to_string(),
            generated_at: Utc::now(),
            summary,
            diagnostics,
        }
    }

    pub fn render_markdown(&self) -> String {
        render_markdown(&self.diagnostics)
    }
}

/// Render diagnostics as Markdown: warnings, then notes, then guidance.
pub fn render_markdown(diagnostics: &[Diagnostic]) -> String {
    let mut warnings = Vec::new();
    let mut notes = Vec::new();
    let mut explains = Vec::new();

    for d in diagnostics {
        match d {
            Diagnostic::Flag {
                message,
                file,
                line,
            } => {
                let location = match (file, line) {
                    (Some(f), Some(l)) => format!(" (`{f}:{l}`)"),
                    (Some(f), None) => format!(" (`{f}`)"),
                    _ => String::new(),
                };
                warnings.push(format!("- :warning: {message}{location}"));
            }
            Diagnostic::Note { message } => notes.push(format!("- {message}")),
            Diagnostic::Explain { message } => explains.push(message.as_str()),
        }
    }

    if warnings.is_empty() && notes.is_empty() && explains.is_empty() {
        return "No review findings.\n".to_string();
    }

    let mut md = String::new();
    if !warnings.is_empty() {
        md.push_str("## Warnings\n\n");
        md.push_str(&warnings.join("\n"));
        md.push_str("\n\n");
    }
    if !notes.is_empty() {
        md.push_str("## Notes\n\n");
        md.push_str(&notes.join("\n"));
        md.push_str("\n\n");
    }
    for block in explains {
        md.push_str(block);
        md.push_str("\n\n");
    }
    md
}
