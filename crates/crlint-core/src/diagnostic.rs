//! Review diagnostics and the sink they are reported through.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// A single review diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Warning shown prominently on the change request.
    Flag {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<String>,
        /// 1-indexed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
    },

    /// Informational message.
    Note { message: String },

    /// Long-form markdown guidance.
    Explain { message: String },
}

impl Diagnostic {
    pub fn flag(message: impl Into<String>) -> Self {
        Diagnostic::Flag {
            message: message.into(),
            file: None,
            line: None,
        }
    }

    /// A flag anchored to a file line.
    pub fn flag_at(message: impl Into<String>, file: impl Into<String>, line: usize) -> Self {
        Diagnostic::Flag {
            message: message.into(),
            file: Some(file.into()),
            line: Some(line),
        }
    }

    pub fn note(message: impl Into<String>) -> Self {
        Diagnostic::Note {
            message: message.into(),
        }
    }

    pub fn explain(message: impl Into<String>) -> Self {
        Diagnostic::Explain {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Diagnostic::Flag { message, .. }
            | Diagnostic::Note { message }
            | Diagnostic::Explain { message } => message,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Diagnostic::Flag { .. })
    }

    pub fn is_note(&self) -> bool {
        matches!(self, Diagnostic::Note { .. })
    }

    pub fn is_explain(&self) -> bool {
        matches!(self, Diagnostic::Explain { .. })
    }
}

/// Write-only reporting interface of the host runtime.
///
/// Implementations must tolerate calls from concurrently running scans.
pub trait DiagnosticSink: Send + Sync {
    fn flag(&self, message: &str, file: Option<&str>, line: Option<usize>);

    fn note(&self, message: &str);

    fn explain(&self, message: &str);

    /// Route a [`Diagnostic`] to the matching channel.
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::Flag {
                message,
                file,
                line,
            } => self.flag(message, file.as_deref(), *line),
            Diagnostic::Note { message } => self.note(message),
            Diagnostic::Explain { message } => self.explain(message),
        }
    }
}

/// Sink that records diagnostics in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    recorded: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, diagnostic: Diagnostic) {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }

    /// Snapshot of everything recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.recorded
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn flag_count(&self) -> usize {
        self.count(Diagnostic::is_flag)
    }

    pub fn note_count(&self) -> usize {
        self.count(Diagnostic::is_note)
    }

    pub fn explain_count(&self) -> usize {
        self.count(Diagnostic::is_explain)
    }

    fn count(&self, pred: impl Fn(&Diagnostic) -> bool) -> usize {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|d| pred(d))
            .count()
    }
}

impl DiagnosticSink for MemorySink {
    fn flag(&self, message: &str, file: Option<&str>, line: Option<usize>) {
        self.push(Diagnostic::Flag {
            message: message.to_string(),
            file: file.map(str::to_string),
            line,
        });
    }

    fn note(&self, message: &str) {
        self.push(Diagnostic::note(message));
    }

    fn explain(&self, message: &str) {
        self.push(Diagnostic::explain(message));
    }
}
