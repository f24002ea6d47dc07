//! Commit title heuristics and their per-run aggregation.
//!
//! Every commit is inspected independently and flagged immediately. The four
//! violation categories are also OR-folded into [`CommitSummaryFlags`], which
//! is read once after the loop so that each category's guidance is explained
//! once per change request instead of once per commit.

use crate::diagnostic::Diagnostic;
use crate::facts::Commit;

const MERGE_COMMIT_PREFIX: &str = "Merge branch";

/// Violations found in a single commit title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TitleViolations {
    pub wrong_wording: bool,
    pub merge_commit: bool,
    pub trailing_full_stop: bool,
    pub overlong_title: bool,
}

impl TitleViolations {
    pub fn inspect(title: &str, long_title_threshold: usize) -> Self {
        Self {
            wrong_wording: is_wrongly_worded(title),
            merge_commit: title.starts_with(MERGE_COMMIT_PREFIX),
            trailing_full_stop: title.ends_with('.'),
            overlong_title: title.chars().count() > long_title_threshold,
        }
    }
}

/// Violation categories seen across all commits of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitSummaryFlags {
    pub wrong_wording: bool,
    pub merge_commit_present: bool,
    pub trailing_full_stop: bool,
    pub overlong_title: bool,
}

impl CommitSummaryFlags {
    pub fn absorb(&mut self, v: TitleViolations) {
        self.wrong_wording |= v.wrong_wording;
        self.merge_commit_present |= v.merge_commit;
        self.trailing_full_stop |= v.trailing_full_stop;
        self.overlong_title |= v.overlong_title;
    }

    /// Whether any violation fixable by rewording and force-pushing was seen.
    pub fn needs_amend(&self) -> bool {
        self.wrong_wording || self.trailing_full_stop || self.overlong_title
    }

    pub fn any(&self) -> bool {
        self.needs_amend() || self.merge_commit_present
    }
}

/// Coarse imperative-mood check on the first space-separated word.
///
/// Past tense (`Fixed`), gerunds (`Adding`) and third person (`Adds`) are
/// flagged. A trailing `s` only counts after some other letter, so `Access`
/// and a lone `s` pass.
pub fn is_wrongly_worded(title: &str) -> bool {
    let first = title.split(' ').next().unwrap_or_default();
    first.ends_with("ed") || first.ends_with("ing") || is_third_person(first)
}

fn is_third_person(word: &str) -> bool {
    let mut tail = word.chars().rev();
    tail.next() == Some('s') && matches!(tail.next(), Some(c) if c != 's')
}

/// Flag every commit title violation and fold the categories.
pub fn check_commits(
    commits: &[Commit],
    long_title_threshold: usize,
) -> (Vec<Diagnostic>, CommitSummaryFlags) {
    let mut diagnostics = Vec::new();
    let mut summary = CommitSummaryFlags::default();

    for commit in commits {
        let title = commit.title.as_str();
        let v = TitleViolations::inspect(title, long_title_threshold);

        if v.wrong_wording {
            diagnostics.push(Diagnostic::flag(format!(
                "Commit \"{title}\" is not written in the imperative mood."
            )));
        }
        if v.merge_commit {
            diagnostics.push(Diagnostic::flag(format!(
                "Commit \"{title}\" is a merge commit."
            )));
        }
        if v.trailing_full_stop {
            diagnostics.push(Diagnostic::flag(format!(
                "Commit \"{title}\" ends with a full stop."
            )));
        }
        if v.overlong_title {
            diagnostics.push(Diagnostic::flag(format!(
                "Commit \"{title}\" has a title longer than {long_title_threshold} characters."
            )));
        }

        summary.absorb(v);
    }

    (diagnostics, summary)
}

/// One guidance block per violated category, then the amend instructions.
pub fn summary_explanations(
    summary: &CommitSummaryFlags,
    long_title_threshold: usize,
) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    if summary.wrong_wording {
        out.push(Diagnostic::explain(
            "Commit titles should be written in the imperative mood, as if giving a \
             command: \"Fix bug\" rather than \"Fixed bug\", \"Fixes bug\" or \"Fixing bug\". \
             A good title completes the sentence \"If applied, this commit will ...\".",
        ));
    }
    if summary.merge_commit_present {
        out.push(Diagnostic::explain(
            "This MR contains merge commits. Keep the history linear by rebasing onto the \
             target branch instead of merging it in:\n\n\
             ```sh\ngit fetch origin\ngit rebase origin/<target-branch>\n```",
        ));
    }
    if summary.trailing_full_stop {
        out.push(Diagnostic::explain(
            "Commit titles are headlines, not sentences: leave out the trailing full stop.",
        ));
    }
    if summary.overlong_title {
        out.push(Diagnostic::explain(format!(
            "Keep commit titles at {long_title_threshold} characters or fewer so they stay \
             readable in `git log --oneline` and in the review UI. Put details in the \
             commit body, separated from the title by a blank line."
        )));
    }
    if summary.needs_amend() {
        out.push(Diagnostic::explain(
            "To reword commits, run an interactive rebase and mark them with `reword`, \
             or amend the latest commit, then force-push the branch:\n\n\
             ```sh\ngit rebase -i origin/<target-branch>\n# or: git commit --amend\n\
             git push --force-with-lease\n```",
        ));
    }

    out
}
