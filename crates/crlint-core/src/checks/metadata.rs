//! Change-request metadata checks: description, assignee, size.

use crate::diagnostic::Diagnostic;
use crate::facts::ChangeRequest;

/// Flag a change request whose description is empty after trimming.
pub fn check_description(cr: &ChangeRequest) -> Vec<Diagnostic> {
    if !cr.description().trim().is_empty() {
        return Vec::new();
    }
    vec![
        Diagnostic::flag("This MR does not include a description."),
        Diagnostic::explain(
            "It's always good to include a description in your MR, even if it's \
             just a few words.",
        ),
    ]
}

/// Flag a change request nobody is assigned to.
pub fn check_assignee(cr: &ChangeRequest) -> Vec<Diagnostic> {
    if cr.is_assigned() {
        Vec::new()
    } else {
        vec![Diagnostic::flag("Nobody is assigned to this MR.")]
    }
}

/// Flag a change request touching more than `threshold` files.
pub fn check_size(cr: &ChangeRequest, threshold: u64) -> Vec<Diagnostic> {
    let count = cr.changes_count;
    if count.get() <= threshold {
        return Vec::new();
    }
    vec![
        Diagnostic::flag("Merge Request is quite large"),
        Diagnostic::explain(format!(
            "Your MR size seems relatively large ({count} files). If your Merge Request \
             contains multiple changes, split each into separate MR. This helps creating \
             faster, easier reviews."
        )),
    ]
}
