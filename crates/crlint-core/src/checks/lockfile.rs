//! Dependency manifest / lock file consistency.

use crate::diagnostic::Diagnostic;
use crate::facts::FileChanges;

/// Flag a modified `manifest` whose `lockfile` was left untouched.
///
/// Only the modified set is consulted: a newly created manifest, or a lock
/// file changed on its own, never fires.
pub fn check_lockfile(files: &FileChanges, manifest: &str, lockfile: &str) -> Vec<Diagnostic> {
    if !files.is_modified(manifest) || files.is_modified(lockfile) {
        return Vec::new();
    }
    vec![
        Diagnostic::flag(format!(
            "`{manifest}` was modified but `{lockfile}` was not updated."
        )),
        Diagnostic::explain(format!(
            "Dependency changes in `{manifest}` should be committed together with the \
             regenerated `{lockfile}`, otherwise other checkouts resolve different \
             versions. Run your package manager's install command and commit the lock \
             file."
        )),
    ]
}
