//! Web font format hygiene for newly added font files.

use crate::diagnostic::Diagnostic;
use crate::facts::FileChanges;

/// Which font formats appear among created files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontFormats {
    pub ttf: bool,
    pub woff: bool,
    pub woff2: bool,
    pub eot: bool,
}

impl FontFormats {
    pub fn classify(files: &FileChanges) -> Self {
        let mut formats = Self::default();
        for path in &files.created {
            if path.ends_with(".ttf") {
                formats.ttf = true;
            } else if path.ends_with(".woff") {
                formats.woff = true;
            } else if path.ends_with(".woff2") {
                formats.woff2 = true;
            } else if path.ends_with(".eot") {
                formats.eot = true;
            }
        }
        formats
    }
}

/// Evaluate the three independent font rules.
pub fn check_fonts(files: &FileChanges) -> Vec<Diagnostic> {
    let formats = FontFormats::classify(files);
    let mut out = Vec::new();

    if formats.eot {
        out.push(Diagnostic::flag("This MR adds EOT fonts, a deprecated format."));
        out.push(Diagnostic::explain(
            "EOT is only understood by legacy Internet Explorer. Drop it and ship WOFF2 \
             with a WOFF fallback instead.",
        ));
    }
    if formats.ttf && !formats.woff && !formats.woff2 {
        out.push(Diagnostic::flag(
            "This MR adds TTF fonts without WOFF or WOFF2 versions.",
        ));
        out.push(Diagnostic::explain(
            "TTF files are large and uncompressed. Convert them to WOFF2 (and WOFF as a \
             fallback), for example with `woff2_compress`, and reference those in your \
             `@font-face` rules.",
        ));
    }
    if formats.woff2 && !formats.woff {
        out.push(Diagnostic::flag(
            "This MR adds WOFF2 fonts without a WOFF fallback.",
        ));
        out.push(Diagnostic::explain(
            "Browsers without WOFF2 support need a WOFF fallback. Add a `.woff` next to \
             each `.woff2` and list both in `@font-face`.",
        ));
    }

    out
}
