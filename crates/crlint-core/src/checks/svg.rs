//! SVG content scanning.
//!
//! SVGs are checked line by line for embedded raster data, comments and
//! Inkscape editor metadata. Comment and Inkscape findings are latched per
//! file: only their first occurrence is reported.

use tracing::{debug, warn};

use crate::diagnostic::Diagnostic;
use crate::facts::FileChanges;
use crate::fetch::ContentFetcher;

const SVG_SUFFIX: &str = ".svg";
const EMBEDDED_IMAGE_MARKER: &str = "data:image";
const COMMENT_MARKER: &str = "<!--";
const INKSCAPE_MARKER: &str = "inkscape:";

/// Outcome of scanning one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvgScan {
    Scanned(Vec<Diagnostic>),
    Skipped,
}

/// Created and modified SVGs, created first, each path once.
pub fn svg_candidates(files: &FileChanges) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for path in files.created.iter().chain(&files.modified) {
        if path.ends_with(SVG_SUFFIX) && !out.contains(path) {
            out.push(path.clone());
        }
    }
    out
}

/// Scan SVG text top to bottom. Line numbers are 1-indexed.
pub fn scan_svg_content(path: &str, content: &str) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut comment_seen = false;
    let mut inkscape_seen = false;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;

        if line.contains(EMBEDDED_IMAGE_MARKER) {
            out.push(Diagnostic::flag_at(
                "SVG embeds a raster image (`data:image`). Reference an external file \
                 or convert it to vector paths.",
                path,
                line_no,
            ));
        }
        if !comment_seen && line.contains(COMMENT_MARKER) {
            comment_seen = true;
            out.push(Diagnostic::flag_at(
                "SVG contains comments. Strip them with an optimizer such as SVGO.",
                path,
                line_no,
            ));
        }
        if !inkscape_seen && line.contains(INKSCAPE_MARKER) {
            inkscape_seen = true;
            out.push(Diagnostic::flag_at(
                "SVG contains Inkscape editor metadata (`inkscape:`). Save it as plain \
                 or optimized SVG.",
                path,
                line_no,
            ));
        }
    }

    out
}

/// Fetch one SVG and scan it. Fetch failures and empty content are skips.
pub async fn scan_svg_file(fetcher: &dyn ContentFetcher, path: &str) -> SvgScan {
    match fetcher.fetch(path).await {
        Ok(Some(content)) if !content.is_empty() => SvgScan::Scanned(scan_svg_content(path, &content)),
        Ok(_) => {
            debug!(path = %path, "svg content empty or missing, skipping");
            SvgScan::Skipped
        }
        Err(e) => {
            warn!(path = %path, error = %e, "svg fetch failed, skipping");
            SvgScan::Skipped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryContentFetcher;

    fn lines_of(diags: &[Diagnostic]) -> Vec<Option<usize>> {
        diags
            .iter()
            .map(|d| match d {
                Diagnostic::Flag { line, .. } => *line,
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_comment_and_inkscape_latched() {
        let content = "<svg><!-- note -->\n<path inkscape:foo/></svg>\n<!-- again -->\n<g inkscape:label=\"x\"/>";
        let out = scan_svg_content("icon.svg", content);
        assert_eq!(out.len(), 2);
        assert!(out[0].message().contains("comments"));
        assert!(out[1].message().contains("Inkscape"));
        assert_eq!(lines_of(&out), vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_embedded_images_repeat() {
        let content = "<image href=\"data:image/png;base64,AAA\"/>\n<g/>\n<image href=\"data:image/png;base64,AAA\"/>";
        let out = scan_svg_content("a.svg", content);
        assert_eq!(out.len(), 2);
        assert_eq!(lines_of(&out), vec![Some(1), Some(3)]);
    }

    #[test]
    fn test_one_line_can_trigger_all_detectors() {
        let out = scan_svg_content("a.svg", "<!-- x --><g inkscape:a=\"1\" href=\"data:image/gif\"/>");
        assert_eq!(out.len(), 3);
        assert_eq!(lines_of(&out), vec![Some(1), Some(1), Some(1)]);
    }

    #[test]
    fn test_flags_carry_path() {
        let out = scan_svg_content("img/logo.svg", "<!-- c -->");
        assert!(matches!(
            &out[0],
            Diagnostic::Flag { file: Some(f), .. } if f == "img/logo.svg"
        ));
    }

    #[test]
    fn test_candidates_union_without_duplicates() {
        let files = FileChanges {
            modified: vec!["b.svg".to_string(), "a.svg".to_string(), "c.png".to_string()],
            created: vec!["a.svg".to_string(), "d.SVG".to_string()],
        };
        assert_eq!(svg_candidates(&files), vec!["a.svg".to_string(), "b.svg".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_and_empty_content_skip() {
        let fetcher = MemoryContentFetcher::new().with_file("empty.svg", "");
        assert_eq!(scan_svg_file(&fetcher, "empty.svg").await, SvgScan::Skipped);
        assert_eq!(scan_svg_file(&fetcher, "missing.svg").await, SvgScan::Skipped);
    }

    #[tokio::test]
    async fn test_clean_svg_scans_empty() {
        let fetcher = MemoryContentFetcher::new().with_file("ok.svg", "<svg><path d=\"M0 0\"/></svg>");
        assert_eq!(
            scan_svg_file(&fetcher, "ok.svg").await,
            SvgScan::Scanned(Vec::new())
        );
    }
}
