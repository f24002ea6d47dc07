//! Independent review checks.
//!
//! Each check reads a slice of [`ChangeFacts`](crate::facts::ChangeFacts)
//! and returns the diagnostics it would emit. None of them fail or depend on
//! another check's output.

pub mod commits;
pub mod fonts;
pub mod images;
pub mod lockfile;
pub mod metadata;
pub mod svg;

pub use commits::{
    check_commits, is_wrongly_worded, summary_explanations, CommitSummaryFlags, TitleViolations,
};
pub use fonts::{check_fonts, FontFormats};
pub use images::check_raster_images;
pub use lockfile::check_lockfile;
pub use metadata::{check_assignee, check_description, check_size};
pub use svg::{scan_svg_content, scan_svg_file, svg_candidates, SvgScan};
