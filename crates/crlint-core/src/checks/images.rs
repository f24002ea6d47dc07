//! Raster image additions.

use crate::diagnostic::Diagnostic;
use crate::facts::FileChanges;

const RASTER_SUFFIXES: [&str; 2] = [".png", ".gif"];

/// Note once if any created file is a PNG or GIF, however many there are.
pub fn check_raster_images(files: &FileChanges) -> Vec<Diagnostic> {
    let any_raster = files
        .created
        .iter()
        .any(|p| RASTER_SUFFIXES.iter().any(|s| p.ends_with(s)));
    if !any_raster {
        return Vec::new();
    }
    vec![
        Diagnostic::note("This MR adds PNG or GIF images. Make sure they are optimized."),
        Diagnostic::explain(
            "Raster images are often much larger than they need to be. Run them through \
             a lossless optimizer such as `optipng`, `pngcrush` or `gifsicle`, or an app \
             like ImageOptim, before committing.",
        ),
    ]
}
