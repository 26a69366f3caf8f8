//! Source directory listing with extension filtering.
use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::debug;

use crate::error::{Error, Result};

/// Regular files of a source directory, split into matches and skipped entries
#[derive(Debug, Clone, Default)]
pub struct SourceListing {
    /// Matching image paths in sorted order
    pub images: Vec<PathBuf>,
    pub skipped: usize,
}

/// Whether `path` passes the extension filter.
///
/// An empty filter accepts any extension the `image` crate recognises. Matching is
/// case-insensitive and ignores a leading dot in the filter entries.
pub fn matches_extensions(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    if extensions.is_empty() {
        return ImageFormat::from_extension(ext).is_some();
    }
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// List the images directly inside `dir` (no recursion).
pub fn list_source_images(dir: &Path, extensions: &[String]) -> Result<SourceListing> {
    if !dir.is_dir() {
        return Err(Error::SourceNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut listing = SourceListing::default();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && matches_extensions(&path, extensions) {
            listing.images.push(path);
        } else {
            debug!("Skipping: {:?}", path);
            listing.skipped += 1;
        }
    }
    listing.images.sort();
    Ok(listing)
}
