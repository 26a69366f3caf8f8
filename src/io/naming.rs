//! Output root and file naming for LQ/GT pairs.
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// LQ and GT output directories derived from a shared prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRoots {
    pub lq: PathBuf,
    pub gt: PathBuf,
}

impl OutputRoots {
    /// `prefix` with each size appended as plain text, e.g. `data/train_` -> `data/train_64`
    pub fn from_prefix(prefix: &Path, lq_size: u32, gt_size: u32) -> Self {
        Self {
            lq: append_to_path(prefix, lq_size),
            gt: append_to_path(prefix, gt_size),
        }
    }

    pub fn coincide(&self) -> bool {
        self.lq == self.gt
    }
}

fn append_to_path(prefix: &Path, size: u32) -> PathBuf {
    let mut joined: OsString = prefix.as_os_str().to_owned();
    joined.push(size.to_string());
    PathBuf::from(joined)
}

/// File name of a source path, as used for the full-frame output
pub fn source_file_name(path: &Path) -> Result<OsString> {
    path.file_name()
        .map(|n| n.to_owned())
        .ok_or_else(|| Error::Processing(format!("path has no file name: {path:?}")))
}

/// `{stem}_crop_{index}{.ext}`; the extension part is empty when the source has none
pub fn crop_file_name(path: &Path, index: usize) -> Result<OsString> {
    let stem = path
        .file_stem()
        .ok_or_else(|| Error::Processing(format!("path has no file name: {path:?}")))?;
    let mut name = stem.to_owned();
    name.push(format!("_crop_{index}"));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(name)
}
