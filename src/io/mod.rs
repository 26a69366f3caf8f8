//! I/O layer: source directory listing, output naming, progress display, and
//! `writers` for encoding rendered images to disk.
pub mod naming;
pub mod progress;
pub mod scan;
pub mod writers;

pub use naming::{OutputRoots, crop_file_name, source_file_name};
pub use progress::BatchProgress;
pub use scan::{SourceListing, list_source_images};
