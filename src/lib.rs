#![doc = r#"
srprep — dataset preparation for image super-resolution training.

This crate turns a directory of images into training data: a resize/blur pipeline
that brings every image to a fixed `WIDTHxHEIGHT`, and a crop pair generator that
writes low-quality (LQ) and ground-truth (GT) pairs, one from the full frame and
several from random square crops. It powers the `srprep` CLI and can be embedded
in your own Rust applications.

Quick start: resize a directory
-------------------------------
```rust,no_run
use std::path::Path;
use srprep::{resize_directory, ResizeParams, TargetSize};

fn main() -> srprep::Result<()> {
    let params = ResizeParams {
        size: "256x256".parse::<TargetSize>()?,
        radius: Some(2),
        ..ResizeParams::default()
    };

    let report = resize_directory(Path::new("/data/raw"), Path::new("/data/lq"), &params)?;
    println!("processed={} skipped={}", report.processed, report.skipped);
    Ok(())
}
```

Crop pairs
----------
```rust,no_run
use std::path::Path;
use srprep::{generate_crop_pairs, CropPairParams};

fn main() -> srprep::Result<()> {
    let params = CropPairParams {
        num_crops: 4,
        seed: Some(42),
        ..CropPairParams::default()
    };

    // Writes into /data/pairs_64 and /data/pairs_128
    let report = generate_crop_pairs(Path::new("/data/raw"), Path::new("/data/pairs_"), &params)?;
    println!("files written: {}", report.files_written);
    Ok(())
}
```

Error handling
--------------
All public functions return `srprep::Result<T>`. Under the default fail-fast policy
a failing image surfaces as `Error::Item` carrying its path; with
`continue_on_error` the failures are collected in `BatchReport::failures`.

```rust,no_run
use std::path::Path;
use srprep::{resize_directory, Error, ResizeParams};

fn main() {
    match resize_directory(Path::new("/missing"), Path::new("/out"), &ResizeParams::default()) {
        Ok(report) => println!("{} images", report.processed),
        Err(Error::SourceNotFound { path }) => eprintln!("no such directory: {path:?}"),
        Err(Error::Item { path, source }) => eprintln!("{path:?} failed: {source}"),
        Err(other) => eprintln!("error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — resize/blur/crop primitives, crop sampling, and the worker pool.
- [`io`] — source listing, output naming, progress, and image writers.
- [`types`] — `TargetSize` and `ResampleFilter`.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::batch::{ItemFailure, WorkerPool, resolve_worker_count};
pub use crate::core::params::{CropPairParams, ResizeParams, load_params};
pub use crate::core::processing::crop::{CropRegion, sample_crop_region, sample_crop_regions};
pub use error::{Error, Result};
pub use io::naming::OutputRoots;
pub use types::{ResampleFilter, TargetSize};

pub use api::{
    BatchReport, crop_pairs_for_image, generate_crop_pairs, image_rng, resize_directory,
    resize_image_file,
};
