//! Bounded worker pool that runs one independent task per source image.
//!
//! Tasks share nothing but atomic counters, the failure list and the progress bar.
//! Completion order is unspecified. Under fail-fast, the first failure stops new
//! work from being dispatched and is returned with the offending path attached.
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::io::progress::BatchProgress;

/// Translate a joblib-style `n_jobs` into a worker count.
///
/// Positive values are taken as-is; negative values count back from the number of
/// available cores, so `-1` means all of them and `-2` all but one.
pub fn resolve_worker_count(n_jobs: i32, available: usize) -> Result<usize> {
    match n_jobs {
        0 => Err(Error::InvalidArgument {
            arg: "n_jobs",
            value: n_jobs.to_string(),
        }),
        n if n > 0 => Ok(n as usize),
        n => {
            let back = n.unsigned_abs() as usize - 1;
            Ok(available.saturating_sub(back).max(1))
        }
    }
}

pub fn available_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    pub fn new(n_jobs: i32) -> Result<Self> {
        let workers = resolve_worker_count(n_jobs, available_cores())?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("srprep-worker-{i}"))
            .build()?;
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `task` over every item. Each task returns the number of files it wrote.
    pub fn run<F>(
        &self,
        items: &[PathBuf],
        continue_on_error: bool,
        progress: &BatchProgress,
        task: F,
    ) -> Result<BatchOutcome>
    where
        F: Fn(usize, &Path) -> Result<usize> + Send + Sync,
    {
        let processed = AtomicUsize::new(0);
        let files_written = AtomicUsize::new(0);
        let failures = Mutex::new(Vec::new());

        let run = self.pool.install(|| {
            items
                .par_iter()
                .enumerate()
                .try_for_each(|(index, path)| {
                    let outcome = task(index, path.as_path());
                    progress.inc();
                    match outcome {
                        Ok(written) => {
                            debug!("Processed {:?} ({} files)", path, written);
                            processed.fetch_add(1, Ordering::Relaxed);
                            files_written.fetch_add(written, Ordering::Relaxed);
                            Ok(())
                        }
                        Err(e) if continue_on_error => {
                            warn!("Error processing {:?}: {}", path, e);
                            record_failure(&failures, path, &e);
                            Ok(())
                        }
                        Err(e) => Err(Error::item(path, e)),
                    }
                })
        });
        run?;

        let mut failures = failures
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        failures.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(BatchOutcome {
            processed: processed.into_inner(),
            files_written: files_written.into_inner(),
            failures,
        })
    }
}

/// Push onto the shared list even if another worker panicked while holding it.
fn record_failure(failures: &Mutex<Vec<ItemFailure>>, path: &Path, error: &Error) {
    failures
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push(ItemFailure {
            path: path.to_path_buf(),
            message: error.to_string(),
        });
}

/// An image that failed while the batch kept going
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub processed: usize,
    pub files_written: usize,
    pub failures: Vec<ItemFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_joblib_style_job_counts() {
        assert_eq!(resolve_worker_count(-1, 8).unwrap(), 8);
        assert_eq!(resolve_worker_count(-2, 8).unwrap(), 7);
        assert_eq!(resolve_worker_count(-20, 8).unwrap(), 1);
        assert_eq!(resolve_worker_count(3, 8).unwrap(), 3);
        assert_eq!(resolve_worker_count(16, 8).unwrap(), 16);
        assert!(matches!(
            resolve_worker_count(0, 8),
            Err(Error::InvalidArgument { arg: "n_jobs", .. })
        ));
    }

    fn items(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("img_{i:02}.png"))).collect()
    }

    #[test]
    fn counts_every_item() {
        let pool = WorkerPool::new(2).unwrap();
        assert_eq!(pool.workers(), 2);
        let outcome = pool
            .run(&items(10), false, &BatchProgress::hidden(), |_, _| Ok(2))
            .unwrap();
        assert_eq!(outcome.processed, 10);
        assert_eq!(outcome.files_written, 20);
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn fail_fast_names_the_failed_item() {
        let pool = WorkerPool::new(1).unwrap();
        let err = pool
            .run(&items(5), false, &BatchProgress::hidden(), |i, _| {
                if i == 3 {
                    Err(Error::Processing("corrupt".into()))
                } else {
                    Ok(1)
                }
            })
            .unwrap_err();
        match err {
            Error::Item { path, source } => {
                assert_eq!(path, PathBuf::from("img_03.png"));
                assert!(matches!(*source, Error::Processing(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    // A worker that panicked while holding the list must not hide later failures
    #[test]
    fn poisoned_failure_list_still_records_failures() {
        let failures = Mutex::new(Vec::new());
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = failures.lock().unwrap();
            panic!("worker panicked");
        }));
        assert!(failures.is_poisoned());

        let err = Error::Processing("unreadable".into());
        record_failure(&failures, Path::new("img_00.png"), &err);
        record_failure(&failures, Path::new("img_01.png"), &err);

        let list = failures.into_inner().unwrap_or_else(|p| p.into_inner());
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].path, PathBuf::from("img_00.png"));
        assert_eq!(list[1].message, "Processing error: unreadable");
    }

    #[test]
    fn continue_on_error_collects_failures() {
        let pool = WorkerPool::new(4).unwrap();
        let outcome = pool
            .run(&items(6), true, &BatchProgress::hidden(), |i, _| {
                if i % 2 == 0 {
                    Err(Error::Processing("unreadable".into()))
                } else {
                    Ok(1)
                }
            })
            .unwrap();
        assert_eq!(outcome.processed, 3);
        assert_eq!(outcome.files_written, 3);
        let failed: Vec<_> = outcome.failures.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            failed,
            vec![
                PathBuf::from("img_00.png"),
                PathBuf::from("img_02.png"),
                PathBuf::from("img_04.png")
            ]
        );
    }
}
