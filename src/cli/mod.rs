//! Command Line Interface (CLI) layer for srprep.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `resize-pipeline` and
//! `crop-pair-generator` commands. It merges config files and flags into
//! parameter structs and hands them to `srprep::api`.
//!
//! If you are embedding srprep into another application, prefer using
//! the high-level `srprep::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
