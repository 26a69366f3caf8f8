//! Core processing building blocks: resize/blur/crop primitives, crop sampling,
//! per-image pipelines, the worker pool, and parameter types. These are internal
//! primitives consumed by the high-level `api` module.
pub mod batch;
pub mod params;
pub mod processing;
