// BuildSleuth - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library only (plus tracing for diagnostics).
// Must NOT depend on: platform, app, or any I/O crate directly.

pub mod encoding;
pub mod model;
pub mod report;
pub mod scanner;
