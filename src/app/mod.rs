// BuildSleuth - app/mod.rs
//
// Application layer: orchestration of a scan run.
// Dependencies: core and platform layers.

pub mod scan;
