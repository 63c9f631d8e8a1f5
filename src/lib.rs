// BuildSleuth - lib.rs
//
// Library entry point, exposing all modules for integration testing
// and programmatic use. CLI parsing lives in `main.rs`.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
