// BuildSleuth - platform/mod.rs
//
// Platform abstraction layer: filesystem reads, config directories.
// Dependencies: standard library, directories, memmap2, toml.
// Must NOT depend on: app.

pub mod config;
pub mod fs;
