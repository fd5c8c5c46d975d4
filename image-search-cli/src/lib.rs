// ABOUTME: Library exports for image search CLI modules for testing and external use
// ABOUTME: Makes internal modules available to integration tests and benchmarks

pub mod app;
pub mod cli;
pub mod cli_output;
pub mod config;
pub mod constants;
pub mod output;
