//! Configuration module for the mtag engine
//!
//! Compile-time limits live in `constants`; user-facing preferences live
//! in `runtime` and are resolved from environment variables with an
//! optional `mtag.toml` override.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
