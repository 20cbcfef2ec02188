// Internal modules
pub mod batch;
pub mod config;
pub mod engine;
pub mod file_processor;
#[macro_use]
pub mod logging;
pub mod nesting;
pub mod pipeline;
pub mod scanner;
pub mod tags;
pub mod utils;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults};
pub use engine::{extract_tags, Diagnostic, ParseContext, TagExtraction};
pub use pipeline::{OutputFormat, PipelineError, TagFileResult};
pub use tags::{matlab_parser, TagKind, TagRecord, TagScope, TagSink};
