//! File reading and validation ahead of tag extraction

pub mod processor;

pub use processor::{
    create_processor_from_preferences, process_file, FileMetadata, FileProcessingResult,
    FileProcessor, FileProcessorError,
};
